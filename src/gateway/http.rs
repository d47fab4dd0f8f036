use crate::domain::model::{
    AuthResponse, Booking, BookingConfirmation, BookingRequest, Credentials, Registration,
    UserProfile, Venue,
};
use crate::domain::ports::BookingApi;
use crate::utils::error::{Result, TurfbookError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};

/// HTTP implementation of the remote data gateway.
///
/// Failures are normalized before they leave this module: a non-success
/// response becomes a `ServerError` carrying the body's `message` field (or
/// a per-operation default), 404 becomes `NotFoundError`, 401 becomes
/// `UnauthorizedError`.
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            token: RwLock::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(
        &self,
        response: Response,
        resource: &str,
        default_message: &str,
    ) -> Result<T> {
        tracing::debug!(status = %response.status(), "API response");
        if !response.status().is_success() {
            return Err(error_from_response(response, resource, default_message).await);
        }
        Ok(response.json().await?)
    }
}

async fn error_from_response(
    response: Response,
    resource: &str,
    default_message: &str,
) -> TurfbookError {
    let status = response.status();
    match status {
        StatusCode::NOT_FOUND => TurfbookError::NotFoundError {
            resource: resource.to_string(),
        },
        StatusCode::UNAUTHORIZED => TurfbookError::UnauthorizedError,
        _ => {
            // Error bodies carry `{ "message": "..." }` when the server has
            // something to say.
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(|m| m.as_str())
                        .map(str::to_string)
                })
                .unwrap_or_else(|| default_message.to_string());
            TurfbookError::ServerError {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn fetch_venues(&self) -> Result<Vec<Venue>> {
        let url = self.endpoint("/turfs");
        tracing::debug!(%url, "fetching venue list");
        let response = self.client.get(url).send().await?;
        self.parse(response, "Turfs", "Failed to fetch turfs").await
    }

    async fn fetch_venue(&self, id: &str) -> Result<Venue> {
        let url = self.endpoint(&format!("/turfs/{}", id));
        tracing::debug!(%url, "fetching venue detail");
        let response = self.client.get(url).send().await?;
        self.parse(response, "Turf", "Failed to fetch turf details")
            .await
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation> {
        let url = self.endpoint("/bookings");
        tracing::debug!(%url, venue_id = %request.venue_id, "creating booking");
        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await?;
        self.parse(response, "Booking", "Failed to create booking")
            .await
    }

    async fn fetch_my_bookings(&self) -> Result<Vec<Booking>> {
        let url = self.endpoint("/bookings/my");
        tracing::debug!(%url, "fetching user bookings");
        let response = self.authorize(self.client.get(url)).send().await?;
        self.parse(response, "Bookings", "Failed to fetch bookings")
            .await
    }

    async fn cancel_booking(&self, id: &str) -> Result<Booking> {
        let url = self.endpoint(&format!("/bookings/{}/cancel", id));
        tracing::debug!(%url, "cancelling booking");
        let response = self.authorize(self.client.patch(url)).send().await?;
        self.parse(response, "Booking", "Failed to cancel booking")
            .await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let url = self.endpoint("/users/login");
        tracing::debug!(%url, "logging in");
        let response = self.client.post(url).json(credentials).send().await?;
        self.parse(response, "User", "Login failed").await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let url = self.endpoint("/users/register");
        tracing::debug!(%url, "registering");
        let response = self.client.post(url).json(registration).send().await?;
        self.parse(response, "User", "Registration failed").await
    }

    async fn fetch_profile(&self) -> Result<UserProfile> {
        let url = self.endpoint("/users/profile");
        tracing::debug!(%url, "fetching profile");
        let response = self.authorize(self.client.get(url)).send().await?;
        self.parse(response, "Profile", "Failed to fetch profile")
            .await
    }

    fn set_bearer_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}
