use crate::domain::model::{
    AuthResponse, Booking, BookingConfirmation, BookingRequest, Credentials, Registration,
    UserProfile, Venue,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn data_dir(&self) -> &str;
}

/// The remote data gateway. One implementation talks HTTP; tests substitute
/// their own.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn fetch_venues(&self) -> Result<Vec<Venue>>;
    async fn fetch_venue(&self, id: &str) -> Result<Venue>;
    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingConfirmation>;
    async fn fetch_my_bookings(&self) -> Result<Vec<Booking>>;
    async fn cancel_booking(&self, id: &str) -> Result<Booking>;
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse>;
    async fn register(&self, registration: &Registration) -> Result<AuthResponse>;
    async fn fetch_profile(&self) -> Result<UserProfile>;

    /// Token attached to authenticated requests; `None` clears it.
    fn set_bearer_token(&self, token: Option<String>);
}
