use crate::core::event::AppEvent;
use crate::core::store::AppStore;
use crate::domain::model::{AuthResponse, Credentials, Registration, UserProfile};
use crate::domain::ports::{BookingApi, Storage};
use crate::utils::error::{Result, TurfbookError};

/// File names under the data directory; the analogue of the browser's
/// `token` and `user` local-storage keys.
const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Session/identity flows: sign in, sign up, restore, sign out. The token
/// and profile survive restarts through the storage port; the gateway gets
/// the bearer token whenever it changes.
pub struct SessionFlow<'a, A: BookingApi, S: Storage> {
    api: &'a A,
    store: &'a AppStore,
    storage: &'a S,
}

impl<'a, A: BookingApi, S: Storage> SessionFlow<'a, A, S> {
    pub fn new(api: &'a A, store: &'a AppStore, storage: &'a S) -> Self {
        Self { api, store, storage }
    }

    /// Load a persisted session into the state, if one exists. Returns
    /// whether the session is now authenticated.
    pub async fn restore(&self) -> Result<bool> {
        let Ok(token_bytes) = self.storage.read_file(TOKEN_FILE).await else {
            return Ok(false);
        };
        let token = String::from_utf8_lossy(&token_bytes).trim().to_string();
        if token.is_empty() {
            return Ok(false);
        }

        // A missing or corrupt profile file is not fatal; the token alone
        // authenticates and the profile can be refetched.
        let user = match self.storage.read_file(USER_FILE).await {
            Ok(bytes) => serde_json::from_slice::<UserProfile>(&bytes).ok(),
            Err(_) => None,
        };

        self.api.set_bearer_token(Some(token.clone()));
        self.store
            .dispatch(AppEvent::SessionRestored { token, user });
        Ok(true)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        self.store.dispatch(AppEvent::AuthRequested);
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&credentials).await {
            Ok(auth) => self.establish(auth).await,
            Err(e) => {
                self.store.dispatch(AppEvent::AuthFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<UserProfile> {
        self.store.dispatch(AppEvent::AuthRequested);
        match self.api.register(&registration).await {
            Ok(auth) => self.establish(auth).await,
            Err(e) => {
                self.store.dispatch(AppEvent::AuthFailed {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn establish(&self, auth: AuthResponse) -> Result<UserProfile> {
        self.storage
            .write_file(TOKEN_FILE, auth.token.as_bytes())
            .await?;
        self.storage
            .write_file(USER_FILE, &serde_json::to_vec(&auth.user)?)
            .await?;
        self.api.set_bearer_token(Some(auth.token.clone()));
        self.store.dispatch(AppEvent::LoggedIn {
            token: auth.token,
            user: auth.user.clone(),
        });
        Ok(auth.user)
    }

    /// Refresh the profile from the server. A 401 means the token expired;
    /// the persisted session is dropped before the error is returned.
    pub async fn fetch_profile(&self) -> Result<UserProfile> {
        self.store.dispatch(AppEvent::ProfileRequested);
        match self.api.fetch_profile().await {
            Ok(user) => {
                self.storage
                    .write_file(USER_FILE, &serde_json::to_vec(&user)?)
                    .await?;
                self.store
                    .dispatch(AppEvent::ProfileLoaded { user: user.clone() });
                Ok(user)
            }
            Err(e) => {
                self.store.dispatch(AppEvent::ProfileFailed {
                    message: e.to_string(),
                });
                if matches!(e, TurfbookError::UnauthorizedError) {
                    self.expire().await;
                }
                Err(e)
            }
        }
    }

    pub async fn logout(&self) {
        self.expire().await;
    }

    /// Drop the session everywhere: persisted files, gateway token, state.
    pub async fn expire(&self) {
        if let Err(e) = self.storage.remove_file(TOKEN_FILE).await {
            tracing::debug!("could not remove token file: {}", e);
        }
        if let Err(e) = self.storage.remove_file(USER_FILE).await {
            tracing::debug!("could not remove profile file: {}", e);
        }
        self.api.set_bearer_token(None);
        self.store.dispatch(AppEvent::LoggedOut);
    }
}
