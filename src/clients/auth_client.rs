use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::domain::{Credentials, Registration, User};
use crate::error::AuthError;
use crate::session::SessionStore;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Client for the auth endpoints. Owns the token and profile lifecycle in
/// the session store.
#[derive(Clone)]
pub struct AuthClient {
    inner: ApiClient,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(inner: ApiClient, session: SessionStore) -> Self {
        Self { inner, session }
    }

    /// Signs in: stores the token, then loads and stores the profile.
    #[instrument(skip(self))]
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        debug!("Sending request");
        let TokenResponse { token } = self
            .inner
            .post(
                "/auth/login",
                json!({
                    "email": credentials.email,
                    "password": credentials.password,
                }),
            )
            .await?;
        self.session.set_token(token);

        let user = self.current_user().await?;
        info!(user_name = %user.name, "Signed in");
        Ok(user)
    }

    /// Creates an account and signs straight in. The password pair is
    /// checked before anything is sent.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn register(&self, registration: Registration) -> Result<User, AuthError> {
        if registration.password != registration.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        debug!("Sending request");
        let TokenResponse { token } = self
            .inner
            .post(
                "/auth/register",
                json!({
                    "name": registration.name,
                    "email": registration.email,
                    "password": registration.password,
                }),
            )
            .await?;
        self.session.set_token(token);

        let user = self.current_user().await?;
        info!(user_name = %user.name, "Account created");
        Ok(user)
    }

    /// Fetches the signed-in profile and caches it in the session.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, AuthError> {
        debug!("Sending request");
        let user: User = self.inner.get("/auth/me").await?;
        self.session.set_current_user(user.clone());
        Ok(user)
    }

    /// Publishes the seller's UPI id so buyers can pay them directly.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn set_upi_number(&self, upi_number: &str) -> Result<User, AuthError> {
        if upi_number.trim().is_empty() {
            return Err(AuthError::MissingUpiNumber);
        }

        debug!("Sending request");
        let user: User = self
            .inner
            .put("/auth/upi", json!({ "upiNumber": upi_number }))
            .await?;
        self.session.set_current_user(user.clone());
        Ok(user)
    }

    #[allow(dead_code)]
    pub fn logout(&self) {
        info!("Signing out");
        self.session.clear();
    }
}
