//! Sign in, sign up, sign out.

use serde_json::Value;
use tracing::{info, warn};

use super::endpoints::{LOGIN_PATH, REGISTER_PATH};
use super::gateway::{Access, RemoteGateway};
use crate::domain::{AuthError, Credentials, GatewayError, Registration, TokenResponse};

#[derive(Clone)]
pub struct AuthContext {
    gateway: RemoteGateway,
}

impl AuthContext {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self { gateway }
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    /// Exchange credentials for a token and install it.
    ///
    /// Any server-side failure is reported as
    /// [`AuthError::InvalidCredentials`]; the session is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        credentials.validate()?;

        let value = self
            .gateway
            .post(LOGIN_PATH, Some(credentials.to_json()), Access::Public)
            .await
            .map_err(|e| {
                warn!(email = %credentials.email.trim(), error = %e, "login rejected");
                AuthError::InvalidCredentials
            })?;

        let token = token_from(value).map_err(|_| AuthError::InvalidCredentials)?;
        self.gateway.session().login(&token)?;
        info!(email = %credentials.email.trim(), "login succeeded");
        Ok(())
    }

    /// Create an account.
    ///
    /// Any success counts; the response body, token included, is ignored.
    /// Nothing is sent when the form does not validate.
    pub async fn register(&self, registration: &Registration) -> Result<(), AuthError> {
        let credentials = registration.validate()?;

        self.gateway
            .post(REGISTER_PATH, Some(credentials.to_json()), Access::Public)
            .await?;
        info!(email = %credentials.email.trim(), "account registered");
        Ok(())
    }

    /// Drop the session, in memory and on disk.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.gateway.session().clear()?;
        Ok(())
    }
}

fn token_from(value: Value) -> Result<String, GatewayError> {
    let response: TokenResponse = serde_json::from_value(value)
        .map_err(|e| GatewayError::malformed(format!("token: {e}")))?;
    if response.token.is_empty() {
        return Err(GatewayError::malformed("empty token"));
    }
    Ok(response.token)
}
