//! Users listing result.
//!
//! The service answers `GET /users` with either an array of accounts or, when
//! the caller lacks permission, a success-shaped `{message}` object. The two
//! shapes are turned into an explicit variant here so callers never probe for
//! field presence.

use serde::Deserialize;
use serde_json::Value;

use super::entities::User;
use super::errors::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersListResult {
    /// The caller may list accounts.
    Listed(Vec<User>),
    /// The service refused, with its message.
    Denied(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUsersResponse {
    Listed(Vec<User>),
    Denied { message: String },
}

impl UsersListResult {
    /// Interpret a successful response body.
    pub fn from_value(value: Value) -> Result<Self, GatewayError> {
        match serde_json::from_value(value) {
            Ok(RawUsersResponse::Listed(users)) => Ok(UsersListResult::Listed(users)),
            Ok(RawUsersResponse::Denied { message }) => Ok(UsersListResult::Denied(message)),
            Err(e) => Err(GatewayError::malformed(format!("users listing: {e}"))),
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, UsersListResult::Denied(_))
    }
}
