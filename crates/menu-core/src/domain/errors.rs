//! Client error types.
//!
//! Every failure coming back from the remote service collapses into
//! [`GatewayError`]; the other enums describe client-local conditions.

use thiserror::Error;

use super::entities::{CategoryId, DishId};
use super::favorites::FavoriteAction;
use super::navigation::Level;

/// Any non-success response or transport failure.
///
/// `status` is kept for logging and for the unauthorized policy only. Callers
/// must not react differently to different statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    /// Best-effort human readable message.
    pub message: String,
    /// HTTP status, `None` for transport failures.
    pub status: Option<u16>,
}

impl GatewayError {
    /// Transport failure (no response).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Non-success HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Success response whose body does not have the documented shape.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            message: format!("Unexpected response: {}", message.into()),
            status: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// Client-side input validation. Never reaches the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    EmptyField(&'static str),

    #[error("passwords do not match, please check that both are equal")]
    PasswordMismatch,
}

/// Rejected navigation transition. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("cannot {action} while at the {level}")]
    InvalidTransition { action: &'static str, level: Level },

    #[error("dish {dish_id} does not belong to category {category_id}")]
    DishNotInCategory {
        dish_id: DishId,
        category_id: CategoryId,
    },

    #[error("unknown category {0}")]
    UnknownCategory(CategoryId),

    #[error("unknown dish {0}")]
    UnknownDish(DishId),

    #[error("categories are not loaded")]
    CatalogNotReady,
}

/// Token persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenStoreError {
    #[error("token store I/O error at {path}: {error}")]
    Io { path: String, error: String },

    #[error("token store is corrupt: {0}")]
    Corrupt(String),
}

/// Favorite toggle failure. The favorite set keeps its last known-good value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("sign in to manage favorites")]
    NotAuthenticated,

    #[error("failed to update favorite {dish_id}: {source}")]
    Mutation {
        dish_id: DishId,
        #[source]
        source: GatewayError,
    },

    /// The mutation succeeded but the follow-up read failed.
    #[error("favorite {dish_id} {action} but refresh failed: {source}")]
    Refresh {
        dish_id: DishId,
        action: FavoriteAction,
        #[source]
        source: GatewayError,
    },
}

/// Login / registration / logout failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}
