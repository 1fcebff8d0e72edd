//! Users directory.

use tracing::{info, warn};

use super::endpoints::USERS_PATH;
use super::gateway::{Access, RemoteGateway};
use crate::domain::{GatewayError, User, UsersListResult};

/// What the users screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersView {
    SignInRequired,
    Loading,
    /// The service refused the listing.
    Unauthorized,
    Error(String),
    Listed(Vec<User>),
}

impl UsersView {
    /// View for a finished fetch.
    pub fn from_result(result: Result<UsersListResult, GatewayError>) -> Self {
        match result {
            Ok(UsersListResult::Listed(users)) => UsersView::Listed(users),
            Ok(UsersListResult::Denied(_)) => UsersView::Unauthorized,
            Err(e) => UsersView::Error(e.message),
        }
    }
}

#[derive(Clone)]
pub struct UsersDirectory {
    gateway: RemoteGateway,
}

impl UsersDirectory {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self { gateway }
    }

    /// View to show before a fetch is started.
    pub fn initial_view(&self) -> UsersView {
        if self.gateway.session().is_authenticated() {
            UsersView::Loading
        } else {
            UsersView::SignInRequired
        }
    }

    /// `GET /users`, authenticated.
    pub async fn list(&self) -> Result<UsersListResult, GatewayError> {
        let value = self.gateway.get(USERS_PATH, Access::Authenticated).await?;
        let result = UsersListResult::from_value(value)?;
        match &result {
            UsersListResult::Listed(users) => info!(count = users.len(), "users listed"),
            UsersListResult::Denied(message) => warn!(%message, "users listing denied"),
        }
        Ok(result)
    }

    /// Fetch and map to a view. Skips the request when signed out.
    pub async fn view(&self) -> UsersView {
        if !self.gateway.session().is_authenticated() {
            return UsersView::SignInRequired;
        }
        UsersView::from_result(self.list().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryTokenStore;
    use crate::domain::{Role, UnauthorizedPolicy};
    use crate::ports::HttpMethod;
    use crate::service::session::SessionHandle;
    use crate::testing::{FakeMenuServer, ADMIN_EMAIL, USER_EMAIL};
    use std::sync::Arc;

    fn directory(server: &FakeMenuServer, email: Option<&str>) -> UsersDirectory {
        let store = match email {
            Some(email) => MemoryTokenStore::with_token(server.issue_token(email)),
            None => MemoryTokenStore::new(),
        };
        let session = SessionHandle::new(Arc::new(store));
        session.activate().unwrap();
        UsersDirectory::new(RemoteGateway::new(
            Arc::new(server.clone()),
            session,
            UnauthorizedPolicy::KeepSession,
        ))
    }

    #[tokio::test]
    async fn test_admin_gets_listing() {
        let server = FakeMenuServer::sample();
        let dir = directory(&server, Some(ADMIN_EMAIL));

        match dir.view().await {
            UsersView::Listed(users) => {
                assert_eq!(users.len(), 2);
                assert_eq!(users[0].role, Role::Admin);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_forbidden_message_is_unauthorized() {
        let server = FakeMenuServer::sample();
        let dir = directory(&server, Some(USER_EMAIL));

        assert_eq!(
            dir.list().await.unwrap(),
            UsersListResult::Denied("Forbidden".into())
        );
        assert_eq!(dir.view().await, UsersView::Unauthorized);
    }

    #[tokio::test]
    async fn test_signed_out_view_sends_nothing() {
        let server = FakeMenuServer::sample();
        let dir = directory(&server, None);

        assert_eq!(dir.initial_view(), UsersView::SignInRequired);
        assert_eq!(dir.view().await, UsersView::SignInRequired);
        assert_eq!(server.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_error_view() {
        let server = FakeMenuServer::sample();
        let dir = directory(&server, Some(ADMIN_EMAIL));
        server.fail_next(HttpMethod::Get, USERS_PATH, 500, r#"{"message":"boom"}"#);

        assert_eq!(dir.initial_view(), UsersView::Loading);
        assert_eq!(dir.view().await, UsersView::Error("boom".into()));
    }
}
