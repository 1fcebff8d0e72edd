//! # Session Flows
//!
//! Login, registration and logout through `AuthContext`, with the token
//! persisted in a `FileTokenStore` so that a second client over the same file
//! behaves like a restarted application.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;

    use menu_core::testing::{FakeMenuServer, USER_EMAIL, USER_PASSWORD};
    use menu_core::{
        AuthError, Credentials, FileTokenStore, MenuClient, Registration, UnauthorizedPolicy,
        ValidationError, DEFAULT_TOKEN_KEY,
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;

    use crate::integration::client_with_store;

    fn file_client(server: &FakeMenuServer, path: &Path, policy: UnauthorizedPolicy) -> MenuClient {
        client_with_store(
            server,
            Arc::new(FileTokenStore::new(path, DEFAULT_TOKEN_KEY)),
            policy,
        )
    }

    fn stored(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_login_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let server = FakeMenuServer::sample();

        let first = file_client(&server, &path, UnauthorizedPolicy::KeepSession);
        assert!(!first.is_authenticated());
        first
            .auth()
            .login(&Credentials::new(USER_EMAIL, USER_PASSWORD))
            .await
            .unwrap();

        let token = first.session().token().unwrap();
        assert_eq!(stored(&path)[DEFAULT_TOKEN_KEY], json!(token));

        let restarted = file_client(&server, &path, UnauthorizedPolicy::KeepSession);
        assert!(restarted.is_authenticated());
        restarted.favorites().load().await.unwrap();
        let favorites_read = server.requests().pop().unwrap();
        assert_eq!(favorites_read.authorization, Some(format!("Bearer {token}")));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let server = FakeMenuServer::sample();
        let client = file_client(&server, &path, UnauthorizedPolicy::KeepSession);

        let err = client
            .auth()
            .login(&Credentials::new(USER_EMAIL, "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!client.is_authenticated());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_register_then_sign_in() {
        let server = FakeMenuServer::sample();
        let client = crate::integration::client_for(&server);

        client
            .auth()
            .register(&Registration::new("new@menu.test", "hunter22", "hunter22"))
            .await
            .unwrap();
        // the issued token is not installed
        assert!(!client.is_authenticated());

        client
            .auth()
            .login(&Credentials::new("new@menu.test", "hunter22"))
            .await
            .unwrap();
        assert!(client.is_authenticated());
        assert_eq!(
            server.request_labels(),
            vec!["POST /auth/register", "POST /auth/login"]
        );
    }

    #[tokio::test]
    async fn test_registration_problems() {
        let server = FakeMenuServer::sample();
        let client = crate::integration::client_for(&server);

        let mismatch = client
            .auth()
            .register(&Registration::new("x@menu.test", "abcdef", "abcdeg"))
            .await
            .unwrap_err();
        assert_eq!(
            mismatch,
            AuthError::Validation(ValidationError::PasswordMismatch)
        );
        assert_eq!(server.request_count(), 0);

        let invalid = client
            .auth()
            .register(&Registration::new("not-an-email", "abc", "abc"))
            .await
            .unwrap_err();
        assert_eq!(
            invalid.to_string(),
            "email must be an email, password must be longer than or equal to 6 characters"
        );

        let duplicate = client
            .auth()
            .register(&Registration::new(USER_EMAIL, "abcdef", "abcdef"))
            .await
            .unwrap_err();
        assert_eq!(duplicate.to_string(), "Email already registered");
    }

    #[tokio::test]
    async fn test_logout_keeps_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();
        let server = FakeMenuServer::sample();
        let client = file_client(&server, &path, UnauthorizedPolicy::KeepSession);

        client
            .auth()
            .login(&Credentials::new(USER_EMAIL, USER_PASSWORD))
            .await
            .unwrap();
        client.auth().logout().unwrap();

        assert!(!client.is_authenticated());
        assert_eq!(stored(&path), json!({ "theme": "dark" }));
    }

    #[tokio::test]
    async fn test_rejected_token_with_keep_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token":"expired"}"#).unwrap();
        let server = FakeMenuServer::sample();
        let client = file_client(&server, &path, UnauthorizedPolicy::KeepSession);
        assert!(client.is_authenticated());

        let err = client.favorites().load().await.unwrap_err();

        assert_eq!(err.status, Some(401));
        assert!(client.is_authenticated());
        assert_eq!(stored(&path)["token"], json!("expired"));
    }

    #[tokio::test]
    async fn test_rejected_token_with_clear_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, r#"{"token":"expired"}"#).unwrap();
        let server = FakeMenuServer::sample();
        let client = file_client(&server, &path, UnauthorizedPolicy::ClearSession);

        client.favorites().load().await.unwrap_err();

        assert!(!client.is_authenticated());
        assert_eq!(stored(&path), json!({}));

        // guests send no favorites read
        client.favorites().load().await.unwrap();
        assert_eq!(server.request_count(), 1);
    }
}
