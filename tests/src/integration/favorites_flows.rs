//! # Favorites and Users Flows
//!
//! Toggle cycles against the fake server, overlapping toggles and reads with
//! injected latency, and the users listing for each kind of caller.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use menu_core::testing::{
        FakeMenuServer, ADMIN_EMAIL, ADMIN_PASSWORD, USER_EMAIL, USER_PASSWORD,
    };
    use menu_core::{
        Credentials, FavoriteAction, HttpMethod, MenuClient, Role, ToggleError, UsersView,
    };

    use crate::integration::client_for;

    async fn signed_in(server: &FakeMenuServer, email: &str, password: &str) -> MenuClient {
        let client = client_for(server);
        client
            .auth()
            .login(&Credentials::new(email, password))
            .await
            .unwrap();
        server.clear_log();
        client
    }

    fn ids(client: &MenuClient) -> Vec<i64> {
        let mut ids: Vec<_> = client.favorites().favorites().iter().collect();
        ids.sort_unstable();
        ids
    }

    // =========================================================================
    // TOGGLES
    // =========================================================================

    #[tokio::test]
    async fn test_add_then_remove_round_trip_through_server() {
        let server = FakeMenuServer::sample();
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        client.favorites().load().await.unwrap();

        let added = client.favorites().toggle(20).await.unwrap();
        assert_eq!(added.action, FavoriteAction::Add);
        assert!(added.is_favorite);
        assert_eq!(server.favorites_of(USER_EMAIL), vec![20]);

        let removed = client.favorites().toggle(20).await.unwrap();
        assert_eq!(removed.action, FavoriteAction::Remove);
        assert!(!removed.is_favorite);
        assert!(server.favorites_of(USER_EMAIL).is_empty());

        assert_eq!(
            server.request_labels(),
            vec![
                "GET /favoritos",
                "POST /favoritos/20",
                "GET /favoritos",
                "DELETE /favoritos/20",
                "GET /favoritos",
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_dish_is_reported_and_set_unchanged() {
        let server = FakeMenuServer::sample();
        server.set_favorites(USER_EMAIL, [10]);
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        client.favorites().load().await.unwrap();

        let err = client.favorites().toggle(999).await.unwrap_err();

        match err {
            ToggleError::Mutation { dish_id, source } => {
                assert_eq!(dish_id, 999);
                assert_eq!(source.message, "Plato no encontrado");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ids(&client), vec![10]);
    }

    #[tokio::test]
    async fn test_second_device_sees_changes_on_next_read() {
        let server = FakeMenuServer::sample();
        let phone = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        let laptop = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;

        phone.favorites().toggle(12).await.unwrap();
        assert!(laptop.favorites().favorites().is_empty());

        laptop.favorites().load().await.unwrap();
        assert_eq!(ids(&laptop), vec![12]);

        // laptop now believes 12 is a favorite, so its toggle removes it
        let report = laptop.favorites().toggle(12).await.unwrap();
        assert_eq!(report.action, FavoriteAction::Remove);
        assert!(server.favorites_of(USER_EMAIL).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_double_toggle_ends_in_second_intent() {
        let server = FakeMenuServer::sample();
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        server.delay_next(HttpMethod::Post, "/favoritos/21", Duration::from_millis(30));

        let first = client.favorites().clone();
        let second = client.favorites().clone();
        let (a, b) = tokio::join!(first.toggle(21), second.toggle(21));

        assert_eq!(a.unwrap().action, FavoriteAction::Add);
        assert_eq!(b.unwrap().action, FavoriteAction::Remove);
        assert!(ids(&client).is_empty());
        assert!(server.favorites_of(USER_EMAIL).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_mount_read_does_not_undo_toggle() {
        let server = FakeMenuServer::sample();
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        // the mount read is sent first but answers last
        server.delay_next(HttpMethod::Get, "/favoritos", Duration::from_millis(50));

        let loader = client.favorites().clone();
        let mount = tokio::spawn(async move { loader.load().await });
        tokio::time::sleep(Duration::from_millis(1)).await;

        client.favorites().toggle(10).await.unwrap();
        assert_eq!(ids(&client), vec![10]);

        mount.await.unwrap().unwrap();
        assert_eq!(ids(&client), vec![10]);
        assert!(!client.favorites().is_refreshing());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_set() {
        let server = FakeMenuServer::sample();
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        server.fail_next(HttpMethod::Get, "/favoritos", 500, "");

        let err = client.favorites().toggle(11).await.unwrap_err();

        assert!(matches!(
            err,
            ToggleError::Refresh {
                dish_id: 11,
                action: FavoriteAction::Add,
                ..
            }
        ));
        assert!(ids(&client).is_empty());
        assert_eq!(server.favorites_of(USER_EMAIL), vec![11]);
        assert_eq!(err.to_string(), "favorite 11 added but refresh failed: API request failed");
    }

    #[tokio::test]
    async fn test_sign_out_drops_previous_users_favorites() {
        let server = FakeMenuServer::sample();
        server.set_favorites(USER_EMAIL, [10, 20]);
        let client = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        client.favorites().load().await.unwrap();
        assert_eq!(ids(&client), vec![10, 20]);

        client.auth().logout().unwrap();
        client.favorites().load().await.unwrap();

        assert!(client.favorites().favorites().is_empty());
        assert_eq!(server.request_labels(), vec!["GET /favoritos"]);

        // a different account starts from nothing
        client
            .auth()
            .login(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();
        assert!(client.favorites().favorites().is_empty());
    }

    // =========================================================================
    // USERS
    // =========================================================================

    #[tokio::test]
    async fn test_users_listing_by_caller() {
        let server = FakeMenuServer::sample();

        let guest = client_for(&server);
        assert_eq!(guest.users().view().await, UsersView::SignInRequired);
        assert_eq!(server.request_count(), 0);

        let user = signed_in(&server, USER_EMAIL, USER_PASSWORD).await;
        assert_eq!(user.users().view().await, UsersView::Unauthorized);

        let admin = signed_in(&server, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        match admin.users().view().await {
            UsersView::Listed(users) => {
                assert_eq!(users.len(), 2);
                assert_eq!(users[0].email, ADMIN_EMAIL);
                assert_eq!(users[0].role, Role::Admin);
                assert_eq!(users[1].role, Role::User);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_users_listing_failure_is_an_error_view() {
        let server = FakeMenuServer::sample();
        let admin = signed_in(&server, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        server.fail_next(HttpMethod::Get, "/users", 502, r#"{"message":"Bad gateway"}"#);

        assert_eq!(
            admin.users().view().await,
            UsersView::Error("Bad gateway".into())
        );
    }
}
