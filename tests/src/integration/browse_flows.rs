//! # Browse Flows
//!
//! Home screen mount against the fake server: concurrent category and
//! favorites fetches, drill-down in display order, the sign-in gate and the
//! terminal error state.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use menu_core::testing::{FakeMenuServer, USER_EMAIL, USER_PASSWORD};
    use menu_core::{
        Band, Credentials, HomeView, HttpMethod, Level, MenuBrowser, MenuClient, Priority,
    };

    use crate::integration::client_for;

    // =========================================================================
    // HELPERS
    // =========================================================================

    async fn signed_in(server: &FakeMenuServer) -> MenuClient {
        let client = client_for(server);
        client
            .auth()
            .login(&Credentials::new(USER_EMAIL, USER_PASSWORD))
            .await
            .unwrap();
        client
    }

    /// Mount the way the terminal front end does: both fetches in flight at once.
    async fn mount(client: &MenuClient, browser: &mut MenuBrowser) {
        browser.mount();
        let (categories, favorites) =
            tokio::join!(client.catalog().fetch_categories(), client.favorites().load());
        browser.apply_categories(categories);
        let _ = favorites;
    }

    // =========================================================================
    // TESTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_mount_with_favorites_arriving_first() {
        let server = FakeMenuServer::sample();
        server.set_favorites(USER_EMAIL, [11]);
        server.delay_next(HttpMethod::Get, "/categorias-comida", Duration::from_millis(50));
        let client = signed_in(&server).await;
        let mut browser = MenuBrowser::new(true);

        mount(&client, &mut browser).await;
        browser.select_category(1).unwrap();

        match browser.view(client.is_authenticated(), &client.favorites().favorites()) {
            HomeView::Dishes { category, rows } => {
                assert_eq!(category, "Desayuno");
                let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![11, 10, 12]);
                let flagged: Vec<_> = rows.iter().filter(|r| r.is_favorite).map(|r| r.id).collect();
                assert_eq!(flagged, vec![11]);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_oatmeal_drill_down() {
        let server = FakeMenuServer::sample();
        let client = signed_in(&server).await;
        let mut browser = MenuBrowser::new(true);
        mount(&client, &mut browser).await;

        browser.select_category(1).unwrap();
        browser.select_dish(10).unwrap();
        assert_eq!(browser.level(), Level::Ingredients);

        match browser.view(true, &client.favorites().favorites()) {
            HomeView::Ingredients { dish, rows, .. } => {
                assert_eq!(dish.priority, Priority::Medium);
                assert_eq!(dish.band, Band::Yellow);
                assert!(!dish.is_favorite);
                let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
                assert_eq!(ids, vec![100, 101, 102]);
                assert_eq!(rows[0].band, Band::Red);
                assert_eq!(rows[2].band, Band::Green);
            }
            other => panic!("unexpected view {other:?}"),
        }

        assert!(browser.back());
        assert!(browser.back());
        assert!(!browser.back());
        assert_eq!(browser.level(), Level::Categories);
    }

    #[tokio::test]
    async fn test_guest_sees_sign_in_gate_and_sends_no_favorites_read() {
        let server = FakeMenuServer::sample();
        let client = client_for(&server);
        let mut browser = MenuBrowser::new(true);

        mount(&client, &mut browser).await;

        assert_eq!(server.request_labels(), vec!["GET /categorias-comida"]);
        assert_eq!(
            browser.view(client.is_authenticated(), &client.favorites().favorites()),
            HomeView::SignInRequired
        );
    }

    #[tokio::test]
    async fn test_guest_browsing_when_gate_disabled() {
        let server = FakeMenuServer::sample();
        let client = client_for(&server);
        let mut browser = MenuBrowser::new(false);

        mount(&client, &mut browser).await;

        assert_eq!(browser.view(false, &client.favorites().favorites()).row_count(), 2);
    }

    #[tokio::test]
    async fn test_category_failure_is_terminal_until_remount() {
        let server = FakeMenuServer::sample();
        server.fail_next(
            HttpMethod::Get,
            "/categorias-comida",
            503,
            r#"{"message":"Service unavailable"}"#,
        );
        let client = signed_in(&server).await;
        let mut browser = MenuBrowser::new(true);

        mount(&client, &mut browser).await;
        assert_eq!(
            browser.view(true, &client.favorites().favorites()),
            HomeView::Error("Service unavailable".into())
        );
        assert!(browser.select_category(1).is_err());
        // favorites are a separate section
        assert!(!client.favorites().is_refreshing());

        mount(&client, &mut browser).await;
        assert_eq!(browser.view(true, &client.favorites().favorites()).row_count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_transport_failure() {
        let server = FakeMenuServer::sample();
        server.set_unreachable(true);
        let client = client_for(&server);
        let mut browser = MenuBrowser::new(false);

        mount(&client, &mut browser).await;

        match browser.view(false, &client.favorites().favorites()) {
            HomeView::Error(message) => assert!(message.contains("Cannot connect")),
            other => panic!("unexpected view {other:?}"),
        }
    }
}
