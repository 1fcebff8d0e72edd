//! Commands sent from the UI loop and the events they complete with.
//!
//! Each command runs on its own tokio task against a clone of the client. The
//! outcome comes back on the event channel and is applied on the loop thread.

use menu_core::{
    AuthError, Category, Credentials, DishId, GatewayError, MenuClient, Registration,
    ToggleError, ToggleReport, UsersView,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Work requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Category fetch for the given home mount.
    LoadCategories(u64),
    LoadFavorites,
    ToggleFavorite(DishId),
    LoadUsers,
    Login(Credentials),
    Register(Registration),
    Logout,
}

/// Completion of a [`Command`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    CategoriesLoaded {
        generation: u64,
        result: Result<Vec<Category>, GatewayError>,
    },
    FavoritesLoaded(Result<(), GatewayError>),
    FavoriteToggled {
        dish_id: DishId,
        result: Result<ToggleReport, ToggleError>,
    },
    UsersLoaded(UsersView),
    LoggedIn {
        email: String,
        result: Result<(), AuthError>,
    },
    Registered {
        email: String,
        result: Result<(), AuthError>,
    },
    LoggedOut(Result<(), AuthError>),
}

/// Run `command` in the background and report on `tx`.
pub fn spawn(client: &MenuClient, command: Command, tx: mpsc::UnboundedSender<AppEvent>) {
    let client = client.clone();
    tokio::spawn(async move {
        let event = execute(&client, command).await;
        if tx.send(event).is_err() {
            debug!("event loop gone, dropping completion");
        }
    });
}

/// Run one command to completion.
pub async fn execute(client: &MenuClient, command: Command) -> AppEvent {
    match command {
        Command::LoadCategories(generation) => AppEvent::CategoriesLoaded {
            generation,
            result: client.catalog().fetch_categories().await,
        },
        Command::LoadFavorites => AppEvent::FavoritesLoaded(client.favorites().load().await),
        Command::ToggleFavorite(dish_id) => AppEvent::FavoriteToggled {
            dish_id,
            result: client.favorites().toggle(dish_id).await,
        },
        Command::LoadUsers => AppEvent::UsersLoaded(client.users().view().await),
        Command::Login(credentials) => AppEvent::LoggedIn {
            email: credentials.email.trim().to_string(),
            result: client.auth().login(&credentials).await,
        },
        Command::Register(registration) => AppEvent::Registered {
            email: registration.email.trim().to_string(),
            result: client.auth().register(&registration).await,
        },
        Command::Logout => {
            let result = client.auth().logout();
            if let Err(e) = &result {
                warn!(error = %e, "failed to remove persisted token");
            }
            AppEvent::LoggedOut(result)
        }
    }
}
