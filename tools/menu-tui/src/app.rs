//! Application state management.

use chrono::{DateTime, Local};
use crossterm::event::KeyCode;
use menu_core::{
    AuthError, FavoriteAction, FavoriteSet, HomeView, Level, MenuBrowser, ToggleError, UsersView,
};
use tracing::{debug, info, warn};

use crate::events::{AppEvent, Command};
use crate::forms::{self, Form, FormInput};

/// Active screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Users,
    Login,
    Register,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "Menu",
            Screen::Users => "Users",
            Screen::Login => "Sign in",
            Screen::Register => "Sign up",
        }
    }
}

/// One-line feedback under the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub is_error: bool,
    pub at: DateTime<Local>,
}

/// Application state.
pub struct App {
    pub screen: Screen,
    pub browser: MenuBrowser,
    /// Bumped on every mount; category results from older mounts are dropped.
    pub catalog_generation: u64,
    /// Selected row on the home screen.
    pub cursor: usize,
    pub users: UsersView,
    pub users_cursor: usize,
    pub login: Form,
    pub register: Form,

    /// Mirrors of client state, refreshed every tick.
    pub authenticated: bool,
    pub favorites: FavoriteSet,
    pub favorites_loading: bool,
    pub favorites_error: Option<String>,
    /// Toggles sent and not yet completed.
    pub toggles_in_flight: usize,

    pub show_help: bool,
    /// Blocking message; any key dismisses it.
    pub alert: Option<String>,
    pub status: Option<StatusLine>,
    pub base_url: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(base_url: impl Into<String>, require_sign_in: bool) -> Self {
        Self {
            screen: Screen::Home,
            browser: MenuBrowser::new(require_sign_in),
            catalog_generation: 0,
            cursor: 0,
            users: UsersView::SignInRequired,
            users_cursor: 0,
            login: forms::login_form(),
            register: forms::register_form(),
            authenticated: false,
            favorites: FavoriteSet::new(),
            favorites_loading: false,
            favorites_error: None,
            toggles_in_flight: 0,
            show_help: false,
            alert: None,
            status: None,
            base_url: base_url.into(),
            should_quit: false,
        }
    }

    /// Mount the home screen: reset navigation, fetch categories and favorites.
    pub fn mount(&mut self) -> Vec<Command> {
        self.browser.mount();
        self.catalog_generation += 1;
        self.cursor = 0;
        self.favorites_error = None;
        vec![
            Command::LoadCategories(self.catalog_generation),
            Command::LoadFavorites,
        ]
    }

    /// Copy client state the views depend on.
    pub fn observe(&mut self, authenticated: bool, favorites: FavoriteSet, refreshing: bool) {
        self.authenticated = authenticated;
        self.favorites = favorites;
        self.favorites_loading = refreshing;
    }

    pub fn home_view(&self) -> HomeView {
        self.browser.view(self.authenticated, &self.favorites)
    }

    fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            message: message.into(),
            is_error,
            at: Local::now(),
        });
    }

    /// Handle a key press and return the work it triggers.
    pub fn on_key(&mut self, code: KeyCode) -> Vec<Command> {
        if self.alert.is_some() {
            self.alert = None;
            return Vec::new();
        }
        if self.show_help {
            self.show_help = false;
            return Vec::new();
        }

        match self.screen {
            Screen::Home => self.on_home_key(code),
            Screen::Users => self.on_users_key(code),
            Screen::Login => self.on_login_key(code),
            Screen::Register => self.on_register_key(code),
        }
    }

    fn on_global_key(&mut self, code: KeyCode) -> Vec<Command> {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                Vec::new()
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.screen = Screen::Home;
                Vec::new()
            }
            KeyCode::Char('u') | KeyCode::Char('U') => self.open_users(),
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.screen = Screen::Login;
                Vec::new()
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.screen = Screen::Register;
                Vec::new()
            }
            KeyCode::Char('o') | KeyCode::Char('O') => {
                if self.authenticated {
                    vec![Command::Logout]
                } else {
                    self.set_status("Not signed in", false);
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn on_home_key(&mut self, code: KeyCode) -> Vec<Command> {
        let rows = self.home_view().row_count();
        match code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down => {
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Right => {
                self.drill_down();
                Vec::new()
            }
            KeyCode::Esc | KeyCode::Left | KeyCode::Backspace | KeyCode::Char('b') => {
                if self.browser.back() {
                    self.cursor = 0;
                }
                Vec::new()
            }
            KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_selected(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.mount(),
            _ => self.on_global_key(code),
        }
    }

    fn drill_down(&mut self) {
        let result = match self.home_view() {
            HomeView::Categories(rows) => match rows.get(self.cursor) {
                Some(row) => self.browser.select_category(row.id),
                None => return,
            },
            HomeView::Dishes { rows, .. } => match rows.get(self.cursor) {
                Some(row) => self.browser.select_dish(row.id),
                None => return,
            },
            _ => return,
        };

        match result {
            Ok(()) => self.cursor = 0,
            Err(e) => {
                warn!(error = %e, "navigation rejected");
                self.set_status(e.to_string(), true);
            }
        }
    }

    fn toggle_selected(&mut self) -> Vec<Command> {
        let dish_id = match self.home_view() {
            HomeView::Dishes { rows, .. } => rows.get(self.cursor).map(|r| r.id),
            HomeView::Ingredients { dish, .. } => Some(dish.id),
            _ => None,
        };
        match dish_id {
            Some(id) => {
                self.toggles_in_flight += 1;
                vec![Command::ToggleFavorite(id)]
            }
            None => Vec::new(),
        }
    }

    fn open_users(&mut self) -> Vec<Command> {
        self.screen = Screen::Users;
        self.users_cursor = 0;
        if self.authenticated {
            self.users = UsersView::Loading;
            vec![Command::LoadUsers]
        } else {
            self.users = UsersView::SignInRequired;
            Vec::new()
        }
    }

    fn on_users_key(&mut self, code: KeyCode) -> Vec<Command> {
        match code {
            KeyCode::Up => {
                self.users_cursor = self.users_cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down => {
                if let UsersView::Listed(users) = &self.users {
                    if self.users_cursor + 1 < users.len() {
                        self.users_cursor += 1;
                    }
                }
                Vec::new()
            }
            KeyCode::Esc => {
                self.screen = Screen::Home;
                Vec::new()
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.open_users(),
            _ => self.on_global_key(code),
        }
    }

    fn on_login_key(&mut self, code: KeyCode) -> Vec<Command> {
        match self.login.on_key(code) {
            FormInput::Edited => Vec::new(),
            FormInput::Cancel => {
                self.screen = Screen::Home;
                Vec::new()
            }
            FormInput::Submit => vec![Command::Login(forms::credentials(&self.login))],
        }
    }

    fn on_register_key(&mut self, code: KeyCode) -> Vec<Command> {
        match self.register.on_key(code) {
            FormInput::Edited => Vec::new(),
            FormInput::Cancel => {
                self.screen = Screen::Home;
                Vec::new()
            }
            FormInput::Submit => vec![Command::Register(forms::registration(&self.register))],
        }
    }

    /// Apply a completed command.
    pub fn apply(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::CategoriesLoaded { generation, result } => {
                if generation != self.catalog_generation {
                    debug!(
                        generation,
                        current = self.catalog_generation,
                        "dropping superseded category fetch"
                    );
                    return Vec::new();
                }
                if let Err(e) = &result {
                    warn!(error = %e, "category fetch failed");
                }
                self.browser.apply_categories(result);
                Vec::new()
            }
            AppEvent::FavoritesLoaded(result) => {
                self.favorites_error = result.err().map(|e| {
                    warn!(error = %e, "favorites fetch failed");
                    e.message
                });
                Vec::new()
            }
            AppEvent::FavoriteToggled { dish_id, result } => {
                self.toggles_in_flight = self.toggles_in_flight.saturating_sub(1);
                match result {
                    Ok(report) => {
                        let verb = match report.action {
                            FavoriteAction::Add => "Added to",
                            FavoriteAction::Remove => "Removed from",
                        };
                        self.set_status(format!("{verb} favorites: dish {dish_id}"), false);
                    }
                    Err(ToggleError::NotAuthenticated) => {
                        self.set_status("Sign in to manage favorites", true);
                    }
                    Err(e) => self.set_status(e.to_string(), true),
                }
                Vec::new()
            }
            AppEvent::UsersLoaded(view) => {
                if self.screen == Screen::Users {
                    self.users = view;
                }
                Vec::new()
            }
            AppEvent::LoggedIn { email, result } => match result {
                Ok(()) => {
                    info!(%email, "signed in");
                    self.authenticated = true;
                    self.login.clear();
                    self.screen = Screen::Home;
                    self.set_status(format!("Signed in as {email}"), false);
                    vec![Command::LoadFavorites]
                }
                Err(e) => {
                    self.alert = Some(auth_alert(&e));
                    Vec::new()
                }
            },
            AppEvent::Registered { email, result } => match result {
                Ok(()) => {
                    self.register.clear();
                    self.login.clear();
                    self.login.set_value(0, &email);
                    self.login.focus = 1;
                    self.screen = Screen::Login;
                    self.set_status("Account created, sign in to continue", false);
                    Vec::new()
                }
                Err(e) => {
                    self.alert = Some(auth_alert(&e));
                    Vec::new()
                }
            },
            AppEvent::LoggedOut(result) => {
                self.authenticated = false;
                self.users = UsersView::SignInRequired;
                match result {
                    Ok(()) => self.set_status("Signed out", false),
                    Err(e) => self.set_status(format!("Signed out, {e}"), true),
                }
                Vec::new()
            }
        }
    }

    /// Level label for the header breadcrumb.
    pub fn breadcrumb(&self) -> String {
        let state = self.browser.state();
        match self.browser.level() {
            Level::Categories => "Categories".to_string(),
            Level::Dishes => format!(
                "Categories › {}",
                state.category().map(|c| c.name.as_str()).unwrap_or("")
            ),
            Level::Ingredients => format!(
                "Categories › {} › {}",
                state.category().map(|c| c.name.as_str()).unwrap_or(""),
                state.dish().map(|d| d.name.as_str()).unwrap_or("")
            ),
        }
    }
}

fn auth_alert(error: &AuthError) -> String {
    error.to_string()
}
