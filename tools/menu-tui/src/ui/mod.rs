//! UI module - TUI rendering components.
//!
//! - `layout.rs`: Header, body, footer and overlays
//! - `home.rs`: Category / dish / ingredient tables
//! - `users.rs`: Users listing
//! - `forms.rs`: Sign in and sign up forms
//! - `widgets.rs`: Help and alert overlays

mod forms;
mod home;
mod layout;
mod users;

pub mod widgets;

pub use layout::render;
