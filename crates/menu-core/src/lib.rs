//! # Menu Client Core
//!
//! Client library for a food menu service: browse categories → dishes →
//! ingredients, sign in, and keep per-dish favorites in sync with the
//! server.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Entities, ordering rules, navigation state machine,
//!   favorite bookkeeping, error taxonomy. No I/O.
//! - **Ports Layer:** `HttpTransport` and `TokenStore` traits.
//! - **Adapters Layer:** reqwest transport, JSON file / in-memory token stores.
//! - **Service Layer:** Gateway, session, favorites, auth, users, home view.
//!
//! ```text
//!             ┌──────────────────────────── MenuClient ────────────────────────────┐
//!             │  CatalogClient  FavoritesSynchronizer  AuthContext  UsersDirectory │
//!             │        └──────────────┬───────┴──────────────┘                     │
//!             │                 RemoteGateway ──── SessionHandle                   │
//!             └───────────────────────┼────────────────────┼───────────────────────┘
//!                              HttpTransport          TokenStore
//!                             (ReqwestTransport)   (FileTokenStore)
//! ```
//!
//! ## Guarantees
//!
//! | Concern | Rule |
//! |---------|------|
//! | Favorites | The visible set only changes when a server read is applied |
//! | Toggles | Same-dish toggles run one at a time; a late stale read never wins |
//! | Session | A non-empty token is the only authentication signal |
//! | Failures | Every remote failure is a `GatewayError` with a readable message |
//! | Ordering | Stable ascending priority; ties keep fetch order |
//!
//! ## Example
//!
//! ```rust
//! use menu_core::{dish_priority, Navigator, Priority};
//!
//! assert_eq!(dish_priority(300.0), Priority::Medium);
//! assert_eq!(Priority::Medium.rank(), 2);
//!
//! let mut nav = Navigator::new();
//! assert!(!nav.back()); // already at the category list
//! ```

// =============================================================================
// CORE MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

/// Fake menu service and fixtures.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// =============================================================================
// RE-EXPORTS
// =============================================================================

// Domain
pub use domain::{
    dish_band, dish_priority, ingredient_band, ingredient_priority, order_dishes,
    order_ingredients, AuthError, Band, Category, CategoryId, Credentials, Dish, DishId,
    FavoriteAction, FavoriteSet, GatewayError, Ingredient, IngredientId, Level, NavigationError,
    NavigationState, Navigator, Priority, Registration, Role, Session, ToggleError,
    TokenStoreError, UnauthorizedPolicy, User, UserId, UsersListResult, ValidationError,
};

// Ports
pub use ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TokenStore, TransportError};

// Adapters
pub use adapters::{FileTokenStore, MemoryTokenStore, ReqwestTransport, DEFAULT_TOKEN_KEY};

// Config
pub use config::{ClientConfig, ConfigError};

// Services
pub use service::{
    Access, AuthContext, CatalogClient, CategoryRow, ClientError, DishRow, FavoritesSynchronizer,
    HomeView, IngredientRow, LoadState, MenuBrowser, MenuClient, RemoteGateway, SessionHandle,
    ToggleReport, UsersDirectory, UsersView,
};
