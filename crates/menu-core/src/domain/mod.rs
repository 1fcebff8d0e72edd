//! Domain layer: pure types and rules, no I/O.

pub mod credentials;
pub mod entities;
pub mod errors;
pub mod favorites;
pub mod navigation;
pub mod ordering;
pub mod session;
pub mod users;

pub use credentials::{Credentials, Registration, TokenResponse};
pub use entities::{Category, CategoryId, Dish, DishId, Ingredient, IngredientId, Role, User, UserId};
pub use errors::{AuthError, GatewayError, NavigationError, ToggleError, TokenStoreError, ValidationError};
pub use favorites::{FavoriteAction, FavoriteSet, PendingToggles};
pub use navigation::{Level, NavigationState, Navigator};
pub use ordering::{
    dish_band, dish_priority, ingredient_band, ingredient_priority, order_dishes,
    order_ingredients, Band, Priority,
};
pub use session::{Session, UnauthorizedPolicy};
pub use users::UsersListResult;
