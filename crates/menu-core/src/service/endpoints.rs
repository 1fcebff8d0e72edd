//! Remote service paths.

use crate::domain::DishId;

pub const CATEGORIES_PATH: &str = "/categorias-comida";
pub const FAVORITES_PATH: &str = "/favoritos";
pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const USERS_PATH: &str = "/users";

/// `/favoritos/{dishId}`
pub fn favorite_path(dish_id: DishId) -> String {
    format!("{FAVORITES_PATH}/{dish_id}")
}
