//! Menu entities as delivered by the remote service.
//!
//! Wire names follow the service payloads (`nombre`, `platos`, `kcalTotal`,
//! `ingredientes`, `cantidad`); Rust field names are English.

use serde::{Deserialize, Serialize};

/// Category identifier.
pub type CategoryId = i64;
/// Dish identifier (unique within its category).
pub type DishId = i64;
/// Ingredient identifier (unique within its dish).
pub type IngredientId = i64;
/// User identifier.
pub type UserId = i64;

/// A named component of a dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Calories per unit.
    pub kcal: f64,
    /// Quantity in grams.
    #[serde(rename = "cantidad")]
    pub quantity_grams: f64,
}

/// A food item with its total calories and ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: DishId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "kcalTotal")]
    pub kcal_total: f64,
    /// Ingredients in fetch order.
    #[serde(rename = "ingredientes", default)]
    pub ingredients: Vec<Ingredient>,
}

impl Dish {
    /// Look up an ingredient by id.
    pub fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }
}

/// Top-level grouping of dishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Dishes in fetch order. Never re-ordered in place.
    #[serde(rename = "platos", default)]
    pub dishes: Vec<Dish>,
}

impl Category {
    /// Look up a dish of this category by id.
    pub fn dish(&self, id: DishId) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.id == id)
    }

    /// Whether a dish with this id belongs to the category.
    pub fn contains_dish(&self, id: DishId) -> bool {
        self.dish(id).is_some()
    }
}

/// Role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
    /// Any role this client does not know about.
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Unknown => "unknown",
        }
    }
}

/// Account entry from the users listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}
