//! Drill-down navigation over the category → dish → ingredient hierarchy.
//!
//! ```text
//!                select_category             select_dish
//! [AtCategoryList] ──────────────→ [AtDishList] ──────────→ [AtIngredientList]
//!        ↑   │                        │    ↑                        │
//!        │   └─ back (no-op)          │    └────────── back ────────┘
//!        └─────────── back ───────────┘
//! ```
//!
//! Selections are copies of values from the last successful category fetch.
//! A later refetch does not reconcile them.

use std::fmt;

use super::entities::{Category, Dish};
use super::errors::NavigationError;

/// Hierarchy level currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Categories,
    Dishes,
    Ingredients,
}

impl Level {
    pub fn name(&self) -> &'static str {
        match self {
            Level::Categories => "category list",
            Level::Dishes => "dish list",
            Level::Ingredients => "ingredient list",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Navigation state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NavigationState {
    #[default]
    AtCategoryList,
    AtDishList {
        category: Category,
    },
    AtIngredientList {
        category: Category,
        dish: Dish,
    },
}

impl NavigationState {
    pub fn level(&self) -> Level {
        match self {
            NavigationState::AtCategoryList => Level::Categories,
            NavigationState::AtDishList { .. } => Level::Dishes,
            NavigationState::AtIngredientList { .. } => Level::Ingredients,
        }
    }

    /// Selected category, if any.
    pub fn category(&self) -> Option<&Category> {
        match self {
            NavigationState::AtCategoryList => None,
            NavigationState::AtDishList { category }
            | NavigationState::AtIngredientList { category, .. } => Some(category),
        }
    }

    /// Selected dish, if any.
    pub fn dish(&self) -> Option<&Dish> {
        match self {
            NavigationState::AtIngredientList { dish, .. } => Some(dish),
            _ => None,
        }
    }
}

/// Navigation state machine.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: NavigationState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn level(&self) -> Level {
        self.state.level()
    }

    /// Return to the category list (component mount).
    pub fn reset(&mut self) {
        self.state = NavigationState::AtCategoryList;
    }

    /// `AtCategoryList → AtDishList(category)`.
    pub fn select_category(&mut self, category: &Category) -> Result<(), NavigationError> {
        match self.state {
            NavigationState::AtCategoryList => {
                self.state = NavigationState::AtDishList {
                    category: category.clone(),
                };
                Ok(())
            }
            _ => Err(NavigationError::InvalidTransition {
                action: "select a category",
                level: self.level(),
            }),
        }
    }

    /// `AtDishList(c) → AtIngredientList(c, dish)`. `dish` must belong to `c`.
    pub fn select_dish(&mut self, dish: &Dish) -> Result<(), NavigationError> {
        let category = match &self.state {
            NavigationState::AtDishList { category } => category,
            _ => {
                return Err(NavigationError::InvalidTransition {
                    action: "select a dish",
                    level: self.level(),
                })
            }
        };

        if !category.contains_dish(dish.id) {
            return Err(NavigationError::DishNotInCategory {
                dish_id: dish.id,
                category_id: category.id,
            });
        }

        let category = category.clone();
        self.state = NavigationState::AtIngredientList {
            category,
            dish: dish.clone(),
        };
        Ok(())
    }

    /// Go up one level. Returns `false` when already at the category list.
    pub fn back(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            NavigationState::AtCategoryList => false,
            NavigationState::AtDishList { .. } => true,
            NavigationState::AtIngredientList { category, .. } => {
                self.state = NavigationState::AtDishList { category };
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakfast() -> Category {
        Category {
            id: 1,
            name: "Desayuno".into(),
            dishes: vec![
                Dish {
                    id: 10,
                    name: "Avena".into(),
                    kcal_total: 300.0,
                    ingredients: Vec::new(),
                },
                Dish {
                    id: 11,
                    name: "Tostadas".into(),
                    kcal_total: 180.0,
                    ingredients: Vec::new(),
                },
            ],
        }
    }

    fn stray_dish() -> Dish {
        Dish {
            id: 99,
            name: "Pizza".into(),
            kcal_total: 900.0,
            ingredients: Vec::new(),
        }
    }

    #[test]
    fn test_starts_at_category_list() {
        let nav = Navigator::new();
        assert_eq!(nav.state(), &NavigationState::AtCategoryList);
        assert_eq!(nav.level(), Level::Categories);
    }

    #[test]
    fn test_full_drill_down_and_back() {
        let category = breakfast();
        let mut nav = Navigator::new();

        nav.select_category(&category).unwrap();
        assert_eq!(nav.state().category().map(|c| c.id), Some(1));

        nav.select_dish(&category.dishes[0]).unwrap();
        assert_eq!(nav.level(), Level::Ingredients);
        assert_eq!(nav.state().dish().map(|d| d.id), Some(10));

        assert!(nav.back());
        assert_eq!(nav.level(), Level::Dishes);
        assert_eq!(nav.state().category().map(|c| c.id), Some(1));
        assert!(nav.state().dish().is_none());

        assert!(nav.back());
        assert_eq!(nav.state(), &NavigationState::AtCategoryList);
    }

    #[test]
    fn test_back_at_root_is_idempotent() {
        let mut nav = Navigator::new();
        assert!(!nav.back());
        assert!(!nav.back());
        assert_eq!(nav.state(), &NavigationState::AtCategoryList);
    }

    #[test]
    fn test_select_dish_outside_category_is_rejected() {
        let category = breakfast();
        let mut nav = Navigator::new();
        nav.select_category(&category).unwrap();

        let err = nav.select_dish(&stray_dish()).unwrap_err();
        assert_eq!(
            err,
            NavigationError::DishNotInCategory {
                dish_id: 99,
                category_id: 1
            }
        );
        assert_eq!(nav.level(), Level::Dishes);
    }

    #[test]
    fn test_transitions_only_from_their_level() {
        let category = breakfast();
        let mut nav = Navigator::new();

        assert!(matches!(
            nav.select_dish(&category.dishes[0]),
            Err(NavigationError::InvalidTransition {
                level: Level::Categories,
                ..
            })
        ));

        nav.select_category(&category).unwrap();
        assert!(matches!(
            nav.select_category(&category),
            Err(NavigationError::InvalidTransition {
                level: Level::Dishes,
                ..
            })
        ));

        nav.select_dish(&category.dishes[1]).unwrap();
        assert!(nav.select_dish(&category.dishes[0]).is_err());
        assert_eq!(nav.state().dish().map(|d| d.id), Some(11));
    }

    #[test]
    fn test_reset_returns_to_root() {
        let category = breakfast();
        let mut nav = Navigator::new();
        nav.select_category(&category).unwrap();
        nav.select_dish(&category.dishes[0]).unwrap();

        nav.reset();
        assert_eq!(nav.level(), Level::Categories);
    }
}
