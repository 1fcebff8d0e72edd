//! Presentation ordering rules.
//!
//! Dishes and ingredients are classified by caloric thresholds into three
//! priorities. Lists are displayed in ascending priority order using a stable
//! sort, so equal priorities keep the order in which the service returned
//! them. Each priority also maps to a colour band used for emphasis.
//!
//! | Priority | Dish `kcalTotal` | Ingredient `kcal` | Band   |
//! |----------|------------------|-------------------|--------|
//! | 1        | `>= 500`         | `>= 150`          | Red    |
//! | 2        | `251..500`       | `50..150`         | Yellow |
//! | 3        | below            | below             | Green  |

use super::entities::{Dish, Ingredient};

/// Dish threshold for priority 1.
pub const DISH_HIGH_KCAL: f64 = 500.0;
/// Dish threshold for priority 2.
pub const DISH_MEDIUM_KCAL: f64 = 251.0;
/// Ingredient threshold for priority 1.
pub const INGREDIENT_HIGH_KCAL: f64 = 150.0;
/// Ingredient threshold for priority 2.
pub const INGREDIENT_MEDIUM_KCAL: f64 = 50.0;

/// Display priority. Lower ranks are shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Priority {
    /// Numeric rank (1-3).
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Colour band for this priority.
    pub fn band(self) -> Band {
        match self {
            Priority::High => Band::Red,
            Priority::Medium => Band::Yellow,
            Priority::Low => Band::Green,
        }
    }

    fn classify(kcal: f64, high: f64, medium: f64) -> Self {
        if kcal >= high {
            Priority::High
        } else if kcal >= medium {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

/// Visual emphasis band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Red,
    Yellow,
    Green,
}

impl Band {
    pub fn label(&self) -> &'static str {
        match self {
            Band::Red => "red",
            Band::Yellow => "yellow",
            Band::Green => "green",
        }
    }
}

/// Priority of a dish from its total calories.
pub fn dish_priority(kcal_total: f64) -> Priority {
    Priority::classify(kcal_total, DISH_HIGH_KCAL, DISH_MEDIUM_KCAL)
}

/// Priority of an ingredient from its calories.
pub fn ingredient_priority(kcal: f64) -> Priority {
    Priority::classify(kcal, INGREDIENT_HIGH_KCAL, INGREDIENT_MEDIUM_KCAL)
}

/// Band of a dish from its total calories.
pub fn dish_band(kcal_total: f64) -> Band {
    dish_priority(kcal_total).band()
}

/// Band of an ingredient from its calories.
pub fn ingredient_band(kcal: f64) -> Band {
    ingredient_priority(kcal).band()
}

/// Dishes in display order. The input slice is left untouched.
pub fn order_dishes(dishes: &[Dish]) -> Vec<&Dish> {
    let mut ordered: Vec<&Dish> = dishes.iter().collect();
    // slice::sort_by_key is stable
    ordered.sort_by_key(|d| dish_priority(d.kcal_total));
    ordered
}

/// Ingredients in display order. The input slice is left untouched.
pub fn order_ingredients(ingredients: &[Ingredient]) -> Vec<&Ingredient> {
    let mut ordered: Vec<&Ingredient> = ingredients.iter().collect();
    ordered.sort_by_key(|i| ingredient_priority(i.kcal));
    ordered
}
