//! Home screen view model.
//!
//! Combines the category load state, the navigator and the favorite set into
//! a renderable [`HomeView`]. Rows come out in display order with their
//! priority and band already computed.

use tracing::debug;

use crate::domain::{
    dish_priority, ingredient_priority, order_dishes, order_ingredients, Band, Category,
    CategoryId, Dish, DishId, FavoriteSet, IngredientId, Level, NavigationError, NavigationState,
    Navigator, Priority,
};

/// Progress of a one-shot fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub dish_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DishRow {
    pub id: DishId,
    pub name: String,
    pub kcal_total: f64,
    pub priority: Priority,
    pub band: Band,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRow {
    pub id: IngredientId,
    pub name: String,
    pub kcal: f64,
    pub quantity_grams: f64,
    pub priority: Priority,
    pub band: Band,
}

/// What the home screen shows, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    Loading,
    SignInRequired,
    Error(String),
    Categories(Vec<CategoryRow>),
    Dishes {
        category: String,
        rows: Vec<DishRow>,
    },
    Ingredients {
        category: String,
        dish: DishRow,
        rows: Vec<IngredientRow>,
    },
}

impl HomeView {
    /// Number of selectable rows.
    pub fn row_count(&self) -> usize {
        match self {
            HomeView::Categories(rows) => rows.len(),
            HomeView::Dishes { rows, .. } => rows.len(),
            HomeView::Ingredients { rows, .. } => rows.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuBrowser {
    catalog: LoadState<Vec<Category>>,
    navigator: Navigator,
    require_sign_in: bool,
}

impl MenuBrowser {
    pub fn new(require_sign_in: bool) -> Self {
        Self {
            catalog: LoadState::Loading,
            navigator: Navigator::new(),
            require_sign_in,
        }
    }

    /// Start over: category list, catalog loading.
    pub fn mount(&mut self) {
        self.navigator.reset();
        self.catalog = LoadState::Loading;
    }

    /// Record the outcome of the category fetch.
    pub fn apply_categories<E: std::fmt::Display>(&mut self, result: Result<Vec<Category>, E>) {
        self.catalog = match result {
            Ok(categories) => {
                debug!(count = categories.len(), "catalog ready");
                LoadState::Ready(categories)
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub fn catalog(&self) -> &LoadState<Vec<Category>> {
        &self.catalog
    }

    pub fn state(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn level(&self) -> Level {
        self.navigator.level()
    }

    pub fn select_category(&mut self, id: CategoryId) -> Result<(), NavigationError> {
        let categories = self.catalog.ready().ok_or(NavigationError::CatalogNotReady)?;
        let category = categories
            .iter()
            .find(|c| c.id == id)
            .ok_or(NavigationError::UnknownCategory(id))?;
        self.navigator.select_category(category)
    }

    pub fn select_dish(&mut self, id: DishId) -> Result<(), NavigationError> {
        let categories = self.catalog.ready().ok_or(NavigationError::CatalogNotReady)?;
        // prefer the selected category so duplicate ids elsewhere do not shadow it
        let selected = self.navigator.state().category().and_then(|c| c.dish(id));
        let dish = selected
            .or_else(|| categories.iter().find_map(|c| c.dish(id)))
            .ok_or(NavigationError::UnknownDish(id))?
            .clone();
        self.navigator.select_dish(&dish)
    }

    /// Go up one level; `false` at the top.
    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    pub fn view(&self, authenticated: bool, favorites: &FavoriteSet) -> HomeView {
        let categories = match &self.catalog {
            LoadState::Loading => return HomeView::Loading,
            _ if self.require_sign_in && !authenticated => return HomeView::SignInRequired,
            LoadState::Failed(message) => return HomeView::Error(message.clone()),
            LoadState::Ready(categories) => categories,
        };

        match self.navigator.state() {
            NavigationState::AtCategoryList => HomeView::Categories(
                categories
                    .iter()
                    .map(|c| CategoryRow {
                        id: c.id,
                        name: c.name.clone(),
                        dish_count: c.dishes.len(),
                    })
                    .collect(),
            ),
            NavigationState::AtDishList { category } => HomeView::Dishes {
                category: category.name.clone(),
                rows: order_dishes(&category.dishes)
                    .into_iter()
                    .map(|d| dish_row(d, favorites))
                    .collect(),
            },
            NavigationState::AtIngredientList { category, dish } => HomeView::Ingredients {
                category: category.name.clone(),
                dish: dish_row(dish, favorites),
                rows: order_ingredients(&dish.ingredients)
                    .into_iter()
                    .map(|i| {
                        let priority = ingredient_priority(i.kcal);
                        IngredientRow {
                            id: i.id,
                            name: i.name.clone(),
                            kcal: i.kcal,
                            quantity_grams: i.quantity_grams,
                            priority,
                            band: priority.band(),
                        }
                    })
                    .collect(),
            },
        }
    }
}

fn dish_row(dish: &Dish, favorites: &FavoriteSet) -> DishRow {
    let priority = dish_priority(dish.kcal_total);
    DishRow {
        id: dish.id,
        name: dish.name.clone(),
        kcal_total: dish.kcal_total,
        priority,
        band: priority.band(),
        is_favorite: favorites.contains(dish.id),
    }
}
