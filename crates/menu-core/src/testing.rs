//! Test utilities.
//!
//! [`FakeMenuServer`] is an in-memory implementation of the HTTP port that
//! behaves like the remote menu service: public catalog, bearer-token
//! authentication, per-user favorites, admin-only users listing. It can delay
//! or fail individual requests and records every request it sees.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use menu_core::testing::FakeMenuServer;
//!
//! let server = FakeMenuServer::sample();
//! let token = server.issue_token("ana@menu.test");
//! assert!(server.favorites_of("ana@menu.test").is_empty());
//! assert!(!token.is_empty());
//! ```

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::domain::{Category, Dish, DishId, Ingredient, Role, User, UserId};
use crate::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError};
use crate::service::endpoints::{
    CATEGORIES_PATH, FAVORITES_PATH, LOGIN_PATH, REGISTER_PATH, USERS_PATH,
};

/// Admin account present in [`FakeMenuServer::sample`].
pub const ADMIN_EMAIL: &str = "admin@menu.test";
pub const ADMIN_PASSWORD: &str = "admin123";
/// Regular account present in [`FakeMenuServer::sample`].
pub const USER_EMAIL: &str = "ana@menu.test";
pub const USER_PASSWORD: &str = "secret";

/// One request as seen by the fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// `"GET /favoritos"` style label.
    pub fn label(&self) -> String {
        format!("{} {}", self.method.as_str(), self.path)
    }
}

#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: String,
    password: String,
    role: Role,
}

type RouteKey = (HttpMethod, String);

#[derive(Debug, Default)]
struct ServerState {
    categories: Vec<Category>,
    accounts: Vec<Account>,
    tokens: HashMap<String, UserId>,
    favorites: HashMap<UserId, BTreeSet<DishId>>,
    latency: HashMap<RouteKey, VecDeque<Duration>>,
    failures: HashMap<RouteKey, VecDeque<ApiResponse>>,
    unreachable: bool,
    log: Vec<RecordedRequest>,
    issued_tokens: u64,
}

/// In-memory menu service.
///
/// State changes are applied when a request arrives; any configured latency
/// only delays the response. Two overlapping requests therefore observe the
/// server in arrival order but may complete in either order.
#[derive(Debug, Clone, Default)]
pub struct FakeMenuServer {
    state: Arc<Mutex<ServerState>>,
}

impl FakeMenuServer {
    /// Empty catalog, no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// [`sample_catalog`] plus one admin and one regular account.
    pub fn sample() -> Self {
        let server = Self::new();
        server.set_catalog(sample_catalog());
        server.add_account(ADMIN_EMAIL, ADMIN_PASSWORD, Role::Admin);
        server.add_account(USER_EMAIL, USER_PASSWORD, Role::User);
        server
    }

    pub fn set_catalog(&self, categories: Vec<Category>) {
        self.state.lock().categories = categories;
    }

    pub fn add_account(&self, email: &str, password: &str, role: Role) -> UserId {
        let mut state = self.state.lock();
        let id = state.accounts.len() as UserId + 1;
        state.accounts.push(Account {
            id,
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
        id
    }

    /// Sign `email` in out of band and return a valid token.
    ///
    /// # Panics
    ///
    /// If no account has that email.
    pub fn issue_token(&self, email: &str) -> String {
        let mut state = self.state.lock();
        let id = match state.account_by_email(email) {
            Some(account) => account.id,
            None => panic!("no account for {email}"),
        };
        state.new_token(id)
    }

    /// Favorites of `email`, ascending.
    pub fn favorites_of(&self, email: &str) -> Vec<DishId> {
        let state = self.state.lock();
        state
            .account_by_email(email)
            .and_then(|a| state.favorites.get(&a.id))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Overwrite the favorites of `email`.
    pub fn set_favorites(&self, email: &str, ids: impl IntoIterator<Item = DishId>) {
        let mut state = self.state.lock();
        let id = match state.account_by_email(email) {
            Some(account) => account.id,
            None => panic!("no account for {email}"),
        };
        state.favorites.insert(id, ids.into_iter().collect());
    }

    /// Delay the response of the next `method path` request by `delay`.
    ///
    /// Calls queue up: the n-th call applies to the n-th matching request.
    pub fn delay_next(&self, method: HttpMethod, path: &str, delay: Duration) {
        self.state
            .lock()
            .latency
            .entry((method, path.to_string()))
            .or_default()
            .push_back(delay);
    }

    /// Answer the next `method path` request with `status` and `body` instead
    /// of routing it. The request has no effect on server state.
    pub fn fail_next(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.state
            .lock()
            .failures
            .entry((method, path.to_string()))
            .or_default()
            .push_back(ApiResponse::new(status, body));
    }

    /// Make every request fail at the transport level.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unreachable = unreachable;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().log.clone()
    }

    /// `"METHOD path"` labels of every recorded request, in arrival order.
    pub fn request_labels(&self) -> Vec<String> {
        self.state.lock().log.iter().map(RecordedRequest::label).collect()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().log.len()
    }

    pub fn clear_log(&self) {
        self.state.lock().log.clear();
    }
}

#[async_trait]
impl HttpTransport for FakeMenuServer {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let (response, delay) = {
            let mut state = self.state.lock();
            state.log.push(RecordedRequest {
                method: request.method,
                path: request.path.clone(),
                authorization: request.header("authorization").map(str::to_owned),
                body: request.body.clone(),
            });
            if state.unreachable {
                return Err(TransportError(
                    "Cannot connect to fake menu server".to_string(),
                ));
            }

            let key = (request.method, request.path.clone());
            let delay = state.latency.get_mut(&key).and_then(VecDeque::pop_front);
            let injected = state.failures.get_mut(&key).and_then(VecDeque::pop_front);
            let response = match injected {
                Some(response) => response,
                None => state.route(&request),
            };
            (response, delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(response)
    }
}

fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(status, body.to_string())
}

fn message(status: u16, text: &str) -> ApiResponse {
    json_response(status, json!({ "message": text }))
}

impl ServerState {
    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
    }

    fn new_token(&mut self, user: UserId) -> String {
        self.issued_tokens += 1;
        let token = format!("fake-token-{}-{}", user, self.issued_tokens);
        self.tokens.insert(token.clone(), user);
        token
    }

    fn caller(&self, request: &ApiRequest) -> Option<&Account> {
        let token = request.header("authorization")?.strip_prefix("Bearer ")?;
        let id = self.tokens.get(token)?;
        self.accounts.iter().find(|a| a.id == *id)
    }

    fn dish_exists(&self, id: DishId) -> bool {
        self.categories.iter().any(|c| c.contains_dish(id))
    }

    fn route(&mut self, request: &ApiRequest) -> ApiResponse {
        let path = request.path.as_str();
        match (request.method, path) {
            (HttpMethod::Get, CATEGORIES_PATH) => match serde_json::to_value(&self.categories) {
                Ok(body) => json_response(200, body),
                Err(e) => message(500, &e.to_string()),
            },
            (HttpMethod::Get, FAVORITES_PATH) => self.list_favorites(request),
            (HttpMethod::Post, LOGIN_PATH) => self.login(request),
            (HttpMethod::Post, REGISTER_PATH) => self.register(request),
            (HttpMethod::Get, USERS_PATH) => self.list_users(request),
            (method @ (HttpMethod::Post | HttpMethod::Delete), _) => {
                match path
                    .strip_prefix(FAVORITES_PATH)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .and_then(|id| id.parse::<DishId>().ok())
                {
                    Some(id) => self.mutate_favorite(request, method, id),
                    None => message(404, &format!("Cannot {} {}", method.as_str(), path)),
                }
            }
            (method, _) => message(404, &format!("Cannot {} {}", method.as_str(), path)),
        }
    }

    fn list_favorites(&self, request: &ApiRequest) -> ApiResponse {
        let Some(caller) = self.caller(request) else {
            return message(401, "Unauthorized");
        };
        let body: Vec<Value> = self
            .favorites
            .get(&caller.id)
            .into_iter()
            .flatten()
            .map(|id| json!({ "id": id }))
            .collect();
        json_response(200, Value::Array(body))
    }

    fn mutate_favorite(&mut self, request: &ApiRequest, method: HttpMethod, id: DishId) -> ApiResponse {
        let Some(user) = self.caller(request).map(|a| a.id) else {
            return message(401, "Unauthorized");
        };
        if !self.dish_exists(id) {
            return message(404, "Plato no encontrado");
        }
        let set = self.favorites.entry(user).or_default();
        if method == HttpMethod::Post {
            set.insert(id);
            json_response(201, json!({ "id": id }))
        } else {
            set.remove(&id);
            ApiResponse::new(200, "")
        }
    }

    fn credentials(request: &ApiRequest) -> Option<(String, String)> {
        let body: Value = serde_json::from_str(request.body.as_deref()?).ok()?;
        let email = body.get("email")?.as_str()?.to_string();
        let password = body.get("password")?.as_str()?.to_string();
        Some((email, password))
    }

    fn login(&mut self, request: &ApiRequest) -> ApiResponse {
        let Some((email, password)) = Self::credentials(request) else {
            return message(400, "email and password are required");
        };
        let user = self
            .account_by_email(&email)
            .filter(|a| a.password == password)
            .map(|a| a.id);
        match user {
            Some(id) => {
                let token = self.new_token(id);
                json_response(201, json!({ "token": token }))
            }
            None => message(401, "Invalid credentials"),
        }
    }

    fn register(&mut self, request: &ApiRequest) -> ApiResponse {
        let Some((email, password)) = Self::credentials(request) else {
            return message(400, "email and password are required");
        };
        let mut problems = Vec::new();
        if !email.contains('@') {
            problems.push("email must be an email");
        }
        if password.len() < 6 {
            problems.push("password must be longer than or equal to 6 characters");
        }
        if !problems.is_empty() {
            return json_response(400, json!({ "message": problems }));
        }
        if self.account_by_email(&email).is_some() {
            return message(409, "Email already registered");
        }

        let id = self.accounts.len() as UserId + 1;
        self.accounts.push(Account {
            id,
            email,
            password,
            role: Role::User,
        });
        let token = self.new_token(id);
        json_response(201, json!({ "token": token }))
    }

    fn list_users(&self, request: &ApiRequest) -> ApiResponse {
        let Some(caller) = self.caller(request) else {
            return message(401, "Unauthorized");
        };
        if caller.role != Role::Admin {
            return message(200, "Forbidden");
        }
        let users: Vec<User> = self
            .accounts
            .iter()
            .map(|a| User {
                id: a.id,
                email: a.email.clone(),
                role: a.role,
            })
            .collect();
        match serde_json::to_value(users) {
            Ok(body) => json_response(200, body),
            Err(e) => message(500, &e.to_string()),
        }
    }
}

fn ingredient(id: i64, name: &str, kcal: f64, grams: f64) -> Ingredient {
    Ingredient {
        id,
        name: name.to_string(),
        kcal,
        quantity_grams: grams,
    }
}

/// Two categories covering every priority band.
///
/// - `1 Desayuno`: `10 Avena` (300 kcal), `11 Tostadas con aguacate` (520),
///   `12 Fruta` (120)
/// - `2 Almuerzo`: `20 Lentejas` (480), `21 Ensalada` (180)
pub fn sample_catalog() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Desayuno".to_string(),
            dishes: vec![
                Dish {
                    id: 10,
                    name: "Avena".to_string(),
                    kcal_total: 300.0,
                    ingredients: vec![
                        ingredient(100, "Avena en hojuelas", 150.0, 40.0),
                        ingredient(101, "Leche", 90.0, 200.0),
                        ingredient(102, "Canela", 6.0, 2.0),
                    ],
                },
                Dish {
                    id: 11,
                    name: "Tostadas con aguacate".to_string(),
                    kcal_total: 520.0,
                    ingredients: vec![
                        ingredient(110, "Pan integral", 160.0, 60.0),
                        ingredient(111, "Aguacate", 240.0, 150.0),
                    ],
                },
                Dish {
                    id: 12,
                    name: "Fruta".to_string(),
                    kcal_total: 120.0,
                    ingredients: vec![ingredient(120, "Manzana", 52.0, 100.0)],
                },
            ],
        },
        Category {
            id: 2,
            name: "Almuerzo".to_string(),
            dishes: vec![
                Dish {
                    id: 20,
                    name: "Lentejas".to_string(),
                    kcal_total: 480.0,
                    ingredients: vec![
                        ingredient(200, "Lentejas", 350.0, 100.0),
                        ingredient(201, "Zanahoria", 41.0, 100.0),
                    ],
                },
                Dish {
                    id: 21,
                    name: "Ensalada".to_string(),
                    kcal_total: 180.0,
                    ingredients: Vec::new(),
                },
            ],
        },
    ]
}
