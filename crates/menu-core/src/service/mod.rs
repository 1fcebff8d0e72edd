//! Service layer.
//!
//! [`MenuClient`] wires one session, one gateway and the services built on
//! top of them. Every service is a cheap clone sharing the same session, so
//! the front end can hand copies to spawned tasks.

pub mod auth;
pub mod browser;
pub mod catalog;
pub mod endpoints;
pub mod favorites;
pub mod gateway;
pub mod session;
pub mod users;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

pub use auth::AuthContext;
pub use browser::{CategoryRow, DishRow, HomeView, IngredientRow, LoadState, MenuBrowser};
pub use catalog::CatalogClient;
pub use favorites::{FavoritesSynchronizer, ToggleReport};
pub use gateway::{error_message, Access, RemoteGateway, FALLBACK_MESSAGE};
pub use session::SessionHandle;
pub use users::{UsersDirectory, UsersView};

use crate::adapters::{FileTokenStore, ReqwestTransport};
use crate::config::{ClientConfig, ConfigError};
use crate::domain::{TokenStoreError, UnauthorizedPolicy};
use crate::ports::{HttpTransport, TokenStore, TransportError};

/// Failure while assembling a [`MenuClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create transport: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

/// All client services over one session.
#[derive(Clone)]
pub struct MenuClient {
    session: SessionHandle,
    gateway: RemoteGateway,
    catalog: CatalogClient,
    favorites: FavoritesSynchronizer,
    auth: AuthContext,
    users: UsersDirectory,
}

impl MenuClient {
    /// Build from configuration: reqwest transport and file token store.
    ///
    /// The persisted token is read once here.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let transport = ReqwestTransport::new(
            config.api.base_url.trim(),
            config.api.request_timeout(),
            config.api.connect_timeout(),
        )?;
        let store = FileTokenStore::new(
            config.session.token_path(),
            config.session.token_key.clone(),
        );
        info!(
            base_url = %transport.base_url(),
            token_path = %store.path().display(),
            "menu client configured"
        );

        Self::with_transport(
            Arc::new(transport),
            Arc::new(store),
            config.session.unauthorized_policy(),
        )
    }

    /// Build over arbitrary adapters and activate the session.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
        policy: UnauthorizedPolicy,
    ) -> Result<Self, ClientError> {
        let session = SessionHandle::new(store);
        session.activate()?;

        let gateway = RemoteGateway::new(transport, session.clone(), policy);
        Ok(Self {
            catalog: CatalogClient::new(gateway.clone()),
            favorites: FavoritesSynchronizer::new(gateway.clone()),
            auth: AuthContext::new(gateway.clone()),
            users: UsersDirectory::new(gateway.clone()),
            session,
            gateway,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn gateway(&self) -> &RemoteGateway {
        &self.gateway
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesSynchronizer {
        &self.favorites
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    pub fn users(&self) -> &UsersDirectory {
        &self.users
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
