//! Integration flows across `MenuClient` services.

pub mod browse_flows;
pub mod favorites_flows;
pub mod session_flows;

use std::sync::Arc;

use menu_core::testing::FakeMenuServer;
use menu_core::{MemoryTokenStore, MenuClient, TokenStore, UnauthorizedPolicy};

/// Client over `server` with an in-memory token store.
pub fn client_for(server: &FakeMenuServer) -> MenuClient {
    client_with_store(server, Arc::new(MemoryTokenStore::new()), UnauthorizedPolicy::KeepSession)
}

/// Client over `server` with the given store and 401 policy.
///
/// # Panics
///
/// If the store cannot be read.
pub fn client_with_store(
    server: &FakeMenuServer,
    store: Arc<dyn TokenStore>,
    policy: UnauthorizedPolicy,
) -> MenuClient {
    match MenuClient::with_transport(Arc::new(server.clone()), store, policy) {
        Ok(client) => client,
        Err(e) => panic!("client construction failed: {e}"),
    }
}
