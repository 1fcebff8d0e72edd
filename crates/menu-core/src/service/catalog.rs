//! Category catalog fetch.

use tracing::info;

use super::endpoints::CATEGORIES_PATH;
use super::gateway::{Access, RemoteGateway};
use crate::domain::{Category, GatewayError};

#[derive(Clone)]
pub struct CatalogClient {
    gateway: RemoteGateway,
}

impl CatalogClient {
    pub fn new(gateway: RemoteGateway) -> Self {
        Self { gateway }
    }

    /// `GET /categorias-comida`, public. Order is kept as received.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, GatewayError> {
        let value = self.gateway.get(CATEGORIES_PATH, Access::Public).await?;
        let categories: Vec<Category> = serde_json::from_value(value)
            .map_err(|e| GatewayError::malformed(format!("categories: {e}")))?;
        info!(count = categories.len(), "categories loaded");
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryTokenStore;
    use crate::domain::UnauthorizedPolicy;
    use crate::ports::HttpMethod;
    use crate::service::session::SessionHandle;
    use crate::testing::{sample_catalog, FakeMenuServer};
    use std::sync::Arc;

    fn catalog(server: &FakeMenuServer) -> CatalogClient {
        let session = SessionHandle::new(Arc::new(MemoryTokenStore::new()));
        CatalogClient::new(RemoteGateway::new(
            Arc::new(server.clone()),
            session,
            UnauthorizedPolicy::KeepSession,
        ))
    }

    #[tokio::test]
    async fn test_fetch_keeps_service_order() {
        let server = FakeMenuServer::sample();

        let categories = catalog(&server).fetch_categories().await.unwrap();

        assert_eq!(categories, sample_catalog());
        assert_eq!(server.request_labels(), vec!["GET /categorias-comida"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_carries_message() {
        let server = FakeMenuServer::sample();
        server.fail_next(HttpMethod::Get, CATEGORIES_PATH, 500, r#"{"message":"db down"}"#);

        let err = catalog(&server).fetch_categories().await.unwrap_err();
        assert_eq!(err.to_string(), "db down");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_rejected() {
        let server = FakeMenuServer::sample();
        server.fail_next(HttpMethod::Get, CATEGORIES_PATH, 200, r#"{"categorias":[]}"#);

        assert!(catalog(&server).fetch_categories().await.is_err());
    }
}
