//! Remote data gateway.
//!
//! Uniform request/response contract over the HTTP port. Every request
//! carries a JSON content type; authenticated requests also carry the bearer
//! token when one is present. Every failure becomes a [`GatewayError`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::session::SessionHandle;
use crate::domain::{GatewayError, UnauthorizedPolicy};
use crate::ports::{ApiRequest, HttpMethod, HttpTransport};

/// Message used when a failure body carries nothing usable.
pub const FALLBACK_MESSAGE: &str = "API request failed";

/// Whether a request attaches the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
}

#[derive(Clone)]
pub struct RemoteGateway {
    transport: Arc<dyn HttpTransport>,
    session: SessionHandle,
    policy: UnauthorizedPolicy,
}

impl RemoteGateway {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        session: SessionHandle,
        policy: UnauthorizedPolicy,
    ) -> Self {
        Self {
            transport,
            session,
            policy,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn policy(&self) -> UnauthorizedPolicy {
        self.policy
    }

    pub async fn get(&self, path: &str, access: Access) -> Result<Value, GatewayError> {
        self.request(HttpMethod::Get, path, None, access).await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<Value>,
        access: Access,
    ) -> Result<Value, GatewayError> {
        self.request(HttpMethod::Post, path, body, access).await
    }

    pub async fn delete(&self, path: &str, access: Access) -> Result<Value, GatewayError> {
        self.request(HttpMethod::Delete, path, None, access).await
    }

    /// Send one request and decode the JSON answer.
    ///
    /// An empty success body decodes to `Value::Null`.
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        access: Access,
    ) -> Result<Value, GatewayError> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if access == Access::Authenticated {
            if let Some(token) = self.session.token() {
                headers.push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }

        let request = ApiRequest {
            method,
            path: path.to_string(),
            headers,
            body: body.map(|b| b.to_string()),
        };

        debug!(method = method.as_str(), path, ?access, "sending request");

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(method = method.as_str(), path, error = %e, "transport failure");
            GatewayError::transport(e.0)
        })?;

        if !response.is_success() {
            let error = GatewayError::status(response.status, error_message(&response.body));
            warn!(
                method = method.as_str(),
                path,
                status = response.status,
                message = %error.message,
                "request failed"
            );
            if error.is_unauthorized() && access == Access::Authenticated {
                self.on_unauthorized();
            }
            return Err(error);
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response.body).map_err(|e| {
            warn!(method = method.as_str(), path, error = %e, "response is not JSON");
            GatewayError::malformed(e.to_string())
        })
    }

    fn on_unauthorized(&self) {
        if self.policy != UnauthorizedPolicy::ClearSession {
            return;
        }
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "failed to clear persisted token after 401");
        }
    }
}

/// Human-readable message from a failure body.
///
/// Uses the JSON `message` field: a string as-is, or an array of strings
/// joined with `", "`. Anything else yields [`FALLBACK_MESSAGE`].
pub fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                Some(parts.join(", "))
            }
            _ => None,
        });

    match message {
        Some(m) if !m.trim().is_empty() => m,
        _ => FALLBACK_MESSAGE.to_string(),
    }
}
