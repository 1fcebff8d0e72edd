//! Adapters implementing the outbound ports.

pub mod http;
pub mod token_store;

pub use http::ReqwestTransport;
pub use token_store::{FileTokenStore, MemoryTokenStore, DEFAULT_TOKEN_KEY};
