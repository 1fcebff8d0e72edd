//! Ports layer.
//!
//! Only outbound (driven) ports exist: the service layer is the inbound API.

pub mod outbound;

pub use outbound::*;
