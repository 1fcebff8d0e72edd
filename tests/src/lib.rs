//! # Menu Client Test Suite
//!
//! Cross-service flows run against `testing::FakeMenuServer`.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── browse_flows.rs     # Mount, drill-down, ordering, sign-in gate
//!     ├── session_flows.rs    # Login, register, logout, token persistence, 401 policy
//!     └── favorites_flows.rs  # Toggle/refresh interleavings, users listing
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p menu-tests
//! cargo test -p menu-tests integration::favorites_flows
//! ```

#![allow(dead_code)]

pub mod integration;
