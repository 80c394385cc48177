//! # University Portal Test Suite
//!
//! Cross-crate scenarios run against the in-memory backend.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Backend, store and records wiring
//! └── integration/
//!     ├── session.rs    # Sign-in / sign-up / sign-out / refresh scenarios
//!     ├── routing.rs    # Route table and guard over a live store
//!     ├── records.rs    # Student pages end to end
//!     └── persistence.rs# Credential store behavior across restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p portal-tests
//! cargo test -p portal-tests integration::session::
//! ```

pub mod fixtures;
pub mod integration;
