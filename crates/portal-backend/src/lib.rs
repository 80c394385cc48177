//! # Portal Backend
//!
//! Adapters behind the session core's [`AuthGateway`](portal_session::AuthGateway)
//! and the records' [`RecordSource`](portal_records::RecordSource).
//!
//! ## Adapters
//!
//! - **[`RestBackend`]**: the hosted identity provider (`/auth/v1`) and data
//!   API (`/rest/v1`). The token pair is kept in a [`CredentialStore`],
//!   by default a file under the data directory, so sessions survive restarts.
//!   Expired access tokens are refreshed before a call and once more when a
//!   call is rejected with 401/403.
//! - **[`InMemoryBackend`]**: process-local accounts and tables, used by
//!   tests and the demo mode of the terminal shell.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORTAL_BACKEND_URL` | `http://127.0.0.1:54321` | Backend base URL |
//! | `PORTAL_ANON_KEY` | empty | Public API key sent as `apikey` |
//! | `PORTAL_REQUEST_TIMEOUT_MS` | `10000` | Per-request timeout |
//! | `PORTAL_CONNECT_TIMEOUT_MS` | `3000` | Connect timeout |
//! | `PORTAL_DATA_DIR` | `~/.university-portal` | Where the credential is kept |

pub mod config;
pub mod credentials;
pub mod error;
pub mod memory;
pub mod rest;

pub use config::BackendConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredential};
pub use error::BackendError;
pub use memory::{DemoAccount, InMemoryBackend, DEMO_ACCOUNTS, DEMO_PASSWORD};
pub use rest::RestBackend;
