//! Client core for the SIGESCON contract-management API.
//!
//! The pieces, leaf first:
//!
//! - [`tokens`]: persisted access token and scheme ([`TokenStore`])
//! - [`api`]: REST client attaching the token and normalizing errors ([`ApiClient`])
//! - [`session`]: login, startup restore, profile switching, logout ([`SessionManager`])
//! - [`permissions`]: capabilities derived from the active profile ([`Permissions`])
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sigescon::{ClientConfig, FileTokenStore, SessionManager};
//!
//! let tokens = Arc::new(FileTokenStore::at_default_location()?);
//! let manager = SessionManager::connect(ClientConfig::new("https://sigescon.example/api")?, tokens)?;
//!
//! manager.initialize().await;
//! if !manager.state().is_authenticated() {
//!     manager.login("ana@example.com", "secret").await?;
//! }
//! if manager.permissions().can_create_contract() {
//!     // ...
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod permissions;
pub mod session;
pub mod tokens;

pub use api::{ApiClient, Auth, RequestBody, RequestOptions};
pub use config::{ClientConfig, DEFAULT_BASE_URL, Endpoints};
pub use error::{Error, Result};
pub use permissions::{Capability, Permissions, ProfileKind};
pub use session::{ActiveProfile, InitOutcome, Lifeline, LogoutReport, Session, SessionManager, SessionState};
pub use sigescon_protocol as protocol;
pub use sigescon_protocol::{Profile, ProfileId, SessionContext, User};
pub use tokens::{FileTokenStore, MemoryTokenStore, StoredToken, TokenStore};
