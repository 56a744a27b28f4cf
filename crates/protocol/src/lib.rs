//! Wire types for the SIGESCON authentication API.
//!
//! This crate contains the serde-serializable types exchanged with the
//! SIGESCON backend on the session endpoints (login, context fetch, current
//! user, profile switch, logout). These types represent the "protocol layer":
//! the shapes of data as they appear on the wire.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! * Pure data: No behavior beyond serialization/deserialization
//! * 1:1 with the backend: field names keep the backend's Portuguese keys via serde renames
//! * Stable: Changes only when the backend contract changes
//!
//! Session semantics (validation, state transitions) live in `sigescon`.

pub mod auth;
pub mod context;
pub mod error_body;
pub mod user;

pub use auth::*;
pub use context::*;
pub use error_body::*;
pub use user::*;
