//! Multi-profile session subsystem.
//!
//! A user session can hold several profiles, exactly one active at a time,
//! with server-validated switching. This module owns the state machine
//! (`unauthenticated` → `initializing` → `authenticated`), the checks applied
//! to server-issued contexts, and the liveness flag used to abandon a startup
//! restore whose caller went away.

/// Caller liveness flag for abandonable operations.
pub mod lifeline;
/// Session manager and orchestration.
pub mod manager;
/// Session state and session snapshot types.
pub mod state;
mod validate;

pub use lifeline::{Lifeline, LifelineGuard};
pub use manager::{InitOutcome, LogoutReport, SessionManager};
pub use state::{ActiveProfile, Session, SessionState};
