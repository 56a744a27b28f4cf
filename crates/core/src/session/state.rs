//! Session state observed by front ends.

use std::sync::Arc;

use serde::Serialize;
use sigescon_protocol::{Profile, ProfileId, SessionContext, User};

use crate::permissions::Permissions;

/// The profile currently governing permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveProfile {
	pub id: ProfileId,
	pub name: String,
}

/// An authenticated session.
///
/// `active_profile`, when present, is always one of
/// `context.available_profiles`, and its name is the locally known one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
	pub context: SessionContext,
	pub user: User,
	pub active_profile: Option<ActiveProfile>,
	/// The user must pick a profile before using role-gated features.
	pub requires_profile_selection: bool,
}

impl Session {
	pub fn available_profiles(&self) -> &[Profile] {
		&self.context.available_profiles
	}

	pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
		self.context.available_profiles.iter().find(|p| p.id == id)
	}

	/// Looks up an available profile by name, ignoring case.
	pub fn profile_by_name(&self, name: &str) -> Option<&Profile> {
		let wanted = name.trim();
		self.context
			.available_profiles
			.iter()
			.find(|p| p.name.trim().eq_ignore_ascii_case(wanted))
	}

	pub fn is_active(&self, id: ProfileId) -> bool {
		self.active_profile.as_ref().is_some_and(|a| a.id == id)
	}

	pub fn permissions(&self) -> Permissions {
		Permissions::for_profile(self.active_profile.as_ref().map(|a| a.name.as_str()))
	}
}

/// Lifecycle of the session manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
	#[default]
	Unauthenticated,
	/// A stored token is being validated against the server.
	Initializing,
	Authenticated(Arc<Session>),
}

impl SessionState {
	pub fn name(&self) -> &'static str {
		match self {
			SessionState::Unauthenticated => "unauthenticated",
			SessionState::Initializing => "initializing",
			SessionState::Authenticated(_) => "authenticated",
		}
	}

	pub fn is_authenticated(&self) -> bool {
		matches!(self, SessionState::Authenticated(_))
	}

	pub fn session(&self) -> Option<&Arc<Session>> {
		match self {
			SessionState::Authenticated(session) => Some(session),
			_ => None,
		}
	}

	pub fn active_profile(&self) -> Option<&ActiveProfile> {
		self.session().and_then(|s| s.active_profile.as_ref())
	}

	pub fn permissions(&self) -> Permissions {
		self.session().map(|s| s.permissions()).unwrap_or_default()
	}
}
