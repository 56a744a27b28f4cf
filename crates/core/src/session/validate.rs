//! Checks applied to server-issued session contexts before they are trusted.

use sigescon_protocol::{Profile, ProfileId, SessionContext, User};
use tracing::warn;

use super::state::{ActiveProfile, Session};
use crate::error::{Error, Result};

/// Resolves the active profile of a fresh context (login or startup fetch).
///
/// The active id must be one of the context's own available profiles; its
/// name is taken from that list. Returns `None` when the server has not
/// activated any profile yet.
pub(crate) fn normalize_context(mut context: SessionContext) -> Result<(SessionContext, Option<ActiveProfile>)> {
	let Some(active_id) = context.active_profile_id else {
		return Ok((context, None));
	};

	let known = find(&context.available_profiles, active_id)
		.ok_or_else(|| Error::Validation(format!("Active profile {active_id} is not among the user's available profiles")))?
		.clone();

	let active = reconcile_name(&known, context.active_profile_name.as_deref());
	context.active_profile_name = Some(active.name.clone());
	Ok((context, Some(active)))
}

/// Validates a switch response against the session that requested it.
///
/// Membership is checked against the profiles known before the switch, not
/// against whatever list the response carries.
pub(crate) fn apply_switch(current: &Session, target: ProfileId, mut response: SessionContext) -> Result<Session> {
	let active_id = response
		.active_profile_id
		.ok_or_else(|| Error::Validation("Profile switch response has no active profile id".into()))?;
	let server_name = response
		.active_profile_name
		.as_deref()
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.ok_or_else(|| Error::Validation("Profile switch response has no active profile name".into()))?;

	let known = find(current.available_profiles(), active_id)
		.ok_or_else(|| Error::Validation(format!("Server activated profile {active_id}, which is not available to this user")))?;

	if active_id != target {
		return Err(Error::Validation(format!(
			"Server activated profile {active_id} instead of the requested profile {target}"
		)));
	}

	let active = reconcile_name(known, Some(server_name));

	if response.available_profiles.is_empty() {
		response.available_profiles = current.available_profiles().to_vec();
	} else if find(&response.available_profiles, active_id).is_none() {
		return Err(Error::Validation(format!(
			"Profile switch response omits the active profile {active_id} from the available profiles"
		)));
	}
	response.active_profile_name = Some(active.name.clone());

	Ok(Session {
		context: response,
		user: current.user.clone(),
		active_profile: Some(active),
		requires_profile_selection: false,
	})
}

/// Minimal user derived from the context when the user endpoint fails.
pub(crate) fn placeholder_user(context: &SessionContext, identifier: Option<&str>) -> User {
	let identifier = identifier.map(str::trim).filter(|s| !s.is_empty());
	User {
		id: context.user_id,
		name: identifier.map(str::to_string).unwrap_or_else(|| format!("Usuário {}", context.user_id)),
		email: identifier.filter(|s| s.contains('@')).map(str::to_string).unwrap_or_default(),
		registration: None,
		profiles: context.available_profiles.iter().map(|p| p.name.clone()).collect(),
	}
}

fn find(profiles: &[Profile], id: ProfileId) -> Option<&Profile> {
	profiles.iter().find(|p| p.id == id)
}

/// Locally known name wins over the server-supplied one.
fn reconcile_name(known: &Profile, server_name: Option<&str>) -> ActiveProfile {
	if let Some(server_name) = server_name {
		if server_name.trim() != known.name {
			warn!(
				target = "sigescon.session",
				profile_id = known.id,
				server_name = %server_name,
				known_name = %known.name,
				"server profile name differs from known name; keeping known name"
			);
		}
	}
	ActiveProfile {
		id: known.id,
		name: known.name.clone(),
	}
}
