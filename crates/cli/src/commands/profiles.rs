//! Profile listing, switching and capability checks.

use sigescon::{Capability, Permissions, ProfileId, Session};

use super::auth::require_session;
use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{CanData, ProfileEntry, ProfilesData, SwitchData};

pub async fn list(ctx: &CommandContext) -> Result<ProfilesData> {
	let manager = ctx.session_manager()?;
	let session = require_session(&manager).await?;
	Ok(ProfilesData {
		active_profile: session.active_profile.clone(),
		can_switch: session.context.can_switch,
		profiles: ProfileEntry::list(&session),
	})
}

pub async fn switch(ctx: &CommandContext, profile: &str, justification: Option<&str>) -> Result<SwitchData> {
	let manager = ctx.session_manager()?;
	let current = require_session(&manager).await?;
	let target = resolve_profile(&current, profile)?;

	let next = manager.switch_profile(target, justification).await?;
	Ok(SwitchData {
		previous_profile: current.active_profile.clone(),
		active_profile: next.active_profile.clone(),
		switched_at: next.context.last_switch_at.clone(),
	})
}

/// Capabilities of the active profile. Without a session nothing is granted.
pub async fn can(ctx: &CommandContext, capability: Option<&str>) -> Result<CanData> {
	let only = capability
		.map(|raw| raw.parse::<Capability>().map_err(CliError::InvalidInput))
		.transpose()?;

	let manager = ctx.session_manager()?;
	let permissions = match require_session(&manager).await {
		Ok(session) => session.permissions(),
		Err(CliError::Api(sigescon::Error::NotAuthenticated)) => Permissions::none(),
		Err(err) => return Err(err),
	};
	Ok(CanData::new(&permissions, only))
}

/// Accepts a numeric id or an available profile's name.
fn resolve_profile(session: &Session, raw: &str) -> Result<ProfileId> {
	let raw = raw.trim();
	if let Ok(id) = raw.parse::<ProfileId>() {
		return Ok(id);
	}
	session
		.profile_by_name(raw)
		.map(|p| p.id)
		.ok_or_else(|| CliError::InvalidInput(format!("No available profile named '{raw}'")))
}
