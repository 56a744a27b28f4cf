//! Login, logout and status.

use std::io::BufRead;
use std::sync::Arc;

use sigescon::{InitOutcome, Session, SessionManager};
use tracing::{debug, info};

use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::{LoginData, LogoutData, ProfileEntry, StatusData, UserData};

pub async fn login(ctx: &CommandContext, identifier: &str, password: Option<String>) -> Result<LoginData> {
	let identifier = identifier.trim();
	if identifier.is_empty() {
		return Err(CliError::InvalidInput("identifier must not be empty".into()));
	}
	let password = match password {
		Some(password) => password,
		None => read_password_line().await?,
	};
	if password.is_empty() {
		return Err(CliError::InvalidInput(
			"password is required (--password, SIGESCON_PASSWORD or one line on stdin)".into(),
		));
	}

	let manager = ctx.session_manager()?;
	info!(target = "sigescon.cli", api_url = %ctx.config.api_url, "logging in");
	let session = manager.login(identifier, &password).await?;

	Ok(LoginData {
		user: UserData::from(&session.user),
		active_profile: session.active_profile.clone(),
		available_profiles: ProfileEntry::list(&session),
		requires_profile_selection: session.requires_profile_selection,
		token_file: ctx.config.token_file.clone(),
	})
}

async fn read_password_line() -> Result<String> {
	let line = tokio::task::spawn_blocking(|| {
		let mut line = String::new();
		std::io::stdin().lock().read_line(&mut line).map(|_| line)
	})
	.await
	.map_err(std::io::Error::other)??;
	Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub async fn logout(ctx: &CommandContext) -> Result<LogoutData> {
	let manager = ctx.session_manager()?;
	let report = manager.logout().await;
	Ok(LogoutData {
		had_session: report.had_session,
		server_notified: report.server_notified,
	})
}

pub async fn status(ctx: &CommandContext) -> Result<StatusData> {
	let manager = ctx.session_manager()?;
	let outcome = manager.initialize().await;
	let state = manager.state();
	let session = state.session();

	let (restore, reason) = match outcome {
		InitOutcome::NoToken => ("no_token", None),
		InitOutcome::Restored => ("restored", None),
		InitOutcome::Rejected { reason } => ("rejected", Some(reason)),
		InitOutcome::Abandoned => ("abandoned", None),
	};

	Ok(StatusData {
		state: state.name().to_string(),
		restore: restore.to_string(),
		reason,
		api_url: ctx.config.api_url.clone(),
		user: session.map(|s| UserData::from(&s.user)),
		active_profile: state.active_profile().cloned(),
		available_profiles: session.map(|s| ProfileEntry::list(s)).unwrap_or_default(),
		requires_profile_selection: session.is_some_and(|s| s.requires_profile_selection),
	})
}

/// Restores the stored session, failing if there is none.
pub(super) async fn require_session(manager: &SessionManager) -> Result<Arc<Session>> {
	match manager.initialize().await {
		InitOutcome::Rejected { reason } => {
			info!(target = "sigescon.cli", %reason, "stored session rejected");
		}
		outcome => {
			debug!(target = "sigescon.cli", ?outcome, "session initialized");
		}
	}
	manager.session().ok_or_else(|| sigescon::Error::NotAuthenticated.into())
}
