//! Session orchestration: login, startup restore, profile switching, logout.

use std::sync::Arc;

use sigescon_protocol::{LoginForm, LoginResponse, Profile, ProfileId, SessionContext, SwitchProfileRequest, User};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::lifeline::Lifeline;
use super::state::{Session, SessionState};
use super::validate::{apply_switch, normalize_context, placeholder_user};
use crate::api::{ApiClient, Auth, RequestOptions};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::permissions::Permissions;
use crate::tokens::{StoredToken, TokenStore};

/// How a call to [`SessionManager::initialize`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
	/// No stored token; nothing was sent.
	NoToken,
	/// The stored token was accepted and the session restored.
	Restored,
	/// The token was rejected or the context was unusable; it has been cleared.
	Rejected { reason: String },
	/// The caller was disposed before completion; results were discarded.
	Abandoned,
}

/// Result of [`SessionManager::logout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutReport {
	/// A token or an authenticated session existed before logout.
	pub had_session: bool,
	/// The server acknowledged the logout call.
	pub server_notified: bool,
}

/// Owns the session state and is the single writer of the token store.
///
/// State lives in a `watch` channel: every transition is one replacement,
/// and observers get the latest state through [`subscribe`](Self::subscribe).
/// Operations are expected to be serialized by the caller.
#[derive(Debug)]
pub struct SessionManager {
	api: ApiClient,
	tokens: Arc<dyn TokenStore>,
	state: watch::Sender<SessionState>,
}

impl SessionManager {
	pub fn new(api: ApiClient) -> Self {
		let tokens = Arc::clone(api.tokens());
		let (state, _) = watch::channel(SessionState::Unauthenticated);
		Self { api, tokens, state }
	}

	/// Builds the API client and manager in one step.
	pub fn connect(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
		Ok(Self::new(ApiClient::new(config, tokens)?))
	}

	pub fn api(&self) -> &ApiClient {
		&self.api
	}

	/// Snapshot of the current state.
	pub fn state(&self) -> SessionState {
		self.state.borrow().clone()
	}

	/// Receiver notified on every state transition.
	pub fn subscribe(&self) -> watch::Receiver<SessionState> {
		self.state.subscribe()
	}

	pub fn session(&self) -> Option<Arc<Session>> {
		self.state.borrow().session().cloned()
	}

	/// Capabilities of the current active profile.
	pub fn permissions(&self) -> Permissions {
		self.state.borrow().permissions()
	}

	/// Available profile with this name, if authenticated.
	pub fn profile_by_name(&self, name: &str) -> Option<Profile> {
		self.session().and_then(|s| s.profile_by_name(name).cloned())
	}

	/// Restores the session from a stored token.
	pub async fn initialize(&self) -> InitOutcome {
		self.initialize_while(&Lifeline::new()).await
	}

	/// Restores the session, applying results only while `lifeline` is alive.
	///
	/// Without a stored token this returns immediately without any request.
	/// A rejected token is cleared and the state returns to unauthenticated;
	/// no error is surfaced. A failing user-info fetch degrades to placeholder
	/// user data.
	pub async fn initialize_while(&self, lifeline: &Lifeline) -> InitOutcome {
		let token = match self.tokens.read() {
			Ok(Some(token)) => token,
			Ok(None) => {
				debug!(target = "sigescon.session", "no stored token; staying unauthenticated");
				return InitOutcome::NoToken;
			}
			Err(err) => {
				if !lifeline.is_alive() {
					return InitOutcome::Abandoned;
				}
				warn!(target = "sigescon.session", error = %err, "stored token unreadable; clearing");
				self.reset_local();
				return InitOutcome::Rejected { reason: err.to_string() };
			}
		};

		if !lifeline.is_alive() {
			return InitOutcome::Abandoned;
		}
		let marked = self.state.send_if_modified(|state| {
			if matches!(state, SessionState::Unauthenticated) {
				*state = SessionState::Initializing;
				true
			} else {
				false
			}
		});

		let restored = self.restore(&token).await;

		if !lifeline.is_alive() {
			if marked {
				self.state.send_if_modified(|state| {
					if matches!(state, SessionState::Initializing) {
						*state = SessionState::Unauthenticated;
						true
					} else {
						false
					}
				});
			}
			debug!(target = "sigescon.session", "caller disposed during initialize; discarding result");
			return InitOutcome::Abandoned;
		}

		match restored {
			Ok(session) => {
				info!(
					target = "sigescon.session",
					user_id = session.context.user_id,
					active_profile = ?session.active_profile.as_ref().map(|a| &a.name),
					"session restored"
				);
				self.state.send_replace(SessionState::Authenticated(session));
				InitOutcome::Restored
			}
			Err(err) => {
				info!(target = "sigescon.session", error = %err, "stored session rejected; clearing token");
				self.reset_local();
				InitOutcome::Rejected { reason: err.to_string() }
			}
		}
	}

	async fn restore(&self, token: &StoredToken) -> Result<Arc<Session>> {
		let endpoints = &self.api.config().endpoints;
		let context: SessionContext = self
			.api
			.request_json(&endpoints.session_context, RequestOptions::get().auth(Auth::Explicit(token.clone())))
			.await?;
		let (context, active) = normalize_context(context)?;
		let user = self.fetch_user(&context, Some(token), None).await;

		Ok(Arc::new(Session {
			requires_profile_selection: active.is_none(),
			context,
			user,
			active_profile: active,
		}))
	}

	/// Authenticates with the backend and stores the issued token.
	///
	/// On any failure the session state and stored token are cleared and the
	/// error is returned for display.
	pub async fn login(&self, identifier: &str, secret: &str) -> Result<Arc<Session>> {
		match self.try_login(identifier, secret).await {
			Ok(session) => {
				info!(
					target = "sigescon.session",
					user_id = session.context.user_id,
					active_profile = ?session.active_profile.as_ref().map(|a| &a.name),
					requires_selection = session.requires_profile_selection,
					"login succeeded"
				);
				self.state.send_replace(SessionState::Authenticated(Arc::clone(&session)));
				Ok(session)
			}
			Err(err) => {
				warn!(target = "sigescon.session", error = %err, "login failed; clearing session");
				self.reset_local();
				Err(err)
			}
		}
	}

	async fn try_login(&self, identifier: &str, secret: &str) -> Result<Arc<Session>> {
		let endpoints = &self.api.config().endpoints;
		let form = LoginForm {
			username: identifier.to_string(),
			password: secret.to_string(),
		};
		let options = RequestOptions::post().form(&form)?.auth(Auth::Anonymous);
		let response: LoginResponse = self.api.request_json(&endpoints.login, options).await?;

		if response.access_token.trim().is_empty() {
			return Err(Error::Validation("Login response did not include an access token".into()));
		}
		let (context, active) = normalize_context(response.context)?;

		let token = StoredToken::new(response.access_token, response.token_type);
		self.tokens.save(&token)?;

		let user = self.fetch_user(&context, Some(&token), Some(identifier)).await;

		Ok(Arc::new(Session {
			requires_profile_selection: response.requires_profile_selection || active.is_none(),
			context,
			user,
			active_profile: active,
		}))
	}

	/// Fetches the current user, falling back to data derived from `context`.
	async fn fetch_user(&self, context: &SessionContext, token: Option<&StoredToken>, identifier: Option<&str>) -> User {
		let auth = token.cloned().map(Auth::Explicit).unwrap_or_default();
		let endpoint = &self.api.config().endpoints.current_user;
		match self.api.request_json::<User>(endpoint, RequestOptions::get().auth(auth)).await {
			Ok(user) => user,
			Err(err) => {
				warn!(target = "sigescon.session", error = %err, "user info unavailable; using placeholder");
				placeholder_user(context, identifier)
			}
		}
	}

	/// Ends the session.
	///
	/// Local state and the stored token are cleared first, unconditionally;
	/// the server is then notified on a best-effort basis with the old token.
	pub async fn logout(&self) -> LogoutReport {
		let token = match self.tokens.read() {
			Ok(token) => token,
			Err(err) => {
				warn!(target = "sigescon.session", error = %err, "stored token unreadable during logout");
				None
			}
		};
		let had_session = token.is_some() || self.state.borrow().is_authenticated();

		self.reset_local();
		info!(target = "sigescon.session", "local session cleared");

		let Some(token) = token else {
			return LogoutReport {
				had_session,
				server_notified: false,
			};
		};

		let endpoint = &self.api.config().endpoints.logout;
		let server_notified = match self.api.request(endpoint, RequestOptions::post().auth(Auth::Explicit(token))).await {
			Ok(_) => true,
			Err(err) => {
				warn!(target = "sigescon.session", error = %err, "server logout failed; local session already cleared");
				false
			}
		};

		LogoutReport {
			had_session,
			server_notified,
		}
	}

	/// Switches the active profile.
	///
	/// `target` must be one of the session's available profiles. The response
	/// is validated (non-empty active id and name, membership, match with
	/// `target`) before anything changes; a mismatching server-side name is
	/// replaced by the known one. On error the state is left untouched.
	pub async fn switch_profile(&self, target: ProfileId, justification: Option<&str>) -> Result<Arc<Session>> {
		let current = self.session().ok_or(Error::NotAuthenticated)?;
		if current.profile(target).is_none() {
			return Err(Error::Validation(format!("Profile {target} is not available for this user")));
		}

		let request = SwitchProfileRequest {
			profile_id: target,
			justification: justification.map(str::trim).filter(|j| !j.is_empty()).map(str::to_string),
		};
		let endpoint = &self.api.config().endpoints.switch_profile;
		debug!(target = "sigescon.session", profile_id = target, "requesting profile switch");
		let response: SessionContext = self.api.request_json(endpoint, RequestOptions::post().json(&request)?).await?;

		let next = Arc::new(apply_switch(&current, target, response)?);
		info!(
			target = "sigescon.session",
			from = ?current.active_profile.as_ref().map(|a| a.id),
			to = target,
			"active profile switched"
		);
		self.state.send_replace(SessionState::Authenticated(Arc::clone(&next)));
		Ok(next)
	}

	fn reset_local(&self) {
		if let Err(err) = self.tokens.clear() {
			warn!(target = "sigescon.session", error = %err, "failed to clear stored token");
		}
		self.state.send_replace(SessionState::Unauthenticated);
	}
}
