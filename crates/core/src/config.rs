//! Client configuration: base URL, endpoint paths and HTTP options.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Paths of the endpoints the session manager depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
	pub login: String,
	pub session_context: String,
	pub current_user: String,
	pub switch_profile: String,
	pub logout: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			login: "/auth/login".to_string(),
			session_context: "/auth/contexto".to_string(),
			current_user: "/usuarios/me".to_string(),
			switch_profile: "/auth/alternar-perfil".to_string(),
			logout: "/auth/logout".to_string(),
		}
	}
}

/// Settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub base_url: Url,
	pub endpoints: Endpoints,
	pub user_agent: String,
	/// Per-request timeout. `None` leaves requests unbounded.
	pub timeout: Option<Duration>,
}

impl ClientConfig {
	/// Creates a config for `base_url` with default endpoints.
	pub fn new(base_url: &str) -> Result<Self> {
		Ok(Self {
			base_url: parse_base_url(base_url)?,
			endpoints: Endpoints::default(),
			user_agent: concat!("sigescon/", env!("CARGO_PKG_VERSION")).to_string(),
			timeout: None,
		})
	}

	pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.timeout = timeout;
		self
	}

	/// Resolves an endpoint against the base URL.
	///
	/// Absolute URLs pass through unchanged (the API client only sends the
	/// stored token when they share the base URL's origin); paths are
	/// appended to the base path so a base of `https://host/api` maps
	/// `/auth/login` to `https://host/api/auth/login`.
	pub fn url_for(&self, endpoint: &str) -> Result<Url> {
		if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
			return Ok(Url::parse(endpoint)?);
		}
		Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
	}
}

/// Parses a base URL, forcing a trailing slash so joins keep the base path.
fn parse_base_url(raw: &str) -> Result<Url> {
	let trimmed = raw.trim();
	if trimmed.is_empty() {
		return Err(Error::Config("base URL is empty".into()));
	}
	let mut url = Url::parse(trimmed)?;
	if !matches!(url.scheme(), "http" | "https") {
		return Err(Error::Config(format!("unsupported URL scheme: {}", url.scheme())));
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());
		url.set_path(&path);
	}
	Ok(url)
}
