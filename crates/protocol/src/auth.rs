//! Login exchange types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::SessionContext;

/// OAuth2 password form posted to the login endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginForm {
	pub username: String,
	pub password: String,
}

impl fmt::Debug for LoginForm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoginForm")
			.field("username", &self.username)
			.field("password", &"<redacted>")
			.finish()
	}
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
	pub access_token: String,
	#[serde(default = "default_token_type")]
	pub token_type: String,
	#[serde(rename = "contexto_sessao")]
	pub context: SessionContext,
	/// Set when the user holds several profiles and must pick one.
	#[serde(rename = "requer_selecao_perfil", default)]
	pub requires_profile_selection: bool,
}

fn default_token_type() -> String {
	"bearer".to_string()
}
