//! Error types for the session client.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the token store, API client and session manager.
#[derive(Debug, Error)]
pub enum Error {
	/// No response was received (connection refused, DNS, TLS, reset).
	#[error("Network error: {0}")]
	Transport(#[from] reqwest::Error),

	/// The server answered with a status >= 400.
	#[error("{message}")]
	Http { status: u16, message: String },

	/// A body that should have been JSON could not be parsed.
	#[error("Invalid server response: {0}")]
	Parse(String),

	/// The server answered, but the answer breaks a session invariant.
	#[error("{0}")]
	Validation(String),

	#[error("Not authenticated")]
	NotAuthenticated,

	#[error("Token storage error: {0}")]
	Storage(String),

	#[error("Invalid configuration: {0}")]
	Config(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

impl Error {
	/// Builds the generic message used when the server sent no usable body.
	pub(crate) fn http_status(status: u16) -> Self {
		Error::Http {
			status,
			message: format!("HTTP error {status}"),
		}
	}

	/// HTTP status code when the error came from a server response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Error::Http { status, .. } => Some(*status),
			Error::Transport(err) => err.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Returns true if the server rejected the credentials or token.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self.status(), Some(401 | 403))
	}
}

impl From<url::ParseError> for Error {
	fn from(err: url::ParseError) -> Self {
		Error::Config(err.to_string())
	}
}
