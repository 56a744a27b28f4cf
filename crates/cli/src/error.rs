use thiserror::Error;

use crate::output::ErrorCode;

#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Api(#[from] sigescon::Error),

	#[error("{0}")]
	InvalidInput(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::Api(err) => api_code(err),
			CliError::InvalidInput(_) => ErrorCode::InvalidInput,
			CliError::Io(_) => ErrorCode::IoError,
			CliError::Json(_) => ErrorCode::InternalError,
		}
	}

	/// HTTP status behind the failure, when a backend call produced it.
	pub fn status(&self) -> Option<u16> {
		match self {
			CliError::Api(err) => err.status(),
			_ => None,
		}
	}
}

fn api_code(err: &sigescon::Error) -> ErrorCode {
	use sigescon::Error;

	if err.is_unauthorized() {
		return ErrorCode::AuthError;
	}
	match err {
		Error::Transport(_) => ErrorCode::NetworkError,
		Error::Http { .. } => ErrorCode::HttpError,
		Error::Parse(_) => ErrorCode::InvalidResponse,
		Error::Validation(_) => ErrorCode::ValidationError,
		Error::NotAuthenticated => ErrorCode::NotAuthenticated,
		Error::Storage(_) => ErrorCode::StorageError,
		Error::Config(_) => ErrorCode::ConfigError,
		Error::Io(_) => ErrorCode::IoError,
	}
}
