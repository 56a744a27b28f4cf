use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Bumped whenever the envelope shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 1;

/// Envelope printed for every command, successful or not.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<CommandInputs>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	pub duration_ms: u64,
}

/// Arguments echoed back in the envelope. Passwords never appear here.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub identifier: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profile: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub capability: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output_path: Option<PathBuf>,
}

impl CommandInputs {
	pub fn is_empty(&self) -> bool {
		[&self.identifier, &self.profile, &self.capability, &self.path, &self.url]
			.iter()
			.all(|field| field.is_none())
			&& self.output_path.is_none()
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
	/// HTTP status of a failed backend call.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
}

/// Stable, machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	NetworkError,
	HttpError,
	AuthError,
	NotAuthenticated,
	InvalidResponse,
	ValidationError,
	InvalidInput,
	StorageError,
	ConfigError,
	IoError,
	InternalError,
}

impl ErrorCode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NetworkError => "NETWORK_ERROR",
			Self::HttpError => "HTTP_ERROR",
			Self::AuthError => "AUTH_ERROR",
			Self::NotAuthenticated => "NOT_AUTHENTICATED",
			Self::InvalidResponse => "INVALID_RESPONSE",
			Self::ValidationError => "VALIDATION_ERROR",
			Self::InvalidInput => "INVALID_INPUT",
			Self::StorageError => "STORAGE_ERROR",
			Self::ConfigError => "CONFIG_ERROR",
			Self::IoError => "IO_ERROR",
			Self::InternalError => "INTERNAL_ERROR",
		}
	}
}

impl fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
