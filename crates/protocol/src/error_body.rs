//! Error payloads returned on non-2xx responses.

use serde::{Deserialize, Serialize};

/// Error body as sent by the backend.
///
/// Either form may appear:
/// ```json
/// { "detail": "Credenciais inválidas" }
/// { "detail": [{ "loc": ["body", "username"], "msg": "field required" }] }
/// { "message": "Perfil não encontrado" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub detail: Option<ErrorDetail>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
}

/// `detail` is a plain message or a list of field validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
	Message(String),
	Fields(Vec<FieldError>),
	Other(serde_json::Value),
}

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
	pub msg: String,
	#[serde(default)]
	pub loc: Vec<serde_json::Value>,
}

impl ErrorBody {
	/// Human-readable message carried by the body, if any.
	pub fn message(&self) -> Option<String> {
		let detail = match &self.detail {
			Some(ErrorDetail::Message(msg)) if !msg.trim().is_empty() => Some(msg.clone()),
			Some(ErrorDetail::Fields(fields)) if !fields.is_empty() => Some(
				fields
					.iter()
					.map(|f| f.msg.as_str())
					.collect::<Vec<_>>()
					.join("; "),
			),
			_ => None,
		};
		detail.or_else(|| self.message.clone().filter(|m| !m.trim().is_empty()))
	}
}
