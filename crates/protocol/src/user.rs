//! Current-user projection.

use serde::{Deserialize, Serialize};

/// Identity fields returned by `GET /usuarios/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: i64,
	#[serde(rename = "nome")]
	pub name: String,
	pub email: String,
	#[serde(rename = "matricula", default, skip_serializing_if = "Option::is_none")]
	pub registration: Option<String>,
	#[serde(rename = "perfis", default)]
	pub profiles: Vec<String>,
}
