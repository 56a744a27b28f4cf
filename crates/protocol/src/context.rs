//! Session context and profile reference data.

use serde::{Deserialize, Serialize};

/// Server-side profile identifier.
pub type ProfileId = i64;

/// A role a user may hold (`Administrador`, `Gestor`, `Fiscal`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub id: ProfileId,
	#[serde(rename = "nome")]
	pub name: String,
	#[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(rename = "pode_ser_selecionado", default, skip_serializing_if = "Option::is_none")]
	pub selectable: Option<bool>,
}

impl Profile {
	pub fn new(id: ProfileId, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			description: None,
			selectable: None,
		}
	}
}

/// Server-issued snapshot of the authenticated session.
///
/// Returned embedded in the login response, by the context endpoint, and as
/// the full body of a profile switch response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
	#[serde(rename = "usuario_id")]
	pub user_id: i64,
	#[serde(rename = "perfil_ativo_id", default)]
	pub active_profile_id: Option<ProfileId>,
	#[serde(rename = "perfil_ativo_nome", default)]
	pub active_profile_name: Option<String>,
	#[serde(rename = "perfis_disponiveis", default)]
	pub available_profiles: Vec<Profile>,
	#[serde(rename = "pode_alternar", default)]
	pub can_switch: Option<bool>,
	#[serde(rename = "sessao_id", default)]
	pub session_id: Option<String>,
	#[serde(rename = "data_ultima_alternancia", default, skip_serializing_if = "Option::is_none")]
	pub last_switch_at: Option<String>,
}

/// Request body for `POST /auth/alternar-perfil`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchProfileRequest {
	#[serde(rename = "novo_perfil_id")]
	pub profile_id: ProfileId,
	#[serde(rename = "justificativa", default, skip_serializing_if = "Option::is_none")]
	pub justification: Option<String>,
}
