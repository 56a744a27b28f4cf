use std::path::PathBuf;

use serde::Serialize;
use sigescon::{ActiveProfile, Capability, Permissions, Session, User};

use crate::config::ValueSource;

/// A profile as listed to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEntry {
	pub id: i64,
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	pub active: bool,
}

impl ProfileEntry {
	pub fn list(session: &Session) -> Vec<Self> {
		session
			.available_profiles()
			.iter()
			.map(|p| Self {
				id: p.id,
				name: p.name.clone(),
				description: p.description.clone(),
				active: session.is_active(p.id),
			})
			.collect()
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
	pub id: i64,
	pub name: String,
	#[serde(skip_serializing_if = "String::is_empty")]
	pub email: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub registration: Option<String>,
}

impl From<&User> for UserData {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			name: user.name.clone(),
			email: user.email.clone(),
			registration: user.registration.clone(),
		}
	}
}

/// Result data for login command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
	pub user: UserData,
	pub active_profile: Option<ActiveProfile>,
	pub available_profiles: Vec<ProfileEntry>,
	pub requires_profile_selection: bool,
	pub token_file: PathBuf,
}

/// Result data for logout command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutData {
	pub had_session: bool,
	pub server_notified: bool,
}

/// Result data for status command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
	pub state: String,
	/// How startup restore ended: `no_token`, `restored` or `rejected`.
	pub restore: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
	pub api_url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<UserData>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub active_profile: Option<ActiveProfile>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub available_profiles: Vec<ProfileEntry>,
	pub requires_profile_selection: bool,
}

/// Result data for profiles command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesData {
	pub active_profile: Option<ActiveProfile>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub can_switch: Option<bool>,
	pub profiles: Vec<ProfileEntry>,
}

/// Result data for switch command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchData {
	pub previous_profile: Option<ActiveProfile>,
	pub active_profile: Option<ActiveProfile>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub switched_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityEntry {
	pub capability: &'static str,
	pub allowed: bool,
}

/// Result data for can command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanData {
	pub active_profile: Option<String>,
	pub capabilities: Vec<CapabilityEntry>,
}

impl CanData {
	pub fn new(permissions: &Permissions, only: Option<Capability>) -> Self {
		let capabilities = match only {
			Some(capability) => vec![CapabilityEntry {
				capability: capability.as_str(),
				allowed: permissions.can(capability),
			}],
			None => permissions
				.matrix()
				.into_iter()
				.map(|(capability, allowed)| CapabilityEntry {
					capability: capability.as_str(),
					allowed,
				})
				.collect(),
		};
		Self {
			active_profile: permissions.active_profile().map(str::to_string),
			capabilities,
		}
	}
}

/// Result data for download command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadData {
	pub path: PathBuf,
	pub size_bytes: u64,
}

/// Result data for config commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigData {
	pub api_url: String,
	pub api_url_source: ValueSource,
	pub token_file: PathBuf,
	pub config_file: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResetData {
	pub removed: bool,
	pub config_file: PathBuf,
}
