//! Capabilities derived from the active profile.
//!
//! Pure functions of the active profile name: no state, no I/O. A fresh
//! [`Permissions`] is built from every session state, so it always reflects
//! the current active profile.

use serde::{Deserialize, Serialize};

/// The three SIGESCON profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileKind {
	#[serde(rename = "Administrador")]
	Administrator,
	#[serde(rename = "Gestor")]
	Manager,
	#[serde(rename = "Fiscal")]
	Inspector,
}

impl ProfileKind {
	pub const ALL: [ProfileKind; 3] = [ProfileKind::Administrator, ProfileKind::Manager, ProfileKind::Inspector];

	/// Name as the backend spells it.
	pub fn as_str(self) -> &'static str {
		match self {
			ProfileKind::Administrator => "Administrador",
			ProfileKind::Manager => "Gestor",
			ProfileKind::Inspector => "Fiscal",
		}
	}

	/// Parses a profile name; accepts the English names too.
	pub fn parse(name: &str) -> Option<Self> {
		match name.trim().to_lowercase().as_str() {
			"administrador" | "administrator" | "admin" => Some(ProfileKind::Administrator),
			"gestor" | "manager" => Some(ProfileKind::Manager),
			"fiscal" | "inspector" => Some(ProfileKind::Inspector),
			_ => None,
		}
	}
}

impl std::fmt::Display for ProfileKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Named capabilities gated by profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
	ViewDashboard,
	ViewAllContracts,
	CreateContract,
	EditContract,
	DeleteContract,
	ManageContractors,
	ManageModalities,
	ManageUsers,
	SubmitReport,
	ReviewReport,
	ManagePendencies,
}

impl Capability {
	pub const ALL: [Capability; 11] = [
		Capability::ViewDashboard,
		Capability::ViewAllContracts,
		Capability::CreateContract,
		Capability::EditContract,
		Capability::DeleteContract,
		Capability::ManageContractors,
		Capability::ManageModalities,
		Capability::ManageUsers,
		Capability::SubmitReport,
		Capability::ReviewReport,
		Capability::ManagePendencies,
	];

	/// Profiles granted this capability.
	pub fn granted_to(self) -> &'static [ProfileKind] {
		use ProfileKind::*;

		match self {
			Capability::ViewDashboard => &[Administrator, Manager, Inspector],
			Capability::ViewAllContracts
			| Capability::CreateContract
			| Capability::EditContract
			| Capability::ManageContractors
			| Capability::ReviewReport
			| Capability::ManagePendencies => &[Administrator, Manager],
			Capability::DeleteContract | Capability::ManageModalities | Capability::ManageUsers => &[Administrator],
			Capability::SubmitReport => &[Inspector],
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Capability::ViewDashboard => "view_dashboard",
			Capability::ViewAllContracts => "view_all_contracts",
			Capability::CreateContract => "create_contract",
			Capability::EditContract => "edit_contract",
			Capability::DeleteContract => "delete_contract",
			Capability::ManageContractors => "manage_contractors",
			Capability::ManageModalities => "manage_modalities",
			Capability::ManageUsers => "manage_users",
			Capability::SubmitReport => "submit_report",
			Capability::ReviewReport => "review_report",
			Capability::ManagePendencies => "manage_pendencies",
		}
	}
}

impl std::str::FromStr for Capability {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let wanted = s.trim().to_lowercase().replace('-', "_");
		Capability::ALL
			.into_iter()
			.find(|c| c.as_str() == wanted)
			.ok_or_else(|| format!("unknown capability: {s}"))
	}
}

impl std::fmt::Display for Capability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Capability view over one active profile name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
	active: Option<String>,
}

impl Permissions {
	pub fn for_profile(active_profile_name: Option<&str>) -> Self {
		Self {
			active: active_profile_name.map(str::to_string),
		}
	}

	/// No active profile: every check fails.
	pub fn none() -> Self {
		Self::default()
	}

	pub fn active_profile(&self) -> Option<&str> {
		self.active.as_deref()
	}

	pub fn active_kind(&self) -> Option<ProfileKind> {
		self.active.as_deref().and_then(ProfileKind::parse)
	}

	/// True when the active profile is `name` (case-insensitive, aliases allowed).
	pub fn has_profile(&self, name: &str) -> bool {
		let Some(active) = self.active.as_deref() else {
			return false;
		};
		match (ProfileKind::parse(active), ProfileKind::parse(name)) {
			(Some(a), Some(b)) => a == b,
			_ => active.trim().eq_ignore_ascii_case(name.trim()),
		}
	}

	pub fn has_any_profile<S: AsRef<str>>(&self, names: &[S]) -> bool {
		names.iter().any(|n| self.has_profile(n.as_ref()))
	}

	pub fn can(&self, capability: Capability) -> bool {
		self.active_kind().is_some_and(|kind| capability.granted_to().contains(&kind))
	}

	/// Every capability with its grant for the active profile.
	pub fn matrix(&self) -> Vec<(Capability, bool)> {
		Capability::ALL.into_iter().map(|c| (c, self.can(c))).collect()
	}

	pub fn is_administrator(&self) -> bool {
		self.active_kind() == Some(ProfileKind::Administrator)
	}

	pub fn is_manager(&self) -> bool {
		self.active_kind() == Some(ProfileKind::Manager)
	}

	pub fn is_inspector(&self) -> bool {
		self.active_kind() == Some(ProfileKind::Inspector)
	}

	pub fn can_create_contract(&self) -> bool {
		self.can(Capability::CreateContract)
	}

	pub fn can_edit_contract(&self) -> bool {
		self.can(Capability::EditContract)
	}

	pub fn can_delete_contract(&self) -> bool {
		self.can(Capability::DeleteContract)
	}

	pub fn can_manage_users(&self) -> bool {
		self.can(Capability::ManageUsers)
	}

	pub fn can_submit_report(&self) -> bool {
		self.can(Capability::SubmitReport)
	}
}
