//! Persistent storage for the session token and its scheme.
//!
//! The token is persisted under exactly two fixed keys, `authToken` and
//! `authTokenType`, with no expiry metadata. [`FileTokenStore`] keeps them in
//! a small JSON file under the user config directory; [`MemoryTokenStore`]
//! keeps them in-process.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Scheme used when the server omits `token_type`.
pub const DEFAULT_SCHEME: &str = "bearer";

/// An access token together with its authorization scheme.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
	#[serde(rename = "authToken")]
	pub token: String,
	#[serde(rename = "authTokenType", default = "default_scheme")]
	pub scheme: String,
}

fn default_scheme() -> String {
	DEFAULT_SCHEME.to_string()
}

impl StoredToken {
	pub fn new(token: impl Into<String>, scheme: impl Into<String>) -> Self {
		let scheme = scheme.into();
		Self {
			token: token.into(),
			scheme: if scheme.trim().is_empty() { default_scheme() } else { scheme },
		}
	}

	/// Value for the `Authorization` header, e.g. `Bearer eyJ...`.
	pub fn authorization(&self) -> String {
		let mut chars = self.scheme.trim().chars();
		let scheme = match chars.next() {
			Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect::<String>(),
			None => "Bearer".to_string(),
		};
		format!("{scheme} {}", self.token)
	}
}

impl std::fmt::Debug for StoredToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StoredToken")
			.field("token", &"<redacted>")
			.field("scheme", &self.scheme)
			.finish()
	}
}

/// Storage for the session token.
///
/// The session manager is the only writer; the API client reads on every
/// request. Implementations must be safe to share across tasks.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
	fn save(&self, token: &StoredToken) -> Result<()>;
	fn read(&self) -> Result<Option<StoredToken>>;
	fn clear(&self) -> Result<()>;
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
	slot: Mutex<Option<StoredToken>>,
}

impl MemoryTokenStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store that already holds `token`.
	pub fn with_token(token: StoredToken) -> Self {
		Self {
			slot: Mutex::new(Some(token)),
		}
	}
}

impl TokenStore for MemoryTokenStore {
	fn save(&self, token: &StoredToken) -> Result<()> {
		*self.slot.lock() = Some(token.clone());
		Ok(())
	}

	fn read(&self) -> Result<Option<StoredToken>> {
		Ok(self.slot.lock().clone())
	}

	fn clear(&self) -> Result<()> {
		self.slot.lock().take();
		Ok(())
	}
}

/// Token store backed by a JSON file.
///
/// Reads always go to disk so separate processes sharing the file see each
/// other's login and logout.
#[derive(Debug)]
pub struct FileTokenStore {
	path: PathBuf,
	lock: Mutex<()>,
}

impl FileTokenStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			lock: Mutex::new(()),
		}
	}

	/// Store at the default location (`<config dir>/sigescon/auth.json`).
	pub fn at_default_location() -> Result<Self> {
		Ok(Self::new(config_dir()?.join("auth.json")))
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl TokenStore for FileTokenStore {
	fn save(&self, token: &StoredToken) -> Result<()> {
		let _guard = self.lock.lock();
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(token).map_err(|e| Error::Storage(e.to_string()))?;
		write_private(&self.path, json.as_bytes())?;
		debug!(target = "sigescon.tokens", path = %self.path.display(), "token saved");
		Ok(())
	}

	fn read(&self) -> Result<Option<StoredToken>> {
		let _guard = self.lock.lock();
		let content = match fs::read_to_string(&self.path) {
			Ok(content) => content,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};
		if content.trim().is_empty() {
			return Ok(None);
		}
		let token: StoredToken = serde_json::from_str(&content)
			.map_err(|e| Error::Storage(format!("unreadable token file {}: {e}", self.path.display())))?;
		if token.token.is_empty() {
			return Ok(None);
		}
		Ok(Some(token))
	}

	fn clear(&self) -> Result<()> {
		let _guard = self.lock.lock();
		match fs::remove_file(&self.path) {
			Ok(()) => {
				debug!(target = "sigescon.tokens", path = %self.path.display(), "token cleared");
				Ok(())
			}
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(err) => Err(err.into()),
		}
	}
}

/// Per-user config directory for SIGESCON files.
///
/// Follows the platform convention (`$XDG_CONFIG_HOME` or `~/.config` on
/// Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on Windows).
pub fn config_dir() -> Result<PathBuf> {
	app_dir(dirs::config_dir())
}

fn app_dir(base: Option<PathBuf>) -> Result<PathBuf> {
	base.map(|dir| dir.join("sigescon"))
		.ok_or_else(|| Error::Config("no per-user config directory; set HOME or XDG_CONFIG_HOME".into()))
}

/// Writes `contents` to a file readable only by its owner.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
	use std::io::Write;
	use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

	let mut file = fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)?;
	// `mode` only applies when the file is created.
	file.set_permissions(fs::Permissions::from_mode(0o600))?;
	file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
	fs::write(path, contents)
}
