//! Persisted CLI configuration and effective-value resolution.
//!
//! The config file lives next to the token file in the per-user SIGESCON
//! directory (`<config dir>/sigescon/config.json`). Each effective value
//! is resolved from, in order: command-line flag, environment, config file,
//! built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sigescon::DEFAULT_BASE_URL;
use sigescon::tokens::config_dir;
use tracing::{debug, warn};

use crate::error::{CliError, Result};

const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const API_URL_ENV: &str = "SIGESCON_API_URL";

/// On-disk format of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
	pub schema: u32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_url: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_file: Option<PathBuf>,
}

impl Default for ConfigFile {
	fn default() -> Self {
		Self {
			schema: CONFIG_SCHEMA_VERSION,
			api_url: None,
			token_file: None,
		}
	}
}

/// A config file together with its location.
#[derive(Debug)]
pub struct ConfigStore {
	path: PathBuf,
	pub file: ConfigFile,
}

impl ConfigStore {
	pub fn default_path() -> Result<PathBuf> {
		Ok(config_dir()?.join("config.json"))
	}

	/// Loads the file at `path`; a missing or unreadable file yields defaults.
	pub fn load(path: PathBuf) -> Self {
		let file = match fs::read_to_string(&path) {
			Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
				warn!(target = "sigescon.cli", path = %path.display(), error = %err, "ignoring malformed config file");
				ConfigFile::default()
			}),
			Err(_) => ConfigFile::default(),
		};
		Self { path, file }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn save(&mut self) -> Result<()> {
		self.file.schema = CONFIG_SCHEMA_VERSION;
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(&self.file)?;
		fs::write(&self.path, json)?;
		debug!(target = "sigescon.cli", path = %self.path.display(), "config saved");
		Ok(())
	}

	/// Deletes the config file. Returns false if it did not exist.
	pub fn remove(&mut self) -> Result<bool> {
		self.file = ConfigFile::default();
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(true),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
			Err(err) => Err(err.into()),
		}
	}
}

/// Where an effective value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
	CliFlag,
	Env,
	ConfigFile,
	Default,
}

/// Effective settings for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub api_url: String,
	pub api_url_source: ValueSource,
	pub token_file: PathBuf,
	pub config_file: PathBuf,
}

impl ResolvedConfig {
	pub fn resolve(
		store: &ConfigStore,
		api_url_flag: Option<&str>,
		api_url_env: Option<&str>,
		token_file_flag: Option<&Path>,
	) -> Result<Self> {
		let non_empty = |value: Option<&str>| value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

		let (api_url, api_url_source) = if let Some(url) = non_empty(api_url_flag) {
			(url, ValueSource::CliFlag)
		} else if let Some(url) = non_empty(api_url_env) {
			(url, ValueSource::Env)
		} else if let Some(url) = non_empty(store.file.api_url.as_deref()) {
			(url, ValueSource::ConfigFile)
		} else {
			(DEFAULT_BASE_URL.to_string(), ValueSource::Default)
		};

		let token_file = match token_file_flag.map(Path::to_path_buf).or_else(|| store.file.token_file.clone()) {
			Some(path) => path,
			None => config_dir()?.join("auth.json"),
		};

		Ok(Self {
			api_url,
			api_url_source,
			token_file,
			config_file: store.path().to_path_buf(),
		})
	}
}

/// Checks a base URL the same way the client will when it is used.
pub fn validate_api_url(url: &str) -> Result<String> {
	let config = sigescon::ClientConfig::new(url).map_err(|err| CliError::InvalidInput(err.to_string()))?;
	Ok(config.base_url.to_string())
}
