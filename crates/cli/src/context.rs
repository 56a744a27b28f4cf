use std::sync::Arc;
use std::time::Duration;

use sigescon::{ApiClient, ClientConfig, FileTokenStore, SessionManager, TokenStore};

use crate::cli::Cli;
use crate::config::{API_URL_ENV, ConfigStore, ResolvedConfig};
use crate::error::Result;

/// Upper bound for a single backend request made by the CLI.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state for one CLI invocation.
#[derive(Debug)]
pub struct CommandContext {
	pub store: ConfigStore,
	pub config: ResolvedConfig,
}

impl CommandContext {
	pub fn new(store: ConfigStore, api_url_flag: Option<&str>, token_file_flag: Option<&std::path::Path>) -> Result<Self> {
		let env = std::env::var(API_URL_ENV).ok();
		let config = ResolvedConfig::resolve(&store, api_url_flag, env.as_deref(), token_file_flag)?;
		Ok(Self { store, config })
	}

	pub fn from_cli(cli: &Cli) -> Result<Self> {
		Self::new(
			ConfigStore::load(ConfigStore::default_path()?),
			cli.api_url.as_deref(),
			cli.token_file.as_deref(),
		)
	}

	pub fn client_config(&self) -> Result<ClientConfig> {
		Ok(ClientConfig::new(&self.config.api_url)?.with_timeout(Some(REQUEST_TIMEOUT)))
	}

	pub fn token_store(&self) -> Arc<dyn TokenStore> {
		Arc::new(FileTokenStore::new(&self.config.token_file))
	}

	pub fn api(&self) -> Result<ApiClient> {
		Ok(ApiClient::new(self.client_config()?, self.token_store())?)
	}

	pub fn session_manager(&self) -> Result<SessionManager> {
		Ok(SessionManager::new(self.api()?))
	}
}
