use tracing::info;

use crate::config::{ValueSource, validate_api_url};
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{ConfigData, ConfigResetData};

pub fn show(ctx: &CommandContext) -> ConfigData {
	ConfigData {
		api_url: ctx.config.api_url.clone(),
		api_url_source: ctx.config.api_url_source,
		token_file: ctx.config.token_file.clone(),
		config_file: ctx.config.config_file.clone(),
	}
}

pub fn set_url(ctx: &mut CommandContext, url: &str) -> Result<ConfigData> {
	let url = validate_api_url(url)?;
	ctx.store.file.api_url = Some(url.clone());
	ctx.store.save()?;
	info!(target = "sigescon.cli", %url, "api url saved");

	if matches!(ctx.config.api_url_source, ValueSource::ConfigFile | ValueSource::Default) {
		ctx.config.api_url = url;
		ctx.config.api_url_source = ValueSource::ConfigFile;
	}
	Ok(show(ctx))
}

pub fn reset(ctx: &mut CommandContext) -> Result<ConfigResetData> {
	let removed = ctx.store.remove()?;
	Ok(ConfigResetData {
		removed,
		config_file: ctx.store.path().to_path_buf(),
	})
}
