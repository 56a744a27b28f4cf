//! Raw authenticated access to the backend.

use std::path::Path;

use serde_json::Value;
use sigescon::RequestOptions;
use tracing::info;

use crate::context::CommandContext;
use crate::error::{CliError, Result};
use crate::output::DownloadData;

pub async fn get(ctx: &CommandContext, path: &str, query: &[String]) -> Result<Value> {
	let mut options = RequestOptions::get();
	for pair in query {
		let (key, value) = parse_query_pair(pair)?;
		options = options.query(key, value);
	}
	Ok(ctx.api()?.request(path, options).await?)
}

pub async fn download(ctx: &CommandContext, path: &str, output: &Path) -> Result<DownloadData> {
	let bytes = ctx.api()?.fetch_binary(path).await?;

	if let Some(parent) = output.parent() {
		if !parent.as_os_str().is_empty() {
			tokio::fs::create_dir_all(parent).await?;
		}
	}
	tokio::fs::write(output, &bytes).await?;
	info!(target = "sigescon.cli", path = %output.display(), bytes = bytes.len(), "download saved");

	Ok(DownloadData {
		path: output.to_path_buf(),
		size_bytes: bytes.len() as u64,
	})
}

fn parse_query_pair(pair: &str) -> Result<(&str, &str)> {
	match pair.split_once('=') {
		Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
		_ => Err(CliError::InvalidInput(format!("query parameter must be KEY=VALUE, got '{pair}'"))),
	}
}
