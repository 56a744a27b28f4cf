//! Building and rendering the per-command result envelope.

use std::fmt::Write as _;
use std::time::Instant;

use serde::Serialize;

use crate::error::{CliError, Result};
use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandInputs, CommandResult, SCHEMA_VERSION};

impl From<&CliError> for CommandError {
	fn from(err: &CliError) -> Self {
		Self {
			code: err.code(),
			message: err.to_string(),
			status: err.status(),
		}
	}
}

impl<T: Serialize> CommandResult<T> {
	/// Wraps what a command returned, timing it from `started`.
	pub fn from_outcome(command: &str, inputs: CommandInputs, outcome: Result<T>, started: Instant) -> Self {
		let (data, error) = match outcome {
			Ok(data) => (Some(data), None),
			Err(err) => (None, Some(CommandError::from(&err))),
		};
		Self {
			schema_version: SCHEMA_VERSION,
			ok: error.is_none(),
			command: command.to_string(),
			inputs: (!inputs.is_empty()).then_some(inputs),
			data,
			error,
			duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
		}
	}

	/// Renders the envelope as it is printed to stdout.
	pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
		match format {
			OutputFormat::Toon => Ok(toon::encode(&serde_json::to_value(self)?, None)),
			OutputFormat::Json => serde_json::to_string_pretty(self),
			OutputFormat::Ndjson => serde_json::to_string(self),
			OutputFormat::Text => self.render_text(),
		}
	}

	/// Payload as pretty JSON on success, a one-line diagnosis otherwise.
	fn render_text(&self) -> serde_json::Result<String> {
		let mut out = match (&self.data, &self.error) {
			(_, Some(error)) => {
				let mut line = format!("{} failed [{}]: {}", self.command, error.code, error.message);
				if let Some(status) = error.status {
					let _ = write!(line, " (HTTP {status})");
				}
				line
			}
			(Some(data), None) => serde_json::to_string_pretty(data)?,
			(None, None) => String::new(),
		};
		let _ = write!(out, "\n({} ms)", self.duration_ms);
		Ok(out)
	}
}
