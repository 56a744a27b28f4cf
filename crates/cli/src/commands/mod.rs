//! Command implementations.
//!
//! Each command returns its payload; [`dispatch`] wraps it in the result
//! envelope, prints it in the selected format and reports success.

mod api;
mod auth;
mod config;
mod profiles;

use std::future::Future;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error};

use crate::cli::{Cli, Commands, ConfigAction};
use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{CommandInputs, CommandResult, OutputFormat};

/// Runs the parsed command. Returns false when the command failed.
pub async fn dispatch(cli: Cli, mut ctx: CommandContext) -> bool {
	let command = cli.command.name();
	let format = cli.format;

	match cli.command {
		Commands::Login { identifier, password } => {
			let inputs = CommandInputs {
				identifier: Some(identifier.clone()),
				..Default::default()
			};
			emit(command, inputs, format, auth::login(&ctx, &identifier, password)).await
		}
		Commands::Logout => emit(command, CommandInputs::default(), format, auth::logout(&ctx)).await,
		Commands::Status => emit(command, CommandInputs::default(), format, auth::status(&ctx)).await,
		Commands::Profiles => emit(command, CommandInputs::default(), format, profiles::list(&ctx)).await,
		Commands::Switch { profile, justification } => {
			let inputs = CommandInputs {
				profile: Some(profile.clone()),
				..Default::default()
			};
			emit(command, inputs, format, profiles::switch(&ctx, &profile, justification.as_deref())).await
		}
		Commands::Can { capability } => {
			let inputs = CommandInputs {
				capability: capability.clone(),
				..Default::default()
			};
			emit(command, inputs, format, profiles::can(&ctx, capability.as_deref())).await
		}
		Commands::Get { path, query } => {
			let inputs = CommandInputs {
				path: Some(path.clone()),
				..Default::default()
			};
			emit(command, inputs, format, api::get(&ctx, &path, &query)).await
		}
		Commands::Download { path, output } => {
			let inputs = CommandInputs {
				path: Some(path.clone()),
				output_path: Some(output.clone()),
				..Default::default()
			};
			emit(command, inputs, format, api::download(&ctx, &path, &output)).await
		}
		Commands::Config { action } => match action {
			ConfigAction::Show => emit(command, CommandInputs::default(), format, async { Ok(config::show(&ctx)) }).await,
			ConfigAction::SetUrl { url } => {
				let inputs = CommandInputs {
					url: Some(url.clone()),
					..Default::default()
				};
				emit(command, inputs, format, async { config::set_url(&mut ctx, &url) }).await
			}
			ConfigAction::Reset => emit(command, CommandInputs::default(), format, async { config::reset(&mut ctx) }).await,
		},
	}
}

async fn emit<T, F>(command: &str, inputs: CommandInputs, format: OutputFormat, run: F) -> bool
where
	T: Serialize,
	F: Future<Output = Result<T>>,
{
	let started = Instant::now();
	let outcome = run.await;
	if let Err(err) = &outcome {
		debug!(target = "sigescon.cli", command, error = %err, "command failed");
	}

	let result = CommandResult::from_outcome(command, inputs, outcome, started);
	match result.render(format) {
		Ok(rendered) => println!("{rendered}"),
		Err(err) => error!(target = "sigescon.cli", command, error = %err, "failed to render command output"),
	}
	result.ok
}
