use anyhow::Context;
use clap::Parser;
use sigescon_cli::cli::Cli;
use sigescon_cli::context::CommandContext;
use sigescon_cli::{commands, logging};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let runtime = tokio::runtime::Builder::new_multi_thread()
		.enable_all()
		.build()
		.context("failed to start async runtime")?;

	let ctx = CommandContext::from_cli(&cli).context("failed to resolve client configuration")?;
	let ok = runtime.block_on(commands::dispatch(cli, ctx));
	if !ok {
		std::process::exit(1);
	}
	Ok(())
}
