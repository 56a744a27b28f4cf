use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "sigescon")]
#[command(about = "SIGESCON client - sessions, profiles and permissions from the command line")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Toon)]
	pub format: OutputFormat,

	/// Backend base URL (overrides SIGESCON_API_URL and the saved config)
	#[arg(long, global = true, value_name = "URL")]
	pub api_url: Option<String>,

	/// Token file (defaults to the per-user config directory)
	#[arg(long, global = true, value_name = "PATH")]
	pub token_file: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Authenticate and store the session token
	Login {
		/// E-mail or registration number
		identifier: String,
		/// Password (falls back to SIGESCON_PASSWORD, then one line of stdin)
		#[arg(long, env = "SIGESCON_PASSWORD", hide_env_values = true)]
		password: Option<String>,
	},

	/// End the session and clear the stored token
	Logout,

	/// Restore the stored session and report its state
	Status,

	/// List the profiles available to the current user
	#[command(alias = "perfis")]
	Profiles,

	/// Switch the active profile
	Switch {
		/// Profile id or name
		profile: String,
		/// Reason recorded by the server
		#[arg(long, short)]
		justification: Option<String>,
	},

	/// Show what the active profile is allowed to do
	Can {
		/// Single capability to check (e.g. create_contract)
		capability: Option<String>,
	},

	/// Authenticated GET returning the JSON body
	Get {
		/// Path relative to the API base URL
		path: String,
		/// Query parameters as key=value
		#[arg(long = "query", short, value_name = "KEY=VALUE")]
		query: Vec<String>,
	},

	/// Authenticated binary download
	#[command(alias = "dl")]
	Download {
		/// Path relative to the API base URL
		path: String,
		/// Destination file
		#[arg(short, long)]
		output: PathBuf,
	},

	/// Inspect or change the saved client configuration
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
	/// Show the effective configuration and where each value came from
	Show,
	/// Save the backend base URL
	SetUrl { url: String },
	/// Delete the saved configuration
	Reset,
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Login { .. } => "login",
			Commands::Logout => "logout",
			Commands::Status => "status",
			Commands::Profiles => "profiles",
			Commands::Switch { .. } => "switch",
			Commands::Can { .. } => "can",
			Commands::Get { .. } => "get",
			Commands::Download { .. } => "download",
			Commands::Config { action } => match action {
				ConfigAction::Show => "config.show",
				ConfigAction::SetUrl { .. } => "config.set-url",
				ConfigAction::Reset => "config.reset",
			},
		}
	}
}
