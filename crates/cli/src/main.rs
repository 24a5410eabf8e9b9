mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vlab_lib::Config;

use crate::cmd::SnapshotCommand;
use crate::output::{OutputFormat, print_error};

/// vl - Virtual Laboratory solution pipeline
#[derive(Parser)]
#[command(name = "vl")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Configuration file (default: {config_dir}/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Catalogue base URL, overriding configuration and environment
  #[arg(long, global = true)]
  scm_url: Option<String>,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List catalogue solutions runnable at a configured provider
  Solutions {
    /// Only list solutions for this problem
    #[arg(long)]
    problem: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// List catalogue problems
  Problems {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Render the provisioning recipe for a solution
  Recipe {
    /// Solution URL
    solution: String,

    /// Write the recipe to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Show the images available for a job, by provider
  Images {
    job_id: i64,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the providers a job can run at
  Providers {
    job_id: i64,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Attach a solution to a job
  Attach {
    job_id: i64,

    /// Solution URL
    solution: String,
  },

  /// Manage pre-built VM snapshots
  Snapshot {
    #[command(subcommand)]
    command: SnapshotCommand,
  },

  /// Show the resolved configuration
  Info {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  let config = load_config(&cli)?;

  match cli.command {
    Commands::Solutions { problem, output } => cmd::cmd_solutions(&config, problem.as_deref(), output),
    Commands::Problems { output } => cmd::cmd_problems(&config, output),
    Commands::Recipe { solution, out } => cmd::cmd_recipe(&config, &solution, out.as_deref()),
    Commands::Images { job_id, output } => cmd::cmd_images(&config, job_id, output),
    Commands::Providers { job_id, output } => cmd::cmd_providers(&config, job_id, output),
    Commands::Attach { job_id, solution } => cmd::cmd_attach(&config, job_id, &solution),
    Commands::Snapshot { command } => cmd::cmd_snapshot(&config, command),
    Commands::Info { output } => cmd::cmd_info(&config, output),
  }
}

fn load_config(cli: &Cli) -> Result<Config> {
  let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
  if let Some(url) = &cli.scm_url {
    config.scm_url = url.clone();
  }
  Ok(config)
}
