//! Apiary CLI - Assess beekeeping observations from the command line

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{assess, batch, completions, rules};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "apiary")]
#[command(author, version, about = "Colony health assessment for beekeeping records")]
pub struct Cli {
    /// Output format: table, json (defaults to the config file setting)
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess one observation file
    Assess(assess::AssessArgs),
    /// Assess several observation files and summarize them
    Batch(batch::BatchArgs),
    /// Show the scoring profile and recommendation rules for a kind
    Rules(rules::RulesArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context shared by commands
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config = Config::load();
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format));
        Self { config, format }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => ctx.config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting apiary CLI");

    match &cli.command {
        Commands::Assess(args) => assess::run(args, &ctx).await?,
        Commands::Batch(args) => batch::run(args, &ctx).await?,
        Commands::Rules(args) => rules::run(args, &ctx)?,
        Commands::Config(args) => commands::config::run(args, &ctx.config)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
