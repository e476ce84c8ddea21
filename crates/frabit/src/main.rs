//! Frabit - command-line client for the Frabit database operations platform.
//!
//! Main entry point for the Frabit CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::resource::{ResourceArgs, ResourceKind};
use commands::{agent, config, org, parse_header, resource, team};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// Frabit - database operations platform client
#[derive(Parser)]
#[command(name = "frabit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Server URL (default: current context, then http://localhost:9180)
    #[arg(long, global = true, env = "FRABIT_SERVER_URL")]
    pub server: Option<String>,

    /// Bearer token
    #[arg(long, global = true, env = "FRABIT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config context to use instead of the current one
    #[arg(long, global = true)]
    pub context: Option<String>,

    /// Extra header, as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Treat 4xx/5xx responses as empty results instead of errors
    #[arg(long, global = true)]
    pub legacy_status: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Agent registration and heartbeats
    Agent(agent::AgentArgs),

    /// Backup operations
    Backup(ResourceArgs),

    /// Cluster operations
    Cluster(ResourceArgs),

    /// Database operations
    Database(ResourceArgs),

    /// Organization operations
    Org(org::OrgArgs),

    /// Project operations
    Project(ResourceArgs),

    /// Team operations
    Team(team::TeamArgs),

    /// User operations
    User(ResourceArgs),

    /// Client context management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing on stderr; RUST_LOG wins over --verbose
    let filter = if cli.verbose {
        "frabit=debug,frabit_client=debug,frabit_config=debug,warn"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Create context for commands
    let ctx = commands::Context {
        server_url: cli.server,
        token: cli.token,
        context_name: cli.context,
        headers: cli.headers,
        legacy_status: cli.legacy_status,
        json_output: cli.json,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Agent(args) => agent::run(args, &ctx).await,
        Commands::Backup(args) => resource::run(ResourceKind::Backup, args, &ctx).await,
        Commands::Cluster(args) => resource::run(ResourceKind::Cluster, args, &ctx).await,
        Commands::Database(args) => resource::run(ResourceKind::Database, args, &ctx).await,
        Commands::Org(args) => org::run(args, &ctx).await,
        Commands::Project(args) => resource::run(ResourceKind::Project, args, &ctx).await,
        Commands::Team(args) => team::run(args, &ctx).await,
        Commands::User(args) => resource::run(ResourceKind::User, args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}
