//! Config command - client context management.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};

use frabit_config::Context as ClientContext;

use super::{Context, parse_header};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show configuration file path
    Path,

    /// Show the current context name
    CurrentContext,

    /// List available contexts
    GetContexts,

    /// Switch to a different context
    UseContext {
        /// Context name to switch to
        name: String,
    },

    /// Create or update a context
    SetContext {
        /// Context name
        name: String,

        /// Server URL (e.g., http://localhost:9180)
        #[arg(long)]
        server: Option<String>,

        /// File containing the bearer token
        #[arg(long)]
        token_file: Option<PathBuf>,

        /// Environment variable containing the bearer token
        #[arg(long)]
        token_env: Option<String>,

        /// User agent prefix
        #[arg(long)]
        user_agent: Option<String>,

        /// Static header to store, as 'Name: value' (repeatable)
        #[arg(long = "add-header", value_parser = parse_header)]
        add_headers: Vec<(String, String)>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Remove a context
    DeleteContext {
        /// Context name
        name: String,
    },
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Path => cmd_path(),
        ConfigCommand::CurrentContext => cmd_current_context(),
        ConfigCommand::GetContexts => cmd_get_contexts(ctx),
        ConfigCommand::UseContext { name } => cmd_use_context(&name),
        ConfigCommand::SetContext {
            name,
            server,
            token_file,
            token_env,
            user_agent,
            add_headers,
            timeout,
        } => cmd_set_context(
            &name,
            ContextUpdate {
                server,
                token_file,
                token_env,
                user_agent,
                headers: add_headers,
                timeout,
            },
        ),
        ConfigCommand::DeleteContext { name } => cmd_delete_context(&name),
    }
}

fn cmd_path() -> Result<()> {
    let path = frabit_config::client_config_path()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

fn cmd_current_context() -> Result<()> {
    let config = frabit_config::load_client_config()?;

    match &config.current_context {
        Some(name) => println!("{}", name),
        None => {
            println!("No current context set. Use 'frabit config use-context <name>' to set one.")
        }
    }

    Ok(())
}

fn cmd_get_contexts(ctx: &Context) -> Result<()> {
    let config = frabit_config::load_client_config()?;

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&config.contexts)?);
        return Ok(());
    }

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!();
        println!("Create one with:");
        println!("  frabit config set-context local --server=http://localhost:9180");
        return Ok(());
    }

    let current = config.current_context.as_deref();

    println!("CURRENT   NAME            SERVER");
    for c in &config.contexts {
        let marker = if current == Some(c.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{}         {:<15} {}", marker, c.name, c.server);
    }

    Ok(())
}

fn cmd_use_context(name: &str) -> Result<()> {
    let mut config = frabit_config::load_client_config()?;

    config.use_context(name)?;
    frabit_config::save_client_config(&config)?;

    println!("Switched to context \"{}\".", name);
    Ok(())
}

/// Fields `set-context` may change.
struct ContextUpdate {
    server: Option<String>,
    token_file: Option<PathBuf>,
    token_env: Option<String>,
    user_agent: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<u64>,
}

impl ContextUpdate {
    fn apply(self, ctx: &mut ClientContext) {
        if let Some(url) = self.server {
            ctx.server = url;
        }
        if let Some(path) = self.token_file {
            ctx.token_file = Some(path);
        }
        if let Some(var) = self.token_env {
            ctx.token_env = Some(var);
        }
        if let Some(agent) = self.user_agent {
            ctx.user_agent = Some(agent);
        }
        if let Some(t) = self.timeout {
            ctx.timeout = Some(t);
        }
        ctx.headers.extend(self.headers);
    }
}

fn cmd_set_context(name: &str, mut update: ContextUpdate) -> Result<()> {
    let mut config = frabit_config::load_client_config()?;

    let created = match config.get_context_mut(name) {
        Some(existing) => {
            update.apply(existing);
            false
        }
        None => {
            // A new context needs a server
            let server = update
                .server
                .take()
                .ok_or_else(|| anyhow!("--server is required when creating a new context"))?;
            let mut ctx = ClientContext::new(name, server);
            update.apply(&mut ctx);
            config.set_context(ctx);
            true
        }
    };

    // First context becomes current
    if config.current_context.is_none() {
        config.current_context = Some(name.to_string());
    }

    frabit_config::save_client_config(&config)?;

    if created {
        println!("Context \"{}\" created.", name);
    } else {
        println!("Context \"{}\" modified.", name);
    }
    Ok(())
}

fn cmd_delete_context(name: &str) -> Result<()> {
    let mut config = frabit_config::load_client_config()?;

    if config.remove_context(name).is_none() {
        return Err(frabit_config::ConfigError::ContextNotFound(name.to_string()).into());
    }
    frabit_config::save_client_config(&config)?;

    println!("Context \"{}\" deleted.", name);
    Ok(())
}
