//! CLI command handlers.

pub mod agent;
pub mod config;
pub mod org;
pub mod resource;
pub mod team;

use std::time::Duration;

use anyhow::{Result, anyhow};
use console::style;
use serde::Serialize;

use frabit_client::FrabitClient;

/// Server used when neither a flag nor a context names one.
pub const DEFAULT_SERVER: &str = "http://localhost:9180";

/// Shared context for all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Server URL override.
    pub server_url: Option<String>,
    /// Bearer token override.
    pub token: Option<String>,
    /// Named context to use instead of the current one.
    pub context_name: Option<String>,
    /// Extra static headers.
    pub headers: Vec<(String, String)>,
    /// Treat error statuses as empty successes.
    pub legacy_status: bool,
    /// Output as JSON for scripting.
    pub json_output: bool,
}

impl Context {
    /// Build a client from the selected config context plus flag overrides.
    pub fn client(&self) -> Result<FrabitClient> {
        let config = frabit_config::load_client_config()?;
        let selected = match &self.context_name {
            Some(name) => Some(
                config
                    .get_context(name)
                    .ok_or_else(|| anyhow!("context '{}' not found", name))?,
            ),
            None => config.current(),
        };

        let mut builder = FrabitClient::builder();
        let mut server = DEFAULT_SERVER.to_string();

        if let Some(ctx) = selected {
            tracing::debug!(context = %ctx.name, server = %ctx.server, "using config context");
            server = ctx.server.clone();
            if let Some(token) = ctx.resolve_token()? {
                builder = builder.token(token);
            }
            if let Some(agent) = &ctx.user_agent {
                builder = builder.user_agent(agent.clone());
            }
            if let Some(secs) = ctx.timeout {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            builder = builder
                .headers(ctx.headers.clone())
                .legacy_error_status(ctx.legacy_error_status);
        }

        if let Some(url) = &self.server_url {
            server = url.clone();
        }
        if let Some(token) = &self.token {
            builder = builder.token(token.clone());
        }
        if self.legacy_status {
            builder = builder.legacy_error_status(true);
        }

        let client = builder
            .base_url(server)
            .headers(self.headers.clone())
            .build()?;
        tracing::debug!(base_url = %client.base_url(), "client ready");
        Ok(client)
    }
}

/// Parse a `Name: value` header argument.
pub fn parse_header(s: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", s));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Print a record as pretty JSON, or as an aligned key/value list.
pub fn print_record<T: Serialize>(ctx: &Context, title: &str, record: &T) -> Result<()> {
    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    println!("{}", style(title).bold());
    match serde_json::to_value(record)? {
        serde_json::Value::Object(fields) => {
            for (key, value) in fields {
                let value = match value {
                    serde_json::Value::String(s) if s.is_empty() => style("-".to_string()).dim(),
                    serde_json::Value::String(s) => style(s),
                    other => style(other.to_string()),
                };
                println!("  {:<12} {}", key, value);
            }
        }
        other => println!("  {}", other),
    }
    Ok(())
}

/// Print a one-line success message.
pub fn print_done(ctx: &Context, message: &str) {
    if ctx.json_output {
        println!("{}", serde_json::json!({ "ok": true, "message": message }));
    } else {
        println!("{} {}", style("✓").green(), message);
    }
}
