//! Agent commands.
//!
//! - `frabit agent register` - Register an agent with the platform
//! - `frabit agent heartbeat` - Report agent liveness

use anyhow::Result;
use clap::{Args, Subcommand};

use frabit_client::{AgentStatus, HeartbeatRequest, RegisterAgentRequest};

use super::{Context, print_done};

/// Agent commands.
#[derive(Args, Debug)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Register an agent
    Register {
        /// Agent ID
        #[arg(long)]
        agent_id: String,

        /// Agent name
        #[arg(long)]
        name: String,

        /// Initial status: active, failed, un_reachable
        #[arg(long, default_value = "active")]
        status: AgentStatus,

        /// Client IP the agent reports from
        #[arg(long, default_value = "")]
        client_ip: String,
    },

    /// Send a heartbeat
    Heartbeat {
        /// Agent ID
        #[arg(long)]
        agent_id: String,

        /// Current status: active, failed, un_reachable
        #[arg(long, default_value = "active")]
        status: AgentStatus,
    },
}

/// Run the agent command.
pub async fn run(args: AgentArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        AgentCommand::Register {
            agent_id,
            name,
            status,
            client_ip,
        } => {
            client
                .agents()
                .register(RegisterAgentRequest {
                    agent_id: agent_id.clone(),
                    name,
                    status,
                    client_ip,
                })
                .await?;
            print_done(ctx, &format!("Agent {} registered", agent_id));
        }
        AgentCommand::Heartbeat { agent_id, status } => {
            client
                .agents()
                .heartbeat(HeartbeatRequest {
                    agent_id: agent_id.clone(),
                    status,
                })
                .await?;
            print_done(ctx, &format!("Heartbeat sent for {} ({})", agent_id, status));
        }
    }

    Ok(())
}
