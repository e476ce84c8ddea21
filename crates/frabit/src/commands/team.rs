//! Team commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use frabit_client::CreateTeamRequest;

use super::{Context, print_record};

/// Arguments for the team command.
#[derive(Args, Debug)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Fetch the team
    Get,

    /// Create a team
    Create {
        /// Team name
        #[arg(long)]
        name: String,

        /// Team description
        #[arg(long, default_value = "")]
        description: String,

        /// Owning user
        #[arg(long)]
        owner: String,
    },
}

/// Run the team command.
pub async fn run(args: TeamArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command {
        TeamCommand::Get => {
            let team = client.teams().get().await?;
            print_record(ctx, "Team", &team)
        }
        TeamCommand::Create {
            name,
            description,
            owner,
        } => {
            let team = client
                .teams()
                .create(CreateTeamRequest {
                    name,
                    description,
                    owner,
                })
                .await?;
            print_record(ctx, "Team created", &team)
        }
    }
}
