//! Organization commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use frabit_client::{CreateOrgRequest, UpdateOrgRequest};

use super::{Context, print_record};

/// Arguments for the org command.
#[derive(Args, Debug)]
pub struct OrgArgs {
    #[command(subcommand)]
    pub command: OrgCommand,
}

#[derive(Subcommand, Debug)]
pub enum OrgCommand {
    /// Fetch the organization
    Get,

    /// Create an organization
    Create(OrgFields),

    /// Update the organization
    Update(OrgFields),
}

/// Organization fields.
#[derive(Args, Debug)]
pub struct OrgFields {
    /// Organization name
    #[arg(long)]
    pub name: String,

    /// Description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Country
    #[arg(long, default_value = "")]
    pub country: String,
}

/// Run the org command.
pub async fn run(args: OrgArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let orgs = client.orgs();

    match args.command {
        OrgCommand::Get => {
            let org = orgs.get().await?;
            print_record(ctx, "Organization", &org)
        }
        OrgCommand::Create(fields) => {
            let org = orgs
                .create(CreateOrgRequest {
                    name: fields.name,
                    description: fields.description,
                    country: fields.country,
                })
                .await?;
            print_record(ctx, "Organization created", &org)
        }
        OrgCommand::Update(fields) => {
            let org = orgs
                .update(UpdateOrgRequest {
                    name: fields.name,
                    description: fields.description,
                    country: fields.country,
                })
                .await?;
            print_record(ctx, "Organization updated", &org)
        }
    }
}
