//! Workspace-scoped resource commands (backup, cluster, database, project, user).

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use frabit_client::api::ResourceApi;
use frabit_client::{
    CreateBackupRequest, CreateClusterRequest, CreateDatabaseRequest, CreateProjectRequest,
    CreateUserRequest, Resource,
};

use super::{Context, print_record};

/// Arguments shared by every workspace-scoped resource.
#[derive(Args, Debug)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Subcommand, Debug)]
pub enum ResourceCommand {
    /// Fetch the resource
    Get,

    /// Create the resource
    Create(CreateArgs),
}

/// Fields accepted by every workspace-scoped create request.
#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Workspace the resource belongs to
    #[arg(long)]
    pub workspace: String,

    /// Resource name
    #[arg(long)]
    pub name: String,

    /// Owning user
    #[arg(long)]
    pub owner: String,
}

/// Which resource a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Backup,
    Cluster,
    Database,
    Project,
    User,
}

impl ResourceKind {
    fn label(self) -> &'static str {
        match self {
            ResourceKind::Backup => "Backup",
            ResourceKind::Cluster => "Cluster",
            ResourceKind::Database => "Database",
            ResourceKind::Project => "Project",
            ResourceKind::User => "User",
        }
    }
}

macro_rules! from_create_args {
    ($($request:ty),+ $(,)?) => {
        $(
            impl From<CreateArgs> for $request {
                fn from(args: CreateArgs) -> Self {
                    Self {
                        workspace: args.workspace,
                        name: args.name,
                        owner: args.owner,
                    }
                }
            }
        )+
    };
}

from_create_args!(
    CreateBackupRequest,
    CreateClusterRequest,
    CreateDatabaseRequest,
    CreateProjectRequest,
    CreateUserRequest,
);

/// Run a resource command.
pub async fn run(kind: ResourceKind, args: ResourceArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let label = kind.label();

    match kind {
        ResourceKind::Backup => dispatch(client.backups(), args.command, label, ctx).await,
        ResourceKind::Cluster => dispatch(client.clusters(), args.command, label, ctx).await,
        ResourceKind::Database => dispatch(client.databases(), args.command, label, ctx).await,
        ResourceKind::Project => dispatch(client.projects(), args.command, label, ctx).await,
        ResourceKind::User => dispatch(client.users(), args.command, label, ctx).await,
    }
}

async fn dispatch<R>(
    api: ResourceApi<R>,
    command: ResourceCommand,
    label: &str,
    ctx: &Context,
) -> Result<()>
where
    R: Resource + Serialize,
    R::Create: From<CreateArgs>,
{
    match command {
        ResourceCommand::Get => {
            let resource = api.get().await?;
            print_record(ctx, label, &resource)
        }
        ResourceCommand::Create(create) => {
            tracing::debug!(kind = label, workspace = %create.workspace, name = %create.name, "creating resource");
            let resource = api.create(create.into()).await?;
            print_record(ctx, &format!("{} created", label), &resource)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_args_conversion() {
        let args = CreateArgs {
            workspace: "prod".to_string(),
            name: "orders".to_string(),
            owner: "alice".to_string(),
        };
        let request = CreateDatabaseRequest::from(args.clone());
        assert_eq!(request.workspace, "prod");
        assert_eq!(request.owner, "alice");

        let request = CreateUserRequest::from(args);
        assert_eq!(request.name, "orders");
    }
}
