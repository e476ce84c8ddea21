//! Request and response types for the Frabit API.
//!
//! Response types default every missing field, so a partial body still
//! decodes.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// Agent liveness state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    #[default]
    Active,
    Failed,
    UnReachable,
}

impl AgentStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Failed => "failed",
            AgentStatus::UnReachable => "un_reachable",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AgentStatus::Active),
            "failed" => Ok(AgentStatus::Failed),
            "un_reachable" => Ok(AgentStatus::UnReachable),
            other => Err(format!(
                "unknown agent status '{}' (expected active, failed or un_reachable)",
                other
            )),
        }
    }
}

/// Request to register an agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterAgentRequest {
    /// Agent ID.
    pub agent_id: String,
    /// Human-readable agent name.
    pub name: String,
    /// Initial status.
    pub status: AgentStatus,
    /// Address the agent reaches the platform from.
    pub client_ip: String,
}

/// Agent heartbeat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeartbeatRequest {
    /// Agent ID.
    pub agent_id: String,
    /// Current status.
    pub status: AgentStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Workspace-scoped resources
// ─────────────────────────────────────────────────────────────────────────────

/// A backup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backup {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// Request to create a backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBackupRequest {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// A database cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cluster {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// Request to create a cluster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClusterRequest {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// A database.
///
/// The server reports the owner as `admin`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub workspace: String,
    pub name: String,
    pub admin: String,
}

/// Request to create a database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDatabaseRequest {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// A project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// Request to create a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// A platform user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

/// Request to create a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub workspace: String,
    pub name: String,
    pub owner: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Teams
// ─────────────────────────────────────────────────────────────────────────────

/// A team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    /// Team ID.
    pub id: u32,
    /// Team name. Older servers send this as `dame`.
    #[serde(alias = "dame")]
    pub name: String,
    /// Description.
    pub description: String,
    /// Owning user.
    pub owner: String,
    /// Creation time (ISO 8601).
    pub created_at: String,
    /// Last update time (ISO 8601).
    pub updated_at: String,
}

/// Request to create a team.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    pub description: String,
    pub owner: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Orgs
// ─────────────────────────────────────────────────────────────────────────────

/// An organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Org {
    pub name: String,
    pub description: String,
    pub country: String,
}

/// Request to create an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOrgRequest {
    pub name: String,
    pub description: String,
    pub country: String,
}

/// Request to update an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrgRequest {
    pub name: String,
    pub description: String,
    pub country: String,
}
