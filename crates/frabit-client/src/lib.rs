//! HTTP client SDK for the Frabit database operations platform.
//!
//! This crate provides a typed client for the Frabit server API.
//!
//! # Example
//!
//! ```no_run
//! use frabit_client::{AgentStatus, CreateTeamRequest, FrabitClient, HeartbeatRequest, Result};
//!
//! # async fn example() -> Result<()> {
//! // Create a client
//! let client = FrabitClient::builder()
//!     .base_url("http://localhost:9180")
//!     .user_agent("ops-bot/1.0")
//!     .build()?;
//!
//! // Report liveness for an agent
//! client
//!     .agents()
//!     .heartbeat(HeartbeatRequest {
//!         agent_id: "agent-1".into(),
//!         status: AgentStatus::Active,
//!     })
//!     .await?;
//!
//! // Create a team
//! let team = client
//!     .teams()
//!     .create(CreateTeamRequest {
//!         name: "dba".into(),
//!         description: "Database administrators".into(),
//!         owner: "alice".into(),
//!     })
//!     .await?;
//! println!("Created team {}", team.id);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Agents**: register, heartbeat
//! - **Backups**, **Clusters**, **Databases**, **Projects**, **Teams**, **Users**: get, create
//! - **Orgs**: get, create, update
//!
//! # Error statuses
//!
//! 4xx/5xx responses fail with [`Error::Status`]. Callers that relied on
//! the old SDK treating them as an empty success can opt back in with
//! [`ClientBuilder::legacy_error_status`].

pub mod api;
pub mod client;
pub mod error;
mod transport;
pub mod types;

pub use api::Resource;
pub use client::{ClientBuilder, FrabitClient, VERSION, default_user_agent};
pub use error::{Error, ErrorKind, Result};
pub use types::*;
