//! Agents API.

use reqwest::Method;

use crate::client::FrabitClient;
use crate::error::Result;
use crate::types::{HeartbeatRequest, RegisterAgentRequest};

/// Agents API client.
///
/// Both calls only report success or failure; response bodies are ignored.
pub struct AgentsApi {
    client: FrabitClient,
}

impl AgentsApi {
    pub(crate) fn new(client: FrabitClient) -> Self {
        Self { client }
    }

    /// Register an agent with the platform.
    pub async fn register(&self, request: RegisterAgentRequest) -> Result<()> {
        self.client
            .send_discard(Method::POST, "agents", &request)
            .await
    }

    /// Report agent liveness.
    pub async fn heartbeat(&self, request: HeartbeatRequest) -> Result<()> {
        self.client
            .send_discard(Method::POST, "agents/heartbeat", &request)
            .await
    }
}
