//! Orgs API.

use super::resource::{Resource, ResourceApi};
use crate::error::Result;
use crate::types::{CreateOrgRequest, Org, UpdateOrgRequest};

/// Orgs API client.
pub type OrgsApi = ResourceApi<Org>;

impl Resource for Org {
    const PATH: &'static str = "orgs";
    type Create = CreateOrgRequest;
}

impl ResourceApi<Org> {
    /// Update the organization.
    pub async fn update(&self, request: UpdateOrgRequest) -> Result<Org> {
        self.client.put(Org::PATH, &request).await
    }
}
