//! API endpoint implementations.

mod agents;
mod orgs;
mod resource;

pub use agents::AgentsApi;
pub use orgs::OrgsApi;
pub use resource::{
    BackupsApi, ClustersApi, DatabasesApi, ProjectsApi, Resource, ResourceApi, TeamsApi, UsersApi,
};
