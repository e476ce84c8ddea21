//! Generic get/create API shared by the plain resource kinds.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::FrabitClient;
use crate::error::Result;
use crate::types::{
    Backup, Cluster, CreateBackupRequest, CreateClusterRequest, CreateDatabaseRequest,
    CreateProjectRequest, CreateTeamRequest, CreateUserRequest, Database, Project, Team, User,
};

/// A resource kind served at one fixed path.
pub trait Resource: DeserializeOwned + Default {
    /// Path under the API prefix.
    const PATH: &'static str;

    /// Payload accepted by `create`.
    type Create: Serialize;
}

/// Get/create client for one resource kind.
pub struct ResourceApi<R> {
    pub(crate) client: FrabitClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceApi<R> {
    pub(crate) fn new(client: FrabitClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Fetch the resource.
    pub async fn get(&self) -> Result<R> {
        self.client.get(R::PATH).await
    }

    /// Create the resource.
    pub async fn create(&self, request: R::Create) -> Result<R> {
        self.client.post(R::PATH, &request).await
    }
}

/// Backups API client.
pub type BackupsApi = ResourceApi<Backup>;
/// Clusters API client.
pub type ClustersApi = ResourceApi<Cluster>;
/// Databases API client.
pub type DatabasesApi = ResourceApi<Database>;
/// Projects API client.
pub type ProjectsApi = ResourceApi<Project>;
/// Teams API client.
pub type TeamsApi = ResourceApi<Team>;
/// Users API client.
pub type UsersApi = ResourceApi<User>;

impl Resource for Backup {
    const PATH: &'static str = "backups";
    type Create = CreateBackupRequest;
}

impl Resource for Cluster {
    const PATH: &'static str = "clusters";
    type Create = CreateClusterRequest;
}

impl Resource for Database {
    const PATH: &'static str = "databases";
    type Create = CreateDatabaseRequest;
}

impl Resource for Project {
    const PATH: &'static str = "projects";
    type Create = CreateProjectRequest;
}

impl Resource for Team {
    const PATH: &'static str = "teams";
    type Create = CreateTeamRequest;
}

impl Resource for User {
    const PATH: &'static str = "users";
    type Create = CreateUserRequest;
}
