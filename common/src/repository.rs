use async_trait::async_trait;

use crate::lair::Project;

/// Options passed through to the API server on import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Disables the server's protection against hosts with excessive open ports.
    pub force_ports: bool,
}

/// Defines the contract for fetching and storing Lair projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Retrieves the full project identified by `project_id`.
    async fn export_project(&self, project_id: &str) -> anyhow::Result<Project>;

    /// Submits `project` back to the server, replacing what it knows about it.
    async fn import_project(&self, project: &Project, options: ImportOptions) -> anyhow::Result<()>;
}
