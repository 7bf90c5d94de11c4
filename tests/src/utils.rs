use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use drone_common::lair::Project;
use drone_common::repository::{ImportOptions, ProjectRepository};

pub const PROJECT_JSON: &str = include_str!("../fixtures/lair_project.json");
pub const NIKTO_XML: &str = include_str!("../fixtures/nikto_two_hosts.xml");
pub const PROJECT_ID: &str = "5510a0c1e4b0e2a1c3d4f5a6";

/// Stand-in for the Lair API server that keeps projects as JSON.
#[derive(Clone, Default)]
pub struct MemoryLair {
    pub stored: Arc<Mutex<Option<String>>>,
    pub imports: Arc<Mutex<Vec<(serde_json::Value, ImportOptions)>>>,
}

impl MemoryLair {
    pub fn with_project(json: &str) -> Self {
        let lair = Self::default();
        *lair.stored.lock().unwrap() = Some(json.to_string());
        lair
    }

    pub fn last_import(&self) -> Option<(serde_json::Value, ImportOptions)> {
        self.imports.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ProjectRepository for MemoryLair {
    async fn export_project(&self, project_id: &str) -> anyhow::Result<Project> {
        let stored = self.stored.lock().unwrap().clone();
        let json = stored.ok_or_else(|| anyhow::anyhow!("no project stored"))?;
        let project: Project = serde_json::from_str(&json)?;
        anyhow::ensure!(project.id == project_id, "unknown project {project_id}");
        Ok(project)
    }

    async fn import_project(&self, project: &Project, options: ImportOptions) -> anyhow::Result<()> {
        let json = serde_json::to_string(project)?;
        self.imports
            .lock()
            .unwrap()
            .push((serde_json::from_str(&json)?, options));
        *self.stored.lock().unwrap() = Some(json);
        Ok(())
    }
}
