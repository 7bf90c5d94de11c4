//! # Project Import Service
//!
//! Implements the drone's single use case: export a project, merge a nikto
//! report into it and import the result.

use std::collections::BTreeSet;

use anyhow::Context;
use drone_common::lair::Project;
use drone_common::report::ScanReport;
use drone_common::repository::{ImportOptions, ProjectRepository};
use tracing::debug;

use crate::correlator::{self, Merged};

/// Application Service for importing nikto results.
///
/// Orchestrates the import by:
/// 1. fetching the project through the [`ProjectRepository`] trait.
/// 2. merging the report into it.
/// 3. handing the merged project back to the repository.
pub struct ImportService {
    repo: Box<dyn ProjectRepository>,
}

impl ImportService {
    pub fn new(repo: Box<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    /// Returns the descriptors of findings that matched nothing in the project.
    pub async fn import(
        &self,
        project_id: &str,
        report: &ScanReport,
        tags: &[String],
        options: ImportOptions,
    ) -> anyhow::Result<BTreeSet<String>> {
        let project: Project = self
            .repo
            .export_project(project_id)
            .await
            .context("Unable to export project")?;
        debug!(
            "Exported project {} with {} host(s)",
            project_id,
            project.hosts.len()
        );

        let Merged { project, unmatched } = correlator::merge(report, project, tags)?;
        debug!(
            "Merged {} finding(s), {} without a matching service",
            report.findings_count(),
            unmatched.len()
        );

        self.repo
            .import_project(&project, options)
            .await
            .context("Unable to import project")?;

        Ok(unmatched)
    }
}
