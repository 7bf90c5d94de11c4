//! # Finding Correlation
//!
//! Reconciles a nikto report with a Lair project. A finding lands on every
//! service whose host address and port equal the finding's target. The merge
//! only appends: hosts and services are never created or removed.

use std::collections::BTreeSet;

use drone_common::TOOL;
use drone_common::lair::{Command, Host, Project};
use drone_common::report::{ScanFinding, ScanReport, ScanRun};
use tracing::debug;

use crate::{MergeError, note};

/// The merged project and the descriptors of findings with no matching service.
#[derive(Debug, Clone)]
pub struct Merged {
    pub project: Project,
    pub unmatched: BTreeSet<String>,
}

/// Merges `report` into `project`, appending `tags` to every matched host.
///
/// The project is consumed: on error nothing is handed back, so a partially
/// merged project can never be submitted.
pub fn merge(report: &ScanReport, mut project: Project, tags: &[String]) -> Result<Merged, MergeError> {
    let mut unmatched: BTreeSet<String> = BTreeSet::new();
    project.tool = TOOL.to_string();

    for run in &report.runs {
        for finding in &run.findings {
            if !apply_finding(&mut project.hosts, run, finding, tags)? {
                debug!(finding = %finding.descriptor(), "no matching service in project");
                unmatched.insert(finding.descriptor());
            }
        }
    }

    // Only the last run's invocation is kept.
    let command: String = report
        .runs
        .last()
        .map(|run| run.command.clone())
        .unwrap_or_default();
    project.commands = vec![Command {
        tool: TOOL.to_string(),
        command,
    }];

    Ok(Merged { project, unmatched })
}

/// Applies one finding to every matching host and service.
///
/// Returns whether at least one service matched.
fn apply_finding(
    hosts: &mut [Host],
    run: &ScanRun,
    finding: &ScanFinding,
    tags: &[String],
) -> Result<bool, MergeError> {
    let mut found = false;

    for host in hosts.iter_mut().filter(|host| host.ipv4 == finding.target_ip) {
        let mut host_matched = false;

        for service in host
            .services
            .iter_mut()
            .filter(|service| service.port == finding.target_port)
        {
            let note = note::synthesize(finding, run)?;
            debug!(title = %note.title, "adding note");

            host.last_modified_by = TOOL.to_string();
            service.last_modified_by = TOOL.to_string();
            service.notes.push(note);
            host_matched = true;
        }

        if host_matched {
            host.tags.extend(tags.iter().cloned());
            add_hostname(host, finding);
            found = true;
        }
    }

    Ok(found)
}

fn add_hostname(host: &mut Host, finding: &ScanFinding) {
    let hostname: &str = &finding.target_hostname;
    if hostname == finding.target_ip || host.hostnames.iter().any(|known| known == hostname) {
        return;
    }
    host.hostnames.push(hostname.to_string());
}
