use std::collections::BTreeSet;
use std::fs;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use crate::terminal::{format, print, spinner};
use drone_common::config::Config;
use drone_common::report::ScanReport;
use drone_common::repository::ImportOptions;
use drone_common::success;
use drone_core::import::ImportService;
use drone_protocols::lair::LairClient;
use drone_protocols::nikto;

pub async fn import(cfg: &Config) -> anyhow::Result<()> {
    print::header("loading nikto report", cfg.quiet);
    let buf: Vec<u8> = fs::read(&cfg.report_path).context("Could not open file")?;
    let report: ScanReport = nikto::parse_bytes(&buf).context("Error parsing nikto data")?;
    print_report(&report, cfg);

    let client = LairClient::new(&cfg.lair, cfg.insecure_ssl).context("Error setting up client")?;
    let service = ImportService::new(Box::new(client));
    let options = ImportOptions {
        force_ports: cfg.force_ports,
    };

    let start_time: Instant = Instant::now();
    let pb = spinner::start(
        format!("Importing results into project {}", cfg.project_id),
        cfg.quiet,
    );
    let result = service
        .import(&cfg.project_id, &report, &cfg.tags, options)
        .await;
    pb.finish_and_clear();
    let unmatched: BTreeSet<String> = result?;

    import_ends(&report, &unmatched, start_time.elapsed(), cfg);
    Ok(())
}

fn print_report(report: &ScanReport, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }

    print::aligned_line("Project", cfg.project_id.normal());
    print::aligned_line("Report", cfg.report_path.display().to_string().normal());
    print::aligned_line("Tags", format::tags_to_value(&cfg.tags));
    print::aligned_line("Findings", report.findings_count().to_string().normal());
    if !report.runs.is_empty() {
        print::as_tree_one_level(format::runs_to_details(report));
    }
}

fn import_ends(report: &ScanReport, unmatched: &BTreeSet<String>, total_time: Duration, cfg: &Config) {
    if cfg.quiet == 0 {
        print::fat_separator();
        print::centerln(&format::summary(report.findings_count(), unmatched.len(), total_time));
    }

    if !unmatched.is_empty() {
        info!("{}", format::unmatched_notice(&cfg.project_id));
        for line in format::unmatched_lines(unmatched) {
            print::print(&line);
        }
    }

    success!("Operation completed successfully");
}
