//! # Finding Notes
//!
//! One note per matched target. The content layout is consumed by people
//! reading the project and by scripts, so field order and punctuation are
//! fixed:
//!
//! ```text
//! SSL Information:            <- https targets only
//! Subject: <info>
//! Ciphers: <ciphers>
//! Issuer: <issuers>
//!
//! <description> URI: <uri> OSVDBID: <id>
//! <description> URI: <uri>
//!
//! Start: <scan start> End: <scan end>
//! ```

use drone_common::TOOL;
use drone_common::lair::Note;
use drone_common::report::{FindingItem, ScanFinding, ScanRun, SslInfo};
use url::Url;

use crate::MergeError;

/// Builds the note for `finding`, attributed to this drone.
pub fn synthesize(finding: &ScanFinding, run: &ScanRun) -> Result<Note, MergeError> {
    let https = is_https(&finding.target_hostname)?;

    Ok(Note {
        title: title(finding, run),
        content: content(finding, run, https),
        last_modified_by: TOOL.to_string(),
    })
}

pub fn title(finding: &ScanFinding, run: &ScanRun) -> String {
    format!(
        "{} v{} ({}:{})",
        TOOL, run.version, finding.host_header, finding.target_port
    )
}

pub fn content(finding: &ScanFinding, run: &ScanRun, https: bool) -> String {
    let mut content = String::new();

    if https {
        let ssl = finding.ssl.clone().unwrap_or_default();
        content.push_str(&ssl_block(&ssl));
    }

    for item in &finding.items {
        content.push_str(&item_line(item));
        content.push('\n');
    }

    content.push_str(&format!("\nStart: {} End: {}", run.scan_start, run.scan_end));
    content
}

fn ssl_block(ssl: &SslInfo) -> String {
    format!(
        "SSL Information:\nSubject: {}\nCiphers: {}\nIssuer: {}\n\n",
        ssl.info, ssl.ciphers, ssl.issuers
    )
}

fn item_line(item: &FindingItem) -> String {
    match item.osvdb_id {
        Some(id) if id > 0 => format!("{} URI: {} OSVDBID: {}", item.description, item.uri, id),
        _ => format!("{} URI: {}", item.description, item.uri),
    }
}

/// Tells whether `target` is an `https` URL.
///
/// Bare hostnames and addresses carry no scheme and are not https.
pub fn is_https(target: &str) -> Result<bool, MergeError> {
    match Url::parse(target) {
        Ok(url) => Ok(url.scheme() == "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(false),
        Err(source) => Err(MergeError::MalformedTargetUrl {
            target: target.to_string(),
            source,
        }),
    }
}
