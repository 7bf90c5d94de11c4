//! # Nikto XML Reader
//!
//! Reads nikto's XML output (`-Format xml`). Both a single `<niktoscan>` root
//! and a `<niktoscans>` wrapper holding several runs are accepted.
//!
//! The XML schema below is private; callers only see the report model from
//! `drone_common::report`.

use drone_common::report::{FindingItem, ScanFinding, ScanReport, ScanRun, SslInfo};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unexpected report layout: {0}")]
    Schema(#[from] quick_xml::de::DeError),
    #[error("unexpected root element <{0}>, expected <niktoscan> or <niktoscans>")]
    UnexpectedRoot(String),
    #[error("report contains no XML elements")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct NiktoScans {
    #[serde(rename = "niktoscan", default)]
    scans: Vec<NiktoScan>,
}

#[derive(Debug, Deserialize)]
struct NiktoScan {
    #[serde(rename = "@options", default)]
    options: String,
    #[serde(rename = "@version", default)]
    version: String,
    #[serde(rename = "@scanstart", default)]
    scan_start: String,
    #[serde(rename = "@scanend", default)]
    scan_end: String,
    #[serde(rename = "scandetails", default)]
    details: Vec<ScanDetails>,
}

#[derive(Debug, Deserialize)]
struct ScanDetails {
    #[serde(rename = "@targetip", default)]
    target_ip: String,
    #[serde(rename = "@targethostname", default)]
    target_hostname: String,
    #[serde(rename = "@targetport", default)]
    target_port: u16,
    #[serde(rename = "@hostheader", default)]
    host_header: Option<String>,
    #[serde(default)]
    ssl: Option<Ssl>,
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Ssl {
    #[serde(rename = "@info", default)]
    info: String,
    #[serde(rename = "@ciphers", default)]
    ciphers: String,
    #[serde(rename = "@issuers", default)]
    issuers: String,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(rename = "@osvdbid", default)]
    osvdb_id: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    uri: String,
}

/// Parses a raw report file.
pub fn parse_bytes(buf: &[u8]) -> Result<ScanReport, ReportError> {
    parse(std::str::from_utf8(buf)?)
}

/// Parses a nikto XML document.
pub fn parse(xml: &str) -> Result<ScanReport, ReportError> {
    let scans: Vec<NiktoScan> = match root_element(xml)?.as_str() {
        "niktoscans" => quick_xml::de::from_str::<NiktoScans>(xml)?.scans,
        "niktoscan" => vec![quick_xml::de::from_str::<NiktoScan>(xml)?],
        other => return Err(ReportError::UnexpectedRoot(other.to_string())),
    };

    Ok(ScanReport {
        runs: scans.into_iter().map(ScanRun::from).collect(),
    })
}

/// Name of the first element, skipping the declaration, DOCTYPE and comments.
fn root_element(xml: &str) -> Result<String, ReportError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) => {
                return Ok(String::from_utf8_lossy(tag.name().as_ref()).into_owned());
            }
            Event::Eof => return Err(ReportError::Empty),
            _ => {}
        }
    }
}

impl From<NiktoScan> for ScanRun {
    fn from(scan: NiktoScan) -> Self {
        Self {
            command: scan.options,
            scan_start: scan.scan_start,
            scan_end: scan.scan_end,
            version: scan.version,
            findings: scan.details.into_iter().map(ScanFinding::from).collect(),
        }
    }
}

impl From<ScanDetails> for ScanFinding {
    fn from(details: ScanDetails) -> Self {
        let host_header = details
            .host_header
            .filter(|header| !header.is_empty())
            .unwrap_or_else(|| details.target_hostname.clone());

        Self {
            target_ip: details.target_ip,
            target_port: details.target_port,
            target_hostname: details.target_hostname,
            host_header,
            ssl: details.ssl.map(|ssl| SslInfo {
                info: ssl.info,
                ciphers: ssl.ciphers,
                issuers: ssl.issuers,
            }),
            items: details.items.into_iter().map(FindingItem::from).collect(),
        }
    }
}

impl From<Item> for FindingItem {
    fn from(item: Item) -> Self {
        Self {
            description: item.description.trim().to_string(),
            uri: item.uri.trim().to_string(),
            osvdb_id: item.osvdb_id.trim().parse::<u32>().ok().filter(|id| *id > 0),
        }
    }
}
