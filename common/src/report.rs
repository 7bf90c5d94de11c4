//! # Scan Report Model
//!
//! A nikto report as handed over by the report reader. One [`ScanRun`] per
//! `niktoscan` invocation, one [`ScanFinding`] per scanned target.

/// Ordered sequence of scan runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub runs: Vec<ScanRun>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRun {
    /// Options string nikto was invoked with.
    pub command: String,
    pub scan_start: String,
    pub scan_end: String,
    /// Version of nikto that produced the run.
    pub version: String,
    pub findings: Vec<ScanFinding>,
}

/// Everything nikto reported about one `ip:port` target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFinding {
    pub target_ip: String,
    pub target_port: u16,
    /// Hostname nikto resolved for the target, or the IP when there is none.
    pub target_hostname: String,
    /// Value sent in the HTTP `Host` header.
    pub host_header: String,
    pub ssl: Option<SslInfo>,
    pub items: Vec<FindingItem>,
}

/// Transport security details nikto gathered for an https target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslInfo {
    pub info: String,
    pub ciphers: String,
    pub issuers: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingItem {
    pub description: String,
    pub uri: String,
    /// OSVDB reference, `None` when nikto reported `0` or nothing.
    pub osvdb_id: Option<u32>,
}

impl ScanFinding {
    /// Descriptor used when the target is missing from the inventory.
    pub fn descriptor(&self) -> String {
        format!(
            "{} ({}:{})",
            self.target_hostname, self.target_ip, self.target_port
        )
    }
}

impl ScanReport {
    pub fn findings_count(&self) -> usize {
        self.runs.iter().map(|run| run.findings.len()).sum()
    }
}
