//! Shared building blocks for the nikto drone.
//!
//! * [`report`]: the in-memory shape of a parsed nikto report.
//! * [`lair`]: the Lair project inventory as exchanged with the API server.
//! * [`repository`]: the port through which projects are exported and imported.
//! * [`config`]: runtime configuration assembled by the command line.

pub mod config;
pub mod lair;
pub mod log;
pub mod report;
pub mod repository;

/// Identity this drone writes into every record it touches.
pub const TOOL: &str = "nikto";
