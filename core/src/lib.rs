//! Merges nikto findings into a Lair project.
//!
//! * [`correlator`]: matches findings to hosts and services and mutates the project.
//! * [`note`]: renders the note attached to a matched service.
//! * [`import`]: the export, merge, import use case on top of a [`ProjectRepository`].
//!
//! [`ProjectRepository`]: drone_common::repository::ProjectRepository

pub mod correlator;
pub mod import;
pub mod note;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("malformed target URL '{target}': {source}")]
    MalformedTargetUrl {
        target: String,
        #[source]
        source: url::ParseError,
    },
}
