//! # Lair API Client
//!
//! Talks to the Lair API server over HTTP with basic authentication:
//! * `GET  /api/projects/<id>` exports a project.
//! * `POST /api/projects/<id>` imports one, optionally with `force-ports=true`.

use async_trait::async_trait;
use drone_common::config::LairEndpoint;
use drone_common::lair::Project;
use drone_common::repository::{ImportOptions, ProjectRepository};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum LairError {
    #[error("invalid API server address: {0}")]
    Address(#[from] url::ParseError),
    #[error("API server address {0} cannot carry a path")]
    NotABase(Url),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Could not unmarshal JSON. Error {0}")]
    Json(#[from] serde_json::Error),
    #[error("Import failed. Error {0}")]
    Rejected(String),
}

/// Body the API server sends back after an import.
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(rename = "Status", alias = "status", default)]
    status: String,
    #[serde(rename = "Message", alias = "message", default)]
    message: String,
}

pub struct LairClient {
    http: reqwest::Client,
    base: Url,
    user: String,
    password: String,
}

impl LairClient {
    /// Creates a client for `endpoint`.
    ///
    /// `insecure_ssl` disables certificate validation, for servers running
    /// with self-signed certificates.
    pub fn new(endpoint: &LairEndpoint, insecure_ssl: bool) -> Result<Self, LairError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure_ssl)
            .build()?;

        Ok(Self {
            http,
            base: Url::parse(&endpoint.base_url())?,
            user: endpoint.user.clone(),
            password: endpoint.password.clone(),
        })
    }

    fn project_url(&self, project_id: &str, options: Option<ImportOptions>) -> Result<Url, LairError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LairError::NotABase(self.base.clone()))?
            .pop_if_empty()
            .extend(["api", "projects", project_id]);
        if options.is_some_and(|opts| opts.force_ports) {
            url.query_pairs_mut().append_pair("force-ports", "true");
        }
        Ok(url)
    }

    pub async fn export(&self, project_id: &str) -> Result<Project, LairError> {
        let url = self.project_url(project_id, None)?;
        debug!(%url, "exporting project");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;
        let body = checked_body(response).await?;

        Ok(serde_json::from_str(&body)?)
    }

    pub async fn import(&self, project: &Project, options: ImportOptions) -> Result<(), LairError> {
        let url = self.project_url(&project.id, Some(options))?;
        debug!(%url, "importing project");

        let response = self
            .http
            .post(url)
            .basic_auth(&self.user, Some(&self.password))
            .json(project)
            .send()
            .await?;
        let body = checked_body(response).await?;
        if body.trim().is_empty() {
            return Ok(());
        }

        let answer: ApiResponse = serde_json::from_str(&body)?;
        if answer.status == "Error" {
            return Err(LairError::Rejected(answer.message));
        }
        Ok(())
    }
}

async fn checked_body(response: reqwest::Response) -> Result<String, LairError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(LairError::Status { status, body });
    }
    Ok(body)
}

#[async_trait]
impl ProjectRepository for LairClient {
    async fn export_project(&self, project_id: &str) -> anyhow::Result<Project> {
        Ok(self.export(project_id).await?)
    }

    async fn import_project(&self, project: &Project, options: ImportOptions) -> anyhow::Result<()> {
        Ok(self.import(project, options).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> LairClient {
        let endpoint: LairEndpoint = "https://drone:pw@lair.local:11015".parse().unwrap();
        LairClient::new(&endpoint, true).unwrap()
    }

    #[test]
    fn export_url() {
        let url = client().project_url("abc123", None).unwrap();
        assert_eq!(url.as_str(), "https://lair.local:11015/api/projects/abc123");
    }

    #[test]
    fn import_url_with_force_ports() {
        let client = client();

        let plain = client
            .project_url("abc123", Some(ImportOptions::default()))
            .unwrap();
        let forced = client
            .project_url("abc123", Some(ImportOptions { force_ports: true }))
            .unwrap();

        assert_eq!(plain.as_str(), "https://lair.local:11015/api/projects/abc123");
        assert_eq!(
            forced.as_str(),
            "https://lair.local:11015/api/projects/abc123?force-ports=true"
        );
    }

    #[test]
    fn project_id_stays_inside_the_projects_path() {
        let client = client();

        for (id, path) in [
            ("../x", "/api/projects/..%2Fx"),
            ("//evil.example/steal", "/api/projects/%2F%2Fevil.example%2Fsteal"),
            ("p?q", "/api/projects/p%3Fq"),
            ("a:b", "/api/projects/a:b"),
        ] {
            let url = client.project_url(id, None).unwrap();
            assert_eq!(url.host_str(), Some("lair.local"), "id {id}");
            assert_eq!(url.port(), Some(11015), "id {id}");
            assert_eq!(url.path(), path, "id {id}");
            assert_eq!(url.query(), None, "id {id}");
        }
    }

    #[test]
    fn reads_api_response_in_either_case() {
        let upper: ApiResponse =
            serde_json::from_str(r#"{"Status":"Error","Message":"too many ports"}"#).unwrap();
        let lower: ApiResponse = serde_json::from_str(r#"{"status":"Ok"}"#).unwrap();

        assert_eq!(upper.status, "Error");
        assert_eq!(upper.message, "too many ports");
        assert_eq!(lower.status, "Ok");
        assert!(lower.message.is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        let endpoint: LairEndpoint = "http://drone:pw@127.0.0.1:9".parse().unwrap();
        let client = LairClient::new(&endpoint, false).unwrap();

        let err = client.export("abc123").await.unwrap_err();

        assert!(matches!(err, LairError::Http(_)));
    }
}
