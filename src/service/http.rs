//! Blocking HTTP client for the molecule service.

use serde::de::DeserializeOwned;
use serde::Serialize;
use ureq::http::Response;
use ureq::{Agent, Body};

use super::{
    AnalyticsRequest, ElementRow, MoleculeService, MoleculeStats,
    RenderRequest, ServiceError,
};
use crate::options::ServiceOptions;
use crate::scene::RenderedGraph;

/// [`MoleculeService`] over HTTP/JSON.
///
/// | Operation        | Route                       |
/// |------------------|-----------------------------|
/// | render           | `POST /render`              |
/// | analytics        | `POST /analytics`           |
/// | list elements    | `GET /elements`             |
/// | list molecules   | `GET /molecules`            |
/// | upsert element   | `POST /elements`            |
/// | upload molecule  | `POST /molecules/<name>`    |
pub struct HttpService {
    agent: Agent,
    base_url: String,
}

impl HttpService {
    /// Build a client for the configured endpoint.
    #[must_use]
    pub fn new(options: &ServiceOptions) -> Self {
        let config = Agent::config_builder()
            .timeout_global(options.render_timeout())
            .http_status_as_error(false)
            .build();
        Self {
            agent: Agent::new_with_config(config),
            base_url: options.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let response = self.agent.get(&self.url(path)).call()?;
        decode(&read_body(response)?)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let response = self.agent.post(&self.url(path)).send_json(body)?;
        decode(&read_body(response)?)
    }
}

impl MoleculeService for HttpService {
    fn render(&self, request: &RenderRequest) -> Result<RenderedGraph, ServiceError> {
        log::debug!(
            "POST /render {} ({}, {}, {})",
            request.name,
            request.phi_x,
            request.phi_y,
            request.phi_z
        );
        self.post_json("/render", request)
    }

    fn analytics(&self, request: &AnalyticsRequest) -> Result<MoleculeStats, ServiceError> {
        self.post_json("/analytics", request)
    }

    fn list_elements(&self) -> Result<Vec<ElementRow>, ServiceError> {
        self.get_json("/elements")
    }

    fn list_molecules(&self) -> Result<Vec<String>, ServiceError> {
        self.get_json("/molecules")
    }

    fn upsert_element(&self, element: &ElementRow) -> Result<(), ServiceError> {
        let response = self.agent.post(&self.url("/elements")).send_json(element)?;
        read_body(response).map(drop)
    }

    fn upload_molecule(&self, name: &str, sdf: &[u8]) -> Result<(), ServiceError> {
        let path = format!("/molecules/{}", urlencoding::encode(name));
        let response = self
            .agent
            .post(&self.url(&path))
            .header("Content-Type", "chemical/x-mdl-sdfile")
            .send(sdf)?;
        read_body(response).map(drop)
    }
}

impl From<ureq::Error> for ServiceError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(code) => Self::Status { code },
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Read the body, turning error statuses into [`ServiceError`]s that
/// carry the service's own message when it sent one.
fn read_body(mut response: Response<Body>) -> Result<String, ServiceError> {
    let code = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;
    if code >= 400 {
        let message = body.trim();
        return Err(if message.is_empty() {
            ServiceError::Status { code }
        } else {
            ServiceError::Rejected(message.to_owned())
        });
    }
    Ok(body)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ServiceError> {
    serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))
}
