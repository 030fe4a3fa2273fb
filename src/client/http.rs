use super::PersistenceClient;
use crate::core::session::WorkflowId;
use crate::core::template::{ErrorResponse, SaveRequest, SaveResponse, WorkflowTemplate};
use crate::errors::Error;
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, info};
use url::Url;

/// reqwest-backed client for the admin workflow routes.
#[derive(Debug, Clone)]
pub struct HttpPersistenceClient {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpPersistenceClient {
    /// Creates a client for a backend root such as `http://127.0.0.1:5000`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the save endpoint for a workflow
    pub fn edit_url(&self, id: &WorkflowId) -> Result<Url, Error> {
        Ok(self
            .base_url
            .join(&format!("admin/workflows/{}/edit", id))?)
    }

    fn workflow_url(&self, id: &WorkflowId) -> Result<Url, Error> {
        Ok(self.base_url.join(&format!("admin/workflows/{}", id))?)
    }

    fn list_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("admin/workflows")?)
    }
}

/// Turns a non-2xx response into an error carrying the backend's `error`
/// field, or the HTTP status when the body has none.
async fn failure(response: Response, action: &str) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.error)
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| status_message(action, status));
    debug!("{} failed with {}: {}", action, status, body);
    Error::RequestFailed(message)
}

fn status_message(action: &str, status: StatusCode) -> String {
    format!("{} failed: {}", action, status)
}

#[async_trait]
impl PersistenceClient for HttpPersistenceClient {
    async fn save_workflow(
        &self,
        id: &WorkflowId,
        request: &SaveRequest,
    ) -> Result<SaveResponse, Error> {
        let url = self.edit_url(id)?;
        debug!("Saving workflow {} to {}", id, url);

        let response = self.client.post(url.clone()).json(request).send().await?;
        let status = response.status();
        info!("POST {} -> status: {}", url, status);

        if !status.is_success() {
            return Err(failure(response, "Save").await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn fetch_workflow(&self, id: &WorkflowId) -> Result<WorkflowTemplate, Error> {
        let url = self.workflow_url(id)?;
        let response = self.client.get(url.clone()).send().await?;
        info!("GET {} -> status: {}", url, response.status());

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::WorkflowNotFound(id.to_string())),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(failure(response, "Fetch").await),
        }
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowTemplate>, Error> {
        let url = self.list_url()?;
        let response = self.client.get(url.clone()).send().await?;
        info!("GET {} -> status: {}", url, response.status());

        if !response.status().is_success() {
            return Err(failure(response, "List").await);
        }
        Ok(response.json().await?)
    }
}
