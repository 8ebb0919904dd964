//! The remote authority boundary.
//!
//! `Authority` is the sole seam between the console core and the server
//! side; the core depends on this trait, never on a concrete transport.
//! `HttpAuthority` is the production implementation. Tests substitute an
//! in-memory implementation and never open a socket.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::{ConsoleError, Result};
use crate::proto::{Envelope, SessionStatus, Topology};

/// Remote authority the console mirrors and mutates.
#[async_trait]
pub trait Authority: Send + Sync {
    /// Current session identity as the authority sees it.
    async fn session_status(&self) -> Result<SessionStatus>;

    /// The full topology tree.
    async fn fetch_topology(&self) -> Result<Topology>;

    /// Names of the action files available on the authority.
    async fn action_files(&self) -> Result<Vec<String>>;

    /// Apply one mutation. The response body is ignored; consistency is
    /// re-established by refetching the topology afterwards.
    async fn mutate(&self, envelope: &Envelope) -> Result<()>;
}

/// The topology endpoint wraps its payload in a JSON string field.
#[derive(Deserialize)]
struct TopologyPayload {
    topo: String,
}

/// So does the action file list endpoint.
#[derive(Deserialize)]
struct ActionFilesPayload {
    files: String,
}

/// `Authority` over HTTP, using the paths from `ConsoleConfig`.
pub struct HttpAuthority {
    client: reqwest::Client,
    base_url: String,
    session_url: String,
    topology_url: String,
    actions_url: String,
    mutation_url: String,
}

impl HttpAuthority {
    pub fn new(config: &ConsoleConfig) -> Self {
        let join = |path: &str| {
            let mut url = format!("{}{}", config.base_url, path);
            if let Some(key) = &config.api_key {
                url.push_str("?key=");
                url.push_str(key);
            }
            url
        };
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            session_url: join(&config.session_path),
            topology_url: join(&config.topology_path),
            actions_url: join(&config.actions_path),
            mutation_url: join(&config.mutation_path),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ConsoleError::transport(format!(
                "authority returned {} for {url}",
                response.status()
            )));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    async fn session_status(&self) -> Result<SessionStatus> {
        self.get_json(&self.session_url).await
    }

    async fn fetch_topology(&self) -> Result<Topology> {
        let payload: TopologyPayload = self.get_json(&self.topology_url).await?;
        Ok(serde_json::from_str(&payload.topo)?)
    }

    async fn action_files(&self) -> Result<Vec<String>> {
        let payload: ActionFilesPayload = self.get_json(&self.actions_url).await?;
        Ok(serde_json::from_str(&payload.files)?)
    }

    async fn mutate(&self, envelope: &Envelope) -> Result<()> {
        debug!(op = envelope.op.verb(), subject = envelope.subject.noun(), "posting mutation");
        let response = self
            .client
            .post(&self.mutation_url)
            .json(envelope)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ConsoleError::transport(format!(
                "mutation rejected with {}",
                response.status()
            )));
        }
        Ok(())
    }
}
