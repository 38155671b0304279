//! High-level data lake client (decomposed into focused submodules)

mod auth;
mod export;
mod invoke;
mod load;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;

use crate::config::ClientConfig;
use crate::endpoints::{ArtifactsClient, CatalogsClient, DataClient, JobsClient, UsersClient};
use crate::error::Result;
use crate::token::TokenStore;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) store: TokenStore,
    pub(crate) refresh_lock: Mutex<()>,
    configuration_header: RwLock<Option<String>>,
}

/// A client for a data lake server.
///
/// Cloning is cheap and clones share all state: a token refresh performed
/// through one clone is visible to every in-flight request of the others.
#[derive(Clone)]
pub struct DataLakeClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl DataLakeClient {
    /// Create a client with its own HTTP transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Create a client on top of an existing HTTP transport.
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        let store = TokenStore::new(config.token_folder.clone());

        Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                store,
                refresh_lock: Mutex::new(()),
                configuration_header: RwLock::new(None),
            }),
        }
    }

    /// Typed access to the users endpoints.
    pub fn users(&self) -> UsersClient {
        UsersClient::new(self.clone())
    }

    /// Typed access to the catalogs endpoints.
    pub fn catalogs(&self) -> CatalogsClient {
        CatalogsClient::new(self.clone())
    }

    /// Typed access to the data endpoints.
    pub fn data(&self) -> DataClient {
        DataClient::new(self.clone())
    }

    /// Typed access to the jobs endpoints.
    pub fn jobs(&self) -> JobsClient {
        JobsClient::new(self.clone())
    }

    /// Typed access to the artifacts endpoints.
    pub fn artifacts(&self) -> ArtifactsClient {
        ArtifactsClient::new(self.clone())
    }

    /// Attach configuration data to all subsequent requests.
    ///
    /// The data is serialized to JSON, base64-encoded and carried in the
    /// configured request header. Returns a guard; dropping it restores the
    /// no-configuration state on every exit path.
    pub fn attach_configuration<T: Serialize>(&self, configuration: &T) -> Result<ConfigurationGuard> {
        let encoded = BASE64.encode(serde_json::to_vec(configuration)?);

        *self
            .inner
            .configuration_header
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(encoded);

        Ok(ConfigurationGuard {
            client: self.clone(),
        })
    }

    /// Clear configuration data for all subsequent requests.
    pub fn clear_configuration(&self) {
        *self
            .inner
            .configuration_header
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub(crate) fn configuration_header_value(&self) -> Option<String> {
        self.inner
            .configuration_header
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Guard returned by [`DataLakeClient::attach_configuration`].
///
/// Dropping the guard clears the attached configuration.
pub struct ConfigurationGuard {
    client: DataLakeClient,
}

impl Drop for ConfigurationGuard {
    fn drop(&mut self) {
        self.client.clear_configuration();
    }
}
