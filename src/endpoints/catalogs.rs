//! Catalogs endpoints: resource path resolution

use super::APPLICATION_JSON;
use crate::client::DataLakeClient;
use crate::error::Result;
use crate::models::CatalogItem;
use reqwest::Method;
use std::collections::HashMap;

/// Typed client for the catalogs endpoints.
pub struct CatalogsClient {
    client: DataLakeClient,
}

impl CatalogsClient {
    pub(crate) fn new(client: DataLakeClient) -> Self {
        Self { client }
    }

    /// Resolve a batch of resource paths to catalog items.
    ///
    /// Unknown paths are absent from the returned map.
    pub async fn search_catalog_items(
        &self,
        resource_paths: &[String],
    ) -> Result<HashMap<String, CatalogItem>> {
        let body = serde_json::to_string(resource_paths)?;

        self.client
            .invoke(
                Method::POST,
                "/api/v1/catalogs/search-items",
                Some(APPLICATION_JSON),
                Some(APPLICATION_JSON),
                Some(body),
            )
            .await
    }
}
