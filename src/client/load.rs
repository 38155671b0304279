//! Bulk data loading across multiple resource paths

use super::DataLakeClient;
use crate::error::{Error, Result};
use crate::models::{DataResponse, Resource};
use chrono::{DateTime, Utc};
use reqwest::Response;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

impl DataLakeClient {
    /// Load decoded data for a set of resource paths over `[begin, end)`.
    ///
    /// All paths are resolved to catalog items in one batched call; each
    /// resolved resource is then streamed and decoded in turn. `on_progress`
    /// receives the cumulative fraction of resources completed, weighted
    /// evenly per resource rather than by data size.
    pub async fn load(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
        resource_paths: &[String],
        on_progress: Option<&(dyn Fn(f64) + Sync)>,
    ) -> Result<HashMap<String, DataResponse>> {
        let catalog_items = self.catalogs().search_catalog_items(resource_paths).await?;

        let mut result = HashMap::with_capacity(catalog_items.len());
        let mut progress = 0.0;

        for resource_path in resource_paths {
            let Some(catalog_item) = catalog_items.get(resource_path) else {
                continue;
            };

            let response = self.data().get_stream(resource_path, begin, end).await?;
            let values = read_as_f64(response).await?;

            let resource = &catalog_item.resource;

            result.insert(
                resource_path.clone(),
                DataResponse {
                    catalog_item: catalog_item.clone(),
                    name: resource.id.clone(),
                    unit: string_property(resource, "unit"),
                    description: string_property(resource, "description"),
                    sample_period: catalog_item.representation.sample_period,
                    values,
                },
            );

            progress += 1.0 / catalog_items.len() as f64;
            debug!(%resource_path, progress, "resource loaded");

            if let Some(on_progress) = on_progress {
                on_progress(progress);
            }
        }

        Ok(result)
    }
}

/// Look up an optional string-typed resource property.
fn string_property(resource: &Resource, key: &str) -> Option<String> {
    match resource.properties.as_ref()?.get(key) {
        Some(Value::String(value)) => Some(value.clone()),
        _ => None,
    }
}

/// Decode a raw data stream into 8-byte little-endian floating point values.
async fn read_as_f64(mut response: Response) -> Result<Vec<f64>> {
    let length = response.content_length().ok_or(Error::DataLengthUnknown)?;

    if length % 8 != 0 {
        return Err(Error::InvalidDataLength);
    }

    let mut buffer = Vec::with_capacity(length as usize);

    while let Some(chunk) = response.chunk().await? {
        buffer.extend_from_slice(&chunk);
    }

    if buffer.len() as u64 != length {
        return Err(Error::StreamEndedEarly);
    }

    let mut values = Vec::with_capacity(buffer.len() / 8);

    for element in buffer.chunks_exact(8) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(element);
        values.push(f64::from_le_bytes(bytes));
    }

    Ok(values)
}
