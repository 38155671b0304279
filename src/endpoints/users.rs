//! Users endpoints: token exchange

use super::APPLICATION_JSON;
use crate::client::DataLakeClient;
use crate::error::Result;
use crate::models::{RefreshTokenRequest, TokenPair};
use reqwest::Method;

/// Typed client for the users endpoints.
pub struct UsersClient {
    client: DataLakeClient,
}

impl UsersClient {
    pub(crate) fn new(client: DataLakeClient) -> Self {
        Self { client }
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Refresh tokens are single-use; the returned pair carries the rotated
    /// successor.
    pub async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<TokenPair> {
        let body = serde_json::to_string(request)?;

        self.client
            .invoke(
                Method::POST,
                "/api/v1/users/refresh-token",
                Some(APPLICATION_JSON),
                Some(APPLICATION_JSON),
                Some(body),
            )
            .await
    }
}
