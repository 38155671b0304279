//! Authenticated request invocation with one-shot re-authentication

use super::DataLakeClient;
use crate::error::{Error, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Marker in the `WWW-Authenticate` challenge that identifies an expired
/// access token, as opposed to an otherwise rejected one.
const TOKEN_EXPIRED_MARKER: &str = "The token expired at";

impl DataLakeClient {
    /// Send a request and decode the JSON response body into `T`.
    pub(crate) async fn invoke<T: DeserializeOwned>(
        &self,
        method: Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<String>,
    ) -> Result<T> {
        let response = self
            .send_with_reauth(&method, relative_url, accept, content_type, body.as_deref())
            .await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Error::Deserialize)
    }

    /// Send a request and discard the response body.
    pub(crate) async fn invoke_unit(
        &self,
        method: Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<String>,
    ) -> Result<()> {
        self.send_with_reauth(&method, relative_url, accept, content_type, body.as_deref())
            .await?;

        Ok(())
    }

    /// Send a request and hand the raw response back unconsumed.
    ///
    /// The caller owns the response and its body stream from then on.
    pub(crate) async fn invoke_raw(
        &self,
        method: Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<String>,
    ) -> Result<Response> {
        self.send_with_reauth(&method, relative_url, accept, content_type, body.as_deref())
            .await
    }

    /// Send one request. On an expiry-challenged 401 with a stored credential,
    /// refresh once and resend once; a failed refresh or failed resend signs
    /// out and surfaces the original failure.
    async fn send_with_reauth(
        &self,
        method: &Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Response> {
        let request = self.build_request(method, relative_url, accept, content_type, body)?;
        let response = self.inner.http.execute(request).await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let challenge = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        let message = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            if let Some(pair) = self.inner.store.get() {
                if challenge.contains(TOKEN_EXPIRED_MARKER) {
                    let retried = self
                        .try_reauthenticated_retry(
                            &pair.refresh_token,
                            method,
                            relative_url,
                            accept,
                            content_type,
                            body,
                        )
                        .await;

                    if let Some(retry_response) = retried {
                        return Ok(retry_response);
                    }
                }

                self.sign_out();
            }
        }

        Err(Error::request(status, &message))
    }

    /// Best-effort refresh-and-resend. Returns the retry response only when
    /// both the refresh and the resent request succeed; every failure on this
    /// path is swallowed so the original failure stays authoritative.
    async fn try_reauthenticated_retry(
        &self,
        refresh_token: &str,
        method: &Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Option<Response> {
        // boxed: the token exchange goes through the invoker itself
        let refresh = self.refresh(refresh_token);

        if let Err(error) = refresh.await {
            debug!(%error, "token refresh failed, keeping original failure");
            return None;
        }

        let request = match self.build_request(method, relative_url, accept, content_type, body) {
            Ok(request) => request,
            Err(error) => {
                debug!(%error, "failed to rebuild request after refresh");
                return None;
            }
        };

        match self.inner.http.execute(request).await {
            Ok(response) if response.status().is_success() => Some(response),
            Ok(response) => {
                debug!(status = %response.status(), "retry after refresh failed, keeping original failure");
                None
            }
            Err(error) => {
                debug!(%error, "retry after refresh failed, keeping original failure");
                None
            }
        }
    }

    /// Build a request against the configured base URL, carrying the current
    /// bearer header and attached configuration, if any.
    ///
    /// The bearer is read without locking; a stale value simply triggers the
    /// 401 retry path.
    fn build_request(
        &self,
        method: &Method,
        relative_url: &str,
        accept: Option<&str>,
        content_type: Option<&str>,
        body: Option<&str>,
    ) -> Result<Request> {
        let url = self.inner.config.base_url.join(relative_url)?;
        let mut builder = self.inner.http.request(method.clone(), url);

        if let Some(bearer) = self.inner.store.bearer() {
            builder = builder.header(AUTHORIZATION, bearer);
        }

        if let Some(configuration) = self.configuration_header_value() {
            builder = builder.header(
                self.inner.config.configuration_header.as_str(),
                configuration,
            );
        }

        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }

        if let Some(body) = body {
            if let Some(content_type) = content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }

            builder = builder.body(body.to_owned());
        }

        Ok(builder.build()?)
    }
}
