//! Credential lifecycle: sign-in, refresh coordination, sign-out

use super::DataLakeClient;
use crate::error::Result;
use crate::models::RefreshTokenRequest;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info};

impl DataLakeClient {
    /// Sign in with a refresh token.
    ///
    /// If a prior session already rotated the presented token, the rotated
    /// value persisted on disk is redeemed instead; otherwise the presented
    /// token is persisted first. The initial token exchange runs afterwards.
    pub async fn sign_in(&self, refresh_token: &str) -> Result<()> {
        let actual = self.inner.store.resolve_rotated(refresh_token)?;
        self.refresh(&actual).await?;

        info!("signed in");
        Ok(())
    }

    /// Sign in with a fixed access token.
    ///
    /// No refresh or rotation is performed; once the token expires, requests
    /// fail until a new token is installed.
    pub fn sign_in_with_access_token(&self, access_token: &str) {
        self.inner.store.set_access_token(access_token);
    }

    /// Whether a credential is currently installed.
    pub fn is_authenticated(&self) -> bool {
        self.inner.store.is_authenticated()
    }

    /// Clear the bearer header and the in-memory credential.
    ///
    /// The persisted token file is kept so a later session can resume.
    pub fn sign_out(&self) {
        self.inner.store.clear();
    }

    /// Exchange `refresh_token` for a new token pair.
    ///
    /// Concurrent refresh attempts serialize on one lock. Once inside, a
    /// presented token that no longer matches the stored one was already
    /// redeemed by another caller, so the call is a no-op (the authorization
    /// server rejects replayed refresh tokens).
    pub(crate) fn refresh<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let _guard = self.inner.refresh_lock.lock().await;

            if let Some(pair) = self.inner.store.get() {
                if pair.refresh_token != refresh_token {
                    debug!("refresh token already rotated, skipping exchange");
                    return Ok(());
                }
            }

            let request = RefreshTokenRequest {
                refresh_token: refresh_token.to_owned(),
            };
            let pair = self.users().refresh_token(&request).await?;

            self.inner.store.replace(pair);

            debug!("token pair rotated");
            Ok(())
        })
    }
}
