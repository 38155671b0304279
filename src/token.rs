//! Credential storage and refresh-token persistence

use crate::error::Result;
use crate::models::TokenPair;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Thread-safe holder for the credential of one client instance.
///
/// The store only performs atomic replacement; serialization of concurrent
/// refresh attempts is the refresh lock's job, not the store's.
pub(crate) struct TokenStore {
    token_folder: PathBuf,
    pair: RwLock<Option<TokenPair>>,
    bearer: RwLock<Option<String>>,
    token_file: RwLock<Option<PathBuf>>,
}

impl TokenStore {
    pub(crate) fn new(token_folder: PathBuf) -> Self {
        Self {
            token_folder,
            pair: RwLock::new(None),
            bearer: RwLock::new(None),
            token_file: RwLock::new(None),
        }
    }

    /// Current token pair, if signed in with a refresh token.
    pub(crate) fn get(&self) -> Option<TokenPair> {
        self.pair
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current `Authorization` header value, if any.
    pub(crate) fn bearer(&self) -> Option<String> {
        self.bearer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.get().is_some() || self.bearer().is_some()
    }

    /// Install a fixed access token without refresh support.
    pub(crate) fn set_access_token(&self, access_token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) =
            Some(format!("Bearer {access_token}"));
    }

    /// Replace the credential and derive the bearer header from it.
    ///
    /// When a token file is armed the new refresh token is persisted; a
    /// failed write keeps the in-memory state intact.
    pub(crate) fn replace(&self, pair: TokenPair) {
        self.persist_refresh_token(&pair.refresh_token);

        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) =
            Some(format!("Bearer {}", pair.access_token));
        *self.pair.write().unwrap_or_else(PoisonError::into_inner) = Some(pair);
    }

    /// Clear the in-memory credential and bearer header.
    ///
    /// An armed token file stays on disk for future sessions.
    pub(crate) fn clear(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
        *self.pair.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Resolve the refresh token to actually redeem this session.
    ///
    /// A prior session may already have rotated the presented token; in that
    /// case the rotated value persisted on disk is used instead. Arms the
    /// token file so later rotations are persisted to the same place.
    pub(crate) fn resolve_rotated(&self, presented: &str) -> Result<String> {
        let token_file = self
            .token_folder
            .join(format!("{}.json", token_hash(presented)));

        let actual = if token_file.exists() {
            debug!(?token_file, "using rotated refresh token from disk");
            std::fs::read_to_string(&token_file)?
        } else {
            std::fs::create_dir_all(&self.token_folder)?;
            std::fs::write(&token_file, presented)?;
            presented.to_owned()
        };

        *self
            .token_file
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(token_file);

        Ok(actual)
    }

    fn persist_refresh_token(&self, refresh_token: &str) {
        let Some(path) = self
            .token_file
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        else {
            return;
        };

        if let Err(error) = std::fs::create_dir_all(&self.token_folder)
            .and_then(|()| std::fs::write(&path, refresh_token))
        {
            warn!(%error, ?path, "failed to persist rotated refresh token");
        }
    }
}

fn token_hash(refresh_token: &str) -> String {
    format!("{:x}", Sha256::digest(refresh_token.as_bytes()))
}
