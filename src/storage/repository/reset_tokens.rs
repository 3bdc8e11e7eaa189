// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password-reset token repository.
//!
//! At most one token exists per user: tokens are stored keyed by user id,
//! and `save` replaces any previous token for that user in a single
//! rename. Expiry is enforced by the store itself — a lookup that finds an
//! expired row deletes it and reports absence, so callers cannot observe
//! an expired token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Lifetime of a reset token from issuance.
pub const RESET_TOKEN_TTL_SECONDS: i64 = 3600;

/// Reset token row stored in the document store.
///
/// Holds a one-way hash of the raw token, never the token itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredResetToken {
    /// Owning user id (also the storage key)
    pub user_id: String,
    /// SHA-256 hex digest of the raw token
    pub token_hash: String,
    /// When the token was issued
    pub created_at: DateTime<Utc>,
    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}

impl StoredResetToken {
    /// Build a fresh token row expiring [`RESET_TOKEN_TTL_SECONDS`] from now.
    pub fn issue_now(user_id: &str, token_hash: &str) -> Self {
        let created_at = Utc::now();
        Self {
            user_id: user_id.to_string(),
            token_hash: token_hash.to_string(),
            created_at,
            expires_at: created_at + Duration::seconds(RESET_TOKEN_TTL_SECONDS),
        }
    }

    /// Whether the row has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Repository for reset token operations on the document store.
pub struct ResetTokenRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> ResetTokenRepository<'a> {
    /// Create a new ResetTokenRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Save a token row, replacing any previous token for the same user.
    ///
    /// Keyed-by-user storage makes this an atomic upsert: there is no
    /// window in which two rows exist for one user.
    pub fn save(&self, token: &StoredResetToken) -> StorageResult<()> {
        self.storage
            .write_json(self.storage.paths().reset_token(&token.user_id), token)
    }

    /// Find the valid token for a user.
    ///
    /// An expired row is deleted on sight and reported as absent, so the
    /// caller sees expired and never-issued identically.
    pub fn find_valid(&self, user_id: &str) -> StorageResult<StoredResetToken> {
        let path = self.storage.paths().reset_token(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!(
                "Reset token for user {user_id}"
            )));
        }

        let token: StoredResetToken = self.storage.read_json(&path)?;
        if token.is_expired() {
            let _ = self.storage.delete(&path);
            return Err(StorageError::NotFound(format!(
                "Reset token for user {user_id}"
            )));
        }

        Ok(token)
    }

    /// Delete the token row for a user.
    pub fn delete(&self, user_id: &str) -> StorageResult<()> {
        let path = self.storage.paths().reset_token(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!(
                "Reset token for user {user_id}"
            )));
        }
        self.storage.delete(path)
    }
}
