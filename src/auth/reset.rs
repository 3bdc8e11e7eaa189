// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password-reset token lifecycle.
//!
//! A reset token moves through `none -> issued -> (consumed | expired)`.
//! `issued` is the only non-terminal state: consumption requires a raw
//! token whose SHA-256 digest matches the stored row, and a failed match
//! leaves the row in place so the holder can retry until the store's TTL
//! evicts it. Issuing a new token replaces any outstanding one, so at
//! most one token exists per user at any time.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{error, info};

use crate::auth::{hash_password, AuthError};
use crate::error::ApiError;
use crate::storage::{
    DocumentStorage, ResetTokenRepository, StorageError, StoredResetToken, StoredUser,
    UserRepository,
};

/// Bytes of entropy in a raw reset token (256 bits).
const RESET_TOKEN_BYTES: usize = 32;

/// Outcome of issuing a reset token.
#[derive(Debug, Clone)]
pub struct IssuedReset {
    /// The user the token was issued for.
    pub user: StoredUser,
    /// Raw token, hex-encoded. Only ever leaves the service inside the
    /// emailed link; the store holds its digest.
    pub raw_token: String,
    /// When the token stops being valid.
    pub expires_at: DateTime<Utc>,
    /// Link embedding the raw token, for the reset email.
    pub link: String,
}

/// Failures of the reset flow.
///
/// `UserNotFound` and `InvalidOrExpiredToken` are expected, user-visible
/// conditions; `Store` covers infrastructure faults only. The token
/// message deliberately does not distinguish expired from never-issued.
#[derive(Debug, Error)]
pub enum ResetFlowError {
    #[error("User does not exist")]
    UserNotFound,
    #[error("Invalid or expired password reset token")]
    InvalidOrExpiredToken,
    #[error("storage failure: {0}")]
    Store(StorageError),
    #[error(transparent)]
    Hash(#[from] AuthError),
}

impl From<ResetFlowError> for ApiError {
    fn from(err: ResetFlowError) -> Self {
        match err {
            ResetFlowError::UserNotFound => ApiError::not_found("User does not exist"),
            ResetFlowError::InvalidOrExpiredToken => {
                ApiError::unprocessable("Invalid or expired password reset token")
            }
            ResetFlowError::Store(e) => {
                error!(error = %e, "storage failure during password reset");
                ApiError::internal()
            }
            ResetFlowError::Hash(e) => {
                error!(error = %e, "hashing failure during password reset");
                ApiError::internal()
            }
        }
    }
}

/// Manager for issuing, validating and retiring password-reset tokens.
///
/// Constructed with its store dependency injected; holds no ambient
/// state beyond the client URL used to build reset links.
pub struct PasswordResetManager {
    storage: Arc<DocumentStorage>,
    client_url: String,
}

impl PasswordResetManager {
    /// Create a new manager.
    pub fn new(storage: Arc<DocumentStorage>, client_url: impl Into<String>) -> Self {
        Self {
            storage,
            client_url: client_url.into(),
        }
    }

    /// Start a password reset for the account behind `email`.
    ///
    /// Generates a fresh 256-bit token, stores its digest with a one-hour
    /// expiry (replacing any outstanding token for the user), and returns
    /// the raw token for the emailed link. Sending the email is the
    /// caller's responsibility and must never fail this step.
    pub fn request_reset(&self, email: &str) -> Result<IssuedReset, ResetFlowError> {
        let users = UserRepository::new(&self.storage);
        let user = match users.find_by_email(email) {
            Ok(user) => user,
            Err(StorageError::NotFound(_)) => return Err(ResetFlowError::UserNotFound),
            Err(e) => return Err(ResetFlowError::Store(e)),
        };

        let mut token_bytes = [0u8; RESET_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let raw_token = hex::encode(token_bytes);
        let token_hash = digest_token(&raw_token);

        let row = StoredResetToken::issue_now(&user.id, &token_hash);
        let expires_at = row.expires_at;

        // Keyed-by-user save: replaces any prior token in one step.
        ResetTokenRepository::new(&self.storage)
            .save(&row)
            .map_err(ResetFlowError::Store)?;

        let link = format!(
            "{}/password-reset?token={raw_token}&id={}",
            self.client_url, user.id
        );

        info!(user_id = %user.id, "issued password reset token");

        Ok(IssuedReset {
            user,
            raw_token,
            expires_at,
            link,
        })
    }

    /// Check a raw token against the stored row for `user_id`.
    ///
    /// Absent, expired and mismatched tokens all surface the same
    /// `InvalidOrExpiredToken`. A mismatch does NOT delete the row; the
    /// holder may retry until the TTL evicts it.
    pub fn validate(&self, user_id: &str, raw_token: &str) -> Result<(), ResetFlowError> {
        let tokens = ResetTokenRepository::new(&self.storage);
        let row = match tokens.find_valid(user_id) {
            Ok(row) => row,
            Err(StorageError::NotFound(_)) => return Err(ResetFlowError::InvalidOrExpiredToken),
            Err(e) => return Err(ResetFlowError::Store(e)),
        };

        if digest_token(raw_token) != row.token_hash {
            return Err(ResetFlowError::InvalidOrExpiredToken);
        }

        Ok(())
    }

    /// Complete a password reset: validate the token, apply the new
    /// password, then retire the token.
    ///
    /// The three steps are independent writes, sequenced by convention.
    /// If the token delete fails after the password update succeeded, the
    /// residual row is logged and left for TTL eviction; the reset itself
    /// still reports success.
    pub fn complete_reset(
        &self,
        user_id: &str,
        raw_token: &str,
        new_password: &str,
    ) -> Result<StoredUser, ResetFlowError> {
        self.validate(user_id, raw_token)?;

        let users = UserRepository::new(&self.storage);
        let password_hash = hash_password(new_password)?;

        match users.update_password(user_id, &password_hash) {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => return Err(ResetFlowError::UserNotFound),
            Err(e) => return Err(ResetFlowError::Store(e)),
        }

        // Post-update lookup confirms the record is still readable.
        let user = match users.get(user_id) {
            Ok(user) => user,
            Err(StorageError::NotFound(_)) => return Err(ResetFlowError::UserNotFound),
            Err(e) => return Err(ResetFlowError::Store(e)),
        };

        if let Err(e) = ResetTokenRepository::new(&self.storage).delete(user_id) {
            // Residual row; harmless once the TTL evicts it.
            error!(user_id, error = %e, "failed to delete consumed reset token");
        }

        info!(user_id, "password reset completed");

        Ok(user)
    }
}

/// One-way digest of a raw token for at-rest storage and comparison.
fn digest_token(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoragePaths;
    use chrono::Duration;
    use std::env;
    use std::fs;

    fn test_storage() -> Arc<DocumentStorage> {
        let test_dir = env::temp_dir().join(format!("test-reset-mgr-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize");
        Arc::new(storage)
    }

    fn cleanup(storage: &DocumentStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    fn seed_user(storage: &DocumentStorage, id: &str, email: &str) -> StoredUser {
        let user = StoredUser {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone_number: None,
            password_hash: hash_password("Original-1!").unwrap(),
            created_at: Utc::now(),
        };
        UserRepository::new(storage).create(&user).unwrap();
        user
    }

    #[test]
    fn request_reset_unknown_email_fails() {
        let storage = test_storage();
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let result = manager.request_reset("nobody@example.com");
        assert!(matches!(result, Err(ResetFlowError::UserNotFound)));

        cleanup(&storage);
    }

    #[test]
    fn issued_token_is_stored_hashed_and_linked() {
        let storage = test_storage();
        seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let issued = manager.request_reset("ada@example.com").unwrap();
        assert_eq!(issued.raw_token.len(), 64); // 32 bytes hex-encoded
        assert!(issued.link.contains(&issued.raw_token));
        assert!(issued.link.contains("id=u-1"));

        let row = ResetTokenRepository::new(&storage).find_valid("u-1").unwrap();
        assert_ne!(row.token_hash, issued.raw_token);
        assert_eq!(row.token_hash, digest_token(&issued.raw_token));

        cleanup(&storage);
    }

    #[test]
    fn reissue_replaces_outstanding_token() {
        let storage = test_storage();
        seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let first = manager.request_reset("ada@example.com").unwrap();
        let second = manager.request_reset("ada@example.com").unwrap();

        // The first token no longer validates; only the newest row exists.
        assert!(matches!(
            manager.validate("u-1", &first.raw_token),
            Err(ResetFlowError::InvalidOrExpiredToken)
        ));
        assert!(manager.validate("u-1", &second.raw_token).is_ok());

        let files = storage
            .list_files(storage.paths().reset_tokens_dir(), "json")
            .unwrap();
        assert_eq!(files.len(), 1);

        cleanup(&storage);
    }

    #[test]
    fn mismatch_does_not_consume_the_token() {
        let storage = test_storage();
        seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let issued = manager.request_reset("ada@example.com").unwrap();

        assert!(matches!(
            manager.validate("u-1", "wrong-token"),
            Err(ResetFlowError::InvalidOrExpiredToken)
        ));
        // Retry with the real token still succeeds.
        assert!(manager.validate("u-1", &issued.raw_token).is_ok());

        cleanup(&storage);
    }

    #[test]
    fn complete_reset_changes_password_and_is_single_use() {
        let storage = test_storage();
        let user = seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let issued = manager.request_reset("ada@example.com").unwrap();
        let updated = manager
            .complete_reset("u-1", &issued.raw_token, "NewPass1!")
            .unwrap();

        assert_ne!(updated.password_hash, user.password_hash);
        assert!(crate::auth::verify_password("NewPass1!", &updated.password_hash).unwrap());

        // Second consumption of the same token fails.
        assert!(matches!(
            manager.complete_reset("u-1", &issued.raw_token, "Another1!"),
            Err(ResetFlowError::InvalidOrExpiredToken)
        ));

        cleanup(&storage);
    }

    #[test]
    fn wrong_token_leaves_password_unchanged() {
        let storage = test_storage();
        let user = seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        manager.request_reset("ada@example.com").unwrap();
        let result = manager.complete_reset("u-1", "wrong-token", "NewPass1!");
        assert!(matches!(result, Err(ResetFlowError::InvalidOrExpiredToken)));

        let stored = UserRepository::new(&storage).get("u-1").unwrap();
        assert_eq!(stored.password_hash, user.password_hash);

        cleanup(&storage);
    }

    #[test]
    fn expired_token_behaves_like_never_issued() {
        let storage = test_storage();
        seed_user(&storage, "u-1", "ada@example.com");
        let manager = PasswordResetManager::new(storage.clone(), "https://notes.test");

        let issued = manager.request_reset("ada@example.com").unwrap();

        // Age the row past its expiry.
        let tokens = ResetTokenRepository::new(&storage);
        let mut row = tokens.find_valid("u-1").unwrap();
        row.expires_at = Utc::now() - Duration::seconds(1);
        tokens.save(&row).unwrap();

        assert!(matches!(
            manager.validate("u-1", &issued.raw_token),
            Err(ResetFlowError::InvalidOrExpiredToken)
        ));

        cleanup(&storage);
    }
}
