// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository for the document store.
//!
//! Each user is stored as a separate JSON file under `/data/users/`.
//! Emails are unique across the store; lookups by email scan the
//! directory, which is acceptable at this service's scale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// User record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredUser {
    /// Unique user identifier (UUID)
    pub id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address (unique)
    pub email: String,
    /// Phone number, if provided at registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Argon2 PHC-format password hash (never exposed via API)
    pub password_hash: String,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}

/// Repository for user operations on the document store.
pub struct UserRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a user exists.
    pub fn exists(&self, user_id: &str) -> bool {
        self.storage.exists(self.storage.paths().user(user_id))
    }

    /// Get a user by ID.
    pub fn get(&self, user_id: &str) -> StorageResult<StoredUser> {
        let path = self.storage.paths().user(user_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.read_json(path)
    }

    /// Find a user by email address.
    pub fn find_by_email(&self, email: &str) -> StorageResult<StoredUser> {
        let user_ids = self
            .storage
            .list_files(self.storage.paths().users_dir(), "json")?;

        for id in user_ids {
            if let Ok(user) = self.get(&id) {
                if user.email == email {
                    return Ok(user);
                }
            }
        }

        Err(StorageError::NotFound(format!("User with email {email}")))
    }

    /// Create a new user.
    ///
    /// Rejects a duplicate id or a duplicate email.
    pub fn create(&self, user: &StoredUser) -> StorageResult<()> {
        let user_id = &user.id;

        if self.exists(user_id) {
            return Err(StorageError::AlreadyExists(format!("User {user_id}")));
        }

        if self.find_by_email(&user.email).is_ok() {
            return Err(StorageError::AlreadyExists(format!(
                "User with email {}",
                user.email
            )));
        }

        self.storage
            .write_json(self.storage.paths().user(user_id), user)
    }

    /// Replace the stored password hash for a user.
    pub fn update_password(&self, user_id: &str, password_hash: &str) -> StorageResult<()> {
        let mut user = self.get(user_id)?;
        user.password_hash = password_hash.to_string();
        self.storage
            .write_json(self.storage.paths().user(user_id), &user)
    }

    /// Delete a user. Test cleanup only; not routed through the API.
    pub fn delete(&self, user_id: &str) -> StorageResult<()> {
        if !self.exists(user_id) {
            return Err(StorageError::NotFound(format!("User {user_id}")));
        }
        self.storage.delete(self.storage.paths().user(user_id))
    }
}
