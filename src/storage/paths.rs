// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the document store layout.

use std::path::{Path, PathBuf};

/// Base directory for all persistent storage.
pub const DATA_ROOT: &str = "/data";

/// Storage path utilities for the document store.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== User Paths ==========

    /// Directory containing all user records.
    pub fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Path to a specific user record.
    pub fn user(&self, user_id: &str) -> PathBuf {
        self.users_dir().join(format!("{user_id}.json"))
    }

    // ========== Reset Token Paths ==========

    /// Directory containing all password-reset tokens.
    pub fn reset_tokens_dir(&self) -> PathBuf {
        self.root.join("reset_tokens")
    }

    /// Path to the reset token for a user.
    ///
    /// Tokens are keyed by user id, so writing this path replaces any
    /// previous token for the same user in one step.
    pub fn reset_token(&self, user_id: &str) -> PathBuf {
        self.reset_tokens_dir().join(format!("{user_id}.json"))
    }

    // ========== Note Paths ==========

    /// Directory containing all notes.
    pub fn notes_dir(&self) -> PathBuf {
        self.root.join("notes")
    }

    /// Path to a specific note file.
    pub fn note(&self, note_id: &str) -> PathBuf {
        self.notes_dir().join(format!("{note_id}.json"))
    }

    // ========== Label Paths ==========

    /// Directory containing all labels.
    pub fn labels_dir(&self) -> PathBuf {
        self.root.join("labels")
    }

    /// Path to a specific label file.
    pub fn label(&self, label_id: &str) -> PathBuf {
        self.labels_dir().join(format!("{label_id}.json"))
    }
}
