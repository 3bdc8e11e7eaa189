// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Label repository for the document store.
//!
//! Each label is stored as a separate JSON file under `/data/labels/`.
//! A label either belongs to one note or is global (`note_id = None`).
//! Labels are soft-deleted via `is_active`; nothing here removes files.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Label stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredLabel {
    /// Unique label identifier (UUID)
    pub id: String,
    /// Note this label is attached to; `None` for a global label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// Label text
    pub label_name: String,
    /// Soft-delete flag
    pub is_active: bool,
    /// When the label was created
    pub created_at: DateTime<Utc>,
}

impl StoredLabel {
    /// Build a fresh active label.
    pub fn new(note_id: Option<&str>, label_name: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            note_id: note_id.map(str::to_string),
            label_name: label_name.to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// Repository for label operations on the document store.
pub struct LabelRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> LabelRepository<'a> {
    /// Create a new LabelRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a label exists.
    pub fn exists(&self, label_id: &str) -> bool {
        self.storage.exists(self.storage.paths().label(label_id))
    }

    /// Get a label by ID.
    pub fn get(&self, label_id: &str) -> StorageResult<StoredLabel> {
        let path = self.storage.paths().label(label_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Label {label_id}")));
        }
        self.storage.read_json(path)
    }

    /// Create a new label.
    pub fn create(&self, label: &StoredLabel) -> StorageResult<()> {
        let label_id = &label.id;

        if self.exists(label_id) {
            return Err(StorageError::AlreadyExists(format!("Label {label_id}")));
        }

        self.storage
            .write_json(self.storage.paths().label(label_id), label)
    }

    /// Rename a label and/or flip its soft-delete flag.
    pub fn update(
        &self,
        label_id: &str,
        label_name: &str,
        is_active: bool,
    ) -> StorageResult<StoredLabel> {
        let mut label = self.get(label_id)?;
        label.label_name = label_name.to_string();
        label.is_active = is_active;
        self.storage
            .write_json(self.storage.paths().label(label_id), &label)?;
        Ok(label)
    }

    /// List all labels for a note, or all global labels when `note_id` is
    /// `None`. Unfiltered; callers drop inactive labels after retrieval.
    pub fn list_for_scope(&self, note_id: Option<&str>) -> StorageResult<Vec<StoredLabel>> {
        let label_ids = self
            .storage
            .list_files(self.storage.paths().labels_dir(), "json")?;

        let mut labels = Vec::new();
        for id in label_ids {
            if let Ok(label) = self.get(&id) {
                if label.note_id.as_deref() == note_id {
                    labels.push(label);
                }
            }
        }

        Ok(labels)
    }

    /// List every label regardless of scope.
    pub fn list_all(&self) -> StorageResult<Vec<StoredLabel>> {
        let label_ids = self
            .storage
            .list_files(self.storage.paths().labels_dir(), "json")?;

        let mut labels = Vec::new();
        for id in label_ids {
            if let Ok(label) = self.get(&id) {
                labels.push(label);
            }
        }

        Ok(labels)
    }
}
