// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note repository for the document store.
//!
//! Each note is stored as a separate JSON file under `/data/notes/`.
//! Flag coupling is enforced here rather than in handlers: a note is
//! never both pinned and archived, and a trashed note is never pinned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::super::{DocumentStorage, StorageError, StorageResult};

/// Note stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct StoredNote {
    /// Unique note identifier (UUID)
    pub id: String,
    /// Owning user id
    pub user_id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub description: String,
    /// Pinned to the top of the listing
    pub is_pinned: bool,
    /// Moved out of the main listing
    pub is_archived: bool,
    /// Soft-deleted; permanently removed only by delete-forever
    pub is_trashed: bool,
    /// Label names attached to this note
    pub labels: Vec<String>,
    /// When the note was created
    pub created_at: DateTime<Utc>,
    /// When the note was last modified
    pub updated_at: DateTime<Utc>,
}

impl StoredNote {
    /// Build a fresh note owned by `user_id`.
    pub fn new(user_id: &str, title: &str, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            is_pinned: false,
            is_archived: false,
            is_trashed: false,
            labels: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository for note operations on the document store.
pub struct NoteRepository<'a> {
    storage: &'a DocumentStorage,
}

impl<'a> NoteRepository<'a> {
    /// Create a new NoteRepository.
    pub fn new(storage: &'a DocumentStorage) -> Self {
        Self { storage }
    }

    /// Check if a note exists.
    pub fn exists(&self, note_id: &str) -> bool {
        self.storage.exists(self.storage.paths().note(note_id))
    }

    /// Get a note by ID.
    pub fn get(&self, note_id: &str) -> StorageResult<StoredNote> {
        let path = self.storage.paths().note(note_id);
        if !self.storage.exists(&path) {
            return Err(StorageError::NotFound(format!("Note {note_id}")));
        }
        self.storage.read_json(path)
    }

    /// Get a note and verify it belongs to `user_id`.
    ///
    /// A note owned by someone else reads as not found, so the API never
    /// reveals other users' note ids.
    pub fn verify_owner(&self, note_id: &str, user_id: &str) -> StorageResult<StoredNote> {
        let note = self.get(note_id)?;
        if note.user_id != user_id {
            return Err(StorageError::NotFound(format!(
                "Note {note_id} not found for user"
            )));
        }
        Ok(note)
    }

    /// Create a new note.
    pub fn create(&self, note: &StoredNote) -> StorageResult<()> {
        let note_id = &note.id;

        if self.exists(note_id) {
            return Err(StorageError::AlreadyExists(format!("Note {note_id}")));
        }

        self.storage
            .write_json(self.storage.paths().note(note_id), note)
    }

    /// Update title, description and labels of an owned note.
    pub fn update_content(
        &self,
        note_id: &str,
        user_id: &str,
        title: &str,
        description: &str,
        labels: Vec<String>,
    ) -> StorageResult<StoredNote> {
        let mut note = self.verify_owner(note_id, user_id)?;
        note.title = title.to_string();
        note.description = description.to_string();
        note.labels = labels;
        note.updated_at = Utc::now();
        self.storage
            .write_json(self.storage.paths().note(note_id), &note)?;
        Ok(note)
    }

    /// Set the pinned flag. Pinning clears the archived flag.
    pub fn set_pinned(
        &self,
        note_id: &str,
        user_id: &str,
        pinned: bool,
    ) -> StorageResult<StoredNote> {
        let mut note = self.verify_owner(note_id, user_id)?;
        note.is_pinned = pinned;
        if pinned {
            note.is_archived = false;
        }
        note.updated_at = Utc::now();
        self.storage
            .write_json(self.storage.paths().note(note_id), &note)?;
        Ok(note)
    }

    /// Set the archived flag. Archiving clears the pinned flag.
    pub fn set_archived(
        &self,
        note_id: &str,
        user_id: &str,
        archived: bool,
    ) -> StorageResult<StoredNote> {
        let mut note = self.verify_owner(note_id, user_id)?;
        note.is_archived = archived;
        if archived {
            note.is_pinned = false;
        }
        note.updated_at = Utc::now();
        self.storage
            .write_json(self.storage.paths().note(note_id), &note)?;
        Ok(note)
    }

    /// Set the trashed flag. Trashing clears the pinned flag.
    pub fn set_trashed(
        &self,
        note_id: &str,
        user_id: &str,
        trashed: bool,
    ) -> StorageResult<StoredNote> {
        let mut note = self.verify_owner(note_id, user_id)?;
        note.is_trashed = trashed;
        if trashed {
            note.is_pinned = false;
        }
        note.updated_at = Utc::now();
        self.storage
            .write_json(self.storage.paths().note(note_id), &note)?;
        Ok(note)
    }

    /// Permanently delete an owned note.
    pub fn delete_forever(&self, note_id: &str, user_id: &str) -> StorageResult<()> {
        self.verify_owner(note_id, user_id)?;
        self.storage.delete(self.storage.paths().note(note_id))
    }

    /// List all notes owned by a user, unfiltered.
    ///
    /// This is the snapshot the listing cache stores; status filtering
    /// happens after retrieval.
    pub fn list_by_owner(&self, user_id: &str) -> StorageResult<Vec<StoredNote>> {
        let note_ids = self
            .storage
            .list_files(self.storage.paths().notes_dir(), "json")?;

        let mut notes = Vec::new();
        for id in note_ids {
            if let Ok(note) = self.get(&id) {
                if note.user_id == user_id {
                    notes.push(note);
                }
            }
        }

        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DocumentStorage, StoragePaths};
    use std::env;
    use std::fs;

    fn test_storage() -> DocumentStorage {
        let test_dir = env::temp_dir().join(format!("test-note-repo-{}", uuid::Uuid::new_v4()));
        let paths = StoragePaths::new(&test_dir);
        let mut storage = DocumentStorage::new(paths);
        storage.initialize().expect("Failed to initialize");
        storage
    }

    fn cleanup(storage: &DocumentStorage) {
        let _ = fs::remove_dir_all(storage.paths().root());
    }

    #[test]
    fn create_and_get_note() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-1", "Groceries", "milk, eggs");
        repo.create(&note).unwrap();

        let loaded = repo.get(&note.id).unwrap();
        assert_eq!(loaded.title, "Groceries");
        assert!(!loaded.is_pinned);
        assert!(!loaded.is_archived);
        assert!(!loaded.is_trashed);

        cleanup(&storage);
    }

    #[test]
    fn pin_clears_archived() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-1", "n", "d");
        repo.create(&note).unwrap();

        repo.set_archived(&note.id, "user-1", true).unwrap();
        let pinned = repo.set_pinned(&note.id, "user-1", true).unwrap();
        assert!(pinned.is_pinned);
        assert!(!pinned.is_archived);

        cleanup(&storage);
    }

    #[test]
    fn archive_clears_pinned() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-1", "n", "d");
        repo.create(&note).unwrap();

        repo.set_pinned(&note.id, "user-1", true).unwrap();
        let archived = repo.set_archived(&note.id, "user-1", true).unwrap();
        assert!(archived.is_archived);
        assert!(!archived.is_pinned);

        cleanup(&storage);
    }

    #[test]
    fn trash_clears_pinned() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-1", "n", "d");
        repo.create(&note).unwrap();

        repo.set_pinned(&note.id, "user-1", true).unwrap();
        let trashed = repo.set_trashed(&note.id, "user-1", true).unwrap();
        assert!(trashed.is_trashed);
        assert!(!trashed.is_pinned);

        cleanup(&storage);
    }

    #[test]
    fn verify_owner_rejects_wrong_user() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-owner", "n", "d");
        repo.create(&note).unwrap();

        assert!(repo.verify_owner(&note.id, "user-owner").is_ok());
        let result = repo.verify_owner(&note.id, "someone-else");
        assert!(matches!(result, Err(StorageError::NotFound(_))));

        cleanup(&storage);
    }

    #[test]
    fn list_by_owner_filters_correctly() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        for i in 1..=3 {
            repo.create(&StoredNote::new("user-a", &format!("a{i}"), "d"))
                .unwrap();
        }
        repo.create(&StoredNote::new("user-b", "b1", "d")).unwrap();

        assert_eq!(repo.list_by_owner("user-a").unwrap().len(), 3);
        assert_eq!(repo.list_by_owner("user-b").unwrap().len(), 1);

        cleanup(&storage);
    }

    #[test]
    fn delete_forever_removes_note() {
        let storage = test_storage();
        let repo = NoteRepository::new(&storage);

        let note = StoredNote::new("user-1", "n", "d");
        repo.create(&note).unwrap();

        repo.delete_forever(&note.id, "user-1").unwrap();
        assert!(!repo.exists(&note.id));

        cleanup(&storage);
    }
}
