// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! Persistent storage as one JSON file per entity under a data root,
//! plus the in-process listing cache that fronts list-style reads.
//!
//! ## Storage Layout
//!
//! ```text
//! /data/
//!   users/
//!     {user_id}.json
//!   reset_tokens/
//!     {user_id}.json       # keyed by user: at most one token per user
//!   notes/
//!     {note_id}.json
//!   labels/
//!     {label_id}.json
//! ```
//!
//! ## Consistency Notes
//!
//! - Writes are temp-file-then-rename, so a key never holds a partial
//!   document and a replace is a single step.
//! - The listing cache is read-through with write-invalidate; staleness
//!   is bounded by the most recent invalidation plus the 60 s TTL of any
//!   later repopulation.

pub mod cache;
pub mod document_fs;
pub mod paths;
pub mod repository;

pub use cache::{ListingCache, LISTING_TTL};
pub use document_fs::{DocumentStorage, StorageError, StorageResult};
pub use paths::StoragePaths;
pub use repository::{
    LabelRepository, NoteRepository, ResetTokenRepository, StoredLabel, StoredNote,
    StoredResetToken, StoredUser, UserRepository, RESET_TOKEN_TTL_SECONDS,
};
