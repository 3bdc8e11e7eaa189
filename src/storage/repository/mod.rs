// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! using the DocumentStorage for all file operations.

pub mod labels;
pub mod notes;
pub mod reset_tokens;
pub mod users;

pub use labels::{LabelRepository, StoredLabel};
pub use notes::{NoteRepository, StoredNote};
pub use reset_tokens::{ResetTokenRepository, StoredResetToken, RESET_TOKEN_TTL_SECONDS};
pub use users::{StoredUser, UserRepository};
