// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! Stored entities ([`crate::storage::StoredNote`],
//! [`crate::storage::StoredLabel`]) are returned directly where they
//! contain nothing secret; the user record is mapped through
//! [`UserResponse`] so the password hash never serializes out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::StoredUser;

// =============================================================================
// Account Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (unique across the service).
    pub email: String,
    /// Phone number (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Plaintext password; hashed before storage, never persisted raw.
    pub password: String,
}

/// Public view of a user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    /// Unique user identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Request to log in.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Response carrying a session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed session JWT, valid for one hour.
    pub token: String,
}

// =============================================================================
// Password Reset Models
// =============================================================================

/// Request to start a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email of the account to reset.
    pub email: String,
}

/// Response to a forgot-password request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordResponse {
    /// Confirmation message.
    pub message: String,
    /// The reset link that was mailed to the account address.
    pub link: String,
}

/// Request to complete a password reset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// Id of the user resetting their password.
    pub user_id: String,
    /// Raw reset token from the emailed link.
    pub token: String,
    /// Replacement password.
    pub new_password: String,
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Note Models
// =============================================================================

/// Request to create a note.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title.
    pub title: String,
    /// Note body.
    pub description: String,
}

/// Request to update a note's content.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Updated title.
    pub title: String,
    /// Updated body.
    pub description: String,
    /// Updated label names (full replacement).
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Request to flip one of a note's lifecycle flags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetFlagRequest {
    /// Desired flag value.
    pub enabled: bool,
}

/// Status filter applied to a note listing after cache retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteStatusFilter {
    /// The full listing, unfiltered.
    #[default]
    All,
    /// Only trashed notes.
    Trash,
    /// Only archived notes.
    Archive,
}

// =============================================================================
// Label Models
// =============================================================================

/// Request to create a label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateLabelRequest {
    /// Note to attach the label to; omit for a global label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,
    /// Label text.
    pub label_name: String,
}

/// Request to rename or soft-delete a label.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateLabelRequest {
    /// Updated label text.
    pub label_name: String,
    /// Active flag; `false` soft-deletes the label.
    pub is_active: bool,
}
