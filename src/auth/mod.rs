// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Account credentials and the password-reset token lifecycle.
//!
//! ## Session Flow
//!
//! 1. Client registers; the password is argon2-hashed before storage
//! 2. Client logs in; the server issues an HS256 session JWT (1 h expiry)
//! 3. Client sends `Authorization: Bearer <JWT>` on note/label routes
//! 4. The [`Auth`] extractor verifies the signature and expiry and yields
//!    the authenticated user id
//!
//! ## Password Reset Flow
//!
//! 1. `forgot-password` issues a single-use, time-bounded reset token
//!    (256 bits of entropy, stored as a SHA-256 digest) and mails a link
//! 2. `reset-password` validates the raw token against the stored digest,
//!    applies the new password, then retires the token
//!
//! Token expiry is enforced by the store's TTL eviction; an absent row and
//! an expired row are indistinguishable to callers.

pub mod error;
pub mod password;
pub mod reset;
pub mod session;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use reset::{IssuedReset, PasswordResetManager, ResetFlowError};
pub use session::{Auth, AuthenticatedUser, SessionKeys};
