// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Notemark - Notes Backend Service
//!
//! This crate provides a notes-taking backend: account registration and
//! login, a password-reset token lifecycle, notes with pin/archive/trash
//! flags, labels, and a read-through listing cache over the document
//! store.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Passwords, session JWTs, reset-token lifecycle
//! - `email` - Fire-and-forget SMTP mailer
//! - `storage` - Document store, repositories, listing cache

pub mod api;
pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
