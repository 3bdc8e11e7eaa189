// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{PasswordResetManager, SessionKeys};
use crate::email::EmailService;
use crate::storage::{DocumentStorage, ListingCache, StoredLabel, StoredNote, LISTING_TTL};

/// Owner keys the listing caches can hold before LRU eviction.
const CACHE_CAPACITY: usize = 1024;

/// Fixed cache key for the global (note-less) label listing.
pub const GLOBAL_LABELS_KEY: &str = "labels";

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<DocumentStorage>,
    pub notes_cache: Arc<ListingCache<Vec<StoredNote>>>,
    pub labels_cache: Arc<ListingCache<Vec<StoredLabel>>>,
    pub reset: Arc<PasswordResetManager>,
    pub sessions: Arc<SessionKeys>,
    pub email: Arc<EmailService>,
}

impl AppState {
    /// Wire the application with production TTLs.
    pub fn new(
        storage: DocumentStorage,
        sessions: SessionKeys,
        email: EmailService,
        client_url: impl Into<String>,
    ) -> Self {
        Self::with_listing_ttl(storage, sessions, email, client_url, LISTING_TTL)
    }

    /// Wire the application with an explicit listing TTL (tests shrink it).
    pub fn with_listing_ttl(
        storage: DocumentStorage,
        sessions: SessionKeys,
        email: EmailService,
        client_url: impl Into<String>,
        listing_ttl: Duration,
    ) -> Self {
        let storage = Arc::new(storage);
        let reset = Arc::new(PasswordResetManager::new(storage.clone(), client_url));
        Self {
            storage,
            notes_cache: Arc::new(ListingCache::new(CACHE_CAPACITY, listing_ttl)),
            labels_cache: Arc::new(ListingCache::new(CACHE_CAPACITY, listing_ttl)),
            reset,
            sessions: Arc::new(sessions),
            email: Arc::new(email),
        }
    }
}
