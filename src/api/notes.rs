// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Note endpoints.
//!
//! Listing reads go through the per-owner cache: hit or miss, the cached
//! value is always the full unfiltered listing and the status filter is
//! applied after retrieval. Every mutation invalidates the owner's key
//! after the store write acknowledges, before the response is returned.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateNoteRequest, NoteStatusFilter, SetFlagRequest, UpdateNoteRequest},
    state::AppState,
    storage::{NoteRepository, StoredNote},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListNotesQuery {
    /// Status filter applied after cache retrieval.
    #[serde(default)]
    pub status: NoteStatusFilter,
}

fn apply_filter(notes: Vec<StoredNote>, filter: NoteStatusFilter) -> Vec<StoredNote> {
    match filter {
        NoteStatusFilter::All => notes,
        NoteStatusFilter::Trash => notes.into_iter().filter(|n| n.is_trashed).collect(),
        NoteStatusFilter::Archive => notes.into_iter().filter(|n| n.is_archived).collect(),
    }
}

#[utoipa::path(
    post,
    path = "/v1/notes",
    request_body = CreateNoteRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 201, body = StoredNote))
)]
pub async fn create_note(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<StoredNote>), ApiError> {
    let note = StoredNote::new(&user.user_id, &request.title, &request.description);
    NoteRepository::new(&state.storage).create(&note)?;
    state.notes_cache.invalidate(&user.user_id);
    Ok((StatusCode::CREATED, Json(note)))
}

#[utoipa::path(
    get,
    path = "/v1/notes",
    params(ListNotesQuery),
    tag = "Notes",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [StoredNote]),
        (status = 404, description = "User has no notes")
    )
)]
pub async fn list_notes(
    Auth(user): Auth,
    State(state): State<AppState>,
    Query(params): Query<ListNotesQuery>,
) -> Result<Json<Vec<StoredNote>>, ApiError> {
    // Read-through: probe the cache, fall back to the store and
    // repopulate on a miss. The snapshot is always unfiltered.
    let notes = match state.notes_cache.get(&user.user_id) {
        Some(cached) => cached,
        None => {
            let fetched = NoteRepository::new(&state.storage).list_by_owner(&user.user_id)?;
            state.notes_cache.put(&user.user_id, fetched.clone());
            fetched
        }
    };

    if notes.is_empty() {
        return Err(ApiError::not_found("Notes not found"));
    }

    Ok(Json(apply_filter(notes, params.status)))
}

#[utoipa::path(
    get,
    path = "/v1/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 200, body = StoredNote), (status = 404))
)]
pub async fn get_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StoredNote>, ApiError> {
    let note = NoteRepository::new(&state.storage).verify_owner(&note_id, &user.user_id)?;
    Ok(Json(note))
}

#[utoipa::path(
    put,
    path = "/v1/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    request_body = UpdateNoteRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 200, body = StoredNote), (status = 404))
)]
pub async fn update_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateNoteRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let note = NoteRepository::new(&state.storage).update_content(
        &note_id,
        &user.user_id,
        &request.title,
        &request.description,
        request.labels,
    )?;
    state.notes_cache.invalidate(&user.user_id);
    Ok(Json(note))
}

#[utoipa::path(
    put,
    path = "/v1/notes/{note_id}/pin",
    params(("note_id" = String, Path, description = "Note identifier")),
    request_body = SetFlagRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 200, body = StoredNote), (status = 404))
)]
pub async fn pin_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetFlagRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let note =
        NoteRepository::new(&state.storage).set_pinned(&note_id, &user.user_id, request.enabled)?;
    state.notes_cache.invalidate(&user.user_id);
    Ok(Json(note))
}

#[utoipa::path(
    put,
    path = "/v1/notes/{note_id}/archive",
    params(("note_id" = String, Path, description = "Note identifier")),
    request_body = SetFlagRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 200, body = StoredNote), (status = 404))
)]
pub async fn archive_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetFlagRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let note = NoteRepository::new(&state.storage).set_archived(
        &note_id,
        &user.user_id,
        request.enabled,
    )?;
    state.notes_cache.invalidate(&user.user_id);
    Ok(Json(note))
}

#[utoipa::path(
    put,
    path = "/v1/notes/{note_id}/trash",
    params(("note_id" = String, Path, description = "Note identifier")),
    request_body = SetFlagRequest,
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 200, body = StoredNote), (status = 404))
)]
pub async fn trash_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<SetFlagRequest>,
) -> Result<Json<StoredNote>, ApiError> {
    let note = NoteRepository::new(&state.storage).set_trashed(
        &note_id,
        &user.user_id,
        request.enabled,
    )?;
    state.notes_cache.invalidate(&user.user_id);
    Ok(Json(note))
}

#[utoipa::path(
    delete,
    path = "/v1/notes/{note_id}",
    params(("note_id" = String, Path, description = "Note identifier")),
    tag = "Notes",
    security(("bearer" = [])),
    responses((status = 204), (status = 404))
)]
pub async fn delete_note(
    Auth(user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    NoteRepository::new(&state.storage).delete_forever(&note_id, &user.user_id)?;
    state.notes_cache.invalidate(&user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
