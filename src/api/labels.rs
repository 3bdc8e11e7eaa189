// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Label endpoints.
//!
//! Note-scoped listings cache under the note id; the global listing uses
//! the fixed `labels` key. Mutations invalidate both the affected note
//! key and the global key, since a label appears in both listings.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateLabelRequest, UpdateLabelRequest},
    state::{AppState, GLOBAL_LABELS_KEY},
    storage::{LabelRepository, StoredLabel},
};

fn invalidate_label_keys(state: &AppState, note_id: Option<&str>) {
    if let Some(note_id) = note_id {
        state.labels_cache.invalidate(note_id);
    }
    state.labels_cache.invalidate(GLOBAL_LABELS_KEY);
}

#[utoipa::path(
    post,
    path = "/v1/labels",
    request_body = CreateLabelRequest,
    tag = "Labels",
    security(("bearer" = [])),
    responses((status = 201, body = StoredLabel))
)]
pub async fn create_label(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateLabelRequest>,
) -> Result<(StatusCode, Json<StoredLabel>), ApiError> {
    let label = StoredLabel::new(request.note_id.as_deref(), &request.label_name);
    LabelRepository::new(&state.storage).create(&label)?;
    invalidate_label_keys(&state, label.note_id.as_deref());
    Ok((StatusCode::CREATED, Json(label)))
}

#[utoipa::path(
    get,
    path = "/v1/notes/{note_id}/labels",
    params(("note_id" = String, Path, description = "Note identifier")),
    tag = "Labels",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [StoredLabel]),
        (status = 404, description = "No labels present for this note")
    )
)]
pub async fn list_note_labels(
    Auth(_user): Auth,
    Path(note_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredLabel>>, ApiError> {
    let labels = match state.labels_cache.get(&note_id) {
        Some(cached) => cached,
        None => {
            let fetched = LabelRepository::new(&state.storage).list_for_scope(Some(&note_id))?;
            state.labels_cache.put(&note_id, fetched.clone());
            fetched
        }
    };

    if labels.is_empty() {
        return Err(ApiError::not_found("No labels present for this note"));
    }

    // Soft-deleted labels are cached but never returned.
    Ok(Json(labels.into_iter().filter(|l| l.is_active).collect()))
}

#[utoipa::path(
    get,
    path = "/v1/labels",
    tag = "Labels",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [StoredLabel]),
        (status = 404, description = "No labels present")
    )
)]
pub async fn list_labels(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredLabel>>, ApiError> {
    let labels = match state.labels_cache.get(GLOBAL_LABELS_KEY) {
        Some(cached) => cached,
        None => {
            let fetched = LabelRepository::new(&state.storage).list_all()?;
            state.labels_cache.put(GLOBAL_LABELS_KEY, fetched.clone());
            fetched
        }
    };

    if labels.is_empty() {
        return Err(ApiError::not_found("Labels not found"));
    }

    Ok(Json(labels.into_iter().filter(|l| l.is_active).collect()))
}

#[utoipa::path(
    put,
    path = "/v1/labels/{label_id}",
    params(("label_id" = String, Path, description = "Label identifier")),
    request_body = UpdateLabelRequest,
    tag = "Labels",
    security(("bearer" = [])),
    responses((status = 200, body = StoredLabel), (status = 404))
)]
pub async fn update_label(
    Auth(_user): Auth,
    Path(label_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateLabelRequest>,
) -> Result<Json<StoredLabel>, ApiError> {
    let label = LabelRepository::new(&state.storage).update(
        &label_id,
        &request.label_name,
        request.is_active,
    )?;
    invalidate_label_keys(&state, label.note_id.as_deref());
    Ok(Json(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{cleanup, test_state, test_user_auth};

    #[tokio::test]
    async fn create_and_list_note_labels() {
        let state = test_state();
        let auth = test_user_auth(&state, "ada@example.com");

        let (status, Json(label)) = create_label(
            Auth(auth.clone()),
            State(state.clone()),
            Json(CreateLabelRequest {
                note_id: Some("note-1".into()),
                label_name: "work".into(),
            }),
        )
        .await
        .expect("label creation succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert!(label.is_active);

        let Json(labels) = list_note_labels(
            Auth(auth.clone()),
            Path("note-1".into()),
            State(state.clone()),
        )
        .await
        .expect("listing succeeds");
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label_name, "work");

        cleanup(&state);
    }

    #[tokio::test]
    async fn missing_note_labels_is_404() {
        let state = test_state();
        let auth = test_user_auth(&state, "ada@example.com");

        let err = list_note_labels(
            Auth(auth),
            Path("no-such-note".into()),
            State(state.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        cleanup(&state);
    }

    #[tokio::test]
    async fn soft_deleted_label_disappears_from_listing() {
        let state = test_state();
        let auth = test_user_auth(&state, "ada@example.com");

        let (_, Json(label)) = create_label(
            Auth(auth.clone()),
            State(state.clone()),
            Json(CreateLabelRequest {
                note_id: Some("note-1".into()),
                label_name: "temp".into(),
            }),
        )
        .await
        .unwrap();

        update_label(
            Auth(auth.clone()),
            Path(label.id.clone()),
            State(state.clone()),
            Json(UpdateLabelRequest {
                label_name: "temp".into(),
                is_active: false,
            }),
        )
        .await
        .unwrap();

        let Json(labels) = list_note_labels(
            Auth(auth.clone()),
            Path("note-1".into()),
            State(state.clone()),
        )
        .await
        .expect("listing still succeeds");
        assert!(labels.is_empty());

        cleanup(&state);
    }

    #[tokio::test]
    async fn label_mutation_invalidates_both_keys() {
        let state = test_state();
        let auth = test_user_auth(&state, "ada@example.com");

        create_label(
            Auth(auth.clone()),
            State(state.clone()),
            Json(CreateLabelRequest {
                note_id: Some("note-1".into()),
                label_name: "first".into(),
            }),
        )
        .await
        .unwrap();

        // Warm both caches.
        list_note_labels(
            Auth(auth.clone()),
            Path("note-1".into()),
            State(state.clone()),
        )
        .await
        .unwrap();
        list_labels(Auth(auth.clone()), State(state.clone()))
            .await
            .unwrap();
        assert!(state.labels_cache.get("note-1").is_some());
        assert!(state.labels_cache.get(GLOBAL_LABELS_KEY).is_some());

        // Mutation empties both.
        create_label(
            Auth(auth.clone()),
            State(state.clone()),
            Json(CreateLabelRequest {
                note_id: Some("note-1".into()),
                label_name: "second".into(),
            }),
        )
        .await
        .unwrap();
        assert!(state.labels_cache.get("note-1").is_none());
        assert!(state.labels_cache.get(GLOBAL_LABELS_KEY).is_none());

        cleanup(&state);
    }
}
