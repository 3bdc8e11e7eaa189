// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateLabelRequest, CreateNoteRequest, ForgotPasswordRequest, ForgotPasswordResponse,
        LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResetPasswordRequest,
        SetFlagRequest, UpdateLabelRequest, UpdateNoteRequest, UserResponse,
    },
    state::AppState,
    storage::{StoredLabel, StoredNote},
};

pub mod auth;
pub mod health;
pub mod labels;
pub mod notes;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{note_id}",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .route("/notes/{note_id}/pin", put(notes::pin_note))
        .route("/notes/{note_id}/archive", put(notes::archive_note))
        .route("/notes/{note_id}/trash", put(notes::trash_note))
        .route("/notes/{note_id}/labels", get(labels::list_note_labels))
        .route(
            "/labels",
            get(labels::list_labels).post(labels::create_label),
        )
        .route("/labels/{label_id}", put(labels::update_label))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register,
        auth::login,
        auth::forgot_password,
        auth::reset_password,
        notes::create_note,
        notes::list_notes,
        notes::get_note,
        notes::update_note,
        notes::pin_note,
        notes::archive_note,
        notes::trash_note,
        notes::delete_note,
        labels::create_label,
        labels::list_note_labels,
        labels::list_labels,
        labels::update_label,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            RegisterRequest,
            UserResponse,
            LoginRequest,
            LoginResponse,
            ForgotPasswordRequest,
            ForgotPasswordResponse,
            ResetPasswordRequest,
            MessageResponse,
            CreateNoteRequest,
            UpdateNoteRequest,
            SetFlagRequest,
            StoredNote,
            CreateLabelRequest,
            UpdateLabelRequest,
            StoredLabel
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Accounts and password reset"),
        (name = "Notes", description = "Note management"),
        (name = "Labels", description = "Label management"),
        (name = "Health", description = "Service probes")
    )
)]
struct ApiDoc;
