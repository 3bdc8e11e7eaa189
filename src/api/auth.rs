// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account endpoints: register, login, forgot/reset password.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use tracing::warn;

use crate::{
    auth::{hash_password, verify_password},
    error::ApiError,
    models::{
        ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
        MessageResponse, RegisterRequest, ResetPasswordRequest, UserResponse,
    },
    state::AppState,
    storage::{StorageError, StoredUser, UserRepository},
};

#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, body = UserResponse),
        (status = 422, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = StoredUser {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
        phone_number: request.phone_number,
        password_hash: hash_password(&request.password)
            .map_err(|_| ApiError::internal())?,
        created_at: Utc::now(),
    };

    UserRepository::new(&state.storage).create(&user)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let users = UserRepository::new(&state.storage);
    let user = match users.find_by_email(&request.email) {
        Ok(user) => user,
        Err(StorageError::NotFound(_)) => {
            return Err(ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Email is incorrect",
            ))
        }
        Err(e) => return Err(e.into()),
    };

    let matches = verify_password(&request.password, &user.password_hash)
        .map_err(|_| ApiError::internal())?;
    if !matches {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            "Please enter a valid password",
        ));
    }

    let token = state
        .sessions
        .issue(&user.id, &user.email)
        .map_err(|_| ApiError::internal())?;

    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    tag = "Auth",
    responses(
        (status = 201, body = ForgotPasswordResponse),
        (status = 404, description = "User does not exist")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<ForgotPasswordResponse>), ApiError> {
    let issued = state.reset.request_reset(&request.email)?;

    // Issue first, then mail best-effort: a send failure must never fail
    // the request that produced the token.
    let email = state.email.clone();
    let to_address = issued.user.email.clone();
    let first_name = issued.user.first_name.clone();
    let link = issued.link.clone();
    tokio::spawn(async move {
        if let Err(e) = email
            .send_password_reset(&to_address, &first_name, &link)
            .await
        {
            warn!(to = %to_address, error = %e, "failed to send password reset email");
        }
    });

    Ok((
        StatusCode::CREATED,
        Json(ForgotPasswordResponse {
            message: "Password reset link sent".to_string(),
            link: issued.link,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/v1/auth/reset-password",
    request_body = ResetPasswordRequest,
    tag = "Auth",
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "User does not exist"),
        (status = 422, description = "Invalid or expired password reset token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .reset
        .complete_reset(&request.user_id, &request.token, &request.new_password)?;

    Ok(Json(MessageResponse {
        message: "Password reset successful!".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::test_state;

    fn register_request(email: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone_number: None,
            password: "Original-1!".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_succeeds() {
        let state = test_state();

        let (status, Json(user)) = register(
            State(state.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .expect("registration succeeds");
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user.email, "ada@example.com");

        let Json(login_response) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "Original-1!".into(),
            }),
        )
        .await
        .expect("login succeeds");

        let authed = state.sessions.verify(&login_response.token).unwrap();
        assert_eq!(authed.user_id, user.id);

        crate::api::tests::cleanup(&state);
    }

    #[tokio::test]
    async fn duplicate_registration_rejected() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(register_request("dup@example.com")),
        )
        .await
        .unwrap();

        let err = register(
            State(state.clone()),
            Json(register_request("dup@example.com")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        crate::api::tests::cleanup(&state);
    }

    #[tokio::test]
    async fn login_with_wrong_password_rejected() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .unwrap();

        let err = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        crate::api::tests::cleanup(&state);
    }

    #[tokio::test]
    async fn full_reset_flow_allows_login_with_new_password() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .unwrap();

        let (_, Json(forgot)) = forgot_password(
            State(state.clone()),
            Json(ForgotPasswordRequest {
                email: "ada@example.com".into(),
            }),
        )
        .await
        .expect("forgot password succeeds");

        // Pull token and user id straight out of the emailed link.
        let token = forgot
            .link
            .split("token=")
            .nth(1)
            .unwrap()
            .split('&')
            .next()
            .unwrap()
            .to_string();
        let user_id = forgot.link.split("id=").nth(1).unwrap().to_string();

        reset_password(
            State(state.clone()),
            Json(ResetPasswordRequest {
                user_id: user_id.clone(),
                token: token.clone(),
                new_password: "NewPass1!".into(),
            }),
        )
        .await
        .expect("reset succeeds");

        // Old password no longer works; new one does.
        assert!(login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "Original-1!".into(),
            }),
        )
        .await
        .is_err());

        login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "NewPass1!".into(),
            }),
        )
        .await
        .expect("login with new password succeeds");

        // Token is single-use.
        let err = reset_password(
            State(state.clone()),
            Json(ResetPasswordRequest {
                user_id,
                token,
                new_password: "Another1!".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        crate::api::tests::cleanup(&state);
    }

    #[tokio::test]
    async fn reset_with_wrong_token_keeps_old_password() {
        let state = test_state();

        register(
            State(state.clone()),
            Json(register_request("ada@example.com")),
        )
        .await
        .unwrap();

        let (_, Json(forgot)) = forgot_password(
            State(state.clone()),
            Json(ForgotPasswordRequest {
                email: "ada@example.com".into(),
            }),
        )
        .await
        .unwrap();
        let user_id = forgot.link.split("id=").nth(1).unwrap().to_string();

        let err = reset_password(
            State(state.clone()),
            Json(ResetPasswordRequest {
                user_id,
                token: "wrong-token".into(),
                new_password: "NewPass1!".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.message, "Invalid or expired password reset token");

        // Original password still valid.
        login(
            State(state.clone()),
            Json(LoginRequest {
                email: "ada@example.com".into(),
                password: "Original-1!".into(),
            }),
        )
        .await
        .expect("old password still works");

        crate::api::tests::cleanup(&state);
    }

    #[tokio::test]
    async fn forgot_password_for_unknown_email_is_404() {
        let state = test_state();

        let err = forgot_password(
            State(state.clone()),
            Json(ForgotPasswordRequest {
                email: "ghost@example.com".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "User does not exist");

        crate::api::tests::cleanup(&state);
    }
}
