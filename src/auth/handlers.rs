use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, PublicUser, RegisterRequest,
    ResetPasswordRequest,
};
use super::errors::AccountError;
use super::services;
use crate::state::AppState;

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/forgot", post(forgot_password))
        .route("/users/reset", post(reset_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, AccountError> {
    let user =
        services::register(&state, &payload.email, &payload.name, &payload.password).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, AccountError> {
    let user = services::authenticate(&state, &payload.email, &payload.password).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AccountError> {
    services::request_password_reset(&state, &payload.email).await?;
    Ok(Json(MessageResponse {
        message: "If the account exists, a reset link has been sent".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<PublicUser>, AccountError> {
    let user = services::reset_password(&state, &payload.token, &payload.password).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::harness;
    use axum::{http::StatusCode, response::IntoResponse};

    #[test]
    fn public_user_hides_secrets() {
        let user = PublicUser {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
            name: "Test".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn register_then_login() {
        let h = harness();
        let Json(created) = register(
            State(h.state.clone()),
            Json(RegisterRequest {
                email: "ed@example.com".into(),
                name: "Ed".into(),
                password: "pw123".into(),
            }),
        )
        .await
        .unwrap();

        let Json(logged_in) = login(
            State(h.state.clone()),
            Json(LoginRequest {
                email: "ed@example.com".into(),
                password: "pw123".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.id, logged_in.id);
    }

    #[tokio::test]
    async fn bad_login_is_401() {
        let h = harness();
        let err = login(
            State(h.state.clone()),
            Json(LoginRequest {
                email: "nobody@example.com".into(),
                password: "x".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_reset_token_is_400() {
        let h = harness();
        let err = reset_password(
            State(h.state.clone()),
            Json(ResetPasswordRequest {
                token: "nope".into(),
                password: "x".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
