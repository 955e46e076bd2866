use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::auth::identity::CurrentUser;
use crate::domain::types::User;
use crate::error::AulaServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    AuthOutput, ForgotPasswordUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    ResetPasswordInput, ResetPasswordUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserSummary {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserSummary,
}

fn token_response(out: AuthOutput) -> TokenResponse {
    TokenResponse {
        access_token: out.access_token,
        token_type: "bearer",
        user: UserSummary {
            id: out.user.id,
            full_name: out.user.full_name,
            email: out.user.email,
            role: out.user.role.as_str(),
        },
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AulaServiceError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            full_name: body.full_name,
            email: body.email,
            password: body.password,
            role: body.role,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(token_response(out))))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AulaServiceError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(token_response(out)))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

const RESET_SENT_MESSAGE: &str = "Si el correo existe, recibirás un enlace de recuperación";

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Uniform message whether or not the account exists. The reset token is
/// returned in the body in lieu of email delivery.
#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<ForgotPasswordResponse>, AulaServiceError> {
    let usecase = ForgotPasswordUseCase {
        repo: state.user_repo(),
    };
    let reset_token = usecase.execute(&body.email).await?;
    Ok(Json(ForgotPasswordResponse {
        message: RESET_SENT_MESSAGE,
        reset_token,
    }))
}

// ── POST /auth/reset-password ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AulaServiceError> {
    let usecase = ResetPasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            token: body.token,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        message: "Contraseña actualizada exitosamente",
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: &'static str,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        full_name: user.full_name,
        email: user.email,
        role: user.role.as_str(),
        created_at: user.created_at,
    }
}

pub async fn get_me(current: CurrentUser) -> Result<Json<UserResponse>, AulaServiceError> {
    Ok(Json(user_response(current.user)))
}
