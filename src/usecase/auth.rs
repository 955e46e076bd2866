use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::issue_token;
use crate::domain::access_code::new_reset_token;
use crate::domain::repository::UserRepository;
use crate::domain::types::{RESET_TOKEN_TTL_SECS, Role, User};
use crate::error::AulaServiceError;

/// Result of a successful registration or login.
#[derive(Debug)]
pub struct AuthOutput {
    pub access_token: String,
    pub user: User,
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthOutput, AulaServiceError> {
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AulaServiceError::EmailTaken);
        }
        let role = Role::parse(&input.role).ok_or(AulaServiceError::InvalidRole)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: input.full_name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role,
            created_at: Utc::now(),
            reset_token: None,
            reset_token_expiry: None,
        };
        self.repo.create(&user).await?;

        let access_token = issue_token(&user.id, &self.jwt_secret)?;
        Ok(AuthOutput { access_token, user })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: String,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<AuthOutput, AulaServiceError> {
        // Same error for unknown email and bad password.
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AulaServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(AulaServiceError::InvalidCredentials);
        }

        let access_token = issue_token(&user.id, &self.jwt_secret)?;
        Ok(AuthOutput { access_token, user })
    }
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ForgotPasswordUseCase<R> {
    /// Returns the fresh reset token when the email resolves to an account,
    /// `None` otherwise. Callers must answer identically in both cases to
    /// avoid account enumeration.
    pub async fn execute(&self, email: &str) -> Result<Option<String>, AulaServiceError> {
        let Some(user) = self.repo.find_by_email(email).await? else {
            return Ok(None);
        };

        let token = new_reset_token();
        let expiry = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);
        self.repo.set_reset_token(&user.id, &token, expiry).await?;
        Ok(Some(token))
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub token: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ResetPasswordUseCase<R> {
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AulaServiceError> {
        let user = self
            .repo
            .find_by_reset_token(&input.token)
            .await?
            .ok_or(AulaServiceError::InvalidResetToken)?;

        if let Some(expiry) = user.reset_token_expiry {
            if expiry < Utc::now() {
                return Err(AulaServiceError::ResetTokenExpired);
            }
        }

        let password_hash = hash_password(&input.new_password)?;
        self.repo.update_password(&user.id, &password_hash).await
    }
}
