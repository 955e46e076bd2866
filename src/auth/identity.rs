//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::auth::token::validate_token;
use crate::domain::repository::UserRepository;
use crate::domain::types::{Role, User};
use crate::error::AulaServiceError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header on
/// every request. A token whose subject no longer resolves to a stored user
/// is rejected as invalid.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    pub fn require_teacher(&self) -> Result<(), AulaServiceError> {
        if self.user.role != Role::Teacher {
            return Err(AulaServiceError::TeacherOnly);
        }
        Ok(())
    }

    pub fn require_student(&self) -> Result<(), AulaServiceError> {
        if self.user.role != Role::Student {
            return Err(AulaServiceError::StudentOnly);
        }
        Ok(())
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AulaServiceError;

    // Header extraction is synchronous; the returned future only owns clones,
    // so it stays 'static for axum.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|auth| auth.token().to_owned());
        let state = state.clone();

        async move {
            let token = bearer.ok_or(AulaServiceError::InvalidToken)?;
            let subject = validate_token(&token, &state.jwt_secret)?;
            let user = state
                .user_repo()
                .find_by_id(&subject)
                .await?
                .ok_or(AulaServiceError::InvalidToken)?;
            Ok(Self { user })
        }
    }
}
