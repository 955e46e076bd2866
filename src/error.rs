use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Service error variants. Messages are the Spanish strings surfaced to API
/// clients.
#[derive(Debug, thiserror::Error)]
pub enum AulaServiceError {
    #[error("Token inválido")]
    InvalidToken,
    #[error("Token expirado")]
    TokenExpired,
    #[error("Credenciales inválidas")]
    InvalidCredentials,
    #[error("Solo docentes")]
    TeacherOnly,
    #[error("Solo estudiantes")]
    StudentOnly,
    #[error("No autorizado")]
    NotCourseOwner,
    #[error("No inscrito en este curso")]
    NotEnrolled,
    #[error("Curso no encontrado")]
    CourseNotFound,
    #[error("Inscripción no encontrada")]
    EnrollmentNotFound,
    #[error("Calificación no encontrada")]
    GradeNotFound,
    #[error("Notificación no encontrada")]
    NotificationNotFound,
    #[error("Código de acceso inválido")]
    InvalidAccessCode,
    #[error("El correo ya está registrado")]
    EmailTaken,
    #[error("El código del curso ya existe")]
    CourseCodeTaken,
    #[error("Ya estás inscrito en este curso")]
    AlreadyEnrolled,
    #[error("Rol inválido")]
    InvalidRole,
    #[error("Las notas deben estar entre 0.0 y 5.0")]
    GradeOutOfRange,
    #[error("Token de restablecimiento inválido")]
    InvalidResetToken,
    #[error("Token de restablecimiento expirado")]
    ResetTokenExpired,
    #[error("Error interno del servidor")]
    Internal(#[from] anyhow::Error),
}

impl AulaServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidToken => "TOKEN_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::TeacherOnly => "TEACHER_ONLY",
            Self::StudentOnly => "STUDENT_ONLY",
            Self::NotCourseOwner => "NOT_COURSE_OWNER",
            Self::NotEnrolled => "NOT_ENROLLED",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            Self::GradeNotFound => "GRADE_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::InvalidAccessCode => "INVALID_ACCESS_CODE",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::CourseCodeTaken => "COURSE_CODE_TAKEN",
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::InvalidRole => "INVALID_ROLE",
            Self::GradeOutOfRange => "GRADE_OUT_OF_RANGE",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::ResetTokenExpired => "RESET_TOKEN_EXPIRED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AulaServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidToken | Self::TokenExpired | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::TeacherOnly | Self::StudentOnly | Self::NotCourseOwner | Self::NotEnrolled => {
                StatusCode::FORBIDDEN
            }
            Self::CourseNotFound
            | Self::EnrollmentNotFound
            | Self::GradeNotFound
            | Self::NotificationNotFound
            | Self::InvalidAccessCode => StatusCode::NOT_FOUND,
            Self::EmailTaken | Self::CourseCodeTaken | Self::AlreadyEnrolled => {
                StatusCode::CONFLICT
            }
            Self::InvalidRole
            | Self::GradeOutOfRange
            | Self::InvalidResetToken
            | Self::ResetTokenExpired => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
