use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User role. Immutable after registration. Persisted and serialized as
/// `"teacher"` / `"student"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }
}

/// Registered user account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,
}

/// A course owned by a teacher.
#[derive(Debug, Clone)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub teacher_id: String,
    pub academic_period: String,
    pub access_code: String,
    pub created_at: DateTime<Utc>,
}

/// A student's membership in a course, created by redeeming the course's
/// access code.
#[derive(Debug, Clone)]
pub struct Enrollment {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

/// Grade record, one per enrollment. `student_name` is a snapshot taken at
/// enrollment time. `final_grade` is non-null iff all three cortes are set.
#[derive(Debug, Clone)]
pub struct Grade {
    pub id: String,
    pub enrollment_id: String,
    pub course_id: String,
    pub student_id: String,
    pub student_name: String,
    pub corte1: Option<f64>,
    pub corte2: Option<f64>,
    pub corte3: Option<f64>,
    pub final_grade: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// In-app notification for a user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification kind written on every grade update.
pub const NOTIFICATION_KIND_GRADE_UPDATE: &str = "grade_update";

/// Password-reset token time-to-live in seconds.
pub const RESET_TOKEN_TTL_SECS: i64 = 3600;
