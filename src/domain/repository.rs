#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use crate::domain::types::{Course, Enrollment, Grade, Notification, User};
use crate::error::AulaServiceError;

/// Mutable course attributes (full replacement, PUT semantics).
#[derive(Debug, Clone)]
pub struct CourseChanges {
    pub name: String,
    pub code: String,
    pub description: String,
    pub academic_period: String,
}

/// Partial score update for a grade record. `None` cortes are left
/// unchanged; `final_grade` is always written (null clears nothing in
/// practice since cortes are never unset).
#[derive(Debug, Clone)]
pub struct GradeUpdate {
    pub corte1: Option<f64>,
    pub corte2: Option<f64>,
    pub corte3: Option<f64>,
    pub final_grade: Option<f64>,
    pub last_updated: DateTime<Utc>,
}

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AulaServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AulaServiceError>;
    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AulaServiceError>;
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AulaServiceError>;
    async fn create(&self, user: &User) -> Result<(), AulaServiceError>;

    /// Store a fresh password-reset token with its expiry.
    async fn set_reset_token(
        &self,
        id: &str,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), AulaServiceError>;

    /// Replace the password hash and clear any reset token.
    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<(), AulaServiceError>;
}

/// Repository for courses.
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AulaServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, AulaServiceError>;
    async fn find_by_access_code(&self, code: &str) -> Result<Option<Course>, AulaServiceError>;
    async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, AulaServiceError>;
    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Course>, AulaServiceError>;
    async fn create(&self, course: &Course) -> Result<(), AulaServiceError>;
    async fn update(&self, id: &str, changes: &CourseChanges) -> Result<(), AulaServiceError>;

    /// Delete a course. Returns `true` if a document was deleted.
    async fn delete(&self, id: &str) -> Result<bool, AulaServiceError>;
}

/// Repository for enrollments.
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AulaServiceError>;
    async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, AulaServiceError>;
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Enrollment>, AulaServiceError>;
    async fn list_by_student(&self, student_id: &str)
    -> Result<Vec<Enrollment>, AulaServiceError>;
    async fn create(&self, enrollment: &Enrollment) -> Result<(), AulaServiceError>;

    /// Delete all enrollments of a course. Returns the deleted count.
    async fn delete_by_course(&self, course_id: &str) -> Result<u64, AulaServiceError>;
}

/// Repository for grade records.
pub trait GradeRepository: Send + Sync {
    async fn find_by_enrollment(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<Grade>, AulaServiceError>;
    async fn find_by_course_student(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Option<Grade>, AulaServiceError>;
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Grade>, AulaServiceError>;
    async fn create(&self, grade: &Grade) -> Result<(), AulaServiceError>;

    /// Apply a partial score update to the grade of an enrollment.
    async fn update_scores(
        &self,
        enrollment_id: &str,
        update: &GradeUpdate,
    ) -> Result<(), AulaServiceError>;

    /// Delete all grade records of a course. Returns the deleted count.
    async fn delete_by_course(&self, course_id: &str) -> Result<u64, AulaServiceError>;
}

/// Repository for notifications.
pub trait NotificationRepository: Send + Sync {
    /// List a user's notifications, newest first, capped by the store.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Notification>, AulaServiceError>;
    async fn create(&self, notification: &Notification) -> Result<(), AulaServiceError>;

    /// Mark a notification read. The `user_id` guard ensures only the owner
    /// can update. Returns `true` if a document matched.
    async fn mark_read(&self, id: &str, user_id: &str) -> Result<bool, AulaServiceError>;
}
