//! MongoDB repositories. Documents are typed structs, which makes
//! deserialization the schema-validation boundary of the store. All documents
//! are keyed by a generated UUID string in an `id` field; referential
//! integrity lives in application code only.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use futures::TryStreamExt as _;
use mongodb::bson::{Bson, doc, to_bson};
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use crate::domain::repository::{
    CourseChanges, CourseRepository, EnrollmentRepository, GradeRepository, GradeUpdate,
    NotificationRepository, UserRepository,
};
use crate::domain::types::{Course, Enrollment, Grade, Notification, Role, User};
use crate::error::AulaServiceError;

const COL_USERS: &str = "users";
const COL_COURSES: &str = "courses";
const COL_ENROLLMENTS: &str = "enrollments";
const COL_GRADES: &str = "grades";
const COL_NOTIFICATIONS: &str = "notifications";

/// Cap applied to unbounded list queries.
const LIST_CAP: i64 = 1000;

/// Newest-first cap for a user's notification feed.
const NOTIFICATION_CAP: i64 = 100;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct UserDoc {
    id: String,
    full_name: String,
    email: String,
    password_hash: String,
    role: Role,
    created_at: DateTime<Utc>,
    reset_token: Option<String>,
    reset_token_expiry: Option<DateTime<Utc>>,
}

fn user_from_doc(doc: UserDoc) -> User {
    User {
        id: doc.id,
        full_name: doc.full_name,
        email: doc.email,
        password_hash: doc.password_hash,
        role: doc.role,
        created_at: doc.created_at,
        reset_token: doc.reset_token,
        reset_token_expiry: doc.reset_token_expiry,
    }
}

fn user_to_doc(user: &User) -> UserDoc {
    UserDoc {
        id: user.id.clone(),
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        role: user.role,
        created_at: user.created_at,
        reset_token: user.reset_token.clone(),
        reset_token_expiry: user.reset_token_expiry,
    }
}

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Database,
}

impl DbUserRepository {
    fn col(&self) -> Collection<UserDoc> {
        self.db.collection(COL_USERS)
    }
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "id": id })
            .await
            .context("find user by id")?;
        Ok(doc.map(user_from_doc))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "email": email })
            .await
            .context("find user by email")?;
        Ok(doc.map(user_from_doc))
    }

    async fn find_by_reset_token(&self, token: &str) -> Result<Option<User>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "reset_token": token })
            .await
            .context("find user by reset token")?;
        Ok(doc.map(user_from_doc))
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<User>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .limit(LIST_CAP)
            .await
            .context("find users by ids")?;
        let docs: Vec<UserDoc> = cursor.try_collect().await.context("collect users")?;
        Ok(docs.into_iter().map(user_from_doc).collect())
    }

    async fn create(&self, user: &User) -> Result<(), AulaServiceError> {
        self.col()
            .insert_one(user_to_doc(user))
            .await
            .context("create user")?;
        Ok(())
    }

    async fn set_reset_token(
        &self,
        id: &str,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<(), AulaServiceError> {
        self.col()
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "reset_token": token,
                    "reset_token_expiry": to_bson(&expiry).context("encode expiry")?,
                } },
            )
            .await
            .context("set reset token")?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: &str,
        password_hash: &str,
    ) -> Result<(), AulaServiceError> {
        self.col()
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "reset_token": Bson::Null,
                    "reset_token_expiry": Bson::Null,
                } },
            )
            .await
            .context("update password")?;
        Ok(())
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct CourseDoc {
    id: String,
    name: String,
    code: String,
    description: String,
    teacher_id: String,
    academic_period: String,
    access_code: String,
    created_at: DateTime<Utc>,
}

fn course_from_doc(doc: CourseDoc) -> Course {
    Course {
        id: doc.id,
        name: doc.name,
        code: doc.code,
        description: doc.description,
        teacher_id: doc.teacher_id,
        academic_period: doc.academic_period,
        access_code: doc.access_code,
        created_at: doc.created_at,
    }
}

fn course_to_doc(course: &Course) -> CourseDoc {
    CourseDoc {
        id: course.id.clone(),
        name: course.name.clone(),
        code: course.code.clone(),
        description: course.description.clone(),
        teacher_id: course.teacher_id.clone(),
        academic_period: course.academic_period.clone(),
        access_code: course.access_code.clone(),
        created_at: course.created_at,
    }
}

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: Database,
}

impl DbCourseRepository {
    fn col(&self) -> Collection<CourseDoc> {
        self.db.collection(COL_COURSES)
    }
}

impl CourseRepository for DbCourseRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "id": id })
            .await
            .context("find course by id")?;
        Ok(doc.map(course_from_doc))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "code": code })
            .await
            .context("find course by code")?;
        Ok(doc.map(course_from_doc))
    }

    async fn find_by_access_code(&self, code: &str) -> Result<Option<Course>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "access_code": code })
            .await
            .context("find course by access code")?;
        Ok(doc.map(course_from_doc))
    }

    async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<Course>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "teacher_id": teacher_id })
            .limit(LIST_CAP)
            .await
            .context("list courses by teacher")?;
        let docs: Vec<CourseDoc> = cursor.try_collect().await.context("collect courses")?;
        Ok(docs.into_iter().map(course_from_doc).collect())
    }

    async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<Course>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "id": { "$in": ids.to_vec() } })
            .limit(LIST_CAP)
            .await
            .context("list courses by ids")?;
        let docs: Vec<CourseDoc> = cursor.try_collect().await.context("collect courses")?;
        Ok(docs.into_iter().map(course_from_doc).collect())
    }

    async fn create(&self, course: &Course) -> Result<(), AulaServiceError> {
        self.col()
            .insert_one(course_to_doc(course))
            .await
            .context("create course")?;
        Ok(())
    }

    async fn update(&self, id: &str, changes: &CourseChanges) -> Result<(), AulaServiceError> {
        self.col()
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "name": &changes.name,
                    "code": &changes.code,
                    "description": &changes.description,
                    "academic_period": &changes.academic_period,
                } },
            )
            .await
            .context("update course")?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, AulaServiceError> {
        let result = self
            .col()
            .delete_one(doc! { "id": id })
            .await
            .context("delete course")?;
        Ok(result.deleted_count > 0)
    }
}

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct EnrollmentDoc {
    id: String,
    student_id: String,
    course_id: String,
    enrolled_at: DateTime<Utc>,
}

fn enrollment_from_doc(doc: EnrollmentDoc) -> Enrollment {
    Enrollment {
        id: doc.id,
        student_id: doc.student_id,
        course_id: doc.course_id,
        enrolled_at: doc.enrolled_at,
    }
}

fn enrollment_to_doc(enrollment: &Enrollment) -> EnrollmentDoc {
    EnrollmentDoc {
        id: enrollment.id.clone(),
        student_id: enrollment.student_id.clone(),
        course_id: enrollment.course_id.clone(),
        enrolled_at: enrollment.enrolled_at,
    }
}

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: Database,
}

impl DbEnrollmentRepository {
    fn col(&self) -> Collection<EnrollmentDoc> {
        self.db.collection(COL_ENROLLMENTS)
    }
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Enrollment>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "id": id })
            .await
            .context("find enrollment by id")?;
        Ok(doc.map(enrollment_from_doc))
    }

    async fn find_by_student_course(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> Result<Option<Enrollment>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "student_id": student_id, "course_id": course_id })
            .await
            .context("find enrollment by student and course")?;
        Ok(doc.map(enrollment_from_doc))
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Enrollment>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "course_id": course_id })
            .limit(LIST_CAP)
            .await
            .context("list enrollments by course")?;
        let docs: Vec<EnrollmentDoc> =
            cursor.try_collect().await.context("collect enrollments")?;
        Ok(docs.into_iter().map(enrollment_from_doc).collect())
    }

    async fn list_by_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<Enrollment>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "student_id": student_id })
            .limit(LIST_CAP)
            .await
            .context("list enrollments by student")?;
        let docs: Vec<EnrollmentDoc> =
            cursor.try_collect().await.context("collect enrollments")?;
        Ok(docs.into_iter().map(enrollment_from_doc).collect())
    }

    async fn create(&self, enrollment: &Enrollment) -> Result<(), AulaServiceError> {
        self.col()
            .insert_one(enrollment_to_doc(enrollment))
            .await
            .context("create enrollment")?;
        Ok(())
    }

    async fn delete_by_course(&self, course_id: &str) -> Result<u64, AulaServiceError> {
        let result = self
            .col()
            .delete_many(doc! { "course_id": course_id })
            .await
            .context("delete enrollments by course")?;
        Ok(result.deleted_count)
    }
}

// ── Grade repository ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct GradeDoc {
    id: String,
    enrollment_id: String,
    course_id: String,
    student_id: String,
    student_name: String,
    corte1: Option<f64>,
    corte2: Option<f64>,
    corte3: Option<f64>,
    final_grade: Option<f64>,
    last_updated: DateTime<Utc>,
}

fn grade_from_doc(doc: GradeDoc) -> Grade {
    Grade {
        id: doc.id,
        enrollment_id: doc.enrollment_id,
        course_id: doc.course_id,
        student_id: doc.student_id,
        student_name: doc.student_name,
        corte1: doc.corte1,
        corte2: doc.corte2,
        corte3: doc.corte3,
        final_grade: doc.final_grade,
        last_updated: doc.last_updated,
    }
}

fn grade_to_doc(grade: &Grade) -> GradeDoc {
    GradeDoc {
        id: grade.id.clone(),
        enrollment_id: grade.enrollment_id.clone(),
        course_id: grade.course_id.clone(),
        student_id: grade.student_id.clone(),
        student_name: grade.student_name.clone(),
        corte1: grade.corte1,
        corte2: grade.corte2,
        corte3: grade.corte3,
        final_grade: grade.final_grade,
        last_updated: grade.last_updated,
    }
}

#[derive(Clone)]
pub struct DbGradeRepository {
    pub db: Database,
}

impl DbGradeRepository {
    fn col(&self) -> Collection<GradeDoc> {
        self.db.collection(COL_GRADES)
    }
}

impl GradeRepository for DbGradeRepository {
    async fn find_by_enrollment(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<Grade>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "enrollment_id": enrollment_id })
            .await
            .context("find grade by enrollment")?;
        Ok(doc.map(grade_from_doc))
    }

    async fn find_by_course_student(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Option<Grade>, AulaServiceError> {
        let doc = self
            .col()
            .find_one(doc! { "course_id": course_id, "student_id": student_id })
            .await
            .context("find grade by course and student")?;
        Ok(doc.map(grade_from_doc))
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Grade>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "course_id": course_id })
            .limit(LIST_CAP)
            .await
            .context("list grades by course")?;
        let docs: Vec<GradeDoc> = cursor.try_collect().await.context("collect grades")?;
        Ok(docs.into_iter().map(grade_from_doc).collect())
    }

    async fn create(&self, grade: &Grade) -> Result<(), AulaServiceError> {
        self.col()
            .insert_one(grade_to_doc(grade))
            .await
            .context("create grade")?;
        Ok(())
    }

    async fn update_scores(
        &self,
        enrollment_id: &str,
        update: &GradeUpdate,
    ) -> Result<(), AulaServiceError> {
        let mut set = doc! {
            "final_grade": to_bson(&update.final_grade).context("encode final grade")?,
            "last_updated": to_bson(&update.last_updated).context("encode last updated")?,
        };
        if let Some(c1) = update.corte1 {
            set.insert("corte1", c1);
        }
        if let Some(c2) = update.corte2 {
            set.insert("corte2", c2);
        }
        if let Some(c3) = update.corte3 {
            set.insert("corte3", c3);
        }
        self.col()
            .update_one(doc! { "enrollment_id": enrollment_id }, doc! { "$set": set })
            .await
            .context("update grade scores")?;
        Ok(())
    }

    async fn delete_by_course(&self, course_id: &str) -> Result<u64, AulaServiceError> {
        let result = self
            .col()
            .delete_many(doc! { "course_id": course_id })
            .await
            .context("delete grades by course")?;
        Ok(result.deleted_count)
    }
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct NotificationDoc {
    id: String,
    user_id: String,
    message: String,
    #[serde(rename = "type")]
    kind: String,
    read: bool,
    created_at: DateTime<Utc>,
}

fn notification_from_doc(doc: NotificationDoc) -> Notification {
    Notification {
        id: doc.id,
        user_id: doc.user_id,
        message: doc.message,
        kind: doc.kind,
        read: doc.read,
        created_at: doc.created_at,
    }
}

fn notification_to_doc(notification: &Notification) -> NotificationDoc {
    NotificationDoc {
        id: notification.id.clone(),
        user_id: notification.user_id.clone(),
        message: notification.message.clone(),
        kind: notification.kind.clone(),
        read: notification.read,
        created_at: notification.created_at,
    }
}

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: Database,
}

impl DbNotificationRepository {
    fn col(&self) -> Collection<NotificationDoc> {
        self.db.collection(COL_NOTIFICATIONS)
    }
}

impl NotificationRepository for DbNotificationRepository {
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Notification>, AulaServiceError> {
        let cursor = self
            .col()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .limit(NOTIFICATION_CAP)
            .await
            .context("list notifications by user")?;
        let docs: Vec<NotificationDoc> =
            cursor.try_collect().await.context("collect notifications")?;
        Ok(docs.into_iter().map(notification_from_doc).collect())
    }

    async fn create(&self, notification: &Notification) -> Result<(), AulaServiceError> {
        self.col()
            .insert_one(notification_to_doc(notification))
            .await
            .context("create notification")?;
        Ok(())
    }

    async fn mark_read(&self, id: &str, user_id: &str) -> Result<bool, AulaServiceError> {
        let result = self
            .col()
            .update_one(
                doc! { "id": id, "user_id": user_id },
                doc! { "$set": { "read": true } },
            )
            .await
            .context("mark notification read")?;
        Ok(result.matched_count > 0)
    }
}
