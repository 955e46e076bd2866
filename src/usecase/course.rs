use chrono::Utc;
use uuid::Uuid;

use crate::domain::access_code::new_access_code;
use crate::domain::repository::{
    CourseChanges, CourseRepository, EnrollmentRepository, GradeRepository, UserRepository,
};
use crate::domain::types::{Course, Role, User};
use crate::error::AulaServiceError;

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub name: String,
    pub code: String,
    pub description: String,
    pub academic_period: String,
}

pub struct CreateCourseUseCase<C: CourseRepository> {
    pub repo: C,
}

impl<C: CourseRepository> CreateCourseUseCase<C> {
    pub async fn execute(
        &self,
        teacher_id: &str,
        input: CreateCourseInput,
    ) -> Result<Course, AulaServiceError> {
        if self.repo.find_by_code(&input.code).await?.is_some() {
            return Err(AulaServiceError::CourseCodeTaken);
        }

        let course = Course {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            code: input.code,
            description: input.description,
            teacher_id: teacher_id.to_owned(),
            academic_period: input.academic_period,
            access_code: new_access_code(),
            created_at: Utc::now(),
        };
        self.repo.create(&course).await?;
        Ok(course)
    }
}

// ── ListTeacherCourses ───────────────────────────────────────────────────────

pub struct ListTeacherCoursesUseCase<C: CourseRepository> {
    pub repo: C,
}

impl<C: CourseRepository> ListTeacherCoursesUseCase<C> {
    pub async fn execute(&self, teacher_id: &str) -> Result<Vec<Course>, AulaServiceError> {
        self.repo.list_by_teacher(teacher_id).await
    }
}

// ── ListStudentCourses ───────────────────────────────────────────────────────

pub struct ListStudentCoursesUseCase<C: CourseRepository, E: EnrollmentRepository> {
    pub courses: C,
    pub enrollments: E,
}

impl<C: CourseRepository, E: EnrollmentRepository> ListStudentCoursesUseCase<C, E> {
    pub async fn execute(&self, student_id: &str) -> Result<Vec<Course>, AulaServiceError> {
        let enrollments = self.enrollments.list_by_student(student_id).await?;
        let course_ids: Vec<String> = enrollments.into_iter().map(|e| e.course_id).collect();
        if course_ids.is_empty() {
            return Ok(vec![]);
        }
        self.courses.list_by_ids(&course_ids).await
    }
}

// ── GetCourse ────────────────────────────────────────────────────────────────

pub struct GetCourseUseCase<C: CourseRepository, E: EnrollmentRepository> {
    pub courses: C,
    pub enrollments: E,
}

impl<C: CourseRepository, E: EnrollmentRepository> GetCourseUseCase<C, E> {
    /// Teachers must own the course; students must be enrolled in it.
    pub async fn execute(
        &self,
        course_id: &str,
        caller_id: &str,
        caller_role: Role,
    ) -> Result<Course, AulaServiceError> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or(AulaServiceError::CourseNotFound)?;

        match caller_role {
            Role::Teacher => {
                if course.teacher_id != caller_id {
                    return Err(AulaServiceError::NotCourseOwner);
                }
            }
            Role::Student => {
                self.enrollments
                    .find_by_student_course(caller_id, course_id)
                    .await?
                    .ok_or(AulaServiceError::NotEnrolled)?;
            }
        }
        Ok(course)
    }
}

/// Resolve a course and check the teacher owns it. Non-owned courses are
/// reported as missing, not forbidden.
pub async fn owned_course<C: CourseRepository>(
    repo: &C,
    course_id: &str,
    teacher_id: &str,
) -> Result<Course, AulaServiceError> {
    let course = repo
        .find_by_id(course_id)
        .await?
        .ok_or(AulaServiceError::CourseNotFound)?;
    if course.teacher_id != teacher_id {
        return Err(AulaServiceError::CourseNotFound);
    }
    Ok(course)
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

pub struct UpdateCourseUseCase<C: CourseRepository> {
    pub repo: C,
}

impl<C: CourseRepository> UpdateCourseUseCase<C> {
    pub async fn execute(
        &self,
        course_id: &str,
        teacher_id: &str,
        changes: CourseChanges,
    ) -> Result<Course, AulaServiceError> {
        let course = owned_course(&self.repo, course_id, teacher_id).await?;

        if changes.code != course.code && self.repo.find_by_code(&changes.code).await?.is_some() {
            return Err(AulaServiceError::CourseCodeTaken);
        }

        self.repo.update(course_id, &changes).await?;
        self.repo
            .find_by_id(course_id)
            .await?
            .ok_or(AulaServiceError::CourseNotFound)
    }
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

pub struct DeleteCourseUseCase<C, E, G>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    G: GradeRepository,
{
    pub courses: C,
    pub enrollments: E,
    pub grades: G,
}

impl<C, E, G> DeleteCourseUseCase<C, E, G>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    G: GradeRepository,
{
    /// Deletes the course, then cascades to its enrollments and grades.
    /// The cascade is sequential and not atomic; a crash mid-way can leave
    /// orphaned enrollment or grade documents.
    pub async fn execute(&self, course_id: &str, teacher_id: &str) -> Result<(), AulaServiceError> {
        owned_course(&self.courses, course_id, teacher_id).await?;

        self.courses.delete(course_id).await?;
        self.enrollments.delete_by_course(course_id).await?;
        self.grades.delete_by_course(course_id).await?;
        Ok(())
    }
}

// ── ListCourseStudents ───────────────────────────────────────────────────────

pub struct ListCourseStudentsUseCase<C, E, U>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
{
    pub courses: C,
    pub enrollments: E,
    pub users: U,
}

impl<C, E, U> ListCourseStudentsUseCase<C, E, U>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    U: UserRepository,
{
    pub async fn execute(
        &self,
        course_id: &str,
        teacher_id: &str,
    ) -> Result<Vec<User>, AulaServiceError> {
        owned_course(&self.courses, course_id, teacher_id).await?;

        let enrollments = self.enrollments.list_by_course(course_id).await?;
        let student_ids: Vec<String> = enrollments.into_iter().map(|e| e.student_id).collect();
        if student_ids.is_empty() {
            return Ok(vec![]);
        }
        self.users.find_by_ids(&student_ids).await
    }
}
