use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{CourseRepository, EnrollmentRepository, GradeRepository};
use crate::domain::types::{Course, Enrollment, Grade, User};
use crate::error::AulaServiceError;

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<C, E, G>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    G: GradeRepository,
{
    pub courses: C,
    pub enrollments: E,
    pub grades: G,
}

impl<C, E, G> EnrollUseCase<C, E, G>
where
    C: CourseRepository,
    E: EnrollmentRepository,
    G: GradeRepository,
{
    /// Redeem an access code: creates the enrollment plus its empty grade
    /// record (all score fields null, student name snapshotted).
    pub async fn execute(
        &self,
        student: &User,
        access_code: &str,
    ) -> Result<Course, AulaServiceError> {
        let course = self
            .courses
            .find_by_access_code(access_code)
            .await?
            .ok_or(AulaServiceError::InvalidAccessCode)?;

        if self
            .enrollments
            .find_by_student_course(&student.id, &course.id)
            .await?
            .is_some()
        {
            return Err(AulaServiceError::AlreadyEnrolled);
        }

        let now = Utc::now();
        let enrollment = Enrollment {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            course_id: course.id.clone(),
            enrolled_at: now,
        };
        self.enrollments.create(&enrollment).await?;

        let grade = Grade {
            id: Uuid::new_v4().to_string(),
            enrollment_id: enrollment.id.clone(),
            course_id: course.id.clone(),
            student_id: student.id.clone(),
            student_name: student.full_name.clone(),
            corte1: None,
            corte2: None,
            corte3: None,
            final_grade: None,
            last_updated: now,
        };
        self.grades.create(&grade).await?;

        Ok(course)
    }
}
