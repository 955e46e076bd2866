use chrono::Utc;

use crate::domain::grade::{compute_final, score_in_range};
use crate::domain::repository::{
    CourseRepository, EnrollmentRepository, GradeRepository, GradeUpdate,
};
use crate::domain::types::{Course, Grade};
use crate::error::AulaServiceError;
use crate::usecase::course::owned_course;

// ── UpsertGrade ──────────────────────────────────────────────────────────────

pub struct UpsertGradeInput {
    pub enrollment_id: String,
    pub corte1: Option<f64>,
    pub corte2: Option<f64>,
    pub corte3: Option<f64>,
}

#[derive(Debug)]
pub struct UpsertGradeOutput {
    pub grade: Grade,
    pub course: Course,
}

pub struct UpsertGradeUseCase<E, C, G>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    G: GradeRepository,
{
    pub enrollments: E,
    pub courses: C,
    pub grades: G,
}

impl<E, C, G> UpsertGradeUseCase<E, C, G>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    G: GradeRepository,
{
    /// Apply a partial score update: supplied cortes replace stored ones,
    /// unset cortes are read from the existing record, then the final grade
    /// is recomputed. Range validation happens before any write.
    pub async fn execute(
        &self,
        teacher_id: &str,
        input: UpsertGradeInput,
    ) -> Result<UpsertGradeOutput, AulaServiceError> {
        for score in [input.corte1, input.corte2, input.corte3].into_iter().flatten() {
            if !score_in_range(score) {
                return Err(AulaServiceError::GradeOutOfRange);
            }
        }

        let enrollment = self
            .enrollments
            .find_by_id(&input.enrollment_id)
            .await?
            .ok_or(AulaServiceError::EnrollmentNotFound)?;

        let course = self
            .courses
            .find_by_id(&enrollment.course_id)
            .await?
            .filter(|c| c.teacher_id == teacher_id)
            .ok_or(AulaServiceError::NotCourseOwner)?;

        let existing = self
            .grades
            .find_by_enrollment(&input.enrollment_id)
            .await?
            .ok_or(AulaServiceError::GradeNotFound)?;

        let corte1 = input.corte1.or(existing.corte1);
        let corte2 = input.corte2.or(existing.corte2);
        let corte3 = input.corte3.or(existing.corte3);

        let update = GradeUpdate {
            corte1: input.corte1,
            corte2: input.corte2,
            corte3: input.corte3,
            final_grade: compute_final(corte1, corte2, corte3),
            last_updated: Utc::now(),
        };
        self.grades
            .update_scores(&input.enrollment_id, &update)
            .await?;

        let grade = self
            .grades
            .find_by_enrollment(&input.enrollment_id)
            .await?
            .ok_or(AulaServiceError::GradeNotFound)?;

        Ok(UpsertGradeOutput { grade, course })
    }
}

// ── ListCourseGrades ─────────────────────────────────────────────────────────

pub struct ListCourseGradesUseCase<C: CourseRepository, G: GradeRepository> {
    pub courses: C,
    pub grades: G,
}

impl<C: CourseRepository, G: GradeRepository> ListCourseGradesUseCase<C, G> {
    pub async fn execute(
        &self,
        course_id: &str,
        teacher_id: &str,
    ) -> Result<Vec<Grade>, AulaServiceError> {
        owned_course(&self.courses, course_id, teacher_id).await?;
        self.grades.list_by_course(course_id).await
    }
}

// ── GetStudentGrade ──────────────────────────────────────────────────────────

pub struct GetStudentGradeUseCase<G: GradeRepository> {
    pub grades: G,
}

impl<G: GradeRepository> GetStudentGradeUseCase<G> {
    pub async fn execute(
        &self,
        course_id: &str,
        student_id: &str,
    ) -> Result<Grade, AulaServiceError> {
        self.grades
            .find_by_course_student(course_id, student_id)
            .await?
            .ok_or(AulaServiceError::GradeNotFound)
    }
}

// ── ExportGrades ─────────────────────────────────────────────────────────────

pub struct ExportGradesUseCase<C: CourseRepository, G: GradeRepository> {
    pub courses: C,
    pub grades: G,
}

impl<C: CourseRepository, G: GradeRepository> ExportGradesUseCase<C, G> {
    pub async fn execute(
        &self,
        course_id: &str,
        teacher_id: &str,
    ) -> Result<(Course, Vec<Grade>), AulaServiceError> {
        let course = owned_course(&self.courses, course_id, teacher_id).await?;
        let grades = self.grades.list_by_course(course_id).await?;
        Ok((course, grades))
    }
}
