use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, header},
};
use serde::{Deserialize, Serialize};

use crate::auth::identity::CurrentUser;
use crate::domain::types::{Grade, NOTIFICATION_KIND_GRADE_UPDATE};
use crate::error::AulaServiceError;
use crate::report::render_pdf;
use crate::state::AppState;
use crate::usecase::grade::{
    ExportGradesUseCase, GetStudentGradeUseCase, ListCourseGradesUseCase, UpsertGradeInput,
    UpsertGradeUseCase,
};
use crate::usecase::notification::CreateNotificationUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct GradeResponse {
    pub id: String,
    pub enrollment_id: String,
    pub course_id: String,
    pub student_id: String,
    pub student_name: String,
    pub corte1: Option<f64>,
    pub corte2: Option<f64>,
    pub corte3: Option<f64>,
    pub final_grade: Option<f64>,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

fn grade_response(grade: Grade) -> GradeResponse {
    GradeResponse {
        id: grade.id,
        enrollment_id: grade.enrollment_id,
        course_id: grade.course_id,
        student_id: grade.student_id,
        student_name: grade.student_name,
        corte1: grade.corte1,
        corte2: grade.corte2,
        corte3: grade.corte3,
        final_grade: grade.final_grade,
        last_updated: grade.last_updated,
    }
}

// ── POST /grades ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpsertGradeRequest {
    pub enrollment_id: String,
    pub corte1: Option<f64>,
    pub corte2: Option<f64>,
    pub corte3: Option<f64>,
}

pub async fn upsert_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<UpsertGradeRequest>,
) -> Result<Json<GradeResponse>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = UpsertGradeUseCase {
        enrollments: state.enrollment_repo(),
        courses: state.course_repo(),
        grades: state.grade_repo(),
    };
    let out = usecase
        .execute(
            &current.user.id,
            UpsertGradeInput {
                enrollment_id: body.enrollment_id,
                corte1: body.corte1,
                corte2: body.corte2,
                corte3: body.corte3,
            },
        )
        .await?;

    // Best-effort notification to the student; does not block the response
    // and its failure is only visible in the logs.
    let repo = state.notification_repo();
    let student_id = out.grade.student_id.clone();
    let message = format!("Nueva calificación registrada en {}", out.course.name);
    tokio::spawn(async move {
        let usecase = CreateNotificationUseCase { repo };
        if let Err(e) = usecase
            .execute(&student_id, message, NOTIFICATION_KIND_GRADE_UPDATE)
            .await
        {
            tracing::warn!(error = %e, "grade-update notification failed");
        }
    });

    Ok(Json(grade_response(out.grade)))
}

// ── GET /grades/course/{course_id} ───────────────────────────────────────────

pub async fn get_course_grades(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<GradeResponse>>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = ListCourseGradesUseCase {
        courses: state.course_repo(),
        grades: state.grade_repo(),
    };
    let grades = usecase.execute(&course_id, &current.user.id).await?;
    Ok(Json(grades.into_iter().map(grade_response).collect()))
}

// ── GET /grades/student/course/{course_id} ───────────────────────────────────

pub async fn get_student_grade(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<GradeResponse>, AulaServiceError> {
    current.require_student()?;
    let usecase = GetStudentGradeUseCase {
        grades: state.grade_repo(),
    };
    let grade = usecase.execute(&course_id, &current.user.id).await?;
    Ok(Json(grade_response(grade)))
}

// ── GET /grades/export/{course_id} ───────────────────────────────────────────

pub async fn export_grades(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<(HeaderMap, Vec<u8>), AulaServiceError> {
    current.require_teacher()?;
    let usecase = ExportGradesUseCase {
        courses: state.course_repo(),
        grades: state.grade_repo(),
    };
    let (course, grades) = usecase.execute(&course_id, &current.user.id).await?;

    let bytes = render_pdf(&course, &grades)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!("attachment; filename=calificaciones_{}.pdf", course.code);
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AulaServiceError::Internal(anyhow::anyhow!("content disposition: {e}")))?,
    );
    Ok((headers, bytes))
}
