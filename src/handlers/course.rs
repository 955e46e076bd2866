use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::identity::CurrentUser;
use crate::domain::repository::CourseChanges;
use crate::domain::types::Course;
use crate::error::AulaServiceError;
use crate::handlers::MessageResponse;
use crate::handlers::auth::{UserResponse, user_response};
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCourseStudentsUseCase, ListStudentCoursesUseCase, ListTeacherCoursesUseCase,
    UpdateCourseUseCase,
};
use crate::usecase::enrollment::EnrollUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub teacher_id: String,
    pub academic_period: String,
    pub access_code: String,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn course_response(course: Course) -> CourseResponse {
    CourseResponse {
        id: course.id,
        name: course.name,
        code: course.code,
        description: course.description,
        teacher_id: course.teacher_id,
        academic_period: course.academic_period,
        access_code: course.access_code,
        created_at: course.created_at,
    }
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CourseRequest {
    pub name: String,
    pub code: String,
    pub description: String,
    pub academic_period: String,
}

pub async fn create_course(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), AulaServiceError> {
    current.require_teacher()?;
    let usecase = CreateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            &current.user.id,
            CreateCourseInput {
                name: body.name,
                code: body.code,
                description: body.description,
                academic_period: body.academic_period,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(course_response(course))))
}

// ── GET /courses/teacher ─────────────────────────────────────────────────────

pub async fn get_teacher_courses(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = ListTeacherCoursesUseCase {
        repo: state.course_repo(),
    };
    let courses = usecase.execute(&current.user.id).await?;
    Ok(Json(courses.into_iter().map(course_response).collect()))
}

// ── GET /courses/student ─────────────────────────────────────────────────────

pub async fn get_student_courses(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AulaServiceError> {
    current.require_student()?;
    let usecase = ListStudentCoursesUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
    };
    let courses = usecase.execute(&current.user.id).await?;
    Ok(Json(courses.into_iter().map(course_response).collect()))
}

// ── GET /courses/{course_id} ─────────────────────────────────────────────────

pub async fn get_course(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<CourseResponse>, AulaServiceError> {
    let usecase = GetCourseUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
    };
    let course = usecase
        .execute(&course_id, &current.user.id, current.user.role)
        .await?;
    Ok(Json(course_response(course)))
}

// ── PUT /courses/{course_id} ─────────────────────────────────────────────────

pub async fn update_course(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(body): Json<CourseRequest>,
) -> Result<Json<CourseResponse>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = UpdateCourseUseCase {
        repo: state.course_repo(),
    };
    let course = usecase
        .execute(
            &course_id,
            &current.user.id,
            CourseChanges {
                name: body.name,
                code: body.code,
                description: body.description,
                academic_period: body.academic_period,
            },
        )
        .await?;
    Ok(Json(course_response(course)))
}

// ── DELETE /courses/{course_id} ──────────────────────────────────────────────

pub async fn delete_course(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<MessageResponse>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = DeleteCourseUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
        grades: state.grade_repo(),
    };
    usecase.execute(&course_id, &current.user.id).await?;
    Ok(Json(MessageResponse {
        message: "Curso eliminado",
    }))
}

// ── POST /courses/enroll ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EnrollRequest {
    pub access_code: String,
}

#[derive(Serialize)]
pub struct EnrollResponse {
    pub message: &'static str,
    pub course: CourseResponse,
}

pub async fn enroll_in_course(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<EnrollResponse>), AulaServiceError> {
    current.require_student()?;
    let usecase = EnrollUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
        grades: state.grade_repo(),
    };
    let course = usecase.execute(&current.user, &body.access_code).await?;
    Ok((
        StatusCode::CREATED,
        Json(EnrollResponse {
            message: "Inscripción exitosa",
            course: course_response(course),
        }),
    ))
}

// ── GET /courses/{course_id}/students ────────────────────────────────────────

pub async fn get_course_students(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> Result<Json<Vec<UserResponse>>, AulaServiceError> {
    current.require_teacher()?;
    let usecase = ListCourseStudentsUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
        users: state.user_repo(),
    };
    let students = usecase.execute(&course_id, &current.user.id).await?;
    Ok(Json(students.into_iter().map(user_response).collect()))
}
