use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    auth::{forgot_password, get_me, login, register, reset_password},
    course::{
        create_course, delete_course, enroll_in_course, get_course, get_course_students,
        get_student_courses, get_teacher_courses, update_course,
    },
    grade::{export_grades, get_course_grades, get_student_grade, upsert_grade},
    notification::{get_notifications, mark_notification_read},
};
use crate::health::{healthz, readyz};
use crate::middleware::request_id_layer;
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/me", get(get_me))
        // Courses
        .route("/courses", post(create_course))
        .route("/courses/teacher", get(get_teacher_courses))
        .route("/courses/student", get(get_student_courses))
        .route("/courses/enroll", post(enroll_in_course))
        .route("/courses/{course_id}", get(get_course))
        .route("/courses/{course_id}", put(update_course))
        .route("/courses/{course_id}", delete(delete_course))
        .route("/courses/{course_id}/students", get(get_course_students))
        // Grades
        .route("/grades", post(upsert_grade))
        .route("/grades/course/{course_id}", get(get_course_grades))
        .route("/grades/student/course/{course_id}", get(get_student_grade))
        .route("/grades/export/{course_id}", get(export_grades))
        // Notifications
        .route("/notifications", get(get_notifications))
        .route(
            "/notifications/{notification_id}/read",
            put(mark_notification_read),
        );

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}
