use serde::Serialize;

pub mod auth;
pub mod course;
pub mod grade;
pub mod notification;

/// Plain confirmation body used by message-only endpoints.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
