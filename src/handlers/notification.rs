use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::identity::CurrentUser;
use crate::domain::types::Notification;
use crate::error::AulaServiceError;
use crate::handlers::MessageResponse;
use crate::state::AppState;
use crate::usecase::notification::{ListNotificationsUseCase, MarkNotificationReadUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    #[serde(serialize_with = "crate::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn notification_response(notification: Notification) -> NotificationResponse {
    NotificationResponse {
        id: notification.id,
        user_id: notification.user_id,
        message: notification.message,
        kind: notification.kind,
        read: notification.read,
        created_at: notification.created_at,
    }
}

// ── GET /notifications ───────────────────────────────────────────────────────

pub async fn get_notifications(
    current: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificationResponse>>, AulaServiceError> {
    let usecase = ListNotificationsUseCase {
        repo: state.notification_repo(),
    };
    let notifications = usecase.execute(&current.user.id).await?;
    Ok(Json(
        notifications
            .into_iter()
            .map(notification_response)
            .collect(),
    ))
}

// ── PUT /notifications/{notification_id}/read ────────────────────────────────

pub async fn mark_notification_read(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(notification_id): Path<String>,
) -> Result<Json<MessageResponse>, AulaServiceError> {
    let usecase = MarkNotificationReadUseCase {
        repo: state.notification_repo(),
    };
    usecase.execute(&notification_id, &current.user.id).await?;
    Ok(Json(MessageResponse {
        message: "Notificación marcada como leída",
    }))
}
