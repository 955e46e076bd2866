use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::NotificationRepository;
use crate::domain::types::Notification;
use crate::error::AulaServiceError;

// ── ListNotifications ────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> ListNotificationsUseCase<N> {
    pub async fn execute(&self, user_id: &str) -> Result<Vec<Notification>, AulaServiceError> {
        self.repo.list_by_user(user_id).await
    }
}

// ── MarkNotificationRead ─────────────────────────────────────────────────────

pub struct MarkNotificationReadUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> MarkNotificationReadUseCase<N> {
    /// A notification owned by someone else is indistinguishable from a
    /// missing one.
    pub async fn execute(&self, id: &str, user_id: &str) -> Result<(), AulaServiceError> {
        if !self.repo.mark_read(id, user_id).await? {
            return Err(AulaServiceError::NotificationNotFound);
        }
        Ok(())
    }
}

// ── CreateNotification ───────────────────────────────────────────────────────

pub struct CreateNotificationUseCase<N: NotificationRepository> {
    pub repo: N,
}

impl<N: NotificationRepository> CreateNotificationUseCase<N> {
    pub async fn execute(
        &self,
        user_id: &str,
        message: String,
        kind: &str,
    ) -> Result<(), AulaServiceError> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_owned(),
            message,
            kind: kind.to_owned(),
            read: false,
            created_at: Utc::now(),
        };
        self.repo.create(&notification).await
    }
}
