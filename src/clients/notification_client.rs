use serde::Deserialize;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::domain::Notification;
use crate::error::ApiError;
use crate::session::SessionStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnreadCount {
    unread_count: u64,
}

/// Client for the notification endpoints. Read-state changes refresh the
/// unread badge in the session store.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ApiClient,
    session: SessionStore,
}

impl NotificationClient {
    pub fn new(inner: ApiClient, session: SessionStore) -> Self {
        Self { inner, session }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Notification>, ApiError> {
        debug!("Sending request");
        self.inner.get("/notifications").await
    }

    /// Refreshes the unread badge and returns the count.
    #[instrument(skip(self))]
    pub async fn unread_count(&self) -> Result<u64, ApiError> {
        debug!("Sending request");
        let UnreadCount { unread_count } = self.inner.get("/notifications/unread-count").await?;
        self.session.set_unread_notifications(unread_count);
        Ok(unread_count)
    }

    /// Marks one notification read, then refreshes the badge.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn mark_read(&self, notification_id: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner
            .put_empty::<serde_json::Value>(format!("/notifications/{notification_id}/read"))
            .await?;
        self.unread_count().await?;
        Ok(())
    }

    /// Seller accepts the proposed meeting straight from the
    /// notification. The server rewrites the notification; callers mirror
    /// it locally via [`Notification::mark_meeting_confirmed`].
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn confirm_meeting(&self, notification_id: &str) -> Result<(), ApiError> {
        debug!("Sending request");
        self.inner
            .put_empty::<serde_json::Value>(format!(
                "/notifications/{notification_id}/confirm-meeting"
            ))
            .await?;
        self.unread_count().await?;
        Ok(())
    }

    /// Clears the whole list. A no-op when it is already empty; otherwise
    /// the badge drops to zero.
    #[instrument(skip(self, notifications), fields(count = notifications.len()))]
    #[allow(dead_code)]
    pub async fn clear_all(&self, notifications: &[Notification]) -> Result<(), ApiError> {
        if notifications.is_empty() {
            return Ok(());
        }

        debug!("Sending request");
        self.inner
            .delete::<serde_json::Value>("/notifications/clear-all")
            .await?;
        self.session.set_unread_notifications(0);
        Ok(())
    }
}
