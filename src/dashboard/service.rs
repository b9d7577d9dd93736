use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::api::{ApiClient, ApiError};
use crate::config::PollingConfig;
use crate::models::{Notification, Stats};

use super::poller::NotificationPoller;

const STATS_PATH: &str = "/getStats";
const NOTIFICATIONS_PATH: &str = "/getNotifications";

/// Drops notifications stamped before `now - max_age`.
pub fn retain_recent(
    notifications: &mut Vec<Notification>,
    now: DateTime<Utc>,
    max_age: Duration,
) {
    let cutoff = TimeDelta::from_std(max_age)
        .ok()
        .and_then(|age| now.checked_sub_signed(age));
    if let Some(cutoff) = cutoff {
        notifications.retain(|n| n.is_recent(cutoff));
    }
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    api: ApiClient,
    interval: Duration,
    max_age: Duration,
}

impl DashboardService {
    pub fn new(api: ApiClient, polling: &PollingConfig) -> Self {
        Self {
            api,
            interval: polling.interval(),
            max_age: polling.max_age(),
        }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.api.get(STATS_PATH, None).await
    }

    /// Notifications for `user_id` that are still within the age window.
    pub async fn notifications(&self, user_id: &str) -> Result<Vec<Notification>, ApiError> {
        let mut notifications: Vec<Notification> =
            self.api.get(NOTIFICATIONS_PATH, Some(user_id)).await?;
        retain_recent(&mut notifications, Utc::now(), self.max_age);
        Ok(notifications)
    }

    /// Starts polling notifications for `user_id` at the configured interval.
    pub fn watch_notifications(&self, user_id: impl Into<String>) -> NotificationPoller {
        NotificationPoller::spawn(self.clone(), user_id.into(), self.interval)
    }
}
