use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::models::Notification;

use super::service::{retain_recent, DashboardService};

/// Background task refreshing one user's notifications.
///
/// Stops when dropped.
#[derive(Debug)]
pub struct NotificationPoller {
    rx: watch::Receiver<Vec<Notification>>,
    task: JoinHandle<()>,
}

impl NotificationPoller {
    pub(crate) fn spawn(
        service: DashboardService,
        user_id: String,
        interval: Duration,
    ) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match service.notifications(&user_id).await {
                    Ok(fresh) => {
                        tracing::debug!(
                            user_id = %user_id,
                            count = fresh.len(),
                            "Notifications refreshed"
                        );
                        tx.send_replace(fresh);
                    }
                    Err(e) => {
                        tracing::warn!(
                            user_id = %user_id,
                            error = %e,
                            "Notification refresh failed"
                        );
                        tx.send_modify(|current| {
                            retain_recent(current, Utc::now(), service.max_age())
                        });
                    }
                }
            }
        });
        Self { rx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Notification>> {
        self.rx.clone()
    }

    /// Most recently published list.
    pub fn latest(&self) -> Vec<Notification> {
        self.rx.borrow().clone()
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
