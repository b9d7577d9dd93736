//! Administrator statistics and per-user notifications.

mod poller;
mod service;

pub use poller::NotificationPoller;
pub use service::{retain_recent, DashboardService};
