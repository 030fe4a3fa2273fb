//! Dialog and notification host the editor reports to.

use crate::core::session::WorkflowId;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use colored::*;
use indicatif::ProgressBar;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient banner shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Hosts the edit dialog: opening and closing it, blocking alerts, banners and page reloads.
pub trait ModalHost: Send + Sync {
    fn open(&self, id: &WorkflowId);
    fn close(&self, id: &WorkflowId);
    /// Blocking message the user must acknowledge
    fn alert(&self, message: &str);
    fn notify(&self, notification: Notification);
    /// Reloads the hosting page so it shows the stored state
    fn reload(&self);
}

#[derive(Debug)]
struct Banner {
    notification: Notification,
    expires_at: DateTime<Utc>,
}

/// Terminal host: banners are printed in color and kept until their dismiss time passes.
#[derive(Debug)]
pub struct ConsoleHost {
    success_dismiss: Duration,
    error_dismiss: Duration,
    banners: Mutex<Vec<Banner>>,
    open_dialog: Mutex<Option<WorkflowId>>,
    reloads: Mutex<usize>,
}

impl ConsoleHost {
    pub fn new(success_dismiss: Duration, error_dismiss: Duration) -> Self {
        Self {
            success_dismiss,
            error_dismiss,
            banners: Mutex::new(Vec::new()),
            open_dialog: Mutex::new(None),
            reloads: Mutex::new(0),
        }
    }

    /// Banners that have not been dismissed yet
    pub fn active_notifications(&self) -> Vec<Notification> {
        let now = Utc::now();
        let mut banners = match self.banners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        banners.retain(|b| b.expires_at > now);
        banners.iter().map(|b| b.notification.clone()).collect()
    }

    pub fn open_dialog(&self) -> Option<WorkflowId> {
        match self.open_dialog.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of reloads requested so far
    pub fn reload_count(&self) -> usize {
        match self.reloads.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Spinner displayed while a save request is in flight
    pub fn busy_spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }

    fn dismiss_after(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::Success => self.success_dismiss,
            NotificationKind::Error => self.error_dismiss,
        }
    }
}

impl ModalHost for ConsoleHost {
    fn open(&self, id: &WorkflowId) {
        debug!("Opening edit dialog for workflow {}", id);
        if let Ok(mut guard) = self.open_dialog.lock() {
            *guard = Some(id.clone());
        }
    }

    fn close(&self, id: &WorkflowId) {
        debug!("Closing edit dialog for workflow {}", id);
        if let Ok(mut guard) = self.open_dialog.lock() {
            if guard.as_ref() == Some(id) {
                *guard = None;
            }
        }
    }

    fn alert(&self, message: &str) {
        warn!("{}", message);
        println!("{}", format!("⚠ {}", message).yellow().bold());
    }

    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!("{}", notification.message);
                println!("{}", format!("✔ {}", notification.message).green());
            }
            NotificationKind::Error => {
                warn!("{}", notification.message);
                println!("{}", format!("✖ {}", notification.message).red());
            }
        }

        let ttl = ChronoDuration::from_std(self.dismiss_after(notification.kind))
            .unwrap_or_else(|_| ChronoDuration::seconds(5));
        let mut banners = match self.banners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        banners.push(Banner {
            notification,
            expires_at: Utc::now() + ttl,
        });
    }

    fn reload(&self) {
        info!("Reloading workflow list");
        if let Ok(mut guard) = self.reloads.lock() {
            *guard += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banners_expire_after_their_dismiss_time() {
        let host = ConsoleHost::new(Duration::from_secs(60), Duration::ZERO);
        host.notify(Notification::success("Workflow saved successfully!"));
        host.notify(Notification::error("Failed to save workflow: db locked"));

        let active = host.active_notifications();
        assert_eq!(active, vec![Notification::success("Workflow saved successfully!")]);
    }

    #[test]
    fn close_only_affects_the_open_dialog() {
        let host = ConsoleHost::new(Duration::from_secs(3), Duration::from_secs(5));
        host.open(&"4".into());
        host.close(&"5".into());
        assert_eq!(host.open_dialog(), Some(WorkflowId::from("4")));
        host.close(&"4".into());
        assert_eq!(host.open_dialog(), None);

        host.reload();
        assert_eq!(host.reload_count(), 1);
    }
}
