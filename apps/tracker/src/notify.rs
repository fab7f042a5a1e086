//! Notification relay: at most one visible message per relay, auto-dismissed.
//!
//! The shell and the auth prompt each own a relay with their own timeout.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const SHELL_DISMISS_AFTER: Duration = Duration::from_secs(5);
pub const AUTH_PROMPT_DISMISS_AFTER: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

/// `generation` bumps on every `notify`.
#[derive(Debug, Default)]
struct RelaySlot {
    generation: u64,
    notification: Option<Notification>,
}

struct RelayInner {
    timeout: Duration,
    slot: watch::Sender<RelaySlot>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

#[derive(Clone)]
pub struct NotificationRelay {
    inner: Arc<RelayInner>,
}

impl NotificationRelay {
    pub fn new(timeout: Duration) -> Self {
        let (slot, _) = watch::channel(RelaySlot::default());
        Self {
            inner: Arc::new(RelayInner {
                timeout,
                slot,
                timer: Mutex::new(None),
            }),
        }
    }

    pub fn for_shell() -> Self {
        Self::new(SHELL_DISMISS_AFTER)
    }

    pub fn for_auth_prompt() -> Self {
        Self::new(AUTH_PROMPT_DISMISS_AFTER)
    }

    /// Replaces whatever is showing and restarts the dismiss timer.
    /// Must be called from within a tokio runtime.
    pub fn notify(&self, kind: NotificationKind, text: impl Into<String>) {
        let notification = Notification {
            kind,
            text: text.into(),
        };
        match kind {
            NotificationKind::Success => info!("{}", notification.text),
            NotificationKind::Error => warn!("{}", notification.text),
        }

        let mut generation = 0;
        self.inner.slot.send_modify(|slot| {
            slot.generation += 1;
            slot.notification = Some(notification);
            generation = slot.generation;
        });

        let handle = tokio::spawn(dismiss_after(
            Arc::downgrade(&self.inner),
            self.inner.timeout,
            generation,
        ));
        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.replace(handle) {
            previous.abort();
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(NotificationKind::Error, text);
    }

    pub fn dismiss(&self) {
        self.inner.slot.send_if_modified(|slot| slot.notification.take().is_some());
        let mut timer = self
            .inner
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.inner.slot.borrow().notification.clone()
    }
}

async fn dismiss_after(inner: Weak<RelayInner>, timeout: Duration, generation: u64) {
    tokio::time::sleep(timeout).await;
    let Some(inner) = inner.upgrade() else {
        return;
    };
    // Only clear the message this timer was started for.
    inner.slot.send_if_modified(|slot| {
        if slot.generation == generation && slot.notification.is_some() {
            slot.notification = None;
            true
        } else {
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_notification_dismisses_after_timeout() {
        let relay = NotificationRelay::for_shell();
        relay.error("Failed to load applications");

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(relay.current().is_some());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(relay.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notification_preempts_older() {
        let relay = NotificationRelay::for_shell();
        relay.error("X");
        tokio::time::sleep(Duration::from_secs(4)).await;
        relay.success("Y");

        // X's timer would have fired at 5s.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(
            relay.current(),
            Some(Notification {
                kind: NotificationKind::Success,
                text: "Y".into()
            })
        );

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(relay.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_prompt_relay_uses_shorter_timeout() {
        let shell = NotificationRelay::for_shell();
        let prompt = NotificationRelay::for_auth_prompt();
        shell.success("saved");
        prompt.error("Invalid credentials");

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(shell.current().is_some());
        assert_eq!(prompt.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_hides_immediately_and_stops_its_timer() {
        let relay = NotificationRelay::for_shell();
        relay.success("Login successful!");

        relay.dismiss();
        assert_eq!(relay.current(), None);

        tokio::time::sleep(Duration::from_secs(3)).await;
        relay.error("Failed to load applications");
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(
            relay.current().map(|n| n.text),
            Some("Failed to load applications".to_string())
        );
    }
}
