//! Auto-expiring user-facing notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Default lifetime of a toast when the caller has no preference
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Queue of visible toasts, each expiring on its own schedule
#[derive(Debug)]
pub struct Toasts {
    items: VecDeque<Toast>,
    default_duration: Duration,
    max_visible: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION, 5)
    }
}

impl Toasts {
    pub fn new(default_duration: Duration, max_visible: usize) -> Self {
        Self {
            items: VecDeque::new(),
            default_duration,
            max_visible: max_visible.max(1),
        }
    }

    /// Show a toast for `duration`, returning its token
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> Uuid {
        self.push_at(Instant::now(), message, kind, duration)
    }

    /// Show a toast for the configured default duration
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> Uuid {
        self.push(message, kind, self.default_duration)
    }

    pub fn success(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(message, ToastKind::Success)
    }

    pub fn failure(&mut self, message: impl Into<String>) -> Uuid {
        self.notify(message, ToastKind::Failure)
    }

    /// Push relative to an explicit clock reading
    pub fn push_at(
        &mut self,
        now: Instant,
        message: impl Into<String>,
        kind: ToastKind,
        duration: Duration,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push_back(Toast {
            id,
            message: message.into(),
            kind,
            expires_at: now + duration,
        });
        while self.items.len() > self.max_visible {
            self.items.pop_front();
        }
        id
    }

    /// Drop every toast whose time is up; returns how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|t| !t.is_expired(now));
        before - self.items.len()
    }

    /// Remove one toast early
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        before != self.items.len()
    }

    /// Live toasts, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
