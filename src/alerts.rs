//! Time-sliced notification queue.
//!
//! Alerts are posted by every other component to report outcomes and are
//! shown for a fixed number of display cycles determined by their level.
//! The queue is either Idle (nothing scheduled) or Cycling (one redraw
//! per interval); posting into an idle queue starts a cycle, and the
//! queue drains back to Idle on its own. The `cycling` flag guarantees
//! at most one redraw driver exists at any time.
//!
//! Each `tick` clears the alert region and re-renders every live alert
//! newest-first, so fresh failures sit on top of older notices.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::render::RenderSurface;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warn,
    Error,
    Success,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Warn => "warning",
            AlertLevel::Error => "error",
            AlertLevel::Success => "success",
        }
    }
}

/// How long each level stays on screen, in display cycles, and how far
/// apart the cycles are. Info and success notices outlive warnings and
/// errors by default; that is display policy, not a constraint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CyclePolicy {
    pub interval_ms: u64,
    pub info_cycles: u32,
    pub warn_cycles: u32,
    pub error_cycles: u32,
    pub success_cycles: u32,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            info_cycles: 8,
            warn_cycles: 5,
            error_cycles: 5,
            success_cycles: 10,
        }
    }
}

impl CyclePolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn budget(&self, level: AlertLevel) -> u32 {
        match level {
            AlertLevel::Info => self.info_cycles,
            AlertLevel::Warn => self.warn_cycles,
            AlertLevel::Error => self.error_cycles,
            AlertLevel::Success => self.success_cycles,
        }
    }
}

/// A single notification, owned by the queue for its lifetime.
#[derive(Debug, Clone)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub remaining_cycles: u32,
}

/// Queue scheduling state reported by `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Idle,
    Cycling,
}

/// Insertion-ordered alert queue with single-driver cycling.
#[derive(Debug, Default)]
pub struct AlertQueue {
    active: Vec<Alert>,
    cycling: bool,
    policy: CyclePolicy,
}

impl AlertQueue {
    pub fn new(policy: CyclePolicy) -> Self {
        Self {
            active: Vec::new(),
            cycling: false,
            policy,
        }
    }

    /// Append an alert with its level's cycle budget. Returns true when
    /// the queue was Idle and a redraw driver must now be started;
    /// while Cycling, posting never schedules a second driver.
    pub fn post(&mut self, level: AlertLevel, message: impl Into<String>) -> bool {
        let message = message.into();
        debug!(level = level.as_str(), %message, "new alert");
        self.active.push(Alert {
            level,
            message,
            remaining_cycles: self.policy.budget(level),
        });
        if self.cycling {
            false
        } else {
            self.cycling = true;
            true
        }
    }

    pub fn info(&mut self, message: impl Into<String>) -> bool {
        self.post(AlertLevel::Info, message)
    }

    pub fn warn(&mut self, message: impl Into<String>) -> bool {
        self.post(AlertLevel::Warn, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> bool {
        self.post(AlertLevel::Error, message)
    }

    pub fn success(&mut self, message: impl Into<String>) -> bool {
        self.post(AlertLevel::Success, message)
    }

    /// One display cycle: clear the alert region, re-render every live
    /// alert newest-first, charge each one a cycle, and drop the
    /// exhausted. Returns Idle once the queue drains, which also clears
    /// the cycling flag so the driver stops.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> QueueState {
        surface.clear_alerts();

        if self.active.is_empty() {
            self.cycling = false;
            return QueueState::Idle;
        }

        for alert in self.active.iter_mut().rev() {
            surface.show_alert(alert.level, &alert.message);
            alert.remaining_cycles = alert.remaining_cycles.saturating_sub(1);
        }
        self.active.retain(|alert| alert.remaining_cycles > 0);

        QueueState::Cycling
    }

    pub fn is_cycling(&self) -> bool {
        self.cycling
    }

    pub fn interval(&self) -> Duration {
        self.policy.interval()
    }

    /// Number of alerts still holding display budget.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
