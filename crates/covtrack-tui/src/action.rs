//! All possible UI actions. Actions are the sole mechanism for state mutation.

use covtrack_core::{FetchOutcome, Metric, TimeWindow};

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,

    // ── Data (from the fetch tasks) ───────────────────────────────
    Fetched(FetchOutcome),

    // ── Selection ─────────────────────────────────────────────────
    SelectMetric(Metric),
    SelectWindow(TimeWindow),
    NextState,
    PrevState,
    SelectNational,

    // ── Scrubbing ─────────────────────────────────────────────────
    /// Pointer is over record `index` of the active series.
    Scrub(usize),
    /// Move the scrub position by this many records.
    ScrubStep(isize),
    /// Jump to the first visible record.
    ScrubFirst,
    /// Back to the most recent record.
    ScrubLatest,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
