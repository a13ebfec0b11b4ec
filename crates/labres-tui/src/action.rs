//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use labres_core::{Completion, FieldName, Tab, ViewState};

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
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

    // ── Navigation ────────────────────────────────────────────────
    SwitchTab(Tab),
    GoBack,
    Reload,

    // ── Input (forwarded to the controller) ───────────────────────
    EditField(FieldName, String),
    EditStartDate(String),
    EditEndDate(String),
    SearchPast,
    SubmitReservation,

    // ── Controller ────────────────────────────────────────────────
    /// A spawned request finished; reconcile it.
    RequestSettled(Completion),
    /// Fresh snapshot of the controller's view state.
    ViewUpdated(Arc<ViewState>),
    /// A reservation was created and the form cleared.
    FormCleared,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
