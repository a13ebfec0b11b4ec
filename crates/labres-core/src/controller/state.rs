// ── View state ──

use chrono::NaiveDate;
use serde::Serialize;
use strum::Display;

use crate::model::{DateRangeFilter, FormFields, Reservation};
use crate::time;

/// The three views. Each also names the request slot it owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Tab {
    #[default]
    Current,
    Past,
    New,
}

impl Tab {
    pub const ALL: [Self; 3] = [Self::Current, Self::Past, Self::New];

    pub fn index(self) -> usize {
        match self {
            Self::Current => 0,
            Self::Past => 1,
            Self::New => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        match self {
            Self::Current => Self::Past,
            Self::Past => Self::New,
            Self::New => Self::Current,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Current => Self::New,
            Self::Past => Self::Current,
            Self::New => Self::Past,
        }
    }
}

/// Everything a view needs to render. Written only by `ViewController`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_tab: Tab,
    /// Replaced wholesale on each successful fetch, kept on failure.
    pub reservations: Vec<Reservation>,
    /// True exactly while a request for `active_tab` is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub date_range: DateRangeFilter,
    pub form: FormFields,
    /// One-shot message, consumed by `ViewController::take_notification`.
    pub notification: Option<String>,
}

impl ViewState {
    /// Session start: Current tab, both dates on `today`, nothing loaded.
    pub fn new(today: NaiveDate) -> Self {
        let today = time::format_date(today);
        Self {
            active_tab: Tab::Current,
            reservations: Vec::new(),
            loading: false,
            error: None,
            date_range: DateRangeFilter::new(today.clone(), today),
            form: FormFields::default(),
            notification: None,
        }
    }
}
