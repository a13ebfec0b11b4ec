//! New tab: the reservation form.
//!
//! Text fields for email, name and student ID; a laboratory selector; a
//! time picker made of a date input and an hour selector limited to the
//! booking hours. Every change is forwarded to the controller, which owns
//! the form and validates it on submit.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use strum::IntoEnumIterator;
use throbber_widgets_tui::{Throbber, ThrobberState};

use labres_core::time::{self, BOOKING_HOURS};
use labres_core::{FieldName, Laboratory, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::input::{FIELD_HEIGHT, render_input_field, render_selector};

const LAB_PLACEHOLDER: &str = "Select Laboratory";
const HOUR_PLACEHOLDER: &str = "Select hour";

/// Which form widget has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Email,
    Name,
    StudentId,
    Laboratory,
    Date,
    Hour,
}

impl FormField {
    const ALL: [Self; 6] = [
        Self::Email,
        Self::Name,
        Self::StudentId,
        Self::Laboratory,
        Self::Date,
        Self::Hour,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&f| f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Step a selector index over `0..len`, wrapping at both ends.
fn cycle(index: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (index, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

pub struct NewReservationScreen {
    focused: bool,
    state: Arc<ViewState>,
    active_field: FormField,
    email: String,
    name: String,
    student_id: String,
    /// `None` while the placeholder is showing.
    lab: Option<usize>,
    date_input: String,
    /// Index into `BOOKING_HOURS`; `None` until picked.
    hour: Option<usize>,
    labs: Vec<Laboratory>,
    hours: Vec<u32>,
    throbber_state: ThrobberState,
}

impl NewReservationScreen {
    pub fn new(state: Arc<ViewState>) -> Self {
        Self {
            focused: false,
            state,
            active_field: FormField::Email,
            email: String::new(),
            name: String::new(),
            student_id: String::new(),
            lab: None,
            date_input: time::format_date(time::today()),
            hour: None,
            labs: Laboratory::iter().collect(),
            hours: BOOKING_HOURS.collect(),
            throbber_state: ThrobberState::default(),
        }
    }

    fn reset(&mut self) {
        self.email.clear();
        self.name.clear();
        self.student_id.clear();
        self.lab = None;
        self.hour = None;
        self.active_field = FormField::Email;
    }

    fn text_input_mut(&mut self) -> Option<(FieldName, &mut String)> {
        match self.active_field {
            FormField::Email => Some((FieldName::Email, &mut self.email)),
            FormField::Name => Some((FieldName::Name, &mut self.name)),
            FormField::StudentId => Some((FieldName::StudentId, &mut self.student_id)),
            FormField::Date => Some((FieldName::ReservationTime, &mut self.date_input)),
            FormField::Laboratory | FormField::Hour => None,
        }
    }

    fn lab_label(&self) -> String {
        self.lab
            .and_then(|i| self.labs.get(i))
            .map_or_else(String::new, ToString::to_string)
    }

    fn hour_label(&self) -> Option<String> {
        self.hour
            .and_then(|i| self.hours.get(i))
            .map(|h| format!("{h:02}:00"))
    }

    /// Picker output `YYYY-MM-DD HH:00`, empty until both parts are set.
    /// An unparsable date goes through as typed so validation can name it.
    fn reservation_time(&self) -> String {
        let date = self.date_input.trim();
        let Some(hour) = self.hour else {
            return String::new();
        };
        if date.is_empty() {
            return String::new();
        }
        match time::parse_date(date) {
            Ok(day) => time::hourly_slots(day)
                .get(hour)
                .map_or_else(String::new, time::to_picker_string),
            Err(_) => date.to_owned(),
        }
    }

    /// The controller-side edit for a changed field.
    fn edited(&self, field: FieldName) -> Action {
        let value = match field {
            FieldName::Email => self.email.clone(),
            FieldName::Name => self.name.clone(),
            FieldName::StudentId => self.student_id.clone(),
            FieldName::Laboratory => self.lab_label(),
            FieldName::ReservationTime => self.reservation_time(),
        };
        Action::EditField(field, value)
    }

    fn handle_selector(&mut self, forward: bool) -> Option<Action> {
        match self.active_field {
            FormField::Laboratory => {
                // Cycling passes back through the placeholder.
                let slot = self.lab.map_or(0, |i| i + 1);
                self.lab = match cycle(Some(slot), self.labs.len() + 1, forward) {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                Some(self.edited(FieldName::Laboratory))
            }
            FormField::Hour => {
                self.hour = cycle(self.hour, self.hours.len(), forward);
                Some(self.edited(FieldName::ReservationTime))
            }
            _ => None,
        }
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT), // email
            Constraint::Length(FIELD_HEIGHT), // name
            Constraint::Length(FIELD_HEIGHT), // student id
            Constraint::Length(FIELD_HEIGHT), // laboratory
            Constraint::Length(FIELD_HEIGHT), // date + hour
            Constraint::Min(0),
        ])
        .split(area);

        render_input_field(
            frame,
            rows[0],
            "  Email",
            &self.email,
            self.active_field == FormField::Email,
        );
        render_input_field(
            frame,
            rows[1],
            "  Name",
            &self.name,
            self.active_field == FormField::Name,
        );
        render_input_field(
            frame,
            rows[2],
            "  Student ID",
            &self.student_id,
            self.active_field == FormField::StudentId,
        );

        let lab = self.lab_label();
        render_selector(
            frame,
            rows[3],
            "  Laboratory",
            if lab.is_empty() { LAB_PLACEHOLDER } else { &lab },
            lab.is_empty(),
            self.active_field == FormField::Laboratory,
        );

        let time_row =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[4]);
        render_input_field(
            frame,
            time_row[0],
            "  Date (YYYY-MM-DD)",
            &self.date_input,
            self.active_field == FormField::Date,
        );
        let hour = self.hour_label();
        render_selector(
            frame,
            time_row[1],
            "  Hour",
            hour.as_deref().unwrap_or(HOUR_PLACEHOLDER),
            hour.is_none(),
            self.active_field == FormField::Hour,
        );
    }

    fn render_key_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = match self.active_field {
            FormField::Laboratory | FormField::Hour => "←/→ select  ↑/↓ field  Enter submit",
            _ => "↑/↓ field  Enter submit  Tab next view",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hints, theme::key_hint())).alignment(Alignment::Center),
            area,
        );
    }
}

impl Component for NewReservationScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Down => {
                self.active_field = self.active_field.next();
                None
            }
            KeyCode::Up => {
                self.active_field = self.active_field.prev();
                None
            }
            KeyCode::Left => self.handle_selector(false),
            KeyCode::Right => self.handle_selector(true),
            KeyCode::Enter => Some(Action::SubmitReservation),
            KeyCode::Backspace => self
                .text_input_mut()
                .map(|(field, input)| {
                    input.pop();
                    field
                })
                .map(|field| self.edited(field)),
            KeyCode::Char(c) => self
                .text_input_mut()
                .map(|(field, input)| {
                    input.push(c);
                    field
                })
                .map(|field| self.edited(field)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewUpdated(state) => self.state = Arc::clone(state),
            Action::FormCleared => self.reset(),
            Action::Tick if self.state.loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" New Reservation ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // form
            Constraint::Length(1), // status / error
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let form_area = Rect::new(
            layout[1].x + 1,
            layout[1].y,
            layout[1].width.saturating_sub(2).min(64),
            layout[1].height,
        );
        self.render_form(frame, form_area);

        if self.state.loading {
            let throbber = Throbber::default()
                .label(" Submitting reservation...")
                .style(theme::throbber_label())
                .throbber_style(theme::throbber_symbol());
            frame.render_stateful_widget(throbber, layout[2], &mut self.throbber_state.clone());
        } else if let Some(ref err) = self.state.error {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(err.as_str(), theme::error_banner())))
                    .alignment(Alignment::Center),
                layout[2],
            );
        }

        self.render_key_hints(frame, layout[3]);
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
