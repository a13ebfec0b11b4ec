//! Past tab: reservations within a typed date range.
//!
//! Two date inputs (`YYYY-MM-DD`), ←/→ to switch between them, Enter to
//! search. Dates are parsed by the controller when the search runs.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, TableState};
use throbber_widgets_tui::ThrobberState;

use labres_core::ViewState;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::input::{FIELD_HEIGHT, render_input_field};
use crate::widgets::reservation_table::{self, clamp_selection, scroll};

const EMPTY: &str = "No reservations found for the selected date range.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Start,
    End,
}

pub struct PastScreen {
    focused: bool,
    state: Arc<ViewState>,
    active_field: DateField,
    start_input: String,
    end_input: String,
    table_state: TableState,
    throbber_state: ThrobberState,
}

impl PastScreen {
    pub fn new(state: Arc<ViewState>) -> Self {
        Self {
            focused: false,
            active_field: DateField::Start,
            start_input: state.date_range.start_date.clone(),
            end_input: state.date_range.end_date.clone(),
            state,
            table_state: TableState::default(),
            throbber_state: ThrobberState::default(),
        }
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.active_field {
            DateField::Start => &mut self.start_input,
            DateField::End => &mut self.end_input,
        }
    }

    /// The controller-side edit for whichever input just changed.
    fn edited(&self) -> Action {
        match self.active_field {
            DateField::Start => Action::EditStartDate(self.start_input.clone()),
            DateField::End => Action::EditEndDate(self.end_input.clone()),
        }
    }
}

impl Component for PastScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.state.reservations.len();
        let action = match key.code {
            KeyCode::Left => {
                self.active_field = DateField::Start;
                None
            }
            KeyCode::Right => {
                self.active_field = DateField::End;
                None
            }
            KeyCode::Down => {
                scroll(&mut self.table_state, len, 1);
                None
            }
            KeyCode::Up => {
                scroll(&mut self.table_state, len, -1);
                None
            }
            KeyCode::Enter => Some(Action::SearchPast),
            KeyCode::Backspace => {
                self.active_input_mut().pop();
                Some(self.edited())
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                self.active_input_mut().push(c);
                Some(self.edited())
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ViewUpdated(state) => {
                self.state = Arc::clone(state);
                clamp_selection(&mut self.table_state, self.state.reservations.len());
            }
            Action::Tick if self.state.loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.state.reservations.len();
        let block = Block::default()
            .title(format!(" Past Reservations ({count}) "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT), // date inputs
            Constraint::Length(1),            // status
            Constraint::Min(1),               // table
            Constraint::Length(1),            // hints
        ])
        .split(inner);

        let inputs = Layout::horizontal([
            Constraint::Length(24),
            Constraint::Length(2),
            Constraint::Length(24),
            Constraint::Min(0),
        ])
        .split(layout[0]);

        render_input_field(
            frame,
            inputs[0],
            "  Start date",
            &self.start_input,
            self.active_field == DateField::Start,
        );
        render_input_field(
            frame,
            inputs[2],
            "  End date",
            &self.end_input,
            self.active_field == DateField::End,
        );

        reservation_table::render_status(
            frame,
            layout[1],
            &self.state,
            &self.throbber_state,
            " Searching...",
        );
        reservation_table::render_reservations(
            frame,
            layout[2],
            &self.state,
            &self.table_state,
            EMPTY,
        );

        let hints = Line::from(vec![
            Span::styled("  ←/→ ", theme::key_hint_key()),
            Span::styled("start/end  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
            Span::styled("↑/↓ ", theme::key_hint_key()),
            Span::styled("navigate", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }

    fn captures_text(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
