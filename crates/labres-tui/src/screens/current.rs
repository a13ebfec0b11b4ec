//! Current tab: reservations that have not yet elapsed.

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
use crate::widgets::reservation_table::{self, clamp_selection, scroll};

const EMPTY: &str = "No active reservations found.";

pub struct CurrentScreen {
    focused: bool,
    state: Arc<ViewState>,
    table_state: TableState,
    throbber_state: ThrobberState,
}

impl CurrentScreen {
    pub fn new(state: Arc<ViewState>) -> Self {
        Self {
            focused: false,
            state,
            table_state: TableState::default(),
            throbber_state: ThrobberState::default(),
        }
    }
}

impl Component for CurrentScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.state.reservations.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => scroll(&mut self.table_state, len, 1),
            KeyCode::Char('k') | KeyCode::Up => scroll(&mut self.table_state, len, -1),
            KeyCode::Char('g') | KeyCode::Home => scroll(&mut self.table_state, len, isize::MIN),
            KeyCode::Char('G') | KeyCode::End => scroll(&mut self.table_state, len, isize::MAX),
            _ => {}
        }
        Ok(None)
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
            .title(format!(" Active Reservations ({count}) "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // status
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        reservation_table::render_status(
            frame,
            layout[0],
            &self.state,
            &self.throbber_state,
            " Loading reservations...",
        );
        reservation_table::render_reservations(
            frame,
            layout[1],
            &self.state,
            &self.table_state,
            EMPTY,
        );

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("reload", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
