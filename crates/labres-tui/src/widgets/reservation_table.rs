//! Reservation list rendering shared by the Current and Past screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};

use labres_core::time;
use labres_core::{Reservation, ViewState};

use crate::theme;

/// Status line above a list: throbber while loading, else the error banner.
pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    throbber: &ThrobberState,
    loading_label: &str,
) {
    if state.loading {
        let throbber_widget = Throbber::default()
            .label(loading_label)
            .style(theme::throbber_label())
            .throbber_style(theme::throbber_symbol());
        frame.render_stateful_widget(throbber_widget, area, &mut throbber.clone());
    } else if let Some(ref error) = state.error {
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" ✗ {error}"), theme::error_banner())),
            area,
        );
    }
}

/// The reservation table, or `empty_message` when there is nothing to
/// show and nothing loading or failed.
pub fn render_reservations(
    frame: &mut Frame,
    area: Rect,
    state: &ViewState,
    table_state: &TableState,
    empty_message: &str,
) {
    if state.reservations.is_empty() {
        if !state.loading && state.error.is_none() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {empty_message}"), theme::muted())),
                area,
            );
        }
        return;
    }

    let header = Row::new(
        ["Name", "Student ID", "Email", "Laboratory", "Time"]
            .into_iter()
            .map(|h| Cell::from(Span::styled(h, theme::table_header()))),
    );

    let rows: Vec<Row> = state.reservations.iter().map(reservation_row).collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Length(12),
        Constraint::Fill(3),
        Constraint::Length(10),
        Constraint::Length(28),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme::table_selected());

    let mut table_state = *table_state;
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn reservation_row(reservation: &Reservation) -> Row<'static> {
    Row::new(vec![
        Cell::from(reservation.name.clone()),
        Cell::from(reservation.student_id.clone()),
        Cell::from(reservation.email.clone()),
        Cell::from(reservation.laboratory.to_string()),
        Cell::from(time::to_display_string(&reservation.reservation_time)),
    ])
    .style(theme::table_row())
}

/// Move the selection by `delta` rows, clamped to `len`.
pub fn scroll(table_state: &mut TableState, len: usize, delta: isize) {
    if len == 0 {
        table_state.select(None);
        return;
    }
    let current = table_state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    table_state.select(Some(next));
}

/// Keep the selection inside a list that may have shrunk.
pub fn clamp_selection(table_state: &mut TableState, len: usize) {
    match (table_state.selected(), len) {
        (_, 0) => table_state.select(None),
        (None, _) => table_state.select(Some(0)),
        (Some(i), len) if i >= len => table_state.select(Some(len - 1)),
        _ => {}
    }
}
