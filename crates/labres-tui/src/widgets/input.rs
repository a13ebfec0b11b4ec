//! Labelled text input and inline `◂ value ▸` selector.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::theme;

/// Height of one labelled field: label line plus a bordered box.
pub const FIELD_HEIGHT: u16 = 4;

/// Draw the label and the rounded box, returning the box's inner area.
fn field_frame(frame: &mut Frame, area: Rect, label: &str, active: bool) -> Option<Rect> {
    if area.height < 3 {
        return None;
    }

    frame.render_widget(
        Paragraph::new(Span::styled(label, theme::input_label(active))),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(active));

    let block_area = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
    let inner = block.inner(block_area);
    frame.render_widget(block, block_area);
    Some(inner)
}

/// A single-line text input. The active input shows a block cursor.
pub fn render_input_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let Some(inner) = field_frame(frame, area, label, active) else {
        return;
    };

    let text = if active {
        format!("{value}\u{2588}")
    } else {
        value.to_owned()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, theme::input_text())),
        inner,
    );
}

/// An inline selector cycled with ←/→. `placeholder` marks "nothing chosen".
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: bool,
    active: bool,
) {
    let Some(inner) = field_frame(frame, area, label, active) else {
        return;
    };

    let arrow_style = theme::selector_arrow(active);
    let value_style = if placeholder {
        theme::muted()
    } else {
        theme::selector_value(active)
    };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" \u{25C2} ", arrow_style),
            Span::styled(value, value_style),
            Span::styled(" \u{25B8}", arrow_style),
        ])),
        inner,
    );
}
