//! The interface every tab screen implements.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::action::Action;

/// A tab screen. Screens never touch the controller; they turn keys into
/// actions and redraw from the latest `ViewState` snapshot they were sent.
pub trait Component {
    /// Keys not consumed by the global bindings.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// React to a broadcast action, optionally answering with another.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// True when printable keys are text input here, so single-letter
    /// shortcuts must not fire.
    fn captures_text(&self) -> bool {
        false
    }

    fn set_focused(&mut self, _focused: bool) {}
}
