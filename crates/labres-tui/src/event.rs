//! Terminal input merged with the tick and render clocks.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::warn;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized; triggers a redraw.
    Resize,
    /// Toast expiry and throbber animation.
    Tick,
    Render,
}

/// Polled directly from the event loop; nothing runs in the background.
pub struct EventReader {
    input: EventStream,
    tick: Interval,
    render: Interval,
}

impl EventReader {
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let clock = |period| {
            let mut clock = interval(period);
            clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
            clock
        };
        Self {
            input: EventStream::new(),
            tick: clock(tick_rate),
            render: clock(render_rate),
        }
    }

    /// The next event. `None` once terminal input is closed or broken.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(Event::Tick),
                _ = self.render.tick() => return Some(Event::Render),
                input = self.input.next() => match input? {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(Event::Key(key));
                    }
                    Ok(CrosstermEvent::Resize(..)) => return Some(Event::Resize),
                    Ok(_) => {}
                    Err(err) => {
                        warn!(error = %err, "terminal input failed");
                        return None;
                    }
                },
            }
        }
    }
}
