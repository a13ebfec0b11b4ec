//! Event loop, tab switching and action dispatch.
//!
//! The `ViewController` is the single source of view state. Requests it
//! hands out are spawned onto the runtime; their completions come back as
//! `Action::RequestSettled` and are reconciled here, after which every
//! screen receives a fresh snapshot.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use labres_core::{PendingRequest, ReservationService, Tab, ViewController};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App<S> {
    /// Owns the view state and issues service requests.
    controller: ViewController<S>,
    /// Shown in the status bar.
    service_label: String,
    /// Previous tab for GoBack.
    previous_tab: Option<Tab>,
    /// One screen per tab.
    screens: HashMap<Tab, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Abandons outstanding service requests on exit.
    request_cancel: CancellationToken,
}

impl<S: ReservationService> App<S> {
    pub fn new(controller: ViewController<S>, service_label: String) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let snapshot = Arc::new(controller.state().clone());
        let mut screens: HashMap<Tab, Box<dyn Component>> =
            create_screens(&snapshot).into_iter().collect();
        if let Some(screen) = screens.get_mut(&controller.active_tab()) {
            screen.set_focused(true);
        }

        Self {
            controller,
            service_label,
            previous_tab: None,
            screens,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            notification: None,
            request_cancel: CancellationToken::new(),
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        let initial = self.controller.select_tab(Tab::Current);
        self.spawn(initial);
        self.broadcast()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(service = %self.service_label, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize | Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.request_cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Run a controller request in the background and feed its completion
    /// back into the action loop.
    fn spawn(&self, request: Option<PendingRequest>) {
        let Some(request) = request else {
            return;
        };
        let tx = self.action_tx.clone();
        let cancel = self.request_cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {}
                completion = request.run() => {
                    let _ = tx.send(Action::RequestSettled(completion));
                }
            }
        });
    }

    /// Hand every screen a snapshot of the controller's current state.
    fn broadcast(&mut self) -> Result<()> {
        let snapshot = Action::ViewUpdated(Arc::new(self.controller.state().clone()));
        self.forward_to_all(&snapshot)
    }

    fn forward_to_all(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else goes to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
                (_, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let active = self.controller.active_tab();

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => return Ok(Some(Action::Reload)),
            (KeyModifiers::NONE, KeyCode::F(1)) => return Ok(Some(Action::ToggleHelp)),

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchTab(active.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchTab(active.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => {
                return Ok(Some(if self.notification.is_some() {
                    Action::DismissNotification
                } else {
                    Action::GoBack
                }));
            }
            _ => {}
        }

        let Some(screen) = self.screens.get_mut(&active) else {
            return Ok(None);
        };

        // Printable shortcuts only apply where no text input is listening.
        if !screen.captures_text()
            && !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('r') => return Ok(Some(Action::Reload)),
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    return Ok(Tab::from_index(index).map(Action::SwitchTab));
                }
                _ => {}
            }
        }

        screen.handle_key_event(key)
    }

    /// Process a single action: update app state, drive the controller,
    /// and propagate to components.
    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render => {}

            Action::Tick => {
                if let Some((_, shown)) = &self.notification {
                    if shown.elapsed() > TOAST_TTL {
                        self.notification = None;
                    }
                }
                // Throbber animation on the visible screen only
                if let Some(screen) = self.screens.get_mut(&self.controller.active_tab()) {
                    screen.update(action)?;
                }
            }

            // ── Navigation ────────────────────────────────────────────
            Action::SwitchTab(target) => {
                let current = self.controller.active_tab();
                if *target != current {
                    debug!("switching tab: {current} → {target}");
                    if let Some(screen) = self.screens.get_mut(&current) {
                        screen.set_focused(false);
                    }
                    if let Some(screen) = self.screens.get_mut(target) {
                        screen.set_focused(true);
                    }
                    self.previous_tab = Some(current);
                }
                let request = self.controller.select_tab(*target);
                self.spawn(request);
                self.broadcast()?;
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_tab.take() {
                    self.action_tx.send(Action::SwitchTab(prev))?;
                }
            }

            Action::Reload => {
                let request = match self.controller.active_tab() {
                    Tab::Current => Some(self.controller.load_active()),
                    Tab::Past => self.controller.load_past(),
                    Tab::New => None,
                };
                self.spawn(request);
                self.broadcast()?;
            }

            // ── Input ─────────────────────────────────────────────────
            Action::EditField(field, value) => {
                self.controller.edit_field(*field, value.clone());
                self.broadcast()?;
            }

            Action::EditStartDate(value) => {
                self.controller.edit_start_date(value.clone());
                self.broadcast()?;
            }

            Action::EditEndDate(value) => {
                self.controller.edit_end_date(value.clone());
                self.broadcast()?;
            }

            Action::SearchPast => {
                let request = self.controller.load_past();
                self.spawn(request);
                self.broadcast()?;
            }

            Action::SubmitReservation => {
                let request = self.controller.submit_reservation();
                self.spawn(request);
                self.broadcast()?;
            }

            // ── Controller ────────────────────────────────────────────
            Action::RequestSettled(completion) => {
                let follow_up = self.controller.complete(completion.clone());
                self.spawn(follow_up);

                if let Some(message) = self.controller.take_notification() {
                    self.action_tx
                        .send(Action::Notify(Notification::success(message)))?;
                    self.action_tx.send(Action::FormCleared)?;
                }
                self.broadcast()?;
            }

            Action::ViewUpdated(_) | Action::FormCleared => {
                self.forward_to_all(action)?;
            }

            // ── Overlays ──────────────────────────────────────────────
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }
        }
        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.controller.active_tab()) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays (last = topmost)
        if let Some((ref notification, _)) = self.notification {
            render_notification(frame, area, notification);
        }

        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let active = self.controller.active_tab();
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|&tab| {
                Line::from(Span::styled(
                    format!(" {} {} ", tab.index() + 1, tab_label(tab)),
                    theme::tab(tab == active),
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(active.index());

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.controller.loading() {
            Span::styled("◐ loading", theme::busy())
        } else {
            Span::styled("● idle", theme::idle())
        };

        let line = Line::from(vec![
            Span::raw(" "),
            activity,
            Span::styled(format!(" │ {}", self.service_label), theme::muted()),
            Span::styled(" │ F1 help  Tab switch  Ctrl+R reload  Ctrl+C quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Current => "Current Reservations",
        Tab::Past => "Past Reservations",
        Tab::New => "New Reservation",
    }
}

/// Centered help overlay.
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_width = 56u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(4));

    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

    frame.render_widget(
        Block::default().style(theme::overlay()),
        help_area,
    );

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            format!("  {title}"),
            theme::heading(),
        ))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };

    let help_text = vec![
        Line::from(""),
        section("Everywhere"),
        entry("Tab/S-Tab", "Next / previous tab"),
        entry("Ctrl+R", "Reload the current list"),
        entry("Esc", "Dismiss toast / back"),
        entry("F1", "This help"),
        entry("Ctrl+C", "Quit"),
        Line::from(""),
        section("Lists"),
        entry("1-3", "Jump to tab"),
        entry("j/k ↑/↓", "Move up / down"),
        entry("r  q", "Reload  Quit"),
        Line::from(""),
        section("Forms"),
        entry("↑/↓ ←/→", "Move between inputs"),
        entry("Enter", "Search / submit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}

/// Toast in the bottom-right corner, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height.min(area.height));

    frame.render_widget(
        Block::default().style(theme::overlay()),
        toast_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::toast());

    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(" ✓ ", theme::toast()),
        Span::styled(&notification.message, theme::toast_text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use labres_core::controller::{CREATED, LOAD_ACTIVE_FAILED};
    use labres_core::{CoreError, FieldName, Reservation, ReservationDraft, ReservationId};

    use super::*;

    #[derive(Debug, Default)]
    struct Backend {
        reservations: Vec<Reservation>,
        past_queries: Vec<(NaiveDate, NaiveDate)>,
        fail_next: Option<CoreError>,
    }

    #[derive(Debug, Clone, Default)]
    struct FakeService {
        backend: Arc<Mutex<Backend>>,
    }

    impl ReservationService for FakeService {
        async fn fetch_active(&self) -> Result<Vec<Reservation>, CoreError> {
            let mut backend = self.backend.lock().unwrap();
            match backend.fail_next.take() {
                Some(err) => Err(err),
                None => Ok(backend.reservations.clone()),
            }
        }

        async fn fetch_past(
            &self,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> Result<Vec<Reservation>, CoreError> {
            let mut backend = self.backend.lock().unwrap();
            backend.past_queries.push((start_date, end_date));
            Ok(Vec::new())
        }

        async fn create_reservation(
            &self,
            draft: &ReservationDraft,
        ) -> Result<Reservation, CoreError> {
            let mut backend = self.backend.lock().unwrap();
            let created = Reservation {
                id: ReservationId::new((backend.reservations.len() + 1).to_string()),
                email: draft.email.clone(),
                name: draft.name.clone(),
                student_id: draft.student_id.clone(),
                laboratory: draft.laboratory,
                reservation_time: draft.reservation_time,
            };
            backend.reservations.push(created.clone());
            Ok(created)
        }
    }

    fn app(service: &FakeService) -> App<FakeService> {
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        App::new(
            ViewController::with_today(service.clone(), today),
            "http://localhost:8000".into(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed queued actions back in until no request is outstanding.
    async fn settle(app: &mut App<FakeService>) {
        while Tab::ALL.iter().any(|&tab| app.controller.is_in_flight(tab)) {
            let action = app.action_rx.recv().await.unwrap();
            app.process_action(&action).unwrap();
        }
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(&action).unwrap();
        }
    }

    #[tokio::test]
    async fn switching_to_past_queries_the_default_range() {
        let service = FakeService::default();
        let mut app = app(&service);

        app.process_action(&Action::SwitchTab(Tab::Past)).unwrap();
        assert!(app.controller.loading());
        settle(&mut app).await;

        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(service.backend.lock().unwrap().past_queries, vec![(day, day)]);
        assert_eq!(app.controller.active_tab(), Tab::Past);
        assert_eq!(app.previous_tab, Some(Tab::Current));
        assert!(!app.controller.loading());
    }

    #[tokio::test]
    async fn created_reservation_raises_toast_and_clears_form() {
        let service = FakeService::default();
        let mut app = app(&service);

        app.process_action(&Action::SwitchTab(Tab::New)).unwrap();
        for (field, value) in [
            (FieldName::Email, "ada@uni.edu"),
            (FieldName::Name, "Ada"),
            (FieldName::StudentId, "42"),
            (FieldName::Laboratory, "Lab 3"),
            (FieldName::ReservationTime, "2024-05-02 10:00"),
        ] {
            app.process_action(&Action::EditField(field, value.into()))
                .unwrap();
        }
        app.process_action(&Action::SubmitReservation).unwrap();
        settle(&mut app).await;

        let (toast, _) = app.notification.as_ref().unwrap();
        assert_eq!(toast.message, CREATED);
        assert!(app.controller.state().form.is_empty());
        // The follow-up refresh picked up the new reservation.
        assert_eq!(app.controller.state().reservations.len(), 1);
    }

    #[tokio::test]
    async fn failed_reload_surfaces_error() {
        let service = FakeService::default();
        let mut app = app(&service);

        service.backend.lock().unwrap().fail_next = Some(CoreError::Timeout);
        app.process_action(&Action::Reload).unwrap();
        settle(&mut app).await;

        assert_eq!(
            app.controller.state().error.as_deref(),
            Some(LOAD_ACTIVE_FAILED)
        );
        assert!(app.notification.is_none());
    }

    #[tokio::test]
    async fn printable_shortcuts_yield_to_text_inputs() {
        let service = FakeService::default();
        let mut app = app(&service);

        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::Quit)
        ));
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SwitchTab(Tab::New))
        ));

        app.process_action(&Action::SwitchTab(Tab::New)).unwrap();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::EditField(FieldName::Email, ref v)) if v == "q"
        ));
        assert!(matches!(
            app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::Quit)
        ));
    }

    #[tokio::test]
    async fn esc_dismisses_toast_before_going_back() {
        let service = FakeService::default();
        let mut app = app(&service);

        app.process_action(&Action::Notify(Notification::success(CREATED)))
            .unwrap();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::DismissNotification)
        ));

        app.process_action(&Action::DismissNotification).unwrap();
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::GoBack)
        ));
    }
}
