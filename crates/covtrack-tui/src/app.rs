//! Application core: event loop, action dispatch, overlays.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use covtrack_core::{FetchHandles, SelectionState, TrackingClient};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screens::ChartScreen;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays up.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    screen: Box<dyn Component>,
    running: bool,
    help_visible: bool,
    /// Active toast and when it was raised.
    notification: Option<(Notification, Instant)>,
    client: TrackingClient,
    /// Cancels the fetch tasks when the app quits.
    cancel: CancellationToken,
    fetches: Option<FetchHandles>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(client: TrackingClient, defaults: SelectionState) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            screen: Box::new(ChartScreen::new(defaults)),
            running: true,
            help_visible: false,
            notification: None,
            client,
            cancel: CancellationToken::new(),
            fetches: None,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.screen.init(self.action_tx.clone())?;
        self.screen.set_focused(true);
        debug!(
            screen = self.screen.id(),
            focused = self.screen.focused(),
            "screen mounted"
        );

        self.fetches = Some(spawn_data_bridge(
            self.client.clone(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

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
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        self.shutdown().await;
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Cancel in-flight fetches and wait for their tasks to unwind.
    async fn shutdown(&mut self) {
        self.cancel.cancel();
        if let Some(fetches) = self.fetches.take() {
            fetches.join().await;
        }
    }

    /// Global keys first, then the screen's own bindings.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                KeyCode::Char('q') => Ok(Some(Action::Quit)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Char('q')) => {
                return Ok(Some(Action::Quit));
            }
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (_, KeyCode::Char('x')) if self.notification.is_some() => {
                return Ok(Some(Action::DismissNotification));
            }
            _ => {}
        }

        self.screen.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        if self.help_visible {
            return Ok(None);
        }
        self.screen.handle_mouse_event(mouse)
    }

    /// Apply one action to app state, then hand it to the screen.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                info!("quit requested");
                self.running = false;
                self.cancel.cancel();
            }
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }
            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }
            Action::DismissNotification => {
                self.notification = None;
            }
            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, raised)| raised.elapsed() > TOAST_TTL)
                {
                    self.notification = None;
                }
            }
            Action::Render => return Ok(()),
            _ => {}
        }

        if let Some(follow_up) = self.screen.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

        self.screen.render(frame, layout[0]);
        Self::render_status_bar(frame, layout[1]);

        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" covtrack ", theme::title_style()),
            Span::styled("│ ", theme::key_hint()),
            Span::styled("?", theme::key_hint_key()),
            Span::styled(" help  ", theme::key_hint()),
            Span::styled("q", theme::key_hint_key()),
            Span::styled(" quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Toast in the bottom-right corner, above the status bar.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = notif.message.chars().count().min(usize::from(u16::MAX)) as u16;
        let width = msg_len.saturating_add(6).clamp(20, 70).min(area.width);
        let height = 3u16.min(area.height);

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            NotificationLevel::Error => (theme::ERROR_RED, "✗"),
            NotificationLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 56u16.min(area.width.saturating_sub(4));
        let help_height = 19u16.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };
        let entry = |key: &'static str, label: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::key_hint_key()),
                Span::styled(label, theme::key_hint()),
            ])
        };

        let help_text = vec![
            section("Chart"),
            entry("p / n / d", "Positive / negative / death increase"),
            entry("w / m / a", "Last week / month / all time"),
            entry("← / →", "Scrub one day"),
            entry("Shift+←/→", "Scrub one week"),
            entry("Home / End", "First visible / latest day"),
            entry("drag", "Scrub with the mouse"),
            entry("Esc", "Back to latest day"),
            Line::from(""),
            section("States"),
            entry("s / S", "Next / previous state"),
            entry("u", "Back to United States"),
            Line::from(""),
            section("Global"),
            entry("x", "Dismiss notification"),
            entry("?", "This help"),
            entry("q", "Quit"),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}
