//! Chart screen: the daily-increase sparkline with its selectors and
//! summary labels.
//!
//! Layout:
//! ┌─ COVID-19 Daily · United States ─────────────────────────────────┐
//! │ p Positive  n Negative  d Death          w Week  m Month  a Max   │
//! │ 41,265                                                           │
//! │ Positive increase · Mar 07, 2021                                 │
//! │ ┌────────────────────────────────────────────────────────────────┐│
//! │ │  Braille line of the selected metric, scrub cursor             ││
//! │ └────────────────────────────────────────────────────────────────┘│
//! │ State: US (0/56)  s next  S prev  u national                     │
//! ├─ ←/→ scrub  Home/End first/latest  drag to scrub ────────────────┤
//! └──────────────────────────────────────────────────────────────────┘

use std::cell::Cell;

use color_eyre::eyre::Result;
use covtrack_core::{
    FetchOutcome, Jurisdiction, LoadState, Metric, ScreenController, SelectionState, SparkSource,
    TimeWindow,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};
use strum::IntoEnumIterator;
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::debug;

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::count_fmt;
use crate::widgets::sub_tabs::{self, SubTab};

pub struct ChartScreen {
    focused: bool,
    controller: ScreenController,
    /// `(index, value)` pairs for the whole active series.
    points: Vec<(f64, f64)>,
    /// Adapter generation `points` was read at.
    points_generation: Option<u64>,
    throbber_state: ThrobberState,
    /// Chart panel from the last render, for mouse hit-testing.
    chart_area: Cell<Rect>,
    /// Plotting region inside the chart panel (axes excluded).
    plot_area: Cell<Rect>,
    /// Left button went down inside the chart and has not been released.
    dragging: bool,
}

impl ChartScreen {
    pub fn new(defaults: SelectionState) -> Self {
        Self {
            focused: false,
            controller: ScreenController::new(defaults),
            points: Vec::new(),
            points_generation: None,
            throbber_state: ThrobberState::default(),
            chart_area: Cell::new(Rect::default()),
            plot_area: Cell::new(Rect::default()),
            dragging: false,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ScreenController {
        &self.controller
    }

    /// Re-read the adapter if it signalled a change since the last read.
    fn sync_points(&mut self) {
        let generation = self.controller.adapter().map(SparkSource::generation);
        if generation == self.points_generation {
            return;
        }
        self.points = self
            .controller
            .adapter()
            .map(SparkSource::points)
            .unwrap_or_default();
        self.points_generation = generation;
        debug!(points = self.points.len(), ?generation, "chart points refreshed");
    }

    /// `[first, last]` visible record indices, if a series is bound.
    fn visible_range(&self) -> Option<(usize, usize)> {
        let adapter = self.controller.adapter()?;
        let last = adapter.count().checked_sub(1)?;
        Some((adapter.first_visible_index(), last))
    }

    fn on_fetched(&mut self, outcome: &FetchOutcome) -> Option<Action> {
        if self.controller.is_closed() {
            return None;
        }
        let notice = match outcome {
            FetchOutcome::National(Ok(series)) => {
                Notification::success(format!("Loaded {} days of national data", series.len()))
            }
            FetchOutcome::National(Err(e)) => Notification::error(format!("National data: {e}")),
            FetchOutcome::States(Ok(groups)) => {
                Notification::info(format!("{} states available, press s", groups.len()))
            }
            FetchOutcome::States(Err(e)) => Notification::error(format!("State data: {e}")),
        };
        self.controller.handle(outcome.clone());
        Some(Action::Notify(notice))
    }

    fn scrub_step(&mut self, delta: isize) {
        let Some((first, last)) = self.visible_range() else {
            return;
        };
        let base = self.controller.scrub_index().unwrap_or(last);
        let target = base.saturating_add_signed(delta).clamp(first, last);
        self.scrub_to(target);
    }

    fn scrub_to(&mut self, index: usize) {
        if let Err(e) = self.controller.scrub(index) {
            debug!(error = %e, "scrub rejected");
        }
    }

    fn cycle_state(&mut self, forward: bool) -> Option<Action> {
        let next = cycle_jurisdiction(
            &self.controller.selection().jurisdiction,
            &self.controller.state_codes(),
            forward,
        )?;
        self.switch_to(next)
    }

    fn switch_to(&mut self, jurisdiction: Jurisdiction) -> Option<Action> {
        match self.controller.select_jurisdiction(jurisdiction) {
            Ok(()) => None,
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render_selectors(&self, frame: &mut Frame, area: Rect) {
        let selection = self.controller.selection();
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let metric_idx = Metric::iter().position(|m| m == selection.metric).unwrap_or(0);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&metric_tabs(), metric_idx)),
            cols[0],
        );

        let window_idx = TimeWindow::iter().position(|w| w == selection.window).unwrap_or(0);
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&window_tabs(), window_idx)).right_aligned(),
            cols[1],
        );
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let lines = match self.controller.summary() {
            Some(summary) => {
                let mut detail = vec![Span::styled(
                    format!(
                        "{} increase · {}",
                        summary.metric,
                        count_fmt::fmt_date(summary.date)
                    ),
                    Style::default().fg(theme::DIM_WHITE),
                )];
                if self.controller.scrub_index().is_some() {
                    detail.push(Span::styled("  ◆ scrubbing", theme::scrub_cursor()));
                }
                vec![
                    Line::from(Span::styled(
                        count_fmt::fmt_count(summary.value),
                        theme::summary_value(summary.metric),
                    )),
                    Line::from(detail),
                ]
            }
            None => vec![
                Line::from(Span::styled("--", theme::key_hint())),
                Line::from(Span::styled("No data", theme::key_hint())),
            ],
        };
        frame.render_widget(Paragraph::new(lines), area);
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::as_conversions
    )]
    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        self.chart_area.set(area);
        self.plot_area.set(Rect::default());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let (Some(adapter), Some((first, last))) = (self.controller.adapter(), self.visible_range())
        else {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            self.render_empty_state(frame, inner);
            return;
        };

        let visible = self.points.get(first..=last).unwrap_or(&[]);
        let (y_min, y_max) = y_bounds(visible);
        let x_max = if last > first { last as f64 } else { first as f64 + 1.0 };

        let y_labels: Vec<String> = [y_min, (y_min + y_max) / 2.0, y_max]
            .into_iter()
            .map(count_fmt::fmt_count_axis)
            .collect();
        let label_width = y_labels.iter().map(String::len).max().unwrap_or(0) as u16;

        let x_labels = [first, last]
            .into_iter()
            .filter_map(|i| adapter.record_at(i).ok())
            .map(|r| Span::styled(count_fmt::fmt_date_axis(r.date), theme::axis()))
            .collect::<Vec<_>>();

        let metric = adapter.metric();
        let mut datasets = vec![
            Dataset::default()
                .name(metric.to_string())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::metric_color(metric)))
                .data(visible),
        ];

        let cursor: Vec<(f64, f64)> = self
            .controller
            .scrub_index()
            .filter(|i| (first..=last).contains(i))
            .map(|i| vec![(i as f64, y_min), (i as f64, y_max)])
            .unwrap_or_default();
        if !cursor.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(theme::scrub_cursor())
                    .data(&cursor),
            );
        }

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([first as f64, x_max])
                    .labels(x_labels)
                    .style(theme::axis()),
            )
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max])
                    .labels(y_labels.into_iter().map(|l| Span::styled(l, theme::axis())))
                    .style(theme::axis()),
            )
            .legend_position(None);

        frame.render_widget(chart, area);
        self.plot_area.set(plot_region(area, label_width));
    }

    fn render_empty_state(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        match self.controller.national_load() {
            LoadState::Pending => {
                let throbber = Throbber::default()
                    .label("  Loading daily series...")
                    .style(Style::default().fg(theme::NEON_CYAN))
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, rows[1], &mut self.throbber_state.clone());
            }
            LoadState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("  Failed to load national data: {message}"),
                        Style::default().fg(theme::ERROR_RED),
                    )),
                    rows[1],
                );
            }
            LoadState::Loaded => {
                frame.render_widget(
                    Paragraph::new("  No records in this series")
                        .style(Style::default().fg(theme::BORDER_GRAY)),
                    rows[1],
                );
            }
        }
    }

    fn render_state_line(&self, frame: &mut Frame, area: Rect) {
        let codes = self.controller.state_codes();
        let current = &self.controller.selection().jurisdiction;
        let position = match current {
            Jurisdiction::National => 0,
            Jurisdiction::State(code) => codes
                .iter()
                .position(|c| c == code)
                .map_or(0, |p| p + 1),
        };

        let mut spans = vec![
            Span::styled("State: ", Style::default().fg(theme::DIM_WHITE)),
            Span::styled(current.to_string(), theme::title_style()),
        ];
        match self.controller.states_load() {
            LoadState::Pending => {
                spans.push(Span::styled("  (loading states)", theme::key_hint()));
            }
            LoadState::Failed(_) => {
                spans.push(Span::styled(
                    "  (state data unavailable)",
                    Style::default().fg(theme::ERROR_RED),
                ));
            }
            LoadState::Loaded => {
                spans.push(Span::styled(
                    format!("  ({position}/{})  ", codes.len()),
                    theme::key_hint(),
                ));
                for (key, label) in [("s", " next  "), ("S", " prev  "), ("u", " national")] {
                    spans.push(Span::styled(key, theme::key_hint_key()));
                    spans.push(Span::styled(label, theme::key_hint()));
                }
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_hints(frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (key, label) in [
            ("←/→", " scrub  "),
            ("Home/End", " first/latest  "),
            ("drag", " scrub  "),
            ("Esc", " reset"),
        ] {
            spans.push(Span::styled(key, theme::key_hint_key()));
            spans.push(Span::styled(label, theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for ChartScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (key.modifiers, key.code) {
            (_, KeyCode::Char('p')) => Action::SelectMetric(Metric::Positive),
            (_, KeyCode::Char('n')) => Action::SelectMetric(Metric::Negative),
            (_, KeyCode::Char('d')) => Action::SelectMetric(Metric::Death),
            (_, KeyCode::Char('w')) => Action::SelectWindow(TimeWindow::Week),
            (_, KeyCode::Char('m')) => Action::SelectWindow(TimeWindow::Month),
            (_, KeyCode::Char('a')) => Action::SelectWindow(TimeWindow::All),
            (_, KeyCode::Char('s')) => Action::NextState,
            (_, KeyCode::Char('S')) | (KeyModifiers::SHIFT, KeyCode::BackTab) => Action::PrevState,
            (_, KeyCode::Char('u')) => Action::SelectNational,
            (KeyModifiers::SHIFT, KeyCode::Left) => Action::ScrubStep(-7),
            (KeyModifiers::SHIFT, KeyCode::Right) => Action::ScrubStep(7),
            (_, KeyCode::Left | KeyCode::Char('h')) => Action::ScrubStep(-1),
            (_, KeyCode::Right | KeyCode::Char('l')) => Action::ScrubStep(1),
            (_, KeyCode::Home) => Action::ScrubFirst,
            (_, KeyCode::End | KeyCode::Esc) => Action::ScrubLatest,
            _ => return Ok(None),
        };
        Ok(Some(action))
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.dragging = self
                    .chart_area
                    .get()
                    .contains(Position::new(mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dragging = false;
                return Ok(None);
            }
            _ => {}
        }

        let Some((first, last)) = self.visible_range() else {
            return Ok(None);
        };
        let plot = self.plot_area.get();
        if plot.width == 0 {
            return Ok(None);
        }

        let action = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
                if self.dragging =>
            {
                Action::Scrub(index_at_column(mouse.column, plot, first, last))
            }
            MouseEventKind::Down(MouseButton::Right) => Action::ScrubLatest,
            _ => return Ok(None),
        };
        Ok(Some(action))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        let follow_up = match action {
            Action::Fetched(outcome) => self.on_fetched(outcome),
            Action::SelectMetric(metric) => {
                self.controller.select_metric(*metric);
                None
            }
            Action::SelectWindow(window) => {
                self.controller.select_window(*window);
                None
            }
            Action::NextState => self.cycle_state(true),
            Action::PrevState => self.cycle_state(false),
            Action::SelectNational => {
                if self.controller.selection().jurisdiction == Jurisdiction::National {
                    None
                } else {
                    self.switch_to(Jurisdiction::National)
                }
            }
            Action::Scrub(index) => {
                self.scrub_to(*index);
                None
            }
            Action::ScrubStep(delta) => {
                self.scrub_step(*delta);
                None
            }
            Action::ScrubFirst => {
                if let Some((first, _)) = self.visible_range() {
                    self.scrub_to(first);
                }
                None
            }
            Action::ScrubLatest => {
                self.controller.scrub_latest();
                None
            }
            Action::Tick => {
                if self.controller.national_load().is_pending() {
                    self.throbber_state.calc_next();
                }
                None
            }
            Action::Quit => {
                self.controller.close();
                None
            }
            _ => None,
        };
        self.sync_points();
        Ok(follow_up)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " COVID-19 Daily · {} ",
            self.controller.selection().jurisdiction
        );
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1), // selectors
            Constraint::Length(2), // summary
            Constraint::Min(6),    // chart
            Constraint::Length(1), // state picker
            Constraint::Length(1), // hints
        ])
        .split(inner);

        self.render_selectors(frame, layout[0]);
        self.render_summary(frame, layout[1]);
        self.render_chart(frame, layout[2]);
        self.render_state_line(frame, layout[3]);
        Self::render_hints(frame, layout[4]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "chart"
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn metric_key(metric: Metric) -> char {
    match metric {
        Metric::Positive => 'p',
        Metric::Negative => 'n',
        Metric::Death => 'd',
    }
}

fn metric_tabs() -> Vec<SubTab> {
    Metric::iter()
        .map(|m| SubTab {
            key: metric_key(m),
            label: m.to_string(),
        })
        .collect()
}

fn window_key(window: TimeWindow) -> char {
    match window {
        TimeWindow::Week => 'w',
        TimeWindow::Month => 'm',
        TimeWindow::All => 'a',
    }
}

fn window_tabs() -> Vec<SubTab> {
    TimeWindow::iter()
        .map(|w| SubTab {
            key: window_key(w),
            label: w.to_string(),
        })
        .collect()
}

/// Y range covering `points`, always including zero and never empty.
fn y_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let (lo, hi) = points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    let hi = if hi <= lo { lo + 1.0 } else { hi * 1.1 };
    (lo, hi)
}

/// Where ratatui's `Chart` draws points inside `area`: bordered block,
/// y labels plus axis line on the left, x axis line plus labels at the
/// bottom.
fn plot_region(area: Rect, y_label_width: u16) -> Rect {
    let left = 1 + y_label_width + 1;
    Rect {
        x: area.x.saturating_add(left),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(left + 1),
        height: area.height.saturating_sub(1 + 2 + 1),
    }
}

/// Map a terminal column to the nearest record index in `[first, last]`,
/// clamping columns outside the plot.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn index_at_column(column: u16, plot: Rect, first: usize, last: usize) -> usize {
    if last <= first || plot.width <= 1 {
        return last;
    }
    let offset = column.saturating_sub(plot.x).min(plot.width - 1);
    let fraction = f64::from(offset) / f64::from(plot.width - 1);
    let span = (last - first) as f64;
    first + (fraction * span).round() as usize
}

/// Next jurisdiction when cycling `National → codes[0] → … → National`.
fn cycle_jurisdiction(current: &Jurisdiction, codes: &[&str], forward: bool) -> Option<Jurisdiction> {
    if codes.is_empty() {
        return None;
    }
    // Slot 0 is National, slot i + 1 is codes[i].
    let slots = codes.len() + 1;
    let slot = match current {
        Jurisdiction::National => 0,
        Jurisdiction::State(code) => codes.iter().position(|c| c == code).map_or(0, |p| p + 1),
    };
    let next = if forward {
        (slot + 1) % slots
    } else {
        (slot + slots - 1) % slots
    };
    Some(match next {
        0 => Jurisdiction::National,
        i => Jurisdiction::State(codes[i - 1].to_owned()),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use chrono::{Days, NaiveDate};
    use covtrack_core::{CoreError, DailyRecord, Series, StateSeriesMap};
    use pretty_assertions::assert_eq;

    use super::*;

    fn series(len: u64) -> Series {
        let start = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        (0..len)
            .map(|n| {
                let v = i64::try_from(n).unwrap() + 1;
                DailyRecord::new(start.checked_add_days(Days::new(n)).unwrap(), v, v * 10, v * 2)
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn loaded_screen() -> ChartScreen {
        let mut screen = ChartScreen::new(SelectionState::default());
        screen
            .update(&Action::Fetched(FetchOutcome::National(Ok(series(40)))))
            .unwrap();
        screen
    }

    #[test]
    fn national_load_caches_points_and_notifies() {
        let mut screen = ChartScreen::new(SelectionState::default());
        let follow_up = screen
            .update(&Action::Fetched(FetchOutcome::National(Ok(series(10)))))
            .unwrap();

        assert!(matches!(follow_up, Some(Action::Notify(_))));
        assert_eq!(screen.points.len(), 10);
        assert_eq!(screen.points[9], (9.0, 10.0));
    }

    #[test]
    fn failed_load_raises_error_toast() {
        let mut screen = ChartScreen::new(SelectionState::default());
        let err = CoreError::EmptyResponse {
            endpoint: "us/daily.json".into(),
        };
        let follow_up = screen
            .update(&Action::Fetched(FetchOutcome::National(Err(err))))
            .unwrap();

        let Some(Action::Notify(n)) = follow_up else {
            panic!("expected a notification");
        };
        assert_eq!(n.level, crate::action::NotificationLevel::Error);
        assert!(screen.points.is_empty());
        assert!(screen.controller().national_load().error().is_some());
    }

    #[test]
    fn metric_switch_refreshes_points() {
        let mut screen = loaded_screen();
        screen.update(&Action::SelectMetric(Metric::Death)).unwrap();
        assert_eq!(screen.points[0], (0.0, 2.0));
    }

    #[test]
    fn scrub_step_clamps_to_visible_window() {
        let mut screen = loaded_screen();
        screen.update(&Action::SelectWindow(TimeWindow::Week)).unwrap();

        screen.update(&Action::ScrubStep(-100)).unwrap();
        assert_eq!(screen.controller().scrub_index(), Some(33));

        screen.update(&Action::ScrubStep(100)).unwrap();
        assert_eq!(screen.controller().scrub_index(), Some(39));
    }

    #[test]
    fn quit_closes_controller() {
        let mut screen = ChartScreen::new(SelectionState::default());
        screen.update(&Action::Quit).unwrap();
        let follow_up = screen
            .update(&Action::Fetched(FetchOutcome::National(Ok(series(3)))))
            .unwrap();
        assert!(follow_up.is_none());
        assert!(screen.controller().adapter().is_none());
    }

    #[test]
    fn cycling_states_wraps_through_national() {
        let codes = ["AK", "AL"];
        let national = Jurisdiction::National;

        let first = cycle_jurisdiction(&national, &codes, true).unwrap();
        assert_eq!(first, Jurisdiction::State("AK".into()));
        let second = cycle_jurisdiction(&first, &codes, true).unwrap();
        assert_eq!(second, Jurisdiction::State("AL".into()));
        assert_eq!(cycle_jurisdiction(&second, &codes, true).unwrap(), national);
        assert_eq!(
            cycle_jurisdiction(&national, &codes, false).unwrap(),
            Jurisdiction::State("AL".into())
        );
        assert!(cycle_jurisdiction(&national, &[], true).is_none());
    }

    #[test]
    fn next_state_switches_series() {
        let mut screen = loaded_screen();
        let mut groups = StateSeriesMap::new();
        groups.insert("CA".into(), series(5));
        screen
            .update(&Action::Fetched(FetchOutcome::States(Ok(groups))))
            .unwrap();

        screen.update(&Action::NextState).unwrap();

        assert_eq!(
            screen.controller().selection().jurisdiction,
            Jurisdiction::State("CA".into())
        );
        assert_eq!(screen.points.len(), 5);

        screen.update(&Action::SelectNational).unwrap();
        assert_eq!(screen.points.len(), 40);
    }

    fn left(kind: fn(MouseButton) -> MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: kind(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A loaded screen laid out as if the chart panel sat at rows 10..30.
    fn laid_out_screen() -> ChartScreen {
        let screen = loaded_screen();
        let chart = Rect::new(0, 10, 60, 20);
        screen.chart_area.set(chart);
        screen.plot_area.set(plot_region(chart, 6));
        screen
    }

    #[test]
    fn drag_from_outside_chart_does_not_scrub() {
        let mut screen = laid_out_screen();

        let down = screen.handle_mouse_event(left(MouseEventKind::Down, 30, 3)).unwrap();
        assert!(down.is_none());
        let drag = screen.handle_mouse_event(left(MouseEventKind::Drag, 30, 15)).unwrap();
        assert!(drag.is_none());
    }

    #[test]
    fn drag_from_inside_chart_scrubs_until_release() {
        let mut screen = laid_out_screen();

        let down = screen.handle_mouse_event(left(MouseEventKind::Down, 20, 15)).unwrap();
        assert!(matches!(down, Some(Action::Scrub(_))));
        // Leaving the panel mid-drag keeps scrubbing, clamped to the plot.
        let drag = screen.handle_mouse_event(left(MouseEventKind::Drag, 30, 3)).unwrap();
        assert!(matches!(drag, Some(Action::Scrub(_))));

        let up = screen.handle_mouse_event(left(MouseEventKind::Up, 30, 15)).unwrap();
        assert!(up.is_none());
        let stray = screen.handle_mouse_event(left(MouseEventKind::Drag, 30, 15)).unwrap();
        assert!(stray.is_none());
    }

    #[test]
    fn selector_labels_follow_display() {
        let windows: Vec<String> = window_tabs().into_iter().map(|t| t.label).collect();
        assert_eq!(windows, ["Week", "Month", "Max"]);
        let metrics: Vec<String> = metric_tabs().into_iter().map(|t| t.label).collect();
        assert_eq!(metrics, ["Positive", "Negative", "Death"]);
    }

    #[test]
    fn column_maps_to_index() {
        let plot = Rect::new(10, 0, 11, 5);
        assert_eq!(index_at_column(10, plot, 0, 10), 0);
        assert_eq!(index_at_column(15, plot, 0, 10), 5);
        assert_eq!(index_at_column(20, plot, 0, 10), 10);
        assert_eq!(index_at_column(2, plot, 0, 10), 0);
        assert_eq!(index_at_column(80, plot, 0, 10), 10);
        assert_eq!(index_at_column(15, plot, 30, 40), 35);
        assert_eq!(index_at_column(15, plot, 4, 4), 4);
    }

    #[test]
    fn y_bounds_include_zero() {
        assert_eq!(y_bounds(&[]), (0.0, 1.0));
        let (lo, hi) = y_bounds(&[(0.0, 10.0), (1.0, 20.0)]);
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);
        assert_eq!(y_bounds(&[(0.0, -5.0), (1.0, 0.0)]).0, -5.0);
    }
}
