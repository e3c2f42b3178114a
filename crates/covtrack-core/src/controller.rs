// ── Screen controller ──
//
// Owns the selection, the two fetched result slots and the summary label
// state for one screen. Every method is called from the UI loop, so there
// is no locking; fetch tasks talk to it only through `FetchOutcome` values.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::fetch::FetchOutcome;
use crate::model::{DailyRecord, Jurisdiction, Metric, SelectionState, TimeWindow};
use crate::series::{Series, StateSeriesMap};
use crate::spark::{SparkAdapter, SparkSource};

// ── LoadState ────────────────────────────────────────────────────

/// Progress of one fetch, as the UI should present it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ── Summary ──────────────────────────────────────────────────────

/// What the two text labels show: the selected metric's count on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub metric: Metric,
    pub value: i64,
    pub date: NaiveDate,
    /// Index of the summarized record within the active series.
    pub index: usize,
}

impl Summary {
    fn from_record(record: &DailyRecord, metric: Metric, index: usize) -> Self {
        Self {
            metric,
            value: record.value(metric),
            date: record.date,
            index,
        }
    }
}

// ── ScreenController ─────────────────────────────────────────────

/// State and behavior of the single chart screen.
#[derive(Debug)]
pub struct ScreenController {
    defaults: SelectionState,
    selection: SelectionState,
    national: Option<Series>,
    per_state: Option<StateSeriesMap>,
    adapter: Option<SparkAdapter>,
    national_load: LoadState,
    states_load: LoadState,
    /// Set on the first successful national response; selection and scrub
    /// input is ignored until then.
    listeners_ready: bool,
    /// Scrubbed index, `None` meaning "most recent".
    scrub_index: Option<usize>,
    summary: Option<Summary>,
    closed: bool,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new(SelectionState::default())
    }
}

impl ScreenController {
    /// `defaults` is applied every time a national series is bound.
    pub fn new(defaults: SelectionState) -> Self {
        Self {
            selection: defaults.clone(),
            defaults,
            national: None,
            per_state: None,
            adapter: None,
            national_load: LoadState::Pending,
            states_load: LoadState::Pending,
            listeners_ready: false,
            scrub_index: None,
            summary: None,
            closed: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The data source currently bound to the chart.
    pub fn adapter(&self) -> Option<&SparkAdapter> {
        self.adapter.as_ref()
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn per_state(&self) -> Option<&StateSeriesMap> {
        self.per_state.as_ref()
    }

    pub fn national_load(&self) -> &LoadState {
        &self.national_load
    }

    pub fn states_load(&self) -> &LoadState {
        &self.states_load
    }

    pub fn listeners_ready(&self) -> bool {
        self.listeners_ready
    }

    pub fn scrub_index(&self) -> Option<usize> {
        self.scrub_index
    }

    /// Known state codes in sorted order (empty until states load).
    pub fn state_codes(&self) -> Vec<&str> {
        self.per_state
            .as_ref()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Mark the screen as torn down. Outcomes arriving later are dropped.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Route a fetch completion to the matching handler.
    pub fn handle(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::National(result) => self.on_national(result),
            FetchOutcome::States(result) => self.on_states(result),
        }
    }

    /// National fetch completed.
    pub fn on_national(&mut self, result: Result<Series, CoreError>) {
        if self.closed {
            debug!("ignoring national outcome after close");
            return;
        }
        match result {
            Ok(series) => {
                if !self.listeners_ready {
                    debug!("enabling scrub and selection input");
                    self.listeners_ready = true;
                }
                self.national = Some(series.clone());
                self.national_load = LoadState::Loaded;
                self.selection = SelectionState {
                    jurisdiction: Jurisdiction::National,
                    ..self.defaults.clone()
                };
                info!("update chart with national data");
                self.bind(series);
            }
            Err(e) => {
                warn!(error = %e, "national data unavailable");
                self.national_load = LoadState::Failed(e.to_string());
            }
        }
    }

    /// States fetch completed. Never touches the chart or the summary.
    pub fn on_states(&mut self, result: Result<StateSeriesMap, CoreError>) {
        if self.closed {
            debug!("ignoring states outcome after close");
            return;
        }
        match result {
            Ok(groups) => {
                info!(states = groups.len(), "per-state data ready");
                self.per_state = Some(groups);
                self.states_load = LoadState::Loaded;
            }
            Err(e) => {
                warn!(error = %e, "per-state data unavailable");
                self.states_load = LoadState::Failed(e.to_string());
            }
        }
    }

    // ── Selection ────────────────────────────────────────────────

    /// Switch the projected metric. Returns `false` when input is not
    /// enabled yet.
    pub fn select_metric(&mut self, metric: Metric) -> bool {
        if !self.listeners_ready {
            return false;
        }
        self.selection.metric = metric;
        self.refresh_adapter();
        // Keep the label in step with the chart.
        self.refresh_summary();
        true
    }

    /// Switch the visible time window. The summary is left alone.
    pub fn select_window(&mut self, window: TimeWindow) -> bool {
        if !self.listeners_ready {
            return false;
        }
        self.selection.window = window;
        self.refresh_adapter();
        true
    }

    /// Show another jurisdiction's series, keeping metric and window.
    pub fn select_jurisdiction(&mut self, jurisdiction: Jurisdiction) -> Result<(), CoreError> {
        if !self.listeners_ready {
            return Err(CoreError::NotReady);
        }
        let series = match &jurisdiction {
            Jurisdiction::National => self.national.clone().ok_or(CoreError::NotReady)?,
            Jurisdiction::State(code) => self
                .per_state
                .as_ref()
                .ok_or(CoreError::NotReady)?
                .get(code)
                .cloned()
                .ok_or_else(|| CoreError::StateNotFound { code: code.clone() })?,
        };
        info!(jurisdiction = %jurisdiction, days = series.len(), "switching series");
        self.selection.jurisdiction = jurisdiction;
        self.bind(series);
        Ok(())
    }

    // ── Scrubbing ────────────────────────────────────────────────

    /// The chart reports the record under the pointer at `index`.
    pub fn scrub(&mut self, index: usize) -> Result<&Summary, CoreError> {
        if !self.listeners_ready {
            return Err(CoreError::NotReady);
        }
        let adapter = self.adapter.as_ref().ok_or(CoreError::NotReady)?;
        let record = adapter.record_at(index)?;
        self.summary = Some(Summary::from_record(record, self.selection.metric, index));
        self.scrub_index = Some(index);
        self.summary.as_ref().ok_or(CoreError::NotReady)
    }

    /// Drop the scrub position and summarize the most recent day again.
    pub fn scrub_latest(&mut self) {
        self.scrub_index = None;
        self.refresh_summary();
    }

    // ── Internals ────────────────────────────────────────────────

    /// Bind a fresh adapter over `series` and summarize its latest record.
    fn bind(&mut self, series: Series) {
        let next_generation = self
            .adapter
            .as_ref()
            .map_or(0, |a| a.generation().wrapping_add(1));
        self.adapter = Some(SparkAdapter::new(series, &self.selection).starting_at(next_generation));
        self.scrub_index = None;
        self.refresh_summary();
    }

    fn refresh_adapter(&mut self) {
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.apply(&self.selection);
            adapter.notify_data_changed();
        }
    }

    fn refresh_summary(&mut self) {
        let Some(adapter) = self.adapter.as_ref() else {
            self.summary = None;
            return;
        };
        let picked = match self.scrub_index.filter(|&i| i < adapter.count()) {
            Some(i) => adapter.record_at(i).ok().map(|record| (i, record)),
            None => adapter
                .latest()
                .map(|record| (adapter.count().saturating_sub(1), record)),
        };
        self.summary =
            picked.map(|(i, record)| Summary::from_record(record, self.selection.metric, i));
    }
}
