// ── Chart data source ──
//
// `SparkSource` is the contract a sparkline widget consumes. It is pull
// based: the widget asks for counts and values when it draws and compares
// `generation()` against what it cached last time. Mutating the projection
// does not bump the generation; the owner calls `notify_data_changed()`.

use crate::error::CoreError;
use crate::model::{DailyRecord, Metric, SelectionState, TimeWindow};
use crate::series::Series;

/// Anything a sparkline can draw.
pub trait SparkSource {
    /// The record type handed back to scrub listeners.
    type Item;

    /// Number of points in the series.
    fn count(&self) -> usize;

    /// The record behind point `index`.
    fn record_at(&self, index: usize) -> Result<&Self::Item, CoreError>;

    /// Y value for point `index` under the current projection.
    fn value_at(&self, index: usize) -> Result<f64, CoreError>;

    /// Left edge of the visible range, in index units. May be negative when
    /// the window is wider than the series; clamping is the widget's job.
    fn visible_lower_bound(&self) -> f64;

    /// Bumped every time the owner signals that values changed.
    fn generation(&self) -> u64;

    /// Every `(index, value)` pair, ready for a line dataset.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn points(&self) -> Vec<(f64, f64)> {
        (0..self.count())
            .filter_map(|i| self.value_at(i).ok().map(|v| (i as f64, v)))
            .collect()
    }
}

/// Projects a chronological [`Series`] through the selected metric and
/// time window.
#[derive(Debug, Clone)]
pub struct SparkAdapter {
    series: Series,
    metric: Metric,
    window: TimeWindow,
    generation: u64,
}

impl SparkAdapter {
    pub fn new(series: Series, selection: &SelectionState) -> Self {
        Self {
            series,
            metric: selection.metric,
            window: selection.window,
            generation: 0,
        }
    }

    /// Start the generation counter at `generation`, so a widget still
    /// holding points from a previous adapter sees the swap as a change.
    pub fn starting_at(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Take metric and window from `selection`. Does not notify.
    pub fn apply(&mut self, selection: &SelectionState) {
        self.metric = selection.metric;
        self.window = selection.window;
    }

    /// Tell readers that every value must be re-read.
    pub fn notify_data_changed(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&DailyRecord> {
        self.series.last()
    }

    /// First index the widget should actually draw (lower bound clamped
    /// into the series).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::as_conversions
    )]
    pub fn first_visible_index(&self) -> usize {
        let lower = self.visible_lower_bound().max(0.0) as usize;
        lower.min(self.count().saturating_sub(1))
    }
}

impl SparkSource for SparkAdapter {
    type Item = DailyRecord;

    fn count(&self) -> usize {
        self.series.len()
    }

    fn record_at(&self, index: usize) -> Result<&DailyRecord, CoreError> {
        self.series.get(index).ok_or(CoreError::OutOfRange {
            index,
            count: self.series.len(),
        })
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn value_at(&self, index: usize) -> Result<f64, CoreError> {
        self.record_at(index)
            .map(|record| record.value(self.metric) as f64)
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn visible_lower_bound(&self) -> f64 {
        match self.window.days() {
            Some(days) => self.count() as f64 - f64::from(days),
            None => 0.0,
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use chrono::{Days, NaiveDate};
    use strum::IntoEnumIterator;

    use super::*;

    /// Ten chronological days with positive = 1..=10, negative = 10x,
    /// death = 100 - day.
    fn ten_days() -> Series {
        let start = NaiveDate::from_ymd_opt(2020, 9, 1).unwrap();
        (1..=10i64)
            .map(|n| {
                let date = start.checked_add_days(Days::new(n.unsigned_abs())).unwrap();
                DailyRecord::new(date, n, n * 10, 100 - n)
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn adapter(metric: Metric, window: TimeWindow) -> SparkAdapter {
        SparkAdapter::new(ten_days(), &SelectionState::new(metric, window))
    }

    #[test]
    fn value_matches_selected_field_for_every_index() {
        for metric in Metric::iter() {
            let a = adapter(metric, TimeWindow::All);
            for i in 0..a.count() {
                let expected = a.record_at(i).unwrap().value(metric);
                assert_eq!(a.value_at(i).unwrap(), expected as f64, "{metric} @ {i}");
            }
        }
    }

    #[test]
    fn positive_all_scenario() {
        let a = adapter(Metric::Positive, TimeWindow::All);
        assert_eq!(a.count(), 10);
        assert_eq!(a.value_at(9).unwrap(), 10.0);
        assert_eq!(a.visible_lower_bound(), 0.0);
    }

    #[test]
    fn week_and_month_bounds() {
        assert_eq!(adapter(Metric::Positive, TimeWindow::Week).visible_lower_bound(), 3.0);
        // Shorter than the window: negative, not clamped.
        assert_eq!(adapter(Metric::Positive, TimeWindow::Month).visible_lower_bound(), -20.0);
    }

    #[test]
    fn first_visible_index_clamps() {
        assert_eq!(adapter(Metric::Death, TimeWindow::Month).first_visible_index(), 0);
        assert_eq!(adapter(Metric::Death, TimeWindow::Week).first_visible_index(), 3);
    }

    #[test]
    fn out_of_range_lookups_fail() {
        let a = adapter(Metric::Positive, TimeWindow::All);
        assert_eq!(
            a.record_at(10).unwrap_err(),
            CoreError::OutOfRange { index: 10, count: 10 }
        );
        assert!(a.value_at(usize::MAX).is_err());
    }

    #[test]
    fn apply_does_not_notify() {
        let mut a = adapter(Metric::Positive, TimeWindow::All);
        let before = a.generation();

        a.apply(&SelectionState::new(Metric::Death, TimeWindow::Week));
        assert_eq!(a.generation(), before);
        assert_eq!(a.value_at(0).unwrap(), 99.0);
        assert_eq!(a.visible_lower_bound(), 3.0);

        a.notify_data_changed();
        assert_eq!(a.generation(), before + 1);
    }

    #[test]
    fn points_cover_every_index() {
        let a = adapter(Metric::Negative, TimeWindow::Week);
        let points = a.points();
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], (0.0, 10.0));
        assert_eq!(points[9], (9.0, 100.0));
    }

    #[test]
    fn latest_is_the_newest_record() {
        let a = adapter(Metric::Positive, TimeWindow::Week);
        assert_eq!(a.latest().unwrap().positive_increase, 10);

        let empty = SparkAdapter::new(Vec::<DailyRecord>::new().into(), &SelectionState::default());
        assert!(empty.latest().is_none());
    }

    #[test]
    fn starting_at_seeds_generation() {
        let a = adapter(Metric::Positive, TimeWindow::All).starting_at(7);
        assert_eq!(a.generation(), 7);
    }
}
