use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Which daily increase the chart projects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Positive,
    Negative,
    Death,
}

/// How many trailing days of the series are visible.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Week,
    Month,
    #[default]
    #[serde(alias = "max")]
    #[strum(to_string = "Max")]
    All,
}

impl TimeWindow {
    /// Number of most-recent days shown, `None` for the full series.
    pub fn days(self) -> Option<u32> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::All => None,
        }
    }
}

/// Whose series is on screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Jurisdiction {
    #[default]
    National,
    /// Two-letter state or territory code, e.g. `"CA"`.
    State(String),
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::National => f.write_str("United States"),
            Self::State(code) => f.write_str(code),
        }
    }
}

/// The controller's current selection. Passed by reference into the
/// chart data source; never mutated behind the controller's back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub metric: Metric,
    pub window: TimeWindow,
    pub jurisdiction: Jurisdiction,
}

impl SelectionState {
    pub fn new(metric: Metric, window: TimeWindow) -> Self {
        Self {
            metric,
            window,
            jurisdiction: Jurisdiction::National,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn window_days() {
        assert_eq!(TimeWindow::Week.days(), Some(7));
        assert_eq!(TimeWindow::Month.days(), Some(30));
        assert_eq!(TimeWindow::All.days(), None);
    }

    #[test]
    fn labels_follow_declaration_order() {
        let metrics: Vec<String> = Metric::iter().map(|m| m.to_string()).collect();
        assert_eq!(metrics, ["Positive", "Negative", "Death"]);

        let windows: Vec<String> = TimeWindow::iter().map(|w| w.to_string()).collect();
        assert_eq!(windows, ["Week", "Month", "Max"]);
    }

    #[test]
    fn default_selection_is_positive_all_national() {
        let sel = SelectionState::default();
        assert_eq!(sel.metric, Metric::Positive);
        assert_eq!(sel.window, TimeWindow::All);
        assert_eq!(sel.jurisdiction, Jurisdiction::National);
    }
}
