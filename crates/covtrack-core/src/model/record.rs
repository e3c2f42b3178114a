use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::selection::Metric;

/// One calendar day's statistics for a jurisdiction.
///
/// Immutable once built. Series share records through `Arc<[DailyRecord]>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Jurisdiction code; `None` for national rows.
    pub state: Option<String>,
    pub positive_increase: i64,
    pub negative_increase: i64,
    pub death_increase: i64,
    pub date_checked: Option<DateTime<Utc>>,
}

impl DailyRecord {
    /// A national record with the three daily increases.
    pub fn new(date: NaiveDate, positive: i64, negative: i64, death: i64) -> Self {
        Self {
            date,
            state: None,
            positive_increase: positive,
            negative_increase: negative,
            death_increase: death,
            date_checked: None,
        }
    }

    /// Tag the record with a jurisdiction code.
    pub fn with_state(mut self, code: impl Into<String>) -> Self {
        self.state = Some(code.into());
        self
    }

    /// The field selected by `metric`.
    pub fn value(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Positive => self.positive_increase,
            Metric::Negative => self.negative_increase,
            Metric::Death => self.death_increase,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn value_projects_each_metric() {
        let day = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let record = DailyRecord::new(day, 30_000, 90_000, 1_000);

        assert_eq!(record.value(Metric::Positive), 30_000);
        assert_eq!(record.value(Metric::Negative), 90_000);
        assert_eq!(record.value(Metric::Death), 1_000);
    }

    #[test]
    fn with_state_sets_code() {
        let day = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        let record = DailyRecord::new(day, 1, 2, 3).with_state("NY");
        assert_eq!(record.state.as_deref(), Some("NY"));
    }
}
