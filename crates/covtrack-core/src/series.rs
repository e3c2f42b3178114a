// ── Series normalization ──
//
// The API serves newest-first; everything downstream wants oldest-first.
// Normalization is a reversal, nothing more: order is checked and logged
// but never repaired, so `reversed[i] == original[n - 1 - i]` always holds.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use covtrack_api::DailyEntry;

use crate::error::CoreError;
use crate::model::DailyRecord;

/// One jurisdiction's records, oldest first.
pub type Series = Arc<[DailyRecord]>;

/// Per-state series keyed by jurisdiction code.
pub type StateSeriesMap = BTreeMap<String, Series>;

/// Reverse a newest-first list into chronological order.
pub fn into_chronological<T>(mut newest_first: Vec<T>) -> Vec<T> {
    newest_first.reverse();
    newest_first
}

/// Whether dates strictly increase across the slice.
pub fn is_strictly_increasing(records: &[DailyRecord]) -> bool {
    records.windows(2).all(|pair| pair[0].date < pair[1].date)
}

/// Group chronological records by state code, preserving relative order.
///
/// Records without a code have no group to join and are skipped.
pub fn group_by_state(records: Vec<DailyRecord>) -> StateSeriesMap {
    let mut groups: BTreeMap<String, Vec<DailyRecord>> = BTreeMap::new();
    let mut orphans = 0usize;

    for record in records {
        match record.state.clone() {
            Some(code) => groups.entry(code).or_default().push(record),
            None => orphans += 1,
        }
    }

    if orphans > 0 {
        warn!(orphans, "dropped state rows without a jurisdiction code");
    }

    groups
        .into_iter()
        .map(|(code, rows)| (code, Series::from(rows)))
        .collect()
}

/// Convert API rows, dropping any that fail to parse.
fn convert_rows(entries: Vec<DailyEntry>) -> Vec<DailyRecord> {
    let total = entries.len();
    let records: Vec<DailyRecord> = entries
        .into_iter()
        .filter_map(|entry| match DailyRecord::try_from(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed row");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(kept = records.len(), total, "some rows were not usable");
    }
    records
}

/// Normalize the national response into a chronological series.
pub fn normalize_national(entries: Vec<DailyEntry>) -> Result<Series, CoreError> {
    let records = into_chronological(convert_rows(entries));
    if records.is_empty() {
        return Err(CoreError::EmptyResponse {
            endpoint: covtrack_api::Endpoint::NationalDaily.to_string(),
        });
    }
    if !is_strictly_increasing(&records) {
        warn!("national series is not strictly chronological after reversal");
    }
    Ok(Series::from(records))
}

/// Normalize the states response into per-state chronological series.
pub fn normalize_states(entries: Vec<DailyEntry>) -> Result<StateSeriesMap, CoreError> {
    let groups = group_by_state(into_chronological(convert_rows(entries)));
    if groups.is_empty() {
        return Err(CoreError::EmptyResponse {
            endpoint: covtrack_api::Endpoint::StatesDaily.to_string(),
        });
    }
    for (code, series) in &groups {
        if !is_strictly_increasing(series) {
            warn!(state = %code, "state series is not strictly chronological after reversal");
        }
    }
    Ok(groups)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use covtrack_api::DateField;

    use super::*;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 6, n).unwrap()
    }

    fn entry(date: u32, state: Option<&str>, positive: i64) -> DailyEntry {
        DailyEntry {
            date: DateField::Compact(date),
            state: state.map(str::to_owned),
            positive_increase: Some(positive),
            negative_increase: Some(0),
            death_increase: Some(0),
            date_checked: None,
        }
    }

    #[test]
    fn reversal_mirrors_indices() {
        let original: Vec<u32> = (0..17).collect();
        let reversed = into_chronological(original.clone());
        let n = original.len();
        for (i, value) in reversed.iter().enumerate() {
            assert_eq!(*value, original[n - 1 - i]);
        }
    }

    #[test]
    fn reversal_of_empty_is_empty() {
        assert!(into_chronological(Vec::<u8>::new()).is_empty());
    }

    #[test]
    fn grouping_preserves_order_and_keys() {
        let records = vec![
            DailyRecord::new(day(1), 1, 0, 0).with_state("CA"),
            DailyRecord::new(day(1), 2, 0, 0).with_state("NY"),
            DailyRecord::new(day(2), 3, 0, 0).with_state("CA"),
            DailyRecord::new(day(2), 4, 0, 0).with_state("NY"),
            DailyRecord::new(day(3), 5, 0, 0).with_state("CA"),
        ];

        let groups = group_by_state(records);

        assert_eq!(groups.len(), 2);
        let ca: Vec<i64> = groups["CA"].iter().map(|r| r.positive_increase).collect();
        assert_eq!(ca, [1, 3, 5]);
        for (code, series) in &groups {
            assert!(series.iter().all(|r| r.state.as_deref() == Some(code.as_str())));
            assert!(is_strictly_increasing(series));
        }
    }

    #[test]
    fn grouping_skips_rows_without_code() {
        let records = vec![
            DailyRecord::new(day(1), 1, 0, 0),
            DailyRecord::new(day(1), 2, 0, 0).with_state("TX"),
        ];
        let groups = group_by_state(records);
        assert_eq!(groups.keys().collect::<Vec<_>>(), ["TX"]);
    }

    #[test]
    fn national_is_reversed_to_oldest_first() {
        let entries = vec![
            entry(20_200_603, None, 30),
            entry(20_200_602, None, 20),
            entry(20_200_601, None, 10),
        ];
        let series = normalize_national(entries).unwrap();
        let dates: Vec<NaiveDate> = series.iter().map(|r| r.date).collect();
        assert_eq!(dates, [day(1), day(2), day(3)]);
        assert_eq!(series[2].positive_increase, 30);
    }

    #[test]
    fn national_empty_is_an_error() {
        assert!(matches!(
            normalize_national(Vec::new()),
            Err(CoreError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn states_are_grouped_after_reversal() {
        let entries = vec![
            entry(20_200_602, Some("AK"), 4),
            entry(20_200_602, Some("AL"), 3),
            entry(20_200_601, Some("AK"), 2),
            entry(20_200_601, Some("AL"), 1),
        ];
        let groups = normalize_states(entries).unwrap();
        let al: Vec<i64> = groups["AL"].iter().map(|r| r.positive_increase).collect();
        assert_eq!(al, [1, 3]);
        let ak: Vec<NaiveDate> = groups["AK"].iter().map(|r| r.date).collect();
        assert_eq!(ak, [day(1), day(2)]);
    }

    #[test]
    fn malformed_rows_are_dropped() {
        let mut bad = entry(0, None, 99);
        bad.date = DateField::Text("n/a".into());
        let entries = vec![entry(20_200_602, None, 2), bad, entry(20_200_601, None, 1)];
        let series = normalize_national(entries).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].positive_increase, 1);
    }
}
