// ── API-to-domain type conversions ──
//
// Bridges raw `covtrack_api` rows into `DailyRecord`. Dates are mandatory
// and must parse; every count defaults to zero when the API sends `null`
// or omits the field.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

use covtrack_api::{DailyEntry, DateField};

use crate::error::CoreError;
use crate::model::DailyRecord;

/// Pattern the API documents for datetime-valued date columns.
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ── Helpers ────────────────────────────────────────────────────────

/// Decode a compact `yyyyMMdd` integer.
fn parse_compact(raw: u32) -> Option<NaiveDate> {
    let year = i32::try_from(raw / 10_000).ok()?;
    NaiveDate::from_ymd_opt(year, (raw / 100) % 100, raw % 100)
}

/// Decode the textual forms seen in the wild: `yyyy-MM-dd'T'HH:mm:ss`
/// (optionally with a trailing `Z`), a bare `yyyy-MM-dd`, or a compact
/// `yyyyMMdd` string.
fn parse_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, DATETIME_FORMAT)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
        .or_else(|| trimmed.parse::<u32>().ok().and_then(parse_compact))
}

/// Parse the API's `date` column into a calendar date.
pub fn parse_date(field: &DateField) -> Option<NaiveDate> {
    match field {
        DateField::Compact(raw) => parse_compact(*raw),
        DateField::Text(raw) => parse_text(raw),
    }
}

/// Parse `dateChecked`. The API emits `T24:00:00Z` for end-of-day checks,
/// which is rolled over to midnight of the following day.
pub fn parse_checked(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let (day, time) = raw.split_once('T')?;
    if !time.starts_with("24:00") {
        return None;
    }
    let next = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()?
        .checked_add_days(Days::new(1))?;
    Some(next.and_hms_opt(0, 0, 0)?.and_utc())
}

// ── DailyEntry → DailyRecord ───────────────────────────────────────

impl TryFrom<DailyEntry> for DailyRecord {
    type Error = CoreError;

    fn try_from(entry: DailyEntry) -> Result<Self, Self::Error> {
        let date = parse_date(&entry.date).ok_or_else(|| CoreError::InvalidData {
            message: format!("unparseable date {:?}", entry.date),
        })?;

        Ok(Self {
            date,
            state: entry.state.filter(|code| !code.trim().is_empty()),
            positive_increase: entry.positive_increase.unwrap_or(0),
            negative_increase: entry.negative_increase.unwrap_or(0),
            death_increase: entry.death_increase.unwrap_or(0),
            date_checked: entry.date_checked.as_deref().and_then(parse_checked),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(date: DateField) -> DailyEntry {
        DailyEntry {
            date,
            state: None,
            positive_increase: Some(5),
            negative_increase: None,
            death_increase: Some(1),
            date_checked: None,
        }
    }

    #[test]
    fn compact_date() {
        assert_eq!(
            parse_date(&DateField::Compact(20_200_315)),
            NaiveDate::from_ymd_opt(2020, 3, 15)
        );
        assert_eq!(parse_date(&DateField::Compact(20_201_340)), None);
    }

    #[test]
    fn textual_dates() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 7);
        for raw in ["2021-03-07T00:00:00", "2021-03-07T12:30:00Z", "2021-03-07", "20210307"] {
            assert_eq!(parse_date(&DateField::Text(raw.into())), expected, "{raw}");
        }
        assert_eq!(parse_date(&DateField::Text("March 7".into())), None);
    }

    #[test]
    fn checked_end_of_day_rolls_over() {
        let parsed = parse_checked("2021-03-07T24:00:00Z").unwrap();
        assert_eq!(parsed.date_naive(), NaiveDate::from_ymd_opt(2021, 3, 8).unwrap());

        let plain = parse_checked("2021-03-07T15:00:00Z").unwrap();
        assert_eq!(plain.date_naive(), NaiveDate::from_ymd_opt(2021, 3, 7).unwrap());
    }

    #[test]
    fn nulls_default_to_zero() {
        let record = DailyRecord::try_from(entry(DateField::Compact(20_200_401))).unwrap();
        assert_eq!(record.positive_increase, 5);
        assert_eq!(record.negative_increase, 0);
        assert_eq!(record.death_increase, 1);
        assert_eq!(record.state, None);
    }

    #[test]
    fn bad_date_is_rejected() {
        let result = DailyRecord::try_from(entry(DateField::Text("soon".into())));
        assert!(matches!(result, Err(CoreError::InvalidData { .. })));
    }
}
