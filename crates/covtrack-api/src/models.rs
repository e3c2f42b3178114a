// COVID Tracking Project response types
//
// Both daily endpoints return a bare JSON array of flat objects. The field
// set drifted over the project's lifetime, so everything beyond the date is
// optional and unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// The `date` column as the API sends it.
///
/// Daily endpoints use a compact integer (`20210307`); some mirrors and older
/// exports send an ISO datetime string (`2021-03-07T00:00:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    Compact(u32),
    Text(String),
}

/// One row from `us/daily.json` or `states/daily.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEntry {
    pub date: DateField,
    /// Two-letter jurisdiction code. Absent on national rows.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub positive_increase: Option<i64>,
    #[serde(default)]
    pub negative_increase: Option<i64>,
    #[serde(default)]
    pub death_increase: Option<i64>,
    /// When the row was last checked, e.g. `"2021-03-07T24:00:00Z"`.
    #[serde(default)]
    pub date_checked: Option<String>,
}
