//! Number and date formatting for the summary labels and chart axes.

use chrono::NaiveDate;

/// Thousands-grouped integer, e.g. `1,234,567` or `-1,024`.
pub fn fmt_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Summary date label, e.g. `Mar 07, 2021`.
pub fn fmt_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Short date for the x axis, e.g. `Mar 07`.
pub fn fmt_date_axis(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Compact count for y-axis labels: "950", "12K", "1.2M".
pub fn fmt_count_axis(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{value:.0}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(fmt_count(0), "0");
        assert_eq!(fmt_count(999), "999");
        assert_eq!(fmt_count(1_000), "1,000");
        assert_eq!(fmt_count(1_234_567), "1,234,567");
        assert_eq!(fmt_count(-45_321), "-45,321");
        assert_eq!(fmt_count(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(fmt_date(date), "Mar 07, 2021");
        assert_eq!(fmt_date_axis(date), "Mar 07");
    }

    #[test]
    fn compacts_axis_labels() {
        assert_eq!(fmt_count_axis(950.0), "950");
        assert_eq!(fmt_count_axis(12_400.0), "12K");
        assert_eq!(fmt_count_axis(1_240_000.0), "1.2M");
    }
}
