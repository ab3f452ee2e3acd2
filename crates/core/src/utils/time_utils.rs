use chrono::{Datelike, NaiveDate};

/// Last calendar day of the given month, or `None` for an invalid month.
pub fn calendar_month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Period boundary date for a month.
///
/// Custody snapshots are not always taken on the calendar month end (weekends,
/// bank holidays), so the latest snapshot date inside the month wins. Without
/// one, the calendar month end is used.
pub fn month_end_date(year: i32, month: u32, available_dates: &[NaiveDate]) -> Option<NaiveDate> {
    let latest_snapshot = available_dates
        .iter()
        .filter(|d| d.year() == year && d.month() == month)
        .max()
        .copied();

    latest_snapshot.or_else(|| calendar_month_end(year, month))
}

/// Boundary date of the month before the one containing `date`.
pub fn previous_month_end_date(date: NaiveDate, available_dates: &[NaiveDate]) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    month_end_date(year, month, available_dates)
}

/// Signed whole days from `start` to `end`.
pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_month_end() {
        assert_eq!(calendar_month_end(2024, 2), Some(date(2024, 2, 29)));
        assert_eq!(calendar_month_end(2023, 2), Some(date(2023, 2, 28)));
        assert_eq!(calendar_month_end(2024, 12), Some(date(2024, 12, 31)));
        assert_eq!(calendar_month_end(2024, 13), None);
    }

    #[test]
    fn test_month_end_prefers_latest_snapshot() {
        let snapshots = vec![
            date(2024, 5, 15),
            date(2024, 5, 30),
            date(2024, 6, 28),
        ];
        assert_eq!(month_end_date(2024, 5, &snapshots), Some(date(2024, 5, 30)));
        assert_eq!(month_end_date(2024, 6, &snapshots), Some(date(2024, 6, 28)));
    }

    #[test]
    fn test_month_end_without_snapshot_uses_calendar() {
        assert_eq!(month_end_date(2024, 4, &[]), Some(date(2024, 4, 30)));
    }

    #[test]
    fn test_previous_month_end_crosses_year() {
        let snapshots = vec![date(2023, 12, 29)];
        assert_eq!(
            previous_month_end_date(date(2024, 1, 31), &snapshots),
            Some(date(2023, 12, 29))
        );
        assert_eq!(
            previous_month_end_date(date(2024, 3, 31), &[]),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn test_days_between() {
        assert_eq!(get_days_between(date(2024, 1, 1), date(2024, 1, 11)), 10);
        assert_eq!(get_days_between(date(2024, 1, 11), date(2024, 1, 1)), -10);
    }
}
