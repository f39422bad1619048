use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Days back from Sunday-indexed weekday to reach Tuesday (index 2)
const TUESDAY: u32 = 2;

/// Scoring periods are keyed by the Tuesday on or before `today`
pub fn period_key(today: NaiveDate) -> String {
    let weekday = today.weekday().num_days_from_sunday();
    let days_back = (weekday + 7 - TUESDAY) % 7;
    let tuesday = today - Duration::days(i64::from(days_back));
    tuesday.format("%Y-%m-%d").to_string()
}

pub fn current_period_key() -> String {
    period_key(Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tuesday_is_its_own_period() {
        // 2025-06-03 is a Tuesday
        assert_eq!(period_key(date(2025, 6, 3)), "2025-06-03");
    }

    #[test]
    fn later_days_walk_back_to_tuesday() {
        assert_eq!(period_key(date(2025, 6, 4)), "2025-06-03");
        assert_eq!(period_key(date(2025, 6, 8)), "2025-06-03");
        assert_eq!(period_key(date(2025, 6, 9)), "2025-06-03");
    }

    #[test]
    fn sunday_and_monday_belong_to_previous_week() {
        assert_eq!(period_key(date(2025, 6, 1)), "2025-05-27");
        assert_eq!(period_key(date(2025, 6, 2)), "2025-05-27");
    }

    #[test]
    fn walk_back_crosses_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(period_key(date(2025, 1, 1)), "2024-12-31");
    }
}
