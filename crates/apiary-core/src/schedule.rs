//! Next-action scheduling

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::kind::RiskLevel;

/// Days until the next action: the risk level's base interval, bounded by
/// `cap`, never less than one day
pub fn interval_days(risk: RiskLevel, cap: Option<u32>) -> u32 {
    let base = risk.base_interval_days();
    cap.map_or(base, |c| base.min(c)).max(1)
}

/// Calendar date of the next required action
///
/// Adds whole calendar days to the UTC date of `observed_at`, so the result
/// is always strictly after the observation.
pub fn next_action_date(
    observed_at: DateTime<Utc>,
    risk: RiskLevel,
    cap: Option<u32>,
) -> Result<NaiveDate> {
    let days = interval_days(risk, cap);
    observed_at
        .date_naive()
        .checked_add_days(Days::new(days as u64))
        .ok_or_else(|| Error::DateOutOfRange(format!("{} + {} days", observed_at, days)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn test_base_intervals() {
        let ts = at(2024, 4, 1, 10);
        let date = |risk| next_action_date(ts, risk, None).unwrap();
        assert_eq!(date(RiskLevel::Critical), NaiveDate::from_ymd_opt(2024, 4, 4).unwrap());
        assert_eq!(date(RiskLevel::High), NaiveDate::from_ymd_opt(2024, 4, 8).unwrap());
        assert_eq!(date(RiskLevel::Medium), NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(date(RiskLevel::Low), NaiveDate::from_ymd_opt(2024, 4, 22).unwrap());
    }

    #[test]
    fn test_cap_only_shortens() {
        assert_eq!(interval_days(RiskLevel::Low, Some(7)), 7);
        assert_eq!(interval_days(RiskLevel::Low, Some(5)), 5);
        assert_eq!(interval_days(RiskLevel::Critical, Some(5)), 3);
        assert_eq!(interval_days(RiskLevel::Critical, Some(0)), 1);
    }

    #[test]
    fn test_crosses_month_and_year() {
        let ts = at(2023, 12, 20, 23);
        assert_eq!(
            next_action_date(ts, RiskLevel::Low, None).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        let leap = at(2024, 2, 27, 8);
        assert_eq!(
            next_action_date(leap, RiskLevel::Critical, None).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_out_of_range() {
        let ts = DateTime::<Utc>::MAX_UTC;
        assert!(matches!(
            next_action_date(ts, RiskLevel::Low, None),
            Err(Error::DateOutOfRange(_))
        ));
    }
}
