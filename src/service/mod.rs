use chrono::{Duration, NaiveDateTime, Timelike, Utc};

pub mod admin_service;
pub mod cleanup_service;
pub mod file_service;
pub mod folder_service;
pub mod password_service;
pub mod settings_service;
pub mod share_service;
pub mod token_service;
pub mod user_service;

/// UTC timestamp a fractional number of days from now, truncated to whole
/// seconds so the stored text form compares cleanly against datetime('now')
pub fn days_from_now(days: f64) -> NaiveDateTime {
    let now = Utc::now().naive_utc().with_nanosecond(0).unwrap();
    now + Duration::seconds((days * 86_400.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::days_from_now;
    use chrono::Utc;

    #[test]
    fn days_from_now_handles_fractional_days() {
        let half_day = days_from_now(0.5);
        let diff = half_day - Utc::now().naive_utc();
        // within a second of twelve hours out
        assert!((diff.num_seconds() - 43_200).abs() <= 1);
    }

    #[test]
    fn days_from_now_has_no_subsecond_part() {
        assert_eq!(0, chrono::Timelike::nanosecond(&days_from_now(1.0)));
    }
}
