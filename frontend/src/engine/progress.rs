//! Turning transport byte counters into a display percentage.

use crate::types::ProgressTick;

/// `round(loaded * 100 / total)`, or 0 when the total is unknown or zero.
///
/// The result is not clamped: callers drop anything above 100 instead of
/// showing a corrected value.
pub fn percent_of(tick: ProgressTick) -> u64 {
    match tick.total {
        Some(total) if total > 0 => {
            let scaled = (tick.loaded as u128) * 100;
            let total = total as u128;
            ((scaled + total / 2) / total).min(u64::MAX as u128) as u64
        }
        _ => 0,
    }
}

/// Percentage to apply for `tick`, `None` if the transport overshot.
pub fn accepted_percent(tick: ProgressTick) -> Option<u8> {
    let percent = percent_of(tick);
    if percent <= 100 {
        Some(percent as u8)
    } else {
        log::debug!("dropping progress tick above 100%: {:?}", tick);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(loaded: u64, total: Option<u64>) -> ProgressTick {
        ProgressTick { loaded, total }
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(percent_of(tick(1, Some(3))), 33);
        assert_eq!(percent_of(tick(2, Some(3))), 67);
        assert_eq!(percent_of(tick(1, Some(200))), 1);
        assert_eq!(percent_of(tick(512, Some(1024))), 50);
        assert_eq!(percent_of(tick(1024, Some(1024))), 100);
    }

    #[test]
    fn test_unknown_total_reports_zero() {
        assert_eq!(percent_of(tick(4096, None)), 0);
        assert_eq!(percent_of(tick(4096, Some(0))), 0);
    }

    #[test]
    fn test_overflow_is_not_accepted() {
        assert_eq!(accepted_percent(tick(300, Some(200))), None);
        assert_eq!(accepted_percent(tick(200, Some(200))), Some(100));
    }

    #[test]
    fn test_huge_counters_do_not_overflow() {
        let big = u64::MAX / 2;
        assert_eq!(percent_of(tick(big, Some(big))), 100);
    }
}
