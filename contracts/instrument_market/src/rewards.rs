use crate::types::{ACCRUAL_WINDOW_SECS, BASIS_POINTS, EARLY_PENALTY_BPS};

/// Calculate a basis-point share of a principal
///
/// Formula: amount = principal × rate_bps / 10,000
///
/// Example:
/// - principal: 100
/// - rate: 1.5% (150 basis points)
/// - amount: 100 × 150 / 10,000 = 1.5
pub fn calculate_rate_amount(principal: i128, rate_bps: i128) -> Option<i128> {
    principal.checked_mul(rate_bps)?.checked_div(BASIS_POINTS)
}

/// Calculate the time-prorated accrual of a nominal rate amount
///
/// Formula: accrual = rate_amount × min(elapsed, validity) / 30 days
///
/// The nominal amount is quoted per 30-day window, so an instrument valid
/// for 30 days accrues exactly its nominal amount at unlock.
///
/// Example:
/// - rate_amount: 5 (5% of 100)
/// - elapsed: 15 days, validity: 30 days
/// - accrual: 5 × 15 / 30 = 2.5
pub fn calculate_accrual(rate_amount: i128, elapsed: u64, validity: u64) -> Option<i128> {
    let capped = elapsed.min(validity) as i128;

    rate_amount
        .checked_mul(capped)?
        .checked_div(ACCRUAL_WINDOW_SECS as i128)
}

/// Calculate the early-redemption penalty
///
/// Formula: penalty = principal × 40%
pub fn calculate_penalty(principal: i128) -> Option<i128> {
    calculate_rate_amount(principal, EARLY_PENALTY_BPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::REFERRAL_RATES_BPS;

    const SCALE: i128 = 10_000_000;
    const DAY: u64 = 24 * 60 * 60;

    #[test]
    fn test_referral_bonuses() {
        let principal = 100 * SCALE;

        let bonuses: [i128; 3] = [
            calculate_rate_amount(principal, REFERRAL_RATES_BPS[0]).unwrap(),
            calculate_rate_amount(principal, REFERRAL_RATES_BPS[1]).unwrap(),
            calculate_rate_amount(principal, REFERRAL_RATES_BPS[2]).unwrap(),
        ];

        // Expected: 1.5, 1.0, 0.5
        assert_eq!(bonuses, [15 * SCALE / 10, SCALE, 5 * SCALE / 10]);
    }

    #[test]
    fn test_accrual_full_window() {
        let reward = calculate_rate_amount(100 * SCALE, 500).unwrap();

        let accrual = calculate_accrual(reward, 30 * DAY, 30 * DAY).unwrap();

        // Expected: 5% of 100 = 5
        assert_eq!(accrual, 5 * SCALE);
    }

    #[test]
    fn test_accrual_halfway() {
        let reward = calculate_rate_amount(100 * SCALE, 500).unwrap();

        let accrual = calculate_accrual(reward, 15 * DAY, 30 * DAY).unwrap();

        // Expected: 5 × 15 / 30 = 2.5
        assert_eq!(accrual, 25 * SCALE / 10);
    }

    #[test]
    fn test_accrual_capped_at_validity() {
        let reward = calculate_rate_amount(100 * SCALE, 500).unwrap();

        let late = calculate_accrual(reward, 90 * DAY, 10 * DAY).unwrap();
        let on_time = calculate_accrual(reward, 10 * DAY, 10 * DAY).unwrap();

        // Expected: 5 × 10 / 30, rounded down
        assert_eq!(late, on_time);
        assert_eq!(on_time, 16_666_666);
    }

    #[test]
    fn test_accrual_at_purchase_time() {
        let accrual = calculate_accrual(5 * SCALE, 0, 30 * DAY).unwrap();

        assert_eq!(accrual, 0);
    }

    #[test]
    fn test_penalty() {
        let penalty = calculate_penalty(100 * SCALE).unwrap();

        // Expected: 40% of 100 = 40
        assert_eq!(penalty, 40 * SCALE);
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(calculate_rate_amount(i128::MAX, 2), None);
        assert_eq!(calculate_accrual(i128::MAX, 30 * DAY, 30 * DAY), None);
    }
}
