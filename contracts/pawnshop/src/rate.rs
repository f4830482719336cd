//! Fixed-point conversion between collateral and the pegged asset.
//!
//! Oracle rates are quoted as pegged-asset units per one whole collateral coin,
//! i.e. scaled by [`SCALE`]. All arithmetic is integer-only and truncating.

/// One whole collateral coin, in its smallest units.
pub const SCALE: i128 = 100_000_000;

/// Rate actually lent against: `floor(oracle_rate * discount_percent / 100)`.
pub fn discounted_rate(oracle_rate: u64, discount_percent: u32) -> u64 {
    let rate = u128::from(oracle_rate) * u128::from(discount_percent) / 100;
    // discount_percent <= 100 keeps the result within u64
    rate as u64
}

/// Pegged-asset units lent for `deposit`: `floor(deposit * rate / SCALE)`.
///
/// Returns `None` on overflow.
pub fn lend_for(deposit: i128, rate: u64) -> Option<i128> {
    deposit
        .checked_mul(i128::from(rate))
        .map(|scaled| scaled / SCALE)
}

/// Smallest deposit yielding at least one pegged-asset unit: `ceil(SCALE / rate)`.
///
/// Returns `None` for a zero rate, for which no deposit is large enough.
pub fn minimum_deposit(rate: u64) -> Option<i128> {
    if rate == 0 {
        return None;
    }
    let rate = i128::from(rate);
    Some((SCALE + rate - 1) / rate)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_discounted_rate_truncates() {
        assert_eq!(discounted_rate(15_000, 80), 12_000);
        assert_eq!(discounted_rate(10_000, 90), 9_000);
        assert_eq!(discounted_rate(11_200, 100), 11_200);
        assert_eq!(discounted_rate(3, 50), 1);
        assert_eq!(discounted_rate(1, 99), 0);
    }

    #[test]
    fn test_discounted_rate_no_overflow_at_u64_max() {
        assert_eq!(discounted_rate(u64::MAX, 100), u64::MAX);
        assert_eq!(discounted_rate(u64::MAX, 50), u64::MAX / 2);
    }

    #[test]
    fn test_lend_for_whole_coins() {
        // 10k coins at 10000 * 80% is 0.8 of a pegged token
        assert_eq!(lend_for(10_000 * SCALE, 8_000), Some(80_000_000));
        assert_eq!(lend_for(50 * SCALE, 9_000), Some(450_000));
        assert_eq!(lend_for(SCALE, 100_000_000), Some(100_000_000));
    }

    #[test]
    fn test_lend_for_truncates_towards_zero() {
        assert_eq!(lend_for(8_333, 12_000), Some(0));
        assert_eq!(lend_for(8_334, 12_000), Some(1));
        assert_eq!(lend_for(16_667, 12_000), Some(2));
    }

    #[test]
    fn test_lend_for_overflow() {
        assert_eq!(lend_for(i128::MAX, 2), None);
    }

    #[test]
    fn test_minimum_deposit_is_price_of_one_unit() {
        assert_eq!(minimum_deposit(12_000), Some(8_334));
        assert_eq!(minimum_deposit(SCALE as u64), Some(1));
        assert_eq!(minimum_deposit(3 * SCALE as u64), Some(1));
        assert_eq!(minimum_deposit(1), Some(SCALE));
        assert_eq!(minimum_deposit(0), None);
    }

    #[test]
    fn test_minimum_deposit_is_tight() {
        for rate in [1_u64, 7, 9_000, 11_200, 12_000, 33_333, 99_999_999] {
            let min = minimum_deposit(rate).unwrap();
            assert!(lend_for(min, rate).unwrap() >= 1, "rate {}", rate);
            assert_eq!(lend_for(min - 1, rate).unwrap(), 0, "rate {}", rate);
        }
    }
}
