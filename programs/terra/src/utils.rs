use anchor_lang::prelude::*;
use crate::errors::TerraError;

/// Amount owed for `area` units at `unit_price` over `periods` (1 for sales,
/// the duration in seconds for rentals).
pub fn settlement_amount(unit_price: u64, area: u64, periods: u64) -> Result<u64> {
    unit_price
        .checked_mul(area)
        .and_then(|amount| amount.checked_mul(periods))
        .ok_or_else(|| error!(TerraError::Overflow))
}

/// `now + secs` as a unix timestamp.
pub fn expiry_after(now: i64, secs: u64) -> Result<i64> {
    let secs = i64::try_from(secs).map_err(|_| TerraError::InvalidDuration)?;
    now.checked_add(secs).ok_or_else(|| error!(TerraError::Overflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settlement_amount() {
        assert_eq!(settlement_amount(5, 100, 1).unwrap(), 500);
        assert_eq!(settlement_amount(2, 50, 3600).unwrap(), 360_000);
        assert_eq!(settlement_amount(0, 100, 1).unwrap(), 0);
    }

    #[test]
    fn test_settlement_amount_overflow() {
        let expected: anchor_lang::error::Error = TerraError::Overflow.into();
        assert_eq!(settlement_amount(u64::MAX, 2, 1).unwrap_err(), expected);
        // 1e12 area at 1e6 per unit for 1e6 seconds
        assert_eq!(settlement_amount(1_000_000, 1_000_000_000_000, 1_000_000).unwrap_err(), expected);
    }

    #[test]
    fn test_expiry_after() {
        assert_eq!(expiry_after(1_000, 60).unwrap(), 1_060);
        let overflow: anchor_lang::error::Error = TerraError::Overflow.into();
        assert_eq!(expiry_after(i64::MAX - 10, 11).unwrap_err(), overflow);
        let duration: anchor_lang::error::Error = TerraError::InvalidDuration.into();
        assert_eq!(expiry_after(0, u64::MAX).unwrap_err(), duration);
    }
}
