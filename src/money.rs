//! 금액 검증
//! 가격/입찰 컬럼은 모두 NUMERIC(10,2)
// region:    --- Imports
use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;

// endregion: --- Imports

/// NUMERIC(10,2) 로 표현 가능한 최대 금액 (미만)
pub const PRICE_LIMIT: i64 = 100_000_000;

/// 소수점 이하 최대 자리수
pub const MONEY_SCALE: u32 = 2;

/// 저장 가능한 금액인지 확인 (label 은 오류 메시지 주어)
pub fn check_amount(amount: Decimal, label: &str) -> AppResult<()> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(AppError::Validation(format!(
            "{} must have at most {} decimal places",
            label, MONEY_SCALE
        )));
    }
    if amount.abs() >= Decimal::from(PRICE_LIMIT) {
        return Err(AppError::Validation(format!("{} is too large", label)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_decimal_places_fit() {
        assert!(check_amount(Decimal::new(1999, 2), "Bid").is_ok());
        assert!(check_amount(Decimal::new(19_990, 3), "Bid").is_ok());
        assert!(check_amount(Decimal::new(19_991, 3), "Bid").is_err());
    }

    #[test]
    fn column_maximum_is_the_last_accepted_amount() {
        assert!(check_amount(Decimal::new(9_999_999_999, 2), "Bid").is_ok());
        let err = check_amount(Decimal::from(PRICE_LIMIT), "Bid").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Bid is too large"));
    }
}
