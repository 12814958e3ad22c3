//! Balance checks for enrollment debits and top-ups.

use crate::error::CoreError;
use crate::types::Money;

/// Fail with [`CoreError::InsufficientBalance`] when `balance < price`.
pub fn ensure_sufficient_balance(balance: Money, price: Money) -> Result<(), CoreError> {
    if balance < price {
        return Err(CoreError::InsufficientBalance {
            balance,
            required: price,
        });
    }
    Ok(())
}

pub fn validate_topup_amount(amount: Money) -> Result<(), CoreError> {
    if amount <= 0 {
        return Err(CoreError::Validation(
            "top-up amount must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn exact_balance_is_enough() {
        assert!(ensure_sufficient_balance(50_000, 50_000).is_ok());
        assert!(ensure_sufficient_balance(100_000, 50_000).is_ok());
    }

    #[test]
    fn short_balance_reports_both_amounts() {
        assert_matches!(
            ensure_sufficient_balance(10_000, 50_000),
            Err(CoreError::InsufficientBalance {
                balance: 10_000,
                required: 50_000
            })
        );
    }

    #[test]
    fn free_course_needs_no_balance() {
        assert!(ensure_sufficient_balance(0, 0).is_ok());
    }

    #[test]
    fn topup_must_be_positive() {
        assert!(validate_topup_amount(1).is_ok());
        assert_matches!(validate_topup_amount(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_topup_amount(-5), Err(CoreError::Validation(_)));
    }
}
