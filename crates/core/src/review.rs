use crate::error::CoreError;

pub const MIN_RATE: i16 = 1;
pub const MAX_RATE: i16 = 5;

pub fn validate_rate(rate: i16) -> Result<(), CoreError> {
    if !(MIN_RATE..=MAX_RATE).contains(&rate) {
        return Err(CoreError::Validation(format!(
            "rate must be between {MIN_RATE} and {MAX_RATE}"
        )));
    }
    Ok(())
}

/// Integer average of all review rates, truncated toward zero. Zero reviews
/// yields zero.
pub fn average_rating(sum: i64, count: i64) -> i16 {
    if count <= 0 {
        return 0;
    }
    (sum / count) as i16
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rate_range_is_inclusive() {
        for rate in 1..=5 {
            assert!(validate_rate(rate).is_ok());
        }
        assert_matches!(validate_rate(0), Err(CoreError::Validation(_)));
        assert_matches!(validate_rate(6), Err(CoreError::Validation(_)));
    }

    #[test]
    fn average_truncates() {
        assert_eq!(average_rating(5 + 4, 2), 4);
        assert_eq!(average_rating(5 + 5 + 4, 3), 4);
        assert_eq!(average_rating(3, 1), 3);
    }

    #[test]
    fn no_reviews_means_zero() {
        assert_eq!(average_rating(0, 0), 0);
    }
}
