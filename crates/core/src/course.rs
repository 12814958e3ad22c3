//! Course catalog constants and field validation.

use crate::error::CoreError;
use crate::types::Money;

/// Catalog categories a course may be filed under.
pub const CATEGORIES: &[&str] = &[
    "Android",
    "Web",
    "Desktop",
    "Multiplatform",
    "Game",
    "IOS",
    "Machine Learning",
    "Data Scientist",
    "React",
    "DevOps",
    "Cloud",
];

pub const DIFFICULTY_BEGINNER: &str = "beginner";
pub const DIFFICULTY_INTERMEDIATE: &str = "intermediate";
pub const DIFFICULTY_ADVANCED: &str = "advanced";

/// Allowed difficulty labels. Must match the CHECK constraint on `courses.difficulty`.
pub const DIFFICULTIES: &[&str] = &[
    DIFFICULTY_BEGINNER,
    DIFFICULTY_INTERMEDIATE,
    DIFFICULTY_ADVANCED,
];

pub fn validate_category(category: &str) -> Result<(), CoreError> {
    if !CATEGORIES.contains(&category) {
        return Err(CoreError::Validation(format!(
            "unknown category '{category}'"
        )));
    }
    Ok(())
}

pub fn validate_difficulty(difficulty: &str) -> Result<(), CoreError> {
    if !DIFFICULTIES.contains(&difficulty) {
        return Err(CoreError::Validation(format!(
            "difficulty must be one of: {}",
            DIFFICULTIES.join(", ")
        )));
    }
    Ok(())
}

pub fn validate_price(price: Money) -> Result<(), CoreError> {
    if price < 0 {
        return Err(CoreError::Validation("price cannot be negative".to_string()));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".to_string()));
    }
    Ok(())
}
