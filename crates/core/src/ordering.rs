//! Position arithmetic for ordered collections.
//!
//! Syllabuses under a course and materials under a syllabus carry a dense,
//! 1-based `sort_order`. Items are only ever appended at the end or removed;
//! removal closes the gap by shifting every later sibling down by one. The
//! database layer applies these rules inside a transaction; the functions
//! here are the single source of truth for the arithmetic.

/// First position in any collection.
pub const FIRST_POSITION: i32 = 1;

/// Position for a newly appended item given the current maximum.
///
/// `None` means the parent has no children yet.
pub fn next_position(current_max: Option<i32>) -> i32 {
    current_max.map_or(FIRST_POSITION, |max| max + 1)
}

/// Position a sibling ends up at after the item at `removed` is deleted.
pub fn compacted_position(position: i32, removed: i32) -> i32 {
    if position > removed {
        position - 1
    } else {
        position
    }
}

/// Whether `positions` is exactly the set `{1..=n}` in any order.
pub fn is_dense(positions: &[i32]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .zip(FIRST_POSITION..)
        .all(|(actual, expected)| *actual == expected)
}
