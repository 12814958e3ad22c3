//! Lock flags for a course outline.
//!
//! Order 1 is always unlocked; order *k* is unlocked when the syllabus at
//! order *k - 1* is completed by the viewer. Callers only compute this for an
//! enrolled viewer. Anonymous and non-enrolled viewers get no lock state at
//! all, which is distinct from "everything locked".

use std::collections::HashSet;

use crate::ordering::FIRST_POSITION;
use crate::progress::SyllabusSlot;
use crate::types::DbId;

/// Lock state for one syllabus of the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllabusLock {
    pub syllabus_id: DbId,
    pub sort_order: i32,
    pub is_locked: bool,
}

/// Compute lock flags for `outline`, returned in ascending `sort_order`.
pub fn lock_states(outline: &[SyllabusSlot], completed: &HashSet<DbId>) -> Vec<SyllabusLock> {
    let mut ordered = outline.to_vec();
    ordered.sort_by_key(|slot| slot.sort_order);

    let mut previous_completed = false;
    ordered
        .into_iter()
        .map(|slot| {
            let is_locked = slot.sort_order > FIRST_POSITION && !previous_completed;
            previous_completed = completed.contains(&slot.syllabus_id);
            SyllabusLock {
                syllabus_id: slot.syllabus_id,
                sort_order: slot.sort_order,
                is_locked,
            }
        })
        .collect()
}
