// Identifier assignment for projects and tasks.
//
// Ids derive from the creation timestamp in milliseconds. Two creations in the same
// millisecond (or a clock that went backwards) would collide, so the candidate is
// bumped past the largest id already in use.

pub fn next_id(now_millis: i64, existing: impl IntoIterator<Item = i64>) -> i64 {
    let max_existing = existing.into_iter().max();
    match max_existing {
        Some(max) if max >= now_millis => max.saturating_add(1),
        _ => now_millis,
    }
}
