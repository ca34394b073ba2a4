//! Glob matching for cache keys.
//!
//! Only `*` is special: it matches any run of characters, including none.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use tasktrack_core::cache::pattern_matches;
///
/// assert!(pattern_matches("task:7", "task:7"));
/// assert!(pattern_matches("tasksByStatus:*", "tasksByStatus:IN_PROGRESS"));
/// assert!(pattern_matches("*:TODO", "tasksByStatus:TODO"));
/// assert!(!pattern_matches("tasksByStatus:*", "task:7"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == key;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    let last = segments.len() - 1;
    let mut remaining = key;

    for (i, segment) in segments.iter().enumerate() {
        if i == 0 {
            // Anchored at the start unless the pattern opens with `*`.
            match remaining.strip_prefix(segment) {
                Some(rest) => remaining = rest,
                None => return false,
            }
        } else if i == last {
            // Anchored at the end unless the pattern closes with `*`.
            return remaining.ends_with(segment);
        } else if !segment.is_empty() {
            match remaining.find(segment) {
                Some(pos) => remaining = &remaining[pos + segment.len()..],
                None => return false,
            }
        }
    }

    true
}
