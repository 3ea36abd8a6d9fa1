//! Small helpers shared by the engine and the renderer.

mod debounce;
mod merge;
mod path;

pub use debounce::Debouncer;
pub use merge::{Field, Merge};
pub use path::{DataPath, Segment, get_value};

/// Integers in `[start, end)`.
pub fn range(start: usize, end: usize) -> Vec<usize> {
    (start..end).collect()
}

/// Restrict `value` to `[min, max]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `max < min` the result is `min`.
pub fn clamp<T: Ord>(value: T, min: T, max: T) -> T {
    if max < min {
        return min;
    }
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert_eq!(range(2, 5), vec![2, 3, 4]);
        assert!(range(3, 3).is_empty());
        assert!(range(4, 1).is_empty());
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(0, 1, 3), 1);
        assert_eq!(clamp(2, 0, 3), 2);
        assert_eq!(clamp(2, 4, 0), 4);
    }
}
