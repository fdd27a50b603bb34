//! UV severity classification and threshold checks.
//!
//! The category table follows the WHO UV index bands. Notification
//! thresholds are compared against raw indices, not categories.

use std::fmt;

/// UV severity categories, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UvCategory {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvCategory {
    /// Strictly above `Low`.
    pub fn is_elevated(self) -> bool {
        self > UvCategory::Low
    }
}

impl fmt::Display for UvCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UvCategory::None => write!(f, "none"),
            UvCategory::Low => write!(f, "low"),
            UvCategory::Moderate => write!(f, "moderate"),
            UvCategory::High => write!(f, "high"),
            UvCategory::VeryHigh => write!(f, "very high"),
            UvCategory::Extreme => write!(f, "extreme"),
        }
    }
}

/// Maps a UV index to its severity category.
///
/// Total over `i32`. Anything not covered by the 0..=10 bands lands in
/// `Extreme`, which includes negative indices.
// FIXME: negative indices classify as Extreme. Kept until the forecast
// provider confirms whether negatives can ever appear.
pub fn classify(index: i32) -> UvCategory {
    match index {
        0 => UvCategory::None,
        1..=2 => UvCategory::Low,
        3..=5 => UvCategory::Moderate,
        6..=7 => UvCategory::High,
        8..=10 => UvCategory::VeryHigh,
        _ => UvCategory::Extreme,
    }
}

/// Returns `true` when `index` reaches a user-configured threshold.
pub fn meets_threshold(index: i32, threshold: u8) -> bool {
    index >= i32::from(threshold)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_band_boundaries() {
        assert_eq!(classify(0), UvCategory::None);
        assert_eq!(classify(1), UvCategory::Low);
        assert_eq!(classify(2), UvCategory::Low);
        assert_eq!(classify(3), UvCategory::Moderate);
        assert_eq!(classify(5), UvCategory::Moderate);
        assert_eq!(classify(6), UvCategory::High);
        assert_eq!(classify(7), UvCategory::High);
        assert_eq!(classify(8), UvCategory::VeryHigh);
        assert_eq!(classify(10), UvCategory::VeryHigh);
        assert_eq!(classify(11), UvCategory::Extreme);
        assert_eq!(classify(100), UvCategory::Extreme);
    }

    #[test]
    fn test_negative_index_falls_through_to_extreme() {
        assert_eq!(classify(-1), UvCategory::Extreme);
    }

    #[test]
    fn test_categories_are_ordered_ascending() {
        assert!(UvCategory::None < UvCategory::Low);
        assert!(UvCategory::Low < UvCategory::Moderate);
        assert!(UvCategory::Moderate < UvCategory::High);
        assert!(UvCategory::High < UvCategory::VeryHigh);
        assert!(UvCategory::VeryHigh < UvCategory::Extreme);
    }

    #[test]
    fn test_elevated_starts_at_moderate() {
        assert!(!UvCategory::None.is_elevated());
        assert!(!UvCategory::Low.is_elevated());
        assert!(UvCategory::Moderate.is_elevated());
        assert!(UvCategory::Extreme.is_elevated());
    }

    #[test]
    fn test_meets_threshold_is_inclusive() {
        assert!(meets_threshold(3, 3));
        assert!(meets_threshold(4, 3));
        assert!(!meets_threshold(2, 3));
        assert!(meets_threshold(0, 0));
    }
}
