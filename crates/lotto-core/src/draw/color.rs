// Color bands for drawn numbers.
//
// 1-10 yellow, 11-20 blue, 21-30 red, 31-40 gray, 41-45 green.

use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Yellow,
    Blue,
    Red,
    Gray,
    Green,
}

impl ColorCategory {
    pub const ALL: [ColorCategory; 5] = [
        ColorCategory::Yellow,
        ColorCategory::Blue,
        ColorCategory::Red,
        ColorCategory::Gray,
        ColorCategory::Green,
    ];

    /// The numbers (within a draw's range) that fall in this band.
    pub fn range(self) -> RangeInclusive<u8> {
        match self {
            ColorCategory::Yellow => 1..=10,
            ColorCategory::Blue => 11..=20,
            ColorCategory::Red => 21..=30,
            ColorCategory::Gray => 31..=40,
            ColorCategory::Green => 41..=45,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorCategory::Yellow => "yellow",
            ColorCategory::Blue => "blue",
            ColorCategory::Red => "red",
            ColorCategory::Gray => "gray",
            ColorCategory::Green => "green",
        }
    }
}

/// Map a number to its color band.
///
/// Total over `u8`: 0 lands in the first band and anything above 40 in the
/// last, so every draw number maps to exactly one category.
pub fn color_category(n: u8) -> ColorCategory {
    match n {
        0..=10 => ColorCategory::Yellow,
        11..=20 => ColorCategory::Blue,
        21..=30 => ColorCategory::Red,
        31..=40 => ColorCategory::Gray,
        _ => ColorCategory::Green,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_land_on_correct_side() {
        assert_eq!(color_category(1), ColorCategory::Yellow);
        assert_eq!(color_category(10), ColorCategory::Yellow);
        assert_eq!(color_category(11), ColorCategory::Blue);
        assert_eq!(color_category(20), ColorCategory::Blue);
        assert_eq!(color_category(21), ColorCategory::Red);
        assert_eq!(color_category(30), ColorCategory::Red);
        assert_eq!(color_category(31), ColorCategory::Gray);
        assert_eq!(color_category(40), ColorCategory::Gray);
        assert_eq!(color_category(41), ColorCategory::Green);
        assert_eq!(color_category(45), ColorCategory::Green);
    }

    #[test]
    fn every_number_belongs_to_exactly_one_band() {
        for n in 1..=45u8 {
            let owners: Vec<_> = ColorCategory::ALL
                .iter()
                .filter(|c| c.range().contains(&n))
                .collect();
            assert_eq!(owners.len(), 1, "{n} is in {owners:?}");
            assert_eq!(*owners[0], color_category(n));
        }
    }

    #[test]
    fn repeated_calls_are_stable() {
        for n in 1..=45u8 {
            let first = color_category(n);
            for _ in 0..3 {
                assert_eq!(color_category(n), first);
            }
        }
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = ColorCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["yellow", "blue", "red", "gray", "green"]);
    }
}
