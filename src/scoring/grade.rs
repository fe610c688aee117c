//! Percentage to letter grade mapping

/// Lower bounds (inclusive) of each grade band, highest first
const GRADE_BANDS: [(u32, &str); 12] = [
    (95, "A+"),
    (90, "A"),
    (85, "A-"),
    (80, "B+"),
    (75, "B"),
    (70, "B-"),
    (65, "C+"),
    (60, "C"),
    (55, "C-"),
    (50, "D+"),
    (45, "D"),
    (40, "D-"),
];

/// Grade for anything below the lowest band
pub const FAILING_GRADE: &str = "F";

/// Maps a percentage to its letter grade
///
/// # Example
///
/// ```
/// use cipwe::scoring::grade_for;
///
/// assert_eq!(grade_for(95), "A+");
/// assert_eq!(grade_for(94), "A");
/// assert_eq!(grade_for(39), "F");
/// ```
pub fn grade_for(percentage: u32) -> &'static str {
    GRADE_BANDS
        .iter()
        .find(|(floor, _)| percentage >= *floor)
        .map(|(_, grade)| *grade)
        .unwrap_or(FAILING_GRADE)
}

/// Colored marker for a grade, keyed on its letter
pub fn grade_emoji(grade: &str) -> &'static str {
    match grade.chars().next() {
        Some('A') => "🟢",
        Some('B') => "🔵",
        Some('C') => "🟡",
        Some('D') => "🟠",
        _ => "🔴",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(grade_for(100), "A+");
        assert_eq!(grade_for(90), "A");
        assert_eq!(grade_for(89), "A-");
        assert_eq!(grade_for(80), "B+");
        assert_eq!(grade_for(70), "B-");
        assert_eq!(grade_for(69), "C+");
        assert_eq!(grade_for(55), "C-");
        assert_eq!(grade_for(50), "D+");
        assert_eq!(grade_for(40), "D-");
        assert_eq!(grade_for(0), "F");
    }

    #[test]
    fn test_bands_are_exhaustive_and_monotonic() {
        // F ranks 0, D- ranks 1, ... A+ ranks 12
        let order: Vec<&str> = GRADE_BANDS.iter().rev().map(|(_, g)| *g).collect();

        let mut last_rank = None;
        for pct in 0..=100 {
            let grade = grade_for(pct);
            let rank = match order.iter().position(|g| *g == grade) {
                Some(r) => r + 1,
                None => {
                    assert_eq!(grade, FAILING_GRADE);
                    0
                }
            };
            if let Some(prev) = last_rank {
                assert!(rank >= prev, "grade went down at {}%", pct);
            }
            last_rank = Some(rank);
        }
    }

    #[test]
    fn test_emoji() {
        assert_eq!(grade_emoji("A+"), "🟢");
        assert_eq!(grade_emoji("B-"), "🔵");
        assert_eq!(grade_emoji("C"), "🟡");
        assert_eq!(grade_emoji("D+"), "🟠");
        assert_eq!(grade_emoji("F"), "🔴");
    }
}
