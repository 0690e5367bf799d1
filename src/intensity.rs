use num::rational::Ratio;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display tier of a slot relative to the busiest slot of the event
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Intensity {
    None,
    Low,
    LowMed,
    Medium,
    MedHigh,
    High,
}

/// Hex colours a grid cell is painted with
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Palette {
    pub background: &'static str,
    pub hover: &'static str,
    pub text: &'static str,
}

impl Intensity {
    /// Grey for nobody, then a green ramp that darkens with availability
    pub fn palette(self) -> Palette {
        let (background, hover, text) = match self {
            Intensity::None => ("#f3f4f6", "#e5e7eb", "#374151"),
            Intensity::Low => ("#bbf7d0", "#86efac", "#1f2937"),
            Intensity::LowMed => ("#86efac", "#4ade80", "#1f2937"),
            Intensity::Medium => ("#4ade80", "#22c55e", "#1f2937"),
            Intensity::MedHigh => ("#22c55e", "#16a34a", "#ffffff"),
            Intensity::High => ("#16a34a", "#15803d", "#ffffff"),
        };

        Palette {
            background,
            hover,
            text,
        }
    }
}

/// Ordered `(minimum ratio, intensity)` thresholds.
///
/// A non-zero count gets the first step whose ratio it reaches, checking the
/// highest ratio first, and `Low` if it reaches none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityLadder {
    steps: Vec<(Ratio<u32>, Intensity)>,
}

impl Default for IntensityLadder {
    fn default() -> Self {
        IntensityLadder::new(vec![
            (Ratio::new(4, 5), Intensity::High),
            (Ratio::new(3, 5), Intensity::MedHigh),
            (Ratio::new(2, 5), Intensity::Medium),
            (Ratio::new(1, 5), Intensity::LowMed),
        ])
    }
}

impl IntensityLadder {
    pub fn new(mut steps: Vec<(Ratio<u32>, Intensity)>) -> Self {
        steps.sort_by(|a, b| b.0.cmp(&a.0));
        IntensityLadder { steps }
    }

    pub fn steps(&self) -> &[(Ratio<u32>, Intensity)] {
        &self.steps
    }

    /// # Examples
    /// ```
    /// use meetgrid_libs::intensity::{Intensity, IntensityLadder};
    ///
    /// let ladder = IntensityLadder::default();
    ///
    /// assert_eq!(ladder.bucket(4, 5), Intensity::High);
    /// assert_eq!(ladder.bucket(1, 5), Intensity::LowMed);
    /// assert_eq!(ladder.bucket(1, 6), Intensity::Low);
    /// assert_eq!(ladder.bucket(0, 5), Intensity::None);
    /// assert_eq!(ladder.bucket(3, 0), Intensity::None);
    /// ```
    pub fn bucket(&self, count: u32, max_count: u32) -> Intensity {
        if count == 0 || max_count == 0 {
            return Intensity::None;
        }

        let ratio = Ratio::new(count, max_count);

        self.steps
            .iter()
            .find(|(min_ratio, _)| ratio >= *min_ratio)
            .map_or(Intensity::Low, |&(_, intensity)| intensity)
    }
}

/// [`IntensityLadder::bucket`] with the default thresholds
pub fn intensity_bucket(count: u32, max_count: u32) -> Intensity {
    IntensityLadder::default().bucket(count, max_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds() {
        let expected = [
            (0, Intensity::None),
            (1, Intensity::LowMed),
            (2, Intensity::Medium),
            (3, Intensity::MedHigh),
            (4, Intensity::High),
            (5, Intensity::High),
        ];

        for (count, intensity) in expected {
            assert_eq!(intensity_bucket(count, 5), intensity, "{} of 5", count);
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(intensity_bucket(8, 10), Intensity::High);
        assert_eq!(intensity_bucket(79, 100), Intensity::MedHigh);
        assert_eq!(intensity_bucket(60, 100), Intensity::MedHigh);
        assert_eq!(intensity_bucket(39, 100), Intensity::LowMed);
        assert_eq!(intensity_bucket(20, 100), Intensity::LowMed);
        assert_eq!(intensity_bucket(19, 100), Intensity::Low);
    }

    #[test]
    fn guards_zero_maximum() {
        assert_eq!(intensity_bucket(0, 0), Intensity::None);
        assert_eq!(intensity_bucket(7, 0), Intensity::None);
    }

    #[test]
    fn custom_ladder() {
        // unordered on purpose
        let ladder = IntensityLadder::new(vec![
            (Ratio::new(1, 2), Intensity::Medium),
            (Ratio::new(1, 1), Intensity::High),
        ]);

        assert_eq!(ladder.steps()[0], (Ratio::new(1, 1), Intensity::High));
        assert_eq!(ladder.bucket(3, 3), Intensity::High);
        assert_eq!(ladder.bucket(2, 3), Intensity::Medium);
        assert_eq!(ladder.bucket(1, 3), Intensity::Low);
    }

    #[test]
    fn palette_ramp() {
        assert_eq!(Intensity::None.palette().background, "#f3f4f6");
        assert_eq!(Intensity::High.palette().text, "#ffffff");
        assert_eq!(Intensity::Low.palette().hover, Intensity::LowMed.palette().background);
    }
}
