use crate::types::MarkerColor;
use serde::Serialize;

const MEDIUM_FROM: f64 = 1000.0;
const HIGH_FROM: f64 = 3000.0;

/// Elevation band used to pick a volcano marker's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElevationCategory {
    Low,
    Medium,
    High,
}

impl ElevationCategory {
    /// Never fails. Anything that is neither below 1000 nor in [1000, 3000),
    /// NaN included, lands in `High`.
    pub fn classify(elevation: f64) -> Self {
        if elevation < MEDIUM_FROM {
            ElevationCategory::Low
        } else if (MEDIUM_FROM..HIGH_FROM).contains(&elevation) {
            ElevationCategory::Medium
        } else {
            ElevationCategory::High
        }
    }

    pub fn color(&self) -> MarkerColor {
        match self {
            ElevationCategory::Low => MarkerColor::Green,
            ElevationCategory::Medium => MarkerColor::Orange,
            ElevationCategory::High => MarkerColor::Red,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ElevationCategory::Low => "below 1000 m",
            ElevationCategory::Medium => "1000 m to 3000 m",
            ElevationCategory::High => "3000 m and above",
        }
    }
}

pub fn color_for_elevation(elevation: f64) -> MarkerColor {
    ElevationCategory::classify(elevation).color()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ElevationCategory::*;

    #[test]
    fn boundaries() {
        assert_eq!(ElevationCategory::classify(999.0), Low);
        assert_eq!(ElevationCategory::classify(1000.0), Medium);
        assert_eq!(ElevationCategory::classify(2999.0), Medium);
        assert_eq!(ElevationCategory::classify(3000.0), High);
    }

    #[test]
    fn boundaries_map_to_colors() {
        let colors: Vec<MarkerColor> = [999.0, 1000.0, 2999.0, 3000.0]
            .into_iter()
            .map(color_for_elevation)
            .collect();
        assert_eq!(
            colors,
            vec![MarkerColor::Green, MarkerColor::Orange, MarkerColor::Orange, MarkerColor::Red]
        );
    }

    #[test]
    fn just_below_thresholds() {
        assert_eq!(ElevationCategory::classify(999.999), Low);
        assert_eq!(ElevationCategory::classify(2999.999), Medium);
        assert_eq!(ElevationCategory::classify(f64::from_bits(3000.0f64.to_bits() - 1)), Medium);
    }

    #[test]
    fn extremes_are_classified() {
        assert_eq!(ElevationCategory::classify(-420.0), Low);
        assert_eq!(ElevationCategory::classify(f64::NEG_INFINITY), Low);
        assert_eq!(ElevationCategory::classify(8848.0), High);
        assert_eq!(ElevationCategory::classify(f64::INFINITY), High);
        assert_eq!(ElevationCategory::classify(f64::NAN), High);
    }

    #[test]
    fn every_band_partitions_a_sweep() {
        for step in -50..=500 {
            let e = step as f64 * 10.0;
            let expected = if e < 1000.0 {
                Low
            } else if e < 3000.0 {
                Medium
            } else {
                High
            };
            assert_eq!(ElevationCategory::classify(e), expected, "elevation {e}");
        }
    }
}
