use palette::Srgb;

use crate::color;

// ---------------------------------------------------------------------------
// Functional-group absorption regions
// ---------------------------------------------------------------------------

/// A wavenumber window `[end, start]` (cm⁻¹, `start > end`) where a
/// functional group absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakRegion {
    pub start: u32,
    pub end: u32,
    pub label: &'static str,
    pub color_name: &'static str,
}

impl PeakRegion {
    const fn new(start: u32, end: u32, label: &'static str, color_name: &'static str) -> Self {
        Self {
            start,
            end,
            label,
            color_name,
        }
    }

    /// Whether `x` lies in the window, both bounds included.
    pub fn contains(&self, x: f64) -> bool {
        x >= f64::from(self.end) && x <= f64::from(self.start)
    }

    /// Window centre, where the label is placed.
    pub fn midpoint(&self) -> f64 {
        (f64::from(self.start) + f64::from(self.end)) / 2.0
    }

    /// `"end-start"`, as shown in the detected-peaks table.
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.end, self.start)
    }

    pub fn color(&self) -> Srgb<u8> {
        color::named(self.color_name).unwrap_or(color::BLACK)
    }
}

/// Regions in the order they are evaluated (and labels are placed).
pub const PEAK_REGIONS: [PeakRegion; 12] = [
    PeakRegion::new(3700, 3200, "O-H", "blue"),
    PeakRegion::new(3500, 3200, "N-H", "cyan"),
    PeakRegion::new(3300, 3250, "≡C-H", "red"),
    PeakRegion::new(3100, 3000, "=C-H", "purple"),
    PeakRegion::new(3000, 2850, "C-H", "pink"),
    PeakRegion::new(2260, 2100, "C≡C / C≡N", "orange"),
    PeakRegion::new(1750, 1680, "C=O", "green"),
    PeakRegion::new(1680, 1620, "C=C", "brown"),
    PeakRegion::new(1600, 1450, "C=C (Ar)", "gray"),
    PeakRegion::new(1450, 1370, "C-H", "gold"),
    PeakRegion::new(1300, 1000, "C-O", "seagreen"),
    PeakRegion::new(900, 650, "C-H (Ar)", "indigo"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_region_is_well_formed() {
        for region in &PEAK_REGIONS {
            assert!(region.start > region.end, "{region:?}");
            assert!(
                color::named(region.color_name).is_some(),
                "unknown colour {}",
                region.color_name
            );
        }
    }

    #[test]
    fn range_label_is_end_dash_start() {
        let cc = PEAK_REGIONS
            .iter()
            .find(|r| r.label == "C=C")
            .unwrap();
        assert_eq!(cc.range_label(), "1620-1680");
        assert_eq!(cc.midpoint(), 1650.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let co = PeakRegion::new(1750, 1680, "C=O", "green");
        assert!(co.contains(1680.0));
        assert!(co.contains(1750.0));
        assert!(!co.contains(1679.9));
        assert!(!co.contains(1750.1));
    }
}
