//! First downward threshold crossings of an FSC curve.
//!
//! A crossing at threshold `t` is the first index `i` where
//! `fsc[i] >= t && fsc[i + 1] < t`. The resolution there is linearly
//! interpolated between rows `i` and `i + 1`.

use super::model::FscTable;

/// Gold-standard threshold.
pub const GOLD_STANDARD: f64 = 0.143;

/// Fixed FSC=0.5 threshold.
pub const FSC_HALF: f64 = 0.5;

/// Interpolated resolutions in Ångström, `None` when not found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrossingResult {
    pub fsc_0143: Option<f64>,
    pub fsc_05: Option<f64>,
}

impl CrossingResult {
    pub fn is_complete(&self) -> bool {
        self.fsc_0143.is_some() && self.fsc_05.is_some()
    }
}

/// Linear interpolation of `x` at `y = threshold` between two samples.
///
/// Returns `None` on a flat segment or when the result is not finite.
pub fn interpolate_at(threshold: f64, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> Option<f64> {
    let dy = y2 - y1;
    if dy == 0.0 {
        return None;
    }
    let x = x1 + (threshold - y1) * (x2 - x1) / dy;
    x.is_finite().then_some(x)
}

/// Scan state for one threshold.
#[derive(Debug, Clone, Copy)]
struct ThresholdScan {
    threshold: f64,
    /// `Some` once the first qualifying segment has been seen.
    outcome: Option<Option<f64>>,
}

impl ThresholdScan {
    fn new(threshold: f64) -> Self {
        Self {
            threshold,
            outcome: None,
        }
    }

    fn settled(&self) -> bool {
        self.outcome.is_some()
    }

    /// Feed one segment. The first segment that crosses settles the scan even
    /// if interpolation there is degenerate.
    fn step(mut self, a: (f64, f64), b: (f64, f64)) -> Self {
        if !self.settled() && a.1 >= self.threshold && b.1 < self.threshold {
            self.outcome = Some(interpolate_at(self.threshold, a, b));
        }
        self
    }

    fn value(&self) -> Option<f64> {
        self.outcome.flatten()
    }
}

/// Find the 0.143 and 0.5 crossings of `fsc_column` against `resolution_column`.
///
/// Missing columns or fewer than two rows yield an all-`None` result.
pub fn find_crossings(table: &FscTable, fsc_column: &str, resolution_column: &str) -> CrossingResult {
    let Some(points) = table.points(resolution_column, fsc_column) else {
        log::warn!(
            "Columns '{fsc_column}' / '{resolution_column}' not both present in {}; no crossings",
            table.schema()
        );
        return CrossingResult::default();
    };
    scan_crossings(&points)
}

/// Crossing scan over `(resolution, fsc)` samples in table order.
pub fn scan_crossings(points: &[[f64; 2]]) -> CrossingResult {
    let mut gold = ThresholdScan::new(GOLD_STANDARD);
    let mut half = ThresholdScan::new(FSC_HALF);

    for pair in points.windows(2) {
        let a = (pair[0][0], pair[0][1]);
        let b = (pair[1][0], pair[1][1]);
        gold = gold.step(a, b);
        half = half.step(a, b);
        if gold.settled() && half.settled() {
            break;
        }
    }

    CrossingResult {
        fsc_0143: gold.value(),
        fsc_05: half.value(),
    }
}
