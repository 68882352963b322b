use std::collections::BTreeSet;

use super::loader::FscDataset;

// ---------------------------------------------------------------------------
// Plottable curves
// ---------------------------------------------------------------------------

pub const UNMASKED: &str = "FourierShellCorrelationUnmaskedMaps";
pub const MASKED: &str = "FourierShellCorrelationMaskedMaps";

/// One FSC column drawn against resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curve {
    pub column: String,
    pub label: String,
}

impl Curve {
    fn new(column: &str, label: &str) -> Self {
        Self {
            column: column.to_string(),
            label: label.to_string(),
        }
    }
}

/// Which curve order a panel uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveOrder {
    /// Unmasked, Masked, Corrected.
    Main,
    /// Masked, Unmasked, Corrected.
    GoldStandard,
}

/// Standard curves present in the table, in panel order.
pub fn standard_curves(dataset: &FscDataset, order: CurveOrder) -> Vec<Curve> {
    let unmasked = Curve::new(UNMASKED, "Unmasked");
    let masked = Curve::new(MASKED, "Masked");
    let corrected = Curve::new(&dataset.columns.fsc, "Corrected");

    let ordered = match order {
        CurveOrder::Main => [unmasked, masked, corrected],
        CurveOrder::GoldStandard => [masked, unmasked, corrected],
    };

    let mut seen = BTreeSet::new();
    ordered
        .into_iter()
        .filter(|c| dataset.table.schema().contains(&c.column))
        .filter(|c| seen.insert(c.column.clone()))
        .collect()
}

/// Remaining FSC-like columns a user may switch on, labelled by column name.
pub fn extra_curves(dataset: &FscDataset) -> Vec<Curve> {
    let standard: BTreeSet<String> = standard_curves(dataset, CurveOrder::Main)
        .into_iter()
        .map(|c| c.column)
        .collect();
    dataset
        .table
        .schema()
        .names()
        .iter()
        .filter(|n| n.contains("FourierShellCorrelation") && !standard.contains(*n))
        .map(|n| Curve::new(n, n))
        .collect()
}

// ---------------------------------------------------------------------------
// Visibility selection
// ---------------------------------------------------------------------------

/// Set of curve columns currently switched on.
pub type VisibleCurves = BTreeSet<String>;

/// Standard curves on, extras off.
pub fn init_visible(dataset: &FscDataset) -> VisibleCurves {
    standard_curves(dataset, CurveOrder::Main)
        .into_iter()
        .map(|c| c.column)
        .collect()
}

/// Curves of the requested order that are switched on, followed by visible extras.
pub fn visible_curves(dataset: &FscDataset, order: CurveOrder, visible: &VisibleCurves) -> Vec<Curve> {
    standard_curves(dataset, order)
        .into_iter()
        .chain(extra_curves(dataset))
        .filter(|c| visible.contains(&c.column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{analyze_str, ColumnChoice};

    fn dataset(columns: &[&str]) -> FscDataset {
        let mut text = String::from("data_fsc\nloop_\n");
        for c in columns {
            text.push_str(&format!("_rln{c}\n"));
        }
        let row = vec!["1.0"; columns.len()].join(" ");
        text.push_str(&format!("{row}\n{row}\n"));
        analyze_str(&text, &ColumnChoice::default(), "t").unwrap()
    }

    fn labels(curves: &[Curve]) -> Vec<&str> {
        curves.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn main_and_gold_standard_orders() {
        let ds = dataset(&[
            "AngstromResolution",
            MASKED,
            UNMASKED,
            "CorrectedFourierShellCorrelationPhaseRandomizedMaskedMaps",
        ]);
        assert_eq!(
            labels(&standard_curves(&ds, CurveOrder::Main)),
            vec!["Unmasked", "Masked", "Corrected"]
        );
        assert_eq!(
            labels(&standard_curves(&ds, CurveOrder::GoldStandard)),
            vec!["Masked", "Unmasked", "Corrected"]
        );
    }

    #[test]
    fn absent_columns_are_skipped() {
        let ds = dataset(&["AngstromResolution", MASKED]);
        assert_eq!(labels(&standard_curves(&ds, CurveOrder::Main)), vec!["Masked"]);
    }

    #[test]
    fn extras_start_hidden() {
        let ds = dataset(&[
            "AngstromResolution",
            MASKED,
            "FourierShellCorrelationParticleMaskFraction",
        ]);
        let extras = extra_curves(&ds);
        assert_eq!(extras.len(), 1);
        let mut visible = init_visible(&ds);
        assert_eq!(visible_curves(&ds, CurveOrder::Main, &visible).len(), 1);
        visible.insert(extras[0].column.clone());
        assert_eq!(visible_curves(&ds, CurveOrder::Main, &visible).len(), 2);
    }

    #[test]
    fn corrected_column_equal_to_masked_is_listed_once() {
        let mut ds = dataset(&["AngstromResolution", MASKED]);
        ds.columns.fsc = MASKED.to_string();
        assert_eq!(standard_curves(&ds, CurveOrder::Main).len(), 1);
    }
}
