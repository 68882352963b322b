use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::curves::{extra_curves, init_visible, standard_curves, CurveOrder, VisibleCurves};
use crate::data::loader::{load_file, ColumnChoice, FscDataset};

// ---------------------------------------------------------------------------
// Plot views
// ---------------------------------------------------------------------------

/// Which figure the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotView {
    /// Full range with crossing markers.
    Main,
    /// Full range, thresholds only.
    MainNoLines,
    /// Gold-standard range around FSC=0.5.
    Half,
    /// Gold-standard range around FSC=0.143.
    GoldStandard,
    /// Main, Half and GoldStandard side by side.
    Combined,
}

impl PlotView {
    pub const ALL: [PlotView; 5] = [
        PlotView::Main,
        PlotView::MainNoLines,
        PlotView::Half,
        PlotView::GoldStandard,
        PlotView::Combined,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlotView::Main => "Main",
            PlotView::MainNoLines => "Main (no lines)",
            PlotView::Half => "FSC=0.5",
            PlotView::GoldStandard => "FSC=0.143",
            PlotView::Combined => "Combined",
        }
    }

    /// Default file name when saving this view as an image.
    pub fn file_name(self) -> &'static str {
        match self {
            PlotView::Main => "FSC_main_plot.png",
            PlotView::MainNoLines => "FSC_main_no_lines.png",
            PlotView::Half => "FSC_0.5_plot.png",
            PlotView::GoldStandard => "FSC_0.143_plot.png",
            PlotView::Combined => "FSC_combined.png",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<FscDataset>,

    /// Correlation and resolution column names used for every load.
    pub columns: ColumnChoice,

    /// Curve columns currently drawn.
    pub visible: VisibleCurves,

    /// Colour per curve column.
    pub color_map: Option<ColorMap>,

    /// Figure shown in the central panel.
    pub view: PlotView,

    /// Whether the parsed table is shown below the plot.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Target path of a requested screenshot, cleared once it is written.
    pub pending_screenshot: Option<PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ColumnChoice::default())
    }
}

impl AppState {
    pub fn new(columns: ColumnChoice) -> Self {
        Self {
            dataset: None,
            columns,
            visible: VisibleCurves::new(),
            color_map: None,
            view: PlotView::Main,
            show_table: false,
            status_message: None,
            pending_screenshot: None,
        }
    }

    /// Ingest a newly loaded dataset, initialise curve selection and colour.
    pub fn set_dataset(&mut self, dataset: FscDataset) {
        self.visible = init_visible(&dataset);

        let mut curves = standard_curves(&dataset, CurveOrder::Main);
        curves.extend(extra_curves(&dataset));
        self.color_map = Some(ColorMap::new(&curves));

        self.status_message = if dataset.crossings.is_complete() {
            None
        } else {
            Some("Not every FSC threshold crossing was found".to_string())
        };
        self.dataset = Some(dataset);
    }

    /// Load a STAR file, keeping the previous dataset on failure.
    pub fn load(&mut self, path: &Path) {
        match load_file(path, &self.columns) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} FSC rows with columns {}",
                    dataset.table.len(),
                    dataset.table.schema()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write the CSV report for the current dataset.
    pub fn export_csv(&mut self, path: &Path) {
        let Some(ds) = &self.dataset else {
            self.status_message = Some("Nothing to export".to_string());
            return;
        };
        match crate::report::write_csv(path, ds) {
            Ok(()) => self.status_message = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Toggle a single curve on or off.
    pub fn toggle_curve(&mut self, column: &str) {
        if !self.visible.remove(column) {
            self.visible.insert(column.to_string());
        }
    }

    /// Switch every available curve on.
    pub fn select_all(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible = standard_curves(ds, CurveOrder::Main)
                .into_iter()
                .chain(extra_curves(ds))
                .map(|c| c.column)
                .collect();
        }
    }

    /// Switch every curve off.
    pub fn select_none(&mut self) {
        self.visible.clear();
    }
}
