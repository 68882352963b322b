use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridInput, GridMark, HLine, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, VLine};

use crate::color::{FSC_HALF_MARKER, GOLD_STANDARD_MARKER, THRESHOLD_LINE};
use crate::data::curves::{visible_curves, CurveOrder};
use crate::data::interpolate::{FSC_HALF, GOLD_STANDARD};
use crate::data::loader::FscDataset;
use crate::report::format_resolution;
use crate::state::{AppState, PlotView};

/// Tick positions (Å) of the full-range panels.
pub const MAIN_TICKS: [f64; 7] = [0.5, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0];

/// Tick positions (Å) of the gold-standard panels.
pub const GS_TICKS: [f64; 10] = [100.0, 80.0, 60.0, 40.0, 20.0, 10.0, 8.0, 6.0, 4.0, 2.0];

/// Upper resolution bound of the gold-standard panels.
pub const GS_MAX_RESOLUTION: f64 = 100.0;

const Y_MAX: f64 = 1.05;

// ---------------------------------------------------------------------------
// Axis mapping
// ---------------------------------------------------------------------------
//
// The resolution axis is logarithmic and inverted: plot x = -log10(Å), so
// coarse resolution sits on the left.

/// Plot coordinate of a resolution, `None` if it cannot sit on a log axis.
pub fn to_plot_x(resolution: f64) -> Option<f64> {
    (resolution.is_finite() && resolution > 0.0).then(|| -resolution.log10())
}

/// Resolution (Å) at a plot coordinate.
pub fn from_plot_x(x: f64) -> f64 {
    10f64.powf(-x)
}

/// Keep ticks inside `[min, max]`.
pub fn ticks_within(ticks: &[f64], min: f64, max: f64) -> Vec<f64> {
    ticks.iter().copied().filter(|t| (min..=max).contains(t)).collect()
}

/// Powers of ten inside `[min, max]`, coarse to fine.
pub fn decade_ticks(min: f64, max: f64) -> Vec<f64> {
    if !(min > 0.0 && max.is_finite() && min <= max) {
        return Vec::new();
    }
    let lo = min.log10().ceil() as i32;
    let hi = max.log10().floor() as i32;
    (lo..=hi).rev().map(|k| 10f64.powi(k)).collect()
}

/// Integer part only, as a `%d` axis label prints it.
pub fn integer_label(resolution: f64) -> String {
    let rounded = resolution.round();
    let value = if (resolution - rounded).abs() < 1e-6 { rounded } else { resolution.trunc() };
    format!("{}", value as i64)
}

/// `1`, `10`, `0.5`: integers without a fraction.
pub fn tick_label(resolution: f64) -> String {
    let rounded = resolution.round();
    if (resolution - rounded).abs() < 1e-6 {
        format!("{rounded:.0}")
    } else {
        format!("{}", (resolution * 1000.0).round() / 1000.0)
    }
}

/// Smallest and largest resolution in the table.
pub fn resolution_range(dataset: &FscDataset) -> Option<(f64, f64)> {
    let values = dataset.resolution()?;
    let finite = values.into_iter().filter(|v| v.is_finite());
    finite.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Gold-standard range: last row's resolution up to 100 Å.
pub fn gs_range(dataset: &FscDataset) -> Option<(f64, f64)> {
    let last = dataset.resolution()?.last().copied()?;
    Some((last, GS_MAX_RESOLUTION))
}

// ---------------------------------------------------------------------------
// Panel description
// ---------------------------------------------------------------------------

/// A threshold line drawn across the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub value: f64,
    pub dotted: bool,
}

/// Everything one FSC panel draws, computed before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub id: &'static str,
    pub title: String,
    pub order: CurveOrder,
    /// Resolution range in Å.
    pub range: Option<(f64, f64)>,
    pub ticks: Vec<f64>,
    /// Label ticks with their integer part only.
    pub integer_labels: bool,
    pub thresholds: Vec<Threshold>,
    /// Crossing markers as `(resolution, label, threshold)`.
    pub markers: Vec<(f64, String, f64)>,
}

impl PanelSpec {
    /// Describe one panel. `Combined` describes the first panel of the
    /// combined figure; its other two panels are `Half` and `GoldStandard`.
    pub fn for_view(view: PlotView, dataset: &FscDataset) -> Self {
        let crossings = dataset.crossings;
        match view {
            PlotView::Main | PlotView::MainNoLines | PlotView::Combined => {
                let range = resolution_range(dataset);
                let markers = if view == PlotView::MainNoLines {
                    Vec::new()
                } else {
                    [(crossings.fsc_0143, GOLD_STANDARD), (crossings.fsc_05, FSC_HALF)]
                        .into_iter()
                        .filter_map(|(r, t)| {
                            r.map(|r| (r, format!("FSC={t}: {} Å", format_resolution(r)), t))
                        })
                        .collect()
                };
                let (id, ticks) = match view {
                    PlotView::Combined => (
                        "fsc_combined_main",
                        range.map_or_else(Vec::new, |(lo, hi)| decade_ticks(lo, hi)),
                    ),
                    PlotView::MainNoLines => (
                        "fsc_main_no_lines",
                        range.map_or_else(Vec::new, |(lo, hi)| ticks_within(&MAIN_TICKS, lo, hi)),
                    ),
                    _ => (
                        "fsc_main",
                        range.map_or_else(Vec::new, |(lo, hi)| ticks_within(&MAIN_TICKS, lo, hi)),
                    ),
                };
                PanelSpec {
                    id,
                    title: "GSFSC".to_string(),
                    order: CurveOrder::Main,
                    range,
                    ticks,
                    integer_labels: view == PlotView::Combined,
                    thresholds: vec![
                        Threshold { value: GOLD_STANDARD, dotted: false },
                        Threshold { value: FSC_HALF, dotted: true },
                    ],
                    markers,
                }
            }
            PlotView::Half | PlotView::GoldStandard => {
                let (threshold, crossing, id) = if view == PlotView::Half {
                    (FSC_HALF, crossings.fsc_05, "fsc_half")
                } else {
                    (GOLD_STANDARD, crossings.fsc_0143, "fsc_gold_standard")
                };
                let range = gs_range(dataset);
                PanelSpec {
                    id,
                    title: crossing
                        .map(|r| format!("GSFSC: Resolution {} Å (FSC={threshold})", format_resolution(r)))
                        .unwrap_or_default(),
                    order: CurveOrder::GoldStandard,
                    range,
                    ticks: range.map_or_else(Vec::new, |(lo, hi)| ticks_within(&GS_TICKS, lo, hi)),
                    integer_labels: false,
                    thresholds: vec![Threshold { value: threshold, dotted: true }],
                    markers: Vec::new(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// FSC plot (central panel)
// ---------------------------------------------------------------------------

/// Render the selected FSC view in the central panel.
pub fn fsc_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a postprocess.star file  (File → Open…)");
            });
            return;
        }
    };

    if state.view == PlotView::Combined {
        ui.columns(3, |cols| {
            let views = [PlotView::Combined, PlotView::Half, PlotView::GoldStandard];
            for (col, view) in cols.iter_mut().zip(views) {
                panel(col, state, dataset, &PanelSpec::for_view(view, dataset));
            }
        });
    } else {
        panel(ui, state, dataset, &PanelSpec::for_view(state.view, dataset));
    }
}

fn panel(ui: &mut Ui, state: &AppState, dataset: &FscDataset, spec: &PanelSpec) {
    if !spec.title.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| ui.strong(&spec.title));
    }

    let tick_marks: Vec<GridMark> = spec
        .ticks
        .iter()
        .filter_map(|&t| to_plot_x(t))
        .map(|value| GridMark { value, step_size: 1.0 })
        .collect();

    let integer_labels = spec.integer_labels;
    let mut plot = Plot::new(spec.id)
        .legend(Legend::default())
        .x_axis_label("Resolution (Å)")
        .y_axis_label("FSC")
        .include_y(0.0)
        .include_y(Y_MAX)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let resolution = from_plot_x(mark.value);
            if integer_labels {
                integer_label(resolution)
            } else {
                tick_label(resolution)
            }
        })
        .label_formatter(|name: &str, value: &PlotPoint| {
            format!("{name}\n{:.2} Å, FSC {:.3}", from_plot_x(value.x), value.y)
        });
    if !tick_marks.is_empty() {
        plot = plot.x_grid_spacer(move |_input: GridInput| tick_marks.clone());
    }
    if let Some((lo, hi)) = spec.range {
        for bound in [lo, hi] {
            if let Some(x) = to_plot_x(bound) {
                plot = plot.include_x(x);
            }
        }
    }

    plot.show(ui, |plot_ui| {
        for curve in visible_curves(dataset, spec.order, &state.visible) {
            let Some(points) = dataset.curve(&curve.column) else {
                continue;
            };
            let points: PlotPoints = points
                .into_iter()
                .filter_map(|[res, fsc]| to_plot_x(res).map(|x| [x, fsc]))
                .collect();

            let color = state
                .color_map
                .as_ref()
                .map(|cm| cm.color_for(&curve.column))
                .unwrap_or(THRESHOLD_LINE);

            plot_ui.line(Line::new(points).name(&curve.label).color(color).width(1.5));
        }

        for t in &spec.thresholds {
            let style = if t.dotted {
                LineStyle::Dotted { spacing: 4.0 }
            } else {
                LineStyle::Dashed { length: 8.0 }
            };
            plot_ui.hline(HLine::new(t.value).color(THRESHOLD_LINE).style(style).width(1.0));
        }

        for (res, label, threshold) in &spec.markers {
            let Some(x) = to_plot_x(*res) else {
                continue;
            };
            let (color, style) = if *threshold == GOLD_STANDARD {
                (GOLD_STANDARD_MARKER, LineStyle::Dashed { length: 8.0 })
            } else {
                (FSC_HALF_MARKER, LineStyle::Dotted { spacing: 4.0 })
            };
            plot_ui.vline(VLine::new(x).name(label).color(color).style(style).width(1.0));
        }
    });
}
