use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FscViewerApp {
    pub state: AppState,
    /// A screenshot command is in flight for `state.pending_screenshot`.
    screenshot_requested: bool,
}

impl FscViewerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            screenshot_requested: false,
        }
    }

    /// Ask for a screenshot once a target path is set, and write it when it arrives.
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if self.state.pending_screenshot.is_none() {
            return;
        }
        if !self.screenshot_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            self.screenshot_requested = true;
            return;
        }

        let image = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else {
            return;
        };

        self.screenshot_requested = false;
        if let Some(path) = self.state.pending_screenshot.take() {
            match save_png(&path, &image) {
                Ok(()) => {
                    log::info!("Saved figure to {}", path.display());
                    self.state.status_message = Some(format!("Saved {}", path.display()));
                }
                Err(e) => {
                    log::error!("Saving figure failed: {e:#}");
                    self.state.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
    }
}

impl eframe::App for FscViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_screenshot(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: resolutions and curve toggles ----
        egui::SidePanel::left("result_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: parsed table ----
        if self.state.show_table {
            if let Some(ds) = &self.state.dataset {
                egui::TopBottomPanel::bottom("table_panel")
                    .resizable(true)
                    .default_height(220.0)
                    .show(ctx, |ui| {
                        table::fsc_table(ui, ds);
                    });
            }
        }

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::fsc_plot(ui, &self.state);
        });
    }
}

/// Write an egui screenshot as PNG.
pub fn save_png(path: &Path, image: &egui::ColorImage) -> Result<()> {
    let [w, h] = image.size;
    let bytes: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    let buffer = image::RgbaImage::from_raw(w as u32, h as u32, bytes)
        .context("screenshot size does not match its pixel data")?;
    buffer
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
