use eframe::egui::{Ui, RichText};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::FscDataset;

// ---------------------------------------------------------------------------
// Parsed FSC table (bottom panel)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Render the parsed table: one column per schema name, rows in file order.
pub fn fsc_table(ui: &mut Ui, dataset: &FscDataset) {
    let names = dataset.table.schema().names();
    let rows = dataset.table.rows();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), names.len())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in names {
                header.col(|ui: &mut Ui| {
                    ui.label(RichText::new(name).strong().small());
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let values = &rows[row.index()];
                for v in values {
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{v:.6}"));
                    });
                }
            });
        });
}
