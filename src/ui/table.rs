use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export::header;
use crate::data::model::PeriodKey;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bucket table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the current buckets in the same column layout as the CSV export.
pub fn bucket_table(ui: &mut Ui, state: &AppState) {
    let buckets = state.buckets();
    if buckets.is_empty() {
        if state.dataset.is_some() {
            ui.label("No records match the current filters.");
        }
        return;
    }

    let columns = header(state.config().period);

    let mut table = TableBuilder::new(ui).striped(true);
    for _ in 1..columns.len() {
        table = table.column(Column::auto().at_least(60.0));
    }
    table
        .column(Column::remainder())
        .header(20.0, |mut row| {
            for name in columns {
                row.col(|ui: &mut Ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, buckets.len(), |mut row| {
                let bucket = &buckets[row.index()];
                let mut cells: Vec<String> = match bucket.key {
                    PeriodKey::Annual { year } => vec![year.to_string()],
                    PeriodKey::Seasonal { year, season } => {
                        vec![year.to_string(), season.to_string()]
                    }
                    PeriodKey::Monthly { year, month } => vec![year.to_string(), month.to_string()],
                };
                cells.push(String::new());

                let last = cells.len() - 1;
                for (i, text) in cells.iter().enumerate() {
                    row.col(|ui: &mut Ui| {
                        if i < last {
                            ui.label(text.as_str());
                        } else if bucket.has_value() {
                            ui.label(format!("{:.2}", bucket.value));
                        } else {
                            ui.label(RichText::new("no data").color(Color32::GRAY));
                        }
                    });
                }
            });
        });
}
