use eframe::egui;

use crate::color::SeriesColors;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct ClimateViewerApp {
    pub state: AppState,
    colors: SeriesColors,
}

impl eframe::App for ClimateViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: analysis settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: bucket table ----
        egui::TopBottomPanel::bottom("bucket_table")
            .default_height(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::bucket_table(ui, &self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::bucket_plot(ui, &self.state, &self.colors);
        });
    }
}
