use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::DEFAULT_EXPORT_NAME;
use crate::data::model::{
    MetricField, MetricKind, MonthSelection, PeriodType, Season, SeasonSelection,
};
use crate::state::{AppState, Status};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn month_label(selection: MonthSelection) -> String {
    match selection {
        MonthSelection::All => "All months".to_string(),
        MonthSelection::Month(m) => (m as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i))
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("Month {m}")),
    }
}

fn season_label(selection: SeasonSelection) -> String {
    match selection {
        SeasonSelection::All => "All seasons".to_string(),
        SeasonSelection::Season(s) => s.name().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Left side panel – analysis settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
///
/// Widgets edit a copy of the configuration; the state recomputes only when
/// the copy differs from what it already holds.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let mut config = *state.config();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Metric ----
            ui.strong("Temperature");
            egui::ComboBox::from_id_salt("field")
                .selected_text(config.metric.field.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for field in [MetricField::Tx, MetricField::Tn] {
                        ui.selectable_value(&mut config.metric.field, field, field.label());
                    }
                });

            ui.strong("Period");
            egui::ComboBox::from_id_salt("period")
                .selected_text(config.period.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for period in PeriodType::ALL {
                        ui.selectable_value(&mut config.period, period, period.label());
                    }
                });

            ui.strong("Calculation");
            egui::ComboBox::from_id_salt("kind")
                .selected_text(config.metric.kind.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for kind in MetricKind::ALL {
                        ui.selectable_value(&mut config.metric.kind, kind, kind.label());
                    }
                });

            ui.add_enabled_ui(config.metric.kind.uses_threshold(), |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("Threshold (°C)");
                    ui.add(egui::DragValue::new(&mut config.metric.threshold).speed(0.5));
                });
            });
            ui.separator();

            // ---- Filters ----
            ui.strong("Years");
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::DragValue::new(&mut config.filter.year_start).prefix("from "));
                ui.add(egui::DragValue::new(&mut config.filter.year_end).prefix("to "));
            });
            if config.filter.year_start > config.filter.year_end {
                ui.label(RichText::new("Start year is after end year").color(Color32::YELLOW));
            }

            ui.strong("Month");
            egui::ComboBox::from_id_salt("month")
                .selected_text(month_label(config.filter.month))
                .show_ui(ui, |ui: &mut Ui| {
                    let options =
                        std::iter::once(MonthSelection::All).chain((1..=12).map(MonthSelection::Month));
                    for option in options {
                        ui.selectable_value(&mut config.filter.month, option, month_label(option));
                    }
                });

            ui.strong("Season");
            egui::ComboBox::from_id_salt("season")
                .selected_text(season_label(config.filter.season))
                .show_ui(ui, |ui: &mut Ui| {
                    let options = std::iter::once(SeasonSelection::All)
                        .chain(Season::ALL.into_iter().map(SeasonSelection::Season));
                    for option in options {
                        ui.selectable_value(&mut config.filter.season, option, season_label(option));
                    }
                });

            if let (MonthSelection::Month(m), SeasonSelection::Season(s)) =
                (config.filter.month, config.filter.season)
            {
                if !s.contains(m) {
                    ui.label(
                        RichText::new(format!("{} is not in {s}", month_label(config.filter.month)))
                            .color(Color32::YELLOW),
                    );
                }
            }
        });

    state.set_config(config);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export CSV…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} selected, {} buckets",
                ds.len(),
                state.filtered_count,
                state.buckets().len()
            ));
        }

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.separator();
                ui.label(msg.as_str());
            }
            Some(Status::Error(msg)) => {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open daily temperature data")
        .add_filter("Supported files", &["csv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records spanning {:?} from {}",
                    dataset.len(),
                    dataset.year_range,
                    path.display()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status = Some(Status::Error(format!("Error: {e:#}")));
            }
        }
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_to(&path);
    }
}
