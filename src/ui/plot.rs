use eframe::egui::Ui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::color::SeriesColors;
use crate::data::model::MetricKind;
use crate::data::series::chart_series;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bucket chart (central panel)
// ---------------------------------------------------------------------------

/// Render the aggregated values against the period axis.
pub fn bucket_plot(ui: &mut Ui, state: &AppState, colors: &SeriesColors) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view temperatures  (File → Open…)");
        });
        return;
    }

    let metric = &state.config().metric;
    let y_label = match metric.kind {
        MetricKind::Average => format!("Mean {} (°C)", metric.field.label()),
        MetricKind::CountAbove => format!("Days {} > {}", metric.field.label(), metric.threshold),
        MetricKind::CountBelow => format!("Days {} < {}", metric.field.label(), metric.threshold),
    };

    let series = chart_series(state.buckets());

    Plot::new("bucket_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Year")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for s in &series {
                let color = colors.color_for(&s.label);
                for segment in &s.segments {
                    // Single-point segments would be invisible as a line.
                    if segment.len() == 1 {
                        plot_ui.points(
                            Points::new(segment.iter().copied().collect::<PlotPoints>())
                                .name(&s.label)
                                .color(color)
                                .radius(3.0),
                        );
                        continue;
                    }
                    let line = Line::new(segment.iter().copied().collect::<PlotPoints>())
                        .name(&s.label)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });
}
