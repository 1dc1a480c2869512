//! egui rendering: settings panels, chart and bucket table.

pub mod panels;
pub mod plot;
pub mod table;
