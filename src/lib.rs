//! Daily temperature aggregation: load records, filter them by year /
//! month / season, and summarise them per year, season or month.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
