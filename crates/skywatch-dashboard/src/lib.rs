//! Dashboard state machine and presentation seams for skywatch.

pub mod charts;
pub mod controller;

pub use charts::{
    present, ChartStyle, ChartSurface, HUMIDITY_CHART, RAIN_CHART, TEMPERATURE_CHART,
};
pub use controller::{ApplyOutcome, DashboardController, FetchTicket, Phase, StalePolicy};
