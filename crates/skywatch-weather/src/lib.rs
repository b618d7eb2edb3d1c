//! Forecast fetching for skywatch.
//!
//! Fetches one day of hourly series (temperature, relative humidity, rain)
//! from the Open-Meteo API, plus the location types that drive what gets
//! fetched.

pub mod client;
pub mod location;
pub mod types;

pub use client::{FetchForecast, ForecastClient};
pub use location::{LocationService, Permission};
pub use types::*;
