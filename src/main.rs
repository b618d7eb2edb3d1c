use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;

use skywatch_core::Config;
use skywatch_dashboard::{present, ChartStyle, ChartSurface, DashboardController, StalePolicy};
use skywatch_weather::{ForecastClient, NamedPlace, SelectionKey};

/// Prints chart summaries to stdout. Stands in for a real chart widget.
struct TextSurface;

impl ChartSurface for TextSurface {
    fn line_chart(&mut self, style: ChartStyle, labels: &[String], values: &[f64]) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = match (labels.first(), labels.last()) {
            (Some(first), Some(last)) => format!("{} - {}", first, last),
            _ => String::new(),
        };
        println!(
            "{}: {} samples ({}), min {:.1}, max {:.1}",
            style.title,
            values.len(),
            span,
            min,
            max
        );
    }

    fn placeholder(&mut self, style: ChartStyle) {
        println!("{}: no chart data to display", style.title);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skywatch_core::init()?;

    let config = Config::load()?;
    for warning in &config.validate().warnings {
        tracing::warn!("Config warning: {}", warning);
    }

    let place = NamedPlace::from_str(&config.forecast.default_place).unwrap_or_else(|e| {
        tracing::warn!("{}; falling back to Berlin", e);
        NamedPlace::Berlin
    });

    let policy = if config.dashboard.mark_stale {
        StalePolicy::MarkStale
    } else {
        StalePolicy::SilentStale
    };

    let client = ForecastClient::with_base_url(
        &config.forecast.api_base_url,
        Duration::from_secs(config.forecast.timeout_secs),
    )?;

    let mut controller = DashboardController::new(SelectionKey::Place(place), policy);
    let outcome = controller
        .refresh(SelectionKey::Place(place), &client)
        .await;
    tracing::info!(?outcome, "initial refresh complete");

    println!("Today's weather for {}", place.label());
    let mut surface = TextSurface;
    present(&controller, &mut surface);

    if controller.is_stale() {
        println!("(showing previously fetched data)");
    }

    Ok(())
}
