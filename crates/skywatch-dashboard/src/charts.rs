//! Presentation seam for the three hourly charts.
//!
//! The dashboard hands each series to a `ChartSurface` together with its
//! title, color, and hour labels; empty series get a placeholder
//! instead. No data flows back from the surface.

use skywatch_weather::ForecastTriple;

use crate::controller::DashboardController;

/// Title and line color for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub title: &'static str,
    pub color: &'static str,
}

pub const TEMPERATURE_CHART: ChartStyle = ChartStyle {
    title: "Temperature (°C)",
    color: "rgba(255, 0, 0, 1)",
};

pub const HUMIDITY_CHART: ChartStyle = ChartStyle {
    title: "Relative Humidity (%)",
    color: "rgba(0, 0, 255, 1)",
};

pub const RAIN_CHART: ChartStyle = ChartStyle {
    title: "Rain (mm)",
    color: "rgba(0, 255, 0, 1)",
};

/// Renders charts. Implemented by the UI layer.
pub trait ChartSurface {
    fn line_chart(&mut self, style: ChartStyle, labels: &[String], values: &[f64]);
    fn placeholder(&mut self, style: ChartStyle);
}

/// "HH:00" labels for a series of the given length. Hours wrap past a
/// day so oversized responses still get sensible labels.
pub fn hour_labels(len: usize) -> Vec<String> {
    (0..len).map(|i| format!("{:02}:00", i % 24)).collect()
}

/// Sparse x-axis rule: show a tick only at 00:00, 06:00, 12:00, 18:00.
pub fn axis_tick(label: &str) -> bool {
    matches!(label, "00:00" | "06:00" | "12:00" | "18:00")
}

/// Draw the three charts for the controller's current series.
pub fn present<S>(controller: &DashboardController, surface: &mut S)
where
    S: ChartSurface + ?Sized,
{
    let triple = controller.series();
    let labels = hour_labels(triple.len());

    for (style, values) in chart_rows(triple) {
        if values.is_empty() {
            surface.placeholder(style);
        } else {
            surface.line_chart(style, &labels, values);
        }
    }
}

fn chart_rows(triple: &ForecastTriple) -> [(ChartStyle, &[f64]); 3] {
    [
        (TEMPERATURE_CHART, triple.temperature.as_slice()),
        (HUMIDITY_CHART, triple.humidity.as_slice()),
        (RAIN_CHART, triple.rain.as_slice()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::StalePolicy;
    use skywatch_weather::{NamedPlace, SelectionKey};

    #[derive(Default)]
    struct RecordingSurface {
        charts: Vec<(ChartStyle, Vec<String>, Vec<f64>)>,
        placeholders: Vec<ChartStyle>,
    }

    impl ChartSurface for RecordingSurface {
        fn line_chart(&mut self, style: ChartStyle, labels: &[String], values: &[f64]) {
            self.charts.push((style, labels.to_vec(), values.to_vec()));
        }

        fn placeholder(&mut self, style: ChartStyle) {
            self.placeholders.push(style);
        }
    }

    #[test]
    fn test_hour_labels() {
        let labels = hour_labels(24);
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[9], "09:00");
        assert_eq!(labels[23], "23:00");
    }

    #[test]
    fn test_hour_labels_wrap_past_midnight() {
        let labels = hour_labels(26);
        assert_eq!(labels[24], "00:00");
        assert_eq!(labels[25], "01:00");
    }

    #[test]
    fn test_axis_tick_rule() {
        assert!(axis_tick("00:00"));
        assert!(axis_tick("06:00"));
        assert!(axis_tick("12:00"));
        assert!(axis_tick("18:00"));
        assert!(!axis_tick("01:00"));
        assert!(!axis_tick("23:00"));
    }

    #[test]
    fn test_present_empty_state_draws_placeholders() {
        let controller = DashboardController::new(
            SelectionKey::Place(NamedPlace::Berlin),
            StalePolicy::default(),
        );
        let mut surface = RecordingSurface::default();

        present(&controller, &mut surface);

        assert!(surface.charts.is_empty());
        assert_eq!(surface.placeholders.len(), 3);
        assert_eq!(surface.placeholders[0], TEMPERATURE_CHART);
        assert_eq!(surface.placeholders[1], HUMIDITY_CHART);
        assert_eq!(surface.placeholders[2], RAIN_CHART);
    }

    #[test]
    fn test_present_draws_all_three_charts() {
        let mut controller = DashboardController::new(
            SelectionKey::Place(NamedPlace::Berlin),
            StalePolicy::default(),
        );
        let ticket = controller.begin_refresh(SelectionKey::Place(NamedPlace::Berlin));
        controller.apply(
            ticket,
            Ok(skywatch_weather::ForecastTriple {
                temperature: vec![12.5; 24],
                humidity: vec![70.0; 24],
                rain: vec![0.2; 24],
            }),
        );

        let mut surface = RecordingSurface::default();
        present(&controller, &mut surface);

        assert!(surface.placeholders.is_empty());
        assert_eq!(surface.charts.len(), 3);

        let (style, labels, values) = &surface.charts[0];
        assert_eq!(*style, TEMPERATURE_CHART);
        assert_eq!(labels.len(), 24);
        assert_eq!(values[0], 12.5);

        assert_eq!(surface.charts[1].0, HUMIDITY_CHART);
        assert_eq!(surface.charts[2].0, RAIN_CHART);
    }

    #[test]
    fn test_chart_styles_match_source_screen() {
        assert_eq!(TEMPERATURE_CHART.title, "Temperature (°C)");
        assert_eq!(TEMPERATURE_CHART.color, "rgba(255, 0, 0, 1)");
        assert_eq!(HUMIDITY_CHART.title, "Relative Humidity (%)");
        assert_eq!(RAIN_CHART.title, "Rain (mm)");
    }
}
