//! Plain-text panels of the dashboard

use crate::chart::line_chart;
use crate::config::DashboardConfig;
use clap::ValueEnum;
use demand_forecast::{EntityView, FailureKind, ForecastError};
use std::fmt::Write;

pub const TITLE: &str = "Store–Item Demand Forecasting";

pub const FORECAST_CAPTION: &str = "Prediction is based on last available historical data. \
For real-world use, daily data updates are required.";

/// Sections of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Panel {
    Overview,
    History,
    Performance,
    Forecast,
    All,
}

impl Panel {
    fn includes(self, other: Panel) -> bool {
        self == Panel::All || self == other
    }
}

/// Title block shown once above the panels
pub fn render_header() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out, "{}", "=".repeat(TITLE.chars().count()));
    let _ = writeln!(
        out,
        "Objective: Predict next-day sales using historical demand patterns."
    );
    let _ = writeln!(
        out,
        "Note: Predictions are relative to the last available date in the dataset."
    );
    out
}

/// User-facing message for a failed pipeline step
pub fn failure_message(err: &ForecastError) -> String {
    match err.kind() {
        FailureKind::NoData => format!("{}.", err),
        FailureKind::PredictionFailed => format!("Prediction failed: {}", err),
        FailureKind::ArtifactsUnavailable => format!("Artifacts unavailable: {}", err),
        FailureKind::Other => format!("Error: {}", err),
    }
}

fn section(out: &mut String, name: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "--- {} ---", name);
}

fn no_data(out: &mut String, view: &EntityView) {
    let err = ForecastError::EmptyHistory {
        store: view.store,
        item: view.item,
    };
    let _ = writeln!(out, "{}", failure_message(&err));
}

pub fn render_overview(out: &mut String, view: &EntityView) {
    section(out, "Overview");
    let Some(summary) = &view.summary else {
        no_data(out, view);
        return;
    };

    let stats = &summary.stats;
    let _ = writeln!(
        out,
        "Date range: {} → {}",
        summary.first_date, summary.last_date
    );
    let _ = writeln!(out, "Total records: {}", summary.record_count);
    let _ = write!(
        out,
        "Sales: mean {:.2}, median {:.1}, min {:.0}, max {:.0}",
        stats.mean, stats.median, stats.min, stats.max
    );
    if stats.std_dev.is_nan() {
        let _ = writeln!(out);
    } else {
        let _ = writeln!(out, ", std dev {:.2}", stats.std_dev);
    }
}

pub fn render_history(out: &mut String, view: &EntityView, config: &DashboardConfig) {
    section(out, "Historical Sales");
    let Some(summary) = &view.summary else {
        no_data(out, view);
        return;
    };

    let _ = writeln!(out, "Actual Sales Trend (units sold by date)");
    out.push_str(&line_chart(
        &summary.series,
        config.chart.width,
        config.chart.height,
    ));
}

pub fn render_performance(out: &mut String, view: &EntityView, config: &DashboardConfig) {
    section(out, "Model Performance");
    let _ = write!(out, "{}", config.metrics);
    let _ = writeln!(out, "Interpretation");
    for line in config.metrics.interpretation() {
        let _ = writeln!(out, "  - {}", line);
    }

    match &view.in_sample {
        Ok(fit) => {
            let _ = writeln!(out, "Fit on this selection's history");
            let _ = writeln!(out, "  MAE:      {:.2}", fit.mae);
            let _ = writeln!(out, "  RMSE:     {:.2}", fit.rmse);
            let _ = writeln!(out, "  R² Score: {:.2}", fit.r2);
        }
        Err(err) => {
            let _ = writeln!(
                out,
                "Fit on this selection's history unavailable: {}",
                err
            );
        }
    }
}

pub fn render_forecast(out: &mut String, view: &EntityView) {
    section(out, "Tomorrow Forecast");
    match &view.forecast {
        Ok(forecast) => {
            let _ = writeln!(
                out,
                "Predicted sales for next day ({}): {} units",
                forecast.input.date(),
                forecast.prediction
            );
            let _ = writeln!(out, "{}", FORECAST_CAPTION);
        }
        Err(err) => {
            let _ = writeln!(out, "{}", failure_message(err));
        }
    }
}

/// Render the selected panels for one entity
pub fn render_view(view: &EntityView, config: &DashboardConfig, panel: Panel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Store {} / Item {}", view.store, view.item);

    if panel.includes(Panel::Overview) {
        render_overview(&mut out, view);
    }
    if panel.includes(Panel::History) {
        render_history(&mut out, view, config);
    }
    if panel.includes(Panel::Performance) {
        render_performance(&mut out, view, config);
    }
    if panel.includes(Panel::Forecast) {
        render_forecast(&mut out, view);
    }
    out
}

/// Distinct stores and items a selection can be made from
pub fn render_choices(stores: &[u32], items: &[u32]) -> String {
    let join = |values: &[u32]| {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("Stores: {}\nItems: {}\n", join(stores), join(items))
}
