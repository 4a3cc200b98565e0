//! # Demand Forecast Workspace
//!
//! Umbrella crate over the workspace members:
//!
//! - [`demand_forecast`]: dataset loading, entity selection, next-day
//!   forecasting and model artifacts
//! - [`demand_dashboard`]: configuration and text rendering of the dashboard
//!
//! ## Example
//!
//! ```
//! use demand_forecast_workspace::forecast::sample::{SampleArtifacts, SampleConfig};
//! use demand_forecast_workspace::forecast::{forecast_next_day, select};
//!
//! let sample = SampleArtifacts::generate(&SampleConfig::default()).unwrap();
//! let history = select(&sample.dataset, 1, 1);
//! let forecast = forecast_next_day(&history, &sample.features, &sample.model).unwrap();
//! assert_eq!(forecast.input.date(), history.latest().unwrap().date().succ_opt().unwrap());
//! ```

pub use demand_dashboard as dashboard;
pub use demand_forecast as forecast;
