//! # Demand Forecast
//!
//! Per store/item demand history selection and next-day sales forecasting
//! from a pre-trained regression model.
//!
//! ## Features
//!
//! - Historical dataset loading from CSV and verbatim re-export
//! - Entity selection: one (store, item) history ordered by date
//! - Next-day forecasting: the latest record moved one day forward and run
//!   through the model
//! - Linear and gradient-boosted tree models loaded from JSON artifacts
//! - Reported and in-sample accuracy metrics
//! - Synthetic sample artifacts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use demand_forecast::{AppContext, ArtifactPaths};
//!
//! // Load the model, feature list and dataset once
//! let context = AppContext::load(&ArtifactPaths::default())?;
//!
//! // Select one entity and forecast the day after its latest record
//! let history = context.select(1, 1);
//! let forecast = context.forecast_next_day(&history)?;
//! println!(
//!     "Predicted sales for {}: {} units",
//!     forecast.input.date(),
//!     forecast.prediction
//! );
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod artifacts;
pub mod data;
pub mod engine;
pub mod error;
pub mod features;
pub mod metrics;
pub mod models;
pub mod sample;
pub mod selector;
pub mod summary;

// Re-export commonly used types
pub use crate::artifacts::{AppContext, ArtifactPaths, EntityView};
pub use crate::data::{DataLoader, Dataset, HistoryRecord};
pub use crate::engine::{forecast_next_day, Forecast, ForecastInput, Prediction};
pub use crate::error::{ArtifactKind, FailureKind, ForecastError, Result};
pub use crate::features::FeatureList;
pub use crate::metrics::{ForecastAccuracy, ReportedMetrics};
pub use crate::models::{FeatureMatrix, ModelArtifact, RegressionModel};
pub use crate::selector::{select, EntityHistory};
pub use crate::summary::EntitySummary;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
