//! Next-day forecasting from an entity's latest record
//!
//! The forecast input is the latest record moved one calendar day forward with
//! every other value carried over unchanged, including engineered features
//! that depend on the calendar (day of week, lags, rolling means). Those are
//! not re-derived for the new date.

use crate::data::HistoryRecord;
use crate::error::{ForecastError, Result};
use crate::features::FeatureList;
use crate::models::{FeatureMatrix, RegressionModel};
use crate::selector::EntityHistory;
use chrono::{Days, NaiveDate};
use std::fmt;
use tracing::debug;

/// The synthetic "next day" record fed to the model
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInput {
    record: HistoryRecord,
}

impl ForecastInput {
    /// Build the input from the latest known record
    pub fn from_latest(latest: &HistoryRecord) -> Result<Self> {
        let date = latest.date().checked_add_days(Days::new(1)).ok_or_else(|| {
            ForecastError::Data(format!("Cannot advance date {} by one day", latest.date()))
        })?;
        Ok(Self {
            record: latest.with_date(date),
        })
    }

    /// Date being forecast
    pub fn date(&self) -> NaiveDate {
        self.record.date()
    }

    /// The full synthetic record
    pub fn record(&self) -> &HistoryRecord {
        &self.record
    }
}

/// Predicted units sold
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Prediction(f64);

impl Prediction {
    /// Raw model output
    pub fn value(self) -> f64 {
        self.0
    }

    /// Prediction rounded to whole units
    pub fn units(self) -> f64 {
        self.0.round()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}", self.0)
    }
}

/// Result of a next-day forecast
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// The record the model was run on
    pub input: ForecastInput,
    /// The model output
    pub prediction: Prediction,
}

/// Forecast the day after the latest record of `history`.
///
/// The model is not invoked when the history is empty or when a feature
/// cannot be resolved on the input record.
pub fn forecast_next_day<M>(
    history: &EntityHistory<'_>,
    features: &FeatureList,
    model: &M,
) -> Result<Forecast>
where
    M: RegressionModel + ?Sized,
{
    let latest = history.latest().ok_or(ForecastError::EmptyHistory {
        store: history.store(),
        item: history.item(),
    })?;

    let input = ForecastInput::from_latest(latest)?;

    let mut rows = FeatureMatrix::new(features.names().to_vec());
    rows.push_row(features.project(input.record())?)?;
    debug!(
        store = history.store(),
        item = history.item(),
        date = %input.date(),
        model = model.name(),
        "Running next-day inference"
    );

    let outputs = model.predict(&rows).map_err(into_inference)?;
    let value = outputs.first().copied().ok_or_else(|| {
        ForecastError::Inference("Model returned no predictions".to_string())
    })?;

    Ok(Forecast {
        input,
        prediction: Prediction(value),
    })
}

/// Model failures are reported as inference errors whatever their origin
pub(crate) fn into_inference(err: ForecastError) -> ForecastError {
    match err {
        ForecastError::Inference(_) => err,
        other => ForecastError::Inference(other.to_string()),
    }
}
