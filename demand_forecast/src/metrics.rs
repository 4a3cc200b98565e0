//! Accuracy metrics: the reported figures of the trained model and an
//! in-sample fit over one entity's history

use crate::engine::into_inference;
use crate::error::{ForecastError, Result};
use crate::features::FeatureList;
use crate::models::RegressionModel;
use crate::selector::EntityHistory;
use serde::{Deserialize, Serialize};

/// Accuracy figures reported for the model when it was trained.
///
/// These are static numbers shipped alongside the artifacts, not computed by
/// this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportedMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl Default for ReportedMetrics {
    fn default() -> Self {
        Self {
            mae: 6.15,
            rmse: 8.00,
            r2: 0.94,
        }
    }
}

impl ReportedMetrics {
    /// Plain-language reading of the figures
    pub fn interpretation(&self) -> Vec<String> {
        vec![
            format!("Average prediction error ≈ {:.0} units", self.mae),
            format!("Model explains ~{:.0}% of variance", self.r2 * 100.0),
        ]
    }
}

impl std::fmt::Display for ReportedMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  MAE:      ≈ {:.2}", self.mae)?;
        writeln!(f, "  RMSE:     ≈ {:.2}", self.rmse)?;
        writeln!(f, "  R² Score: ≈ {:.2}", self.r2)?;
        Ok(())
    }
}

/// Forecast accuracy metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  MAE:      {:.4}", self.mae)?;
        writeln!(f, "  MSE:      {:.4}", self.mse)?;
        writeln!(f, "  RMSE:     {:.4}", self.rmse)?;
        writeln!(f, "  R² Score: {:.4}", self.r2)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let ss_res = errors.iter().map(|e| e.powi(2)).sum::<f64>();
    let mse = ss_res / n;
    let rmse = mse.sqrt();

    let mean_actual = actual.iter().sum::<f64>() / n;
    let ss_tot = actual
        .iter()
        .map(|a| (a - mean_actual).powi(2))
        .sum::<f64>();
    // constant actuals: perfect fit scores 1, anything else 0
    let r2 = if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(ForecastAccuracy { mae, mse, rmse, r2 })
}

/// Run the model over every record of `history` and score it against the
/// recorded sales
pub fn evaluate_in_sample<M>(
    history: &EntityHistory<'_>,
    features: &FeatureList,
    model: &M,
) -> Result<ForecastAccuracy>
where
    M: RegressionModel + ?Sized,
{
    if history.is_empty() {
        return Err(ForecastError::EmptyHistory {
            store: history.store(),
            item: history.item(),
        });
    }

    let rows = features.to_matrix(history.records().iter().copied())?;
    let predicted = model.predict(&rows).map_err(into_inference)?;
    if predicted.len() != rows.n_rows() {
        return Err(ForecastError::Inference(format!(
            "Model returned {} predictions for {} rows",
            predicted.len(),
            rows.n_rows()
        )));
    }

    let actual: Vec<f64> = history.records().iter().map(|r| r.sales()).collect();
    forecast_accuracy(&predicted, &actual)
}
