//! Linear regression model

use crate::error::{ForecastError, Result};
use crate::models::{check_width, FeatureMatrix, RegressionModel};
use serde::{Deserialize, Serialize};

/// Linear regression: `intercept + Σ coefficient_i * x_i`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// Intercept (bias) term
    #[serde(default)]
    pub intercept: f64,
    /// One coefficient per feature column, in feature-list order
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    /// Create a new linear model
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self> {
        let model = Self {
            intercept,
            coefficients,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check the parameters, e.g. after deserializing
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Linear model needs at least one coefficient".to_string(),
            ));
        }
        Ok(())
    }

    fn predict_one(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

impl RegressionModel for LinearRegressor {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>> {
        check_width(rows, self.coefficients.len())?;
        Ok(rows.rows().iter().map(|row| self.predict_one(row)).collect())
    }

    fn name(&self) -> &str {
        "Linear Regression"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_coefficients() {
        assert!(LinearRegressor::new(1.0, vec![]).is_err());
    }

    #[test]
    fn test_predict_rows_in_order() {
        let model = LinearRegressor::new(1.0, vec![2.0, -1.0]).unwrap();
        let mut rows = FeatureMatrix::new(vec!["a".into(), "b".into()]);
        rows.push_row(vec![3.0, 1.0]).unwrap();
        rows.push_row(vec![0.0, 4.0]).unwrap();

        assert_eq!(model.predict(&rows).unwrap(), vec![6.0, -3.0]);
    }
}
