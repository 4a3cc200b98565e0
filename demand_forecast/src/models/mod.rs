//! Pre-trained regression models and their inputs

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs;
use std::path::Path;

pub mod linear;
pub mod tree_ensemble;

pub use linear::LinearRegressor;
pub use tree_ensemble::{Leaf, Split, TreeEnsembleRegressor, TreeNode};

/// Rows of feature values, one column per feature name, in model order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Create an empty matrix over the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the column count
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Row has {} values but the matrix has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }
}

/// A trained regression model, opaque to the pipeline.
///
/// Implementations must be deterministic at inference time and return exactly
/// one value per input row, in row order.
pub trait RegressionModel: Debug + Send + Sync {
    /// Predict one value per row
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;

    /// Number of features the model was trained on, when it declares one
    fn n_features(&self) -> Option<usize> {
        None
    }
}

/// Serialized model artifact, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Intercept plus one coefficient per feature
    Linear(LinearRegressor),
    /// Gradient-boosted regression trees
    TreeEnsemble(TreeEnsembleRegressor),
}

impl ModelArtifact {
    /// Load a model artifact from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse a model artifact from JSON text and check its parameters
    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: Self = serde_json::from_str(json)?;
        match &artifact {
            ModelArtifact::Linear(model) => model.validate()?,
            ModelArtifact::TreeEnsemble(model) => model.validate()?,
        }
        Ok(artifact)
    }

    /// Write the artifact as pretty-printed JSON
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn inner(&self) -> &dyn RegressionModel {
        match self {
            ModelArtifact::Linear(model) => model as &dyn RegressionModel,
            ModelArtifact::TreeEnsemble(model) => model,
        }
    }
}

impl RegressionModel for ModelArtifact {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>> {
        self.inner().predict(rows)
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn n_features(&self) -> Option<usize> {
        self.inner().n_features()
    }
}

/// Check that every row of `rows` has the width a model expects
pub(crate) fn check_width(rows: &FeatureMatrix, expected: usize) -> Result<()> {
    if rows.n_cols() != expected {
        return Err(ForecastError::Inference(format!(
            "Feature shape mismatch: expected {} features, got {}",
            expected,
            rows.n_cols()
        )));
    }
    Ok(())
}
