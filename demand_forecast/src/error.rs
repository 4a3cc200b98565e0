//! Error types for the demand_forecast crate

use std::fmt;
use thiserror::Error;

/// Which of the three startup artifacts failed to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// The trained regression model
    Model,
    /// The ordered feature-column list
    Features,
    /// The historical dataset
    Dataset,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Model => write!(f, "model"),
            ArtifactKind::Features => write!(f, "feature list"),
            ArtifactKind::Dataset => write!(f, "dataset"),
        }
    }
}

/// Coarse classification of a failure, used to pick the message shown to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The selection has no historical records
    NoData,
    /// The forecast could not be produced for the selection
    PredictionFailed,
    /// The artifacts could not be loaded at startup
    ArtifactsUnavailable,
    /// Anything else (IO on export, bad parameters)
    Other,
}

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The selected (store, item) pair has no records
    #[error("No historical data for store {store}, item {item}")]
    EmptyHistory { store: u32, item: u32 },

    /// A feature named by the feature list cannot be resolved on the record
    #[error("Missing feature: '{0}' is not a numeric column of the dataset")]
    MissingFeature(String),

    /// The model invocation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// One of the startup artifacts could not be loaded
    #[error("Failed to load {artifact} artifact: {reason}")]
    ArtifactLoad { artifact: ArtifactKind, reason: String },

    /// Error related to data parsing or shape
    #[error("Data error: {0}")]
    Data(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from reading or writing CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from JSON (de)serialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ForecastError {
    /// Build an artifact load error from any displayable cause
    pub fn artifact(artifact: ArtifactKind, reason: impl fmt::Display) -> Self {
        ForecastError::ArtifactLoad {
            artifact,
            reason: reason.to_string(),
        }
    }

    /// Classify the error for presentation
    pub fn kind(&self) -> FailureKind {
        match self {
            ForecastError::EmptyHistory { .. } => FailureKind::NoData,
            ForecastError::MissingFeature(_) | ForecastError::Inference(_) => {
                FailureKind::PredictionFailed
            }
            ForecastError::ArtifactLoad { .. } => FailureKind::ArtifactsUnavailable,
            _ => FailureKind::Other,
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
