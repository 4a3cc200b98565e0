//! Startup artifacts and the read-only context built from them

use crate::data::{DataLoader, Dataset};
use crate::engine::{forecast_next_day, Forecast};
use crate::error::{ArtifactKind, ForecastError, Result};
use crate::features::FeatureList;
use crate::metrics::{evaluate_in_sample, ForecastAccuracy};
use crate::models::{ModelArtifact, RegressionModel};
use crate::selector::{select, EntityHistory};
use crate::summary::EntitySummary;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Numeric names that resolve on every record regardless of feature columns
const RECORD_FIELDS: [&str; 3] = ["store", "item", "sales"];

/// Locations of the three artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub features: PathBuf,
    pub dataset: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("model.json"),
            features: PathBuf::from("features.json"),
            dataset: PathBuf::from("train.csv"),
        }
    }
}

/// Everything the pipeline reads, loaded once and never mutated
#[derive(Debug)]
pub struct AppContext {
    model: Box<dyn RegressionModel>,
    features: FeatureList,
    dataset: Dataset,
}

/// The outcome of one pipeline run for a selected entity
#[derive(Debug)]
pub struct EntityView {
    pub store: u32,
    pub item: u32,
    /// `None` when the selection has no records
    pub summary: Option<EntitySummary>,
    pub forecast: Result<Forecast>,
    /// Fit of the model over the selection's own history
    pub in_sample: Result<ForecastAccuracy>,
}

impl AppContext {
    /// Assemble a context from already-loaded parts
    pub fn new(model: Box<dyn RegressionModel>, features: FeatureList, dataset: Dataset) -> Self {
        Self {
            model,
            features,
            dataset,
        }
    }

    /// Load all three artifacts; any failure is an [`ForecastError::ArtifactLoad`]
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let model = ModelArtifact::from_json_file(&paths.model)
            .map_err(|e| load_error(ArtifactKind::Model, &paths.model, e))?;
        info!(path = %paths.model.display(), model = model.name(), "Loaded model");

        let features = FeatureList::from_json_file(&paths.features)
            .map_err(|e| load_error(ArtifactKind::Features, &paths.features, e))?;
        info!(path = %paths.features.display(), features = features.len(), "Loaded feature list");

        let dataset = DataLoader::from_csv(&paths.dataset)
            .map_err(|e| load_error(ArtifactKind::Dataset, &paths.dataset, e))?;
        info!(path = %paths.dataset.display(), records = dataset.len(), "Loaded dataset");

        let context = Self::new(Box::new(model), features, dataset);
        context.check_consistency();
        Ok(context)
    }

    /// Log schema drift between the artifacts
    fn check_consistency(&self) {
        if let Some(n) = self.model.n_features() {
            if n != self.features.len() {
                warn!(
                    model_features = n,
                    listed_features = self.features.len(),
                    "Model and feature list disagree on the number of features"
                );
            }
        }
        for name in self.features.names() {
            let known = RECORD_FIELDS.contains(&name.as_str())
                || self.dataset.feature_columns().iter().any(|c| c == name);
            if !known {
                warn!(feature = %name, "Feature is not a numeric column of the dataset");
            }
        }
        if self.dataset.is_empty() {
            warn!("Dataset has no records");
        }
    }

    /// The loaded model
    pub fn model(&self) -> &dyn RegressionModel {
        &*self.model
    }

    /// The feature list
    pub fn features(&self) -> &FeatureList {
        &self.features
    }

    /// The historical dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Stores offered for selection
    pub fn stores(&self) -> Vec<u32> {
        self.dataset.stores()
    }

    /// Items offered for selection
    pub fn items(&self) -> Vec<u32> {
        self.dataset.items()
    }

    /// History of one (store, item) pair
    pub fn select(&self, store: u32, item: u32) -> EntityHistory<'_> {
        select(&self.dataset, store, item)
    }

    /// Next-day forecast for a selected history
    pub fn forecast_next_day(&self, history: &EntityHistory<'_>) -> Result<Forecast> {
        forecast_next_day(history, &self.features, self.model())
    }

    /// Run the full pipeline for one selection
    pub fn view(&self, store: u32, item: u32) -> EntityView {
        let history = self.select(store, item);
        EntityView {
            store,
            item,
            summary: EntitySummary::from_history(&history),
            forecast: self.forecast_next_day(&history),
            in_sample: evaluate_in_sample(&history, &self.features, self.model()),
        }
    }

    /// Re-export the loaded dataset to a CSV file
    pub fn export_dataset<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        DataLoader::export_csv(&self.dataset, path.as_ref())?;
        info!(path = %path.as_ref().display(), records = self.dataset.len(), "Exported dataset");
        Ok(())
    }
}

fn load_error(artifact: ArtifactKind, path: &Path, err: ForecastError) -> ForecastError {
    ForecastError::artifact(artifact, format!("{}: {}", path.display(), err))
}
