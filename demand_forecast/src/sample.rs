//! Synthetic demand artifacts for trying the dashboard without real data
//!
//! Sales follow a weekly pattern around a per-entity level with Poisson noise.
//! The engineered columns are `day_of_week` (Monday = 0), `lag_1` (previous
//! day's sales) and `rolling_mean_7` (mean of up to seven previous days); both
//! lag columns are missing on an entity's first day.

use crate::data::Dataset;
use crate::error::{ForecastError, Result};
use crate::features::FeatureList;
use crate::models::{LinearRegressor, ModelArtifact};
use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const WEEKLY_PATTERN: [f64; 7] = [0.85, 0.9, 0.95, 1.0, 1.1, 1.3, 1.25];

/// File names written by [`SampleArtifacts::write`]
pub const DATASET_FILE: &str = "train.csv";
pub const FEATURES_FILE: &str = "features.json";
pub const MODEL_FILE: &str = "model.json";

/// Shape of the generated dataset
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub stores: u32,
    pub items: u32,
    pub days: u32,
    pub start: NaiveDate,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            stores: 2,
            items: 3,
            days: 120,
            start: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap_or(NaiveDate::MIN),
            seed: 42,
        }
    }
}

/// A dataset, feature list and model that fit together
#[derive(Debug, Clone)]
pub struct SampleArtifacts {
    pub dataset: Dataset,
    pub features: FeatureList,
    pub model: ModelArtifact,
}

/// Where [`SampleArtifacts::write`] put each artifact
#[derive(Debug, Clone)]
pub struct SamplePaths {
    pub dataset: PathBuf,
    pub features: PathBuf,
    pub model: PathBuf,
}

impl SampleArtifacts {
    /// Generate artifacts; the same config always yields the same data
    pub fn generate(config: &SampleConfig) -> Result<Self> {
        if config.stores == 0 || config.items == 0 || config.days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Stores, items and days must all be positive".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut dataset = Dataset::with_feature_columns(vec![
            "day_of_week".to_string(),
            "lag_1".to_string(),
            "rolling_mean_7".to_string(),
        ]);

        for store in 1..=config.stores {
            for item in 1..=config.items {
                let level = 10.0 + 5.0 * f64::from(store) + 3.0 * f64::from(item);
                let mut window: VecDeque<f64> = VecDeque::with_capacity(7);

                for offset in 0..config.days {
                    let date = config
                        .start
                        .checked_add_days(Days::new(u64::from(offset)))
                        .ok_or_else(|| {
                            ForecastError::InvalidParameter(
                                "Sample date range overflows the calendar".to_string(),
                            )
                        })?;
                    let weekday = date.weekday().num_days_from_monday();
                    let poisson = Poisson::new(level * WEEKLY_PATTERN[weekday as usize])
                        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
                    let sales: f64 = poisson.sample(&mut rng);

                    let lag_1 = window.back().copied().unwrap_or(f64::NAN);
                    let rolling_mean_7 = if window.is_empty() {
                        f64::NAN
                    } else {
                        window.iter().sum::<f64>() / window.len() as f64
                    };

                    dataset.push(
                        date,
                        store,
                        item,
                        sales,
                        vec![f64::from(weekday), lag_1, rolling_mean_7],
                    )?;

                    if window.len() == 7 {
                        window.pop_front();
                    }
                    window.push_back(sales);
                }
            }
        }

        let features = FeatureList::new(vec![
            "store".to_string(),
            "item".to_string(),
            "day_of_week".to_string(),
            "lag_1".to_string(),
            "rolling_mean_7".to_string(),
        ])?;
        let model = ModelArtifact::Linear(LinearRegressor::new(
            0.5,
            vec![0.0, 0.0, 0.4, 0.25, 0.72],
        )?);

        Ok(Self {
            dataset,
            features,
            model,
        })
    }

    /// Write the three artifacts into `dir`, creating it if needed
    pub fn write<P: AsRef<Path>>(&self, dir: P) -> Result<SamplePaths> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let paths = SamplePaths {
            dataset: dir.join(DATASET_FILE),
            features: dir.join(FEATURES_FILE),
            model: dir.join(MODEL_FILE),
        };
        crate::data::DataLoader::export_csv(&self.dataset, &paths.dataset)?;
        self.features.save_json(&paths.features)?;
        self.model.save_json(&paths.model)?;

        info!(
            records = self.dataset.len(),
            dir = %dir.display(),
            "Wrote sample artifacts"
        );
        Ok(paths)
    }
}
