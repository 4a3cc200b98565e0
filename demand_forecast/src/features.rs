//! The ordered feature list a model was trained on, and projection onto it

use crate::data::HistoryRecord;
use crate::error::{ForecastError, Result};
use crate::models::FeatureMatrix;
use std::fs;
use std::path::Path;

/// Ordered, non-empty list of the column names a model expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureList {
    names: Vec<String>,
}

impl FeatureList {
    /// Create a feature list
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Feature list must name at least one column".to_string(),
            ));
        }
        Ok(Self { names })
    }

    /// Load a feature list stored as a JSON array of strings
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse a feature list from a JSON array of strings
    pub fn from_json_str(json: &str) -> Result<Self> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Self::new(names)
    }

    /// Write the feature list as a JSON array
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.names)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Column names in model order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Project one record onto the feature list, in order.
    ///
    /// Fails with [`ForecastError::MissingFeature`] on the first name the
    /// record cannot resolve.
    pub fn project(&self, record: &HistoryRecord) -> Result<Vec<f64>> {
        self.names
            .iter()
            .map(|name| {
                record
                    .feature(name)
                    .ok_or_else(|| ForecastError::MissingFeature(name.clone()))
            })
            .collect()
    }

    /// Project several records into a matrix with one row per record
    pub fn to_matrix<'r, I>(&self, records: I) -> Result<FeatureMatrix>
    where
        I: IntoIterator<Item = &'r HistoryRecord>,
    {
        let mut matrix = FeatureMatrix::new(self.names.clone());
        for record in records {
            matrix.push_row(self.project(record)?)?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn record() -> HistoryRecord {
        let columns: Arc<[String]> = Arc::from(vec!["lag_1".to_string()]);
        HistoryRecord::new(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(), 3, 7, 12.0)
            .with_features(columns, vec![11.0])
            .unwrap()
    }

    #[test]
    fn test_projection_follows_list_order() {
        let list = FeatureList::new(vec!["lag_1".into(), "item".into(), "store".into()]).unwrap();
        assert_eq!(list.project(&record()).unwrap(), vec![11.0, 7.0, 3.0]);
    }

    #[test]
    fn test_date_is_not_a_feature() {
        let list = FeatureList::new(vec!["date".into()]).unwrap();
        assert!(matches!(
            list.project(&record()),
            Err(ForecastError::MissingFeature(name)) if name == "date"
        ));
    }

    #[test]
    fn test_empty_list_rejected() {
        assert!(FeatureList::new(vec![]).is_err());
        assert!(FeatureList::from_json_str("[]").is_err());
    }
}
