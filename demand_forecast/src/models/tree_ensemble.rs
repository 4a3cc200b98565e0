//! Gradient-boosted regression tree ensemble
//!
//! Each tree routes a row from its root to a leaf: at a split the row goes
//! left when `x[feature] < threshold` and right otherwise, and a missing
//! (`NaN`) value follows `default_left`. The prediction is `base_score` plus
//! the sum of the reached leaf values.

use crate::error::{ForecastError, Result};
use crate::models::{check_width, FeatureMatrix, RegressionModel};
use serde::{Deserialize, Serialize};

/// Leaf node carrying the tree's contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    /// Value added to the prediction
    pub value: f64,
}

/// Internal decision node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Index of the feature to split on
    pub feature: usize,
    /// Rows with a value below the threshold go left
    pub threshold: f64,
    /// Direction taken by missing values
    #[serde(default)]
    pub default_left: bool,
    /// Left subtree
    pub left: Box<TreeNode>,
    /// Right subtree
    pub right: Box<TreeNode>,
}

/// A node of a regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal decision node
    Split(Split),
    /// Terminal node
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    fn evaluate(&self, row: &[f64]) -> Result<f64> {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf(leaf) => return Ok(leaf.value),
                TreeNode::Split(split) => {
                    let x = row.get(split.feature).copied().ok_or_else(|| {
                        ForecastError::Inference(format!(
                            "Tree splits on feature index {} but the row has {} features",
                            split.feature,
                            row.len()
                        ))
                    })?;
                    let go_left = if x.is_nan() {
                        split.default_left
                    } else {
                        x < split.threshold
                    };
                    node = if go_left { &*split.left } else { &*split.right };
                }
            }
        }
    }
}

/// Additive ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsembleRegressor {
    /// Constant added to every prediction
    #[serde(default)]
    pub base_score: f64,
    /// Number of input features the ensemble was trained on
    pub n_features: usize,
    /// The boosted trees
    pub trees: Vec<TreeNode>,
}

impl TreeEnsembleRegressor {
    /// Create a new ensemble
    pub fn new(base_score: f64, n_features: usize, trees: Vec<TreeNode>) -> Result<Self> {
        let model = Self {
            base_score,
            n_features,
            trees,
        };
        model.validate()?;
        Ok(model)
    }

    /// Check the parameters, e.g. after deserializing
    pub fn validate(&self) -> Result<()> {
        if self.n_features == 0 {
            return Err(ForecastError::InvalidParameter(
                "Tree ensemble needs at least one feature".to_string(),
            ));
        }
        Ok(())
    }

    /// Depth of the deepest tree
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        let mut total = self.base_score;
        for tree in &self.trees {
            total += tree.evaluate(row)?;
        }
        Ok(total)
    }
}

impl RegressionModel for TreeEnsembleRegressor {
    fn predict(&self, rows: &FeatureMatrix) -> Result<Vec<f64>> {
        check_width(rows, self.n_features)?;
        rows.rows().iter().map(|row| self.predict_one(row)).collect()
    }

    fn name(&self) -> &str {
        "Gradient Boosted Trees"
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}
