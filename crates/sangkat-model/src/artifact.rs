//! Model artifacts and the regressor abstraction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ModelLoadError;

/// An opaque regression model mapping a feature vector to a price.
pub trait Regressor: std::fmt::Debug + Send + Sync {
    /// Predicts a raw price for one feature vector.
    fn predict(&self, features: &[f64]) -> f64;

    /// Returns the number of features the model was trained on, if known.
    fn n_features(&self) -> Option<usize> {
        None
    }
}

/// A node in a regression tree.
///
/// Split nodes send `x[feature] <= threshold` to `left` and everything else
/// to `right`. Child indices always point further into the node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split node.
    Split {
        /// Index of the feature to test.
        feature: usize,
        /// Split threshold.
        threshold: f64,
        /// Node index taken when the feature is at or below the threshold.
        left: usize,
        /// Node index taken otherwise.
        right: usize,
    },
    /// Terminal node holding a prediction.
    Leaf {
        /// Predicted value.
        value: f64,
    },
}

impl TreeNode {
    /// Creates a split node.
    #[must_use]
    pub const fn split(feature: usize, threshold: f64, left: usize, right: usize) -> Self {
        Self::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    /// Creates a leaf node.
    #[must_use]
    pub const fn leaf(value: f64) -> Self {
        Self::Leaf { value }
    }
}

/// A single regression tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Creates a tree from its nodes.
    #[must_use]
    pub const fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn validate(&self, tree_index: usize, n_features: usize) -> Result<(), ModelLoadError> {
        if self.nodes.is_empty() {
            return Err(ModelLoadError::Invalid(format!("tree {tree_index} has no nodes")));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *node
            {
                if feature >= n_features {
                    return Err(ModelLoadError::Invalid(format!(
                        "tree {tree_index} node {i} splits on feature {feature} of {n_features}"
                    )));
                }
                for child in [left, right] {
                    if child <= i || child >= self.nodes.len() {
                        return Err(ModelLoadError::Invalid(format!(
                            "tree {tree_index} node {i} has invalid child {child}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walks the tree from the root. A malformed tree yields NaN.
    fn predict(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if x <= *threshold { *left } else { *right };
                }
                None => break,
            }
        }
        f64::NAN
    }
}

/// Tree ensemble regressor; the prediction is the mean over all trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    n_features: usize,
    trees: Vec<Tree>,
}

impl ForestRegressor {
    /// Creates a validated forest.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError::Invalid`] if the forest is empty, a split
    /// references a feature out of range, or a child index does not point
    /// further into its tree.
    pub fn new(n_features: usize, trees: Vec<Tree>) -> Result<Self, ModelLoadError> {
        let forest = Self { n_features, trees };
        forest.validate()?;
        Ok(forest)
    }

    /// Returns the number of trees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns true if the forest has no trees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i, self.n_features)?;
        }
        Ok(())
    }
}

impl Regressor for ForestRegressor {
    fn predict(&self, features: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        total / self.trees.len() as f64
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}

/// Linear regressor: `intercept + sum(coefficients[i] * x[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearRegressor {
    /// Creates a linear model.
    #[must_use]
    pub const fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }
}

/// A serialized model, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    /// Tree ensemble.
    Forest(ForestRegressor),
    /// Linear model.
    Linear(LinearRegressor),
}

impl ModelArtifact {
    /// Parses and validates an artifact from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the model is invalid.
    pub fn from_json(json: &str) -> Result<Self, ModelLoadError> {
        let artifact: Self = serde_json::from_str(json)?;
        if let Self::Forest(forest) = &artifact {
            forest.validate()?;
        }
        Ok(artifact)
    }

    /// Reads, parses and validates an artifact file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid model.
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let json = fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(&json)
    }

    /// Converts the artifact into a boxed regressor.
    #[must_use]
    pub fn into_regressor(self) -> Box<dyn Regressor> {
        match self {
            Self::Forest(forest) => Box::new(forest),
            Self::Linear(linear) => Box::new(linear),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two stumps on latitude and size.
    const FOREST_JSON: &str = r#"{
        "kind": "forest",
        "n_features": 3,
        "trees": [
            {"nodes": [
                {"feature": 0, "threshold": 11.55, "left": 1, "right": 2},
                {"value": 100000.0},
                {"value": 200000.0}
            ]},
            {"nodes": [
                {"feature": 2, "threshold": 100.0, "left": 1, "right": 2},
                {"value": 50000.0},
                {"value": 150000.0}
            ]}
        ]
    }"#;

    #[test]
    fn test_forest_from_json() {
        let artifact = ModelArtifact::from_json(FOREST_JSON).unwrap();
        let model = artifact.into_regressor();
        assert_eq!(model.n_features(), Some(3));

        // (100000 + 50000) / 2
        assert_relative_eq!(model.predict(&[11.50, 104.9, 80.0]), 75_000.0);
        // (200000 + 150000) / 2
        assert_relative_eq!(model.predict(&[11.60, 104.9, 120.0]), 175_000.0);
    }

    #[test]
    fn test_split_threshold_goes_left() {
        let tree = Tree::new(vec![
            TreeNode::split(0, 1.0, 1, 2),
            TreeNode::leaf(10.0),
            TreeNode::leaf(20.0),
        ]);
        let forest = ForestRegressor::new(1, vec![tree]).unwrap();
        assert_relative_eq!(forest.predict(&[1.0]), 10.0);
        assert_relative_eq!(forest.predict(&[1.000_001]), 20.0);
    }

    #[test]
    fn test_deeper_tree() {
        let tree = Tree::new(vec![
            TreeNode::split(0, 5.0, 1, 4),
            TreeNode::split(1, 2.0, 2, 3),
            TreeNode::leaf(1.0),
            TreeNode::leaf(2.0),
            TreeNode::leaf(3.0),
        ]);
        let forest = ForestRegressor::new(2, vec![tree]).unwrap();
        assert_relative_eq!(forest.predict(&[4.0, 1.0]), 1.0);
        assert_relative_eq!(forest.predict(&[4.0, 3.0]), 2.0);
        assert_relative_eq!(forest.predict(&[6.0, 0.0]), 3.0);
        assert_eq!(forest.len(), 1);
    }

    #[test]
    fn test_linear_from_json() {
        let json = r#"{"kind": "linear", "intercept": 1000.0, "coefficients": [0.0, 0.0, 1500.0]}"#;
        let model = ModelArtifact::from_json(json).unwrap().into_regressor();
        assert_eq!(model.n_features(), Some(3));
        assert_relative_eq!(model.predict(&[11.5, 104.9, 100.0]), 151_000.0);
    }

    #[test]
    fn test_rejects_empty_forest() {
        let json = r#"{"kind": "forest", "n_features": 3, "trees": []}"#;
        assert!(matches!(
            ModelArtifact::from_json(json),
            Err(ModelLoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_backward_child() {
        let tree = Tree::new(vec![
            TreeNode::split(0, 1.0, 1, 2),
            TreeNode::split(0, 1.0, 0, 2),
            TreeNode::leaf(1.0),
        ]);
        assert!(matches!(
            ForestRegressor::new(1, vec![tree]),
            Err(ModelLoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_feature_out_of_range() {
        let tree = Tree::new(vec![
            TreeNode::split(5, 1.0, 1, 2),
            TreeNode::leaf(1.0),
            TreeNode::leaf(2.0),
        ]);
        assert!(matches!(
            ForestRegressor::new(3, vec![tree]),
            Err(ModelLoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"{"kind": "svm", "weights": []}"#;
        assert!(matches!(
            ModelArtifact::from_json(json),
            Err(ModelLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("house_rf.json");
        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ModelLoadError::Read { .. })
        ));
    }
}
