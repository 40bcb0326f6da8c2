//! Model artifacts: frozen feature schemas, categorical encoders, and
//! externally trained regression models.
//!
//! Artifacts are produced by an offline training pipeline and serialized as
//! JSON, a portable format any training stack can emit. This crate only
//! loads and invokes them; it never fits parameters.

use crate::error::{ForecastError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// The frozen, ordered column list a trained model expects, plus the
/// feature groupings recorded at training time.
///
/// `columns` is the supreme contract between feature building and
/// inference: every vector handed to the model must match it exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Final processed column names, in model input order
    pub columns: Vec<String>,
    /// Static per-product categorical columns (defaulted to "Missing")
    #[serde(default)]
    pub static_categorical: Vec<String>,
    /// Time-varying categorical columns
    #[serde(default)]
    pub time_varying_categorical: Vec<String>,
    /// Raw categorical columns the encoder consumes
    #[serde(default)]
    pub categorical_columns: Vec<String>,
    /// Calendar-derived columns, recorded for artifact introspection
    #[serde(default)]
    pub date_features: Vec<String>,
}

impl FeatureSchema {
    /// Load a schema descriptor from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// Number of model input columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// Categorical-to-numeric encoding recorded at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoricalEncoder {
    /// One-hot columns derived from whatever values appear in the data
    /// (pandas get_dummies style); used by the daily artifact.
    Dummy {
        /// Columns to expand
        columns: Vec<String>,
    },
    /// One-hot over category lists frozen at training time; values outside
    /// the list encode to all zeros.
    OneHot {
        /// Columns to expand
        columns: Vec<String>,
        /// Per-column category lists, parallel to `columns`
        categories: Vec<Vec<String>>,
    },
}

impl CategoricalEncoder {
    /// Load an encoder from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// The raw columns this encoder consumes.
    pub fn columns(&self) -> &[String] {
        match self {
            CategoricalEncoder::Dummy { columns } => columns,
            CategoricalEncoder::OneHot { columns, .. } => columns,
        }
    }

    /// Expand categorical values into named one-hot columns. `lookup`
    /// returns the stringified value of a raw column, or `None` when the
    /// row does not carry it.
    pub fn encode(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<(String, f64)> {
        let mut encoded = Vec::new();
        match self {
            CategoricalEncoder::Dummy { columns } => {
                for col in columns {
                    if let Some(value) = lookup(col) {
                        encoded.push((format!("{}_{}", col, value), 1.0));
                    }
                }
            }
            CategoricalEncoder::OneHot {
                columns,
                categories,
            } => {
                for (col, cats) in columns.iter().zip(categories.iter()) {
                    let value = lookup(col).unwrap_or_else(|| "Missing".to_string());
                    for cat in cats {
                        let hit = if *cat == value { 1.0 } else { 0.0 };
                        encoded.push((format!("{}_{}", col, cat), hit));
                    }
                }
            }
        }
        encoded
    }

    fn validate(&self) -> Result<()> {
        if let CategoricalEncoder::OneHot {
            columns,
            categories,
        } = self
        {
            if columns.len() != categories.len() {
                return Err(ForecastError::Configuration(format!(
                    "Encoder has {} columns but {} category lists",
                    columns.len(),
                    categories.len()
                )));
            }
        }
        Ok(())
    }
}

/// A node in a serialized decision tree. Children are indices into the
/// tree's node array and must point forward, so a walk always terminates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Binary split: `feature < threshold` goes left, otherwise right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal value
    Leaf { value: f64 },
}

/// One decision tree as a flat node array rooted at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn evaluate(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    index = if value < *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ForecastError::Configuration(
                "Decision tree has no nodes".to_string(),
            ));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(ForecastError::Configuration(format!(
                        "Tree node {} splits on feature {} but the schema has {} columns",
                        i, feature, n_features
                    )));
                }
                if *left <= i || *right <= i || *left >= self.nodes.len() || *right >= self.nodes.len()
                {
                    return Err(ForecastError::Configuration(format!(
                        "Tree node {} has invalid children ({}, {})",
                        i, left, right
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A previously fit regression model, deserialized from a versioned
/// artifact. Only prediction is supported.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    /// Linear model: intercept + dot(coefficients, features)
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Additive tree ensemble (gradient-boosted regression trees)
    GradientBoosted {
        base_score: f64,
        trees: Vec<DecisionTree>,
    },
}

impl RegressionModel {
    /// Load a model from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_json(path)
    }

    /// Raw (unclamped) prediction for one aligned feature vector.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            RegressionModel::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(features.iter())
                        .map(|(c, x)| c * x)
                        .sum::<f64>()
            }
            RegressionModel::GradientBoosted { base_score, trees } => {
                base_score + trees.iter().map(|t| t.evaluate(features)).sum::<f64>()
            }
        }
    }

    /// Check the model against the frozen schema width. Called at load time
    /// so a mismatched artifact fails fast instead of silently zero-padding
    /// at every predict call.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            RegressionModel::Linear { coefficients, .. } => {
                if coefficients.len() != n_features {
                    return Err(ForecastError::Configuration(format!(
                        "Model has {} coefficients but the schema has {} columns",
                        coefficients.len(),
                        n_features
                    )));
                }
            }
            RegressionModel::GradientBoosted { trees, .. } => {
                for tree in trees {
                    tree.validate(n_features)?;
                }
            }
        }
        Ok(())
    }
}

/// Everything needed to run inference for one horizon: the fitted model,
/// its frozen feature schema, and the optional categorical encoder.
/// Immutable after load.
#[derive(Debug, Clone)]
pub struct HorizonArtifact {
    pub model: RegressionModel,
    pub schema: FeatureSchema,
    pub encoder: Option<CategoricalEncoder>,
}

impl HorizonArtifact {
    /// Assemble and cross-validate the artifact components.
    pub fn new(
        model: RegressionModel,
        schema: FeatureSchema,
        encoder: Option<CategoricalEncoder>,
    ) -> Result<Self> {
        model.validate(schema.width())?;
        if let Some(enc) = &encoder {
            enc.validate()?;
        }
        Ok(Self {
            model,
            schema,
            encoder,
        })
    }
}

fn read_json<P: AsRef<Path>, T: DeserializeOwned>(path: P) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_walk_reaches_the_right_leaf() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 5.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 1.0 },
                TreeNode::Leaf { value: 2.0 },
            ],
        };
        assert_eq!(tree.evaluate(&[4.0]), 1.0);
        assert_eq!(tree.evaluate(&[6.0]), 2.0);
    }

    #[test]
    fn backward_child_links_are_rejected() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Leaf { value: 0.0 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                },
            ],
        };
        assert!(tree.validate(1).is_err());
    }

    #[test]
    fn linear_model_width_is_checked() {
        let model = RegressionModel::Linear {
            intercept: 0.0,
            coefficients: vec![1.0, 2.0],
        };
        assert!(model.validate(2).is_ok());
        assert!(model.validate(3).is_err());
    }

    #[test]
    fn one_hot_encodes_unknown_values_to_zeros() {
        let encoder = CategoricalEncoder::OneHot {
            columns: vec!["Category".to_string()],
            categories: vec![vec!["Beverages".to_string(), "Snacks".to_string()]],
        };
        let encoded = encoder.encode(|_| Some("Electronics".to_string()));
        assert_eq!(encoded.len(), 2);
        assert!(encoded.iter().all(|(_, v)| *v == 0.0));
        assert_eq!(encoded[0].0, "Category_Beverages");
    }
}
