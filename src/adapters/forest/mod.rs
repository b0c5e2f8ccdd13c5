//! Random-forest adapter: Implementation of Classifier over an exported
//! scikit-learn forest.
//!
//! The training side exports every tree's node table to JSON; this adapter
//! loads the artifact once at startup, validates it against the canonical
//! feature columns, and serves read-only predictions.
//!
//! # Thread Safety
//!
//! The loaded forest is immutable. A single `RandomForest` behind an `Arc`
//! can serve concurrent predictions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

/// Error type for model loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("No model artifact found in {0} (expected forest.json or model.json)")]
    NotFound(String),

    #[error("Failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model artifact: {0}")]
    Format(String),
}

/// One node of an exported decision tree.
///
/// Leaves have `feature: null`; split nodes test `x[feature] <= threshold`
/// and descend left on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub feature: Option<usize>,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default)]
    pub left: usize,
    #[serde(default)]
    pub right: usize,
    /// Training-sample counts per class at this node.
    pub value: [f64; 2],
}

/// One exported decision tree. Node 0 is the root; children always come
/// after their parent in the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTree {
    pub nodes: Vec<TreeNode>,
}

/// Forest artifact as exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedForest {
    pub feature_names: Vec<String>,
    pub trees: Vec<ExportedTree>,
}

/// Random-forest classifier loaded from an exported artifact.
#[derive(Debug)]
pub struct RandomForest {
    forest: ExportedForest,
}

impl RandomForest {
    /// Load the forest from a model directory or file.
    ///
    /// Accepts either a path to the JSON artifact itself or a directory
    /// containing `forest.json` (or `model.json`).
    ///
    /// # Errors
    /// Returns `ModelError` if no artifact is found, the JSON is malformed,
    /// or validation fails.
    pub fn load(model_path: &Path) -> Result<Self, ModelError> {
        let path = if model_path.is_file() {
            model_path.to_path_buf()
        } else {
            ["forest.json", "model.json"]
                .iter()
                .map(|name| model_path.join(name))
                .find(|candidate| candidate.exists())
                .ok_or_else(|| ModelError::NotFound(model_path.display().to_string()))?
        };

        let content = fs::read(&path)?;
        let forest: ExportedForest =
            serde_json::from_slice(&content).map_err(|e| ModelError::Format(e.to_string()))?;

        Self::validate(&forest)?;

        let digest = Sha256::digest(&content);
        let fingerprint: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        tracing::info!(
            "Loaded forest from {:?} ({} trees, {} features, fingerprint {})",
            path,
            forest.trees.len(),
            forest.feature_names.len(),
            fingerprint
        );

        Ok(Self { forest })
    }

    /// Build a forest from an already-parsed artifact (used by tests and
    /// embedding callers).
    ///
    /// # Errors
    /// Returns `ModelError` if validation fails.
    pub fn from_exported(forest: ExportedForest) -> Result<Self, ModelError> {
        Self::validate(&forest)?;
        Ok(Self { forest })
    }

    fn validate(forest: &ExportedForest) -> Result<(), ModelError> {
        if forest.trees.is_empty() {
            return Err(ModelError::Format("forest has no trees".into()));
        }
        if forest.feature_names.len() != FEATURE_NAMES.len() {
            return Err(ModelError::Format(format!(
                "expected {} feature columns, artifact has {}",
                FEATURE_NAMES.len(),
                forest.feature_names.len()
            )));
        }
        for (i, (have, want)) in forest
            .feature_names
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
        {
            if have != want {
                return Err(ModelError::Format(format!(
                    "feature column {i} is {have:?}, expected {want:?}; \
                     the artifact was trained on a different column order"
                )));
            }
        }

        for (t, tree) in forest.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Format(format!("tree {t} has no nodes")));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let Some(feature) = node.feature {
                    if feature >= forest.feature_names.len() {
                        return Err(ModelError::Format(format!(
                            "tree {t} node {n} splits on out-of-range feature {feature}"
                        )));
                    }
                    if node.left >= tree.nodes.len() || node.right >= tree.nodes.len() {
                        return Err(ModelError::Format(format!(
                            "tree {t} node {n} has out-of-range children"
                        )));
                    }
                    // Children after parents guarantees traversal terminates.
                    if node.left <= n || node.right <= n {
                        return Err(ModelError::Format(format!(
                            "tree {t} node {n} children must come after their parent"
                        )));
                    }
                }
                let total = node.value[0] + node.value[1];
                if !total.is_finite() || total <= 0.0 {
                    return Err(ModelError::Format(format!(
                        "tree {t} node {n} has invalid class counts"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Walk one tree to its leaf and return the normalized class
    /// distribution for `x`.
    fn tree_proba(tree: &ExportedTree, x: &[f64]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            let node = &tree.nodes[idx];
            match node.feature {
                Some(feature) => {
                    idx = if x[feature] <= node.threshold {
                        node.left
                    } else {
                        node.right
                    };
                }
                None => {
                    let total = node.value[0] + node.value[1];
                    return [node.value[0] / total, node.value[1] / total];
                }
            }
        }
    }

    fn check_input(&self, features: &FeatureVector) -> Result<(), ClassifierError> {
        if features.len() != self.forest.feature_names.len() {
            return Err(ClassifierError::ShapeMismatch {
                got: features.len(),
                expected: self.forest.feature_names.len(),
            });
        }
        if features.as_slice().iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::Rejected(
                "feature vector contains a non-finite value".into(),
            ));
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<u8, ClassifierError> {
        let [_, p1] = self.predict_proba(features)?;
        Ok(u8::from(p1 >= 0.5))
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], ClassifierError> {
        self.check_input(features)?;

        let x = features.as_slice();
        let mut acc = [0.0, 0.0];
        for tree in &self.forest.trees {
            let p = Self::tree_proba(tree, x);
            acc[0] += p[0];
            acc[1] += p[1];
        }

        let n = self.forest.trees.len() as f64;
        Ok([acc[0] / n, acc[1] / n])
    }
}
