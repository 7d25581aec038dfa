//! Model artifact format and loading.
//!
//! An artifact is a JSON document exported once at training time:
//!
//! ```text
//! {
//!   "format_version": 1,
//!   "n_features": 4,
//!   "feature_names": ["sepal_length", ...],
//!   "classes": ["setosa", "versicolor", "virginica"],
//!   "model": { "kind": "decision_tree", "nodes": [...] }
//! }
//! ```
//!
//! Loading checks internal consistency only. Whether the artifact matches
//! the service's four inputs is discovered at prediction time.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::linear::LinearClassifier;
use super::tree::{DecisionTree, TreeNode};
use super::{Label, ModelError, SharedModel, FEATURE_NAMES};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub n_features: usize,
    #[serde(default)]
    pub feature_names: Vec<String>,
    pub classes: Vec<Label>,
    pub model: ModelSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    DecisionTree {
        nodes: Vec<TreeNode>,
    },
    Linear {
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the artifact and build the classifier it describes.
    pub fn into_model(self) -> Result<SharedModel, ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion(self.format_version));
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("artifact declares no classes".into()));
        }
        if !self.feature_names.is_empty() && self.feature_names.len() != self.n_features {
            return Err(ModelError::Invalid(format!(
                "{} feature names for {} features",
                self.feature_names.len(),
                self.n_features
            )));
        }

        let model: SharedModel = match self.model {
            ModelSpec::DecisionTree { nodes } => {
                Arc::new(DecisionTree::new(nodes, self.n_features, self.classes)?)
            }
            ModelSpec::Linear {
                weights,
                intercepts,
            } => Arc::new(LinearClassifier::new(
                weights,
                intercepts,
                self.n_features,
                self.classes,
            )?),
        };
        Ok(model)
    }
}

/// Read, parse and validate the artifact at `path`.
///
/// Blocking; the hardened server calls it from the blocking pool.
pub fn load_model(path: &Path) -> Result<SharedModel, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact = ModelArtifact::from_json(&text)?;
    if !artifact.feature_names.is_empty() && artifact.feature_names != FEATURE_NAMES {
        tracing::warn!(
            path = %path.display(),
            feature_names = ?artifact.feature_names,
            expected = ?FEATURE_NAMES,
            "Artifact feature names differ from the request schema"
        );
    }
    let model = artifact.into_model()?;

    tracing::info!(
        path = %path.display(),
        kind = model.kind(),
        n_features = model.n_features(),
        n_classes = model.classes().len(),
        "Model artifact loaded"
    );
    Ok(model)
}
