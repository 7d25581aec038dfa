//! Classification model subsystem.
//!
//! # Data Flow
//! ```text
//! model.json
//!     → artifact.rs (parse, validate, pick implementation)
//!     → SharedModel (Arc<dyn Classifier>, read-only)
//!     → handlers: IrisFeatures → 1×4 matrix → predict → Label
//! ```
//!
//! # Design Decisions
//! - Loaded once, never mutated; shared without locks
//! - One label per input row; handlers take the first
//! - Ties resolve to the lowest class index

pub mod artifact;
pub mod features;
pub mod label;
pub mod linear;
pub mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use ndarray::Array2;

pub use artifact::{load_model, ModelArtifact};
pub use features::{IrisFeatures, FEATURE_NAMES, N_FEATURES};
pub use label::Label;

/// Errors raised while loading a model or running inference.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported model artifact format version {0}")]
    UnsupportedVersion(u32),

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("model expects {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("model is not loaded")]
    NotLoaded,

    #[error("model produced no prediction")]
    Empty,
}

/// A fitted classifier.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    /// Short identifier of the model family, for logs.
    fn kind(&self) -> &'static str;

    fn n_features(&self) -> usize;

    /// Known label set, in class-index order.
    fn classes(&self) -> &[Label];

    /// Predict one label per row of `features`.
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<Label>, ModelError>;
}

pub type SharedModel = Arc<dyn Classifier>;

pub(crate) fn check_width(features: &Array2<f64>, expected: usize) -> Result<(), ModelError> {
    if features.ncols() != expected {
        return Err(ModelError::FeatureMismatch {
            expected,
            actual: features.ncols(),
        });
    }
    Ok(())
}

/// Index of the largest value; the first one on ties. `None` when empty.
pub(crate) fn argmax(values: impl Iterator<Item = f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, v) in values.enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Predict a single sample and return its label.
pub fn predict_one(model: &dyn Classifier, features: &IrisFeatures) -> Result<Label, ModelError> {
    model
        .predict(&features.to_matrix())?
        .into_iter()
        .next()
        .ok_or(ModelError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_wins() {
        assert_eq!(argmax([1.0, 3.0, 3.0, 2.0].into_iter()), Some(1));
        assert_eq!(argmax(std::iter::empty()), None);
    }
}
