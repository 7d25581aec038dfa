//! Feature vector assembly.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Column order of the feature matrix.
pub const FEATURE_NAMES: [&str; 4] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Number of input features the service accepts.
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// The four Iris measurements. Any finite or non-finite float is accepted;
/// the model decides what to make of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrisFeatures {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl IrisFeatures {
    /// Measurements in column order.
    pub fn as_row(&self) -> [f64; N_FEATURES] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    /// Single-row `1 × 4` matrix for [`Classifier::predict`](super::Classifier::predict).
    pub fn to_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((1, N_FEATURES), |(_, col)| self.as_row()[col])
    }
}
