//! One-vs-rest linear classifier (`argmax(W·x + b)`).

use ndarray::{Array1, Array2};

use super::{argmax, check_width, Classifier, Label, ModelError};

#[derive(Debug)]
pub struct LinearClassifier {
    /// `n_classes × n_features`
    weights: Array2<f64>,
    intercepts: Array1<f64>,
    classes: Vec<Label>,
}

impl LinearClassifier {
    pub fn new(
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        n_features: usize,
        classes: Vec<Label>,
    ) -> Result<Self, ModelError> {
        if weights.len() != classes.len() {
            return Err(ModelError::Invalid(format!(
                "linear model has {} weight rows for {} classes",
                weights.len(),
                classes.len()
            )));
        }
        if intercepts.len() != classes.len() {
            return Err(ModelError::Invalid(format!(
                "linear model has {} intercepts for {} classes",
                intercepts.len(),
                classes.len()
            )));
        }
        if let Some(row) = weights.iter().position(|w| w.len() != n_features) {
            return Err(ModelError::Invalid(format!(
                "weight row {row} does not have {n_features} entries"
            )));
        }

        let flat: Vec<f64> = weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((classes.len(), n_features), flat)
            .map_err(|e| ModelError::Invalid(e.to_string()))?;

        Ok(Self {
            weights,
            intercepts: Array1::from(intercepts),
            classes,
        })
    }
}

impl Classifier for LinearClassifier {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Vec<Label>, ModelError> {
        check_width(features, self.n_features())?;

        let scores = features.dot(&self.weights.t()) + &self.intercepts;
        scores
            .rows()
            .into_iter()
            .map(|row| {
                argmax(row.iter().copied())
                    .map(|idx| self.classes[idx].clone())
                    .ok_or(ModelError::Empty)
            })
            .collect()
    }
}
