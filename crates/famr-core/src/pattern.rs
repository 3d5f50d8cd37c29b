//! Training/query examples and input scaling.

use serde::{Deserialize, Serialize};

use crate::error::{FamrError, FamrResult};

/// One training or query example.
///
/// Patterns are borrowed by the engine and never modified by it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Raw attribute values, in the configured `[i_min, i_max]` range.
    pub input: Vec<f64>,
    /// Nominal class label.
    pub class_index: usize,
    /// `false` marks a regression example, which the engine does not support.
    pub is_classification_instance: bool,
    /// Sample relevance: vote mass contributed and scale of the learning step.
    pub weight: f64,
}

impl Pattern {
    /// A labeled classification example with unit weight.
    pub fn new(input: Vec<f64>, class_index: usize) -> Self {
        Self {
            input,
            class_index,
            is_classification_instance: true,
            weight: 1.0,
        }
    }

    /// A query whose label is unknown.
    pub fn query(input: Vec<f64>) -> Self {
        Self::new(input, 0)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Number of input dimensions.
    pub fn dimensions(&self) -> usize {
        self.input.len()
    }

    /// Check the pieces of the pattern that do not depend on engine state.
    pub(crate) fn check_well_formed(&self) -> FamrResult<()> {
        if !self.is_classification_instance {
            return Err(FamrError::UnsupportedOperation(
                "regression patterns are not supported".into(),
            ));
        }
        if self.input.is_empty() {
            return Err(FamrError::InvalidPattern("input is empty".into()));
        }
        if let Some(k) = self.input.iter().position(|x| !x.is_finite()) {
            return Err(FamrError::InvalidPattern(format!(
                "input[{}] is not a finite number",
                k
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "input={:?} class={} weight={}",
            self.input, self.class_index, self.weight
        )
    }
}

// ── Input Scaling ───────────────────────────────────────────────────────

/// Maps raw inputs from `[i_min, i_max]` onto the unit hypercube.
///
/// Values outside the range are clamped to the nearest face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputScaling {
    i_min: f64,
    span: f64,
}

impl InputScaling {
    /// Caller guarantees `i_min < i_max`; `FamrConfig::validate` enforces it.
    pub fn new(i_min: f64, i_max: f64) -> Self {
        Self {
            i_min,
            span: i_max - i_min,
        }
    }

    pub fn normalize_value(&self, x: f64) -> f64 {
        ((x - self.i_min) / self.span).clamp(0.0, 1.0)
    }

    pub fn normalize(&self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.normalize_value(x)).collect()
    }
}
