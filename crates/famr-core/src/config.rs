//! Engine hyperparameters.
//!
//! All values are fixed when the engine is constructed; `FamrConfig::validate`
//! rejects anything the search or update rules cannot work with.

use serde::{Deserialize, Serialize};

use crate::error::{FamrError, FamrResult};

/// Default lower bound of the raw input range.
pub const DEFAULT_I_MIN: f64 = 0.1;

/// Default upper bound of the raw input range.
pub const DEFAULT_I_MAX: f64 = 7.9;

/// Default baseline vigilance of the input module.
pub const DEFAULT_RHO_INIT_A: f64 = 0.8;

/// Learning rate. Only fast learning is supported, so this is the only
/// accepted value.
pub const DEFAULT_BETA_A: f64 = 1.0;

/// Default map-field vigilance. Zero disables match tracking.
pub const DEFAULT_RHO_AB: f64 = 0.0;

/// Default number of passes over the training sequence.
pub const DEFAULT_EPOCHS: usize = 1;

/// Default choice parameter of the match function.
pub const DEFAULT_CHOICE_ALPHA: f64 = 0.001;

/// Default vigilance increment applied by match tracking.
pub const DEFAULT_MATCH_TRACKING_EPSILON: f64 = 1e-6;

// ── Relevance ───────────────────────────────────────────────────────────

/// Initial per-dimension relevance assigned to every new category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceInit {
    /// The same factor on every input dimension.
    Uniform(f64),
    /// One factor per input dimension; length must equal the input dimensionality.
    PerDimension(Vec<f64>),
}

impl Default for RelevanceInit {
    fn default() -> Self {
        Self::Uniform(1.0)
    }
}

impl RelevanceInit {
    /// Materialize the relevance vector for `dimensions` inputs.
    pub fn vector(&self, dimensions: usize) -> FamrResult<Vec<f64>> {
        match self {
            Self::Uniform(r) => Ok(vec![*r; dimensions]),
            Self::PerDimension(values) => {
                if values.len() != dimensions {
                    return Err(FamrError::ShapeMismatch {
                        expected: values.len(),
                        got: dimensions,
                    });
                }
                Ok(values.clone())
            }
        }
    }

    /// Dimensionality fixed by this relevance setting, if any.
    pub fn dimensions(&self) -> Option<usize> {
        match self {
            Self::Uniform(_) => None,
            Self::PerDimension(values) => Some(values.len()),
        }
    }

    fn validate(&self) -> FamrResult<()> {
        let values: &[f64] = match self {
            Self::Uniform(r) => std::slice::from_ref(r),
            Self::PerDimension(values) => values,
        };
        if values.is_empty() {
            return Err(FamrError::config("relevance", "must not be empty"));
        }
        if values.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(FamrError::config(
                "relevance",
                "factors must be finite and non-negative",
            ));
        }
        if values.iter().sum::<f64>() <= 0.0 {
            return Err(FamrError::config(
                "relevance",
                "at least one factor must be positive",
            ));
        }
        Ok(())
    }
}

// ── Engine Configuration ────────────────────────────────────────────────

/// FAMR hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamrConfig {
    /// Lower bound of the raw input range.
    pub i_min: f64,
    /// Upper bound of the raw input range.
    pub i_max: f64,
    /// Baseline vigilance, reset for every pattern.
    pub rho_init_a: f64,
    /// Learning rate. Must be 1.0 (fast learning): absorbed patterns expand
    /// the box to the pointwise min/max.
    pub beta_a: f64,
    /// Map-field vigilance: minimum share of a category's vote mass the
    /// pattern's class must hold for the category to absorb it.
    pub rho_ab: f64,
    /// Passes over the training sequence per `train` call.
    pub epochs: usize,
    /// Number of class labels; class indices must be below this.
    pub num_classes: usize,
    /// Choice parameter in the match function denominator.
    pub choice_alpha: f64,
    /// Amount added above the failing vigilance value on a map-field mismatch.
    pub match_tracking_epsilon: f64,
    /// Relevance factors given to newly created categories.
    pub relevance: RelevanceInit,
}

impl Default for FamrConfig {
    fn default() -> Self {
        Self {
            i_min: DEFAULT_I_MIN,
            i_max: DEFAULT_I_MAX,
            rho_init_a: DEFAULT_RHO_INIT_A,
            beta_a: DEFAULT_BETA_A,
            rho_ab: DEFAULT_RHO_AB,
            epochs: DEFAULT_EPOCHS,
            num_classes: 2,
            choice_alpha: DEFAULT_CHOICE_ALPHA,
            match_tracking_epsilon: DEFAULT_MATCH_TRACKING_EPSILON,
            relevance: RelevanceInit::default(),
        }
    }
}

impl FamrConfig {
    /// Configuration with default hyperparameters for `num_classes` labels.
    pub fn for_classes(num_classes: usize) -> Self {
        Self {
            num_classes,
            ..Self::default()
        }
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> FamrResult<()> {
        if !self.i_min.is_finite() || !self.i_max.is_finite() {
            return Err(FamrError::config("i_min/i_max", "must be finite"));
        }
        if self.i_min >= self.i_max {
            return Err(FamrError::config(
                "i_min/i_max",
                format!("i_min ({}) must be below i_max ({})", self.i_min, self.i_max),
            ));
        }
        if !(self.i_max - self.i_min).is_finite() {
            return Err(FamrError::config(
                "i_min/i_max",
                "range width overflows; inputs cannot be normalized",
            ));
        }
        check_unit_interval("rho_init_a", self.rho_init_a)?;
        check_unit_interval("rho_ab", self.rho_ab)?;
        if self.beta_a != DEFAULT_BETA_A {
            return Err(FamrError::config(
                "beta_a",
                format!("{} unsupported; only fast learning (1) is available", self.beta_a),
            ));
        }
        if self.epochs < 1 {
            return Err(FamrError::config("epochs", "must be at least 1"));
        }
        if self.num_classes < 1 {
            return Err(FamrError::config("num_classes", "must be at least 1"));
        }
        if !(self.choice_alpha.is_finite() && self.choice_alpha > 0.0) {
            return Err(FamrError::config("choice_alpha", "must be positive"));
        }
        if !(self.match_tracking_epsilon.is_finite() && self.match_tracking_epsilon > 0.0) {
            return Err(FamrError::config(
                "match_tracking_epsilon",
                "must be positive",
            ));
        }
        self.relevance.validate()
    }
}

fn check_unit_interval(field: &str, value: f64) -> FamrResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FamrError::config(
            field,
            format!("{} must be within [0, 1]", value),
        ))
    }
}
