//! Relevance-weighted fuzzy match and vigilance values.
//!
//! With complement coding `I = (a, 1 - a)` and a box `[u, v]` stored as
//! `w = (u, 1 - v)`, every fuzzy ART norm reduces to box sizes measured with
//! the category's relevance vector `r`:
//!
//! ```text
//!   |I|      = R                       R = Σ r_k
//!   |w|      = R - S_r([u, v])         S_r(B) = Σ r_k (high_k - low_k)
//!   |I ∧ w|  = R - S_r([u, v] ∪ a)
//!
//!   choice     T = |I ∧ w| / (alpha + |w|)
//!   vigilance  M = |I ∧ w| / |I|
//! ```
//!
//! Both values fall in `[0, 1]`. A dimension with low relevance adds little
//! to the enlarged size, so disagreement along it barely lowers either score.

use crate::category::Category;
use crate::error::{FamrError, FamrResult};

/// Choice and vigilance values of one category for one input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchScores {
    /// Ranking score (`fuzzy_match`).
    pub choice: f64,
    /// Resonance test value (`vigilance_value`).
    pub vigilance: f64,
}

/// Stateless match computations; never mutates a category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchEngine {
    alpha: f64,
}

impl MatchEngine {
    /// `alpha` is the choice parameter; it must be positive.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Ranking score of `category` for the normalized `input`.
    pub fn fuzzy_match(&self, input: &[f64], category: &Category) -> FamrResult<f64> {
        self.scores(input, category).map(|s| s.choice)
    }

    /// Share of the input's extent still covered once the box is enlarged
    /// to include `input`.
    pub fn vigilance_value(&self, input: &[f64], category: &Category) -> FamrResult<f64> {
        self.scores(input, category).map(|s| s.vigilance)
    }

    /// Compute both values in one pass over the dimensions.
    pub fn scores(&self, input: &[f64], category: &Category) -> FamrResult<MatchScores> {
        check_shape(input, category)?;

        let mut total = 0.0;
        let mut box_size = 0.0;
        let mut enlarged = 0.0;
        for (k, &x) in input.iter().enumerate() {
            let r = category.relevance[k];
            let lo = category.box_low[k];
            let hi = category.box_high[k];
            total += r;
            box_size += r * (hi - lo);
            enlarged += r * (hi.max(x) - lo.min(x));
        }

        if total <= 0.0 {
            return Ok(MatchScores {
                choice: 0.0,
                vigilance: 0.0,
            });
        }

        let intersection = (total - enlarged).max(0.0);
        let choice = (intersection / (self.alpha + total - box_size)).clamp(0.0, 1.0);
        let vigilance = (intersection / total).clamp(0.0, 1.0);
        Ok(MatchScores { choice, vigilance })
    }
}

fn check_shape(input: &[f64], category: &Category) -> FamrResult<()> {
    if input.len() != category.dimensions() {
        return Err(FamrError::ShapeMismatch {
            expected: category.dimensions(),
            got: input.len(),
        });
    }
    if !category.is_consistent() {
        return Err(FamrError::InvalidPattern(
            "category box and relevance dimensions disagree".into(),
        ));
    }
    Ok(())
}
