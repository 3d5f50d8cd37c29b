//! The FAMR engine: owns the configuration and the category store, and runs
//! training and prediction on top of `ResonanceSearch`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::category::{Category, CategoryStore};
use crate::config::FamrConfig;
use crate::error::{FamrError, FamrResult};
use crate::pattern::{InputScaling, Pattern};
use crate::resonance::{ResonanceSearch, SearchOutcome};

/// Counters from one `train` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Passes made over the pattern sequence.
    pub epochs: usize,
    /// Pattern presentations (patterns × epochs).
    pub patterns_processed: usize,
    /// Categories committed during this call.
    pub categories_created: usize,
    /// Presentations absorbed by an existing category.
    pub resonances: usize,
    /// Vigilance raises caused by map-field mismatches.
    pub match_tracking_raises: usize,
    /// Category count after the call.
    pub category_count: usize,
}

/// Serializable state of a trained engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FamrSnapshot {
    pub config: FamrConfig,
    pub dimensions: Option<usize>,
    pub categories: Vec<Category>,
}

/// Fuzzy ARTMAP with Relevance factor.
///
/// Training takes `&mut self` and prediction takes `&self`, so a consistent
/// store is guaranteed to every reader. The engine holds no locks; share it
/// behind the caller's own synchronization if needed.
#[derive(Clone, Debug)]
pub struct Famr {
    config: FamrConfig,
    scaling: InputScaling,
    search: ResonanceSearch,
    store: CategoryStore,
    /// Input dimensionality, fixed by the relevance setting or the first pattern.
    dimensions: Option<usize>,
}

impl Famr {
    /// Validate `config` and build an untrained engine.
    pub fn new(config: FamrConfig) -> FamrResult<Self> {
        config.validate()?;
        Ok(Self {
            scaling: InputScaling::new(config.i_min, config.i_max),
            search: ResonanceSearch::from_config(&config),
            dimensions: config.relevance.dimensions(),
            store: CategoryStore::new(),
            config,
        })
    }

    pub fn config(&self) -> &FamrConfig {
        &self.config
    }

    /// Number of categories formed so far.
    pub fn category_count(&self) -> usize {
        self.store.len()
    }

    pub fn categories(&self) -> &[Category] {
        self.store.as_slice()
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    pub fn is_trained(&self) -> bool {
        !self.store.is_empty()
    }

    /// Map a raw input onto the unit hypercube used by the categories.
    pub fn normalize(&self, input: &[f64]) -> Vec<f64> {
        self.scaling.normalize(input)
    }

    // ── Training ────────────────────────────────────────────────────────

    /// Learn from `patterns`, in order, for the configured number of epochs.
    ///
    /// The whole batch is validated before anything is learned: a rejected
    /// call leaves the engine exactly as it was.
    pub fn train(&mut self, patterns: &[Pattern]) -> FamrResult<TrainingSummary> {
        let mut summary = TrainingSummary {
            category_count: self.store.len(),
            ..TrainingSummary::default()
        };
        let Some(first) = patterns.first() else {
            return Ok(summary);
        };

        let dimensions = self.dimensions.unwrap_or(first.dimensions());
        for (position, pattern) in patterns.iter().enumerate() {
            if let Err(e) = self.check_training_pattern(pattern, dimensions) {
                warn!(position, error = %e, "rejected training batch");
                return Err(e);
            }
        }
        let relevance = self.config.relevance.vector(dimensions)?;
        let inputs: Vec<Vec<f64>> = patterns
            .iter()
            .map(|p| self.scaling.normalize(&p.input))
            .collect();

        self.dimensions = Some(dimensions);
        for epoch in 0..self.config.epochs {
            for (pattern, input) in patterns.iter().zip(&inputs) {
                self.learn(pattern, input, &relevance, &mut summary)?;
            }
            summary.epochs += 1;
            debug!(
                epoch,
                categories = self.store.len(),
                "epoch complete"
            );
        }

        summary.category_count = self.store.len();
        info!(
            rho_a = self.config.rho_init_a,
            rho_ab = self.config.rho_ab,
            patterns = patterns.len(),
            epochs = summary.epochs,
            created = summary.categories_created,
            match_tracking = summary.match_tracking_raises,
            categories = summary.category_count,
            "training complete"
        );
        Ok(summary)
    }

    fn learn(
        &mut self,
        pattern: &Pattern,
        input: &[f64],
        relevance: &[f64],
        summary: &mut TrainingSummary,
    ) -> FamrResult<()> {
        let report = self.search.search(&self.store, input, pattern.class_index)?;
        summary.patterns_processed += 1;
        summary.match_tracking_raises += report.match_tracking_raises;

        match report.outcome {
            SearchOutcome::Resonant(candidate) => {
                if let Some(category) = self.store.get_mut(candidate.index) {
                    category.absorb(input, pattern.class_index, pattern.weight);
                }
                summary.resonances += 1;
                debug!(
                    category = candidate.index,
                    class = pattern.class_index,
                    choice = candidate.scores.choice,
                    vigilance = candidate.scores.vigilance,
                    "resonance"
                );
            }
            SearchOutcome::CreateNew => {
                let index = self.store.push(Category::new(
                    input,
                    pattern.class_index,
                    pattern.weight,
                    relevance.to_vec(),
                ));
                summary.categories_created += 1;
                debug!(
                    category = index,
                    class = pattern.class_index,
                    disqualified = report.disqualified,
                    "category created"
                );
            }
        }
        Ok(())
    }

    fn check_training_pattern(&self, pattern: &Pattern, dimensions: usize) -> FamrResult<()> {
        pattern.check_well_formed()?;
        check_dimensions(pattern, dimensions)?;
        if !(pattern.weight.is_finite() && pattern.weight >= 0.0) {
            return Err(FamrError::InvalidPattern(format!(
                "weight {} must be finite and non-negative",
                pattern.weight
            )));
        }
        if pattern.class_index >= self.config.num_classes {
            return Err(FamrError::InvalidPattern(format!(
                "class index {} out of range for {} classes",
                pattern.class_index, self.config.num_classes
            )));
        }
        Ok(())
    }

    // ── Prediction ──────────────────────────────────────────────────────

    /// Predicted class label for `pattern`; its own label is ignored.
    pub fn classify(&self, pattern: &Pattern) -> FamrResult<usize> {
        self.winner(pattern)?
            .predicted_class()
            .ok_or(FamrError::NotTrained)
    }

    /// Class probabilities estimated from the winning category's votes,
    /// one entry per configured class.
    pub fn class_distribution(&self, pattern: &Pattern) -> FamrResult<Vec<f64>> {
        let category = self.winner(pattern)?;
        let classes = self.config.num_classes;
        let total = category.vote_mass();
        if total <= 0.0 {
            return Ok(vec![1.0 / classes as f64; classes]);
        }
        let mut distribution = vec![0.0; classes];
        for vote in &category.class_votes {
            if let Some(slot) = distribution.get_mut(vote.class_index) {
                *slot += vote.mass / total;
            }
        }
        Ok(distribution)
    }

    fn winner(&self, pattern: &Pattern) -> FamrResult<&Category> {
        if !pattern.is_classification_instance {
            return Err(FamrError::UnsupportedOperation(
                "regression prediction is not implemented".into(),
            ));
        }
        if self.store.is_empty() {
            return Err(FamrError::NotTrained);
        }
        pattern.check_well_formed()?;
        if let Some(dimensions) = self.dimensions {
            check_dimensions(pattern, dimensions)?;
        }

        let input = self.scaling.normalize(&pattern.input);
        self.search
            .best_match(&self.store, &input)?
            .and_then(|c| self.store.get(c.index))
            .ok_or(FamrError::NotTrained)
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> FamrSnapshot {
        FamrSnapshot {
            config: self.config.clone(),
            dimensions: self.dimensions,
            categories: self.store.as_slice().to_vec(),
        }
    }

    /// Rebuild an engine from a snapshot, rejecting inconsistent state.
    pub fn from_snapshot(snapshot: FamrSnapshot) -> FamrResult<Self> {
        let mut engine = Self::new(snapshot.config)?;
        if let (Some(fixed), Some(stored)) = (engine.dimensions, snapshot.dimensions) {
            if fixed != stored {
                return Err(FamrError::ShapeMismatch {
                    expected: fixed,
                    got: stored,
                });
            }
        }
        engine.dimensions = snapshot.dimensions.or(engine.dimensions);

        if !snapshot.categories.is_empty() {
            let dimensions = engine.dimensions.ok_or_else(|| {
                FamrError::Persistence("snapshot has categories but no dimensionality".into())
            })?;
            for (index, category) in snapshot.categories.iter().enumerate() {
                engine
                    .check_restored_category(category, dimensions)
                    .map_err(|detail| {
                        FamrError::Persistence(format!("category {}: {}", index, detail))
                    })?;
            }
        }
        engine.store = CategoryStore::from_categories(snapshot.categories);
        Ok(engine)
    }

    /// Consume the engine, returning its snapshot.
    pub fn into_snapshot(self) -> FamrSnapshot {
        FamrSnapshot {
            config: self.config,
            dimensions: self.dimensions,
            categories: self.store.into_inner(),
        }
    }

    fn check_restored_category(&self, category: &Category, dimensions: usize) -> Result<(), String> {
        if category.dimensions() != dimensions || !category.is_consistent() {
            return Err("box or relevance shape is inconsistent".into());
        }
        let in_unit = |x: &f64| (0.0..=1.0).contains(x);
        if !category.box_low.iter().chain(&category.box_high).all(in_unit) {
            return Err("box bounds outside [0, 1]".into());
        }
        if category.relevance.iter().any(|r| !r.is_finite() || *r < 0.0)
            || category.relevance.iter().sum::<f64>() <= 0.0
        {
            return Err("invalid relevance factors".into());
        }
        if category.class_votes.is_empty() {
            return Err("no class votes".into());
        }
        for vote in &category.class_votes {
            if vote.class_index >= self.config.num_classes {
                return Err(format!("class index {} out of range", vote.class_index));
            }
            if !(vote.mass.is_finite() && vote.mass >= 0.0) {
                return Err(format!("invalid vote mass {}", vote.mass));
            }
        }
        Ok(())
    }
}

fn check_dimensions(pattern: &Pattern, dimensions: usize) -> FamrResult<()> {
    if pattern.dimensions() != dimensions {
        return Err(FamrError::ShapeMismatch {
            expected: dimensions,
            got: pattern.dimensions(),
        });
    }
    Ok(())
}
