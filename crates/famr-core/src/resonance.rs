//! Vigilance-gated resonance search with map-field match tracking.
//!
//! ```text
//!   input ──► rank categories by choice (desc, ties → earliest)
//!               │
//!               ▼
//!         ┌── candidate ──┐
//!         │ vigilance < ρ │──► disqualify, next
//!         │ class share   │
//!         │   < ρ_ab      │──► ρ = vigilance + ε, disqualify, next
//!         └──────┬────────┘
//!                ▼
//!            resonant            (no candidate left → create new)
//! ```

use std::cmp::Ordering;

use tracing::debug;

use crate::category::CategoryStore;
use crate::config::FamrConfig;
use crate::error::FamrResult;
use crate::matching::{MatchEngine, MatchScores};

/// A scored category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Position of the category in the store.
    pub index: usize,
    pub scores: MatchScores,
}

/// Where a pattern should go.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchOutcome {
    /// An existing category passed both vigilance tests.
    Resonant(Candidate),
    /// No category can absorb the pattern.
    CreateNew,
}

/// Result of one search with its diagnostic counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Candidates rejected for this pattern.
    pub disqualified: usize,
    /// Times the vigilance was raised after a map-field mismatch.
    pub match_tracking_raises: usize,
    /// Vigilance in force when the search ended.
    pub final_vigilance: f64,
}

/// Thresholds that drive a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    /// Vigilance every search starts from.
    pub baseline_vigilance: f64,
    /// Minimum class share required by the map field.
    pub rho_ab: f64,
    /// Increment above the failing vigilance value on a mismatch.
    pub match_tracking_epsilon: f64,
}

impl From<&FamrConfig> for SearchParams {
    fn from(config: &FamrConfig) -> Self {
        Self {
            baseline_vigilance: config.rho_init_a,
            rho_ab: config.rho_ab,
            match_tracking_epsilon: config.match_tracking_epsilon,
        }
    }
}

/// Finds the category that should absorb a pattern.
#[derive(Clone, Copy, Debug)]
pub struct ResonanceSearch {
    matcher: MatchEngine,
    params: SearchParams,
}

impl ResonanceSearch {
    pub fn new(matcher: MatchEngine, params: SearchParams) -> Self {
        Self { matcher, params }
    }

    pub fn from_config(config: &FamrConfig) -> Self {
        Self::new(MatchEngine::new(config.choice_alpha), SearchParams::from(config))
    }

    pub fn matcher(&self) -> &MatchEngine {
        &self.matcher
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Score every category and order by descending choice value.
    ///
    /// The sort is stable, so equal scores keep creation order.
    pub fn rank(&self, store: &CategoryStore, input: &[f64]) -> FamrResult<Vec<Candidate>> {
        let mut candidates = store
            .iter()
            .enumerate()
            .map(|(index, category)| {
                self.matcher
                    .scores(input, category)
                    .map(|scores| Candidate { index, scores })
            })
            .collect::<FamrResult<Vec<_>>>()?;
        candidates.sort_by(|a, b| {
            b.scores
                .choice
                .partial_cmp(&a.scores.choice)
                .unwrap_or(Ordering::Equal)
        });
        Ok(candidates)
    }

    /// Supervised search for a pattern of class `class_index`.
    pub fn search(
        &self,
        store: &CategoryStore,
        input: &[f64],
        class_index: usize,
    ) -> FamrResult<SearchReport> {
        let mut vigilance = self.params.baseline_vigilance;
        let mut disqualified = 0;
        let mut raises = 0;

        for candidate in self.rank(store, input)? {
            if candidate.scores.vigilance < vigilance {
                disqualified += 1;
                continue;
            }

            let Some(category) = store.get(candidate.index) else {
                continue;
            };
            let map_field_ok = category
                .class_share(class_index)
                .map_or(true, |share| share >= self.params.rho_ab);
            if map_field_ok {
                return Ok(SearchReport {
                    outcome: SearchOutcome::Resonant(candidate),
                    disqualified,
                    match_tracking_raises: raises,
                    final_vigilance: vigilance,
                });
            }

            disqualified += 1;
            raises += 1;
            vigilance = vigilance.max(candidate.scores.vigilance + self.params.match_tracking_epsilon);
            debug!(
                category = candidate.index,
                class = class_index,
                vigilance,
                "map-field mismatch, vigilance raised"
            );
        }

        Ok(SearchReport {
            outcome: SearchOutcome::CreateNew,
            disqualified,
            match_tracking_raises: raises,
            final_vigilance: vigilance,
        })
    }

    /// Unsupervised best match: highest choice value, ties → earliest.
    pub fn best_match(
        &self,
        store: &CategoryStore,
        input: &[f64],
    ) -> FamrResult<Option<Candidate>> {
        let mut best: Option<Candidate> = None;
        for (index, category) in store.iter().enumerate() {
            let scores = self.matcher.scores(input, category)?;
            match best {
                Some(b) if b.scores.choice >= scores.choice => {}
                _ => best = Some(Candidate { index, scores }),
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;

    fn search(rho: f64, rho_ab: f64) -> ResonanceSearch {
        ResonanceSearch::new(
            MatchEngine::new(0.001),
            SearchParams {
                baseline_vigilance: rho,
                rho_ab,
                match_tracking_epsilon: 1e-6,
            },
        )
    }

    fn store_of(points: &[(&[f64], usize)]) -> CategoryStore {
        let mut store = CategoryStore::new();
        for (input, class) in points {
            store.push(Category::new(input, *class, 1.0, vec![1.0; input.len()]));
        }
        store
    }

    #[test]
    fn empty_store_always_creates() {
        let report = search(0.0, 0.0)
            .search(&CategoryStore::new(), &[0.5], 0)
            .unwrap();
        assert_eq!(report.outcome, SearchOutcome::CreateNew);
        assert_eq!(report.disqualified, 0);
    }

    #[test]
    fn ranking_is_descending_with_stable_ties() {
        let store = store_of(&[(&[0.9], 0), (&[0.4], 0), (&[0.6], 1)]);
        let ranked = search(0.0, 0.0).rank(&store, &[0.5]).unwrap();
        let order: Vec<_> = ranked.iter().map(|c| c.index).collect();
        // 0.4 and 0.6 are equally close; the earlier one ranks first.
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn first_candidate_passing_vigilance_resonates() {
        let store = store_of(&[(&[0.1, 0.1], 0), (&[0.9, 0.9], 1)]);
        let report = search(0.8, 0.0).search(&store, &[0.85, 0.85], 1).unwrap();
        match report.outcome {
            SearchOutcome::Resonant(c) => assert_eq!(c.index, 1),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn failing_vigilance_everywhere_creates() {
        let store = store_of(&[(&[0.1, 0.1], 0), (&[0.9, 0.9], 1)]);
        let report = search(0.95, 0.0).search(&store, &[0.5, 0.5], 0).unwrap();
        assert_eq!(report.outcome, SearchOutcome::CreateNew);
        assert_eq!(report.disqualified, 2);
        assert_eq!(report.match_tracking_raises, 0);
    }

    #[test]
    fn map_field_mismatch_raises_vigilance_and_continues() {
        // Both categories pass the baseline vigilance; the closer one carries
        // the wrong label.
        let store = store_of(&[(&[0.50], 1), (&[0.56], 0)]);
        let report = search(0.5, 0.6).search(&store, &[0.52], 0).unwrap();
        assert_eq!(report.match_tracking_raises, 1);
        // Raised vigilance (0.98 + ε) rules out the farther category too.
        assert_eq!(report.outcome, SearchOutcome::CreateNew);
        assert!(report.final_vigilance > 0.98);
    }

    #[test]
    fn zero_rho_ab_never_triggers_match_tracking() {
        let store = store_of(&[(&[0.50], 1)]);
        let report = search(0.5, 0.0).search(&store, &[0.52], 0).unwrap();
        assert!(matches!(report.outcome, SearchOutcome::Resonant(_)));
        assert_eq!(report.match_tracking_raises, 0);
    }

    #[test]
    fn mismatch_can_fall_through_to_a_matching_category() {
        // A wide class-1 box wins the choice ranking but has low vigilance;
        // the class-0 point behind it survives the raised vigilance.
        let mut store = CategoryStore::new();
        let mut wide = Category::new(&[0.3], 1, 1.0, vec![1.0]);
        wide.box_high = vec![0.7];
        store.push(wide);
        store.push(Category::new(&[0.6], 0, 1.0, vec![1.0]));

        let report = search(0.5, 0.5).search(&store, &[0.5], 0).unwrap();
        assert_eq!(report.match_tracking_raises, 1);
        match report.outcome {
            SearchOutcome::Resonant(c) => assert_eq!(c.index, 1),
            other => panic!("unexpected outcome {:?}", other),
        }

        let report = search(0.5, 0.5).search(&store, &[0.5], 1).unwrap();
        match report.outcome {
            SearchOutcome::Resonant(c) => assert_eq!(c.index, 0),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn best_match_prefers_earliest_on_ties() {
        let store = store_of(&[(&[0.4], 0), (&[0.6], 1)]);
        let best = search(1.0, 0.0).best_match(&store, &[0.5]).unwrap().unwrap();
        assert_eq!(best.index, 0);
        assert!(search(1.0, 0.0)
            .best_match(&CategoryStore::new(), &[0.5])
            .unwrap()
            .is_none());
    }
}
