//! Learned categories: fuzzy min-max boxes carrying class votes.
//!
//! A category's box lives in the normalized unit hypercube and only ever
//! grows; its vote mass only ever increases. Categories are never removed,
//! and their position in the store is their creation order, which breaks
//! ties during search and prediction.

use serde::{Deserialize, Serialize};

/// Accumulated vote mass for one class label inside a category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassVote {
    pub class_index: usize,
    pub mass: f64,
}

// ── Category ────────────────────────────────────────────────────────────

/// A fuzzy hyper-rectangle in input space with its map-field votes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Per-dimension lower bounds.
    pub box_low: Vec<f64>,
    /// Per-dimension upper bounds; `box_low[k] <= box_high[k]`.
    pub box_high: Vec<f64>,
    /// Votes in first-observed label order.
    pub class_votes: Vec<ClassVote>,
    /// Per-dimension weighting of the match function.
    pub relevance: Vec<f64>,
    /// Patterns committed to this category (including zero-weight ones).
    pub pattern_count: u64,
}

impl Category {
    /// Commit a new point category at `input`.
    pub fn new(input: &[f64], class_index: usize, weight: f64, relevance: Vec<f64>) -> Self {
        Self {
            box_low: input.to_vec(),
            box_high: input.to_vec(),
            class_votes: vec![ClassVote {
                class_index,
                mass: weight,
            }],
            relevance,
            pattern_count: 1,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.box_low.len()
    }

    /// Whether the box and relevance vectors agree on dimensionality and the
    /// box bounds are ordered.
    pub fn is_consistent(&self) -> bool {
        self.box_high.len() == self.box_low.len()
            && self.relevance.len() == self.box_low.len()
            && self
                .box_low
                .iter()
                .zip(&self.box_high)
                .all(|(lo, hi)| lo <= hi)
    }

    /// Whether `input` lies inside the box (bounds inclusive).
    pub fn contains(&self, input: &[f64]) -> bool {
        input.len() == self.dimensions()
            && input
                .iter()
                .zip(self.box_low.iter().zip(&self.box_high))
                .all(|(x, (lo, hi))| lo <= x && x <= hi)
    }

    /// Total vote mass over every class.
    pub fn vote_mass(&self) -> f64 {
        self.class_votes.iter().map(|v| v.mass).sum()
    }

    /// Vote mass held by `class_index`.
    pub fn votes_for(&self, class_index: usize) -> f64 {
        self.class_votes
            .iter()
            .find(|v| v.class_index == class_index)
            .map(|v| v.mass)
            .unwrap_or(0.0)
    }

    /// Share of the vote mass held by `class_index`, or `None` when the
    /// category carries no mass at all.
    pub fn class_share(&self, class_index: usize) -> Option<f64> {
        let total = self.vote_mass();
        if total > 0.0 {
            Some(self.votes_for(class_index) / total)
        } else {
            None
        }
    }

    /// Majority-vote class; ties go to the label observed first.
    pub fn predicted_class(&self) -> Option<usize> {
        let mut best: Option<&ClassVote> = None;
        for vote in &self.class_votes {
            match best {
                Some(b) if b.mass >= vote.mass => {}
                _ => best = Some(vote),
            }
        }
        best.map(|v| v.class_index)
    }

    pub(crate) fn add_vote(&mut self, class_index: usize, weight: f64) {
        match self
            .class_votes
            .iter_mut()
            .find(|v| v.class_index == class_index)
        {
            Some(vote) => vote.mass += weight,
            None => self.class_votes.push(ClassVote {
                class_index,
                mass: weight,
            }),
        }
    }

    /// Move the box toward `input` by `step` in `[0, 1]`.
    ///
    /// A step of 1 sets the box to the pointwise min/max of box and input;
    /// a step of 0 leaves it untouched. Bounds only move outward.
    pub(crate) fn expand_toward(&mut self, input: &[f64], step: f64) {
        for ((lo, hi), &x) in self
            .box_low
            .iter_mut()
            .zip(self.box_high.iter_mut())
            .zip(input)
        {
            if x < *lo {
                *lo -= step * (*lo - x);
            }
            if x > *hi {
                *hi += step * (x - *hi);
            }
        }
    }

    /// Absorb a resonant pattern. The step is the pattern weight clamped to
    /// `[0, 1]`: unit weight is a full min/max expansion, zero only counts.
    pub(crate) fn absorb(&mut self, input: &[f64], class_index: usize, weight: f64) {
        self.expand_toward(input, weight.clamp(0.0, 1.0));
        self.add_vote(class_index, weight);
        self.pattern_count += 1;
    }
}

// ── Category Store ──────────────────────────────────────────────────────

/// Categories in creation order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStore {
    categories: Vec<Category>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Category> {
        self.categories.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    /// Append a category and return its index.
    pub(crate) fn push(&mut self, category: Category) -> usize {
        self.categories.push(category);
        self.categories.len() - 1
    }

    pub(crate) fn into_inner(self) -> Vec<Category> {
        self.categories
    }

    pub(crate) fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

impl<'a> IntoIterator for &'a CategoryStore {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.categories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(input: &[f64], class_index: usize) -> Category {
        Category::new(input, class_index, 1.0, vec![1.0; input.len()])
    }

    #[test]
    fn new_category_is_a_point_box() {
        let c = point(&[0.2, 0.7], 3);
        assert_eq!(c.box_low, vec![0.2, 0.7]);
        assert_eq!(c.box_high, vec![0.2, 0.7]);
        assert_eq!(c.predicted_class(), Some(3));
        assert_eq!(c.pattern_count, 1);
        assert!(c.is_consistent());
        assert!(c.contains(&[0.2, 0.7]));
    }

    #[test]
    fn fast_absorb_takes_pointwise_min_max() {
        let mut c = point(&[0.5, 0.5], 0);
        c.absorb(&[0.2, 0.9], 0, 1.0);
        assert_eq!(c.box_low, vec![0.2, 0.5]);
        assert_eq!(c.box_high, vec![0.5, 0.9]);
        assert_eq!(c.votes_for(0), 2.0);
        assert_eq!(c.pattern_count, 2);
    }

    #[test]
    fn absorbing_an_inside_point_keeps_the_box() {
        let mut c = point(&[0.2, 0.2], 0);
        c.absorb(&[0.8, 0.8], 0, 1.0);
        let before = c.clone();
        c.absorb(&[0.5, 0.5], 1, 1.0);
        assert_eq!(c.box_low, before.box_low);
        assert_eq!(c.box_high, before.box_high);
        assert_eq!(c.votes_for(1), 1.0);
    }

    #[test]
    fn fractional_weight_moves_bounds_part_way() {
        let mut c = point(&[0.5], 0);
        c.absorb(&[0.1], 0, 0.5);
        assert!((c.box_low[0] - 0.3).abs() < 1e-12);
        assert_eq!(c.box_high, vec![0.5]);
        assert_eq!(c.votes_for(0), 1.5);
    }

    #[test]
    fn heavy_weight_expands_no_further_than_the_input() {
        let mut c = point(&[0.5], 0);
        c.absorb(&[0.9], 0, 3.0);
        assert_eq!(c.box_high, vec![0.9]);
        assert_eq!(c.votes_for(0), 4.0);
    }

    #[test]
    fn zero_weight_counts_without_moving() {
        let mut c = point(&[0.5], 0);
        c.absorb(&[0.9], 1, 0.0);
        assert_eq!(c.box_high, vec![0.5]);
        assert_eq!(c.pattern_count, 2);
        assert_eq!(c.votes_for(1), 0.0);
        assert_eq!(c.class_votes.len(), 2);
    }

    #[test]
    fn majority_vote_ties_go_to_first_observed() {
        let mut c = point(&[0.5], 4);
        c.add_vote(1, 1.0);
        assert_eq!(c.predicted_class(), Some(4));
        c.add_vote(1, 0.5);
        assert_eq!(c.predicted_class(), Some(1));
    }

    #[test]
    fn class_share_handles_empty_mass() {
        let c = Category::new(&[0.5], 0, 0.0, vec![1.0]);
        assert_eq!(c.class_share(0), None);

        let mut c = point(&[0.5], 0);
        c.add_vote(1, 3.0);
        assert_eq!(c.class_share(0), Some(0.25));
        assert_eq!(c.class_share(7), Some(0.0));
    }

    #[test]
    fn store_preserves_creation_order() {
        let mut store = CategoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.push(point(&[0.1], 0)), 0);
        assert_eq!(store.push(point(&[0.9], 1)), 1);
        assert_eq!(store.len(), 2);
        let classes: Vec<_> = store.iter().filter_map(|c| c.predicted_class()).collect();
        assert_eq!(classes, vec![0, 1]);
        assert_eq!(store.get(1).unwrap().box_low, vec![0.9]);
        assert!(store.get(2).is_none());
    }
}
