//! Property tests: learning is deterministic, categories only grow, and
//! prediction never changes engine state.

use famr_core::{Famr, FamrConfig, Pattern};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const DIMS: usize = 3;
const CLASSES: usize = 3;

fn config(rho_init_a: f64, rho_ab: f64, epochs: usize) -> FamrConfig {
    FamrConfig {
        i_min: 0.0,
        i_max: 10.0,
        rho_init_a,
        rho_ab,
        epochs,
        num_classes: CLASSES,
        ..FamrConfig::default()
    }
}

/// Generate a labeled pattern inside (and slightly outside) the input range.
fn arb_pattern() -> impl Strategy<Value = Pattern> {
    (
        prop::collection::vec(-1.0f64..11.0, DIMS),
        0usize..CLASSES,
        prop_oneof![Just(1.0), 0.0f64..3.0],
    )
        .prop_map(|(input, class, weight)| Pattern::new(input, class).with_weight(weight))
}

fn arb_patterns(min: usize, max: usize) -> impl Strategy<Value = Vec<Pattern>> {
    prop::collection::vec(arb_pattern(), min..max)
}

fn arb_config() -> impl Strategy<Value = FamrConfig> {
    (0.0f64..=1.0, prop_oneof![Just(0.0), 0.0f64..=1.0], 1usize..3)
        .prop_map(|(rho, rho_ab, epochs)| config(rho, rho_ab, epochs))
}

/// Gaussian-ish blobs around fixed class centers, generated from a seed.
fn clustered(seed: u64, per_class: usize) -> Vec<Pattern> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers = [[2.0, 2.0, 2.0], [8.0, 2.0, 5.0], [5.0, 8.0, 8.0]];
    let mut patterns = Vec::new();
    for _ in 0..per_class {
        for (class, center) in centers.iter().enumerate() {
            let input = center
                .iter()
                .map(|c| c + rng.gen_range(-0.3..0.3))
                .collect();
            patterns.push(Pattern::new(input, class));
        }
    }
    patterns
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn training_is_deterministic(config in arb_config(), patterns in arb_patterns(1, 40)) {
        let mut a = Famr::new(config.clone()).unwrap();
        let mut b = Famr::new(config).unwrap();
        a.train(&patterns).unwrap();
        b.train(&patterns).unwrap();

        prop_assert_eq!(a.snapshot(), b.snapshot());
        for p in &patterns {
            prop_assert_eq!(a.classify(p).unwrap(), b.classify(p).unwrap());
        }
    }

    #[test]
    fn categories_and_boxes_only_grow(
        config in arb_config(),
        first in arb_patterns(1, 20),
        second in arb_patterns(0, 20),
    ) {
        let mut famr = Famr::new(config).unwrap();
        famr.train(&first).unwrap();
        let before = famr.categories().to_vec();

        famr.train(&second).unwrap();
        prop_assert!(famr.category_count() >= before.len());

        for (old, new) in before.iter().zip(famr.categories()) {
            for k in 0..DIMS {
                prop_assert!(new.box_low[k] <= old.box_low[k]);
                prop_assert!(new.box_high[k] >= old.box_high[k]);
                prop_assert!(new.box_low[k] <= new.box_high[k]);
            }
            prop_assert!(new.vote_mass() >= old.vote_mass());
            prop_assert!(new.pattern_count >= old.pattern_count);
        }
    }

    #[test]
    fn classification_is_idempotent(patterns in arb_patterns(1, 30), query in arb_pattern()) {
        let mut famr = Famr::new(config(0.7, 0.0, 1)).unwrap();
        famr.train(&patterns).unwrap();
        let before = famr.snapshot();

        let first = famr.classify(&query).unwrap();
        let second = famr.classify(&query).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(famr.snapshot(), before);
    }

    #[test]
    fn distribution_is_a_probability_vector(patterns in arb_patterns(1, 30), query in arb_pattern()) {
        let mut famr = Famr::new(config(0.6, 0.0, 1)).unwrap();
        famr.train(&patterns).unwrap();

        let dist = famr.class_distribution(&query).unwrap();
        prop_assert_eq!(dist.len(), CLASSES);
        prop_assert!(dist.iter().all(|p| (0.0..=1.0).contains(p)));
        prop_assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn single_pattern_bootstraps_one_point_category(pattern in arb_pattern(), config in arb_config()) {
        let mut famr = Famr::new(config).unwrap();
        famr.train(std::slice::from_ref(&pattern)).unwrap();

        prop_assert_eq!(famr.category_count(), 1);
        let category = &famr.categories()[0];
        let normalized = famr.normalize(&pattern.input);
        prop_assert_eq!(&category.box_low, &normalized);
        prop_assert_eq!(&category.box_high, &normalized);
    }

    #[test]
    fn repeated_pattern_resonates_at_full_vigilance(pattern in arb_pattern()) {
        let mut famr = Famr::new(config(1.0, 0.0, 1)).unwrap();
        famr.train(std::slice::from_ref(&pattern)).unwrap();
        famr.train(std::slice::from_ref(&pattern)).unwrap();
        prop_assert_eq!(famr.category_count(), 1);
    }

    #[test]
    fn full_vigilance_commits_each_distinct_pattern(offsets in prop::collection::btree_set(0u32..100, 1..25)) {
        // Distinct points on a diagonal never lie inside one another's point box.
        let patterns: Vec<Pattern> = offsets
            .iter()
            .map(|&o| {
                let x = o as f64 / 10.0;
                Pattern::new(vec![x, x, x], (o as usize) % CLASSES)
            })
            .collect();
        let mut famr = Famr::new(config(1.0, 0.0, 1)).unwrap();
        famr.train(&patterns).unwrap();
        prop_assert_eq!(famr.category_count(), patterns.len());
    }
}

// ---------------------------------------------------------------------------
// Seeded scenarios
// ---------------------------------------------------------------------------

#[test]
fn well_separated_clusters_are_learned() {
    let train = clustered(7, 30);
    let test = clustered(8, 10);

    let mut famr = Famr::new(config(0.8, 0.0, 1)).unwrap();
    famr.train(&train).unwrap();

    let correct = test
        .iter()
        .filter(|p| famr.classify(p).unwrap() == p.class_index)
        .count();
    assert_eq!(correct, test.len());
    assert!(famr.category_count() >= CLASSES);
}

#[test]
fn each_presentation_order_is_reproducible() {
    let patterns = clustered(11, 20);
    let mut reversed = patterns.clone();
    reversed.reverse();

    let run = |ps: &[Pattern]| {
        let mut famr = Famr::new(config(0.9, 0.0, 1)).unwrap();
        famr.train(ps).unwrap();
        famr.snapshot()
    };

    assert_eq!(run(&patterns), run(&patterns));
    assert_eq!(run(&reversed), run(&reversed));
}
