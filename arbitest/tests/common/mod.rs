//! Shared assertions for exercising generators in integration tests.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use arbitest::{RandomGenerator, RandomSource};

pub const TEST_SEED: u64 = 0x5eed;

/// Collect `n` generated values from a fresh source
pub fn values<T: Clone + 'static>(generator: &RandomGenerator<T>, n: usize) -> Vec<T> {
    generator
        .stream(RandomSource::new(TEST_SEED))
        .take(n)
        .map(|result| result.expect("generation failed").into_value())
        .collect()
}

/// Every one of 1000 generated values must satisfy the check
pub fn assert_all_generated<T: Clone + Debug + 'static>(
    generator: &RandomGenerator<T>,
    check: impl Fn(&T) -> bool,
) {
    for value in values(generator, 1000) {
        assert!(check(&value), "unexpected value generated: {:?}", value);
    }
}

/// At least one of 1000 generated values must satisfy the check
pub fn assert_at_least_one_generated<T: Clone + Debug + 'static>(
    generator: &RandomGenerator<T>,
    check: impl Fn(&T) -> bool,
) {
    let generated = values(generator, 1000);
    assert!(
        generated.iter().any(|value| check(value)),
        "no generated value satisfied the check"
    );
}

/// Each of the expected values must be generated at least once in 1000 draws
pub fn assert_at_least_one_generated_of<T: Clone + Debug + PartialEq + 'static>(
    generator: &RandomGenerator<T>,
    expected: &[T],
) {
    let generated = values(generator, 1000);
    for value in expected {
        assert!(
            generated.contains(value),
            "expected value was never generated: {:?}",
            value
        );
    }
}

/// The first draws must equal the expected values, in order
pub fn assert_generated_exactly<T: Clone + Debug + PartialEq + 'static>(
    generator: &RandomGenerator<T>,
    expected: &[T],
) {
    let generated = values(generator, expected.len());
    assert_eq!(generated, expected);
}

/// Frequency table of `n` generated values
pub fn count_values<T: Clone + Eq + Hash + 'static>(
    generator: &RandomGenerator<T>,
    n: usize,
) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for value in values(generator, n) {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}
