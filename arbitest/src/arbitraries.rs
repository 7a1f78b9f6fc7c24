//! Factory functions for the built-in arbitraries.

use std::cell::Cell;
use std::rc::Rc;

use itertools::Itertools;

use crate::arbitrary::Arbitrary;
use crate::exhaustive::{ExhaustiveGenerator, MAX_ENUMERATED};
use crate::generator::RandomGenerator;
use crate::numeric::{
    shrinkable_index, BigDecimalArbitrary, BigIntArbitrary, FloatArbitrary, IntArbitrary,
};
use crate::rng::RandomSource;
use crate::shrinkable::Shrinkable;
use crate::strings::{CharArbitrary, StringArbitrary};

/// Uniform choice among fixed values; exhaustive, shrinking toward
/// earlier-listed values.
pub fn of<T: Clone + 'static>(values: Vec<T>) -> Arbitrary<T> {
    assert!(!values.is_empty(), "of requires at least one value");
    let exhaustive_values = values.clone();
    Arbitrary::from_gen_factory(move |_gen_size| {
        let values = values.clone();
        RandomGenerator::new(move |source| {
            let index = source.next_usize_below(values.len());
            let values = values.clone();
            Ok(shrinkable_index(index).map(move |i| values[i].clone()))
        })
    })
    .with_exhaustive_factory(move || {
        Some(ExhaustiveGenerator::from_values(exhaustive_values.clone()))
    })
}

/// Types whose unit variants can be listed; the Rust stand-in for choosing
/// uniformly over an enum's constants.
pub trait Enumerable: Sized + Clone + 'static {
    fn variants() -> Vec<Self>;
}

impl Enumerable for bool {
    fn variants() -> Vec<bool> {
        vec![false, true]
    }
}

/// Uniform choice over all variants of an enumerable type; exhaustive
pub fn of_enum<T: Enumerable>() -> Arbitrary<T> {
    of(T::variants())
}

/// Deterministic round-robin over the given values, cycling forever in
/// insertion order. Not random, despite producing a generator; the cursor
/// belongs to the generator instance, so a fresh generator restarts the cycle.
pub fn samples<T: Clone + 'static>(values: Vec<T>) -> Arbitrary<T> {
    assert!(!values.is_empty(), "samples requires at least one value");
    Arbitrary::from_gen_factory(move |_gen_size| {
        let values = values.clone();
        let cursor = Cell::new(0usize);
        RandomGenerator::new(move |_source| {
            let index = cursor.get();
            cursor.set(index + 1);
            Ok(Shrinkable::unshrinkable(values[index % values.len()].clone()))
        })
    })
}

/// Fresh independent random sources, split off the sampling stream
pub fn randoms() -> Arbitrary<RandomSource> {
    Arbitrary::from_gen_factory(|_gen_size| {
        RandomGenerator::new(|source| Ok(Shrinkable::unshrinkable(source.split())))
    })
}

/// A single unshrinkable value; exhaustive
pub fn constant<T: Clone + 'static>(value: T) -> Arbitrary<T> {
    let exhaustive_value = value.clone();
    Arbitrary::from_gen_factory(move |_gen_size| RandomGenerator::constant(value.clone()))
        .with_exhaustive_factory(move || {
            Some(ExhaustiveGenerator::from_values(vec![exhaustive_value.clone()]))
        })
}

/// A single unshrinkable value built lazily on every draw
pub fn create<T: Clone + 'static>(supplier: impl Fn() -> T + 'static) -> Arbitrary<T> {
    let supplier = Rc::new(supplier);
    Arbitrary::from_gen_factory(move |_gen_size| {
        let supplier = Rc::clone(&supplier);
        RandomGenerator::new(move |_source| Ok(Shrinkable::unshrinkable(supplier())))
    })
}

/// Escape hatch: unshrinkable values drawn by a user function
pub fn random_value<T: Clone + 'static>(
    draw: impl Fn(&mut RandomSource) -> T + 'static,
) -> Arbitrary<T> {
    let draw = Rc::new(draw);
    Arbitrary::from_gen_factory(move |_gen_size| {
        let draw = Rc::clone(&draw);
        RandomGenerator::new(move |source| Ok(Shrinkable::unshrinkable(draw(source))))
    })
}

/// Escape hatch: shrinkables drawn by a user function
pub fn from_generator<T: Clone + 'static>(
    draw: impl Fn(&mut RandomSource) -> Shrinkable<T> + 'static,
) -> Arbitrary<T> {
    let draw = Rc::new(draw);
    Arbitrary::from_gen_factory(move |_gen_size| {
        let draw = Rc::clone(&draw);
        RandomGenerator::new(move |source| Ok(draw(source)))
    })
}

fn index_arbitrary(len: usize) -> Arbitrary<usize> {
    Arbitrary::from_gen_factory(move |_gen_size| {
        RandomGenerator::new(move |source| Ok(shrinkable_index(source.next_usize_below(len))))
    })
    .with_exhaustive_factory(move || Some(ExhaustiveGenerator::from_values((0..len).collect())))
}

/// Uniform choice among the given arbitraries, then a draw from the chosen
/// one. Shrinks first toward earlier-listed arbitraries.
pub fn one_of<T: Clone + 'static>(arbitraries: Vec<Arbitrary<T>>) -> Arbitrary<T> {
    assert!(!arbitraries.is_empty(), "one_of requires at least one arbitrary");
    index_arbitrary(arbitraries.len()).flat_map(move |index| arbitraries[index].clone())
}

fn shrinkable_weighted_index(index: usize, weights: Rc<Vec<u32>>) -> Shrinkable<usize> {
    Shrinkable::with_shrinks(index, move || {
        (0..index)
            .filter(|earlier| weights[*earlier] > 0)
            .map(|earlier| shrinkable_weighted_index(earlier, Rc::clone(&weights)))
            .collect()
    })
}

fn weighted_index(weights: Vec<u32>) -> Arbitrary<usize> {
    let total: u64 = weights.iter().map(|w| *w as u64).sum();
    assert!(
        !weights.is_empty() && total > 0,
        "frequency requires at least one positive weight"
    );
    let positive: Vec<usize> = (0..weights.len()).filter(|i| weights[*i] > 0).collect();
    let weights = Rc::new(weights);
    Arbitrary::from_gen_factory(move |_gen_size| {
        let weights = Rc::clone(&weights);
        RandomGenerator::new(move |source| {
            let mut roll = source.next_usize_below(total as usize) as u64;
            let mut chosen = 0;
            for (index, weight) in weights.iter().enumerate() {
                let weight = *weight as u64;
                if roll < weight {
                    chosen = index;
                    break;
                }
                roll -= weight;
            }
            Ok(shrinkable_weighted_index(chosen, Rc::clone(&weights)))
        })
    })
    .with_exhaustive_factory(move || Some(ExhaustiveGenerator::from_values(positive.clone())))
}

/// Weighted choice of values. Weights are non-negative; at least one must be
/// positive or construction panics. A value with weight `w` is chosen with
/// probability `w / Σw`, and shrinking prefers earlier-listed pairs.
pub fn frequency<T: Clone + 'static>(pairs: Vec<(u32, T)>) -> Arbitrary<T> {
    let weights: Vec<u32> = pairs.iter().map(|(weight, _)| *weight).collect();
    let values: Vec<T> = pairs.into_iter().map(|(_, value)| value).collect();
    weighted_index(weights).map(move |index| values[index].clone())
}

/// Weighted choice among arbitraries, then a draw from the chosen one
pub fn frequency_of<T: Clone + 'static>(pairs: Vec<(u32, Arbitrary<T>)>) -> Arbitrary<T> {
    let weights: Vec<u32> = pairs.iter().map(|(weight, _)| *weight).collect();
    let arbitraries: Vec<Arbitrary<T>> = pairs.into_iter().map(|(_, a)| a).collect();
    weighted_index(weights).flat_map(move |index| arbitraries[index].clone())
}

fn factorial(n: usize) -> Option<u64> {
    let mut out: u64 = 1;
    for k in 2..=n as u64 {
        out = out.checked_mul(k)?;
    }
    Some(out)
}

/// Random permutations of the given values; every permutation is reachable
/// with positive probability. Permutations do not shrink.
pub fn shuffle<T: Clone + 'static>(values: Vec<T>) -> Arbitrary<Vec<T>> {
    let exhaustive_values = values.clone();
    Arbitrary::from_gen_factory(move |_gen_size| {
        let values = values.clone();
        RandomGenerator::new(move |source| {
            let mut shuffled = values.clone();
            for i in (1..shuffled.len()).rev() {
                let j = source.next_usize_below(i + 1);
                shuffled.swap(i, j);
            }
            Ok(Shrinkable::unshrinkable(shuffled))
        })
    })
    .with_exhaustive_factory(move || {
        let count = factorial(exhaustive_values.len())?;
        if count > MAX_ENUMERATED {
            return None;
        }
        let values = exhaustive_values.clone();
        Some(ExhaustiveGenerator::new(count, move || {
            if values.is_empty() {
                return Box::new(std::iter::once(Vec::new()));
            }
            Box::new(values.clone().into_iter().permutations(values.len()))
        }))
    })
}

/// Defer construction of an arbitrary, breaking definition cycles.
///
/// The supplier runs again on every `generator()` call, so per-generator
/// state inside the supplied arbitrary (e.g. a samples round-robin cursor)
/// restarts with it.
pub fn lazy<T: Clone + 'static>(supplier: impl Fn() -> Arbitrary<T> + 'static) -> Arbitrary<T> {
    let supplier = Rc::new(supplier);
    let exhaustive_supplier = Rc::clone(&supplier);
    Arbitrary::from_gen_factory(move |gen_size| supplier().generator(gen_size))
        .with_exhaustive_factory(move || exhaustive_supplier().exhaustive())
}

/// Apply `step` exactly `depth` times to `base`
pub fn recursive<T: Clone + 'static>(
    base: Arbitrary<T>,
    step: impl Fn(Arbitrary<T>) -> Arbitrary<T>,
    depth: u32,
) -> Arbitrary<T> {
    let mut current = base;
    for _ in 0..depth {
        current = step(current);
    }
    current
}

/// Signed 8-bit integers
pub fn bytes() -> IntArbitrary<i8> {
    IntArbitrary::default()
}

/// Signed 16-bit integers
pub fn shorts() -> IntArbitrary<i16> {
    IntArbitrary::default()
}

/// Signed 32-bit integers
pub fn integers() -> IntArbitrary<i32> {
    IntArbitrary::default()
}

/// Signed 64-bit integers
pub fn longs() -> IntArbitrary<i64> {
    IntArbitrary::default()
}

/// Arbitrary-precision integers
pub fn big_integers() -> BigIntArbitrary {
    BigIntArbitrary::default()
}

/// 32-bit floating point numbers
pub fn floats() -> FloatArbitrary<f32> {
    FloatArbitrary::default()
}

/// 64-bit floating point numbers
pub fn doubles() -> FloatArbitrary<f64> {
    FloatArbitrary::default()
}

/// Arbitrary-precision decimals
pub fn big_decimals() -> BigDecimalArbitrary {
    BigDecimalArbitrary::default()
}

/// Characters, printable ASCII by default
pub fn chars() -> CharArbitrary {
    CharArbitrary::default()
}

/// Strings over a configurable character class
pub fn strings() -> StringArbitrary {
    StringArbitrary::default()
}
