//! Random generators: draw functions from a source to a shrinkable value.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use crate::arbitrary::Arbitrary;
use crate::error::GenError;
use crate::rng::RandomSource;
use crate::shrinkable::Shrinkable;

/// Retry budget shared by filtering, uniqueness and set-fill draws.
pub const MAX_MISSES: usize = 10_000;

/// A draw function producing [`Shrinkable`] values from a [`RandomSource`].
///
/// Generators are cheap to clone and stateless with respect to the generated
/// type except where a transformer explicitly keeps per-instance state
/// (`unique`, `with_samples`). Draw-time failures are reported as
/// [`GenError`] values.
pub struct RandomGenerator<T> {
    draw: Rc<dyn Fn(&mut RandomSource) -> Result<Shrinkable<T>, GenError>>,
}

impl<T> Clone for RandomGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            draw: Rc::clone(&self.draw),
        }
    }
}

impl<T: Clone + 'static> RandomGenerator<T> {
    /// Create a generator from a draw function
    pub fn new(draw: impl Fn(&mut RandomSource) -> Result<Shrinkable<T>, GenError> + 'static) -> Self {
        Self { draw: Rc::new(draw) }
    }

    /// A generator that ignores the source and yields a constant
    pub fn constant(value: T) -> Self {
        Self::new(move |_| Ok(Shrinkable::unshrinkable(value.clone())))
    }

    /// Draw the next shrinkable value
    pub fn next(&self, source: &mut RandomSource) -> Result<Shrinkable<T>, GenError> {
        (self.draw)(source)
    }

    /// An infinite lazy stream of draws from the given source
    pub fn stream(&self, source: RandomSource) -> impl Iterator<Item = Result<Shrinkable<T>, GenError>> {
        let generator = self.clone();
        let mut source = source;
        std::iter::from_fn(move || Some(generator.next(&mut source)))
    }

    /// Transform generated values; shrink trees are mapped along
    pub fn map<U: Clone + 'static>(self, f: impl Fn(T) -> U + 'static) -> RandomGenerator<U> {
        self.map_rc(Rc::new(f))
    }

    pub(crate) fn map_rc<U: Clone + 'static>(self, f: Rc<dyn Fn(T) -> U>) -> RandomGenerator<U> {
        RandomGenerator::new(move |source| Ok(self.next(source)?.map_rc(Rc::clone(&f))))
    }

    /// Transform whole shrinkables; used by combinators that rearrange trees
    pub(crate) fn transform<U: Clone + 'static>(
        self,
        f: Rc<dyn Fn(Shrinkable<T>) -> Shrinkable<U>>,
    ) -> RandomGenerator<U> {
        RandomGenerator::new(move |source| Ok(f(self.next(source)?)))
    }

    /// Keep only values accepted by `pred`, re-drawing on rejection.
    ///
    /// Gives up with [`GenError::TooManyFilterMisses`] after 10 000 rejected
    /// draws for a single value.
    pub fn filter(self, pred: impl Fn(&T) -> bool + 'static) -> RandomGenerator<T> {
        self.filter_rc(Rc::new(pred))
    }

    pub(crate) fn filter_rc(self, pred: Rc<dyn Fn(&T) -> bool>) -> RandomGenerator<T> {
        RandomGenerator::new(move |source| {
            for _ in 0..MAX_MISSES {
                let candidate = self.next(source)?;
                if let Some(kept) = candidate.filter_rc(Rc::clone(&pred)) {
                    return Ok(kept);
                }
            }
            Err(GenError::filter_misses(MAX_MISSES))
        })
    }

    /// Draw a value, then draw from the arbitrary derived from it.
    ///
    /// The inner draw runs on a child source seeded from this draw, so
    /// shrinking the outer value can replay the inner generation
    /// deterministically: the resulting tree offers re-flat-mapped shrinks of
    /// the outer value first, then direct shrinks of the inner value.
    pub fn flat_map<U: Clone + 'static>(
        self,
        f: impl Fn(T) -> Arbitrary<U> + 'static,
        gen_size: u32,
    ) -> RandomGenerator<U> {
        self.flat_map_rc(Rc::new(f), gen_size)
    }

    pub(crate) fn flat_map_rc<U: Clone + 'static>(
        self,
        f: Rc<dyn Fn(T) -> Arbitrary<U>>,
        gen_size: u32,
    ) -> RandomGenerator<U> {
        RandomGenerator::new(move |source| {
            let outer = self.next(source)?;
            let inner_seed = source.next_u64();
            flat_mapped(outer, Rc::clone(&f), gen_size, inner_seed)
        })
    }

    /// With probability `probability` emit `None` (unshrinkable), otherwise a
    /// present value whose shrinks stay within `Some`
    pub fn inject_none(self, probability: f64) -> RandomGenerator<Option<T>> {
        RandomGenerator::new(move |source| {
            if source.next_bool(probability) {
                Ok(Shrinkable::unshrinkable(None))
            } else {
                Ok(self.next(source)?.map_rc(Rc::new(Some)))
            }
        })
    }

    /// Remember every produced value and re-draw on collisions.
    ///
    /// The memory belongs to this generator instance; a freshly built
    /// generator starts forgetting. Gives up with
    /// [`GenError::TooManyUniqueMisses`] after 10 000 collisions.
    pub fn unique(self) -> RandomGenerator<T>
    where
        T: Eq + Hash,
    {
        let seen: Rc<RefCell<HashSet<T>>> = Rc::new(RefCell::new(HashSet::new()));
        RandomGenerator::new(move |source| {
            for _ in 0..MAX_MISSES {
                let candidate = self.next(source)?;
                if seen.borrow_mut().insert(candidate.value().clone()) {
                    return Ok(candidate);
                }
            }
            Err(GenError::unique_misses(MAX_MISSES))
        })
    }

    /// Return the samples in order for the first draws, then delegate
    pub fn with_samples(self, samples: Vec<T>) -> RandomGenerator<T> {
        let next_sample = Cell::new(0usize);
        RandomGenerator::new(move |source| {
            let index = next_sample.get();
            if index < samples.len() {
                next_sample.set(index + 1);
                Ok(Shrinkable::unshrinkable(samples[index].clone()))
            } else {
                self.next(source)
            }
        })
    }
}

fn flat_mapped<T: Clone + 'static, U: Clone + 'static>(
    outer: Shrinkable<T>,
    f: Rc<dyn Fn(T) -> Arbitrary<U>>,
    gen_size: u32,
    inner_seed: u64,
) -> Result<Shrinkable<U>, GenError> {
    let inner_arbitrary = f(outer.value().clone());
    let inner = inner_arbitrary
        .generator(gen_size)
        .next(&mut RandomSource::new(inner_seed))?;
    let value = inner.value().clone();
    Ok(Shrinkable::with_shrinks(value, move || {
        let mut candidates = Vec::new();
        for outer_candidate in outer.shrinks() {
            if let Ok(replayed) = flat_mapped(outer_candidate, Rc::clone(&f), gen_size, inner_seed) {
                candidates.push(replayed);
            }
        }
        candidates.extend(inner.shrinks());
        candidates
    }))
}
