//! Container arbitraries: lists, sets, arrays and iterators with size bounds.

use std::cell::Cell;
use std::collections::HashSet;
use std::hash::Hash;

use itertools::Itertools;

use crate::arbitrary::Arbitrary;
use crate::config::default_max_from_tries;
use crate::error::GenError;
use crate::exhaustive::{ExhaustiveGenerator, MAX_ENUMERATED};
use crate::generator::{RandomGenerator, MAX_MISSES};
use crate::rng::RandomSource;
use crate::shrinkable::Shrinkable;

pub(crate) fn resolve_sizes(min_size: usize, max_size: Option<usize>, gen_size: u32) -> (usize, usize) {
    let hi = max_size.unwrap_or_else(|| default_max_from_tries(gen_size) as usize);
    (min_size, hi.max(min_size))
}

/// Draw a collection size in `[lo, hi]`, steering the first two draws toward
/// the edge cases: the minimum (empty when allowed), then a single element.
pub(crate) fn draw_size(source: &mut RandomSource, lo: usize, hi: usize, draws: &Cell<u32>) -> usize {
    let nth = draws.get();
    draws.set(nth.saturating_add(1));
    match nth {
        0 => lo,
        1 => lo.max(1).min(hi),
        _ => source.next_usize_between(lo, hi),
    }
}

pub(crate) fn shrinkable_vec<T: Clone + 'static>(
    items: Vec<Shrinkable<T>>,
    min_size: usize,
) -> Shrinkable<Vec<T>> {
    let value: Vec<T> = items.iter().map(|item| item.value().clone()).collect();
    Shrinkable::with_shrinks(value, move || {
        let mut candidates = Vec::new();
        if items.len() > min_size {
            // Empty first, then one removal at a time; a single element's
            // removal already produces the empty list
            if min_size == 0 && items.len() > 1 {
                candidates.push(shrinkable_vec(Vec::new(), 0));
            }
            for index in 0..items.len() {
                let mut fewer = items.clone();
                fewer.remove(index);
                candidates.push(shrinkable_vec(fewer, min_size));
            }
        }
        for index in 0..items.len() {
            for element_candidate in items[index].shrinks() {
                let mut replaced = items.clone();
                replaced[index] = element_candidate;
                candidates.push(shrinkable_vec(replaced, min_size));
            }
        }
        candidates
    })
}

fn shrinkable_set<T: Clone + Eq + Hash + 'static>(
    items: Vec<Shrinkable<T>>,
    min_size: usize,
) -> Shrinkable<HashSet<T>> {
    let value: HashSet<T> = items.iter().map(|item| item.value().clone()).collect();
    Shrinkable::with_shrinks(value, move || {
        let mut candidates = Vec::new();
        if items.len() > min_size {
            if min_size == 0 && items.len() > 1 {
                candidates.push(shrinkable_set(Vec::new(), 0));
            }
            for index in 0..items.len() {
                let mut fewer = items.clone();
                fewer.remove(index);
                candidates.push(shrinkable_set(fewer, min_size));
            }
        }
        for index in 0..items.len() {
            for element_candidate in items[index].shrinks() {
                let collides = items
                    .iter()
                    .enumerate()
                    .any(|(other, item)| other != index && item.value() == element_candidate.value());
                if collides {
                    continue;
                }
                let mut replaced = items.clone();
                replaced[index] = element_candidate;
                candidates.push(shrinkable_set(replaced, min_size));
            }
        }
        candidates
    })
}

pub(crate) fn exhaustive_list<T: Clone + 'static>(
    element: &Arbitrary<T>,
    min_size: usize,
    max_size: Option<usize>,
) -> Option<ExhaustiveGenerator<Vec<T>>> {
    // Without an explicit upper bound the size depends on genSize
    let hi = max_size?;
    let element_exhaustive = element.exhaustive()?;
    let element_count = element_exhaustive.max_count();
    let mut total: u64 = 0;
    for size in min_size..=hi {
        let combinations = element_count.checked_pow(size as u32)?;
        total = total.checked_add(combinations)?;
        if total > MAX_ENUMERATED {
            return None;
        }
    }
    let lo = min_size;
    Some(ExhaustiveGenerator::new(total, move || {
        let elements = element_exhaustive.values();
        Box::new((lo..=hi).flat_map(move |size| -> Box<dyn Iterator<Item = Vec<T>>> {
            if size == 0 {
                Box::new(std::iter::once(Vec::new()))
            } else {
                let elements = elements.clone();
                Box::new(
                    (0..size)
                        .map(move |_| elements.clone().into_iter())
                        .multi_cartesian_product(),
                )
            }
        }))
    }))
}

macro_rules! sizable_methods {
    () => {
        /// Require at least `min_size` elements
        pub fn of_min_size(mut self, min_size: usize) -> Self {
            self.min_size = min_size;
            self
        }

        /// Allow at most `max_size` elements
        pub fn of_max_size(mut self, max_size: usize) -> Self {
            self.max_size = Some(max_size);
            self
        }

        /// Fix the exact number of elements
        pub fn of_size(mut self, size: usize) -> Self {
            self.min_size = size;
            self.max_size = Some(size);
            self
        }

        fn assert_sizes(&self) {
            if let Some(max) = self.max_size {
                assert!(self.min_size <= max, "min size must not exceed max size");
            }
        }
    };
}

/// Builder for list arbitraries over an element arbitrary.
#[derive(Clone)]
pub struct ListArbitrary<T> {
    element: Arbitrary<T>,
    min_size: usize,
    max_size: Option<usize>,
}

impl<T: Clone + 'static> ListArbitrary<T> {
    pub(crate) fn new(element: Arbitrary<T>) -> Self {
        Self {
            element,
            min_size: 0,
            max_size: None,
        }
    }

    sizable_methods!();

    pub fn arbitrary(&self) -> Arbitrary<Vec<T>> {
        self.assert_sizes();
        let element = self.element.clone();
        let exhaustive_element = self.element.clone();
        let (min_size, max_size) = (self.min_size, self.max_size);
        Arbitrary::from_gen_factory(move |gen_size| {
            let (lo, hi) = resolve_sizes(min_size, max_size, gen_size);
            let element_gen = element.generator(gen_size);
            let draws = Cell::new(0u32);
            RandomGenerator::new(move |source| {
                let size = draw_size(source, lo, hi, &draws);
                let mut items = Vec::with_capacity(size);
                for _ in 0..size {
                    items.push(element_gen.next(source)?);
                }
                Ok(shrinkable_vec(items, lo))
            })
        })
        .with_exhaustive_factory(move || {
            exhaustive_list(&exhaustive_element, min_size, max_size)
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<Vec<T>> {
        self.arbitrary().generator(gen_size)
    }

    pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<Vec<T>>> {
        self.arbitrary().exhaustive()
    }
}

/// Builder for set arbitraries over an element arbitrary.
///
/// Element draws are retried on collisions; when the retry budget runs out a
/// set that already reached its minimum size is kept, otherwise generation
/// fails with [`GenError::SetSizeUnreachable`].
#[derive(Clone)]
pub struct SetArbitrary<T> {
    element: Arbitrary<T>,
    min_size: usize,
    max_size: Option<usize>,
}

impl<T: Clone + Eq + Hash + 'static> SetArbitrary<T> {
    pub(crate) fn new(element: Arbitrary<T>) -> Self {
        Self {
            element,
            min_size: 0,
            max_size: None,
        }
    }

    sizable_methods!();

    pub fn arbitrary(&self) -> Arbitrary<HashSet<T>> {
        self.assert_sizes();
        let element = self.element.clone();
        let (min_size, max_size) = (self.min_size, self.max_size);
        Arbitrary::from_gen_factory(move |gen_size| {
            let (lo, hi) = resolve_sizes(min_size, max_size, gen_size);
            let element_gen = element.generator(gen_size);
            let draws = Cell::new(0u32);
            RandomGenerator::new(move |source| {
                let size = draw_size(source, lo, hi, &draws);
                let mut items: Vec<Shrinkable<T>> = Vec::with_capacity(size);
                let mut seen: HashSet<T> = HashSet::with_capacity(size);
                let mut misses = 0;
                while items.len() < size {
                    let candidate = element_gen.next(source)?;
                    if seen.insert(candidate.value().clone()) {
                        items.push(candidate);
                    } else {
                        misses += 1;
                        if misses >= MAX_MISSES {
                            if items.len() >= lo {
                                break;
                            }
                            return Err(GenError::SetSizeUnreachable {
                                min_size: lo,
                                attempts: MAX_MISSES,
                            });
                        }
                    }
                }
                Ok(shrinkable_set(items, lo))
            })
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<HashSet<T>> {
        self.arbitrary().generator(gen_size)
    }
}

/// Builder for boxed-slice arbitraries; the component type rides along in the
/// type parameter.
#[derive(Clone)]
pub struct ArrayArbitrary<T> {
    list: ListArbitrary<T>,
}

impl<T: Clone + 'static> ArrayArbitrary<T> {
    pub(crate) fn new(element: Arbitrary<T>) -> Self {
        Self {
            list: ListArbitrary::new(element),
        }
    }

    pub fn of_min_size(mut self, min_size: usize) -> Self {
        self.list = self.list.of_min_size(min_size);
        self
    }

    pub fn of_max_size(mut self, max_size: usize) -> Self {
        self.list = self.list.of_max_size(max_size);
        self
    }

    pub fn of_size(mut self, size: usize) -> Self {
        self.list = self.list.of_size(size);
        self
    }

    pub fn arbitrary(&self) -> Arbitrary<Box<[T]>> {
        self.list.arbitrary().map(Vec::into_boxed_slice)
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<Box<[T]>> {
        self.arbitrary().generator(gen_size)
    }
}

/// Builder for iterator arbitraries over the same value space as lists.
#[derive(Clone)]
pub struct IteratorArbitrary<T> {
    list: ListArbitrary<T>,
}

impl<T: Clone + 'static> IteratorArbitrary<T> {
    pub(crate) fn new(element: Arbitrary<T>) -> Self {
        Self {
            list: ListArbitrary::new(element),
        }
    }

    pub fn of_min_size(mut self, min_size: usize) -> Self {
        self.list = self.list.of_min_size(min_size);
        self
    }

    pub fn of_max_size(mut self, max_size: usize) -> Self {
        self.list = self.list.of_max_size(max_size);
        self
    }

    pub fn of_size(mut self, size: usize) -> Self {
        self.list = self.list.of_size(size);
        self
    }

    pub fn arbitrary(&self) -> Arbitrary<std::vec::IntoIter<T>> {
        self.list.arbitrary().map(Vec::into_iter)
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<std::vec::IntoIter<T>> {
        self.arbitrary().generator(gen_size)
    }
}
