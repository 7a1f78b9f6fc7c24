//! Finite enumeration of all values an arbitrary can produce.

use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use crate::arbitrary::Arbitrary;

/// Upper bound on the number of values any composed enumeration may hold.
/// Compositions whose estimated count exceeds this give up and report
/// themselves as not exhaustive, leaving the driver on the sampling path.
pub(crate) const MAX_ENUMERATED: u64 = 5_000;

/// A finite iterable over every value of an arbitrary, plus a `max_count`
/// estimate the driver uses to decide between enumeration and sampling.
///
/// `max_count` is exact for base enumerations; `filter` keeps it as an upper
/// bound.
pub struct ExhaustiveGenerator<T> {
    max_count: u64,
    make_iter: Rc<dyn Fn() -> Box<dyn Iterator<Item = T>>>,
}

impl<T> Clone for ExhaustiveGenerator<T> {
    fn clone(&self) -> Self {
        Self {
            max_count: self.max_count,
            make_iter: Rc::clone(&self.make_iter),
        }
    }
}

impl<T: Clone + 'static> ExhaustiveGenerator<T> {
    /// Create an enumeration from a count estimate and an iterator factory
    pub fn new(max_count: u64, make_iter: impl Fn() -> Box<dyn Iterator<Item = T>> + 'static) -> Self {
        Self {
            max_count,
            make_iter: Rc::new(make_iter),
        }
    }

    /// Enumerate a fixed list of values in order
    pub fn from_values(values: Vec<T>) -> Self {
        let count = values.len() as u64;
        Self::new(count, move || Box::new(values.clone().into_iter()))
    }

    /// Estimated number of values this enumeration yields
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// A fresh iterator over all values
    pub fn iter(&self) -> Box<dyn Iterator<Item = T>> {
        (self.make_iter)()
    }

    /// Collect every value
    pub fn values(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Size-preserving transformation
    pub fn map<U: Clone + 'static>(self, f: impl Fn(T) -> U + 'static) -> ExhaustiveGenerator<U> {
        self.map_rc(Rc::new(f))
    }

    pub(crate) fn map_rc<U: Clone + 'static>(self, f: Rc<dyn Fn(T) -> U>) -> ExhaustiveGenerator<U> {
        ExhaustiveGenerator::new(self.max_count, move || {
            let f = Rc::clone(&f);
            Box::new((self.make_iter)().map(move |value| f(value)))
        })
    }

    /// Keep only accepted values; `max_count` stays as an upper bound
    pub fn filter(self, pred: impl Fn(&T) -> bool + 'static) -> ExhaustiveGenerator<T> {
        self.filter_rc(Rc::new(pred))
    }

    pub(crate) fn filter_rc(self, pred: Rc<dyn Fn(&T) -> bool>) -> ExhaustiveGenerator<T> {
        ExhaustiveGenerator::new(self.max_count, move || {
            let pred = Rc::clone(&pred);
            Box::new((self.make_iter)().filter(move |value| pred(value)))
        })
    }

    /// Prepend the absent value; count grows by one
    pub fn inject_none(self) -> ExhaustiveGenerator<Option<T>> {
        ExhaustiveGenerator::new(self.max_count.saturating_add(1), move || {
            Box::new(std::iter::once(None).chain((self.make_iter)().map(Some)))
        })
    }

    /// Prepend fixed samples; count grows by their number
    pub fn with_samples(self, samples: Vec<T>) -> ExhaustiveGenerator<T> {
        let added = samples.len() as u64;
        ExhaustiveGenerator::new(self.max_count.saturating_add(added), move || {
            Box::new(samples.clone().into_iter().chain((self.make_iter)()))
        })
    }

    /// Drop duplicate values from the enumeration
    pub fn unique(self) -> ExhaustiveGenerator<T>
    where
        T: Eq + Hash,
    {
        ExhaustiveGenerator::new(self.max_count, move || {
            let mut seen = HashSet::new();
            Box::new((self.make_iter)().filter(move |value| seen.insert(value.clone())))
        })
    }

    /// Enumerate the dependent space, outer-major: for each outer value all
    /// values of its derived arbitrary, in order.
    ///
    /// Available only when every derived arbitrary is itself exhaustive and
    /// the combined count stays within the enumeration budget.
    pub fn flat_map<U: Clone + 'static>(
        &self,
        f: impl Fn(T) -> Arbitrary<U> + 'static,
    ) -> Option<ExhaustiveGenerator<U>> {
        self.flat_map_rc(Rc::new(f))
    }

    pub(crate) fn flat_map_rc<U: Clone + 'static>(
        &self,
        f: Rc<dyn Fn(T) -> Arbitrary<U>>,
    ) -> Option<ExhaustiveGenerator<U>> {
        if self.max_count > MAX_ENUMERATED {
            return None;
        }
        let mut total: u64 = 0;
        let mut inners: Vec<ExhaustiveGenerator<U>> = Vec::new();
        for value in self.iter() {
            let inner = f(value).exhaustive()?;
            total = total.saturating_add(inner.max_count());
            if total > MAX_ENUMERATED {
                return None;
            }
            inners.push(inner);
        }
        Some(ExhaustiveGenerator::new(total, move || {
            Box::new(inners.clone().into_iter().flat_map(|inner| inner.iter()))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitraries;

    #[test]
    fn test_from_values_enumerates_in_order() {
        let exhaustive = ExhaustiveGenerator::from_values(vec![1, 2, 3]);
        assert_eq!(exhaustive.max_count(), 3);
        assert_eq!(exhaustive.values(), vec![1, 2, 3]);
        // A second iteration starts over
        assert_eq!(exhaustive.values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_map_preserves_count() {
        let mapped = ExhaustiveGenerator::from_values(vec![1, 2, 3]).map(|n| n * 10);
        assert_eq!(mapped.max_count(), 3);
        assert_eq!(mapped.values(), vec![10, 20, 30]);
    }

    #[test]
    fn test_filter_keeps_count_as_upper_bound() {
        let filtered = ExhaustiveGenerator::from_values(vec![1, 2, 3, 4]).filter(|n| n % 2 == 0);
        assert_eq!(filtered.max_count(), 4);
        assert_eq!(filtered.values(), vec![2, 4]);
    }

    #[test]
    fn test_inject_none_prepends_absent_value() {
        let injected = ExhaustiveGenerator::from_values(vec![1, 2]).inject_none();
        assert_eq!(injected.max_count(), 3);
        assert_eq!(injected.values(), vec![None, Some(1), Some(2)]);
    }

    #[test]
    fn test_with_samples_prepends() {
        let sampled = ExhaustiveGenerator::from_values(vec![3, 4]).with_samples(vec![1, 2]);
        assert_eq!(sampled.max_count(), 4);
        assert_eq!(sampled.values(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unique_drops_duplicates() {
        let deduped = ExhaustiveGenerator::from_values(vec![1, 2, 1, 3, 2]).unique();
        assert_eq!(deduped.values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_flat_map_is_outer_major() {
        let outer = ExhaustiveGenerator::from_values(vec![10, 20]);
        let product = outer
            .flat_map(|base| arbitraries::of(vec![base + 1, base + 2]))
            .unwrap();
        assert_eq!(product.max_count(), 4);
        assert_eq!(product.values(), vec![11, 12, 21, 22]);
    }

    #[test]
    fn test_flat_map_requires_inner_exhaustive() {
        let outer = ExhaustiveGenerator::from_values(vec![1, 2]);
        let result = outer.flat_map(|n| arbitraries::random_value(move |source| {
            source.next_i64_between(0, n)
        }));
        assert!(result.is_none());
    }
}
