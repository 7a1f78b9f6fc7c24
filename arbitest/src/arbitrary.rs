//! The declarative value space at the center of the library.

use std::hash::Hash;
use std::rc::Rc;

use crate::containers::{ArrayArbitrary, IteratorArbitrary, ListArbitrary, SetArbitrary};
use crate::error::GenError;
use crate::exhaustive::ExhaustiveGenerator;
use crate::generator::RandomGenerator;
use crate::shrinkable::Shrinkable;

/// A declarative description of a value space.
///
/// An arbitrary can always produce a [`RandomGenerator`] and may, for finite
/// spaces, produce an [`ExhaustiveGenerator`]. Arbitraries are immutable:
/// every combinator returns a new instance, and instances may be shared and
/// sampled repeatedly.
pub struct Arbitrary<T> {
    gen_factory: Rc<dyn Fn(u32) -> RandomGenerator<T>>,
    exhaustive_factory: Rc<dyn Fn() -> Option<ExhaustiveGenerator<T>>>,
}

impl<T> Clone for Arbitrary<T> {
    fn clone(&self) -> Self {
        Self {
            gen_factory: Rc::clone(&self.gen_factory),
            exhaustive_factory: Rc::clone(&self.exhaustive_factory),
        }
    }
}

impl<T: Clone + 'static> Arbitrary<T> {
    /// Build an arbitrary from a generator factory; not exhaustive
    pub fn from_gen_factory(factory: impl Fn(u32) -> RandomGenerator<T> + 'static) -> Self {
        Self {
            gen_factory: Rc::new(factory),
            exhaustive_factory: Rc::new(|| None),
        }
    }

    /// Attach an exhaustive-generator factory
    pub fn with_exhaustive_factory(
        mut self,
        factory: impl Fn() -> Option<ExhaustiveGenerator<T>> + 'static,
    ) -> Self {
        self.exhaustive_factory = Rc::new(factory);
        self
    }

    /// Create the random generator for this arbitrary.
    ///
    /// `gen_size` is an unspecific configuration hint, by convention the
    /// number of tries configured for the property; generators that do not
    /// care simply ignore it.
    pub fn generator(&self, gen_size: u32) -> RandomGenerator<T> {
        (self.gen_factory)(gen_size)
    }

    /// Create the exhaustive generator, when the space is finite and small
    pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<T>> {
        (self.exhaustive_factory)()
    }

    /// Every value of this arbitrary, or [`GenError::ExhaustiveNotAvailable`]
    pub fn all_values(&self) -> Result<Vec<T>, GenError> {
        match self.exhaustive() {
            Some(exhaustive) => Ok(exhaustive.values()),
            None => Err(GenError::ExhaustiveNotAvailable),
        }
    }

    /// Visit every value of this arbitrary, when exhaustive generation is
    /// possible
    pub fn for_each_value(&self, mut f: impl FnMut(T)) -> Result<(), GenError> {
        match self.exhaustive() {
            Some(exhaustive) => {
                for value in exhaustive.iter() {
                    f(value);
                }
                Ok(())
            }
            None => Err(GenError::ExhaustiveNotAvailable),
        }
    }

    /// Map generated values through `f`
    pub fn map<U: Clone + 'static>(&self, f: impl Fn(T) -> U + 'static) -> Arbitrary<U> {
        let f: Rc<dyn Fn(T) -> U> = Rc::new(f);
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        let exhaustive_f = Rc::clone(&f);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| gen_factory(gen_size).map_rc(Rc::clone(&f))),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory().map(|exhaustive| exhaustive.map_rc(Rc::clone(&exhaustive_f)))
            }),
        }
    }

    /// Keep only values accepted by `filter_pred`; draws are retried
    pub fn filter(&self, filter_pred: impl Fn(&T) -> bool + 'static) -> Arbitrary<T> {
        let pred: Rc<dyn Fn(&T) -> bool> = Rc::new(filter_pred);
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        let exhaustive_pred = Rc::clone(&pred);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| gen_factory(gen_size).filter_rc(Rc::clone(&pred))),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory()
                    .map(|exhaustive| exhaustive.filter_rc(Rc::clone(&exhaustive_pred)))
            }),
        }
    }

    /// Use each generated value to build the arbitrary the final value is
    /// drawn from
    pub fn flat_map<U: Clone + 'static>(
        &self,
        f: impl Fn(T) -> Arbitrary<U> + 'static,
    ) -> Arbitrary<U> {
        let f: Rc<dyn Fn(T) -> Arbitrary<U>> = Rc::new(f);
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        let exhaustive_f = Rc::clone(&f);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| {
                gen_factory(gen_size).flat_map_rc(Rc::clone(&f), gen_size)
            }),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory()
                    .and_then(|exhaustive| exhaustive.flat_map_rc(Rc::clone(&exhaustive_f)))
            }),
        }
    }

    /// Emit `None` with the given probability, otherwise a present value.
    ///
    /// The injected `None` is a corner case, not a shrink target: present
    /// values shrink within `Some`. Use [`optional`](Arbitrary::optional) for
    /// shrink-toward-absence semantics.
    pub fn inject_none(&self, probability: f64) -> Arbitrary<Option<T>> {
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| gen_factory(gen_size).inject_none(probability)),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory().map(|exhaustive| exhaustive.inject_none())
            }),
        }
    }

    /// Never produce the same value twice from one generator instance
    pub fn unique(&self) -> Arbitrary<T>
    where
        T: Eq + Hash,
    {
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| gen_factory(gen_size).unique()),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory().map(|exhaustive| exhaustive.unique())
            }),
        }
    }

    /// Inject the given samples before standard generation starts
    pub fn with_samples(&self, samples: Vec<T>) -> Arbitrary<T> {
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        let exhaustive_samples = samples.clone();
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| gen_factory(gen_size).with_samples(samples.clone())),
            exhaustive_factory: Rc::new(move || {
                exhaustive_factory()
                    .map(|exhaustive| exhaustive.with_samples(exhaustive_samples.clone()))
            }),
        }
    }

    /// Pin the genSize so it can no longer be influenced from outside
    pub fn fix_gen_size(&self, gen_size: u32) -> Arbitrary<T> {
        let gen_factory = Rc::clone(&self.gen_factory);
        let exhaustive_factory = Rc::clone(&self.exhaustive_factory);
        Arbitrary {
            gen_factory: Rc::new(move |_| gen_factory(gen_size)),
            exhaustive_factory: Rc::new(move || exhaustive_factory()),
        }
    }

    /// Lists of elements drawn from this arbitrary
    pub fn list(&self) -> ListArbitrary<T> {
        ListArbitrary::new(self.clone())
    }

    /// Sets of distinct elements drawn from this arbitrary
    pub fn set(&self) -> SetArbitrary<T>
    where
        T: Eq + Hash,
    {
        SetArbitrary::new(self.clone())
    }

    /// Boxed slices of elements drawn from this arbitrary
    pub fn array(&self) -> ArrayArbitrary<T> {
        ArrayArbitrary::new(self.clone())
    }

    /// Iterators over elements drawn from this arbitrary
    pub fn iterator(&self) -> IteratorArbitrary<T> {
        IteratorArbitrary::new(self.clone())
    }

    /// Optional values: absent in 1 of 20 cases, and present values shrink
    /// toward absence first
    pub fn optional(&self) -> Arbitrary<Option<T>> {
        let injected = self.inject_none(0.05);
        let gen_factory = Rc::clone(&injected.gen_factory);
        Arbitrary {
            gen_factory: Rc::new(move |gen_size| {
                gen_factory(gen_size).transform(Rc::new(toward_absence))
            }),
            exhaustive_factory: Rc::clone(&injected.exhaustive_factory),
        }
    }
}

fn toward_absence<T: Clone + 'static>(shrinkable: Shrinkable<Option<T>>) -> Shrinkable<Option<T>> {
    if shrinkable.value().is_none() {
        return shrinkable;
    }
    let value = shrinkable.value().clone();
    Shrinkable::with_shrinks(value, move || {
        let mut candidates = vec![Shrinkable::unshrinkable(None)];
        candidates.extend(shrinkable.shrinks().into_iter().map(toward_absence));
        candidates
    })
}
