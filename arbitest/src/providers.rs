//! Default arbitraries per type and an explicit provider registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::arbitraries;
use crate::arbitrary::Arbitrary;

/// Canonical default arbitrary for a type, the Rust stand-in for resolving a
/// type against the engine's built-in providers.
pub trait ArbitraryDefault: Clone + 'static {
    fn default_arbitrary() -> Arbitrary<Self>;
}

impl ArbitraryDefault for i8 {
    fn default_arbitrary() -> Arbitrary<i8> {
        arbitraries::bytes().arbitrary()
    }
}

impl ArbitraryDefault for i16 {
    fn default_arbitrary() -> Arbitrary<i16> {
        arbitraries::shorts().arbitrary()
    }
}

impl ArbitraryDefault for i32 {
    fn default_arbitrary() -> Arbitrary<i32> {
        arbitraries::integers().arbitrary()
    }
}

impl ArbitraryDefault for i64 {
    fn default_arbitrary() -> Arbitrary<i64> {
        arbitraries::longs().arbitrary()
    }
}

impl ArbitraryDefault for f32 {
    fn default_arbitrary() -> Arbitrary<f32> {
        arbitraries::floats().arbitrary()
    }
}

impl ArbitraryDefault for f64 {
    fn default_arbitrary() -> Arbitrary<f64> {
        arbitraries::doubles().arbitrary()
    }
}

impl ArbitraryDefault for BigInt {
    fn default_arbitrary() -> Arbitrary<BigInt> {
        arbitraries::big_integers().arbitrary()
    }
}

impl ArbitraryDefault for BigDecimal {
    fn default_arbitrary() -> Arbitrary<BigDecimal> {
        arbitraries::big_decimals().arbitrary()
    }
}

impl ArbitraryDefault for bool {
    fn default_arbitrary() -> Arbitrary<bool> {
        arbitraries::of_enum::<bool>()
    }
}

impl ArbitraryDefault for char {
    fn default_arbitrary() -> Arbitrary<char> {
        arbitraries::chars().arbitrary()
    }
}

impl ArbitraryDefault for String {
    fn default_arbitrary() -> Arbitrary<String> {
        arbitraries::strings().arbitrary()
    }
}

impl<T: ArbitraryDefault> ArbitraryDefault for Vec<T> {
    fn default_arbitrary() -> Arbitrary<Vec<T>> {
        T::default_arbitrary().list().arbitrary()
    }
}

impl<T: ArbitraryDefault> ArbitraryDefault for Option<T> {
    fn default_arbitrary() -> Arbitrary<Option<T>> {
        T::default_arbitrary().optional()
    }
}

/// Registry of user-supplied arbitraries keyed by type.
///
/// A registry is an explicit value the driver passes around; there is no
/// process-wide registry. Several registrations for the same type merge into
/// a uniform choice among them.
#[derive(Default)]
pub struct Providers {
    entries: HashMap<TypeId, Vec<Box<dyn Any>>>,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an arbitrary as a provider for its value type
    pub fn register<T: Clone + 'static>(&mut self, arbitrary: Arbitrary<T>) {
        self.entries
            .entry(TypeId::of::<T>())
            .or_default()
            .push(Box::new(arbitrary));
    }

    /// Whether any provider is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of types with at least one provider
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registered arbitrary for `T`; multiple registrations are merged
    /// with a uniform choice among them
    pub fn registered_for<T: Clone + 'static>(&self) -> Option<Arbitrary<T>> {
        let hits: Vec<Arbitrary<T>> = self
            .entries
            .get(&TypeId::of::<T>())?
            .iter()
            .filter_map(|boxed| boxed.downcast_ref::<Arbitrary<T>>().cloned())
            .collect();
        match hits.len() {
            0 => None,
            1 => hits.into_iter().next(),
            _ => Some(arbitraries::one_of(hits)),
        }
    }

    /// The registered arbitrary for `T`, falling back to the type's canonical
    /// default
    pub fn default_for<T: ArbitraryDefault>(&self) -> Arbitrary<T> {
        self.registered_for::<T>()
            .unwrap_or_else(T::default_arbitrary)
    }
}
