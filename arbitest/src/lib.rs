//! # Arbitest - Arbitrary Value Generation with Integrated Shrinking
//!
//! Arbitest is the generation core of a property-based testing engine: a
//! declarative [`Arbitrary`] describes a value space, produces
//! [`RandomGenerator`]s that draw edge-case biased [`Shrinkable`] samples
//! from an explicit [`RandomSource`], enumerates the space exhaustively when
//! it is finite and small, and minimises failing samples by walking their
//! shrink trees.
//!
//! ## Quick Start
//!
//! ```rust
//! use arbitest::{arbitraries, RandomSource, Shrinker};
//!
//! let arbitrary = arbitraries::integers().between(-10, 10).arbitrary();
//! let generator = arbitrary.generator(100);
//! let mut source = RandomSource::new(42);
//!
//! // Draw a few samples; all of them respect the configured bounds
//! for _ in 0..10 {
//!     let sample = generator.next(&mut source).unwrap();
//!     assert!((-10..=10).contains(sample.value()));
//! }
//!
//! // Minimise a failing sample toward the property's boundary
//! let failing = loop {
//!     let sample = generator.next(&mut source).unwrap();
//!     if *sample.value() > 5 {
//!         break sample;
//!     }
//! };
//! let result = Shrinker::new().minimize(&failing, |v| *v <= 5);
//! assert_eq!(result.minimal, 6);
//! ```

// Public modules
pub mod arbitraries;
pub mod arbitrary;
pub mod config;
pub mod containers;
pub mod error;
pub mod exhaustive;
pub mod generator;
pub mod numeric;
pub mod providers;
pub mod rng;
pub mod shrinkable;
pub mod shrinker;
pub mod strings;

// Re-export the main public API
pub use arbitraries::Enumerable;
pub use arbitrary::Arbitrary;
pub use config::{default_max_from_tries, ConfigError, PropertyConfig, ShrinkingMode};
pub use containers::{ArrayArbitrary, IteratorArbitrary, ListArbitrary, SetArbitrary};
pub use error::GenError;
pub use exhaustive::ExhaustiveGenerator;
pub use generator::{RandomGenerator, MAX_MISSES};
pub use numeric::{BigDecimalArbitrary, BigIntArbitrary, FloatArbitrary, IntArbitrary};
pub use providers::{ArbitraryDefault, Providers};
pub use rng::RandomSource;
pub use shrinkable::Shrinkable;
pub use shrinker::{ShrinkResult, Shrinker};
pub use strings::{CharArbitrary, StringArbitrary};
