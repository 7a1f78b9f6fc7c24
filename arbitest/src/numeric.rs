//! Numeric arbitraries: edge-case biased generation and target-directed
//! shrinking for integral, floating point and arbitrary-precision numbers.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::arbitrary::Arbitrary;
use crate::config::default_max_from_tries;
use crate::exhaustive::{ExhaustiveGenerator, MAX_ENUMERATED};
use crate::generator::RandomGenerator;
use crate::shrinkable::Shrinkable;

// ---------------------------------------------------------------------------
// Integer shrinking
// ---------------------------------------------------------------------------

/// The value integral shrinking moves toward: zero when the range allows it,
/// otherwise the bound nearest zero.
fn shrink_target(min: i128, max: i128) -> i128 {
    if min <= 0 && 0 <= max {
        0
    } else if min > 0 {
        min
    } else {
        max
    }
}

/// Candidates between `target` and `value`: the target itself, then the
/// halving sequence which ends at the `value ∓ 1` neighbour. Arithmetic runs
/// in i128 so the full i64 range cannot overflow.
pub(crate) fn integer_candidates(value: i128, target: i128) -> Vec<i128> {
    if value == target {
        return Vec::new();
    }
    let mut out = vec![target];
    let mut delta = (value - target) / 2;
    while delta != 0 {
        let candidate = value - delta;
        if !out.contains(&candidate) {
            out.push(candidate);
        }
        delta /= 2;
    }
    out
}

pub(crate) fn shrinkable_i64(value: i64, min: i64, max: i64) -> Shrinkable<i64> {
    let target = shrink_target(min as i128, max as i128);
    shrinkable_i64_toward(value as i128, target)
}

fn shrinkable_i64_toward(value: i128, target: i128) -> Shrinkable<i64> {
    Shrinkable::with_shrinks(value as i64, move || {
        integer_candidates(value, target)
            .into_iter()
            .map(|candidate| shrinkable_i64_toward(candidate, target))
            .collect()
    })
}

/// Index shrinkable used by position-ordered choices: shrinks toward index 0
pub(crate) fn shrinkable_index(value: usize) -> Shrinkable<usize> {
    shrinkable_i64(value as i64, 0, i64::MAX).map(|v| v as usize)
}

pub(crate) fn dedup_preserving_order<T: PartialEq>(values: Vec<T>) -> Vec<T> {
    let mut out = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

fn bounded_edge_cases(min: i64, max: i64) -> Vec<i64> {
    let candidates = vec![min, max, 0, 1, -1, 2, -2];
    dedup_preserving_order(
        candidates
            .into_iter()
            .filter(|v| (min..=max).contains(v))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Integral builders
// ---------------------------------------------------------------------------

/// Builder for integral arbitraries of a fixed-width type.
///
/// Without [`between`](IntArbitrary::between) the practical range is derived
/// from genSize via [`default_max_from_tries`], clamped to the type's bounds,
/// and the type extremes are injected as edge cases.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntArbitrary<T> {
    range: Option<(T, T)>,
}

macro_rules! impl_int_arbitrary {
    ($t:ty) => {
        #[allow(clippy::unnecessary_cast)]
        impl IntArbitrary<$t> {
            /// Constrain generation to `[min, max]` inclusive
            pub fn between(mut self, min: $t, max: $t) -> Self {
                assert!(min <= max, "min must not exceed max");
                self.range = Some((min, max));
                self
            }

            pub fn arbitrary(&self) -> Arbitrary<$t> {
                let range = self.range;
                Arbitrary::from_gen_factory(move |gen_size| {
                    let (min, max) = match range {
                        Some((min, max)) => (min as i64, max as i64),
                        None => {
                            let bound = default_max_from_tries(gen_size) as i64;
                            (
                                (-bound).max(<$t>::MIN as i64),
                                bound.min(<$t>::MAX as i64),
                            )
                        }
                    };
                    let samples: Vec<$t> = match range {
                        Some(_) => bounded_edge_cases(min, max)
                            .into_iter()
                            .map(|v| v as $t)
                            .collect(),
                        None => vec![0, <$t>::MIN, <$t>::MAX],
                    };
                    RandomGenerator::new(move |source| {
                        let value = source.next_i64_between(min, max);
                        Ok(shrinkable_i64(value, min, max).map(|v| v as $t))
                    })
                    .with_samples(samples)
                })
                .with_exhaustive_factory({
                    let range = self.range;
                    move || {
                        let (min, max) = range?;
                        let span = (max as i128 - min as i128 + 1) as u64;
                        if span > MAX_ENUMERATED {
                            return None;
                        }
                        Some(ExhaustiveGenerator::new(span, move || Box::new(min..=max)))
                    }
                })
            }

            pub fn generator(&self, gen_size: u32) -> RandomGenerator<$t> {
                self.arbitrary().generator(gen_size)
            }

            pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<$t>> {
                self.arbitrary().exhaustive()
            }
        }
    };
}

impl_int_arbitrary!(i8);
impl_int_arbitrary!(i16);
impl_int_arbitrary!(i32);
impl_int_arbitrary!(i64);

// ---------------------------------------------------------------------------
// Big integers
// ---------------------------------------------------------------------------

/// Builder for arbitrary-precision integer arbitraries.
#[derive(Debug, Clone, Default)]
pub struct BigIntArbitrary {
    range: Option<(BigInt, BigInt)>,
}

impl BigIntArbitrary {
    /// Constrain generation to `[min, max]` inclusive
    pub fn between(mut self, min: BigInt, max: BigInt) -> Self {
        assert!(min <= max, "min must not exceed max");
        self.range = Some((min, max));
        self
    }

    pub fn arbitrary(&self) -> Arbitrary<BigInt> {
        let range = self.range.clone();
        let exhaustive_range = self.range.clone();
        Arbitrary::from_gen_factory(move |gen_size| {
            let (min, max) = range.clone().unwrap_or_else(|| {
                let bound = BigInt::from(default_max_from_tries(gen_size));
                (-bound.clone(), bound)
            });
            let samples = big_int_edge_cases(&min, &max);
            RandomGenerator::new(move |source| {
                use num_bigint::RandBigInt;
                let upper = max.clone() + BigInt::one();
                let value = source.inner_mut().gen_bigint_range(&min, &upper);
                Ok(shrinkable_big_int(value, min.clone(), max.clone()))
            })
            .with_samples(samples)
        })
        .with_exhaustive_factory(move || {
            let (min, max) = exhaustive_range.clone()?;
            let span = (&max - &min + BigInt::one()).to_u64()?;
            if span > MAX_ENUMERATED {
                return None;
            }
            Some(ExhaustiveGenerator::new(span, move || {
                let last = max.clone();
                Box::new(std::iter::successors(Some(min.clone()), move |prev| {
                    if *prev < last {
                        Some(prev + BigInt::one())
                    } else {
                        None
                    }
                }))
            }))
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<BigInt> {
        self.arbitrary().generator(gen_size)
    }

    pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<BigInt>> {
        self.arbitrary().exhaustive()
    }
}

fn big_int_edge_cases(min: &BigInt, max: &BigInt) -> Vec<BigInt> {
    let mut candidates = vec![min.clone(), max.clone()];
    for small in -10i32..=10 {
        candidates.push(BigInt::from(small));
    }
    dedup_preserving_order(
        candidates
            .into_iter()
            .filter(|v| v >= min && v <= max)
            .collect(),
    )
}

fn big_shrink_target(min: &BigInt, max: &BigInt) -> BigInt {
    if !min.is_positive() && !max.is_negative() {
        BigInt::zero()
    } else if min.is_positive() {
        min.clone()
    } else {
        max.clone()
    }
}

fn shrinkable_big_int(value: BigInt, min: BigInt, max: BigInt) -> Shrinkable<BigInt> {
    let target = big_shrink_target(&min, &max);
    shrinkable_big_toward(value, target)
}

fn shrinkable_big_toward(value: BigInt, target: BigInt) -> Shrinkable<BigInt> {
    Shrinkable::with_shrinks(value.clone(), move || {
        if value == target {
            return Vec::new();
        }
        let mut candidates = vec![target.clone()];
        let mut delta: BigInt = (&value - &target) / 2;
        while !delta.is_zero() {
            let candidate = &value - &delta;
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
            delta /= 2;
        }
        candidates
            .into_iter()
            .map(|candidate| shrinkable_big_toward(candidate, target.clone()))
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Floating point builders
// ---------------------------------------------------------------------------

/// Builder for floating point arbitraries with a decimal scale.
///
/// Values are snapped to the `10^-scale` grid unless the configured interval
/// is narrower than one grid step, in which case the endpoints win and raw
/// values are drawn inside `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct FloatArbitrary<T> {
    range: Option<(T, T)>,
    scale: u32,
}

impl<T> Default for FloatArbitrary<T> {
    fn default() -> Self {
        Self { range: None, scale: 2 }
    }
}

macro_rules! impl_float_arbitrary {
    ($t:ty, $next_fn:ident) => {
        impl FloatArbitrary<$t> {
            /// Constrain generation to `[min, max]` inclusive
            pub fn between(mut self, min: $t, max: $t) -> Self {
                assert!(min.is_finite() && max.is_finite(), "bounds must be finite");
                assert!(min <= max, "min must not exceed max");
                self.range = Some((min, max));
                self
            }

            /// Fix the number of decimal places
            pub fn of_scale(mut self, scale: u32) -> Self {
                self.scale = scale;
                self
            }

            fn round_to_scale(value: $t, scale: u32) -> $t {
                let factor = (10.0 as $t).powi(scale as i32);
                let scaled = value * factor;
                // Past 2^53-ish the grid spacing exceeds one, rounding is identity
                if !scaled.is_finite() || scaled.abs() >= 9.0e15 as $t {
                    return value;
                }
                scaled.round() / factor
            }

            fn grid_up(value: $t, scale: u32) -> $t {
                let factor = (10.0 as $t).powi(scale as i32);
                let scaled = value * factor;
                if !scaled.is_finite() || scaled.abs() >= 9.0e15 as $t {
                    return value;
                }
                scaled.ceil() / factor
            }

            fn grid_down(value: $t, scale: u32) -> $t {
                let factor = (10.0 as $t).powi(scale as i32);
                let scaled = value * factor;
                if !scaled.is_finite() || scaled.abs() >= 9.0e15 as $t {
                    return value;
                }
                scaled.floor() / factor
            }

            fn edge_cases(min: $t, max: $t, scale: u32, narrow: bool, bounded: bool) -> Vec<$t> {
                if !bounded {
                    return vec![0.0, 0.01, -0.01, <$t>::MAX, -<$t>::MAX];
                }
                if narrow {
                    return dedup_preserving_order(vec![min, max]);
                }
                let candidates = vec![
                    0.0,
                    1.0,
                    -1.0,
                    Self::grid_up(min, scale),
                    Self::grid_down(max, scale),
                ];
                dedup_preserving_order(
                    candidates
                        .into_iter()
                        .filter(|v| (min..=max).contains(v))
                        .collect(),
                )
            }

            fn shrink_candidates(value: $t, target: $t, scale: u32, narrow: bool) -> Vec<$t> {
                if value == target {
                    return Vec::new();
                }
                let step = (10.0 as $t).powi(-(scale as i32));
                let mut out = vec![target];
                let mut delta = value / 2.0 - target / 2.0;
                for _ in 0..64 {
                    if delta == 0.0 || (!narrow && delta.abs() < step) {
                        break;
                    }
                    let raw = value - delta;
                    let candidate = if narrow { raw } else { Self::round_to_scale(raw, scale) };
                    let closer = (candidate - target).abs() < (value - target).abs();
                    if closer && candidate != value && !out.contains(&candidate) {
                        out.push(candidate);
                    }
                    delta = delta / 2.0;
                }
                out
            }

            fn shrinkable(value: $t, target: $t, scale: u32, narrow: bool) -> Shrinkable<$t> {
                Shrinkable::with_shrinks(value, move || {
                    Self::shrink_candidates(value, target, scale, narrow)
                        .into_iter()
                        .map(|candidate| Self::shrinkable(candidate, target, scale, narrow))
                        .collect()
                })
            }

            pub fn arbitrary(&self) -> Arbitrary<$t> {
                let config = *self;
                Arbitrary::from_gen_factory(move |_gen_size| {
                    let bounded = config.range.is_some();
                    let (min, max) = config.range.unwrap_or((-<$t>::MAX, <$t>::MAX));
                    let scale = config.scale;
                    let step = (10.0 as $t).powi(-(scale as i32));
                    let narrow = max - min < step;
                    let target = {
                        let raw = if min <= 0.0 && 0.0 <= max {
                            0.0
                        } else if min > 0.0 {
                            if narrow { min } else { Self::grid_up(min, scale) }
                        } else {
                            if narrow { max } else { Self::grid_down(max, scale) }
                        };
                        raw
                    };
                    let samples = Self::edge_cases(min, max, scale, narrow, bounded);
                    RandomGenerator::new(move |source| {
                        let raw = source.$next_fn(min, max);
                        let value = if narrow {
                            raw
                        } else {
                            let rounded = Self::round_to_scale(raw, scale);
                            if rounded < min {
                                rounded + step
                            } else if rounded > max {
                                rounded - step
                            } else {
                                rounded
                            }
                        };
                        Ok(Self::shrinkable(value, target, scale, narrow))
                    })
                    .with_samples(samples)
                })
            }

            pub fn generator(&self, gen_size: u32) -> RandomGenerator<$t> {
                self.arbitrary().generator(gen_size)
            }
        }
    };
}

impl_float_arbitrary!(f32, next_f32_between);
impl_float_arbitrary!(f64, next_f64_between);

// ---------------------------------------------------------------------------
// Big decimals
// ---------------------------------------------------------------------------

/// Builder for arbitrary-precision decimal arbitraries.
///
/// Generation works on the integer grid of unscaled values, so shrinking
/// reuses the big-integer machinery and every emitted value carries at most
/// `scale` decimal places.
#[derive(Debug, Clone)]
pub struct BigDecimalArbitrary {
    range: Option<(BigDecimal, BigDecimal)>,
    scale: u32,
}

impl Default for BigDecimalArbitrary {
    fn default() -> Self {
        Self { range: None, scale: 2 }
    }
}

impl BigDecimalArbitrary {
    /// Constrain generation to `[min, max]` inclusive
    pub fn between(mut self, min: BigDecimal, max: BigDecimal) -> Self {
        assert!(min <= max, "min must not exceed max");
        self.range = Some((min, max));
        self
    }

    /// Fix the number of decimal places
    pub fn of_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn arbitrary(&self) -> Arbitrary<BigDecimal> {
        let config = self.clone();
        Arbitrary::from_gen_factory(move |gen_size| {
            let (min, max) = config.range.clone().unwrap_or_else(|| {
                let bound = BigDecimal::from(default_max_from_tries(gen_size));
                (-bound.clone(), bound)
            });
            let scale = config.scale;
            let factor = BigDecimal::new(BigInt::from(10).pow(scale), 0);
            let grid_min = (min.clone() * factor.clone())
                .with_scale_round(0, RoundingMode::Ceiling)
                .into_bigint_and_exponent()
                .0;
            let grid_max = (max.clone() * factor.clone())
                .with_scale_round(0, RoundingMode::Floor)
                .into_bigint_and_exponent()
                .0;
            if grid_min > grid_max {
                // Interval narrower than one grid step: endpoints override scale
                let samples = dedup_preserving_order(vec![min.clone(), max.clone()]);
                let (lo, hi) = (min.clone(), max.clone());
                return RandomGenerator::new(move |source| {
                    let lo_f = lo.to_f64().unwrap_or(0.0);
                    let hi_f = hi.to_f64().unwrap_or(0.0);
                    let raw = source.next_f64_between(lo_f, hi_f);
                    let value = BigDecimal::from_f64(raw)
                        .map(|v| v.max(lo.clone()).min(hi.clone()))
                        .unwrap_or_else(|| lo.clone());
                    Ok(Shrinkable::unshrinkable(value))
                })
                .with_samples(samples);
            }
            let samples = big_decimal_edge_cases(&grid_min, &grid_max, scale);
            RandomGenerator::new(move |source| {
                use num_bigint::RandBigInt;
                let upper = grid_max.clone() + BigInt::one();
                let unscaled = source.inner_mut().gen_bigint_range(&grid_min, &upper);
                let shrinkable =
                    shrinkable_big_int(unscaled, grid_min.clone(), grid_max.clone());
                Ok(shrinkable.map(move |n| BigDecimal::new(n, scale as i64)))
            })
            .with_samples(samples)
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<BigDecimal> {
        self.arbitrary().generator(gen_size)
    }
}

fn big_decimal_edge_cases(grid_min: &BigInt, grid_max: &BigInt, scale: u32) -> Vec<BigDecimal> {
    let one_on_grid = BigInt::from(10).pow(scale);
    let candidates = vec![
        BigInt::zero(),
        one_on_grid.clone(),
        -one_on_grid,
        grid_min.clone(),
        grid_max.clone(),
    ];
    dedup_preserving_order(
        candidates
            .into_iter()
            .filter(|v| v >= grid_min && v <= grid_max)
            .map(|unscaled| BigDecimal::new(unscaled, scale as i64))
            .collect(),
    )
}
