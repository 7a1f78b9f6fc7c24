//! Acceptance tests for the built-in arbitraries, end to end through the
//! public API.

pub mod common;

use common::*;

use arbitest::{arbitraries, RandomSource, Shrinkable};
use num_bigint::BigInt;

#[test]
fn random_values() {
    let arbitrary = arbitraries::random_value(|source| source.next_i64_between(0, 9).to_string());
    let generator = arbitrary.generator(1);
    assert_all_generated(&generator, |value| value.parse::<i64>().unwrap() < 10);
    assert_at_least_one_generated_of(
        &generator,
        &["1", "2", "3", "4", "5", "6", "7", "8", "9"].map(String::from),
    );
}

#[test]
fn from_generator() {
    let arbitrary = arbitraries::from_generator(|source| {
        Shrinkable::unshrinkable(source.next_i64_between(0, 9).to_string())
    });
    assert_all_generated(&arbitrary.generator(1), |value| {
        value.parse::<i64>().unwrap() < 10
    });
}

#[test]
fn of_values() {
    let arbitrary = arbitraries::of(vec!["1", "hallo", "test"]);
    let generator = arbitrary.generator(1);
    assert_all_generated(&generator, |value| ["1", "hallo", "test"].contains(value));
    assert_at_least_one_generated_of(&generator, &["1", "hallo", "test"]);
}

#[test]
fn of_enum() {
    let arbitrary = arbitraries::of_enum::<bool>();
    let generator = arbitrary.generator(1);
    assert_at_least_one_generated_of(&generator, &[true, false]);
}

#[test]
fn samples_are_generated_deterministically_in_round_robin() {
    let arbitrary = arbitraries::samples(vec![-5, 0, 3]);
    let generator = arbitrary.generator(1);
    assert_generated_exactly(&generator, &[-5, 0, 3, -5, 0, 3]);
}

#[test]
fn randoms() {
    let arbitrary = arbitraries::randoms();
    let generator = arbitrary.generator(1);
    for mut source in values(&generator, 100) {
        assert!(source.next_usize_below(100) < 100);
    }
}

#[test]
fn constant() {
    let arbitrary = arbitraries::constant("hello");
    assert_all_generated(&arbitrary.generator(1000), |value| *value == "hello");
}

#[test]
fn create() {
    let arbitrary = arbitraries::create(|| "hello");
    assert_all_generated(&arbitrary.generator(1000), |value| *value == "hello");
}

mod shuffle {
    use super::*;

    #[test]
    fn some_values() {
        let arbitrary = arbitraries::shuffle(vec![1, 2, 3]);
        assert_permutations(&arbitrary.generator(1000));
    }

    #[test]
    fn no_values() {
        let arbitrary = arbitraries::shuffle(Vec::<i32>::new());
        assert_all_generated(&arbitrary.generator(1000), |list| list.is_empty());
    }

    fn assert_permutations(generator: &arbitest::RandomGenerator<Vec<i32>>) {
        assert_at_least_one_generated_of(
            generator,
            &[
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ],
        );
    }
}

mod one_of {
    use super::*;

    #[test]
    fn chooses_one_of_many_arbitraries() {
        let one = arbitraries::of(vec![1]);
        let two = arbitraries::of(vec![2]);
        let three_to_five = arbitraries::of(vec![3, 4, 5]);
        let arbitrary = arbitraries::one_of(vec![one, two, three_to_five]);
        let generator = arbitrary.generator(1000);
        assert_all_generated(&generator, |value| (1..=5).contains(value));
        assert_at_least_one_generated_of(&generator, &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn hands_down_configurations() {
        let arbitrary = arbitraries::one_of(vec![
            arbitraries::strings().with_char_range('a', 'z').of_length(2).arbitrary(),
            arbitraries::strings().with_char_range('a', 'z').of_length(3).arbitrary(),
        ]);
        assert_all_generated(&arbitrary.generator(1000), |value| {
            value.len() == 2 || value.len() == 3
        });
    }
}

mod frequency_of {
    use super::*;

    #[test]
    fn chooses_one_of_many_according_to_frequency() {
        let one = arbitraries::of(vec![1]);
        let two = arbitraries::of(vec![2]);
        let arbitrary = arbitraries::frequency_of(vec![(10, one), (1, two)]);
        let generator = arbitrary.generator(1000);
        assert_all_generated(&generator, |value| (1..=2).contains(value));
        assert_at_least_one_generated_of(&generator, &[1, 2]);

        let counts = count_values(&generator, 100);
        let ones = counts.get(&1).copied().unwrap_or(0);
        let twos = counts.get(&2).copied().unwrap_or(0);
        assert!(ones > twos * 2);
    }
}

mod recursion {
    use super::*;

    #[test]
    fn lazy() {
        let arbitrary = arbitraries::lazy(|| arbitraries::samples(vec![1, 2, 3]));
        assert_generated_exactly(&arbitrary.generator(1000), &[1, 2, 3, 1]);
        assert_generated_exactly(&arbitrary.generator(1000), &[1, 2, 3, 1]);
    }

    #[test]
    fn recursive() {
        let base = arbitraries::constant(0);
        let arbitrary = arbitraries::recursive(base, |inner| inner.map(|i| i + 1), 3);
        assert_generated_exactly(&arbitrary.generator(1000), &[3]);
    }
}

mod frequency {
    use super::*;

    #[test]
    fn one_pair() {
        let arbitrary = arbitraries::frequency(vec![(1, "a")]);
        assert_all_generated(&arbitrary.generator(1000), |value| *value == "a");
    }

    #[test]
    fn two_equal_pairs() {
        let arbitrary = arbitraries::frequency(vec![(1, "a"), (1, "b")]);
        let counts = count_values(&arbitrary.generator(1000), 1000);
        assert!(counts.get("a").copied().unwrap_or(0) > 200);
        assert!(counts.get("b").copied().unwrap_or(0) > 200);
    }

    #[test]
    fn two_unequal_pairs() {
        let arbitrary = arbitraries::frequency(vec![(1, "a"), (10, "b")]);
        let counts = count_values(&arbitrary.generator(1000), 1000);
        assert!(counts.get("a").copied().unwrap_or(0) < counts.get("b").copied().unwrap_or(0));
    }

    #[test]
    fn four_unequal_pairs() {
        let arbitrary =
            arbitraries::frequency(vec![(1, "a"), (5, "b"), (10, "c"), (20, "d")]);
        let counts = count_values(&arbitrary.generator(1000), 1000);
        let count_of = |key: &str| counts.get(key).copied().unwrap_or(0);
        assert!(count_of("a") < count_of("b"));
        assert!(count_of("b") < count_of("c"));
        assert!(count_of("c") < count_of("d"));
    }

    #[test]
    #[should_panic(expected = "at least one positive weight")]
    fn no_positive_frequencies() {
        let _ = arbitraries::frequency(vec![(0, "a")]);
    }
}

mod defaults {
    use super::*;
    use arbitest::Providers;

    #[test]
    fn simple_type() {
        let providers = Providers::new();
        let arbitrary = providers.default_for::<i32>();
        assert_all_generated(&arbitrary.generator(1000), |_| true);
    }

    #[test]
    fn parameterized_type() {
        let providers = Providers::new();
        let arbitrary = providers.default_for::<Vec<String>>();
        assert_all_generated(&arbitrary.generator(100), |list| {
            list.iter().all(|s| s.chars().all(|c| (' '..='~').contains(&c)))
        });
    }

    #[test]
    fn more_than_one_registration() {
        let mut providers = Providers::new();
        providers.register(arbitraries::of(vec![1i32]));
        providers.register(arbitraries::of(vec![2i32]));
        let arbitrary = providers.registered_for::<i32>().unwrap();
        let generator = arbitrary.generator(1000);
        assert_at_least_one_generated(&generator, |value| *value == 1);
        assert_at_least_one_generated(&generator, |value| *value == 2);
    }
}

mod chars {
    use super::*;

    #[test]
    fn chars_default() {
        let arbitrary = arbitraries::chars().arbitrary();
        assert_all_generated(&arbitrary.generator(1), |value| (' '..='~').contains(value));
    }

    #[test]
    fn chars_in_range() {
        let arbitrary = arbitraries::chars().between('a', 'd').arbitrary();
        assert_all_generated(&arbitrary.generator(1), |value| {
            ['a', 'b', 'c', 'd'].contains(value)
        });
    }
}

mod strings {
    use super::*;

    #[test]
    fn string_from_range() {
        let arbitrary = arbitraries::strings()
            .with_char_range('a', 'd')
            .of_min_length(0)
            .of_max_length(5)
            .arbitrary();
        let generator = arbitrary.generator(1);
        assert_all_generated(&generator, |value| {
            value.len() <= 5 && value.chars().all(|c| ('a'..='d').contains(&c))
        });
    }

    #[test]
    fn string_with_fixed_length() {
        for size in 1..=10usize {
            let arbitrary = arbitraries::strings()
                .with_char_range('a', 'a')
                .of_min_length(size)
                .of_max_length(size)
                .arbitrary();
            let generator = arbitrary.generator(1);
            assert_all_generated(&generator, |value| {
                value.len() == size && value.chars().all(|c| c == 'a')
            });
        }
    }

    #[test]
    fn string_from_charset() {
        let arbitrary = arbitraries::strings()
            .with_chars(&['a', 'b', 'c', 'd'])
            .of_min_length(2)
            .of_max_length(5)
            .arbitrary();
        assert_all_generated(&arbitrary.generator(1), |value| {
            (2..=5).contains(&value.len())
                && value.chars().all(|c| ['a', 'b', 'c', 'd'].contains(&c))
        });
    }
}

mod numbers {
    use super::*;

    #[test]
    fn shorts() {
        let arbitrary = arbitraries::shorts().arbitrary();
        assert_all_generated(&arbitrary.generator(100), |_| true);
    }

    #[test]
    fn shorts_mins_and_maxes() {
        let arbitrary = arbitraries::shorts().between(-10, 10).arbitrary();
        let generator = arbitrary.generator(100);
        assert_at_least_one_generated(&generator, |value| *value < 0 && *value > -5);
        assert_at_least_one_generated(&generator, |value| *value > 0 && *value < 5);
        assert_all_generated(&generator, |value| (-10..=10).contains(value));
    }

    #[test]
    fn bytes_mins_and_maxes() {
        let arbitrary = arbitraries::bytes().between(-10, 10).arbitrary();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value < 0 && *value > -5);
        assert_at_least_one_generated(&generator, |value| *value > 0 && *value < 5);
        assert_all_generated(&generator, |value| (-10..=10).contains(value));
    }

    #[test]
    fn integer_mins_and_maxes() {
        let generator = arbitraries::integers().generator(1);
        assert_at_least_one_generated(&generator, |value| *value == i32::MIN);
        assert_at_least_one_generated(&generator, |value| *value == i32::MAX);
    }

    #[test]
    fn integers_in_range() {
        let arbitrary = arbitraries::integers().between(-10, 10).arbitrary();
        let generator = arbitrary.generator(10);
        assert_at_least_one_generated(&generator, |value| *value < 0 && *value > -5);
        assert_at_least_one_generated(&generator, |value| *value > 0 && *value < 5);
        assert_all_generated(&generator, |value| (-10..=10).contains(value));
    }

    #[test]
    fn long_mins_and_maxes() {
        let generator = arbitraries::longs().generator(1);
        assert_at_least_one_generated(&generator, |value| *value == i64::MIN);
        assert_at_least_one_generated(&generator, |value| *value == i64::MAX);
    }

    #[test]
    fn longs_in_range() {
        let arbitrary = arbitraries::longs().between(-100, 100).arbitrary();
        let generator = arbitrary.generator(1000);
        assert_at_least_one_generated(&generator, |value| *value < -50);
        assert_at_least_one_generated(&generator, |value| *value > 50);
        assert_all_generated(&generator, |value| (-100..=100).contains(value));
    }

    #[test]
    fn big_integers() {
        let arbitrary = arbitraries::big_integers()
            .between(BigInt::from(-100), BigInt::from(100))
            .arbitrary();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value < BigInt::from(50));
        assert_at_least_one_generated(&generator, |value| *value > BigInt::from(50));
        assert_all_generated(&generator, |value| {
            *value >= BigInt::from(-100) && *value <= BigInt::from(100)
        });
    }

    #[test]
    fn integral_edge_cases_are_generated() {
        let arbitrary = arbitraries::big_integers()
            .between(BigInt::from(i32::MIN), BigInt::from(i32::MAX))
            .arbitrary();
        let generator = arbitrary.generator(1000);
        let mut expected: Vec<BigInt> = (-10i64..=10).map(BigInt::from).collect();
        expected.push(BigInt::from(i32::MIN));
        expected.push(BigInt::from(i32::MAX));
        assert_at_least_one_generated_of(&generator, &expected);
    }

    #[test]
    fn double_mins_and_maxes() {
        let generator = arbitraries::doubles().generator(1);
        assert_at_least_one_generated(&generator, |value| *value == 0.01);
        assert_at_least_one_generated(&generator, |value| *value == -0.01);
        assert_at_least_one_generated(&generator, |value| *value == f64::MAX);
        assert_at_least_one_generated(&generator, |value| *value == -f64::MAX);
    }

    #[test]
    fn doubles() {
        let arbitrary = arbitraries::doubles().between(-10.0, 10.0).of_scale(2).arbitrary();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value == 0.0);
        assert_at_least_one_generated(&generator, |value| *value < -1.0 && *value > -9.0);
        assert_at_least_one_generated(&generator, |value| *value > 1.0 && *value < 9.0);
        assert_all_generated(&generator, |value| {
            let rounded = (value * 100.0).round() / 100.0;
            (-10.0..=10.0).contains(value) && *value == rounded
        });
    }

    #[test]
    fn doubles_with_maximum_range() {
        let arbitrary = arbitraries::doubles()
            .between(-f64::MAX, f64::MAX)
            .of_scale(2)
            .arbitrary();
        let generator = arbitrary.generator(100);
        assert_at_least_one_generated(&generator, |value| *value == 0.0);
        assert_at_least_one_generated(&generator, |value| *value < -1000.0);
        assert_at_least_one_generated(&generator, |value| *value > 1000.0);
    }

    #[test]
    fn doubles_border_is_more_precise_than_scale() {
        let arbitrary = arbitraries::doubles().between(0.001, 0.199).of_scale(2).arbitrary();
        assert_all_generated(&arbitrary.generator(100), |value| {
            (0.001..=0.199).contains(value)
        });
    }

    #[test]
    fn doubles_borders_are_closer_than_scale() {
        let arbitrary = arbitraries::doubles().between(0.001, 0.002).of_scale(2).arbitrary();
        assert_all_generated(&arbitrary.generator(100), |value| {
            (0.001..=0.002).contains(value)
        });
    }

    #[test]
    fn float_mins_and_maxes() {
        let generator = arbitraries::floats().generator(1);
        assert_at_least_one_generated_of(&generator, &[0.01f32, -0.01, f32::MAX, -f32::MAX]);
    }

    #[test]
    fn floats() {
        let arbitrary = arbitraries::floats().between(-10.0, 10.0).of_scale(2).arbitrary();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value == 0.0);
        assert_at_least_one_generated(&generator, |value| *value < -1.0 && *value > -9.0);
        assert_at_least_one_generated(&generator, |value| *value > 1.0 && *value < 9.0);
        assert_all_generated(&generator, |value| {
            let rounded = ((value * 100.0).round() / 100.0) as f32;
            (-10.0..=10.0).contains(value) && *value == rounded
        });
    }

    #[test]
    fn big_decimals() {
        use bigdecimal::BigDecimal;
        let arbitrary = arbitraries::big_decimals()
            .between(BigDecimal::from(-10), BigDecimal::from(10))
            .of_scale(2)
            .arbitrary();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value == BigDecimal::from(0));
        assert_at_least_one_generated(&generator, |value| *value == BigDecimal::from(1));
        assert_at_least_one_generated(&generator, |value| *value == BigDecimal::from(-1));
        assert_all_generated(&generator, |value| {
            let (_, exponent) = value.as_bigint_and_exponent();
            exponent <= 2 && *value >= BigDecimal::from(-10) && *value <= BigDecimal::from(10)
        });
    }
}

mod generic_types {
    use super::*;

    #[test]
    fn list() {
        let strings = arbitraries::of(vec!["1", "hallo", "test"]);
        let arbitrary = strings.list().of_min_size(2).of_max_size(5).arbitrary();
        assert_all_generated(&arbitrary.generator(1), |list| {
            (2..=5).contains(&list.len())
                && list.iter().all(|s| ["1", "hallo", "test"].contains(s))
        });
    }

    #[test]
    fn set() {
        let integers = arbitraries::integers().between(1, 10).arbitrary();
        let arbitrary = integers.set().of_min_size(2).of_max_size(7).arbitrary();
        assert_all_generated(&arbitrary.generator(1), |set| {
            (2..=7).contains(&set.len()) && set.iter().all(|v| (1..=10).contains(v))
        });
    }

    #[test]
    fn iterator() {
        let integers = arbitraries::integers().between(1, 10).arbitrary();
        let arbitrary = integers.iterator().of_min_size(0).of_max_size(5).arbitrary();
        let generator = arbitrary.generator(1);
        let mut source = RandomSource::new(TEST_SEED);
        for _ in 0..4 {
            let iterator = generator.next(&mut source).unwrap().into_value();
            let collected: Vec<i32> = iterator.collect();
            assert!(collected.len() <= 5);
            assert!(collected.iter().all(|v| (1..=10).contains(v)));
        }
    }

    #[test]
    fn optional() {
        let strings = arbitraries::of(vec!["one", "two"]);
        let arbitrary = strings.optional();
        let generator = arbitrary.generator(1);
        assert_at_least_one_generated(&generator, |value| *value == Some("one"));
        assert_at_least_one_generated(&generator, |value| *value == Some("two"));
        assert_at_least_one_generated(&generator, |value| value.is_none());
    }

    #[test]
    fn array() {
        let integers = arbitraries::integers().between(1, 10).arbitrary();
        let arbitrary = integers.array().of_min_size(2).of_max_size(5).arbitrary();
        assert_all_generated(&arbitrary.generator(1), |array| {
            (2..=5).contains(&array.len()) && array.iter().all(|v| (1..=10).contains(v))
        });
    }
}
