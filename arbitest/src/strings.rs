//! Character and string arbitraries with configurable character classes.

use std::cell::Cell;
use std::rc::Rc;

use crate::arbitrary::Arbitrary;
use crate::containers::{draw_size, exhaustive_list, resolve_sizes, shrinkable_vec};
use crate::exhaustive::{ExhaustiveGenerator, MAX_ENUMERATED};
use crate::generator::RandomGenerator;
use crate::numeric::integer_candidates;
use crate::rng::RandomSource;
use crate::shrinkable::Shrinkable;

/// The set of characters an arbitrary may draw from: inclusive ranges plus
/// explicit characters, composed additively.
#[derive(Debug, Clone)]
struct CharClass {
    ranges: Vec<(char, char)>,
    chars: Vec<char>,
}

impl CharClass {
    fn printable() -> Self {
        Self {
            ranges: vec![(' ', '~')],
            chars: Vec::new(),
        }
    }

    fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c)) || self.chars.contains(&c)
    }

    fn weight(&self) -> u64 {
        let range_weight: u64 = self
            .ranges
            .iter()
            .map(|(lo, hi)| (*hi as u64) - (*lo as u64) + 1)
            .sum();
        range_weight + self.chars.len() as u64
    }

    fn draw(&self, source: &mut RandomSource) -> char {
        let mut index = source.next_usize_below(self.weight() as usize) as u64;
        for (lo, hi) in &self.ranges {
            let span = (*hi as u64) - (*lo as u64) + 1;
            if index < span {
                // Codepoints inside the surrogate gap fall back to the range start
                return char::from_u32(*lo as u32 + index as u32).unwrap_or(*lo);
            }
            index -= span;
        }
        self.chars[index as usize]
    }

    /// Shrinking moves toward `'a'`, or toward the lowest allowed character
    /// when `'a'` is not in the class
    fn shrink_goal(&self) -> char {
        if self.contains('a') {
            return 'a';
        }
        let lowest_range = self.ranges.iter().map(|(lo, _)| *lo).min();
        let lowest_char = self.chars.iter().copied().min();
        match (lowest_range, lowest_char) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => 'a',
        }
    }

    fn all_chars(&self) -> Vec<char> {
        let mut out = Vec::new();
        for (lo, hi) in &self.ranges {
            for code in (*lo as u32)..=(*hi as u32) {
                if let Some(c) = char::from_u32(code) {
                    out.push(c);
                }
            }
        }
        for c in &self.chars {
            if !out.contains(c) {
                out.push(*c);
            }
        }
        out
    }
}

fn shrinkable_char(value: char, goal: char, class: Rc<CharClass>) -> Shrinkable<char> {
    Shrinkable::with_shrinks(value, move || {
        integer_candidates(value as i128, goal as i128)
            .into_iter()
            .filter_map(|code| char::from_u32(code as u32))
            .filter(|c| class.contains(*c))
            .map(|c| shrinkable_char(c, goal, Rc::clone(&class)))
            .collect()
    })
}

/// Builder for character arbitraries; the default class is printable ASCII.
#[derive(Debug, Clone, Default)]
pub struct CharArbitrary {
    ranges: Vec<(char, char)>,
    chars: Vec<char>,
}

impl CharArbitrary {
    /// Add an inclusive character range to the class
    pub fn between(mut self, min: char, max: char) -> Self {
        assert!(min <= max, "min must not exceed max");
        self.ranges.push((min, max));
        self
    }

    /// Add explicit characters to the class
    pub fn with_chars(mut self, chars: &[char]) -> Self {
        self.chars.extend_from_slice(chars);
        self
    }

    fn class(&self) -> CharClass {
        if self.ranges.is_empty() && self.chars.is_empty() {
            CharClass::printable()
        } else {
            CharClass {
                ranges: self.ranges.clone(),
                chars: self.chars.clone(),
            }
        }
    }

    pub fn arbitrary(&self) -> Arbitrary<char> {
        let class = Rc::new(self.class());
        let exhaustive_class = Rc::clone(&class);
        Arbitrary::from_gen_factory(move |_gen_size| {
            let class = Rc::clone(&class);
            let goal = class.shrink_goal();
            RandomGenerator::new(move |source| {
                let c = class.draw(source);
                Ok(shrinkable_char(c, goal, Rc::clone(&class)))
            })
        })
        .with_exhaustive_factory(move || {
            if exhaustive_class.weight() > MAX_ENUMERATED {
                return None;
            }
            Some(ExhaustiveGenerator::from_values(exhaustive_class.all_chars()))
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<char> {
        self.arbitrary().generator(gen_size)
    }

    pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<char>> {
        self.arbitrary().exhaustive()
    }
}

/// Builder for string arbitraries: a character class plus length bounds.
///
/// Strings shrink like lists: shorter first, then characters toward `'a'`.
#[derive(Debug, Clone, Default)]
pub struct StringArbitrary {
    chars: CharArbitrary,
    min_length: usize,
    max_length: Option<usize>,
}

impl StringArbitrary {
    /// Restrict characters to an inclusive range
    pub fn with_char_range(mut self, min: char, max: char) -> Self {
        self.chars = self.chars.between(min, max);
        self
    }

    /// Add explicit characters to the allowed set
    pub fn with_chars(mut self, chars: &[char]) -> Self {
        self.chars = self.chars.with_chars(chars);
        self
    }

    /// Fix the exact length
    pub fn of_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self.max_length = Some(length);
        self
    }

    /// Require at least `length` characters
    pub fn of_min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }

    /// Allow at most `length` characters
    pub fn of_max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn arbitrary(&self) -> Arbitrary<String> {
        if let Some(max) = self.max_length {
            assert!(self.min_length <= max, "min length must not exceed max length");
        }
        let chars = self.chars.clone();
        let exhaustive_chars = self.chars.clone();
        let (min_length, max_length) = (self.min_length, self.max_length);
        Arbitrary::from_gen_factory(move |gen_size| {
            let (lo, hi) = resolve_sizes(min_length, max_length, gen_size);
            let char_gen = chars.generator(gen_size);
            let draws = Cell::new(0u32);
            RandomGenerator::new(move |source| {
                let length = draw_size(source, lo, hi, &draws);
                let mut items = Vec::with_capacity(length);
                for _ in 0..length {
                    items.push(char_gen.next(source)?);
                }
                Ok(shrinkable_vec(items, lo).map(|chars: Vec<char>| chars.into_iter().collect::<String>()))
            })
        })
        .with_exhaustive_factory(move || {
            let char_arbitrary = exhaustive_chars.arbitrary();
            exhaustive_list(&char_arbitrary, min_length, max_length)
                .map(|lists| lists.map(|chars: Vec<char>| chars.into_iter().collect::<String>()))
        })
    }

    pub fn generator(&self, gen_size: u32) -> RandomGenerator<String> {
        self.arbitrary().generator(gen_size)
    }

    pub fn exhaustive(&self) -> Option<ExhaustiveGenerator<String>> {
        self.arbitrary().exhaustive()
    }
}
