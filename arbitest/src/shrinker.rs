//! Descent through shrink trees toward a locally minimal counterexample.

use crate::config::ShrinkingMode;
use crate::shrinkable::Shrinkable;

/// Result of a shrinking run
#[derive(Debug, Clone)]
pub struct ShrinkResult<T> {
    /// The originally generated failing value
    pub original: T,
    /// The smallest failing value found
    pub minimal: T,
    /// Number of successful descents
    pub steps: usize,
    /// False when the step cap stopped the descent early
    pub completed: bool,
}

/// Walks a failing shrinkable's tree, descending into the first candidate
/// that still fails, until no child fails.
///
/// Ties between candidates are broken by shrink-sequence order. The
/// well-founded order of shrink trees guarantees termination; the step cap is
/// a safety net for pathological custom trees.
pub struct Shrinker {
    max_steps: usize,
}

impl Shrinker {
    pub fn new() -> Self {
        Self { max_steps: 1000 }
    }

    pub fn with_max_steps(max_steps: usize) -> Self {
        assert!(max_steps > 0, "max steps must be positive");
        Self { max_steps }
    }

    /// A shrinker honoring the configured shrinking mode
    pub fn for_mode(mode: ShrinkingMode) -> Option<Self> {
        match mode {
            ShrinkingMode::Off => None,
            ShrinkingMode::Full => Some(Self::new()),
            ShrinkingMode::Bounded(steps) => Some(Self::with_max_steps(steps)),
        }
    }

    /// Minimise a failing value. `property` returns true when it holds; the
    /// input shrinkable is expected to fail it.
    pub fn minimize<T: Clone + 'static>(
        &self,
        failing: &Shrinkable<T>,
        property: impl Fn(&T) -> bool,
    ) -> ShrinkResult<T> {
        let original = failing.value().clone();
        if property(&original) {
            // Not actually failing, nothing to minimise
            return ShrinkResult {
                minimal: original.clone(),
                original,
                steps: 0,
                completed: true,
            };
        }
        let mut current = failing.clone();
        let mut steps = 0;
        while steps < self.max_steps {
            let next = current
                .shrinks()
                .into_iter()
                .find(|candidate| !property(candidate.value()));
            match next {
                Some(smaller) => {
                    current = smaller;
                    steps += 1;
                }
                None => {
                    return ShrinkResult {
                        original,
                        minimal: current.into_value(),
                        steps,
                        completed: true,
                    };
                }
            }
        }
        ShrinkResult {
            original,
            minimal: current.into_value(),
            steps,
            completed: false,
        }
    }
}

impl Default for Shrinker {
    fn default() -> Self {
        Self::new()
    }
}
