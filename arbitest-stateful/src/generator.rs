//! Action generators: where the next step of a sequence comes from.

use std::rc::Rc;

use arbitest::{Arbitrary, RandomGenerator, RandomSource, MAX_MISSES};

use crate::action::Action;

/// Source of actions for a running sequence.
///
/// `next_action` sees the current model, so implementations can respect
/// action preconditions; `None` means the generator is exhausted.
pub trait ActionGenerator<M> {
    fn next_action(&mut self, model: &M) -> Option<Rc<dyn Action<M>>>;
}

/// Draws actions from an [`Arbitrary`], retrying draws whose precondition
/// does not hold in the current state.
pub struct RandomActionGenerator<M> {
    generator: RandomGenerator<Rc<dyn Action<M>>>,
    source: RandomSource,
}

impl<M: 'static> RandomActionGenerator<M> {
    pub fn new(
        arbitrary: &Arbitrary<Rc<dyn Action<M>>>,
        gen_size: u32,
        source: RandomSource,
    ) -> Self {
        Self {
            generator: arbitrary.generator(gen_size),
            source,
        }
    }
}

impl<M: 'static> ActionGenerator<M> for RandomActionGenerator<M> {
    fn next_action(&mut self, model: &M) -> Option<Rc<dyn Action<M>>> {
        for _ in 0..MAX_MISSES {
            let drawn = self.generator.next(&mut self.source).ok()?;
            let action = drawn.into_value();
            if action.precondition(model) {
                return Some(action);
            }
        }
        None
    }
}

/// Replays a fixed action list, skipping actions whose precondition does not
/// hold; this keeps removal-shrunk sequences runnable.
pub struct FixedActionGenerator<M> {
    actions: Vec<Rc<dyn Action<M>>>,
    cursor: usize,
}

impl<M> FixedActionGenerator<M> {
    pub fn new(actions: Vec<Rc<dyn Action<M>>>) -> Self {
        Self { actions, cursor: 0 }
    }
}

impl<M> ActionGenerator<M> for FixedActionGenerator<M> {
    fn next_action(&mut self, model: &M) -> Option<Rc<dyn Action<M>>> {
        while self.cursor < self.actions.len() {
            let action = Rc::clone(&self.actions[self.cursor]);
            self.cursor += 1;
            if action.precondition(model) {
                return Some(action);
            }
        }
        None
    }
}

/// An arbitrary of action lists, sized `1..=max_actions`, shrinking by
/// removing actions first; feed the generated lists to
/// [`ActionSequence::from_actions`](crate::sequence::ActionSequence::from_actions).
pub fn action_sequences<M: 'static>(
    actions: &Arbitrary<Rc<dyn Action<M>>>,
    max_actions: usize,
) -> Arbitrary<Vec<Rc<dyn Action<M>>>> {
    assert!(max_actions >= 1, "a sequence needs room for at least one action");
    actions
        .list()
        .of_min_size(1)
        .of_max_size(max_actions)
        .arbitrary()
}
