//! The sequential action-sequence runner.

use std::fmt;
use std::rc::Rc;

use crate::action::Action;
use crate::error::SequenceError;
use crate::generator::{ActionGenerator, FixedActionGenerator};

/// Lifecycle of an [`ActionSequence`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotRun,
    Running,
    Succeeded,
    Failed,
}

/// A named predicate checked against the model after every action.
pub struct Invariant<M> {
    name: String,
    check: Rc<dyn Fn(&M) -> bool>,
}

/// Runs a generated sequence of actions against a model, checking invariants
/// after every step.
///
/// A sequence is built with an intended size, accumulates the actions it
/// actually executed, and is idempotent once terminal: running it again
/// returns the stored outcome unchanged.
pub struct ActionSequence<M> {
    generator: Box<dyn ActionGenerator<M>>,
    intended_size: usize,
    sequence: Vec<Rc<dyn Action<M>>>,
    invariants: Vec<Invariant<M>>,
    run_state: RunState,
    final_model: Option<M>,
    outcome: Option<Result<M, SequenceError>>,
}

impl<M: Clone + fmt::Debug + 'static> ActionSequence<M> {
    /// Create a sequence that will request up to `intended_size` actions
    pub fn new(generator: Box<dyn ActionGenerator<M>>, intended_size: usize) -> Self {
        assert!(
            intended_size >= 1,
            "the intended size of an action sequence must be at least 1"
        );
        Self {
            generator,
            intended_size,
            sequence: Vec::new(),
            invariants: Vec::new(),
            run_state: RunState::NotRun,
            final_model: None,
            outcome: None,
        }
    }

    /// Create a sequence replaying a fixed action list, e.g. a shrunk one
    pub fn from_actions(actions: Vec<Rc<dyn Action<M>>>) -> Self {
        let intended_size = actions.len().max(1);
        Self::new(Box::new(FixedActionGenerator::new(actions)), intended_size)
    }

    /// Add an invariant checked after every action
    pub fn with_invariant(
        mut self,
        name: impl Into<String>,
        check: impl Fn(&M) -> bool + 'static,
    ) -> Self {
        self.invariants.push(Invariant {
            name: name.into(),
            check: Rc::new(check),
        });
        self
    }

    /// Run the sequence against the initial model.
    ///
    /// Requests up to the intended number of actions, executing each and
    /// checking every invariant after it. Terminal runs are idempotent: the
    /// stored outcome is returned without executing anything again.
    pub fn run(&mut self, model: M) -> Result<M, SequenceError> {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        self.run_state = RunState::Running;
        let mut current = model;
        for _ in 0..self.intended_size {
            let action = match self.generator.next_action(&current) {
                Some(action) => action,
                None => break,
            };
            self.sequence.push(Rc::clone(&action));
            let before = current.clone();
            match action.run(current) {
                Ok(next) => current = next,
                Err(cause) => {
                    let message = self.failure_message("Run", &cause, &before);
                    return self.finish_failed(Some(before), SequenceError::ActionFailed { message });
                }
            }
            if let Some(broken) = self.broken_invariant(&current) {
                let cause = format!("invariant '{}' was broken", broken);
                let message = self.failure_message("Invariant", &cause, &current);
                return self
                    .finish_failed(Some(current), SequenceError::InvariantFailed { message });
            }
        }
        if self.sequence.is_empty() {
            return self.finish_failed(None, SequenceError::EmptySequence);
        }
        self.run_state = RunState::Succeeded;
        self.final_model = Some(current.clone());
        self.outcome = Some(Ok(current.clone()));
        Ok(current)
    }

    /// The actions executed so far
    pub fn run_actions(&self) -> &[Rc<dyn Action<M>>] {
        &self.sequence
    }

    /// The model after the last executed action, once the sequence ran
    pub fn final_model(&self) -> Option<&M> {
        self.final_model.as_ref()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    fn broken_invariant(&self, model: &M) -> Option<String> {
        self.invariants
            .iter()
            .find(|invariant| !(invariant.check)(model))
            .map(|invariant| invariant.name.clone())
    }

    fn failure_message(&self, label: &str, cause: &str, model: &M) -> String {
        let actions: Vec<String> = self
            .sequence
            .iter()
            .map(|action| format!("    {}", action))
            .collect();
        format!(
            "{} failed after following actions:\n{}\n  final model: {:?}\n{}",
            label,
            actions.join("\n"),
            model,
            cause
        )
    }

    fn finish_failed(
        &mut self,
        model: Option<M>,
        error: SequenceError,
    ) -> Result<M, SequenceError> {
        self.run_state = RunState::Failed;
        self.final_model = model;
        self.outcome = Some(Err(error.clone()));
        Err(error)
    }
}

impl<M: fmt::Debug> fmt::Debug for ActionSequence<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.run_state == RunState::NotRun {
            return write!(
                f,
                "ActionSequence[{:?}]: {} actions intended",
                self.run_state, self.intended_size
            );
        }
        let actions: Vec<String> = self.sequence.iter().map(|a| a.to_string()).collect();
        write!(f, "ActionSequence[{:?}]: [{}]", self.run_state, actions.join(", "))
    }
}
