//! The single state-mutating step of a stateful test.

use std::fmt;

/// One operation applicable to a model of type `M`.
///
/// Actions are functional: `run` consumes the current model and returns the
/// next one, or an error message when the operation itself fails. The
/// `Display` rendering is used when a failing sequence is reported.
pub trait Action<M>: fmt::Display {
    /// Execute the action, producing the next model state
    fn run(&self, model: M) -> Result<M, String>;

    /// Whether this action makes sense in the current state
    fn precondition(&self, _model: &M) -> bool {
        true
    }
}
