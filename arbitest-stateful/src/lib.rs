//! # Arbitest Stateful
//!
//! Stateful testing on top of the arbitest generation core: define actions
//! against a model, generate sequences of them, run each sequence while
//! checking invariants after every step, and shrink failing sequences to
//! minimal counterexamples with the same machinery plain values use.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::fmt;
//! use std::rc::Rc;
//! use arbitest_stateful::{Action, ActionSequence, RunState};
//!
//! #[derive(Debug, Clone)]
//! struct Stack {
//!     items: Vec<i32>,
//! }
//!
//! #[derive(Debug)]
//! enum StackAction {
//!     Push(i32),
//!     Pop,
//! }
//!
//! impl fmt::Display for StackAction {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "{:?}", self)
//!     }
//! }
//!
//! impl Action<Stack> for StackAction {
//!     fn run(&self, mut model: Stack) -> Result<Stack, String> {
//!         match self {
//!             StackAction::Push(value) => model.items.push(*value),
//!             StackAction::Pop => {
//!                 model.items.pop();
//!             }
//!         }
//!         Ok(model)
//!     }
//!
//!     fn precondition(&self, model: &Stack) -> bool {
//!         match self {
//!             StackAction::Pop => !model.items.is_empty(),
//!             _ => true,
//!         }
//!     }
//! }
//!
//! let actions: Vec<Rc<dyn Action<Stack>>> = vec![
//!     Rc::new(StackAction::Push(5)),
//!     Rc::new(StackAction::Push(10)),
//!     Rc::new(StackAction::Pop),
//! ];
//! let mut sequence = ActionSequence::from_actions(actions)
//!     .with_invariant("no negative size", |stack: &Stack| stack.items.len() < 100);
//!
//! let final_model = sequence.run(Stack { items: vec![] }).unwrap();
//! assert_eq!(final_model.items, vec![5]);
//! assert_eq!(sequence.run_state(), RunState::Succeeded);
//! ```

pub mod action;
pub mod error;
pub mod generator;
pub mod sequence;

pub use action::Action;
pub use error::SequenceError;
pub use generator::{action_sequences, ActionGenerator, FixedActionGenerator, RandomActionGenerator};
pub use sequence::{ActionSequence, Invariant, RunState};
