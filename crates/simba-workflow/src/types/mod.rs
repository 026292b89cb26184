mod action;
mod contract;
mod dependency;
mod state;

pub use action::{Action, ActionKind};
pub use contract::{AbiEntry, Contract};
pub use dependency::Dependency;
pub use state::ActionState;
