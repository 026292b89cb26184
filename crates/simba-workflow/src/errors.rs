//! Structured errors for the two failure surfaces the engine exposes
//! synchronously: plan construction (`ValidationError`) and the Executor
//! capability boundary (`ExecutorError`). In-flight action failures are
//! never represented by these types — they are recorded as plain `String`
//! messages on `Action::error_message`, by design (see SPEC_FULL.md §7).

use thiserror::Error;

use crate::types::ActionKind;

/// Raised only from [`crate::workflow::Workflow::new`]; the plan is never
/// partially constructed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no actions defined")]
    EmptyPlan,

    #[error("initial action cannot have dependencies")]
    InitialActionHasDependencies,

    #[error("action at index {action_index} depends on contract '{parent}', which is not defined by any preceding action")]
    UnknownParent { action_index: usize, parent: String },

    #[error("action at index {action_index} is a DEPLOY_PROXY but declares no IMPL dependency")]
    ProxyMissingImpl { action_index: usize },

    #[error("field '{field}' is required for action type {action_type} (action at index {action_index})")]
    MissingField { action_index: usize, action_type: &'static str, field: &'static str },
}

impl ValidationError {
    pub(crate) fn missing_field(
        action_index: usize,
        kind: &ActionKind,
        field: &'static str,
    ) -> Self {
        ValidationError::MissingField { action_index, action_type: kind.label(), field }
    }
}

/// A failure reported by an [`crate::executor::Executor`],
/// [`crate::executor::CallDataEncoder`], or [`crate::executor::ProxyAssetLoader`]
/// implementation. Wraps the human-readable message the capability returned;
/// the engine never inspects its structure (SPEC_FULL.md §6).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ExecutorError(pub String);

impl From<String> for ExecutorError {
    fn from(message: String) -> Self {
        ExecutorError(message)
    }
}

impl From<&str> for ExecutorError {
    fn from(message: &str) -> Self {
        ExecutorError(message.to_string())
    }
}
