use serde::{Deserialize, Serialize};

/// Finite state machine per action. See §3 for the full transition diagram.
///
/// All `Failed*` variants except `InvalidState` are retryable: a second
/// `deploy()` pass re-enters the handler at the appropriate phase (§4.4).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    #[serde(rename = "INITED")]
    Inited,
    #[serde(rename = "COMPILED")]
    Compiled,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "FAILED_COMPILE")]
    FailedCompile,
    #[serde(rename = "FAILED_COMPLETE")]
    FailedComplete,
    #[serde(rename = "FAILED_METHOD_CALL")]
    FailedMethodCall,
    #[serde(rename = "FAILED_SET_PROXY")]
    FailedSetProxy,
    #[serde(rename = "FAILED_DEPENDENCIES")]
    FailedDependencies,
    #[serde(rename = "INVALID_STATE")]
    InvalidState,
}

impl ActionState {
    pub fn is_completed(&self) -> bool {
        matches!(self, ActionState::Completed)
    }

    /// All `Failed*` states except `InvalidState` are retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ActionState::FailedCompile
                | ActionState::FailedComplete
                | ActionState::FailedMethodCall
                | ActionState::FailedSetProxy
                | ActionState::FailedDependencies
        )
    }
}
