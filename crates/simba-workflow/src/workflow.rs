use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::types::{Action, ActionKind};

/// The top-level container: scope identifiers, the ordered sequence of
/// still-pending actions, and the table of actions the Driver has already
/// promoted to completion.
///
/// A `Workflow` is constructed once via [`Workflow::new`], which validates
/// the plan against the invariants in SPEC_FULL.md §3 and never returns a
/// partially-constructed value. From then on the [`crate::driver`] mutates
/// it in place, one `deploy()` pass at a time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workflow {
    pub app_name: String,
    pub org: String,
    pub blockchain: String,
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(default)]
    pub completed: HashMap<String, Action>,
}

impl Workflow {
    pub fn new(
        app_name: impl Into<String>,
        org: impl Into<String>,
        blockchain: impl Into<String>,
        actions: Vec<Action>,
    ) -> Result<Self, ValidationError> {
        validate(&actions)?;
        Ok(Workflow {
            app_name: app_name.into(),
            org: org.into(),
            blockchain: blockchain.into(),
            actions,
            storage: None,
            completed: HashMap::new(),
        })
    }

    pub fn with_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }

    /// Re-runs the same structural checks `new` performs. Useful after a
    /// `Workflow` has been deserialized from a manifest, so a caller never
    /// trusts a loaded document as pre-validated (SPEC_FULL.md §4.6).
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.actions)
    }

    pub fn is_complete(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Single pass building the set of previously-seen `contract_name`s and
/// rejecting the first plan violation encountered (§4.1). No I/O, no state.
fn validate(actions: &[Action]) -> Result<(), ValidationError> {
    if actions.is_empty() {
        return Err(ValidationError::EmptyPlan);
    }

    let mut previous: HashSet<String> = HashSet::new();
    for (index, action) in actions.iter().enumerate() {
        if index == 0 && !action.dependencies().is_empty() {
            return Err(ValidationError::InitialActionHasDependencies);
        }

        let mut got_impl_dep = false;
        for dep in action.dependencies() {
            if !previous.contains(dep.parent()) {
                return Err(ValidationError::UnknownParent {
                    action_index: index,
                    parent: dep.parent().to_string(),
                });
            }
            if dep.is_impl() {
                got_impl_dep = true;
            }
        }

        if matches!(action.kind, ActionKind::DeployProxy { .. }) && !got_impl_dep {
            return Err(ValidationError::ProxyMissingImpl { action_index: index });
        }

        check_required_fields(index, action)?;

        if let Some(contract_name) = action.contract_name() {
            previous.insert(contract_name.to_string());
        }
    }

    Ok(())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Mirrors the original model's `check_fields`: a required field that is
/// present but blank is treated the same as absent.
fn check_required_fields(index: usize, action: &Action) -> Result<(), ValidationError> {
    match &action.kind {
        ActionKind::DeployLibrary { contract_name, code } => {
            if is_blank(contract_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "contract_name"));
            }
            if is_blank(code) {
                return Err(ValidationError::missing_field(index, &action.kind, "code"));
            }
        }
        ActionKind::DeployContract { contract_name, code, api_name } => {
            if is_blank(contract_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "contract_name"));
            }
            if is_blank(code) {
                return Err(ValidationError::missing_field(index, &action.kind, "code"));
            }
            if is_blank(api_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "api_name"));
            }
        }
        ActionKind::MethodCall { api_name, method_name } => {
            if is_blank(method_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "method_name"));
            }
            if is_blank(api_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "api_name"));
            }
        }
        ActionKind::DeployProxy { api_name, .. } => {
            if is_blank(api_name) {
                return Err(ValidationError::missing_field(index, &action.kind, "api_name"));
            }
        }
    }
    Ok(())
}
