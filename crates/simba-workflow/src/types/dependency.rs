use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// How an action consumes a prior action's result.
///
/// The distilled wire format (and the original Python source this engine
/// was modeled on) represents a dependency as a flat object carrying a
/// `dependency_type` discriminator plus whichever of `target_arg` /
/// `method_name` / `method_args` that kind needs. Rather than a single
/// struct with optional fields, each kind is its own variant here so the
/// resolver's dispatch (§4.3) is exhaustive and a `CONSTRUCTOR` dependency
/// can never be constructed without its `target_arg`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "dependency_type")]
pub enum Dependency {
    /// Link the parent library's address into the child's bytecode at link
    /// time.
    #[serde(rename = "LIBRARY")]
    Library { parent: String },
    /// Inject the parent's address into the child's constructor args under
    /// key `target_arg`.
    #[serde(rename = "CONSTRUCTOR")]
    Constructor { parent: String, target_arg: String },
    /// Adopt the parent's `Contract` record as this action's own `contract`.
    #[serde(rename = "CONTRACT")]
    Contract { parent: String },
    /// Mark the parent as the implementation a proxy action wraps.
    #[serde(rename = "IMPL")]
    Impl {
        parent: String,
        method_name: String,
        #[serde(default)]
        method_args: HashMap<String, JsonValue>,
    },
}

impl Dependency {
    pub fn parent(&self) -> &str {
        match self {
            Dependency::Library { parent }
            | Dependency::Constructor { parent, .. }
            | Dependency::Contract { parent }
            | Dependency::Impl { parent, .. } => parent,
        }
    }

    pub fn is_impl(&self) -> bool {
        matches!(self, Dependency::Impl { .. })
    }
}
