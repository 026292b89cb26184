use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single entry of a contract's ABI. The engine never interprets the shape
/// of an ABI entry beyond carrying it along; encoding call data is delegated
/// to a [`crate::executor::CallDataEncoder`].
pub type AbiEntry = JsonValue;

/// The platform record produced by a deployment, or carried forward from a
/// dependency. Every field is optional because a `Contract` accumulates
/// information as an action progresses through compile, deploy, and (for
/// proxies) wiring phases.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    /// Opaque platform identifier, set once the contract is deployed.
    pub id: Option<String>,
    /// On-chain address, set once the contract is deployed.
    pub address: Option<String>,
    /// Logical name under which the contract is registered with the
    /// platform. Optional for libraries.
    pub api_name: Option<String>,
    /// Opaque compile-artifact handle, set once the contract is compiled.
    pub design_id: Option<String>,
    /// Ordered sequence of method descriptors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Vec<AbiEntry>>,
    /// Arbitrary metadata, including the `contract.methods.<name>.params`
    /// shape consumed by call-data encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, JsonValue>>,
}

impl Contract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the ordered parameter list for `method_name` out of
    /// `metadata.contract.methods.<method_name>.params`, per §4.2.
    pub fn method_params(&self, method_name: &str) -> Vec<JsonValue> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("contract"))
            .and_then(|c| c.get("methods"))
            .and_then(|methods| methods.get(method_name))
            .and_then(|method| method.get("params"))
            .and_then(|params| params.as_array())
            .cloned()
            .unwrap_or_default()
    }
}
