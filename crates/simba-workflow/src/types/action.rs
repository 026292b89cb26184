use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::contract::Contract;
use super::dependency::Dependency;
use super::state::ActionState;

/// The type-specific fields of an [`Action`], one variant per `action_type`.
///
/// `DeployProxy::contract_name` and `::code` start out `None`: the resolver
/// fills them in once it processes the action's `IMPL` dependency (§4.3),
/// loading the fixed proxy bytecode asset and renaming the action to
/// `"SIMBAProxy"`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action_type")]
pub enum ActionKind {
    #[serde(rename = "DEPLOY_LIBRARY")]
    DeployLibrary { contract_name: String, code: String },
    #[serde(rename = "DEPLOY_CONTRACT")]
    DeployContract { contract_name: String, code: String, api_name: String },
    #[serde(rename = "METHOD_CALL")]
    MethodCall { api_name: String, method_name: String },
    #[serde(rename = "DEPLOY_PROXY")]
    DeployProxy {
        api_name: String,
        #[serde(default)]
        contract_name: Option<String>,
        #[serde(default)]
        code: Option<String>,
    },
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::DeployLibrary { .. } => "DEPLOY_LIBRARY",
            ActionKind::DeployContract { .. } => "DEPLOY_CONTRACT",
            ActionKind::MethodCall { .. } => "METHOD_CALL",
            ActionKind::DeployProxy { .. } => "DEPLOY_PROXY",
        }
    }

    /// The key an action is registered under in `Workflow::completed` once
    /// it succeeds. `None` for `METHOD_CALL` (which has no `contract_name`
    /// in the original data model) and for a `DEPLOY_PROXY` action whose
    /// `IMPL` dependency has not yet resolved.
    pub fn contract_name(&self) -> Option<&str> {
        match self {
            ActionKind::DeployLibrary { contract_name, .. } => Some(contract_name),
            ActionKind::DeployContract { contract_name, .. } => Some(contract_name),
            ActionKind::MethodCall { .. } => None,
            ActionKind::DeployProxy { contract_name, .. } => contract_name.as_deref(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            ActionKind::DeployLibrary { code, .. } => Some(code),
            ActionKind::DeployContract { code, .. } => Some(code),
            ActionKind::MethodCall { .. } => None,
            ActionKind::DeployProxy { code, .. } => code.as_deref(),
        }
    }

    pub fn api_name(&self) -> Option<&str> {
        match self {
            ActionKind::DeployLibrary { .. } => None,
            ActionKind::DeployContract { api_name, .. } => Some(api_name),
            ActionKind::MethodCall { api_name, .. } => Some(api_name),
            ActionKind::DeployProxy { api_name, .. } => Some(api_name),
        }
    }

    pub fn method_name(&self) -> Option<&str> {
        match self {
            ActionKind::MethodCall { method_name, .. } => Some(method_name),
            _ => None,
        }
    }

    /// Resolver-side mutation: bind the proxy's bytecode and completed-table
    /// key once its `IMPL` dependency has been processed. No-op (returns
    /// `false`) if called on anything but a `DeployProxy`.
    pub fn bind_proxy_asset(&mut self, contract_name: String, code: String) -> bool {
        match self {
            ActionKind::DeployProxy { contract_name: cn, code: c, .. } => {
                *cn = Some(contract_name);
                *c = Some(code);
                true
            }
            _ => false,
        }
    }
}

fn default_encode() -> bool {
    true
}

/// One step of a deployment plan.
///
/// The type-specific fields (`contract_name`, `code`, `api_name`,
/// `method_name`) live on [`ActionKind`]; this struct carries the fields
/// every action shares regardless of type: its dependencies, accumulated
/// arguments, resolved contract records, and state-machine bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Action {
    #[serde(flatten)]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<Dependency>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<HashMap<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<Contract>,
    /// For a proxy deployment, the implementation contract being wrapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impl_contract: Option<Contract>,
    /// Whether `kind.code()` must be base64-encoded by the Executor before
    /// transmission. The proxy asset is already base64-encoded, so the
    /// resolver clears this when it binds the proxy bytecode.
    #[serde(default = "default_encode")]
    pub encode: bool,
    /// Dependency-name to address mapping injected at link time, populated
    /// by the resolver ahead of a `compile_contract` call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libraries: Option<HashMap<String, String>>,
    #[serde(default)]
    pub action_state: ActionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Action {
            kind,
            dependencies: None,
            args: None,
            contract: None,
            impl_contract: None,
            encode: true,
            libraries: None,
            action_state: ActionState::Inited,
            error_message: None,
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn with_args(mut self, args: HashMap<String, JsonValue>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn dependencies(&self) -> &[Dependency] {
        self.dependencies.as_deref().unwrap_or(&[])
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.kind.contract_name()
    }

    pub fn args_mut(&mut self) -> &mut HashMap<String, JsonValue> {
        self.args.get_or_insert_with(HashMap::new)
    }
}
