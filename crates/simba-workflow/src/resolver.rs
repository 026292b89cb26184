//! The Dependency Resolver (§4.3): given the current action and the table
//! of completed actions, materializes the action's inputs in place.

use std::collections::HashMap;

use crate::executor::{CallDataEncoder, ProxyAssetLoader};
use crate::types::{Action, Dependency};

const SIMBA_PROXY: &str = "SIMBAProxy";

/// Resolves `action`'s dependencies against `completed`, mutating `action`
/// in place.
///
/// Returns `Ok(true)` if the Driver should dispatch the action to a
/// handler, `Ok(false)` if the action is already completed (defensive — the
/// Driver should already have skipped it), and `Err(message)` if a
/// dependency could not be satisfied, in which case the Driver records
/// `FailedDependencies` and stops the pass.
pub async fn resolve(
    action: &mut Action,
    completed: &HashMap<String, Action>,
    proxy_asset_loader: &dyn ProxyAssetLoader,
    call_data_encoder: &dyn CallDataEncoder,
) -> Result<bool, String> {
    if action.action_state.is_completed() {
        return Ok(false);
    }

    let dependencies = action.dependencies().to_vec();
    let mut libs: HashMap<String, String> = HashMap::new();

    for dep in &dependencies {
        let parent = dep.parent();
        let unresolved = || format!("Dependency on contract {parent} cannot be resolved");

        let prev_deployment = completed.get(parent).ok_or_else(unresolved)?;
        let prev_contract = prev_deployment.contract.as_ref().ok_or_else(unresolved)?;

        match dep {
            Dependency::Library { .. } => {
                libs.insert(parent.to_string(), prev_contract.address.clone().unwrap_or_default());
            }
            Dependency::Constructor { target_arg, .. } => {
                let address = prev_contract.address.clone().unwrap_or_default();
                action.args_mut().insert(target_arg.clone(), serde_json::Value::String(address));
            }
            Dependency::Contract { .. } => {
                action.contract = Some(prev_contract.clone());
            }
            Dependency::Impl { method_name, method_args, .. } => {
                action.impl_contract = Some(prev_contract.clone());

                let code = proxy_asset_loader.load().await.map_err(|e| e.to_string())?;
                action.kind.bind_proxy_asset(SIMBA_PROXY.to_string(), code);
                action.encode = false;

                let calldata = call_data_encoder
                    .encode_calldata(prev_contract, method_name, method_args)
                    .await
                    .map_err(|e| e.to_string())?;
                action.args = Some(calldata);
            }
        }
    }

    // Hoisted out of the loop per the open-question resolution in
    // SPEC_FULL.md §9: the last iteration's value is the only one ever
    // observed, so assigning once after the loop is equivalent.
    action.libraries = Some(libs);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActionKind, ActionState, Contract};

    struct StaticProxyLoader;
    #[async_trait::async_trait]
    impl ProxyAssetLoader for StaticProxyLoader {
        async fn load(&self) -> Result<String, crate::errors::ExecutorError> {
            Ok("cHJveHk=".to_string())
        }
    }

    struct StaticEncoder;
    #[async_trait::async_trait]
    impl CallDataEncoder for StaticEncoder {
        async fn encode_calldata(
            &self,
            impl_contract: &Contract,
            _method_name: &str,
            _args: &HashMap<String, serde_json::Value>,
        ) -> Result<HashMap<String, serde_json::Value>, crate::errors::ExecutorError> {
            let mut out = HashMap::new();
            out.insert(
                "_logic".to_string(),
                serde_json::Value::String(impl_contract.address.clone().unwrap_or_default()),
            );
            out.insert("_data".to_string(), serde_json::Value::String("0xdead".to_string()));
            Ok(out)
        }
    }

    fn completed_library(name: &str, address: &str) -> Action {
        let mut action = Action::new(ActionKind::DeployLibrary {
            contract_name: name.to_string(),
            code: "0x00".to_string(),
        });
        action.action_state = ActionState::Completed;
        action.contract = Some(Contract { address: Some(address.to_string()), ..Contract::new() });
        action
    }

    #[tokio::test]
    async fn library_dependency_populates_libraries_map() {
        let mut completed = HashMap::new();
        completed.insert("L1".to_string(), completed_library("L1", "0x1"));
        completed.insert("L2".to_string(), completed_library("L2", "0x2"));

        let mut action = Action::new(ActionKind::DeployContract {
            contract_name: "C1".to_string(),
            code: "0x00".to_string(),
            api_name: "c1".to_string(),
        })
        .with_dependencies(vec![
            Dependency::Library { parent: "L1".to_string() },
            Dependency::Library { parent: "L2".to_string() },
        ]);

        let carry_on =
            resolve(&mut action, &completed, &StaticProxyLoader, &StaticEncoder).await.unwrap();
        assert!(carry_on);
        let libs = action.libraries.unwrap();
        assert_eq!(libs.get("L1").unwrap(), "0x1");
        assert_eq!(libs.get("L2").unwrap(), "0x2");
    }

    #[tokio::test]
    async fn unresolved_dependency_reports_parent_name() {
        let completed = HashMap::new();
        let mut action = Action::new(ActionKind::DeployContract {
            contract_name: "C1".to_string(),
            code: "0x00".to_string(),
            api_name: "c1".to_string(),
        })
        .with_dependencies(vec![Dependency::Library { parent: "Ghost".to_string() }]);

        let err = resolve(&mut action, &completed, &StaticProxyLoader, &StaticEncoder)
            .await
            .unwrap_err();
        assert_eq!(err, "Dependency on contract Ghost cannot be resolved");
    }

    #[tokio::test]
    async fn impl_dependency_rewrites_action_into_proxy() {
        let mut completed = HashMap::new();
        let mut impl_action = completed_library("Impl", "0xabc");
        impl_action.contract = Some(Contract {
            id: Some("impl-id".to_string()),
            address: Some("0xabc".to_string()),
            ..Contract::new()
        });
        completed.insert("Impl".to_string(), impl_action);

        let mut action = Action::new(ActionKind::DeployProxy {
            api_name: "px".to_string(),
            contract_name: None,
            code: None,
        })
        .with_dependencies(vec![Dependency::Impl {
            parent: "Impl".to_string(),
            method_name: "initialize".to_string(),
            method_args: HashMap::new(),
        }]);

        resolve(&mut action, &completed, &StaticProxyLoader, &StaticEncoder).await.unwrap();

        assert_eq!(action.contract_name(), Some("SIMBAProxy"));
        assert_eq!(action.kind.code(), Some("cHJveHk="));
        assert!(!action.encode);
        let args = action.args.unwrap();
        assert_eq!(args.len(), 2);
        assert!(args.contains_key("_logic"));
        assert!(args.contains_key("_data"));
    }
}
