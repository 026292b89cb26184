//! The Action Handler (§4.4): one sub-state machine per `action_type`,
//! consuming the [`Executor`] capability. Every handler returns whether the
//! Driver may advance past this action (`carry_on`); `false` means the pass
//! stops here and the action is left at the head of `actions`.

use crate::executor::Executor;
use crate::types::{Action, ActionKind, ActionState};

/// Scoping identifiers a handler needs but that live on [`crate::workflow::Workflow`],
/// not on the action itself.
pub struct WorkflowContext<'a> {
    pub app_name: &'a str,
    pub org: &'a str,
    pub blockchain: &'a str,
    pub storage: Option<&'a str>,
}

/// Dispatches `action` to the handler for its `action_type`.
pub async fn handle(action: &mut Action, executor: &dyn Executor, ctx: &WorkflowContext<'_>) -> bool {
    match &action.kind {
        ActionKind::DeployLibrary { .. } => handle_deploy_library(action, executor, ctx).await,
        ActionKind::DeployContract { .. } => handle_deploy_contract(action, executor, ctx).await,
        ActionKind::MethodCall { .. } => handle_method_call(action, executor).await,
        ActionKind::DeployProxy { .. } => handle_deploy_proxy(action, executor, ctx).await,
    }
}

async fn handle_deploy_library(
    action: &mut Action,
    executor: &dyn Executor,
    ctx: &WorkflowContext<'_>,
) -> bool {
    // Observed source behaviour (SPEC_FULL.md §9): a contract already being
    // attached is recorded as an invalid state but does not stop the
    // handler — it still attempts the deploy.
    if action.contract.is_some() {
        action.action_state = ActionState::InvalidState;
        action.error_message = Some("Contract already exists".to_string());
    }

    let (contract_name, code) = match &action.kind {
        ActionKind::DeployLibrary { contract_name, code } => (contract_name.clone(), code.clone()),
        _ => unreachable!("handle_deploy_library called on a non-DEPLOY_LIBRARY action"),
    };

    match executor
        .deploy_library(ctx.org, &contract_name, &code, ctx.blockchain, ctx.app_name, action.encode)
        .await
    {
        Err(err) => {
            action.action_state = ActionState::FailedComplete;
            action.error_message = Some(err.to_string());
            false
        }
        Ok(contract) => {
            action.contract = Some(contract);
            action.action_state = ActionState::Completed;
            action.error_message = None;
            true
        }
    }
}

async fn handle_deploy_contract(
    action: &mut Action,
    executor: &dyn Executor,
    ctx: &WorkflowContext<'_>,
) -> bool {
    let needs_compile = action.contract.as_ref().map_or(true, |c| c.design_id.is_none())
        || action.action_state == ActionState::FailedCompile;

    if needs_compile {
        let (contract_name, code) = match &action.kind {
            ActionKind::DeployContract { contract_name, code, .. } => {
                (contract_name.clone(), code.clone())
            }
            _ => unreachable!("handle_deploy_contract called on a non-DEPLOY_CONTRACT action"),
        };

        match executor
            .compile_contract(&contract_name, &code, &contract_name, action.libraries.as_ref(), action.encode)
            .await
        {
            Err(err) => {
                action.action_state = ActionState::FailedCompile;
                action.error_message = Some(err.to_string());
                return false;
            }
            Ok(contract) => {
                action.contract = Some(contract);
                action.action_state = ActionState::Compiled;
                action.error_message = None;
            }
        }
    }

    let contract = action.contract.clone().expect("compile phase guarantees a contract");
    let api_name = action
        .kind
        .api_name()
        .expect("DEPLOY_CONTRACT and DEPLOY_PROXY always carry an api_name")
        .to_string();

    match executor
        .deploy_contract(&contract, &api_name, ctx.blockchain, ctx.storage, ctx.app_name, action.args.as_ref())
        .await
    {
        Err(err) => {
            action.action_state = ActionState::FailedComplete;
            action.error_message = Some(err.to_string());
            false
        }
        Ok(contract) => {
            action.contract = Some(contract);
            action.action_state = ActionState::Completed;
            action.error_message = None;
            true
        }
    }
}

async fn handle_method_call(action: &mut Action, executor: &dyn Executor) -> bool {
    let api_name = action
        .contract
        .as_ref()
        .and_then(|c| c.api_name.clone())
        .unwrap_or_default();
    let method_name = action
        .kind
        .method_name()
        .expect("handle_method_call called on a non-METHOD_CALL action")
        .to_string();

    match executor.submit_transaction(&api_name, &method_name, action.args.as_ref(), true).await {
        Err(err) => {
            action.action_state = ActionState::FailedMethodCall;
            action.error_message = Some(err.to_string());
            false
        }
        Ok(_transaction_id) => {
            action.action_state = ActionState::Completed;
            action.error_message = None;
            true
        }
    }
}

async fn handle_deploy_proxy(
    action: &mut Action,
    executor: &dyn Executor,
    ctx: &WorkflowContext<'_>,
) -> bool {
    if action.action_state != ActionState::FailedSetProxy {
        let carry_on = handle_deploy_contract(action, executor, ctx).await;
        if !carry_on {
            return false;
        }
    }

    let proxy_contract = action.contract.clone().expect("deploy phase guarantees a contract");
    let impl_contract = action
        .impl_contract
        .clone()
        .expect("the resolver attaches impl_contract before a DEPLOY_PROXY handler ever runs");

    match executor.set_proxy(ctx.org, ctx.app_name, ctx.blockchain, &proxy_contract, &impl_contract).await {
        Err(err) => {
            action.action_state = ActionState::FailedSetProxy;
            action.error_message = Some(err.to_string());
            false
        }
        Ok(_ok_marker) => {
            // Explicit per the open-question resolution in SPEC_FULL.md §9:
            // the source relies on the Driver to promote this action without
            // ever setting COMPLETED itself.
            action.action_state = ActionState::Completed;
            action.error_message = None;
            true
        }
    }
}
