//! The Workflow Driver (§4.5): a single sequential pass over the still
//! pending actions of a [`Workflow`], resolving each one's dependencies and
//! dispatching it to its handler. Idempotent under re-invocation — calling
//! [`deploy`] again on the same (partially advanced) workflow resumes
//! exactly where the previous call stopped.

use tracing::Instrument;

use crate::executor::{CallDataEncoder, Executor, ProxyAssetLoader};
use crate::handler::{self, WorkflowContext};
use crate::resolver;
use crate::types::{Action, ActionState};
use crate::workflow::Workflow;

/// Drives `workflow` forward by one pass: resolves and dispatches actions in
/// order until one fails to resolve, a handler stops (`carry_on=false`), or
/// the plan is exhausted. The leading run of successfully completed actions
/// is drained out of `workflow.actions` into `workflow.completed`.
pub async fn deploy(
    workflow: &mut Workflow,
    executor: &dyn Executor,
    encoder: &dyn CallDataEncoder,
    proxy_loader: &dyn ProxyAssetLoader,
) {
    let span = tracing::info_span!(
        "deploy_workflow",
        app_name = %workflow.app_name,
        org = %workflow.org,
        blockchain = %workflow.blockchain,
        pending_actions = workflow.actions.len(),
    );

    run_pass(workflow, executor, encoder, proxy_loader).instrument(span).await
}

async fn run_pass(
    workflow: &mut Workflow,
    executor: &dyn Executor,
    encoder: &dyn CallDataEncoder,
    proxy_loader: &dyn ProxyAssetLoader,
) {
    let ctx = WorkflowContext {
        app_name: &workflow.app_name,
        org: &workflow.org,
        blockchain: &workflow.blockchain,
        storage: workflow.storage.as_deref(),
    };

    let mut count = 0;
    for action in workflow.actions.iter_mut() {
        match resolver::resolve(action, &workflow.completed, proxy_loader, encoder).await {
            Err(err) => {
                action.action_state = ActionState::FailedDependencies;
                action.error_message = Some(err.clone());
                tracing::warn!(
                    contract_name = action.contract_name().unwrap_or_default(),
                    action_type = action.kind.label(),
                    action_state = ?action.action_state,
                    error = %err,
                    "action_failed",
                );
                break;
            }
            Ok(already_completed_sentinel) => {
                action.error_message = None;
                // Defensive: the Driver only ever sees not-yet-completed
                // actions, so the resolver should never report this.
                if !already_completed_sentinel {
                    continue;
                }
            }
        }

        tracing::info!(action_type = action.kind.label(), "action_started");

        if !handler::handle(action, executor, &ctx).await {
            tracing::warn!(
                contract_name = action.contract_name().unwrap_or_default(),
                action_type = action.kind.label(),
                action_state = ?action.action_state,
                error = action.error_message.as_deref().unwrap_or(""),
                "action_failed",
            );
            break;
        }

        tracing::info!(action_type = action.kind.label(), "action_completed");
        count += 1;
    }

    for action in workflow.actions.drain(..count) {
        if let Some(key) = action_completion_key(&action) {
            workflow.completed.insert(key, action);
        }
    }
}

/// The key an action is registered under in `Workflow::completed` once it
/// succeeds. `None` for `METHOD_CALL`, which has no `contract_name` in the
/// data model and nothing for a later action to depend on.
fn action_completion_key(action: &Action) -> Option<String> {
    action.contract_name().map(str::to_string)
}
