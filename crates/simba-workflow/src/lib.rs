//! A resumable workflow engine for deploying interdependent smart
//! contracts, libraries, and upgradeable proxies to a blockchain network
//! through a remote platform API.
//!
//! A caller builds a [`Workflow`] from a linear plan of [`Action`]s,
//! implements the [`Executor`], [`CallDataEncoder`], and [`ProxyAssetLoader`]
//! capabilities against their platform of choice, and drives the plan to
//! completion with repeated calls to [`driver::deploy`]. Each call advances
//! the workflow as far as it can and stops at the first unresolved
//! dependency or handler failure; re-invoking `deploy` on the same workflow
//! resumes from exactly that point.

pub mod driver;
pub mod errors;
pub mod executor;
pub mod handler;
pub mod manifest;
pub mod proxy_asset;
pub mod resolver;
pub mod types;
pub mod workflow;

pub use driver::deploy;
pub use errors::{ExecutorError, ValidationError};
pub use executor::{CallDataEncoder, Executor, ProxyAssetLoader};
pub use manifest::{ManifestError, ManifestFormat};
pub use proxy_asset::EmbeddedProxyAssetLoader;
pub use types::{Action, ActionKind, ActionState, Contract, Dependency};
pub use workflow::Workflow;
