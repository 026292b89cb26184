//! External collaborators the engine depends on but never implements: the
//! remote platform client (`Executor`), the ABI call-data encoder
//! (`CallDataEncoder`), and the fixed proxy bytecode source
//! (`ProxyAssetLoader`). Concrete platform wiring — HTTP transport,
//! credentials, ABI encoding, file I/O — lives entirely on the other side of
//! these traits (SPEC_FULL.md §4.2).
//!
//! Each capability is expressed as an object-safe `async_trait` so a caller
//! can box a concrete implementation (a real platform client) or, in tests,
//! an in-memory mock driven by a scripted call queue.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::errors::ExecutorError;
use crate::types::Contract;

/// The five operations the Action Handler drives a deployment through.
/// Every method returns a `Result`; there are no exceptions on ordinary
/// platform failure, only on truly unexpected transport errors a caller
/// chooses to surface that way.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn deploy_library(
        &self,
        org: &str,
        lib_name: &str,
        code: &str,
        blockchain: &str,
        app_name: &str,
        encode: bool,
    ) -> Result<Contract, ExecutorError>;

    async fn compile_contract(
        &self,
        name: &str,
        code: &str,
        target_contract: &str,
        libraries: Option<&HashMap<String, String>>,
        encode: bool,
    ) -> Result<Contract, ExecutorError>;

    async fn deploy_contract(
        &self,
        contract: &Contract,
        api_name: &str,
        blockchain: &str,
        storage: Option<&str>,
        app_name: &str,
        args: Option<&HashMap<String, JsonValue>>,
    ) -> Result<Contract, ExecutorError>;

    async fn submit_transaction(
        &self,
        api_name: &str,
        method: &str,
        args: Option<&HashMap<String, JsonValue>>,
        wait: bool,
    ) -> Result<String, ExecutorError>;

    async fn set_proxy(
        &self,
        org: &str,
        app_name: &str,
        blockchain: &str,
        proxy_contract: &Contract,
        impl_contract: &Contract,
    ) -> Result<String, ExecutorError>;
}

/// ABI-encodes a method invocation into the `{"_logic", "_data"}` shape a
/// proxy constructor expects.
#[async_trait]
pub trait CallDataEncoder: Send + Sync {
    async fn encode_calldata(
        &self,
        impl_contract: &Contract,
        method_name: &str,
        args: &HashMap<String, JsonValue>,
    ) -> Result<HashMap<String, JsonValue>, ExecutorError>;
}

/// Returns the fixed, base64-encoded source of the proxy contract wrapped
/// by every `DEPLOY_PROXY` action.
#[async_trait]
pub trait ProxyAssetLoader: Send + Sync {
    async fn load(&self) -> Result<String, ExecutorError>;
}
