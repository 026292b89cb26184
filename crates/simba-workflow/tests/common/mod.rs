//! Shared test double for the integration suite: an in-memory `Executor` /
//! `CallDataEncoder` / `ProxyAssetLoader` driven by a scripted call queue per
//! operation, the way the reference workspace's addon crates exercise their
//! own command handlers against a mock RPC/signer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, Once};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use simba_workflow::{CallDataEncoder, Contract, Executor, ExecutorError, ProxyAssetLoader};

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing_subscriber` fmt layer once per test binary, so a
/// failing scenario's `action_failed` events show up in `cargo test --
/// --nocapture` output instead of being silently dropped.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Default)]
pub struct MockExecutor {
    deploy_library: Mutex<VecDeque<Result<Contract, String>>>,
    compile_contract: Mutex<VecDeque<Result<Contract, String>>>,
    deploy_contract: Mutex<VecDeque<Result<Contract, String>>>,
    submit_transaction: Mutex<VecDeque<Result<String, String>>>,
    set_proxy: Mutex<VecDeque<Result<String, String>>>,
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, String>>>) -> Result<T, ExecutorError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .expect("scripted call queue exhausted")
        .map_err(ExecutorError::from)
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_deploy_library(&self, result: Result<Contract, String>) -> &Self {
        self.deploy_library.lock().unwrap().push_back(result);
        self
    }

    pub fn script_compile_contract(&self, result: Result<Contract, String>) -> &Self {
        self.compile_contract.lock().unwrap().push_back(result);
        self
    }

    pub fn script_deploy_contract(&self, result: Result<Contract, String>) -> &Self {
        self.deploy_contract.lock().unwrap().push_back(result);
        self
    }

    #[allow(dead_code)]
    pub fn script_submit_transaction(&self, result: Result<String, String>) -> &Self {
        self.submit_transaction.lock().unwrap().push_back(result);
        self
    }

    pub fn script_set_proxy(&self, result: Result<String, String>) -> &Self {
        self.set_proxy.lock().unwrap().push_back(result);
        self
    }
}

pub fn contract_with_address(address: &str) -> Contract {
    Contract { address: Some(address.to_string()), ..Contract::new() }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn deploy_library(
        &self,
        _org: &str,
        _lib_name: &str,
        _code: &str,
        _blockchain: &str,
        _app_name: &str,
        _encode: bool,
    ) -> Result<Contract, ExecutorError> {
        pop(&self.deploy_library)
    }

    async fn compile_contract(
        &self,
        _name: &str,
        _code: &str,
        _target_contract: &str,
        _libraries: Option<&HashMap<String, String>>,
        _encode: bool,
    ) -> Result<Contract, ExecutorError> {
        pop(&self.compile_contract)
    }

    async fn deploy_contract(
        &self,
        _contract: &Contract,
        _api_name: &str,
        _blockchain: &str,
        _storage: Option<&str>,
        _app_name: &str,
        _args: Option<&HashMap<String, JsonValue>>,
    ) -> Result<Contract, ExecutorError> {
        pop(&self.deploy_contract)
    }

    async fn submit_transaction(
        &self,
        _api_name: &str,
        _method: &str,
        _args: Option<&HashMap<String, JsonValue>>,
        _wait: bool,
    ) -> Result<String, ExecutorError> {
        pop(&self.submit_transaction)
    }

    async fn set_proxy(
        &self,
        _org: &str,
        _app_name: &str,
        _blockchain: &str,
        _proxy_contract: &Contract,
        _impl_contract: &Contract,
    ) -> Result<String, ExecutorError> {
        pop(&self.set_proxy)
    }
}

pub struct MockCallDataEncoder;

#[async_trait]
impl CallDataEncoder for MockCallDataEncoder {
    async fn encode_calldata(
        &self,
        impl_contract: &Contract,
        method_name: &str,
        args: &HashMap<String, JsonValue>,
    ) -> Result<HashMap<String, JsonValue>, ExecutorError> {
        // Projects `args` onto the parameter order the real encoder would
        // read from `metadata.contract.methods.<name>.params`; stands in for
        // ABI encoding with a deterministic, inspectable stub.
        let ordered: Vec<JsonValue> = impl_contract
            .method_params(method_name)
            .into_iter()
            .filter_map(|param| param.get("name").and_then(JsonValue::as_str).map(str::to_string))
            .map(|name| args.get(&name).cloned().unwrap_or(JsonValue::Null))
            .collect();

        let mut out = HashMap::new();
        out.insert(
            "_logic".to_string(),
            JsonValue::String(impl_contract.address.clone().unwrap_or_default()),
        );
        out.insert("_data".to_string(), JsonValue::String(format!("0xinitcalldata{}", ordered.len())));
        Ok(out)
    }
}

pub struct MockProxyAssetLoader;

#[async_trait]
impl ProxyAssetLoader for MockProxyAssetLoader {
    async fn load(&self) -> Result<String, ExecutorError> {
        Ok("bW9ja3Byb3h5".to_string())
    }
}
