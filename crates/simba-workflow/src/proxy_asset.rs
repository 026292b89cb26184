//! Default [`ProxyAssetLoader`](crate::executor::ProxyAssetLoader): the fixed
//! proxy contract source embedded at compile time and served base64-encoded,
//! mirroring the original `libsimba_eth/resources/SIMBAProxy.sol` asset and
//! its `load_proxy_encoded()` accessor.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::ExecutorError;
use crate::executor::ProxyAssetLoader;

const SIMBA_PROXY_SOURCE: &str = include_str!("../resources/SIMBAProxy.sol");

/// Serves the bundled proxy source, base64-encoded once per call. Stateless
/// and trivially `Clone`; callers needing a single shared instance can wrap
/// it in an `Arc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedProxyAssetLoader;

#[async_trait]
impl ProxyAssetLoader for EmbeddedProxyAssetLoader {
    async fn load(&self) -> Result<String, ExecutorError> {
        Ok(STANDARD.encode(SIMBA_PROXY_SOURCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loads_non_empty_base64_source() {
        let loader = EmbeddedProxyAssetLoader;
        let encoded = loader.load().await.unwrap();
        assert!(!encoded.is_empty());
        let decoded = STANDARD.decode(encoded).unwrap();
        assert!(String::from_utf8(decoded).unwrap().contains("contract SIMBAProxy"));
    }
}
