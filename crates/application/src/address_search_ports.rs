use async_trait::async_trait;
use fieldkit_core::AppResult;
use serde_json::Value;

/// Port for the external address lookup API.
///
/// Implementations return the provider's response body, already adapted
/// from its transport envelope. Two pick list schemas are tolerated by the
/// service: `PartialAddress`/`Score` and `partialAddressField`/`scoreField`.
#[async_trait]
pub trait AddressSearchProvider: Send + Sync {
    /// Searches for addresses matching a partial input.
    async fn search(&self, input: &str) -> AppResult<Value>;
}
