use std::sync::Arc;

use fieldkit_application::{AddressSearchProvider, AddressSearchService};
use fieldkit_core::AppError;
use fieldkit_infrastructure::{HttpAddressSearchProvider, StaticAddressSearchProvider};
use tracing::info;

use crate::api_config::{AddressProviderConfig, ApiConfig};

pub(super) fn build_address_search_service(
    config: &ApiConfig,
) -> Result<AddressSearchService, AppError> {
    let provider: Arc<dyn AddressSearchProvider> = match &config.address_provider {
        AddressProviderConfig::Static => Arc::new(StaticAddressSearchProvider::default()),
        AddressProviderConfig::Http(http) => {
            info!(
                search_url = %http.search_url,
                timeout_ms = http.timeout.as_millis(),
                "using http address search provider"
            );
            Arc::new(HttpAddressSearchProvider::with_timeout(
                http.search_url.clone(),
                http.api_key.clone(),
                http.timeout,
            )?)
        }
    };

    AddressSearchService::new(provider, config.address_min_chars)
}
