use fieldkit_application::AddressSearchService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub address_search_service: AddressSearchService,
}
