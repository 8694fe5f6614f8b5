use fieldkit_core::AppError;

use crate::api_config::ApiConfig;
use crate::state::AppState;

use super::address_search::build_address_search_service;

pub fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    Ok(AppState {
        address_search_service: build_address_search_service(config)?,
    })
}
