use axum::Json;
use axum::extract::{Query, State};
use fieldkit_domain::{address_is_valid, address_to_human};

use crate::dto::{
    AddressOptionResponse, AddressSearchQuery, FormatAddressRequest, FormatAddressResponse,
};
use crate::state::AppState;

pub async fn search_addresses_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressSearchQuery>,
) -> Json<Vec<AddressOptionResponse>> {
    let options = state.address_search_service.search(&query.q).await;

    Json(
        options
            .into_iter()
            .map(AddressOptionResponse::from)
            .collect(),
    )
}

pub async fn format_address_handler(
    Json(payload): Json<FormatAddressRequest>,
) -> Json<FormatAddressResponse> {
    Json(FormatAddressResponse {
        text: address_to_human(&payload.address, &payload.separator),
        valid: address_is_valid(&payload.address),
    })
}
