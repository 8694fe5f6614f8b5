mod cors;

use axum::Router;
use axum::routing::{get, post};
use fieldkit_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

use self::cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let field_routes = Router::new()
        .route("/api/fields", get(handlers::fields::list_fields_handler))
        .route(
            "/api/fields/{field_type}",
            get(handlers::fields::field_rule_handler),
        )
        .route(
            "/api/fields/{field_type}/check",
            post(handlers::fields::check_field_handler),
        );

    let date_routes = Router::new()
        .route("/api/dates/check", post(handlers::dates::check_date_handler))
        .route(
            "/api/dates/relative",
            get(handlers::dates::relative_date_handler),
        );

    let address_routes = Router::new()
        .route(
            "/api/addresses/search",
            get(handlers::addresses::search_addresses_handler),
        )
        .route(
            "/api/addresses/format",
            post(handlers::addresses::format_address_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(field_routes)
        .merge(date_routes)
        .merge(address_routes)
        .route(
            "/api/statuses/{status_type}/{status}",
            get(handlers::statuses::status_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
