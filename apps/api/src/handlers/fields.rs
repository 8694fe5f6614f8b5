use axum::Json;
use axum::extract::Path;
use fieldkit_core::AppError;
use fieldkit_domain::{FieldType, ValidationRule, get_validation, process_field, rule_for};
use tracing::debug;

use crate::dto::{CheckFieldRequest, FieldCheckResponse, FieldRuleResponse};
use crate::error::ApiResult;

pub async fn list_fields_handler() -> Json<Vec<FieldRuleResponse>> {
    Json(
        FieldType::all()
            .iter()
            .filter_map(|field_type| rule_for(*field_type))
            .map(FieldRuleResponse::from)
            .collect(),
    )
}

pub async fn field_rule_handler(
    Path(field_type): Path<String>,
) -> ApiResult<Json<FieldRuleResponse>> {
    Ok(Json(FieldRuleResponse::from(find_rule(&field_type)?)))
}

pub async fn check_field_handler(
    Path(field_type): Path<String>,
    Json(payload): Json<CheckFieldRequest>,
) -> ApiResult<Json<FieldCheckResponse>> {
    let rule = find_rule(&field_type)?;
    let outcome = process_field(rule, &payload.value, payload.required);
    debug!(field_type, valid = outcome.is_valid(), "field checked");

    Ok(Json(FieldCheckResponse::from(outcome)))
}

fn find_rule(field_type: &str) -> Result<&'static ValidationRule, AppError> {
    get_validation(field_type).ok_or_else(|| {
        AppError::NotFound(format!("no validation rule for field type '{field_type}'"))
    })
}
