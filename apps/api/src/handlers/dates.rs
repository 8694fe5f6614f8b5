use axum::Json;
use axum::extract::Query;
use fieldkit_core::AppError;
use fieldkit_domain::{
    DateCheck, DateDirection, DateLimit, DateParts, get_date_error, get_relative_iso_date,
    iso_from_parts, parse_date,
};

use crate::dto::{CheckDateRequest, DateCheckResponse, RelativeDateQuery, RelativeDateResponse};
use crate::error::ApiResult;

pub async fn check_date_handler(
    Json(payload): Json<CheckDateRequest>,
) -> ApiResult<Json<DateCheckResponse>> {
    let min = date_limit("min", payload.min_date.as_deref(), payload.min_timestamp)?;
    let max = date_limit("max", payload.max_date.as_deref(), payload.max_timestamp)?;
    let parts = DateParts {
        day: payload.day,
        month: payload.month,
        year: payload.year,
    };

    let response = match get_date_error(&parts, min, max) {
        DateCheck::Incomplete => DateCheckResponse {
            status: "incomplete",
            message: None,
            direction: None,
            iso_date: None,
        },
        DateCheck::Invalid(error) => DateCheckResponse {
            status: "invalid",
            message: Some(error.to_string()),
            direction: Some(match error.direction() {
                DateDirection::Under => "under",
                DateDirection::Over => "over",
            }),
            iso_date: None,
        },
        DateCheck::Valid => DateCheckResponse {
            status: "valid",
            message: None,
            direction: None,
            iso_date: Some(iso_from_parts(&parts, true)),
        },
    };

    Ok(Json(response))
}

pub async fn relative_date_handler(
    Query(query): Query<RelativeDateQuery>,
) -> ApiResult<Json<RelativeDateResponse>> {
    let date = get_relative_iso_date(query.offset, &query.unit, None)?;

    Ok(Json(RelativeDateResponse { date }))
}

fn date_limit(
    name: &str,
    date: Option<&str>,
    timestamp: Option<i64>,
) -> Result<Option<DateLimit>, AppError> {
    match (date, timestamp) {
        (Some(_), Some(_)) => Err(AppError::Validation(format!(
            "{name}_date and {name}_timestamp cannot both be set"
        ))),
        (Some(date), None) => parse_date(date)
            .map(|date| Some(DateLimit::Date(date)))
            .ok_or_else(|| AppError::Validation(format!("invalid {name}_date '{date}'"))),
        (None, Some(timestamp)) => Ok(Some(DateLimit::Timestamp(timestamp))),
        (None, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::{check_date_handler, relative_date_handler};
    use crate::dto::{CheckDateRequest, DateCheckResponse, RelativeDateQuery};

    fn parts(day: i64, month: i64, year: i64) -> CheckDateRequest {
        CheckDateRequest {
            day: Some(day),
            month: Some(month),
            year: Some(year),
            ..CheckDateRequest::default()
        }
    }

    async fn check(payload: CheckDateRequest) -> DateCheckResponse {
        match check_date_handler(Json(payload)).await {
            Ok(Json(response)) => response,
            Err(error) => panic!("date check should succeed: {:?}", error.0),
        }
    }

    #[tokio::test]
    async fn leap_day_depends_on_year() {
        let leap = check(parts(29, 2, 2024)).await;
        assert_eq!(leap.status, "valid");
        assert_eq!(leap.iso_date.as_deref(), Some("2024-02-29"));

        let common = check(parts(29, 2, 2023)).await;
        assert_eq!(common.status, "invalid");
        assert_eq!(common.direction, Some("over"));
    }

    #[tokio::test]
    async fn date_before_minimum_is_under() {
        let response = check(CheckDateRequest {
            min_date: Some("2021-01-01".to_owned()),
            ..parts(15, 6, 2020)
        })
        .await;

        assert_eq!(response.status, "invalid");
        assert_eq!(response.direction, Some("under"));
        assert_eq!(
            response.message.as_deref(),
            Some("Year value must be greater than or equal to 2021")
        );
    }

    #[tokio::test]
    async fn missing_parts_are_incomplete() {
        let response = check(CheckDateRequest {
            day: Some(1),
            ..CheckDateRequest::default()
        })
        .await;

        assert_eq!(response.status, "incomplete");
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn conflicting_or_malformed_limits_are_bad_requests() {
        let both = check_date_handler(Json(CheckDateRequest {
            min_date: Some("2021-01-01".to_owned()),
            min_timestamp: Some(0),
            ..parts(1, 1, 2022)
        }))
        .await
        .into_response();
        assert_eq!(both.status(), StatusCode::BAD_REQUEST);

        let malformed = check_date_handler(Json(CheckDateRequest {
            max_date: Some("someday".to_owned()),
            ..parts(1, 1, 2022)
        }))
        .await
        .into_response();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_relative_unit_is_a_bad_request() {
        let response = relative_date_handler(Query(RelativeDateQuery {
            offset: 1.0,
            unit: "fortnight".to_owned(),
        }))
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn relative_date_is_an_iso_date() {
        let Ok(Json(response)) = relative_date_handler(Query(RelativeDateQuery {
            offset: -18.0,
            unit: "year".to_owned(),
        }))
        .await
        else {
            panic!("relative date should resolve");
        };

        assert_eq!(response.date.len(), 10);
        assert_eq!(response.date.as_bytes()[4], b'-');
    }
}
