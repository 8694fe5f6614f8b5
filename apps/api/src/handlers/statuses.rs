use axum::Json;
use axum::extract::{Path, Query};
use fieldkit_domain::status_map;

use crate::dto::{StatusQuery, StatusResponse};
use crate::error::ApiResult;

pub async fn status_handler(
    Path((status_type, status)): Path<(String, String)>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<StatusResponse>> {
    let entry = status_map(&status_type, &status, query.escape.unwrap_or(true))?;

    Ok(Json(StatusResponse::from(entry)))
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::status_handler;
    use crate::dto::StatusQuery;

    fn path(status_type: &str, status: &str) -> Path<(String, String)> {
        Path((status_type.to_owned(), status.to_owned()))
    }

    #[tokio::test]
    async fn icons_are_escaped_unless_disabled() {
        let Ok(Json(escaped)) =
            status_handler(path("document", "completed"), Query(StatusQuery::default())).await
        else {
            panic!("document status should exist");
        };
        assert_eq!(escaped.text, "Completed");
        assert_eq!(escaped.icon, "check\\_circle");
        assert_eq!(escaped.colour, "success");

        let Ok(Json(raw)) = status_handler(
            path("document", "completed"),
            Query(StatusQuery {
                escape: Some(false),
            }),
        )
        .await
        else {
            panic!("document status should exist");
        };
        assert_eq!(raw.icon, "check_circle");
    }

    #[tokio::test]
    async fn unknown_status_is_not_found() {
        let response = status_handler(path("unknown", "unknown"), Query(StatusQuery::default()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
