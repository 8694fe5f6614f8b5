use std::time::Duration;

use async_trait::async_trait;
use fieldkit_application::AddressSearchProvider;
use fieldkit_core::{AppError, AppResult};
use reqwest::Url;
use serde_json::Value;

const QUERY_PARAM: &str = "query";
const AUTH_HEADER: &str = "Auth-Token";

/// HTTP implementation of the address lookup port.
pub struct HttpAddressSearchProvider {
    http_client: reqwest::Client,
    search_url: Url,
    api_key: Option<String>,
}

impl HttpAddressSearchProvider {
    /// Creates a provider that reuses an existing HTTP client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, search_url: Url, api_key: Option<String>) -> Self {
        Self {
            http_client,
            search_url,
            api_key,
        }
    }

    /// Creates a provider with its own client and request timeout.
    pub fn with_timeout(
        search_url: Url,
        api_key: Option<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build address search client: {error}"))
            })?;

        Ok(Self::new(http_client, search_url, api_key))
    }
}

#[async_trait]
impl AddressSearchProvider for HttpAddressSearchProvider {
    async fn search(&self, input: &str) -> AppResult<Value> {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair(QUERY_PARAM, input);

        let mut request = self.http_client.get(url);

        if let Some(api_key) = &self.api_key {
            request = request.header(AUTH_HEADER, api_key.as_str());
        }

        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("address search transport error: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Internal(format!(
                "address search failed with status {status}: {body}"
            )));
        }

        let body = response.json::<Value>().await.map_err(|error| {
            AppError::Internal(format!("address search returned invalid JSON: {error}"))
        })?;

        Ok(adapt_response(body))
    }
}

/// Unwraps a `{ "data": { ... } }` envelope when the pick list is nested.
fn adapt_response(body: Value) -> Value {
    if body.get("PickListEntries").is_some() {
        return body;
    }

    match body {
        Value::Object(mut envelope) if envelope.get("data").is_some_and(Value::is_object) => {
            envelope.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::adapt_response;

    #[test]
    fn bare_response_is_returned_unchanged() {
        let body = json!({ "PickListEntries": [{ "PartialAddress": "1 Main St" }] });

        assert_eq!(adapt_response(body.clone()), body);
    }

    #[test]
    fn data_envelope_is_unwrapped() {
        let inner = json!({ "PickListEntries": [] });

        assert_eq!(adapt_response(json!({ "data": inner.clone() })), inner);
    }

    #[test]
    fn unknown_shapes_pass_through() {
        assert_eq!(adapt_response(json!([1, 2])), json!([1, 2]));
        assert_eq!(
            adapt_response(json!({ "data": "nope" })),
            json!({ "data": "nope" })
        );
    }
}
