//! Address autocomplete use case.

use std::sync::Arc;

use fieldkit_core::{AppError, AppResult};
use fieldkit_domain::AddressOption;
use serde_json::Value;

use crate::address_search_ports::AddressSearchProvider;

/// Largest accepted minimum input length.
pub const MAX_MIN_CHARS: usize = 100;

const PICK_LIST_KEY: &str = "PickListEntries";

/// Field names of one pick list schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PickListKeys {
    address: &'static str,
    score: &'static str,
}

const PROD_KEYS: PickListKeys = PickListKeys {
    address: "PartialAddress",
    score: "Score",
};

const SIT_KEYS: PickListKeys = PickListKeys {
    address: "partialAddressField",
    score: "scoreField",
};

impl PickListKeys {
    fn detect(first: &Value) -> Self {
        if first.get(PROD_KEYS.address).is_some_and(Value::is_string) {
            PROD_KEYS
        } else {
            SIT_KEYS
        }
    }
}

/// Application service that turns partial input into address options.
#[derive(Clone)]
pub struct AddressSearchService {
    provider: Arc<dyn AddressSearchProvider>,
    min_chars: usize,
}

impl AddressSearchService {
    /// Creates a new address search service.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when `min_chars` is above
    /// [`MAX_MIN_CHARS`].
    pub fn new(provider: Arc<dyn AddressSearchProvider>, min_chars: usize) -> AppResult<Self> {
        if min_chars > MAX_MIN_CHARS {
            return Err(AppError::Validation(format!(
                "address search minimum characters must be between 0 and {MAX_MIN_CHARS}, \
                 {min_chars} given"
            )));
        }

        Ok(Self {
            provider,
            min_chars,
        })
    }

    /// Returns the minimum input length before the provider is called.
    #[must_use]
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    /// Searches for addresses matching `input`.
    ///
    /// The manual entry option is always the last item. Inputs shorter than
    /// the minimum length never reach the provider; provider failures and
    /// unexpected responses are logged and yield only the manual option.
    pub async fn search(&self, input: &str) -> Vec<AddressOption> {
        let mut options = Vec::new();

        if input.chars().count() >= self.min_chars {
            match self.provider.search(input).await {
                Ok(response) => match pick_list(&response) {
                    Some(entries) => options = entries_to_options(entries),
                    None => tracing::error!(
                        response = %response,
                        "could not find address pick list data in provider response"
                    ),
                },
                Err(error) => tracing::error!(%error, "address search provider failed"),
            }
        }

        options.push(AddressOption::manual());
        options
    }
}

fn pick_list(response: &Value) -> Option<&[Value]> {
    response
        .get(PICK_LIST_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

fn entries_to_options(entries: &[Value]) -> Vec<AddressOption> {
    let Some(first) = entries.first() else {
        return Vec::new();
    };
    let keys = PickListKeys::detect(first);

    entries
        .iter()
        .filter_map(|entry| {
            let Some(address) = entry.get(keys.address).and_then(Value::as_str) else {
                tracing::debug!(%entry, "skipping pick list entry without an address");
                return None;
            };

            Some(AddressOption::from_match(address, score_of(entry, keys.score)))
        })
        .collect()
}

fn score_of(entry: &Value, key: &str) -> f64 {
    match entry.get(key) {
        Some(Value::Number(number)) => number.as_f64().unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0.0,
    }
}
