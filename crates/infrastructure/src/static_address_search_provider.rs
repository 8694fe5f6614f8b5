//! Static address lookup for development. Matches against a fixed list.

use async_trait::async_trait;
use fieldkit_application::AddressSearchProvider;
use fieldkit_core::AppResult;
use fieldkit_domain::{expand_street_abbreviations, normalise_addr};
use serde_json::{Value, json};
use tracing::debug;

const SAMPLE_ADDRESSES: [&str; 6] = [
    "1 Martin Pl, Sydney  NSW  2000",
    "10 High St, Newtown  NSW  2042",
    "25 Collins St, Melbourne  VIC  3000",
    "100 Queen St, Brisbane City  QLD  4000",
    "7 Hay St, Perth  WA  6000",
    "42 Northbourne Ave, Braddon  ACT  2612",
];

/// Development address provider backed by an in-memory list.
#[derive(Clone)]
pub struct StaticAddressSearchProvider {
    addresses: Vec<String>,
}

impl StaticAddressSearchProvider {
    /// Creates a provider over the given addresses.
    #[must_use]
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

impl Default for StaticAddressSearchProvider {
    fn default() -> Self {
        Self::new(SAMPLE_ADDRESSES.iter().map(|address| (*address).to_owned()).collect())
    }
}

#[async_trait]
impl AddressSearchProvider for StaticAddressSearchProvider {
    async fn search(&self, input: &str) -> AppResult<Value> {
        let needle = expand_street_abbreviations(&normalise_addr(input));

        let entries: Vec<Value> = self
            .addresses
            .iter()
            .filter_map(|address| {
                let haystack = expand_street_abbreviations(&normalise_addr(address));
                haystack.find(&needle).map(|position| {
                    let score = if position == 0 { 100 } else { 50 };
                    json!({ "PartialAddress": address, "Score": score })
                })
            })
            .collect();

        debug!(input, matches = entries.len(), "static address search");

        Ok(json!({ "PickListEntries": entries }))
    }
}

#[cfg(test)]
mod tests {
    use fieldkit_application::AddressSearchProvider;
    use serde_json::Value;

    use super::StaticAddressSearchProvider;

    async fn labels(provider: &StaticAddressSearchProvider, input: &str) -> Vec<String> {
        let response = provider
            .search(input)
            .await
            .unwrap_or_else(|_| panic!("static search should not fail"));

        response["PickListEntries"]
            .as_array()
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry["PartialAddress"].as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn matches_normalised_input() {
        let provider = StaticAddressSearchProvider::default();

        assert_eq!(
            labels(&provider, "10 high st").await,
            vec!["10 High St, Newtown  NSW  2042".to_owned()]
        );
        assert_eq!(
            labels(&provider, "10 High Street Newtown").await,
            vec!["10 High St, Newtown  NSW  2042".to_owned()]
        );
    }

    #[tokio::test]
    async fn prefix_matches_score_higher() {
        let provider = StaticAddressSearchProvider::new(vec![
            "5 Main St, Town  NSW  2000".to_owned(),
            "15 Main St, Town  NSW  2000".to_owned(),
        ]);

        let response = provider
            .search("5 main")
            .await
            .unwrap_or_else(|_| panic!("static search should not fail"));
        let scores: Vec<Option<i64>> = response["PickListEntries"]
            .as_array()
            .map(|entries| entries.iter().map(|entry| entry["Score"].as_i64()).collect())
            .unwrap_or_default();

        assert_eq!(scores, vec![Some(100), Some(50)]);
    }

    #[tokio::test]
    async fn no_match_returns_empty_pick_list() {
        let provider = StaticAddressSearchProvider::default();
        let response = provider
            .search("nowhere")
            .await
            .unwrap_or_else(|_| panic!("static search should not fail"));

        assert_eq!(response["PickListEntries"], Value::Array(Vec::new()));
    }
}
