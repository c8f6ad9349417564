//! Read-only client for the maplestory.io item API. Search runs against
//! the current KMS data (Korean names), detail against classic GMS v62,
//! whose records carry the pre-Big-Bang stats and shop prices the overlay
//! displays.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

const SEARCH_BASE_URL: &str = "https://maplestory.io/api/KMS/384";
const DETAIL_BASE_URL: &str = "https://maplestory.io/api/GMS/62";

/// One hit from the name search.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct MapleApiClient {
    search_base: String,
    detail_base: String,
    client: reqwest::Client,
}

impl MapleApiClient {
    pub fn new() -> Self {
        Self::with_base_urls(SEARCH_BASE_URL.to_string(), DETAIL_BASE_URL.to_string())
    }

    /// Override the endpoints; used by tests against a local server.
    pub fn with_base_urls(search_base: String, detail_base: String) -> Self {
        Self {
            search_base,
            detail_base,
            client: reqwest::Client::new(),
        }
    }

    /// Searches items by name; the list comes back in the API's relevance
    /// order.
    pub async fn search_items(&self, name: &str) -> Result<Vec<ItemSummary>> {
        let url = self.search_url(name);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("item search request failed")?;
        response
            .json::<Vec<ItemSummary>>()
            .await
            .context("failed to parse item search response")
    }

    /// Fetches the full detail record for one item id. The shape varies by
    /// item kind, so it stays a loosely-typed document.
    pub async fn item_detail(&self, item_id: u64) -> Result<Value> {
        let url = format!("{}/item/{}", self.detail_base, item_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("item detail request failed")?;
        response
            .json::<Value>()
            .await
            .context("failed to parse item detail response")
    }

    fn search_url(&self, name: &str) -> String {
        format!(
            "{}/item?searchFor={}",
            self.search_base,
            urlencoding::encode(name)
        )
    }

    /// Picks the exact-name match when one exists, else the first hit.
    pub fn best_match<'a>(results: &'a [ItemSummary], query: &str) -> Option<&'a ItemSummary> {
        results
            .iter()
            .find(|item| item.name == query)
            .or_else(|| results.first())
    }
}

impl Default for MapleApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u64, name: &str) -> ItemSummary {
        ItemSummary {
            id,
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn best_match_prefers_exact_name() {
        let results = vec![summary(1, "노가다 목장갑 (1)"), summary(2, "노가다 목장갑")];
        assert_eq!(MapleApiClient::best_match(&results, "노가다 목장갑").unwrap().id, 2);
    }

    #[test]
    fn best_match_falls_back_to_first_hit() {
        let results = vec![summary(7, "파란 달팽이"), summary(8, "달팽이")];
        assert_eq!(MapleApiClient::best_match(&results, "달팽").unwrap().id, 7);
        assert!(MapleApiClient::best_match(&[], "달팽").is_none());
    }

    #[test]
    fn search_urls_are_percent_encoded() {
        let client = MapleApiClient::with_base_urls(
            "http://localhost".to_string(),
            "http://localhost".to_string(),
        );
        assert_eq!(
            client.search_url("Work Gloves"),
            "http://localhost/item?searchFor=Work%20Gloves"
        );

        // Hangul encodes to one %XX triple per UTF-8 byte.
        let url = client.search_url("쿰");
        let query = url.rsplit_once('=').unwrap().1;
        assert_eq!(query.len(), "쿰".len() * 3);
        assert!(query.chars().all(|c| c.is_ascii()));
    }
}
