use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::config::SupabaseConfig;
use crate::constants::trending::{DEFAULT_TABLE, FETCH_LIMIT};
use crate::error::TrendingError;
use crate::models::{NewSearchCount, SearchCountRow, TrendingMovie};

/// Thin PostgREST client scoped to one search-counter table.
///
/// Holds no session state: every request carries the static project key, so
/// the handle is read-only after construction and safe to clone across
/// tasks.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    client: Client,
    table_url: Url,
}

impl SupabaseClient {
    /// Builds the handle, failing fast when the endpoint or key is missing.
    /// All operations depend on this configuration, so a bad setup is a
    /// startup error rather than a per-request one.
    pub fn new(config: &SupabaseConfig) -> Result<Self, TrendingError> {
        if config.url.is_empty() {
            return Err(TrendingError::Config(
                "Supabase URL is not configured".to_string(),
            ));
        }

        if config.key.is_empty() {
            return Err(TrendingError::Config(
                "Supabase key is not configured".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.key).map_err(|_| {
            TrendingError::Config("Supabase key contains invalid header characters".to_string())
        })?;
        headers.insert("apikey", api_key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.key)).map_err(|_| {
            TrendingError::Config("Supabase key contains invalid header characters".to_string())
        })?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .user_agent("Trendarr/1.0")
            .default_headers(headers)
            .build()
            .map_err(|e| TrendingError::Config(e.to_string()))?;

        let table = if config.table.is_empty() {
            DEFAULT_TABLE
        } else {
            &config.table
        };

        let base = config.url.trim_end_matches('/');
        let table_url = Url::parse(&format!("{base}/rest/v1/{table}")).map_err(|e| {
            TrendingError::Config(format!("Invalid Supabase URL '{}': {e}", config.url))
        })?;

        Ok(Self { client, table_url })
    }

    /// Looks up at most one counter row for `query`.
    pub async fn find_search_count(
        &self,
        query: &str,
    ) -> Result<Option<SearchCountRow>, TrendingError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "id,count")
            .append_pair("searchTerm", &format!("eq.{query}"))
            .append_pair("limit", "1");

        debug!("Looking up search count for term: {}", query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrendingError::lookup(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrendingError::lookup(format!("{status} - {body}")));
        }

        let rows: Vec<SearchCountRow> = response
            .json()
            .await
            .map_err(|e| TrendingError::Decode(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    /// Advances `count` from `seen` to `seen + 1` on one row.
    ///
    /// The filter matches both the row id and the count observed by the
    /// preceding lookup, so a concurrent increment makes this a no-op
    /// instead of overwriting the newer value. Returns whether a row was
    /// actually updated.
    pub async fn increment_count(&self, id: i64, seen: i64) -> Result<bool, TrendingError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"))
            .append_pair("count", &format!("eq.{seen}"));

        debug!("Incrementing search count for row {} ({} -> {})", id, seen, seen + 1);

        let response = self
            .client
            .patch(url)
            .header("Prefer", "return=representation")
            .json(&json!({ "count": seen + 1 }))
            .send()
            .await
            .map_err(|e| TrendingError::write(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrendingError::write(format!("{status} - {body}")));
        }

        let updated: Vec<SearchCountRow> = response
            .json()
            .await
            .map_err(|e| TrendingError::Decode(e.to_string()))?;

        Ok(!updated.is_empty())
    }

    /// Inserts the first counter row for a term.
    ///
    /// `searchTerm` is the conflict target and duplicates are ignored, so a
    /// concurrent first search cannot create a second row. Returns whether
    /// the insert landed; `false` means another writer got there first.
    pub async fn insert_search_count(&self, row: &NewSearchCount) -> Result<bool, TrendingError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("on_conflict", "searchTerm");

        debug!("Inserting search count for term: {}", row.search_term);

        let response = self
            .client
            .post(url)
            .header("Prefer", "resolution=ignore-duplicates,return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| TrendingError::write(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrendingError::write(format!("{status} - {body}")));
        }

        let inserted: Vec<SearchCountRow> = response
            .json()
            .await
            .map_err(|e| TrendingError::Decode(e.to_string()))?;

        Ok(!inserted.is_empty())
    }

    /// Fetches the top trending rows, most searched first. Ties are left to
    /// the store's order.
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingMovie>, TrendingError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "searchTerm,movie_id,title,count,poster_url")
            .append_pair("order", "count.desc")
            .append_pair("limit", &FETCH_LIMIT.to_string());

        debug!("Fetching top {} trending searches", FETCH_LIMIT);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrendingError::lookup(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrendingError::lookup(format!("{status} - {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| TrendingError::Decode(e.to_string()))
    }

    /// Cheap reachability probe against the table endpoint. Lets callers
    /// tell "backend unreachable" apart from "no trending data yet".
    pub async fn ping(&self) -> Result<(), TrendingError> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "id")
            .append_pair("limit", "1");

        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| TrendingError::lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TrendingError::lookup(format!(
                "Store is unreachable: {}",
                response.status()
            )));
        }

        Ok(())
    }
}
