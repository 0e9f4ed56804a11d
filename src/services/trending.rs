//! Search-popularity tracking for the movie-search feature.
//!
//! Two operations share one injected store handle: recording a search bumps
//! a per-term counter, and the trending view reads the top terms back. The
//! write path is fail-loud so callers can react; the read path degrades to
//! "no trending data" because it only feeds a display widget.

use tracing::{debug, error, warn};

use crate::clients::SupabaseClient;
use crate::constants::trending::MAX_WRITE_ATTEMPTS;
use crate::error::TrendingError;
use crate::models::{Movie, NewSearchCount, TrendingMovie};

#[derive(Clone)]
pub struct TrendingService {
    client: SupabaseClient,
}

impl TrendingService {
    #[must_use]
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    /// Records one search for `query`, creating the counter row on first
    /// sight and incrementing it afterwards.
    ///
    /// Both writes are conditional: the increment only applies at the count
    /// observed by the lookup, and the insert ignores a duplicate term. A
    /// concurrent writer therefore costs a re-read, never a lost increment
    /// or a second row. Contention re-attempts are bounded; transport and
    /// store failures are not retried.
    ///
    /// # Errors
    ///
    /// - [`TrendingError::Lookup`] when the existing-row check fails
    /// - [`TrendingError::Write`] when the insert or update fails
    /// - [`TrendingError::Contended`] when every attempt lost the race
    pub async fn update_search_count(
        &self,
        query: &str,
        movie: &Movie,
    ) -> Result<(), TrendingError> {
        let result = self.record_search(query, movie).await;

        if let Err(err) = &result {
            error!("Error updating search count for '{}': {}", query, err);
        }

        result
    }

    async fn record_search(&self, query: &str, movie: &Movie) -> Result<(), TrendingError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            match self.client.find_search_count(query).await? {
                Some(existing) => {
                    if self.client.increment_count(existing.id, existing.count).await? {
                        return Ok(());
                    }

                    debug!(
                        "Search count for '{}' moved under us (attempt {}), re-reading",
                        query, attempt
                    );
                }
                None => {
                    let row = NewSearchCount::from_movie(query, movie);
                    if self.client.insert_search_count(&row).await? {
                        return Ok(());
                    }

                    // A concurrent first search won the insert; the next
                    // pass takes the increment path.
                    debug!(
                        "Concurrent insert for '{}' (attempt {}), switching to increment",
                        query, attempt
                    );
                }
            }
        }

        Err(TrendingError::Contended {
            query: query.to_string(),
            attempts: MAX_WRITE_ATTEMPTS,
        })
    }

    /// Reads the current top-5 trending searches, most popular first.
    ///
    /// This is the tagged form: an empty table is `Ok(vec![])` and a store
    /// failure is an `Err` with its cause, so callers that care can tell
    /// "nothing trending yet" from "backend unreachable".
    ///
    /// # Errors
    ///
    /// Returns [`TrendingError::Lookup`] or [`TrendingError::Decode`] when
    /// the query or its response fails.
    pub async fn fetch_trending(&self) -> Result<Vec<TrendingMovie>, TrendingError> {
        self.client.fetch_trending().await
    }

    /// Display-friendly form of [`fetch_trending`](Self::fetch_trending):
    /// `None` both when nothing is trending and when the query fails. The
    /// failure is logged and swallowed so the consuming UI renders an empty
    /// trending section instead of an error.
    pub async fn get_trending_movies(&self) -> Option<Vec<TrendingMovie>> {
        match self.fetch_trending().await {
            Ok(rows) if rows.is_empty() => None,
            Ok(rows) => Some(rows),
            Err(err) => {
                warn!("Error fetching trending movies: {}", err);
                None
            }
        }
    }

    /// Store reachability probe, see [`SupabaseClient::ping`].
    pub async fn ping(&self) -> Result<(), TrendingError> {
        self.client.ping().await
    }
}
