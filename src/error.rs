use thiserror::Error;

/// Errors raised by the trending-search store.
///
/// Variants follow the origin of the failure rather than the transport type:
/// configuration problems are fatal at construction, lookup and write
/// failures surface per operation.
#[derive(Debug, Error)]
pub enum TrendingError {
    #[error("Invalid trending store configuration: {0}")]
    Config(String),

    #[error("Trending lookup failed: {0}")]
    Lookup(String),

    #[error("Trending write failed: {0}")]
    Write(String),

    #[error("Trending response could not be decoded: {0}")]
    Decode(String),

    #[error("Search count for '{query}' still contended after {attempts} attempts")]
    Contended { query: String, attempts: u32 },
}

impl TrendingError {
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }
}
