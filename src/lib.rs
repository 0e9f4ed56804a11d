pub mod clients;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;

pub use clients::SupabaseClient;
pub use config::{Config, SupabaseConfig};
pub use error::TrendingError;
pub use models::{Movie, TrendingMovie};
pub use services::TrendingService;

use anyhow::Result;

/// Builds a ready-to-use [`TrendingService`] from loaded configuration.
/// Fails fast when the store endpoint or key is missing, since every
/// operation depends on them.
pub fn trending_service(config: &Config) -> Result<TrendingService> {
    config.validate()?;
    let client = SupabaseClient::new(&config.supabase)?;
    Ok(TrendingService::new(client))
}
