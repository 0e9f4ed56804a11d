pub mod trending;

pub use trending::TrendingService;
