pub mod tmdb {

    pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
}

pub mod trending {

    pub const DEFAULT_TABLE: &str = "trending_searches";

    pub const FETCH_LIMIT: u32 = 5;

    /// Bound on re-attempts when a concurrent writer wins the conditional write.
    pub const MAX_WRITE_ATTEMPTS: u32 = 3;
}
