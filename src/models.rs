use serde::{Deserialize, Serialize};

use crate::constants::tmdb::POSTER_BASE_URL;

/// A movie as handed over by the search feature. Owned by the caller;
/// this crate only reads the fields it persists alongside the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,

    pub title: String,

    /// TMDB poster path, e.g. `/8uO0gUM8aNqYLs1OsTBQiXu0fEv.jpg`.
    /// Absent paths yield the bare image-host prefix, which renders as a
    /// broken poster rather than failing the write.
    pub poster_path: Option<String>,
}

impl Movie {
    #[must_use]
    pub fn poster_url(&self) -> String {
        format!(
            "{}{}",
            POSTER_BASE_URL,
            self.poster_path.as_deref().unwrap_or_default()
        )
    }
}

/// Projection of a search-count row used by the write path.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCountRow {
    pub id: i64,

    pub count: i64,
}

/// Payload for the first search of a term.
#[derive(Debug, Clone, Serialize)]
pub struct NewSearchCount {
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    pub movie_id: i64,

    pub title: String,

    pub count: i64,

    pub poster_url: String,
}

impl NewSearchCount {
    #[must_use]
    pub fn from_movie(query: &str, movie: &Movie) -> Self {
        Self {
            search_term: query.to_string(),
            movie_id: movie.id,
            title: movie.title.clone(),
            count: 1,
            poster_url: movie.poster_url(),
        }
    }
}

/// A ranked trending entry, ordered most-popular first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingMovie {
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    pub movie_id: i64,

    pub title: String,

    pub count: i64,

    pub poster_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster_path: Option<&str>) -> Movie {
        Movie {
            id: 438631,
            title: "Dune".to_string(),
            poster_path: poster_path.map(String::from),
        }
    }

    #[test]
    fn test_poster_url_concatenation() {
        let movie = movie(Some("/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"));
        assert_eq!(
            movie.poster_url(),
            "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
        );
    }

    #[test]
    fn test_poster_url_without_path_is_bare_prefix() {
        let movie = movie(None);
        assert_eq!(movie.poster_url(), "https://image.tmdb.org/t/p/w500");
    }

    #[test]
    fn test_new_search_count_starts_at_one() {
        let row = NewSearchCount::from_movie("dune", &movie(Some("/poster.jpg")));
        assert_eq!(row.count, 1);
        assert_eq!(row.search_term, "dune");
        assert_eq!(row.movie_id, 438631);
        assert_eq!(row.poster_url, "https://image.tmdb.org/t/p/w500/poster.jpg");
    }

    #[test]
    fn test_trending_movie_wire_field_names() {
        let json = r#"{
            "searchTerm": "dune",
            "movie_id": 438631,
            "title": "Dune",
            "count": 7,
            "poster_url": "https://image.tmdb.org/t/p/w500/poster.jpg"
        }"#;

        let row: TrendingMovie = serde_json::from_str(json).unwrap();
        assert_eq!(row.search_term, "dune");
        assert_eq!(row.count, 7);

        let back = serde_json::to_value(&row).unwrap();
        assert!(back.get("searchTerm").is_some());
    }
}
