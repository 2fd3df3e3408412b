//! Domain types for movie search and detail views.
//!
//! All fields mirror the external API's payload verbatim; nothing here is
//! normalized beyond renaming into Rust conventions. Wire-shape structs with
//! the API's PascalCase field names live next to the HTTP client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed page size of the external search API.
pub const RESULTS_PER_PAGE: u32 = 10;

/// Narrows a search to one media type, or no narrowing at all.
///
/// Encoded as `""`, `"movie"`, `"series"` or `"episode"` in routes, in
/// durable storage, and on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// No narrowing; the search covers all media types.
    #[default]
    None,
    Movie,
    Series,
    Episode,
}

impl TypeFilter {
    /// Route/storage/wire encoding of the filter.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::None => "",
            TypeFilter::Movie => "movie",
            TypeFilter::Series => "series",
            TypeFilter::Episode => "episode",
        }
    }

    /// Whether no filter is active.
    pub fn is_none(self) -> bool {
        matches!(self, TypeFilter::None)
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" => Ok(TypeFilter::None),
            "movie" => Ok(TypeFilter::Movie),
            "series" => Ok(TypeFilter::Series),
            "episode" => Ok(TypeFilter::Episode),
            _ => Err(format!("Invalid type filter: {s}")),
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a search result page.
///
/// Immutable, sourced verbatim from the search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Opaque external identifier, e.g. `tt0372784`.
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
}

/// Full record for a single title, one per detail view.
///
/// The API reports missing fields as the literal string `N/A`; those are
/// kept as-is and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub plot: String,
    pub actors: String,
    pub imdb_rating: String,
    pub poster_url: String,
}

/// Parsed success payload of one search lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub results: Vec<MovieSummary>,
    /// Total matches across all pages, as reported by the API.
    pub total_results: u32,
}
