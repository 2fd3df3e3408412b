//! Detail view state machine.
//!
//! Per view: `Loading` settles into `Loaded` or `Failed` and stays there;
//! only a new identifier starts a fresh view. Back navigation is derived
//! from the persisted search, see [`crate::session::restore_route`].

use crate::model::MovieDetail;

/// User-facing message for detail lookups that failed in transit.
pub const GENERIC_DETAIL_ERROR: &str = "Failed to fetch movie details. Please try again later.";

/// The settled result of one detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    Success(MovieDetail),
    /// API-reported failure; the message is surfaced verbatim.
    ApiError(String),
    /// Network, timeout or malformed-response failure.
    TransportFailure,
}

/// Render state of a single detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DetailView {
    #[default]
    Loading,
    Loaded(MovieDetail),
    Failed(String),
}

impl DetailView {
    /// Fresh view awaiting its lookup.
    pub fn new() -> Self {
        DetailView::Loading
    }

    /// Settle the view. Once settled, further outcomes are ignored; a new
    /// identifier warrants a new view instead.
    pub fn apply(&mut self, outcome: DetailOutcome) {
        if !matches!(self, DetailView::Loading) {
            return;
        }
        *self = match outcome {
            DetailOutcome::Success(detail) => DetailView::Loaded(detail),
            DetailOutcome::ApiError(message) => DetailView::Failed(message),
            DetailOutcome::TransportFailure => {
                DetailView::Failed(GENERIC_DETAIL_ERROR.to_string())
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail() -> MovieDetail {
        MovieDetail {
            imdb_id: "tt0111161".to_string(),
            title: "The Shawshank Redemption".to_string(),
            year: "1994".to_string(),
            genre: "Drama".to_string(),
            plot: "Two imprisoned men bond over a number of years.".to_string(),
            actors: "Tim Robbins, Morgan Freeman".to_string(),
            imdb_rating: "9.3".to_string(),
            poster_url: "https://example.com/shawshank.jpg".to_string(),
        }
    }

    #[test]
    fn loading_settles_into_loaded() {
        let mut view = DetailView::new();
        view.apply(DetailOutcome::Success(sample_detail()));
        assert_eq!(view, DetailView::Loaded(sample_detail()));
    }

    #[test]
    fn api_error_message_is_kept_verbatim() {
        let mut view = DetailView::new();
        view.apply(DetailOutcome::ApiError("Incorrect IMDb ID.".to_string()));
        assert_eq!(view, DetailView::Failed("Incorrect IMDb ID.".to_string()));
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let mut view = DetailView::new();
        view.apply(DetailOutcome::TransportFailure);
        assert_eq!(view, DetailView::Failed(GENERIC_DETAIL_ERROR.to_string()));
    }

    #[test]
    fn settled_view_is_terminal() {
        let mut view = DetailView::new();
        view.apply(DetailOutcome::ApiError("first".to_string()));
        view.apply(DetailOutcome::Success(sample_detail()));
        assert_eq!(view, DetailView::Failed("first".to_string()));
    }
}
