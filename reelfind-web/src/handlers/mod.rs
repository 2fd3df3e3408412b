//! HTTP handlers for pages and the JSON API.

pub mod api;
pub mod pages;

pub use api::{api_movie_detail, api_search};
pub use pages::{
    home_page, movie_detail_page, paginate, reset_search, search_filtered_page,
    search_results_page, select_filter, submit_search,
};
