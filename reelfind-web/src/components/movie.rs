//! Search and detail view components.
//!
//! Pure state-to-HTML functions; every conditional branch of the UI
//! (error, empty, results, detail) has exactly one renderer.

use reelfind_core::model::{MovieDetail, MovieSummary, TypeFilter};

use super::layout::{button, escape, input};

/// Renders the header banner: the home/logo link that resets the search,
/// plus the search form pre-filled with the current query.
pub fn search_banner(query: &str) -> String {
    format!(
        r#"<div class="bg-cyan-800 py-4 rounded w-full flex flex-col items-center gap-4">
            <a href="/reset" class="flex items-center gap-2">
                <h1 class="text-center text-2xl text-white font-bold">Reelfind</h1>
            </a>
            <form action="/search" method="get" class="flex justify-center gap-2 w-10/12 md:w-2/3">
                {}
                {}
            </form>
        </div>"#,
        input("query", "Search for movies...", query),
        button("Search", "primary", Some(r#"type="submit""#)),
    )
}

/// Renders the inline error banner with the message shown verbatim
/// (after HTML escaping).
pub fn error_banner(message: &str) -> String {
    format!(
        r#"<p class="text-center text-2xl flex justify-center items-center mt-10 font-semibold text-red-500">{}</p>"#,
        escape(message),
    )
}

/// Renders the initial-load prompt shown when there are no results and no
/// error.
pub fn empty_prompt() -> String {
    r#"<div class="text-center text-2xl flex justify-center items-center min-h-[70vh] font-semibold text-white">- Search Your Movie Please -</div>"#
        .to_string()
}

/// Renders the sticky control row: type filter select plus Previous/Next.
///
/// The pager buttons carry `disabled` at the page bounds; the filter select
/// submits itself on change.
pub fn controls_row(filter: TypeFilter, has_previous: bool, has_next: bool) -> String {
    let option = |value: &str, label: &str| {
        let selected = if filter.as_str() == value {
            " selected"
        } else {
            ""
        };
        format!(r#"<option value="{value}"{selected}>{label}</option>"#)
    };

    let pager = |delta: i64, label: &str, enabled: bool| {
        let disabled = if enabled { "" } else { "disabled" };
        format!(
            r#"<form action="/paginate" method="get">
                <input type="hidden" name="delta" value="{delta}" />
                {}
            </form>"#,
            button(label, "pager", Some(disabled)),
        )
    };

    format!(
        r#"<div class="w-full sticky top-4 flex justify-between gap-4">
            <form action="/filter" method="get">
                <select name="type" onchange="this.form.submit()"
                        class="bg-gray-300 hover:bg-gray-500 p-2 w-fit rounded text-gray-900">
                    {}
                    {}
                    {}
                    {}
                </select>
            </form>
            <div class="flex gap-4">
                {}
                {}
            </div>
        </div>"#,
        option("", "-select-"),
        option("movie", "Movie"),
        option("series", "Series"),
        option("episode", "Episode"),
        pager(-1, "Previous", has_previous),
        pager(1, "Next", has_next),
    )
}

/// Renders the result grid; each card links to the title's detail view.
pub fn results_grid(results: &[MovieSummary]) -> String {
    let cards: String = results
        .iter()
        .map(|movie| {
            format!(
                r#"<div class="border p-2 rounded bg-slate-200 text-gray-900">
                    <a href="/movie/{id}">
                        <img src="{poster}" alt="{title}" class="w-full h-48 object-contain" />
                        <h2 class="text-lg font-bold mt-2">{title}</h2>
                        <p>{year}</p>
                    </a>
                </div>"#,
                id = urlencoding::encode(&movie.imdb_id),
                poster = escape(&movie.poster_url),
                title = escape(&movie.title),
                year = escape(&movie.year),
            )
        })
        .collect();

    format!(
        r#"<div class="overflow-y-auto pr-4 grid grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4">{cards}</div>"#
    )
}

/// Renders the detail panel: poster column plus the field rows.
pub fn detail_panel(movie: &MovieDetail, back_href: &str) -> String {
    let row = |label: &str, value: &str| {
        format!(
            r#"<p class="text-lg text-gray-300"><strong class="text-gray-100 text-xl">{label} :</strong> {}</p>"#,
            escape(value),
        )
    };

    format!(
        r#"{}
        <div class="flex flex-col gap-4 sm:flex-row mt-10">
            <div class="w-full sm:w-2/5 lg:w-1/4 rounded p-4 bg-gray-400 h-fit">
                <img src="{poster}" alt="{title}" class="w-full" />
            </div>
            <div class="bg-slate-800 px-4 rounded shadow-lg sm:w-3/5 lg:w-3/4 flex flex-col justify-start gap-4 py-12">
                <h1 class="text-3xl font-bold text-white mb-4 text-center">{title}</h1>
                {year}
                {genre}
                {plot}
                {cast}
                {ratings}
            </div>
        </div>"#,
        back_button(back_href),
        poster = escape(&movie.poster_url),
        title = escape(&movie.title),
        year = row("Year", &movie.year),
        genre = row("Genre", &movie.genre),
        plot = row("Plot", &movie.plot),
        cast = row("Cast", &movie.actors),
        ratings = row("Ratings", &movie.imdb_rating),
    )
}

/// Renders the detail view's failure branch.
pub fn detail_error(message: &str, back_href: &str) -> String {
    format!(
        r#"{}
        <p class="text-center text-red-500 mt-10 text-2xl font-semibold">{}</p>"#,
        back_button(back_href),
        escape(message),
    )
}

fn back_button(back_href: &str) -> String {
    format!(
        r#"<a href="{back_href}" class="bg-blue-500 hover:bg-blue-600 px-4 py-2 text-white rounded font-semibold w-fit">&larr; Back to Search</a>"#
    )
}
