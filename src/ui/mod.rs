//! Browser-facing UI: page layout, callback wiring and the embedded page.

pub mod callbacks;
pub mod layout;

/// Single-page front end. Builds the controls from `/api/layout` and renders
/// the figures returned by `/api/update` with Plotly.js.
pub const INDEX_HTML: &str = include_str!("index.html");
