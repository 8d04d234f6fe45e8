//! dotru - render Graphviz-laid-out DOT graphs to SVG.
//!
//! This crate consumes DOT that has already been through a Graphviz layout
//! pass (the `-Tdot` output carrying `pos`, `bb` and spline attributes) and
//! emits SVG. It is not a layout engine: node placement, edge routing and
//! bounding boxes arrive pre-computed in the attributes and are only
//! transformed in presentation space (origin shift, Y-axis flip, inch to
//! pixel scaling).
//!
//! # Example
//!
//! ```rust
//! let svg = dotru::render(
//!     r#"digraph {
//!         graph [bb="0,0,54,54"];
//!         node0 [pos="27,27", width="0.75", height="0.5", label="X"];
//!     }"#,
//! )
//! .unwrap();
//! assert!(svg.contains("<ellipse"));
//! ```

use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "dot.pest"]
pub struct DotParser;

pub mod ast;
pub mod errors;
pub mod log;
pub mod parse;
pub mod render;

pub use errors::RenderError;
pub use render::svg::Document;

/// Render DOT source to an SVG string.
///
/// Only the first graph in the input is rendered. Returns an error with
/// diagnostics when the source fails to parse, when a node carries an
/// unsupported `shape`, or when a layout attribute the renderer depends on
/// is missing.
pub fn render(source: &str) -> Result<String, miette::Report> {
    Ok(render::render_document(source)?.to_svg())
}

/// Render DOT source to the drawing-surface document, for callers that want
/// to keep building on the element tree before serializing.
pub fn render_document(source: &str) -> Result<Document, miette::Report> {
    render::render_document(source)
}
