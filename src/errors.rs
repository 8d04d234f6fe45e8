//! Error types with rich diagnostics using miette
//!
//! Parse failures are reported by the parser as `miette::Report`s carrying
//! pest's own message; the types here cover the rendering walk.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while walking the statement tree and emitting shapes.
///
/// All of these are fatal for the render call that raised them - there is no
/// partial-graph recovery.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("unsupported shape: {shape}")]
    #[diagnostic(
        code(dotru::render::unsupported_shape),
        help(
            "supported shapes are ellipse, oval, circle, box, rect, rectangle, diamond, Mdiamond, Msquare and record"
        )
    )]
    UnsupportedShape { shape: String, node: String },

    #[error("missing attribute `{name}` on {element}")]
    #[diagnostic(
        code(dotru::render::missing_attribute),
        help("only DOT that has been through a Graphviz layout pass carries layout attributes")
    )]
    MissingAttribute {
        name: &'static str,
        element: String,
    },

    #[error("input contains no graphs")]
    #[diagnostic(code(dotru::render::empty_input))]
    EmptyInput,
}
