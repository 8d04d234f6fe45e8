//! The rendering walk: DOT statement tree to SVG document.
//!
//! This module is organized into submodules:
//! - `defaults`: the Graphviz default-attribute table and fixed constants
//! - `attributes`: per-scope attribute records with default resolution
//! - `context`: the per-nesting-level rendering context
//! - `geometry`: decoding of position/bounding-box/spline attribute text
//! - `shapes`: node/edge/cluster drawing
//! - `svg`: the drawing surface (typed element tree + serialization)

pub mod attributes;
pub mod context;
pub mod defaults;
pub mod geometry;
pub mod shapes;
pub mod svg;

pub use context::RenderContext;
pub use svg::Document;

use std::borrow::Cow;
use std::collections::HashSet;

use crate::ast::{AttrTarget, Statement, Subgraph};
use crate::errors::RenderError;
use crate::parse;

/// Render DOT source to a drawing-surface document.
///
/// The input must have been through a Graphviz layout pass (it carries
/// `pos`/`bb`/spline attributes). Only the first graph in the input is
/// rendered; rendering either completes or fails as a whole.
pub fn render_document(source: &str) -> Result<Document, miette::Report> {
    let source = strip_line_wrapping(source);
    let graphs = parse::parse(&source)?;
    let graph = graphs.into_iter().next().ok_or(RenderError::EmptyInput)?;

    let mut doc = Document::new();
    let container = doc.group(doc.root()).node();
    let ctx = RenderContext::new(container);
    let mut seen = HashSet::new();
    walk(&mut doc, &ctx, graph.id.as_deref(), &graph.children, &mut seen)?;
    Ok(doc)
}

/// Remove backslash-wrapped CRLF line endings before parsing, a
/// normalization for DOT files emitted with Windows-style wrapped lines.
fn strip_line_wrapping(source: &str) -> String {
    source.replace("\\\r\n", "")
}

/// One nesting level of the statement tree.
///
/// Per scope, attribute statements resolve first (in document order, later
/// ones overriding earlier ones) and the scope's own decoration paints
/// before any child is drawn; subgraphs, edges and nodes then dispatch in
/// document order, depth-first. That keeps a nested cluster's background
/// under everything declared after it and makes node dedupe first-wins in
/// document order - the painter's algorithm Graphviz uses.
fn walk(
    doc: &mut Document,
    ctx: &RenderContext,
    graph_id: Option<&str>,
    children: &[Statement],
    seen: &mut HashSet<String>,
) -> Result<(), RenderError> {
    let children = normalize_children(children);
    let mut scope = ctx.clone();

    for stmt in children.iter() {
        if let Statement::Attr(attr) = stmt.as_ref() {
            match attr.target {
                AttrTarget::Graph => {
                    scope.graph_defaults.override_with(&attr.attrs);
                    if scope.is_root {
                        size_root(doc, &scope);
                    }
                }
                AttrTarget::Node => scope.node_defaults.override_with(&attr.attrs),
                AttrTarget::Edge => scope.edge_defaults.override_with(&attr.attrs),
            }
        }
    }

    shapes::decorate(doc, &scope, graph_id);

    for stmt in children.iter() {
        match stmt.as_ref() {
            Statement::Subgraph(sub) => {
                let nested = doc.group(scope.container).node();
                let child_ctx = scope.enter_subgraph(nested);
                walk(doc, &child_ctx, sub.id.as_deref(), &sub.children, seen)?;
            }
            Statement::Edge(edge) => shapes::render_edge(doc, &scope, edge)?,
            Statement::Node(node) => {
                // First occurrence wins, across all scopes: no re-merge,
                // no re-draw for ids already drawn.
                if seen.contains(&node.id) {
                    crate::log::debug!(id = node.id.as_str(), "skipping re-declared node");
                    continue;
                }
                shapes::render_node(doc, &scope, node)?;
                seen.insert(node.id.clone());
            }
            Statement::Attr(_) => {}
        }
    }

    Ok(())
}

/// Tolerate parsers that split one subgraph statement into an id-only entry
/// immediately followed by a body-only entry: fold the id onto the body and
/// drop the id-only entry. Must run before any other processing of the
/// children.
fn normalize_children(children: &[Statement]) -> Vec<Cow<'_, Statement>> {
    let mut out: Vec<Cow<'_, Statement>> = Vec::with_capacity(children.len());
    let mut i = 0;
    while i < children.len() {
        if let Statement::Subgraph(first) = &children[i] {
            if first.id.is_some() && first.children.is_empty() {
                if let Some(Statement::Subgraph(second)) = children.get(i + 1) {
                    if second.id.is_none() {
                        out.push(Cow::Owned(Statement::Subgraph(Subgraph {
                            id: first.id.clone(),
                            children: second.children.clone(),
                        })));
                        i += 2;
                        continue;
                    }
                }
            }
        }
        out.push(Cow::Borrowed(&children[i]));
        i += 1;
    }
    out
}

/// Size the canvas from the root bounding box and flip the origin: the root
/// container's translation moves Graphviz's bottom-left origin to the
/// surface's top-left while centering the padding.
fn size_root(doc: &mut Document, ctx: &RenderContext) {
    if let Some(bb) = ctx.graph_defaults.bb.as_deref() {
        let bb = geometry::parse_rect(bb);
        let pad = defaults::CANVAS_PAD;
        doc.size(bb.x1 + pad, bb.y1 + pad);
        doc.handle(ctx.container)
            .translate(pad / 2.0, bb.y1 + pad / 2.0);
        crate::log::debug!(width = bb.x1 + pad, height = bb.y1 + pad, "sized root canvas");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeStmt;

    fn subgraph(id: Option<&str>, children: Vec<Statement>) -> Statement {
        Statement::Subgraph(Subgraph {
            id: id.map(String::from),
            children,
        })
    }

    fn node(id: &str) -> Statement {
        Statement::Node(NodeStmt {
            id: id.to_string(),
            attrs: Vec::new(),
        })
    }

    #[test]
    fn split_subgraph_entries_are_merged() {
        let children = vec![
            subgraph(Some("cluster0"), Vec::new()),
            subgraph(None, vec![node("a")]),
            node("b"),
        ];
        let normalized = normalize_children(&children);
        assert_eq!(normalized.len(), 2);
        let Statement::Subgraph(merged) = normalized[0].as_ref() else {
            panic!("expected merged subgraph");
        };
        assert_eq!(merged.id.as_deref(), Some("cluster0"));
        assert_eq!(merged.children.len(), 1);
    }

    #[test]
    fn adjacent_complete_subgraphs_are_untouched() {
        let children = vec![
            subgraph(Some("cluster0"), vec![node("a")]),
            subgraph(Some("cluster1"), vec![node("b")]),
        ];
        let normalized = normalize_children(&children);
        assert_eq!(normalized.len(), 2);
    }

    #[test]
    fn line_wrapping_is_stripped() {
        assert_eq!(strip_line_wrapping("a\\\r\nb"), "ab");
        assert_eq!(strip_line_wrapping("a\\nb"), "a\\nb");
    }
}
