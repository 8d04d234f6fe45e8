//! Parse pest pairs into AST nodes

use crate::ast::*;
use crate::{DotParser, Rule};
use pest::Parser;
use pest::iterators::Pair;

/// Parse DOT source into the ordered list of graphs it declares.
pub fn parse(source: &str) -> Result<Vec<Graph>, miette::Report> {
    let pairs = DotParser::parse(Rule::dot_file, source)
        .map_err(|e| miette::miette!("Parse error: {}", e))?;

    let mut graphs = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::dot_file {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::graph {
                    graphs.push(parse_graph(inner)?);
                }
            }
        }
    }
    Ok(graphs)
}

fn parse_graph(pair: Pair<Rule>) -> Result<Graph, miette::Report> {
    let mut strict = false;
    let mut kind = GraphKind::Graph;
    let mut id = None;
    let mut children = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::strict => strict = true,
            Rule::graph_kind => {
                if inner.as_str().eq_ignore_ascii_case("digraph") {
                    kind = GraphKind::Digraph;
                }
            }
            Rule::id => id = Some(id_text(inner)),
            Rule::body => children = parse_body(inner)?,
            _ => {}
        }
    }

    Ok(Graph {
        strict,
        kind,
        id,
        children,
    })
}

fn parse_body(pair: Pair<Rule>) -> Result<Vec<Statement>, miette::Report> {
    let mut statements = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::stmt_list {
            for stmt in inner.into_inner() {
                if stmt.as_rule() == Rule::stmt {
                    statements.push(parse_statement(stmt)?);
                }
            }
        }
    }
    Ok(statements)
}

fn parse_statement(pair: Pair<Rule>) -> Result<Statement, miette::Report> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| miette::miette!("empty statement"))?;
    match inner.as_rule() {
        Rule::attr_stmt => Ok(Statement::Attr(parse_attr_stmt(inner)?)),
        Rule::subgraph => Ok(Statement::Subgraph(parse_subgraph(inner)?)),
        Rule::assignment => Ok(Statement::Attr(parse_assignment(inner))),
        Rule::edge_stmt => Ok(Statement::Edge(parse_edge_stmt(inner))),
        Rule::node_stmt => Ok(Statement::Node(parse_node_stmt(inner))),
        r => Err(miette::miette!("Unexpected rule in statement: {:?}", r)),
    }
}

fn parse_subgraph(pair: Pair<Rule>) -> Result<Subgraph, miette::Report> {
    let mut id = None;
    let mut children = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::id => id = Some(id_text(inner)),
            Rule::body => children = parse_body(inner)?,
            _ => {}
        }
    }
    Ok(Subgraph { id, children })
}

fn parse_attr_stmt(pair: Pair<Rule>) -> Result<AttrStmt, miette::Report> {
    let mut target = AttrTarget::Graph;
    let mut attrs = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::attr_target => {
                target = match inner.as_str().to_ascii_lowercase().as_str() {
                    "node" => AttrTarget::Node,
                    "edge" => AttrTarget::Edge,
                    _ => AttrTarget::Graph,
                };
            }
            Rule::attr_list => attrs = parse_attr_list(inner),
            _ => {}
        }
    }
    Ok(AttrStmt { target, attrs })
}

/// A bare `a=b` statement updates the enclosing graph's defaults, the same
/// lowering the reference parser performs.
fn parse_assignment(pair: Pair<Rule>) -> AttrStmt {
    let mut ids = pair.into_inner().filter(|p| p.as_rule() == Rule::id);
    let name = ids.next().map(id_text).unwrap_or_default();
    let value = ids.next().map(id_text).unwrap_or_default();
    AttrStmt {
        target: AttrTarget::Graph,
        attrs: vec![Attr { name, value }],
    }
}

fn parse_edge_stmt(pair: Pair<Rule>) -> EdgeStmt {
    let mut endpoints = Vec::new();
    let mut attrs = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::node_id => endpoints.push(node_id_text(inner)),
            Rule::attr_list => attrs = parse_attr_list(inner),
            _ => {}
        }
    }
    EdgeStmt { endpoints, attrs }
}

fn parse_node_stmt(pair: Pair<Rule>) -> NodeStmt {
    let mut id = String::new();
    let mut attrs = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::node_id => id = node_id_text(inner),
            Rule::attr_list => attrs = parse_attr_list(inner),
            _ => {}
        }
    }
    NodeStmt { id, attrs }
}

fn parse_attr_list(pair: Pair<Rule>) -> Vec<Attr> {
    let mut attrs = Vec::new();
    for a_list in pair.into_inner() {
        if a_list.as_rule() == Rule::a_list {
            for attr in a_list.into_inner() {
                if attr.as_rule() == Rule::attr {
                    let mut ids = attr.into_inner().filter(|p| p.as_rule() == Rule::id);
                    let name = ids.next().map(id_text).unwrap_or_default();
                    let value = ids.next().map(id_text).unwrap_or_default();
                    attrs.push(Attr { name, value });
                }
            }
        }
    }
    attrs
}

/// The node id with its port (if any) discarded - ports address record cells
/// and compass points, which the renderer resolves through `pos` instead.
fn node_id_text(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::id)
        .map(id_text)
        .unwrap_or_default()
}

fn id_text(pair: Pair<Rule>) -> String {
    let inner = match pair.into_inner().next() {
        Some(inner) => inner,
        None => return String::new(),
    };
    match inner.as_rule() {
        Rule::quoted => {
            let raw = inner
                .into_inner()
                .next()
                .map(|p| p.as_str().to_string())
                .unwrap_or_default();
            unescape_quoted(&raw)
        }
        Rule::html => {
            let s = inner.as_str();
            s[1..s.len() - 1].to_string()
        }
        _ => inner.as_str().to_string(),
    }
}

/// In DOT quoted strings the only escape is `\"`; every other backslash is
/// literal (which is what keeps the `\N` label sentinel intact).
fn unescape_quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && chars.peek() == Some(&'"') {
            out.push('"');
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
