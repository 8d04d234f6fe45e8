//! Abstract Syntax Tree types for DOT
//!
//! These types represent the parsed statement tree of a DOT graph: nested
//! subgraphs, node and edge statements, and attribute statements. They are
//! dumb data - all interpretation happens in the render module.

/// Whether the graph was declared with `graph` or `digraph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Graph,
    Digraph,
}

/// A top-level graph. A DOT file may contain several.
#[derive(Debug, Clone)]
pub struct Graph {
    pub strict: bool,
    pub kind: GraphKind,
    pub id: Option<String>,
    pub children: Vec<Statement>,
}

/// A statement inside a graph or subgraph body.
#[derive(Debug, Clone)]
pub enum Statement {
    /// Nested subgraph: `subgraph cluster0 { ... }` or a bare `{ ... }` block
    Subgraph(Subgraph),
    /// Node declaration: `a [label="x"]`
    Node(NodeStmt),
    /// Edge declaration: `a -> b -> c [pos="..."]`
    Edge(EdgeStmt),
    /// Default-attribute statement: `node [shape=box]`, `graph [bb="..."]`
    Attr(AttrStmt),
}

#[derive(Debug, Clone)]
pub struct Subgraph {
    pub id: Option<String>,
    pub children: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub struct NodeStmt {
    pub id: String,
    pub attrs: Vec<Attr>,
}

/// Edge endpoints are kept in declaration order; a chained statement like
/// `a -> b -> c` yields three endpoints.
#[derive(Debug, Clone)]
pub struct EdgeStmt {
    pub endpoints: Vec<String>,
    pub attrs: Vec<Attr>,
}

#[derive(Debug, Clone)]
pub struct AttrStmt {
    pub target: AttrTarget,
    pub attrs: Vec<Attr>,
}

/// Which default scope an `attr_stmt` updates. Bare `a=b` assignments lower
/// to `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Graph,
    Node,
    Edge,
}

/// One `name=value` pair from an attribute list.
#[derive(Debug, Clone)]
pub struct Attr {
    pub name: String,
    pub value: String,
}
