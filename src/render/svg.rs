//! The vector drawing surface: a typed SVG element tree.
//!
//! The rendering walk is a pure producer against this module - it creates
//! elements through a [`Document`], styles them through chainable
//! [`Handle`]s, and never reads geometry back. Serialization writes plain
//! SVG markup with `%g`-style float formatting.

use std::fmt::Write as _;

/// Index of an element inside a [`Document`]. Cheap to copy and thread
/// through the recursive walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Svg,
    Group,
    Ellipse,
    Circle,
    Rect,
    Polygon,
    Line,
    Path,
    Text,
}

impl Tag {
    fn as_str(self) -> &'static str {
        match self {
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Ellipse => "ellipse",
            Tag::Circle => "circle",
            Tag::Rect => "rect",
            Tag::Polygon => "polygon",
            Tag::Line => "line",
            Tag::Path => "path",
            Tag::Text => "text",
        }
    }
}

#[derive(Debug, Clone)]
struct Element {
    tag: Tag,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    content: Option<String>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            classes: Vec::new(),
            content: None,
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any earlier value for the same name.
    fn set_attr(&mut self, name: &str, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }
}

/// An SVG document under construction, arena-allocated.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut root = Element::new(Tag::Svg);
        root.set_attr("xmlns", "http://www.w3.org/2000/svg".to_string());
        Self { nodes: vec![root] }
    }

    /// The `<svg>` element itself.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Resize the canvas.
    pub fn size(&mut self, width: f64, height: f64) {
        self.nodes[0].set_attr("width", fmt_num(width));
        self.nodes[0].set_attr("height", fmt_num(height));
    }

    fn push(&mut self, parent: NodeId, tag: Tag) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::new(tag));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn group(&mut self, parent: NodeId) -> Handle<'_> {
        let node = self.push(parent, Tag::Group);
        Handle { doc: self, node }
    }

    pub fn ellipse(&mut self, parent: NodeId) -> Handle<'_> {
        let node = self.push(parent, Tag::Ellipse);
        Handle { doc: self, node }
    }

    pub fn circle(&mut self, parent: NodeId) -> Handle<'_> {
        let node = self.push(parent, Tag::Circle);
        Handle { doc: self, node }
    }

    pub fn rect(&mut self, parent: NodeId, width: f64, height: f64) -> Handle<'_> {
        let node = self.push(parent, Tag::Rect);
        self.nodes[node.0].set_attr("width", fmt_num(width));
        self.nodes[node.0].set_attr("height", fmt_num(height));
        Handle { doc: self, node }
    }

    pub fn polygon(&mut self, parent: NodeId, points: &str) -> Handle<'_> {
        let node = self.push(parent, Tag::Polygon);
        self.nodes[node.0].set_attr("points", points.to_string());
        Handle { doc: self, node }
    }

    pub fn line(&mut self, parent: NodeId, x1: f64, y1: f64, x2: f64, y2: f64) -> Handle<'_> {
        let node = self.push(parent, Tag::Line);
        self.nodes[node.0].set_attr("x1", fmt_num(x1));
        self.nodes[node.0].set_attr("y1", fmt_num(y1));
        self.nodes[node.0].set_attr("x2", fmt_num(x2));
        self.nodes[node.0].set_attr("y2", fmt_num(y2));
        Handle { doc: self, node }
    }

    pub fn path(&mut self, parent: NodeId, d: &str) -> Handle<'_> {
        let node = self.push(parent, Tag::Path);
        self.nodes[node.0].set_attr("d", d.to_string());
        Handle { doc: self, node }
    }

    pub fn text(&mut self, parent: NodeId, content: &str) -> Handle<'_> {
        let node = self.push(parent, Tag::Text);
        self.nodes[node.0].content = Some(content.to_string());
        Handle { doc: self, node }
    }

    /// Re-open a handle on an existing element for further styling.
    pub fn handle(&mut self, node: NodeId) -> Handle<'_> {
        Handle { doc: self, node }
    }

    /// Serialize the document to SVG markup.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        self.write_element(&mut out, NodeId(0), 0);
        out
    }

    fn write_element(&self, out: &mut String, id: NodeId, depth: usize) {
        let el = &self.nodes[id.0];
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push('<');
        out.push_str(el.tag.as_str());
        for (name, value) in &el.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&el.classes.join(" ")));
        }
        if el.children.is_empty() && el.content.is_none() {
            out.push_str("/>\n");
            return;
        }
        out.push('>');
        if let Some(content) = &el.content {
            out.push_str(&escape_text(content));
        }
        if !el.children.is_empty() {
            out.push('\n');
            for child in &el.children {
                self.write_element(out, *child, depth + 1);
            }
            for _ in 0..depth {
                out.push_str("  ");
            }
        }
        let _ = write!(out, "</{}>\n", el.tag.as_str());
    }
}

/// Stroke styling for shapes and paths. A `None` color emits the width (and
/// cap/join) without a `stroke` attribute.
#[derive(Debug, Clone, Default)]
pub struct Stroke<'a> {
    pub width: f64,
    pub color: Option<&'a str>,
    pub linecap: Option<&'a str>,
    pub linejoin: Option<&'a str>,
}

/// Font styling for text elements.
#[derive(Debug, Clone)]
pub struct Font<'a> {
    pub anchor: &'a str,
    pub size: f64,
    pub family: &'a str,
    pub fill: &'a str,
}

/// A chainable styling handle over one element, in the drawing-surface
/// idiom: `doc.ellipse(g).move_to(x, y).radii(rx, ry).fill("white")`.
pub struct Handle<'d> {
    doc: &'d mut Document,
    node: NodeId,
}

impl<'d> Handle<'d> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn el(&mut self) -> &mut Element {
        &mut self.doc.nodes[self.node.0]
    }

    /// Position the element: center for ellipses and circles, top-left
    /// corner (or text insertion point) for everything else.
    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let (xa, ya) = match self.el().tag {
            Tag::Ellipse | Tag::Circle => ("cx", "cy"),
            _ => ("x", "y"),
        };
        self.el().set_attr(xa, fmt_num(x));
        self.el().set_attr(ya, fmt_num(y));
        self
    }

    pub fn radius(mut self, r: f64) -> Self {
        self.el().set_attr("r", fmt_num(r));
        self
    }

    pub fn radii(mut self, rx: f64, ry: f64) -> Self {
        self.el().set_attr("rx", fmt_num(rx));
        self.el().set_attr("ry", fmt_num(ry));
        self
    }

    pub fn fill(mut self, color: &str) -> Self {
        self.el().set_attr("fill", color.to_string());
        self
    }

    pub fn stroke(mut self, stroke: &Stroke<'_>) -> Self {
        let width = fmt_num(stroke.width);
        self.el().set_attr("stroke-width", width);
        if let Some(color) = stroke.color {
            self.el().set_attr("stroke", color.to_string());
        }
        if let Some(cap) = stroke.linecap {
            self.el().set_attr("stroke-linecap", cap.to_string());
        }
        if let Some(join) = stroke.linejoin {
            self.el().set_attr("stroke-linejoin", join.to_string());
        }
        self
    }

    pub fn font(mut self, font: &Font<'_>) -> Self {
        self.el().set_attr("text-anchor", font.anchor.to_string());
        let size = fmt_num(font.size);
        self.el().set_attr("font-size", size);
        self.el().set_attr("font-family", font.family.to_string());
        self.el().set_attr("fill", font.fill.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.el().set_attr(name, value.to_string());
        self
    }

    pub fn add_class(mut self, name: &str) -> Self {
        let el = self.el();
        if !el.classes.iter().any(|c| c == name) {
            el.classes.push(name.to_string());
        }
        self
    }

    pub fn set_id(mut self, id: &str) -> Self {
        self.el().set_attr("id", id.to_string());
        self
    }

    pub fn translate(mut self, x: f64, y: f64) -> Self {
        let transform = format!("translate({},{})", fmt_num(x), fmt_num(y));
        self.el().set_attr("transform", transform);
        self
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a number matching C's %g format (6 significant figures, trailing
/// zeros trimmed).
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sig_figs = 6;
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_nests_groups_in_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let outer = doc.group(root).add_class("outer").node();
        doc.rect(outer, 10.0, 20.0).move_to(1.0, 2.0).fill("red");
        doc.group(root).add_class("later");

        let svg = doc.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\">"));
        let outer_at = svg.find("class=\"outer\"").unwrap();
        let rect_at = svg.find("<rect").unwrap();
        let later_at = svg.find("class=\"later\"").unwrap();
        assert!(outer_at < rect_at && rect_at < later_at);
        assert!(svg.contains("width=\"10\""));
        assert!(svg.contains("x=\"1\""));
    }

    #[test]
    fn stroke_without_color_omits_stroke_attr() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.circle(root).move_to(5.0, 5.0).radius(2.0).stroke(&Stroke {
            width: 1.0,
            color: None,
            ..Stroke::default()
        });
        let svg = doc.to_svg();
        assert!(svg.contains("stroke-width=\"1\""));
        assert!(!svg.contains(" stroke=\""));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.text(root, "a < b & c").move_to(0.0, 0.0);
        assert!(doc.to_svg().contains(">a &lt; b &amp; c</text>"));
    }

    #[test]
    fn fmt_num_trims_like_percent_g() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(58.0), "58");
        assert_eq!(fmt_num(-27.0), "-27");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
    }
}
