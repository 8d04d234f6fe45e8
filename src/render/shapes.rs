//! Shape drawing for nodes, edges and (sub)graph decoration.
//!
//! Node shapes are plain structs carrying resolved geometry behind a
//! [`DrawShape`] trait dispatched over [`NodeShape`]; everything here is
//! stateless - pure functions from resolved attributes to drawing-surface
//! calls. Coordinates arriving from the attribute scopes are already
//! Y-inverted by the geometry codec.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::ast::{EdgeStmt, NodeStmt};
use crate::errors::RenderError;

use super::attributes::AttributeScope;
use super::context::RenderContext;
use super::defaults;
use super::geometry::{self, Point};
use super::svg::{Document, Font, Handle, NodeId, Stroke, fmt_num};

/// Common behavior for all node shapes: draw the primary shape (plus any
/// decorative strokes) into `parent` and return the primary element for
/// later fill/stroke styling by the caller.
#[enum_dispatch]
pub trait DrawShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId;
}

#[enum_dispatch(DrawShape)]
pub enum NodeShape {
    Ellipse(EllipseShape),
    Circle(CircleShape),
    Box(BoxShape),
    Diamond(DiamondShape),
    Mdiamond(MdiamondShape),
    Msquare(MsquareShape),
}

impl NodeShape {
    /// Resolve the `shape` attribute into drawable geometry. Sizes are in
    /// inches and scale by `dpi`; `record` is handled separately by
    /// [`render_node`]. Anything outside the known set aborts the render.
    fn from_scope(
        attrs: &AttributeScope,
        center: DVec2,
        node_id: &str,
    ) -> Result<NodeShape, RenderError> {
        let dpi = attrs.resolve_dpi();
        let width = attrs.resolve_width() * dpi;
        let height = attrs.resolve_height() * dpi;
        let stroke_color = attrs.color.clone();

        let shape = match attrs.resolve_shape() {
            "ellipse" | "oval" => EllipseShape {
                center,
                rx: width / 2.0,
                ry: height / 2.0,
            }
            .into(),
            "circle" => CircleShape {
                center,
                r: height / 2.0,
            }
            .into(),
            "box" | "rect" | "rectangle" => BoxShape {
                center,
                width,
                height,
            }
            .into(),
            "diamond" => DiamondShape {
                center,
                width,
                height,
            }
            .into(),
            "Mdiamond" => MdiamondShape {
                center,
                width,
                height,
                stroke_color,
            }
            .into(),
            "Msquare" => MsquareShape {
                center,
                width,
                height,
                stroke_color,
            }
            .into(),
            other => {
                return Err(RenderError::UnsupportedShape {
                    shape: other.to_string(),
                    node: node_id.to_string(),
                });
            }
        };
        Ok(shape)
    }
}

pub struct EllipseShape {
    pub center: DVec2,
    pub rx: f64,
    pub ry: f64,
}

impl DrawShape for EllipseShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        doc.ellipse(parent)
            .move_to(self.center.x, self.center.y)
            .radii(self.rx, self.ry)
            .node()
    }
}

pub struct CircleShape {
    pub center: DVec2,
    pub r: f64,
}

impl DrawShape for CircleShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        doc.circle(parent)
            .move_to(self.center.x, self.center.y)
            .radius(self.r)
            .node()
    }
}

pub struct BoxShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
}

impl DrawShape for BoxShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        doc.rect(parent, self.width, self.height)
            .move_to(self.center.x - self.width / 2.0, self.center.y - self.height / 2.0)
            .node()
    }
}

pub struct DiamondShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
}

impl DrawShape for DiamondShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        let points = diamond_points(self.center, self.width, self.height)
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .join(" ");
        doc.polygon(parent, &points).node()
    }
}

/// Diamond with its four corners clipped by short strokes. The 5px corner
/// offset scales by the width/height ratio so the clips sit parallel to the
/// adjacent diamond edges.
pub struct MdiamondShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
    pub stroke_color: Option<String>,
}

impl DrawShape for MdiamondShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        let [a, b, c, d] = diamond_points(self.center, self.width, self.height);
        let points = [a, b, c, d]
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .join(" ");
        let shape = doc.polygon(parent, &points).node();

        let offset = defaults::MDIAMOND_CLIP;
        let offsetv = offset * self.width / self.height;
        let deltah = self.width / 2.0 * (offset * 2.0 / self.height);
        let deltav = self.height / 2.0 * (offsetv * 2.0 / self.width);
        let stroke = Stroke {
            width: 1.0,
            color: self.stroke_color.as_deref(),
            ..Stroke::default()
        };
        doc.line(parent, a.x + deltah, a.y + offset, a.x + deltah, a.y - offset)
            .stroke(&stroke);
        doc.line(parent, b.x - offsetv, b.y - deltav, b.x + offsetv, b.y - deltav)
            .stroke(&stroke);
        doc.line(parent, c.x - deltah, c.y + offset, c.x - deltah, c.y - offset)
            .stroke(&stroke);
        doc.line(parent, d.x - offsetv, d.y + deltav, d.x + offsetv, d.y + deltav)
            .stroke(&stroke);

        shape
    }
}

/// Rectangle with a short 45-degree stroke across each corner.
pub struct MsquareShape {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
    pub stroke_color: Option<String>,
}

impl DrawShape for MsquareShape {
    fn draw(&self, doc: &mut Document, parent: NodeId) -> NodeId {
        let (w2, h2) = (self.width / 2.0, self.height / 2.0);
        let a = dvec2(self.center.x - w2, self.center.y - h2);
        let b = dvec2(self.center.x + w2, self.center.y - h2);
        let c = dvec2(self.center.x + w2, self.center.y + h2);
        let d = dvec2(self.center.x - w2, self.center.y + h2);

        let shape = doc
            .rect(parent, self.width, self.height)
            .move_to(a.x, a.y)
            .node();

        let delta = defaults::MSQUARE_CLIP / 2.0;
        let stroke = Stroke {
            width: 1.0,
            color: self.stroke_color.as_deref(),
            ..Stroke::default()
        };
        doc.line(parent, a.x + delta, a.y, a.x, a.y + delta).stroke(&stroke);
        doc.line(parent, b.x - delta, b.y, b.x, b.y + delta).stroke(&stroke);
        doc.line(parent, c.x, c.y - delta, c.x - delta, c.y).stroke(&stroke);
        doc.line(parent, d.x, d.y - delta, d.x + delta, d.y).stroke(&stroke);

        shape
    }
}

/// The four diamond vertices, west/south/east/north of the center.
fn diamond_points(center: DVec2, width: f64, height: f64) -> [DVec2; 4] {
    [
        dvec2(center.x - width / 2.0, center.y),
        dvec2(center.x, center.y + height / 2.0),
        dvec2(center.x + width / 2.0, center.y),
        dvec2(center.x, center.y - height / 2.0),
    ]
}

/// Draw one node statement: a group holding the shape, its decorations and
/// its label.
pub fn render_node(
    doc: &mut Document,
    ctx: &RenderContext,
    stmt: &NodeStmt,
) -> Result<(), RenderError> {
    let mut attrs = ctx.node_defaults.clone();
    attrs.override_with(&stmt.attrs);

    let pos = geometry::parse_point(attrs.resolve_pos());
    let center = dvec2(pos.x, pos.y);
    let graph_class = ctx.graph_defaults.class.as_deref();

    let group_id = attrs
        .id
        .clone()
        .unwrap_or_else(|| format!("{}{}", defaults::ID_PREFIX, stmt.id));
    let group = with_class(doc.group(ctx.container).add_class("dot-node"), graph_class)
        .set_id(&group_id)
        .node();

    if attrs.resolve_shape() == "record" {
        let cells = render_record(doc, group, &attrs, graph_class, &stmt.id)?;
        apply_node_style(doc.handle(cells), &attrs);
        return Ok(());
    }

    let shape = NodeShape::from_scope(&attrs, center, &stmt.id)?;
    let primary = shape.draw(doc, group);
    let handle = with_class(doc.handle(primary).add_class("dot-shape"), graph_class);
    apply_node_style(handle, &attrs);

    let label = attrs.label_for(&stmt.id).to_string();
    draw_label(doc, group, graph_class, &attrs, &label, center.x, center.y);
    Ok(())
}

/// The filled/solid fill rule plus the stroke. Stroke deliberately uses only
/// an explicitly-set `color`: an unset color emits no stroke color at all
/// rather than falling back to the default (observed upstream behavior,
/// preserved as-is).
fn apply_node_style(handle: Handle<'_>, attrs: &AttributeScope) {
    let handle = match attrs.resolve_style() {
        "filled" => handle.fill(attrs.fill_color()),
        "solid" => handle.fill("#ffffff"),
        _ => handle,
    };
    handle.stroke(&Stroke {
        width: 1.0,
        color: attrs.color.as_deref(),
        ..Stroke::default()
    });
}

/// Record shape: one rectangle plus one centered text per cell. The `rects`
/// attribute carries the cell boxes, the `label` the cell texts; the two
/// zip positionally and truncate to the shorter list. Returns the group so
/// the caller can style all cells at once - records have no primary shape.
fn render_record(
    doc: &mut Document,
    group: NodeId,
    attrs: &AttributeScope,
    graph_class: Option<&str>,
    node_id: &str,
) -> Result<NodeId, RenderError> {
    let rects = attrs
        .rects
        .as_deref()
        .ok_or_else(|| RenderError::MissingAttribute {
            name: "rects",
            element: format!("record node {node_id}"),
        })?;

    let cells: Vec<geometry::Rect> = rects.split(' ').map(geometry::parse_rect).collect();
    let labels = parse_record_label(attrs.label.as_deref().unwrap_or(""));

    for (cell, text) in cells.iter().zip(labels.iter()) {
        with_class(doc.rect(group, cell.width(), cell.height()), graph_class)
            .move_to(cell.x0, -cell.y1);
        let cx = (cell.x0 + cell.x1) / 2.0;
        let cy = -(cell.y0 + cell.y1) / 2.0;
        draw_label(doc, group, graph_class, attrs, text, cx, cy);
    }
    Ok(group)
}

/// Split a record label into per-cell display texts: `|`-separated fields,
/// one surrounding brace pair stripped, the last space-delimited token kept.
pub fn parse_record_label(label: &str) -> Vec<String> {
    label
        .split('|')
        .map(|field| {
            let mut field = field.trim();
            if let Some(stripped) = field.strip_prefix('{') {
                field = stripped;
            }
            if let Some(stripped) = field.strip_suffix('}') {
                field = stripped;
            }
            field
                .trim()
                .split(' ')
                .next_back()
                .unwrap_or("")
                .to_string()
        })
        .collect()
}

/// Draw one edge statement: the spline path, an arrowhead when the spline
/// carries an end marker, and the label if any.
pub fn render_edge(
    doc: &mut Document,
    ctx: &RenderContext,
    stmt: &EdgeStmt,
) -> Result<(), RenderError> {
    let mut attrs = ctx.edge_defaults.clone();
    attrs.override_with(&stmt.attrs);

    let pos = attrs.pos.as_deref().ok_or_else(|| RenderError::MissingAttribute {
        name: "pos",
        element: format!("edge {}", stmt.endpoints.join("-")),
    })?;
    let points = geometry::parse_point_list(pos);
    let spline = geometry::build_spline(&points);

    let graph_class = ctx.graph_defaults.class.as_deref();
    let group_id = attrs
        .id
        .clone()
        .unwrap_or_else(|| format!("{}{}", defaults::ID_PREFIX, stmt.endpoints.join("-")));
    let group = with_class(doc.group(ctx.container), graph_class)
        .set_id(&group_id)
        .node();

    let stroke_color = attrs.resolve_color().to_string();
    with_class(doc.path(group, &spline.path), graph_class)
        .fill("none")
        .stroke(&Stroke {
            width: attrs.resolve_penwidth(),
            color: Some(&stroke_color),
            linecap: Some("round"),
            linejoin: Some("round"),
        });

    if let (Some(start), Some(end)) = (spline.marker_start, spline.marker_end) {
        draw_arrowhead(doc, group, start, end, &stroke_color);
    }

    if let Some(label) = attrs.label.clone() {
        let (x, y) = match attrs.lp.as_deref() {
            Some(lp) => {
                let p = geometry::parse_point(lp);
                (p.x, p.y)
            }
            None => spline_midpoint(&points),
        };
        draw_label(doc, group, graph_class, &attrs, &label, x, y);
    }
    Ok(())
}

/// Filled triangular arrowhead: base corners straddle the last path point,
/// apex on the marker target.
fn draw_arrowhead(doc: &mut Document, parent: NodeId, start: Point, end: Point, color: &str) {
    let start = dvec2(start.x, start.y);
    let end = dvec2(end.x, end.y);
    let delta = end - start;
    let len = delta.length();
    if len < 0.001 {
        return;
    }
    let unit = delta / len;
    let perp = dvec2(-unit.y, unit.x);
    let p1 = start + perp * defaults::ARROW_HALF_WIDTH;
    let p2 = start - perp * defaults::ARROW_HALF_WIDTH;

    let points = format!(
        "{},{} {},{} {},{}",
        fmt_num(p1.x),
        fmt_num(p1.y),
        fmt_num(p2.x),
        fmt_num(p2.y),
        fmt_num(end.x),
        fmt_num(end.y),
    );
    doc.polygon(parent, &points).fill(color);
}

/// Midpoint of the control points' bounding box - the label fallback when
/// the layout did not provide `lp`.
fn spline_midpoint(points: &[Point]) -> (f64, f64) {
    let mut min = dvec2(f64::INFINITY, f64::INFINITY);
    let mut max = dvec2(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min = min.min(dvec2(p.x, p.y));
        max = max.max(dvec2(p.x, p.y));
    }
    if points.is_empty() {
        return (0.0, 0.0);
    }
    ((min.x + max.x) / 2.0, (min.y + max.y) / 2.0)
}

/// Cluster background and (sub)graph label for the current scope.
pub fn decorate(doc: &mut Document, ctx: &RenderContext, graph_id: Option<&str>) {
    let attrs = &ctx.graph_defaults;
    let graph_class = attrs.class.clone();
    let bb = attrs.bb.as_deref().map(geometry::parse_rect);

    let is_cluster = graph_id.is_some_and(|id| id.starts_with(defaults::CLUSTER_PREFIX));
    if is_cluster {
        if let Some(bb) = bb {
            crate::log::debug!(id = graph_id.unwrap_or(""), "cluster background");
            // Clusters always paint a background: anything not filled gets
            // "white" rather than the unset fill nodes would leave.
            let fill = match attrs.resolve_style() {
                "filled" => attrs.fill_color().to_string(),
                _ => "white".to_string(),
            };
            with_class(
                doc.rect(ctx.container, bb.width(), bb.height()),
                graph_class.as_deref(),
            )
            .move_to(bb.x0, -bb.y1)
            .fill(&fill)
            .stroke(&Stroke {
                width: 1.0,
                color: attrs.color.as_deref(),
                ..Stroke::default()
            });
        }
    }

    if let Some(label) = attrs.label.clone() {
        let anchor = match (attrs.lp.as_deref(), bb) {
            (Some(lp), _) => {
                let p = geometry::parse_point(lp);
                Some((p.x, p.y))
            }
            (None, Some(bb)) => Some((bb.x0, -bb.y1)),
            (None, None) => None,
        };
        if let Some((x, y)) = anchor {
            let font_size = attrs
                .lheight
                .as_deref()
                .map(|lh| geometry::parse_float_prefix(lh) * attrs.resolve_dpi())
                .unwrap_or(defaults::FONT_SIZE);
            with_class(doc.text(ctx.container, &label), graph_class.as_deref())
                .move_to(x, y)
                .font(&Font {
                    anchor: "middle",
                    size: font_size,
                    family: attrs.resolve_fontname(),
                    fill: attrs.resolve_fontcolor(),
                });
        }
    }
}

/// Centered label text, baseline one font-size above the anchor - the
/// approximation of vertical centering the element labels use.
fn draw_label(
    doc: &mut Document,
    parent: NodeId,
    graph_class: Option<&str>,
    attrs: &AttributeScope,
    text: &str,
    x: f64,
    y: f64,
) {
    let font_size = attrs.resolve_fontsize();
    with_class(doc.text(parent, text), graph_class)
        .move_to(x, y - font_size)
        .font(&Font {
            anchor: "middle",
            size: font_size,
            family: attrs.resolve_fontname(),
            fill: attrs.resolve_fontcolor(),
        });
}

fn with_class<'d>(handle: Handle<'d>, class: Option<&str>) -> Handle<'d> {
    match class {
        Some(class) => handle.add_class(class),
        None => handle,
    }
}
