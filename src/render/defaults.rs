//! The Graphviz default-attribute table and fixed rendering constants.
//!
//! Attribute defaults are taken from https://www.graphviz.org/doc/info/attrs.html
//! and never change at runtime - an unset attribute in every enclosing scope
//! falls back to these.

/// Pixels per inch; `width`/`height` and `lheight` are in inches.
pub const DPI: f64 = 72.0;
pub const POS: &str = "0,0";
pub const WIDTH: f64 = 0.75;
pub const HEIGHT: f64 = 0.5;
pub const FONT_SIZE: f64 = 14.0;
pub const SHAPE: &str = "ellipse";
pub const COLOR: &str = "black";
pub const FILL_COLOR: &str = "lightgrey";
pub const STYLE: &str = "solid";
pub const FONT_COLOR: &str = "black";
pub const FONT_NAME: &str = "Times-Roman";
pub const PEN_WIDTH: f64 = 1.0;

/// A label equal to this sentinel (or absent) displays the element's own id.
pub const LABEL_SENTINEL: &str = "\\N";

/// Subgraphs whose id starts with this prefix get a background box.
pub const CLUSTER_PREFIX: &str = "cluster";

/// Prefix for derived node/edge group ids when no `id` attribute is set.
pub const ID_PREFIX: &str = "dot-";

/// Extra canvas size around the root bounding box; half of it becomes the
/// root translation on each side.
pub const CANVAS_PAD: f64 = 4.0;

/// Half-width of the arrowhead triangle base, in pixels.
pub const ARROW_HALF_WIDTH: f64 = 3.0;

/// Corner-clipping stroke offset for the Mdiamond shape, in pixels.
pub const MDIAMOND_CLIP: f64 = 5.0;

/// Corner stroke offset for the Msquare shape, in pixels.
pub const MSQUARE_CLIP: f64 = 15.0;
