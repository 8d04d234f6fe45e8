//! Graphviz attribute scopes.
//!
//! One scope holds the explicitly-set attributes at a nesting level; unset
//! attributes resolve through the nearest enclosing scope (scopes are cloned
//! on subgraph entry) down to the const default table. Only the attributes
//! the renderers consult get typed fields; everything else lands verbatim in
//! `extra`, where it is ignored - unknown names are forward-compatibility,
//! not errors.

use std::collections::HashMap;

use crate::ast::Attr;

use super::defaults;
use super::geometry::parse_float_prefix;

#[derive(Debug, Clone, Default)]
pub struct AttributeScope {
    pub pos: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fontsize: Option<String>,
    pub shape: Option<String>,
    pub color: Option<String>,
    pub label: Option<String>,
    pub fillcolor: Option<String>,
    pub style: Option<String>,
    pub fontcolor: Option<String>,
    pub fontname: Option<String>,
    pub penwidth: Option<String>,
    pub class: Option<String>,
    pub id: Option<String>,
    pub bb: Option<String>,
    pub lp: Option<String>,
    pub lheight: Option<String>,
    pub rects: Option<String>,
    pub dpi: Option<String>,
    pub extra: HashMap<String, String>,
}

impl AttributeScope {
    /// Merge an attribute list into this scope, later entries winning.
    /// `width` and `height` are parsed to floats eagerly; everything else is
    /// stored verbatim.
    pub fn override_with(&mut self, attrs: &[Attr]) {
        for attr in attrs {
            let value = &attr.value;
            match attr.name.as_str() {
                "width" => self.width = Some(parse_float_prefix(value)),
                "height" => self.height = Some(parse_float_prefix(value)),
                "pos" => self.pos = Some(value.clone()),
                "fontsize" => self.fontsize = Some(value.clone()),
                "shape" => self.shape = Some(value.clone()),
                "color" => self.color = Some(value.clone()),
                "label" => self.label = Some(value.clone()),
                "fillcolor" => self.fillcolor = Some(value.clone()),
                "style" => self.style = Some(value.clone()),
                "fontcolor" => self.fontcolor = Some(value.clone()),
                "fontname" => self.fontname = Some(value.clone()),
                "penwidth" => self.penwidth = Some(value.clone()),
                "class" => self.class = Some(value.clone()),
                "id" => self.id = Some(value.clone()),
                "bb" => self.bb = Some(value.clone()),
                "lp" => self.lp = Some(value.clone()),
                "lheight" => self.lheight = Some(value.clone()),
                "rects" => self.rects = Some(value.clone()),
                "dpi" => self.dpi = Some(value.clone()),
                _ => {
                    self.extra.insert(attr.name.clone(), value.clone());
                }
            }
        }
    }

    pub fn resolve_pos(&self) -> &str {
        self.pos.as_deref().unwrap_or(defaults::POS)
    }

    pub fn resolve_width(&self) -> f64 {
        self.width.unwrap_or(defaults::WIDTH)
    }

    pub fn resolve_height(&self) -> f64 {
        self.height.unwrap_or(defaults::HEIGHT)
    }

    pub fn resolve_shape(&self) -> &str {
        self.shape.as_deref().unwrap_or(defaults::SHAPE)
    }

    pub fn resolve_style(&self) -> &str {
        self.style.as_deref().unwrap_or(defaults::STYLE)
    }

    pub fn resolve_color(&self) -> &str {
        self.color.as_deref().unwrap_or(defaults::COLOR)
    }

    pub fn resolve_fontname(&self) -> &str {
        self.fontname.as_deref().unwrap_or(defaults::FONT_NAME)
    }

    pub fn resolve_fontcolor(&self) -> &str {
        self.fontcolor.as_deref().unwrap_or(defaults::FONT_COLOR)
    }

    pub fn resolve_fontsize(&self) -> f64 {
        self.fontsize
            .as_deref()
            .map(parse_float_prefix)
            .unwrap_or(defaults::FONT_SIZE)
    }

    pub fn resolve_penwidth(&self) -> f64 {
        self.penwidth
            .as_deref()
            .map(parse_float_prefix)
            .unwrap_or(defaults::PEN_WIDTH)
    }

    pub fn resolve_dpi(&self) -> f64 {
        self.dpi
            .as_deref()
            .map(parse_float_prefix)
            .unwrap_or(defaults::DPI)
    }

    /// The fill color for `style=filled`: `fillcolor`, else `color`, else
    /// the default fill.
    pub fn fill_color(&self) -> &str {
        self.fillcolor
            .as_deref()
            .or(self.color.as_deref())
            .unwrap_or(defaults::FILL_COLOR)
    }

    /// Display text for an element: the `label` attribute unless it is
    /// absent or the `\N` sentinel, in which case the element's own id.
    pub fn label_for<'a>(&'a self, own_id: &'a str) -> &'a str {
        match self.label.as_deref() {
            None => own_id,
            Some(defaults::LABEL_SENTINEL) => own_id,
            Some(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Attr;

    fn attr(name: &str, value: &str) -> Attr {
        Attr {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn width_and_height_parse_as_floats() {
        let mut scope = AttributeScope::default();
        scope.override_with(&[attr("width", "0.75"), attr("height", "0.5")]);
        assert_eq!(scope.width, Some(0.75));
        assert_eq!(scope.height, Some(0.5));
    }

    #[test]
    fn later_overrides_win() {
        let mut scope = AttributeScope::default();
        scope.override_with(&[attr("color", "red")]);
        scope.override_with(&[attr("color", "blue")]);
        assert_eq!(scope.resolve_color(), "blue");
    }

    #[test]
    fn unset_attributes_resolve_to_defaults() {
        let scope = AttributeScope::default();
        assert_eq!(scope.resolve_shape(), "ellipse");
        assert_eq!(scope.resolve_color(), "black");
        assert_eq!(scope.resolve_fontsize(), 14.0);
        assert_eq!(scope.resolve_pos(), "0,0");
        assert!(scope.label.is_none());
        assert!(scope.class.is_none());
    }

    #[test]
    fn clone_is_an_independent_copy() {
        let mut parent = AttributeScope::default();
        parent.override_with(&[attr("color", "red")]);
        let mut child = parent.clone();
        child.override_with(&[attr("color", "blue")]);
        assert_eq!(parent.resolve_color(), "red");
        assert_eq!(child.resolve_color(), "blue");
    }

    #[test]
    fn unknown_attributes_land_in_extra() {
        let mut scope = AttributeScope::default();
        scope.override_with(&[attr("tooltip", "hi"), attr("xlabel", "x")]);
        assert_eq!(scope.extra.get("tooltip").map(String::as_str), Some("hi"));
        assert_eq!(scope.extra.len(), 2);
    }

    #[test]
    fn fill_chain_prefers_fillcolor_then_color() {
        let mut scope = AttributeScope::default();
        assert_eq!(scope.fill_color(), "lightgrey");
        scope.override_with(&[attr("color", "red")]);
        assert_eq!(scope.fill_color(), "red");
        scope.override_with(&[attr("fillcolor", "green")]);
        assert_eq!(scope.fill_color(), "green");
    }

    #[test]
    fn label_sentinel_substitutes_own_id() {
        let mut scope = AttributeScope::default();
        assert_eq!(scope.label_for("n0"), "n0");
        scope.override_with(&[attr("label", "\\N")]);
        assert_eq!(scope.label_for("n0"), "n0");
        scope.override_with(&[attr("label", "hello")]);
        assert_eq!(scope.label_for("n0"), "hello");
    }
}
