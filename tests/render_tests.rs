//! End-to-end rendering tests: DOT source in, assertions over the
//! serialized SVG out.

use regex_lite::Regex;

fn render(src: &str) -> String {
    dotru::render(src).unwrap_or_else(|e| panic!("render failed: {e:?}"))
}

/// The stroke color of the first shape inside the group with the given id.
fn stroke_of(svg: &str, group_id: &str) -> String {
    let pattern = format!(r#"(?s)id="{group_id}".*?stroke="([a-z]+)""#);
    let re = Regex::new(&pattern).unwrap();
    re.captures(svg)
        .unwrap_or_else(|| panic!("no stroked shape in group {group_id}"))[1]
        .to_string()
}

#[test]
fn end_to_end_scenario() {
    let svg = render(
        r#"digraph {
            graph [bb="0,0,54,54"];
            node0 [pos="27,27", width="0.75", height="0.5", label="X"];
        }"#,
    );

    // canvas = bounding box + 4px padding, origin flipped via the root group
    assert!(svg.contains(r#"width="58""#), "canvas width: {svg}");
    assert!(svg.contains(r#"height="58""#));
    assert!(svg.contains(r#"transform="translate(2,56)""#));

    // one node group with the derived id and the contract classes
    assert!(svg.contains(r#"id="dot-node0""#));
    assert!(svg.contains(r#"class="dot-node""#));
    assert!(svg.contains(r#"class="dot-shape""#));

    // default ellipse: radii (w*72/2, h*72/2) centered at the inverted pos
    assert!(svg.contains(r#"cx="27""#));
    assert!(svg.contains(r#"cy="-27""#));
    assert!(svg.contains(r#"rx="27""#));
    assert!(svg.contains(r#"ry="18""#));

    assert!(svg.contains(">X</text>"));
}

#[test]
fn attribute_precedence_across_scopes() {
    let svg = render(
        r#"digraph {
            node [color=red];
            subgraph { b [pos="10,10"]; }
            subgraph { node [color=blue]; c [pos="20,20"]; }
            a [pos="5,5"];
        }"#,
    );

    // b inherits the root's red; c sees its own scope's blue; a, declared
    // after both subgraphs, is unaffected by their overrides
    assert_eq!(stroke_of(&svg, "dot-b"), "red");
    assert_eq!(stroke_of(&svg, "dot-c"), "blue");
    assert_eq!(stroke_of(&svg, "dot-a"), "red");
}

#[test]
fn node_dedupe_first_declaration_wins() {
    let svg = render(
        r#"digraph {
            a [label="1", pos="5,5"];
            subgraph { a [label="2", pos="9,9"]; }
        }"#,
    );

    assert_eq!(svg.matches(r#"id="dot-a""#).count(), 1);
    assert!(svg.contains(">1</text>"));
    assert!(!svg.contains(">2</text>"));
}

#[test]
fn label_sentinel_substitution() {
    let svg = render(
        r#"digraph {
            n1 [pos="10,10"];
            n2 [pos="20,20", label="\N"];
            n3 [pos="30,30", label="hello"];
        }"#,
    );

    assert!(svg.contains(">n1</text>"));
    assert!(svg.contains(">n2</text>"));
    assert!(svg.contains(">hello</text>"));
    assert!(!svg.contains(">n3</text>"));
}

#[test]
fn label_is_baseline_shifted_by_font_size() {
    let svg = render(r#"digraph { n [pos="10,30"]; }"#);
    // anchor at pos.x, pos.y - fontsize with Y already inverted
    let re = Regex::new(r#"<text x="10" y="-44""#).unwrap();
    assert!(re.is_match(&svg), "label placement: {svg}");
}

#[test]
fn cluster_background_paints_before_later_nodes() {
    let svg = render(
        r#"digraph {
            graph [bb="0,0,200,200"];
            subgraph cluster0 {
                graph [bb="10,10,90,90"];
                inner [pos="50,50"];
            }
            n1 [pos="150,150"];
        }"#,
    );

    let cluster_rect = svg.find(r#"fill="white""#).expect("cluster background");
    let node_shape = svg.find(r#"id="dot-n1""#).expect("n1 group");
    assert!(cluster_rect < node_shape, "cluster must paint under n1");

    // background spans the cluster's bb in inverted coordinates
    assert!(svg.contains(r#"width="80""#));
    assert!(svg.contains(r#"y="-90""#));
}

#[test]
fn cluster_label_uses_lp_and_lheight() {
    let svg = render(
        r#"digraph {
            graph [bb="0,0,200,200"];
            subgraph cluster0 {
                graph [bb="10,10,90,90", label="Cluster", lp="50,95", lheight="0.21"];
                inner [pos="50,50"];
            }
        }"#,
    );

    assert!(svg.contains(">Cluster</text>"));
    assert!(svg.contains(r#"font-size="15.12""#));
}

#[test]
fn edge_spline_and_arrowhead() {
    let svg = render(
        r#"digraph {
            graph [bb="0,0,100,100"];
            a [pos="27,80"];
            b [pos="27,20"];
            a -> b [pos="e,27,38 27,62 27,55 27,48 27,44"];
        }"#,
    );

    assert!(svg.contains(r#"id="dot-a-b""#));
    assert!(svg.contains(r#"d="M27,-62 C 27,-55 27,-48 27,-44 ""#));
    assert!(svg.contains(r#"fill="none""#));
    assert!(svg.contains(r#"stroke-linecap="round""#));
    // arrowhead triangle: base straddles the last path point, apex on the
    // marker, filled with the edge color
    assert!(svg.contains(r#"points="24,-44 30,-44 27,-38""#));
    let arrow = Regex::new(r#"<polygon points="24,-44 30,-44 27,-38" fill="black""#).unwrap();
    assert!(arrow.is_match(&svg), "arrowhead: {svg}");
}

#[test]
fn edge_label_at_lp() {
    let svg = render(
        r#"digraph {
            a [pos="10,90"];
            b [pos="10,10"];
            a -> b [pos="10,72 10,55 10,45 10,28", label="w", lp="14,50"];
        }"#,
    );

    assert!(svg.contains(">w</text>"));
    assert!(svg.contains(r#"<text x="14" y="-64""#));
}

#[test]
fn chained_edge_id_joins_all_endpoints() {
    let svg = render(
        r#"digraph {
            a [pos="10,90"]; b [pos="10,50"]; c [pos="10,10"];
            a -> b -> c [pos="10,72 10,55 10,45 10,28"];
        }"#,
    );
    assert!(svg.contains(r#"id="dot-a-b-c""#));
}

#[test]
fn edge_without_pos_is_fatal() {
    let err = dotru::render(r#"digraph { a [pos="5,5"]; b [pos="9,9"]; a -> b; }"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("missing attribute"), "got: {err}");
    assert!(err.contains("pos"));
}

#[test]
fn unsupported_shape_aborts_the_render() {
    let err = dotru::render(r#"digraph { n [shape=hexagon, pos="5,5"]; }"#)
        .unwrap_err()
        .to_string();
    assert!(err.contains("unsupported shape"), "got: {err}");
    assert!(err.contains("hexagon"));
}

#[test]
fn record_renders_one_cell_per_rect() {
    let svg = render(
        r#"digraph {
            graph [bb="0,0,200,100"];
            r [shape=record, label="a|b", rects="0,0,50,36 50,0,100,36", pos="50,18"];
        }"#,
    );

    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(svg.contains(r#"width="50""#));
    assert!(svg.contains(r#"height="36""#));
    assert!(svg.contains(r#"y="-36""#));
    assert!(svg.contains(">a</text>"));
    assert!(svg.contains(">b</text>"));
}

#[test]
fn record_with_mismatched_counts_truncates() {
    // two rects, three label fields: the extra field is dropped
    let svg = render(
        r#"digraph {
            r [shape=record, label="a|b|c", rects="0,0,50,36 50,0,100,36", pos="50,18"];
        }"#,
    );
    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(!svg.contains(">c</text>"));
}

#[test]
fn mdiamond_draws_corner_clips() {
    let svg = render(r#"digraph { n [shape=Mdiamond, pos="50,50", color=black]; }"#);
    assert!(svg.contains("<polygon"));
    assert_eq!(svg.matches("<line").count(), 4);
}

#[test]
fn msquare_draws_corner_strokes() {
    let svg = render(r#"digraph { n [shape=Msquare, pos="50,50"]; }"#);
    assert!(svg.contains("<rect"));
    assert_eq!(svg.matches("<line").count(), 4);
}

#[test]
fn oval_is_an_ellipse_alias() {
    let svg = render(r#"digraph { n [shape=oval, pos="5,5"]; }"#);
    assert!(svg.contains("<ellipse"));
}

#[test]
fn filled_style_resolves_fill_chain() {
    let svg = render(r#"digraph { n [pos="5,5", style=filled, fillcolor=pink]; }"#);
    assert!(svg.contains(r#"fill="pink""#));

    // unset fillcolor falls back to color, then to the default fill
    let svg = render(r#"digraph { n [pos="5,5", style=filled, color=red]; }"#);
    assert!(svg.contains(r#"fill="red""#));
    let svg = render(r#"digraph { n [pos="5,5", style=filled]; }"#);
    assert!(svg.contains(r#"fill="lightgrey""#));
}

#[test]
fn solid_style_fills_white() {
    let svg = render(r#"digraph { n [pos="5,5"]; }"#);
    assert!(svg.contains(r##"fill="#ffffff""##));
}

#[test]
fn graph_class_reaches_groups_and_shapes() {
    let svg = render(r#"digraph { graph [class="flow"]; n [pos="5,5"]; }"#);
    assert!(svg.contains(r#"class="dot-node flow""#));
    assert!(svg.contains(r#"class="dot-shape flow""#));
}

#[test]
fn explicit_id_attribute_wins_over_derived_id() {
    let svg = render(r#"digraph { n [pos="5,5", id="mine"]; }"#);
    assert!(svg.contains(r#"id="mine""#));
    assert!(!svg.contains(r#"id="dot-n""#));
}

#[test]
fn only_first_graph_renders() {
    let svg = render(
        r#"digraph { a [pos="5,5"]; }
           digraph { z [pos="9,9"]; }"#,
    );
    assert!(svg.contains(r#"id="dot-a""#));
    assert!(!svg.contains(r#"id="dot-z""#));
}

#[test]
fn crlf_wrapped_lines_are_joined() {
    let src = "digraph { a [pos=\"5,5\", lab\\\r\nel=\"wrapped\"]; }";
    let svg = render(src);
    assert!(svg.contains(">wrapped</text>"));
}

#[test]
fn unknown_attributes_are_ignored() {
    let svg = render(r#"digraph { n [pos="5,5", tooltip="hi", penwidth="2"]; }"#);
    assert!(svg.contains("<ellipse"));
    assert!(!svg.contains("tooltip"));
}
