//! This crate's own annotation XML format (spec.md §6 "Persisted
//! annotation state (XML)"): an ordered list of `stroke`/`text` elements
//! per page, written in z-order.
//!
//! Grounded in `examples/other_examples/manifests/flxzt-rnote` (an
//! annotation engine that persists its own stroke format with
//! `xmlwriter`/`roxmltree` and reads the Xournal color convention the same
//! way `crate::draw::Color::from_xournal_argb` does here). Every shape
//! variant this crate carries gets a `tool` tag on `<stroke>` (or is
//! written as `<text>` for the two text-bearing variants); an explicit `z`
//! attribute restores exact z-order on load rather than relying on
//! document order plus an external counter, per spec.md §8 law #6 ("z-order
//! must be preserved").

use roxmltree::Document;
use xmlwriter::{Options, XmlWriter};

use crate::draw::font::{FontStyle, FontWeight};
use crate::draw::{
    ArrowLabel, Color, EraserBrush, EraserKind, FontDescriptor, PixmapFormat, Shape,
    StepMarkerLabel,
};
use crate::error::{EngineError, Result};

use super::{hex_decode, hex_encode};

/// One page's worth of shapes plus their z-values, in the order they
/// should be (re-)inserted into a `PathContainer` to reproduce paint
/// order exactly.
pub type PageShapes = Vec<(Shape, f64)>;

/// Writes every page to one `<document>` root, `<page number="N">`
/// children in ascending page-number order (the caller's `pages` order is
/// used as-is; sort first if that matters).
pub fn write_document(pages: &[(u32, PageShapes)]) -> String {
    let mut w = XmlWriter::new(Options::default());
    w.start_element("document");
    for (page_number, shapes) in pages {
        w.start_element("page");
        w.write_attribute("number", page_number);
        for (shape, z) in shapes {
            write_shape(&mut w, shape, *z);
        }
        w.end_element();
    }
    w.end_element();
    w.end_document()
}

/// Parses a document written by [`write_document`]. Unknown elements or
/// malformed shapes are skipped with a logged warning (spec.md §7
/// `PathConstructionError` policy: "log a warning and skip the path;
/// never crash") rather than failing the whole load.
pub fn read_document(xml: &str) -> Result<Vec<(u32, PageShapes)>> {
    let doc = Document::parse(xml).map_err(|e| EngineError::XmlParse(e.to_string()))?;
    let root = doc.root_element();
    let mut pages = Vec::new();
    for page_node in root.children().filter(|n| n.is_element() && n.tag_name().name() == "page") {
        let number: u32 = page_node
            .attribute("number")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let mut shapes = Vec::new();
        for node in page_node.children().filter(|n| n.is_element()) {
            match read_shape(node) {
                Ok(entry) => shapes.push(entry),
                Err(e) => log::warn!("skipping malformed annotation element on page {number}: {e}"),
            }
        }
        pages.push((number, shapes));
    }
    Ok(pages)
}

fn write_shape(w: &mut XmlWriter, shape: &Shape, z: f64) {
    match shape {
        Shape::Freehand { points, color, thick } => {
            stroke_start(w, "pen", *color, z);
            w.write_attribute("width", thick);
            write_point_list(w, points.iter().map(|&(x, y)| (x as f64, y as f64)));
            w.end_element();
        }
        Shape::FreehandPressure { points, color } => {
            stroke_start(w, "pen", *color, z);
            let widths: Vec<String> = points.iter().map(|&(_, _, p)| p.to_string()).collect();
            w.write_attribute("width", &widths.join(" "));
            write_point_list(w, points.iter().map(|&(x, y, _)| (x as f64, y as f64)));
            w.end_element();
        }
        Shape::MarkerStroke { points, color, thick } => {
            stroke_start(w, "highlighter", *color, z);
            w.write_attribute("width", thick);
            write_point_list(w, points.iter().map(|&(x, y)| (x as f64, y as f64)));
            w.end_element();
        }
        Shape::EraserStroke { points, brush } => {
            stroke_start(w, "eraser", Color::new(0.0, 0.0, 0.0, 0.0), z);
            w.write_attribute("width", &brush.size);
            w.write_attribute(
                "brush",
                match brush.kind {
                    EraserKind::Circle => "circle",
                    EraserKind::Rect => "rect",
                },
            );
            write_point_list(w, points.iter().map(|&(x, y)| (x as f64, y as f64)));
            w.end_element();
        }
        Shape::Line { x1, y1, x2, y2, color, thick } => {
            stroke_start(w, "line", *color, z);
            w.write_attribute("width", thick);
            write_point_list(w, [(*x1 as f64, *y1 as f64), (*x2 as f64, *y2 as f64)]);
            w.end_element();
        }
        Shape::Rect { x, y, w: rw, h, fill, color, thick } => {
            stroke_start(w, "rect", *color, z);
            w.write_attribute("width", thick);
            w.write_attribute("x", x);
            w.write_attribute("y", y);
            w.write_attribute("w", rw);
            w.write_attribute("h", h);
            write_fill(w, *fill, *color);
            write_point_list(
                w,
                [
                    (*x as f64, *y as f64),
                    ((*x + *rw) as f64, *y as f64),
                    ((*x + *rw) as f64, (*y + *h) as f64),
                    (*x as f64, (*y + *h) as f64),
                ],
            );
            w.end_element();
        }
        Shape::Ellipse { cx, cy, rx, ry, fill, color, thick } => {
            stroke_start(w, "ellipse", *color, z);
            w.write_attribute("width", thick);
            w.write_attribute("cx", cx);
            w.write_attribute("cy", cy);
            w.write_attribute("rx", rx);
            w.write_attribute("ry", ry);
            write_fill(w, *fill, *color);
            write_point_list(w, [(*cx as f64, *cy as f64), (*rx as f64, *ry as f64)]);
            w.end_element();
        }
        Shape::Arrow {
            x1,
            y1,
            x2,
            y2,
            color,
            thick,
            arrow_length,
            arrow_angle,
            head_at_end,
            label,
        } => {
            stroke_start(w, "arrow", *color, z);
            w.write_attribute("width", thick);
            w.write_attribute("arrow-length", arrow_length);
            w.write_attribute("arrow-angle", arrow_angle);
            w.write_attribute("head-at-end", head_at_end);
            if let Some(label) = label {
                w.write_attribute("label-value", &label.value);
                w.write_attribute("label-size", &label.size);
                w.write_attribute("label-font", &label.font_descriptor.pango_family_string());
            }
            write_point_list(w, [(*x1 as f64, *y1 as f64), (*x2 as f64, *y2 as f64)]);
            w.end_element();
        }
        Shape::StepMarker { x, y, color, label } => {
            stroke_start(w, "stepmarker", *color, z);
            w.write_attribute("label-value", &label.value);
            w.write_attribute("label-size", &label.size);
            w.write_attribute("label-font", &label.font_descriptor.pango_family_string());
            write_point_list(w, [(*x as f64, *y as f64)]);
            w.end_element();
        }
        Shape::Picture { x, y, w: pw, h, svg_data } => {
            stroke_start(w, "picture", Color::new(0.0, 0.0, 0.0, 1.0), z);
            w.write_attribute("x", x);
            w.write_attribute("y", y);
            w.write_attribute("w", pw);
            w.write_attribute("h", h);
            w.write_text(&hex_encode(svg_data));
            w.end_element();
        }
        Shape::Pixmap { x, y, w: pw, h, encoded, format } => {
            stroke_start(w, "pixmap", Color::new(0.0, 0.0, 0.0, 1.0), z);
            w.write_attribute("x", x);
            w.write_attribute("y", y);
            w.write_attribute("w", pw);
            w.write_attribute("h", h);
            w.write_attribute("format", format_name(*format));
            w.write_text(&hex_encode(encoded));
            w.end_element();
        }
        Shape::Text { x, y, text, color, size, font_descriptor, background_enabled, wrap_width } => {
            w.start_element("text");
            w.write_attribute("font", &font_descriptor.pango_family_string());
            w.write_attribute("size", size);
            w.write_attribute("color", &color.to_hex());
            w.write_attribute("x", x);
            w.write_attribute("y", y);
            w.write_attribute("z", &z);
            w.write_attribute("background", background_enabled);
            if let Some(wrap) = wrap_width {
                w.write_attribute("wrap", wrap);
            }
            w.write_text(text);
            w.end_element();
        }
        Shape::StickyNote { x, y, text, background, size, font_descriptor, wrap_width } => {
            w.start_element("text");
            w.write_attribute("kind", "sticky");
            w.write_attribute("font", &font_descriptor.pango_family_string());
            w.write_attribute("size", size);
            w.write_attribute("color", &background.to_hex());
            w.write_attribute("x", x);
            w.write_attribute("y", y);
            w.write_attribute("z", &z);
            if let Some(wrap) = wrap_width {
                w.write_attribute("wrap", wrap);
            }
            w.write_text(text);
            w.end_element();
        }
    }
}

fn stroke_start(w: &mut XmlWriter, tool: &str, color: Color, z: f64) {
    w.start_element("stroke");
    w.write_attribute("tool", tool);
    w.write_attribute("color", &color.to_hex());
    w.write_attribute("z", &z);
}

/// Always writes the explicit `brushcolor` attribute rather than the
/// Xournal-style integer `fill` — this crate's writer never emits `fill`
/// (spec.md §9 Open Question 2: readers accept both conventions, writers
/// prefer `brushcolor`).
fn write_fill(w: &mut XmlWriter, fill: bool, color: Color) {
    if fill {
        w.write_attribute("brushcolor", &color.to_hex());
    }
}

fn write_point_list(w: &mut XmlWriter, points: impl IntoIterator<Item = (f64, f64)>) {
    let text: Vec<String> = points
        .into_iter()
        .flat_map(|(x, y)| [format_num(x), format_num(y)])
        .collect();
    w.write_text(&text.join(" "));
}

fn format_num(v: f64) -> String {
    if v.fract() == 0.0 { format!("{v:.0}") } else { v.to_string() }
}

fn format_name(format: PixmapFormat) -> &'static str {
    match format {
        PixmapFormat::Png => "png",
        PixmapFormat::Jpeg => "jpeg",
        PixmapFormat::Bmp => "bmp",
        PixmapFormat::Ppm => "ppm",
    }
}

fn parse_coordinates(text: &str) -> Result<Vec<(f64, f64)>> {
    let nums: Result<Vec<f64>> = text
        .split_ascii_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| EngineError::XmlParse(format!("malformed coordinate token {tok:?}")))
        })
        .collect();
    let nums = nums?;
    if nums.len() % 2 != 0 {
        return Err(EngineError::XmlParse("coordinate list has odd length".into()));
    }
    Ok(nums.chunks(2).map(|c| (c[0], c[1])).collect())
}

fn read_shape(node: roxmltree::Node<'_, '_>) -> Result<(Shape, f64)> {
    match node.tag_name().name() {
        "text" => read_text(node),
        "stroke" => read_stroke(node),
        other => Err(EngineError::XmlParse(format!("unknown element <{other}>"))),
    }
}

fn attr_f64(node: roxmltree::Node<'_, '_>, name: &str) -> Result<f64> {
    node.attribute(name)
        .ok_or_else(|| EngineError::XmlParse(format!("missing attribute {name}")))?
        .parse()
        .map_err(|_| EngineError::XmlParse(format!("malformed attribute {name}")))
}

fn attr_i32(node: roxmltree::Node<'_, '_>, name: &str) -> Result<i32> {
    Ok(attr_f64(node, name)?.round() as i32)
}

fn attr_color(node: roxmltree::Node<'_, '_>, name: &str) -> Result<Color> {
    let raw = node
        .attribute(name)
        .ok_or_else(|| EngineError::XmlParse(format!("missing attribute {name}")))?;
    Color::from_hex(raw).ok_or_else(|| EngineError::XmlParse(format!("malformed color {raw:?}")))
}

fn read_font(node: roxmltree::Node<'_, '_>) -> FontDescriptor {
    let raw = node.attribute("font").or_else(|| node.attribute("label-font")).unwrap_or("Sans");
    let style = if raw.contains("Italic") { FontStyle::Italic } else { FontStyle::Normal };
    let weight = if raw.contains("Bold") { FontWeight::Bold } else { FontWeight::Normal };
    let family = raw
        .trim_end_matches("Italic")
        .trim_end_matches("Bold")
        .trim()
        .to_string();
    FontDescriptor {
        family: if family.is_empty() { "Sans".into() } else { family },
        weight,
        style,
    }
}

fn read_text(node: roxmltree::Node<'_, '_>) -> Result<(Shape, f64)> {
    let x = attr_i32(node, "x")?;
    let y = attr_i32(node, "y")?;
    let z = attr_f64(node, "z").unwrap_or(0.0);
    let color = attr_color(node, "color")?;
    let size = attr_f64(node, "size").unwrap_or(12.0);
    let font_descriptor = read_font(node);
    let wrap_width = node.attribute("wrap").and_then(|s| s.parse().ok());
    let text = node.text().unwrap_or("").to_string();
    if node.attribute("kind") == Some("sticky") {
        Ok((
            Shape::StickyNote {
                x,
                y,
                text,
                background: color,
                size,
                font_descriptor,
                wrap_width,
            },
            z,
        ))
    } else {
        let background_enabled = node
            .attribute("background")
            .map(|s| s == "true")
            .unwrap_or(false);
        Ok((
            Shape::Text {
                x,
                y,
                text,
                color,
                size,
                font_descriptor,
                background_enabled,
                wrap_width,
            },
            z,
        ))
    }
}

fn read_stroke(node: roxmltree::Node<'_, '_>) -> Result<(Shape, f64)> {
    let tool = node
        .attribute("tool")
        .ok_or_else(|| EngineError::XmlParse("stroke missing tool attribute".into()))?;
    let z = attr_f64(node, "z").unwrap_or(0.0);
    let color = attr_color(node, "color")?;
    let points = parse_coordinates(node.text().unwrap_or(""))?;

    let shape = match tool {
        "pen" => {
            let widths = node.attribute("width").unwrap_or("1.0");
            let per_point: Vec<f32> = widths
                .split_ascii_whitespace()
                .filter_map(|s| s.parse().ok())
                .collect();
            if per_point.len() == points.len() && per_point.len() > 1 {
                Shape::FreehandPressure {
                    points: points
                        .iter()
                        .zip(per_point.iter())
                        .map(|(&(x, y), &p)| (x.round() as i32, y.round() as i32, p))
                        .collect(),
                    color,
                }
            } else {
                let thick = widths.split_ascii_whitespace().next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
                Shape::Freehand {
                    points: points.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect(),
                    color,
                    thick,
                }
            }
        }
        "highlighter" => Shape::MarkerStroke {
            points: points.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect(),
            color,
            thick: attr_f64(node, "width").unwrap_or(4.0),
        },
        "eraser" => Shape::EraserStroke {
            points: points.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect(),
            brush: EraserBrush {
                size: attr_f64(node, "width").unwrap_or(10.0),
                kind: match node.attribute("brush") {
                    Some("rect") => EraserKind::Rect,
                    _ => EraserKind::Circle,
                },
            },
        },
        "line" => {
            let (p1, p2) = two_points(&points)?;
            Shape::Line {
                x1: p1.0.round() as i32,
                y1: p1.1.round() as i32,
                x2: p2.0.round() as i32,
                y2: p2.1.round() as i32,
                color,
                thick: attr_f64(node, "width").unwrap_or(1.0),
            }
        }
        "rect" => Shape::Rect {
            x: attr_i32(node, "x")?,
            y: attr_i32(node, "y")?,
            w: attr_i32(node, "w")?,
            h: attr_i32(node, "h")?,
            fill: node.attribute("brushcolor").is_some() || node.attribute("fill").is_some(),
            color,
            thick: attr_f64(node, "width").unwrap_or(1.0),
        },
        "ellipse" => Shape::Ellipse {
            cx: attr_i32(node, "cx")?,
            cy: attr_i32(node, "cy")?,
            rx: attr_i32(node, "rx")?,
            ry: attr_i32(node, "ry")?,
            fill: node.attribute("brushcolor").is_some() || node.attribute("fill").is_some(),
            color,
            thick: attr_f64(node, "width").unwrap_or(1.0),
        },
        "arrow" => {
            let (p1, p2) = two_points(&points)?;
            let label = node.attribute("label-value").map(|v| ArrowLabel {
                value: v.parse().unwrap_or(0),
                size: attr_f64(node, "label-size").unwrap_or(10.0),
                font_descriptor: read_font(node),
            });
            Shape::Arrow {
                x1: p1.0.round() as i32,
                y1: p1.1.round() as i32,
                x2: p2.0.round() as i32,
                y2: p2.1.round() as i32,
                color,
                thick: attr_f64(node, "width").unwrap_or(1.0),
                arrow_length: attr_f64(node, "arrow-length").unwrap_or(10.0),
                arrow_angle: attr_f64(node, "arrow-angle").unwrap_or(25.0),
                head_at_end: node.attribute("head-at-end").map(|s| s == "true").unwrap_or(true),
                label,
            }
        }
        "stepmarker" => {
            let p = points.first().copied().unwrap_or((0.0, 0.0));
            Shape::StepMarker {
                x: p.0.round() as i32,
                y: p.1.round() as i32,
                color,
                label: StepMarkerLabel {
                    value: node.attribute("label-value").and_then(|s| s.parse().ok()).unwrap_or(0),
                    size: attr_f64(node, "label-size").unwrap_or(10.0),
                    font_descriptor: read_font(node),
                },
            }
        }
        "picture" => Shape::Picture {
            x: attr_i32(node, "x")?,
            y: attr_i32(node, "y")?,
            w: attr_i32(node, "w")?,
            h: attr_i32(node, "h")?,
            svg_data: hex_decode(node.text().unwrap_or(""))
                .ok_or_else(|| EngineError::XmlParse("malformed picture payload".into()))?,
        },
        "pixmap" => Shape::Pixmap {
            x: attr_i32(node, "x")?,
            y: attr_i32(node, "y")?,
            w: attr_i32(node, "w")?,
            h: attr_i32(node, "h")?,
            encoded: hex_decode(node.text().unwrap_or(""))
                .ok_or_else(|| EngineError::XmlParse("malformed pixmap payload".into()))?,
            format: match node.attribute("format") {
                Some("jpeg") => PixmapFormat::Jpeg,
                Some("bmp") => PixmapFormat::Bmp,
                Some("ppm") => PixmapFormat::Ppm,
                _ => PixmapFormat::Png,
            },
        },
        other => return Err(EngineError::XmlParse(format!("unknown stroke tool {other:?}"))),
    };
    Ok((shape, z))
}

fn two_points(points: &[(f64, f64)]) -> Result<((f64, f64), (f64, f64))> {
    match points {
        [a, b, ..] => Ok((*a, *b)),
        _ => Err(EngineError::XmlParse("expected at least two coordinates".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, RED};

    fn sample_pages() -> Vec<(u32, PageShapes)> {
        vec![(
            0,
            vec![
                (
                    Shape::Freehand {
                        points: vec![(0, 0), (10, 10), (20, 0)],
                        color: RED,
                        thick: 2.0,
                    },
                    10.0,
                ),
                (
                    Shape::Text {
                        x: 5,
                        y: 5,
                        text: "hello world".into(),
                        color: BLACK,
                        size: 14.0,
                        font_descriptor: FontDescriptor::default(),
                        background_enabled: true,
                        wrap_width: Some(200),
                    },
                    20.0,
                ),
                (
                    Shape::Rect {
                        x: 1,
                        y: 2,
                        w: 30,
                        h: 40,
                        fill: true,
                        color: BLACK,
                        thick: 1.5,
                    },
                    30.0,
                ),
            ],
        )]
    }

    #[test]
    fn round_trips_a_page_of_mixed_shapes() {
        let pages = sample_pages();
        let xml = write_document(&pages);
        let loaded = read_document(&xml).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].0, 0);
        assert_eq!(loaded[0].1.len(), 3);

        // z-order preserved
        let zs: Vec<f64> = loaded[0].1.iter().map(|(_, z)| *z).collect();
        assert_eq!(zs, vec![10.0, 20.0, 30.0]);

        match &loaded[0].1[0].0 {
            Shape::Freehand { points, thick, .. } => {
                assert_eq!(points, &vec![(0, 0), (10, 10), (20, 0)]);
                assert_eq!(*thick, 2.0);
            }
            other => panic!("expected Freehand, got {other:?}"),
        }
        match &loaded[0].1[1].0 {
            Shape::Text { text, wrap_width, .. } => {
                assert_eq!(text, "hello world");
                assert_eq!(*wrap_width, Some(200));
            }
            other => panic!("expected Text, got {other:?}"),
        }
        match &loaded[0].1[2].0 {
            Shape::Rect { w, h, fill, .. } => {
                assert_eq!((*w, *h, *fill), (30, 40, true));
            }
            other => panic!("expected Rect, got {other:?}"),
        }
    }

    #[test]
    fn variable_width_pen_round_trips_per_point_widths() {
        let pages = vec![(
            0,
            vec![(
                Shape::FreehandPressure {
                    points: vec![(0, 0, 1.0), (5, 5, 2.5), (10, 0, 1.0)],
                    color: RED,
                },
                5.0,
            )],
        )];
        let xml = write_document(&pages);
        let loaded = read_document(&xml).unwrap();
        match &loaded[0].1[0].0 {
            Shape::FreehandPressure { points, .. } => {
                assert_eq!(points, &vec![(0, 0, 1.0), (5, 5, 2.5), (10, 0, 1.0)]);
            }
            other => panic!("expected FreehandPressure, got {other:?}"),
        }
    }

    #[test]
    fn malformed_element_is_skipped_not_fatal() {
        let xml = r#"<document><page number="0"><bogus/><stroke tool="line" color="#000000ff" z="1.0">0 0 1 1</stroke></page></document>"#;
        let loaded = read_document(xml).unwrap();
        assert_eq!(loaded[0].1.len(), 1);
    }
}
