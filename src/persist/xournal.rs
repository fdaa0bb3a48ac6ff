//! Reads uncompressed Xournal/Xournal++ files.
//!
//! Xournal stores each page as `<page width="..." height="..."><background
//! pageno="N" .../><layer><stroke tool="pen" color="..." width="...">x y x
//! y ...</stroke><text .../></layer></page>`, repeated inside one
//! `<xournal>` root. Real `.xoj`/`.xopp` files are gzip-compressed; this
//! module only parses the decompressed XML, mirroring the teacher's
//! `session::storage` split between "decompress" and "parse" as two
//! separable steps rather than one monolithic loader.
//!
//! Colors appear either as the `#AARRGGBB` convention ([`Color::from_xournal_argb`])
//! or as one of Xournal's built-in names (`black`, `blue`, `red`, `green`,
//! `lightblue`, `yellow`, `white`), the latter resolved with
//! [`crate::util::name_to_color`] plus the handful of additional names
//! Xournal defines that this crate's own palette doesn't.

use roxmltree::Document;

use crate::draw::{Color, FontDescriptor};
use crate::draw::{EraserBrush, EraserKind};
use crate::draw::Shape;
use crate::error::{EngineError, Result};
use crate::util::name_to_color;

use super::xml::PageShapes;

/// Parses an uncompressed Xournal/Xournal++ document into the same
/// `(page number, shapes)` shape `persist::xml::read_document` produces,
/// so callers can merge imported pages into a `PathContainer` the same
/// way regardless of source format.
pub fn read_xournal(xml: &str) -> Result<Vec<(u32, PageShapes)>> {
    let doc = Document::parse(xml).map_err(|e| EngineError::XournalParse(e.to_string()))?;
    let root = doc.root_element();
    if root.tag_name().name() != "xournal" {
        return Err(EngineError::XournalParse("missing <xournal> root element".into()));
    }

    let mut pages = Vec::new();
    let mut page_number = 0u32;
    for page_node in root.children().filter(|n| n.is_element() && n.tag_name().name() == "page") {
        let number = page_node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == "background")
            .and_then(|bg| bg.attribute("pageno"))
            .and_then(|s| s.parse::<u32>().ok())
            .map(|n| n.saturating_sub(1))
            .unwrap_or(page_number);

        let mut shapes = Vec::new();
        let mut z = 0.0f64;
        for layer in page_node.children().filter(|n| n.is_element() && n.tag_name().name() == "layer") {
            for node in layer.children().filter(|n| n.is_element()) {
                match read_element(node, z) {
                    Ok(Some(shape)) => {
                        shapes.push((shape, z));
                        z += 1.0;
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("skipping malformed Xournal element on page {number}: {e}"),
                }
            }
        }
        pages.push((number, shapes));
        page_number += 1;
    }
    Ok(pages)
}

fn xournal_color(raw: &str) -> Option<Color> {
    if raw.starts_with('#') {
        Color::from_xournal_argb(raw).or_else(|| Color::from_hex(raw))
    } else {
        name_to_color(raw).or_else(|| match raw {
            "lightblue" => Some(Color::from_u8(0x66, 0xcc, 0xff, 0xff)),
            "lightgreen" => Some(Color::from_u8(0x00, 0xff, 0x00, 0xff)),
            "magenta" => Some(Color::from_u8(0xff, 0x00, 0xff, 0xff)),
            "cyan" => Some(Color::from_u8(0x00, 0xff, 0xff, 0xff)),
            "gray" | "grey" => Some(Color::from_u8(0x80, 0x80, 0x80, 0xff)),
            _ => None,
        })
    }
}

fn read_element(node: roxmltree::Node<'_, '_>, z: f64) -> Result<Option<Shape>> {
    match node.tag_name().name() {
        "stroke" => read_stroke(node).map(Some),
        "text" => read_text(node, z).map(Some),
        "image" => Ok(None),
        other => Err(EngineError::XournalParse(format!("unknown element <{other}>"))),
    }
}

fn read_stroke(node: roxmltree::Node<'_, '_>) -> Result<Shape> {
    let tool = node.attribute("tool").unwrap_or("pen");
    let raw_color = node
        .attribute("color")
        .ok_or_else(|| EngineError::XournalParse("stroke missing color attribute".into()))?;
    let color = xournal_color(raw_color)
        .ok_or_else(|| EngineError::XournalParse(format!("unrecognized stroke color {raw_color:?}")))?;

    let widths: Vec<f64> = node
        .attribute("width")
        .unwrap_or("1.4")
        .split_ascii_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect();
    let thick = widths.first().copied().unwrap_or(1.4);

    let coords = parse_coordinates(node.text().unwrap_or(""))?;
    let points: Vec<(i32, i32)> = coords.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32)).collect();

    Ok(match tool {
        "highlighter" => Shape::MarkerStroke { points, color, thick },
        "eraser" => Shape::EraserStroke {
            points,
            brush: EraserBrush { size: thick, kind: EraserKind::Circle },
        },
        _ => Shape::Freehand { points, color, thick },
    })
}

fn read_text(node: roxmltree::Node<'_, '_>, z: f64) -> Result<Shape> {
    let _ = z;
    let x: f64 = node
        .attribute("x")
        .ok_or_else(|| EngineError::XournalParse("text missing x attribute".into()))?
        .parse()
        .map_err(|_| EngineError::XournalParse("malformed text x attribute".into()))?;
    let y: f64 = node
        .attribute("y")
        .ok_or_else(|| EngineError::XournalParse("text missing y attribute".into()))?
        .parse()
        .map_err(|_| EngineError::XournalParse("malformed text y attribute".into()))?;
    let raw_color = node.attribute("color").unwrap_or("black");
    let color = xournal_color(raw_color).unwrap_or(crate::draw::BLACK);
    let size: f64 = node.attribute("size").and_then(|s| s.parse().ok()).unwrap_or(12.0);
    let font_descriptor = node
        .attribute("font")
        .map(|family| FontDescriptor { family: family.to_string(), ..FontDescriptor::default() })
        .unwrap_or_default();
    let text = node.text().unwrap_or("").to_string();

    Ok(Shape::Text {
        x: x.round() as i32,
        y: y.round() as i32,
        text,
        color,
        size,
        font_descriptor,
        background_enabled: false,
        wrap_width: None,
    })
}

fn parse_coordinates(text: &str) -> Result<Vec<(f64, f64)>> {
    let nums: Result<Vec<f64>> = text
        .split_ascii_whitespace()
        .map(|tok| {
            tok.parse::<f64>()
                .map_err(|_| EngineError::XournalParse(format!("malformed coordinate token {tok:?}")))
        })
        .collect();
    let nums = nums?;
    if nums.len() % 2 != 0 {
        return Err(EngineError::XournalParse("coordinate list has odd length".into()));
    }
    Ok(nums.chunks(2).map(|c| (c[0], c[1])).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" standalone="no"?>
<xournal version="0.4.8">
  <page width="612.00" height="792.00">
    <background type="pdf" pageno="1"/>
    <layer>
      <stroke tool="pen" color="#ff0000ff" width="1.41">10 10 20 20 30 10</stroke>
      <stroke tool="highlighter" color="#ffff0078" width="8.00">0 0 100 0</stroke>
      <text font="Sans" size="12" x="50" y="60" color="black">hello xournal</text>
    </layer>
  </page>
</xournal>"#;

    #[test]
    fn parses_page_background_number_and_layer_contents() {
        let pages = read_xournal(SAMPLE).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].0, 0);
        assert_eq!(pages[0].1.len(), 3);
    }

    #[test]
    fn argb_color_convention_is_swapped_on_read() {
        let pages = read_xournal(SAMPLE).unwrap();
        match &pages[0].1[0].0 {
            Shape::Freehand { color, .. } => {
                assert!((color.r - 1.0).abs() < 1e-9);
                assert!((color.a - 1.0).abs() < 1e-9);
            }
            other => panic!("expected Freehand, got {other:?}"),
        }
    }

    #[test]
    fn highlighter_tool_maps_to_marker_stroke() {
        let pages = read_xournal(SAMPLE).unwrap();
        assert!(matches!(pages[0].1[1].0, Shape::MarkerStroke { .. }));
    }

    #[test]
    fn named_color_resolves_via_palette() {
        let pages = read_xournal(SAMPLE).unwrap();
        match &pages[0].1[2].0 {
            Shape::Text { color, text, .. } => {
                assert_eq!(text, "hello xournal");
                assert_eq!(*color, crate::draw::BLACK);
            }
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn missing_root_element_is_reported() {
        let err = read_xournal("<notxournal/>").unwrap_err();
        assert!(matches!(err, EngineError::XournalParse(_)));
    }
}
