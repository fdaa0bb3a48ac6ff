//! External clipboard payload encode/decode (spec.md §4.5, §6, §7).
//!
//! Four wire formats are understood, in the priority order a paste handler
//! should try them (spec.md §7 `ClipboardParseError` policy: "try each
//! offered MIME type in order; the first that decodes wins; if none
//! decode, paste is a no-op — never an error dialog"):
//!
//! 1. `application/x-slidebound-clip` — this crate's own format, carrying
//!    full fidelity (shape + transform) for copy/paste within or between
//!    instances of this engine.
//! 2. `image/svg+xml` — any SVG document, kept as a [`Shape::Picture`] and
//!    rendered with `resvg`/`tiny-skia` at paint time.
//! 3. Raster formats (`image/png`, `image/jpeg`, `image/bmp`,
//!    `image/x-portable-pixmap`) decoded with the `image` crate into a
//!    [`Shape::Pixmap`], original bytes retained for lossless re-export.
//!
//! Grounded on the teacher's `session::storage` binary format (a small
//! fixed header followed by length-prefixed records) generalized from one
//! session-wide blob to a transform-tagged list of items.

use crate::draw::{PixmapFormat, Shape};
use crate::error::{EngineError, Result};
use crate::scene::ClipboardEntry;
use crate::util::Transform;

const NATIVE_MAGIC: &[u8; 4] = b"SBC1";

/// Encodes entries in this crate's native clipboard format: a 4-byte
/// magic header, then for each entry six little-endian `f64`s (the
/// transform) followed by a `u32` length and that many bytes of
/// JSON-encoded [`Shape`].
pub fn write_native(entries: &[ClipboardEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(NATIVE_MAGIC);
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        for component in transform_components(&entry.transform) {
            out.extend_from_slice(&component.to_le_bytes());
        }
        let shape_json = serde_json::to_vec(&entry.shape).expect("Shape is always serializable");
        out.extend_from_slice(&(shape_json.len() as u32).to_le_bytes());
        out.extend_from_slice(&shape_json);
    }
    out
}

/// Decodes a buffer written by [`write_native`]. Any structural
/// malformation (short buffer, bad magic, truncated record) yields
/// [`EngineError::UnrecognizedClipboardFormat`] so the caller's fallback
/// chain moves on to the next candidate MIME type.
pub fn read_native(bytes: &[u8]) -> Result<Vec<ClipboardEntry>> {
    if bytes.len() < 8 || &bytes[0..4] != NATIVE_MAGIC {
        return Err(EngineError::UnrecognizedClipboardFormat);
    }
    let count = u32::from_le_bytes(bytes[4..8].try_into().unwrap()) as usize;
    let mut cursor = 8usize;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        if bytes.len() < cursor + 48 {
            return Err(EngineError::UnrecognizedClipboardFormat);
        }
        let mut components = [0f64; 6];
        for component in components.iter_mut() {
            let raw: [u8; 8] = bytes[cursor..cursor + 8]
                .try_into()
                .map_err(|_| EngineError::UnrecognizedClipboardFormat)?;
            *component = f64::from_le_bytes(raw);
            cursor += 8;
        }
        let transform = transform_from_components(components);

        if bytes.len() < cursor + 4 {
            return Err(EngineError::UnrecognizedClipboardFormat);
        }
        let len = u32::from_le_bytes(bytes[cursor..cursor + 4].try_into().unwrap()) as usize;
        cursor += 4;
        if bytes.len() < cursor + len {
            return Err(EngineError::UnrecognizedClipboardFormat);
        }
        let shape: Shape = serde_json::from_slice(&bytes[cursor..cursor + len])
            .map_err(|_| EngineError::UnrecognizedClipboardFormat)?;
        cursor += len;

        entries.push(ClipboardEntry { shape, transform });
    }
    Ok(entries)
}

fn transform_components(t: &Transform) -> [f64; 6] {
    [t.a, t.b, t.c, t.d, t.e, t.f]
}

fn transform_from_components(c: [f64; 6]) -> Transform {
    Transform { a: c[0], b: c[1], c: c[2], d: c[3], e: c[4], f: c[5] }
}

/// Decodes an SVG document as a single [`Shape::Picture`] entry, reading
/// `width`/`height` (falling back to a `viewBox`) from the root `<svg>`
/// element so the pasted item has a sensible initial size.
pub fn read_svg(svg: &str) -> Result<ClipboardEntry> {
    let doc = roxmltree::Document::parse(svg).map_err(|e| {
        log::warn!("clipboard SVG candidate failed to parse: {e}");
        EngineError::UnrecognizedClipboardFormat
    })?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(EngineError::UnrecognizedClipboardFormat);
    }

    let (w, h) = svg_dimensions(root).unwrap_or((100, 100));
    Ok(ClipboardEntry {
        shape: Shape::Picture { x: 0, y: 0, w, h, svg_data: svg.as_bytes().to_vec() },
        transform: Transform::IDENTITY,
    })
}

fn svg_dimensions(root: roxmltree::Node<'_, '_>) -> Option<(i32, i32)> {
    let parse_len = |s: &str| -> Option<f64> { s.trim_end_matches("px").parse().ok() };
    if let (Some(w), Some(h)) = (
        root.attribute("width").and_then(parse_len),
        root.attribute("height").and_then(parse_len),
    ) {
        return Some((w.round() as i32, h.round() as i32));
    }
    let view_box = root.attribute("viewBox")?;
    let parts: Vec<f64> = view_box.split_ascii_whitespace().filter_map(|s| s.parse().ok()).collect();
    if parts.len() == 4 {
        Some((parts[2].round() as i32, parts[3].round() as i32))
    } else {
        None
    }
}

/// Serializes a [`Shape::Picture`] back to raw bytes for export to a
/// system clipboard's `image/svg+xml` slot, or `None` if the entry isn't
/// an SVG picture.
pub fn write_svg(entry: &ClipboardEntry) -> Option<Vec<u8>> {
    match &entry.shape {
        Shape::Picture { svg_data, .. } => Some(svg_data.clone()),
        _ => None,
    }
}

/// Decodes a raster image buffer (PNG/JPEG/BMP/PPM) into a
/// [`Shape::Pixmap`] entry, keeping the original encoded bytes for
/// lossless re-export.
pub fn read_raster(bytes: &[u8], format: PixmapFormat) -> Result<ClipboardEntry> {
    let decoded = image::load_from_memory(bytes).map_err(EngineError::ImageDecode)?;
    Ok(ClipboardEntry {
        shape: Shape::Pixmap {
            x: 0,
            y: 0,
            w: decoded.width() as i32,
            h: decoded.height() as i32,
            encoded: bytes.to_vec(),
            format,
        },
        transform: Transform::IDENTITY,
    })
}

/// One clipboard MIME candidate offered by the host's paste event, in the
/// order the host prefers them.
pub struct MimeCandidate<'a> {
    pub mime: &'a str,
    pub bytes: &'a [u8],
}

/// Tries each candidate in order and returns the decoded entries from the
/// first one that decodes successfully. Returns `None` (a silent no-op,
/// not an error) if nothing in the list decodes — spec.md §7's
/// `ClipboardParseError` policy.
pub fn paste_from_candidates(candidates: &[MimeCandidate]) -> Option<Vec<ClipboardEntry>> {
    for candidate in candidates {
        let decoded = match candidate.mime {
            "application/x-slidebound-clip" => read_native(candidate.bytes).ok(),
            "image/svg+xml" => read_svg_text(candidate.bytes).map(|e| vec![e]),
            "image/png" => read_raster(candidate.bytes, PixmapFormat::Png).ok().map(|e| vec![e]),
            "image/jpeg" => read_raster(candidate.bytes, PixmapFormat::Jpeg).ok().map(|e| vec![e]),
            "image/bmp" => read_raster(candidate.bytes, PixmapFormat::Bmp).ok().map(|e| vec![e]),
            "image/x-portable-pixmap" => read_raster(candidate.bytes, PixmapFormat::Ppm).ok().map(|e| vec![e]),
            other => {
                log::debug!("ignoring unsupported clipboard mime type {other:?}");
                None
            }
        };
        if decoded.is_some() {
            return decoded;
        }
    }
    None
}

fn read_svg_text(bytes: &[u8]) -> Option<ClipboardEntry> {
    let text = std::str::from_utf8(bytes).ok()?;
    read_svg(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;

    fn sample_entries() -> Vec<ClipboardEntry> {
        vec![
            ClipboardEntry {
                shape: Shape::Line { x1: 0, y1: 0, x2: 10, y2: 10, color: RED, thick: 2.0 },
                transform: Transform::translation(5.0, 5.0),
            },
            ClipboardEntry {
                shape: Shape::Rect { x: 1, y: 2, w: 30, h: 40, fill: false, color: RED, thick: 1.0 },
                transform: Transform::IDENTITY,
            },
        ]
    }

    #[test]
    fn native_round_trips_shape_and_transform() {
        let entries = sample_entries();
        let bytes = write_native(&entries);
        let decoded = read_native(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].transform, Transform::translation(5.0, 5.0));
        match &decoded[1].shape {
            Shape::Rect { w, h, .. } => assert_eq!((*w, *h), (30, 40)),
            other => panic!("expected Rect, got {other:?}"),
        }
    }

    #[test]
    fn malformed_native_buffer_is_unrecognized() {
        assert!(matches!(
            read_native(b"not a clip"),
            Err(EngineError::UnrecognizedClipboardFormat)
        ));
    }

    #[test]
    fn svg_dimensions_read_from_width_height() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="48"></svg>"#;
        let entry = read_svg(svg).unwrap();
        match entry.shape {
            Shape::Picture { w, h, .. } => assert_eq!((w, h), (64, 48)),
            other => panic!("expected Picture, got {other:?}"),
        }
    }

    #[test]
    fn svg_dimensions_fall_back_to_view_box() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"></svg>"#;
        let entry = read_svg(svg).unwrap();
        match entry.shape {
            Shape::Picture { w, h, .. } => assert_eq!((w, h), (200, 100)),
            other => panic!("expected Picture, got {other:?}"),
        }
    }

    #[test]
    fn candidate_chain_skips_unparseable_entries_and_falls_through() {
        let native = write_native(&sample_entries());
        let candidates = vec![
            MimeCandidate { mime: "application/x-slidebound-clip", bytes: b"garbage" },
            MimeCandidate { mime: "application/x-slidebound-clip", bytes: &native },
        ];
        let decoded = paste_from_candidates(&candidates).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn empty_candidate_list_is_a_silent_no_op() {
        assert!(paste_from_candidates(&[]).is_none());
    }
}
