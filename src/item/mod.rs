//! Per-item stroke style and text property accessors over [`crate::draw::Shape`].
//!
//! `PathContainer` history stores *changes* (a before/after pair), never a
//! whole cloned `Shape`, for property edits that don't touch geometry. These
//! small value types are what gets stored, and the `style`/`set_style` and
//! `text_properties`/`set_text_properties` accessors below are how the
//! container reads and writes them on the live item.

use crate::draw::{Color, FontDescriptor, Shape};
use crate::error::{EngineError, Result};

/// Color + thickness + fill, the mutable "drawing tool" properties most
/// shape variants carry.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub thick: f64,
    pub fill: bool,
}

/// Mutable properties of a text-bearing item (`Text` or `StickyNote`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperties {
    pub text: String,
    pub size: f64,
    pub font_descriptor: FontDescriptor,
    pub background_enabled: bool,
    pub wrap_width: Option<i32>,
}

pub fn style(shape: &Shape) -> Result<StrokeStyle> {
    match shape {
        Shape::Freehand { color, thick, .. }
        | Shape::Line { color, thick, .. }
        | Shape::Arrow { color, thick, .. }
        | Shape::MarkerStroke { color, thick, .. } => Ok(StrokeStyle {
            color: *color,
            thick: *thick,
            fill: false,
        }),
        Shape::Rect {
            color, thick, fill, ..
        }
        | Shape::Ellipse {
            color, thick, fill, ..
        } => Ok(StrokeStyle {
            color: *color,
            thick: *thick,
            fill: *fill,
        }),
        Shape::FreehandPressure { color, .. } => Ok(StrokeStyle {
            color: *color,
            thick: 0.0,
            fill: false,
        }),
        Shape::Text { color, .. } => Ok(StrokeStyle {
            color: *color,
            thick: 0.0,
            fill: false,
        }),
        Shape::StickyNote { background, .. } => Ok(StrokeStyle {
            color: *background,
            thick: 0.0,
            fill: true,
        }),
        Shape::StepMarker { color, .. } => Ok(StrokeStyle {
            color: *color,
            thick: 0.0,
            fill: true,
        }),
        Shape::EraserStroke { .. } | Shape::Picture { .. } | Shape::Pixmap { .. } => {
            Err(EngineError::NoStrokeStyle(0))
        }
    }
}

pub fn set_style(shape: &mut Shape, new_style: StrokeStyle) -> Result<()> {
    match shape {
        Shape::Freehand { color, thick, .. }
        | Shape::Line { color, thick, .. }
        | Shape::Arrow { color, thick, .. }
        | Shape::MarkerStroke { color, thick, .. } => {
            *color = new_style.color;
            *thick = new_style.thick;
        }
        Shape::Rect {
            color, thick, fill, ..
        }
        | Shape::Ellipse {
            color, thick, fill, ..
        } => {
            *color = new_style.color;
            *thick = new_style.thick;
            *fill = new_style.fill;
        }
        Shape::FreehandPressure { color, .. } => *color = new_style.color,
        Shape::Text { color, .. } => *color = new_style.color,
        Shape::StickyNote { background, .. } => *background = new_style.color,
        Shape::StepMarker { color, .. } => *color = new_style.color,
        Shape::EraserStroke { .. } | Shape::Picture { .. } | Shape::Pixmap { .. } => {
            return Err(EngineError::NoStrokeStyle(0));
        }
    }
    Ok(())
}

pub fn text_properties(shape: &Shape) -> Result<TextProperties> {
    match shape {
        Shape::Text {
            text,
            size,
            font_descriptor,
            background_enabled,
            wrap_width,
            ..
        } => Ok(TextProperties {
            text: text.clone(),
            size: *size,
            font_descriptor: font_descriptor.clone(),
            background_enabled: *background_enabled,
            wrap_width: *wrap_width,
        }),
        Shape::StickyNote {
            text,
            size,
            font_descriptor,
            wrap_width,
            ..
        } => Ok(TextProperties {
            text: text.clone(),
            size: *size,
            font_descriptor: font_descriptor.clone(),
            background_enabled: true,
            wrap_width: *wrap_width,
        }),
        _ => Err(EngineError::NotATextItem(0)),
    }
}

pub fn set_text_properties(shape: &mut Shape, props: TextProperties) -> Result<()> {
    match shape {
        Shape::Text {
            text,
            size,
            font_descriptor,
            background_enabled,
            wrap_width,
            ..
        } => {
            *text = props.text;
            *size = props.size;
            *font_descriptor = props.font_descriptor;
            *background_enabled = props.background_enabled;
            *wrap_width = props.wrap_width;
        }
        Shape::StickyNote {
            text,
            size,
            font_descriptor,
            wrap_width,
            ..
        } => {
            *text = props.text;
            *size = props.size;
            *font_descriptor = props.font_descriptor;
            *wrap_width = props.wrap_width;
        }
        _ => return Err(EngineError::NotATextItem(0)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLUE, RED};

    fn sample_line() -> Shape {
        Shape::Line {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 10,
            color: RED,
            thick: 2.0,
        }
    }

    #[test]
    fn style_round_trips_on_line() {
        let mut shape = sample_line();
        let mut s = style(&shape).unwrap();
        s.color = BLUE;
        s.thick = 5.0;
        set_style(&mut shape, s.clone()).unwrap();
        assert_eq!(style(&shape).unwrap(), s);
    }

    #[test]
    fn eraser_has_no_style() {
        let shape = Shape::EraserStroke {
            points: vec![(0, 0)],
            brush: crate::draw::EraserBrush {
                size: 10.0,
                kind: crate::draw::EraserKind::Circle,
            },
        };
        assert!(style(&shape).is_err());
    }

    #[test]
    fn text_properties_round_trip() {
        let mut shape = Shape::Text {
            x: 0,
            y: 0,
            text: "hi".into(),
            color: RED,
            size: 12.0,
            font_descriptor: FontDescriptor::default(),
            background_enabled: false,
            wrap_width: None,
        };
        let mut props = text_properties(&shape).unwrap();
        props.text = "bye".into();
        set_text_properties(&mut shape, props.clone()).unwrap();
        assert_eq!(text_properties(&shape).unwrap(), props);
    }

    #[test]
    fn non_text_item_rejects_text_properties() {
        assert!(text_properties(&sample_line()).is_err());
    }
}
