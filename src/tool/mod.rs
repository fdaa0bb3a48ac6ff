//! The tool model: what a pointer gesture on a given input device does.
//!
//! Grounded on the teacher's `input::tool::Tool` (a flat `Select/Pen/Line/
//! Rect/Ellipse/Arrow/Marker/Highlight/Eraser` enum bound one-tool-at-a-time
//! to the whole input stream) generalized to a richer variant set bound
//! per-device via [`DeviceMask`], matching how a presenter app needs touch,
//! stylus, and mouse bound to different tools simultaneously (e.g. stylus
//! draws, touch pans).

mod device;
mod preset;
mod selection_op;

pub use device::DeviceMask;
pub use preset::ToolPreset;
pub use selection_op::{SelectionKind, SelectionOp, SelectionRegion};

use crate::draw::{Color, EraserBrush};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A stroke descriptor shared by every ink-producing tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrokeDescriptor {
    pub color: Color,
    pub thick: f64,
}

/// The closed set of tools a pointer gesture can be bound to.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub enum Tool {
    /// Freehand ink, width following input pressure where available.
    Pen(StrokeDescriptor),
    /// Freehand ink at a fixed width regardless of pressure.
    FixedWidthPen(StrokeDescriptor),
    /// Translucent freehand ink (marker-style highlighting).
    Highlighter(StrokeDescriptor),
    /// Removes ink under the pointer.
    Eraser(EraserBrush),
    /// Transient laser-pointer-style marker; leaves no persisted item.
    Pointer { color: Color, radius: f64 },
    /// Transient circular spotlight that dims everything outside it.
    Torch { radius: f64 },
    /// Transient local magnification lens following the pointer.
    Magnifier { radius: f64, zoom: f64 },
    /// Places or edits a text item at the pointer position.
    TextInput,
    /// Selects existing items for move/rotate/resize/delete.
    Selection(SelectionKind),
    /// Pans/scrolls the view without touching any item.
    Drag,
    /// Input on this device is ignored entirely (e.g. palm rejection).
    NoTool,
}

impl Tool {
    /// Whether this tool creates a persisted item when its gesture ends
    /// (as opposed to a transient visual effect like `Pointer`/`Torch`).
    pub fn produces_item(&self) -> bool {
        matches!(
            self,
            Tool::Pen(_) | Tool::FixedWidthPen(_) | Tool::Highlighter(_) | Tool::TextInput
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Tool::Pen(_) => "Pen",
            Tool::FixedWidthPen(_) => "Fixed-width pen",
            Tool::Highlighter(_) => "Highlighter",
            Tool::Eraser(_) => "Eraser",
            Tool::Pointer { .. } => "Pointer",
            Tool::Torch { .. } => "Torch",
            Tool::Magnifier { .. } => "Magnifier",
            Tool::TextInput => "Text",
            Tool::Selection(_) => "Selection",
            Tool::Drag => "Drag",
            Tool::NoTool => "None",
        }
    }
}

/// Per-device tool bindings: which [`Tool`] a given [`DeviceMask`] bit
/// activates. Looked up once per input event by `scene::dispatch`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ToolBindings {
    bindings: Vec<(DeviceMask, Tool)>,
}

impl ToolBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, device: DeviceMask, tool: Tool) {
        self.bindings.retain(|(d, _)| *d != device);
        self.bindings.push((device, tool));
    }

    /// Resolves the tool for a device, preferring the most specific (fewest
    /// bits set) binding that matches, falling back to `NoTool`.
    pub fn resolve(&self, device: DeviceMask) -> &Tool {
        self.bindings
            .iter()
            .filter(|(mask, _)| mask.intersects(device))
            .min_by_key(|(mask, _)| mask.bits().count_ones())
            .map(|(_, tool)| tool)
            .unwrap_or(&Tool::NoTool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_binding_wins() {
        let mut bindings = ToolBindings::new();
        bindings.bind(DeviceMask::ANY, Tool::Drag);
        bindings.bind(
            DeviceMask::STYLUS,
            Tool::Pen(StrokeDescriptor {
                color: crate::draw::BLACK,
                thick: 2.0,
            }),
        );
        assert_eq!(bindings.resolve(DeviceMask::STYLUS).kind_name(), "Pen");
        assert_eq!(bindings.resolve(DeviceMask::TOUCH).kind_name(), "Drag");
    }

    #[test]
    fn unbound_device_is_no_tool() {
        let bindings = ToolBindings::new();
        assert_eq!(bindings.resolve(DeviceMask::MOUSE).kind_name(), "None");
    }
}
