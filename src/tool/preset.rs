//! Named, saved tool configurations for quick-switch UIs.

use super::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named combination of tool + stroke descriptor a host UI can offer as a
/// one-click preset (e.g. a toolbar button). Pure data; no engine logic
/// depends on presets existing.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ToolPreset {
    pub name: String,
    pub tool: Tool,
}

impl ToolPreset {
    pub fn new(name: impl Into<String>, tool: Tool) -> Self {
        Self {
            name: name.into(),
            tool,
        }
    }
}
