//! The read-only settings tree (spec.md §6 "Configuration").
//!
//! Loading the backing TOML file is out of scope (spec.md §1 lists
//! "config-file loading" among the external collaborators); what lives
//! here is the schema itself — the same `serde` + `schemars` stack the
//! teacher's own `config/` module uses for its `Config` root — plus
//! `validate_and_clamp`, which repairs out-of-range values in place and
//! logs a warning rather than failing to construct (spec.md §7's
//! "log and silently repair" policy, applied to config the same way it's
//! applied to history-state errors).

mod validate;

use crate::recognizer::RecognizerConfig;
use crate::tool::ToolBindings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which page-part threshold (spec.md §6) decides when a page is split
/// into left/right halves for the notes-vs-slide dual-projector layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum OverlayMode {
    /// Pages sharing a PDF page label are independent slides.
    Independent,
    /// Pages sharing a PDF page label form one logical "overlay" slide for
    /// navigation and history-sharing purposes (spec.md glossary).
    SharedHistory,
}

impl Default for OverlayMode {
    fn default() -> Self {
        OverlayMode::Independent
    }
}

/// `history_length_visible_slides` / `history_length_hidden_slides`
/// (spec.md §5, §6): how many undo steps are retained for the currently
/// visible page(s) versus every other page's container.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HistoryConfig {
    pub history_length_visible_slides: usize,
    pub history_length_hidden_slides: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_length_visible_slides: 50,
            history_length_hidden_slides: 5,
        }
    }
}

/// Rendering cache size limits (spec.md §6).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CacheConfig {
    /// Soft cap, in bytes, on the cache's total compressed size.
    pub max_memory: u64,
    /// Hard cap on the number of distinct (page, resolution) entries kept.
    pub max_cache_pages: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_memory: 256 * 1024 * 1024,
            max_cache_pages: 400,
        }
    }
}

/// Selection overlay geometry (spec.md §6 `selection_rect_handle_size`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    pub selection_rect_handle_size: f64,
    /// `path_min_selectable_width` (spec.md §6): the floor applied to a
    /// path's hit-test stroke width so a 1px pen stroke is still easy to
    /// click with a mouse.
    pub path_min_selectable_width: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            selection_rect_handle_size: 8.0,
            path_min_selectable_width: 6.0,
        }
    }
}

/// The complete read-only settings tree. Every field mirrors a named
/// configuration key from spec.md §6; nothing here is engine state — the
/// engine reads these once per relevant operation (or, for per-device tool
/// bindings, holds a clone) but never mutates them in place except via
/// [`Config::validate_and_clamp`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub recognizer: RecognizerConfig,
    pub history: HistoryConfig,
    pub cache: CacheConfig,
    pub selection: SelectionConfig,
    pub overlay_mode: OverlayMode,
    /// Threshold (fraction of page width, 0.0-1.0) above which a page is
    /// presented as two page-parts (left/right) rather than one full page.
    pub page_part_threshold: f64,
    /// Whether a drawn shape keeps its editable handles after the stroke
    /// finishes, or immediately finalizes to a plain path (spec.md §6
    /// "finalize-paths flag").
    pub finalize_paths: bool,
    /// Name of the concrete rendering backend in use, purely informational
    /// (the backend itself is selected and constructed by the host
    /// application — spec.md §1 "GUI toolkit... treated as an abstract
    /// event source and painter sink").
    pub renderer_name: String,
    /// Per-input-device default tool bindings, applied at startup.
    pub tool_bindings: ToolBindings,
    /// Action bindings keyed by key sequence string (e.g. `"Ctrl+Z"` →
    /// `"undo"`); the concrete action enum lives with the host
    /// application, so this crate only carries the string mapping.
    pub action_bindings: HashMap<String, String>,
    /// Gesture bindings keyed by gesture name (e.g. `"two-finger-swipe"` →
    /// `"next-slide"`).
    pub gesture_bindings: HashMap<String, String>,
}

impl Config {
    /// Parses a `Config` from a TOML document's contents. Resolving *where*
    /// that document lives on disk is the host's job (spec.md §1); this is
    /// just the `toml` round trip the teacher's `config/io.rs` wraps around
    /// a file read.
    pub fn from_toml_str(s: &str) -> crate::error::Result<Config> {
        toml::from_str(s).map_err(|e| crate::error::EngineError::Config(e.to_string()))
    }

    /// Serializes back to a TOML document, e.g. for a settings UI to persist
    /// after editing, or to seed a fresh config file.
    pub fn to_toml_string(&self) -> crate::error::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::error::EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_internally_consistent() {
        let config = Config::default();
        assert!(config.history.history_length_visible_slides > config.history.history_length_hidden_slides);
        assert!(config.cache.max_cache_pages > 0);
    }

    #[test]
    fn toml_round_trip_preserves_non_default_values() {
        let mut config = Config::default();
        config.page_part_threshold = 0.65;
        config.renderer_name = "cairo".into();
        config.action_bindings.insert("Ctrl+Z".into(), "undo".into());

        let toml_str = config.to_toml_string().unwrap();
        let loaded = Config::from_toml_str(&toml_str).unwrap();

        assert_eq!(loaded.page_part_threshold, 0.65);
        assert_eq!(loaded.renderer_name, "cairo");
        assert_eq!(loaded.action_bindings.get("Ctrl+Z"), Some(&"undo".to_string()));
    }

    #[test]
    fn malformed_toml_is_reported_not_panicking() {
        let err = Config::from_toml_str("not = [valid toml").unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Config(_)));
    }
}
