//! Font descriptors for text-bearing graphics items.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Family/weight/style triple passed to the text-layout backend (Pango).
///
/// This is intentionally a plain data triple rather than a Pango handle so
/// that items stay `Send`/`Serialize` independent of any rendering context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FontDescriptor {
    pub family: String,
    #[serde(default = "default_weight")]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

const fn default_weight() -> FontWeight {
    FontWeight::Normal
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }
}

impl FontDescriptor {
    /// Renders the descriptor as a Pango font description string,
    /// e.g. `"Sans Bold Italic 14"` minus the size (callers append size).
    pub fn pango_family_string(&self) -> String {
        let mut s = self.family.clone();
        if self.weight == FontWeight::Bold {
            s.push_str(" Bold");
        }
        if self.style == FontStyle::Italic {
            s.push_str(" Italic");
        }
        s
    }

    /// Renders a full Pango font description string including size, e.g.
    /// `"Sans Bold 14"`, suitable for `pango::FontDescription::from_string`.
    pub fn to_pango_string(&self, size: f64) -> String {
        format!("{} {size}", self.pango_family_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_plain_sans() {
        let f = FontDescriptor::default();
        assert_eq!(f.pango_family_string(), "Sans");
    }

    #[test]
    fn bold_italic_appends_both() {
        let f = FontDescriptor {
            family: "Serif".into(),
            weight: FontWeight::Bold,
            style: FontStyle::Italic,
        };
        assert_eq!(f.pango_family_string(), "Serif Bold Italic");
    }
}
