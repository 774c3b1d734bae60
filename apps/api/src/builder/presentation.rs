//! Styling preferences for the preview. Never written to the stored resume.

use serde::{Deserialize, Serialize};

/// Fonts offered by the font picker.
pub const SUGGESTED_FONTS: &[&str] = &["Inter", "Arial", "Times New Roman", "Georgia", "Verdana"];

/// Accent colors offered by the color picker, with their swatch values.
pub const ACCENT_COLORS: &[(&str, &str)] = &[
    ("blue", "#3B82F6"),
    ("green", "#10B981"),
    ("purple", "#8B5CF6"),
    ("red", "#EF4444"),
    ("orange", "#F59E0B"),
    ("gray", "#6B7280"),
];

pub const FONT_SIZES: &[&str] = &["12px", "14px", "16px", "18px", "20px", "24px"];

const FALLBACK_ACCENT: &str = "#6B7280";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub selected_font: String,
    pub selected_color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: String,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            selected_font: "Inter".to_string(),
            selected_color: "blue".to_string(),
            bold: false,
            italic: false,
            underline: false,
            font_size: "16px".to_string(),
        }
    }
}

/// A partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationUpdate {
    pub selected_font: Option<String>,
    pub selected_color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<String>,
}

impl Presentation {
    /// Merges `update` in. Values outside the suggested catalogs are kept as given.
    pub fn apply(&mut self, update: PresentationUpdate) {
        if let Some(font) = update.selected_font {
            self.selected_font = font;
        }
        if let Some(color) = update.selected_color {
            self.selected_color = color;
        }
        if let Some(bold) = update.bold {
            self.bold = bold;
        }
        if let Some(italic) = update.italic {
            self.italic = italic;
        }
        if let Some(underline) = update.underline {
            self.underline = underline;
        }
        if let Some(size) = update.font_size {
            self.font_size = size;
        }
    }

    /// CSS color for the preview accent.
    pub fn accent_hex(&self) -> String {
        accent_hex(&self.selected_color)
    }
}

/// Resolves a catalog color name to its swatch. `#`-prefixed custom colors
/// pass through; anything else falls back to gray.
pub fn accent_hex(color: &str) -> String {
    if color.starts_with('#') {
        return color.to_string();
    }
    ACCENT_COLORS
        .iter()
        .find(|(name, _)| *name == color)
        .map(|(_, hex)| hex.to_string())
        .unwrap_or_else(|| FALLBACK_ACCENT.to_string())
}

/// Formatting dropdowns in the preview toolbar. At most one is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dropdown {
    Font,
    Format,
    Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Presentation::default();
        assert_eq!(p.selected_font, "Inter");
        assert_eq!(p.selected_color, "blue");
        assert_eq!(p.font_size, "16px");
        assert!(!p.bold && !p.italic && !p.underline);
    }

    #[test]
    fn test_partial_update_touches_only_given_fields() {
        let mut p = Presentation::default();
        p.apply(PresentationUpdate {
            bold: Some(true),
            font_size: Some("20px".to_string()),
            ..Default::default()
        });
        assert!(p.bold);
        assert_eq!(p.font_size, "20px");
        assert_eq!(p.selected_font, "Inter");
        assert!(!p.italic);
    }

    #[test]
    fn test_values_outside_catalog_are_accepted() {
        let mut p = Presentation::default();
        p.apply(PresentationUpdate {
            selected_font: Some("Comic Sans MS".to_string()),
            selected_color: Some("teal".to_string()),
            ..Default::default()
        });
        assert_eq!(p.selected_font, "Comic Sans MS");
        assert_eq!(p.selected_color, "teal");
        assert!(!SUGGESTED_FONTS.contains(&p.selected_font.as_str()));
    }

    #[test]
    fn test_accent_hex_resolution() {
        assert_eq!(accent_hex("purple"), "#8B5CF6");
        assert_eq!(accent_hex("#112233"), "#112233");
        assert_eq!(accent_hex("teal"), FALLBACK_ACCENT);
    }

    #[test]
    fn test_update_deserializes_from_partial_json() {
        let update: PresentationUpdate =
            serde_json::from_str(r#"{"selectedColor":"green","underline":true}"#).unwrap();
        assert_eq!(update.selected_color.as_deref(), Some("green"));
        assert_eq!(update.underline, Some(true));
        assert!(update.selected_font.is_none());
    }
}
