use serde::{Deserialize, Serialize};

/// A visual template offered in the template picker. Descriptive only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub preview: String,
    /// Accent color tag shown on the picker card.
    pub color: String,
}

/// Color tag used for templates that are not in the catalog.
const FALLBACK_COLOR: &str = "bg-blue-500";

const CATALOG: &[(&str, &str, &str, &str, &str)] = &[
    (
        "modern",
        "Modern",
        "Clean and contemporary design",
        "/images/modern_cng.PNG",
        "bg-blue-500",
    ),
    (
        "classic",
        "Classic",
        "Traditional professional layout",
        "/images/traditional_cng.PNG",
        "bg-gray-600",
    ),
    (
        "creative",
        "Creative",
        "Bold and eye-catching design",
        "/images/creative_cng.PNG",
        "bg-purple-500",
    ),
    (
        "minimal",
        "Minimal",
        "Simple and elegant layout",
        "/images/minimal_cng.PNG",
        "bg-green-500",
    ),
];

/// All templates offered by the picker, in display order.
pub fn template_catalog() -> Vec<ResumeTemplate> {
    CATALOG
        .iter()
        .map(|(id, name, description, preview, color)| ResumeTemplate {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            preview: preview.to_string(),
            color: color.to_string(),
        })
        .collect()
}

pub fn find_template(id: &str) -> Option<ResumeTemplate> {
    template_catalog().into_iter().find(|t| t.id == id)
}

/// Resolves a stored template id. Ids that are no longer in the catalog
/// still open the builder under a stub named after the id.
pub fn resolve_template(id: &str) -> ResumeTemplate {
    find_template(id).unwrap_or_else(|| ResumeTemplate {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        preview: String::new(),
        color: FALLBACK_COLOR.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_templates() {
        let ids: Vec<String> = template_catalog().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["modern", "classic", "creative", "minimal"]);
    }

    #[test]
    fn test_resolve_known_template() {
        let t = resolve_template("creative");
        assert_eq!(t.name, "Creative");
        assert_eq!(t.color, "bg-purple-500");
    }

    #[test]
    fn test_resolve_unknown_template_builds_stub() {
        let t = resolve_template("retro");
        assert_eq!(t.id, "retro");
        assert_eq!(t.name, "retro");
        assert!(t.description.is_empty());
        assert_eq!(t.color, FALLBACK_COLOR);
    }
}
