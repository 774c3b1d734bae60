use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Collapsible groups of the builder form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Personal,
    Education,
    Employment,
    Skills,
    Languages,
    Hobbies,
    Profile,
    Courses,
    Internships,
    Extracurricular,
    References,
    Qualities,
    Certificates,
    Achievements,
    Signature,
    Footer,
}

impl SectionKey {
    pub const ALL: [SectionKey; 16] = [
        SectionKey::Personal,
        SectionKey::Education,
        SectionKey::Employment,
        SectionKey::Skills,
        SectionKey::Languages,
        SectionKey::Hobbies,
        SectionKey::Profile,
        SectionKey::Courses,
        SectionKey::Internships,
        SectionKey::Extracurricular,
        SectionKey::References,
        SectionKey::Qualities,
        SectionKey::Certificates,
        SectionKey::Achievements,
        SectionKey::Signature,
        SectionKey::Footer,
    ];
}

/// Expand/collapse flags. Presentational only; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionVisibility {
    expanded: BTreeSet<SectionKey>,
}

impl Default for SectionVisibility {
    /// Only the personal section starts expanded.
    fn default() -> Self {
        Self {
            expanded: BTreeSet::from([SectionKey::Personal]),
        }
    }
}

impl SectionVisibility {
    pub fn is_expanded(&self, section: SectionKey) -> bool {
        self.expanded.contains(&section)
    }

    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, section: SectionKey) -> bool {
        if !self.expanded.remove(&section) {
            self.expanded.insert(section);
            return true;
        }
        false
    }

    pub fn expand(&mut self, section: SectionKey) {
        self.expanded.insert(section);
    }
}

impl Serialize for SectionVisibility {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SectionKey::ALL.len()))?;
        for section in SectionKey::ALL {
            map.serialize_entry(&section, &self.is_expanded(section))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expands_personal_only() {
        let v = SectionVisibility::default();
        assert!(v.is_expanded(SectionKey::Personal));
        assert!(SectionKey::ALL[1..].iter().all(|s| !v.is_expanded(*s)));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut v = SectionVisibility::default();
        assert!(v.toggle(SectionKey::Courses));
        assert!(v.is_expanded(SectionKey::Courses));
        assert!(!v.toggle(SectionKey::Courses));
        assert_eq!(v, SectionVisibility::default());
    }

    #[test]
    fn test_expand_is_idempotent() {
        let mut v = SectionVisibility::default();
        v.expand(SectionKey::Signature);
        v.expand(SectionKey::Signature);
        assert!(v.is_expanded(SectionKey::Signature));
    }

    #[test]
    fn test_serializes_every_section() {
        let json = serde_json::to_value(SectionVisibility::default()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), SectionKey::ALL.len());
        assert_eq!(map["personal"], true);
        assert_eq!(map["extracurricular"], false);
    }
}
