//! Addressable fields of the draft: personal attributes, repeated-entry
//! collections, and the per-entry fields those collections carry.

use serde::{Deserialize, Serialize};

use crate::builder::sections::SectionKey;
use crate::models::resume::{
    Certificate, Course, Education, Experience, PersonalInfo, Reference, Skill, SkillLevel,
};

/// String attributes of [`PersonalInfo`] editable from the personal section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    PostCode,
    Country,
    Summary,
    DesiredPosition,
}

impl PersonalField {
    pub fn slot<'a>(&self, info: &'a mut PersonalInfo) -> &'a mut String {
        match self {
            PersonalField::FirstName => &mut info.first_name,
            PersonalField::LastName => &mut info.last_name,
            PersonalField::Email => &mut info.email,
            PersonalField::Phone => &mut info.phone,
            PersonalField::Address => &mut info.address,
            PersonalField::City => &mut info.city,
            PersonalField::PostCode => &mut info.post_code,
            PersonalField::Country => &mut info.country,
            PersonalField::Summary => &mut info.summary,
            PersonalField::DesiredPosition => &mut info.desired_position,
        }
    }
}

/// The repeated-entry collections of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryCollection {
    Experience,
    Education,
    Skills,
    Languages,
    Hobbies,
    Courses,
    References,
    Certificates,
}

impl EntryCollection {
    /// The builder section that hosts this collection's form.
    pub fn section(&self) -> SectionKey {
        match self {
            EntryCollection::Experience => SectionKey::Employment,
            EntryCollection::Education => SectionKey::Education,
            EntryCollection::Skills => SectionKey::Skills,
            EntryCollection::Languages => SectionKey::Languages,
            EntryCollection::Hobbies => SectionKey::Hobbies,
            EntryCollection::Courses => SectionKey::Courses,
            EntryCollection::References => SectionKey::References,
            EntryCollection::Certificates => SectionKey::Certificates,
        }
    }
}

/// A field of one collection element. `Text` addresses the plain string
/// elements of the languages and hobbies collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryField {
    JobTitle,
    Company,
    School,
    Degree,
    Location,
    StartDate,
    EndDate,
    Description,
    Name,
    Level,
    Institution,
    Issuer,
    Date,
    Position,
    Email,
    Phone,
    Text,
}

// Each `apply_*` returns false when the element has no such field, leaving
// it untouched.

pub(crate) fn apply_experience(entry: &mut Experience, field: EntryField, value: String) -> bool {
    let slot = match field {
        EntryField::JobTitle => &mut entry.job_title,
        EntryField::Company => &mut entry.company,
        EntryField::Location => &mut entry.location,
        EntryField::StartDate => &mut entry.start_date,
        EntryField::EndDate => &mut entry.end_date,
        EntryField::Description => &mut entry.description,
        _ => return false,
    };
    *slot = value;
    true
}

pub(crate) fn apply_education(entry: &mut Education, field: EntryField, value: String) -> bool {
    let slot = match field {
        EntryField::School => &mut entry.school,
        EntryField::Degree => &mut entry.degree,
        EntryField::Location => &mut entry.location,
        EntryField::StartDate => &mut entry.start_date,
        EntryField::EndDate => &mut entry.end_date,
        EntryField::Description => &mut entry.description,
        _ => return false,
    };
    *slot = value;
    true
}

pub(crate) fn apply_skill(entry: &mut Skill, field: EntryField, value: String) -> bool {
    match field {
        EntryField::Name => {
            entry.name = value;
            true
        }
        EntryField::Level => match SkillLevel::parse(&value) {
            Some(level) => {
                entry.level = level;
                true
            }
            None => false,
        },
        _ => false,
    }
}

pub(crate) fn apply_text(entry: &mut String, field: EntryField, value: String) -> bool {
    if field != EntryField::Text {
        return false;
    }
    *entry = value;
    true
}

pub(crate) fn apply_course(entry: &mut Course, field: EntryField, value: String) -> bool {
    let slot = match field {
        EntryField::Name => &mut entry.name,
        EntryField::Institution => &mut entry.institution,
        EntryField::Date => &mut entry.date,
        _ => return false,
    };
    *slot = value;
    true
}

pub(crate) fn apply_reference(entry: &mut Reference, field: EntryField, value: String) -> bool {
    let slot = match field {
        EntryField::Name => &mut entry.name,
        EntryField::Position => &mut entry.position,
        EntryField::Company => &mut entry.company,
        EntryField::Email => &mut entry.email,
        EntryField::Phone => &mut entry.phone,
        _ => return false,
    };
    *slot = value;
    true
}

pub(crate) fn apply_certificate(entry: &mut Certificate, field: EntryField, value: String) -> bool {
    let slot = match field {
        EntryField::Name => &mut entry.name,
        EntryField::Issuer => &mut entry.issuer,
        EntryField::Date => &mut entry.date,
        _ => return false,
    };
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_on_the_wire() {
        let field: EntryField = serde_json::from_str("\"jobTitle\"").unwrap();
        assert_eq!(field, EntryField::JobTitle);
        let collection: EntryCollection = serde_json::from_str("\"certificates\"").unwrap();
        assert_eq!(collection, EntryCollection::Certificates);
        let personal: PersonalField = serde_json::from_str("\"postCode\"").unwrap();
        assert_eq!(personal, PersonalField::PostCode);
    }

    #[test]
    fn test_experience_rejects_foreign_field() {
        let mut entry = Experience::new();
        assert!(!apply_experience(&mut entry, EntryField::School, "MIT".to_string()));
        assert!(apply_experience(&mut entry, EntryField::Company, "Acme".to_string()));
        assert_eq!(entry.company, "Acme");
    }

    #[test]
    fn test_skill_level_outside_fixed_set_is_ignored() {
        let mut skill = Skill::new();
        assert!(!apply_skill(&mut skill, EntryField::Level, "Guru".to_string()));
        assert_eq!(skill.level, SkillLevel::Beginner);
        assert!(apply_skill(&mut skill, EntryField::Level, "Advanced".to_string()));
        assert_eq!(skill.level, SkillLevel::Advanced);
    }

    #[test]
    fn test_text_elements_only_accept_text_field() {
        let mut language = String::new();
        assert!(!apply_text(&mut language, EntryField::Name, "French".to_string()));
        assert!(apply_text(&mut language, EntryField::Text, "French".to_string()));
        assert_eq!(language, "French");
    }

    #[test]
    fn test_collections_map_to_sections() {
        assert_eq!(EntryCollection::Experience.section(), SectionKey::Employment);
        assert_eq!(EntryCollection::Hobbies.section(), SectionKey::Hobbies);
    }
}
