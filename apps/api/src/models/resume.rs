use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ad-hoc personal details a user can switch on in the builder.
///
/// Declaration order is catalog order; the preview lists them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionalPersonalField {
    DateOfBirth,
    PlaceOfBirth,
    DriversLicense,
    Gender,
    Nationality,
    CivilStatus,
    Website,
    LinkedIn,
    CustomField,
}

impl OptionalPersonalField {
    pub const ALL: [OptionalPersonalField; 9] = [
        OptionalPersonalField::DateOfBirth,
        OptionalPersonalField::PlaceOfBirth,
        OptionalPersonalField::DriversLicense,
        OptionalPersonalField::Gender,
        OptionalPersonalField::Nationality,
        OptionalPersonalField::CivilStatus,
        OptionalPersonalField::Website,
        OptionalPersonalField::LinkedIn,
        OptionalPersonalField::CustomField,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OptionalPersonalField::DateOfBirth => "Date of birth",
            OptionalPersonalField::PlaceOfBirth => "Place of birth",
            OptionalPersonalField::DriversLicense => "Driver's license",
            OptionalPersonalField::Gender => "Gender",
            OptionalPersonalField::Nationality => "Nationality",
            OptionalPersonalField::CivilStatus => "Civil status",
            OptionalPersonalField::Website => "Website",
            OptionalPersonalField::LinkedIn => "LinkedIn",
            OptionalPersonalField::CustomField => "Custom field",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub post_code: String,
    pub country: String,
    /// Free-text profile summary.
    pub summary: String,
    pub desired_position: String,
    pub use_as_headline: bool,
    pub optional_fields: BTreeMap<OptionalPersonalField, String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    /// Ongoing position; the builder keeps `end_date` empty while set.
    pub current: bool,
    pub description: String,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            job_title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl Education {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            school: String::new(),
            degree: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }

    /// Parses the display name. Anything outside the fixed set is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Beginner" => Some(SkillLevel::Beginner),
            "Intermediate" => Some(SkillLevel::Intermediate),
            "Advanced" => Some(SkillLevel::Advanced),
            "Expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
}

impl Skill {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            level: SkillLevel::Beginner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub institution: String,
    pub date: String,
}

impl Course {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            institution: String::new(),
            date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

impl Reference {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            position: String::new(),
            company: String::new(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl Certificate {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
        }
    }
}

/// A saved resume. `id` and `created_at` never change once minted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub title: String,
    /// Template id, see [`crate::models::template::ResumeTemplate`].
    pub template: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
    #[serde(default)]
    pub signature: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resume {
    /// Copy of this resume under a new id and fresh timestamps.
    pub fn duplicate(&self) -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            title: format!("{} (Copy)", self.title),
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Resume {
        let now = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            title: "Backend".to_string(),
            template: "modern".to_string(),
            personal_info: PersonalInfo {
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                ..Default::default()
            },
            experience: vec![Experience::new()],
            education: vec![],
            skills: vec![Skill::new()],
            languages: vec!["English".to_string()],
            hobbies: vec![],
            courses: vec![],
            references: vec![],
            certificates: vec![],
            signature: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_duplicate_mints_new_identity() {
        let original = sample();
        let copy = original.duplicate();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.title, "Backend (Copy)");
        assert_eq!(copy.personal_info, original.personal_info);
        assert_eq!(copy.experience, original.experience);
        assert_eq!(copy.skills, original.skills);
        assert_eq!(copy.languages, original.languages);
        assert!(copy.created_at >= original.created_at);
    }

    #[test]
    fn test_skill_level_order_and_parse() {
        assert!(SkillLevel::Beginner < SkillLevel::Intermediate);
        assert!(SkillLevel::Advanced < SkillLevel::Expert);
        assert_eq!(SkillLevel::parse("Expert"), Some(SkillLevel::Expert));
        assert_eq!(SkillLevel::parse("expert"), None);
        assert_eq!(SkillLevel::Intermediate.as_str(), "Intermediate");
    }

    #[test]
    fn test_resume_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["personalInfo"]["firstName"], "Grace");
    }

    #[test]
    fn test_missing_supplemental_sections_default_empty() {
        let mut json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object_mut().unwrap();
        for key in ["languages", "hobbies", "courses", "references", "certificates", "signature"] {
            obj.remove(key);
        }
        let resume: Resume = serde_json::from_value(json).unwrap();
        assert!(resume.languages.is_empty());
        assert!(resume.courses.is_empty());
        assert!(resume.signature.is_empty());
    }

    #[test]
    fn test_optional_fields_keyed_by_catalog_name() {
        let mut info = PersonalInfo::default();
        info.optional_fields
            .insert(OptionalPersonalField::DriversLicense, "B".to_string());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["optionalFields"]["driversLicense"], "B");
        assert_eq!(OptionalPersonalField::DriversLicense.label(), "Driver's license");
    }
}
