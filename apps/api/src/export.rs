//! Per-resume JSON export offered from the dashboard list.

use serde::{Deserialize, Serialize};

use crate::models::resume::{Education, Experience, PersonalInfo, Resume, Skill};

/// The exported subset of a resume. Languages, hobbies, and the other
/// optional sections are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

impl From<&Resume> for ExportDocument {
    fn from(resume: &Resume) -> Self {
        Self {
            title: resume.title.clone(),
            personal_info: resume.personal_info.clone(),
            experience: resume.experience.clone(),
            education: resume.education.clone(),
            skills: resume.skills.clone(),
        }
    }
}

/// `<title>.json`, with every run of whitespace in the title replaced by `_`.
pub fn export_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + 5);
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str(".json");
    name
}
