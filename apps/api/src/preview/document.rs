use serde::Serialize;

use crate::builder::presentation::Presentation;
use crate::builder::Builder;
use crate::models::resume::{Education, Experience, OptionalPersonalField, PersonalInfo};

/// Where the builder serves the attached photo.
pub const PHOTO_URL: &str = "/api/v1/builder/photo";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDocument {
    pub template_id: String,
    pub style: PreviewStyle,
    pub header: PreviewHeader,
    pub personal: PersonalDetails,
    pub sections: Vec<PreviewSection>,
}

/// CSS-ready styling derived from the presentation preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewStyle {
    pub font_family: String,
    pub accent_color: String,
    pub font_size: String,
    pub font_weight: &'static str,
    pub font_style: &'static str,
    pub text_decoration: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewHeader {
    pub full_name: String,
    pub headline: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line: String,
    pub photo: Option<PreviewPhoto>,
    pub extras: Vec<PersonalExtra>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewPhoto {
    pub url: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalExtra {
    pub field: OptionalPersonalField,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub title: String,
    pub organization: String,
    pub location: Option<String>,
    pub dates: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillLine {
    pub name: String,
    pub level: &'static str,
}

/// A course or certificate line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditLine {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCard {
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PreviewSection {
    Profile { text: String },
    Employment { entries: Vec<TimelineEntry> },
    Education { entries: Vec<TimelineEntry> },
    Skills { skills: Vec<SkillLine> },
    Languages { chips: Vec<String> },
    Courses { items: Vec<CreditLine> },
    Certificates { items: Vec<CreditLine> },
    References { references: Vec<ReferenceCard> },
    Hobbies { chips: Vec<String> },
    Signature { text: String },
}

impl PreviewSection {
    pub fn heading(&self) -> &'static str {
        match self {
            PreviewSection::Profile { .. } => "Profile",
            PreviewSection::Employment { .. } => "Employment",
            PreviewSection::Education { .. } => "Education",
            PreviewSection::Skills { .. } => "Skills",
            PreviewSection::Languages { .. } => "Languages",
            PreviewSection::Courses { .. } => "Courses",
            PreviewSection::Certificates { .. } => "Certificates",
            PreviewSection::References { .. } => "References",
            PreviewSection::Hobbies { .. } => "Hobbies",
            PreviewSection::Signature { .. } => "Signature",
        }
    }
}

/// Projects the builder's current draft, view state, and presentation
/// preferences into a renderable document.
///
/// Inclusion rules:
/// - the personal block always carries name, email, phone and address line;
///   optional fields appear only when toggled on and non-empty
/// - a collection section appears only when the collection is non-empty;
///   languages and hobbies additionally need one non-blank element, and
///   blank elements are left out of the chips
/// - ongoing experience/education shows "Present" as its end date
/// - profile and signature appear only when non-empty
pub fn render_preview(builder: &Builder) -> PreviewDocument {
    let draft = builder.draft();
    let view = builder.view();
    let info = &draft.personal_info;

    let headline = (info.use_as_headline && !info.desired_position.is_empty())
        .then(|| info.desired_position.clone());

    let extras = OptionalPersonalField::ALL
        .iter()
        .filter(|field| view.visible_optional_fields.contains(*field))
        .filter_map(|field| {
            info.optional_fields
                .get(field)
                .filter(|value| !value.is_empty())
                .map(|value| PersonalExtra {
                    field: *field,
                    label: field.label(),
                    value: value.clone(),
                })
        })
        .collect();

    let personal = PersonalDetails {
        name: info.full_name(),
        email: info.email.clone(),
        phone: info.phone.clone(),
        address_line: address_line(info),
        photo: builder.photo().map(|p| PreviewPhoto {
            url: PHOTO_URL.to_string(),
            content_type: p.content_type.clone(),
        }),
        extras,
    };

    let mut sections = Vec::new();

    if !info.summary.is_empty() {
        sections.push(PreviewSection::Profile {
            text: info.summary.clone(),
        });
    }
    if !draft.experience.is_empty() {
        sections.push(PreviewSection::Employment {
            entries: draft.experience.iter().map(experience_entry).collect(),
        });
    }
    if !draft.education.is_empty() {
        sections.push(PreviewSection::Education {
            entries: draft.education.iter().map(education_entry).collect(),
        });
    }
    if !draft.skills.is_empty() {
        sections.push(PreviewSection::Skills {
            skills: draft
                .skills
                .iter()
                .map(|s| SkillLine {
                    name: s.name.clone(),
                    level: s.level.as_str(),
                })
                .collect(),
        });
    }
    if let Some(chips) = non_blank_chips(&draft.languages) {
        sections.push(PreviewSection::Languages { chips });
    }
    if !draft.courses.is_empty() {
        sections.push(PreviewSection::Courses {
            items: draft
                .courses
                .iter()
                .map(|c| CreditLine {
                    name: c.name.clone(),
                    issuer: c.institution.clone(),
                    date: c.date.clone(),
                })
                .collect(),
        });
    }
    if !draft.certificates.is_empty() {
        sections.push(PreviewSection::Certificates {
            items: draft
                .certificates
                .iter()
                .map(|c| CreditLine {
                    name: c.name.clone(),
                    issuer: c.issuer.clone(),
                    date: c.date.clone(),
                })
                .collect(),
        });
    }
    if !draft.references.is_empty() {
        sections.push(PreviewSection::References {
            references: draft
                .references
                .iter()
                .map(|r| ReferenceCard {
                    name: r.name.clone(),
                    position: r.position.clone(),
                    company: r.company.clone(),
                    email: r.email.clone(),
                    phone: r.phone.clone(),
                })
                .collect(),
        });
    }
    if let Some(chips) = non_blank_chips(&draft.hobbies) {
        sections.push(PreviewSection::Hobbies { chips });
    }
    if !draft.signature.is_empty() {
        sections.push(PreviewSection::Signature {
            text: draft.signature.clone(),
        });
    }

    PreviewDocument {
        template_id: builder.template().id.clone(),
        style: style(builder.presentation()),
        header: PreviewHeader {
            full_name: info.full_name(),
            headline,
        },
        personal,
        sections,
    }
}

fn style(p: &Presentation) -> PreviewStyle {
    PreviewStyle {
        font_family: p.selected_font.clone(),
        accent_color: p.accent_hex(),
        font_size: p.font_size.clone(),
        font_weight: if p.bold { "bold" } else { "normal" },
        font_style: if p.italic { "italic" } else { "normal" },
        text_decoration: if p.underline { "underline" } else { "none" },
    }
}

/// `address[, postCode] city`
fn address_line(info: &PersonalInfo) -> String {
    let mut line = info.address.clone();
    if !info.post_code.is_empty() {
        line.push_str(", ");
        line.push_str(&info.post_code);
    }
    line.push(' ');
    line.push_str(&info.city);
    line.trim().to_string()
}

fn date_range(start: &str, end: &str, current: bool) -> String {
    format!("{} - {}", start, if current { "Present" } else { end })
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn experience_entry(e: &Experience) -> TimelineEntry {
    TimelineEntry {
        title: e.job_title.clone(),
        organization: e.company.clone(),
        location: non_empty(&e.location),
        dates: date_range(&e.start_date, &e.end_date, e.current),
        description: non_empty(&e.description),
    }
}

fn education_entry(e: &Education) -> TimelineEntry {
    TimelineEntry {
        title: e.degree.clone(),
        organization: e.school.clone(),
        location: non_empty(&e.location),
        dates: date_range(&e.start_date, &e.end_date, e.current),
        description: non_empty(&e.description),
    }
}

fn non_blank_chips(items: &[String]) -> Option<Vec<String>> {
    let chips: Vec<String> = items
        .iter()
        .filter(|item| !item.trim().is_empty())
        .cloned()
        .collect();
    (!chips.is_empty()).then_some(chips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fields::{EntryCollection, EntryField, PersonalField};
    use crate::builder::presentation::PresentationUpdate;
    use crate::builder::session::PhotoUpload;
    use crate::models::template::resolve_template;
    use bytes::Bytes;

    fn builder() -> Builder {
        Builder::new(resolve_template("modern"))
    }

    fn headings(doc: &PreviewDocument) -> Vec<&'static str> {
        doc.sections.iter().map(PreviewSection::heading).collect()
    }

    #[test]
    fn test_blank_draft_renders_personal_block_only() {
        let doc = render_preview(&builder());
        assert!(doc.sections.is_empty());
        assert_eq!(doc.personal.name, " ");
        assert_eq!(doc.personal.address_line, "");
        assert!(doc.personal.extras.is_empty());
        assert!(doc.header.headline.is_none());
    }

    #[test]
    fn test_language_filter_keeps_collection_intact() {
        let mut b = builder();
        for value in ["", "English", "  "] {
            let i = b.add_entry(EntryCollection::Languages);
            b.update_entry_field(EntryCollection::Languages, i, EntryField::Text, value);
        }
        let doc = render_preview(&b);
        assert_eq!(
            doc.sections,
            vec![PreviewSection::Languages {
                chips: vec!["English".to_string()]
            }]
        );
        assert_eq!(b.draft().languages.len(), 3);
    }

    #[test]
    fn test_blank_hobbies_render_nothing() {
        let mut b = builder();
        b.add_entry(EntryCollection::Hobbies);
        b.add_entry(EntryCollection::Hobbies);
        b.update_entry_field(EntryCollection::Hobbies, 1, EntryField::Text, " \t");
        assert!(render_preview(&b).sections.is_empty());
    }

    #[test]
    fn test_present_replaces_end_date() {
        let mut b = builder();
        b.add_entry(EntryCollection::Experience);
        b.update_entry_field(EntryCollection::Experience, 0, EntryField::StartDate, "2021");
        b.set_current_flag(EntryCollection::Experience, 0, true);
        // The type does not stop an end date from being typed afterwards.
        b.update_entry_field(EntryCollection::Experience, 0, EntryField::EndDate, "2023");
        b.add_entry(EntryCollection::Education);
        b.update_entry_field(EntryCollection::Education, 0, EntryField::StartDate, "2015");
        b.update_entry_field(EntryCollection::Education, 0, EntryField::EndDate, "2019");

        let doc = render_preview(&b);
        match &doc.sections[..] {
            [PreviewSection::Employment { entries: exp }, PreviewSection::Education { entries: edu }] =>
            {
                assert_eq!(exp[0].dates, "2021 - Present");
                assert_eq!(edu[0].dates, "2015 - 2019");
            }
            other => panic!("unexpected sections {other:?}"),
        }
    }

    #[test]
    fn test_empty_entries_still_render_section() {
        let mut b = builder();
        b.add_entry(EntryCollection::Courses);
        b.add_entry(EntryCollection::References);
        b.add_entry(EntryCollection::Certificates);
        b.add_entry(EntryCollection::Skills);
        assert_eq!(
            headings(&render_preview(&b)),
            vec!["Skills", "Courses", "Certificates", "References"]
        );
    }

    #[test]
    fn test_section_order() {
        let mut b = builder();
        b.set_signature("Kind regards");
        b.add_entry(EntryCollection::Hobbies);
        b.update_entry_field(EntryCollection::Hobbies, 0, EntryField::Text, "Rowing");
        b.add_entry(EntryCollection::Education);
        b.add_entry(EntryCollection::Experience);
        b.set_personal_field(PersonalField::Summary, "Engineer.");
        assert_eq!(
            headings(&render_preview(&b)),
            vec!["Profile", "Employment", "Education", "Hobbies", "Signature"]
        );
    }

    #[test]
    fn test_optional_fields_need_toggle_and_value() {
        let mut b = builder();
        b.set_optional_personal_value(OptionalPersonalField::Website, "https://ada.dev");
        b.toggle_optional_personal_field(OptionalPersonalField::Gender);
        assert!(render_preview(&b).personal.extras.is_empty());

        b.toggle_optional_personal_field(OptionalPersonalField::Website);
        b.set_optional_personal_value(OptionalPersonalField::DateOfBirth, "1815-12-10");
        b.toggle_optional_personal_field(OptionalPersonalField::DateOfBirth);

        let extras = render_preview(&b).personal.extras;
        let labels: Vec<&str> = extras.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Date of birth", "Website"]);
    }

    #[test]
    fn test_address_line_with_and_without_post_code() {
        let mut b = builder();
        b.set_personal_field(PersonalField::Address, "12 St James's Square");
        b.set_personal_field(PersonalField::City, "London");
        assert_eq!(
            render_preview(&b).personal.address_line,
            "12 St James's Square London"
        );
        b.set_personal_field(PersonalField::PostCode, "SW1Y 4JH");
        assert_eq!(
            render_preview(&b).personal.address_line,
            "12 St James's Square, SW1Y 4JH London"
        );
    }

    #[test]
    fn test_headline_requires_flag_and_position() {
        let mut b = builder();
        b.set_personal_field(PersonalField::DesiredPosition, "Analyst");
        assert!(render_preview(&b).header.headline.is_none());
        b.set_use_as_headline(true);
        assert_eq!(render_preview(&b).header.headline.as_deref(), Some("Analyst"));
        b.set_personal_field(PersonalField::DesiredPosition, "");
        assert!(render_preview(&b).header.headline.is_none());
    }

    #[test]
    fn test_style_follows_presentation() {
        let mut b = builder();
        b.set_presentation(PresentationUpdate {
            selected_font: Some("Georgia".to_string()),
            selected_color: Some("green".to_string()),
            italic: Some(true),
            underline: Some(true),
            ..Default::default()
        });
        let style = render_preview(&b).style;
        assert_eq!(style.font_family, "Georgia");
        assert_eq!(style.accent_color, "#10B981");
        assert_eq!(style.font_weight, "normal");
        assert_eq!(style.font_style, "italic");
        assert_eq!(style.text_decoration, "underline");
    }

    #[test]
    fn test_photo_reference() {
        let mut b = builder();
        assert!(render_preview(&b).personal.photo.is_none());
        b.attach_photo(PhotoUpload {
            file_name: "me.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from_static(b"jpeg"),
        });
        let photo = render_preview(&b).personal.photo.unwrap();
        assert_eq!(photo.url, PHOTO_URL);
        assert_eq!(photo.content_type, "image/jpeg");
    }

    #[test]
    fn test_sections_serialize_with_kind_tag() {
        let json = serde_json::to_value(PreviewSection::Languages {
            chips: vec!["English".to_string()],
        })
        .unwrap();
        assert_eq!(json["kind"], "languages");
        assert_eq!(json["chips"][0], "English");
    }
}
