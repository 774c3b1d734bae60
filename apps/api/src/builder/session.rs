use std::collections::BTreeSet;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::builder::fields::{
    apply_certificate, apply_course, apply_education, apply_experience, apply_reference,
    apply_skill, apply_text, EntryCollection, EntryField, PersonalField,
};
use crate::builder::presentation::{Dropdown, Presentation, PresentationUpdate};
use crate::builder::sections::{SectionKey, SectionVisibility};
use crate::models::resume::{
    Certificate, Course, Education, Experience, OptionalPersonalField, PersonalInfo, Reference,
    Resume, Skill,
};
use crate::models::template::ResumeTemplate;

/// Shown after a resume document upload. Uploaded documents are not parsed.
pub const RESUME_UPLOAD_ACK: &str =
    "Resume uploaded successfully! Please fill in the details below.";

/// Resume content being edited. Becomes a [`Resume`] on commit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDraft {
    pub title: String,
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<String>,
    pub hobbies: Vec<String>,
    pub courses: Vec<Course>,
    pub references: Vec<Reference>,
    pub certificates: Vec<Certificate>,
    pub signature: String,
}

impl ResumeDraft {
    fn from_resume(resume: &Resume) -> Self {
        Self {
            title: resume.title.clone(),
            personal_info: resume.personal_info.clone(),
            experience: resume.experience.clone(),
            education: resume.education.clone(),
            skills: resume.skills.clone(),
            languages: resume.languages.clone(),
            hobbies: resume.hobbies.clone(),
            courses: resume.courses.clone(),
            references: resume.references.clone(),
            certificates: resume.certificates.clone(),
            signature: resume.signature.clone(),
        }
    }
}

/// A photo picked in the builder. Held in memory only, never persisted.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSummary {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: usize,
}

impl PhotoUpload {
    pub fn summary(&self) -> PhotoSummary {
        PhotoSummary {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size_bytes: self.data.len(),
        }
    }
}

/// Transient UI state of the builder, kept apart from resume content.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderView {
    pub sections: SectionVisibility,
    pub visible_optional_fields: BTreeSet<OptionalPersonalField>,
    pub open_dropdown: Option<Dropdown>,
    #[serde(skip)]
    pub photo: Option<PhotoUpload>,
}

#[derive(Debug, Clone, Copy)]
struct StoredIdentity {
    id: Uuid,
    created_at: DateTime<Utc>,
}

/// Serializable view of a builder session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSnapshot<'a> {
    pub template: &'a ResumeTemplate,
    pub editing_id: Option<Uuid>,
    pub draft: &'a ResumeDraft,
    pub view: &'a BuilderView,
    pub presentation: &'a Presentation,
    pub photo: Option<PhotoSummary>,
}

/// One open builder session: a draft, its view state, and the preview styling.
///
/// Every mutation addresses a single field or a single collection element.
/// Nothing here fails; requests that address nothing are ignored.
#[derive(Debug, Clone)]
pub struct Builder {
    template: ResumeTemplate,
    existing: Option<StoredIdentity>,
    draft: ResumeDraft,
    view: BuilderView,
    presentation: Presentation,
}

impl Builder {
    /// A blank draft for a new resume.
    pub fn new(template: ResumeTemplate) -> Self {
        Self {
            template,
            existing: None,
            draft: ResumeDraft::default(),
            view: BuilderView::default(),
            presentation: Presentation::default(),
        }
    }

    /// A draft seeded from a stored resume. Optional personal fields that
    /// already hold a value start out visible.
    pub fn from_resume(template: ResumeTemplate, resume: &Resume) -> Self {
        let visible_optional_fields = resume
            .personal_info
            .optional_fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, _)| *field)
            .collect();

        Self {
            template,
            existing: Some(StoredIdentity {
                id: resume.id,
                created_at: resume.created_at,
            }),
            draft: ResumeDraft::from_resume(resume),
            view: BuilderView {
                visible_optional_fields,
                ..Default::default()
            },
            presentation: Presentation::default(),
        }
    }

    pub fn template(&self) -> &ResumeTemplate {
        &self.template
    }

    pub fn draft(&self) -> &ResumeDraft {
        &self.draft
    }

    pub fn view(&self) -> &BuilderView {
        &self.view
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Id of the stored resume being edited; `None` for a new resume.
    pub fn editing_id(&self) -> Option<Uuid> {
        self.existing.map(|e| e.id)
    }

    pub fn photo(&self) -> Option<&PhotoUpload> {
        self.view.photo.as_ref()
    }

    pub fn snapshot(&self) -> BuilderSnapshot<'_> {
        BuilderSnapshot {
            template: &self.template,
            editing_id: self.editing_id(),
            draft: &self.draft,
            view: &self.view,
            presentation: &self.presentation,
            photo: self.photo().map(PhotoUpload::summary),
        }
    }

    // ── Content ──────────────────────────────────────────────────────────

    /// No format checks: any string is stored as given.
    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        *field.slot(&mut self.draft.personal_info) = value.into();
        debug!("Set personal field {field:?}");
    }

    pub fn set_use_as_headline(&mut self, use_as_headline: bool) {
        self.draft.personal_info.use_as_headline = use_as_headline;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_signature(&mut self, signature: impl Into<String>) {
        self.draft.signature = signature.into();
    }

    /// Appends a blank element with a fresh id and expands its section.
    /// Returns the new element's index.
    pub fn add_entry(&mut self, collection: EntryCollection) -> usize {
        let d = &mut self.draft;
        let len = match collection {
            EntryCollection::Experience => push_len(&mut d.experience, Experience::new()),
            EntryCollection::Education => push_len(&mut d.education, Education::new()),
            EntryCollection::Skills => push_len(&mut d.skills, Skill::new()),
            EntryCollection::Languages => push_len(&mut d.languages, String::new()),
            EntryCollection::Hobbies => push_len(&mut d.hobbies, String::new()),
            EntryCollection::Courses => push_len(&mut d.courses, Course::new()),
            EntryCollection::References => push_len(&mut d.references, Reference::new()),
            EntryCollection::Certificates => push_len(&mut d.certificates, Certificate::new()),
        };
        self.view.sections.expand(collection.section());
        debug!("Added {collection:?} entry #{}", len - 1);
        len - 1
    }

    /// Replaces one field of the element at `index`.
    ///
    /// Returns false, changing nothing, when `index` is out of bounds or the
    /// collection's elements have no such field.
    pub fn update_entry_field(
        &mut self,
        collection: EntryCollection,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> bool {
        let value = value.into();
        let d = &mut self.draft;
        let applied = match collection {
            EntryCollection::Experience => {
                update_at(&mut d.experience, index, |e| apply_experience(e, field, value))
            }
            EntryCollection::Education => {
                update_at(&mut d.education, index, |e| apply_education(e, field, value))
            }
            EntryCollection::Skills => {
                update_at(&mut d.skills, index, |e| apply_skill(e, field, value))
            }
            EntryCollection::Languages => {
                update_at(&mut d.languages, index, |e| apply_text(e, field, value))
            }
            EntryCollection::Hobbies => {
                update_at(&mut d.hobbies, index, |e| apply_text(e, field, value))
            }
            EntryCollection::Courses => {
                update_at(&mut d.courses, index, |e| apply_course(e, field, value))
            }
            EntryCollection::References => {
                update_at(&mut d.references, index, |e| apply_reference(e, field, value))
            }
            EntryCollection::Certificates => {
                update_at(&mut d.certificates, index, |e| apply_certificate(e, field, value))
            }
        };
        if !applied {
            debug!("Ignored {field:?} update on {collection:?}[{index}]");
        }
        applied
    }

    /// Marks an experience or education entry as ongoing. Setting the flag
    /// clears the entry's end date; clearing it leaves the end date alone.
    pub fn set_current_flag(
        &mut self,
        collection: EntryCollection,
        index: usize,
        is_current: bool,
    ) -> bool {
        let slot = match collection {
            EntryCollection::Experience => self
                .draft
                .experience
                .get_mut(index)
                .map(|e| (&mut e.current, &mut e.end_date)),
            EntryCollection::Education => self
                .draft
                .education
                .get_mut(index)
                .map(|e| (&mut e.current, &mut e.end_date)),
            _ => None,
        };
        match slot {
            Some((current, end_date)) => {
                *current = is_current;
                if is_current {
                    end_date.clear();
                }
                true
            }
            None => {
                debug!("Ignored current flag on {collection:?}[{index}]");
                false
            }
        }
    }

    /// Writes an optional personal field. An empty value removes it.
    pub fn set_optional_personal_value(
        &mut self,
        field: OptionalPersonalField,
        value: impl Into<String>,
    ) {
        let value = value.into();
        let fields = &mut self.draft.personal_info.optional_fields;
        if value.is_empty() {
            fields.remove(&field);
        } else {
            fields.insert(field, value);
        }
    }

    // ── View state ───────────────────────────────────────────────────────

    pub fn toggle_section_expanded(&mut self, section: SectionKey) -> bool {
        self.view.sections.toggle(section)
    }

    /// Picking a section from the "add section" menu always expands it.
    pub fn open_section(&mut self, section: SectionKey) {
        self.view.sections.expand(section);
    }

    /// Flips visibility of an optional personal field; its value is kept
    /// either way. Returns the new visibility.
    pub fn toggle_optional_personal_field(&mut self, field: OptionalPersonalField) -> bool {
        let visible = &mut self.view.visible_optional_fields;
        if !visible.remove(&field) {
            visible.insert(field);
            return true;
        }
        false
    }

    pub fn set_presentation(&mut self, update: PresentationUpdate) {
        self.presentation.apply(update);
        debug!("Presentation now {:?}", self.presentation);
    }

    /// Opens `dropdown`, closing any other; toggling the open one closes it.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) -> Option<Dropdown> {
        self.view.open_dropdown = match self.view.open_dropdown {
            Some(open) if open == dropdown => None,
            _ => Some(dropdown),
        };
        self.view.open_dropdown
    }

    pub fn close_dropdowns(&mut self) {
        self.view.open_dropdown = None;
    }

    /// Replaces any previously attached photo. Uploads that overlap are
    /// applied in the order they finish reading, not the order they started.
    pub fn attach_photo(&mut self, photo: PhotoUpload) {
        debug!(
            "Attached photo '{}' ({} bytes)",
            photo.file_name,
            photo.data.len()
        );
        self.view.photo = Some(photo);
    }

    /// Accepts an existing resume document. The document is not read.
    pub fn acknowledge_resume_upload(&self, file_name: &str) -> &'static str {
        debug!("Received resume document '{file_name}', not parsed");
        RESUME_UPLOAD_ACK
    }

    // ── Commit ───────────────────────────────────────────────────────────

    /// Assembles the draft into a complete resume. Editing keeps the stored
    /// id and creation time; a new resume gets fresh ones.
    pub fn commit(&self) -> Resume {
        let now = Utc::now();
        let (id, created_at) = match self.existing {
            Some(existing) => (existing.id, existing.created_at),
            None => (Uuid::new_v4(), now),
        };
        let d = self.draft.clone();
        let title = if d.title.trim().is_empty() {
            default_title(&d.personal_info)
        } else {
            d.title
        };

        Resume {
            id,
            title,
            template: self.template.id.clone(),
            personal_info: d.personal_info,
            experience: d.experience,
            education: d.education,
            skills: d.skills,
            languages: d.languages,
            hobbies: d.hobbies,
            courses: d.courses,
            references: d.references,
            certificates: d.certificates,
            signature: d.signature,
            created_at,
            updated_at: now,
        }
    }
}

fn push_len<T>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    items.len()
}

fn update_at<T>(items: &mut [T], index: usize, apply: impl FnOnce(&mut T) -> bool) -> bool {
    items.get_mut(index).map(apply).unwrap_or(false)
}

fn default_title(info: &PersonalInfo) -> String {
    let name = info.full_name();
    let name = name.trim();
    if name.is_empty() {
        "Untitled resume".to_string()
    } else {
        format!("Resume {name}")
    }
}
