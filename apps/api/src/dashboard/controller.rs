use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::builder::Builder;
use crate::export::{export_filename, ExportDocument};
use crate::models::resume::Resume;
use crate::models::template::{resolve_template, ResumeTemplate};
use crate::store::ResumeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    List,
    TemplatePicker,
    Builder,
}

/// Serializable summary of where the dashboard is.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub view: View,
    pub selected_template: Option<ResumeTemplate>,
    /// Set while an existing resume is open in the builder.
    pub editing_id: Option<Uuid>,
    pub resume_count: usize,
}

/// Owns the resume list and routes between the list, the template picker,
/// and the builder.
///
/// The list mirrors the store: every mutation rewrites the whole sequence.
/// A failed write is logged and the in-memory list is kept.
pub struct Dashboard {
    store: ResumeStore,
    resumes: Vec<Resume>,
    view: View,
    selected_template: Option<ResumeTemplate>,
    editing: Option<Uuid>,
    builder: Option<Builder>,
}

impl Dashboard {
    /// Starts on the list view with whatever the store holds.
    pub async fn load(store: ResumeStore) -> Self {
        let resumes = store.load().await;
        Self {
            store,
            resumes,
            view: View::List,
            selected_template: None,
            editing: None,
            builder: None,
        }
    }

    pub fn resumes(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn find(&self, id: Uuid) -> Option<&Resume> {
        self.resumes.iter().find(|r| r.id == id)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn state(&self) -> DashboardState {
        DashboardState {
            view: self.view,
            selected_template: self.selected_template.clone(),
            editing_id: self.editing,
            resume_count: self.resumes.len(),
        }
    }

    /// The open builder. `None` unless the builder view is showing.
    pub fn builder(&self) -> Option<&Builder> {
        match self.view {
            View::Builder => self.builder.as_ref(),
            _ => None,
        }
    }

    pub fn builder_mut(&mut self) -> Option<&mut Builder> {
        match self.view {
            View::Builder => self.builder.as_mut(),
            _ => None,
        }
    }

    /// Opens the template picker for a new resume.
    pub fn create(&mut self) {
        self.view = View::TemplatePicker;
        self.editing = None;
        self.builder = None;
    }

    /// Opens the builder on a blank draft with `template`.
    pub fn select_template(&mut self, template: ResumeTemplate) {
        info!("Starting new resume with template '{}'", template.id);
        self.builder = Some(Builder::new(template.clone()));
        self.selected_template = Some(template);
        self.editing = None;
        self.view = View::Builder;
    }

    /// Opens the builder on a copy of `resume`.
    pub fn edit(&mut self, resume: &Resume) {
        info!("Editing resume {}", resume.id);
        let template = resolve_template(&resume.template);
        self.builder = Some(Builder::from_resume(template.clone(), resume));
        self.selected_template = Some(template);
        self.editing = Some(resume.id);
        self.view = View::Builder;
    }

    /// Replaces the resume with the same id, or appends it, then persists and
    /// returns to the list. Replacing refreshes `updated_at` and keeps the
    /// stored `created_at`.
    pub async fn save(&mut self, mut resume: Resume) -> Resume {
        match self.resumes.iter_mut().find(|r| r.id == resume.id) {
            Some(existing) => {
                resume.created_at = existing.created_at;
                resume.updated_at = Utc::now();
                *existing = resume.clone();
                info!("Updated resume {}", resume.id);
            }
            None => {
                self.resumes.push(resume.clone());
                info!("Added resume {}", resume.id);
            }
        }
        self.persist().await;
        self.close_session();
        resume
    }

    /// Commits the open builder and saves the result.
    pub async fn save_builder(&mut self) -> Option<Resume> {
        let committed = self.builder()?.commit();
        Some(self.save(committed).await)
    }

    /// Appends a copy of `resume` titled "<title> (Copy)". Stays on the list.
    pub async fn duplicate(&mut self, resume: &Resume) -> Resume {
        let copy = resume.duplicate();
        info!("Duplicated resume {} as {}", resume.id, copy.id);
        self.resumes.push(copy.clone());
        self.persist().await;
        copy
    }

    /// Removes the resume with `id`, if any, and persists. Returns whether
    /// something was removed.
    pub async fn delete(&mut self, id: Uuid) -> bool {
        let before = self.resumes.len();
        self.resumes.retain(|r| r.id != id);
        let removed = self.resumes.len() != before;
        if removed {
            info!("Deleted resume {id}");
        }
        self.persist().await;
        removed
    }

    /// Leaves the picker or builder without saving.
    pub fn back(&mut self) {
        self.close_session();
    }

    /// Export document and download filename for a stored resume.
    pub fn export(&self, id: Uuid) -> Option<(String, ExportDocument)> {
        self.find(id)
            .map(|r| (export_filename(&r.title), ExportDocument::from(r)))
    }

    fn close_session(&mut self) {
        self.view = View::List;
        self.selected_template = None;
        self.editing = None;
        self.builder = None;
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save_all(&self.resumes).await {
            error!("Failed to persist resumes: {e:?}");
        }
    }
}
