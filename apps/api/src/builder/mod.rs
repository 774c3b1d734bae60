//! The resume builder: one editable draft plus the UI state around it.

pub mod fields;
pub mod handlers;
pub mod presentation;
pub mod sections;
pub mod session;

pub use session::{Builder, PhotoUpload};
