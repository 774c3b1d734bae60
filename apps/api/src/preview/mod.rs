//! Live preview: a pure projection of the open builder. Holds no state.

pub mod document;
pub mod markdown;

pub use document::{render_preview, PreviewDocument};
pub use markdown::render_markdown;
