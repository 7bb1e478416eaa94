pub mod content;
pub mod note;
