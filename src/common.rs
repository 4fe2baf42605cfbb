pub mod docx;
pub mod error;
pub mod format;
