pub mod document_service;
pub use document_service::DocumentService;
