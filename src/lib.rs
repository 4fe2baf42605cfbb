// src/lib.rs
//
// Núcleo do Contábil: cadastros (fornecedores, projetos, controles mensais,
// pagamentos), persistência local em chave/valor e geração de documentos
// (SAA em DOCX e exportação em XLSX) a partir de templates. A camada de UI
// fica fora deste crate e consome a API pública daqui.

pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
pub mod store;

pub use common::error::AppError;
pub use config::AppState;
