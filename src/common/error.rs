// src/common/error.rs

use thiserror::Error;

use crate::store::StoreError;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia. Nenhuma variante
// é fatal: toda falha fica restrita à operação que a disparou e cabe à camada
// de UI decidir como apresentá-la.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Fornecedor não encontrado")]
    VendorNotFound,

    #[error("Projeto não encontrado")]
    ProjectNotFound,

    #[error("Controle mensal não encontrado")]
    ControlNotFound,

    #[error("Pagamento não encontrado")]
    PaymentNotFound,

    // Inconsistência interna: o pagamento persiste um fornecedor_id que não
    // existe mais na coleção de fornecedores.
    #[error("Fornecedor {fornecedor_id} referenciado pelo pagamento {pagamento_id} não existe")]
    DanglingVendorRef { pagamento_id: i64, fornecedor_id: i64 },

    #[error("Erro ao gerar o documento DOCX: {0}")]
    TemplateError(String),

    #[error("A aba \"{0}\" não foi encontrada no template XLSX")]
    SheetNotFound(String),

    // Variante para falhas de E/S do armazenamento. Entradas corrompidas são
    // tratadas na leitura (caem no default, com warning), então só chega aqui
    // o que realmente impede a operação.
    #[error("Erro de armazenamento")]
    StoreError(#[from] StoreError),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Indica se o erro é um "não encontrado" de alguma coleção.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::VendorNotFound
                | AppError::ProjectNotFound
                | AppError::ControlNotFound
                | AppError::PaymentNotFound
        )
    }
}
