// src/models/settings.rs

use serde::{Deserialize, Serialize};

/// Configurações globais: os templates padrão (base64), usados quando o
/// projeto não define os seus próprios.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_docx_padrao_base64: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_xlsx_padrao_base64: Option<String>,
}

impl AppSettings {
    /// Template DOCX padrão, ignorando string vazia gravada por versões
    /// antigas do formato.
    pub fn docx_padrao(&self) -> Option<&str> {
        self.template_docx_padrao_base64
            .as_deref()
            .filter(|t| !t.is_empty())
    }

    pub fn xlsx_padrao(&self) -> Option<&str> {
        self.template_xlsx_padrao_base64
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}
