// src/models/project.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Ativo,
    Arquivado,
}

/// Projeto: o "dono" dos controles mensais. Mudar o status é uma edição
/// comum, sem efeito em cascata sobre controles ou pagamentos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,

    pub nome: String,

    pub status: ProjectStatus,

    pub banco: String,

    pub agencia: String,

    pub conta_corrente: String,

    /// Contagem denormalizada de controles mensais, mantida pelo repositório
    /// na criação de controles. Nunca editável via `update`.
    #[serde(rename = "controlesMensaisCount", default)]
    pub controles_mensais_count: i64,

    // Templates específicos do projeto (base64). Quando ausentes, valem os
    // templates padrão das configurações.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_docx_base64: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_xlsx_base64: Option<String>,
}
