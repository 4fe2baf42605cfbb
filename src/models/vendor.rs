// src/models/vendor.rs

use serde::{Deserialize, Serialize};

/// Fornecedor (cadastro). A identidade é imutável; os atributos podem ser
/// editados. Pagamentos referenciam o fornecedor apenas por `fornecedor_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: i64,

    pub codigo: String,

    pub nome: String,

    pub cnpj_cpf: String,

    // Dados bancários são opcionais: nem todo fornecedor informa tudo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banco_codigo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agencia: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conta_corrente: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pix: Option<String>,
}
