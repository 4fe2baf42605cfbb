// src/models/payment.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;
use crate::models::vendor::Vendor;

/// Status de geração do documento SAA do pagamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Não Gerado")]
    NaoGerado,
    #[serde(rename = "Gerado")]
    Gerado,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::NaoGerado => "Não Gerado",
            PaymentStatus::Gerado => "Gerado",
        }
    }
}

/// Pagamento na forma persistida: o fornecedor entra apenas como
/// `fornecedor_id`. O registro hidratado ([`PaymentWithVendor`]) existe só em
/// memória, montado no caminho de leitura.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,

    pub controle_mensal_id: i64,

    pub fornecedor_id: i64,

    pub elemento_despesa: String,

    pub tipo_comprovante: String,

    pub numero_comprovante: String,

    pub valor: Decimal,

    /// Número de autorização, atribuído uma única vez na criação.
    pub numero_saa: String,

    pub status_saa: PaymentStatus,

    /// Data do pagamento (YYYY-MM-DD no JSON).
    pub data_pagamento: NaiveDate,
}

/// Visão denormalizada de um pagamento com o fornecedor completo anexado.
///
/// Jamais persistida: gravar essa forma congelaria um snapshot do fornecedor
/// que divergiria silenciosamente do cadastro. O caminho de escrita sempre
/// passa por [`PaymentWithVendor::into_stored`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentWithVendor {
    #[serde(flatten)]
    pub pagamento: Payment,
    pub fornecedor: Vendor,
}

impl Payment {
    /// Hidratação: anexa o fornecedor correspondente a partir do cadastro.
    /// Um `fornecedor_id` pendurado é uma inconsistência interna detectável,
    /// não um crash.
    pub fn with_vendor(self, fornecedores: &[Vendor]) -> Result<PaymentWithVendor, AppError> {
        let fornecedor = fornecedores
            .iter()
            .find(|f| f.id == self.fornecedor_id)
            .cloned()
            .ok_or(AppError::DanglingVendorRef {
                pagamento_id: self.id,
                fornecedor_id: self.fornecedor_id,
            })?;

        Ok(PaymentWithVendor {
            pagamento: self,
            fornecedor,
        })
    }
}

impl PaymentWithVendor {
    /// Projeção inversa da hidratação: descarta o fornecedor anexado e devolve
    /// a forma que pode ser persistida.
    pub fn into_stored(self) -> Payment {
        self.pagamento
    }
}
