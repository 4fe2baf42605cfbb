// src/models/control.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Controle mensal: o balde de pagamentos de um projeto em um mês/ano.
///
/// `totalPagamentos` e `valorTotal` são agregados derivados, mantidos pelo
/// repositório de pagamentos a cada mutação. Invariante: em qualquer momento
/// eles são iguais à contagem e à soma dos pagamentos que referenciam o
/// controle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyControl {
    pub id: i64,

    pub projeto_id: i64,

    /// 1 a 12.
    pub mes: u32,

    pub ano: i32,

    #[serde(rename = "totalPagamentos", default)]
    pub total_pagamentos: i64,

    #[serde(rename = "valorTotal", default)]
    pub valor_total: Decimal,
}
