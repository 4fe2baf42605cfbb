// src/db/payment_repo.rs

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    db::{sequence, to_value},
    models::{
        control::MonthlyControl,
        payment::{Payment, PaymentStatus, PaymentWithVendor},
        vendor::Vendor,
    },
    store::{KEY_CONTROLS, KEY_PAYMENTS, KEY_SEQUENCES, KEY_VENDORS, Store, load_or},
};

fn validate_valor_positivo(valor: &Decimal) -> Result<(), ValidationError> {
    if *valor <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor a pagar deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaymentInput {
    pub controle_mensal_id: i64,

    #[validate(range(min = 1, message = "Selecione um fornecedor."))]
    pub fornecedor_id: i64,

    pub elemento_despesa: String,

    pub tipo_comprovante: String,

    pub numero_comprovante: String,

    #[validate(custom(function = "validate_valor_positivo"))]
    pub valor: Decimal,

    /// Opcional na criação: quando ausente, o repositório atribui
    /// `SAA{id}`. Ignorado no `update` — o número nunca muda.
    #[serde(default)]
    pub numero_saa: Option<String>,

    pub data_pagamento: NaiveDate,
}

/// Repositório de pagamentos. Além do CRUD, é o único lugar que mantém os
/// agregados denormalizados do controle mensal (`totalPagamentos` e
/// `valorTotal`); toda escrita que toca as duas coleções vai para o Store em
/// um único `save_many`.
#[derive(Clone)]
pub struct PaymentRepository {
    store: Arc<dyn Store>,
}

impl PaymentRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    async fn load_payments(&self) -> Result<Vec<Payment>, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_PAYMENTS, Vec::new).await?)
    }

    async fn load_vendors(&self) -> Result<Vec<Vendor>, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_VENDORS, Vec::new).await?)
    }

    async fn load_controls(&self) -> Result<Vec<MonthlyControl>, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_CONTROLS, Vec::new).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Payment>, AppError> {
        Ok(self.load_payments().await?.into_iter().find(|p| p.id == id))
    }

    /// Pagamentos de um controle, hidratados com o fornecedor completo. Um
    /// `fornecedor_id` sem cadastro correspondente é inconsistência interna e
    /// vira erro reportável.
    pub async fn list_by_control(
        &self,
        controle_id: i64,
    ) -> Result<Vec<PaymentWithVendor>, AppError> {
        let fornecedores = self.load_vendors().await?;
        self.load_payments()
            .await?
            .into_iter()
            .filter(|p| p.controle_mensal_id == controle_id)
            .map(|p| p.with_vendor(&fornecedores))
            .collect()
    }

    /// Cria o pagamento com status `Não Gerado` e incrementa os agregados do
    /// controle dono (+1 na contagem, +valor no total).
    pub async fn create(&self, input: PaymentInput) -> Result<PaymentWithVendor, AppError> {
        input.validate()?;

        let fornecedores = self.load_vendors().await?;
        if !fornecedores.iter().any(|f| f.id == input.fornecedor_id) {
            return Err(AppError::VendorNotFound);
        }

        let mut controles = self.load_controls().await?;
        let pos_controle = controles
            .iter()
            .position(|c| c.id == input.controle_mensal_id)
            .ok_or(AppError::ControlNotFound)?;

        let mut pagamentos = self.load_payments().await?;
        let maior_id = pagamentos.iter().map(|p| p.id).max().unwrap_or(0);
        let (id, sequencias) =
            sequence::next_id(self.store.as_ref(), KEY_PAYMENTS, maior_id).await?;

        let numero_saa = input
            .numero_saa
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("SAA{:03}", id));

        let novo = Payment {
            id,
            controle_mensal_id: input.controle_mensal_id,
            fornecedor_id: input.fornecedor_id,
            elemento_despesa: input.elemento_despesa,
            tipo_comprovante: input.tipo_comprovante,
            numero_comprovante: input.numero_comprovante,
            valor: input.valor,
            numero_saa,
            status_saa: PaymentStatus::NaoGerado,
            data_pagamento: input.data_pagamento,
        };

        pagamentos.push(novo.clone());
        controles[pos_controle].total_pagamentos += 1;
        controles[pos_controle].valor_total += novo.valor;

        self.store
            .save_many(vec![
                (KEY_PAYMENTS.to_string(), to_value(&pagamentos)?),
                (KEY_CONTROLS.to_string(), to_value(&controles)?),
                (KEY_SEQUENCES.to_string(), sequencias),
            ])
            .await?;

        novo.with_vendor(&fornecedores)
    }

    /// Atualiza um pagamento existente, ajustando o total do controle pela
    /// diferença de valor (a contagem não muda). `controle_mensal_id` e
    /// `numero_saa` são imutáveis; o status de geração é preservado.
    pub async fn update(&self, id: i64, input: PaymentInput) -> Result<PaymentWithVendor, AppError> {
        input.validate()?;

        let mut pagamentos = self.load_payments().await?;
        let pos = pagamentos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::PaymentNotFound)?;
        let original = pagamentos[pos].clone();

        let fornecedores = self.load_vendors().await?;
        if !fornecedores.iter().any(|f| f.id == input.fornecedor_id) {
            return Err(AppError::VendorNotFound);
        }

        let atualizado = Payment {
            id: original.id,
            controle_mensal_id: original.controle_mensal_id,
            fornecedor_id: input.fornecedor_id,
            elemento_despesa: input.elemento_despesa,
            tipo_comprovante: input.tipo_comprovante,
            numero_comprovante: input.numero_comprovante,
            valor: input.valor,
            numero_saa: original.numero_saa.clone(),
            status_saa: original.status_saa,
            data_pagamento: input.data_pagamento,
        };
        pagamentos[pos] = atualizado.clone();

        let mut controles = self.load_controls().await?;
        // Controle ausente não derruba a edição: o registro fonte continua
        // correto e o agregado se recompõe quando o controle reaparecer.
        if let Some(controle) = controles
            .iter_mut()
            .find(|c| c.id == original.controle_mensal_id)
        {
            controle.valor_total = controle.valor_total - original.valor + atualizado.valor;
        } else {
            tracing::warn!(
                controle_id = original.controle_mensal_id,
                pagamento_id = id,
                "controle do pagamento não encontrado ao atualizar agregados"
            );
        }

        self.store
            .save_many(vec![
                (KEY_PAYMENTS.to_string(), to_value(&pagamentos)?),
                (KEY_CONTROLS.to_string(), to_value(&controles)?),
            ])
            .await?;

        atualizado.with_vendor(&fornecedores)
    }

    /// Remove o pagamento e devolve os agregados do controle (−1 na contagem,
    /// −valor no total).
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut pagamentos = self.load_payments().await?;
        let pos = pagamentos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::PaymentNotFound)?;
        let removido = pagamentos.remove(pos);

        let mut controles = self.load_controls().await?;
        if let Some(controle) = controles
            .iter_mut()
            .find(|c| c.id == removido.controle_mensal_id)
        {
            controle.total_pagamentos -= 1;
            controle.valor_total -= removido.valor;
        } else {
            tracing::warn!(
                controle_id = removido.controle_mensal_id,
                pagamento_id = id,
                "controle do pagamento não encontrado ao atualizar agregados"
            );
        }

        self.store
            .save_many(vec![
                (KEY_PAYMENTS.to_string(), to_value(&pagamentos)?),
                (KEY_CONTROLS.to_string(), to_value(&controles)?),
            ])
            .await?;

        Ok(())
    }

    /// Marca o SAA do pagamento como gerado, depois que o documento foi
    /// produzido com sucesso. Não mexe em valor nem em agregados.
    pub async fn mark_saa_generated(&self, id: i64) -> Result<Payment, AppError> {
        let mut pagamentos = self.load_payments().await?;
        let pos = pagamentos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::PaymentNotFound)?;

        pagamentos[pos].status_saa = PaymentStatus::Gerado;
        let atualizado = pagamentos[pos].clone();

        self.store
            .save(KEY_PAYMENTS, to_value(&pagamentos)?)
            .await?;

        Ok(atualizado)
    }
}
