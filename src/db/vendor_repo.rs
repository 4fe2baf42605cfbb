// src/db/vendor_repo.rs

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{sequence, to_value},
    models::vendor::Vendor,
    store::{KEY_SEQUENCES, KEY_VENDORS, Store, load_or},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VendorInput {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub codigo: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    #[validate(length(min = 1, message = "O CNPJ/CPF é obrigatório."))]
    pub cnpj_cpf: String,

    #[serde(default)]
    pub banco_codigo: Option<String>,

    #[serde(default)]
    pub agencia: Option<String>,

    #[serde(default)]
    pub conta_corrente: Option<String>,

    #[serde(default)]
    pub pix: Option<String>,
}

#[derive(Clone)]
pub struct VendorRepository {
    store: Arc<dyn Store>,
}

impl VendorRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Coleção completa, na ordem de inserção.
    pub async fn list(&self) -> Result<Vec<Vendor>, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_VENDORS, Vec::new).await?)
    }

    /// Ausência é um resultado normal, não erro.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Vendor>, AppError> {
        Ok(self.list().await?.into_iter().find(|f| f.id == id))
    }

    pub async fn create(&self, input: VendorInput) -> Result<Vendor, AppError> {
        input.validate()?;

        let mut fornecedores = self.list().await?;
        let maior_id = fornecedores.iter().map(|f| f.id).max().unwrap_or(0);
        let (id, sequencias) =
            sequence::next_id(self.store.as_ref(), KEY_VENDORS, maior_id).await?;

        let novo = Vendor {
            id,
            codigo: input.codigo,
            nome: input.nome,
            cnpj_cpf: input.cnpj_cpf,
            banco_codigo: input.banco_codigo,
            agencia: input.agencia,
            conta_corrente: input.conta_corrente,
            pix: input.pix,
        };
        fornecedores.push(novo.clone());

        self.store
            .save_many(vec![
                (KEY_VENDORS.to_string(), to_value(&fornecedores)?),
                (KEY_SEQUENCES.to_string(), sequencias),
            ])
            .await?;

        Ok(novo)
    }

    pub async fn update(&self, id: i64, input: VendorInput) -> Result<Vendor, AppError> {
        input.validate()?;

        let mut fornecedores = self.list().await?;
        let pos = fornecedores
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::VendorNotFound)?;

        let atualizado = Vendor {
            id,
            codigo: input.codigo,
            nome: input.nome,
            cnpj_cpf: input.cnpj_cpf,
            banco_codigo: input.banco_codigo,
            agencia: input.agencia,
            conta_corrente: input.conta_corrente,
            pix: input.pix,
        };
        fornecedores[pos] = atualizado.clone();

        self.store
            .save(KEY_VENDORS, to_value(&fornecedores)?)
            .await?;

        Ok(atualizado)
    }
}
