// src/db/control_repo.rs

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{sequence, to_value},
    models::{control::MonthlyControl, project::Project},
    store::{KEY_CONTROLS, KEY_PROJECTS, KEY_SEQUENCES, Store, load_or},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ControlInput {
    pub projeto_id: i64,

    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub mes: u32,

    pub ano: i32,
}

#[derive(Clone)]
pub struct ControlRepository {
    store: Arc<dyn Store>,
}

impl ControlRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_by_project(&self, projeto_id: i64) -> Result<Vec<MonthlyControl>, AppError> {
        let controles: Vec<MonthlyControl> =
            load_or(self.store.as_ref(), KEY_CONTROLS, Vec::new).await?;
        Ok(controles
            .into_iter()
            .filter(|c| c.projeto_id == projeto_id)
            .collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<MonthlyControl>, AppError> {
        let controles: Vec<MonthlyControl> =
            load_or(self.store.as_ref(), KEY_CONTROLS, Vec::new).await?;
        Ok(controles.into_iter().find(|c| c.id == id))
    }

    /// Cria um controle mensal e incrementa a contagem denormalizada no
    /// projeto dono, no mesmo commit.
    pub async fn create(&self, input: ControlInput) -> Result<MonthlyControl, AppError> {
        input.validate()?;

        let mut projetos: Vec<Project> =
            load_or(self.store.as_ref(), KEY_PROJECTS, Vec::new).await?;
        let pos_projeto = projetos
            .iter()
            .position(|p| p.id == input.projeto_id)
            .ok_or(AppError::ProjectNotFound)?;

        let mut controles: Vec<MonthlyControl> =
            load_or(self.store.as_ref(), KEY_CONTROLS, Vec::new).await?;
        let maior_id = controles.iter().map(|c| c.id).max().unwrap_or(0);
        let (id, sequencias) =
            sequence::next_id(self.store.as_ref(), KEY_CONTROLS, maior_id).await?;

        let novo = MonthlyControl {
            id,
            projeto_id: input.projeto_id,
            mes: input.mes,
            ano: input.ano,
            total_pagamentos: 0,
            valor_total: rust_decimal::Decimal::ZERO,
        };
        controles.push(novo.clone());
        projetos[pos_projeto].controles_mensais_count += 1;

        self.store
            .save_many(vec![
                (KEY_CONTROLS.to_string(), to_value(&controles)?),
                (KEY_PROJECTS.to_string(), to_value(&projetos)?),
                (KEY_SEQUENCES.to_string(), sequencias),
            ])
            .await?;

        Ok(novo)
    }
}
