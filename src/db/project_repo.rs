// src/db/project_repo.rs

use std::sync::Arc;

use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{sequence, to_value},
    models::project::{Project, ProjectStatus},
    store::{KEY_PROJECTS, KEY_SEQUENCES, Store, load_or},
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub nome: String,

    pub status: ProjectStatus,

    pub banco: String,

    pub agencia: String,

    pub conta_corrente: String,

    // `None` mantém o template atual do projeto em um `update`.
    #[serde(default)]
    pub template_docx_base64: Option<String>,

    #[serde(default)]
    pub template_xlsx_base64: Option<String>,
}

#[derive(Clone)]
pub struct ProjectRepository {
    store: Arc<dyn Store>,
}

impl ProjectRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Project>, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_PROJECTS, Vec::new).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(self.list().await?.into_iter().find(|p| p.id == id))
    }

    pub async fn create(&self, input: ProjectInput) -> Result<Project, AppError> {
        input.validate()?;

        let mut projetos = self.list().await?;
        let maior_id = projetos.iter().map(|p| p.id).max().unwrap_or(0);
        let (id, sequencias) =
            sequence::next_id(self.store.as_ref(), KEY_PROJECTS, maior_id).await?;

        let novo = Project {
            id,
            nome: input.nome,
            status: input.status,
            banco: input.banco,
            agencia: input.agencia,
            conta_corrente: input.conta_corrente,
            // Projeto nasce sem controles; a contagem é mantida pelo
            // repositório de controles daqui em diante.
            controles_mensais_count: 0,
            template_docx_base64: input.template_docx_base64,
            template_xlsx_base64: input.template_xlsx_base64,
        };
        projetos.push(novo.clone());

        self.store
            .save_many(vec![
                (KEY_PROJECTS.to_string(), to_value(&projetos)?),
                (KEY_SEQUENCES.to_string(), sequencias),
            ])
            .await?;

        Ok(novo)
    }

    /// Edita os atributos do projeto. A contagem denormalizada de controles
    /// nunca é gravável por aqui.
    pub async fn update(&self, id: i64, input: ProjectInput) -> Result<Project, AppError> {
        input.validate()?;

        let mut projetos = self.list().await?;
        let pos = projetos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::ProjectNotFound)?;

        let atual = &projetos[pos];
        let atualizado = Project {
            id,
            nome: input.nome,
            status: input.status,
            banco: input.banco,
            agencia: input.agencia,
            conta_corrente: input.conta_corrente,
            controles_mensais_count: atual.controles_mensais_count,
            template_docx_base64: input
                .template_docx_base64
                .or_else(|| atual.template_docx_base64.clone()),
            template_xlsx_base64: input
                .template_xlsx_base64
                .or_else(|| atual.template_xlsx_base64.clone()),
        };
        projetos[pos] = atualizado.clone();

        self.store
            .save(KEY_PROJECTS, to_value(&projetos)?)
            .await?;

        Ok(atualizado)
    }
}
