// src/config.rs

use std::env;
use std::path::Path;
use std::sync::Arc;

use crate::{
    db::{
        ControlRepository, PaymentRepository, ProjectRepository, SettingsRepository,
        VendorRepository, seed,
    },
    services::DocumentService,
    store::{JsonFileStore, Store},
};

/// Estado da aplicação: o Store e o grafo de repositórios/serviços montado
/// sobre ele. A camada de UI recebe um `AppState` e nunca toca o substrato de
/// persistência diretamente.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub vendors: VendorRepository,
    pub projects: ProjectRepository,
    pub controls: ControlRepository,
    pub payments: PaymentRepository,
    pub settings: SettingsRepository,
    pub documents: DocumentService,
}

impl AppState {
    /// Monta o estado com o armazenamento em arquivo, instalando os dados de
    /// demonstração na primeira execução. O diretório vem de
    /// `CONTABIL_DATA_DIR` (padrão `./data`).
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = env::var("CONTABIL_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
        let store: Arc<dyn Store> =
            Arc::new(JsonFileStore::new(Path::new(&data_dir).join("contabil.json")));

        seed::ensure_seed(store.as_ref()).await?;
        tracing::info!("✅ Armazenamento pronto em {}", data_dir);

        Ok(Self::with_store(store))
    }

    /// Monta o estado sobre um Store já existente (testes ou um backend
    /// alternativo). Não instala seed.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        Self {
            vendors: VendorRepository::new(store.clone()),
            projects: ProjectRepository::new(store.clone()),
            controls: ControlRepository::new(store.clone()),
            payments: PaymentRepository::new(store.clone()),
            settings: SettingsRepository::new(store.clone()),
            documents: DocumentService::new(),
            store,
        }
    }
}
