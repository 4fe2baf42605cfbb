// src/db/settings_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::to_value,
    models::settings::AppSettings,
    store::{KEY_SETTINGS, Store, load_or},
};

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn Store>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Configurações atuais; sem nada gravado, devolve o default vazio.
    pub async fn get(&self) -> Result<AppSettings, AppError> {
        Ok(load_or(self.store.as_ref(), KEY_SETTINGS, AppSettings::default).await?)
    }

    pub async fn update(&self, settings: AppSettings) -> Result<AppSettings, AppError> {
        self.store
            .save(KEY_SETTINGS, to_value(&settings)?)
            .await?;
        Ok(settings)
    }
}
