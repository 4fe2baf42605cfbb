// src/store.rs
//
// Fronteira de persistência do núcleo: um espaço chave/valor onde cada chave
// guarda uma coleção inteira serializada em JSON. Os repositórios recebem o
// `Store` por injeção (nada de estado global) e tratam cada chamada como
// potencialmente lenta, para que um backend remoto continue substituível.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

// Chaves das coleções. Mantidas iguais ao layout histórico do armazenamento
// para que dados já existentes continuem carregando.
pub const KEY_VENDORS: &str = "contabil_vendors";
pub const KEY_PROJECTS: &str = "contabil_projects";
pub const KEY_CONTROLS: &str = "contabil_controls";
pub const KEY_PAYMENTS: &str = "contabil_payments";
pub const KEY_SETTINGS: &str = "contabil_settings";
pub const KEY_SEQUENCES: &str = "contabil_sequences";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Falha de E/S no armazenamento: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conteúdo corrompido no armazenamento: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Lê o valor bruto de uma chave. Ausência é `Ok(None)`, não erro.
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Grava um único valor.
    async fn save(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Grava várias chaves em um único commit. É por aqui que os caminhos de
    /// escrita que tocam mais de uma coleção (pagamentos + controles +
    /// sequências) mantêm os agregados consistentes mesmo diante de falha.
    async fn save_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError>;
}

/// Carrega uma coleção tipada, caindo no default do chamador quando a chave
/// está ausente ou o conteúdo não desserializa. A entrada corrompida gera um
/// warning em vez de falhar a operação; falhas de E/S são propagadas.
pub async fn load_or<T, F>(store: &dyn Store, key: &str, default: F) -> Result<T, StoreError>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.load(key).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(parsed),
            Err(err) => {
                tracing::warn!(key, %err, "entrada corrompida no armazenamento, usando default");
                Ok(default())
            }
        },
        Ok(None) => Ok(default()),
        Err(StoreError::Corrupt(msg)) => {
            tracing::warn!(key, %msg, "armazenamento corrompido, usando default");
            Ok(default())
        }
        Err(err) => Err(err),
    }
}
