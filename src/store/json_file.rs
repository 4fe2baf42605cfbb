// src/store/json_file.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{Store, StoreError};

/// Armazenamento em um único arquivo JSON no disco: um objeto com uma entrada
/// por chave de coleção. A gravação escreve um arquivo temporário e renomeia
/// por cima, então um `save_many` é aplicado inteiro ou não é aplicado — é
/// isso que dá atomicidade às escritas multi-coleção dos repositórios.
pub struct JsonFileStore {
    path: PathBuf,
    // A aplicação é de escritor único, mas serializar as gravações aqui evita
    // que dois `save_many` concorrentes intercalem leitura e renomeação.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<Map<String, Value>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(outro) => Err(StoreError::Corrupt(format!(
                "esperava um objeto JSON em {}, encontrei {}",
                self.path.display(),
                match outro {
                    Value::Array(_) => "um array",
                    Value::Null => "null",
                    _ => "um valor escalar",
                }
            ))),
            Err(err) => Err(StoreError::Corrupt(format!(
                "JSON inválido em {}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let bytes = serde_json::to_vec_pretty(&Value::Object(map.clone()))
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn save(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.save_many(vec![(key.to_string(), value)]).await
    }

    async fn save_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        // Um arquivo ilegível não pode travar o usuário para sempre: gravamos
        // por cima, com warning, como se fosse a primeira execução.
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StoreError::Corrupt(msg)) => {
                tracing::warn!(%msg, "arquivo de dados corrompido, sobrescrevendo");
                Map::new()
            }
            Err(err) => return Err(err),
        };

        for (key, value) in entries {
            map.insert(key, value);
        }
        self.write_map(&map).await
    }
}
