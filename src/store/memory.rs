// src/store/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Store, StoreError};

/// Armazenamento em memória, sem durabilidade. Usado nos testes e como
/// demonstração de que os repositórios não dependem do backend de arquivo.
#[derive(Default)]
pub struct MemoryStore {
    dados: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.dados.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.dados.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn save_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut dados = self.dados.lock().unwrap();
        for (key, value) in entries {
            dados.insert(key, value);
        }
        Ok(())
    }
}
