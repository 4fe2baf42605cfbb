// src/db/sequence.rs

use std::collections::HashMap;

use serde_json::Value;

use crate::store::{KEY_SEQUENCES, Store, StoreError, load_or};

/// Reserva o próximo id de uma coleção.
///
/// Os contadores são persistidos sob `contabil_sequences` e só crescem, então
/// um id nunca é reutilizado — nem depois de apagar o registro de maior id.
/// `maior_id_atual` serve de piso para dados gravados antes de existir o
/// contador (aí o comportamento degrada para max + 1, uma única vez).
///
/// A gravação fica a cargo do chamador: o `Value` devolvido entra no mesmo
/// `save_many` que persiste a coleção, para o contador avançar junto com o
/// registro que o consumiu.
pub async fn next_id(
    store: &dyn Store,
    colecao: &str,
    maior_id_atual: i64,
) -> Result<(i64, Value), StoreError> {
    let mut contadores: HashMap<String, i64> =
        load_or(store, KEY_SEQUENCES, HashMap::new).await?;

    let atual = contadores.get(colecao).copied().unwrap_or(0);
    let proximo = atual.max(maior_id_atual) + 1;
    contadores.insert(colecao.to_string(), proximo);

    let value = Value::Object(
        contadores
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect(),
    );
    Ok((proximo, value))
}
