// src/common/docx.rs
//
// Motor de mesclagem de templates DOCX. Um .docx é um pacote ZIP de XML; o
// template traz placeholders no formato `{nome}` espalhados pelo corpo do
// documento (e cabeçalhos/rodapés). A mesclagem substitui cada placeholder
// pelo valor correspondente e regrava o pacote, sem tocar nas demais partes.

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::common::error::AppError;

const PARTE_DOCUMENTO: &str = "word/document.xml";

fn parte_mesclavel(nome: &str) -> bool {
    nome == PARTE_DOCUMENTO
        || (nome.starts_with("word/header") && nome.ends_with(".xml"))
        || (nome.starts_with("word/footer") && nome.ends_with(".xml"))
}

// Os valores entram no meio de texto XML, então os metacaracteres precisam
// ser escapados para não corromper o documento.
fn xml_escape(valor: &str) -> String {
    let mut escapado = String::with_capacity(valor.len());
    for c in valor.chars() {
        match c {
            '&' => escapado.push_str("&amp;"),
            '<' => escapado.push_str("&lt;"),
            '>' => escapado.push_str("&gt;"),
            '"' => escapado.push_str("&quot;"),
            '\'' => escapado.push_str("&apos;"),
            _ => escapado.push(c),
        }
    }
    escapado
}

fn erro_template(contexto: &str, err: impl std::fmt::Display) -> AppError {
    AppError::TemplateError(format!("{contexto}: {err}"))
}

/// Mescla os placeholders no template e devolve o DOCX resultante.
///
/// Falha com `TemplateError` se o pacote não abrir, se não houver
/// `word/document.xml` ou se algum placeholder esperado não aparecer em parte
/// alguma do template — melhor recusar do que entregar um documento com
/// campos faltando.
pub fn render(template: &[u8], dados: &[(&str, String)]) -> Result<Vec<u8>, AppError> {
    let mut pacote = ZipArchive::new(Cursor::new(template))
        .map_err(|err| erro_template("arquivo DOCX inválido", err))?;

    // Primeira passada: carrega as partes XML mescláveis.
    let mut partes: HashMap<String, String> = HashMap::new();
    for i in 0..pacote.len() {
        let mut arquivo = pacote
            .by_index(i)
            .map_err(|err| erro_template("arquivo DOCX inválido", err))?;
        let nome = arquivo.name().to_string();
        if !parte_mesclavel(&nome) {
            continue;
        }
        let mut xml = String::new();
        arquivo
            .read_to_string(&mut xml)
            .map_err(|err| erro_template(&format!("parte '{nome}' ilegível"), err))?;
        partes.insert(nome, xml);
    }

    if !partes.contains_key(PARTE_DOCUMENTO) {
        return Err(AppError::TemplateError(format!(
            "o template não contém {PARTE_DOCUMENTO}"
        )));
    }

    for (chave, _) in dados {
        let marcador = format!("{{{chave}}}");
        if !partes.values().any(|xml| xml.contains(&marcador)) {
            return Err(AppError::TemplateError(format!(
                "placeholder '{marcador}' não encontrado no template"
            )));
        }
    }

    for xml in partes.values_mut() {
        for (chave, valor) in dados {
            let marcador = format!("{{{chave}}}");
            if xml.contains(&marcador) {
                *xml = xml.replace(&marcador, &xml_escape(valor));
            }
        }
    }

    // Segunda passada: regrava o pacote trocando só as partes mescladas.
    let mut pacote = ZipArchive::new(Cursor::new(template))
        .map_err(|err| erro_template("arquivo DOCX inválido", err))?;
    let mut saida = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..pacote.len() {
        let arquivo = pacote
            .by_index(i)
            .map_err(|err| erro_template("arquivo DOCX inválido", err))?;
        let nome = arquivo.name().to_string();

        if let Some(xml) = partes.get(&nome) {
            saida
                .start_file(nome, SimpleFileOptions::default())
                .map_err(|err| erro_template("falha ao regravar o DOCX", err))?;
            saida
                .write_all(xml.as_bytes())
                .map_err(|err| erro_template("falha ao regravar o DOCX", err))?;
        } else {
            saida
                .raw_copy_file(arquivo)
                .map_err(|err| erro_template("falha ao regravar o DOCX", err))?;
        }
    }

    let cursor = saida
        .finish()
        .map_err(|err| erro_template("falha ao regravar o DOCX", err))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapa_metacaracteres_xml() {
        assert_eq!(xml_escape("A & B <Ltda>"), "A &amp; B &lt;Ltda&gt;");
        assert_eq!(xml_escape("sem nada"), "sem nada");
    }

    #[test]
    fn bytes_que_nao_sao_zip_viram_template_error() {
        let err = render(b"isto nao e um zip", &[]).unwrap_err();
        assert!(matches!(err, AppError::TemplateError(_)));
    }
}
