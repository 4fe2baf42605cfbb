// src/services/document_service.rs

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rust_decimal::prelude::ToPrimitive;

use crate::{
    common::{docx, error::AppError, format::format_currency},
    models::{
        control::MonthlyControl, payment::PaymentWithVendor, project::Project,
        settings::AppSettings,
    },
};

/// Nome exato (sensível a maiúsculas) da aba que o template XLSX precisa ter.
pub const ABA_PAGAMENTOS: &str = "Controle de Pagamentos";

/// Linha onde começam os dados na planilha; a linha 1 do template é o
/// cabeçalho.
const LINHA_ANCORA: u32 = 2;

/// Geração de documentos a partir de templates: o SAA (autorização de
/// pagamento, DOCX) e a planilha de pagamentos (XLSX). Puro em relação ao
/// estado de domínio — só lê registros e o template, devolve bytes e não
/// toca nos repositórios. Marcar o SAA como gerado é passo do chamador.
#[derive(Clone, Default)]
pub struct DocumentService;

impl DocumentService {
    pub fn new() -> Self {
        Self
    }

    /// Template DOCX efetivo: o do projeto, senão o padrão das configurações.
    pub fn resolve_docx_template(
        &self,
        projeto: &Project,
        settings: &AppSettings,
    ) -> Result<Vec<u8>, AppError> {
        let base64 = projeto
            .template_docx_base64
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| settings.docx_padrao())
            .ok_or_else(|| {
                AppError::TemplateError(
                    "Nenhum template DOCX configurado. Adicione um template padrão nas \
                     Configurações ou um template específico para este projeto."
                        .to_string(),
                )
            })?;
        BASE64
            .decode(base64)
            .map_err(|err| AppError::TemplateError(format!("template DOCX em base64 inválido: {err}")))
    }

    pub fn resolve_xlsx_template(
        &self,
        projeto: &Project,
        settings: &AppSettings,
    ) -> Result<Vec<u8>, AppError> {
        let base64 = projeto
            .template_xlsx_base64
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| settings.xlsx_padrao())
            .ok_or_else(|| {
                AppError::TemplateError(
                    "Nenhum template XLSX configurado. Adicione um template padrão nas \
                     Configurações ou um template específico para este projeto."
                        .to_string(),
                )
            })?;
        BASE64
            .decode(base64)
            .map_err(|err| AppError::TemplateError(format!("template XLSX em base64 inválido: {err}")))
    }

    /// Preenche o template do SAA com os dados de um pagamento e devolve o
    /// DOCX pronto para download.
    pub fn gerar_saa(
        &self,
        pagamento: &PaymentWithVendor,
        projeto: &Project,
        template: &[u8],
    ) -> Result<Vec<u8>, AppError> {
        let p = &pagamento.pagamento;
        let fornecedor = &pagamento.fornecedor;
        let hoje = chrono::Local::now().date_naive();

        // O conjunto de placeholders é fixo e casa com os templates em uso;
        // qualquer um ausente no template é erro, não omissão silenciosa.
        let dados: Vec<(&str, String)> = vec![
            ("SAA", p.numero_saa.clone()),
            ("tituloProjeto", projeto.nome.clone()),
            ("tipoDespesa", p.elemento_despesa.clone()),
            ("bancoPROJ", projeto.banco.clone()),
            ("agenciaPROJ", projeto.agencia.clone()),
            ("contaCorrentePROJ", projeto.conta_corrente.clone()),
            ("Nomefornecedor", fornecedor.nome.clone()),
            ("CNPJ/CPF_FORNECEDOR", fornecedor.cnpj_cpf.clone()),
            (
                "Banco_/_Codigo",
                fornecedor.banco_codigo.clone().unwrap_or_default(),
            ),
            ("Agência", fornecedor.agencia.clone().unwrap_or_default()),
            (
                "Conta_Corrente",
                fornecedor.conta_corrente.clone().unwrap_or_default(),
            ),
            ("PIX", fornecedor.pix.clone().unwrap_or_default()),
            ("Tipo_de_Comprovante", p.tipo_comprovante.clone()),
            ("Nº_do_Comprovante", p.numero_comprovante.clone()),
            ("ValorPagar", format_currency(p.valor)),
            ("dataAtual", hoje.format("%d/%m/%Y").to_string()),
        ];

        docx::render(template, &dados)
    }

    /// Escreve uma linha por pagamento na aba "Controle de Pagamentos" do
    /// template, a partir da célula A2, e devolve o workbook serializado.
    ///
    /// Limitação conhecida da âncora fixa: exportações repetidas sobrescrevem
    /// o que estiver abaixo de A2; linhas de uma exportação anterior mais
    /// longa permanecem.
    pub fn exportar_pagamentos(
        &self,
        pagamentos: &[PaymentWithVendor],
        projeto: &Project,
        controle: &MonthlyControl,
        template: &[u8],
    ) -> Result<Vec<u8>, AppError> {
        tracing::debug!(
            projeto = %projeto.nome,
            mes = controle.mes,
            ano = controle.ano,
            pagamentos = pagamentos.len(),
            "exportando controle de pagamentos"
        );

        let mut workbook = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(template), true)
            .map_err(|err| AppError::TemplateError(format!("template XLSX inválido: {err}")))?;

        {
            let aba = workbook
                .get_sheet_by_name_mut(ABA_PAGAMENTOS)
                .ok_or_else(|| AppError::SheetNotFound(ABA_PAGAMENTOS.to_string()))?;

            for (i, pagamento) in pagamentos.iter().enumerate() {
                let linha = LINHA_ANCORA + i as u32;
                let p = &pagamento.pagamento;
                let fornecedor = &pagamento.fornecedor;

                let textos: [(u32, String); 13] = [
                    (1, fornecedor.codigo.clone()),
                    (2, fornecedor.nome.clone()),
                    (3, fornecedor.cnpj_cpf.clone()),
                    (4, p.elemento_despesa.clone()),
                    (5, p.tipo_comprovante.clone()),
                    (6, p.numero_comprovante.clone()),
                    (8, p.data_pagamento.to_string()),
                    (9, p.numero_saa.clone()),
                    (10, p.status_saa.as_str().to_string()),
                    (11, fornecedor.banco_codigo.clone().unwrap_or_default()),
                    (12, fornecedor.agencia.clone().unwrap_or_default()),
                    (13, fornecedor.conta_corrente.clone().unwrap_or_default()),
                    (14, fornecedor.pix.clone().unwrap_or_default()),
                ];
                for (coluna, texto) in textos {
                    aba.get_cell_mut((coluna, linha)).set_value_string(texto);
                }

                // Valor entra como número cru, sem formatação de moeda.
                aba.get_cell_mut((7u32, linha))
                    .set_value_number(p.valor.to_f64().unwrap_or_default());
            }
        }

        let mut saida = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&workbook, &mut saida)
            .map_err(|err| AppError::TemplateError(format!("falha ao serializar a planilha: {err}")))?;
        Ok(saida.into_inner())
    }

    /// Nome sugerido para o download do SAA.
    pub fn nome_arquivo_saa(&self, pagamento: &PaymentWithVendor) -> String {
        let primeiro_nome = pagamento
            .fornecedor
            .nome
            .split_whitespace()
            .next()
            .unwrap_or("Fornecedor");
        format!(
            "SAA_{}_{}_{}.docx",
            pagamento.pagamento.numero_saa,
            primeiro_nome,
            chrono::Local::now().format("%Y-%m-%d")
        )
    }

    /// Nome sugerido para o download da planilha.
    pub fn nome_arquivo_planilha(&self, projeto: &Project, controle: &MonthlyControl) -> String {
        format!(
            "Pagamentos_{}_{}-{}.xlsx",
            projeto.nome, controle.mes, controle.ano
        )
    }
}
