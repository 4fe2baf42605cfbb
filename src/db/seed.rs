// src/db/seed.rs
//
// Dados iniciais de demonstração, instalados uma única vez quando o
// armazenamento está vazio (primeira execução). A presença da chave de
// fornecedores é o marcador de "já inicializado".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crate::{
    common::error::AppError,
    db::to_value,
    models::{
        control::MonthlyControl,
        payment::{Payment, PaymentStatus},
        project::{Project, ProjectStatus},
        settings::AppSettings,
        vendor::Vendor,
    },
    store::{
        KEY_CONTROLS, KEY_PAYMENTS, KEY_PROJECTS, KEY_SEQUENCES, KEY_SETTINGS, KEY_VENDORS, Store,
    },
};

fn data(ano: i32, mes: u32, dia: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(ano, mes, dia).expect("data de seed válida")
}

fn fornecedores_iniciais() -> Vec<Vendor> {
    vec![
        Vendor {
            id: 1,
            codigo: "FORN001".into(),
            nome: "Tech Solutions Ltda.".into(),
            cnpj_cpf: "12.345.678/0001-99".into(),
            banco_codigo: Some("001 - Banco do Brasil".into()),
            agencia: Some("1234".into()),
            conta_corrente: Some("56789-0".into()),
            pix: Some("pix@tech.com".into()),
        },
        Vendor {
            id: 2,
            codigo: "FORN002".into(),
            nome: "Marketing Criativo S.A.".into(),
            cnpj_cpf: "98.765.432/0001-11".into(),
            banco_codigo: Some("237 - Bradesco".into()),
            agencia: Some("4321".into()),
            conta_corrente: Some("09876-5".into()),
            pix: Some("financeiro@marketing.com".into()),
        },
        Vendor {
            id: 3,
            codigo: "FORN003".into(),
            nome: "João da Silva MEI".into(),
            cnpj_cpf: "123.456.789-00".into(),
            banco_codigo: Some("341 - Itaú".into()),
            agencia: Some("5678".into()),
            conta_corrente: Some("12345-6".into()),
            pix: Some("joao.silva@email.com".into()),
        },
    ]
}

fn projetos_iniciais() -> Vec<Project> {
    let projeto = |id: i64, nome: &str, status, banco: &str, agencia: &str, conta: &str, n| Project {
        id,
        nome: nome.into(),
        status,
        banco: banco.into(),
        agencia: agencia.into(),
        conta_corrente: conta.into(),
        controles_mensais_count: n,
        template_docx_base64: None,
        template_xlsx_base64: None,
    };
    vec![
        projeto(1, "Cliente Alpha", ProjectStatus::Ativo, "001", "1111", "11111-1", 3),
        projeto(2, "Cliente Beta", ProjectStatus::Ativo, "237", "2222", "22222-2", 2),
        projeto(3, "Cliente Gamma (Antigo)", ProjectStatus::Arquivado, "341", "3333", "33333-3", 0),
    ]
}

fn controles_iniciais() -> Vec<MonthlyControl> {
    let controle = |id, projeto_id, mes, ano, total: i64, valor: Decimal| MonthlyControl {
        id,
        projeto_id,
        mes,
        ano,
        total_pagamentos: total,
        valor_total: valor,
    };
    vec![
        controle(1, 1, 1, 2025, 2, Decimal::new(750_000, 2)),
        controle(2, 1, 2, 2025, 1, Decimal::new(300_000, 2)),
        controle(3, 1, 3, 2025, 0, Decimal::ZERO),
        controle(4, 2, 1, 2025, 1, Decimal::new(125_050, 2)),
        controle(5, 2, 2, 2025, 1, Decimal::new(400_000, 2)),
    ]
}

fn pagamentos_iniciais() -> Vec<Payment> {
    let pagamento = |id,
                     controle_mensal_id,
                     fornecedor_id,
                     despesa: &str,
                     comprovante: &str,
                     valor: Decimal,
                     saa: &str,
                     status,
                     dia: NaiveDate| Payment {
        id,
        controle_mensal_id,
        fornecedor_id,
        elemento_despesa: despesa.into(),
        tipo_comprovante: "NF-e".into(),
        numero_comprovante: comprovante.into(),
        valor,
        numero_saa: saa.into(),
        status_saa: status,
        data_pagamento: dia,
    };

    let mut pagamentos = vec![
        pagamento(1, 1, 1, "Serviços de TI", "12345", Decimal::new(500_000, 2), "SAA001", PaymentStatus::NaoGerado, data(2025, 1, 15)),
        pagamento(2, 1, 2, "Marketing Digital", "67890", Decimal::new(250_000, 2), "SAA002", PaymentStatus::Gerado, data(2025, 1, 20)),
        pagamento(3, 2, 1, "Manutenção de Sistema", "12350", Decimal::new(300_000, 2), "SAA003", PaymentStatus::NaoGerado, data(2025, 2, 10)),
        pagamento(4, 4, 3, "Consultoria", "001", Decimal::new(125_050, 2), "SAA004", PaymentStatus::NaoGerado, data(2025, 1, 25)),
        pagamento(5, 5, 2, "Campanha Publicitária", "67900", Decimal::new(400_000, 2), "SAA005", PaymentStatus::Gerado, data(2025, 2, 18)),
    ];
    pagamentos[3].tipo_comprovante = "RPA".into();
    pagamentos
}

/// Instala os dados de demonstração se o armazenamento estiver vazio.
/// Idempotente: chamadas repetidas não tocam em nada já gravado.
pub async fn ensure_seed(store: &dyn Store) -> Result<(), AppError> {
    if store.load(KEY_VENDORS).await?.is_some() {
        return Ok(());
    }

    tracing::info!("armazenamento vazio, instalando dados iniciais");

    store
        .save_many(vec![
            (KEY_VENDORS.to_string(), to_value(&fornecedores_iniciais())?),
            (KEY_PROJECTS.to_string(), to_value(&projetos_iniciais())?),
            (KEY_CONTROLS.to_string(), to_value(&controles_iniciais())?),
            (KEY_PAYMENTS.to_string(), to_value(&pagamentos_iniciais())?),
            (KEY_SETTINGS.to_string(), to_value(&AppSettings::default())?),
            (
                KEY_SEQUENCES.to_string(),
                json!({
                    "contabil_vendors": 3,
                    "contabil_projects": 3,
                    "contabil_controls": 5,
                    "contabil_payments": 5,
                }),
            ),
        ])
        .await?;

    Ok(())
}
