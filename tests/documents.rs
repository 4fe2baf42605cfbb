mod common;

use std::io::{Cursor, Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDate;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use common::dec;
use contabil::AppError;
use contabil::models::control::MonthlyControl;
use contabil::models::payment::{Payment, PaymentStatus, PaymentWithVendor};
use contabil::models::project::{Project, ProjectStatus};
use contabil::models::settings::AppSettings;
use contabil::models::vendor::Vendor;
use contabil::services::DocumentService;
use contabil::services::document_service::ABA_PAGAMENTOS;

fn fornecedor() -> Vendor {
    Vendor {
        id: 1,
        codigo: "FORN001".into(),
        nome: "Alfa & Beta Ltda.".into(),
        cnpj_cpf: "12.345.678/0001-99".into(),
        banco_codigo: Some("001 - Banco do Brasil".into()),
        agencia: Some("1234".into()),
        conta_corrente: Some("56789-0".into()),
        pix: Some("pix@alfa.com".into()),
    }
}

fn projeto() -> Project {
    Project {
        id: 1,
        nome: "Cliente Alpha".into(),
        status: ProjectStatus::Ativo,
        banco: "341".into(),
        agencia: "4321".into(),
        conta_corrente: "98765-4".into(),
        controles_mensais_count: 1,
        template_docx_base64: None,
        template_xlsx_base64: None,
    }
}

fn controle() -> MonthlyControl {
    MonthlyControl {
        id: 1,
        projeto_id: 1,
        mes: 1,
        ano: 2025,
        total_pagamentos: 1,
        valor_total: dec("2500.00"),
    }
}

fn pagamento(valor: &str) -> PaymentWithVendor {
    PaymentWithVendor {
        pagamento: Payment {
            id: 1,
            controle_mensal_id: 1,
            fornecedor_id: 1,
            elemento_despesa: "Serviços de TI".into(),
            tipo_comprovante: "NF-e".into(),
            numero_comprovante: "12345".into(),
            valor: dec(valor),
            numero_saa: "SAA001".into(),
            status_saa: PaymentStatus::NaoGerado,
            data_pagamento: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        },
        fornecedor: fornecedor(),
    }
}

const TODOS_PLACEHOLDERS: [&str; 16] = [
    "SAA",
    "tituloProjeto",
    "tipoDespesa",
    "bancoPROJ",
    "agenciaPROJ",
    "contaCorrentePROJ",
    "Nomefornecedor",
    "CNPJ/CPF_FORNECEDOR",
    "Banco_/_Codigo",
    "Agência",
    "Conta_Corrente",
    "PIX",
    "Tipo_de_Comprovante",
    "Nº_do_Comprovante",
    "ValorPagar",
    "dataAtual",
];

// Monta um pacote DOCX mínimo: corpo com os placeholders pedidos, um
// cabeçalho com placeholder próprio e uma parte binária que deve atravessar a
// mesclagem intacta.
fn docx_de_teste(placeholders: &[&str]) -> Vec<u8> {
    let corpo: String = placeholders
        .iter()
        .map(|p| format!("<w:t>{{{p}}}</w:t>"))
        .collect();
    let documento = format!("<w:document><w:body>{corpo}</w:body></w:document>");

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opcoes = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", opcoes).unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", opcoes).unwrap();
    zip.write_all(documento.as_bytes()).unwrap();
    zip.start_file("word/header1.xml", opcoes).unwrap();
    zip.write_all(b"<w:hdr><w:t>{SAA}</w:t></w:hdr>").unwrap();
    zip.start_file("word/media/image1.png", opcoes).unwrap();
    zip.write_all(&[0x89, 0x50, 0x4E, 0x47]).unwrap();
    zip.finish().unwrap().into_inner()
}

fn parte(docx: &[u8], nome: &str) -> String {
    let mut pacote = ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut arquivo = pacote.by_name(nome).unwrap();
    let mut conteudo = String::new();
    arquivo.read_to_string(&mut conteudo).unwrap();
    conteudo
}

// Template XLSX mínimo: workbook novo com a aba renomeada para o nome que a
// exportação exige.
fn xlsx_de_teste(nome_aba: &str) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file();
    book.get_sheet_mut(&0).unwrap().set_name(nome_aba);
    let mut saida = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut saida).unwrap();
    saida.into_inner()
}

#[test]
fn saa_preenche_corpo_e_cabecalho_com_escape_xml() {
    let servico = DocumentService::new();
    let template = docx_de_teste(&TODOS_PLACEHOLDERS);

    let gerado = servico
        .gerar_saa(&pagamento("2500.00"), &projeto(), &template)
        .unwrap();

    let corpo = parte(&gerado, "word/document.xml");
    assert!(corpo.contains("SAA001"));
    assert!(corpo.contains("Cliente Alpha"));
    assert!(corpo.contains("R$ 2.500,00"));
    // O "&" do nome do fornecedor sai escapado, nunca cru.
    assert!(corpo.contains("Alfa &amp; Beta Ltda."));
    assert!(!corpo.contains("Alfa & Beta"));
    let hoje = chrono::Local::now().format("%d/%m/%Y").to_string();
    assert!(corpo.contains(&hoje));
    for placeholder in TODOS_PLACEHOLDERS {
        assert!(!corpo.contains(&format!("{{{placeholder}}}")));
    }

    // O cabeçalho também é mesclado.
    assert!(parte(&gerado, "word/header1.xml").contains("SAA001"));
    // A parte binária atravessa intacta.
    assert_eq!(
        parte(&gerado, "[Content_Types].xml"),
        "<Types/>".to_string()
    );
}

#[test]
fn saa_recusa_template_sem_placeholder() {
    let servico = DocumentService::new();
    // Todos menos o PIX.
    let parciais: Vec<&str> = TODOS_PLACEHOLDERS
        .iter()
        .copied()
        .filter(|p| *p != "PIX")
        .collect();
    let template = docx_de_teste(&parciais);

    let err = servico
        .gerar_saa(&pagamento("10.00"), &projeto(), &template)
        .unwrap_err();
    match err {
        AppError::TemplateError(msg) => assert!(msg.contains("{PIX}")),
        outro => panic!("erro inesperado: {outro}"),
    }
}

#[test]
fn exportacao_escreve_uma_linha_por_pagamento_a_partir_de_a2() {
    let servico = DocumentService::new();
    let template = xlsx_de_teste(ABA_PAGAMENTOS);

    let pagamentos = vec![pagamento("2500.00"), pagamento("1234.50")];
    let saida = servico
        .exportar_pagamentos(&pagamentos, &projeto(), &controle(), &template)
        .unwrap();

    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(&saida), true).unwrap();
    let aba = book.get_sheet_by_name(ABA_PAGAMENTOS).unwrap();

    assert_eq!(aba.get_value((1u32, 2u32)), "FORN001");
    assert_eq!(aba.get_value((2u32, 2u32)), "Alfa & Beta Ltda.");
    assert_eq!(aba.get_value((3u32, 2u32)), "12.345.678/0001-99");
    assert_eq!(aba.get_value((4u32, 2u32)), "Serviços de TI");
    assert_eq!(aba.get_value((5u32, 2u32)), "NF-e");
    assert_eq!(aba.get_value((6u32, 2u32)), "12345");
    // Valor numérico cru, sem máscara de moeda.
    assert_eq!(aba.get_value((7u32, 2u32)), "2500");
    assert_eq!(aba.get_value((8u32, 2u32)), "2025-01-15");
    assert_eq!(aba.get_value((9u32, 2u32)), "SAA001");
    assert_eq!(aba.get_value((10u32, 2u32)), "Não Gerado");
    assert_eq!(aba.get_value((11u32, 2u32)), "001 - Banco do Brasil");
    assert_eq!(aba.get_value((12u32, 2u32)), "1234");
    assert_eq!(aba.get_value((13u32, 2u32)), "56789-0");
    assert_eq!(aba.get_value((14u32, 2u32)), "pix@alfa.com");

    // Segundo pagamento na linha seguinte.
    assert_eq!(aba.get_value((7u32, 3u32)), "1234.5");
}

#[test]
fn exportacao_sem_pagamentos_devolve_planilha_valida() {
    let servico = DocumentService::new();
    let template = xlsx_de_teste(ABA_PAGAMENTOS);

    let saida = servico
        .exportar_pagamentos(&[], &projeto(), &controle(), &template)
        .unwrap();

    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(&saida), true).unwrap();
    let aba = book.get_sheet_by_name(ABA_PAGAMENTOS).unwrap();
    assert_eq!(aba.get_value((1u32, 2u32)), "");
}

#[test]
fn exportacao_exige_a_aba_pelo_nome_exato() {
    let servico = DocumentService::new();
    let template = xlsx_de_teste("Planilha1");

    let err = servico
        .exportar_pagamentos(&[pagamento("10.00")], &projeto(), &controle(), &template)
        .unwrap_err();
    assert!(matches!(err, AppError::SheetNotFound(nome) if nome == ABA_PAGAMENTOS));
}

#[test]
fn template_do_projeto_vence_o_padrao_das_configuracoes() {
    let servico = DocumentService::new();

    let mut projeto = projeto();
    projeto.template_docx_base64 = Some(BASE64.encode(b"do projeto"));
    let settings = AppSettings {
        template_docx_padrao_base64: Some(BASE64.encode(b"das configuracoes")),
        template_xlsx_padrao_base64: None,
    };

    let bytes = servico.resolve_docx_template(&projeto, &settings).unwrap();
    assert_eq!(bytes, b"do projeto".to_vec());

    // Sem override, vale o padrão.
    projeto.template_docx_base64 = None;
    let bytes = servico.resolve_docx_template(&projeto, &settings).unwrap();
    assert_eq!(bytes, b"das configuracoes".to_vec());

    // String vazia conta como ausente.
    projeto.template_docx_base64 = Some("".into());
    let bytes = servico.resolve_docx_template(&projeto, &settings).unwrap();
    assert_eq!(bytes, b"das configuracoes".to_vec());
}

#[test]
fn sem_template_algum_e_erro_orientando_a_configuracao() {
    let servico = DocumentService::new();

    let err = servico
        .resolve_xlsx_template(&projeto(), &AppSettings::default())
        .unwrap_err();
    match err {
        AppError::TemplateError(msg) => assert!(msg.contains("Configurações")),
        outro => panic!("erro inesperado: {outro}"),
    }
}

#[test]
fn base64_invalido_e_template_error() {
    let servico = DocumentService::new();

    let mut projeto = projeto();
    projeto.template_docx_base64 = Some("isto não é base64!!".into());
    let err = servico
        .resolve_docx_template(&projeto, &AppSettings::default())
        .unwrap_err();
    assert!(matches!(err, AppError::TemplateError(_)));
}

#[test]
fn nomes_de_arquivo_seguem_o_padrao_de_download() {
    let servico = DocumentService::new();

    let nome = servico.nome_arquivo_saa(&pagamento("10.00"));
    let hoje = chrono::Local::now().format("%Y-%m-%d").to_string();
    assert_eq!(nome, format!("SAA_SAA001_Alfa_{hoje}.docx"));

    assert_eq!(
        servico.nome_arquivo_planilha(&projeto(), &controle()),
        "Pagamentos_Cliente Alpha_1-2025.xlsx"
    );
}
