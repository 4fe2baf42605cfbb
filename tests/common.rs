#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use contabil::config::AppState;
use contabil::db::control_repo::ControlInput;
use contabil::db::payment_repo::PaymentInput;
use contabil::db::project_repo::ProjectInput;
use contabil::db::vendor_repo::VendorInput;
use contabil::models::control::MonthlyControl;
use contabil::models::project::{Project, ProjectStatus};
use contabil::models::vendor::Vendor;
use contabil::store::MemoryStore;

pub struct Suite {
    pub app: AppState,
}

impl Suite {
    /// Estado limpo sobre um armazenamento em memória, sem seed.
    pub fn setup() -> Self {
        Suite {
            app: AppState::with_store(Arc::new(MemoryStore::new())),
        }
    }

    pub fn fornecedor_input() -> VendorInput {
        VendorInput {
            codigo: "FORN001".into(),
            nome: "Tech Solutions Ltda.".into(),
            cnpj_cpf: "12.345.678/0001-99".into(),
            banco_codigo: Some("001 - Banco do Brasil".into()),
            agencia: Some("1234".into()),
            conta_corrente: Some("56789-0".into()),
            pix: Some("pix@tech.com".into()),
        }
    }

    pub fn projeto_input() -> ProjectInput {
        ProjectInput {
            nome: "Cliente Alpha".into(),
            status: ProjectStatus::Ativo,
            banco: "001".into(),
            agencia: "1111".into(),
            conta_corrente: "11111-1".into(),
            template_docx_base64: None,
            template_xlsx_base64: None,
        }
    }

    pub fn pagamento_input(controle_id: i64, fornecedor_id: i64, valor: &str) -> PaymentInput {
        PaymentInput {
            controle_mensal_id: controle_id,
            fornecedor_id,
            elemento_despesa: "Serviços de TI".into(),
            tipo_comprovante: "NF-e".into(),
            numero_comprovante: "12345".into(),
            valor: dec(valor),
            numero_saa: None,
            data_pagamento: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }
    }

    pub async fn fornecedor(&self) -> Vendor {
        self.app
            .vendors
            .create(Self::fornecedor_input())
            .await
            .unwrap()
    }

    pub async fn projeto(&self) -> Project {
        self.app
            .projects
            .create(Self::projeto_input())
            .await
            .unwrap()
    }

    pub async fn controle(&self, projeto_id: i64) -> MonthlyControl {
        self.app
            .controls
            .create(ControlInput {
                projeto_id,
                mes: 1,
                ano: 2025,
            })
            .await
            .unwrap()
    }
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
