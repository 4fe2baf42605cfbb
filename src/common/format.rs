// src/common/format.rs

use rust_decimal::Decimal;

/// Formata um valor monetário no padrão pt-BR: "R$ 2.500,00".
///
/// Os documentos gerados usam esse formato nos placeholders de valor; a
/// planilha exportada recebe o número cru, sem formatação.
pub fn format_currency(valor: Decimal) -> String {
    let negativo = valor.is_sign_negative();
    let abs = valor.abs();

    // "2500.00" -> inteiro "2500" + centavos "00"
    let texto = format!("{:.2}", abs);
    let (inteiro, centavos) = texto.split_once('.').unwrap_or((texto.as_str(), "00"));

    // Agrupa os milhares com ponto, da direita para a esquerda.
    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(inteiro.len() + inteiro.len() / 3);
    for (i, c) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*c);
    }

    let sinal = if negativo { "-" } else { "" };
    format!("{}R$ {},{}", sinal, agrupado, centavos)
}
