//! Identifier case conversion
//!
//! Converts snake_case storage names into the camelCase (fields) and
//! PascalCase (models) names exposed by the Prisma client.
//!
//! Segments are title-cased by upper-casing their first character only; the
//! rest of each segment is kept as written, so `user_ID` becomes `userID`.

/// Separator between words in a snake_case identifier
pub const SNAKE_SEPARATOR: char = '_';

/// Returns true if the identifier uses snake_case and needs renaming
///
/// Any identifier without an underscore is left alone by the rewriter.
pub fn is_snake_case(ident: &str) -> bool {
    ident.contains(SNAKE_SEPARATOR)
}

/// Convert a snake_case identifier to camelCase
///
/// The first segment is kept as written; every following segment is
/// title-cased. Empty segments (leading, trailing or doubled underscores)
/// contribute nothing.
pub fn to_camel(ident: &str) -> String {
    let mut segments = ident.split(SNAKE_SEPARATOR);
    let mut out = String::with_capacity(ident.len());

    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        push_title(&mut out, segment);
    }

    out
}

/// Convert a snake_case identifier to PascalCase
pub fn to_pascal(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for segment in ident.split(SNAKE_SEPARATOR) {
        push_title(&mut out, segment);
    }
    out
}

fn push_title(out: &mut String, segment: &str) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("fecha_creacion"), "fechaCreacion");
        assert_eq!(to_camel("cliente_id"), "clienteId");
        assert_eq!(to_camel("fecha_de_alta_real"), "fechaDeAltaReal");
    }

    #[test]
    fn test_to_pascal() {
        assert_eq!(to_pascal("gestoria_budget"), "GestoriaBudget");
        assert_eq!(to_pascal("Cliente_Empresa"), "ClienteEmpresa");
        assert_eq!(to_pascal("tax_model_2024"), "TaxModel2024");
    }

    #[test]
    fn test_without_underscore_is_noop_for_camel() {
        assert_eq!(to_camel("email"), "email");
        assert_eq!(to_camel("createdAt"), "createdAt");
        assert!(!is_snake_case("createdAt"));
    }

    #[test]
    fn test_segment_tail_is_preserved() {
        assert_eq!(to_camel("user_ID"), "userID");
        assert_eq!(to_pascal("api_URL_base"), "ApiURLBase");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(to_camel(""), "");
        assert_eq!(to_pascal(""), "");
        assert_eq!(to_camel("_private"), "Private");
        assert_eq!(to_camel("trailing_"), "trailing");
        assert_eq!(to_pascal("double__gap"), "DoubleGap");
        assert_eq!(to_pascal("_"), "");
    }

    #[test]
    fn test_digit_led_segment() {
        assert_eq!(to_camel("modelo_303_trimestral"), "modelo303Trimestral");
    }

    #[test]
    fn test_is_snake_case() {
        assert!(is_snake_case("fecha_creacion"));
        assert!(is_snake_case("Cliente_Empresa"));
        assert!(!is_snake_case("Cliente"));
    }
}
