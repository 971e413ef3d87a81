//! Identifier case conversion used by templates

/// Convert snake_case to PascalCase
///
/// The first character is upper-cased. Each underscore is dropped and
/// upper-cases the character after it; everything else is kept as-is, so
/// `user_ID` becomes `UserID`.
pub fn snake_to_camel(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars();
    let mut upper_next = false;

    if let Some(first) = chars.next() {
        result.extend(first.to_uppercase());
    }

    for ch in chars {
        if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else if ch == '_' {
            upper_next = true;
        } else {
            result.push(ch);
        }
    }

    result
}

/// Lower-case only the first character
pub fn lowercase_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Keywords and reserved words that need a raw identifier (`r#type`)
pub const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "union", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers; these get a trailing `_`
pub const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Escape Rust keywords so `name` is usable as a field identifier
pub fn escape_rust_keyword(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Inverse of [`escape_rust_keyword`] for identifiers read back from source
pub fn unescape_field_name(ident: &str) -> String {
    if let Some(raw) = ident.strip_prefix("r#") {
        return raw.to_string();
    }
    match ident.strip_suffix('_') {
        Some(base) if NON_RAW_KEYWORDS.contains(&base) => base.to_string(),
        _ => ident.to_string(),
    }
}

/// Replace characters not allowed in identifiers with `_`; a leading digit gets a `_` prefix
pub fn sanitize_identifier(input: &str) -> String {
    let mut result: String = input
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// PascalCase type name for a table name, e.g. `order-items` to `OrderItems`
pub fn type_name(input: &str) -> String {
    snake_to_camel(&sanitize_identifier(input))
}

/// Field identifier for a column name: sanitized, then keyword-escaped
pub fn field_ident(input: &str) -> String {
    escape_rust_keyword(&sanitize_identifier(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("test"), "Test");
        assert_eq!(snake_to_camel("user_account"), "UserAccount");
        assert_eq!(snake_to_camel("value_double_precision"), "ValueDoublePrecision");
        assert_eq!(snake_to_camel("already_Upper"), "AlreadyUpper");
        assert_eq!(snake_to_camel("keepsCamel"), "KeepsCamel");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_snake_to_camel_consumes_only_one_underscore() {
        // The flagged character is emitted upper-cased even when it is itself an underscore
        assert_eq!(snake_to_camel("a__b"), "A_b");
        assert_eq!(snake_to_camel("trailing_"), "Trailing");
    }

    #[test]
    fn test_lowercase_first() {
        assert_eq!(lowercase_first("UserAccount"), "userAccount");
        assert_eq!(lowercase_first("ID"), "iD");
        assert_eq!(lowercase_first(""), "");
    }

    #[test]
    fn test_escape_rust_keyword() {
        assert_eq!(escape_rust_keyword("type"), "r#type");
        assert_eq!(escape_rust_keyword("final"), "r#final");
        assert_eq!(escape_rust_keyword("self"), "self_");
        assert_eq!(escape_rust_keyword("Self"), "Self_");
        assert_eq!(escape_rust_keyword("name"), "name");
    }

    #[test]
    fn test_unescape_field_name() {
        for keyword in RUST_KEYWORDS.iter().chain(NON_RAW_KEYWORDS) {
            assert_eq!(unescape_field_name(&escape_rust_keyword(keyword)), *keyword);
        }
        assert_eq!(unescape_field_name("value_"), "value_");
        assert_eq!(unescape_field_name("name"), "name");
    }

    #[test]
    fn test_sanitized_names() {
        assert_eq!(type_name("order-items"), "OrderItems");
        assert_eq!(type_name("Order Items"), "OrderItems");
        assert_eq!(type_name("user_account"), "UserAccount");
        assert_eq!(type_name("2fa_codes"), "_2faCodes");
        assert_eq!(field_ident("unit-price"), "unit_price");
        assert_eq!(field_ident("2nd"), "_2nd");
        assert_eq!(field_ident("box"), "r#box");
    }
}
