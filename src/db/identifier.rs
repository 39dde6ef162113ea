use anyhow::Result;

/// PostgreSQL truncates identifiers longer than this many bytes
pub const MAX_IDENTIFIER_LEN: usize = 63;

/// Allow alphanumeric, underscore, and dollar sign (PostgreSQL identifier rules)
pub fn is_valid_identifier(name: &str) -> bool {
    let Some(first_char) = name.chars().next() else {
        return false;
    };
    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return false;
    }

    name.len() <= MAX_IDENTIFIER_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Validate a database name and return it quoted for use in DDL
///
/// `CREATE DATABASE` cannot take its name as a bind parameter, so the name is
/// checked against the identifier allow-list before being interpolated.
pub fn database_identifier(name: &str) -> Result<String> {
    if !is_valid_identifier(name) {
        return Err(anyhow::anyhow!(
            "Invalid database name '{}': must contain only letters, numbers, underscores, and dollar signs, starting with letter or underscore (max {} bytes)",
            name,
            MAX_IDENTIFIER_LEN
        ));
    }
    Ok(quote_ident(name))
}
