use crate::{MAX_COLUMN_NAME_LEN, MAX_TABLE_NAME_LEN};

/// Ensure an identifier is non-empty, ASCII, and free of quoting characters.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if !ident.is_ascii() {
        return Err(format!("ident '{ident}' must be ASCII"));
    }
    if ident.contains(['"', '\'', '.']) {
        return Err(format!("ident '{ident}' contains a quote or '.'"));
    }

    Ok(())
}

/// Ensure database, schema, and table names are valid and within the maximum length.
pub fn validate_table_name(name: &str) -> Result<(), String> {
    validate_ident(name)?;

    if name.len() > MAX_TABLE_NAME_LEN {
        return Err(format!(
            "name '{name}' exceeds max length {MAX_TABLE_NAME_LEN}"
        ));
    }

    Ok(())
}

pub fn validate_column_name(name: &str) -> Result<(), String> {
    if name.len() > MAX_COLUMN_NAME_LEN {
        return Err(format!(
            "column name '{name}' exceeds max length {MAX_COLUMN_NAME_LEN}"
        ));
    }

    Ok(())
}
