use crate::prelude::*;
use convert_case::{Case, Casing};
use rowform_schema::{
    MAX_COLUMNS,
    validate::naming::{validate_column_name, validate_ident, validate_table_name},
};
use std::collections::{HashMap, HashSet};

/// Validate a table declaration against the item it is attached to.
/// Every finding is reported, each spanned to the offending token.
pub fn table(node: &Table, item: &ItemStruct) -> Result<(), DarlingError> {
    let mut errors = DarlingError::accumulator();

    // Phase 1: the item must be a plain unit marker.
    if !matches!(item.fields, syn::Fields::Unit) {
        errors.push(
            DarlingError::custom("#[table] must be placed on a unit struct").with_span(&item.ident),
        );
    }
    if !item.generics.params.is_empty() {
        errors.push(
            DarlingError::custom("#[table] structs cannot be generic").with_span(&item.generics),
        );
    }

    // Phase 2: table identity.
    let identity = [
        ("database", node.db.value()),
        ("schema", node.schema_name()),
        ("table", node.table_name(&item.ident)),
    ];
    for (label, name) in identity {
        if let Err(e) = validate_table_name(&name) {
            errors.push(DarlingError::custom(format!("{label} {e}")).with_span(&item.ident));
        }
    }

    if node.columns.is_empty() {
        errors.push(
            DarlingError::custom("table declares no columns; add at least one column(...)")
                .with_span(&item.ident),
        );
    }
    if node.columns.len() > MAX_COLUMNS {
        errors.push(
            DarlingError::custom(format!(
                "table declares {} columns, more than the maximum of {MAX_COLUMNS}",
                node.columns.len()
            ))
            .with_span(&item.ident),
        );
    }

    // Phase 3: columns.
    let mut seen_names = HashMap::new();
    let mut seen_idents = HashSet::new();
    for column in &node.columns {
        errors.handle(validate_column(column));

        let name = column.sql_name();
        if let Some(first) = seen_names.insert(name.clone(), column.ident.to_string()) {
            errors.push(
                DarlingError::custom(format!(
                    "duplicate column name '{name}' (first declared by '{first}')"
                ))
                .with_span(&column.ident),
            );
        }
        if !seen_idents.insert(column.ident.to_string()) {
            errors.push(
                DarlingError::custom(format!("duplicate column ident '{}'", column.ident))
                    .with_span(&column.ident),
            );
        }
    }

    errors.finish()
}

fn validate_column(column: &Column) -> Result<(), DarlingError> {
    let ident = column.ident.to_string();
    let name = column.sql_name();

    if ident != ident.from_case(Case::Snake).to_case(Case::Snake) {
        return Err(
            DarlingError::custom(format!("column ident '{ident}' must be snake_case"))
                .with_span(&column.ident),
        );
    }

    validate_ident(&name)
        .and_then(|()| validate_column_name(&name))
        .map_err(|e| DarlingError::custom(e).with_span(&column.ident))?;

    let host = column.host();
    if !column.wire.accepts(host) {
        return Err(DarlingError::custom(format!(
            "column '{name}' binds host type {host} to wire type {}, which has no write mapping",
            column.wire
        ))
        .with_span(&column.ident));
    }

    Ok(())
}
