//! Table validation, run before a schema is published for lookup.

pub mod naming;

use crate::{MAX_COLUMNS, prelude::*};
use std::collections::BTreeMap;

/// Validate one table: identifiers, column count, per-column bindings, and
/// column-name uniqueness. Every finding is collected.
pub fn validate_table(table: &TableSchema) -> Result<(), ErrorTree> {
    let mut errs = ErrorTree::new();

    // Phase 1: table identity.
    for (label, name) in [
        ("database", table.id.database.0),
        ("schema", table.id.schema),
        ("table", table.id.table),
    ] {
        if let Err(e) = naming::validate_table_name(name) {
            err!(errs, "{label} {e}");
        }
    }

    if table.columns.is_empty() {
        err!(errs, "table {} declares no columns", table.id);
    }
    if table.columns.len() > MAX_COLUMNS {
        err!(
            errs,
            "table {} declares {} columns, more than the maximum of {MAX_COLUMNS}",
            table.id,
            table.columns.len()
        );
    }

    // Phase 2: each column on its own.
    for column in table.columns {
        if let Err(tree) = column.validate() {
            errs.merge_for(column.name, tree);
        }
    }

    // Phase 3: uniqueness across the table.
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, column) in table.columns.iter().enumerate() {
        if let Some(prev) = seen.insert(column.name, index) {
            errs.add_for(
                column.name,
                format!(
                    "duplicate column name '{}' at positions {prev} and {index}",
                    column.name
                ),
            );
        }
    }

    errs.result()
}
