use crate::{compare::ComparabilityError, value::ValueError};
use rowform_schema::{
    SchemaError,
    node::{ColumnRef, TableId},
    types::Scenario,
};
use thiserror::Error as ThisError;

///
/// Error
///
/// Runtime error surface: schema, comparability, and slot conversion
/// failures, plus catalog lifecycle misuse.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Comparability(#[from] ComparabilityError),

    #[error("a catalog is already installed")]
    CatalogInstalled,

    #[error("no catalog has been installed")]
    CatalogMissing,

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("slot {column} of the {scenario} row: {source}")]
    Slot {
        column: ColumnRef,
        scenario: Scenario,
        source: ValueError,
    },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl Error {
    /// A value that cannot occupy `column` in a `scenario` row.
    #[must_use]
    pub const fn slot(column: ColumnRef, scenario: Scenario, source: ValueError) -> Self {
        Self::Slot {
            column,
            scenario,
            source,
        }
    }

    /// A column that is not part of the `scenario` row of `table`.
    #[must_use]
    pub fn unknown_column(table: TableId, column: &ColumnRef, scenario: Scenario) -> Self {
        Self::Schema(SchemaError::unknown_ref(table, column, scenario))
    }
}
