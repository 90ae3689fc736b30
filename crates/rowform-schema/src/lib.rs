//! Schema model for rowform: column descriptors, table schemas, scenario
//! tags, and the pure row-shape deriver.

pub mod error;
pub mod node;
pub mod shape;
pub mod types;
pub mod validate;

/// Maximum length for table and schema identifiers.
pub const MAX_TABLE_NAME_LEN: usize = 63;

/// Maximum length for column identifiers.
pub const MAX_COLUMN_NAME_LEN: usize = 63;

/// Maximum number of columns a single table may declare.
pub const MAX_COLUMNS: usize = 256;

use crate::types::Scenario;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        shape::{RowShape, Slot, SlotRepr, SlotType},
        types::{HostType, Scenario, WireType},
    };
    pub use serde::Serialize;
}

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("column '{column}' does not exist in the {scenario} shape of {table}")]
    UnknownColumn {
        table: node::TableId,
        column: String,
        scenario: Scenario,
    },

    #[error("table {0} is not registered")]
    UnknownTable(node::TableId),

    #[error("schema validation failed:\n{0}")]
    Validation(error::ErrorTree),
}

impl SchemaError {
    /// A tagged reference with no slot in the `scenario` shape of `table`.
    /// The full reference is reported, so a column of another table stays
    /// distinguishable from a same-named local one.
    #[must_use]
    pub fn unknown_ref(
        table: node::TableId,
        column: &node::ColumnRef,
        scenario: Scenario,
    ) -> Self {
        Self::UnknownColumn {
            table,
            column: column.to_string(),
            scenario,
        }
    }
}
