use crate::{prelude::*, validate::validate_table};
use derive_more::{Deref, Display};
use std::fmt;

///
/// DatabaseId
///
/// Opaque identity of a database. Tables sharing one are eligible for
/// comparison; tables in different databases never are.
///

#[derive(
    Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct DatabaseId(pub &'static str);

///
/// TableId
///
/// (database, schema, table) triple; the only identity a table has.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TableId {
    pub database: DatabaseId,
    pub schema: &'static str,
    pub table: &'static str,
}

impl TableId {
    #[must_use]
    pub const fn new(database: &'static str, schema: &'static str, table: &'static str) -> Self {
        Self {
            database: DatabaseId(database),
            schema,
            table,
        }
    }

    #[must_use]
    pub fn same_database(&self, other: &Self) -> bool {
        self.database == other.database
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.database, self.schema, self.table)
    }
}

///
/// ColumnRef
///
/// Tagged column reference: names one column of one table.
/// Used as a lookup key and capability token, never dereferenced for data.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ColumnRef {
    pub table: TableId,
    pub column: &'static str,
}

impl ColumnRef {
    #[must_use]
    pub const fn new(table: TableId, column: &'static str) -> Self {
        Self { table, column }
    }

    #[must_use]
    pub fn same_database(&self, other: &Self) -> bool {
        self.table.same_database(&other.table)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

///
/// TableSchema
///
/// Named, ordered collection of column descriptors.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableSchema {
    pub id: TableId,
    pub columns: &'static [ColumnDescriptor],
}

impl TableSchema {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn contains(&self, column: &ColumnRef) -> bool {
        column.table == self.id && self.get(column.column).is_some()
    }

    #[must_use]
    pub fn column_ref(&self, name: &str) -> Option<ColumnRef> {
        self.get(name).map(|c| ColumnRef::new(self.id, c.name))
    }

    pub fn column_refs(&self) -> impl Iterator<Item = ColumnRef> + '_ {
        self.columns.iter().map(|c| ColumnRef::new(self.id, c.name))
    }

    /// Whether `other` declares the same column set, independent of order.
    #[must_use]
    pub fn same_columns(&self, other: &Self) -> bool {
        let mut lhs = self.columns.to_vec();
        let mut rhs = other.columns.to_vec();
        lhs.sort_by_key(|c| c.name);
        rhs.sort_by_key(|c| c.name);

        lhs == rhs
    }

    pub fn validate(&self) -> Result<(), ErrorTree> {
        validate_table(self)
    }
}
