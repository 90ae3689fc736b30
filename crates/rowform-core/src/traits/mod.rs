//! Row-level traits implemented by `#[table]`-generated code.

use crate::{
    error::Error,
    expr::Expr,
    value::{HostScalar, SlotValue, Value},
    wire::{Nullability, WireKind},
};
use rowform_schema::{
    node::{ColumnRef, TableId, TableSchema},
    shape::RowShape,
    types::Scenario,
};

// ============================================================================
// TABLES & COLUMNS
// ============================================================================

///
/// Table
///
/// A declared table, with one generated row type per scenario.
///

pub trait Table: Sized + 'static {
    const SCHEMA: TableSchema;

    type Read: Row<Table = Self>;
    type Insert: Row<Table = Self>;
    type Wire: Row<Table = Self>;
    type WireOuter: Row<Table = Self>;
    type Write: Row<Table = Self>;

    #[must_use]
    fn id() -> TableId {
        Self::SCHEMA.id
    }

    /// Derived shape for `scenario`.
    #[must_use]
    fn shape(scenario: Scenario) -> RowShape {
        RowShape::derive(&Self::SCHEMA, scenario)
    }
}

///
/// Column
///
/// Zero-sized tag for one column of `Self::Table`.
///

pub trait Column: Copy + 'static {
    type Table: Table;
    type Host: HostScalar;
    type Wire: WireKind;
    type Null: Nullability;

    const NAME: &'static str;
    const HAS_DEFAULT: bool;
    const REF: ColumnRef;

    /// The bare, tagged column expression.
    #[must_use]
    fn expr() -> Expr<Self::Wire, Self::Null> {
        Expr::column(Self::REF)
    }
}

// ============================================================================
// ROWS
// ============================================================================

///
/// Slot
/// Typed access to the field for column `C`.
///

pub trait Slot<C: Column> {
    type Value: SlotValue;

    fn slot(&self) -> &Self::Value;
    fn slot_mut(&mut self) -> &mut Self::Value;
}

///
/// Row
///
/// One scenario's row type. Dynamic access goes through `Value` and is
/// checked against the slot type; typed access goes through [`Slot`].
///

pub trait Row: Sized {
    type Table: Table;

    const SCENARIO: Scenario;

    #[must_use]
    fn shape() -> RowShape {
        <Self::Table as Table>::shape(Self::SCENARIO)
    }

    fn get_value(&self, column: &ColumnRef) -> Result<Value, Error>;

    fn set_value(&mut self, column: &ColumnRef, value: Value) -> Result<(), Error>;

    fn field<C>(&self) -> &<Self as Slot<C>>::Value
    where
        C: Column<Table = Self::Table>,
        Self: Slot<C>,
    {
        <Self as Slot<C>>::slot(self)
    }

    fn field_mut<C>(&mut self) -> &mut <Self as Slot<C>>::Value
    where
        C: Column<Table = Self::Table>,
        Self: Slot<C>,
    {
        <Self as Slot<C>>::slot_mut(self)
    }

    #[must_use]
    fn unknown_column(column: &ColumnRef) -> Error {
        Error::unknown_column(<Self::Table as Table>::id(), column, Self::SCENARIO)
    }
}
