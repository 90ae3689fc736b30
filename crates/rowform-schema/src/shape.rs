//! Row Shape Deriver.
//!
//! A row shape is never authored by hand: it is a pure function of a
//! table schema and a scenario, recomputed wherever it is needed.

use crate::{SchemaError, prelude::*};
use std::fmt;

///
/// SlotRepr
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum SlotRepr {
    Host(HostType),
    Wire(WireType),
}

///
/// SlotType
///
/// Concrete type of one slot. The Null wrapper and the Default wrapper are
/// flags rather than nested boxes: Default is always the outer wrapper and
/// neither can appear twice, so `Null(Null(_))` and `Null(Default(_))` have
/// no representation.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct SlotType {
    repr: SlotRepr,
    nullable: bool,
    defaulted: bool,
}

impl SlotType {
    #[must_use]
    pub const fn host(host: HostType) -> Self {
        Self {
            repr: SlotRepr::Host(host),
            nullable: false,
            defaulted: false,
        }
    }

    #[must_use]
    pub const fn wire(wire: WireType) -> Self {
        Self {
            repr: SlotRepr::Wire(wire),
            nullable: false,
            defaulted: false,
        }
    }

    /// Wrap in the Null wrapper; wrapping an already-nullable slot is a no-op.
    #[must_use]
    pub const fn null(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Wrap in the Default wrapper; wrapping twice is a no-op.
    #[must_use]
    pub const fn defaulted(self) -> Self {
        Self {
            defaulted: true,
            ..self
        }
    }

    #[must_use]
    pub const fn repr(&self) -> SlotRepr {
        self.repr
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        self.defaulted
    }

    /// Number of wrappers around the base type (0, 1, or 2).
    #[must_use]
    pub const fn depth(&self) -> u8 {
        self.nullable as u8 + self.defaulted as u8
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.defaulted {
            write!(f, "Default(")?;
        }

        match self.repr {
            SlotRepr::Host(host) if self.nullable => write!(f, "Null({host})")?,
            SlotRepr::Host(host) => write!(f, "{host}")?,
            SlotRepr::Wire(wire) if self.nullable => write!(f, "Nullable({wire})")?,
            SlotRepr::Wire(wire) => write!(f, "NonNullable({wire})")?,
        }

        if self.defaulted {
            write!(f, ")")?;
        }

        Ok(())
    }
}

/// Map one column to its slot type under `scenario`.
#[must_use]
pub const fn slot_type(scenario: Scenario, column: &ColumnDescriptor) -> SlotType {
    match scenario {
        Scenario::HostRead => {
            let ty = SlotType::host(column.host);
            if column.nullable { ty.null() } else { ty }
        }
        Scenario::HostInsert => {
            let mut ty = SlotType::host(column.host);
            if column.nullable {
                ty = ty.null();
            }
            if column.has_default {
                ty = ty.defaulted();
            }
            ty
        }
        Scenario::WireRead => {
            let ty = SlotType::wire(column.wire);
            if column.nullable { ty.null() } else { ty }
        }
        Scenario::WireReadOuter => SlotType::wire(column.wire).null(),
        Scenario::WireWrite => {
            let ty = slot_type(Scenario::WireRead, column);
            if column.has_default {
                ty.defaulted()
            } else {
                ty
            }
        }
    }
}

///
/// Slot
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Slot {
    pub column: ColumnRef,
    pub ty: SlotType,
}

///
/// RowShape
///
/// Scenario-specific ordered list of tagged, typed slots.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RowShape {
    pub table: TableId,
    pub scenario: Scenario,
    pub slots: Vec<Slot>,
}

impl RowShape {
    /// Derive the shape of `table` for `scenario`. Pure and total.
    #[must_use]
    pub fn derive(table: &TableSchema, scenario: Scenario) -> Self {
        let slots = table
            .columns
            .iter()
            .map(|column| Slot {
                column: ColumnRef::new(table.id, column.name),
                ty: slot_type(scenario, column),
            })
            .collect();

        Self {
            table: table.id,
            scenario,
            slots,
        }
    }

    /// Look up a slot by column name.
    pub fn slot(&self, column: &str) -> Result<&Slot, SchemaError> {
        self.slots
            .iter()
            .find(|slot| slot.column.column == column)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: self.table,
                column: column.to_string(),
                scenario: self.scenario,
            })
    }

    /// Look up a slot by tagged reference; a reference into another table
    /// never resolves.
    pub fn slot_for(&self, column: &ColumnRef) -> Result<&Slot, SchemaError> {
        self.slots
            .iter()
            .find(|slot| slot.column == *column)
            .ok_or_else(|| SchemaError::unknown_ref(self.table, column, self.scenario))
    }

    /// Outer-side form of a wire-read shape: every slot becomes nullable.
    /// Applying it to a slot that is already nullable leaves it unchanged.
    #[must_use]
    pub fn outer(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|slot| Slot {
                column: slot.column,
                ty: slot.ty.null(),
            })
            .collect();

        Self {
            table: self.table,
            scenario: Scenario::WireReadOuter,
            slots,
        }
    }

    /// `(column name, slot type)` pairs in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, SlotType)> + '_ {
        self.slots.iter().map(|slot| (slot.column.column, slot.ty))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const USER: TableSchema = TableSchema {
        id: TableId::new("app", "public", "user"),
        columns: &[
            ColumnDescriptor::new("id", WireType::Int4).defaulted(),
            ColumnDescriptor::new("name", WireType::Text),
            ColumnDescriptor::new("favorite_number", WireType::Int4)
                .nullable()
                .defaulted(),
            ColumnDescriptor::new("age", WireType::Int4).nullable(),
        ],
    };

    fn rendered(scenario: Scenario) -> Vec<(String, String)> {
        RowShape::derive(&USER, scenario)
            .columns()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
            .collect()
    }

    #[test]
    fn host_read_wraps_nullable_columns_only() {
        assert_eq!(
            rendered(Scenario::HostRead),
            pairs(&[
                ("id", "Int32"),
                ("name", "Text"),
                ("favorite_number", "Null(Int32)"),
                ("age", "Null(Int32)"),
            ])
        );
    }

    #[test]
    fn host_insert_keeps_default_outside_null() {
        assert_eq!(
            rendered(Scenario::HostInsert),
            pairs(&[
                ("id", "Default(Int32)"),
                ("name", "Text"),
                ("favorite_number", "Default(Null(Int32))"),
                ("age", "Null(Int32)"),
            ])
        );
    }

    #[test]
    fn wire_scenarios_follow_their_rules() {
        assert_eq!(
            rendered(Scenario::WireRead),
            pairs(&[
                ("id", "NonNullable(Int4)"),
                ("name", "NonNullable(Text)"),
                ("favorite_number", "Nullable(Int4)"),
                ("age", "Nullable(Int4)"),
            ])
        );
        assert_eq!(
            rendered(Scenario::WireReadOuter),
            pairs(&[
                ("id", "Nullable(Int4)"),
                ("name", "Nullable(Text)"),
                ("favorite_number", "Nullable(Int4)"),
                ("age", "Nullable(Int4)"),
            ])
        );
        assert_eq!(
            rendered(Scenario::WireWrite),
            pairs(&[
                ("id", "Default(NonNullable(Int4))"),
                ("name", "NonNullable(Text)"),
                ("favorite_number", "Default(Nullable(Int4))"),
                ("age", "Nullable(Int4)"),
            ])
        );
    }

    #[test]
    fn outer_conversion_matches_outer_derivation() {
        let outer = RowShape::derive(&USER, Scenario::WireRead).outer();

        assert_eq!(outer, RowShape::derive(&USER, Scenario::WireReadOuter));
        assert_eq!(outer.outer(), outer);
    }

    #[test]
    fn unknown_column_names_the_scenario() {
        let shape = RowShape::derive(&USER, Scenario::HostInsert);
        let err = shape.slot("email").unwrap_err();

        assert!(matches!(
            err,
            SchemaError::UnknownColumn {
                scenario: Scenario::HostInsert,
                ..
            }
        ));
        assert!(err.to_string().contains("'email'"));
    }

    #[test]
    fn slot_for_rejects_other_tables() {
        let shape = RowShape::derive(&USER, Scenario::HostRead);
        let foreign = ColumnRef::new(TableId::new("app", "public", "post"), "id");

        assert!(shape.slot_for(&ColumnRef::new(USER.id, "age")).is_ok());
        assert!(matches!(
            shape.slot_for(&foreign),
            Err(SchemaError::UnknownColumn { table, column, .. })
                if table == USER.id && column == "app:public.post.id"
        ));
    }

    fn arb_wire() -> impl Strategy<Value = WireType> {
        prop_oneof![
            Just(WireType::Bool),
            Just(WireType::Bytea),
            Just(WireType::Float8),
            Just(WireType::Int2),
            Just(WireType::Int4),
            Just(WireType::Int8),
            Just(WireType::Json),
            Just(WireType::Text),
        ]
    }

    fn arb_column() -> impl Strategy<Value = ColumnDescriptor> {
        (arb_wire(), any::<bool>(), any::<bool>()).prop_map(|(wire, nullable, has_default)| {
            ColumnDescriptor {
                name: "c",
                nullable,
                has_default,
                wire,
                host: wire.default_host(),
            }
        })
    }

    fn arb_scenario() -> impl Strategy<Value = Scenario> {
        prop::sample::select(Scenario::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(column in arb_column(), scenario in arb_scenario()) {
            prop_assert_eq!(slot_type(scenario, &column), slot_type(scenario, &column));
        }

        #[test]
        fn outer_slots_are_never_double_wrapped(column in arb_column()) {
            let read = slot_type(Scenario::WireRead, &column);
            let outer = slot_type(Scenario::WireReadOuter, &column);

            prop_assert_eq!(read.null(), outer);
            prop_assert_eq!(outer.null(), outer);
            prop_assert!(outer.depth() == 1);
        }

        #[test]
        fn write_defaults_iff_column_defaults(column in arb_column()) {
            let write = slot_type(Scenario::WireWrite, &column);

            prop_assert_eq!(write.is_defaulted(), column.has_default);
            prop_assert_eq!(write.is_nullable(), column.nullable);
        }
    }
}
