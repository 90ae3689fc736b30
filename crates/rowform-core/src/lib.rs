//! Core runtime for rowform: wire markers, slot wrappers, expressions, the
//! comparability registry, the catalog, and the row traits generated code
//! implements.

pub mod catalog;
pub mod compare;
pub mod error;
pub mod expr;
pub mod obs;
pub mod ops;
pub mod traits;
pub mod value;
pub mod wire;
pub mod wrap;

pub use error::Error;

///
/// Prelude
///
/// Vocabulary needed to declare tables and build expressions.
///

pub mod prelude {
    pub use crate::{
        catalog::{Catalog, CatalogBuilder, catalog},
        compare::{Comparability, DenyReason},
        expr::{Expr, ExprNode, WriteSlot},
        ops::{ExprBuilder, Operand},
        traits::{Column, Row, Slot, Table},
        value::{SlotValue, Value},
        wire::{NotNull, Nullable},
        wrap::{Defaultable, Null},
    };
}
