//! ## Crate layout
//! - `core`: wrappers, expressions, comparability registry, catalog, row traits.
//! - `schema`: column/table model, scenario tags, shape deriver, validation.
//! - `macros`: the `#[table]` attribute.
//!
//! Generated code resolves everything through `::rowform::...`, so a crate
//! declaring tables only needs this one dependency.

pub use rowform_core as core;
pub use rowform_schema as schema;

pub mod macros {
    pub use rowform_schema_derive::table;
}

extern crate self as rowform;

/// re-exports
///
/// macros can use these, stops the user having to specify all the dependencies
/// in the Cargo.toml file manually
#[doc(hidden)]
pub mod __reexports {
    pub use serde;
}

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    Error,
    catalog::{Catalog, CatalogBuilder, catalog},
};
pub use macros::table;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::prelude::*,
        macros::table,
        schema::{
            node::{ColumnRef, TableId},
            shape::RowShape,
            types::{HostType, Scenario, WireType},
        },
    };
}
