//! `#[table(...)]`: one declaration in, every scenario row type out.

mod r#gen;
mod helper;
mod node;
mod validate;

///
/// Prelude
///

mod prelude {
    pub use crate::{helper::*, node::*};
    pub use darling::{Error as DarlingError, FromMeta, ast::NestedMeta};
    pub use proc_macro2::{Span, TokenStream};
    pub use quote::{ToTokens, format_ident, quote};
    pub use rowform_schema::types::{HostType, Scenario, WireType};
    pub use syn::{Ident, ItemStruct, LitStr, Visibility};
}

use prelude::*;

/// Declare a table on a unit struct.
///
/// ```ignore
/// #[table(
///     db = "app",
///     name = "user",
///     column(ident = "id", wire = "Int4", default),
///     column(ident = "favorite_number", name = "favoriteNumber", wire = "Int4", nullable, default),
/// )]
/// pub struct User;
/// ```
#[proc_macro_attribute]
pub fn table(
    args: proc_macro::TokenStream,
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    table_impl(args.into(), input.into()).into()
}

fn table_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    // Phase 1: parse the item and the attribute arguments.
    let item = match syn::parse2::<ItemStruct>(input) {
        Ok(item) => item,
        Err(err) => return err.to_compile_error(),
    };
    let metas = match NestedMeta::parse_meta_list(args) {
        Ok(metas) => metas,
        Err(err) => return DarlingError::from(err).write_errors(),
    };
    let node = match Table::from_list(&metas) {
        Ok(node) => node,
        Err(err) => return err.write_errors(),
    };

    // Phase 2: reject anything the deriver cannot map.
    if let Err(err) = validate::table(&node, &item) {
        return err.write_errors();
    }

    // Phase 3: emit.
    r#gen::TableGen::new(&node, &item).to_token_stream()
}
