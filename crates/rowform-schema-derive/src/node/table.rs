use crate::prelude::*;
use convert_case::{Case, Casing};

const DEFAULT_SCHEMA: &str = "public";

///
/// Table
///
/// `#[table(db = "...", schema = "...", name = "...", column(...), ...)]`
///

#[derive(Debug, FromMeta)]
pub struct Table {
    pub db: LitStr,

    #[darling(default)]
    pub schema: Option<LitStr>,

    #[darling(default)]
    pub name: Option<LitStr>,

    #[darling(multiple, rename = "column")]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn schema_name(&self) -> String {
        self.schema
            .as_ref()
            .map_or_else(|| DEFAULT_SCHEMA.to_string(), LitStr::value)
    }

    /// Table name; defaults to the snake_case struct ident.
    pub fn table_name(&self, ident: &Ident) -> String {
        self.name
            .as_ref()
            .map_or_else(|| ident.to_string().to_case(Case::Snake), LitStr::value)
    }

    /// Module holding the column tags, e.g. `User` → `user`.
    pub fn tag_module(ident: &Ident) -> Ident {
        let snake = ident.to_string().to_case(Case::Snake);

        format_ident!("{snake}", span = ident.span())
    }

    pub fn table_id(&self, ident: &Ident) -> TokenStream {
        let db = &self.db;
        let schema = str_lit(self.schema_name());
        let table = str_lit(self.table_name(ident));

        quote!(::rowform::schema::node::TableId::new(#db, #schema, #table))
    }
}
