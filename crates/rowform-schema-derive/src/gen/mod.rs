mod convert;
mod row;

use crate::prelude::*;

///
/// TableGen
///
/// Emits, for one declaration: the marker item, its `Table` impl, the
/// column tag module, and one row struct per scenario.
///

pub struct TableGen<'a> {
    node: &'a Table,
    item: &'a ItemStruct,
}

impl<'a> TableGen<'a> {
    pub const fn new(node: &'a Table, item: &'a ItemStruct) -> Self {
        Self { node, item }
    }

    fn ident(&self) -> &Ident {
        &self.item.ident
    }

    fn table_impl(&self) -> TokenStream {
        let ident = self.ident();
        let table_id = self.node.table_id(ident);
        let columns = self.node.columns.iter().map(Column::descriptor);
        let [read, insert, wire, outer, write] = [
            Scenario::HostRead,
            Scenario::HostInsert,
            Scenario::WireRead,
            Scenario::WireReadOuter,
            Scenario::WireWrite,
        ]
        .map(|scenario| row_ident(ident, scenario));

        quote! {
            impl ::rowform::core::traits::Table for #ident {
                const SCHEMA: ::rowform::schema::node::TableSchema =
                    ::rowform::schema::node::TableSchema {
                        id: #table_id,
                        columns: &[#(#columns),*],
                    };

                type Read = #read;
                type Insert = #insert;
                type Wire = #wire;
                type WireOuter = #outer;
                type Write = #write;
            }
        }
    }

    fn column_tags(&self) -> TokenStream {
        let ident = self.ident();
        let vis = &self.item.vis;
        let module = Table::tag_module(ident);
        let table_id = self.node.table_id(ident);
        let doc = format!("Column tags for [`{ident}`].");

        let tags = self.node.columns.iter().map(|column| {
            let tag = column.tag_ident();
            let name = str_lit(column.sql_name());
            let host = column.host().as_type();
            let wire = column.wire.as_marker();
            let null = column.null_marker();
            let has_default = column.has_default;
            let doc = format!("`{}` column.", column.sql_name());

            quote! {
                #[doc = #doc]
                #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
                pub struct #tag;

                impl ::rowform::core::traits::Column for #tag {
                    type Table = super::#ident;
                    type Host = #host;
                    type Wire = #wire;
                    type Null = #null;

                    const NAME: &'static str = #name;
                    const HAS_DEFAULT: bool = #has_default;
                    const REF: ::rowform::schema::node::ColumnRef =
                        ::rowform::schema::node::ColumnRef::new(#table_id, #name);
                }
            }
        });

        quote! {
            #[doc = #doc]
            #vis mod #module {
                #(#tags)*
            }
        }
    }
}

impl ToTokens for TableGen<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let item = self.item;
        let table_impl = self.table_impl();
        let tags = self.column_tags();
        let rows = row::rows(self.node, self.ident(), &self.item.vis);
        let conversions = convert::conversions(self.node, self.ident());

        tokens.extend(quote! {
            #item
            #table_impl
            #tags
            #rows
            #conversions
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::table_impl;
    use quote::quote;

    fn expand() -> String {
        table_impl(
            quote!(
                db = "app",
                column(ident = "id", wire = "Int4", default),
                column(ident = "age", wire = "Int4", nullable),
            ),
            quote!(
                pub struct User;
            ),
        )
        .to_string()
    }

    #[test]
    fn emits_every_scenario_row() {
        let out = expand();

        for row in ["UserRead", "UserInsert", "UserWire", "UserWireOuter", "UserWrite"] {
            assert!(out.contains(&format!("struct {row}")), "missing {row}");
        }
        assert!(out.contains("pub mod user"));
        assert!(out.contains("pub struct Age"));
    }

    #[test]
    fn insert_slots_wrap_default_outside_null() {
        let out = expand().replace(' ', "");

        assert!(out.contains("pubid:::rowform::core::wrap::Defaultable<i32>"));
        assert!(out.contains("pubage:::rowform::core::wrap::Null<i32>"));
    }

    #[test]
    fn invalid_declarations_expand_to_compile_errors() {
        let out = table_impl(
            quote!(db = "app"),
            quote!(
                pub struct User;
            ),
        )
        .to_string();

        assert!(out.contains("compile_error"));
    }
}
