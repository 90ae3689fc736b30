use crate::prelude::*;

// Scenario conversions plus the column-row and assignment helpers:
//   Insert → Write, Wire → Write, Wire → WireOuter.
pub fn conversions(node: &Table, table: &Ident) -> TokenStream {
    let module = Table::tag_module(table);
    let [insert, wire, outer, write] = [
        Scenario::HostInsert,
        Scenario::WireRead,
        Scenario::WireReadOuter,
        Scenario::WireWrite,
    ]
    .map(|scenario| row_ident(table, scenario));

    let from_insert = node.columns.iter().map(|column| {
        let field = &column.ident;
        let host = column.host_slot();
        let wire = column.wire.as_marker();
        let lift = quote!(<#host as ::rowform::core::ops::Operand<#wire>>::into_expr);

        if column.has_default {
            quote!(#field: row.#field.map(#lift))
        } else {
            quote!(#field: #lift(row.#field))
        }
    });

    let from_wire = node.columns.iter().map(|column| {
        let field = &column.ident;

        if column.has_default {
            quote!(#field: ::rowform::core::wrap::Defaultable::Value(row.#field))
        } else {
            quote!(#field: row.#field)
        }
    });

    let to_outer = node.columns.iter().map(|column| {
        let field = &column.ident;

        quote!(#field: row.#field.nullable())
    });

    let columns = node.columns.iter().map(|column| {
        let field = &column.ident;
        let tag = column.tag_ident();

        quote!(#field: <#module::#tag as ::rowform::core::traits::Column>::expr())
    });

    let assignments = node.columns.iter().map(|column| {
        let field = &column.ident;
        let tag = column.tag_ident();

        quote! {
            (
                <#module::#tag as ::rowform::core::traits::Column>::REF,
                ::rowform::core::expr::WriteSlot::write_node(&self.#field),
            )
        }
    });

    quote! {
        impl ::std::convert::From<#insert> for #write {
            fn from(row: #insert) -> Self {
                Self {
                    #(#from_insert),*
                }
            }
        }

        impl ::std::convert::From<#wire> for #write {
            fn from(row: #wire) -> Self {
                Self {
                    #(#from_wire),*
                }
            }
        }

        impl ::std::convert::From<#wire> for #outer {
            fn from(row: #wire) -> Self {
                Self {
                    #(#to_outer),*
                }
            }
        }

        impl #wire {
            /// Row of bare, tagged column expressions.
            #[must_use]
            pub fn columns() -> Self {
                Self {
                    #(#columns),*
                }
            }
        }

        impl #outer {
            /// Tagged columns as seen from the optional side of an outer join.
            #[must_use]
            pub fn columns() -> Self {
                #wire::columns().into()
            }
        }

        impl #write {
            /// `(column, node)` pairs in declaration order; a defaulted slot
            /// yields the DEFAULT node.
            #[must_use]
            pub fn assignments(
                &self,
            ) -> ::std::vec::Vec<(
                ::rowform::schema::node::ColumnRef,
                ::rowform::core::expr::ExprNode,
            )> {
                ::std::vec![#(#assignments),*]
            }
        }
    }
}
