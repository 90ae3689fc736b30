use crate::prelude::*;

// Emit the five scenario rows with their `Slot` and `Row` impls.
pub fn rows(node: &Table, table: &Ident, vis: &Visibility) -> TokenStream {
    let rows = Scenario::ALL.map(|scenario| row(node, table, vis, scenario));

    quote!(#(#rows)*)
}

fn row(node: &Table, table: &Ident, vis: &Visibility, scenario: Scenario) -> TokenStream {
    let ident = row_ident(table, scenario);
    let module = Table::tag_module(table);
    let doc = row_doc(table, scenario);

    let fields = node.columns.iter().map(|column| {
        let field = &column.ident;
        let ty = column.slot_type(scenario);

        quote!(pub #field: #ty)
    });

    // host rows round-trip through serde; wire rows only serialize
    let derives = if scenario.is_wire() {
        quote! {
            #[derive(Clone, Debug, PartialEq, ::rowform::__reexports::serde::Serialize)]
            #[serde(crate = "::rowform::__reexports::serde")]
        }
    } else {
        quote! {
            #[derive(
                Clone,
                Debug,
                PartialEq,
                ::rowform::__reexports::serde::Serialize,
                ::rowform::__reexports::serde::Deserialize,
            )]
            #[serde(crate = "::rowform::__reexports::serde")]
        }
    };

    let slots = node.columns.iter().map(|column| {
        let field = &column.ident;
        let tag = column.tag_ident();
        let ty = column.slot_type(scenario);

        quote! {
            impl ::rowform::core::traits::Slot<#module::#tag> for #ident {
                type Value = #ty;

                fn slot(&self) -> &Self::Value {
                    &self.#field
                }

                fn slot_mut(&mut self) -> &mut Self::Value {
                    &mut self.#field
                }
            }
        }
    });

    let get_arms = node.columns.iter().map(|column| {
        let field = &column.ident;
        let name = str_lit(column.sql_name());

        quote! {
            #name => Ok(::rowform::core::value::SlotValue::to_value(&self.#field)),
        }
    });

    let set_arms = node.columns.iter().map(|column| {
        let field = &column.ident;
        let name = str_lit(column.sql_name());

        quote! {
            #name => {
                self.#field = ::rowform::core::value::SlotValue::from_value(value).map_err(
                    |source| ::rowform::core::Error::slot(*column, Self::SCENARIO, source),
                )?;
                Ok(())
            }
        }
    });

    quote! {
        #[doc = #doc]
        #derives
        #vis struct #ident {
            #(#fields),*
        }

        #(#slots)*

        impl ::rowform::core::traits::Row for #ident {
            type Table = #table;

            const SCENARIO: ::rowform::schema::types::Scenario = #scenario;

            fn get_value(
                &self,
                column: &::rowform::schema::node::ColumnRef,
            ) -> ::std::result::Result<::rowform::core::value::Value, ::rowform::core::Error> {
                if column.table != <#table as ::rowform::core::traits::Table>::id() {
                    return Err(<Self as ::rowform::core::traits::Row>::unknown_column(column));
                }

                match column.column {
                    #(#get_arms)*
                    _ => Err(<Self as ::rowform::core::traits::Row>::unknown_column(column)),
                }
            }

            fn set_value(
                &mut self,
                column: &::rowform::schema::node::ColumnRef,
                value: ::rowform::core::value::Value,
            ) -> ::std::result::Result<(), ::rowform::core::Error> {
                if column.table != <#table as ::rowform::core::traits::Table>::id() {
                    return Err(<Self as ::rowform::core::traits::Row>::unknown_column(column));
                }

                match column.column {
                    #(#set_arms)*
                    _ => Err(<Self as ::rowform::core::traits::Row>::unknown_column(column)),
                }
            }
        }
    }
}

fn row_doc(table: &Ident, scenario: Scenario) -> String {
    let role = match scenario {
        Scenario::HostInsert => "Host-side row submitted for insertion.",
        Scenario::HostRead => "Host-side row as read into memory.",
        Scenario::WireRead => "Wire-level expressions for each column of a read.",
        Scenario::WireReadOuter => {
            "Wire-level expressions for the optional side of an outer join; every slot is nullable."
        }
        Scenario::WireWrite => "Wire-level expressions for an insert or update.",
    };

    format!("[`{table}`]: {role}")
}
