use crate::prelude::*;
use convert_case::{Case, Casing};

///
/// Column
///
/// `column(ident = "...", wire = "...", host = "...", name = "...", nullable, default)`
///

#[derive(Clone, Debug, FromMeta)]
pub struct Column {
    pub ident: Ident,
    pub wire: WireType,

    #[darling(default)]
    pub host: Option<HostType>,

    /// Column name on the wire; defaults to the field ident.
    #[darling(default)]
    pub name: Option<LitStr>,

    #[darling(default)]
    pub nullable: bool,

    #[darling(default, rename = "default")]
    pub has_default: bool,
}

impl Column {
    pub fn sql_name(&self) -> String {
        self.name
            .as_ref()
            .map_or_else(|| self.ident.to_string(), LitStr::value)
    }

    pub fn host(&self) -> HostType {
        self.host.unwrap_or_else(|| self.wire.default_host())
    }

    /// Zero-sized column tag, e.g. `favorite_number` → `FavoriteNumber`.
    pub fn tag_ident(&self) -> Ident {
        let pascal = self.ident.to_string().to_case(Case::Pascal);

        format_ident!("{pascal}", span = self.ident.span())
    }

    /// Type-level nullability marker of the wire-read slot.
    pub fn null_marker(&self) -> TokenStream {
        if self.nullable {
            quote!(::rowform::core::wire::Nullable)
        } else {
            quote!(::rowform::core::wire::NotNull)
        }
    }

    /// Host type with the Null wrapper applied when nullable.
    pub fn host_slot(&self) -> TokenStream {
        let host = self.host().as_type();

        if self.nullable {
            quote!(::rowform::core::wrap::Null<#host>)
        } else {
            host
        }
    }

    pub fn wire_slot(&self) -> TokenStream {
        let wire = self.wire.as_marker();
        let null = self.null_marker();

        quote!(::rowform::core::expr::Expr<#wire, #null>)
    }

    /// Concrete field type of this column's slot under `scenario`.
    pub fn slot_type(&self, scenario: Scenario) -> TokenStream {
        match scenario {
            Scenario::HostRead => self.host_slot(),
            Scenario::HostInsert => defaulted(self.host_slot(), self.has_default),
            Scenario::WireRead => self.wire_slot(),
            Scenario::WireReadOuter => {
                let wire = self.wire.as_marker();

                quote!(::rowform::core::expr::Expr<#wire, ::rowform::core::wire::Nullable>)
            }
            Scenario::WireWrite => defaulted(self.wire_slot(), self.has_default),
        }
    }

    /// Schema descriptor expression for this column.
    pub fn descriptor(&self) -> TokenStream {
        let name = str_lit(self.sql_name());
        let wire = self.wire;
        let host = self.host();
        let nullable = self.nullable.then(|| quote!(.nullable()));
        let defaulted = self.has_default.then(|| quote!(.defaulted()));

        quote! {
            ::rowform::schema::node::ColumnDescriptor::new(#name, #wire)
                .host(#host)
                #nullable
                #defaulted
        }
    }
}

fn defaulted(inner: TokenStream, has_default: bool) -> TokenStream {
    if has_default {
        quote!(::rowform::core::wrap::Defaultable<#inner>)
    } else {
        inner
    }
}
