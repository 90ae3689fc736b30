use darling::FromMeta;
use derive_more::{Display, FromStr};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use serde::Serialize;

///
/// WireType
///
/// Semantic type tag of a column as the database protocol sees it.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum WireType {
    Bool,
    Bytea,
    Float4,
    Float8,
    Int2,
    Int4,
    Int8,
    Json,
    Text,
    Varchar,
}

impl WireType {
    /// Lowercase protocol name.
    #[must_use]
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Bytea => "bytea",
            Self::Float4 => "float4",
            Self::Float8 => "float8",
            Self::Int2 => "int2",
            Self::Int4 => "int4",
            Self::Int8 => "int8",
            Self::Json => "json",
            Self::Text => "text",
            Self::Varchar => "varchar",
        }
    }

    /// Host type a column gets when the declaration does not name one.
    #[must_use]
    pub const fn default_host(self) -> HostType {
        match self {
            Self::Bool => HostType::Bool,
            Self::Bytea => HostType::Bytes,
            Self::Float4 => HostType::Float32,
            Self::Float8 => HostType::Float64,
            Self::Int2 => HostType::Int16,
            Self::Int4 => HostType::Int32,
            Self::Int8 => HostType::Int64,
            Self::Json | Self::Text | Self::Varchar => HostType::Text,
        }
    }

    /// Whether a host value of `host` can be bound to this wire type.
    /// This is the relation every host-insert to wire-write conversion relies on.
    #[must_use]
    pub const fn accepts(self, host: HostType) -> bool {
        matches!(
            (self, host),
            (Self::Bool, HostType::Bool)
                | (Self::Bytea, HostType::Bytes)
                | (Self::Float4, HostType::Float32)
                | (Self::Float8, HostType::Float64)
                | (Self::Int2, HostType::Int16)
                | (Self::Int4, HostType::Int32)
                | (Self::Int8, HostType::Int64)
                | (Self::Json | Self::Text | Self::Varchar, HostType::Text)
        )
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Float4 | Self::Float8 | Self::Int2 | Self::Int4 | Self::Int8
        )
    }

    // both equality and ordering comparisons
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        self.is_numeric() || matches!(self, Self::Text | Self::Varchar)
    }

    /// Marker type used by generated code for this wire type.
    #[must_use]
    pub fn as_marker(self) -> TokenStream {
        let ident = format_ident!("{self}");

        quote!(::rowform::core::wire::#ident)
    }
}

impl FromMeta for WireType {
    fn from_string(s: &str) -> Result<Self, darling::Error> {
        s.parse::<Self>()
            .map_err(|_| darling::Error::unknown_value(s))
    }
}

impl ToTokens for WireType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(::rowform::schema::types::WireType::#ident));
    }
}

///
/// HostType
///
/// Semantic type tag of a column as host code holds it in memory.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum HostType {
    Bool,
    Bytes,
    Float32,
    Float64,
    Int16,
    Int32,
    Int64,
    Text,
}

impl HostType {
    /// Rust type used for this host type in generated rows.
    #[must_use]
    pub fn as_type(self) -> TokenStream {
        match self {
            Self::Bool => quote!(bool),
            Self::Bytes => quote!(::std::vec::Vec<u8>),
            Self::Float32 => quote!(f32),
            Self::Float64 => quote!(f64),
            Self::Int16 => quote!(i16),
            Self::Int32 => quote!(i32),
            Self::Int64 => quote!(i64),
            Self::Text => quote!(::std::string::String),
        }
    }
}

impl FromMeta for HostType {
    fn from_string(s: &str) -> Result<Self, darling::Error> {
        s.parse::<Self>()
            .map_err(|_| darling::Error::unknown_value(s))
    }
}

impl ToTokens for HostType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(::rowform::schema::types::HostType::#ident));
    }
}

///
/// Scenario
///
/// Lifecycle stage that needs its own row representation.
/// The set is closed: a scenario outside this enum cannot be named.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum Scenario {
    HostInsert,
    HostRead,
    WireRead,
    WireReadOuter,
    WireWrite,
}

impl Scenario {
    /// Every scenario in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::HostRead,
        Self::HostInsert,
        Self::WireRead,
        Self::WireReadOuter,
        Self::WireWrite,
    ];

    /// Suffix appended to a table ident to name its generated row struct.
    #[must_use]
    pub const fn row_suffix(self) -> &'static str {
        match self {
            Self::HostInsert => "Insert",
            Self::HostRead => "Read",
            Self::WireRead => "Wire",
            Self::WireReadOuter => "WireOuter",
            Self::WireWrite => "Write",
        }
    }

    #[must_use]
    pub const fn is_wire(self) -> bool {
        matches!(self, Self::WireRead | Self::WireReadOuter | Self::WireWrite)
    }
}

impl ToTokens for Scenario {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = format_ident!("{self}");

        tokens.extend(quote!(::rowform::schema::types::Scenario::#ident));
    }
}
