use crate::{
    prelude::*,
    validate::naming::{validate_column_name, validate_ident},
};

///
/// ColumnDescriptor
///
/// Static metadata for one column. Declared once per table; every row
/// shape is derived from these fields.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub nullable: bool,
    pub has_default: bool,
    pub wire: WireType,
    pub host: HostType,
}

impl ColumnDescriptor {
    /// Non-nullable column without a default, bound to the wire type's natural host type.
    #[must_use]
    pub const fn new(name: &'static str, wire: WireType) -> Self {
        Self {
            name,
            nullable: false,
            has_default: false,
            wire,
            host: wire.default_host(),
        }
    }

    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub const fn defaulted(mut self) -> Self {
        self.has_default = true;
        self
    }

    #[must_use]
    pub const fn host(mut self, host: HostType) -> Self {
        self.host = host;
        self
    }

    pub fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident(self.name) {
            errs.add(e);
        }
        if let Err(e) = validate_column_name(self.name) {
            errs.add(e);
        }

        // a column the deriver cannot bind has no wire-write mapping
        if !self.wire.accepts(self.host) {
            err!(
                errs,
                "column '{}' binds host type {} to wire type {}, which has no write mapping",
                self.name,
                self.host,
                self.wire
            );
        }

        errs.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_flags() {
        let col = ColumnDescriptor::new("favorite_number", WireType::Int4)
            .nullable()
            .defaulted();

        assert!(col.nullable);
        assert!(col.has_default);
        assert_eq!(col.host, HostType::Int32);
        assert!(col.validate().is_ok());
    }

    #[test]
    fn incompatible_binding_fails_validation() {
        let col = ColumnDescriptor::new("age", WireType::Int4).host(HostType::Text);
        let errs = col.validate().unwrap_err();

        assert!(errs.to_string().contains("no write mapping"));
    }

    #[test]
    fn empty_name_fails_validation() {
        let col = ColumnDescriptor::new("", WireType::Text);

        assert!(col.validate().is_err());
    }
}
