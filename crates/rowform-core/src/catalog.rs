//! Catalog: the validated set of tables plus the comparability registry.
//!
//! Built once with [`CatalogBuilder`], then either used directly or
//! installed process-wide. An installed catalog is read-only.

use crate::{
    compare::{Comparability, ComparabilityRegistry},
    error::Error,
    obs::{CatalogEvent, sink},
    ops::ExprBuilder,
    traits::{Column, Table},
};
use rowform_schema::{
    SchemaError, err,
    error::ErrorTree,
    node::{ColumnRef, TableId, TableSchema},
    shape::RowShape,
    types::Scenario,
};
use std::{collections::BTreeMap, sync::OnceLock};

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The installed catalog.
pub fn catalog() -> Result<&'static Catalog, Error> {
    CATALOG.get().ok_or(Error::CatalogMissing)
}

///
/// CatalogBuilder
///

#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    tables: Vec<TableSchema>,
    pairs: Vec<(ColumnRef, ColumnRef)>,
}

impl CatalogBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Register a generated table.
    #[must_use]
    pub fn table<T: Table>(self) -> Self {
        self.register(T::SCHEMA)
    }

    /// Register a table schema directly.
    #[must_use]
    pub fn register(mut self, schema: TableSchema) -> Self {
        self.tables.push(schema);
        self
    }

    /// Declare two columns of the same wire type comparable.
    #[must_use]
    pub fn allow<A, B>(self) -> Self
    where
        A: Column,
        B: Column<Wire = A::Wire>,
    {
        self.allow_refs(A::REF, B::REF)
    }

    /// Declare two columns comparable by reference.
    #[must_use]
    pub fn allow_refs(mut self, a: ColumnRef, b: ColumnRef) -> Self {
        self.pairs.push((a, b));
        self
    }

    /// Validate everything and produce the catalog. All findings are
    /// reported together.
    pub fn build(self) -> Result<Catalog, Error> {
        let mut errs = ErrorTree::new();
        let mut tables = BTreeMap::<TableId, TableSchema>::new();

        // Phase 1: tables, deduplicated by identity.
        for schema in self.tables {
            let route = schema.id.to_string();

            if let Some(existing) = tables.get(&schema.id) {
                if !existing.same_columns(&schema) {
                    errs.add_for(
                        route,
                        "registered twice with different column declarations",
                    );
                }
                continue;
            }

            if let Err(tree) = schema.validate() {
                errs.merge_for(route, tree);
            }
            tables.insert(schema.id, schema);
        }

        // Phase 2: comparability pairs must name known, same-database columns.
        let mut comparability = ComparabilityRegistry::new();
        let mut pair_errs = ErrorTree::new();
        for (a, b) in self.pairs {
            let known = |c: &ColumnRef| tables.get(&c.table).is_some_and(|t| t.contains(c));

            for column in [a, b] {
                if !known(&column) {
                    err!(pair_errs, "{a} ~ {b}: unknown column {column}");
                }
            }
            if !a.same_database(&b) {
                err!(pair_errs, "{a} ~ {b}: columns live in different databases");
            }

            comparability.allow(a, b);
        }
        errs.merge_for("comparability", pair_errs);

        if !errs.is_empty() {
            return Err(SchemaError::Validation(errs).into());
        }

        // Phase 3: announce what the catalog holds.
        for schema in tables.values() {
            sink::record(CatalogEvent::TableRegistered {
                table: schema.id,
                columns: schema.columns.len(),
            });
        }
        for &(lhs, rhs) in comparability.iter() {
            sink::record(CatalogEvent::PairAllowed { lhs, rhs });
        }

        Ok(Catalog {
            tables,
            comparability,
        })
    }
}

///
/// Catalog
///

#[derive(Clone, Debug)]
pub struct Catalog {
    tables: BTreeMap<TableId, TableSchema>,
    comparability: ComparabilityRegistry,
}

impl Catalog {
    #[must_use]
    pub const fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Publish this catalog process-wide. Only the first install succeeds.
    pub fn install(self) -> Result<&'static Self, Error> {
        let (tables, pairs) = (self.tables.len(), self.comparability.len());
        CATALOG.set(self).map_err(|_| Error::CatalogInstalled)?;
        sink::record(CatalogEvent::CatalogInstalled { tables, pairs });

        catalog()
    }

    pub fn table(&self, id: &TableId) -> Result<&TableSchema, Error> {
        self.tables
            .get(id)
            .ok_or_else(|| SchemaError::UnknownTable(*id).into())
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Derived shape of a registered table.
    pub fn shape(&self, id: &TableId, scenario: Scenario) -> Result<RowShape, Error> {
        self.table(id)
            .map(|schema| RowShape::derive(schema, scenario))
    }

    #[must_use]
    pub fn check(&self, a: &ColumnRef, b: &ColumnRef) -> Comparability {
        self.comparability.check(a, b)
    }

    #[must_use]
    pub const fn comparability(&self) -> &ComparabilityRegistry {
        &self.comparability
    }

    /// Expression builder gated by this catalog's registry.
    #[must_use]
    pub const fn exprs(&self) -> ExprBuilder<'_> {
        ExprBuilder::new(&self.comparability)
    }
}
