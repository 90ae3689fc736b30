//! Comparability Registry.
//!
//! Deny-by-default allow-list of column pairs that may be combined in a
//! binary expression. Pairs are unordered; nothing else is implied by a
//! registration (no transitive or symmetric closure over other pairs).

use derive_more::Display;
use rowform_schema::node::ColumnRef;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// DenyReason
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
pub enum DenyReason {
    #[display("columns belong to different databases")]
    CrossDatabase,

    #[display("no comparability entry is declared for the pair")]
    Undeclared,
}

///
/// Comparability
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Comparability {
    Allowed,
    Denied(DenyReason),
}

impl Comparability {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

///
/// ComparabilityError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ComparabilityError {
    #[error("cannot build `{op}` over {lhs} and {rhs}: {reason}")]
    Denied {
        op: &'static str,
        lhs: ColumnRef,
        rhs: ColumnRef,
        reason: DenyReason,
    },
}

///
/// ComparabilityRegistry
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ComparabilityRegistry {
    pairs: BTreeSet<(ColumnRef, ColumnRef)>,
}

impl ComparabilityRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pairs: BTreeSet::new(),
        }
    }

    /// Declare `{a, b}` comparable. Returns `false` if it was already declared.
    ///
    /// An entry spanning two databases is stored but never honoured by
    /// [`Self::check`].
    pub fn allow(&mut self, a: ColumnRef, b: ColumnRef) -> bool {
        self.pairs.insert(pair_key(a, b))
    }

    #[must_use]
    pub fn contains(&self, a: &ColumnRef, b: &ColumnRef) -> bool {
        self.pairs.contains(&pair_key(*a, *b))
    }

    /// Whether `a` and `b` may be combined.
    ///
    /// Cross-database pairs are denied before any entry is consulted;
    /// a column paired with itself needs no entry.
    #[must_use]
    pub fn check(&self, a: &ColumnRef, b: &ColumnRef) -> Comparability {
        if !a.same_database(b) {
            Comparability::Denied(DenyReason::CrossDatabase)
        } else if a == b || self.contains(a, b) {
            Comparability::Allowed
        } else {
            Comparability::Denied(DenyReason::Undeclared)
        }
    }

    /// `check`, converted into an error naming the operation.
    pub fn require(
        &self,
        op: &'static str,
        a: &ColumnRef,
        b: &ColumnRef,
    ) -> Result<(), ComparabilityError> {
        match self.check(a, b) {
            Comparability::Allowed => Ok(()),
            Comparability::Denied(reason) => Err(ComparabilityError::Denied {
                op,
                lhs: *a,
                rhs: *b,
                reason,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ColumnRef, ColumnRef)> {
        self.pairs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// unordered pair → one canonical key
fn pair_key(a: ColumnRef, b: ColumnRef) -> (ColumnRef, ColumnRef) {
    if a <= b { (a, b) } else { (b, a) }
}
