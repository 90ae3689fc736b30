//! Type-level wire kinds and nullability.
//!
//! Expression values carry their wire type and nullability as type
//! parameters, so result nullability is computed by the compiler.

use rowform_schema::types::WireType;
use std::fmt::Debug;

///
/// WireKind
/// Marker for one wire type.
///

pub trait WireKind: Copy + Debug + 'static {
    const TYPE: WireType;
}

/// Wire kinds that support arithmetic.
pub trait Numeric: Ordered {}

/// Wire kinds that support ordering comparisons.
pub trait Ordered: WireKind {}

/// The boolean wire kind.
pub trait Boolean: WireKind {}

macro_rules! wire_kinds {
    ( $( $kind:ident ),* $(,)? ) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub enum $kind {}

            impl WireKind for $kind {
                const TYPE: WireType = WireType::$kind;
            }
        )*
    };
}

wire_kinds!(
    Bool, Bytea, Float4, Float8, Int2, Int4, Int8, Json, Text, Varchar
);

impl Boolean for Bool {}

impl Ordered for Float4 {}
impl Ordered for Float8 {}
impl Ordered for Int2 {}
impl Ordered for Int4 {}
impl Ordered for Int8 {}
impl Ordered for Text {}
impl Ordered for Varchar {}

impl Numeric for Float4 {}
impl Numeric for Float8 {}
impl Numeric for Int2 {}
impl Numeric for Int4 {}
impl Numeric for Int8 {}

///
/// Nullability
///

pub trait Nullability: Copy + Debug + Default + 'static {
    const NULLABLE: bool;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NotNull;

impl Nullability for NotNull {
    const NULLABLE: bool = false;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Nullable;

impl Nullability for Nullable {
    const NULLABLE: bool = true;
}

///
/// Join
///
/// Result nullability of combining two operands: nullable iff either is.
/// No impl yields `NotNull` when either side is `Nullable`.
///

pub trait Join<Rhs: Nullability>: Nullability {
    type Output: Nullability;
}

impl Join<NotNull> for NotNull {
    type Output = NotNull;
}

impl Join<Nullable> for NotNull {
    type Output = Nullable;
}

impl<Rhs: Nullability> Join<Rhs> for Nullable {
    type Output = Nullable;
}

/// Shorthand for the joined nullability of `A` and `B`.
pub type Joined<A, B> = <A as Join<B>>::Output;

#[cfg(test)]
mod tests {
    use super::*;

    fn nullable<N: Nullability>() -> bool {
        N::NULLABLE
    }

    #[test]
    fn join_is_nullable_iff_any_side_is() {
        assert!(!nullable::<Joined<NotNull, NotNull>>());
        assert!(nullable::<Joined<NotNull, Nullable>>());
        assert!(nullable::<Joined<Nullable, NotNull>>());
        assert!(nullable::<Joined<Nullable, Nullable>>());
    }

    #[test]
    fn markers_report_their_wire_type() {
        assert_eq!(Int4::TYPE, WireType::Int4);
        assert_eq!(Varchar::TYPE, WireType::Varchar);
    }
}
