//! Binary/Unary Operation Layer.
//!
//! Every operand is reduced to an `Expr<W, N>` through [`Operand`]; result
//! nullability is the [`Join`](crate::wire::Join) of the operands'.

mod builder;

pub use builder::ExprBuilder;

use crate::{
    expr::{Encode, Expr},
    wire::{self, NotNull, Nullability, Nullable, WireKind},
    wrap::Null,
};

///
/// Operand
///
/// Anything usable as one side of an operation against wire type `W`:
/// a plain host value, a `Null` host value, or an expression (including a
/// tagged column).
///

pub trait Operand<W: WireKind> {
    type Null: Nullability;

    fn into_expr(self) -> Expr<W, Self::Null>;
}

impl<W: WireKind, N: Nullability> Operand<W> for Expr<W, N> {
    type Null = N;

    fn into_expr(self) -> Self {
        self
    }
}

impl<W: WireKind, N: Nullability> Operand<W> for &Expr<W, N> {
    type Null = N;

    fn into_expr(self) -> Expr<W, N> {
        self.clone()
    }
}

// Host → wire bindings. Must agree with `WireType::accepts`.
macro_rules! bindings {
    ( $( $host:ty => $wire:ident ),* $(,)? ) => {
        $(
            impl Encode<wire::$wire> for $host {}

            impl Operand<wire::$wire> for $host {
                type Null = NotNull;

                fn into_expr(self) -> Expr<wire::$wire, NotNull> {
                    Expr::<wire::$wire, NotNull>::literal(self)
                }
            }

            impl Operand<wire::$wire> for Null<$host> {
                type Null = Nullable;

                fn into_expr(self) -> Expr<wire::$wire, Nullable> {
                    self.fold(Expr::null(), |v| {
                        Expr::<wire::$wire, NotNull>::literal(v).nullable()
                    })
                }
            }
        )*
    };
}

bindings!(
    bool => Bool,
    Vec<u8> => Bytea,
    f32 => Float4,
    f64 => Float8,
    i16 => Int2,
    i32 => Int4,
    i64 => Int8,
    String => Json,
    String => Text,
    String => Varchar,
);

macro_rules! str_bindings {
    ( $( $wire:ident ),* $(,)? ) => {
        $(
            impl Operand<wire::$wire> for &str {
                type Null = NotNull;

                fn into_expr(self) -> Expr<wire::$wire, NotNull> {
                    Expr::<wire::$wire, NotNull>::literal(self.to_string())
                }
            }
        )*
    };
}

str_bindings!(Json, Text, Varchar);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Int4, Text};

    fn lift<W: WireKind, O: Operand<W>>(operand: O) -> Expr<W, O::Null> {
        operand.into_expr()
    }

    #[test]
    fn host_values_lift_to_non_nullable_literals() {
        let e: Expr<Int4, NotNull> = lift(5i32);

        assert!(!e.is_nullable());
        assert_eq!(e.to_string(), "5");
    }

    #[test]
    fn null_host_values_lift_to_nullable() {
        let absent: Expr<Int4, Nullable> = lift(Null::<i32>::Null);
        let present: Expr<Int4, Nullable> = lift(Null::Value(2i32));

        assert_eq!(absent.to_string(), "NULL");
        assert_eq!(present.to_string(), "2");
    }

    #[test]
    fn str_literals_bind_to_text() {
        let e: Expr<Text, NotNull> = lift("bob");

        assert_eq!(e.to_string(), "'bob'");
    }
}
