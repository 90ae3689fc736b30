//! Dynamic slot values, used when rows are assembled or destructured by
//! column reference instead of by typed field.

use crate::{
    expr::{Expr, ExprNode, TypedNode},
    wire::{Nullability, WireKind},
    wrap::{Defaultable, Null},
};
use rowform_schema::types::HostType;
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Value
///
/// Null    → SQL NULL.
/// Default → SQL DEFAULT; only valid in write positions.
/// Expr    → a wire-level expression occupying a slot, with its type.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[remain::sorted]
pub enum Value {
    Bool(bool),
    Bytes(Vec<u8>),
    Default,
    Expr(Box<TypedNode>),
    Float32(f32),
    Float64(f64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Null,
    Text(String),
}

impl Value {
    /// Host type of a scalar value; `None` for markers and expressions.
    #[must_use]
    pub const fn host_type(&self) -> Option<HostType> {
        match self {
            Self::Bool(_) => Some(HostType::Bool),
            Self::Bytes(_) => Some(HostType::Bytes),
            Self::Float32(_) => Some(HostType::Float32),
            Self::Float64(_) => Some(HostType::Float64),
            Self::Int16(_) => Some(HostType::Int16),
            Self::Int32(_) => Some(HostType::Int32),
            Self::Int64(_) => Some(HostType::Int64),
            Self::Text(_) => Some(HostType::Text),
            Self::Default | Self::Expr(_) | Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Short label used in error messages.
    #[must_use]
    pub fn kind(&self) -> String {
        match self {
            Self::Default => "DEFAULT".to_string(),
            Self::Expr(typed) => format!("{} expression", typed.wire()),
            Self::Null => "NULL".to_string(),
            other => other
                .host_type()
                .map_or_else(String::new, |host| host.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            Self::Bytes(v) => {
                write!(f, "'\\x")?;
                for byte in v {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "'")
            }
            Self::Default => write!(f, "DEFAULT"),
            Self::Expr(node) => write!(f, "{node}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Null => write!(f, "NULL"),
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
        }
    }
}

///
/// ValueError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("expected {expected} value, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("NULL supplied for non-nullable {expected} slot")]
    UnexpectedNull { expected: String },

    #[error("DEFAULT supplied for a slot without a declared default")]
    UnexpectedDefault,
}

impl ValueError {
    fn mismatch(expected: impl fmt::Display, found: &Value) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.kind(),
        }
    }
}

///
/// HostScalar
/// Plain host value of one host type.
///

pub trait HostScalar: Clone + Sized {
    const HOST: HostType;

    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

///
/// SlotValue
///
/// Anything that can occupy a row slot, converted to and from `Value`
/// for dynamic field access.
///

pub trait SlotValue: Sized {
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! host_scalars {
    ( $( $ty:ty => $host:ident ),* $(,)? ) => {
        $(
            impl HostScalar for $ty {
                const HOST: HostType = HostType::$host;

                fn to_value(&self) -> Value {
                    Value::$host(self.clone())
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::$host(v) => Ok(v),
                        Value::Null => Err(ValueError::UnexpectedNull {
                            expected: HostType::$host.to_string(),
                        }),
                        Value::Default => Err(ValueError::UnexpectedDefault),
                        other => Err(ValueError::mismatch(HostType::$host, &other)),
                    }
                }
            }

            impl SlotValue for $ty {
                fn to_value(&self) -> Value {
                    HostScalar::to_value(self)
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    HostScalar::from_value(value)
                }
            }
        )*
    };
}

host_scalars!(
    bool => Bool,
    Vec<u8> => Bytes,
    f32 => Float32,
    f64 => Float64,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    String => Text,
);

impl<T: SlotValue> SlotValue for Null<T> {
    fn to_value(&self) -> Value {
        self.as_ref().fold(Value::Null, SlotValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::Null),
            other => T::from_value(other).map(Self::Value),
        }
    }
}

impl<T: SlotValue> SlotValue for Defaultable<T> {
    fn to_value(&self) -> Value {
        self.as_ref().fold(Value::Default, SlotValue::to_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Default => Ok(Self::Default),
            other => T::from_value(other).map(Self::Value),
        }
    }
}

impl<W: WireKind, N: Nullability> SlotValue for Expr<W, N> {
    fn to_value(&self) -> Value {
        Value::Expr(Box::new(TypedNode::from(self.clone())))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Expr(typed) => {
                if typed.wire() != W::TYPE {
                    return Err(ValueError::mismatch(W::TYPE, &Value::Expr(typed)));
                }
                if typed.is_nullable() && !N::NULLABLE {
                    return Err(ValueError::UnexpectedNull {
                        expected: W::TYPE.to_string(),
                    });
                }

                Self::from_node_checked((*typed).into_node())
            }
            other => Self::from_node_checked(match other {
                Value::Null => ExprNode::Null,
                Value::Default => ExprNode::Default,
                scalar => ExprNode::Literal(scalar),
            }),
        }
    }
}

impl<W: WireKind, N: Nullability> Expr<W, N> {
    // the node must be something a slot of this type can hold
    fn from_node_checked(node: ExprNode) -> Result<Self, ValueError> {
        match node {
            ExprNode::Null if !N::NULLABLE => Err(ValueError::UnexpectedNull {
                expected: W::TYPE.to_string(),
            }),
            ExprNode::Default => Err(ValueError::UnexpectedDefault),
            ExprNode::Literal(value) => match value.host_type() {
                Some(host) if W::TYPE.accepts(host) => {
                    Ok(Self::from_node(ExprNode::Literal(value)))
                }
                _ => Err(ValueError::mismatch(W::TYPE, &value)),
            },
            node => Ok(Self::from_node(node)),
        }
    }
}
