//! Wire-level expression values.
//!
//! `Expr<W, N>` is what a query-building collaborator receives for a slot
//! or an operation result. The node tree is plain data; rendering it to SQL
//! text happens outside this crate, `Display` is for diagnostics.

use crate::{
    value::{HostScalar, Value},
    wire::{NotNull, Nullability, Nullable, WireKind},
    wrap::Defaultable,
};
use derive_more::Display;
use rowform_schema::{node::ColumnRef, types::WireType};
use serde::Serialize;
use std::{fmt, marker::PhantomData};

///
/// UnaryOp
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum UnaryOp {
    #[display("IS NOT NULL")]
    IsNotNull,
    #[display("IS NULL")]
    IsNull,
    #[display("-")]
    Neg,
    #[display("NOT")]
    Not,
}

///
/// BinaryOp
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum BinaryOp {
    #[display("+")]
    Add,
    #[display("AND")]
    And,
    #[display("/")]
    Div,
    #[display("=")]
    Eq,
    #[display(">=")]
    Ge,
    #[display(">")]
    Gt,
    #[display("<=")]
    Le,
    #[display("<")]
    Lt,
    #[display("*")]
    Mul,
    #[display("<>")]
    Ne,
    #[display("OR")]
    Or,
    #[display("-")]
    Sub,
}

impl BinaryOp {
    /// Operators whose result does not depend on operand order.
    #[must_use]
    pub const fn is_symmetric(self) -> bool {
        matches!(
            self,
            Self::Add | Self::And | Self::Eq | Self::Mul | Self::Ne | Self::Or
        )
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::And => "and",
            Self::Div => "div",
            Self::Eq => "eq",
            Self::Ge => "ge",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Lt => "lt",
            Self::Mul => "mul",
            Self::Ne => "ne",
            Self::Or => "or",
            Self::Sub => "sub",
        }
    }
}

///
/// ExprNode
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ExprNode {
    Binary {
        op: BinaryOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
    Coalesce(Box<Self>, Box<Self>),
    Column(ColumnRef),
    Default,
    Literal(Value),
    Null,
    Unary {
        op: UnaryOp,
        arg: Box<Self>,
    },
}

impl ExprNode {
    /// The tagged column this node is, if it is a bare column reference.
    #[must_use]
    pub const fn column_ref(&self) -> Option<&ColumnRef> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Every column referenced anywhere in the tree, in visit order.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnRef> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);

        out
    }

    fn collect_columns(&self, out: &mut Vec<ColumnRef>) {
        match self {
            Self::Binary { lhs, rhs, .. } | Self::Coalesce(lhs, rhs) => {
                lhs.collect_columns(out);
                rhs.collect_columns(out);
            }
            Self::Column(column) => out.push(*column),
            Self::Unary { arg, .. } => arg.collect_columns(out),
            Self::Default | Self::Literal(_) | Self::Null => {}
        }
    }

    pub(crate) fn binary(op: BinaryOp, lhs: Self, rhs: Self) -> Self {
        // symmetric operators get one canonical operand order
        let (lhs, rhs) = if op.is_symmetric() && lhs.order_key() > rhs.order_key() {
            (rhs, lhs)
        } else {
            (lhs, rhs)
        };

        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    // rendering alone drops the database, so columns break ties
    fn order_key(&self) -> (String, Vec<ColumnRef>) {
        (self.to_string(), self.columns())
    }

    pub(crate) fn unary(op: UnaryOp, arg: Self) -> Self {
        Self::Unary {
            op,
            arg: Box::new(arg),
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Self::Coalesce(lhs, rhs) => write!(f, "COALESCE({lhs}, {rhs})"),
            Self::Column(column) => write!(
                f,
                "\"{}\".\"{}\".\"{}\"",
                column.table.schema, column.table.table, column.column
            ),
            Self::Default => write!(f, "DEFAULT"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Null => write!(f, "NULL"),
            Self::Unary { op, arg } => match op {
                UnaryOp::IsNotNull | UnaryOp::IsNull => write!(f, "({arg} {op})"),
                UnaryOp::Neg => write!(f, "(-{arg})"),
                UnaryOp::Not => write!(f, "(NOT {arg})"),
            },
        }
    }
}

///
/// Expr
///
/// Expression of wire type `W` and nullability `N`.
///

pub struct Expr<W, N> {
    node: ExprNode,
    _marker: PhantomData<fn() -> (W, N)>,
}

impl<W: WireKind, N: Nullability> Expr<W, N> {
    pub(crate) const fn from_node(node: ExprNode) -> Self {
        Self {
            node,
            _marker: PhantomData,
        }
    }

    /// Bare column expression; reached through `Column::expr`, which pins
    /// `W` and `N` to the column's declaration.
    #[must_use]
    pub(crate) const fn column(column: ColumnRef) -> Self {
        Self::from_node(ExprNode::Column(column))
    }

    #[must_use]
    pub const fn node(&self) -> &ExprNode {
        &self.node
    }

    #[must_use]
    pub fn into_node(self) -> ExprNode {
        self.node
    }

    /// The tagged column, when this expression is a bare column.
    #[must_use]
    pub const fn column_ref(&self) -> Option<&ColumnRef> {
        self.node.column_ref()
    }

    /// Widen to nullable. Idempotent: a nullable expression stays
    /// `Expr<W, Nullable>`, never a nested wrapper.
    #[must_use]
    pub fn nullable(self) -> Expr<W, Nullable> {
        Expr::from_node(self.node)
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        N::NULLABLE
    }

    #[must_use]
    pub const fn wire_type(&self) -> WireType {
        W::TYPE
    }
}

impl<W: WireKind> Expr<W, NotNull> {
    /// Literal host value bound to wire type `W`.
    pub fn literal<H: Encode<W>>(value: H) -> Self {
        Self::from_node(ExprNode::Literal(value.to_value()))
    }
}

impl<W: WireKind> Expr<W, Nullable> {
    #[must_use]
    pub const fn null() -> Self {
        Self::from_node(ExprNode::Null)
    }
}

impl<W, N> Clone for Expr<W, N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            _marker: PhantomData,
        }
    }
}

impl<W, N> PartialEq for Expr<W, N> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<W: WireKind, N: Nullability> fmt::Debug for Expr<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("wire", &W::TYPE)
            .field("nullable", &N::NULLABLE)
            .field("node", &self.node)
            .finish()
    }
}

impl<W, N> fmt::Display for Expr<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

impl<W, N> Serialize for Expr<W, N> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.serialize(serializer)
    }
}

///
/// TypedNode
///
/// An expression node together with the wire type and nullability of the
/// `Expr` it was taken from. Only an `Expr` can produce one.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TypedNode {
    wire: WireType,
    nullable: bool,
    node: ExprNode,
}

impl TypedNode {
    #[must_use]
    pub const fn wire(&self) -> WireType {
        self.wire
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn node(&self) -> &ExprNode {
        &self.node
    }

    #[must_use]
    pub fn into_node(self) -> ExprNode {
        self.node
    }
}

impl<W: WireKind, N: Nullability> From<Expr<W, N>> for TypedNode {
    fn from(expr: Expr<W, N>) -> Self {
        Self {
            wire: W::TYPE,
            nullable: N::NULLABLE,
            node: expr.node,
        }
    }
}

impl fmt::Display for TypedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

///
/// Encode
/// Host scalars that bind to wire type `W`.
///

pub trait Encode<W: WireKind>: HostScalar {}

///
/// WriteSlot
///
/// A wire-write slot flattened into the node the collaborator emits:
/// the expression itself, or the DEFAULT marker.
///

pub trait WriteSlot {
    fn write_node(&self) -> ExprNode;
}

impl<W: WireKind, N: Nullability> WriteSlot for Expr<W, N> {
    fn write_node(&self) -> ExprNode {
        self.node.clone()
    }
}

impl<W: WireKind, N: Nullability> WriteSlot for Defaultable<Expr<W, N>> {
    fn write_node(&self) -> ExprNode {
        self.as_ref().fold(ExprNode::Default, WriteSlot::write_node)
    }
}
