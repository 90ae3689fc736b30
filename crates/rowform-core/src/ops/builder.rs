use super::Operand;
use crate::{
    compare::{ComparabilityError, ComparabilityRegistry, DenyReason},
    expr::{BinaryOp, Expr, ExprNode, UnaryOp},
    obs::{CatalogEvent, sink},
    wire::{Bool, Boolean, Join, Joined, NotNull, Nullability, Numeric, Ordered, WireKind},
};
use rowform_schema::node::ColumnRef;

///
/// ExprBuilder
///
/// Builds expressions against one comparability registry. Columns from
/// different databases never meet in one operation, however deeply they
/// are nested. Combining two bare tagged columns additionally needs a
/// registry entry; literals and compound operands do not.
///

#[derive(Clone, Copy, Debug)]
pub struct ExprBuilder<'a> {
    registry: &'a ComparabilityRegistry,
    debug: bool,
}

type BinaryResult<W, A, B> = Result<Expr<W, Joined<A, B>>, ComparabilityError>;

impl<'a> ExprBuilder<'a> {
    #[must_use]
    pub const fn new(registry: &'a ComparabilityRegistry) -> Self {
        Self {
            registry,
            debug: false,
        }
    }

    /// Print every gate decision to stdout.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &'a ComparabilityRegistry {
        self.registry
    }

    fn debug_log(&self, s: impl Into<String>) {
        if self.debug {
            println!("[debug] {}", s.into());
        }
    }

    // Any column on one side against any column on the other must share a
    // database; two bare columns must also be a declared pair.
    fn gate(
        &self,
        op: &'static str,
        lhs: &ExprNode,
        rhs: &ExprNode,
    ) -> Result<(), ComparabilityError> {
        // Phase 1: cross-database hard deny, through any nesting.
        let rhs_columns = rhs.columns();
        for a in &lhs.columns() {
            if let Some(b) = rhs_columns.iter().find(|b| !a.same_database(*b)) {
                let result = Err(ComparabilityError::Denied {
                    op,
                    lhs: *a,
                    rhs: *b,
                    reason: DenyReason::CrossDatabase,
                });

                return self.checked(op, a, b, result);
            }
        }

        // Phase 2: bare column pairs need an entry.
        let (Some(a), Some(b)) = (lhs.column_ref(), rhs.column_ref()) else {
            return Ok(());
        };

        self.checked(op, a, b, self.registry.require(op, a, b))
    }

    // record and log one gate decision
    fn checked(
        &self,
        op: &'static str,
        a: &ColumnRef,
        b: &ColumnRef,
        result: Result<(), ComparabilityError>,
    ) -> Result<(), ComparabilityError> {
        sink::record(CatalogEvent::ComparisonChecked {
            op,
            lhs: *a,
            rhs: *b,
            allowed: result.is_ok(),
        });

        match &result {
            Ok(()) => self.debug_log(format!("{op}: {a} ~ {b} allowed")),
            Err(e) => self.debug_log(format!("{op}: {e}")),
        }

        result
    }

    fn binary<W, R, A, B>(&self, op: BinaryOp, a: A, b: B) -> BinaryResult<R, A::Null, B::Null>
    where
        W: WireKind,
        R: WireKind,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        let lhs = a.into_expr().into_node();
        let rhs = b.into_expr().into_node();
        self.gate(op.name(), &lhs, &rhs)?;

        Ok(Expr::from_node(ExprNode::binary(op, lhs, rhs)))
    }

    fn unary<W, R, N, A>(op: UnaryOp, a: A) -> Expr<R, N>
    where
        W: WireKind,
        R: WireKind,
        N: Nullability,
        A: Operand<W>,
    {
        Expr::from_node(ExprNode::unary(op, a.into_expr().into_node()))
    }

    //
    // comparison
    //

    pub fn eq<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: WireKind,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Eq, a, b)
    }

    pub fn ne<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: WireKind,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Ne, a, b)
    }

    pub fn lt<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Ordered,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Lt, a, b)
    }

    pub fn le<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Ordered,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Le, a, b)
    }

    pub fn gt<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Ordered,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Gt, a, b)
    }

    pub fn ge<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Ordered,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Ge, a, b)
    }

    //
    // logical
    //

    pub fn and<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Boolean,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::And, a, b)
    }

    pub fn or<W, A, B>(&self, a: A, b: B) -> BinaryResult<Bool, A::Null, B::Null>
    where
        W: Boolean,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Or, a, b)
    }

    //
    // arithmetic
    //

    pub fn add<W, A, B>(&self, a: A, b: B) -> BinaryResult<W, A::Null, B::Null>
    where
        W: Numeric,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Add, a, b)
    }

    pub fn sub<W, A, B>(&self, a: A, b: B) -> BinaryResult<W, A::Null, B::Null>
    where
        W: Numeric,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Sub, a, b)
    }

    pub fn mul<W, A, B>(&self, a: A, b: B) -> BinaryResult<W, A::Null, B::Null>
    where
        W: Numeric,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Mul, a, b)
    }

    pub fn div<W, A, B>(&self, a: A, b: B) -> BinaryResult<W, A::Null, B::Null>
    where
        W: Numeric,
        A: Operand<W>,
        B: Operand<W>,
        A::Null: Join<B::Null>,
    {
        self.binary(BinaryOp::Div, a, b)
    }

    //
    // unary
    //

    /// Logical negation; keeps the operand's nullability.
    pub fn not<W, A>(&self, a: A) -> Expr<Bool, A::Null>
    where
        W: Boolean,
        A: Operand<W>,
    {
        Self::unary(UnaryOp::Not, a)
    }

    /// Arithmetic negation; keeps the operand's nullability.
    pub fn neg<W, A>(&self, a: A) -> Expr<W, A::Null>
    where
        W: Numeric,
        A: Operand<W>,
    {
        Self::unary(UnaryOp::Neg, a)
    }

    /// `IS NULL` never yields NULL itself.
    pub fn is_null<W, A>(&self, a: A) -> Expr<Bool, NotNull>
    where
        W: WireKind,
        A: Operand<W>,
    {
        Self::unary(UnaryOp::IsNull, a)
    }

    pub fn is_not_null<W, A>(&self, a: A) -> Expr<Bool, NotNull>
    where
        W: WireKind,
        A: Operand<W>,
    {
        Self::unary(UnaryOp::IsNotNull, a)
    }

    /// `COALESCE(a, fallback)` with a non-nullable fallback, so the result
    /// is non-nullable. Two bare columns are gated like any binary op.
    pub fn coalesce<W, A, B>(
        &self,
        a: A,
        fallback: B,
    ) -> Result<Expr<W, NotNull>, ComparabilityError>
    where
        W: WireKind,
        A: Operand<W>,
        B: Operand<W, Null = NotNull>,
    {
        let lhs = a.into_expr().into_node();
        let rhs = fallback.into_expr().into_node();
        self.gate("coalesce", &lhs, &rhs)?;

        Ok(Expr::from_node(ExprNode::Coalesce(Box::new(lhs), Box::new(rhs))))
    }
}
