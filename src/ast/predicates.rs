use serde::Serialize;

use crate::ast::{BoolOp, CompareOp, Expr};

/// WHERE-clause predicate tree.
///
/// A predicate is a binary tree over comparisons, range tests, and
/// membership tests. `AND` and `OR` carry equal precedence and chain to
/// the right: `a AND b OR c` is `Chain(And, a, Chain(Or, b, c))`.
/// Parenthesized groups splice their inner tree in directly and leave no
/// node of their own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    /// `left OP right`
    Compare {
        left: Expr,
        op: CompareOp,
        right: Expr,
    },

    /// `value BETWEEN low AND high`, inclusive at both ends.
    ///
    /// Equivalent to `value >= low AND value <= high` for every evaluation
    /// of `value`.
    Between {
        value: Expr,
        low: Expr,
        high: Expr,
    },

    /// `value IN (item, item, ...)`; the item list is never empty.
    InSet { value: Expr, items: Vec<Expr> },

    /// `left AND right` / `left OR right`, right-nested for chains.
    Chain {
        op: BoolOp,
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
}
