use serde::Serialize;

/// Comparison operator symbols.
///
/// The parser records the symbol without interpreting it; the evaluator
/// decides how each comparator applies to record values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// Equal (`=` or `==`)
    Eq,
    /// Not equal (`!=` or `<>`)
    NotEq,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than or equal (`>=`)
    GtEq,
}

impl CompareOp {
    /// The canonical source form of the operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::LtEq => "<=",
            CompareOp::GtEq => ">=",
        }
    }
}

/// Boolean connectives joining predicate chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoolOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

/// ORDER BY sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// Ascending order (the default when no direction is written)
    #[default]
    Ascending,
    /// Descending order
    Descending,
}
