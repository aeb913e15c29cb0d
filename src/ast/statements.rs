use serde::Serialize;

use crate::ast::{Direction, Predicate, Projection};

/// ORDER BY clause: sort fields plus a single direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    /// Plain field names, in source order
    pub fields: Vec<String>,

    /// Sort direction, `Ascending` when not written
    pub direction: Direction,
}

/// LIMIT clause.
///
/// `LIMIT n` means `LIMIT 0, n`; `LIMIT m, n` skips `m` records and keeps
/// `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimitSpec {
    /// Records to skip before emitting output
    pub offset: u64,

    /// Maximum records to emit
    pub count: u64,
}

/// A compiled query.
///
/// The sole output of the parser and the only artifact the evaluator ever
/// sees. A statement is immutable once built; it is plain owned data and
/// may be shared freely across threads while many records are evaluated in
/// parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// Ordered name-to-expression output map (never empty)
    pub projection: Projection,

    /// FROM target, if written
    pub source: Option<String>,

    /// WHERE tree; `None` matches every record
    pub predicate: Option<Predicate>,

    /// GROUP BY field names
    pub group_by: Option<Vec<String>>,

    /// ORDER BY fields and direction
    pub order_by: Option<OrderBy>,

    /// LIMIT window
    pub limit: Option<LimitSpec>,
}
