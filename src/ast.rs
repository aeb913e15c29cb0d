//! # sqlog - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the sqlog query
//! language, a small SQL dialect for filtering, projecting, and aggregating
//! streams of structured log records.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Comparison operators, boolean connectives, sort direction
//! - **[expressions]** - Expression nodes (fields, literals, function calls)
//! - **[predicates]** - WHERE-clause predicate trees
//! - **[projection]** - The ordered name-to-expression projection map
//! - **[statements]** - The compiled `Statement` handed to the evaluator
//!
//! ## Quick Start
//!
//! ```text
//! SELECT ip, count(status) FROM access WHERE status >= 500 GROUP BY ip LIMIT 10
//! ```
//!
//! This query projects the `ip` field and a `count` aggregate, keeps records
//! with a 5xx status, groups by `ip`, and returns the first ten groups.
//!
//! ## Core Concepts
//!
//! ### Statement Structure
//!
//! Every query compiles to a single [`Statement`]:
//!
//! ```text
//! [SELECT] fieldlist [FROM name] [WHERE predicate]
//!          [GROUP BY names] [ORDER BY names [ASC|DESC]] [LIMIT n[,m]]
//! ```
//!
//! Only the field list is mandatory; each clause is independently optional
//! and compiles to `None` when absent.
//!
//! ### Projection
//!
//! The field list becomes an ordered name-to-expression map. Keys derive
//! from `AS` aliases or from the expression's display name; duplicate keys
//! collapse to the last-written value at the first-seen position.
//!
//! ### Function Calls and the Context Reference
//!
//! Every function call carries an implicit first argument, the
//! [`Expr::ContextRef`], denoting the record currently being evaluated.
//! Column-reference arguments are stored as string literals holding the
//! column name so the function can perform its own lookup against the
//! record.
//!
//! ### Predicates
//!
//! WHERE compiles to a binary predicate tree. `AND` and `OR` bind with
//! equal precedence and associate to the right; parentheses are the only
//! way to force a different grouping.

pub mod tokens;
pub mod operators;
pub mod expressions;
pub mod predicates;
pub mod projection;
pub mod statements;

pub use tokens::Token;
pub use operators::{BoolOp, CompareOp, Direction};
pub use expressions::{Expr, Field};
pub use predicates::Predicate;
pub use projection::Projection;
pub use statements::{LimitSpec, OrderBy, Statement};
