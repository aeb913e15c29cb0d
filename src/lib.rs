pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod parser;

pub use ast::{
    BoolOp, CompareOp, Direction, Expr, Field, LimitSpec, OrderBy, Predicate, Projection,
    Statement, Token,
};
pub use lexer::{LexError, Lexer};
pub use parser::{parse, ErrorReporter, ParseError, Parser, SyntaxError};
