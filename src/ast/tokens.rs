use crate::ast::CompareOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    /// `SELECT` keyword (optional query prefix)
    ///
    /// # Examples
    /// ```text
    /// SELECT ip, status
    /// ip, status
    /// ```
    Select,

    /// `FROM` keyword introducing the record source
    ///
    /// # Examples
    /// ```text
    /// SELECT * FROM access
    /// ```
    From,

    /// `WHERE` keyword introducing the predicate
    ///
    /// # Examples
    /// ```text
    /// SELECT * WHERE status = 404
    /// ```
    Where,

    /// `GROUP` keyword (always followed by `BY`)
    Group,

    /// `BY` keyword (follows `GROUP` or `ORDER`)
    By,

    /// `ORDER` keyword (always followed by `BY`)
    Order,

    /// `ASC` sort direction
    Asc,

    /// `DESC` sort direction
    Desc,

    /// `LIMIT` keyword
    ///
    /// # Examples
    /// ```text
    /// LIMIT 10
    /// LIMIT 20, 10
    /// ```
    Limit,

    /// Logical AND connective (equal precedence with OR)
    And,

    /// Logical OR connective (equal precedence with AND)
    Or,

    /// `IN` membership test
    ///
    /// # Examples
    /// ```text
    /// status IN (401, 403, 404)
    /// ```
    In,

    /// `BETWEEN` range test (inclusive both ends)
    ///
    /// # Examples
    /// ```text
    /// status BETWEEN 400 AND 499
    /// ```
    Between,

    /// `AS` field alias
    ///
    /// # Examples
    /// ```text
    /// count(status) AS hits
    /// ```
    As,

    // Payload-carrying tokens
    /// Comparison operator symbol
    ///
    /// The symbol set is fixed by the lexer; the parser stores the symbol
    /// opaquely and leaves interpretation to the evaluator.
    ///
    /// # Examples
    /// ```text
    /// =  ==  !=  <>  <  >  <=  >=
    /// ```
    Operator(CompareOp),

    /// Field name or function name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    ///
    /// # Examples
    /// ```text
    /// ip
    /// response_time
    /// _raw
    /// ```
    Identifier(String),

    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 404
    /// 0
    /// ```
    Integer(i64),

    /// String literal enclosed in single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "GET"
    /// 'us-east'
    /// ```
    String(String),

    // Structure
    /// Wildcard field (`*`)
    Star,

    /// Comma separating fields, list items, or LIMIT arguments
    Comma,

    /// Left parenthesis (function call, IN list, predicate group)
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}
