use std::mem;

use crate::{
    ast::{
        BoolOp, Direction, Expr, Field, LimitSpec, OrderBy, Predicate, Projection, Statement,
        Token,
    },
    lexer::{LexError, Lexer},
};

/// A token the grammar could not accept.
///
/// `token` is `None` when the failure happened at end of input; `position`
/// is the character offset where the offending token started.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub token: Option<Token>,
    pub position: usize,
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "Syntax error at position {}: unexpected {:?}",
                self.position, token
            ),
            None => write!(
                f,
                "Syntax error at position {}: unexpected end of input",
                self.position
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Errors that can abort a parse.
///
/// There is no recovery and no partial result: the first failure ends the
/// parse, and re-parsing the same input fails identically.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Lexical failure, propagated unmodified from the lexer
    Lex(LexError),

    /// Structural failure in the grammar
    Syntax(SyntaxError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::Syntax(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            ParseError::Syntax(e) => Some(e),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

/// Injectable side-channel for syntax diagnostics.
///
/// The parser invokes the reporter with every syntax failure before
/// surfacing it; the parse fails regardless of what the reporter does.
/// Any `FnMut(&SyntaxError)` closure is a reporter.
pub trait ErrorReporter {
    fn report(&mut self, error: &SyntaxError);
}

impl<F: FnMut(&SyntaxError)> ErrorReporter for F {
    fn report(&mut self, error: &SyntaxError) {
        self(error)
    }
}

/// The grammar engine.
///
/// A `Parser` value is constructed per parse; it holds no global state, so
/// independent parses may run concurrently on separate threads.
pub struct Parser<'r> {
    lexer: Lexer,
    current_token: Token,
    current_pos: usize,
    reporter: Option<&'r mut dyn ErrorReporter>,
}

impl<'r> Parser<'r> {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_pos = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_pos,
            reporter: None,
        })
    }

    /// Build a parser that forwards syntax failures to `reporter`.
    pub fn with_reporter(
        lexer: Lexer,
        reporter: &'r mut dyn ErrorReporter,
    ) -> Result<Self, ParseError> {
        let mut parser = Parser::new(lexer)?;
        parser.reporter = Some(reporter);
        Ok(parser)
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_pos = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.syntax_error());
        }
        self.advance()
    }

    fn syntax_error(&mut self) -> ParseError {
        let token = match &self.current_token {
            Token::Eof => None,
            token => Some(token.clone()),
        };
        let error = SyntaxError {
            token,
            position: self.current_pos,
        };
        if let Some(reporter) = self.reporter.as_mut() {
            reporter.report(&error);
        }
        ParseError::Syntax(error)
    }

    /// Parse a complete statement.
    ///
    /// ```text
    /// [SELECT] fieldlist [FROM IDENT] [WHERE predicate]
    ///          [GROUP BY identlist] [ORDER BY identlist [ASC|DESC]]
    ///          [LIMIT INT [, INT]]
    /// ```
    pub fn parse(&mut self) -> Result<Statement, ParseError> {
        if self.check(&Token::Select) {
            self.advance()?;
        }

        let projection = self.parse_fields()?;
        let source = self.parse_from()?;
        let predicate = self.parse_where()?;
        let group_by = self.parse_group()?;
        let order_by = self.parse_order()?;
        let limit = self.parse_limit()?;

        self.expect(Token::Eof)?;

        Ok(Statement {
            projection,
            source,
            predicate,
            group_by,
            order_by,
            limit,
        })
    }

    // ------------------------------------------------------------------
    // Projection
    // ------------------------------------------------------------------

    fn parse_fields(&mut self) -> Result<Projection, ParseError> {
        let mut projection = Projection::new();

        let field = self.parse_field()?;
        projection.insert(field.key(), field.into_expr());

        while self.check(&Token::Comma) {
            self.advance()?;
            let field = self.parse_field()?;
            projection.insert(field.key(), field.into_expr());
        }

        Ok(projection)
    }

    fn parse_field(&mut self) -> Result<Field, ParseError> {
        let expr = self.parse_field_expr()?;
        let mut field = Field::Bare(expr);

        // Repeated aliases are grammatical; the last one wins
        while self.check(&Token::As) {
            self.advance()?;
            let alias = self.expect_identifier()?;
            field = Field::Aliased {
                expr: field.into_expr(),
                alias,
            };
        }

        Ok(field)
    }

    fn parse_field_expr(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Star => {
                self.advance()?;
                Ok(Expr::Wildcard)
            }
            Token::Integer(n) => {
                self.advance()?;
                Ok(Expr::Integer(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::String(s))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if self.check(&Token::LParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(Expr::Identifier(name))
                }
            }
            token => {
                self.current_token = token;
                Err(self.syntax_error())
            }
        }
    }

    /// Parse `name(arg, arg, ...)` and apply the calling convention: the
    /// stored argument list starts with the context reference, and every
    /// column-reference argument is replaced by a string literal holding
    /// the column name. Constants and nested calls pass through (nested
    /// calls rewrote their own arguments when they were built).
    fn parse_function_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(Token::LParen)?;

        let mut args = vec![Expr::ContextRef];
        args.push(rewrite_argument(self.parse_field()?));

        while self.check(&Token::Comma) {
            self.advance()?;
            args.push(rewrite_argument(self.parse_field()?));
        }

        self.expect(Token::RParen)?;
        Ok(Expr::FunctionCall { name, args })
    }

    // ------------------------------------------------------------------
    // Clauses
    // ------------------------------------------------------------------

    fn parse_from(&mut self) -> Result<Option<String>, ParseError> {
        if !self.check(&Token::From) {
            return Ok(None);
        }
        self.advance()?;
        Ok(Some(self.expect_identifier()?))
    }

    fn parse_where(&mut self) -> Result<Option<Predicate>, ParseError> {
        if !self.check(&Token::Where) {
            return Ok(None);
        }
        self.advance()?;
        Ok(Some(self.parse_predicate()?))
    }

    fn parse_group(&mut self) -> Result<Option<Vec<String>>, ParseError> {
        if !self.check(&Token::Group) {
            return Ok(None);
        }
        self.advance()?;
        self.expect(Token::By)?;
        Ok(Some(self.parse_ident_list()?))
    }

    fn parse_order(&mut self) -> Result<Option<OrderBy>, ParseError> {
        if !self.check(&Token::Order) {
            return Ok(None);
        }
        self.advance()?;
        self.expect(Token::By)?;

        let fields = self.parse_ident_list()?;

        let direction = if self.check(&Token::Asc) {
            self.advance()?;
            Direction::Ascending
        } else if self.check(&Token::Desc) {
            self.advance()?;
            Direction::Descending
        } else {
            Direction::default()
        };

        Ok(Some(OrderBy { fields, direction }))
    }

    /// Parse `IDENT {, IDENT}` for GROUP BY and ORDER BY.
    ///
    /// Only bare field names are grammatical here; anything else in an
    /// identifier position is a syntax failure.
    fn parse_ident_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_identifier()?];

        while self.check(&Token::Comma) {
            self.advance()?;
            names.push(self.expect_identifier()?);
        }

        Ok(names)
    }

    fn parse_limit(&mut self) -> Result<Option<LimitSpec>, ParseError> {
        if !self.check(&Token::Limit) {
            return Ok(None);
        }
        self.advance()?;

        let first = self.expect_integer()?;

        if self.check(&Token::Comma) {
            self.advance()?;
            let count = self.expect_integer()?;
            Ok(Some(LimitSpec {
                offset: first,
                count,
            }))
        } else {
            // LIMIT n is LIMIT 0, n
            Ok(Some(LimitSpec {
                offset: 0,
                count: first,
            }))
        }
    }

    // ------------------------------------------------------------------
    // Predicates
    // ------------------------------------------------------------------

    /// Parse a chain of conditions.
    ///
    /// AND and OR bind with equal precedence and associate to the right:
    /// `a AND b OR c` becomes `Chain(And, a, Chain(Or, b, c))`. This is
    /// deliberate; parentheses are the only way to regroup.
    fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        let left = self.parse_condition()?;

        let op = match &self.current_token {
            Token::And => BoolOp::And,
            Token::Or => BoolOp::Or,
            _ => return Ok(left),
        };

        self.advance()?;
        let right = self.parse_predicate()?;

        Ok(Predicate::Chain {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_condition(&mut self) -> Result<Predicate, ParseError> {
        if self.check(&Token::LParen) {
            self.advance()?;
            // The group contributes no node; its inner tree splices in
            let inner = self.parse_predicate()?;
            self.expect(Token::RParen)?;
            return Ok(inner);
        }

        let left = self.parse_value()?;

        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Operator(op) => {
                self.advance()?;
                let right = self.parse_value()?;
                Ok(Predicate::Compare { left, op, right })
            }
            Token::In => {
                self.advance()?;
                self.parse_in_list(left)
            }
            Token::Between => {
                self.advance()?;
                let low = self.parse_value()?;
                self.expect(Token::And)?;
                let high = self.parse_value()?;
                Ok(Predicate::Between {
                    value: left,
                    low,
                    high,
                })
            }
            token => {
                self.current_token = token;
                Err(self.syntax_error())
            }
        }
    }

    fn parse_in_list(&mut self, value: Expr) -> Result<Predicate, ParseError> {
        self.expect(Token::LParen)?;

        // At least one item, then an optional comma chain
        let mut items = vec![self.parse_value()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            items.push(self.parse_value()?);
        }

        self.expect(Token::RParen)?;
        Ok(Predicate::InSet { value, items })
    }

    fn parse_value(&mut self) -> Result<Expr, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(Expr::Identifier(name))
            }
            Token::Integer(n) => {
                self.advance()?;
                Ok(Expr::Integer(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::String(s))
            }
            token => {
                self.current_token = token;
                Err(self.syntax_error())
            }
        }
    }

    // ------------------------------------------------------------------
    // Terminals
    // ------------------------------------------------------------------

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => {
                self.advance()?;
                Ok(name)
            }
            token => {
                self.current_token = token;
                Err(self.syntax_error())
            }
        }
    }

    fn expect_integer(&mut self) -> Result<u64, ParseError> {
        if let Token::Integer(n) = &self.current_token {
            // A payload that does not fit the clause is a syntax failure,
            // never a silent coercion
            if let Ok(value) = u64::try_from(*n) {
                self.advance()?;
                return Ok(value);
            }
        }
        Err(self.syntax_error())
    }
}

/// The argument half of the calling convention: column references become
/// string literals holding the column name; everything else is unchanged.
fn rewrite_argument(field: Field) -> Expr {
    match field.into_expr() {
        Expr::Identifier(name) => Expr::String(name),
        expr => expr,
    }
}

/// Compile a query string into a [`Statement`].
///
/// The single public entry point: tokenizes `source`, runs the grammar,
/// and returns the compiled statement or the first failure.
pub fn parse(source: &str) -> Result<Statement, ParseError> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}
