use serde::Serialize;

/// Abstract Syntax Tree node representing a field expression.
///
/// Expressions appear in the projection and as WHERE-clause operands. They
/// are plain owned data: a compiled statement can be shared across threads
/// and evaluated against many records concurrently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Field name reference
    ///
    /// # Example
    /// ```text
    /// status
    /// ```
    Identifier(String),

    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 404
    /// ```
    Integer(i64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "GET"
    /// ```
    String(String),

    /// Wildcard field (`*`)
    ///
    /// Projects like any other field under the key `"*"`; what the wildcard
    /// means when combined with explicit fields is the evaluator's call.
    Wildcard,

    /// The implicit "current record" reference.
    ///
    /// Injected as the first argument of every [`Expr::FunctionCall`];
    /// never written in source and never printed by [`Expr::display_name`].
    ContextRef,

    /// Function call
    ///
    /// `args[0]` is always [`Expr::ContextRef`]. Column-reference arguments
    /// are stored as string literals holding the column name so the
    /// function performs its own lookup against the record; constant
    /// arguments pass through unchanged.
    ///
    /// # Example
    /// ```text
    /// count(status)    =>  FunctionCall { name: "count",
    ///                                     args: [ContextRef, String("status")] }
    /// ```
    FunctionCall { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Derive the default projection key for this expression.
    ///
    /// Identifiers print as their name, literals as their raw text, the
    /// wildcard as `*`, and function calls as `name(arg,arg,...)` over the
    /// displayable arguments (the injected context reference is skipped).
    pub fn display_name(&self) -> String {
        match self {
            Expr::Identifier(name) => name.clone(),
            Expr::Integer(n) => n.to_string(),
            Expr::String(s) => s.clone(),
            Expr::Wildcard => "*".to_string(),
            Expr::ContextRef => String::new(),
            Expr::FunctionCall { name, args } => {
                let printed: Vec<String> = args
                    .iter()
                    .skip(1)
                    .map(Expr::display_name)
                    .collect();
                format!("{}({})", name, printed.join(","))
            }
        }
    }
}

/// A single item of a SELECT field list.
///
/// Transient parser output: the projection builder consumes fields and
/// turns aliases into projection keys, so no alias node survives in the
/// compiled [`Statement`](crate::ast::Statement).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Field {
    /// A field without an alias
    Bare(Expr),

    /// `expr AS alias`
    Aliased { expr: Expr, alias: String },
}

impl Field {
    /// The projection key this field contributes.
    pub fn key(&self) -> String {
        match self {
            Field::Bare(expr) => expr.display_name(),
            Field::Aliased { alias, .. } => alias.clone(),
        }
    }

    /// The expression this field contributes, alias stripped.
    pub fn into_expr(self) -> Expr {
        match self {
            Field::Bare(expr) => expr,
            Field::Aliased { expr, .. } => expr,
        }
    }
}
