// tests/parser_tests.rs

use sqlog::ast::{BoolOp, CompareOp, Direction, Expr, Predicate, Token};
use sqlog::parser::{parse, ParseError};
use sqlog::lexer::LexError;

// ============================================================================
// Field lists and projection
// ============================================================================

#[test]
fn test_single_field() {
    let stmt = parse("ip").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["ip"]);
    assert_eq!(stmt.projection.get("ip"), Some(&Expr::Identifier("ip".to_string())));
}

#[test]
fn test_select_keyword_is_optional() {
    let with = parse("SELECT ip, status").unwrap();
    let without = parse("ip, status").unwrap();
    assert_eq!(with, without);
}

#[test]
fn test_field_order_preserved() {
    let stmt = parse("c, a, b").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

#[test]
fn test_wildcard() {
    let stmt = parse("SELECT *").unwrap();
    assert_eq!(stmt.projection.len(), 1);
    assert_eq!(stmt.projection.get("*"), Some(&Expr::Wildcard));
}

#[test]
fn test_wildcard_with_explicit_fields() {
    // Accepted structurally; meaning is the evaluator's problem
    let stmt = parse("*, ip, status").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["*", "ip", "status"]);
}

#[test]
fn test_literal_fields() {
    let stmt = parse("5, 'tag'").unwrap();
    assert_eq!(stmt.projection.get("5"), Some(&Expr::Integer(5)));
    assert_eq!(stmt.projection.get("tag"), Some(&Expr::String("tag".to_string())));
}

#[test]
fn test_alias() {
    let stmt = parse("status AS code").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["code"]);
    assert_eq!(
        stmt.projection.get("code"),
        Some(&Expr::Identifier("status".to_string()))
    );
}

#[test]
fn test_duplicate_keys_collapse_to_last_value_first_position() {
    // a, b AS a  =>  single entry "a" holding b's expression
    let stmt = parse("a, b AS a").unwrap();
    assert_eq!(stmt.projection.len(), 1);
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["a"]);
    assert_eq!(stmt.projection.get("a"), Some(&Expr::Identifier("b".to_string())));
}

#[test]
fn test_duplicate_key_keeps_original_position() {
    let stmt = parse("a, b, c AS a").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(stmt.projection.get("a"), Some(&Expr::Identifier("c".to_string())));
}

#[test]
fn test_repeated_alias_last_wins() {
    let stmt = parse("a AS b AS c").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["c"]);
    assert_eq!(stmt.projection.get("c"), Some(&Expr::Identifier("a".to_string())));
}

// ============================================================================
// Function calls and the calling convention
// ============================================================================

#[test]
fn test_function_call_argument_rewrite() {
    let stmt = parse("count(field, 5)").unwrap();
    let expr = stmt.projection.get("count(field,5)").expect("derived key");

    match expr {
        Expr::FunctionCall { name, args } => {
            assert_eq!(name, "count");
            assert_eq!(
                args,
                &vec![
                    Expr::ContextRef,
                    Expr::String("field".to_string()),
                    Expr::Integer(5),
                ]
            );
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn test_function_call_string_argument_passes_through() {
    let stmt = parse("top('GET', 3)").unwrap();
    let expr = stmt.projection.get("top(GET,3)").expect("derived key");

    match expr {
        Expr::FunctionCall { args, .. } => {
            assert_eq!(
                args,
                &vec![
                    Expr::ContextRef,
                    Expr::String("GET".to_string()),
                    Expr::Integer(3),
                ]
            );
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn test_nested_function_calls_rewrite_their_own_arguments() {
    let stmt = parse("avg(round(time))").unwrap();
    let expr = stmt.projection.get("avg(round(time))").expect("derived key");

    match expr {
        Expr::FunctionCall { name, args } => {
            assert_eq!(name, "avg");
            assert_eq!(args[0], Expr::ContextRef);
            match &args[1] {
                Expr::FunctionCall { name, args } => {
                    assert_eq!(name, "round");
                    assert_eq!(
                        args,
                        &vec![Expr::ContextRef, Expr::String("time".to_string())]
                    );
                }
                other => panic!("Expected nested call, got {:?}", other),
            }
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn test_function_call_wildcard_argument() {
    let stmt = parse("count(*)").unwrap();
    let expr = stmt.projection.get("count(*)").expect("derived key");

    match expr {
        Expr::FunctionCall { args, .. } => {
            assert_eq!(args, &vec![Expr::ContextRef, Expr::Wildcard]);
        }
        other => panic!("Expected function call, got {:?}", other),
    }
}

#[test]
fn test_aliased_function_call() {
    let stmt = parse("count(status) AS hits").unwrap();
    let keys: Vec<&str> = stmt.projection.keys().collect();
    assert_eq!(keys, vec!["hits"]);
    assert!(matches!(
        stmt.projection.get("hits"),
        Some(Expr::FunctionCall { .. })
    ));
}

// ============================================================================
// WHERE: comparisons, IN, BETWEEN
// ============================================================================

#[test]
fn test_comparison() {
    let stmt = parse("* WHERE status = 404").unwrap();
    assert_eq!(
        stmt.predicate,
        Some(Predicate::Compare {
            left: Expr::Identifier("status".to_string()),
            op: CompareOp::Eq,
            right: Expr::Integer(404),
        })
    );
}

#[test]
fn test_comparison_operators_survive() {
    for (source, op) in [
        ("* WHERE a = 1", CompareOp::Eq),
        ("* WHERE a != 1", CompareOp::NotEq),
        ("* WHERE a <> 1", CompareOp::NotEq),
        ("* WHERE a < 1", CompareOp::Lt),
        ("* WHERE a > 1", CompareOp::Gt),
        ("* WHERE a <= 1", CompareOp::LtEq),
        ("* WHERE a >= 1", CompareOp::GtEq),
    ] {
        let stmt = parse(source).unwrap();
        match stmt.predicate {
            Some(Predicate::Compare { op: parsed, .. }) => assert_eq!(parsed, op),
            other => panic!("Expected comparison for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_in_set() {
    let stmt = parse("* WHERE status IN (401, 403, 'forbidden')").unwrap();
    assert_eq!(
        stmt.predicate,
        Some(Predicate::InSet {
            value: Expr::Identifier("status".to_string()),
            items: vec![
                Expr::Integer(401),
                Expr::Integer(403),
                Expr::String("forbidden".to_string()),
            ],
        })
    );
}

#[test]
fn test_in_single_item() {
    let stmt = parse("* WHERE method IN ('GET')").unwrap();
    match stmt.predicate {
        Some(Predicate::InSet { items, .. }) => assert_eq!(items.len(), 1),
        other => panic!("Expected IN set, got {:?}", other),
    }
}

#[test]
fn test_empty_in_list_is_error() {
    assert!(matches!(
        parse("* WHERE status IN ()"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_between() {
    let stmt = parse("* WHERE status BETWEEN 400 AND 499").unwrap();
    assert_eq!(
        stmt.predicate,
        Some(Predicate::Between {
            value: Expr::Identifier("status".to_string()),
            low: Expr::Integer(400),
            high: Expr::Integer(499),
        })
    );
}

#[test]
fn test_between_then_chain() {
    // The AND inside BETWEEN belongs to BETWEEN; the second AND chains
    let stmt = parse("* WHERE status BETWEEN 400 AND 499 AND host = 'web1'").unwrap();
    match stmt.predicate {
        Some(Predicate::Chain { op, left, right }) => {
            assert_eq!(op, BoolOp::And);
            assert!(matches!(*left, Predicate::Between { .. }));
            assert!(matches!(*right, Predicate::Compare { .. }));
        }
        other => panic!("Expected chain, got {:?}", other),
    }
}

// ============================================================================
// WHERE: boolean chains (equal precedence, right-associative)
// ============================================================================

#[test]
fn test_and_or_equal_precedence_right_nested() {
    // a = 1 AND b = 2 OR c = 3  =>  Chain(And, a=1, Chain(Or, b=2, c=3))
    let stmt = parse("* WHERE a = 1 AND b = 2 OR c = 3").unwrap();

    match stmt.predicate.expect("predicate") {
        Predicate::Chain { op, left, right } => {
            assert_eq!(op, BoolOp::And);
            assert_eq!(
                *left,
                Predicate::Compare {
                    left: Expr::Identifier("a".to_string()),
                    op: CompareOp::Eq,
                    right: Expr::Integer(1),
                }
            );
            match *right {
                Predicate::Chain { op, left, right } => {
                    assert_eq!(op, BoolOp::Or);
                    assert!(matches!(
                        *left,
                        Predicate::Compare { left: Expr::Identifier(ref n), .. } if n == "b"
                    ));
                    assert!(matches!(
                        *right,
                        Predicate::Compare { left: Expr::Identifier(ref n), .. } if n == "c"
                    ));
                }
                other => panic!("Expected right-nested chain, got {:?}", other),
            }
        }
        other => panic!("Expected chain, got {:?}", other),
    }
}

#[test]
fn test_long_chain_right_nested() {
    let stmt = parse("* WHERE a = 1 OR b = 2 OR c = 3 OR d = 4").unwrap();

    // Each chain node hangs off the right spine
    let mut depth = 0;
    let mut node = stmt.predicate.expect("predicate");
    while let Predicate::Chain { op, left, right } = node {
        assert_eq!(op, BoolOp::Or);
        assert!(matches!(*left, Predicate::Compare { .. }));
        depth += 1;
        node = *right;
    }
    assert!(matches!(node, Predicate::Compare { .. }));
    assert_eq!(depth, 3);
}

#[test]
fn test_parentheses_regroup() {
    // (a = 1 AND b = 2) OR c = 3  =>  Chain(Or, Chain(And, ..), ..)
    let stmt = parse("* WHERE (a = 1 AND b = 2) OR c = 3").unwrap();

    match stmt.predicate.expect("predicate") {
        Predicate::Chain { op, left, right } => {
            assert_eq!(op, BoolOp::Or);
            assert!(matches!(
                *left,
                Predicate::Chain { op: BoolOp::And, .. }
            ));
            assert!(matches!(*right, Predicate::Compare { .. }));
        }
        other => panic!("Expected chain, got {:?}", other),
    }
}

#[test]
fn test_group_is_structurally_transparent() {
    // Parentheses contribute no node of their own
    let grouped = parse("* WHERE (status = 404)").unwrap();
    let plain = parse("* WHERE status = 404").unwrap();
    assert_eq!(grouped.predicate, plain.predicate);
}

#[test]
fn test_nested_groups() {
    let stmt = parse("* WHERE ((a = 1) OR (b = 2)) AND c = 3").unwrap();
    match stmt.predicate.expect("predicate") {
        Predicate::Chain { op, left, .. } => {
            assert_eq!(op, BoolOp::And);
            assert!(matches!(*left, Predicate::Chain { op: BoolOp::Or, .. }));
        }
        other => panic!("Expected chain, got {:?}", other),
    }
}

#[test]
fn test_where_values_are_flat() {
    // Function calls are not values inside WHERE
    assert!(matches!(
        parse("* WHERE count(x) = 1"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn test_where_with_empty_body_is_error() {
    match parse("* WHERE") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.token, None),
        other => panic!("Expected syntax error at end of input, got {:?}", other),
    }
}

// ============================================================================
// FROM, GROUP BY, ORDER BY, LIMIT
// ============================================================================

#[test]
fn test_from() {
    let stmt = parse("* FROM access").unwrap();
    assert_eq!(stmt.source, Some("access".to_string()));
}

#[test]
fn test_from_requires_identifier() {
    match parse("* FROM 42") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.token, Some(Token::Integer(42))),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_group_by() {
    let stmt = parse("* GROUP BY ip, status").unwrap();
    assert_eq!(
        stmt.group_by,
        Some(vec!["ip".to_string(), "status".to_string()])
    );
}

#[test]
fn test_group_by_long_identifier_chain() {
    let stmt = parse("* GROUP BY ip, method, status, host").unwrap();
    assert_eq!(
        stmt.group_by,
        Some(vec![
            "ip".to_string(),
            "method".to_string(),
            "status".to_string(),
            "host".to_string(),
        ])
    );
}

#[test]
fn test_identifier_list_comma_requires_identifier() {
    // A comma in GROUP BY or ORDER BY must be followed by a field name
    match parse("* GROUP BY ip, 5") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.token, Some(Token::Integer(5))),
        other => panic!("Expected syntax error, got {:?}", other),
    }
    assert!(parse("* ORDER BY a, DESC").is_err());
    assert!(parse("* GROUP BY ip,").is_err());
}

#[test]
fn test_group_by_rejects_expressions() {
    assert!(parse("* GROUP BY count(ip)").is_err());
    assert!(parse("* GROUP BY 5").is_err());
}

#[test]
fn test_order_by_defaults_ascending() {
    let stmt = parse("* ORDER BY time").unwrap();
    let order = stmt.order_by.expect("order by");
    assert_eq!(order.fields, vec!["time".to_string()]);
    assert_eq!(order.direction, Direction::Ascending);
}

#[test]
fn test_order_by_desc() {
    let stmt = parse("* ORDER BY a, b DESC").unwrap();
    let order = stmt.order_by.expect("order by");
    assert_eq!(order.fields, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(order.direction, Direction::Descending);
}

#[test]
fn test_order_by_asc_explicit() {
    let stmt = parse("* ORDER BY a ASC").unwrap();
    assert_eq!(stmt.order_by.unwrap().direction, Direction::Ascending);
}

#[test]
fn test_limit_single() {
    let stmt = parse("* LIMIT 5").unwrap();
    let limit = stmt.limit.expect("limit");
    assert_eq!(limit.offset, 0);
    assert_eq!(limit.count, 5);
}

#[test]
fn test_limit_offset_count() {
    let stmt = parse("* LIMIT 10, 5").unwrap();
    let limit = stmt.limit.expect("limit");
    assert_eq!(limit.offset, 10);
    assert_eq!(limit.count, 5);
}

#[test]
fn test_limit_requires_integer() {
    assert!(parse("* LIMIT ten").is_err());
    assert!(parse("* LIMIT 'ten'").is_err());
    assert!(parse("* LIMIT").is_err());
}

// ============================================================================
// Structural failures
// ============================================================================

#[test]
fn test_select_from_is_error() {
    match parse("SELECT FROM") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.token, Some(Token::From)),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_empty_input_is_error() {
    match parse("") {
        Err(ParseError::Syntax(e)) => {
            assert_eq!(e.token, None);
            assert_eq!(e.position, 0);
        }
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_trailing_comma_is_error() {
    assert!(matches!(parse("a, b,"), Err(ParseError::Syntax(_))));
}

#[test]
fn test_trailing_garbage_is_error() {
    match parse("* LIMIT 5 )") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.token, Some(Token::RParen)),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_clause_order_is_fixed() {
    // LIMIT before WHERE leaves the WHERE clause unconsumed
    assert!(parse("* LIMIT 5 WHERE a = 1").is_err());
}

#[test]
fn test_lex_error_propagates_unmodified() {
    match parse("ip WHERE host = @web") {
        Err(ParseError::Lex(LexError::UnexpectedChar { ch, .. })) => assert_eq!(ch, '@'),
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_error_position_points_at_offending_token() {
    match parse("SELECT ip FROM 42") {
        Err(ParseError::Syntax(e)) => assert_eq!(e.position, 15),
        other => panic!("Expected syntax error, got {:?}", other),
    }
}
