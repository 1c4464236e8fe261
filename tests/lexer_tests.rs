// tests/lexer_tests.rs

use spl_lang::ast::Token;
use spl_lang::error::LexError;
use spl_lang::lexer::Lexer;

fn tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut out = vec![];
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            return out;
        }
        out.push(token);
    }
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", Token::Plus),
        ("-", Token::Minus),
        ("*", Token::Star),
        ("/", Token::Slash),
        (".", Token::Dot),
        (",", Token::Comma),
        ("(", Token::LParen),
        (")", Token::RParen),
        ("=", Token::Eq),
        ("<", Token::Lt),
        (">", Token::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_lone_bang_is_rejected() {
    let mut lexer = Lexer::new("!x");
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnexpectedChar { ch: '!', position: 0 })
    );
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(tokens("42"), vec![Token::Integer(42)]);
    assert_eq!(tokens("3.25"), vec![Token::Float(3.25)]);
    // a trailing dot is concatenation, not part of the number
    assert_eq!(tokens("1 . 2"), vec![Token::Integer(1), Token::Dot, Token::Integer(2)]);
}

#[test]
fn test_strings() {
    assert_eq!(tokens(r#""hello world""#), vec![Token::String("hello world".into())]);
    assert_eq!(tokens("'single'"), vec![Token::String("single".into())]);
    assert_eq!(tokens(r#""say \"hi\"""#), vec![Token::String(r#"say "hi""#.into())]);
    assert_eq!(tokens(r#""a\nb""#), vec![Token::String("a\nb".into())]);
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new(r#"name="Alice"#);
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(
        lexer.next_token(),
        Err(LexError::UnterminatedString { position: 5 })
    );
}

#[test]
fn test_identifiers() {
    assert_eq!(
        tokens("user_name request.path _x"),
        vec![
            Token::Identifier("user_name".into()),
            Token::Identifier("request.path".into()),
            Token::Identifier("_x".into()),
        ]
    );
}

#[test]
fn test_concatenation_between_identifiers() {
    assert_eq!(
        tokens("first . last"),
        vec![
            Token::Identifier("first".into()),
            Token::Dot,
            Token::Identifier("last".into()),
        ]
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_eval_expression() {
    assert_eq!(
        tokens("total = price * (qty + 1)"),
        vec![
            Token::Identifier("total".into()),
            Token::Eq,
            Token::Identifier("price".into()),
            Token::Star,
            Token::LParen,
            Token::Identifier("qty".into()),
            Token::Plus,
            Token::Integer(1),
            Token::RParen,
        ]
    );
}

#[test]
fn test_if_call() {
    assert_eq!(
        tokens(r#"if(score>=80, "pass", "fail")"#),
        vec![
            Token::Identifier("if".into()),
            Token::LParen,
            Token::Identifier("score".into()),
            Token::GtEq,
            Token::Integer(80),
            Token::Comma,
            Token::String("pass".into()),
            Token::Comma,
            Token::String("fail".into()),
            Token::RParen,
        ]
    );
}

// ============================================================================
// Condition Values
// ============================================================================

#[test]
fn test_raw_condition_values() {
    let test_cases = vec![
        ("/api/users", Token::Word("/api/users".into())),
        ("-5", Token::Integer(-5)),
        ("2.5", Token::Float(2.5)),
        ("*", Token::Star),
        ("NYC", Token::Word("NYC".into())),
        ("10.0.0.1", Token::Word("10.0.0.1".into())),
        ("'quoted value'", Token::String("quoted value".into())),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_value_token(&[]).unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_value_stops_at_whitespace() {
    let mut lexer = Lexer::new("status=500 host=web01");
    assert_eq!(lexer.next_field_token(&[]).unwrap(), Token::Identifier("status".into()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_value_token(&[]).unwrap(), Token::Integer(500));
    assert_eq!(lexer.next_field_token(&[]).unwrap(), Token::Identifier("host".into()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_value_token(&[]).unwrap(), Token::Word("web01".into()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_raw_condition_fields() {
    let test_cases = vec![
        ("http-status=200", Token::Identifier("http-status".into())),
        ("avg(score)>80", Token::Identifier("avg(score)".into())),
        ("avg( score ) > 80", Token::Identifier("avg( score )".into())),
        ("phone!=*", Token::Identifier("phone".into())),
        ("'odd name'=1", Token::String("odd name".into())),
        ("* x=1", Token::Star),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_field_token(&[]).unwrap(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_delimited_condition() {
    let mut lexer = Lexer::new("city=NYC,1,0)");
    assert_eq!(lexer.next_field_token(&[',', ')']).unwrap(), Token::Identifier("city".into()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_value_token(&[',', ')']).unwrap(), Token::Word("NYC".into()));
    assert_eq!(lexer.next_token().unwrap(), Token::Comma);
}
