use crate::{
    ast::{AggFunc, BinOp, CompareOp, Condition, ConditionOp, Expr, Operand, Token},
    error::SyntaxError,
    lexer::Lexer,
    value::Value,
};
use std::mem;

/// Token-level grammar for search conditions and `eval` expressions.
///
/// Command keywords and argument lists are handled by [`crate::query`]; this
/// parser only sees the part of a stage that needs real tokenization.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Starts on the raw field name of a search condition instead of an
    /// expression token.
    pub fn for_conditions(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_field_token(&[])?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Moves on to the next raw condition field. Only valid while the
    /// current token is the last one consumed from the lexer.
    fn advance_field(&mut self, delimiters: &[char]) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_field_token(delimiters)?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(SyntaxError::unexpected(
                format!("{:?}", expected),
                &self.current_token,
            ));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn compare_op(&self) -> Option<CompareOp> {
        match &self.current_token {
            Token::Eq | Token::EqEq => Some(CompareOp::Equal),
            Token::NotEq => Some(CompareOp::NotEqual),
            Token::Lt => Some(CompareOp::LessThan),
            Token::Gt => Some(CompareOp::GreaterThan),
            Token::LtEq => Some(CompareOp::LessEqual),
            Token::GtEq => Some(CompareOp::GreaterEqual),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Parse primary expressions: literals, field references, calls and
    /// parenthesized expressions
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Integer(n)))
            }
            Token::Float(n) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Float(n)))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Expr::Literal(Value::String(s)))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Expr::Literal(Value::Boolean(b)))
            }
            Token::Null => {
                self.advance()?;
                Ok(Expr::Literal(Value::Null))
            }
            Token::Identifier(name) => {
                self.advance()?;
                if !self.check(&Token::LParen) {
                    Ok(Expr::FieldRef(name))
                } else if name.eq_ignore_ascii_case("if") {
                    self.advance_field(IF_DELIMITERS)?;
                    self.parse_if()
                } else {
                    self.advance()?;
                    self.parse_call(name)
                }
            }
            Token::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            token => Err(SyntaxError::unexpected("an expression", token)),
        }
    }

    /// `if(condition, then, else)` after the opening parenthesis. The
    /// condition follows the search grammar, so `city=NYC` and `email=*`
    /// mean what they mean in a `where`.
    fn parse_if(&mut self) -> Result<Expr, SyntaxError> {
        let condition = self.parse_condition(IF_DELIMITERS)?;
        self.advance()?;
        self.expect(Token::Comma)?;
        let then_branch = self.parse_expression()?;
        self.expect(Token::Comma)?;
        let else_branch = self.parse_expression()?;
        if !self.check(&Token::RParen) {
            return Err(SyntaxError::Arity("if".into(), 3));
        }
        self.advance()?;

        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// Parse the arguments of `name(`. The opening parenthesis is consumed.
    fn parse_call(&mut self, name: String) -> Result<Expr, SyntaxError> {
        // avg(score) names the field a previous stats stage produced
        let function = AggFunc::from_name(&name).ok_or(SyntaxError::UnknownFunction(name))?;
        let field = self.parse_call_field()?;
        Ok(Expr::FieldRef(output_name(function, field.as_deref())))
    }

    /// Optional single identifier followed by `)`.
    fn parse_call_field(&mut self) -> Result<Option<String>, SyntaxError> {
        let field = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(field) => {
                self.advance()?;
                Some(field)
            }
            token => {
                self.current_token = token;
                None
            }
        };
        self.expect(Token::RParen)?;
        Ok(field)
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        match self.current_token {
            // Represent as 0 - operand
            Token::Minus => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::binary(
                    BinOp::Subtract,
                    Expr::Literal(Value::Integer(0)),
                    operand,
                ))
            }
            Token::Plus => {
                self.advance()?;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match &self.current_token {
                Token::Star => BinOp::Multiply,
                Token::Slash => BinOp::Divide,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match &self.current_token {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Subtract,
                Token::Dot => BinOp::Concat,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_additive()
    }

    /// A complete expression with nothing after it.
    pub fn parse(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression()?;
        self.expect(Token::Eof)?;
        Ok(expr)
    }

    /// `target = expression`, the argument of `eval`.
    pub fn parse_assignment(&mut self) -> Result<(String, Expr), SyntaxError> {
        let target = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) | Token::String(name) => name,
            token => return Err(SyntaxError::unexpected("a target field name", token)),
        };
        self.advance()?;
        self.expect(Token::Eq)?;
        let expr = self.parse()?;
        Ok((target, expr))
    }

    // ------------------------------------------------------------------
    // Search conditions
    // ------------------------------------------------------------------

    /// Whitespace-separated conditions, all of which must hold.
    ///
    /// A lone `*` matches everything and contributes no condition; an
    /// uppercase `AND` between conditions is accepted and ignored.
    pub fn parse_conditions(&mut self) -> Result<Vec<Condition>, SyntaxError> {
        let mut conditions = vec![];

        loop {
            match &self.current_token {
                Token::Eof => break,
                Token::Star => {}
                Token::Identifier(word) if word == "AND" => {}
                _ => conditions.push(self.parse_condition(&[])?),
            }
            self.advance_field(&[])?;
        }
        Ok(conditions)
    }

    /// One `field<op>value` starting on a raw field token. Leaves the value
    /// as the current token; the caller moves past it.
    fn parse_condition(&mut self, delimiters: &[char]) -> Result<Condition, SyntaxError> {
        let field = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(name) => name,
            Token::Identifier(raw) => canonical_field(raw),
            token => return Err(SyntaxError::unexpected("a condition", token)),
        };
        self.advance()?;

        let op = self.compare_op().ok_or_else(|| {
            SyntaxError::unexpected(
                format!("a comparison operator after '{}'", field),
                &self.current_token,
            )
        })?;
        self.current_token = self.lexer.next_value_token(delimiters)?;

        let (op, value) = match &self.current_token {
            Token::Star => match op {
                CompareOp::Equal => (ConditionOp::Exists, Operand::Wildcard),
                CompareOp::NotEqual => (ConditionOp::NotExists, Operand::Wildcard),
                other => {
                    return Err(SyntaxError::unexpected(
                        format!("a value after '{}'", other.symbol()),
                        Token::Star,
                    ));
                }
            },
            Token::String(s) => (ConditionOp::Compare(op), Operand::Quoted(s.clone())),
            Token::Integer(n) => (ConditionOp::Compare(op), Operand::Number(Value::Integer(*n))),
            Token::Float(n) => (ConditionOp::Compare(op), Operand::Number(Value::Float(*n))),
            Token::Word(w) => (ConditionOp::Compare(op), Operand::Word(w.clone())),
            token => {
                return Err(SyntaxError::unexpected(
                    format!("a value for '{}'", field),
                    token,
                ));
            }
        };

        Ok(Condition { field, op, value })
    }
}

/// Where an `if()` condition value ends.
const IF_DELIMITERS: &[char] = &[',', ')'];

fn output_name(function: AggFunc, field: Option<&str>) -> String {
    match field {
        Some(field) => format!("{}({})", function.name(), field),
        None => function.name().to_string(),
    }
}

/// `avg( score )` and `mean(score)` both name the `avg(score)` column.
/// Anything else is taken as written.
fn canonical_field(raw: String) -> String {
    let call = raw
        .strip_suffix(')')
        .and_then(|rest| rest.split_once('('))
        .and_then(|(name, field)| Some((AggFunc::from_name(name.trim())?, field.trim())));

    match call {
        Some((function, "")) => output_name(function, None),
        Some((function, field)) => output_name(function, Some(field)),
        None => raw,
    }
}
