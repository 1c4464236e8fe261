use crate::{ast::Token, error::LexError};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            let dotted = ch == '.'
                && !result.is_empty()
                && self
                    .peek_char(1)
                    .is_some_and(|c| c.is_alphanumeric() || c == '_');
            if ch.is_alphanumeric() || ch == '_' || dotted {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        // unknown escapes are kept verbatim
                        Some(ch) if ch != '"' && ch != '\'' && ch != '\\' => {
                            result.push('\\');
                            result.push(ch);
                        }
                        Some(ch) => result.push(ch),
                        None => return Err(LexError::UnterminatedString { position: start }),
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let invalid = || LexError::InvalidNumber {
            text: number.clone(),
        };
        if is_float {
            number.parse::<f64>().map(Token::Float).map_err(|_| invalid())
        } else {
            number.parse::<i64>().map(Token::Integer).map_err(|_| invalid())
        }
    }

    fn single(&mut self, token: Token) -> Result<Token, LexError> {
        self.advance();
        Ok(token)
    }

    fn pair(&mut self, second: char, matched: Token, alone: Token) -> Result<Token, LexError> {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            Ok(matched)
        } else {
            self.advance();
            Ok(alone)
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('+') => self.single(Token::Plus),
            Some('-') => self.single(Token::Minus),
            Some('*') => self.single(Token::Star),
            Some('/') => self.single(Token::Slash),
            Some('.') => self.single(Token::Dot),
            Some(',') => self.single(Token::Comma),
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('=') => self.pair('=', Token::EqEq, Token::Eq),
            Some('>') => self.pair('=', Token::GtEq, Token::Gt),
            Some('<') => self.pair('=', Token::LtEq, Token::Lt),
            Some('!') if self.peek_char(1) == Some('=') => {
                self.advance();
                self.advance();
                Ok(Token::NotEq)
            }
            Some('"') => self.read_string('"').map(Token::String),
            Some('\'') => self.read_string('\'').map(Token::String),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                Ok(match ident.as_str() {
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    "null" => Token::Null,
                    _ => Token::Identifier(ident),
                })
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) => Err(LexError::UnexpectedChar {
                ch,
                position: self.position,
            }),
        }
    }

    /// Raw text up to whitespace or one of `delimiters`, both only outside
    /// parentheses. With `stop_at_operator`, comparison operators also end it.
    fn read_raw(&mut self, delimiters: &[char], stop_at_operator: bool) -> String {
        let mut raw = String::new();
        let mut depth = 0usize;

        while let Some(ch) = self.current_char() {
            let operator = stop_at_operator
                && (matches!(ch, '=' | '<' | '>')
                    || (ch == '!' && self.peek_char(1) == Some('=')));
            if operator || (depth == 0 && (ch.is_whitespace() || delimiters.contains(&ch))) {
                break;
            }
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
            raw.push(ch);
            self.advance();
        }
        raw
    }

    /// Reads the left-hand side of a search condition.
    ///
    /// Quoted names lex as [`Token::String`]; otherwise everything up to the
    /// comparison operator or whitespace is one [`Token::Identifier`], so
    /// names like `http-status` and `avg(score)` need no quoting. A lone `*`
    /// is [`Token::Star`].
    pub fn next_field_token(&mut self, delimiters: &[char]) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some(q @ ('"' | '\'')) => self.read_string(q).map(Token::String),
            Some(_) => {
                let raw = self.read_raw(delimiters, true);
                Ok(match raw.as_str() {
                    "" => return self.next_token(),
                    "*" => Token::Star,
                    _ => Token::Identifier(raw),
                })
            }
        }
    }

    /// Reads the right-hand side of a search condition.
    ///
    /// Quoted values lex as [`Token::String`]; otherwise everything up to the
    /// next whitespace (or delimiter) is taken as-is and classified as a
    /// number, the `*` wildcard, or a [`Token::Word`].
    pub fn next_value_token(&mut self, delimiters: &[char]) -> Result<Token, LexError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some(q @ ('"' | '\'')) => self.read_string(q).map(Token::String),
            Some(_) => {
                let raw = self.read_raw(delimiters, false);

                Ok(if raw.is_empty() {
                    return self.next_token();
                } else if raw == "*" {
                    Token::Star
                } else if let Ok(n) = raw.parse::<i64>() {
                    Token::Integer(n)
                } else if let Some(n) = raw.parse::<f64>().ok().filter(|n| n.is_finite()) {
                    Token::Float(n)
                } else {
                    Token::Word(raw)
                })
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("true false null");
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(false));
    assert_eq!(lexer.next_token().unwrap(), Token::Null);
}

#[test]
fn test_condition() {
    let mut lexer = Lexer::new("age>=30 city = \"NYC\"");
    assert_eq!(lexer.next_field_token(&[]).unwrap(), Token::Identifier("age".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::GtEq);
    assert_eq!(lexer.next_value_token(&[]).unwrap(), Token::Integer(30));
    assert_eq!(lexer.next_field_token(&[]).unwrap(), Token::Identifier("city".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eq);
    assert_eq!(lexer.next_value_token(&[]).unwrap(), Token::String("NYC".to_string()));
    assert_eq!(lexer.next_field_token(&[]).unwrap(), Token::Eof);
}
