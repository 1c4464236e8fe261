#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 200
    /// ```
    Integer(i64),

    /// Floating-point number
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Float(f64),

    /// String literal enclosed in double or single quotes
    ///
    /// # Examples
    /// ```text
    /// "NYC"
    /// 'slow'
    /// ```
    String(String),

    /// Boolean values
    Boolean(bool),

    /// Null value
    Null,

    /// Field name or function name
    ///
    /// Starts with a letter or underscore, followed by letters, digits,
    /// underscores, or dots between name characters.
    ///
    /// # Examples
    /// ```text
    /// score
    /// response_time
    /// user.name
    /// ```
    Identifier(String),

    /// Unquoted condition value that is neither a number nor `*`.
    ///
    /// Only produced by [`crate::Lexer::next_value_token`]: whatever follows
    /// a comparison operator up to the next whitespace.
    ///
    /// # Examples
    /// ```text
    /// status=active        // Word("active")
    /// path=/api/users      // Word("/api/users")
    /// ```
    Word(String),

    // Comparison
    /// `=`
    Eq,

    /// `==`
    EqEq,

    /// `!=`
    NotEq,

    /// `<`
    Lt,

    /// `>`
    Gt,

    /// `<=`
    LtEq,

    /// `>=`
    GtEq,

    // Arithmetic
    /// Addition
    Plus,

    /// Subtraction or descending marker
    Minus,

    /// Multiplication, or the match-all / exists wildcard in conditions
    Star,

    /// Division
    Slash,

    /// String concatenation
    Dot,

    // Delimiters
    /// Left parenthesis for grouping or function calls
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma separating function arguments
    Comma,

    /// End of input
    Eof,
}
