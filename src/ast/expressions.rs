use crate::{
    ast::{BinOp, Condition},
    value::Value,
};

/// Expression evaluated once per record by `eval`.
///
/// The grammar is deliberately small: literals, field references, the four
/// arithmetic operators plus `.` concatenation, and `if(condition, then, else)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal number, string, boolean or null
    ///
    /// # Example
    /// ```text
    /// 42
    /// "slow"
    /// ```
    Literal(Value),

    /// Field of the current record; missing fields evaluate to null
    ///
    /// # Example
    /// ```text
    /// price
    /// avg(score)
    /// ```
    FieldRef(String),

    /// Binary arithmetic
    ///
    /// # Example
    /// ```text
    /// price * quantity
    /// ```
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `if(condition, then, else)`; the condition is a search condition
    ///
    /// # Example
    /// ```text
    /// if(city=NYC, "east", "west")
    /// if(email=*, 1, 0)
    /// ```
    Conditional {
        condition: Box<Condition>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(v: impl Into<Value>) -> Self {
        Expr::Literal(v.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Expr::FieldRef(name.into())
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}
