//! Expression interpreter for `eval` and `if()`.
//!
//! Evaluation never fails: a missing field is null, and an operation that
//! has no meaningful result for its operands (division by zero, arithmetic
//! on non-numeric strings) produces null.

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use tracing::trace;

use crate::{
    ast::{BinOp, Expr},
    filter::condition_holds,
    record::Record,
    value::Value,
};

/// Evaluates `expr` against one record.
///
/// # Examples
///
/// ```
/// use spl_lang::{Lexer, Parser, Record, Value, evaluator};
///
/// let record: Record = [("price", Value::Integer(20)), ("quantity", Value::Integer(3))]
///     .into_iter()
///     .collect();
///
/// let mut parser = Parser::new(Lexer::new("price * quantity + 1")).unwrap();
/// let expr = parser.parse().unwrap();
///
/// assert_eq!(evaluator::eval_expr(&expr, &record), Value::Integer(61));
/// ```
pub fn eval_expr(expr: &Expr, record: &Record) -> Value {
    match expr {
        Expr::Literal(v) => v.clone(),
        Expr::FieldRef(name) => record.get(name).cloned().unwrap_or(Value::Null),
        Expr::BinaryOp { op, left, right } => {
            let left = eval_expr(left, record);
            let right = eval_expr(right, record);
            apply_binop(*op, &left, &right)
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            if condition_holds(record, condition) {
                eval_expr(then_branch, record)
            } else {
                eval_expr(else_branch, record)
            }
        }
    }
}

pub fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Value {
    if left.is_null() || right.is_null() {
        trace!(op = op.symbol(), "null operand");
        return Value::Null;
    }

    if op == BinOp::Concat {
        return Value::String(format!("{}{}", left.as_string(), right.as_string()));
    }

    match (left.as_numeric(), right.as_numeric()) {
        (Some(a), Some(b)) => numeric_op(op, &a, &b),
        _ => match (op, left, right) {
            (BinOp::Add, Value::String(a), Value::String(b)) => {
                Value::String(format!("{}{}", a, b))
            }
            (op, a, b) => {
                trace!(op = op.symbol(), left = ?a, right = ?b, "non-numeric operands");
                Value::Null
            }
        },
    }
}

fn numeric_op(op: BinOp, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => integer_op(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => float_op(op, *a, *b),
        (a, b) => {
            let (Some(x), Some(y)) = (a.as_number(), b.as_number()) else {
                return Value::Null;
            };
            if let Some(xd) = Decimal::from_f64(x)
                && let Some(yd) = Decimal::from_f64(y)
                && let Some(rd) = decimal_op(op, xd, yd)
            {
                if rd.is_integer()
                    && let Some(r) = rd.to_i64()
                {
                    return Value::Integer(r);
                } else if let Some(r) = rd.to_f64() {
                    return Value::Float(r);
                }
            }
            float_op(op, x, y)
        }
    }
}

fn integer_op(op: BinOp, a: i64, b: i64) -> Value {
    let exact = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Subtract => a.checked_sub(b),
        BinOp::Multiply => a.checked_mul(b),
        BinOp::Divide => {
            if b == 0 {
                trace!("division by zero");
                return Value::Null;
            }
            // exact division stays integer
            match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                _ => None,
            }
        }
        BinOp::Concat => return Value::String(format!("{}{}", a, b)),
    };
    match exact {
        Some(n) => Value::Integer(n),
        None => float_op(op, a as f64, b as f64),
    }
}

fn float_op(op: BinOp, a: f64, b: f64) -> Value {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide => {
            if b == 0.0 {
                trace!("division by zero");
                return Value::Null;
            }
            a / b
        }
        BinOp::Concat => return Value::String(format!("{}{}", a, b)),
    };
    if result.is_finite() {
        Value::Float(result)
    } else {
        Value::Null
    }
}

fn decimal_op(op: BinOp, a: Decimal, b: Decimal) -> Option<Decimal> {
    match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Subtract => a.checked_sub(b),
        BinOp::Multiply => a.checked_mul(b),
        BinOp::Divide => a.checked_div(b),
        BinOp::Concat => None,
    }
}
