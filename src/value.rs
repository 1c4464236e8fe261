use std::cmp::Ordering;

/// A field value stored in a [`crate::Record`].
///
/// Records hold scalars. `Array` only appears as the result of the `values`
/// and `list` aggregations (or when the input already carries a list).
///
/// # Type Preservation
///
/// Integers and floats are kept apart:
/// - Arithmetic keeps integer results as integers when they are whole
/// - Strings that look like numbers are coerced when a numeric comparison or
///   arithmetic operation needs them
///
/// # Examples
///
/// ```
/// use spl_lang::Value;
///
/// let score = Value::Integer(85);
/// let text = Value::String("85".to_string());
///
/// assert_eq!(score.as_number(), text.as_number());
/// assert_eq!(Value::Null.as_number(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or JSON null
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// UTF-8 string
    String(String),

    /// Ordered list of values
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value.
    ///
    /// Integers and floats convert directly; strings are parsed after
    /// trimming. Non-finite parses (`"nan"`, `"inf"`) are not numbers.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Like [`Value::as_number`], but keeps integer-ness.
    pub fn as_numeric(&self) -> Option<Value> {
        match self {
            Value::Integer(_) | Value::Float(_) => Some(self.clone()),
            Value::String(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<i64>() {
                    Some(Value::Integer(n))
                } else {
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .map(Value::Float)
                }
            }
            _ => None,
        }
    }

    /// String form used for string comparison and concatenation.
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(items) => items
                .iter()
                .map(Value::as_string)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Pairwise comparison: numeric when both sides are numeric or
    /// numeric-coercible, string comparison otherwise.
    ///
    /// Integers compare exactly, so ids above 2^53 stay distinct.
    pub fn compare(&self, other: &Value) -> Ordering {
        numeric_cmp(self, other).unwrap_or_else(|| self.as_string().cmp(&other.as_string()))
    }

    /// Total order for sorting and for ordering `values` output.
    ///
    /// Numeric values come first (by value), then everything else by its
    /// string form, then null. Unlike [`Value::compare`] this is transitive
    /// across mixed numeric and non-numeric values.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 2,
                v if v.as_number().is_some() => 0,
                _ => 1,
            }
        }

        match (rank(self), rank(other)) {
            (0, 0) => numeric_cmp(self, other).unwrap_or(Ordering::Equal),
            (1, 1) => self.as_string().cmp(&other.as_string()),
            (a, b) => a.cmp(&b),
        }
    }

    /// Hashable identity used for grouping and distinct counting.
    ///
    /// `85` and `85.0` share a key; the string `"85"` does not.
    pub fn distinct_key(&self) -> DistinctKey {
        match self {
            Value::Null => DistinctKey::Null,
            Value::Boolean(b) => DistinctKey::Boolean(*b),
            Value::Integer(n) => DistinctKey::Integer(*n),
            Value::Float(n) => match whole_integer(*n) {
                Some(i) => DistinctKey::Integer(i),
                None => DistinctKey::Float(n.to_bits()),
            },
            Value::String(s) => DistinctKey::Text(s.clone()),
            Value::Array(items) => {
                DistinctKey::List(items.iter().map(Value::distinct_key).collect())
            }
        }
    }
}

/// `f` as an `i64` when it is whole and in range. Covers `-0.0`.
fn whole_integer(f: f64) -> Option<i64> {
    // i64::MIN as f64 is exact; i64::MAX as f64 rounds up to 2^63
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then_some(f as i64)
}

fn numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    Some(match (a.as_numeric()?, b.as_numeric()?) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(&y),
        (Value::Integer(i), Value::Float(f)) => integer_float_cmp(i, f),
        (Value::Float(f), Value::Integer(i)) => integer_float_cmp(i, f).reverse(),
        (Value::Float(x), Value::Float(y)) => x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y)),
        _ => return None,
    })
}

/// Exact comparison of an integer with a finite float.
fn integer_float_cmp(i: i64, f: f64) -> Ordering {
    let floor = f.floor();
    match whole_integer(floor) {
        Some(n) => match i.cmp(&n) {
            Ordering::Equal if f > floor => Ordering::Less,
            other => other,
        },
        None if floor > 0.0 => Ordering::Less,
        None => Ordering::Greater,
    }
}

/// Grouping and distinct-count identity of a [`Value`].
///
/// Produced by [`Value::distinct_key`]. Two values share a key exactly when
/// they belong to the same group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DistinctKey {
    Null,
    Boolean(bool),
    /// Integers, and floats with a whole value in `i64` range
    Integer(i64),
    /// Bit pattern of any other float
    Float(u64),
    Text(String),
    /// Element-wise keys of an array
    List(Vec<DistinctKey>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_compare_numerically() {
        let a = Value::String("9".into());
        let b = Value::Integer(10);
        assert_eq!(a.compare(&b), Ordering::Less);
        // as strings "9" > "10"
        assert_eq!(a.as_string().cmp(&b.as_string()), Ordering::Greater);
    }

    #[test]
    fn mixed_values_fall_back_to_strings() {
        let a = Value::String("apple".into());
        let b = Value::Integer(3);
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_ne!(a.compare(&b), Ordering::Equal);
    }

    #[test]
    fn sort_order_puts_numbers_then_strings_then_null() {
        let mut values = vec![
            Value::Null,
            Value::String("b".into()),
            Value::Integer(10),
            Value::String("a".into()),
            Value::Float(2.5),
        ];
        values.sort_by(Value::sort_cmp);
        assert_eq!(
            values,
            vec![
                Value::Float(2.5),
                Value::Integer(10),
                Value::String("a".into()),
                Value::String("b".into()),
                Value::Null,
            ]
        );
    }

    #[test]
    fn distinct_key_merges_integer_and_float() {
        assert_eq!(
            Value::Integer(85).distinct_key(),
            Value::Float(85.0).distinct_key()
        );
        assert_ne!(
            Value::Integer(85).distinct_key(),
            Value::String("85".into()).distinct_key()
        );
    }

    #[test]
    fn large_integers_stay_distinct() {
        let a = Value::Integer(9_007_199_254_740_992);
        let b = Value::Integer(9_007_199_254_740_993);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_ne!(a.distinct_key(), b.distinct_key());
        assert_eq!(Value::String("9007199254740993".into()).compare(&b), Ordering::Equal);
        assert_eq!(b.sort_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn integers_and_floats_compare_exactly() {
        assert_eq!(Value::Integer(3).compare(&Value::Float(3.5)), Ordering::Less);
        assert_eq!(Value::Float(-2.5).compare(&Value::Integer(-3)), Ordering::Greater);
        assert_eq!(Value::Integer(i64::MAX).compare(&Value::Float(1e19)), Ordering::Less);
        assert_eq!(Value::Float(-0.0).distinct_key(), Value::Integer(0).distinct_key());
        assert_ne!(Value::Float(0.5).distinct_key(), Value::Integer(0).distinct_key());
    }

    #[test]
    fn non_finite_strings_are_not_numbers() {
        assert_eq!(Value::String("nan".into()).as_number(), None);
        assert_eq!(Value::String("inf".into()).as_number(), None);
        assert_eq!(Value::String(" 4.5 ".into()).as_number(), Some(4.5));
    }
}
