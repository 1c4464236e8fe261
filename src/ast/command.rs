use crate::{
    ast::{CompareOp, Expr},
    value::Value,
};

/// A typed pipeline command. One per stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Keep records for which every condition holds
    ///
    /// # Example
    /// ```text
    /// city="NYC" age>30
    /// where score > threshold
    /// ```
    Search(Vec<Condition>),

    /// Replace the records with one row per group
    ///
    /// # Example
    /// ```text
    /// stats count avg(age) as average by city
    /// ```
    Stats {
        aggregations: Vec<AggSpec>,
        group_by: Vec<String>,
    },

    /// Add group aggregates to every record, keeping all records
    ///
    /// # Example
    /// ```text
    /// eventstats avg(score) as city_avg by city
    /// ```
    EventStats {
        aggregations: Vec<AggSpec>,
        group_by: Vec<String>,
    },

    /// Keep (`Include`) or drop (`Exclude`) the listed fields
    ///
    /// # Example
    /// ```text
    /// fields name, age
    /// fields - score
    /// ```
    Fields { mode: FieldsMode, fields: Vec<String> },

    /// Rename fields, applied pair by pair
    ///
    /// # Example
    /// ```text
    /// rename name as full_name, city as location
    /// ```
    Rename(Vec<(String, String)>),

    /// Compute `target` for every record
    ///
    /// # Example
    /// ```text
    /// eval total = price * quantity
    /// ```
    Eval { target: String, expr: Expr },

    /// Stable multi-key sort
    ///
    /// # Example
    /// ```text
    /// sort city, -age
    /// ```
    Sort(Vec<SortKey>),

    /// First `n` records
    Head(usize),

    /// Last `n` records, or every record when no count is given
    Tail(Option<usize>),
}

impl Command {
    /// Keyword naming this command, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Search(_) => "search",
            Command::Stats { .. } => "stats",
            Command::EventStats { .. } => "eventstats",
            Command::Fields { .. } => "fields",
            Command::Rename(_) => "rename",
            Command::Eval { .. } => "eval",
            Command::Sort(_) => "sort",
            Command::Head(_) => "head",
            Command::Tail(_) => "tail",
        }
    }
}

/// A single `field<op>value` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: ConditionOp,
    pub value: Operand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOp {
    Compare(CompareOp),
    /// `field=*`
    Exists,
    /// `field!=*`
    NotExists,
}

/// Right-hand side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Quoted literal, always compared as a string
    Quoted(String),
    /// Bare number, compared numerically when the field is numeric
    Number(Value),
    /// Bare word: another field when the record has one by that name,
    /// otherwise a literal string
    Word(String),
    /// `*`
    Wildcard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsMode {
    Include,
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: Direction,
}

/// Aggregation functions available to `stats` and `eventstats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    /// Population standard deviation
    Stdev,
    /// Population standard deviation
    StdevP,
    /// Sample standard deviation
    StdevS,
    Values,
    List,
    Dc,
}

impl AggFunc {
    /// Looks up a function by name, case-insensitively. `mean` and
    /// `distinct_count` are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.to_ascii_lowercase().as_str() {
            "count" => AggFunc::Count,
            "sum" => AggFunc::Sum,
            "avg" | "mean" => AggFunc::Avg,
            "min" => AggFunc::Min,
            "max" => AggFunc::Max,
            "stdev" => AggFunc::Stdev,
            "stdevp" => AggFunc::StdevP,
            "stdevs" => AggFunc::StdevS,
            "values" => AggFunc::Values,
            "list" => AggFunc::List,
            "dc" | "distinct_count" => AggFunc::Dc,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            AggFunc::Count => "count",
            AggFunc::Sum => "sum",
            AggFunc::Avg => "avg",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Stdev => "stdev",
            AggFunc::StdevP => "stdevp",
            AggFunc::StdevS => "stdevs",
            AggFunc::Values => "values",
            AggFunc::List => "list",
            AggFunc::Dc => "dc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggSpec {
    pub function: AggFunc,
    pub field: Option<String>,
    pub alias: Option<String>,
}

impl AggSpec {
    /// Name of the output field: the alias, else `func(field)`, else `func`.
    pub fn output_name(&self) -> String {
        match (&self.alias, &self.field) {
            (Some(alias), _) => alias.clone(),
            (None, Some(field)) => format!("{}({})", self.function.name(), field),
            (None, None) => self.function.name().to_string(),
        }
    }
}
