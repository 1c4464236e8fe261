//! Documentation content for the spl CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Pipeline,
    Search,
    Stats,
    Functions,
    Eval,
    Fields,
    Sort,
}

impl DocTopic {
    pub const ALL: [DocTopic; 7] = [
        DocTopic::Pipeline,
        DocTopic::Search,
        DocTopic::Stats,
        DocTopic::Functions,
        DocTopic::Eval,
        DocTopic::Fields,
        DocTopic::Sort,
    ];

    /// Parse a topic name, accepting command keywords as aliases
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pipeline" | "pipes" | "syntax" => Some(Self::Pipeline),
            "search" | "where" => Some(Self::Search),
            "stats" | "eventstats" => Some(Self::Stats),
            "functions" | "aggregations" | "agg" => Some(Self::Functions),
            "eval" | "expressions" => Some(Self::Eval),
            "fields" | "table" | "rename" => Some(Self::Fields),
            "sort" | "head" | "tail" => Some(Self::Sort),
            _ => None,
        }
    }

    pub fn content(self) -> &'static str {
        match self {
            Self::Pipeline => PIPELINE_DOC,
            Self::Search => SEARCH_DOC,
            Self::Stats => STATS_DOC,
            Self::Functions => FUNCTIONS_DOC,
            Self::Eval => EVAL_DOC,
            Self::Fields => FIELDS_DOC,
            Self::Sort => SORT_DOC,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"SPL DOCUMENTATION

spl runs Splunk-style search pipelines over JSON records. A query is a
sequence of commands separated by |; each command consumes the records
produced by the one before it.

DOCUMENTATION TOPICS

  pipeline          Pipe syntax, stage order and error behaviour
  search            Filtering with conditions (implicit, search, where)
  stats             stats and eventstats: grouping and aggregate rows
  functions         Aggregation functions (count, sum, avg, ...)
  eval              Computed fields and the expression language
  fields            fields, table and rename
  sort              sort, head and tail

QUICK REFERENCE

  city="NYC" age>30                         Filter
  stats count avg(age) as average by city   Aggregate per group
  eventstats avg(score) as avg by city      Attach group aggregates
  eval total = price * quantity             Compute a field
  fields - score                            Drop a field
  rename name as full_name                  Rename a field
  sort city, -age                           Sort (- is descending)
  head 5 | tail 2                           Limit

Run 'spl doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    DocTopic::from_name(name)
        .map(DocTopic::content)
        .ok_or_else(|| CliError::UnknownTopic(name.to_string()))
}

const PIPELINE_DOC: &str = r#"PIPELINE - Stages and Pipes

STAGES
  <command> | <command> | ...

  The query is split on | characters that are not inside quotes or
  parentheses. Each stage starts with a command keyword; a stage that
  does not is an implicit search.

  Keywords (case-insensitive):
    search where stats eventstats fields table rename eval sort head tail

  Example:
    Query:  status="error" | stats count by host | sort -count | head 3

ERRORS
  The whole query is parsed before any stage runs. A malformed stage
  fails the query with a parse error naming that stage; no partial
  results are returned.

EMPTY QUERY
  A blank query returns the input records unchanged.
"#;

const SEARCH_DOC: &str = r#"SEARCH - Filtering Records

CONDITIONS
  field=value field!=value field>value field<value field>=value field<=value

  Conditions separated by whitespace must all hold. `==` is the same as
  `=`, and an AND between conditions is accepted.

  Examples:
    city="NYC" age>30
    search status=200 path=/api/users
    where score > threshold

VALUES
  "quoted"      Always compared as a string
  42, 4.5       Compared numerically when the field holds a number
  word          Another field's value if the record has that field,
                otherwise the literal string
  *             field=* means present; field!=* means absent or null

  A lone * matches every record.

MISSING FIELDS
  A record without the field (or with null) fails every comparison,
  including !=. Use field!=* to select such records.
"#;

const STATS_DOC: &str = r#"STATS - Aggregating Records

STATS
  stats <aggregation> [as <name>] ... [by <field>, ...]

  Replaces the records with one row per group. Each row holds the
  group-by fields followed by one field per aggregation. Without `by`
  there is exactly one row.

  Example:
    Input:  [{"city":"NYC","age":30},{"city":"NYC","age":40},{"city":"LA","age":20}]
    Query:  stats count as total avg(age) as average by city
    Output: [{"city":"NYC","total":2,"average":35.0},
             {"city":"LA","total":1,"average":20.0}]

  Commas and spaces between aggregations are interchangeable:
    stats count, sum(price), dc(category)

EVENTSTATS
  eventstats <aggregation> [as <name>] ... [by <field>, ...]

  Computes the same aggregates but adds them to every original record
  instead of producing summary rows. Record order and count are kept.

  Example:
    Query:  eventstats avg(score) as city_avg by city

GROUPS
  Groups appear in the order their key was first seen. A record missing
  a group-by field belongs to the group whose key is null.

FIELD NAMES
  Without an alias the output field is named func(field), or just the
  function name for count. Later stages can refer to it directly:
    stats avg(score) by city | where avg(score) > 80
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS - Aggregation Functions

  count             Number of records in the group
  count(f)          Number of records where f is present and not null
  sum(f)            Numeric sum; an integer when every value is one
  avg(f), mean(f)   Arithmetic mean; null when there are no numbers
  min(f), max(f)    Smallest / largest value, numbers before strings
  stdev(f)          Population standard deviation
  stdevp(f)         Population standard deviation
  stdevs(f)         Sample standard deviation; null with fewer than 2 values
  values(f)         Distinct values, sorted (numbers, then strings)
  list(f)           Every value, in record order
  dc(f)             Number of distinct values (alias: distinct_count)

  Field-scoped functions skip records where the field is missing or null.
  Non-numeric values are ignored by sum, avg and the stdev family.
"#;

const EVAL_DOC: &str = r#"EVAL - Computed Fields

SYNTAX
  eval <field> = <expression>

  Sets the field on every record, overwriting an existing value.

OPERATORS
  + - * /           Arithmetic, usual precedence, parentheses allowed
  .                 String concatenation
  -x                Negation

  Examples:
    eval total = price * quantity
    eval full = first . " " . last
    eval ratio = (hits + 1) / (total + 1)

CONDITIONALS
  if(<field> <op> <value>, <then>, <else>)

  The condition follows the search rules: = == != < > <= >=, quoted
  values compare as text, a bare word names another field when the record
  has one, and field=* / field!=* test presence.

  Example:
    eval grade = if(score >= 80, "pass", "fail")
    eval east = if(city=NYC, 1, 0)

LITERALS
  42  4.5  "text"  'text'  true  false  null

TYPES
  Integer arithmetic stays integer when the result is whole. Numeric
  strings are converted when arithmetic needs a number. + on two
  non-numeric strings concatenates them.

  A missing field, division by zero or arithmetic on a non-numeric value
  produces null; evaluation never fails at run time.
"#;

const FIELDS_DOC: &str = r#"FIELDS - Projection and Renaming

FIELDS
  fields <field>, ...       Keep only these fields, in this order
  fields - <field>, ...     Drop these fields, keep the rest in order
  table <field>, ...        Same as fields

  Example:
    Input:  {"name":"Alice","age":30,"score":85}
    Query:  fields - score
    Output: {"name":"Alice","age":30}

RENAME
  rename <old> as <new>, ...

  Pairs apply in order, so a later pair can rename a field an earlier
  pair created. A missing old field is ignored. Quote names with spaces:
    rename name as "full name"
"#;

const SORT_DOC: &str = r#"SORT - Ordering and Limits

SORT
  sort <field>, -<field>, +<field>

  Sorts by each field in turn; - sorts that field descending. The sort
  is stable. Numbers order numerically, other values as strings.
  Records without the field go last (first when descending).

  Example:
    Query:  sort city, -age

HEAD
  head [n]      The first n records (default 10)

TAIL
  tail [n]      The last n records in their original order
                (all records when n is omitted)
"#;
