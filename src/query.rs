//! Query text to [`Query`]: pipe splitting and the per-command grammars.
//!
//! Every stage is parsed before anything runs, so a query with one bad stage
//! fails as a whole.

use regex::Regex;
use std::sync::LazyLock;

use crate::{
    ast::{AggFunc, AggSpec, Command, Direction, FieldsMode, Query, SortKey, Stage},
    error::{Result, SplError},
    lexer::Lexer,
    parser::Parser,
};

type Pattern = LazyLock<std::result::Result<Regex, regex::Error>>;

static KEYWORD: Pattern = LazyLock::new(|| Regex::new(r"(?s)^([A-Za-z_]+)(?:\s+(.*))?$"));
static AGGREGATION: Pattern = LazyLock::new(|| Regex::new(r"^(\w+)(?:\(\s*([^()]*?)\s*\))?$"));
static RENAME_PAIR: Pattern =
    LazyLock::new(|| Regex::new(r#"(?i)^\s*("[^"]*"|'[^']*'|\S+)\s+as\s+("[^"]*"|'[^']*'|\S+)\s*$"#));

const DEFAULT_HEAD: usize = 10;

fn pattern(cell: &'static Pattern, stage: &str) -> Result<&'static Regex> {
    LazyLock::force(cell).as_ref().map_err(|e| SplError::parse(stage, e))
}

/// Splits `text` at every `sep` that is outside quotes and parentheses.
/// Pieces are returned untrimmed, empty ones included.
fn split_outside(text: &str, is_sep: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = vec![];
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && is_sep(c) => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Non-empty pieces separated by commas or whitespace.
fn words(text: &str) -> Vec<&str> {
    split_outside(text, |c| c == ',' || c.is_whitespace())
        .into_iter()
        .filter(|w| !w.is_empty())
        .collect()
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    for q in ['"', '\''] {
        if let Some(inner) = text.strip_prefix(q).and_then(|t| t.strip_suffix(q)) {
            return inner;
        }
    }
    text
}

/// Stage texts of `query`, trimmed, in pipe order.
///
/// `|` inside a quoted string or parentheses does not split.
pub fn split_stages(query: &str) -> Vec<&str> {
    split_outside(query, |c| c == '|')
        .into_iter()
        .map(str::trim)
        .collect()
}

/// Parses a complete query. A blank query has no stages.
pub fn parse_query(query: &str) -> Result<Query> {
    if query.trim().is_empty() {
        return Ok(Query::default());
    }

    let stages = split_stages(query)
        .into_iter()
        .map(|text| {
            Ok(Stage {
                text: text.to_string(),
                command: parse_stage(text)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Query { stages })
}

/// Parses one stage. A stage that does not start with a command keyword is
/// an implicit `search`.
pub fn parse_stage(stage: &str) -> Result<Command> {
    let stage = stage.trim();
    if stage.is_empty() {
        return Err(SplError::parse(stage, "empty stage"));
    }

    if let Some(caps) = pattern(&KEYWORD, stage)?.captures(stage) {
        let keyword = caps[1].to_ascii_lowercase();
        let args = caps.get(2).map_or("", |m| m.as_str().trim());

        match keyword.as_str() {
            "search" | "where" => return parse_search(stage, args),
            "stats" => {
                let (aggregations, group_by) = parse_aggregations(stage, args)?;
                return Ok(Command::Stats {
                    aggregations,
                    group_by,
                });
            }
            "eventstats" => {
                let (aggregations, group_by) = parse_aggregations(stage, args)?;
                return Ok(Command::EventStats {
                    aggregations,
                    group_by,
                });
            }
            "fields" => return parse_fields(stage, args),
            "table" => {
                return Ok(Command::Fields {
                    mode: FieldsMode::Include,
                    fields: field_list(stage, args)?,
                });
            }
            "rename" => return parse_rename(stage, args),
            "eval" => return parse_eval(stage, args),
            "sort" => return parse_sort(stage, args),
            "head" => return Ok(Command::Head(parse_count(stage, args)?.unwrap_or(DEFAULT_HEAD))),
            "tail" => return Ok(Command::Tail(parse_count(stage, args)?)),
            _ => {}
        }
    }

    parse_search(stage, stage)
}

fn parse_search(stage: &str, args: &str) -> Result<Command> {
    Parser::for_conditions(Lexer::new(args))
        .and_then(|mut parser| parser.parse_conditions())
        .map(Command::Search)
        .map_err(|e| SplError::parse(stage, e))
}

/// `count avg(x) as a, dc(y) by g1, g2`
///
/// Commas and whitespace are interchangeable separators.
fn parse_aggregations(stage: &str, args: &str) -> Result<(Vec<AggSpec>, Vec<String>)> {
    let tokens = words(args);
    let (specs, group_by) = match tokens.iter().position(|t| t.eq_ignore_ascii_case("by")) {
        Some(at) => {
            let group_by: Vec<String> = tokens[at + 1..]
                .iter()
                .map(|t| unquote(t).to_string())
                .collect();
            if group_by.is_empty() {
                return Err(SplError::parse(stage, "expected at least one field after 'by'"));
            }
            (&tokens[..at], group_by)
        }
        None => (&tokens[..], vec![]),
    };

    let aggregation = pattern(&AGGREGATION, stage)?;
    let mut aggregations = vec![];
    let mut rest = specs.iter();

    while let Some(token) = rest.next() {
        let caps = aggregation
            .captures(token)
            .ok_or_else(|| SplError::parse(stage, format!("invalid aggregation '{}'", token)))?;

        let function = AggFunc::from_name(&caps[1]).ok_or_else(|| {
            SplError::parse(stage, format!("unknown aggregation function '{}'", &caps[1]))
        })?;
        let field = caps
            .get(2)
            .map(|m| unquote(m.as_str()))
            .filter(|f| !f.is_empty())
            .map(str::to_string);
        if field.is_none() && function != AggFunc::Count {
            return Err(SplError::parse(
                stage,
                format!("'{}' requires a field", function.name()),
            ));
        }

        let mut alias = None;
        if rest.as_slice().first().is_some_and(|t| t.eq_ignore_ascii_case("as")) {
            rest.next();
            let name = rest
                .next()
                .ok_or_else(|| SplError::parse(stage, "expected a name after 'as'"))?;
            alias = Some(unquote(name).to_string());
        }

        aggregations.push(AggSpec {
            function,
            field,
            alias,
        });
    }

    if aggregations.is_empty() {
        return Err(SplError::parse(stage, "expected at least one aggregation"));
    }
    Ok((aggregations, group_by))
}

fn field_list(stage: &str, args: &str) -> Result<Vec<String>> {
    let fields: Vec<String> = words(args)
        .into_iter()
        .map(|w| unquote(w).to_string())
        .collect();
    if fields.is_empty() {
        return Err(SplError::parse(stage, "expected at least one field"));
    }
    Ok(fields)
}

fn parse_fields(stage: &str, args: &str) -> Result<Command> {
    let (mode, list) = if let Some(rest) = args.strip_prefix('-') {
        (FieldsMode::Exclude, rest)
    } else if let Some(rest) = args.strip_prefix('+') {
        (FieldsMode::Include, rest)
    } else {
        (FieldsMode::Include, args)
    };
    Ok(Command::Fields {
        mode,
        fields: field_list(stage, list)?,
    })
}

fn parse_rename(stage: &str, args: &str) -> Result<Command> {
    let pair = pattern(&RENAME_PAIR, stage)?;
    let pairs = split_outside(args, |c| c == ',')
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| {
            let caps = pair.captures(p).ok_or_else(|| {
                SplError::parse(stage, format!("expected 'old as new', found '{}'", p.trim()))
            })?;
            Ok((unquote(&caps[1]).to_string(), unquote(&caps[2]).to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    if pairs.is_empty() {
        return Err(SplError::parse(stage, "expected at least one 'old as new' pair"));
    }
    Ok(Command::Rename(pairs))
}

fn parse_eval(stage: &str, args: &str) -> Result<Command> {
    let (target, expr) = Parser::new(Lexer::new(args))
        .and_then(|mut parser| parser.parse_assignment())
        .map_err(|e| SplError::evaluation(stage, e))?;
    Ok(Command::Eval { target, expr })
}

/// `sort a, -b, +c`. A detached `-` applies to the next field.
fn parse_sort(stage: &str, args: &str) -> Result<Command> {
    let mut keys = vec![];
    let mut pending: Option<Direction> = None;

    for word in words(args) {
        let (direction, field) = if let Some(rest) = word.strip_prefix('-') {
            (Direction::Desc, rest)
        } else if let Some(rest) = word.strip_prefix('+') {
            (Direction::Asc, rest)
        } else {
            (pending.unwrap_or_default(), word)
        };

        if field.is_empty() {
            pending = Some(direction);
            continue;
        }
        pending = None;
        keys.push(SortKey {
            field: unquote(field).to_string(),
            direction,
        });
    }

    if pending.is_some() {
        return Err(SplError::parse(stage, "expected a field after the sort direction"));
    }
    if keys.is_empty() {
        return Err(SplError::parse(stage, "expected at least one sort field"));
    }
    Ok(Command::Sort(keys))
}

fn parse_count(stage: &str, args: &str) -> Result<Option<usize>> {
    if args.is_empty() {
        return Ok(None);
    }
    args.parse::<usize>()
        .map(Some)
        .map_err(|_| SplError::parse(stage, format!("expected a non-negative count, found '{}'", args)))
}
