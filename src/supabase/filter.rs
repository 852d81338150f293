//! Filter map parsing and PostgREST operator rendering.
//!
//! A filter map constrains which rows an operation affects. Each entry maps
//! a column name to either a literal value (equality) or an operator object
//! with a single `{"op": value}` pair, e.g. `{"gte": 18}`. Entries combine
//! as an AND of per-column conditions; there is no nesting or boolean
//! composition.

use serde_json::{Map, Value};

use super::error::SupabaseError;

/// Comparison operators accepted in filter operator objects.
///
/// The set mirrors PostgREST's horizontal filtering operators that apply to
/// scalar column comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    Is,
    In,
}

impl FilterOp {
    /// Parse an operator name as it appears in an operator object.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "like" => Some(Self::Like),
            "ilike" => Some(Self::Ilike),
            "is" => Some(Self::Is),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// The operator name as used in PostgREST query syntax.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::Is => "is",
            Self::In => "in",
        }
    }
}

/// A single validated column condition, ready to become a query pair.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause {
    /// Column the condition applies to.
    pub column: String,
    /// Comparison operator.
    pub op: FilterOp,
    /// Right-hand side value, already shape-checked for the operator.
    pub value: Value,
}

impl FilterClause {
    /// Render the query-parameter value (`op.value`) in PostgREST syntax.
    pub fn render(&self) -> String {
        match self.op {
            FilterOp::In => {
                let items: Vec<String> = self
                    .value
                    .as_array()
                    .map(|values| values.iter().map(render_list_item).collect())
                    .unwrap_or_default();
                format!("in.({})", items.join(","))
            }
            FilterOp::Is => format!("is.{}", render_scalar(&self.value).unwrap_or_default()),
            op => format!("{}.{}", op.as_str(), render_scalar(&self.value).unwrap_or_default()),
        }
    }
}

/// Parse a filter map into validated clauses.
///
/// A literal value implies equality; a single-pair object selects the
/// operator. Anything else is rejected before a remote call is made.
pub fn parse_filters(filters: &Map<String, Value>) -> Result<Vec<FilterClause>, SupabaseError> {
    filters
        .iter()
        .map(|(column, value)| parse_clause(column, value))
        .collect()
}

fn parse_clause(column: &str, value: &Value) -> Result<FilterClause, SupabaseError> {
    if column.trim().is_empty() {
        return Err(SupabaseError::invalid_filter(
            column,
            "column name must not be empty",
        ));
    }

    match value {
        Value::Object(operator) => {
            let mut pairs = operator.iter();
            let (Some((name, op_value)), None) = (pairs.next(), pairs.next()) else {
                return Err(SupabaseError::invalid_filter(
                    column,
                    "operator object must contain exactly one operator",
                ));
            };
            let op = FilterOp::parse(name).ok_or_else(|| {
                SupabaseError::invalid_filter(column, format!("unknown operator '{}'", name))
            })?;
            validate_operand(column, op, op_value)?;
            Ok(FilterClause {
                column: column.to_string(),
                op,
                value: op_value.clone(),
            })
        }
        // PostgREST rejects `eq.null`; a literal null means `is.null`.
        Value::Null => Ok(FilterClause {
            column: column.to_string(),
            op: FilterOp::Is,
            value: Value::Null,
        }),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(FilterClause {
            column: column.to_string(),
            op: FilterOp::Eq,
            value: value.clone(),
        }),
        Value::Array(_) => Err(SupabaseError::invalid_filter(
            column,
            "array values require the 'in' operator, e.g. {\"in\": [...]}",
        )),
    }
}

fn validate_operand(column: &str, op: FilterOp, value: &Value) -> Result<(), SupabaseError> {
    match op {
        FilterOp::In => {
            let items = value.as_array().ok_or_else(|| {
                SupabaseError::invalid_filter(column, "'in' requires an array of values")
            })?;
            if items.is_empty() {
                return Err(SupabaseError::invalid_filter(
                    column,
                    "'in' requires a non-empty array",
                ));
            }
            if items.iter().any(|item| render_scalar(item).is_none()) {
                return Err(SupabaseError::invalid_filter(
                    column,
                    "'in' values must be strings, numbers, or booleans",
                ));
            }
            Ok(())
        }
        FilterOp::Is => match value {
            Value::Null | Value::Bool(_) => Ok(()),
            _ => Err(SupabaseError::invalid_filter(
                column,
                "'is' accepts only null, true, or false",
            )),
        },
        FilterOp::Like | FilterOp::Ilike => match value {
            Value::String(_) => Ok(()),
            _ => Err(SupabaseError::invalid_filter(
                column,
                "pattern operators require a string value",
            )),
        },
        _ => match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(()),
            Value::Null => Err(SupabaseError::invalid_filter(
                column,
                "use the 'is' operator to match null",
            )),
            _ => Err(SupabaseError::invalid_filter(
                column,
                "comparison operators require a scalar value",
            )),
        },
    }
}

/// Render a scalar operand. Null renders as the PostgREST keyword `null`.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

/// Render one element of an `in.(...)` list.
///
/// Strings are double-quoted so values containing commas or parentheses
/// survive PostgREST's list syntax.
fn render_list_item(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        other => render_scalar(other).unwrap_or_default(),
    }
}
