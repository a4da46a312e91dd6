//! Predicate tree evaluated against entity records
//!
//! The tree is an AND group of per-field comparisons combined with an
//! optional OR group of substring matches produced from a search term.
//! Records are JSON objects; a missing or null field never matches.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Comparison applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Case-insensitive substring match (term stored lowercased)
    Contains(String),
    /// Exact integer equality
    EqInt(i64),
    /// Exact decimal equality
    EqDecimal(f64),
    /// Exact boolean equality
    EqBool(bool),
    /// Exact instant equality
    EqTimestamp(DateTime<Utc>),
    /// Exact enumeration label equality (case-sensitive)
    EqLabel(String),
}

impl FilterOp {
    /// Returns the operation name for log output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Contains(_) => "contains",
            FilterOp::EqInt(_) => "eq_int",
            FilterOp::EqDecimal(_) => "eq_decimal",
            FilterOp::EqBool(_) => "eq_bool",
            FilterOp::EqTimestamp(_) => "eq_timestamp",
            FilterOp::EqLabel(_) => "eq_label",
        }
    }
}

/// A single predicate (field + comparison)
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Field name
    pub field: String,
    /// Comparison operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create a case-insensitive substring predicate
    pub fn contains(field: impl Into<String>, term: &str) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Contains(term.to_lowercase()),
        }
    }

    /// Checks whether a record satisfies this predicate
    pub fn matches(&self, record: &Value) -> bool {
        let field_value = match record.get(&self.field) {
            Some(v) => v,
            None => return false,
        };
        if field_value.is_null() {
            return false;
        }

        match &self.op {
            FilterOp::Contains(term) => contains_match(field_value, term),
            FilterOp::EqInt(expected) => field_value.as_i64() == Some(*expected),
            FilterOp::EqDecimal(expected) => field_value.as_f64() == Some(*expected),
            FilterOp::EqBool(expected) => field_value.as_bool() == Some(*expected),
            FilterOp::EqTimestamp(expected) => field_value
                .as_str()
                .and_then(parse_timestamp)
                .is_some_and(|instant| instant == *expected),
            FilterOp::EqLabel(expected) => field_value.as_str() == Some(expected.as_str()),
        }
    }
}

/// Substring match, case-insensitive
///
/// Non-string scalars are rendered to text first so that searchable numeric
/// fields still participate in free-text search.
fn contains_match(field_value: &Value, term: &str) -> bool {
    match field_value {
        Value::String(s) => s.to_lowercase().contains(term),
        Value::Number(n) => n.to_string().contains(term),
        Value::Bool(b) => b.to_string().contains(term),
        _ => false,
    }
}

/// Parses a strict ISO-8601 date or date/time string
///
/// Accepts an RFC 3339 instant (`2024-05-01T10:30:00Z`) or a plain date
/// (`2024-05-01`, taken as midnight UTC). Anything else is rejected.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Combined filter and search condition for one request
///
/// Semantics: `filters` AND (`search` OR-group when non-empty).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateTree {
    /// AND group of field filters
    pub filters: Vec<Predicate>,
    /// OR group produced from the search term; empty means no search
    pub search: Vec<Predicate>,
}

impl PredicateTree {
    /// Returns true when the tree imposes no constraints
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.search.is_empty()
    }

    /// Checks whether a record satisfies the whole tree
    pub fn matches(&self, record: &Value) -> bool {
        self.filters.iter().all(|p| p.matches(record))
            && (self.search.is_empty() || self.search.iter().any(|p| p.matches(record)))
    }
}
