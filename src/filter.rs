//! Filter clause data structure.
//!
//! A [`Filter`] is the core data unit the compiler accumulates: one field
//! condition (field name, lookup operator, value) plus a negation flag.
//! Filters are constructed from an ORM-style lookup key (`"pub_date__lte"`)
//! and validated at construction time; rendering happens later in the
//! query module.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::PrimitiveDateTime;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("unrecognized lookup '{0}'")]
    InvalidLookup(String),
    #[error("lookup '{lookup}' does not accept {kind} values")]
    InvalidValueType { lookup: Lookup, kind: &'static str },
    #[error("'in' lookup requires a non-empty sequence of values")]
    EmptyMembershipSet,
}

/// Comparison kind for a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lookup {
    /// Exact match (the default when a lookup key has no suffix)
    #[default]
    Exact,
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Strictly less than
    Lt,
    /// Less than or equal
    Lte,
    /// Membership in a sequence of values
    In,
    /// Prefix match on text
    Startswith,
}

impl Lookup {
    /// Parse a lookup-key suffix (the part after `__`).
    fn from_suffix(suffix: &str) -> Result<Self, FilterError> {
        match suffix {
            "exact" => Ok(Self::Exact),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "in" => Ok(Self::In),
            "startswith" => Ok(Self::Startswith),
            other => Err(FilterError::InvalidLookup(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::Startswith => "startswith",
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter value: scalar text, integer, datetime, or a sequence of scalars.
///
/// Datetimes render truncated to whole seconds. Sequences hold scalar
/// members only; nesting is rejected at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterValue {
    Text(String),
    Int(i64),
    DateTime(PrimitiveDateTime),
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Human-readable kind tag for error messages.
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "integer",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "sequence",
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<PrimitiveDateTime> for FilterValue {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A single field condition.
///
/// # Example
///
/// ```
/// use query_compiler::{Filter, Lookup};
///
/// let filter = Filter::parse("pub_date__gte", 2009).unwrap();
/// assert_eq!(filter.field, "pub_date");
/// assert_eq!(filter.lookup, Lookup::Gte);
/// assert!(!filter.negated);
///
/// let negated = Filter::parse("content", "hello").unwrap().negate();
/// assert!(negated.negated);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Logical field name, or the configured content sentinel for
    /// unfielded text search
    pub field: String,
    /// Comparison kind
    pub lookup: Lookup,
    /// Value to compare against
    pub value: FilterValue,
    /// Render-time inversion flag, set via [`Filter::negate`]
    pub negated: bool,
}

impl Filter {
    /// Create a filter from an explicit field/lookup/value triple.
    ///
    /// Validates the value against the lookup: `in` requires a non-empty
    /// sequence, range lookups require a scalar, `startswith` requires text.
    pub fn new(
        field: impl Into<String>,
        lookup: Lookup,
        value: impl Into<FilterValue>,
    ) -> Result<Self, FilterError> {
        let value = value.into();
        validate(lookup, &value)?;
        Ok(Self {
            field: field.into(),
            lookup,
            value,
            negated: false,
        })
    }

    /// Create a filter from an ORM-style lookup key.
    ///
    /// The key is a field name optionally suffixed with `__<lookup>`;
    /// no suffix means `exact`. `"pub_date__lte"` parses to field
    /// `pub_date`, lookup [`Lookup::Lte`].
    pub fn parse(key: &str, value: impl Into<FilterValue>) -> Result<Self, FilterError> {
        match key.rsplit_once("__") {
            Some((field, suffix)) => Self::new(field, Lookup::from_suffix(suffix)?, value),
            None => Self::new(key, Lookup::Exact, value),
        }
    }

    /// Wrap this filter in logical negation.
    ///
    /// Sets the render-time inversion flag; the lookup itself is unchanged.
    pub fn negate(mut self) -> Self {
        self.negated = true;
        self
    }
}

fn validate(lookup: Lookup, value: &FilterValue) -> Result<(), FilterError> {
    match lookup {
        Lookup::In => match value {
            FilterValue::List(members) if members.is_empty() => {
                Err(FilterError::EmptyMembershipSet)
            }
            FilterValue::List(members) => ensure_scalar_members(lookup, members),
            other => Err(FilterError::InvalidValueType {
                lookup,
                kind: other.kind(),
            }),
        },
        // Sequence-valued exact is legal and renders as a literal list.
        Lookup::Exact => match value {
            FilterValue::List(members) => ensure_scalar_members(lookup, members),
            _ => Ok(()),
        },
        Lookup::Gt | Lookup::Gte | Lookup::Lt | Lookup::Lte => match value {
            FilterValue::List(_) => Err(FilterError::InvalidValueType {
                lookup,
                kind: value.kind(),
            }),
            _ => Ok(()),
        },
        Lookup::Startswith => match value {
            FilterValue::Text(_) => Ok(()),
            other => Err(FilterError::InvalidValueType {
                lookup,
                kind: other.kind(),
            }),
        },
    }
}

fn ensure_scalar_members(lookup: Lookup, members: &[FilterValue]) -> Result<(), FilterError> {
    for member in members {
        if matches!(member, FilterValue::List(_)) {
            return Err(FilterError::InvalidValueType {
                lookup,
                kind: "nested sequence",
            });
        }
    }
    Ok(())
}
