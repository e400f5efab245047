//! # Scan Filters
//!
//! Attribute conditions evaluated against key-value items. A scan applies
//! its filter after reading a page of raw items, so a filtered page can hold
//! fewer items than the requested limit.

use serde_json::Value;

/// Condition operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    /// Equals
    Eq,

    /// Not equals
    Neq,

    /// Attribute is present (and not null)
    Exists,

    /// Attribute is absent or null
    NotExists,
}

impl ConditionOperator {
    /// Get the operator string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionOperator::Eq => "=",
            ConditionOperator::Neq => "<>",
            ConditionOperator::Exists => "attribute_exists",
            ConditionOperator::NotExists => "attribute_not_exists",
        }
    }
}

/// A single attribute condition
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Attribute to test
    pub attribute: String,

    /// Comparison operator
    pub operator: ConditionOperator,

    /// Value to compare against (ignored by existence checks)
    pub value: Value,
}

impl Condition {
    /// Create an equality condition
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: ConditionOperator::Eq,
            value: value.into(),
        }
    }

    /// Create a not-equals condition
    pub fn neq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: ConditionOperator::Neq,
            value: value.into(),
        }
    }

    /// Create an `attribute_exists` condition
    pub fn exists(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: ConditionOperator::Exists,
            value: Value::Null,
        }
    }

    /// Create an `attribute_not_exists` condition
    pub fn not_exists(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            operator: ConditionOperator::NotExists,
            value: Value::Null,
        }
    }

    /// Check if an item matches this condition
    pub fn matches(&self, item: &Value) -> bool {
        let present = item.get(&self.attribute).filter(|v| !v.is_null());

        match self.operator {
            ConditionOperator::Exists => present.is_some(),
            ConditionOperator::NotExists => present.is_none(),
            ConditionOperator::Eq => present == Some(&self.value),
            ConditionOperator::Neq => present != Some(&self.value),
        }
    }
}

/// Conjunction of conditions; the empty filter matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFilter {
    pub conditions: Vec<Condition>,
}

impl ScanFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check if an item satisfies every condition
    pub fn matches(&self, item: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(item))
    }
}
