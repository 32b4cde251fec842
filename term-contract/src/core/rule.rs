//! Per-column rules.

use super::{DataType, Value};
use std::cmp::Ordering;

/// The constraints declared for one column.
///
/// A rule always checks the cell type. `min`, `max` and `allowed` are only
/// checked when set; an unset bound means "no constraint". Rules are not
/// checked for consistency on construction, so `min > max` or an empty
/// allowed set are accepted (see [`ColumnRule::inconsistencies`]).
///
/// # Examples
///
/// ```rust
/// use term_contract::core::{ColumnRule, DataType, Value};
///
/// let age = ColumnRule::new(DataType::Integer).with_min(0).with_max(120);
/// assert_eq!(age.min(), Some(&Value::Integer(0)));
/// assert!(age.allowed().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRule {
    expected_type: DataType,
    min: Option<Value>,
    max: Option<Value>,
    allowed: Option<Vec<Value>>,
}

impl ColumnRule {
    /// Creates a rule that only checks the cell type.
    pub fn new(expected_type: DataType) -> Self {
        Self {
            expected_type,
            min: None,
            max: None,
            allowed: None,
        }
    }

    /// Sets the lower bound.
    pub fn with_min(mut self, min: impl Into<Value>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the upper bound.
    pub fn with_max(mut self, max: impl Into<Value>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Restricts cells to the given values.
    pub fn with_allowed<I, V>(mut self, allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.allowed = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn expected_type(&self) -> DataType {
        self.expected_type
    }

    pub fn min(&self) -> Option<&Value> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Value> {
        self.max.as_ref()
    }

    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }

    /// Returns true if `value` is a member of the allowed set, or no set is declared.
    pub fn permits(&self, value: &Value) -> bool {
        self.allowed
            .as_ref()
            .map_or(true, |allowed| allowed.contains(value))
    }

    /// Describes declarations that can never be satisfied or make little sense.
    ///
    /// Nothing is rejected; the notes are only logged when a schema is built.
    pub fn inconsistencies(&self) -> Vec<String> {
        let mut notes = Vec::new();

        if let (Some(min), Some(max)) = (&self.min, &self.max) {
            if min.partial_cmp(max) == Some(Ordering::Greater) {
                notes.push(format!("min {min} is greater than max {max}"));
            }
        }
        if matches!(&self.allowed, Some(allowed) if allowed.is_empty()) {
            notes.push("allowed set is empty, every cell will be rejected".to_string());
        }
        if (self.min.is_some() || self.max.is_some()) && !self.expected_type.is_ordered() {
            notes.push(format!(
                "bounds declared on unordered type {}",
                self.expected_type
            ));
        } else {
            for (label, bound) in [("min", &self.min), ("max", &self.max)] {
                if let Some(bound) = bound.as_ref().filter(|b| !self.orders(b)) {
                    notes.push(format!(
                        "{label} {bound} cannot be compared with {} cells, every such cell will be rejected",
                        self.expected_type
                    ));
                }
            }
        }
        if let Some(allowed) = &self.allowed {
            for value in allowed.iter().filter(|v| !self.admits(v)) {
                notes.push(format!(
                    "allowed value {value} can never match {} cells",
                    self.expected_type
                ));
            }
        }

        notes
    }

    /// Returns true if cells of the expected type can be ordered against `bound`.
    fn orders(&self, bound: &Value) -> bool {
        match (bound, self.expected_type) {
            (Value::Float(f), DataType::Integer | DataType::Float) => !f.is_nan(),
            (Value::Integer(_), DataType::Float) => true,
            (bound, expected) => bound.satisfies(expected),
        }
    }

    /// Returns true if an allowed-set member can equal some cell of the expected type.
    fn admits(&self, member: &Value) -> bool {
        member.is_null() || self.orders(member)
    }
}
