//! Declarative schema definitions.
//!
//! A schema can be written as JSON instead of being assembled in code:
//!
//! ```json
//! {
//!   "name": "users",
//!   "columns": [
//!     { "name": "age", "type": "integer", "min": 0, "max": 120 },
//!     { "name": "status", "type": "string", "allowed": ["A", "B"] },
//!     { "name": "joined", "type": "date", "min": "2020-01-01" }
//!   ]
//! }
//! ```
//!
//! Columns are a list so that declaration order, which drives the order of
//! reported violations, survives parsing. Literals are coerced to the column
//! type where JSON has no native representation (dates and timestamps as
//! ISO-8601 strings, whole numbers for float columns). A literal that cannot
//! be compared with its column type is rejected.

use crate::core::{ColumnRule, DataType, Schema, Value};
use crate::prelude::*;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Serializable form of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

/// Serializable form of one named [`ColumnRule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<serde_json::Value>>,
}

impl SchemaConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON schema definition from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading schema file {}", path.display()))?;
        let config = Self::from_json_str(&contents)
            .with_context(|| format!("parsing schema file {}", path.display()))?;
        debug!(path = %path.display(), columns = config.columns.len(), "Loaded schema definition");
        Ok(config)
    }

    /// Builds the schema, coercing literals to their column types.
    pub fn into_schema(self) -> Result<Schema> {
        let mut builder = Schema::builder(self.name);
        for column in self.columns {
            let rule = column
                .to_rule()
                .with_context(|| format!("column '{}'", column.name))?;
            builder = builder.column(column.name, rule);
        }
        Ok(builder.build())
    }
}

impl ColumnConfig {
    fn to_rule(&self) -> Result<ColumnRule> {
        let mut rule = ColumnRule::new(self.data_type);
        if let Some(min) = &self.min {
            rule = rule.with_min(bound(min, self.data_type).context("min")?);
        }
        if let Some(max) = &self.max {
            rule = rule.with_max(bound(max, self.data_type).context("max")?);
        }
        if let Some(allowed) = &self.allowed {
            let values = allowed
                .iter()
                .map(|v| literal(v, self.data_type))
                .collect::<Result<Vec<_>>>()
                .context("allowed")?;
            rule = rule.with_allowed(values);
        }
        Ok(rule)
    }

    fn from_rule(name: &str, rule: &ColumnRule) -> Self {
        Self {
            name: name.to_string(),
            data_type: rule.expected_type(),
            min: rule.min().map(to_json),
            max: rule.max().map(to_json),
            allowed: rule.allowed().map(|values| values.iter().map(to_json).collect()),
        }
    }
}

impl Schema {
    /// Parses a schema from its JSON definition.
    pub fn from_json_str(json: &str) -> Result<Schema> {
        SchemaConfig::from_json_str(json)?.into_schema()
    }

    /// Returns the declarative form of this schema.
    pub fn to_config(&self) -> SchemaConfig {
        SchemaConfig {
            name: self.name().to_string(),
            columns: self
                .columns()
                .map(|(name, rule)| ColumnConfig::from_rule(name, rule))
                .collect(),
        }
    }
}

/// Converts a JSON literal into a value of the column's type.
///
/// `null` is accepted as is. Any other literal that cannot be coerced to a
/// value comparable with `data_type` is a configuration error.
fn literal(json: &serde_json::Value, data_type: DataType) -> Result<Value> {
    use serde_json::Value as Json;

    let value = match (json, data_type) {
        (Json::Null, _) => Value::Null,
        (Json::Bool(b), DataType::Boolean) => Value::Boolean(*b),
        (Json::Number(n), DataType::Float) => n
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| TermError::configuration(format!("{n} is not a valid float")))?,
        (Json::Number(n), DataType::Integer) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| TermError::configuration(format!("{n} is out of range")))?,
        },
        (Json::String(s), DataType::String) => Value::String(s.clone()),
        (Json::String(s), DataType::Date) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| TermError::configuration(format!("'{s}' is not a date: {e}")))?,
        (Json::String(s), DataType::Timestamp) => parse_timestamp(s)
            .map(Value::Timestamp)
            .ok_or_else(|| TermError::configuration(format!("'{s}' is not a timestamp")))?,
        (Json::Array(_) | Json::Object(_), _) => {
            return Err(TermError::configuration(format!(
                "{json} is not a scalar literal"
            )))
        }
        (other, data_type) => {
            return Err(TermError::configuration(format!(
                "{other} is not a valid {data_type} literal"
            )))
        }
    };
    Ok(value)
}

/// Converts a `min`/`max` literal, which unlike an allowed member cannot be null.
fn bound(json: &serde_json::Value, data_type: DataType) -> Result<Value> {
    match literal(json, data_type)? {
        Value::Null => Err(TermError::configuration("a bound cannot be null")),
        value => Ok(value),
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => (*b).into(),
        Value::Integer(i) => (*i).into(),
        Value::Float(f) => (*f).into(),
        Value::String(s) => s.clone().into(),
        Value::Date(_) | Value::Timestamp(_) => value.to_string().into(),
    }
}
