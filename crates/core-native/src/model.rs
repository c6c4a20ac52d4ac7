use crate::error::{ModelResult, NonScalarValueSnafu};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub r#type: String,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r#type: r#type.into(),
        }
    }
}

/// The kinds of value a JSON result cell can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    Number,
    Text,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Scalar {
    #[must_use]
    pub const fn kind(&self) -> InputKind {
        match self {
            Self::Number(_) => InputKind::Number,
            Self::Text(_) => InputKind::Text,
            Self::Boolean(_) => InputKind::Boolean,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub type Row = HashMap<String, Scalar>;

/// A query result as returned by the warehouse: ordered columns and ordered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    #[must_use]
    pub const fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Builds a result set from decoded JSON objects.
    ///
    /// `null` cells are dropped so that they read as absent, arrays and objects
    /// are rejected.
    pub fn from_json_rows(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Map<String, Value>>,
    ) -> ModelResult<Self> {
        let mut converted = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let mut cells = Row::with_capacity(row.len());
            for (column, value) in row {
                let scalar = match value {
                    Value::Null => continue,
                    Value::Bool(value) => Scalar::Boolean(value),
                    Value::String(value) => Scalar::Text(value),
                    // Only serde_json's `arbitrary_precision` numbers lack an f64 form.
                    Value::Number(value) => Scalar::Number(value.as_f64().unwrap_or(f64::NAN)),
                    Value::Array(_) | Value::Object(_) => {
                        return NonScalarValueSnafu { column, row: index }.fail();
                    }
                };
                cells.insert(column, scalar);
            }
            converted.push(cells);
        }
        Ok(Self::new(columns, converted))
    }
}
