use std::fmt;

use crate::error::{Error, Result};
use crate::schema::{NULL_TOKEN, TableLayout};

/// A literal value inside an `INSERT ... VALUES (...)` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// Unquoted `NULL`.
    Null,
    /// Written verbatim, e.g. a numeric priority.
    Raw(String),
    /// Single-quoted string literal.
    Text(String),
}

impl SqlValue {
    /// Value for a data line of a stockpile or blend block.
    pub fn from_cell(line: &str) -> Self {
        if line == NULL_TOKEN {
            SqlValue::Null
        } else {
            SqlValue::Text(line.to_string())
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    pub fn raw(value: impl Into<String>) -> Self {
        SqlValue::Raw(value.into())
    }

    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Raw(value) => value.clone(),
            SqlValue::Text(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// One row destined for a table, rendered on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    layout: &'static TableLayout,
    values: Vec<SqlValue>,
}

impl InsertStatement {
    /// Build a statement without checking the value count against the layout.
    pub fn new(layout: &'static TableLayout, values: Vec<SqlValue>) -> Self {
        Self { layout, values }
    }

    /// Build a statement, rejecting a value count that differs from the
    /// layout's column count.
    pub fn checked(layout: &'static TableLayout, values: Vec<SqlValue>) -> Result<Self> {
        if values.len() != layout.expected_values() {
            return Err(Error::ColumnCount {
                table: layout.name,
                expected: layout.expected_values(),
                found: values.len(),
            });
        }
        Ok(Self::new(layout, values))
    }

    pub fn layout(&self) -> &'static TableLayout {
        self.layout
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn has_expected_arity(&self) -> bool {
        self.values.len() == self.layout.expected_values()
    }

    pub fn render(&self) -> String {
        let mut sql = self.layout.prefix();
        for (index, value) in self.values.iter().enumerate() {
            if index > 0 {
                sql.push_str(self.layout.separator_before(index));
            }
            sql.push_str(&value.to_sql());
        }
        sql.push_str(");");
        sql
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
