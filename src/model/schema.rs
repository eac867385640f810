//! Source database schema as reported by inspection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A table of the inspected source database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name, unique within a project.
    pub name: String,
    /// Column names in inspection order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Primary key column names.
    #[serde(default, rename = "pkColumns")]
    pub primary_key: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            primary_key: Vec::new(),
        }
    }

    /// Builder: set the columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the primary key columns.
    pub fn with_primary_key<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Read-only lookup over a schema by table name.
///
/// Built in a single pass; when a name appears twice the first table wins,
/// matching a front-to-back search of the schema list.
#[derive(Debug, Clone, Default)]
pub struct SchemaIndex {
    by_name: HashMap<String, usize>,
}

impl SchemaIndex {
    pub fn new(tables: &[Table]) -> Self {
        let mut by_name = HashMap::with_capacity(tables.len());
        for (idx, table) in tables.iter().enumerate() {
            by_name.entry(table.name.clone()).or_insert(idx);
        }
        Self { by_name }
    }

    /// Position of a table in the schema list.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up a table, optionally requiring it to contain `column`.
    pub fn table<'a>(
        &self,
        tables: &'a [Table],
        name: &str,
        column: Option<&str>,
    ) -> Option<&'a Table> {
        let table = tables.get(self.position(name)?)?;
        match column {
            Some(column) if !table.has_column(column) => None,
            _ => Some(table),
        }
    }

    /// Does `table.column` exist?
    pub fn resolves(&self, tables: &[Table], name: &str, column: &str) -> bool {
        self.table(tables, name, Some(column)).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
