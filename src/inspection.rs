//! Inspection results and how they seed a project.
//!
//! The inspection service reports the schema of a source database (or of an
//! uploaded data file converted to SQLite), plus any joins, concepts and
//! relations it could read from a previous mapping.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ConnectionParams;
use crate::error::{InputError, InputResult};
use crate::model::{Concept, Join, Relation, Table};
use crate::project::{Project, PropertyValue};

/// How an inspection result is applied to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// A live database: the schema is replaced and any joins, concepts and
    /// relations reported by the service seed collections that are still
    /// empty.
    Database,
    /// An uploaded data file: only the timestamp, connection and schema are
    /// taken.
    DataFile,
}

/// An inspection service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Inspection {
    pub date_time: String,
    pub connection: ConnectionParams,
    pub schema: Vec<Table>,
    pub joins: Vec<Join>,
    pub entities: Vec<Concept>,
    pub relations: Vec<Relation>,
}

impl Inspection {
    pub fn from_json_str(json: &str) -> InputResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> InputResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
        Self::from_json_str(&content)
    }

    /// Apply this inspection to `project`.
    pub fn load_into(self, project: &mut Project, mode: LoadMode) {
        info!(
            project = %project.name(),
            tables = self.schema.len(),
            ?mode,
            "loading inspection"
        );

        project.set_property(PropertyValue::DateTime(self.date_time), None);
        project.set_property(PropertyValue::Connection(self.connection), None);
        project.set_property(PropertyValue::Schema(self.schema), None);

        if mode == LoadMode::DataFile {
            return;
        }

        if project.joins().is_empty() && !self.joins.is_empty() {
            project.set_property(PropertyValue::Joins(self.joins), None);
        }
        if project.entities().is_empty() && !self.entities.is_empty() {
            project.set_property(PropertyValue::Entities(self.entities), None);
        }
        if project.relations().is_empty() && !self.relations.is_empty() {
            project.set_property(PropertyValue::Relations(self.relations), None);
        }
    }
}
