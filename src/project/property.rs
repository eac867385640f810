//! Named project properties and their values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConnectionParams;
use crate::error::{ModelError, ModelResult};
use crate::model::{Attribute, Concept, Join, Relation, Table};

/// The properties a project holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropertyName {
    Name,
    DateTime,
    Connection,
    Schema,
    Joins,
    Entities,
    Attributes,
    Relations,
}

impl PropertyName {
    /// Every property, in the order a project is loaded.
    ///
    /// Collections come after the schema they reference and before the
    /// collections that reference them.
    pub const ALL: [PropertyName; 8] = [
        PropertyName::Name,
        PropertyName::DateTime,
        PropertyName::Connection,
        PropertyName::Schema,
        PropertyName::Joins,
        PropertyName::Entities,
        PropertyName::Attributes,
        PropertyName::Relations,
    ];

    /// Wire name of the property.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyName::Name => "name",
            PropertyName::DateTime => "dateTime",
            PropertyName::Connection => "connection",
            PropertyName::Schema => "schema",
            PropertyName::Joins => "joins",
            PropertyName::Entities => "entities",
            PropertyName::Attributes => "attributes",
            PropertyName::Relations => "relations",
        }
    }

    /// Is this one of the five mapping collections?
    pub fn is_collection(&self) -> bool {
        !matches!(
            self,
            PropertyName::Name | PropertyName::DateTime | PropertyName::Connection
        )
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ModelError::UnknownProperty(s.to_string()))
    }
}

/// A replacement value for one project property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Name(String),
    DateTime(String),
    Connection(ConnectionParams),
    Schema(Vec<Table>),
    Joins(Vec<Join>),
    Entities(Vec<Concept>),
    Attributes(Vec<Attribute>),
    Relations(Vec<Relation>),
}

impl PropertyValue {
    /// The property this value replaces.
    pub fn name(&self) -> PropertyName {
        match self {
            PropertyValue::Name(_) => PropertyName::Name,
            PropertyValue::DateTime(_) => PropertyName::DateTime,
            PropertyValue::Connection(_) => PropertyName::Connection,
            PropertyValue::Schema(_) => PropertyName::Schema,
            PropertyValue::Joins(_) => PropertyName::Joins,
            PropertyValue::Entities(_) => PropertyName::Entities,
            PropertyValue::Attributes(_) => PropertyName::Attributes,
            PropertyValue::Relations(_) => PropertyName::Relations,
        }
    }

    /// The value of a property on a freshly created project.
    pub fn empty(name: PropertyName) -> Self {
        match name {
            PropertyName::Name => PropertyValue::Name(String::new()),
            PropertyName::DateTime => PropertyValue::DateTime(String::new()),
            PropertyName::Connection => PropertyValue::Connection(ConnectionParams::default()),
            PropertyName::Schema => PropertyValue::Schema(Vec::new()),
            PropertyName::Joins => PropertyValue::Joins(Vec::new()),
            PropertyName::Entities => PropertyValue::Entities(Vec::new()),
            PropertyName::Attributes => PropertyValue::Attributes(Vec::new()),
            PropertyName::Relations => PropertyValue::Relations(Vec::new()),
        }
    }

    /// Decode a stored JSON value. `null` decodes to the empty value.
    pub fn from_json(name: PropertyName, value: Value) -> ModelResult<Self> {
        if value.is_null() {
            return Ok(Self::empty(name));
        }

        let wrap = |source| ModelError::InvalidPropertyJson {
            property: name.as_str(),
            source,
        };

        Ok(match name {
            PropertyName::Name => PropertyValue::Name(serde_json::from_value(value).map_err(wrap)?),
            PropertyName::DateTime => {
                PropertyValue::DateTime(serde_json::from_value(value).map_err(wrap)?)
            }
            PropertyName::Connection => {
                PropertyValue::Connection(serde_json::from_value(value).map_err(wrap)?)
            }
            PropertyName::Schema => {
                PropertyValue::Schema(serde_json::from_value(value).map_err(wrap)?)
            }
            PropertyName::Joins => PropertyValue::Joins(serde_json::from_value(value).map_err(wrap)?),
            PropertyName::Entities => {
                PropertyValue::Entities(serde_json::from_value(value).map_err(wrap)?)
            }
            PropertyName::Attributes => {
                PropertyValue::Attributes(serde_json::from_value(value).map_err(wrap)?)
            }
            PropertyName::Relations => {
                PropertyValue::Relations(serde_json::from_value(value).map_err(wrap)?)
            }
        })
    }

    /// Encode as the stored JSON value.
    pub fn to_json(&self) -> ModelResult<Value> {
        Ok(match self {
            PropertyValue::Name(v) | PropertyValue::DateTime(v) => Value::String(v.clone()),
            PropertyValue::Connection(v) => serde_json::to_value(v)?,
            PropertyValue::Schema(v) => serde_json::to_value(v)?,
            PropertyValue::Joins(v) => serde_json::to_value(v)?,
            PropertyValue::Entities(v) => serde_json::to_value(v)?,
            PropertyValue::Attributes(v) => serde_json::to_value(v)?,
            PropertyValue::Relations(v) => serde_json::to_value(v)?,
        })
    }
}

/// The whole of a project as one JSON document.
///
/// Used for import/export; every field is optional on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSnapshot {
    pub name: String,
    pub date_time: String,
    pub connection: ConnectionParams,
    pub schema: Vec<Table>,
    pub joins: Vec<Join>,
    pub entities: Vec<Concept>,
    pub attributes: Vec<Attribute>,
    pub relations: Vec<Relation>,
}

impl ProjectSnapshot {
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Split into property values, in load order.
    pub fn into_values(self) -> [PropertyValue; 8] {
        [
            PropertyValue::Name(self.name),
            PropertyValue::DateTime(self.date_time),
            PropertyValue::Connection(self.connection),
            PropertyValue::Schema(self.schema),
            PropertyValue::Joins(self.joins),
            PropertyValue::Entities(self.entities),
            PropertyValue::Attributes(self.attributes),
            PropertyValue::Relations(self.relations),
        ]
    }
}
