//! Mapping elements: joins, concepts, attributes and relations.

use serde::{Deserialize, Serialize};

use super::types::{ConceptKey, IdPrefix, VocabularyTerm};

/// A foreign-key style connection between two schema tables.
///
/// Stored directionally, but the reachability it implies is undirected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    pub foreign_table: String,
    pub foreign_column: String,
    pub primary_table: String,
    pub primary_column: String,
}

impl Join {
    pub fn new(
        foreign_table: impl Into<String>,
        foreign_column: impl Into<String>,
        primary_table: impl Into<String>,
        primary_column: impl Into<String>,
    ) -> Self {
        Self {
            foreign_table: foreign_table.into(),
            foreign_column: foreign_column.into(),
            primary_table: primary_table.into(),
            primary_column: primary_column.into(),
        }
    }

    /// Does this join connect `a` and `b`, in either direction?
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.foreign_table == a && self.primary_table == b)
            || (self.foreign_table == b && self.primary_table == a)
    }

    /// The table at the other end of this join from `table`, if `table` is an endpoint.
    pub fn other_end(&self, table: &str) -> Option<&str> {
        if self.foreign_table == table {
            Some(&self.primary_table)
        } else if self.primary_table == table {
            Some(&self.foreign_table)
        } else {
            None
        }
    }
}

/// A row-identifying column promoted to represent a vocabulary class.
///
/// Historically called an "entity"; the wire format keeps that name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub table: String,
    pub id_column: String,
    #[serde(default, rename = "idPrefixColumn")]
    pub id_prefix: IdPrefix,
    pub rdf_class: VocabularyTerm,
}

impl Concept {
    pub fn new(
        table: impl Into<String>,
        id_column: impl Into<String>,
        rdf_class: VocabularyTerm,
    ) -> Self {
        Self {
            table: table.into(),
            id_column: id_column.into(),
            id_prefix: IdPrefix::None,
            rdf_class,
        }
    }

    /// Builder: set the identifier prefix policy.
    pub fn with_id_prefix(mut self, prefix: IdPrefix) -> Self {
        self.id_prefix = prefix;
        self
    }

    /// Identity key, `table.idColumn`.
    pub fn key(&self) -> ConceptKey {
        ConceptKey::new(&self.table, &self.id_column)
    }

    /// Does this concept have identity `key`?
    ///
    /// Table names may contain dots, so the key is matched as a whole string.
    pub fn has_key(&self, key: &ConceptKey) -> bool {
        key.as_str()
            .strip_prefix(self.table.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            == Some(self.id_column.as_str())
    }

    pub fn class_name(&self) -> &str {
        &self.rdf_class.name
    }

    pub fn class_uri(&self) -> &str {
        &self.rdf_class.uri
    }
}

/// A schema column attached to a concept and mapped to a vocabulary property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Key of the owning concept.
    #[serde(rename = "entity")]
    pub concept: ConceptKey,
    pub column: String,
    pub rdf_property: VocabularyTerm,
}

impl Attribute {
    pub fn new(
        concept: ConceptKey,
        column: impl Into<String>,
        rdf_property: VocabularyTerm,
    ) -> Self {
        Self {
            concept,
            column: column.into(),
            rdf_property,
        }
    }
}

/// A typed link between two concepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub subject: ConceptKey,
    pub predicate: String,
    pub object: ConceptKey,
}

impl Relation {
    pub fn new(subject: ConceptKey, predicate: impl Into<String>, object: ConceptKey) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Does this relation involve `key` as subject or object?
    pub fn involves(&self, key: &ConceptKey) -> bool {
        &self.subject == key || &self.object == key
    }

    /// Does this relation link `a` and `b`, ignoring direction?
    pub fn links(&self, a: &ConceptKey, b: &ConceptKey) -> bool {
        (&self.subject == a && &self.object == b) || (&self.subject == b && &self.object == a)
    }
}
