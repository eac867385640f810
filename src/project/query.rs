//! Read-only project lookups.
//!
//! None of these change the project; editors use them to decide what may be
//! added next and the simplifier uses them to avoid proposing duplicates.

use super::Project;
use crate::graph::{JoinGraph, RelationCatalog};
use crate::model::{Attribute, Concept, ConceptKey, Relation, SchemaIndex, Table};

impl Project {
    /// Total number of columns across all schema tables.
    pub fn column_count(&self) -> usize {
        self.schema.iter().map(|table| table.columns.len()).sum()
    }

    /// Look up a schema table, optionally requiring it to have `column`.
    pub fn table_by_name(&self, name: &str, column: Option<&str>) -> Option<&Table> {
        self.schema_index.table(&self.schema, name, column)
    }

    pub fn schema_index(&self) -> &SchemaIndex {
        &self.schema_index
    }

    /// Is `table.column` unclaimed by any concept id or attribute?
    pub fn is_column_available(&self, table: &str, column: &str) -> bool {
        !self
            .entities
            .iter()
            .filter(|concept| concept.table == table)
            .any(|concept| {
                concept.id_column == column
                    || self
                        .attributes_by_entity(&concept.key())
                        .any(|attribute| attribute.column == column)
            })
    }

    /// Attributes attached to the concept `key`.
    pub fn attributes_by_entity<'a>(
        &'a self,
        key: &'a ConceptKey,
    ) -> impl Iterator<Item = &'a Attribute> + 'a {
        self.attributes
            .iter()
            .filter(move |attribute| &attribute.concept == key)
    }

    /// Number of concepts defined on `table`.
    pub fn entity_count_by_table(&self, table: &str) -> usize {
        self.entities.iter().filter(|c| c.table == table).count()
    }

    /// Find the concept bound to `table.id_column`.
    pub fn find_entity(&self, table: &str, id_column: &str) -> Option<&Concept> {
        self.entities
            .iter()
            .find(|c| c.table == table && c.id_column == id_column)
    }

    /// Find the concept with identity `key`.
    pub fn entity_by_key(&self, key: &ConceptKey) -> Option<&Concept> {
        self.entities.iter().find(|c| c.has_key(key))
    }

    /// Does the attribute's concept still exist?
    pub fn is_attribute_valid(&self, attribute: &Attribute) -> bool {
        self.entity_by_key(&attribute.concept).is_some()
    }

    /// Position of the first join connecting `a` and `b`, in either direction.
    pub fn find_join(&self, a: &str, b: &str) -> Option<usize> {
        self.joins.iter().position(|join| join.connects(a, b))
    }

    /// Can a relation be defined between two concepts under the current joins?
    pub fn is_relation_possible(&self, a: &Concept, b: &Concept) -> bool {
        self.join_graph.is_relation_possible(a, b)
    }

    /// Is the relation allowed by the current relation catalog?
    pub fn is_relation_valid(&self, relation: &Relation) -> bool {
        self.catalog.is_relation_valid(relation)
    }

    /// The stored relation between `a` and `b`, in either direction.
    pub fn relation_by_entities(&self, a: &ConceptKey, b: &ConceptKey) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.links(a, b))
    }

    /// Number of stored relations in which `key` takes part.
    pub fn relation_count_by_entity(&self, key: &ConceptKey) -> usize {
        self.relations.iter().filter(|r| r.involves(key)).count()
    }

    /// Every relation that could be defined in the current state.
    pub fn relation_catalog(&self) -> &RelationCatalog {
        &self.catalog
    }

    pub fn join_graph(&self) -> &JoinGraph {
        &self.join_graph
    }
}
