//! Project - a mapping project with cascading consistency.
//!
//! A [`Project`] owns the inspected schema and the four mapping collections
//! built on top of it. Every change goes through [`Project::set_property`],
//! which replaces one property wholesale and then repairs whatever the change
//! broke downstream:
//!
//! ```text
//!   schema ──► entities ──► attributes
//!      │           │
//!      └──► joins ─┴──────► relations
//! ```
//!
//! Each repair removes a single item and is committed on its own: derived
//! state is recomputed and observers are notified once per removed item, so a
//! listener can mirror the project row by row.
//!
//! The module is organized into submodules:
//! - `property`: property names, values and whole-project snapshots
//! - `observer`: change notification
//! - `query`: read-only lookups used by editors and the simplifier
//! - `export`: the mapping document consumed by the triple generator

mod export;
mod observer;
mod property;
mod query;


use std::rc::Rc;

use tracing::debug;

use crate::config::ConnectionParams;
use crate::graph::{JoinGraph, RelationCatalog};
use crate::model::{Attribute, Concept, Join, Relation, SchemaIndex, Table};

pub use export::{DatasetUri, MappedAttribute, MappedConcept, MappingOutput};
pub use observer::{ObserverId, ProjectObserver};
pub use property::{ProjectSnapshot, PropertyName, PropertyValue};

pub(crate) use observer::ObserverRegistry;

/// A schema mapping project.
#[derive(Debug)]
pub struct Project {
    name: String,
    date_time: String,
    connection: ConnectionParams,
    schema: Vec<Table>,
    joins: Vec<Join>,
    entities: Vec<Concept>,
    attributes: Vec<Attribute>,
    relations: Vec<Relation>,

    // Derived from the collections above on every commit.
    schema_index: SchemaIndex,
    join_graph: JoinGraph,
    catalog: RelationCatalog,

    observers: ObserverRegistry<dyn ProjectObserver>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_time: String::new(),
            connection: ConnectionParams::default(),
            schema: Vec::new(),
            joins: Vec::new(),
            entities: Vec::new(),
            attributes: Vec::new(),
            relations: Vec::new(),
            schema_index: SchemaIndex::default(),
            join_graph: JoinGraph::default(),
            catalog: RelationCatalog::default(),
            observers: ObserverRegistry::default(),
        }
    }

    /// Rebuild a project from a snapshot, loading properties in
    /// [`PropertyName::ALL`] order so each collection is checked against the
    /// ones it references.
    pub fn from_snapshot(snapshot: ProjectSnapshot) -> Self {
        let mut project = Project::new(snapshot.name.clone());
        for value in snapshot.into_values() {
            project.set_property(value, None);
        }
        project
    }

    /// Copy every property into a snapshot.
    pub fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            name: self.name.clone(),
            date_time: self.date_time.clone(),
            connection: self.connection.clone(),
            schema: self.schema.clone(),
            joins: self.joins.clone(),
            entities: self.entities.clone(),
            attributes: self.attributes.clone(),
            relations: self.relations.clone(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_time(&self) -> &str {
        &self.date_time
    }

    pub fn connection(&self) -> &ConnectionParams {
        &self.connection
    }

    pub fn schema(&self) -> &[Table] {
        &self.schema
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn entities(&self) -> &[Concept] {
        &self.entities
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// A copy of one property, for editing a draft before committing it.
    pub fn property_copy(&self, name: PropertyName) -> PropertyValue {
        match name {
            PropertyName::Name => PropertyValue::Name(self.name.clone()),
            PropertyName::DateTime => PropertyValue::DateTime(self.date_time.clone()),
            PropertyName::Connection => PropertyValue::Connection(self.connection.clone()),
            PropertyName::Schema => PropertyValue::Schema(self.schema.clone()),
            PropertyName::Joins => PropertyValue::Joins(self.joins.clone()),
            PropertyName::Entities => PropertyValue::Entities(self.entities.clone()),
            PropertyName::Attributes => PropertyValue::Attributes(self.attributes.clone()),
            PropertyName::Relations => PropertyValue::Relations(self.relations.clone()),
        }
    }

    /// One property as JSON, in its wire format.
    pub fn property_json(&self, name: PropertyName) -> crate::error::ModelResult<serde_json::Value> {
        self.property_copy(name).to_json()
    }

    /// Replace one property and restore consistency.
    ///
    /// Observers are notified of the change, except `silent` when given
    /// (typically the observer that made the change). Any attributes,
    /// relations, concepts or joins invalidated by the change are then removed
    /// one at a time, each removal committed and notified to every observer.
    pub fn set_property(&mut self, value: PropertyValue, silent: Option<ObserverId>) {
        let name = value.name();
        self.assign(value);
        self.commit(name, silent);

        let removed = self.cascade(name);
        if removed > 0 {
            debug!(project = %self.name, property = %name, removed, "cascade complete");
        }

        debug_assert!(
            self.is_consistent(),
            "project {} inconsistent after setting {}",
            self.name,
            name
        );
    }

    /// Run the consistency pass that a change to `name` triggers, without
    /// changing anything else. Returns the number of items removed.
    pub fn enforce_consistency(&mut self, name: PropertyName) -> usize {
        self.cascade(name)
    }

    fn assign(&mut self, value: PropertyValue) {
        match value {
            PropertyValue::Name(v) => self.name = v,
            PropertyValue::DateTime(v) => self.date_time = v,
            PropertyValue::Connection(v) => self.connection = v,
            PropertyValue::Schema(v) => self.schema = v,
            PropertyValue::Joins(v) => self.joins = v,
            PropertyValue::Entities(v) => self.entities = v,
            PropertyValue::Attributes(v) => self.attributes = v,
            PropertyValue::Relations(v) => self.relations = v,
        }
    }

    /// Recompute derived state for a change to `name` and notify observers.
    fn commit(&mut self, name: PropertyName, silent: Option<ObserverId>) {
        match name {
            PropertyName::Schema => self.schema_index = SchemaIndex::new(&self.schema),
            PropertyName::Joins => self.join_graph = JoinGraph::from_joins(&self.joins),
            _ => {}
        }
        self.catalog = RelationCatalog::compute(&self.entities, &self.join_graph);

        for observer in self.observers.targets(silent) {
            observer.project_property_changed(self, name);
        }
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn register_observer(&mut self, observer: Rc<dyn ProjectObserver>) -> ObserverId {
        self.observers.register(observer)
    }

    /// Returns false if `id` was not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // =========================================================================
    // Cascade
    // =========================================================================

    fn cascade(&mut self, name: PropertyName) -> usize {
        match name {
            PropertyName::Schema => self.prune_unresolved_entities() + self.prune_dangling_joins(),
            PropertyName::Joins | PropertyName::Relations => self.prune_invalid_relations(),
            PropertyName::Entities => self.prune_orphan_attributes() + self.prune_invalid_relations(),
            PropertyName::Attributes => self.prune_orphan_attributes(),
            PropertyName::Name | PropertyName::DateTime | PropertyName::Connection => 0,
        }
    }

    /// Remove concepts whose table or id column left the schema.
    fn prune_unresolved_entities(&mut self) -> usize {
        let mut removed = 0;
        for idx in (0..self.entities.len()).rev() {
            let concept = &self.entities[idx];
            if self
                .schema_index
                .resolves(&self.schema, &concept.table, &concept.id_column)
            {
                continue;
            }

            let concept = self.entities.remove(idx);
            debug!(concept = %concept.key(), "removed concept missing from schema");
            self.commit(PropertyName::Entities, None);
            removed += 1 + self.cascade(PropertyName::Entities);
        }
        removed
    }

    /// Remove joins with an endpoint that left the schema.
    fn prune_dangling_joins(&mut self) -> usize {
        let mut removed = 0;
        for idx in (0..self.joins.len()).rev() {
            let join = &self.joins[idx];
            let resolves = self
                .schema_index
                .resolves(&self.schema, &join.foreign_table, &join.foreign_column)
                && self
                    .schema_index
                    .resolves(&self.schema, &join.primary_table, &join.primary_column);
            if resolves {
                continue;
            }

            let join = self.joins.remove(idx);
            debug!(
                foreign = %join.foreign_table,
                primary = %join.primary_table,
                "removed join missing from schema"
            );
            self.commit(PropertyName::Joins, None);
            removed += 1 + self.cascade(PropertyName::Joins);
        }
        removed
    }

    /// Remove attributes whose concept no longer exists.
    fn prune_orphan_attributes(&mut self) -> usize {
        let mut removed = 0;
        for idx in (0..self.attributes.len()).rev() {
            if self.is_attribute_valid(&self.attributes[idx]) {
                continue;
            }

            let attribute = self.attributes.remove(idx);
            debug!(
                concept = %attribute.concept,
                column = %attribute.column,
                "removed orphaned attribute"
            );
            self.commit(PropertyName::Attributes, None);
            removed += 1;
        }
        removed
    }

    /// Remove relations that the relation catalog no longer allows.
    fn prune_invalid_relations(&mut self) -> usize {
        let mut removed = 0;
        for idx in (0..self.relations.len()).rev() {
            if self.catalog.is_relation_valid(&self.relations[idx]) {
                continue;
            }

            let relation = self.relations.remove(idx);
            debug!(
                subject = %relation.subject,
                object = %relation.object,
                "removed relation between unreachable concepts"
            );
            self.commit(PropertyName::Relations, None);
            removed += 1;
        }
        removed
    }

    /// Do attributes and relations reference live, reachable concepts?
    fn is_consistent(&self) -> bool {
        self.attributes.iter().all(|a| self.is_attribute_valid(a))
            && self.relations.iter().all(|r| self.catalog.is_relation_valid(r))
    }
}
