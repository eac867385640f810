//! Simplifier for Darwin Core Archives.
//!
//! Expects the re-normalized schema produced by the archive reader: a main
//! table holding the core records, plus one table per extension named after
//! the class it describes. Proposals are made in four passes, each committed
//! to the project only when it found something new:
//!
//! 1. joins from `<name>ID` columns of the main table to a table `<name>`
//! 2. concepts from well-known identifier columns
//! 3. attributes from columns named like a vocabulary property whose domain
//!    includes the concept's class
//! 4. relations between concepts, following a fixed subject priority

use std::collections::HashSet;

use tracing::{debug, info};

use super::rules::{id_column_stem, DwcaRules, DWCA_RULES, OCCURRENCE_URI};
use super::Simplifier;
use crate::config::SimplifierSettings;
use crate::model::{Attribute, Concept, IdPrefix, Join, Relation};
use crate::project::{Project, PropertyValue};
use crate::vocabulary::Vocabulary;

/// Configuration for the Darwin Core simplifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwcaConfig {
    /// Name of the central table.
    pub main_table: String,
    /// Row identifier column of extension tables.
    pub id_column: String,
}

impl Default for DwcaConfig {
    fn default() -> Self {
        Self::from(&SimplifierSettings::default())
    }
}

impl From<&SimplifierSettings> for DwcaConfig {
    fn from(settings: &SimplifierSettings) -> Self {
        Self {
            main_table: settings.main_table.clone(),
            id_column: settings.id_column.clone(),
        }
    }
}

impl DwcaConfig {
    pub fn with_main_table(mut self, table: impl Into<String>) -> Self {
        self.main_table = table.into();
        self
    }

    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }
}

/// Darwin Core Archive simplifier.
#[derive(Debug, Clone, Default)]
pub struct DwcaSimplifier {
    config: DwcaConfig,
}

impl DwcaSimplifier {
    pub const FORMAT_CODE: &'static str = "DwCA";
    pub const FORMAT_DESCRIPTION: &'static str = "Darwin Core Archive";

    pub fn new(config: DwcaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DwcaConfig {
        &self.config
    }

    fn rules(&self) -> &'static DwcaRules {
        &DWCA_RULES
    }

    /// Joins from the main table's `<name>ID` columns to tables named `<name>`.
    ///
    /// Only multi-table schemas have joins. A join is proposed only when the
    /// target table carries the configured id column.
    pub fn infer_joins(&self, project: &Project) -> Vec<Join> {
        if project.schema().len() < 2 {
            return Vec::new();
        }

        let Some(main) = project.table_by_name(&self.config.main_table, None) else {
            debug!(main_table = %self.config.main_table, "no main table, skipping join inference");
            return Vec::new();
        };

        let mut joins: Vec<Join> = Vec::new();
        for column in &main.columns {
            let Some(target) = id_column_stem(column) else {
                continue;
            };
            if target == main.name
                || project
                    .table_by_name(target, Some(self.config.id_column.as_str()))
                    .is_none()
            {
                continue;
            }

            let join = Join::new(&main.name, column, target, &self.config.id_column);
            if project.joins().contains(&join) || joins.contains(&join) {
                continue;
            }
            debug!(column = %column, target = %target, "inferred join");
            joins.push(join);
        }
        joins
    }

    /// Concepts for every well-known identifier column.
    ///
    /// When the schema has a table dedicated to the concept, the concept is
    /// bound to that table's id column; otherwise to the matched column.
    pub fn infer_concepts(&self, project: &Project) -> Vec<Concept> {
        let id_column = self.config.id_column.as_str();
        let mut concepts: Vec<Concept> = Vec::new();

        for table in project.schema() {
            for column in &table.columns {
                let Some(class) = self.rules().concept_class(column) else {
                    continue;
                };

                let dedicated = id_column_stem(column)
                    .filter(|stem| project.table_by_name(stem, Some(id_column)).is_some());

                let concept = match dedicated {
                    Some(stem) => Concept::new(stem, id_column, class.clone())
                        .with_id_prefix(IdPrefix::for_column(stem, id_column)),
                    None => {
                        if !project.is_column_available(&table.name, column) {
                            continue;
                        }
                        Concept::new(&table.name, column, class.clone())
                            .with_id_prefix(IdPrefix::for_column(&table.name, column))
                    }
                };

                let key = concept.key();
                if project.entity_by_key(&key).is_some()
                    || concepts.iter().any(|c| c.has_key(&key))
                {
                    continue;
                }
                debug!(concept = %key, class = %class.name, "inferred concept");
                concepts.push(concept);
            }
        }
        concepts
    }

    /// Attributes for columns matching a vocabulary property.
    ///
    /// A property matches when its name equals the column name and its domain
    /// includes the concept's class, or when the concept is an occurrence and
    /// the property is a record-level term. A column is taken by at most one
    /// attribute.
    pub fn infer_attributes(&self, project: &Project, vocabulary: &Vocabulary) -> Vec<Attribute> {
        let mut attributes = Vec::new();
        let mut claimed: HashSet<(&str, &str)> = HashSet::new();

        for concept in project.entities() {
            let Some(table) = project.table_by_name(&concept.table, None) else {
                continue;
            };
            let key = concept.key();

            for column in &table.columns {
                if claimed.contains(&(table.name.as_str(), column.as_str()))
                    || !project.is_column_available(&table.name, column)
                {
                    continue;
                }

                let matched = vocabulary.properties_named(column).find(|property| {
                    property.applies_to(concept.class_uri())
                        || (concept.class_uri() == OCCURRENCE_URI
                            && self.rules().is_record_level_occurrence(&property.name))
                });

                if let Some(property) = matched {
                    debug!(concept = %key, column = %column, "inferred attribute");
                    claimed.insert((table.name.as_str(), column.as_str()));
                    attributes.push(Attribute::new(key.clone(), column, property.term()));
                }
            }
        }
        attributes
    }

    /// Relations between concepts whose classes the rule table links.
    ///
    /// Subject classes are processed in priority order and each object class
    /// is used by at most one relation per run, so a higher-priority subject
    /// claims an object before a lower-priority one can.
    pub fn infer_relations(&self, project: &Project) -> Vec<Relation> {
        let mut relations: Vec<Relation> = Vec::new();
        let mut used_objects: HashSet<&str> = HashSet::new();
        let entities = project.entities();

        for subject_class in self.rules().subject_order() {
            for subject in entities.iter().filter(|c| c.class_name() == *subject_class) {
                let subject_key = subject.key();

                for object in entities {
                    let object_class = object.class_name();
                    let Some(predicate) = self.rules().predicate(subject_class, object_class) else {
                        continue;
                    };
                    if used_objects.contains(object_class) {
                        continue;
                    }

                    let object_key = object.key();
                    let exists = project.relation_by_entities(&subject_key, &object_key).is_some()
                        || relations.iter().any(|r| r.links(&subject_key, &object_key));
                    if exists {
                        used_objects.insert(object_class);
                        continue;
                    }
                    if !project.is_relation_possible(subject, object) {
                        continue;
                    }

                    debug!(subject = %subject_key, predicate, object = %object_key, "inferred relation");
                    relations.push(Relation::new(subject_key.clone(), predicate, object_key));
                    used_objects.insert(object_class);
                }
            }
        }
        relations
    }
}

impl Simplifier for DwcaSimplifier {
    fn format_code(&self) -> &'static str {
        Self::FORMAT_CODE
    }

    fn format_description(&self) -> &'static str {
        Self::FORMAT_DESCRIPTION
    }

    fn simplify(&self, project: &mut Project, vocabulary: Option<&Vocabulary>) -> bool {
        let joins = self.infer_joins(project);
        let join_count = joins.len();
        if !joins.is_empty() {
            let mut all = project.joins().to_vec();
            all.extend(joins);
            project.set_property(PropertyValue::Joins(all), None);
        }

        let concepts = self.infer_concepts(project);
        let concept_count = concepts.len();
        if !concepts.is_empty() {
            let mut all = project.entities().to_vec();
            all.extend(concepts);
            project.set_property(PropertyValue::Entities(all), None);
        }

        let (attribute_count, relation_count) = match vocabulary {
            Some(vocabulary) => {
                let attributes = self.infer_attributes(project, vocabulary);
                let attribute_count = attributes.len();
                if !attributes.is_empty() {
                    let mut all = project.attributes().to_vec();
                    all.extend(attributes);
                    project.set_property(PropertyValue::Attributes(all), None);
                }

                let relations = self.infer_relations(project);
                let relation_count = relations.len();
                if !relations.is_empty() {
                    let mut all = project.relations().to_vec();
                    all.extend(relations);
                    project.set_property(PropertyValue::Relations(all), None);
                }
                (attribute_count, relation_count)
            }
            None => {
                debug!("no vocabulary, skipping attribute and relation inference");
                (0, 0)
            }
        };

        info!(
            project = %project.name(),
            joins = join_count,
            concepts = concept_count,
            attributes = attribute_count,
            relations = relation_count,
            "simplified project"
        );

        concept_count > 0
    }
}
