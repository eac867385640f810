//! The mapping document handed to the triple generator.

use serde::{Deserialize, Serialize};

use super::Project;
use crate::config::ConnectionParams;
use crate::model::{Concept, Join, Relation, VocabularyTerm};

/// An attribute as embedded in its concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedAttribute {
    pub column: String,
    pub rdf_property: VocabularyTerm,
}

/// A concept together with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappedConcept {
    #[serde(flatten)]
    pub concept: Concept,
    pub attributes: Vec<MappedAttribute>,
}

/// Name of the dataset the generated triples describe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetUri {
    pub name: String,
}

/// Complete mapping for triple generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingOutput {
    pub connection: ConnectionParams,
    pub joins: Vec<Join>,
    pub entities: Vec<MappedConcept>,
    pub relations: Vec<Relation>,
    pub dataseturi: DatasetUri,
}

impl Project {
    /// Concepts with their attributes embedded, in concept order.
    pub fn combined_entities_and_attributes(&self) -> Vec<MappedConcept> {
        self.entities
            .iter()
            .map(|concept| {
                let key = concept.key();
                let attributes = self
                    .attributes_by_entity(&key)
                    .map(|attribute| MappedAttribute {
                        column: attribute.column.clone(),
                        rdf_property: attribute.rdf_property.clone(),
                    })
                    .collect();
                MappedConcept {
                    concept: concept.clone(),
                    attributes,
                }
            })
            .collect()
    }

    /// Build the mapping document for `dataset_name`.
    pub fn mapping_output(&self, dataset_name: impl Into<String>) -> MappingOutput {
        MappingOutput {
            connection: self.connection.clone(),
            joins: self.joins.clone(),
            entities: self.combined_entities_and_attributes(),
            relations: self.relations.clone(),
            dataseturi: DatasetUri {
                name: dataset_name.into(),
            },
        }
    }
}
