//! Catalog of every concept pair that could hold a relation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::JoinGraph;
use crate::model::{Concept, ConceptKey, Relation};

/// Each ordered (subject, object) pair adds this much to the catalog count.
///
/// Every possible pair is discovered twice, once from each side, and the
/// catalog counts unordered possibilities.
pub const PAIR_WEIGHT: f64 = 0.5;

/// The candidate objects for one subject concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateObjects {
    pub subject: ConceptKey,
    pub objects: Vec<ConceptKey>,
}

/// All relations that are structurally possible for a set of concepts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationCatalog {
    /// Number of possible relations, counting each pair once.
    count: f64,
    /// One entry per subject with at least one candidate object, in concept order.
    relations: Vec<CandidateObjects>,
}

impl RelationCatalog {
    /// Compute the catalog for `concepts` given the current join graph.
    pub fn compute(concepts: &[Concept], graph: &JoinGraph) -> Self {
        let mut count = 0.0;
        let mut relations = Vec::new();

        for (i, subject) in concepts.iter().enumerate() {
            let objects: Vec<ConceptKey> = concepts
                .iter()
                .enumerate()
                .filter(|&(j, object)| i != j && graph.is_relation_possible(subject, object))
                .map(|(_, object)| object.key())
                .collect();

            count += PAIR_WEIGHT * objects.len() as f64;

            if !objects.is_empty() {
                relations.push(CandidateObjects {
                    subject: subject.key(),
                    objects,
                });
            }
        }

        Self { count, relations }
    }

    /// Number of possible relations (each unordered pair counted once).
    pub fn count(&self) -> f64 {
        self.count
    }

    /// Per-subject candidate lists.
    pub fn relations(&self) -> &[CandidateObjects] {
        &self.relations
    }

    /// Candidate objects for `subject`, if it has any.
    pub fn objects_for(&self, subject: &ConceptKey) -> Option<&[ConceptKey]> {
        self.relations
            .iter()
            .find(|entry| &entry.subject == subject)
            .map(|entry| entry.objects.as_slice())
    }

    /// Is `object` a candidate object of `subject`?
    pub fn contains(&self, subject: &ConceptKey, object: &ConceptKey) -> bool {
        self.relations
            .iter()
            .any(|entry| &entry.subject == subject && entry.objects.contains(object))
    }

    /// Is the relation possible in the current state?
    pub fn is_relation_valid(&self, relation: &Relation) -> bool {
        self.contains(&relation.subject, &relation.object)
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}

impl fmt::Display for RelationCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "possible relations: {}", self.count)?;
        for entry in &self.relations {
            let objects: Vec<&str> = entry.objects.iter().map(ConceptKey::as_str).collect();
            writeln!(f, "{} -> {}", entry.subject, objects.join(", "))?;
        }
        Ok(())
    }
}
