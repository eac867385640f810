//! # Triplifier
//!
//! Maps relational database schemas onto RDF.
//!
//! ## Architecture
//!
//! A mapping project is seeded from a schema inspection, optionally
//! bootstrapped by a format-specific simplifier, and kept consistent as it is
//! edited:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │               Inspection (schema, joins, ...)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [load_into]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Project (schema, joins, entities, attributes,          │
//! │            relations) + cascading consistency            │◄── Simplifier
//! │   JoinGraph ──► RelationCatalog                          │    (+ Vocabulary)
//! └─────────────────────────────────────────────────────────┘
//!            │                               │
//!            ▼ [observers]                   ▼ [mapping_output]
//! ┌───────────────────────┐   ┌─────────────────────────────┐
//! │  ProjectStore (SQLite) │   │  Mapping for triple output  │
//! └───────────────────────┘   └─────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod inference;
pub mod inspection;
pub mod model;
pub mod project;
pub mod store;
pub mod vocabulary;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{ConnectionParams, DbSystem, Settings};
    pub use crate::error::{InputError, ModelError};
    pub use crate::graph::{JoinGraph, RelationCatalog};
    pub use crate::inference::{DwcaSimplifier, Simplifier, SimplifierFactory};
    pub use crate::inspection::{Inspection, LoadMode};
    pub use crate::model::{
        Attribute, Concept, ConceptKey, IdPrefix, Join, Relation, Table, VocabularyTerm,
    };
    pub use crate::project::{
        ObserverId, Project, ProjectObserver, ProjectSnapshot, PropertyName, PropertyValue,
    };
    pub use crate::store::{ProjectManager, ProjectStore};
    pub use crate::vocabulary::{Vocabulary, VocabularyProperty};
}
