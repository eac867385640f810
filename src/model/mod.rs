//! Data model for schema-to-RDF mappings.
//!
//! A mapping project is built from five collections:
//!
//! - **schema** - [`Table`]s reported by inspection, looked up via [`SchemaIndex`]
//! - **joins** - [`Join`]s connecting tables
//! - **entities** - [`Concept`]s, identified by [`ConceptKey`]
//! - **attributes** - [`Attribute`]s attaching columns to concepts
//! - **relations** - [`Relation`]s between concepts
//!
//! The types here are plain data. Consistency across collections is owned by
//! [`crate::project::Project`].

mod mapping;
mod schema;
mod types;

pub use mapping::{Attribute, Concept, Join, Relation};
pub use schema::{SchemaIndex, Table};
pub use types::{ConceptKey, IdPrefix, VocabularyTerm};
