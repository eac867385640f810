//! Reachability between concepts.
//!
//! - [`JoinGraph`] turns the join list into an undirected table graph and
//!   answers whether two tables are connected directly or through a single
//!   intermediate (bridge/junction) table.
//! - [`RelationCatalog`] enumerates, for every concept, the other concepts it
//!   could be related to. The project recomputes it after every change and
//!   uses it to decide which stored relations are still valid.

mod catalog;
mod join_graph;

pub use catalog::{CandidateObjects, RelationCatalog, PAIR_WEIGHT};
pub use join_graph::JoinGraph;
