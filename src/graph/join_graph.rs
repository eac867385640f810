//! Table adjacency derived from the project's joins.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::model::{Concept, Join};

/// Undirected graph of tables, one edge per join.
///
/// Two tables are reachable when they are the same table, share a join, or
/// are both joined to a common intermediate table. Longer chains are not
/// followed.
#[derive(Debug, Clone, Default)]
pub struct JoinGraph {
    /// Edge weight is the join's position in the project's join list.
    graph: UnGraph<String, usize>,
    node_indices: HashMap<String, NodeIndex>,
}

impl JoinGraph {
    /// Build the graph from a join list.
    pub fn from_joins(joins: &[Join]) -> Self {
        let mut graph = Self::default();
        for (idx, join) in joins.iter().enumerate() {
            let foreign = graph.node(&join.foreign_table);
            let primary = graph.node(&join.primary_table);
            graph.graph.add_edge(foreign, primary, idx);
        }
        graph
    }

    fn node(&mut self, table: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(table) {
            return idx;
        }
        let idx = self.graph.add_node(table.to_string());
        self.node_indices.insert(table.to_string(), idx);
        idx
    }

    /// Is there a join directly connecting `a` and `b`?
    pub fn are_joined(&self, a: &str, b: &str) -> bool {
        match (self.node_indices.get(a), self.node_indices.get(b)) {
            (Some(&from), Some(&to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Are tables `a` and `b` connected directly or through one intermediate table?
    pub fn is_reachable(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }

        let (Some(&from), Some(&to)) = (self.node_indices.get(a), self.node_indices.get(b)) else {
            return false;
        };

        self.graph
            .neighbors(from)
            .any(|hop| hop == to || self.graph.neighbors(hop).any(|next| next == to))
    }

    /// Can a relation be defined between two concepts?
    pub fn is_relation_possible(&self, a: &Concept, b: &Concept) -> bool {
        self.is_reachable(&a.table, &b.table)
    }

    /// Tables that bridge `a` and `b` (joined to both).
    pub fn bridge_tables(&self, a: &str, b: &str) -> Vec<&str> {
        let (Some(&from), Some(&to)) = (self.node_indices.get(a), self.node_indices.get(b)) else {
            return Vec::new();
        };

        let mut bridges: Vec<&str> = self
            .graph
            .neighbors(from)
            .filter(|&hop| hop != from && hop != to)
            .filter(|&hop| self.graph.find_edge(hop, to).is_some())
            .map(|hop| self.graph[hop].as_str())
            .collect();
        bridges.sort_unstable();
        bridges.dedup();
        bridges
    }

    /// Number of distinct tables mentioned by joins.
    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of joins.
    pub fn join_count(&self) -> usize {
        self.graph.edge_count()
    }
}
