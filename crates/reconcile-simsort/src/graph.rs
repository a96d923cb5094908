//! petgraph::StableGraph wrapper with per-vertex SimSort state.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Undirected;
use reconcile_core::model::EntityId;
use serde::{Deserialize, Serialize};

/// State of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexState {
    pub id: EntityId,
    /// Component the vertex was grouped under before purification.
    pub component: u64,
    /// `false` once the vertex has been excluded from its component.
    pub active: bool,
    /// Mean edge similarity to active neighbours at the last superstep.
    pub similarity: f64,
}

pub type SimSortStableGraph = StableGraph<VertexState, f64, Undirected>;

/// Undirected similarity graph with id lookup.
#[derive(Debug, Clone, Default)]
pub struct SimilarityGraph {
    pub graph: SimSortStableGraph,
    pub node_index: HashMap<EntityId, NodeIndex>,
}

impl SimilarityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the vertex for `id`. New vertices start active with
    /// similarity 1.
    pub fn ensure_vertex(&mut self, id: EntityId, component: u64) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(VertexState {
            id,
            component,
            active: true,
            similarity: 1.0,
        });
        self.node_index.insert(id, idx);
        idx
    }

    /// Connect two distinct existing vertices. Self loops and repeated edges
    /// are ignored.
    pub fn connect(&mut self, a: EntityId, b: EntityId, similarity: f64) -> bool {
        if a == b {
            return false;
        }
        let (Some(&ia), Some(&ib)) = (self.node_index.get(&a), self.node_index.get(&b)) else {
            return false;
        };
        if self.graph.find_edge(ia, ib).is_some() {
            return false;
        }
        self.graph.add_edge(ia, ib, similarity);
        true
    }

    pub fn vertex(&self, id: EntityId) -> Option<&VertexState> {
        self.node_index.get(&id).and_then(|idx| self.graph.node_weight(*idx))
    }

    #[cfg(test)]
    pub(crate) fn edge_similarity(&self, a: EntityId, b: EntityId) -> Option<f64> {
        let (ia, ib) = (self.node_index.get(&a)?, self.node_index.get(&b)?);
        let edge = self.graph.find_edge(*ia, *ib)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Vertex states sorted by id.
    pub fn vertices(&self) -> Vec<VertexState> {
        let mut states: Vec<VertexState> = self.graph.node_weights().copied().collect();
        states.sort_by_key(|v| v.id);
        states
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
