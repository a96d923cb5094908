//! Bulk-synchronous supersteps over the similarity graph.

use std::collections::BTreeMap;

use petgraph::stable_graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;
use reconcile_core::config::SimSortConfig;
use reconcile_core::constants::round_similarity;
use reconcile_core::errors::ReconcileResult;
use reconcile_core::model::{EntityId, EntityRecord};
use reconcile_core::traits::PairScorer;
use reconcile_observability::simsort_span;
use reconcile_observability::tracing_setup::events;
use reconcile_similarity::Aggregator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{SimilarityGraph, VertexState};
use crate::prepare::prepare;
use crate::split::split_components;

/// Result of a SimSort run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimSortOutcome {
    /// Final vertex states sorted by id.
    pub vertices: Vec<VertexState>,
    /// Supersteps executed.
    pub iterations: usize,
    /// `false` when the iteration cap stopped the propagation.
    pub converged: bool,
}

impl SimSortOutcome {
    pub fn excluded(&self) -> impl Iterator<Item = &VertexState> {
        self.vertices.iter().filter(|v| !v.active)
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded().count()
    }
}

/// SimSort propagation with a fixed configuration.
#[derive(Debug, Clone)]
pub struct SimSort {
    config: SimSortConfig,
}

impl SimSort {
    pub fn new(config: SimSortConfig) -> Self {
        Self { config }
    }

    /// Build the graph for `records`, run the propagation and return the
    /// component key of every record after purification.
    pub fn purify(
        &self,
        records: &[EntityRecord],
        scorer: &dyn PairScorer,
        aggregator: &Aggregator,
    ) -> ReconcileResult<(SimSortOutcome, BTreeMap<EntityId, u64>)> {
        let graph = prepare(records, scorer, aggregator)?;
        let outcome = self.run(graph);
        let keys = split_components(&outcome);
        Ok((outcome, keys))
    }

    /// Run supersteps until no vertex changes status or the iteration cap is hit.
    ///
    /// In each superstep every active vertex takes the mean similarity of its
    /// edges to active neighbours. Per component, the vertex with the lowest
    /// mean (smallest id on ties) is excluded if that mean is below the
    /// threshold. Every decision of a superstep reads the state left by the
    /// previous one. A vertex without active neighbours keeps its similarity
    /// and is never excluded.
    pub fn run(&self, mut graph: SimilarityGraph) -> SimSortOutcome {
        let span = simsort_span!(graph.vertex_count());
        let _guard = span.enter();

        let mut iterations = 0;
        let mut converged = false;
        while iterations < self.config.max_iterations {
            iterations += 1;
            let changed = self.superstep(&mut graph);
            debug!(iteration = iterations, excluded = changed, "simsort superstep");
            if changed == 0 {
                converged = true;
                break;
            }
        }

        let outcome = SimSortOutcome {
            vertices: graph.vertices(),
            iterations,
            converged,
        };
        events::simsort_finished(iterations, outcome.excluded_count(), converged);
        outcome
    }

    /// One superstep. Returns the number of newly excluded vertices.
    fn superstep(&self, graph: &mut SimilarityGraph) -> usize {
        let g = &graph.graph;
        let nodes: Vec<NodeIndex> = g
            .node_indices()
            .filter(|idx| g[*idx].active)
            .collect();

        let means: Vec<(NodeIndex, Option<f64>)> = nodes
            .par_iter()
            .map(|idx| {
                let (sum, count) = g
                    .edges(*idx)
                    .filter_map(|edge| {
                        let other = if edge.source() == *idx { edge.target() } else { edge.source() };
                        g[other].active.then_some(*edge.weight())
                    })
                    .fold((0.0, 0usize), |(s, c), w| (s + w, c + 1));
                let mean = (count > 0).then(|| round_similarity(sum / count as f64));
                (*idx, mean)
            })
            .collect();

        let mut weakest: BTreeMap<u64, (f64, EntityId, NodeIndex)> = BTreeMap::new();
        for (idx, mean) in &means {
            let Some(mean) = mean else { continue };
            let vertex = &g[*idx];
            let candidate = (*mean, vertex.id, *idx);
            weakest
                .entry(vertex.component)
                .and_modify(|current| {
                    if (candidate.0, candidate.1) < (current.0, current.1) {
                        *current = candidate;
                    }
                })
                .or_insert(candidate);
        }
        let excluded: Vec<NodeIndex> = weakest
            .into_values()
            .filter(|(mean, _, _)| *mean < self.config.min_simsort_similarity)
            .map(|(_, _, idx)| idx)
            .collect();

        for (idx, mean) in means {
            if let Some(mean) = mean {
                graph.graph[idx].similarity = mean;
            }
        }
        for idx in &excluded {
            graph.graph[*idx].active = false;
        }
        excluded.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(threshold: f64, max_iterations: usize) -> SimSortConfig {
        SimSortConfig {
            enabled: true,
            min_simsort_similarity: threshold,
            max_iterations,
        }
    }

    /// Two tight pairs (1,2) and (3,4) joined by weak edges, all in component 7.
    fn two_pairs() -> SimilarityGraph {
        let mut g = SimilarityGraph::new();
        for id in 1..=4 {
            g.ensure_vertex(id, 7);
        }
        g.connect(1, 2, 0.8);
        g.connect(3, 4, 1.0);
        g.connect(1, 3, 0.2);
        g.connect(1, 4, 0.2);
        g.connect(2, 3, 0.15);
        g.connect(2, 4, 0.15);
        g
    }

    #[test]
    fn weakest_vertices_leave_one_per_step() {
        let outcome = SimSort::new(config(0.75, 100)).run(two_pairs());
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 3);
        let excluded: Vec<_> = outcome.excluded().map(|v| v.id).collect();
        assert_eq!(excluded, vec![1, 2]);
        assert_eq!(outcome.vertices[2].similarity, 1.0);
        assert_eq!(outcome.vertices[3].similarity, 1.0);
    }

    #[test]
    fn iteration_cap_forces_termination() {
        let outcome = SimSort::new(config(0.75, 1)).run(two_pairs());
        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.excluded_count(), 1);
    }

    #[test]
    fn strong_component_is_untouched() {
        let mut g = SimilarityGraph::new();
        for id in 1..=3 {
            g.ensure_vertex(id, 1);
        }
        g.connect(1, 2, 0.9);
        g.connect(1, 3, 0.8);
        g.connect(2, 3, 0.85);
        let outcome = SimSort::new(config(0.75, 10)).run(g);
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.excluded_count(), 0);
        assert_eq!(outcome.vertices[0].similarity, 0.85);
    }

    #[test]
    fn components_are_purified_independently() {
        let mut g = two_pairs();
        g.ensure_vertex(10, 8);
        g.ensure_vertex(11, 8);
        g.connect(10, 11, 0.1);
        let outcome = SimSort::new(config(0.75, 100)).run(g);
        // Component 8: both at 0.1, the smaller id leaves; 11 is then alone.
        let excluded: Vec<_> = outcome.excluded().map(|v| v.id).collect();
        assert_eq!(excluded, vec![1, 2, 10]);
    }

    #[test]
    fn isolated_vertex_stays() {
        let mut g = SimilarityGraph::new();
        g.ensure_vertex(1, 1);
        let outcome = SimSort::new(config(0.75, 10)).run(g);
        assert!(outcome.converged);
        assert_eq!(outcome.excluded_count(), 0);
        assert_eq!(outcome.vertices[0].similarity, 1.0);
    }
}
