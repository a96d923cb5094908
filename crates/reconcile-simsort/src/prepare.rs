use std::collections::{BTreeMap, HashMap};

use reconcile_core::errors::ReconcileResult;
use reconcile_core::model::{CandidatePair, EntityId, EntityRecord};
use reconcile_core::traits::PairScorer;
use reconcile_observability::tracing_setup::events;
use reconcile_similarity::{score_pairs, Aggregator};
use tracing::debug;

use crate::graph::SimilarityGraph;

/// Build the similarity graph: one vertex per record, one edge per distinct
/// pair of records sharing a component, weighted with the aggregated similarity.
///
/// Records without a component form their own. A pair whose similarity
/// computation fails gets no edge.
pub fn prepare(
    records: &[EntityRecord],
    scorer: &dyn PairScorer,
    aggregator: &Aggregator,
) -> ReconcileResult<SimilarityGraph> {
    let mut graph = SimilarityGraph::new();
    let mut components: BTreeMap<u64, Vec<EntityId>> = BTreeMap::new();
    for record in records {
        let component = record.component.unwrap_or(record.id);
        graph.ensure_vertex(record.id, component);
        components.entry(component).or_default().push(record.id);
    }

    let mut candidates = Vec::new();
    for ids in components.values_mut() {
        ids.sort_unstable();
        ids.dedup();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                candidates.push(CandidatePair::new(*a, *b));
            }
        }
    }

    let lookup: HashMap<EntityId, &EntityRecord> = records.iter().map(|r| (r.id, r)).collect();
    let scored = score_pairs(candidates, &lookup, scorer, aggregator)?;
    for failure in &scored.failures {
        events::pair_failed(failure.source, failure.target, &failure.error.to_string());
    }
    for pair in &scored.scored {
        graph.connect(pair.source, pair.target, pair.similarity);
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        components = components.len(),
        "simsort graph prepared"
    );
    Ok(graph)
}
