use std::collections::{HashMap, HashSet};

use ambit_frontier::MutablePriorityIndex;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::error::Result;
use crate::traverse::retrace;

/// Weighted shortest path from `source` to `destination` over `u64`
/// edge weights.
///
/// Driven by a [`MutablePriorityIndex`]: relaxing an edge updates the
/// neighbor's tentative distance in place (decrease-key), so the index
/// always dequeues the closest unsettled node next. Same return
/// contract as [`shortest_path`]: `Ok(None)` for an unreachable
/// destination, a one-node path for `source == destination`.
///
/// [`shortest_path`]: crate::traverse::shortest_path
pub fn dijkstra_path<N>(
    graph: &UnGraph<N, u64>,
    source: NodeIndex,
    destination: NodeIndex,
) -> Result<Option<Vec<NodeIndex>>> {
    if source == destination {
        return Ok(Some(vec![source]));
    }
    let mut distance: HashMap<NodeIndex, i64> = HashMap::from([(source, 0)]);
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut settled: HashSet<NodeIndex> = HashSet::new();
    let mut pending = MutablePriorityIndex::new();
    pending.set_priority(source, 0);

    while let Ok(node) = pending.dequeue() {
        if node == destination {
            return retrace(&previous, source, destination).map(Some);
        }
        settled.insert(node);
        let base = distance[&node];
        for edge in graph.edges(node) {
            let neighbor = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if settled.contains(&neighbor) {
                continue;
            }
            let candidate = base + *edge.weight() as i64;
            if distance.get(&neighbor).is_none_or(|&d| candidate < d) {
                distance.insert(neighbor, candidate);
                previous.insert(neighbor, node);
                pending.set_priority(neighbor, candidate);
            }
        }
    }
    Ok(None)
}
