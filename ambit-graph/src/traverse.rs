use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};

use ambit_frontier::{FifoQueue, Frontier, LifoStack};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::error::{Result, TraverseError};

/// Pluggable neighbor-ordering comparator over node weights.
pub type NodeOrder<'a, N> = Box<dyn Fn(&N, &N) -> Ordering + 'a>;

fn ordered_neighbors<N, E>(
    graph: &UnGraph<N, E>,
    node: NodeIndex,
    order: Option<&(dyn Fn(&N, &N) -> Ordering + '_)>,
) -> Vec<NodeIndex> {
    let mut neighbors: Vec<NodeIndex> = graph.neighbors(node).collect();
    if let Some(order) = order {
        neighbors.sort_by(|&a, &b| order(&graph[a], &graph[b]));
    }
    neighbors
}

/// Breadth-first traversal from `root` using the graph's own neighbor
/// order. Lazy, finite, non-restartable; visits every reachable node
/// exactly once.
pub fn bfs<N, E>(graph: &UnGraph<N, E>, root: NodeIndex) -> BfsIter<'_, N, E> {
    BfsIter::new(graph, root, None)
}

/// Breadth-first traversal with an explicit neighbor comparator, for a
/// reproducible visit order.
pub fn bfs_ordered<'a, N, E>(
    graph: &'a UnGraph<N, E>,
    root: NodeIndex,
    order: impl Fn(&N, &N) -> Ordering + 'a,
) -> BfsIter<'a, N, E> {
    BfsIter::new(graph, root, Some(Box::new(order)))
}

pub struct BfsIter<'a, N, E> {
    graph: &'a UnGraph<N, E>,
    frontier: FifoQueue<NodeIndex>,
    visited: HashSet<NodeIndex>,
    order: Option<NodeOrder<'a, N>>,
}

impl<'a, N, E> BfsIter<'a, N, E> {
    fn new(graph: &'a UnGraph<N, E>, root: NodeIndex, order: Option<NodeOrder<'a, N>>) -> Self {
        let mut frontier = FifoQueue::new();
        frontier.enqueue(root);
        Self {
            graph,
            frontier,
            visited: HashSet::from([root]),
            order,
        }
    }
}

impl<N, E> Iterator for BfsIter<'_, N, E> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let node = self.frontier.dequeue().ok()?;
        for neighbor in ordered_neighbors(self.graph, node, self.order.as_deref()) {
            // Marked visited at enqueue time, never at dequeue time,
            // so a node can only ever sit in the frontier once.
            if self.visited.insert(neighbor) {
                self.frontier.enqueue(neighbor);
            }
        }
        Some(node)
    }
}

/// Depth-first traversal from `root`. Iterative: the frontier is a
/// LIFO stack of partially consumed neighbor lists, one frame per
/// active path segment, so no recursion depth limit applies.
pub fn dfs<N, E>(graph: &UnGraph<N, E>, root: NodeIndex) -> DfsIter<'_, N, E> {
    DfsIter::new(graph, root, None)
}

pub fn dfs_ordered<'a, N, E>(
    graph: &'a UnGraph<N, E>,
    root: NodeIndex,
    order: impl Fn(&N, &N) -> Ordering + 'a,
) -> DfsIter<'a, N, E> {
    DfsIter::new(graph, root, Some(Box::new(order)))
}

struct Frame {
    #[allow(dead_code)]
    node: NodeIndex,
    neighbors: Vec<NodeIndex>,
    cursor: usize,
}

pub struct DfsIter<'a, N, E> {
    graph: &'a UnGraph<N, E>,
    stack: LifoStack<Frame>,
    visited: HashSet<NodeIndex>,
    order: Option<NodeOrder<'a, N>>,
    root: NodeIndex,
    started: bool,
}

impl<'a, N, E> DfsIter<'a, N, E> {
    fn new(graph: &'a UnGraph<N, E>, root: NodeIndex, order: Option<NodeOrder<'a, N>>) -> Self {
        Self {
            graph,
            stack: LifoStack::new(),
            visited: HashSet::new(),
            order,
            root,
            started: false,
        }
    }

    fn push_frame(&mut self, node: NodeIndex) {
        let neighbors = ordered_neighbors(self.graph, node, self.order.as_deref());
        self.stack.enqueue(Frame {
            node,
            neighbors,
            cursor: 0,
        });
    }
}

impl<N, E> Iterator for DfsIter<'_, N, E> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if !self.started {
            self.started = true;
            self.visited.insert(self.root);
            self.push_frame(self.root);
            return Some(self.root);
        }
        loop {
            // Advance the cursor of the top frame in place; an
            // exhausted frame is popped below.
            let candidate = {
                let frame = self.stack.peek_mut().ok()?;
                if frame.cursor < frame.neighbors.len() {
                    let next = frame.neighbors[frame.cursor];
                    frame.cursor += 1;
                    Some(next)
                } else {
                    None
                }
            };
            match candidate {
                Some(node) if self.visited.insert(node) => {
                    self.push_frame(node);
                    return Some(node);
                }
                Some(_) => continue,
                None => {
                    let _ = self.stack.dequeue();
                }
            }
        }
    }
}

/// Unweighted shortest path from `source` to `destination`.
///
/// BFS that records each node's predecessor on first discovery and
/// returns as soon as `destination` is first enqueued. The early exit
/// is only valid because the frontier is strict FIFO, which makes BFS
/// visit nodes in nondecreasing distance order.
///
/// Returns `Ok(None)` when `destination` is unreachable; the trivial
/// `source == destination` case yields a one-node path.
pub fn shortest_path<N, E>(
    graph: &UnGraph<N, E>,
    source: NodeIndex,
    destination: NodeIndex,
    order: Option<&(dyn Fn(&N, &N) -> Ordering + '_)>,
) -> Result<Option<Vec<NodeIndex>>> {
    if source == destination {
        return Ok(Some(vec![source]));
    }
    let mut frontier = FifoQueue::new();
    let mut visited = HashSet::from([source]);
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    frontier.enqueue(source);

    while let Ok(node) = frontier.dequeue() {
        for neighbor in ordered_neighbors(graph, node, order) {
            if visited.insert(neighbor) {
                previous.insert(neighbor, node);
                if neighbor == destination {
                    return retrace(&previous, source, destination).map(Some);
                }
                frontier.enqueue(neighbor);
            }
        }
    }
    Ok(None)
}

/// Walks the predecessor map backward from `destination` to `source`.
/// A gap before reaching `source` means the search terminated early.
pub(crate) fn retrace(
    previous: &HashMap<NodeIndex, NodeIndex>,
    source: NodeIndex,
    destination: NodeIndex,
) -> Result<Vec<NodeIndex>> {
    let mut path = VecDeque::new();
    let mut current = destination;
    while current != source {
        path.push_front(current);
        current = *previous.get(&current).ok_or(TraverseError::NoPathFound)?;
    }
    path.push_front(source);
    Ok(path.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> (UnGraph<&'static str, u64>, Vec<NodeIndex>) {
        // a - b - d
        //  \- c -/
        let mut graph = UnGraph::new_undirected();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        graph.add_edge(a, b, 1);
        graph.add_edge(b, d, 1);
        graph.add_edge(a, c, 1);
        graph.add_edge(c, d, 1);
        (graph, vec![a, b, c, d])
    }

    fn by_name(a: &&str, b: &&str) -> Ordering {
        a.cmp(b)
    }

    #[test]
    fn bfs_visits_every_reachable_node_once() {
        let (graph, nodes) = diamond();
        let visits: Vec<_> = bfs(&graph, nodes[0]).collect();
        assert_eq!(visits.len(), 4);
        let distinct: HashSet<_> = visits.iter().copied().collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn bfs_order_is_reproducible() {
        let (graph, nodes) = diamond();
        let first: Vec<_> = bfs_ordered(&graph, nodes[0], by_name).collect();
        let second: Vec<_> = bfs_ordered(&graph, nodes[0], by_name).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![nodes[0], nodes[1], nodes[2], nodes[3]]);
    }

    #[test]
    fn dfs_covers_the_same_set_as_bfs() {
        let (graph, nodes) = diamond();
        let via_bfs: HashSet<_> = bfs(&graph, nodes[0]).collect();
        let via_dfs: HashSet<_> = dfs(&graph, nodes[0]).collect();
        assert_eq!(via_bfs, via_dfs);
    }

    #[test]
    fn dfs_yields_root_first_and_goes_deep() {
        let (graph, nodes) = diamond();
        let visits: Vec<_> = dfs_ordered(&graph, nodes[0], by_name).collect();
        assert_eq!(visits[0], nodes[0]);
        // Name order picks b first, then dives to d before backing up
        // to c.
        assert_eq!(visits, vec![nodes[0], nodes[1], nodes[3], nodes[2]]);
    }

    #[test]
    fn shortest_path_prefers_fewer_hops() {
        // a - b - d plus the longer a - c - e - d detour.
        let mut graph: UnGraph<&str, u64> = UnGraph::new_undirected();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let c = graph.add_node("c");
        let d = graph.add_node("d");
        let e = graph.add_node("e");
        graph.add_edge(a, b, 1);
        graph.add_edge(b, d, 1);
        graph.add_edge(a, c, 1);
        graph.add_edge(c, e, 1);
        graph.add_edge(e, d, 1);
        let path = shortest_path(&graph, a, d, None).unwrap().unwrap();
        assert_eq!(path, vec![a, b, d]);
    }

    #[test]
    fn diamond_path_is_three_nodes_either_way() {
        let (graph, nodes) = diamond();
        let path = shortest_path(&graph, nodes[0], nodes[3], None)
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], nodes[0]);
        assert_eq!(path[2], nodes[3]);
        assert!(path[1] == nodes[1] || path[1] == nodes[2]);
    }

    #[test]
    fn unreachable_destination_is_none_not_an_error() {
        let mut graph: UnGraph<&str, u64> = UnGraph::new_undirected();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        let island = graph.add_node("island");
        graph.add_edge(a, b, 1);
        assert_eq!(shortest_path(&graph, a, island, None), Ok(None));
    }

    #[test]
    fn trivial_path_when_source_is_destination() {
        let (graph, nodes) = diamond();
        let path = shortest_path(&graph, nodes[0], nodes[0], None)
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![nodes[0]]);
    }

    #[test]
    fn retrace_reports_a_broken_chain() {
        let mut graph: UnGraph<&str, u64> = UnGraph::new_undirected();
        let a = graph.add_node("a");
        let b = graph.add_node("b");
        graph.add_edge(a, b, 1);
        let previous = HashMap::new();
        assert_eq!(retrace(&previous, a, b), Err(TraverseError::NoPathFound));
    }
}
