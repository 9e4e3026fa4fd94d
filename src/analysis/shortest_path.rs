//! Lowest-latency route search over the active view.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::ActiveView;

/// Dijkstra from `source` to `dest` over view indices.
///
/// Edge weights are whatever the view projected, summed in u64 so no
/// realistic topology can overflow. Returns the vertex sequence including
/// both endpoints, or `None` when no active route exists. Ties are broken
/// toward the lower view index, so equal-cost inputs always produce the
/// same route.
pub fn shortest_path(view: &ActiveView, source: usize, dest: usize) -> Option<Vec<usize>> {
    let n = view.len();
    let mut dist = vec![u64::MAX; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[source] = 0;
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        if u == dest {
            break;
        }
        for edge in view.neighbors(u) {
            if visited[edge.peer] {
                continue;
            }
            let candidate = d + u64::from(edge.weight);
            if candidate < dist[edge.peer] {
                dist[edge.peer] = candidate;
                prev[edge.peer] = Some(u);
                heap.push(Reverse((candidate, edge.peer)));
            }
        }
    }

    if dist[dest] == u64::MAX {
        return None;
    }

    let mut path = vec![dest];
    let mut cursor = dest;
    while let Some(parent) = prev[cursor] {
        path.push(parent);
        cursor = parent;
    }
    path.reverse();
    Some(path)
}
