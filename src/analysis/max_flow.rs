//! Maximum sustainable throughput between two equipment.

use std::collections::VecDeque;

use crate::graph::ActiveView;

/// Edmonds-Karp over the active view with bandwidth capacities.
///
/// Each undirected link becomes a pair of opposing residual arcs with the
/// link's full capacity on both; pushing flow along one arc frees capacity
/// on its partner, which is how augmentation through an undirected edge
/// cancels. Arcs are stored pairwise so an arc's partner is `arc ^ 1`.
/// Returns zero when source and sink coincide or no augmenting path exists.
pub fn maximum_flow(view: &ActiveView, source: usize, sink: usize) -> u64 {
    if source == sink {
        return 0;
    }

    let mut heads = Vec::with_capacity(view.links().len() * 2);
    let mut caps: Vec<u64> = Vec::with_capacity(view.links().len() * 2);
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); view.len()];
    for link in view.links() {
        out[link.a].push(heads.len());
        heads.push(link.b);
        caps.push(u64::from(link.weight));
        out[link.b].push(heads.len());
        heads.push(link.a);
        caps.push(u64::from(link.weight));
    }

    let mut total = 0u64;
    while let Some(arcs) = augmenting_path(&out, &heads, &caps, source, sink) {
        let mut bottleneck = u64::MAX;
        for &arc in &arcs {
            bottleneck = bottleneck.min(caps[arc]);
        }
        for &arc in &arcs {
            caps[arc] -= bottleneck;
            caps[arc ^ 1] += bottleneck;
        }
        total += bottleneck;
    }
    total
}

/// Breadth-first search for a shortest augmenting path. Returns the arc
/// indices of the path, sink to source, or `None` when the residual graph
/// has no path left.
fn augmenting_path(
    out: &[Vec<usize>],
    heads: &[usize],
    caps: &[u64],
    source: usize,
    sink: usize,
) -> Option<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; out.len()];
    let mut seen = vec![false; out.len()];
    seen[source] = true;
    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for &arc in &out[u] {
            let v = heads[arc];
            if seen[v] || caps[arc] == 0 {
                continue;
            }
            seen[v] = true;
            parent[v] = Some(arc);
            if v == sink {
                let mut arcs = Vec::new();
                let mut cursor = sink;
                // The partner arc points back at this arc's tail.
                while let Some(step) = parent[cursor] {
                    arcs.push(step);
                    cursor = heads[step ^ 1];
                }
                return Some(arcs);
            }
            queue.push_back(v);
        }
    }
    None
}
