//! Minimum spanning forest of the active view.

use crate::analysis::union_find::DisjointSet;
use crate::graph::{ActiveView, ViewLink};

/// Kruskal over the view's edges.
///
/// Edges are taken in ascending weight order; equal weights fall back to the
/// endpoint identifiers so repeated runs select the same forest. When the
/// view is disconnected the result spans each component separately and no
/// edge joins two components, because none exists.
pub fn minimum_spanning_forest(view: &ActiveView) -> Vec<ViewLink> {
    let mut edges: Vec<ViewLink> = view.links().to_vec();
    edges.sort_by(|l, r| {
        let key = |e: &ViewLink| {
            (
                e.weight,
                view.equipment(e.a).id.as_str(),
                view.equipment(e.b).id.as_str(),
            )
        };
        key(l).cmp(&key(r))
    });

    let mut sets = DisjointSet::new(view.len());
    let mut forest = Vec::new();
    for link in edges {
        if sets.union(link.a, link.b) {
            forest.push(link);
            if forest.len() + 1 == view.len() {
                break;
            }
        }
    }
    forest
}
