//! Status-filtered snapshot of the graph.
//!
//! Every query algorithm runs over an [`ActiveView`] built on demand: only
//! active equipment makes it in, only links with both endpoints active make
//! it in, and the weight the caller selected is projected onto each edge.
//! The view borrows the store and lives for one query, so nothing here has
//! to be kept consistent with later status changes.

use std::collections::HashMap;

use crate::graph::store::GraphStore;
use crate::model::{Connection, Equipment};

/// Which per-link scalar the edges of a view carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightKind {
    /// Latency in milliseconds; used by routing and the spanning forest.
    Latency,
    /// Capacity in Mbps; used by max-flow.
    Bandwidth,
}

impl WeightKind {
    /// Project the selected weight out of a link record.
    pub fn of(&self, conn: &Connection) -> u32 {
        match self {
            WeightKind::Latency => conn.latency,
            WeightKind::Bandwidth => conn.bandwidth,
        }
    }
}

/// A half-edge in the view adjacency: the neighbor it reaches and the
/// projected weight of the link.
#[derive(Debug, Clone, Copy)]
pub struct ViewEdge {
    pub peer: usize,
    pub weight: u32,
}

/// An undirected view edge joining two view indices, `a < b` in store order.
#[derive(Debug, Clone, Copy)]
pub struct ViewLink {
    pub a: usize,
    pub b: usize,
    pub weight: u32,
}

/// The active subgraph, with vertices renumbered densely from zero.
///
/// View indices follow store insertion order, and the edge list follows
/// store build order, so two views built from an unchanged store are
/// identical. Tie-breaking in the algorithms leans on that.
pub struct ActiveView<'a> {
    store: &'a GraphStore,
    members: Vec<usize>,
    by_ip: HashMap<&'a str, usize>,
    adjacency: Vec<Vec<ViewEdge>>,
    links: Vec<ViewLink>,
}

impl<'a> ActiveView<'a> {
    /// Snapshot the active subgraph, projecting the selected weight.
    pub fn build(store: &'a GraphStore, weight: WeightKind) -> Self {
        let mut members = Vec::new();
        let mut by_ip = HashMap::new();
        let mut store_to_view = vec![None; store.equipment_count()];

        for (idx, item) in store.iter_equipment().enumerate() {
            if item.active {
                store_to_view[idx] = Some(members.len());
                by_ip.insert(item.ip.as_str(), members.len());
                members.push(idx);
            }
        }

        let mut adjacency = vec![Vec::new(); members.len()];
        let mut links = Vec::new();
        for (a, b, conn) in store.indexed_links() {
            if let (Some(va), Some(vb)) = (store_to_view[a], store_to_view[b]) {
                let w = weight.of(conn);
                adjacency[va].push(ViewEdge { peer: vb, weight: w });
                adjacency[vb].push(ViewEdge { peer: va, weight: w });
                links.push(ViewLink {
                    a: va,
                    b: vb,
                    weight: w,
                });
            }
        }

        ActiveView {
            store,
            members,
            by_ip,
            adjacency,
            links,
        }
    }

    /// Number of active vertices.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// View index of an IP, if the equipment is present and active.
    pub fn locate(&self, ip: &str) -> Option<usize> {
        self.by_ip.get(ip).copied()
    }

    /// Equipment record behind a view index.
    pub fn equipment(&self, view_idx: usize) -> &Equipment {
        self.store.vertex_at(self.members[view_idx])
    }

    /// Usable edges out of a view vertex.
    pub fn neighbors(&self, view_idx: usize) -> &[ViewEdge] {
        &self.adjacency[view_idx]
    }

    /// All usable undirected edges, in build order.
    pub fn links(&self) -> &[ViewLink] {
        &self.links
    }
}
