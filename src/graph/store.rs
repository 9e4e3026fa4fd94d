//! In-memory graph of the loaded topology.
//!
//! The store owns every equipment record and every surviving link. It is
//! populated once, up front, and afterwards serves lookups only; the single
//! mutation it permits is flipping an equipment's `active` flag through the
//! engine. Algorithms never walk the store directly, they run over the
//! filtered view built per query.

use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};
use thiserror::Error;

use crate::model::{Connection, Equipment};

/// Fatal problem while assembling the graph from loaded records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Two equipment records share one IP address.
    #[error("duplicate equipment address {ip}: {first_id} and {second_id} both claim it")]
    DuplicateKey {
        ip: String,
        first_id: String,
        second_id: String,
    },
}

/// Non-fatal problem while assembling the graph; the offending record is
/// skipped and loading continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// A link names at least one IP with no equipment record.
    DanglingReference { source_ip: String, target_ip: String },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::DanglingReference {
                source_ip,
                target_ip,
            } => write!(
                f,
                "link {source_ip} <-> {target_ip} references unknown equipment, skipped"
            ),
        }
    }
}

/// A link bound to the store indices of its two endpoints. Endpoints are
/// normalized so `a < b`; the record keeps its original orientation.
#[derive(Debug, Clone)]
struct StoredLink {
    a: usize,
    b: usize,
    conn: Connection,
}

/// Vertex and edge storage with key-based lookup.
///
/// Vertices keep insertion order, which downstream tie-breaking relies on.
/// Edges are indexed by their normalized endpoint pair, so at most one link
/// exists per pair regardless of orientation in the source data.
#[derive(Debug, Clone)]
pub struct GraphStore {
    vertices: Vec<Equipment>,
    by_ip: HashMap<String, usize>,
    links: Vec<StoredLink>,
    pair_index: HashMap<(usize, usize), usize>,
}

impl GraphStore {
    /// Assemble the graph from loaded records.
    ///
    /// Equipment records must carry unique IPs; a collision aborts the build.
    /// Links referencing unknown equipment are skipped with a warning, and
    /// when several links join the same pair of endpoints the first one wins
    /// and later ones are dropped.
    pub fn build(
        equipment: Vec<Equipment>,
        connections: Vec<Connection>,
    ) -> Result<(Self, Vec<BuildWarning>), BuildError> {
        let mut store = GraphStore {
            vertices: Vec::with_capacity(equipment.len()),
            by_ip: HashMap::with_capacity(equipment.len()),
            links: Vec::with_capacity(connections.len()),
            pair_index: HashMap::with_capacity(connections.len()),
        };
        let mut warnings = Vec::new();

        for item in equipment {
            if let Some(&existing) = store.by_ip.get(&item.ip) {
                return Err(BuildError::DuplicateKey {
                    ip: item.ip.clone(),
                    first_id: store.vertices[existing].id.clone(),
                    second_id: item.id,
                });
            }
            store.by_ip.insert(item.ip.clone(), store.vertices.len());
            store.vertices.push(item);
        }

        for conn in connections {
            let (a, b) = match (
                store.by_ip.get(&conn.source_ip),
                store.by_ip.get(&conn.target_ip),
            ) {
                (Some(&a), Some(&b)) => (a, b),
                _ => {
                    let warning = BuildWarning::DanglingReference {
                        source_ip: conn.source_ip.clone(),
                        target_ip: conn.target_ip.clone(),
                    };
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };
            if a == b {
                warn!(
                    "link {} <-> {} joins equipment to itself, skipped",
                    conn.source_ip, conn.target_ip
                );
                continue;
            }
            let key = (a.min(b), a.max(b));
            if store.pair_index.contains_key(&key) {
                debug!(
                    "duplicate link {} <-> {} dropped, keeping the first occurrence",
                    conn.source_ip, conn.target_ip
                );
                continue;
            }
            store.pair_index.insert(key, store.links.len());
            store.links.push(StoredLink {
                a: key.0,
                b: key.1,
                conn,
            });
        }

        debug!(
            "graph assembled: {} equipment, {} links, {} link records skipped",
            store.vertices.len(),
            store.links.len(),
            warnings.len()
        );
        Ok((store, warnings))
    }

    /// Number of equipment records in the store.
    pub fn equipment_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of surviving links in the store.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Look up equipment by its IP key.
    pub fn equipment(&self, ip: &str) -> Option<&Equipment> {
        self.by_ip.get(ip).map(|&idx| &self.vertices[idx])
    }

    /// Equipment records in insertion order.
    pub fn iter_equipment(&self) -> impl Iterator<Item = &Equipment> {
        self.vertices.iter()
    }

    /// Surviving links in build order.
    pub fn iter_links(&self) -> impl Iterator<Item = &Connection> {
        self.links.iter().map(|link| &link.conn)
    }

    /// Look up the link joining two IPs, in either orientation.
    pub fn link_between(&self, ip_a: &str, ip_b: &str) -> Option<&Connection> {
        let a = *self.by_ip.get(ip_a)?;
        let b = *self.by_ip.get(ip_b)?;
        let key = (a.min(b), a.max(b));
        self.pair_index.get(&key).map(|&idx| &self.links[idx].conn)
    }

    /// Whether a link is usable right now: both endpoints must be active.
    /// Activity is never stored on the link, it is derived on every call.
    pub fn link_active(&self, conn: &Connection) -> bool {
        let up = |ip: &str| self.equipment(ip).map(|e| e.active).unwrap_or(false);
        up(&conn.source_ip) && up(&conn.target_ip)
    }

    /// Flip an equipment's active flag. Returns false when the IP is
    /// unknown. Crate-internal; callers go through the engine.
    pub(crate) fn set_active(&mut self, ip: &str, active: bool) -> bool {
        match self.by_ip.get(ip) {
            Some(&idx) => {
                self.vertices[idx].active = active;
                true
            }
            None => false,
        }
    }

    /// Equipment record at a store index.
    pub(crate) fn vertex_at(&self, idx: usize) -> &Equipment {
        &self.vertices[idx]
    }

    /// Links with their normalized endpoint indices, in build order.
    pub(crate) fn indexed_links(&self) -> impl Iterator<Item = (usize, usize, &Connection)> {
        self.links.iter().map(|link| (link.a, link.b, &link.conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_equipment() -> Vec<Equipment> {
        vec![
            Equipment::host("PC1", "10.0.0.1", "AA:00", true, "Lab"),
            Equipment::host("PC2", "10.0.0.2", "AA:01", true, "Lab"),
            Equipment::router("R1", "10.0.0.3", "AA:02", true, "Closet", "C2901", "15.1", 1000),
        ]
    }

    #[test]
    fn test_build_and_lookup() {
        let links = vec![
            Connection::new("10.0.0.1", "10.0.0.3", "ethernet", 100, 5, 0.01),
            Connection::new("10.0.0.2", "10.0.0.3", "ethernet", 100, 7, 0.01),
        ];
        let (store, warnings) = GraphStore::build(sample_equipment(), links).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(store.equipment_count(), 3);
        assert_eq!(store.link_count(), 2);
        assert_eq!(store.equipment("10.0.0.1").unwrap().id, "PC1");
        assert!(store.equipment("10.0.0.99").is_none());
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let mut equipment = sample_equipment();
        equipment.push(Equipment::host("PC9", "10.0.0.1", "AA:09", true, "Lab"));
        let err = GraphStore::build(equipment, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateKey {
                ip: "10.0.0.1".to_string(),
                first_id: "PC1".to_string(),
                second_id: "PC9".to_string(),
            }
        );
    }

    #[test]
    fn test_dangling_link_skipped_with_warning() {
        let links = vec![
            Connection::new("10.0.0.1", "10.0.0.50", "ethernet", 100, 5, 0.0),
            Connection::new("10.0.0.1", "10.0.0.2", "ethernet", 100, 5, 0.0),
        ];
        let (store, warnings) = GraphStore::build(sample_equipment(), links).unwrap();
        assert_eq!(store.link_count(), 1);
        assert_eq!(
            warnings,
            vec![BuildWarning::DanglingReference {
                source_ip: "10.0.0.1".to_string(),
                target_ip: "10.0.0.50".to_string(),
            }]
        );
    }

    #[test]
    fn test_first_link_wins_regardless_of_orientation() {
        let links = vec![
            Connection::new("10.0.0.1", "10.0.0.2", "fiber", 1000, 2, 0.0),
            Connection::new("10.0.0.2", "10.0.0.1", "copper", 10, 90, 0.5),
        ];
        let (store, warnings) = GraphStore::build(sample_equipment(), links).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(store.link_count(), 1);
        let kept = store.link_between("10.0.0.1", "10.0.0.2").unwrap();
        assert_eq!(kept.link_type, "fiber");
        assert_eq!(kept.latency, 2);
    }

    #[test]
    fn test_self_link_skipped() {
        let links = vec![Connection::new("10.0.0.1", "10.0.0.1", "loop", 1, 1, 0.0)];
        let (store, warnings) = GraphStore::build(sample_equipment(), links).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(store.link_count(), 0);
    }

    #[test]
    fn test_link_between_is_orientation_insensitive() {
        let links = vec![Connection::new("10.0.0.1", "10.0.0.3", "ethernet", 100, 5, 0.0)];
        let (store, _) = GraphStore::build(sample_equipment(), links).unwrap();
        assert!(store.link_between("10.0.0.1", "10.0.0.3").is_some());
        assert!(store.link_between("10.0.0.3", "10.0.0.1").is_some());
        assert!(store.link_between("10.0.0.1", "10.0.0.2").is_none());
    }

    #[test]
    fn test_link_activity_follows_endpoints() {
        let links = vec![Connection::new("10.0.0.1", "10.0.0.3", "ethernet", 100, 5, 0.0)];
        let (mut store, _) = GraphStore::build(sample_equipment(), links).unwrap();
        let conn = store.link_between("10.0.0.1", "10.0.0.3").unwrap().clone();
        assert!(store.link_active(&conn));

        assert!(store.set_active("10.0.0.3", false));
        assert!(!store.link_active(&conn));

        assert!(store.set_active("10.0.0.3", true));
        assert!(store.link_active(&conn));
    }

    #[test]
    fn test_set_active_unknown_ip() {
        let (mut store, _) = GraphStore::build(sample_equipment(), Vec::new()).unwrap();
        assert!(!store.set_active("10.0.0.99", false));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let (store, _) = GraphStore::build(sample_equipment(), Vec::new()).unwrap();
        let ids: Vec<&str> = store.iter_equipment().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["PC1", "PC2", "R1"]);
    }
}
