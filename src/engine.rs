//! Query facade over the topology graph.
//!
//! The engine owns the store and is the only place that turns user-facing
//! IP keys into graph indices and algorithm results into answers or errors.
//! Every query builds a fresh active view, so status changes made between
//! queries are always respected and never cached.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis;
use crate::graph::{ActiveView, BuildError, BuildWarning, GraphStore, WeightKind};
use crate::model::{Connection, Equipment};

/// Why a query could not produce an answer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// No equipment with this address exists in the topology at all.
    #[error("no equipment with address {0} exists in the topology")]
    NotFound(String),
    /// The equipment exists but is missing from the active view.
    #[error("equipment {0} is not available in the active topology")]
    EndpointUnavailable(String),
    /// Both endpoints are available but no active route joins them.
    /// Field names avoid `source`, which thiserror reserves for chaining.
    #[error("no active route from {source_ip} to {dest_ip}")]
    NoRouteFound { source_ip: String, dest_ip: String },
    /// The query itself is malformed, e.g. a flow from equipment to itself.
    #[error("source and sink must differ, both are {0}")]
    InvalidEndpoints(String),
}

/// One stop on a computed route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathHop {
    pub id: String,
    pub ip: String,
}

/// One edge of the minimum spanning forest, named by equipment identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestLink {
    pub endpoint_a: String,
    pub endpoint_b: String,
    pub latency: u32,
}

/// The topology analysis engine.
#[derive(Debug)]
pub struct NetworkEngine {
    store: GraphStore,
}

impl NetworkEngine {
    /// Build the engine from loaded records. Fatal data problems surface as
    /// an error; skipped records surface as warnings for the caller to log
    /// or count.
    pub fn new(
        equipment: Vec<Equipment>,
        connections: Vec<Connection>,
    ) -> Result<(Self, Vec<BuildWarning>), BuildError> {
        let (store, warnings) = GraphStore::build(equipment, connections)?;
        Ok((NetworkEngine { store }, warnings))
    }

    /// Read access to the underlying graph, for listings and rendering.
    pub fn graph(&self) -> &GraphStore {
        &self.store
    }

    /// Flip an equipment's active flag. This is the only mutation the
    /// engine exposes; the next query sees the new status.
    pub fn set_equipment_active(&mut self, ip: &str, active: bool) -> Result<(), QueryError> {
        if self.store.set_active(ip, active) {
            debug!("equipment {ip} set {}", if active { "up" } else { "down" });
            Ok(())
        } else {
            Err(QueryError::NotFound(ip.to_string()))
        }
    }

    /// Whether the equipment currently answers, i.e. its active flag.
    /// A status lookup, not a route search.
    pub fn is_reachable(&self, ip: &str) -> Result<bool, QueryError> {
        self.store
            .equipment(ip)
            .map(|e| e.active)
            .ok_or_else(|| QueryError::NotFound(ip.to_string()))
    }

    /// Lowest-latency route between two equipment, as the full hop sequence
    /// including both endpoints. Unknown and inactive endpoints are equally
    /// unavailable; the source is checked first.
    pub fn shortest_path(
        &self,
        source_ip: &str,
        dest_ip: &str,
    ) -> Result<Vec<PathHop>, QueryError> {
        debug!("shortest path query {source_ip} -> {dest_ip}");
        let view = ActiveView::build(&self.store, WeightKind::Latency);
        let source = locate(&view, source_ip)?;
        let dest = locate(&view, dest_ip)?;
        let path = analysis::shortest_path(&view, source, dest).ok_or_else(|| {
            QueryError::NoRouteFound {
                source_ip: source_ip.to_string(),
                dest_ip: dest_ip.to_string(),
            }
        })?;
        Ok(path
            .into_iter()
            .map(|idx| {
                let equipment = view.equipment(idx);
                PathHop {
                    id: equipment.id.clone(),
                    ip: equipment.ip.clone(),
                }
            })
            .collect())
    }

    /// Minimum-latency forest spanning every active component. Edges come
    /// back in ascending latency order; inactive equipment contributes
    /// nothing. An empty result means the active view has no usable links.
    pub fn minimum_spanning_forest(&self) -> Vec<ForestLink> {
        debug!("spanning forest query");
        let view = ActiveView::build(&self.store, WeightKind::Latency);
        analysis::minimum_spanning_forest(&view)
            .into_iter()
            .map(|link| ForestLink {
                endpoint_a: view.equipment(link.a).id.clone(),
                endpoint_b: view.equipment(link.b).id.clone(),
                latency: link.weight,
            })
            .collect()
    }

    /// Maximum sustainable throughput in Mbps between two distinct active
    /// equipment. Zero means they are active but disconnected.
    pub fn maximum_flow(&self, source_ip: &str, sink_ip: &str) -> Result<u64, QueryError> {
        debug!("max flow query {source_ip} -> {sink_ip}");
        if source_ip == sink_ip {
            return Err(QueryError::InvalidEndpoints(source_ip.to_string()));
        }
        let view = ActiveView::build(&self.store, WeightKind::Bandwidth);
        let source = locate(&view, source_ip)?;
        let sink = locate(&view, sink_ip)?;
        Ok(analysis::maximum_flow(&view, source, sink))
    }
}

fn locate(view: &ActiveView, ip: &str) -> Result<usize, QueryError> {
    view.locate(ip)
        .ok_or_else(|| QueryError::EndpointUnavailable(ip.to_string()))
}
