//! Connection records: the edge payload of the network graph.

use serde::{Deserialize, Serialize};

/// An undirected link between two pieces of equipment.
///
/// Endpoint order carries no routing meaning; it only echoes the source
/// data. A connection stores no status of its own: it is active exactly when
/// both endpoints are active at the moment a query evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// IP key of the endpoint listed first in the source data.
    pub source_ip: String,
    /// IP key of the endpoint listed second.
    pub target_ip: String,
    /// Link technology label, e.g. "fiber" or "satellite".
    pub link_type: String,
    /// Capacity in Mbps; the weight used by max-flow.
    pub bandwidth: u32,
    /// Latency in milliseconds; the weight used by routing and the spanning
    /// forest.
    pub latency: u32,
    /// Observed error rate, informational.
    pub error_rate: f64,
}

impl Connection {
    pub fn new(
        source_ip: &str,
        target_ip: &str,
        link_type: &str,
        bandwidth: u32,
        latency: u32,
        error_rate: f64,
    ) -> Self {
        Self {
            source_ip: source_ip.to_string(),
            target_ip: target_ip.to_string(),
            link_type: link_type.to_string(),
            bandwidth,
            latency,
            error_rate,
        }
    }
}
