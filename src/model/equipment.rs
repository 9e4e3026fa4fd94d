//! Equipment records: the vertex payload of the network graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role-specific fields of a piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EquipmentKind {
    /// End-user workstation or server.
    Host,
    /// Forwarding equipment with hardware details.
    Router {
        model: String,
        firmware: String,
        /// Rated throughput in Mbps.
        throughput: u32,
    },
}

/// A piece of network equipment.
///
/// Identity (`id`, `ip`) is fixed once loaded. The `active` flag simulates
/// administrative up/down state and may change between queries, but only
/// through the engine's status entry point; everything else treats equipment
/// records as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Human-facing identifier, e.g. "PC17" or "Router3".
    pub id: String,
    /// IP address; the unique lookup key across the topology.
    pub ip: String,
    /// Hardware (MAC) address, informational.
    pub mac: String,
    /// Administrative/operational status.
    pub active: bool,
    /// Physical location label.
    pub location: String,
    /// Host/Router tag with role-specific fields.
    pub kind: EquipmentKind,
}

impl Equipment {
    /// Create a host record.
    pub fn host(id: &str, ip: &str, mac: &str, active: bool, location: &str) -> Self {
        Self {
            id: id.to_string(),
            ip: ip.to_string(),
            mac: mac.to_string(),
            active,
            location: location.to_string(),
            kind: EquipmentKind::Host,
        }
    }

    /// Create a router record.
    #[allow(clippy::too_many_arguments)]
    pub fn router(
        id: &str,
        ip: &str,
        mac: &str,
        active: bool,
        location: &str,
        model: &str,
        firmware: &str,
        throughput: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            ip: ip.to_string(),
            mac: mac.to_string(),
            active,
            location: location.to_string(),
            kind: EquipmentKind::Router {
                model: model.to_string(),
                firmware: firmware.to_string(),
                throughput,
            },
        }
    }

    /// Returns true if this equipment is a router.
    pub fn is_router(&self) -> bool {
        matches!(self.kind, EquipmentKind::Router { .. })
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.active { "up" } else { "down" };
        match &self.kind {
            EquipmentKind::Host => write!(
                f,
                "{} ({}, {}) host @ {}",
                self.id, self.ip, state, self.location
            ),
            EquipmentKind::Router {
                model,
                firmware,
                throughput,
            } => write!(
                f,
                "{} ({}, {}) router {} fw {} {} Mbps @ {}",
                self.id, self.ip, state, model, firmware, throughput, self.location
            ),
        }
    }
}
