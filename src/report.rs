//! Rendering query results for people and for machines.
//!
//! Each query gets a small report struct that both the text and the JSON
//! renderings are produced from, so the two outputs never disagree about
//! what was computed.

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::engine::{ForestLink, PathHop};
use crate::graph::GraphStore;
use crate::model::Equipment;

/// Reachability answer for one equipment.
#[derive(Debug, Clone, Serialize)]
pub struct PingReport {
    pub id: String,
    pub ip: String,
    pub reachable: bool,
}

/// A computed route with its leg and total costs.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub source: String,
    pub dest: String,
    pub hops: Vec<PathHop>,
    /// Latency of each traversed link, one entry per hop after the first.
    pub leg_latencies_ms: Vec<u64>,
    pub total_latency_ms: u64,
}

/// The minimum spanning forest with summary figures.
#[derive(Debug, Clone, Serialize)]
pub struct ForestReport {
    pub links: Vec<ForestLink>,
    pub total_latency_ms: u64,
    pub trees: usize,
}

/// A computed maximum flow.
#[derive(Debug, Clone, Serialize)]
pub struct FlowReport {
    pub source: String,
    pub sink: String,
    pub max_flow_mbps: u64,
}

/// One link row in a topology listing, with its activity as evaluated now.
#[derive(Debug, Clone, Serialize)]
pub struct LinkRow {
    pub source_ip: String,
    pub target_ip: String,
    pub link_type: String,
    pub bandwidth_mbps: u32,
    pub latency_ms: u32,
    pub error_rate: f64,
    pub active: bool,
}

/// Full topology listing.
#[derive(Debug, Clone, Serialize)]
pub struct TopologyReport {
    pub equipment: Vec<Equipment>,
    pub links: Vec<LinkRow>,
}

/// Serialize any report as pretty JSON.
pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
}

/// Assemble a route report, pricing each leg from the store.
pub fn route_report(store: &GraphStore, hops: Vec<PathHop>) -> RouteReport {
    let leg_latencies_ms: Vec<u64> = hops
        .windows(2)
        .map(|pair| {
            store
                .link_between(&pair[0].ip, &pair[1].ip)
                .map(|conn| u64::from(conn.latency))
                .unwrap_or(0)
        })
        .collect();
    RouteReport {
        source: hops.first().map(|h| h.ip.clone()).unwrap_or_default(),
        dest: hops.last().map(|h| h.ip.clone()).unwrap_or_default(),
        total_latency_ms: leg_latencies_ms.iter().sum(),
        hops,
        leg_latencies_ms,
    }
}

/// Assemble a forest report. Every active equipment roots a tree, so the
/// tree count is active equipment minus selected links.
pub fn forest_report(store: &GraphStore, links: Vec<ForestLink>) -> ForestReport {
    let active = store.iter_equipment().filter(|e| e.active).count();
    ForestReport {
        total_latency_ms: links.iter().map(|l| u64::from(l.latency)).sum(),
        trees: active.saturating_sub(links.len()),
        links,
    }
}

/// Assemble the topology listing, optionally restricted to what is active.
pub fn topology_report(store: &GraphStore, active_only: bool) -> TopologyReport {
    let equipment: Vec<Equipment> = store
        .iter_equipment()
        .filter(|e| !active_only || e.active)
        .cloned()
        .collect();
    let links: Vec<LinkRow> = store
        .iter_links()
        .map(|conn| LinkRow {
            source_ip: conn.source_ip.clone(),
            target_ip: conn.target_ip.clone(),
            link_type: conn.link_type.clone(),
            bandwidth_mbps: conn.bandwidth,
            latency_ms: conn.latency,
            error_rate: conn.error_rate,
            active: store.link_active(conn),
        })
        .filter(|row| !active_only || row.active)
        .collect();
    TopologyReport { equipment, links }
}

/// One line: up or down.
pub fn render_ping(report: &PingReport) -> String {
    format!(
        "{} ({}) is {}",
        report.id,
        report.ip,
        if report.reachable { "up" } else { "down" }
    )
}

/// Numbered hop-by-hop route listing with per-leg latencies.
pub fn render_route(report: &RouteReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "Route {} -> {} ({} hops, {} ms total):",
        report.source,
        report.dest,
        report.hops.len(),
        report.total_latency_ms
    ));
    for (i, hop) in report.hops.iter().enumerate() {
        match i.checked_sub(1).and_then(|leg| report.leg_latencies_ms.get(leg)) {
            Some(leg) => lines.push(format!(
                "  {}. {} ({})  [{} ms]",
                i + 1,
                hop.id,
                hop.ip,
                leg
            )),
            None => lines.push(format!("  {}. {} ({})", i + 1, hop.id, hop.ip)),
        }
    }
    lines.join("\n")
}

/// Forest listing with summary line.
pub fn render_forest(report: &ForestReport) -> String {
    if report.links.is_empty() {
        return "Minimum spanning forest: no usable links in the active topology".to_string();
    }
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "Minimum spanning forest: {} links, {} trees, {} ms total",
        report.links.len(),
        report.trees,
        report.total_latency_ms
    ));
    for link in &report.links {
        lines.push(format!(
            "  {} -- {}  [{} ms]",
            link.endpoint_a, link.endpoint_b, link.latency
        ));
    }
    lines.join("\n")
}

/// One line: the flow value, flagging the disconnected case.
pub fn render_flow(report: &FlowReport) -> String {
    let mut line = format!(
        "Maximum flow {} -> {}: {} Mbps",
        report.source, report.sink, report.max_flow_mbps
    );
    if report.max_flow_mbps == 0 {
        line.push_str(" (no active route)");
    }
    line
}

/// Equipment and link listing.
pub fn render_topology(report: &TopologyReport) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Equipment ({}):", report.equipment.len()));
    for item in &report.equipment {
        lines.push(format!("  {}", item));
    }
    lines.push(String::new());
    lines.push(format!("Links ({}):", report.links.len()));
    for link in &report.links {
        lines.push(format!(
            "  {} -- {}  {}  {} Mbps  {} ms  err {:.3}  {}",
            link.source_ip,
            link.target_ip,
            link.link_type,
            link.bandwidth_mbps,
            link.latency_ms,
            link.error_rate,
            if link.active { "up" } else { "down" }
        ));
    }
    lines.join("\n")
}

/// Generate GraphViz DOT format for visualization.
pub fn render_dot(store: &GraphStore) -> String {
    let mut dot = String::new();
    dot.push_str("graph topology {\n");
    dot.push_str("    label=\"Network topology\";\n");
    dot.push_str("    labelloc=t;\n");
    dot.push_str("    node [style=filled];\n\n");

    for item in store.iter_equipment() {
        let color = if !item.active {
            "red"
        } else if item.is_router() {
            "gold"
        } else {
            "lightblue"
        };
        let shape = if item.is_router() { "box" } else { "ellipse" };
        dot.push_str(&format!(
            "    \"{}\" [label=\"{}\\n{}\", shape={}, fillcolor={}];\n",
            item.id, item.id, item.ip, shape, color
        ));
    }

    dot.push('\n');

    for conn in store.iter_links() {
        let id_of = |ip: &str| {
            store
                .equipment(ip)
                .map(|e| e.id.clone())
                .unwrap_or_else(|| ip.to_string())
        };
        let style = if store.link_active(conn) {
            "solid"
        } else {
            "dashed"
        };
        dot.push_str(&format!(
            "    \"{}\" -- \"{}\" [label=\"{} ms / {} Mbps\", style={}];\n",
            id_of(&conn.source_ip),
            id_of(&conn.target_ip),
            conn.latency,
            conn.bandwidth,
            style
        ));
    }

    dot.push_str("}\n");
    dot
}
