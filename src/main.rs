use clap::{Parser, Subcommand};
use color_eyre::eyre::bail;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;

use nettopo::config;
use nettopo::engine::NetworkEngine;
use nettopo::loader;
use nettopo::report;

/// Topology analysis queries over a loaded network snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration naming the data files
    #[arg(short, long, default_value = "network.yaml")]
    config: PathBuf,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Check whether a piece of equipment currently answers
    Ping {
        /// IP address of the equipment
        ip: String,
    },
    /// Lowest-latency route between two pieces of equipment
    Traceroute {
        /// IP address of the starting equipment
        source: String,
        /// IP address of the destination equipment
        dest: String,
    },
    /// Minimum-latency backbone spanning all active equipment
    Mst,
    /// Maximum sustainable throughput between two pieces of equipment
    MaxFlow {
        /// IP address of the sending equipment
        source: String,
        /// IP address of the receiving equipment
        sink: String,
    },
    /// List the loaded equipment and links
    Show {
        /// Restrict the listing to active equipment and usable links
        #[arg(long)]
        active_only: bool,
    },
    /// Emit the topology as GraphViz DOT
    Dot,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = config::load_config(&args.config)?;
    let equipment = loader::load_equipment(&config.hosts, &config.routers)?;
    let connections = loader::load_connections(&config.links)?;

    let (engine, warnings) = NetworkEngine::new(equipment, connections)?;
    if !warnings.is_empty() {
        warn!(
            "{} link records were skipped while assembling the graph",
            warnings.len()
        );
    }
    info!(
        "Topology ready: {} equipment, {} links",
        engine.graph().equipment_count(),
        engine.graph().link_count()
    );

    match &args.command {
        Command::Ping { ip } => {
            let reachable = engine.is_reachable(ip)?;
            let id = engine
                .graph()
                .equipment(ip)
                .map(|e| e.id.clone())
                .unwrap_or_default();
            let ping = report::PingReport {
                id,
                ip: ip.clone(),
                reachable,
            };
            emit(args.json, &ping, report::render_ping(&ping))?;
        }
        Command::Traceroute { source, dest } => {
            if source == dest {
                bail!("source and destination must name different equipment");
            }
            let hops = engine.shortest_path(source, dest)?;
            let route = report::route_report(engine.graph(), hops);
            emit(args.json, &route, report::render_route(&route))?;
        }
        Command::Mst => {
            let links = engine.minimum_spanning_forest();
            let forest = report::forest_report(engine.graph(), links);
            emit(args.json, &forest, report::render_forest(&forest))?;
        }
        Command::MaxFlow { source, sink } => {
            let max_flow_mbps = engine.maximum_flow(source, sink)?;
            let flow = report::FlowReport {
                source: source.clone(),
                sink: sink.clone(),
                max_flow_mbps,
            };
            emit(args.json, &flow, report::render_flow(&flow))?;
        }
        Command::Show { active_only } => {
            let listing = report::topology_report(engine.graph(), *active_only);
            emit(args.json, &listing, report::render_topology(&listing))?;
        }
        Command::Dot => {
            // DOT is already a machine format; the json flag does not apply.
            println!("{}", report::render_dot(engine.graph()));
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: String) -> Result<()> {
    if json {
        println!("{}", report::to_json(value)?);
    } else {
        println!("{text}");
    }
    Ok(())
}
