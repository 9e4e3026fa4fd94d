//! # Nettopo - Network topology analysis engine
//!
//! This library models a small computer network as an undirected graph of
//! equipment and links, and answers connectivity and capacity questions
//! about it.
//!
//! ## Overview
//!
//! A network snapshot is loaded from delimited text files into an in-memory
//! graph. Queries never run against the raw graph: each one first derives a
//! view containing only active equipment and usable links, so flipping one
//! status flag is enough to model an outage and every query immediately
//! reflects it.
//!
//! ## Key Features
//!
//! - **Reachability**: constant-time up/down checks by IP address
//! - **Routing**: lowest-latency routes between any two pieces of equipment
//! - **Backbone Planning**: minimum-latency spanning forest of everything active
//! - **Capacity**: maximum sustainable throughput between two endpoints
//! - **Deterministic**: equal-cost alternatives always resolve the same way
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `model`: equipment and connection records
//! - `graph`: the populated store and the per-query active view
//! - `analysis`: the pure graph algorithms behind each query
//! - `engine`: the query facade mapping IP keys to answers or errors
//! - `config`: YAML run configuration naming the data files
//! - `loader`: delimited text parsing into model records
//! - `report`: text, JSON, and GraphViz renderings of query results
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use nettopo::engine::NetworkEngine;
//! use nettopo::{config, loader};
//!
//! // Load the snapshot named by the run configuration
//! let cfg = config::load_config(Path::new("network.yaml"))?;
//! let equipment = loader::load_equipment(&cfg.hosts, &cfg.routers)?;
//! let links = loader::load_connections(&cfg.links)?;
//! let (engine, _warnings) = NetworkEngine::new(equipment, links)?;
//!
//! // Ask for the lowest-latency route between two addresses
//! let route = engine.shortest_path("192.168.1.10", "10.0.0.5")?;
//! for hop in &route {
//!     println!("{} ({})", hop.id, hop.ip);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Data Format
//!
//! Snapshots are three `;`-delimited text files, one record per line:
//!
//! ```text
//! # hosts.txt         id;ip;mac;active;location
//! PC1;192.168.1.10;AA:BB:CC:00:00:01;true;Lab A
//!
//! # routers.txt       id;ip;mac;active;location;model;firmware;throughput
//! R1;10.0.0.1;AA:BB:CC:00:00:FF;true;Closet;C2901;15.1;1000
//!
//! # links.txt         source_ip;target_ip;link_type;bandwidth;latency;error_rate
//! 192.168.1.10;10.0.0.1;ethernet;100;5;0.01
//! ```
//!
//! ## Error Handling
//!
//! Query methods return a typed [`engine::QueryError`] distinguishing
//! unknown equipment, unavailable endpoints, missing routes, and malformed
//! queries. Loading functions use `color_eyre` and report the file and line
//! that caused a failure.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod graph;
pub mod loader;
pub mod model;
pub mod report;
