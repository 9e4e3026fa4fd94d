//! Data model for the topology: equipment records and the links between them.

pub mod connection;
pub mod equipment;

pub use connection::Connection;
pub use equipment::{Equipment, EquipmentKind};
