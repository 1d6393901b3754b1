//! Comparative benchmark of traffic-signal control strategies.
//!
//! The crate generates synthetic performance samples for three signal
//! control strategies (fixed-time, rule-based, RL-based), runs descriptive
//! and inferential statistics over them, and simulates a small grid network
//! of coupled intersections to compare phase-selection policies.
//!
//! Everything is synchronous and in-process: callers pass plain numeric
//! slices and records in, and get plain result records back.

pub mod analysis;
pub mod comparison;
pub mod network;
pub mod report;
pub mod sampling;
pub mod scenario;
pub mod strategy;
