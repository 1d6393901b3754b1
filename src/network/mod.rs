//! Toy grid-network traffic model: a g-by-g lattice of intersections with
//! four directional queues each, coupled through fixed-influence
//! connections and ticked by a discrete-step simulation.

pub mod grid;
pub mod intersection;
pub mod simulation;

pub use grid::{create_network_connections, GridNetwork, NetworkConnection};
pub use intersection::{Axis, Direction, IntersectionId, IntersectionState, LightState};
pub use simulation::{NetworkMetrics, NetworkSimulation, SignalPolicy};
