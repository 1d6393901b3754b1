use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::network::intersection::{Direction, IntersectionId, IntersectionState};

/// Fraction of released green-phase traffic that spills into the
/// downstream neighbour.
pub const FLOW_INFLUENCE: f64 = 0.3;

/// A directed edge between two adjacent intersections. Created once at
/// network setup from grid adjacency, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetworkConnection {
    pub from: IntersectionId,
    pub to: IntersectionId,
    /// Travel direction from `from` to `to`.
    pub direction: Direction,
    pub influence: f64,
}

/// Builds the directed adjacency for a `grid_size` x `grid_size` lattice.
///
/// Every horizontally or vertically adjacent pair contributes one edge per
/// direction, so the result holds exactly `2 * g * (g - 1) * 2` connections.
pub fn create_network_connections(grid_size: u8) -> Vec<NetworkConnection> {
    let mut connections = Vec::new();
    for row in 0..grid_size {
        for col in 0..grid_size {
            let here = IntersectionId(row, col);
            if col + 1 < grid_size {
                let east = IntersectionId(row, col + 1);
                connections.push(NetworkConnection {
                    from: here,
                    to: east,
                    direction: Direction::East,
                    influence: FLOW_INFLUENCE,
                });
                connections.push(NetworkConnection {
                    from: east,
                    to: here,
                    direction: Direction::West,
                    influence: FLOW_INFLUENCE,
                });
            }
            if row + 1 < grid_size {
                let south = IntersectionId(row + 1, col);
                connections.push(NetworkConnection {
                    from: here,
                    to: south,
                    direction: Direction::South,
                    influence: FLOW_INFLUENCE,
                });
                connections.push(NetworkConnection {
                    from: south,
                    to: here,
                    direction: Direction::North,
                    influence: FLOW_INFLUENCE,
                });
            }
        }
    }
    connections
}

/// The full lattice: intersections keyed by (row, col) plus the immutable
/// connection list.
#[derive(Debug, Clone)]
pub struct GridNetwork {
    pub size: u8,
    pub intersections: HashMap<IntersectionId, IntersectionState>,
    pub connections: Vec<NetworkConnection>,
}

impl GridNetwork {
    /// Initializes a `size` x `size` network with randomized flow seeds.
    pub fn new<R: Rng + ?Sized>(size: u8, rng: &mut R) -> Self {
        let mut intersections = HashMap::new();
        for row in 0..size {
            for col in 0..size {
                let id = IntersectionId(row, col);
                intersections.insert(id, IntersectionState::new(id, rng));
            }
        }
        GridNetwork {
            size,
            intersections,
            connections: create_network_connections(size),
        }
    }

    pub fn get_intersection(&self, id: &IntersectionId) -> Option<&IntersectionState> {
        self.intersections.get(id)
    }

    /// Total queued vehicles across the whole network.
    pub fn total_vehicles(&self) -> f64 {
        self.intersections.values().map(|i| i.queue_total()).sum()
    }

    /// Cumulative released vehicles across the whole network.
    pub fn total_throughput(&self) -> f64 {
        self.intersections
            .values()
            .map(|i| i.total_throughput)
            .sum()
    }

    /// Cumulative vehicle-ticks spent queued across the whole network.
    pub fn total_waiting_time(&self) -> f64 {
        self.intersections
            .values()
            .map(|i| i.total_waiting_time)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn connection_count_matches_lattice_formula() {
        for g in [2u8, 3, 4] {
            let connections = create_network_connections(g);
            let expected = 2 * g as usize * (g as usize - 1) * 2;
            assert_eq!(connections.len(), expected, "grid size {g}");
        }
    }

    #[test]
    fn two_by_two_grid_has_four_bidirectional_pairs() {
        let connections = create_network_connections(2);
        assert_eq!(connections.len(), 8);
        // Every edge has its reverse.
        for c in &connections {
            assert!(connections
                .iter()
                .any(|r| r.from == c.to && r.to == c.from && r.direction == c.direction.opposite()));
        }
    }

    #[test]
    fn connections_link_adjacent_cells_only() {
        for c in create_network_connections(4) {
            let dr = (c.from.0 as i16 - c.to.0 as i16).abs();
            let dc = (c.from.1 as i16 - c.to.1 as i16).abs();
            assert_eq!(dr + dc, 1);
            assert_eq!(c.influence, FLOW_INFLUENCE);
        }
    }

    #[test]
    fn network_holds_every_lattice_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let network = GridNetwork::new(3, &mut rng);
        assert_eq!(network.intersections.len(), 9);
        assert!(network
            .get_intersection(&IntersectionId(2, 2))
            .is_some());
        assert!(network.get_intersection(&IntersectionId(3, 0)).is_none());
    }
}
