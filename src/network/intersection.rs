use rand::Rng;
use serde::{Deserialize, Serialize};

/// A unique identifier for an intersection, using (row, col) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntersectionId(pub u8, pub u8);

/// Approach directions at an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Stable index into the per-direction arrays.
    pub fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::NorthSouth,
            Direction::East | Direction::West => Axis::EastWest,
        }
    }
}

/// The two signal axes; opposing directions always share a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

impl Axis {
    pub fn other(&self) -> Axis {
        match self {
            Axis::NorthSouth => Axis::EastWest,
            Axis::EastWest => Axis::NorthSouth,
        }
    }
}

/// The possible states for a signal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

impl LightState {
    pub fn is_green(&self) -> bool {
        matches!(self, LightState::Green)
    }
}

/// Mutable per-intersection simulation state.
///
/// Created at network initialization with randomized flow seeds, mutated
/// once per tick by the step function, discarded when the simulation is
/// reset or reconfigured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntersectionState {
    pub id: IntersectionId,
    /// Current arrival rate per approach direction (vehicles/tick).
    pub flow_rates: [f64; 4],
    /// Queued vehicles per approach direction; never negative.
    pub queues: [f64; 4],
    /// Signal phase per approach direction; N/S and E/W pairs are always
    /// complementary.
    pub phases: [LightState; 4],
    /// Cumulative vehicle-ticks spent queued.
    pub total_waiting_time: f64,
    /// Cumulative vehicles released through the intersection.
    pub total_throughput: f64,
}

impl IntersectionState {
    /// Creates an intersection with randomized initial flow rates and the
    /// north-south axis green.
    pub fn new<R: Rng + ?Sized>(id: IntersectionId, rng: &mut R) -> Self {
        let mut state = Self {
            id,
            flow_rates: [0.0; 4],
            queues: [0.0; 4],
            phases: [LightState::Red; 4],
            total_waiting_time: 0.0,
            total_throughput: 0.0,
        };
        for slot in state.flow_rates.iter_mut() {
            *slot = rng.random_range(1.0..5.0);
        }
        state.set_green_axis(Axis::NorthSouth);
        state
    }

    /// Switches the green axis, keeping opposing phases complementary.
    pub fn set_green_axis(&mut self, axis: Axis) {
        for direction in Direction::ALL {
            self.phases[direction.index()] = if direction.axis() == axis {
                LightState::Green
            } else {
                LightState::Red
            };
        }
    }

    /// The axis currently showing green.
    pub fn green_axis(&self) -> Axis {
        if self.phases[Direction::North.index()].is_green() {
            Axis::NorthSouth
        } else {
            Axis::EastWest
        }
    }

    pub fn phase(&self, direction: Direction) -> LightState {
        self.phases[direction.index()]
    }

    /// Adds vehicles to a directional queue, clamped at zero from below.
    pub fn add_to_queue(&mut self, direction: Direction, amount: f64) {
        let slot = &mut self.queues[direction.index()];
        *slot = (*slot + amount).max(0.0);
    }

    /// Total queued vehicles across all four approaches.
    pub fn queue_total(&self) -> f64 {
        self.queues.iter().sum()
    }

    /// Queued vehicles on one axis.
    pub fn axis_queue(&self, axis: Axis) -> f64 {
        Direction::ALL
            .iter()
            .filter(|d| d.axis() == axis)
            .map(|d| self.queues[d.index()])
            .sum()
    }

    /// Throughput per queued vehicle; the +1 keeps an empty intersection
    /// from dividing by zero.
    pub fn efficiency(&self) -> f64 {
        self.total_throughput / (self.queue_total() + 1.0)
    }
}
