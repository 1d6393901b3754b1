use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::network::grid::GridNetwork;
use crate::network::intersection::{Axis, Direction, IntersectionId};
use crate::strategy::ControlStrategy;

/// Maximum vehicles released per green direction per tick.
pub const SATURATION_FLOW: f64 = 8.0;
/// Ticks per half-cycle of the fixed alternation policy.
pub const FIXED_CYCLE_TICKS: u64 = 30;
/// Cap on vehicles spilling into one neighbour per tick.
pub const MAX_PROPAGATION: f64 = 5.0;
/// A queue share above this ratio wins the axis under the ratio policy.
const QUEUE_RATIO_THRESHOLD: f64 = 0.5;

/// Phase-selection policy applied at every intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalPolicy {
    /// Alternate the green axis every [`FIXED_CYCLE_TICKS`] ticks.
    FixedCycle,
    /// Give green to the axis with the larger total queue.
    LongestQueue,
    /// Switch only when one axis holds more than half the total queue.
    QueueRatio,
}

impl SignalPolicy {
    /// The policy each control strategy stands in for.
    pub fn for_strategy(strategy: ControlStrategy) -> SignalPolicy {
        match strategy {
            ControlStrategy::FixedTime => SignalPolicy::FixedCycle,
            ControlStrategy::RuleBased => SignalPolicy::LongestQueue,
            ControlStrategy::ReinforcementLearning => SignalPolicy::QueueRatio,
        }
    }
}

/// Network-wide aggregates recomputed after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub tick: u64,
    /// Vehicles currently queued anywhere in the network.
    pub total_vehicles: f64,
    /// Cumulative vehicle-ticks queued per released vehicle.
    pub average_waiting_time: f64,
    /// Cumulative throughput per currently queued vehicle.
    pub network_efficiency: f64,
}

/// Discrete-step simulation over a [`GridNetwork`].
#[derive(Debug, Clone)]
pub struct NetworkSimulation {
    pub network: GridNetwork,
    pub policy: SignalPolicy,
    /// Global arrival scale in [0, 1].
    pub traffic_intensity: f64,
    tick: u64,
}

impl NetworkSimulation {
    pub fn new(network: GridNetwork, policy: SignalPolicy, traffic_intensity: f64) -> Self {
        Self {
            network,
            policy,
            traffic_intensity: traffic_intensity.clamp(0.0, 1.0),
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Advances the network by one time step and returns the recomputed
    /// aggregate metrics.
    ///
    /// Tick order: exogenous arrivals, phase selection, green-queue
    /// departures, queue refill from arrivals, neighbour propagation, then
    /// metric aggregation.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NetworkMetrics {
        // 1. Exogenous arrivals, scaled by the global intensity.
        for state in self.network.intersections.values_mut() {
            for slot in state.flow_rates.iter_mut() {
                *slot = rng.random_range(0.0..4.0) * self.traffic_intensity;
            }
        }

        // 2. Phase selection.
        let tick = self.tick;
        let policy = self.policy;
        for state in self.network.intersections.values_mut() {
            let green = match policy {
                SignalPolicy::FixedCycle => {
                    if (tick / FIXED_CYCLE_TICKS) % 2 == 0 {
                        Axis::NorthSouth
                    } else {
                        Axis::EastWest
                    }
                }
                SignalPolicy::LongestQueue => {
                    if state.axis_queue(Axis::EastWest) > state.axis_queue(Axis::NorthSouth) {
                        Axis::EastWest
                    } else {
                        Axis::NorthSouth
                    }
                }
                SignalPolicy::QueueRatio => {
                    let total = state.queue_total();
                    let current = state.green_axis();
                    if total > 0.0 && state.axis_queue(current.other()) / total
                        > QUEUE_RATIO_THRESHOLD
                    {
                        current.other()
                    } else {
                        current
                    }
                }
            };
            state.set_green_axis(green);
        }

        // 3. Departures from green queues, up to the saturation flow.
        let mut departures: HashMap<IntersectionId, [f64; 4]> = HashMap::new();
        for (id, state) in self.network.intersections.iter_mut() {
            let mut released = [0.0; 4];
            for direction in Direction::ALL {
                if state.phase(direction).is_green() {
                    let idx = direction.index();
                    let departed = state.queues[idx].min(SATURATION_FLOW);
                    state.queues[idx] = (state.queues[idx] - departed).max(0.0);
                    state.total_throughput += departed;
                    released[idx] = departed;
                }
            }
            departures.insert(*id, released);
        }

        // 4. Arriving flow joins the queues.
        for state in self.network.intersections.values_mut() {
            for direction in Direction::ALL {
                let arriving = state.flow_rates[direction.index()];
                state.add_to_queue(direction, arriving);
            }
        }

        // 5. Propagate a fraction of the released traffic into each
        //    neighbour's opposite-direction queue.
        for i in 0..self.network.connections.len() {
            let connection = self.network.connections[i];
            let released = departures
                .get(&connection.from)
                .map(|d| d[connection.direction.index()])
                .unwrap_or(0.0);
            if released <= 0.0 {
                continue;
            }
            let spill = (released * connection.influence).min(MAX_PROPAGATION);
            if let Some(neighbor) = self.network.intersections.get_mut(&connection.to) {
                neighbor.add_to_queue(connection.direction.opposite(), spill);
            }
        }

        // 6. Waiting counters and aggregate metrics.
        for state in self.network.intersections.values_mut() {
            state.total_waiting_time += state.queue_total();
        }

        self.tick += 1;
        self.metrics()
    }

    /// Runs `steps` ticks and collects the per-tick metric trace.
    pub fn run<R: Rng + ?Sized>(&mut self, steps: u64, rng: &mut R) -> Vec<NetworkMetrics> {
        (0..steps).map(|_| self.step(rng)).collect()
    }

    /// Aggregates the current network state.
    pub fn metrics(&self) -> NetworkMetrics {
        let total_vehicles = self.network.total_vehicles();
        let total_throughput = self.network.total_throughput();
        let total_waiting = self.network.total_waiting_time();
        NetworkMetrics {
            tick: self.tick,
            total_vehicles,
            average_waiting_time: total_waiting / (total_throughput + 1.0),
            network_efficiency: total_throughput / (total_vehicles + 1.0),
        }
    }
}
