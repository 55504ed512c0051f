use crate::debug::debug_vehicle;
use crate::vehicle::{Hsl, Vehicle, VehicleAction, VehicleAttributes};
use log::trace;

/// The number of vehicles queued in each platoon.
pub const PLATOON_SIZE: usize = 50;

/// An ordered queue of vehicles approaching the checkpoint.
/// Index 0 is the lead vehicle, nearest the checkpoint line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Platoon {
    vehicles: Vec<Vehicle>,
}

/// A summary of one update pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub blocked: usize,
    pub reacting: usize,
    pub moved: usize,
}

impl Platoon {
    /// Creates a stationary platoon of `count` vehicles, each spaced
    /// `initial_gap` behind the rear of the one ahead.
    pub fn new(attributes: &VehicleAttributes, count: usize, initial_gap: f64) -> Self {
        let vehicles = (0..count)
            .map(|i| {
                let distance = i as f64 * (attributes.width + initial_gap);
                Vehicle::new(attributes, distance, Hsl::for_index(i))
            })
            .collect();
        Self { vehicles }
    }

    /// The vehicles in order, lead vehicle first.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The number of vehicles in the platoon.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the platoon has no vehicles.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// The number of vehicles currently past the checkpoint line.
    /// This is recomputed on every call; exited vehicles stay in the platoon.
    pub fn exited_count(&self) -> usize {
        self.vehicles.iter().filter(|veh| veh.has_exited()).count()
    }

    /// Applies one update pass to every vehicle.
    ///
    /// Each vehicle sees the state of the vehicle ahead from before the pass,
    /// and the new states replace the old ones all at once.
    pub fn step(&mut self) -> PassSummary {
        let mut summary = PassSummary::default();
        let next: Vec<Vehicle> = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(idx, vehicle)| {
                let ahead = idx.checked_sub(1).map(|i| &self.vehicles[i]);
                let (next, action) = vehicle.advance(ahead);
                match action {
                    VehicleAction::Blocked => {
                        trace!("vehicle {} blocked at {}", idx, next.distance());
                        debug_vehicle(
                            "blocked",
                            idx,
                            next.distance(),
                            next.speed(),
                            next.reaction_delay(),
                        );
                        summary.blocked += 1;
                    }
                    VehicleAction::Reacting => {
                        trace!("vehicle {} reacting, {} ticks left", idx, next.reaction_delay());
                        debug_vehicle(
                            "reacting",
                            idx,
                            next.distance(),
                            next.speed(),
                            next.reaction_delay(),
                        );
                        summary.reacting += 1;
                    }
                    VehicleAction::Moved => {
                        debug_vehicle("moved", idx, next.distance(), next.speed(), 0);
                        summary.moved += 1;
                    }
                }
                next
            })
            .collect();
        self.vehicles = next;
        summary
    }
}
