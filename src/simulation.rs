#[cfg(feature = "debug")]
use crate::debug::take_debug_records;
use crate::frame::{Frame, VehicleView};
use crate::input::GoInput;
use crate::light::{Lights, SignalController, TickPhase, CYCLE_LENGTH};
use crate::platoon::{PassSummary, Platoon, PLATOON_SIZE};
use crate::scenario::Scenario;

/// A single checkpoint scenario: one signal and one platoon.
#[derive(Clone, Debug)]
pub struct Simulation {
    /// The configuration this simulation was created from.
    scenario: Scenario,
    /// The checkpoint signal.
    signal: SignalController,
    /// The vehicles queued at the checkpoint.
    platoon: Platoon,
    /// The number of running ticks so far. Does not advance while red.
    tick: usize,
    /// Debugging records made by input since the previous tick.
    #[cfg(feature = "debug")]
    pending: Vec<serde_json::Value>,
    /// Debugging information from the previously simulated tick.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

/// What a call to [Simulation::step] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The light was red; nothing changed.
    Held,
    /// The cycle ended and the light turned red; vehicles did not move.
    CycleEnd,
    /// The vehicles were updated.
    Advanced(PassSummary),
}

impl Simulation {
    /// Creates a simulation of a full platoon waiting at a red light.
    pub fn new(scenario: Scenario) -> Self {
        Self::with_platoon_size(scenario, PLATOON_SIZE)
    }

    /// Creates a simulation with a platoon of `count` vehicles.
    pub fn with_platoon_size(scenario: Scenario, count: usize) -> Self {
        Self {
            scenario,
            signal: SignalController::new(),
            platoon: Platoon::new(&scenario.vehicle_attributes(), count, scenario.initial_gap),
            tick: 0,
            #[cfg(feature = "debug")]
            pending: vec![],
            #[cfg(feature = "debug")]
            debug: Default::default(),
        }
    }

    /// Delivers an edge of the shared go control.
    pub fn handle_input(&mut self, input: &GoInput) {
        #[cfg(feature = "debug")]
        take_debug_records();

        self.signal.handle_input(input);

        #[cfg(feature = "debug")]
        self.pending.extend(take_debug_records());
    }

    /// Performs one timer firing.
    pub fn step(&mut self) -> StepOutcome {
        // Records left on this thread belong to no instance.
        #[cfg(feature = "debug")]
        take_debug_records();

        let outcome = match self.signal.on_tick(self.tick) {
            TickPhase::Held => StepOutcome::Held,
            TickPhase::CycleEnd => {
                self.tick += 1;
                StepOutcome::CycleEnd
            }
            TickPhase::Run => {
                self.tick += 1;
                StepOutcome::Advanced(self.platoon.step())
            }
        };

        #[cfg(feature = "debug")]
        {
            let mut records = std::mem::take(&mut self.pending);
            records.extend(take_debug_records());
            self.debug = serde_json::Value::Array(records);
        }

        outcome
    }

    /// The configuration this simulation was created from.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The number of running ticks so far.
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// The number of full signal cycles completed.
    pub fn cycles(&self) -> usize {
        self.tick / CYCLE_LENGTH
    }

    /// The lamps currently lit.
    pub fn lights(&self) -> Lights {
        self.signal.lights()
    }

    /// The vehicles queued at the checkpoint.
    pub fn platoon(&self) -> &Platoon {
        &self.platoon
    }

    /// The number of vehicles past the checkpoint line.
    pub fn exited_count(&self) -> usize {
        self.platoon.exited_count()
    }

    /// Takes a read-only view of the current state for display.
    pub fn frame(&self) -> Frame {
        Frame {
            scenario: self.scenario,
            tick: self.tick,
            lights: self.lights(),
            exited: self.exited_count(),
            vehicles: self
                .platoon
                .vehicles()
                .iter()
                .map(|veh| VehicleView {
                    distance: veh.distance(),
                    width: veh.width(),
                    speed: veh.speed(),
                    color: veh.color(),
                })
                .collect(),
        }
    }

    /// Gets the debugging information for the previously simulated tick as a JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&self) -> serde_json::Value {
        self.debug.clone()
    }
}
