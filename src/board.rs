use crate::frame::Frame;
use crate::input::GoInput;
use crate::scenario::Scenario;
use crate::simulation::{Simulation, StepOutcome};
use crate::ticker::Ticker;
use crate::ScenarioId;
use log::debug;
use slotmap::SlotMap;
use std::time::{Duration, Instant};

/// A set of independent checkpoint simulations sharing one go control.
#[derive(Default)]
pub struct Board {
    /// The simulations and their timers.
    instances: SlotMap<ScenarioId, Instance>,
    /// Scenario IDs in creation order.
    order: Vec<ScenarioId>,
}

/// A simulation together with the timer that drives it.
struct Instance {
    sim: Simulation,
    ticker: Ticker,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates one simulation per scenario, each with its own timer.
    pub fn from_scenarios(scenarios: &[Scenario], period: Duration, start: Instant) -> Self {
        let mut board = Self::new();
        for scenario in scenarios {
            board.add(Simulation::new(*scenario), period, start);
        }
        board
    }

    /// Adds a simulation to the board.
    pub fn add(&mut self, sim: Simulation, period: Duration, start: Instant) -> ScenarioId {
        let id = self.instances.insert(Instance {
            sim,
            ticker: Ticker::new(period, start),
        });
        self.order.push(id);
        id
    }

    /// Removes a simulation and its timer from the board.
    pub fn remove(&mut self, id: ScenarioId) -> Option<Simulation> {
        let instance = self.instances.remove(id)?;
        self.order.retain(|other| *other != id);
        debug!("removed scenario {:?}", instance.sim.scenario());
        Some(instance.sim)
    }

    /// The number of simulations on the board.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the board has no simulations.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Gets a reference to the simulation with the given ID.
    pub fn get(&self, id: ScenarioId) -> Option<&Simulation> {
        self.instances.get(id).map(|instance| &instance.sim)
    }

    /// Returns an iterator over the simulations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioId, &Simulation)> {
        self.order
            .iter()
            .map(move |id| (*id, &self.instances[*id].sim))
    }

    /// Delivers an edge of the go control to every simulation.
    pub fn broadcast(&mut self, input: &GoInput) {
        debug!("go control {:?}", input);
        for (_, instance) in &mut self.instances {
            instance.sim.handle_input(input);
        }
    }

    /// Steps every simulation once, ignoring their timers.
    pub fn step_all(&mut self) -> Vec<(ScenarioId, StepOutcome)> {
        self.order
            .iter()
            .map(|id| (*id, self.instances[*id].sim.step()))
            .collect()
    }

    /// Steps every simulation whose timer is due at `now`.
    pub fn step_due(&mut self, now: Instant) -> Vec<(ScenarioId, StepOutcome)> {
        let mut stepped = vec![];
        for id in &self.order {
            let instance = &mut self.instances[*id];
            if instance.ticker.poll(now) {
                stepped.push((*id, instance.sim.step()));
            }
        }
        stepped
    }

    /// The earliest time any simulation's timer is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.instances
            .values()
            .map(|instance| instance.ticker.deadline())
            .min()
    }

    /// Whether every simulation is stopped at red.
    pub fn all_held(&self) -> bool {
        self.instances
            .values()
            .all(|instance| instance.sim.lights().holds_traffic())
    }

    /// Takes a frame of every simulation in creation order.
    pub fn frames(&self) -> Vec<Frame> {
        self.iter().map(|(_, sim)| sim.frame()).collect()
    }
}
