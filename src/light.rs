use crate::debug::debug_light;
use crate::input::GoInput;
use log::{debug, info};

/// The number of running ticks in one signal cycle.
pub const CYCLE_LENGTH: usize = 50;

/// Ticks within a cycle after which the light warns yellow.
pub const WARNING_AFTER: usize = 45;

/// The three lamps of the checkpoint signal.
///
/// The lamps are independent flags, but only the four combinations
/// named by [LightState] are ever produced by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lights {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
}

/// A named combination of lamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightState {
    /// Red only. Nothing moves.
    Stop,
    /// Red and yellow while the go control is held. Nothing moves yet.
    Armed,
    /// Yellow only, near the end of a cycle. Vehicles still move.
    Clearing,
    /// Green only.
    Go,
}

/// What the signal decided for a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPhase {
    /// Red is lit; the tick does nothing at all.
    Held,
    /// The cycle ends on this tick; the light turns red and vehicles stay put.
    CycleEnd,
    /// Vehicles are updated this tick.
    Run,
}

impl Lights {
    pub const STOP: Lights = Lights::from_state(LightState::Stop);
    pub const ARMED: Lights = Lights::from_state(LightState::Armed);
    pub const CLEARING: Lights = Lights::from_state(LightState::Clearing);
    pub const GO: Lights = Lights::from_state(LightState::Go);

    /// The lamps lit for a given state.
    pub const fn from_state(state: LightState) -> Self {
        use LightState::*;
        let (red, yellow, green) = match state {
            Stop => (true, false, false),
            Armed => (true, true, false),
            Clearing => (false, true, false),
            Go => (false, false, true),
        };
        Self { red, yellow, green }
    }

    /// The named state for this combination of lamps, if it has one.
    pub fn state(&self) -> Option<LightState> {
        use LightState::*;
        match (self.red, self.yellow, self.green) {
            (true, false, false) => Some(Stop),
            (true, true, false) => Some(Armed),
            (false, true, false) => Some(Clearing),
            (false, false, true) => Some(Go),
            _ => None,
        }
    }

    /// Whether vehicles are held this tick. Only red holds traffic.
    pub fn holds_traffic(&self) -> bool {
        self.red
    }
}

impl Default for Lights {
    fn default() -> Self {
        Self::STOP
    }
}

/// The checkpoint signal of one scenario.
#[derive(Clone, Debug, Default)]
pub struct SignalController {
    /// The lamps currently lit.
    lights: Lights,
}

impl SignalController {
    /// Creates a controller showing red.
    pub fn new() -> Self {
        Default::default()
    }

    /// The lamps currently lit.
    pub fn lights(&self) -> Lights {
        self.lights
    }

    /// Reacts to the go control. Holding it arms the light without releasing
    /// traffic; letting go turns the light green.
    pub fn handle_input(&mut self, input: &GoInput) {
        match input {
            GoInput::Press => self.set(Lights::ARMED, "armed"),
            GoInput::Release => self.set(Lights::GO, "go"),
        }
    }

    /// Decides what happens on a tick, given the number of running ticks so far.
    pub fn on_tick(&mut self, tick: usize) -> TickPhase {
        if self.lights.holds_traffic() {
            return TickPhase::Held;
        }
        if tick % CYCLE_LENGTH > WARNING_AFTER {
            self.set(Lights::CLEARING, "clearing");
        }
        if (tick + 1) % CYCLE_LENGTH == 0 {
            info!("cycle ended at tick {}", tick + 1);
            self.set(Lights::STOP, "stop");
            return TickPhase::CycleEnd;
        }
        TickPhase::Run
    }

    fn set(&mut self, lights: Lights, name: &str) {
        if lights != self.lights {
            debug!("signal {:?} -> {:?}", self.lights.state(), lights.state());
            debug_light(name, lights.red, lights.yellow, lights.green);
            self.lights = lights;
        }
    }
}
