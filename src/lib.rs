pub use board::Board;
pub use frame::{Frame, VehicleView};
pub use input::{GoButton, GoInput, KeyReport};
pub use light::{LightState, Lights, SignalController, TickPhase, CYCLE_LENGTH};
pub use platoon::{PassSummary, Platoon, PLATOON_SIZE};
pub use scenario::{ConfigError, Scenario, DEFAULT_SCENARIOS};
pub use simulation::{Simulation, StepOutcome};
use slotmap::new_key_type;
pub use slotmap::{Key, KeyData};
pub use ticker::{Ticker, DEFAULT_INTERVAL};
pub use util::Interval;
pub use vehicle::{Hsl, Vehicle, VehicleAction, VehicleAttributes};

mod board;
mod debug;
mod frame;
mod input;
mod light;
mod platoon;
pub mod scenario;
mod simulation;
mod ticker;
mod util;
mod vehicle;

new_key_type! {
    /// Unique ID of a [Simulation] on a [Board].
    pub struct ScenarioId;
}
