use crate::light::Lights;
use crate::scenario::Scenario;
use crate::vehicle::Hsl;

/// A read-only view of one scenario, taken after a tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Frame {
    /// The scenario being simulated.
    pub scenario: Scenario,
    /// The number of running ticks so far.
    pub tick: usize,
    /// The lamps currently lit.
    pub lights: Lights,
    /// The number of vehicles past the checkpoint line.
    pub exited: usize,
    /// The vehicles, lead vehicle first.
    pub vehicles: Vec<VehicleView>,
}

/// The displayed parts of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleView {
    pub distance: f64,
    pub width: f64,
    pub speed: f64,
    pub color: Hsl,
}
