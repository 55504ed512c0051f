//! The shared go control.

/// An edge of the go control, delivered to every scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoInput {
    /// The control was pressed down.
    Press,
    /// The control was let go.
    Release,
}

/// A raw key report from the input device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyReport {
    Press,
    Repeat,
    Release,
}

/// The single source of go inputs.
///
/// Converts raw key reports into press/release edges. Devices that never
/// report key releases get a synthetic release at the next tick boundary.
#[derive(Clone, Debug)]
pub struct GoButton {
    /// Whether the control is currently held.
    held: bool,
    /// Whether the device reports key releases.
    reports_release: bool,
}

impl GoButton {
    /// Creates a go button for a device that does or does not report key releases.
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: false,
            reports_release,
        }
    }

    /// Whether the control is currently held.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Converts a key report into an edge, if it is one.
    pub fn report(&mut self, report: KeyReport) -> Option<GoInput> {
        match (report, self.held) {
            (KeyReport::Press, false) => {
                self.held = true;
                Some(GoInput::Press)
            }
            (KeyReport::Release, true) => {
                self.held = false;
                Some(GoInput::Release)
            }
            _ => None,
        }
    }

    /// Called at each tick boundary. Returns the synthetic release owed
    /// by devices that cannot report one.
    pub fn on_tick(&mut self) -> Option<GoInput> {
        if !self.reports_release && self.held {
            self.held = false;
            return Some(GoInput::Release);
        }
        None
    }
}
