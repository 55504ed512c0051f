use crate::util::Interval;

/// The length of every vehicle, in distance units.
pub const VEHICLE_WIDTH: f64 = 50.0;

/// The speed gained per tick by a moving vehicle.
pub const VEHICLE_ACCELERATION: f64 = 1.0;

/// A simulated vehicle waiting at, or driving through, the checkpoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// The display colour. Has no effect on the simulation.
    color: Hsl,
    /// The length of the vehicle along the road.
    width: f64,
    /// The offset of the vehicle's front from the checkpoint line.
    /// Decreases as the vehicle advances and becomes negative once past it.
    distance: f64,
    /// The distance covered per tick.
    speed: f64,
    /// The speed gained per moving tick.
    acceleration: f64,
    /// Ticks left to wait once the vehicle is free to move.
    reaction_delay: u32,
    /// The minimum clearance to the vehicle ahead before this one may move.
    require_gap: f64,
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug)]
pub struct VehicleAttributes {
    /// The vehicle length.
    pub width: f64,
    /// The speed gained per moving tick.
    pub acceleration: f64,
    /// The reaction delay in ticks.
    pub reaction_delay: u32,
    /// The minimum clearance to the vehicle ahead.
    pub require_gap: f64,
}

/// A colour in HSL space; hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// What a vehicle did during a single update pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleAction {
    /// The gap to the vehicle ahead was too small.
    Blocked,
    /// The vehicle was free to move but spent the tick reacting.
    Reacting,
    /// The vehicle advanced by its speed and accelerated.
    Moved,
}

impl Hsl {
    /// The colour given to the vehicle at `index` in a platoon.
    pub fn for_index(index: usize) -> Self {
        Self {
            hue: ((index * 12) % 360) as u16,
            saturation: 80,
            lightness: 60,
        }
    }

    /// Converts the colour to 8-bit RGB components.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let s = self.saturation as f64 / 100.0;
        let l = self.lightness as f64 / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue as f64 / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - 0.5 * c;
        let channel = |v: f64| ((v + m) * 255.0).round() as u8;
        (channel(r), channel(g), channel(b))
    }
}

impl Vehicle {
    /// Creates a stationary vehicle at the given distance from the checkpoint.
    pub(crate) fn new(attributes: &VehicleAttributes, distance: f64, color: Hsl) -> Self {
        Self {
            color,
            width: attributes.width,
            distance,
            speed: 0.0,
            acceleration: attributes.acceleration,
            reaction_delay: attributes.reaction_delay,
            require_gap: attributes.require_gap,
        }
    }

    /// The display colour of the vehicle.
    pub fn color(&self) -> Hsl {
        self.color
    }

    /// The vehicle's length.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The offset of the vehicle's front from the checkpoint line.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The distance the vehicle will cover on its next moving tick.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The speed gained per moving tick.
    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Ticks the vehicle has left to react before it moves.
    pub fn reaction_delay(&self) -> u32 {
        self.reaction_delay
    }

    /// The minimum clearance this vehicle keeps to the one ahead.
    pub fn require_gap(&self) -> f64 {
        self.require_gap
    }

    /// The stretch of road occupied by the vehicle.
    pub fn extent(&self) -> Interval<f64> {
        Interval::new(self.distance, self.distance + self.width)
    }

    /// Whether the vehicle has passed the checkpoint line.
    pub fn has_exited(&self) -> bool {
        self.distance < 0.0
    }

    /// The clearance between the rear of `ahead` and the front of this vehicle.
    /// The lead vehicle has nothing ahead and an unlimited gap.
    pub fn gap_to(&self, ahead: Option<&Vehicle>) -> f64 {
        match ahead {
            Some(ahead) => self.extent().clearance_behind(&ahead.extent()),
            None => f64::INFINITY,
        }
    }

    /// Computes this vehicle's state after one update pass, given the
    /// pre-update state of the vehicle ahead.
    pub(crate) fn advance(&self, ahead: Option<&Vehicle>) -> (Vehicle, VehicleAction) {
        if self.gap_to(ahead) < self.require_gap {
            return (self.clone(), VehicleAction::Blocked);
        }
        if self.reaction_delay > 0 {
            let next = Vehicle {
                reaction_delay: self.reaction_delay - 1,
                ..self.clone()
            };
            return (next, VehicleAction::Reacting);
        }
        let next = Vehicle {
            distance: self.distance - self.speed,
            speed: self.speed + self.acceleration,
            ..self.clone()
        };
        (next, VehicleAction::Moved)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn attributes(reaction_delay: u32, require_gap: f64) -> VehicleAttributes {
        VehicleAttributes {
            width: VEHICLE_WIDTH,
            acceleration: VEHICLE_ACCELERATION,
            reaction_delay,
            require_gap,
        }
    }

    #[test]
    fn lead_vehicle_is_never_blocked() {
        let veh = Vehicle::new(&attributes(0, 1e9), 0.0, Hsl::for_index(0));
        assert_eq!(veh.gap_to(None), f64::INFINITY);
        let (_, action) = veh.advance(None);
        assert_eq!(action, VehicleAction::Moved);
    }

    #[test]
    fn blocked_vehicle_keeps_its_reaction_delay() {
        let ahead = Vehicle::new(&attributes(3, 50.0), 0.0, Hsl::for_index(0));
        let veh = Vehicle::new(&attributes(3, 50.0), 60.0, Hsl::for_index(1));
        assert_approx_eq!(veh.gap_to(Some(&ahead)), 10.0);

        let (next, action) = veh.advance(Some(&ahead));
        assert_eq!(action, VehicleAction::Blocked);
        assert_eq!(next, veh);
    }

    #[test]
    fn reaction_delay_burns_down_before_moving() {
        let mut veh = Vehicle::new(&attributes(2, 50.0), 100.0, Hsl::for_index(0));
        let mut actions = vec![];
        for _ in 0..4 {
            let (next, action) = veh.advance(None);
            veh = next;
            actions.push(action);
        }
        use VehicleAction::*;
        assert_eq!(actions, [Reacting, Reacting, Moved, Moved]);
        assert_eq!(veh.reaction_delay(), 0);
        // The first move covers the initial speed of zero, the second covers one unit.
        assert_approx_eq!(veh.distance(), 99.0);
        assert_approx_eq!(veh.speed(), 2.0);
    }

    #[test]
    fn speed_is_uncapped() {
        let mut veh = Vehicle::new(&attributes(0, 0.0), 0.0, Hsl::for_index(0));
        for _ in 0..1000 {
            veh = veh.advance(None).0;
        }
        assert_approx_eq!(veh.speed(), 1000.0);
        assert_approx_eq!(veh.distance(), -499500.0);
        assert!(veh.has_exited());
    }

    #[test]
    fn palette_matches_index() {
        assert_eq!(Hsl::for_index(0).hue, 0);
        assert_eq!(Hsl::for_index(31).hue, 12);
        assert_eq!(Hsl::for_index(0).to_rgb(), (235, 71, 71));
        assert_eq!(Hsl::for_index(10).to_rgb(), (71, 235, 71));
    }
}
