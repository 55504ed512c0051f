//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Computes the clearance from the end of `ahead` to the start of this interval.
    /// Will be negative if this interval starts before `ahead` ends.
    pub fn clearance_behind(&self, ahead: &Self) -> T {
        self.min - ahead.max
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clearance_is_negative_when_overlapping() {
        let ahead = Interval::new(0.0, 50.0);
        assert_eq!(Interval::new(60.0, 110.0).clearance_behind(&ahead), 10.0);
        assert_eq!(Interval::new(40.0, 90.0).clearance_behind(&ahead), -10.0);
    }
}
