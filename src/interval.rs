//! Interval arithmetic for ray parameter ranges.
//!
//! Provides intervals used for ray t-value acceptance during intersection
//! testing and for clamping color channels before quantization.

/// Interval between a min and a max value.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    /// Minimum value of the interval.
    pub min: f32,
    /// Maximum value of the interval.
    pub max: f32,
}

impl Interval {
    /// Interval containing all real numbers.
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create a new interval with the given bounds.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check whether the interval contains the value (inclusive bounds).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check whether the interval surrounds the value (exclusive bounds).
    ///
    /// This is the acceptance test for intersection roots: a hit exactly at
    /// the boundary is rejected, which is what keeps bounce rays from
    /// re-hitting the surface they start on.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp the value to the interval's bounds.
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounds_is_exclusive_contains_is_inclusive() {
        let i = Interval::new(0.001, 2.0);
        assert!(i.contains(0.001));
        assert!(!i.surrounds(0.001));
        assert!(i.surrounds(1.0));
        assert!(!i.surrounds(2.0));
        assert!(!i.contains(2.5));
    }

    #[test]
    fn clamp_pins_out_of_range_values() {
        let i = Interval::new(0.0, 0.999);
        assert_eq!(i.clamp(-0.5), 0.0);
        assert_eq!(i.clamp(0.42), 0.42);
        assert_eq!(i.clamp(7.0), 0.999);
    }

    #[test]
    fn universe_surrounds_everything_finite() {
        assert!(Interval::UNIVERSE.surrounds(1e30));
        assert!(Interval::UNIVERSE.surrounds(-1e30));
    }
}
