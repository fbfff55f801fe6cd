use std::fmt;

pub const REGULAR_FOOD_POINTS: u32 = 10;
pub const GOLD_FOOD_POINTS: u32 = 50;
/// Deducted for every segment a blast cuts off.
pub const CUT_PENALTY_PER_SEGMENT: u32 = 10;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    pub const fn new(points: u32) -> Self {
        Self(points)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    /// Subtracts, flooring at zero.
    pub fn penalize(&mut self, points: u32) {
        self.0 = self.0.saturating_sub(points);
    }

    pub fn penalize_cut(&mut self, segments: usize) {
        let segments = u32::try_from(segments).unwrap_or(u32::MAX);
        self.penalize(segments.saturating_mul(CUT_PENALTY_PER_SEGMENT));
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
