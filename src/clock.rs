/// Slack for rounding in the accumulated tick times.
const EPSILON: f64 = 1e-9;

/// Decides when the next fixed-rate tick is due. Speed is in ticks per second.
///
/// Ticks land on a fixed step from the start time rather than on the frame
/// that noticed them, so the rate does not drift with the frame rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickTimer {
    last_tick_at: f64,
}

impl TickTimer {
    pub fn new(now: f64) -> Self {
        Self { last_tick_at: now }
    }

    pub fn interval(speed: u32) -> f64 {
        1.0 / f64::from(speed.max(1))
    }

    /// Consumes the tick if one is due. After a stall of more than one
    /// interval the step restarts from `now` instead of catching up.
    pub fn poll(&mut self, now: f64, speed: u32) -> bool {
        let interval = Self::interval(speed);
        let due = self.last_tick_at + interval;
        if now + EPSILON < due {
            return false;
        }
        self.last_tick_at = if now - due >= interval { now } else { due };
        true
    }
}
