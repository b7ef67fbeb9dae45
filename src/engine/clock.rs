use std::time::Instant;

/// Produces elapsed-time deltas in milliseconds between host-driven
/// callbacks. Deltas are clamped so a backgrounded terminal does not
/// teleport every entity on the next frame.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    max_delta_ms: f32,
}

impl FrameClock {
    pub fn new(max_delta_ms: f32) -> Self {
        Self {
            last: Instant::now(),
            max_delta_ms,
        }
    }

    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta_ms = now.duration_since(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        delta_ms.clamp(0.0, self.max_delta_ms)
    }
}
