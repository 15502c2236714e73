use std::time::{Duration, Instant};

use vizcore::{frame_period, Result};

/// Paces frames to a fixed rate by sleeping out the rest of each period.
///
/// The first tick never waits. A frame that overruns its period is not made
/// up for later; the next period starts from the late tick.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    last: Option<Instant>,
    ticks: u64,
}

impl FrameClock {
    /// `frequency` is in frames per second. Fails with `InvalidConfig` when
    /// it is not positive or its period does not fit in a `Duration`.
    pub fn new(frequency: f64) -> Result<Self> {
        Ok(Self {
            period: frame_period(frequency)?,
            last: None,
            ticks: 0,
        })
    }

    /// Block until one period has passed since the previous tick.
    /// Returns how long this call slept.
    pub fn tick(&mut self) -> Duration {
        let mut slept = Duration::ZERO;
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.period {
                slept = self.period - elapsed;
                std::thread::sleep(slept);
            }
        }
        self.last = Some(Instant::now());
        self.ticks += 1;
        slept
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
