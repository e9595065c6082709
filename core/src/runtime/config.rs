//! Engine runtime configuration

use std::time::Duration;

/// Engine runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Target tick rate in Hz
    pub tick_rate: u32,
    /// Per-tick budget; ticks that take longer are logged
    pub frame_budget: Duration,
}

impl RuntimeConfig {
    /// Time per tick (inverse of tick rate).
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            frame_budget: Duration::from_micros(4000), // 4ms at 60fps
        }
    }
}
