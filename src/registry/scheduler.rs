//! Periodic refresh scheduler driven by host ticks

use super::hologram_registry::HologramRegistry;

/// Fires the registry refresh pass every `interval` host ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: u32,
    elapsed: u32,
}

impl TickScheduler {
    /// An interval of 0 is treated as 1
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            elapsed: 0,
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Count one host tick; true when a refresh pass is due
    pub fn advance(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    /// Count one host tick and run the refresh pass when due
    ///
    /// Returns the number of holograms updated, `None` if no pass ran.
    pub fn on_host_tick(&mut self, registry: &HologramRegistry) -> Option<usize> {
        self.advance().then(|| registry.tick())
    }
}
