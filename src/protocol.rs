use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementProtocol {
    pub warmup_iterations: u32,
    pub warmup_iteration_time: Duration,
    pub measurement_iterations: u32,
    pub measurement_iteration_time: Duration,
    pub forks: u32,
}

impl Default for MeasurementProtocol {
    fn default() -> Self {
        Self {
            warmup_iterations: 3,
            warmup_iteration_time: Duration::from_secs(2),
            measurement_iterations: 10,
            measurement_iteration_time: Duration::from_secs(2),
            forks: 1,
        }
    }
}

impl MeasurementProtocol {
    // criterion rejects smaller sample sizes
    pub const MIN_SAMPLE_SIZE: usize = 10;

    #[inline]
    pub fn warmup_time(&self) -> Duration {
        self.warmup_iteration_time * self.warmup_iterations
    }

    #[inline]
    pub fn measurement_time(&self) -> Duration {
        self.measurement_iteration_time * self.measurement_iterations
    }

    #[inline]
    pub fn sample_size(&self) -> usize {
        (self.measurement_iterations as usize).max(Self::MIN_SAMPLE_SIZE)
    }
}
