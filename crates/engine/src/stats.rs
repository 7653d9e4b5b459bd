use std::time::Duration;

/// Rolling window of frame times for instrumentation.
#[derive(Debug)]
pub struct FrameStats {
    samples: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![Duration::ZERO; capacity.max(1)],
            capacity: capacity.max(1),
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.samples[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    /// Samples currently in the window.
    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.samples[..count].iter().sum();
        total / count as u32
    }

    pub fn max(&self) -> Duration {
        self.samples[..self.count()]
            .iter()
            .copied()
            .max()
            .unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples[..self.count()]
            .iter()
            .copied()
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// Summarize the window for a run of `frames` total frames.
    pub fn summary(&self, frames: u64) -> FrameSummary {
        FrameSummary {
            frames,
            average: self.average(),
            max: self.max(),
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

/// What a completed run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    /// Total frames stepped.
    pub frames: u64,
    /// Average frame time over the trailing window.
    pub average: Duration,
    /// Worst frame time over the trailing window.
    pub max: Duration,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "frames={} avg={:.2}ms max={:.2}ms",
            self.frames,
            self.average.as_secs_f64() * 1000.0,
            self.max.as_secs_f64() * 1000.0
        )
    }
}
