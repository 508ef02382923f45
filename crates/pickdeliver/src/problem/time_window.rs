use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_start() -> f64 {
    0.0
}

fn default_end() -> f64 {
    f64::INFINITY
}

/// Closed interval `[start, end]` in which service may begin at a node.
/// Arriving before `start` means waiting; arriving after `end` is a violation.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    #[serde(default = "default_start")]
    start: f64,
    #[serde(default = "default_end")]
    end: f64,
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow {
            start: default_start(),
            end: default_end(),
        }
    }
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        TimeWindow { start, end }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn is_satisfied(&self, arrival: f64) -> bool {
        arrival <= self.end
    }

    pub fn overtime(&self, arrival: f64) -> f64 {
        (arrival - self.end).max(0.0)
    }

    /// Time spent idle when reaching the node at `ready`.
    pub fn waiting_time(&self, ready: f64) -> f64 {
        (self.start - ready).max(0.0)
    }

    pub fn arrival_time(&self, ready: f64) -> f64 {
        ready.max(self.start)
    }
}
