use std::time::Duration;

/// Leading-edge throttle: the first call runs, further calls are dropped
/// until `interval` has elapsed since the last accepted one.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Duration>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
        }
    }

    pub fn ready(&mut self, now: Duration) -> bool {
        match self.last_run {
            Some(last) if now.saturating_sub(last) < self.interval => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }
}
