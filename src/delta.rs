use std::time::{Duration, Instant};

/// Time between consecutive frames.
pub struct Delta {
    pub last_frame: Instant,
    frame_time: Duration,
}
impl Delta {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: Duration::ZERO,
        }
    }
    pub fn update(&mut self, new_frame: Instant) -> Duration {
        self.frame_time = new_frame.saturating_duration_since(self.last_frame);
        self.last_frame = new_frame;
        self.frame_time
    }
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}
impl Default for Delta {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns variable frame times into a whole number of fixed-length steps.
pub struct Ticker {
    step:    Duration,
    backlog: Duration,
}
impl Ticker {
    /// Longest stretch of time caught up on after a stall.
    const MAX_BACKLOG_STEPS: u32 = 5;

    pub fn per_second(rate: u32) -> Self {
        Self {
            step:    Duration::from_secs(1) / rate.max(1),
            backlog: Duration::ZERO,
        }
    }
    /// Account for `elapsed` time and return how many steps are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.backlog = (self.backlog + elapsed).min(self.step * Self::MAX_BACKLOG_STEPS);
        let mut steps = 0;
        while self.backlog >= self.step {
            self.backlog -= self.step;
            steps += 1;
        }
        steps
    }
}

#[test]
fn delta_measures_between_updates() {
    let start = Instant::now();
    let mut delta = Delta { last_frame: start, frame_time: Duration::ZERO };
    let d = delta.update(start + Duration::from_millis(16));
    assert!(d == Duration::from_millis(16));
    assert!(delta.frame_time() == d);
}

#[test]
fn ticker_accumulates_partial_steps() {
    let mut ticker = Ticker::per_second(10);
    assert!(ticker.advance(Duration::from_millis(60)) == 0);
    assert!(ticker.advance(Duration::from_millis(60)) == 1);
    assert!(ticker.advance(Duration::from_millis(200)) == 2);
}

#[test]
fn ticker_caps_backlog() {
    let mut ticker = Ticker::per_second(10);
    assert!(ticker.advance(Duration::from_secs(10)) == 5);
}
