use std::time::Duration;

use instant::Instant;


// Fixed-interval timer driven by the host's ticks. Fires at most once per `poll` call; if the
// host falls behind, missed periods are skipped rather than replayed.
#[derive(Clone, Debug)]
pub struct RepeatingTimer {
    first_delay: Duration,
    period: Duration,
    next_fire: Option<Instant>,
}

// Fires exactly once after being armed.
#[derive(Clone, Debug)]
pub struct OneShotTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new(first_delay: Duration, period: Duration) -> Self {
        RepeatingTimer { first_delay, period, next_fire: None }
    }

    // Restarts the timer if it is already running.
    pub fn start(&mut self, now: Instant) { self.next_fire = Some(now + self.first_delay); }

    // Returns whether the timer was running.
    pub fn stop(&mut self) -> bool { self.next_fire.take().is_some() }

    pub fn is_running(&self) -> bool { self.next_fire.is_some() }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_fire {
            Some(t) if now >= t => {
                let mut next = t + self.period;
                if next <= now {
                    next = now + self.period;
                }
                self.next_fire = Some(next);
                true
            }
            _ => false,
        }
    }
}

impl OneShotTimer {
    pub fn new(delay: Duration) -> Self { OneShotTimer { delay, deadline: None } }

    pub fn arm(&mut self, now: Instant) { self.deadline = Some(now + self.delay); }

    pub fn is_armed(&self) -> bool { self.deadline.is_some() }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(t) if now >= t => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
