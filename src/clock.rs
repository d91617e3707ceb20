/// What a single tick did to the clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// The clock was not running
    Ignored,
    /// Counted down, this many seconds remain
    Counting(u32),
    /// Reached zero on this tick; reported once per run
    Expired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClockState {
    Stopped,
    Running,
    Expired,
}

/// Whole-second countdown for a session
#[derive(Debug, Clone)]
pub struct SessionClock {
    duration_secs: u32,
    remaining_secs: u32,
    state: ClockState,
}

impl SessionClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: ClockState::Stopped,
        }
    }

    /// Rewinds to the full duration and starts counting. Returns false and
    /// does nothing if already running.
    pub fn start(&mut self) -> bool {
        if self.state == ClockState::Running {
            return false;
        }
        self.remaining_secs = self.duration_secs;
        self.state = ClockState::Running;
        true
    }

    /// Safe to call in any state; never reports expiry.
    pub fn stop(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Stopped;
        }
    }

    pub fn tick(&mut self) -> ClockTick {
        if self.state != ClockState::Running {
            return ClockTick::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = ClockState::Expired;
            ClockTick::Expired
        } else {
            ClockTick::Counting(self.remaining_secs)
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn has_expired(&self) -> bool {
        self.state == ClockState::Expired
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Remaining time as a fraction of the full duration
    pub fn fraction_remaining(&self) -> f64 {
        if self.duration_secs == 0 {
            0.0
        } else {
            self.remaining_secs as f64 / self.duration_secs as f64
        }
    }
}
