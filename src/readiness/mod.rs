use std::thread;
use std::time::{Duration, Instant};

/// Maximum number of data checks before the store is assumed to be empty on
/// purpose rather than still loading.
pub const MAX_ATTEMPTS: u32 = 4;
/// Base backoff delay; attempt n waits `BASE_DELAY * 2^n`.
pub const BASE_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    NotReady,
    Ready,
}

/// Defers exposing the derived views until the store has either produced
/// data or exhausted a bounded number of checks. Exhaustion also resolves to
/// READY: the gate cannot truly distinguish "still syncing" from
/// "intentionally empty", so it is bounded in time instead of blocking the
/// UI indefinitely. READY is terminal.
pub struct ReadinessGate {
    state: GateState,
    attempts: u32,
    max_attempts: u32,
    base_delay: Duration,
    next_check: Option<Instant>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        Self::with_backoff(MAX_ATTEMPTS, BASE_DELAY)
    }

    pub fn with_backoff(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            state: GateState::NotReady,
            attempts: 0,
            max_attempts,
            base_delay,
            next_check: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt)
    }

    /// One cooperative check. Data resolves READY on any call; the backoff
    /// window only throttles how fast empty checks consume attempts.
    /// Re-entry after READY is a no-op.
    pub fn poll(&mut self, has_data: bool) -> GateState {
        if self.state == GateState::Ready {
            return GateState::Ready;
        }
        if has_data {
            self.state = GateState::Ready;
            return GateState::Ready;
        }
        if let Some(next) = self.next_check {
            if Instant::now() < next {
                return self.state;
            }
        }

        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            log::debug!("readiness checks exhausted, treating store as empty");
            self.state = GateState::Ready;
            return GateState::Ready;
        }
        self.next_check = Some(Instant::now() + self.backoff(self.attempts));
        self.state
    }

    /// Blocking variant for startup paths and tests. Sleeps through the
    /// same backoff schedule as `poll`.
    pub fn wait_until_ready<F: FnMut() -> bool>(&mut self, mut has_data: F) {
        while self.state == GateState::NotReady {
            if has_data() {
                self.state = GateState::Ready;
                break;
            }
            self.attempts += 1;
            if self.attempts >= self.max_attempts {
                log::debug!("readiness checks exhausted, treating store as empty");
                self.state = GateState::Ready;
                break;
            }
            thread::sleep(self.backoff(self.attempts));
        }
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}
