use minefield_core::GameSession;
use web_time::{Duration, Instant};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Turns wall-clock time into the session's one-second ticks.
#[derive(Debug)]
pub(crate) struct Ticker {
    last: Instant,
}

impl Ticker {
    pub(crate) fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(last: Instant) -> Self {
        Self { last }
    }

    /// Feeds every whole second since the previous call into `session`, returns how many counted.
    ///
    /// Must run before each gesture so the time is attributed to the state the session was in while it passed.
    pub(crate) fn pump(&mut self, session: &mut GameSession) -> u32 {
        self.pump_at(session, Instant::now())
    }

    fn pump_at(&mut self, session: &mut GameSession, now: Instant) -> u32 {
        let mut counted = 0;
        while now.saturating_duration_since(self.last) >= ONE_SECOND {
            self.last += ONE_SECOND;
            if session.tick() {
                counted += 1;
            }
        }
        counted
    }

    /// Call after a gesture with whether the timer ran before it; the first second is counted from the gesture that
    /// started the timer.
    pub(crate) fn follow(&mut self, was_running: bool, session: &GameSession) {
        self.follow_at(was_running, session, Instant::now());
    }

    fn follow_at(&mut self, was_running: bool, session: &GameSession, now: Instant) {
        if !was_running && session.is_timer_running() {
            log::trace!("Timer started, dropping {:?} of idle time", now.saturating_duration_since(self.last));
            self.last = now;
        }
    }
}
