//! The bounded polling state machine, free of any timer or I/O.

use std::fmt;

/// Attempt bookkeeping owned by exactly one loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollState {
    /// Readiness checks performed so far.
    pub attempts_made: u32,
}

/// Where a loop currently is.
///
/// ```text
/// Idle -> Checking -> Ready -> Dispatched
///            |
///            +-> NotReady -> Scheduled -> Checking ...
///                              |
///                              +-> Abandoned   (ceiling exceeded)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Checking,
    Ready,
    NotReady,
    Scheduled,
    Dispatched,
    Abandoned,
}

impl PollPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollPhase::Dispatched | PollPhase::Abandoned)
    }
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PollPhase::Idle => "idle",
            PollPhase::Checking => "checking",
            PollPhase::Ready => "ready",
            PollPhase::NotReady => "not_ready",
            PollPhase::Scheduled => "scheduled",
            PollPhase::Dispatched => "dispatched",
            PollPhase::Abandoned => "abandoned",
        };
        f.write_str(name)
    }
}

/// What the driver has to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Run a readiness check now.
    Check,
    /// Extract identifiers and hand them to the notifier.
    Dispatch,
    /// Call [`PollLoop::schedule`], sleep for the poll interval, then call
    /// [`PollLoop::next_attempt`].
    Wait,
    /// Stop; the ceiling was exceeded.
    Abandon,
}

/// Transition table for one polling loop.
///
/// The attempt counter is bumped before every check and compared with the
/// ceiling first, so a loop runs exactly `max_attempts` checks. The delay that
/// follows the last failed check still elapses before the loop is abandoned.
#[derive(Debug, Clone)]
pub struct PollLoop {
    state: PollState,
    phase: PollPhase,
    max_attempts: u32,
}

impl PollLoop {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            state: PollState::default(),
            phase: PollPhase::Idle,
            max_attempts,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// `Idle` or `Scheduled` -> `Checking`, or `Abandoned` past the ceiling.
    pub fn next_attempt(&mut self) -> Step {
        debug_assert!(matches!(self.phase, PollPhase::Idle | PollPhase::Scheduled));
        let attempt = self.state.attempts_made + 1;
        if attempt > self.max_attempts {
            self.phase = PollPhase::Abandoned;
            return Step::Abandon;
        }
        self.state.attempts_made = attempt;
        self.phase = PollPhase::Checking;
        Step::Check
    }

    /// `Checking` -> `Ready` or `NotReady`.
    pub fn record_check(&mut self, ready: bool) -> Step {
        debug_assert_eq!(self.phase, PollPhase::Checking);
        if ready {
            self.phase = PollPhase::Ready;
            Step::Dispatch
        } else {
            self.phase = PollPhase::NotReady;
            Step::Wait
        }
    }

    /// `NotReady` -> `Scheduled`, right before the delay starts.
    pub fn schedule(&mut self) {
        debug_assert_eq!(self.phase, PollPhase::NotReady);
        self.phase = PollPhase::Scheduled;
    }

    /// `Ready` -> `Dispatched`.
    pub fn mark_dispatched(&mut self) {
        debug_assert_eq!(self.phase, PollPhase::Ready);
        self.phase = PollPhase::Dispatched;
    }
}
