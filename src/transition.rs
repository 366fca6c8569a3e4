//! Time-based interpolation of the viewport focal length.
//!
//! One [`TransitionEngine`] is owned by one
//! [`NavigationSession`](crate::session::NavigationSession) for the length
//! of an activation. It animates the focal length toward the navigation
//! value on entry and back to the captured baseline on exit, and carries
//! the two pieces of restore bookkeeping the session's cleanup discipline
//! depends on: the baseline value and the exit-attempt latch.
//!
//! The engine never touches the host itself; every tick hands the caller
//! the value to apply.

use web_time::Instant;

use crate::error::NavLensError;
use crate::util::easing::EasingFunction;

/// Values closer than this are treated as already settled; no transition
/// is started between them.
pub const VALUE_EPSILON: f32 = 1e-3;

/// Which endpoint a transition moves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the navigation focal length.
    Entering,
    /// Back toward the session baseline.
    Exiting,
}

/// Outcome of [`TransitionEngine::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A timed transition is now in flight; drive it with
    /// [`TransitionEngine::tick`].
    Started,
    /// Zero duration: the caller must apply the target value itself, no
    /// animation frames will follow.
    Instant,
}

/// Result of advancing an in-flight transition by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    /// Transition still running; apply this interpolated value.
    StillRunning(f32),
    /// Transition just finished; apply this final value.
    Completed(f32),
}

/// Interpolation state captured once at `start` and never re-read from
/// configuration mid-flight.
#[derive(Debug, Clone, Copy)]
struct Flight {
    direction: Direction,
    start_time: Instant,
    duration: f32,
    from_value: f32,
    to_value: f32,
}

/// Animates one scalar camera parameter between two values with easing.
#[derive(Debug)]
pub struct TransitionEngine {
    /// Value to restore when the session fully exits. Set once per
    /// session, cleared only after the restore has landed.
    baseline: Option<f32>,
    /// In-flight interpolation, if any.
    flight: Option<Flight>,
    easing: EasingFunction,
    /// Latch: exit-transition scheduling happens at most once per session.
    exit_attempted: bool,
}

impl TransitionEngine {
    /// Create an idle engine with the default ease-out curve.
    #[must_use]
    pub fn new() -> Self {
        Self {
            baseline: None,
            flight: None,
            easing: EasingFunction::DEFAULT,
            exit_attempted: false,
        }
    }

    /// Whether an interpolation is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flight.is_some()
    }

    /// Whether the in-flight transition (if any) moves toward the baseline.
    #[must_use]
    pub fn is_exiting(&self) -> bool {
        self.flight
            .is_some_and(|f| f.direction == Direction::Exiting)
    }

    /// Record the value to restore on exit. The first capture per session
    /// wins; later calls are ignored.
    pub fn capture_baseline(&mut self, value: f32) {
        if self.baseline.is_none() {
            self.baseline = Some(value);
        }
    }

    /// The captured restore value, if a session entry recorded one.
    #[must_use]
    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    /// Forget the restore value (the restore has landed).
    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }

    /// Claim the one exit-transition attempt this session gets.
    ///
    /// Returns `true` exactly once; repeated FINISHING ticks calling this
    /// again get `false` and must not reschedule the exit.
    pub fn try_claim_exit(&mut self) -> bool {
        if self.exit_attempted {
            return false;
        }
        self.exit_attempted = true;
        true
    }

    /// Begin a transition from `from` to `to` over `duration` seconds.
    ///
    /// Duration is captured here and never re-read, so concurrent
    /// configuration edits cannot tear an in-flight transition. A zero
    /// duration yields [`StartOutcome::Instant`] and leaves the engine
    /// idle: the caller applies `to` itself.
    ///
    /// # Errors
    ///
    /// [`NavLensError::InvalidDuration`] when `duration` is negative;
    /// validated configuration never produces this.
    pub fn start(
        &mut self,
        from: f32,
        to: f32,
        duration: f32,
        direction: Direction,
        now: Instant,
    ) -> Result<StartOutcome, NavLensError> {
        if duration < 0.0 {
            return Err(NavLensError::InvalidDuration(duration));
        }
        if duration == 0.0 {
            self.flight = None;
            return Ok(StartOutcome::Instant);
        }
        self.flight = Some(Flight {
            direction,
            start_time: now,
            duration,
            from_value: from,
            to_value: to,
        });
        Ok(StartOutcome::Started)
    }

    /// Advance the in-flight transition. Returns `None` when idle.
    ///
    /// On completion the engine goes idle; a completed exit also clears
    /// the baseline, since the restore has now landed.
    pub fn tick(&mut self, now: Instant) -> Option<TickResult> {
        let flight = self.flight?;

        let elapsed =
            now.saturating_duration_since(flight.start_time).as_secs_f32();
        let t = (elapsed / flight.duration).clamp(0.0, 1.0);

        if t >= 1.0 {
            self.flight = None;
            if flight.direction == Direction::Exiting {
                self.baseline = None;
            }
            return Some(TickResult::Completed(flight.to_value));
        }

        let eased = self.easing.evaluate(t);
        let value = flight.from_value
            + (flight.to_value - flight.from_value) * eased;
        Some(TickResult::StillRunning(value))
    }

    /// Resolve an interrupted transition synchronously: stop animating and
    /// echo the value the caller must apply now.
    pub fn force_settle(&mut self, value: f32) -> f32 {
        self.flight = None;
        value
    }

    /// Final settlement: stop any in-flight transition and hand back the
    /// baseline still owed to the host parameter, clearing it.
    ///
    /// Idempotent: the second call finds no baseline and returns `None`,
    /// which is what makes the session's cleanup restore exactly-once.
    pub fn settle(&mut self) -> Option<f32> {
        self.flight = None;
        self.baseline.take()
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}
