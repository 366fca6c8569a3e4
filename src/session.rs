//! The per-activation modal decision state machine.
//!
//! One [`NavigationSession`] is created when the trigger input is first
//! observed and destroyed once finishing completes; no state survives
//! between activations. The host feeds every input and timer event into
//! [`handle_event`](NavigationSession::handle_event) in production order
//! and drops the session when the returned outcome is terminal.
//!
//! ```text
//! WaitingForDecision ──hold ≥ threshold──▶ Navigating
//!        │ │                                   │
//!        │ └──movement key (fast path)─────────┤
//!        │                                     │
//!        └──trigger release (tap → menu)──▶ Finishing ──▶ Idle (dropped)
//! ```
//!
//! Finishing settles any interrupted entry transition synchronously,
//! schedules the exit transition at most once, and ends with an
//! exactly-once cleanup: timer removed, deferred menu dispatched,
//! orthographic view restored, focal-length baseline restored.

use glam::Vec2;
use web_time::{Duration, Instant};

use crate::error::{HostRefusal, NavLensError};
use crate::host::{Host, TimerHandle, ViewMode};
use crate::input::{InputEvent, MouseButton};
use crate::menu;
use crate::options::{ActivationMethod, Options};
use crate::transition::{
    Direction, StartOutcome, TickResult, TransitionEngine, VALUE_EPSILON,
};

/// Periodic tick interval driving both decision timing and transition
/// smoothness (~50 Hz). A single constant for all session phases.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// `TICK_INTERVAL` in seconds, the amount `elapsed` grows per tick.
const TICK_SECONDS: f32 = 0.02;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Decision window: trigger held, intent not yet known.
    WaitingForDecision,
    /// Host native navigation is running.
    Navigating,
    /// Session is winding down; the exit transition may still be
    /// animating.
    Finishing,
    /// Cleanup has run; the host should drop the session.
    Idle,
}

/// What the host should do with the event just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Event not consumed; keep routing it. Session stays active.
    PassThrough,
    /// Event consumed. Session stays active.
    Consumed,
    /// Session completed normally; drop it.
    Finished,
    /// Session aborted (host refusal or policy); drop it.
    Cancelled,
}

impl HandleOutcome {
    /// Whether the session is over and should be dropped.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Cancelled)
    }
}

/// Why navigation could not start.
enum StartBlock {
    /// Local policy said no (camera view gating). Silent.
    Policy(&'static str),
    /// The host itself refused. Surfaced as a warning notification.
    Host(HostRefusal),
}

/// Modal controller for one activation of the navigation trigger.
///
/// Exclusively owns its [`TransitionEngine`] and the host resources it
/// touched (timer, focal length, view flags) for its lifetime; the host
/// must not run two sessions concurrently — refuse the activation or
/// [`abort`](Self::abort) the old session first.
pub struct NavigationSession {
    /// Immutable configuration snapshot taken at activation.
    options: Options,
    phase: Phase,
    /// Seconds since activation, advanced only by timer ticks.
    elapsed: f32,
    /// Decision latch: set at most once, read once during cleanup.
    wants_menu: bool,
    /// Whether the viewport was orthographic when navigation started.
    was_orthographic: bool,
    /// Whether cleanup must switch the viewport back to orthographic.
    restore_orthographic: bool,
    /// Cursor position at activation, in physical pixels.
    origin: Vec2,
    timer: Option<TimerHandle>,
    transition: TransitionEngine,
}

impl NavigationSession {
    /// Activate a session: start the periodic timer and enter the
    /// decision window (or navigation directly, for immediate activation
    /// methods).
    ///
    /// # Errors
    ///
    /// [`NavLensError::Refused`] when an immediate activation method
    /// could not start navigation. Cleanup has already run; there is no
    /// session to drop.
    pub fn start<H: Host>(
        host: &mut H,
        options: Options,
        cursor: Vec2,
        now: Instant,
    ) -> Result<Self, NavLensError> {
        let timer = host.start_timer(TICK_INTERVAL);
        let mut session = Self {
            options,
            phase: Phase::WaitingForDecision,
            elapsed: 0.0,
            wants_menu: false,
            was_orthographic: false,
            restore_orthographic: false,
            origin: cursor,
            timer: Some(timer),
            transition: TransitionEngine::new(),
        };

        if session.options.navigation.activation.is_immediate() {
            if let Err(block) = session.try_start_navigation(host, now) {
                let refusal = match &block {
                    StartBlock::Policy(reason) => HostRefusal::new(*reason),
                    StartBlock::Host(r) => r.clone(),
                };
                let _ = session.abort_with(host, &block);
                return Err(NavLensError::Refused(refusal));
            }
        } else {
            log::debug!("session activated, waiting for decision");
        }

        Ok(session)
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Cursor position at activation, in physical pixels. Hosts use this
    /// to anchor the deferred context menu.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Whether the viewport was orthographic when navigation started.
    /// `false` until navigation starts.
    #[must_use]
    pub fn was_orthographic(&self) -> bool {
        self.was_orthographic
    }

    /// Process one input or timer event to completion.
    ///
    /// Events must arrive in the order the host produced them; each is
    /// fully handled before the next is considered.
    #[must_use]
    pub fn handle_event<H: Host>(
        &mut self,
        host: &mut H,
        event: InputEvent<'_>,
        now: Instant,
    ) -> HandleOutcome {
        match event {
            InputEvent::Timer => self.handle_tick(host, now),
            _ => self.handle_input(host, event, now),
        }
    }

    /// Abrupt host-level cancellation: runs the identical cleanup path a
    /// normal finish takes, so the focal length is never left
    /// mid-transition and nothing stays unrestored. Safe to call more
    /// than once.
    pub fn abort<H: Host>(&mut self, host: &mut H) {
        if self.phase != Phase::Idle {
            log::debug!("session aborted by host");
        }
        self.phase = Phase::Finishing;
        self.final_cleanup(host);
    }

    // ─── Timer ticks ─────────────────────────────────────────────────────

    fn handle_tick<H: Host>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> HandleOutcome {
        match self.phase {
            Phase::WaitingForDecision => {
                self.elapsed += TICK_SECONDS;
                let threshold = self.options.navigation.decision_threshold;
                // A non-positive threshold never auto-activates; only the
                // movement-key fast path can start navigation then.
                if threshold > 0.0 && self.elapsed >= threshold {
                    return match self.try_start_navigation(host, now) {
                        Ok(()) => HandleOutcome::Consumed,
                        Err(block) => self.abort_with(host, &block),
                    };
                }
                HandleOutcome::PassThrough
            }
            Phase::Navigating => {
                self.elapsed += TICK_SECONDS;
                self.advance_entry_transition(host, now);
                HandleOutcome::PassThrough
            }
            Phase::Finishing => self.handle_finishing_tick(host, now),
            Phase::Idle => HandleOutcome::Finished,
        }
    }

    /// Drive an entry transition that is still animating while the host
    /// navigates.
    fn advance_entry_transition<H: Host>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) {
        if let Some(
            TickResult::StillRunning(value) | TickResult::Completed(value),
        ) = self.transition.tick(now)
        {
            host.write_lens(value);
        }
    }

    fn handle_finishing_tick<H: Host>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> HandleOutcome {
        let was_exiting = self.transition.is_exiting();
        match self.transition.tick(now) {
            Some(TickResult::StillRunning(value)) => {
                host.write_lens(value);
                HandleOutcome::PassThrough
            }
            Some(TickResult::Completed(value)) => {
                host.write_lens(value);
                if was_exiting {
                    self.final_cleanup(host);
                    return HandleOutcome::Finished;
                }
                HandleOutcome::PassThrough
            }
            None => {
                self.final_cleanup(host);
                HandleOutcome::Finished
            }
        }
    }

    // ─── Input events ────────────────────────────────────────────────────

    fn handle_input<H: Host>(
        &mut self,
        host: &mut H,
        event: InputEvent<'_>,
        now: Instant,
    ) -> HandleOutcome {
        match self.phase {
            Phase::WaitingForDecision => {
                self.handle_waiting_input(host, event, now)
            }
            Phase::Navigating => {
                self.handle_navigating_input(host, event, now)
            }
            Phase::Finishing => {
                // Let a running exit transition complete before tearing
                // down; anything else means cleanup is due now.
                if self.transition.is_active() {
                    return HandleOutcome::PassThrough;
                }
                self.final_cleanup(host);
                HandleOutcome::Finished
            }
            Phase::Idle => HandleOutcome::Finished,
        }
    }

    fn handle_waiting_input<H: Host>(
        &mut self,
        host: &mut H,
        event: InputEvent<'_>,
        now: Instant,
    ) -> HandleOutcome {
        // Fast path: the user started typing movement keys before the
        // threshold elapsed.
        if self.is_movement_intent(event) {
            log::debug!("movement key at {:.2}s, fast-path activation", self.elapsed);
            return match self.try_start_navigation(host, now) {
                // Pass the key through so the native mode sees it too.
                Ok(()) => HandleOutcome::PassThrough,
                Err(block) => self.abort_with(host, &block),
            };
        }

        if self.is_trigger_release(event) {
            if self.elapsed < self.options.navigation.decision_threshold {
                self.wants_menu = true;
                log::debug!(
                    "tap at {:.2}s, deferring context menu",
                    self.elapsed
                );
            }
            return self.finish(host, now);
        }

        HandleOutcome::PassThrough
    }

    fn handle_navigating_input<H: Host>(
        &mut self,
        host: &mut H,
        event: InputEvent<'_>,
        now: Instant,
    ) -> HandleOutcome {
        // Mouse movement is expected noise while the native mode runs.
        if matches!(event, InputEvent::CursorMoved { .. }) {
            return HandleOutcome::PassThrough;
        }

        // Anything else means the native mode has ended. A trigger
        // release under the threshold still earns the menu (navigation
        // begun via fast path, exited quickly).
        if self.is_trigger_release(event)
            && !self.options.navigation.activation.is_immediate()
            && self.elapsed < self.options.navigation.decision_threshold
        {
            self.wants_menu = true;
        }
        self.finish(host, now)
    }

    // ─── Navigation start ────────────────────────────────────────────────

    fn try_start_navigation<H: Host>(
        &mut self,
        host: &mut H,
        now: Instant,
    ) -> Result<(), StartBlock> {
        let view_mode = host.view_mode();

        if view_mode == ViewMode::Camera {
            let nav = &self.options.navigation;
            if !nav.camera_navigation {
                return Err(StartBlock::Policy(
                    "navigation in camera view is disabled",
                ));
            }
            if nav.camera_navigation_requires_lock
                && !host.is_camera_locked_view()
            {
                return Err(StartBlock::Policy(
                    "camera is not locked to the view",
                ));
            }
        }

        // Focal length moves first; a host refusal below still restores
        // it through the normal cleanup path.
        self.start_lens_entry(host, now);

        host.request_navigation().map_err(StartBlock::Host)?;

        // View-mode bookkeeping, from the read taken before the host
        // flipped the viewport into its navigation projection.
        if view_mode == ViewMode::Orthographic {
            self.was_orthographic = true;
            self.restore_orthographic =
                self.options.navigation.restore_orthographic;
        }

        self.phase = Phase::Navigating;
        log::info!("navigation started after {:.2}s", self.elapsed);
        Ok(())
    }

    fn abort_with<H: Host>(
        &mut self,
        host: &mut H,
        block: &StartBlock,
    ) -> HandleOutcome {
        match block {
            StartBlock::Policy(reason) => {
                log::debug!("navigation not started: {reason}");
            }
            StartBlock::Host(refusal) => {
                log::warn!("{refusal}");
                host.notify_warning(
                    "Navigation failed. Object might have constraints or view is locked.",
                );
            }
        }
        self.phase = Phase::Finishing;
        self.final_cleanup(host);
        HandleOutcome::Cancelled
    }

    // ─── Focal-length transitions ────────────────────────────────────────

    fn start_lens_entry<H: Host>(&mut self, host: &mut H, now: Instant) {
        if !self.options.lens.is_active() {
            return;
        }
        let target = self.options.lens.target;
        let duration = self.options.lens.transition_duration;

        let current = host.read_lens();
        self.transition.capture_baseline(current);

        if (current - target).abs() <= VALUE_EPSILON {
            // Already at the navigation focal length.
            return;
        }

        match self.transition.start(
            current,
            target,
            duration,
            Direction::Entering,
            now,
        ) {
            Ok(StartOutcome::Started) => {}
            Ok(StartOutcome::Instant) => host.write_lens(target),
            Err(e) => {
                log::error!("entry transition rejected: {e}; applying instantly");
                host.write_lens(target);
            }
        }
    }

    /// Schedule the exit transition back to the baseline. Latched: only
    /// the first call per session can schedule it. Returns whether a
    /// timed transition is now running.
    fn start_lens_exit<H: Host>(&mut self, host: &mut H, now: Instant) -> bool {
        if !self.transition.try_claim_exit() {
            return false;
        }
        if !self.options.lens.is_active() {
            return false;
        }
        let Some(baseline) = self.transition.baseline() else {
            return false;
        };

        let current = host.read_lens();
        if (current - baseline).abs() <= VALUE_EPSILON {
            // Nothing to animate; the restore already holds.
            self.transition.clear_baseline();
            return false;
        }

        match self.transition.start(
            current,
            baseline,
            self.options.lens.transition_duration,
            Direction::Exiting,
            now,
        ) {
            Ok(StartOutcome::Started) => true,
            Ok(StartOutcome::Instant) => {
                host.write_lens(baseline);
                self.transition.clear_baseline();
                false
            }
            Err(e) => {
                log::error!("exit transition rejected: {e}; restoring instantly");
                host.write_lens(baseline);
                self.transition.clear_baseline();
                false
            }
        }
    }

    // ─── Finishing & cleanup ─────────────────────────────────────────────

    /// Enter FINISHING: settle an interrupted entry transition
    /// synchronously, try to schedule the exit transition, and when
    /// nothing is left animating, run final cleanup immediately.
    fn finish<H: Host>(&mut self, host: &mut H, now: Instant) -> HandleOutcome {
        self.phase = Phase::Finishing;

        // Entry cut short: snap back to the baseline now rather than
        // leaving the parameter mid-flight for a frame.
        if self.transition.is_active() && !self.transition.is_exiting() {
            if let Some(baseline) = self.transition.baseline() {
                let value = self.transition.force_settle(baseline);
                host.write_lens(value);
            }
        }

        if self.start_lens_exit(host, now) {
            return HandleOutcome::PassThrough;
        }

        self.final_cleanup(host);
        HandleOutcome::Finished
    }

    /// The exactly-once teardown. Every step is individually idempotent,
    /// so repeated invocation (late events, host-level abort after
    /// finish) cannot double-fire a host call.
    fn final_cleanup<H: Host>(&mut self, host: &mut H) {
        if let Some(timer) = self.timer.take() {
            host.cancel_timer(timer);
        }

        if std::mem::take(&mut self.wants_menu) {
            let menu = menu::context_menu(host.interaction_mode());
            log::debug!("dispatching deferred context menu '{menu}'");
            host.open_context_menu(menu);
        }

        if std::mem::take(&mut self.restore_orthographic) {
            host.set_orthographic(true);
        }

        if let Some(baseline) = self.transition.settle() {
            host.write_lens(baseline);
        }

        self.phase = Phase::Idle;
    }

    // ─── Event classification ────────────────────────────────────────────

    fn is_movement_intent(&self, event: InputEvent<'_>) -> bool {
        match event {
            InputEvent::Key { key, pressed: true } => {
                self.options.keybindings.is_movement_key(key)
            }
            _ => false,
        }
    }

    fn is_trigger_release(&self, event: InputEvent<'_>) -> bool {
        match self.options.navigation.activation {
            ActivationMethod::RightMouse => matches!(
                event,
                InputEvent::MouseButton {
                    button: MouseButton::Right,
                    pressed: false,
                }
            ),
            ActivationMethod::MiddleMouse => matches!(
                event,
                InputEvent::MouseButton {
                    button: MouseButton::Middle,
                    pressed: false,
                }
            ),
            ActivationMethod::Key => matches!(
                event,
                InputEvent::Key { key, pressed: false }
                    if key == self.options.navigation.activation_key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::InteractionMode;

    struct TestHost {
        lens: f32,
        lens_writes: Vec<f32>,
        timers_started: u32,
        timers_cancelled: u32,
        nav_requests: u32,
        refuse_navigation: bool,
        menus: Vec<String>,
        warnings: u32,
        view_mode: ViewMode,
        camera_locked: bool,
        ortho_sets: Vec<bool>,
        next_timer: u64,
    }

    impl TestHost {
        fn new() -> Self {
            Self {
                lens: 50.0,
                lens_writes: Vec::new(),
                timers_started: 0,
                timers_cancelled: 0,
                nav_requests: 0,
                refuse_navigation: false,
                menus: Vec::new(),
                warnings: 0,
                view_mode: ViewMode::Perspective,
                camera_locked: false,
                ortho_sets: Vec::new(),
                next_timer: 0,
            }
        }
    }

    impl Host for TestHost {
        fn read_lens(&self) -> f32 {
            self.lens
        }

        fn write_lens(&mut self, lens: f32) {
            self.lens = lens;
            self.lens_writes.push(lens);
        }

        fn start_timer(&mut self, _interval: Duration) -> TimerHandle {
            self.timers_started += 1;
            self.next_timer += 1;
            TimerHandle(self.next_timer)
        }

        fn cancel_timer(&mut self, _timer: TimerHandle) {
            self.timers_cancelled += 1;
        }

        fn request_navigation(&mut self) -> Result<(), HostRefusal> {
            self.nav_requests += 1;
            if self.refuse_navigation {
                return Err(HostRefusal::new("viewpoint is constrained"));
            }
            Ok(())
        }

        fn open_context_menu(&mut self, menu: &str) {
            self.menus.push(menu.to_owned());
        }

        fn view_mode(&self) -> ViewMode {
            self.view_mode
        }

        fn is_camera_locked_view(&self) -> bool {
            self.camera_locked
        }

        fn set_orthographic(&mut self, orthographic: bool) {
            self.ortho_sets.push(orthographic);
        }

        fn interaction_mode(&self) -> InteractionMode {
            InteractionMode::Object
        }

        fn notify_warning(&mut self, _message: &str) {
            self.warnings += 1;
        }
    }

    fn start_session(host: &mut TestHost, options: Options) -> (NavigationSession, Instant) {
        let t0 = Instant::now();
        let session = NavigationSession::start(host, options, Vec2::ZERO, t0)
            .unwrap();
        (session, t0)
    }

    /// Feed `n` timer ticks, 20 ms apart, starting one interval after
    /// `after`. Returns the time of the last tick and the last outcome.
    fn run_ticks(
        session: &mut NavigationSession,
        host: &mut TestHost,
        after: Instant,
        n: u32,
    ) -> (Instant, HandleOutcome) {
        let mut now = after;
        let mut outcome = HandleOutcome::PassThrough;
        for _ in 0..n {
            now += TICK_INTERVAL;
            outcome = session.handle_event(host, InputEvent::Timer, now);
        }
        (now, outcome)
    }

    const TRIGGER_RELEASE: InputEvent<'static> = InputEvent::MouseButton {
        button: MouseButton::Right,
        pressed: false,
    };

    #[test]
    fn tap_opens_menu_on_release() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // 0.04s held, threshold is 0.1s.
        let (now, _) = run_ticks(&mut session, &mut host, t0, 2);
        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        assert_eq!(outcome, HandleOutcome::Finished);
        assert_eq!(host.menus, vec!["context_menu.object".to_owned()]);
        assert_eq!(host.nav_requests, 0);
        assert_eq!(host.timers_cancelled, 1);
        // Navigation never started, so the lens was never touched.
        assert!(host.lens_writes.is_empty());
    }

    #[test]
    fn hold_crosses_threshold_and_navigates() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // Threshold 0.1s is reached on the 5th tick.
        let (_, outcome) = run_ticks(&mut session, &mut host, t0, 5);

        assert_eq!(outcome, HandleOutcome::Consumed);
        assert_eq!(session.phase(), Phase::Navigating);
        assert_eq!(host.nav_requests, 1);
    }

    #[test]
    fn release_after_threshold_skips_menu() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 8); // 0.16s
        assert_eq!(session.phase(), Phase::Navigating);

        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        let _ = run_ticks(&mut session, &mut host, now, 10);

        assert!(host.menus.is_empty());
    }

    #[test]
    fn movement_key_fast_paths_before_threshold() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.decision_threshold = 0.3;
        let (mut session, t0) = start_session(&mut host, options);

        // 0.04s in, far short of the 0.3s threshold.
        let (now, _) = run_ticks(&mut session, &mut host, t0, 2);
        let outcome = session.handle_event(
            &mut host,
            InputEvent::Key { key: "KeyW", pressed: true },
            now,
        );

        assert_eq!(outcome, HandleOutcome::PassThrough);
        assert_eq!(session.phase(), Phase::Navigating);
        assert_eq!(host.nav_requests, 1);
    }

    #[test]
    fn fast_path_then_quick_release_still_earns_menu() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.decision_threshold = 0.3;
        options.lens.enabled = false;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 2);
        let _ = session.handle_event(
            &mut host,
            InputEvent::Key { key: "KeyW", pressed: true },
            now,
        );
        let (now, _) = run_ticks(&mut session, &mut host, now, 2); // 0.08s
        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        assert_eq!(outcome, HandleOutcome::Finished);
        assert_eq!(host.menus.len(), 1);
    }

    #[test]
    fn entry_transition_animates_toward_target() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // Cross the threshold, then keep navigating through the 0.1s
        // transition.
        let (_, _) = run_ticks(&mut session, &mut host, t0, 12);

        assert!(!host.lens_writes.is_empty());
        assert!((host.lens - 30.0).abs() <= VALUE_EPSILON);
        // Interpolated values stay inside [target, baseline].
        for v in &host.lens_writes {
            assert!((30.0..=50.0).contains(v), "overshoot: {v}");
        }
    }

    #[test]
    fn interrupted_entry_snaps_back_to_baseline() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // Navigation starts on tick 5; entry transition runs 0.1s, so
        // releasing on tick 7 interrupts it mid-flight.
        let (now, _) = run_ticks(&mut session, &mut host, t0, 7);
        assert!((host.lens - 50.0).abs() > VALUE_EPSILON);

        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        assert_eq!(outcome, HandleOutcome::Finished);
        assert_eq!(host.lens, 50.0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn exit_transition_restores_baseline_exactly() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // Entry fully completes (threshold 0.1s + transition 0.1s).
        let (now, _) = run_ticks(&mut session, &mut host, t0, 12);
        assert!((host.lens - 30.0).abs() <= VALUE_EPSILON);

        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        assert_eq!(outcome, HandleOutcome::PassThrough);
        assert_eq!(session.phase(), Phase::Finishing);

        // Exit transition runs to completion on subsequent ticks.
        let (_, outcome) = run_ticks(&mut session, &mut host, now, 10);
        assert_eq!(outcome, HandleOutcome::Finished);
        assert_eq!(host.lens, 50.0);
        assert_eq!(host.timers_cancelled, 1);
    }

    #[test]
    fn exit_values_are_monotonic() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 12);
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        let before = host.lens_writes.len();
        let _ = run_ticks(&mut session, &mut host, now, 10);

        let exit_writes = &host.lens_writes[before..];
        assert!(exit_writes.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(exit_writes.last(), Some(&50.0));
    }

    #[test]
    fn instant_mode_never_animates() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.lens.transition_duration = 0.0;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 6);
        assert_eq!(host.lens, 30.0);

        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        assert_eq!(outcome, HandleOutcome::Finished);

        // Exactly two writes: the instant entry and the instant restore.
        assert_eq!(host.lens_writes, vec![30.0, 50.0]);
    }

    #[test]
    fn noop_transition_within_epsilon() {
        let mut host = TestHost::new();
        host.lens = 30.0;
        let mut options = Options::default();
        options.lens.target = 30.0005;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 8);
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        let _ = run_ticks(&mut session, &mut host, now, 4);

        assert!(host.lens_writes.is_empty());
        assert_eq!(host.lens, 30.0);
    }

    #[test]
    fn disabled_lens_feature_never_touches_parameter() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.lens.enabled = false;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 8);
        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        assert_eq!(outcome, HandleOutcome::Finished);
        assert!(host.lens_writes.is_empty());
        assert_eq!(host.nav_requests, 1);
    }

    #[test]
    fn host_refusal_restores_state_and_cancels() {
        let mut host = TestHost::new();
        host.refuse_navigation = true;
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (_, outcome) = run_ticks(&mut session, &mut host, t0, 5);

        assert_eq!(outcome, HandleOutcome::Cancelled);
        assert_eq!(host.warnings, 1);
        assert_eq!(host.timers_cancelled, 1);
        // The entry transition had begun; refusal restored the baseline.
        assert_eq!(host.lens, 50.0);
        assert!(host.menus.is_empty());
    }

    #[test]
    fn cleanup_is_idempotent() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        // Interrupt mid-entry so cleanup has real work to do.
        let (now, _) = run_ticks(&mut session, &mut host, t0, 7);
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);

        let writes = host.lens_writes.len();
        let cancelled = host.timers_cancelled;
        let menus = host.menus.len();

        session.abort(&mut host);
        session.abort(&mut host);

        assert_eq!(host.lens_writes.len(), writes);
        assert_eq!(host.timers_cancelled, cancelled);
        assert_eq!(host.menus.len(), menus);
    }

    #[test]
    fn abort_mid_navigation_restores_everything() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (_, _) = run_ticks(&mut session, &mut host, t0, 7);
        assert_eq!(session.phase(), Phase::Navigating);

        session.abort(&mut host);

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(host.lens, 50.0);
        assert_eq!(host.timers_cancelled, 1);
    }

    #[test]
    fn zero_threshold_never_auto_activates_and_never_menus() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.decision_threshold = 0.0;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, outcome) = run_ticks(&mut session, &mut host, t0, 50);
        assert_eq!(outcome, HandleOutcome::PassThrough);
        assert_eq!(session.phase(), Phase::WaitingForDecision);
        assert_eq!(host.nav_requests, 0);

        let outcome = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        assert_eq!(outcome, HandleOutcome::Finished);
        assert!(host.menus.is_empty());
    }

    #[test]
    fn zero_threshold_fast_path_still_works() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.decision_threshold = 0.0;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 3);
        let _ = session.handle_event(
            &mut host,
            InputEvent::Key { key: "KeyW", pressed: true },
            now,
        );
        assert_eq!(session.phase(), Phase::Navigating);
    }

    #[test]
    fn camera_view_gating_refuses_silently() {
        let mut host = TestHost::new();
        host.view_mode = ViewMode::Camera;
        let mut options = Options::default();
        options.navigation.camera_navigation = false;
        let (mut session, t0) = start_session(&mut host, options);

        let (_, outcome) = run_ticks(&mut session, &mut host, t0, 5);

        assert_eq!(outcome, HandleOutcome::Cancelled);
        assert_eq!(host.nav_requests, 0);
        assert_eq!(host.warnings, 0);
    }

    #[test]
    fn camera_view_requires_lock() {
        let mut host = TestHost::new();
        host.view_mode = ViewMode::Camera;
        host.camera_locked = false;
        let (mut session, t0) = start_session(&mut host, Options::default());
        let (_, outcome) = run_ticks(&mut session, &mut host, t0, 5);
        assert_eq!(outcome, HandleOutcome::Cancelled);

        let mut host = TestHost::new();
        host.view_mode = ViewMode::Camera;
        host.camera_locked = true;
        let (mut session, t0) = start_session(&mut host, Options::default());
        let (_, outcome) = run_ticks(&mut session, &mut host, t0, 5);
        assert_eq!(outcome, HandleOutcome::Consumed);
        assert_eq!(host.nav_requests, 1);
    }

    #[test]
    fn orthographic_view_is_restored_on_exit() {
        let mut host = TestHost::new();
        host.view_mode = ViewMode::Orthographic;
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 12);
        assert!(session.was_orthographic());
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        let _ = run_ticks(&mut session, &mut host, now, 10);

        assert_eq!(host.ortho_sets, vec![true]);
    }

    #[test]
    fn orthographic_restore_can_be_disabled() {
        let mut host = TestHost::new();
        host.view_mode = ViewMode::Orthographic;
        let mut options = Options::default();
        options.navigation.restore_orthographic = false;
        let (mut session, t0) = start_session(&mut host, options);

        let (now, _) = run_ticks(&mut session, &mut host, t0, 12);
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        let _ = run_ticks(&mut session, &mut host, now, 10);

        assert!(host.ortho_sets.is_empty());
    }

    #[test]
    fn immediate_activation_navigates_at_start() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.activation = ActivationMethod::MiddleMouse;
        let (session, _) = start_session(&mut host, options);

        assert_eq!(session.phase(), Phase::Navigating);
        assert_eq!(host.nav_requests, 1);
    }

    #[test]
    fn immediate_activation_release_never_menus() {
        let mut host = TestHost::new();
        let mut options = Options::default();
        options.navigation.activation = ActivationMethod::MiddleMouse;
        let (mut session, t0) = start_session(&mut host, options);

        // Release the middle button almost immediately.
        let (now, _) = run_ticks(&mut session, &mut host, t0, 1);
        let _ = session.handle_event(
            &mut host,
            InputEvent::MouseButton {
                button: MouseButton::Middle,
                pressed: false,
            },
            now,
        );
        let _ = run_ticks(&mut session, &mut host, now, 10);

        assert!(host.menus.is_empty());
    }

    #[test]
    fn immediate_activation_failure_cleans_up() {
        let mut host = TestHost::new();
        host.refuse_navigation = true;
        let mut options = Options::default();
        options.navigation.activation = ActivationMethod::Key;
        let t0 = Instant::now();

        let result =
            NavigationSession::start(&mut host, options, Vec2::ZERO, t0);

        assert!(matches!(result, Err(NavLensError::Refused(_))));
        assert_eq!(host.timers_cancelled, 1);
        assert_eq!(host.lens, 50.0);
    }

    #[test]
    fn cursor_motion_is_noise_while_navigating() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 6);
        let outcome = session.handle_event(
            &mut host,
            InputEvent::CursorMoved { x: 120.0, y: 40.0 },
            now,
        );

        assert_eq!(outcome, HandleOutcome::PassThrough);
        assert_eq!(session.phase(), Phase::Navigating);
    }

    #[test]
    fn other_input_ends_navigation() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 6);
        let _ = session.handle_event(&mut host, InputEvent::Other, now);

        assert_eq!(session.phase(), Phase::Finishing);
        assert!(host.menus.is_empty());
    }

    #[test]
    fn late_events_during_exit_do_not_reschedule_it() {
        let mut host = TestHost::new();
        let (mut session, t0) = start_session(&mut host, Options::default());

        let (now, _) = run_ticks(&mut session, &mut host, t0, 12);
        let _ = session.handle_event(&mut host, TRIGGER_RELEASE, now);
        assert_eq!(session.phase(), Phase::Finishing);

        // Stray input mid-exit passes through; values keep rising
        // monotonically toward the baseline (the exit was not restarted).
        let before = host.lens_writes.len();
        let (now, _) = run_ticks(&mut session, &mut host, now, 2);
        let outcome =
            session.handle_event(&mut host, InputEvent::Other, now);
        assert_eq!(outcome, HandleOutcome::PassThrough);
        let (_, outcome) = run_ticks(&mut session, &mut host, now, 8);

        assert_eq!(outcome, HandleOutcome::Finished);
        let exit_writes = &host.lens_writes[before..];
        assert!(exit_writes.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(host.lens, 50.0);
    }
}
