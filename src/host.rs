//! The seam between the controller and its embedding application.
//!
//! The controller never touches the host directly: every viewport read or
//! write, timer, menu call, and notification goes through the [`Host`]
//! trait. The host application implements it once and hands a `&mut`
//! reference into [`NavigationSession::handle_event`](crate::session::NavigationSession::handle_event)
//! on every event.

use web_time::Duration;

use crate::error::HostRefusal;
use crate::menu::InteractionMode;

/// Opaque handle for a periodic timer started through [`Host::start_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// How the viewport is currently projecting the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Free perspective view.
    Perspective,
    /// Orthographic view.
    Orthographic,
    /// Looking through a scene camera object.
    Camera,
}

/// Services the embedding application provides to the controller.
///
/// All methods are expected to return immediately; the controller issues at
/// most one host call per handled event (plus parameter writes while a
/// transition is animating).
pub trait Host {
    /// Read the animated camera parameter (viewport focal length).
    fn read_lens(&self) -> f32;

    /// Write the animated camera parameter (viewport focal length).
    fn write_lens(&mut self, lens: f32);

    /// Start a periodic timer delivering [`InputEvent::Timer`](crate::input::InputEvent::Timer)
    /// events at the given interval.
    fn start_timer(&mut self, interval: Duration) -> TimerHandle;

    /// Cancel a previously started timer.
    fn cancel_timer(&mut self, timer: TimerHandle);

    /// Ask the host to begin its native first-person navigation mode.
    ///
    /// # Errors
    ///
    /// Returns [`HostRefusal`] when navigation cannot start, e.g. a locked
    /// or constrained viewpoint. The session treats this as a local abort:
    /// full cleanup, then cancellation.
    fn request_navigation(&mut self) -> Result<(), HostRefusal>;

    /// Open the context menu with the given identifier.
    ///
    /// Invoked at most once per session, only during final cleanup, only
    /// when the session decided the activation was a menu tap.
    fn open_context_menu(&mut self, menu: &str);

    /// Current viewport projection mode.
    fn view_mode(&self) -> ViewMode;

    /// Whether the scene camera is locked to the viewport. Only meaningful
    /// in [`ViewMode::Camera`].
    fn is_camera_locked_view(&self) -> bool;

    /// Switch the viewport between orthographic and perspective projection.
    fn set_orthographic(&mut self, orthographic: bool);

    /// The host's current interaction mode, used to pick the context menu.
    fn interaction_mode(&self) -> InteractionMode;

    /// Show a transient, non-fatal warning to the user.
    fn notify_warning(&mut self, message: &str);
}
