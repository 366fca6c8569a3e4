/// Platform-agnostic input events.
///
/// These are fed into
/// [`NavigationSession::handle_event`](crate::session::NavigationSession::handle_event)
/// by the host's event loop, in the order the host produced them.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyW"`, `"Space"`, `"ArrowUp"`, etc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent<'a> {
    /// Periodic tick from the timer the session started at activation.
    Timer,
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Keyboard key pressed or released.
    Key {
        /// Physical key string (`KeyCode` debug format).
        key: &'a str,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Any other host event (scroll, focus change, window message, ...).
    ///
    /// While navigating, these end the session; while waiting for a
    /// decision they pass through untouched.
    Other,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}
