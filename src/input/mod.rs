//! Input handling: the platform-agnostic event types the host's event loop
//! feeds into a [`NavigationSession`](crate::session::NavigationSession).

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, MouseButton};
