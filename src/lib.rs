// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Controller math compares against 0.0, 1.0 and epsilon constants
#![allow(clippy::float_cmp)]

//! Modal input-disambiguation and focal-length transition controller for
//! 3D viewport navigation.
//!
//! Navlens is embedded in a host 3D application. When the user presses
//! the navigation trigger it opens a decision window: a quick tap opens
//! the host's context menu, a hold (or a movement key) starts the host's
//! native first-person navigation mode. While navigation runs, the
//! viewport focal length is animated to a configured value and guaranteed
//! to be restored exactly once when the session ends — normal release,
//! interruption, or forced cancellation alike.
//!
//! # Key entry points
//!
//! - [`session::NavigationSession`] - the per-activation state machine
//! - [`transition::TransitionEngine`] - the focal-length transition engine
//! - [`keymap::KeymapCoordinator`] - suspend/restore of host key bindings
//! - [`host::Host`] - the trait the embedding application implements
//! - [`options::Options`] - runtime configuration (timing, lens, keys)
//!
//! # Architecture
//!
//! Everything runs on the host's event-processing thread: the host feeds
//! input and timer events into
//! [`NavigationSession::handle_event`](session::NavigationSession::handle_event),
//! every handler returns immediately, and the ~50 Hz periodic timer is
//! the sole source of re-entry absent user input. One session exists per
//! activation and no state survives between activations.

pub mod error;
pub mod host;
pub mod input;
pub mod keymap;
pub mod menu;
pub mod options;
pub mod session;
pub mod transition;
pub mod util;
