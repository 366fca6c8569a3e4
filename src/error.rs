//! Crate-level error types.

use std::fmt;

/// The host declined to start its native navigation mode.
///
/// Carried inside [`NavLensError::Refused`] and surfaced to the user as a
/// transient warning notification; the owning session still performs full
/// cleanup before ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRefusal {
    /// Host-provided reason (e.g. a constrained or locked viewpoint).
    pub reason: String,
}

impl HostRefusal {
    /// Create a refusal with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for HostRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "navigation refused: {}", self.reason)
    }
}

/// Errors produced by the navlens crate.
#[derive(Debug)]
pub enum NavLensError {
    /// Native navigation could not start.
    Refused(HostRefusal),
    /// A negative duration reached the transition engine.
    InvalidDuration(f32),
    /// Options failed boundary validation.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for NavLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused(r) => write!(f, "{r}"),
            Self::InvalidDuration(d) => {
                write!(f, "invalid transition duration: {d}")
            }
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for NavLensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HostRefusal> for NavLensError {
    fn from(r: HostRefusal) -> Self {
        Self::Refused(r)
    }
}

impl From<std::io::Error> for NavLensError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
