#![forbid(unsafe_code)]

//! The two resting states of a drawer.

use std::fmt;

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

/// Whether the drawer is extended or retracted to its handle.
///
/// Exactly one of these holds whenever no transition is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub enum DrawerState {
    Open,
    #[default]
    Closed,
}

impl DrawerState {
    /// The other state. `s.opposite().opposite() == s`.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    #[inline]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for DrawerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for state in [DrawerState::Open, DrawerState::Closed] {
            assert_eq!(state.opposite().opposite(), state);
            assert_ne!(state.opposite(), state);
        }
    }

    #[test]
    fn default_is_closed() {
        assert!(DrawerState::default().is_closed());
    }

    #[test]
    fn display_names() {
        assert_eq!(DrawerState::Open.to_string(), "open");
        assert_eq!(DrawerState::Closed.to_string(), "closed");
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&DrawerState::Open).unwrap();
        assert_eq!(json, "\"Open\"");
    }
}
