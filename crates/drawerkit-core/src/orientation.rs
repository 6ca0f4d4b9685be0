#![forbid(unsafe_code)]

//! Device orientation and its delivery.
//!
//! [`OrientationNotifier`] is an explicit publish/subscribe point owned by
//! the host. Widgets call [`subscribe`](OrientationNotifier::subscribe) when
//! they attach and simply drop the returned [`OrientationSubscription`] when
//! they are torn down; dead subscribers are pruned on the next publish.
//!
//! # Invariants
//!
//! 1. `publish` reaches every live subscription exactly once.
//! 2. A dropped subscription never receives anything and stops counting
//!    toward `subscriber_count()` after the next `publish`.
//! 3. `poll` coalesces: only the most recent pending orientation is kept.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[cfg(feature = "state-persistence")]
use serde::{Deserialize, Serialize};

/// Physical device orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "state-persistence", derive(Serialize, Deserialize))]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    /// Rotated so the leading (notched) edge sits on the left.
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
    Unknown,
}

impl Orientation {
    #[inline]
    pub fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait | Self::PortraitUpsideDown)
    }

    #[inline]
    pub fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }

    /// Orientations that say nothing about layout (device lying flat or
    /// unknown). Layout ignores them.
    #[inline]
    pub fn is_flat(self) -> bool {
        matches!(self, Self::FaceUp | Self::FaceDown | Self::Unknown)
    }

    /// Stable lowercase name, used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::PortraitUpsideDown => "portrait_upside_down",
            Self::LandscapeLeft => "landscape_left",
            Self::LandscapeRight => "landscape_right",
            Self::FaceUp => "face_up",
            Self::FaceDown => "face_down",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Host-owned orientation change source.
#[derive(Debug, Default)]
pub struct OrientationNotifier {
    subscribers: Vec<Sender<Orientation>>,
    last: Option<Orientation>,
}

impl OrientationNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer.
    pub fn subscribe(&mut self) -> OrientationSubscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        OrientationSubscription { rx }
    }

    /// Deliver `orientation` to every live subscriber.
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&mut self, orientation: Orientation) -> usize {
        self.last = Some(orientation);
        self.subscribers.retain(|tx| tx.send(orientation).is_ok());
        crate::trace!(
            orientation = orientation.as_str(),
            subscribers = self.subscribers.len(),
            "orientation published"
        );
        self.subscribers.len()
    }

    /// Subscribers still registered (dropped ones linger until `publish`).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Most recently published orientation.
    pub fn last(&self) -> Option<Orientation> {
        self.last
    }
}

/// Receiving end of an [`OrientationNotifier`]. Drop to unsubscribe.
#[derive(Debug)]
pub struct OrientationSubscription {
    rx: Receiver<Orientation>,
}

impl OrientationSubscription {
    /// Take the latest pending orientation, discarding older ones.
    pub fn poll(&self) -> Option<Orientation> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(orientation) => latest = Some(orientation),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return latest,
            }
        }
    }
}
