//! Per-event interaction records: [`ViewerId`], [`ClickContext`],
//! [`CloseContext`], [`CloseReason`].
//!
//! A context is produced fresh for every delivered event and never reused.

// ---------------------------------------------------------------------------
// ViewerId
// ---------------------------------------------------------------------------

/// An opaque, stable identity for one connected viewer.
///
/// The engine only ever compares and hashes it; hosts map their own session
/// identities onto it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerId(pub u64);

// ---------------------------------------------------------------------------
// CloseReason / CloseContext
// ---------------------------------------------------------------------------

/// Why a (menu, viewer) session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloseReason {
    /// The host closed the surface (viewer disconnected, surface dismissed).
    Host,
    /// The engine closed it (a handler or an engine call asked for it).
    Menu,
}

/// The record handed to a menu's close handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CloseContext {
    pub viewer: ViewerId,
    pub reason: CloseReason,
}

// ---------------------------------------------------------------------------
// ClickContext
// ---------------------------------------------------------------------------

/// An immutable-per-event record describing a single interaction.
///
/// `cancelled` starts `false` (adapters for fixed-bar surfaces pre-cancel,
/// since an overlaid row must suppress the host's default behavior); the
/// final value is returned to the host to suppress its default handling.
/// The target payload, when present, is fixed at construction.
#[derive(Clone, Debug)]
pub struct ClickContext<T = ()> {
    viewer: ViewerId,
    slot: usize,
    cancelled: bool,
    target: Option<T>,
}

impl<T> ClickContext<T> {
    /// Create an untargeted context for `(viewer, slot)`.
    pub fn new(viewer: ViewerId, slot: usize) -> Self {
        Self {
            viewer,
            slot,
            cancelled: false,
            target: None,
        }
    }

    /// Create a context carrying a target payload.
    pub fn with_target(viewer: ViewerId, slot: usize, target: T) -> Self {
        Self {
            viewer,
            slot,
            cancelled: false,
            target: Some(target),
        }
    }

    /// The viewer that interacted.
    #[inline]
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// The page-relative slot that was interacted with.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// The attached target payload, if this interaction targeted something.
    #[inline]
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Whether the host's default behavior should be suppressed.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Suppress the host's default behavior for this interaction.
    #[inline]
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Set the cancellation flag explicitly.
    #[inline]
    pub fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}
