//! The host boundary: [`Host`], [`BarHost`], [`Surface`].
//!
//! The engine never paints anything itself. Every visible change goes out
//! through a [`Host`] implementation owned by the caller, and every
//! lifecycle transition is mirrored to it for bookkeeping.

use crate::context::{CloseReason, ViewerId};

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// Which display surface a menu occupies for a viewer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    /// The modal grid surface.
    #[default]
    Primary,
    /// A secondary grid opened alongside a primary one.
    Companion,
    /// The viewer's always-visible action row.
    Bar,
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The engine's outbound contract: the only way it causes visible change.
///
/// Called after every open, refresh, navigation, and animation push. The
/// content type `D` is opaque to the engine; `None` means an empty slot.
pub trait Host<D> {
    /// Display `content` in one slot of the surface shown to `viewer`.
    fn render_slot(&mut self, viewer: ViewerId, surface: Surface, slot: usize, content: Option<&D>);

    /// Display a whole page, `slots_per_page` entries in slot order.
    fn render_page(&mut self, viewer: ViewerId, surface: Surface, contents: &[Option<D>]);

    /// Update the title of the surface shown to `viewer`.
    fn set_title(&mut self, _viewer: ViewerId, _surface: Surface, _title: &str) {}

    /// A viewer session started on this surface.
    fn on_open(&mut self, _viewer: ViewerId, _surface: Surface) {}

    /// A viewer session ended on this surface.
    fn on_close(&mut self, _viewer: ViewerId, _surface: Surface, _reason: CloseReason) {}
}

// ---------------------------------------------------------------------------
// BarHost
// ---------------------------------------------------------------------------

/// Extra contract for hosts that expose a fixed action row.
///
/// A bar menu captures the row at open time and hands the snapshot back on
/// close, so whatever the row displayed before `open` is restored exactly.
pub trait BarHost<D>: Host<D> {
    /// Snapshot the current contents of `viewer`'s action row.
    fn capture_row(&mut self, viewer: ViewerId) -> Vec<Option<D>>;

    /// Restore a previously captured row snapshot.
    fn restore_row(&mut self, viewer: ViewerId, row: &[Option<D>]);
}
