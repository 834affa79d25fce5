//! Error types: [`MenuError`] for addressing preconditions, [`BoxError`]
//! for faults raised inside user handlers and presets.

use thiserror::Error;

/// The error type produced by user handlers, presets and backing sources.
///
/// These are caught at the dispatch/build boundary, logged, and never
/// propagated into host event delivery.
pub type BoxError = Box<dyn std::error::Error>;

/// Result type for click handlers and close handlers.
pub type HandlerResult = Result<(), BoxError>;

/// A precondition violation at an engine call site.
///
/// Addressing errors fail fast; they are never silently clamped. The only
/// documented clamp is page navigation, which saturates at the page bounds.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A slot index outside `[0, slots_per_page)`.
    #[error("slot {slot} out of range (page holds {slots_per_page} slots)")]
    SlotOutOfRange { slot: usize, slots_per_page: usize },

    /// A page index outside `[0, pages)`.
    #[error("page {page} out of range (menu has {pages} pages)")]
    PageOutOfRange { page: usize, pages: usize },

    /// An animation interval of zero ticks.
    #[error("animation interval must be at least one tick")]
    ZeroInterval,
}
