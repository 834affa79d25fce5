//! The preset processor: [`Preset`], [`PageView`], [`PresetSink`].
//!
//! A preset is a pure, replayable function that computes a subset of a
//! page's cells and handlers from an explicit snapshot of menu state. It is
//! re-run, in registration order, every time a page is (re)built; later
//! presets overwrite earlier ones for both content and handler. This is how
//! reusable decorations (fillers, back buttons, pagination arrows) compose
//! without the engine knowing about them.

use std::rc::Rc;

use crate::action::ActionKind;
use crate::cell::CellStore;
use crate::error::{BoxError, MenuError};
use crate::menu::Handler;

// ---------------------------------------------------------------------------
// PageView
// ---------------------------------------------------------------------------

/// Snapshot of menu state handed to a preset for one page build.
///
/// Presets receive this instead of the menu itself, so a preset instance
/// can be reused across pages and menus without hidden aliasing.
#[derive(Copy, Clone, Debug)]
pub struct PageView {
    /// The page being built.
    pub page: usize,
    /// Lower navigation clamp bound.
    pub min_page: usize,
    /// Upper navigation clamp bound.
    pub max_page: usize,
    /// Fixed slot count per page.
    pub slots_per_page: usize,
    /// Fixed row count per page.
    pub rows: usize,
    /// Number of viewers currently registered on the menu.
    pub viewer_count: usize,
}

// ---------------------------------------------------------------------------
// PresetSink
// ---------------------------------------------------------------------------

/// Injection point bound to the page being built.
///
/// Placements are collected per preset and merged into the page only if the
/// preset returns `Ok`; an erroring preset changes nothing.
pub struct PresetSink<A: ActionKind, D, T = ()> {
    slots_per_page: usize,
    store: CellStore<A, D, T>,
}

impl<A: ActionKind, D, T> PresetSink<A, D, T> {
    pub(crate) fn new(slots_per_page: usize) -> Self {
        Self {
            slots_per_page,
            store: CellStore::new(),
        }
    }

    /// Place content at a page-relative slot.
    pub fn item(&mut self, slot: usize, content: D) -> Result<(), MenuError> {
        self.check(slot)?;
        self.store.set_item(slot, content);
        Ok(())
    }

    /// Place a click handler at a page-relative slot.
    pub fn handler(
        &mut self,
        slot: usize,
        action: A,
        handler: Handler<A, D, T>,
    ) -> Result<(), MenuError> {
        self.check(slot)?;
        self.store.set_handler(slot, action, handler);
        Ok(())
    }

    pub(crate) fn into_store(self) -> CellStore<A, D, T> {
        self.store
    }

    fn check(&self, slot: usize) -> Result<(), MenuError> {
        if slot >= self.slots_per_page {
            return Err(MenuError::SlotOutOfRange {
                slot,
                slots_per_page: self.slots_per_page,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// A replayable page decorator. See the module docs for the contract.
pub type Preset<A, D, T = ()> = Rc<dyn Fn(&PageView, &mut PresetSink<A, D, T>) -> Result<(), BoxError>>;
