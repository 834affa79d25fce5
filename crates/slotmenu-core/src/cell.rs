//! Cell authoring and storage: [`Button`] and [`CellStore`].
//!
//! A cell is displayable content plus a per-action handler table bound to
//! one slot. [`Button`] is the authoring-side bundle; [`CellStore`] is the
//! per-page mapping the engine reads to render and dispatch.

use std::collections::HashMap;

use crate::action::ActionKind;
use crate::context::ClickContext;
use crate::error::HandlerResult;
use crate::host::Host;
use crate::menu::{Handler, Menu};

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// Content plus handlers for one slot, installed in a single call via
/// [`Menu::set_button`](crate::menu::Menu::set_button).
pub struct Button<A: ActionKind, D, T = ()> {
    content: Option<D>,
    handlers: Vec<(A, Handler<A, D, T>)>,
}

impl<A: ActionKind, D: 'static, T: 'static> Button<A, D, T> {
    /// Create an empty button.
    pub fn new() -> Self {
        Self {
            content: None,
            handlers: Vec::new(),
        }
    }

    /// Set the displayed content (builder).
    pub fn with_content(mut self, content: D) -> Self {
        self.content = Some(content);
        self
    }

    /// Add a click handler for `action` (builder). A later registration
    /// for the same action wins.
    pub fn with_handler<F>(mut self, action: A, handler: F) -> Self
    where
        F: Fn(&mut Menu<A, D, T>, &mut ClickContext<T>, &mut dyn Host<D>) -> HandlerResult
            + 'static,
    {
        self.handlers.push((action, std::rc::Rc::new(handler)));
        self
    }

    /// The content set on this button, if any.
    #[inline]
    pub fn content(&self) -> Option<&D> {
        self.content.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<D>, Vec<(A, Handler<A, D, T>)>) {
        (self.content, self.handlers)
    }
}

impl<A: ActionKind, D: 'static, T: 'static> Default for Button<A, D, T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// CellStore
// ---------------------------------------------------------------------------

/// Per-page mapping from slot to displayed content and handler table.
///
/// Keys are unique; a later write for the same `(slot)` or `(slot, action)`
/// replaces the earlier one.
pub struct CellStore<A: ActionKind, D, T = ()> {
    items: HashMap<usize, D>,
    handlers: HashMap<(usize, A), Handler<A, D, T>>,
}

impl<A: ActionKind, D, T> CellStore<A, D, T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            handlers: HashMap::new(),
        }
    }

    /// Set the content of `slot`.
    #[inline]
    pub fn set_item(&mut self, slot: usize, content: D) {
        self.items.insert(slot, content);
    }

    /// The content of `slot`, if any.
    #[inline]
    pub fn item(&self, slot: usize) -> Option<&D> {
        self.items.get(&slot)
    }

    /// Register a handler for `(slot, action)`.
    #[inline]
    pub fn set_handler(&mut self, slot: usize, action: A, handler: Handler<A, D, T>) {
        self.handlers.insert((slot, action), handler);
    }

    /// The handler for `(slot, action)`, if any.
    #[inline]
    pub fn handler(&self, slot: usize, action: A) -> Option<&Handler<A, D, T>> {
        self.handlers.get(&(slot, action))
    }

    /// Whether the store holds neither content nor handlers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.handlers.is_empty()
    }

    /// Overlay `other` onto `self`; entries in `other` win.
    pub fn merge(&mut self, other: CellStore<A, D, T>) {
        self.items.extend(other.items);
        self.handlers.extend(other.handlers);
    }
}

impl<A: ActionKind, D, T> Default for CellStore<A, D, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ActionKind, D: Clone, T> Clone for CellStore<A, D, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            handlers: self.handlers.clone(),
        }
    }
}
