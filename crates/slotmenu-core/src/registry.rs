//! Session registries: [`MenuRegistry`] for grid menus, [`BarRegistry`]
//! for fixed-bar menus.
//!
//! The registries are the inbound boundary: the host adapter hands raw
//! events here, and the registry resolves which open menu they belong to,
//! builds the interaction context, and dispatches. They also track the
//! per-viewer navigation history that lets a closed sub-menu fall back to
//! its parent.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::action::{BarAction, GridAction};
use crate::context::{ClickContext, CloseReason, ViewerId};
use crate::error::MenuError;
use crate::host::Host;
use crate::menu::Menu;

// ---------------------------------------------------------------------------
// GridSession
// ---------------------------------------------------------------------------

/// Object-safe view of an open-able grid menu, erasing the target payload
/// type so menus with different payloads share one registry.
pub trait GridSession<D> {
    /// See [`Menu::open`].
    fn open(&mut self, viewer: ViewerId, host: &mut dyn Host<D>);

    /// See [`Menu::close`].
    fn close(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut dyn Host<D>);

    /// Build an untargeted context for `(viewer, slot)` and dispatch.
    fn deliver(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: GridAction,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError>;

    /// Whether `viewer` currently has this menu open.
    fn is_open_for(&self, viewer: ViewerId) -> bool;
}

impl<D: Clone + 'static, T: 'static> GridSession<D> for Menu<GridAction, D, T> {
    fn open(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        Menu::open(self, viewer, host);
    }

    fn close(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut dyn Host<D>) {
        Menu::close(self, viewer, reason, host);
    }

    fn deliver(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: GridAction,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        let mut ctx = ClickContext::new(viewer, slot);
        self.handle_interact(action, &mut ctx, host)
    }

    fn is_open_for(&self, viewer: ViewerId) -> bool {
        Menu::is_open_for(self, viewer)
    }
}

/// Shared handle to a registered grid session.
pub type SessionHandle<D> = Rc<RefCell<dyn GridSession<D>>>;

// ---------------------------------------------------------------------------
// MenuRegistry
// ---------------------------------------------------------------------------

/// Resolves which open grid menu a raw event belongs to, by viewer.
///
/// Re-entrancy: the registry borrows a session for the duration of a
/// dispatch. Hosts reacting to `on_close` during that dispatch must defer
/// their [`handle_closed`](MenuRegistry::handle_closed) call until the
/// dispatch returns (re-enter the logical thread, never recurse into the
/// registry from inside a handler).
pub struct MenuRegistry<D> {
    sessions: HashMap<ViewerId, SessionHandle<D>>,
    parents: HashMap<ViewerId, Vec<SessionHandle<D>>>,
}

impl<D> MenuRegistry<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            parents: HashMap::new(),
        }
    }

    /// The session `viewer` currently has open, if any.
    pub fn session(&self, viewer: ViewerId) -> Option<SessionHandle<D>> {
        self.sessions.get(&viewer).cloned()
    }

    /// Open `menu` for `viewer`, closing and forgetting any previous menu
    /// (the navigation history is cleared).
    pub fn open(&mut self, viewer: ViewerId, menu: SessionHandle<D>, host: &mut dyn Host<D>) {
        if let Some(previous) = self.sessions.remove(&viewer) {
            if !Rc::ptr_eq(&previous, &menu) {
                previous.borrow_mut().close(viewer, CloseReason::Menu, host);
            }
        }
        self.parents.remove(&viewer);
        menu.borrow_mut().open(viewer, host);
        self.sessions.insert(viewer, menu);
    }

    /// Open `menu` for `viewer` as a sub-menu: the current menu is closed
    /// and pushed onto the navigation history, so [`back`](Self::back) or a
    /// host-initiated close returns to it.
    pub fn open_sub(&mut self, viewer: ViewerId, menu: SessionHandle<D>, host: &mut dyn Host<D>) {
        if let Some(previous) = self.sessions.remove(&viewer) {
            if !Rc::ptr_eq(&previous, &menu) {
                previous.borrow_mut().close(viewer, CloseReason::Menu, host);
                self.parents.entry(viewer).or_default().push(previous);
            }
        }
        menu.borrow_mut().open(viewer, host);
        self.sessions.insert(viewer, menu);
    }

    /// Close the current menu and reopen the parent from the navigation
    /// history. Returns whether a parent was reopened.
    pub fn back(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) -> bool {
        if let Some(current) = self.sessions.remove(&viewer) {
            current.borrow_mut().close(viewer, CloseReason::Menu, host);
        }
        match self.parents.get_mut(&viewer).and_then(Vec::pop) {
            Some(parent) => {
                parent.borrow_mut().open(viewer, host);
                self.sessions.insert(viewer, parent);
                true
            }
            None => false,
        }
    }

    /// Engine-initiated close of `viewer`'s current menu; clears the
    /// navigation history.
    pub fn close(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        self.parents.remove(&viewer);
        if let Some(current) = self.sessions.remove(&viewer) {
            current.borrow_mut().close(viewer, CloseReason::Menu, host);
        }
    }

    /// Dispatch a grid click for `viewer`. Returns whether the host should
    /// suppress its default handling.
    pub fn deliver_click(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: GridAction,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        let Some(session) = self.sessions.get(&viewer).cloned() else {
            return Ok(false);
        };
        session.borrow_mut().deliver(viewer, slot, action, host)
    }

    /// The host observed `viewer`'s surface closing (dismissed or closed by
    /// a handler). Ends the session if still live and reopens the parent
    /// menu from the navigation history, if any.
    pub fn handle_closed(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        if let Some(current) = self.sessions.remove(&viewer) {
            current.borrow_mut().close(viewer, CloseReason::Host, host);
        }
        match self.parents.get_mut(&viewer).and_then(Vec::pop) {
            Some(parent) => {
                parent.borrow_mut().open(viewer, host);
                self.sessions.insert(viewer, parent);
            }
            None => {
                self.parents.remove(&viewer);
            }
        }
    }

    /// `viewer` disconnected: close everything, keep nothing to return to.
    pub fn handle_disconnect(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        self.parents.remove(&viewer);
        if let Some(current) = self.sessions.remove(&viewer) {
            current.borrow_mut().close(viewer, CloseReason::Host, host);
        }
    }
}

impl<D> Default for MenuRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// BarSession / BarRegistry
// ---------------------------------------------------------------------------

/// Object-safe view of a fixed-bar menu for event translation.
pub trait BarSession<D, T = ()> {
    /// Membership test: does this event's row belong to this menu for
    /// `viewer`?
    fn owns_row(&self, viewer: ViewerId) -> bool;

    /// Build a (pre-cancelled) context and dispatch a bar interaction.
    fn deliver(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: BarAction,
        target: Option<T>,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError>;
}

/// The registered fixed-bar menus and their event-translation entry point.
///
/// World-interaction and discard events are not addressed to a menu; the
/// registry finds the menu owning the viewer's row (if any) and forwards.
pub struct BarRegistry<D, T = ()> {
    menus: Vec<Rc<RefCell<dyn BarSession<D, T>>>>,
}

impl<D, T> BarRegistry<D, T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { menus: Vec::new() }
    }

    /// Register a bar menu for event translation.
    pub fn register(&mut self, menu: Rc<RefCell<dyn BarSession<D, T>>>) {
        self.menus.push(menu);
    }

    /// Remove a previously registered bar menu.
    pub fn unregister(&mut self, menu: &Rc<RefCell<dyn BarSession<D, T>>>) {
        self.menus.retain(|m| !Rc::ptr_eq(m, menu));
    }

    /// Translate a world-interaction event into a bar dispatch. `slot` is
    /// the viewer's selected row slot; `target` is present for the
    /// targeted action variants. Returns whether the host should suppress
    /// its default handling.
    pub fn deliver_interact(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: BarAction,
        target: Option<T>,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        let owner = self
            .menus
            .iter()
            .find(|menu| menu.borrow().owns_row(viewer))
            .cloned();
        match owner {
            Some(menu) => menu.borrow_mut().deliver(viewer, slot, action, target, host),
            None => Ok(false),
        }
    }

    /// Translate an item-discard event into a bar dispatch.
    pub fn deliver_discard(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        self.deliver_interact(viewer, slot, BarAction::Discard, None, host)
    }
}

impl<D, T> Default for BarRegistry<D, T> {
    fn default() -> Self {
        Self::new()
    }
}
