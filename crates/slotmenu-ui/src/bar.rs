//! Fixed-bar menus: [`BarMenu`], [`BarConfig`].
//!
//! A bar menu overlays a viewer's always-visible action row instead of a
//! modal grid. Opening captures whatever the row showed at that moment;
//! closing restores the snapshot exactly. Interactions arrive through the
//! [`BarRegistry`](slotmenu_core::registry::BarRegistry) as generic
//! world-interaction and discard events, pre-cancelled so the host's
//! default behavior (using or dropping the real row item) stays suppressed
//! unless a handler opts out.

use std::collections::HashMap;

use slotmenu_core::action::BarAction;
use slotmenu_core::anim::Animate;
use slotmenu_core::context::{ClickContext, CloseReason, ViewerId};
use slotmenu_core::error::MenuError;
use slotmenu_core::host::{BarHost, Host, Surface};
use slotmenu_core::menu::{Menu, MenuConfig};
use slotmenu_core::registry::BarSession;

// ---------------------------------------------------------------------------
// BarConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`BarMenu`]. Bar menus are always a single row.
#[derive(Clone, Debug, Default)]
pub struct BarConfig {
    /// Title pushed to the host on open.
    pub title: Option<String>,
}

// ---------------------------------------------------------------------------
// BarMenu
// ---------------------------------------------------------------------------

/// A menu bound to the viewer's action row, with per-viewer row snapshots.
pub struct BarMenu<D, T = ()> {
    menu: Menu<BarAction, D, T>,
    saved_rows: HashMap<ViewerId, Vec<Option<D>>>,
}

impl<D: Clone + 'static, T: 'static> BarMenu<D, T> {
    /// Create a bar menu.
    pub fn new(config: BarConfig) -> Self {
        let menu = Menu::new(MenuConfig {
            rows: 1,
            title: config.title,
            surface: Surface::Bar,
            ..MenuConfig::default()
        });
        Self {
            menu,
            saved_rows: HashMap::new(),
        }
    }

    /// Swap the viewer's row to this menu's content. The pre-open row is
    /// captured now, not at construction, since it can change in between.
    /// Reopening while already open does not recapture.
    pub fn open<H: BarHost<D>>(&mut self, viewer: ViewerId, host: &mut H) {
        if !self.saved_rows.contains_key(&viewer) {
            let snapshot = host.capture_row(viewer);
            self.saved_rows.insert(viewer, snapshot);
        }
        self.menu.open(viewer, host);
    }

    /// End the session and restore the row captured at open time.
    pub fn close<H: BarHost<D>>(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut H) {
        self.menu.close(viewer, reason, host);
        if let Some(row) = self.saved_rows.remove(&viewer) {
            host.restore_row(viewer, &row);
        }
    }

    /// The underlying menu, for authoring content and handlers.
    #[inline]
    pub fn menu(&self) -> &Menu<BarAction, D, T> {
        &self.menu
    }

    /// Mutable access to the underlying menu.
    #[inline]
    pub fn menu_mut(&mut self) -> &mut Menu<BarAction, D, T> {
        &mut self.menu
    }
}

impl<D: Clone + 'static, T: 'static> BarSession<D, T> for BarMenu<D, T> {
    fn owns_row(&self, viewer: ViewerId) -> bool {
        self.menu.is_open_for(viewer)
    }

    fn deliver(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: BarAction,
        target: Option<T>,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        let mut ctx = match target {
            Some(target) => ClickContext::with_target(viewer, slot, target),
            None => ClickContext::new(viewer, slot),
        };
        // The row is overlaid: suppress host defaults unless a handler
        // opts back out.
        ctx.cancel();
        self.menu.handle_interact(action, &mut ctx, host)
    }
}

impl<D: Clone + 'static, T: 'static> Animate<D> for BarMenu<D, T> {
    fn animate(&mut self, tick: u64, host: &mut dyn Host<D>) {
        self.menu.animate(tick, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingHost;

    const V1: ViewerId = ViewerId(1);
    const V2: ViewerId = ViewerId(2);

    fn pre_open_row() -> Vec<Option<&'static str>> {
        let mut row = vec![None; 9];
        row[0] = Some("sword");
        row[4] = Some("torch");
        row
    }

    #[test]
    fn close_restores_pre_open_row_exactly() {
        let mut host = RecordingHost::new().with_row(V1, pre_open_row());
        let mut bar: BarMenu<&'static str> = BarMenu::new(BarConfig::default());
        bar.menu_mut().set_item(0, "compass", &[0]).unwrap();

        bar.open(V1, &mut host);
        assert!(bar.owns_row(V1));
        assert_eq!(host.last_page(V1, Surface::Bar).unwrap()[0], Some("compass"));

        bar.close(V1, CloseReason::Menu, &mut host);
        assert!(!bar.owns_row(V1));
        assert_eq!(host.rows[&V1], pre_open_row());
    }

    #[test]
    fn reopen_does_not_recapture_menu_content_as_snapshot() {
        let mut host = RecordingHost::new().with_row(V1, pre_open_row());
        let mut bar: BarMenu<&'static str> = BarMenu::new(BarConfig::default());
        bar.open(V1, &mut host);
        // The host now shows menu content; reopening must keep the
        // original snapshot.
        host.rows.insert(V1, vec![Some("menu-content"); 9]);
        bar.open(V1, &mut host);
        bar.close(V1, CloseReason::Menu, &mut host);
        assert_eq!(host.rows[&V1], pre_open_row());
    }

    #[test]
    fn snapshots_are_per_viewer() {
        let mut host = RecordingHost::new()
            .with_row(V1, pre_open_row())
            .with_row(V2, vec![Some("pick"); 9]);
        let mut bar: BarMenu<&'static str> = BarMenu::new(BarConfig::default());
        bar.open(V1, &mut host);
        bar.open(V2, &mut host);
        bar.close(V2, CloseReason::Menu, &mut host);
        assert_eq!(host.rows[&V2], vec![Some("pick"); 9]);
        // V1 is still overlaid.
        assert!(bar.owns_row(V1));
        bar.close(V1, CloseReason::Host, &mut host);
        assert_eq!(host.rows[&V1], pre_open_row());
    }

    #[test]
    fn unhandled_interactions_stay_suppressed() {
        let mut host = RecordingHost::new();
        let mut bar: BarMenu<&'static str> = BarMenu::new(BarConfig::default());
        bar.open(V1, &mut host);
        // No handler registered: the pre-cancelled context suppresses the
        // host default anyway.
        let suppress = bar
            .deliver(V1, 3, BarAction::Discard, None, &mut host)
            .unwrap();
        assert!(suppress);
    }

    #[test]
    fn handler_may_release_the_default() {
        let mut host = RecordingHost::new();
        let mut bar: BarMenu<&'static str> = BarMenu::new(BarConfig::default());
        bar.menu_mut()
            .set_click_handler(3, BarAction::Discard, |_, ctx, _| {
                ctx.set_cancelled(false);
                Ok(())
            }, &[0])
            .unwrap();
        bar.open(V1, &mut host);
        let suppress = bar
            .deliver(V1, 3, BarAction::Discard, None, &mut host)
            .unwrap();
        assert!(!suppress);
    }

    #[test]
    fn targeted_interactions_carry_the_payload() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(None));
        let sink = seen.clone();
        let mut host = RecordingHost::new();
        let mut bar: BarMenu<&'static str, (i32, i32)> = BarMenu::new(BarConfig::default());
        bar.menu_mut()
            .set_click_handler(0, BarAction::PrimaryTargeted, move |_, ctx, _| {
                *sink.borrow_mut() = ctx.target().copied();
                Ok(())
            }, &[0])
            .unwrap();
        bar.open(V1, &mut host);
        bar.deliver(V1, 0, BarAction::PrimaryTargeted, Some((3, 7)), &mut host)
            .unwrap();
        assert_eq!(*seen.borrow(), Some((3, 7)));
    }
}
