//! Companion (bottom) menus.
//!
//! A companion menu is an ordinary grid menu on [`Surface::Companion`],
//! opened alongside a primary one; the engine does not treat it specially.
//! The coupling lives entirely in presets — see
//! [`presets::cross_pagination_row`](crate::presets::cross_pagination_row),
//! which lets a companion menu turn the primary menu's pages.

use std::cell::RefCell;
use std::rc::Rc;

use slotmenu_core::context::{CloseReason, ViewerId};
use slotmenu_core::host::{Host, Surface};
use slotmenu_core::menu::{Menu, MenuConfig};
use slotmenu_core::ActionKind;

/// Configuration for a companion grid with `rows` rows.
pub fn companion_config(rows: usize) -> MenuConfig {
    MenuConfig {
        rows,
        surface: Surface::Companion,
        ..MenuConfig::default()
    }
}

/// Open `primary` and `companion` together for `viewer`.
pub fn open_pair<D, A1, T1, A2, T2>(
    primary: &Rc<RefCell<Menu<A1, D, T1>>>,
    companion: &Rc<RefCell<Menu<A2, D, T2>>>,
    viewer: ViewerId,
    host: &mut dyn Host<D>,
) where
    D: Clone + 'static,
    A1: ActionKind,
    A2: ActionKind,
    T1: 'static,
    T2: 'static,
{
    primary.borrow_mut().open(viewer, host);
    companion.borrow_mut().open(viewer, host);
}

/// Close both menus of a pair for `viewer`, companion first.
pub fn close_pair<D, A1, T1, A2, T2>(
    primary: &Rc<RefCell<Menu<A1, D, T1>>>,
    companion: &Rc<RefCell<Menu<A2, D, T2>>>,
    viewer: ViewerId,
    reason: CloseReason,
    host: &mut dyn Host<D>,
) where
    D: Clone + 'static,
    A1: ActionKind,
    A2: ActionKind,
    T1: 'static,
    T2: 'static,
{
    companion.borrow_mut().close(viewer, reason, host);
    primary.borrow_mut().close(viewer, reason, host);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{cross_pagination_row, PaginationIcons};
    use crate::testutil::{HostEvent, RecordingHost};
    use slotmenu_core::action::GridAction;
    use slotmenu_core::context::ClickContext;
    use slotmenu_core::menu::{GridMenu, ViewMode};

    const V1: ViewerId = ViewerId(1);

    fn icons() -> PaginationIcons<&'static str> {
        PaginationIcons {
            prev: "prev",
            prev_disabled: "prev-off",
            next: "next",
            next_disabled: "next-off",
        }
    }

    fn shared_two_page_primary() -> Rc<RefCell<GridMenu<&'static str>>> {
        let mut menu: GridMenu<&'static str> = GridMenu::new(MenuConfig {
            rows: 1,
            view_mode: ViewMode::Shared,
            ..MenuConfig::default()
        });
        menu.set_item(0, "page-two", &[1]).unwrap();
        Rc::new(RefCell::new(menu))
    }

    #[test]
    fn pair_opens_both_surfaces() {
        let primary = shared_two_page_primary();
        let companion = Rc::new(RefCell::new(GridMenu::<&'static str>::new(
            companion_config(1),
        )));
        let mut host = RecordingHost::new();
        open_pair(&primary, &companion, V1, &mut host);
        assert!(host.last_page(V1, Surface::Primary).is_some());
        assert!(host.last_page(V1, Surface::Companion).is_some());

        close_pair(&primary, &companion, V1, CloseReason::Menu, &mut host);
        let closed: Vec<Surface> = host
            .events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Closed { surface, .. } => Some(*surface),
                _ => None,
            })
            .collect();
        assert_eq!(closed, vec![Surface::Companion, Surface::Primary]);
    }

    #[test]
    fn companion_turns_primary_pages() {
        let primary = shared_two_page_primary();
        let mut companion: GridMenu<&'static str> = GridMenu::new(companion_config(1));
        companion.add_preset(cross_pagination_row(
            primary.clone(),
            icons(),
            0,
            0,
            1,
            false,
            &[GridAction::Primary],
        ));
        let mut host = RecordingHost::new();
        primary.borrow_mut().open(V1, &mut host);
        companion.open(V1, &mut host);

        // On the first page the back arrow renders disabled.
        assert_eq!(host.shown(V1, Surface::Companion, 0), Some("prev-off"));
        assert_eq!(host.shown(V1, Surface::Companion, 1), Some("next"));

        let mut ctx = ClickContext::new(V1, 1);
        assert!(companion
            .handle_interact(GridAction::Primary, &mut ctx, &mut host)
            .unwrap());
        assert_eq!(primary.borrow().shared_page(), 1);
        assert_eq!(host.shown(V1, Surface::Primary, 0), Some("page-two"));
        // The refresh triggered by the handler re-reads the bounds.
        assert_eq!(host.shown(V1, Surface::Companion, 0), Some("prev"));
        assert_eq!(host.shown(V1, Surface::Companion, 1), Some("next-off"));

        // Clicking next at the last page is a no-op for the primary.
        let mut ctx = ClickContext::new(V1, 1);
        companion
            .handle_interact(GridAction::Primary, &mut ctx, &mut host)
            .unwrap();
        assert_eq!(primary.borrow().shared_page(), 1);

        // And the back arrow works from the far side.
        let mut ctx = ClickContext::new(V1, 0);
        companion
            .handle_interact(GridAction::Primary, &mut ctx, &mut host)
            .unwrap();
        assert_eq!(primary.borrow().shared_page(), 0);
        assert_eq!(host.shown(V1, Surface::Companion, 0), Some("prev-off"));
    }
}
