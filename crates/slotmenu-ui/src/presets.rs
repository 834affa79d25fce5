//! Stock presets: fills, frame, back button, pagination controls.
//!
//! Each constructor returns a [`Preset`] closure over its own configuration
//! only; everything about the menu arrives through the page snapshot at
//! build time. The engine replays them in registration order, so layering
//! is just registration order: fill the background first, then overlay
//! navigation, then page-specific content.

use std::cell::RefCell;
use std::rc::Rc;

use slotmenu_core::context::CloseReason;
use slotmenu_core::error::MenuError;
use slotmenu_core::layout;
use slotmenu_core::menu::{Handler, Menu};
use slotmenu_core::preset::Preset;
use slotmenu_core::ActionKind;

// ---------------------------------------------------------------------------
// Icon bundles
// ---------------------------------------------------------------------------

/// Icons for the back button.
#[derive(Clone, Debug)]
pub struct BackIcons<D> {
    pub active: D,
    pub disabled: D,
}

/// Icons for a previous/next pagination pair.
#[derive(Clone, Debug)]
pub struct PaginationIcons<D> {
    pub prev: D,
    pub prev_disabled: D,
    pub next: D,
    pub next_disabled: D,
}

// ---------------------------------------------------------------------------
// Fills
// ---------------------------------------------------------------------------

/// Fill every slot of the page with `content`.
pub fn fill<A, D, T>(content: D) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    Rc::new(move |view, sink| {
        for slot in 0..view.slots_per_page {
            sink.item(slot, content.clone())?;
        }
        Ok(())
    })
}

/// Fill one row of the page with `content`.
pub fn fill_row<A, D, T>(content: D, row: usize) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    Rc::new(move |_, sink| {
        for slot in layout::row_slots(row) {
            sink.item(slot, content.clone())?;
        }
        Ok(())
    })
}

/// Fill one column of the page with `content`.
pub fn fill_column<A, D, T>(content: D, column: usize) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    Rc::new(move |view, sink| {
        for slot in layout::column_slots(column, view.slots_per_page) {
            sink.item(slot, content.clone())?;
        }
        Ok(())
    })
}

/// Fill the outer ring of the page with `content`.
pub fn fill_frame<A, D, T>(content: D) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    Rc::new(move |view, sink| {
        for slot in layout::frame_slots(view.slots_per_page) {
            sink.item(slot, content.clone())?;
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Back button
// ---------------------------------------------------------------------------

/// A button that closes the menu for the clicking viewer.
///
/// `disabled` only affects rendering; hosts that keep a navigation history
/// reopen the parent menu when they observe the close.
pub fn back<A, D, T>(slot: usize, disabled: bool, icons: BackIcons<D>, actions: &[A]) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    let actions = actions.to_vec();
    let close: Handler<A, D, T> = Rc::new(|menu, ctx, host| {
        ctx.cancel();
        menu.close(ctx.viewer(), CloseReason::Menu, host);
        Ok(())
    });
    Rc::new(move |_, sink| {
        let icon = if disabled {
            icons.disabled.clone()
        } else {
            icons.active.clone()
        };
        sink.item(slot, icon)?;
        for &action in &actions {
            sink.handler(slot, action, close.clone())?;
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Previous/next page icons in one row, active or disabled from the clamp
/// bounds. With `hide_disabled`, an unusable arrow is left to lower layers
/// instead of rendered disabled.
pub fn pagination_row<A, D, T>(
    icons: PaginationIcons<D>,
    row: usize,
    prev_column: usize,
    next_column: usize,
    hide_disabled: bool,
    actions: &[A],
) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    pagination(
        icons,
        layout::slot_at(row, prev_column),
        layout::slot_at(row, next_column),
        hide_disabled,
        actions,
    )
}

/// Previous/next page icons in one column.
pub fn pagination_column<A, D, T>(
    icons: PaginationIcons<D>,
    column: usize,
    prev_row: usize,
    next_row: usize,
    hide_disabled: bool,
    actions: &[A],
) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    pagination(
        icons,
        layout::slot_at(prev_row, column),
        layout::slot_at(next_row, column),
        hide_disabled,
        actions,
    )
}

fn pagination<A, D, T>(
    icons: PaginationIcons<D>,
    prev_slot: usize,
    next_slot: usize,
    hide_disabled: bool,
    actions: &[A],
) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    let actions = actions.to_vec();
    let prev: Handler<A, D, T> = Rc::new(|menu, ctx, host| {
        ctx.cancel();
        menu.open_previous_page(ctx.viewer(), host);
        Ok(())
    });
    let next: Handler<A, D, T> = Rc::new(|menu, ctx, host| {
        ctx.cancel();
        menu.open_next_page(ctx.viewer(), host);
        Ok(())
    });
    Rc::new(move |view, sink| {
        let at_min = view.page <= view.min_page;
        let at_max = view.page >= view.max_page;
        if at_min {
            if !hide_disabled {
                sink.item(prev_slot, icons.prev_disabled.clone())?;
            }
        } else {
            sink.item(prev_slot, icons.prev.clone())?;
            for &action in &actions {
                sink.handler(prev_slot, action, prev.clone())?;
            }
        }
        if at_max {
            if !hide_disabled {
                sink.item(next_slot, icons.next_disabled.clone())?;
            }
        } else {
            sink.item(next_slot, icons.next.clone())?;
            for &action in &actions {
                sink.handler(next_slot, action, next.clone())?;
            }
        }
        Ok(())
    })
}

/// Pagination controls that turn pages of a *different* menu.
///
/// Used on a companion menu to navigate the primary one. The other menu's
/// bounds are read at handler-invocation time for the navigation decision;
/// the icon state then comes from the preset replay triggered by the
/// refresh, so a stale placement never decides anything. Icon placement at
/// build time uses the other menu's shared cursor — the controlled menu is
/// expected to run in [`ViewMode::Shared`](slotmenu_core::menu::ViewMode).
/// `other` must not be the menu this preset is registered on.
pub fn cross_pagination_row<A, D, T, A2, T2>(
    other: Rc<RefCell<Menu<A2, D, T2>>>,
    icons: PaginationIcons<D>,
    row: usize,
    prev_column: usize,
    next_column: usize,
    hide_disabled: bool,
    actions: &[A],
) -> Preset<A, D, T>
where
    A: ActionKind,
    A2: ActionKind,
    D: Clone + 'static,
    T: 'static,
    T2: 'static,
{
    let actions = actions.to_vec();
    let prev_slot = layout::slot_at(row, prev_column);
    let next_slot = layout::slot_at(row, next_column);

    let prev: Handler<A, D, T> = {
        let other = other.clone();
        Rc::new(move |menu, ctx, host| {
            ctx.cancel();
            let can_turn = {
                let o = other.borrow();
                o.shared_page() > o.min_page()
            };
            if can_turn {
                other.borrow_mut().open_previous_page(ctx.viewer(), host);
            }
            menu.refresh(&[prev_slot, next_slot], host)?;
            Ok(())
        })
    };
    let next: Handler<A, D, T> = {
        let other = other.clone();
        Rc::new(move |menu, ctx, host| {
            ctx.cancel();
            let can_turn = {
                let o = other.borrow();
                o.shared_page() < o.max_page()
            };
            if can_turn {
                other.borrow_mut().open_next_page(ctx.viewer(), host);
            }
            menu.refresh(&[prev_slot, next_slot], host)?;
            Ok(())
        })
    };

    Rc::new(move |_, sink| {
        let (page, min, max) = {
            let o = other.borrow();
            (o.shared_page(), o.min_page(), o.max_page())
        };
        let at_min = page <= min;
        let at_max = page >= max;
        if !at_min || !hide_disabled {
            let icon = if at_min {
                icons.prev_disabled.clone()
            } else {
                icons.prev.clone()
            };
            sink.item(prev_slot, icon)?;
        }
        if !at_max || !hide_disabled {
            let icon = if at_max {
                icons.next_disabled.clone()
            } else {
                icons.next.clone()
            };
            sink.item(next_slot, icon)?;
        }
        // Handlers are always live; they re-check the bounds themselves.
        for &action in &actions {
            sink.handler(prev_slot, action, prev.clone())?;
            sink.handler(next_slot, action, next.clone())?;
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// New-entry cell
// ---------------------------------------------------------------------------

/// A "create something" cell: an icon plus a caller-supplied handler.
pub fn new_entry<A, D, T>(slot: usize, icon: D, actions: &[A], handler: Handler<A, D, T>) -> Preset<A, D, T>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    let actions = actions.to_vec();
    Rc::new(move |_, sink| {
        sink.item(slot, icon.clone())?;
        for &action in &actions {
            sink.handler(slot, action, handler.clone())?;
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Static fills
// ---------------------------------------------------------------------------

/// Fill one page's slots with static content, bypassing presets.
pub fn fill_static<A, D, T>(menu: &mut Menu<A, D, T>, content: D, page: usize) -> Result<(), MenuError>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    for slot in 0..menu.slots_per_page() {
        menu.set_item(slot, content.clone(), &[page])?;
    }
    Ok(())
}

/// Fill one row of one page with static content.
pub fn fill_row_static<A, D, T>(
    menu: &mut Menu<A, D, T>,
    content: D,
    row: usize,
    page: usize,
) -> Result<(), MenuError>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    for slot in layout::row_slots(row) {
        menu.set_item(slot, content.clone(), &[page])?;
    }
    Ok(())
}

/// Fill one column of one page with static content.
pub fn fill_column_static<A, D, T>(
    menu: &mut Menu<A, D, T>,
    content: D,
    column: usize,
    page: usize,
) -> Result<(), MenuError>
where
    A: ActionKind,
    D: Clone + 'static,
    T: 'static,
{
    for slot in layout::column_slots(column, menu.slots_per_page()) {
        menu.set_item(slot, content.clone(), &[page])?;
    }
    Ok(())
}
