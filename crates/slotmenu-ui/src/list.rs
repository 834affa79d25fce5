//! List menus: [`ListMenu`], [`ListSource`], [`ListEditor`].
//!
//! A list menu renders an arbitrary backing collection into consecutive
//! list slots across pages. The collection is re-read on every rebuild —
//! never cached — so external mutation shows up on the next refresh. Slots
//! without an entry are left to lower presets (typically a filler).

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use slotmenu_core::action::GridAction;
use slotmenu_core::anim::Animate;
use slotmenu_core::context::{ClickContext, CloseReason, ViewerId};
use slotmenu_core::error::{BoxError, MenuError};
use slotmenu_core::host::Host;
use slotmenu_core::layout::ROW_WIDTH;
use slotmenu_core::menu::{GridMenu, Handler, MenuConfig, PageProvider, ViewMode};
use slotmenu_core::preset::Preset;
use slotmenu_core::registry::GridSession;

use crate::presets;

// ---------------------------------------------------------------------------
// Source traits
// ---------------------------------------------------------------------------

/// A backing collection rendered by a [`ListMenu`].
pub trait ListSource<D> {
    /// The element type; carried as the target payload of entry clicks.
    type Item: Clone + 'static;

    /// Snapshot the collection in display order.
    fn elements(&self) -> Result<Vec<Self::Item>, BoxError>;

    /// The content shown for one element.
    fn display(&self, item: &Self::Item) -> D;
}

/// A backing collection that also supports create/duplicate/delete.
///
/// Editing capability wires secondary-click deletion and middle-click
/// duplication onto every rendered entry, plus an optional "new entry"
/// cell.
pub trait ListEditor<D>: ListSource<D> {
    /// Create a new element without further arguments.
    fn create_default(&self) -> Result<(), BoxError>;

    /// Duplicate an existing element.
    fn duplicate(&self, item: &Self::Item) -> Result<(), BoxError>;

    /// Delete an element.
    fn delete(&self, item: &Self::Item) -> Result<(), BoxError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for a [`ListMenu`].
#[derive(Clone, Debug)]
pub struct ListConfig {
    /// Grid rows per page.
    pub rows: usize,
    /// Title pushed to the host on open.
    pub title: Option<String>,
    /// Cursor sharing between viewers.
    pub view_mode: ViewMode,
    /// Page-relative slots entries are laid into, in layout order.
    /// Defaults to every slot above the last row (the whole page for a
    /// single-row menu).
    pub list_slots: Option<Vec<usize>>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            title: None,
            view_mode: ViewMode::Independent,
            list_slots: None,
        }
    }
}

/// The "create a new element" cell installed by
/// [`ListMenu::with_editor`].
pub struct NewEntryCell<D, I> {
    /// Page-relative slot for the cell.
    pub slot: usize,
    /// Content shown in the cell.
    pub icon: D,
    /// Actions that trigger the cell.
    pub actions: Vec<GridAction>,
    /// Argument-gathering callback. It is the click handler for the cell
    /// and may open another menu or prompt before creating; `None` calls
    /// [`ListEditor::create_default`] directly and refreshes.
    pub handler: Option<Handler<GridAction, D, I>>,
}

/// Entry selection wiring: the triggering action and the handler invoked
/// with the clicked element as the context target.
pub type OnSelect<D, I> = (GridAction, Handler<GridAction, D, I>);

// ---------------------------------------------------------------------------
// ListMenu
// ---------------------------------------------------------------------------

/// A grid menu whose pages are derived from a backing collection.
///
/// Entry `i` renders at `list_slots[i % L]` on page `i / L`; the page
/// count is `ceil(len / L)`, at least 1. A failing source aborts the
/// rebuild (previous content stays visible) and keeps the last good page
/// count.
pub struct ListMenu<D, S: ListSource<D>> {
    menu: GridMenu<D, S::Item>,
    source: Rc<S>,
    list_slots: Rc<Vec<usize>>,
}

impl<D: Clone + 'static, S: ListSource<D> + 'static> ListMenu<D, S> {
    /// Create a read-only list menu.
    pub fn new(config: ListConfig, source: Rc<S>, on_select: Option<OnSelect<D, S::Item>>) -> Self {
        let (mut menu, list_slots) = base_menu(&config, &source);
        menu.add_preset(entry_preset(
            source.clone(),
            list_slots.clone(),
            on_select,
            None,
        ));
        Self {
            menu,
            source,
            list_slots,
        }
    }

    // -- delegation to the engine --

    /// See [`GridMenu::open`].
    pub fn open(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        self.menu.open(viewer, host);
    }

    /// See [`GridMenu::close`].
    pub fn close(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut dyn Host<D>) {
        self.menu.close(viewer, reason, host);
    }

    /// Re-read the backing collection and re-push every list slot.
    pub fn refresh_entries(&mut self, host: &mut dyn Host<D>) -> Result<(), MenuError> {
        let slots = self.list_slots.clone();
        self.menu.refresh(&slots, host)
    }

    /// See [`GridMenu::handle_interact`].
    pub fn handle_interact(
        &mut self,
        action: GridAction,
        ctx: &mut ClickContext<S::Item>,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        self.menu.handle_interact(action, ctx, host)
    }

    /// The slots entries are laid into.
    #[inline]
    pub fn list_slots(&self) -> &[usize] {
        &self.list_slots
    }

    /// The backing source.
    #[inline]
    pub fn source(&self) -> &Rc<S> {
        &self.source
    }

    /// The underlying grid menu, for presets, titles and animations.
    #[inline]
    pub fn menu(&self) -> &GridMenu<D, S::Item> {
        &self.menu
    }

    /// Mutable access to the underlying grid menu.
    #[inline]
    pub fn menu_mut(&mut self) -> &mut GridMenu<D, S::Item> {
        &mut self.menu
    }
}

impl<D: Clone + 'static, S: ListEditor<D> + 'static> ListMenu<D, S> {
    /// Create an editable list menu: secondary click deletes, middle click
    /// duplicates, and `new_cell` (if given) creates. Every mutation
    /// refreshes the list slots so the visible page reflects the
    /// collection immediately.
    pub fn with_editor(
        config: ListConfig,
        source: Rc<S>,
        on_select: Option<OnSelect<D, S::Item>>,
        new_cell: Option<NewEntryCell<D, S::Item>>,
    ) -> Self {
        let (mut menu, list_slots) = base_menu(&config, &source);
        let edit = EditOps {
            delete: {
                let source = source.clone();
                Rc::new(move |item: &S::Item| source.delete(item))
            },
            duplicate: {
                let source = source.clone();
                Rc::new(move |item: &S::Item| source.duplicate(item))
            },
        };
        menu.add_preset(entry_preset(
            source.clone(),
            list_slots.clone(),
            on_select,
            Some(edit),
        ));
        if let Some(cell) = new_cell {
            let handler = cell.handler.unwrap_or_else(|| {
                let source = source.clone();
                let slots = list_slots.clone();
                Rc::new(move |menu, ctx, host| {
                    ctx.cancel();
                    source.create_default()?;
                    menu.refresh(&slots, host)?;
                    Ok(())
                })
            });
            menu.add_preset(presets::new_entry(
                cell.slot,
                cell.icon,
                &cell.actions,
                handler,
            ));
        }
        Self {
            menu,
            source,
            list_slots,
        }
    }
}

impl<D: Clone + 'static, S: ListSource<D> + 'static> GridSession<D> for ListMenu<D, S> {
    fn open(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        self.menu.open(viewer, host);
    }

    fn close(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut dyn Host<D>) {
        self.menu.close(viewer, reason, host);
    }

    fn deliver(
        &mut self,
        viewer: ViewerId,
        slot: usize,
        action: GridAction,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        let mut ctx = ClickContext::new(viewer, slot);
        self.menu.handle_interact(action, &mut ctx, host)
    }

    fn is_open_for(&self, viewer: ViewerId) -> bool {
        self.menu.is_open_for(viewer)
    }
}

impl<D: Clone + 'static, S: ListSource<D> + 'static> Animate<D> for ListMenu<D, S> {
    fn animate(&mut self, tick: u64, host: &mut dyn Host<D>) {
        self.menu.animate(tick, host);
    }
}

// ---------------------------------------------------------------------------
// Wiring internals
// ---------------------------------------------------------------------------

struct EditOps<I> {
    delete: Rc<dyn Fn(&I) -> Result<(), BoxError>>,
    duplicate: Rc<dyn Fn(&I) -> Result<(), BoxError>>,
}

fn base_menu<D, S>(config: &ListConfig, source: &Rc<S>) -> (GridMenu<D, S::Item>, Rc<Vec<usize>>)
where
    D: Clone + 'static,
    S: ListSource<D> + 'static,
{
    let list_slots = Rc::new(
        config
            .list_slots
            .clone()
            .unwrap_or_else(|| default_list_slots(config.rows)),
    );
    let mut menu = GridMenu::new(MenuConfig {
        rows: config.rows,
        title: config.title.clone(),
        view_mode: config.view_mode,
        ..MenuConfig::default()
    });
    let provider: PageProvider = {
        let source = source.clone();
        let per_page = list_slots.len().max(1);
        let last_good = Cell::new(1usize);
        Rc::new(move || match source.elements() {
            Ok(items) => {
                let pages = items.len().div_ceil(per_page).max(1);
                last_good.set(pages);
                pages
            }
            // The erroring read is reported when the entry preset runs;
            // here we just hold the page count steady.
            Err(e) => {
                debug!("list source failed while sizing pages: {}", e);
                last_good.get()
            }
        })
    };
    menu.set_page_provider(provider);
    (menu, list_slots)
}

fn default_list_slots(rows: usize) -> Vec<usize> {
    let usable_rows = if rows > 1 { rows - 1 } else { 1 };
    (0..usable_rows * ROW_WIDTH).collect()
}

fn entry_preset<D, S>(
    source: Rc<S>,
    list_slots: Rc<Vec<usize>>,
    on_select: Option<OnSelect<D, S::Item>>,
    edit: Option<EditOps<S::Item>>,
) -> Preset<GridAction, D, S::Item>
where
    D: Clone + 'static,
    S: ListSource<D> + 'static,
{
    Rc::new(move |view, sink| {
        let items = source.elements()?;
        let per_page = list_slots.len();
        let start = view.page * per_page;
        for (offset, &slot) in list_slots.iter().enumerate() {
            let Some(item) = items.get(start + offset) else {
                break;
            };
            sink.item(slot, source.display(item))?;
            if let Some((action, handler)) = &on_select {
                sink.handler(slot, *action, targeted(handler.clone(), item.clone()))?;
            }
            if let Some(edit) = &edit {
                sink.handler(
                    slot,
                    GridAction::Secondary,
                    mutate_entry(edit.delete.clone(), item.clone(), list_slots.clone()),
                )?;
                sink.handler(
                    slot,
                    GridAction::Middle,
                    mutate_entry(edit.duplicate.clone(), item.clone(), list_slots.clone()),
                )?;
            }
        }
        Ok(())
    })
}

/// Wrap a user handler so it observes a context targeting `item`;
/// cancellation flows both ways.
fn targeted<D, I>(handler: Handler<GridAction, D, I>, item: I) -> Handler<GridAction, D, I>
where
    D: Clone + 'static,
    I: Clone + 'static,
{
    Rc::new(move |menu, ctx, host| {
        let mut tctx = ClickContext::with_target(ctx.viewer(), ctx.slot(), item.clone());
        tctx.set_cancelled(ctx.is_cancelled());
        let result = handler(menu, &mut tctx, host);
        ctx.set_cancelled(tctx.is_cancelled());
        result
    })
}

fn mutate_entry<D, I>(
    op: Rc<dyn Fn(&I) -> Result<(), BoxError>>,
    item: I,
    list_slots: Rc<Vec<usize>>,
) -> Handler<GridAction, D, I>
where
    D: Clone + 'static,
    I: Clone + 'static,
{
    Rc::new(move |menu, ctx, host| {
        ctx.cancel();
        op(&item)?;
        menu.refresh(&list_slots, host)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::RecordingHost;
    use slotmenu_core::host::Surface;
    use std::cell::RefCell;

    const V1: ViewerId = ViewerId(1);

    const NAMES: [&str; 13] = [
        "i0", "i1", "i2", "i3", "i4", "i5", "i6", "i7", "i8", "i9", "i10", "i11", "i12",
    ];

    struct VecSource {
        items: RefCell<Vec<&'static str>>,
        failing: Cell<bool>,
    }

    impl VecSource {
        fn with(items: &[&'static str]) -> Rc<Self> {
            Rc::new(Self {
                items: RefCell::new(items.to_vec()),
                failing: Cell::new(false),
            })
        }
    }

    impl ListSource<&'static str> for VecSource {
        type Item = &'static str;

        fn elements(&self) -> Result<Vec<&'static str>, BoxError> {
            if self.failing.get() {
                return Err("backing store unavailable".into());
            }
            Ok(self.items.borrow().clone())
        }

        fn display(&self, item: &&'static str) -> &'static str {
            item
        }
    }

    impl ListEditor<&'static str> for VecSource {
        fn create_default(&self) -> Result<(), BoxError> {
            self.items.borrow_mut().push("created");
            Ok(())
        }

        fn duplicate(&self, item: &&'static str) -> Result<(), BoxError> {
            self.items.borrow_mut().push(item);
            Ok(())
        }

        fn delete(&self, item: &&'static str) -> Result<(), BoxError> {
            let mut items = self.items.borrow_mut();
            if let Some(pos) = items.iter().position(|i| i == item) {
                items.remove(pos);
            }
            Ok(())
        }
    }

    fn two_row_config() -> ListConfig {
        // Default list slots: row 0, so 9 entries per page.
        ListConfig {
            rows: 2,
            ..ListConfig::default()
        }
    }

    #[test]
    fn entries_lay_out_across_pages() {
        let source = VecSource::with(&NAMES);
        let mut list = ListMenu::new(two_row_config(), source, None);
        assert_eq!(list.menu().page_count(), 2); // ceil(13 / 9)

        let mut host = RecordingHost::new();
        list.open(V1, &mut host);
        let page = host.last_page(V1, Surface::Primary).unwrap().clone();
        for (slot, name) in NAMES.iter().take(9).enumerate() {
            assert_eq!(page[slot], Some(*name));
        }

        list.menu_mut().open_next_page(V1, &mut host);
        let page = host.last_page(V1, Surface::Primary).unwrap();
        // Entry i renders at list_slots[i % 9] on page i / 9.
        assert_eq!(page[0], Some("i9"));
        assert_eq!(page[3], Some("i12"));
        assert_eq!(page[4], None);
    }

    #[test]
    fn refresh_picks_up_external_mutation() {
        let source = VecSource::with(&["a"]);
        let mut list = ListMenu::new(two_row_config(), source.clone(), None);
        let mut host = RecordingHost::new();
        list.open(V1, &mut host);
        assert_eq!(host.shown(V1, Surface::Primary, 1), None);

        source.items.borrow_mut().push("b");
        list.refresh_entries(&mut host).unwrap();
        assert_eq!(host.shown(V1, Surface::Primary, 1), Some("b"));
    }

    #[test]
    fn failing_source_keeps_previous_content_and_page_count() {
        let source = VecSource::with(&NAMES);
        let mut list = ListMenu::new(two_row_config(), source.clone(), None);
        let mut host = RecordingHost::new();
        list.open(V1, &mut host);
        assert_eq!(list.menu().page_count(), 2);

        source.failing.set(true);
        list.refresh_entries(&mut host).unwrap();
        // Previous entries stay visible, page count holds steady.
        assert_eq!(host.shown(V1, Surface::Primary, 0), Some("i0"));
        assert_eq!(list.menu().page_count(), 2);
    }

    #[test]
    fn select_handler_sees_the_entry_as_target() {
        let seen: Rc<RefCell<Option<&'static str>>> = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        let on_select: OnSelect<&'static str, &'static str> = (
            GridAction::Primary,
            Rc::new(move |_, ctx, _| {
                *sink.borrow_mut() = ctx.target().copied();
                ctx.cancel();
                Ok(())
            }),
        );
        let source = VecSource::with(&["sword", "bow"]);
        let mut list = ListMenu::new(two_row_config(), source, Some(on_select));
        let mut host = RecordingHost::new();
        list.open(V1, &mut host);

        let mut ctx = ClickContext::new(V1, 1);
        assert!(list
            .handle_interact(GridAction::Primary, &mut ctx, &mut host)
            .unwrap());
        assert_eq!(*seen.borrow(), Some("bow"));
    }

    #[test]
    fn editor_wires_delete_and_duplicate() {
        let source = VecSource::with(&["a", "b"]);
        let mut list = ListMenu::with_editor(two_row_config(), source.clone(), None, None);
        let mut host = RecordingHost::new();
        list.open(V1, &mut host);

        // Secondary click deletes "a"; the page shifts left immediately.
        let mut ctx = ClickContext::new(V1, 0);
        list.handle_interact(GridAction::Secondary, &mut ctx, &mut host)
            .unwrap();
        assert_eq!(&*source.items.borrow(), &["b"]);
        assert_eq!(host.shown(V1, Surface::Primary, 0), Some("b"));

        // Middle click duplicates "b".
        let mut ctx = ClickContext::new(V1, 0);
        list.handle_interact(GridAction::Middle, &mut ctx, &mut host)
            .unwrap();
        assert_eq!(&*source.items.borrow(), &["b", "b"]);
        assert_eq!(host.shown(V1, Surface::Primary, 1), Some("b"));
    }

    #[test]
    fn new_entry_cell_creates_by_default() {
        let source = VecSource::with(&[]);
        let mut list = ListMenu::with_editor(
            two_row_config(),
            source.clone(),
            None,
            Some(NewEntryCell {
                slot: 17,
                icon: "new",
                actions: vec![GridAction::Primary],
                handler: None,
            }),
        );
        let mut host = RecordingHost::new();
        list.open(V1, &mut host);
        assert_eq!(host.shown(V1, Surface::Primary, 17), Some("new"));

        let mut ctx = ClickContext::new(V1, 17);
        list.handle_interact(GridAction::Primary, &mut ctx, &mut host)
            .unwrap();
        assert_eq!(&*source.items.borrow(), &["created"]);
        assert_eq!(host.shown(V1, Surface::Primary, 0), Some("created"));
    }
}
