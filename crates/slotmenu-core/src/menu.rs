//! The menu engine: [`Menu`], [`MenuConfig`], [`ViewMode`], [`Handler`].
//!
//! A menu is a paged grid addressed through a flat slot space. Static
//! authoring ([`set_item`](Menu::set_item), [`set_button`](Menu::set_button))
//! bypasses presets; presets replay in registration order on every page
//! (re)build; animations bypass both and sample straight to viewers. All
//! mutation happens on the host's single logical thread.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::action::ActionKind;
use crate::anim::{Animate, Animation, FrameFn};
use crate::cell::{Button, CellStore};
use crate::context::{ClickContext, CloseContext, CloseReason, ViewerId};
use crate::error::{HandlerResult, MenuError};
use crate::host::{Host, Surface};
use crate::layout;
use crate::preset::{PageView, Preset, PresetSink};

// ---------------------------------------------------------------------------
// Handler types
// ---------------------------------------------------------------------------

/// A click handler bound to a `(slot, action)` pair or registered as a
/// menu-wide default.
///
/// Handlers receive the menu itself (cloned out of the handler table before
/// invocation, so mutating the menu from inside is fine), the per-event
/// context, and the host. They must be nonblocking; errors are caught and
/// logged at the dispatch boundary.
pub type Handler<A, D, T = ()> =
    Rc<dyn Fn(&mut Menu<A, D, T>, &mut ClickContext<T>, &mut dyn Host<D>) -> HandlerResult>;

/// Handler invoked once per viewer when a session ends.
pub type CloseHandler<A, D, T = ()> =
    Rc<dyn Fn(&mut Menu<A, D, T>, &CloseContext, &mut dyn Host<D>) -> HandlerResult>;

/// Overrides the derived page count (list menus plug their backing source
/// in through this).
pub type PageProvider = Rc<dyn Fn() -> usize>;

// ---------------------------------------------------------------------------
// MenuId
// ---------------------------------------------------------------------------

/// Process-unique menu identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(u64);

impl MenuId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

// ---------------------------------------------------------------------------
// ViewMode / MenuConfig
// ---------------------------------------------------------------------------

/// How page cursors are shared between concurrent viewers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewMode {
    /// Each viewer navigates independently.
    #[default]
    Independent,
    /// All viewers share one page cursor; navigation moves everyone.
    Shared,
}

/// Configuration for a [`Menu`].
#[derive(Clone, Debug)]
pub struct MenuConfig {
    /// Grid rows per page. Clamped to at least 1.
    pub rows: usize,
    /// Title pushed to the host on open (pages may override it).
    pub title: Option<String>,
    /// Cursor sharing between viewers.
    pub view_mode: ViewMode,
    /// The display surface this menu occupies.
    pub surface: Surface,
    /// Lower bound for the derived page count.
    pub min_pages: usize,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            title: None,
            view_mode: ViewMode::Independent,
            surface: Surface::Primary,
            min_pages: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// A paged grid menu shared by any number of viewers.
///
/// `A` is the action vocabulary, `D` the opaque display content, `T` the
/// target payload carried by targeted interactions.
pub struct Menu<A: ActionKind, D, T = ()> {
    id: MenuId,
    rows: usize,
    slots_per_page: usize,
    surface: Surface,
    view_mode: ViewMode,
    min_pages: usize,

    title: Option<String>,
    page_titles: HashMap<usize, String>,

    // Static authoring, bypassing presets.
    static_items: HashMap<(usize, usize), D>,
    static_items_all: HashMap<usize, D>,
    static_handlers: HashMap<(usize, usize, A), Handler<A, D, T>>,
    static_handlers_all: HashMap<(usize, A), Handler<A, D, T>>,
    default_handlers: HashMap<A, Handler<A, D, T>>,

    presets: Vec<Preset<A, D, T>>,
    built: HashMap<usize, CellStore<A, D, T>>,
    contributions: HashMap<usize, Vec<CellStore<A, D, T>>>,
    close_handler: Option<CloseHandler<A, D, T>>,
    page_provider: Option<PageProvider>,

    viewers: HashSet<ViewerId>,
    cursors: HashMap<ViewerId, usize>,
    shared_cursor: usize,

    animations: HashMap<usize, Animation<D>>,
}

/// Grid-surface menu with the standard click vocabulary.
pub type GridMenu<D, T = ()> = Menu<crate::action::GridAction, D, T>;

impl<A: ActionKind, D: Clone + 'static, T: 'static> Menu<A, D, T> {
    /// Create a menu from a configuration.
    pub fn new(config: MenuConfig) -> Self {
        let rows = config.rows.max(1);
        Self {
            id: MenuId::next(),
            rows,
            slots_per_page: rows * layout::ROW_WIDTH,
            surface: config.surface,
            view_mode: config.view_mode,
            min_pages: config.min_pages.max(1),
            title: config.title,
            page_titles: HashMap::new(),
            static_items: HashMap::new(),
            static_items_all: HashMap::new(),
            static_handlers: HashMap::new(),
            static_handlers_all: HashMap::new(),
            default_handlers: HashMap::new(),
            presets: Vec::new(),
            built: HashMap::new(),
            contributions: HashMap::new(),
            close_handler: None,
            page_provider: None,
            viewers: HashSet::new(),
            cursors: HashMap::new(),
            shared_cursor: 0,
            animations: HashMap::new(),
        }
    }

    /// Create a menu with `rows` rows and default configuration.
    pub fn with_rows(rows: usize) -> Self {
        Self::new(MenuConfig {
            rows,
            ..MenuConfig::default()
        })
    }

    // -- accessors --

    /// Process-unique identity.
    #[inline]
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Rows per page.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Slots per page (`rows × ROW_WIDTH`).
    #[inline]
    pub fn slots_per_page(&self) -> usize {
        self.slots_per_page
    }

    /// The surface this menu occupies.
    #[inline]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Cursor-sharing mode.
    #[inline]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Number of registered viewers.
    #[inline]
    pub fn viewer_count(&self) -> usize {
        self.viewers.len()
    }

    /// Whether `viewer` currently has this menu open.
    #[inline]
    pub fn is_open_for(&self, viewer: ViewerId) -> bool {
        self.viewers.contains(&viewer)
    }

    /// Current page count. At least 1; derived from authored content and
    /// animations unless a page provider overrides it.
    pub fn page_count(&self) -> usize {
        if let Some(provider) = &self.page_provider {
            return provider().max(1);
        }
        let mut pages = self.min_pages;
        for &(page, _) in self.static_items.keys() {
            pages = pages.max(page + 1);
        }
        for &(page, _, _) in self.static_handlers.keys() {
            pages = pages.max(page + 1);
        }
        for &slot in self.animations.keys() {
            pages = pages.max(layout::page_of(slot, self.slots_per_page) + 1);
        }
        pages
    }

    /// Lower navigation clamp bound.
    #[inline]
    pub fn min_page(&self) -> usize {
        0
    }

    /// Upper navigation clamp bound.
    #[inline]
    pub fn max_page(&self) -> usize {
        self.page_count() - 1
    }

    /// The page `viewer` currently sees (0 for unknown viewers).
    pub fn current_page(&self, viewer: ViewerId) -> usize {
        let raw = match self.view_mode {
            ViewMode::Shared => self.shared_cursor,
            ViewMode::Independent => self.cursors.get(&viewer).copied().unwrap_or(0),
        };
        raw.min(self.max_page())
    }

    /// The shared cursor position: the page every viewer sees in
    /// [`ViewMode::Shared`]. Cross-menu presets read this at build time,
    /// where no single viewer is in scope.
    #[inline]
    pub fn shared_page(&self) -> usize {
        self.shared_cursor.min(self.max_page())
    }

    // -- titles --

    /// Set the menu-wide title. Pushed on the next open or navigation.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Override the title for one page and push it to viewers of that page.
    pub fn set_page_title(
        &mut self,
        page: usize,
        title: impl Into<String>,
        host: &mut dyn Host<D>,
    ) {
        let title = title.into();
        self.page_titles.insert(page, title.clone());
        for &viewer in &self.viewers {
            if self.current_page(viewer) == page {
                host.set_title(viewer, self.surface, &title);
            }
        }
    }

    fn effective_title(&self, page: usize) -> Option<&str> {
        self.page_titles
            .get(&page)
            .map(String::as_str)
            .or(self.title.as_deref())
    }

    // -- static authoring --

    /// Set the content of `slot` on the given pages, bypassing presets.
    pub fn set_item(&mut self, slot: usize, content: D, pages: &[usize]) -> Result<(), MenuError> {
        self.check_slot(slot)?;
        for &page in pages {
            self.static_items.insert((page, slot), content.clone());
        }
        Ok(())
    }

    /// Set the content of `slot` on every page, bypassing presets.
    pub fn set_item_all(&mut self, slot: usize, content: D) -> Result<(), MenuError> {
        self.check_slot(slot)?;
        self.static_items_all.insert(slot, content);
        Ok(())
    }

    /// Remove static content from `slot` on the given pages.
    pub fn clear_item(&mut self, slot: usize, pages: &[usize]) -> Result<(), MenuError> {
        self.check_slot(slot)?;
        for &page in pages {
            self.static_items.remove(&(page, slot));
        }
        Ok(())
    }

    /// Remove every-page static content from `slot`.
    pub fn clear_item_all(&mut self, slot: usize) -> Result<(), MenuError> {
        self.check_slot(slot)?;
        self.static_items_all.remove(&slot);
        Ok(())
    }

    /// Register a click handler for `(slot, action)` on the given pages.
    /// A later registration for the same key replaces the earlier one.
    pub fn set_click_handler<F>(
        &mut self,
        slot: usize,
        action: A,
        handler: F,
        pages: &[usize],
    ) -> Result<(), MenuError>
    where
        F: Fn(&mut Menu<A, D, T>, &mut ClickContext<T>, &mut dyn Host<D>) -> HandlerResult
            + 'static,
    {
        self.check_slot(slot)?;
        let handler: Handler<A, D, T> = Rc::new(handler);
        for &page in pages {
            self.static_handlers
                .insert((page, slot, action), handler.clone());
        }
        Ok(())
    }

    /// Register a click handler for `(slot, action)` on every page.
    pub fn set_click_handler_all<F>(
        &mut self,
        slot: usize,
        action: A,
        handler: F,
    ) -> Result<(), MenuError>
    where
        F: Fn(&mut Menu<A, D, T>, &mut ClickContext<T>, &mut dyn Host<D>) -> HandlerResult
            + 'static,
    {
        self.check_slot(slot)?;
        self.static_handlers_all.insert((slot, action), Rc::new(handler));
        Ok(())
    }

    /// Register the menu-wide fallback handler for `action`.
    ///
    /// A default never overrides a per-slot handler for the same pair.
    pub fn set_default_click_handler<F>(&mut self, action: A, handler: F)
    where
        F: Fn(&mut Menu<A, D, T>, &mut ClickContext<T>, &mut dyn Host<D>) -> HandlerResult
            + 'static,
    {
        self.default_handlers.insert(action, Rc::new(handler));
    }

    /// Install a button (content plus handlers) at `slot` on the given pages.
    pub fn set_button(
        &mut self,
        slot: usize,
        button: Button<A, D, T>,
        pages: &[usize],
    ) -> Result<(), MenuError> {
        self.check_slot(slot)?;
        let (content, handlers) = button.into_parts();
        if let Some(content) = content {
            self.set_item(slot, content, pages)?;
        }
        for (action, handler) in handlers {
            for &page in pages {
                self.static_handlers
                    .insert((page, slot, action), handler.clone());
            }
        }
        Ok(())
    }

    /// Handler invoked once per viewer when that viewer's session ends.
    pub fn set_close_handler<F>(&mut self, handler: F)
    where
        F: Fn(&mut Menu<A, D, T>, &CloseContext, &mut dyn Host<D>) -> HandlerResult + 'static,
    {
        self.close_handler = Some(Rc::new(handler));
    }

    /// Append a preset. Presets replay in registration order on every page
    /// (re)build; later presets win per slot.
    pub fn add_preset(&mut self, preset: Preset<A, D, T>) {
        self.presets.push(preset);
    }

    /// Override the derived page count. Used by list menus to derive pages
    /// from their backing source.
    pub fn set_page_provider(&mut self, provider: PageProvider) {
        self.page_provider = Some(provider);
    }

    // -- lifecycle --

    /// Register `viewer` and display the page its cursor points at.
    ///
    /// Idempotent per viewer: reopening re-displays without
    /// double-registering or resetting the cursor.
    pub fn open(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        if self.viewers.insert(viewer) {
            self.cursors.entry(viewer).or_insert(0);
            debug!("menu {:?}: viewer {:?} opened", self.id, viewer);
        }
        let page = self.current_page(viewer);
        self.rebuild_page(page);
        host.on_open(viewer, self.surface);
        self.push_page(viewer, page, host);
    }

    /// End `viewer`'s session. A no-op for viewers that are not registered.
    pub fn close(&mut self, viewer: ViewerId, reason: CloseReason, host: &mut dyn Host<D>) {
        if !self.viewers.remove(&viewer) {
            return;
        }
        self.cursors.remove(&viewer);
        debug!("menu {:?}: viewer {:?} closed ({:?})", self.id, viewer, reason);
        if let Some(handler) = self.close_handler.clone() {
            let ctx = CloseContext { viewer, reason };
            if let Err(e) = handler(self, &ctx, host) {
                warn!("menu {:?}: close handler failed: {}", self.id, e);
            }
        }
        host.on_close(viewer, self.surface, reason);
    }

    // -- navigation --

    /// Jump `viewer` to an exact page.
    pub fn open_page(
        &mut self,
        viewer: ViewerId,
        page: usize,
        host: &mut dyn Host<D>,
    ) -> Result<(), MenuError> {
        let pages = self.page_count();
        if page >= pages {
            return Err(MenuError::PageOutOfRange { page, pages });
        }
        if self.viewers.contains(&viewer) {
            self.turn_to(viewer, page, host);
        }
        Ok(())
    }

    /// Advance `viewer` one page, clamped at the last page (boundary calls
    /// are no-ops, not errors).
    pub fn open_next_page(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        if !self.viewers.contains(&viewer) {
            return;
        }
        let current = self.current_page(viewer);
        let target = (current + 1).min(self.max_page());
        if target != current {
            self.turn_to(viewer, target, host);
        }
    }

    /// Move `viewer` back one page, clamped at page 0.
    pub fn open_previous_page(&mut self, viewer: ViewerId, host: &mut dyn Host<D>) {
        if !self.viewers.contains(&viewer) {
            return;
        }
        let current = self.current_page(viewer);
        let target = current.saturating_sub(1);
        if target != current {
            self.turn_to(viewer, target, host);
        }
    }

    fn turn_to(&mut self, viewer: ViewerId, page: usize, host: &mut dyn Host<D>) {
        self.rebuild_page(page);
        match self.view_mode {
            ViewMode::Shared => {
                self.shared_cursor = page;
                let viewers: Vec<ViewerId> = self.viewers.iter().copied().collect();
                for v in viewers {
                    self.push_page(v, page, host);
                }
            }
            ViewMode::Independent => {
                self.cursors.insert(viewer, page);
                self.push_page(viewer, page, host);
            }
        }
    }

    // -- refresh / dispatch --

    /// Re-run all presets for every open page and re-push the given slots
    /// to each viewer of the affected page.
    pub fn refresh(&mut self, slots: &[usize], host: &mut dyn Host<D>) -> Result<(), MenuError> {
        for &slot in slots {
            self.check_slot(slot)?;
        }
        // The page count may have shrunk since the last build.
        let max = self.max_page();
        self.shared_cursor = self.shared_cursor.min(max);
        for cursor in self.cursors.values_mut() {
            *cursor = (*cursor).min(max);
        }

        let viewers: Vec<ViewerId> = self.viewers.iter().copied().collect();
        let mut pages: Vec<usize> = viewers.iter().map(|&v| self.current_page(v)).collect();
        pages.sort_unstable();
        pages.dedup();
        for &page in &pages {
            self.rebuild_page(page);
        }
        for v in viewers {
            let page = self.current_page(v);
            for &slot in slots {
                host.render_slot(v, self.surface, slot, self.content_at(page, slot));
            }
        }
        Ok(())
    }

    /// Dispatch one interaction. Returns whether the host should suppress
    /// its default behavior.
    ///
    /// Resolution order: per-page slot handler, every-page slot handler,
    /// preset-placed handler, menu default. A handler error is logged and
    /// leaves the cancellation flag as it was before the handler ran.
    pub fn handle_interact(
        &mut self,
        action: A,
        ctx: &mut ClickContext<T>,
        host: &mut dyn Host<D>,
    ) -> Result<bool, MenuError> {
        self.check_slot(ctx.slot())?;
        if !self.viewers.contains(&ctx.viewer()) {
            return Ok(false);
        }
        let page = self.current_page(ctx.viewer());
        let Some(handler) = self.handler_at(page, ctx.slot(), action) else {
            return Ok(ctx.is_cancelled());
        };
        let before = ctx.is_cancelled();
        if let Err(e) = handler(self, ctx, host) {
            warn!(
                "menu {:?}: click handler failed for {:?} at slot {}: {}",
                self.id,
                action,
                ctx.slot(),
                e
            );
            ctx.set_cancelled(before);
        }
        Ok(ctx.is_cancelled())
    }

    // -- animations --

    /// Attach an animation to an absolute slot, replacing any animation
    /// already there. `interval` is in ticks and must be nonzero.
    pub fn play_animation<F>(
        &mut self,
        slot: usize,
        interval: u64,
        frames: F,
    ) -> Result<(), MenuError>
    where
        F: Fn(u64, usize) -> D + 'static,
    {
        if interval == 0 {
            return Err(MenuError::ZeroInterval);
        }
        let frames: FrameFn<D> = Rc::new(frames);
        self.animations.insert(slot, Animation::new(interval, frames));
        Ok(())
    }

    /// Stop the animation at `slot` (inert, not destroyed).
    pub fn stop_animation(&mut self, slot: usize) -> bool {
        match self.animations.get_mut(&slot) {
            Some(anim) => {
                anim.stop();
                true
            }
            None => false,
        }
    }

    /// Resume a stopped animation without resetting its phase.
    pub fn resume_animation(&mut self, slot: usize) -> bool {
        match self.animations.get_mut(&slot) {
            Some(anim) => {
                anim.resume();
                true
            }
            None => false,
        }
    }

    /// Re-base the animation at `slot` so its local tick restarts at zero
    /// from global tick `now`.
    pub fn reset_animation(&mut self, slot: usize, now: u64) -> bool {
        match self.animations.get_mut(&slot) {
            Some(anim) => {
                anim.reset(now);
                true
            }
            None => false,
        }
    }

    /// Detach the animation at `slot`.
    pub fn clear_animation(&mut self, slot: usize) -> bool {
        self.animations.remove(&slot).is_some()
    }

    // -- internals --

    /// Content shown at `(page, slot)`: static per-page, then static
    /// every-page, then the preset-built layer.
    pub fn content_at(&self, page: usize, slot: usize) -> Option<&D> {
        self.static_items
            .get(&(page, slot))
            .or_else(|| self.static_items_all.get(&slot))
            .or_else(|| self.built.get(&page).and_then(|b| b.item(slot)))
    }

    fn handler_at(&self, page: usize, slot: usize, action: A) -> Option<Handler<A, D, T>> {
        self.static_handlers
            .get(&(page, slot, action))
            .or_else(|| self.static_handlers_all.get(&(slot, action)))
            .or_else(|| self.built.get(&page).and_then(|b| b.handler(slot, action)))
            .or_else(|| self.default_handlers.get(&action))
            .cloned()
    }

    fn rebuild_page(&mut self, page: usize) {
        let view = PageView {
            page,
            min_page: self.min_page(),
            max_page: self.max_page(),
            slots_per_page: self.slots_per_page,
            rows: self.rows,
            viewer_count: self.viewers.len(),
        };
        // One contribution per preset. A failing preset renders nothing new:
        // its contribution from the previous build of this page is retained.
        let previous = self.contributions.remove(&page).unwrap_or_default();
        let mut fresh: Vec<CellStore<A, D, T>> = Vec::with_capacity(self.presets.len());
        for (idx, preset) in self.presets.iter().enumerate() {
            let mut sink = PresetSink::new(self.slots_per_page);
            match preset(&view, &mut sink) {
                Ok(()) => fresh.push(sink.into_store()),
                Err(e) => {
                    warn!("menu {:?}: preset failed on page {}: {}", self.id, page, e);
                    fresh.push(previous.get(idx).cloned().unwrap_or_default());
                }
            }
        }
        let mut store = CellStore::new();
        for layer in &fresh {
            store.merge(layer.clone());
        }
        self.contributions.insert(page, fresh);
        self.built.insert(page, store);
    }

    fn push_page(&self, viewer: ViewerId, page: usize, host: &mut dyn Host<D>) {
        let contents: Vec<Option<D>> = (0..self.slots_per_page)
            .map(|slot| self.content_at(page, slot).cloned())
            .collect();
        host.render_page(viewer, self.surface, &contents);
        if let Some(title) = self.effective_title(page) {
            host.set_title(viewer, self.surface, title);
        }
    }

    fn check_slot(&self, slot: usize) -> Result<(), MenuError> {
        if slot >= self.slots_per_page {
            return Err(MenuError::SlotOutOfRange {
                slot,
                slots_per_page: self.slots_per_page,
            });
        }
        Ok(())
    }
}

impl<A: ActionKind, D: Clone + 'static, T: 'static> Animate<D> for Menu<A, D, T> {
    fn animate(&mut self, tick: u64, host: &mut dyn Host<D>) {
        if self.viewers.is_empty() || self.animations.is_empty() {
            return;
        }
        let viewers: Vec<(ViewerId, usize)> = self
            .viewers
            .iter()
            .map(|&v| (v, self.current_page(v)))
            .collect();
        for (&abs, anim) in &self.animations {
            let page = layout::page_of(abs, self.slots_per_page);
            let Some((_, content)) = anim.frame_at(tick, page) else {
                continue;
            };
            let rel = layout::rel_slot(abs, self.slots_per_page);
            for &(viewer, viewed) in &viewers {
                if viewed == page {
                    host.render_slot(viewer, self.surface, rel, Some(&content));
                }
            }
        }
    }
}
