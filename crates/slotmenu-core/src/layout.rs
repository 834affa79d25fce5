//! Slot arithmetic for the fixed-width grid.
//!
//! A page is `rows × ROW_WIDTH` slots addressed row-major. Menus span
//! multiple pages through a flat absolute-slot space:
//! `absolute = page * slots_per_page + relative`.

/// Fixed width of every grid row.
pub const ROW_WIDTH: usize = 9;

/// Row of a page-relative slot.
#[inline]
pub const fn row_of(slot: usize) -> usize {
    slot / ROW_WIDTH
}

/// Column of a page-relative slot.
#[inline]
pub const fn column_of(slot: usize) -> usize {
    slot % ROW_WIDTH
}

/// Page-relative slot at `(row, column)`.
#[inline]
pub const fn slot_at(row: usize, column: usize) -> usize {
    row * ROW_WIDTH + column
}

/// Page of an absolute slot.
#[inline]
pub const fn page_of(abs_slot: usize, slots_per_page: usize) -> usize {
    abs_slot / slots_per_page
}

/// Page-relative part of an absolute slot.
#[inline]
pub const fn rel_slot(abs_slot: usize, slots_per_page: usize) -> usize {
    abs_slot % slots_per_page
}

/// Absolute slot for `(page, relative slot)`.
#[inline]
pub const fn abs_slot(page: usize, slot: usize, slots_per_page: usize) -> usize {
    page * slots_per_page + slot
}

/// Page-relative slots of one row.
#[inline]
pub fn row_slots(row: usize) -> impl Iterator<Item = usize> {
    (row * ROW_WIDTH)..(row * ROW_WIDTH + ROW_WIDTH)
}

/// Page-relative slots of one column.
#[inline]
pub fn column_slots(column: usize, slots_per_page: usize) -> impl Iterator<Item = usize> {
    (0..slots_per_page).filter(move |s| s % ROW_WIDTH == column)
}

/// Page-relative slots forming the outer frame of the page.
pub fn frame_slots(slots_per_page: usize) -> impl Iterator<Item = usize> {
    (0..slots_per_page).filter(move |&s| {
        s < ROW_WIDTH
            || s >= slots_per_page.saturating_sub(ROW_WIDTH)
            || s % ROW_WIDTH == 0
            || s % ROW_WIDTH == ROW_WIDTH - 1
    })
}
