//! Test doubles shared by the crate's unit tests.

use std::collections::HashMap;

use slotmenu_core::context::{CloseReason, ViewerId};
use slotmenu_core::host::{BarHost, Host, Surface};
use slotmenu_core::layout::ROW_WIDTH;

/// One observed host call.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Slot {
        viewer: ViewerId,
        surface: Surface,
        slot: usize,
        content: Option<&'static str>,
    },
    Page {
        viewer: ViewerId,
        surface: Surface,
        contents: Vec<Option<&'static str>>,
    },
    Closed {
        viewer: ViewerId,
        surface: Surface,
        reason: CloseReason,
    },
}

/// Host double recording outbound calls, with a fake per-viewer action row
/// for bar-menu tests.
#[derive(Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub rows: HashMap<ViewerId, Vec<Option<&'static str>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the fake action row shown before any bar menu opens.
    pub fn with_row(mut self, viewer: ViewerId, row: Vec<Option<&'static str>>) -> Self {
        self.rows.insert(viewer, row);
        self
    }

    /// The most recent full-page push for `(viewer, surface)`.
    pub fn last_page(&self, viewer: ViewerId, surface: Surface) -> Option<&Vec<Option<&'static str>>> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Page {
                viewer: v,
                surface: s,
                contents,
            } if *v == viewer && *s == surface => Some(contents),
            _ => None,
        })
    }

    /// The most recent content pushed for `(viewer, surface, slot)`, by
    /// either a page or a slot push.
    pub fn shown(&self, viewer: ViewerId, surface: Surface, slot: usize) -> Option<&'static str> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Slot {
                viewer: v,
                surface: s,
                slot: sl,
                content,
            } if *v == viewer && *s == surface && *sl == slot => Some(*content),
            HostEvent::Page {
                viewer: v,
                surface: s,
                contents,
            } if *v == viewer && *s == surface => Some(contents[slot]),
            _ => None,
        })?
    }
}

impl Host<&'static str> for RecordingHost {
    fn render_slot(
        &mut self,
        viewer: ViewerId,
        surface: Surface,
        slot: usize,
        content: Option<&&'static str>,
    ) {
        self.events.push(HostEvent::Slot {
            viewer,
            surface,
            slot,
            content: content.copied(),
        });
    }

    fn render_page(&mut self, viewer: ViewerId, surface: Surface, contents: &[Option<&'static str>]) {
        self.events.push(HostEvent::Page {
            viewer,
            surface,
            contents: contents.to_vec(),
        });
    }

    fn on_close(&mut self, viewer: ViewerId, surface: Surface, reason: CloseReason) {
        self.events.push(HostEvent::Closed {
            viewer,
            surface,
            reason,
        });
    }
}

impl BarHost<&'static str> for RecordingHost {
    fn capture_row(&mut self, viewer: ViewerId) -> Vec<Option<&'static str>> {
        self.rows
            .get(&viewer)
            .cloned()
            .unwrap_or_else(|| vec![None; ROW_WIDTH])
    }

    fn restore_row(&mut self, viewer: ViewerId, row: &[Option<&'static str>]) {
        self.rows.insert(viewer, row.to_vec());
    }
}
