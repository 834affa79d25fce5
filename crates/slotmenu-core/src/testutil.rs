//! Test doubles shared by the crate's unit tests.

use crate::context::{CloseReason, ViewerId};
use crate::host::{Host, Surface};

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
    Title {
        viewer: ViewerId,
        title: String,
    },
    Opened {
        viewer: ViewerId,
        surface: Surface,
    },
    Closed {
        viewer: ViewerId,
        surface: Surface,
        reason: CloseReason,
    },
}

/// Host double that records every outbound call.
#[derive(Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent full-page push for `viewer`.
    pub fn last_page(&self, viewer: ViewerId) -> Option<&Vec<Option<&'static str>>> {
        self.events.iter().rev().find_map(|event| match event {
            HostEvent::Page { viewer: v, contents, .. } if *v == viewer => Some(contents),
            _ => None,
        })
    }

    /// Every single-slot push for `(viewer, slot)`, oldest first.
    pub fn slot_pushes(&self, viewer: ViewerId, slot: usize) -> Vec<Option<&'static str>> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Slot {
                    viewer: v,
                    slot: s,
                    content,
                    ..
                } if *v == viewer && *s == slot => Some(*content),
                _ => None,
            })
            .collect()
    }

    /// Number of full-page pushes for `viewer`.
    pub fn page_push_count(&self, viewer: ViewerId) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, HostEvent::Page { viewer: v, .. } if *v == viewer))
            .count()
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

    fn set_title(&mut self, viewer: ViewerId, _surface: Surface, title: &str) {
        self.events.push(HostEvent::Title {
            viewer,
            title: title.to_string(),
        });
    }

    fn on_open(&mut self, viewer: ViewerId, surface: Surface) {
        self.events.push(HostEvent::Opened { viewer, surface });
    }

    fn on_close(&mut self, viewer: ViewerId, surface: Surface, reason: CloseReason) {
        self.events.push(HostEvent::Closed {
            viewer,
            surface,
            reason,
        });
    }
}
