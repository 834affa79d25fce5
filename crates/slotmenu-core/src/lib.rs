//! **slotmenu-core** — Paged grid-menu engine.
//!
//! This crate provides the engine for interactive, grid-based menus inside
//! a host that owns the display loop: the action vocabularies, per-event
//! interaction contexts, cell stores, the preset processor, the animation
//! scheduler, the [`Menu`] engine itself, and the session registries that
//! translate raw host events into dispatches.

pub mod action;
pub mod anim;
pub mod cell;
pub mod context;
pub mod error;
pub mod host;
pub mod layout;
pub mod menu;
pub mod preset;
pub mod registry;

pub use action::{ActionKind, BarAction, GridAction};
pub use anim::{Animate, Animation, FrameFn, Ticker};
pub use cell::{Button, CellStore};
pub use context::{ClickContext, CloseContext, CloseReason, ViewerId};
pub use error::{BoxError, HandlerResult, MenuError};
pub use host::{BarHost, Host, Surface};
pub use menu::{CloseHandler, GridMenu, Handler, Menu, MenuConfig, MenuId, PageProvider, ViewMode};
pub use preset::{PageView, Preset, PresetSink};
pub use registry::{BarRegistry, BarSession, GridSession, MenuRegistry, SessionHandle};

#[cfg(test)]
pub(crate) mod testutil;
