//! **slotmenu-ui** — Built-ins layered on the slotmenu engine: stock
//! presets (fills, frame, back button, pagination), list menus, fixed-bar
//! menus, and companion-menu helpers.

pub mod bar;
pub mod companion;
pub mod list;
pub mod presets;

pub use bar::{BarConfig, BarMenu};
pub use companion::{close_pair, companion_config, open_pair};
pub use list::{ListConfig, ListEditor, ListMenu, ListSource, NewEntryCell, OnSelect};
pub use presets::{BackIcons, PaginationIcons};

#[cfg(test)]
pub(crate) mod testutil;
