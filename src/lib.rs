//! awm: a tiling X11 window manager with an integrated compositor and
//! StatusNotifier host.
//!
//! The crate is organised the way the window manager itself is organised:
//! pure data (`geometry`, `tag`, `color`), the managed-window model
//! (`client`, `monitor`, `layout`, `focus`), the X abstraction layer (`x`),
//! and the three optional subsystems described in the design (`bar`,
//! `systray`, `compositor`, `sni`, `menu`).

pub mod atom;
pub mod bar;
pub mod client;
pub mod color;
pub mod config;
pub mod error;
pub mod event_pump;
pub mod focus;
pub mod geometry;
pub mod layout;
pub mod menu;
pub mod monitor;
pub mod spawn;
pub mod status;
pub mod systray;
pub mod tag;
pub mod wm;
pub mod x;
pub mod xrdb;

#[cfg(feature = "compositor")]
pub mod compositor;

#[cfg(feature = "sni")]
pub mod sni;

pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use tag::Tags;

/// Reported by `-v` and used as the fallback status-line text when no
/// status components are configured.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// An X11 resource id (window, pixmap, atom, …), kept distinct from a bare
/// `u32` so client code can't accidentally mix ids up with counts or masks.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Xid(pub u32);

impl std::fmt::Display for Xid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Xid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<Xid> for u32 {
    fn from(id: Xid) -> Self {
        id.0
    }
}
