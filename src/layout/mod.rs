//! Tiling layouts.
//!
//! Grounded on `original_source/src/monitor.c`'s `arrange`/`arrangemon`
//! dispatch and the `tile`/`monocle` functions themselves; floating
//! placement has no direct original counterpart beyond "leave geometry
//! alone" and is written in the same idiom.

pub mod floating;
pub mod monocle;
pub mod tile;

use crate::client::Client;
use crate::geometry::Rect;

/// Which arrangement function a monitor's selected layout slot invokes.
/// Grounded on the `Layout` struct (`symbol`, `arrange` function pointer)
/// in `original_source/src/awm.h` and the three entries of `layouts[]` in
/// `original_source/config.def.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Master/stack tiling (the `tile` arrange function).
    Tile,
    /// The selected client fills the work area (`monocle`).
    Monocle,
    /// No automatic arrangement; `arrange` is a no-op and clients keep
    /// their floating geometry (symbol `><>` in the original, "floating").
    Floating,
}

impl Layout {
    /// The single-glyph status-bar symbol, matching `layouts[]`'s
    /// `symbol` field.
    ///
    /// Monocle overrides this with a visible-client count, mirroring
    /// `monocle()`'s `snprintf(m->ltsymbol, ..., "[%d]", n)`: `[0]` shows
    /// when the tag has no visible clients at all.
    pub fn symbol(self, visible_count: usize) -> String {
        match self {
            Layout::Tile => "[]=".to_string(),
            Layout::Monocle if visible_count > 0 => format!("[{visible_count}]"),
            Layout::Monocle => "[0]".to_string(),
            Layout::Floating => "><>".to_string(),
        }
    }
}

/// One tiled client's computed geometry, keyed by its index into the
/// window manager's client arena so the caller can apply it via
/// `XConn::configure`.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub client_index: usize,
    pub geom: Rect,
}

/// Arrange every tileable client on one monitor according to `layout`,
/// returning the geometry to apply to each. `clients` must already be
/// filtered to the monitor's visible, tileable clients in stacking order
/// (master first). Grounded on `arrangemon`'s dispatch through the
/// `Monitor::lt[Monitor::sellt]->arrange` function pointer.
pub fn arrange(layout: Layout, work_area: Rect, gappx: u32, nmaster: u32, mfact: f32, clients: &[(usize, &Client)]) -> Vec<Placement> {
    match layout {
        Layout::Tile => tile::arrange(work_area, gappx, nmaster, mfact, clients),
        Layout::Monocle => monocle::arrange(work_area, gappx, clients),
        Layout::Floating => floating::arrange(clients),
    }
}
