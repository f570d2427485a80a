//! Output (monitor) tracking and per-tag layout state.
//!
//! Grounded on `Monitor`/`Pertag` in `original_source/src/awm.h` and
//! `original_source/src/pertag.h`, and on the monitor-discovery/migration
//! logic in `original_source/src/monitor.c` (`updategeom`, `recttomon`,
//! `dirtomon`, `cleanupmon`).

use crate::geometry::Rect;
use crate::layout::Layout;
use crate::tag::{Tags, TAGSLENGTH};

/// Per-tag state that would otherwise be lost when switching tags: the
/// master-area factor, master count, layout and gap size are all
/// remembered per tag slot (index 0 is the "show all tags" slot).
/// Grounded on `original_source/src/pertag.h`.
#[derive(Debug, Clone)]
pub struct Pertag {
    /// Currently selected tag set index (an index into these parallel
    /// arrays, not a bit position).
    pub cur_tag: usize,
    pub prev_tag: usize,
    pub n_masters: [u32; TAGSLENGTH + 1],
    pub m_facts: [f32; TAGSLENGTH + 1],
    pub sel_layouts: [usize; TAGSLENGTH + 1],
    pub layouts: [[Layout; 2]; TAGSLENGTH + 1],
    pub show_bars: [bool; TAGSLENGTH + 1],
    pub gaps: [u32; TAGSLENGTH + 1],
}

impl Pertag {
    pub fn new(default_nmaster: u32, default_mfact: f32, default_gap: u32, layouts: [Layout; 2]) -> Self {
        Self {
            cur_tag: 0,
            prev_tag: 0,
            n_masters: [default_nmaster; TAGSLENGTH + 1],
            m_facts: [default_mfact; TAGSLENGTH + 1],
            sel_layouts: [0; TAGSLENGTH + 1],
            layouts: [layouts; TAGSLENGTH + 1],
            show_bars: [true; TAGSLENGTH + 1],
            gaps: [default_gap; TAGSLENGTH + 1],
        }
    }
}

/// A physical output and the tag/layout state associated with it.
#[derive(Debug, Clone)]
pub struct Monitor {
    pub num: usize,
    /// The full output rectangle, as reported by RandR.
    pub screen_area: Rect,
    /// `screen_area` minus the bar's strip (spec §4.4: "work area is the
    /// monitor rectangle with the bar's height subtracted from whichever
    /// edge it's docked to").
    pub work_area: Rect,

    pub mfact: f32,
    pub nmaster: u32,
    pub gappx: u32,

    /// tagset[0] is the active set, tagset[1] the one `toggleview` swaps
    /// back to; mirrors the two-element array in the original so "last
    /// view" semantics fall out of a plain swap.
    pub tagset: [Tags; 2],
    pub sel_tags: usize,

    pub layouts: [Layout; 2],
    pub sel_layout: usize,

    pub show_bar: bool,
    pub top_bar: bool,
    pub bar_win: Option<crate::Xid>,

    pub pertag: Pertag,

    /// Index into the window manager's client list of the currently
    /// focused client on this monitor, if any.
    pub sel: Option<usize>,
}

impl Monitor {
    pub fn new(num: usize, screen_area: Rect, nmaster: u32, mfact: f32, gappx: u32, layouts: [Layout; 2]) -> Self {
        Self {
            num,
            screen_area,
            work_area: screen_area,
            mfact,
            nmaster,
            gappx,
            tagset: [Tags::single(0), Tags::single(0)],
            sel_tags: 0,
            layouts,
            sel_layout: 0,
            show_bar: true,
            top_bar: true,
            bar_win: None,
            pertag: Pertag::new(nmaster, mfact, gappx, layouts),
            sel: None,
        }
    }

    pub fn seltags(&self) -> Tags {
        self.tagset[self.sel_tags]
    }

    /// Recompute `work_area` from `screen_area`, subtracting the bar strip
    /// when shown. Grounded on `updatebarpos` in `original_source/src/monitor.c`.
    pub fn recompute_work_area(&mut self, bar_height: u32) {
        self.work_area = self.screen_area;
        if self.show_bar {
            if self.top_bar {
                self.work_area.y += bar_height as i32;
            }
            self.work_area.h = self.work_area.h.saturating_sub(bar_height);
        }
    }

    /// Switch the active pertag slot (`cur_tag`) and pull that slot's
    /// remembered nmaster/mfact/layout/gap back into the live fields.
    /// Grounded on the pertag-restore block at the top of `view()` in
    /// `original_source/src/client.c`.
    pub fn load_pertag(&mut self, slot: usize) {
        self.pertag.prev_tag = self.pertag.cur_tag;
        self.pertag.cur_tag = slot;
        self.nmaster = self.pertag.n_masters[slot];
        self.mfact = self.pertag.m_facts[slot];
        self.sel_layout = self.pertag.sel_layouts[slot];
        self.layouts = self.pertag.layouts[slot];
        self.show_bar = self.pertag.show_bars[slot];
        self.gappx = self.pertag.gaps[slot];
    }

    /// Persist the live nmaster/mfact/layout/gap fields back into the
    /// current pertag slot, called before any mutation that must survive
    /// a tag switch.
    pub fn store_pertag(&mut self) {
        let slot = self.pertag.cur_tag;
        self.pertag.n_masters[slot] = self.nmaster;
        self.pertag.m_facts[slot] = self.mfact;
        self.pertag.sel_layouts[slot] = self.sel_layout;
        self.pertag.layouts[slot] = self.layouts;
        self.pertag.show_bars[slot] = self.show_bar;
        self.pertag.gaps[slot] = self.gappx;
    }
}

/// Pick the monitor whose rectangle has the greatest overlap with `r`,
/// falling back to monitor 0 if `monitors` is non-empty but nothing
/// overlaps. Grounded on `recttomon` in `original_source/src/monitor.c`.
pub fn rect_to_monitor(monitors: &[Monitor], r: &Rect) -> usize {
    monitors
        .iter()
        .max_by_key(|m| m.screen_area.intersect_area(r))
        .map(|m| m.num)
        .unwrap_or(0)
}

/// The monitor reached by moving `dir` (-1 or +1) from `cur` in index
/// order, wrapping around. Grounded on `dirtomon` in
/// `original_source/src/monitor.c`.
pub fn dir_to_monitor(n_monitors: usize, cur: usize, dir: i32) -> usize {
    if n_monitors == 0 {
        return 0;
    }
    let n = n_monitors as i32;
    let cur = cur as i32;
    (((cur + dir) % n + n) % n) as usize
}

/// Decide whether a freshly discovered RandR geometry differs enough from
/// the existing monitor list to warrant a full `updategeom` (new/removed
/// monitor, or an existing one's rectangle changed). Grounded on
/// `isuniquegeom`'s inverse use in `updategeom`.
pub fn geometry_changed(monitors: &[Monitor], fresh: &[Rect]) -> bool {
    if monitors.len() != fresh.len() {
        return true;
    }
    monitors
        .iter()
        .zip(fresh.iter())
        .any(|(m, r)| m.screen_area != *r)
}
