//! The status bar: tag labels, layout symbol, focused-window title, status
//! text and the systray dock, composited as one strip per monitor.
//!
//! Grounded on `drawbar`/`drawbars`/`updatebars` in
//! `original_source/src/monitor.c` and the `Drw` abstraction in
//! `original_source/src/drw.h`; text rendering itself is delegated to
//! `cairo-rs`/`pangocairo` rather than the original's bespoke font
//! rasterizer, matching this crate's Cargo.toml stack.

pub mod render;

use crate::color::ColorScheme;
use crate::config::Config;
use crate::geometry::Rect;
use crate::monitor::Monitor;
use crate::x::XConn;

/// One segment of the bar's horizontal layout, in draw order.
#[derive(Debug, Clone)]
pub enum Segment {
    /// One box per configured tag: label, occupied marker, urgent marker.
    Tags { labels: Vec<TagState> },
    /// The current layout's symbol (`[]=`, `[n]`, `><>`).
    LayoutSymbol(String),
    /// The focused window's title, elided with an ellipsis if it would
    /// overlap the status text.
    Title(String),
    /// The 1Hz status-line text (spec §4.6).
    Status(String),
    /// Reserved width for the systray dock, drawn by `systray.rs` into the
    /// bar window's right edge rather than by this module.
    TraySlot { width: u32 },
}

#[derive(Debug, Clone, Copy)]
pub struct TagState {
    pub index: usize,
    pub selected: bool,
    pub occupied: bool,
    pub urgent: bool,
}

/// Build the ordered segment list for one monitor's bar, given the
/// current focused client's title and the latest status text. Pure
/// layout decision, no X calls — `render.rs` turns this into cairo draw
/// calls against the bar's pixmap.
pub fn layout_segments(
    config: &Config,
    mon: &Monitor,
    occupied: u32,
    urgent: u32,
    visible_count: usize,
    title: Option<&str>,
    status: &str,
    tray_width: u32,
) -> Vec<Segment> {
    let seltags = mon.seltags();
    let labels = (0..config.tags.len())
        .map(|i| TagState {
            index: i,
            selected: seltags.intersects(crate::tag::Tags::single(i)),
            occupied: occupied & (1 << i) != 0,
            urgent: urgent & (1 << i) != 0,
        })
        .collect();

    let mut segs = vec![
        Segment::Tags { labels },
        Segment::LayoutSymbol(mon.layouts[mon.sel_layout].symbol(visible_count)),
    ];
    if let Some(t) = title {
        segs.push(Segment::Title(t.to_string()));
    }
    segs.push(Segment::Status(status.to_string()));
    if tray_width > 0 {
        segs.push(Segment::TraySlot { width: tray_width });
    }
    segs
}

/// The bar window's geometry for a monitor, docked to the top or bottom
/// edge per `Monitor::top_bar`. Grounded on `updatebarpos`.
pub fn bar_geometry(mon: &Monitor, height: u32) -> Rect {
    let y = if mon.top_bar { mon.screen_area.y } else { mon.screen_area.bottom() as i32 - height as i32 };
    Rect::new(mon.screen_area.x, y, mon.screen_area.w, height)
}

pub fn scheme_for(config: &Config, selected: bool) -> ColorScheme {
    if selected {
        ColorScheme { fg: config.color_sel_fg, bg: config.color_sel_bg, border: config.color_sel_border }
    } else {
        ColorScheme { fg: config.color_norm_fg, bg: config.color_norm_bg, border: config.color_norm_border }
    }
}

/// Redraw every monitor's bar window from the window manager's current
/// state, called once per dirty cycle by the event pump (spec §4.1's "at
/// most once per cycle" rule — the caller is responsible for only calling
/// this when `DirtyFlags::bar` is set, not this function itself).
pub fn redraw_all<X: XConn>(wm: &crate::wm::WindowManager<X>, status: &str, tray_width: u32) {
    for mon in &wm.monitors {
        if let Err(e) = redraw_one(wm, mon, status, tray_width) {
            tracing::warn!(mon = mon.num, error = %e, "bar redraw failed");
        }
    }
}

fn redraw_one<X: XConn>(wm: &crate::wm::WindowManager<X>, mon: &Monitor, status: &str, tray_width: u32) -> crate::error::Result<()> {
    let Some(win) = mon.bar_win else { return Ok(()) };
    let config = &wm.config;

    let mut occupied = 0u32;
    let mut urgent = 0u32;
    let mut visible_count = 0usize;
    let seltags = mon.seltags();
    for &idx in &wm.tiling_order[mon.num] {
        if let Some(c) = wm.clients.get(idx) {
            occupied |= c.tags.0;
            if c.is_urgent {
                urgent |= c.tags.0;
            }
            if c.is_visible_on(seltags) {
                visible_count += 1;
            }
        }
    }
    let title = mon.sel.and_then(|i| wm.clients.get(i)).map(|c| c.name.as_str());

    let segs = layout_segments(config, mon, occupied, urgent, visible_count, title, status, tray_width);
    let scheme = scheme_for(config, false);
    let geom = bar_geometry(mon, config.bar_height);

    let buf = render::draw_to_buffer(geom.w, geom.h, config.font, &segs, scheme, |t| scheme_for(config, t.selected))
        .map_err(|e| crate::error::Error::Raw(format!("bar render failed: {e}")))?;
    wm.conn.put_image(win, geom.w, geom.h, 24, &buf)
}
