//! Compile-time configuration.
//!
//! Grounded on `original_source/config.def.h`: the original is a header
//! edited and recompiled per-user; this crate keeps the same "edit and
//! rebuild" philosophy but as a plain Rust struct with a `Default` impl,
//! so a fork can override individual fields in `main.rs` without touching
//! the rest of the crate.

use crate::client::Client;
use crate::color::Color;
use crate::layout::Layout;
use crate::tag::TAGSLENGTH;

/// A single autofloat/autotag/monitor-pin rule, matched against a new
/// client's class/instance/title. Grounded on the `Rule` struct and
/// `rules[]` table in `original_source/config.def.h`.
#[derive(Debug, Clone)]
pub struct Rule {
    pub class: Option<&'static str>,
    pub instance: Option<&'static str>,
    pub title: Option<&'static str>,
    pub tags: Option<crate::tag::Tags>,
    pub is_floating: bool,
    pub monitor: Option<usize>,
    /// Scratchpad key, if this rule assigns one (spec §4.2).
    pub scratch_key: Option<char>,
}

impl Rule {
    fn matches(&self, class: &str, instance: &str, title: &str) -> bool {
        self.class.map_or(true, |c| c == class)
            && self.instance.map_or(true, |i| i == instance)
            && self.title.map_or(true, |t| title.contains(t))
    }
}

/// The full compile-time configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub border_px: u32,
    pub snap: i32,
    pub gappx: [u32; TAGSLENGTH],
    pub start_with_gaps: bool,

    pub mfact: f32,
    pub nmaster: u32,
    pub resize_hints: bool,
    pub lock_fullscreen: bool,

    pub tags: [&'static str; TAGSLENGTH],
    pub rules: Vec<Rule>,
    pub layouts: [Layout; 2],

    pub color_norm_fg: Color,
    pub color_norm_bg: Color,
    pub color_norm_border: Color,
    pub color_sel_fg: Color,
    pub color_sel_bg: Color,
    pub color_sel_border: Color,

    pub border_norm_pixel: u32,
    pub border_focus_pixel: u32,

    pub icon_size: u32,
    pub sni_icon_size: u32,
    pub icon_cache_size: usize,
    pub icon_cache_max_entries: usize,
    pub motion_fps: u32,
    pub dbus_timeout_ms: u32,

    /// The bar's pixel height, matching `bh` (font height plus padding) in
    /// `original_source/src/awm.c`'s `setup`.
    pub bar_height: u32,
    /// A Pango font description string, parsed once per draw by
    /// `bar::render`. Grounded on `original_source/config.def.h`'s `fonts[]`.
    pub font: &'static str,
}

impl Default for Config {
    /// Mirrors `original_source/config.def.h`'s defaults: 1px borders,
    /// 5px gaps, 32px snap distance, a 9-tag `chat/web/shell/work/games/
    /// dev/mail/misc/doc` set, one master by default at 50% split, and
    /// the tile/monocle/floating layout trio.
    fn default() -> Self {
        let norm_bg = Color::parse("#222222").unwrap();
        let norm_fg = Color::parse("#bbbbbb").unwrap();
        let norm_border = Color::parse("#444444").unwrap();
        let sel_bg = Color::parse("#005577").unwrap();
        let sel_fg = Color::parse("#eeeeee").unwrap();
        let sel_border = Color::parse("#005577").unwrap();

        Self {
            border_px: 1,
            snap: 32,
            gappx: [5; TAGSLENGTH],
            start_with_gaps: true,
            mfact: 0.50,
            nmaster: 1,
            resize_hints: true,
            lock_fullscreen: true,
            tags: ["chat", "web", "shell", "work", "games", "dev", "mail", "misc", "doc"],
            rules: vec![
                Rule {
                    class: Some("notepad"),
                    instance: None,
                    title: None,
                    tags: None,
                    is_floating: true,
                    monitor: None,
                    scratch_key: Some('p'),
                },
                Rule {
                    class: Some("mpd"),
                    instance: None,
                    title: None,
                    tags: None,
                    is_floating: true,
                    monitor: None,
                    scratch_key: Some('m'),
                },
            ],
            layouts: [Layout::Tile, Layout::Monocle],
            color_norm_fg: norm_fg,
            color_norm_bg: norm_bg,
            color_norm_border: norm_border,
            color_sel_fg: sel_fg,
            color_sel_bg: sel_bg,
            color_sel_border: sel_border,
            border_norm_pixel: 0x444444,
            border_focus_pixel: 0x005577,
            icon_size: 16,
            sni_icon_size: 22,
            icon_cache_size: 128,
            icon_cache_max_entries: 128,
            motion_fps: 60,
            dbus_timeout_ms: 100,
            bar_height: 22,
            font: "monospace 10",
        }
    }
}

impl Config {
    /// Apply the first matching rule to a freshly-managed client.
    /// Grounded on `applyrules` in `original_source/src/client.c`.
    pub fn apply_rules(&self, client: &mut Client) {
        let (instance, class) = client
            .wm_class
            .clone()
            .unwrap_or_else(|| (String::new(), String::new()));
        for rule in &self.rules {
            if rule.matches(&class, &instance, &client.name) {
                if let Some(tags) = rule.tags {
                    client.tags = tags;
                }
                client.is_floating = client.is_floating || rule.is_floating;
                client.scratch_key = rule.scratch_key;
                if let Some(m) = rule.monitor {
                    client.mon = m;
                }
                break;
            }
        }
        if client.tags.is_empty() {
            client.tags = crate::tag::Tags::single(0);
        }
    }
}
