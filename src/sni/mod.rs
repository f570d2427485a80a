//! StatusNotifierItem host: implements the watcher side of the
//! `org.kde.StatusNotifierWatcher`/`Item` protocol so tray-capable
//! applications can register icons without the legacy XEmbed dance.
//!
//! Grounded on `sni.h`/`sni.c` in `original_source/src/` for the data
//! model (`SNIItem`, `SNIIcon`, `SNIMenuItem`) and on
//! `other_examples/82991c14_a7mddra-snapllm__app-src-services-tray.rs.rs`
//! for the `zbus` interface/proxy idiom this module is built on.

pub mod menu;
pub mod watcher;

pub use watcher::StatusNotifierWatcher;

use serde::{Deserialize, Serialize};

/// A single ARGB32 icon pixmap at one size, as delivered over D-Bus in
/// `IconPixmap`'s `(iiay)` array. Grounded on `SNIIcon` in `sni.h`.
#[derive(Debug, Clone, Serialize, Deserialize, zvariant::Type)]
pub struct SNIIcon {
    pub width: i32,
    pub height: i32,
    /// Big-endian ARGB32 bytes, matching the StatusNotifierItem spec;
    /// the tray rotates these into the host's native pixel order at draw
    /// time rather than at registration time.
    pub data: Vec<u8>,
}

/// The item's attention state, mirrored from its `Status` D-Bus property.
/// Grounded on spec §3's `Status ∈ {Passive, Active, NeedsAttention}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Passive,
    Active,
    NeedsAttention,
}

impl Status {
    pub fn parse(s: &str) -> Status {
        match s {
            "Active" => Status::Active,
            "NeedsAttention" => Status::NeedsAttention,
            _ => Status::Passive,
        }
    }
}

/// A click queued against an item whose properties haven't resolved yet
/// (spec §4.8: "If a click arrives before properties are known, the item
/// records the pending click ... and drops it into the normal dispatch as
/// soon as the `GetAll` reply lands").
#[derive(Debug, Clone, Copy)]
pub struct PendingClick {
    pub button: u8,
    pub x: i32,
    pub y: i32,
    pub timestamp: u32,
}

/// A registered StatusNotifierItem, tracked by its unique bus name +
/// object path. Grounded on `SNIItem` in `sni.h`.
#[derive(Debug, Clone)]
pub struct SNIItem {
    pub service: String,
    pub object_path: String,
    pub title: String,
    pub icon_name: String,
    pub icons: Vec<SNIIcon>,
    pub status: Status,
    pub item_is_menu: bool,
    pub menu_path: Option<String>,

    /// The reply to the item's `GetAll` properties call has landed.
    pub properties_fetched: bool,
    /// A `GetAll` call is currently in flight for this item.
    pub properties_fetching: bool,
    /// Bumped on every property change and on removal, so an in-flight
    /// `GetAll` reply can be recognised as stale (spec §4.8: "compare the
    /// context's generation to the item's current generation").
    pub generation: u64,

    /// The icon window this item paints into once reparented onto the
    /// systray, and whether it is currently mapped there.
    pub icon_window: Option<crate::Xid>,
    pub mapped: bool,

    pub pending_click: Option<PendingClick>,
}

impl SNIItem {
    pub fn new(service: String, object_path: String) -> Self {
        Self {
            service,
            object_path,
            title: String::new(),
            icon_name: String::new(),
            icons: Vec::new(),
            status: Status::Passive,
            item_is_menu: false,
            menu_path: None,
            properties_fetched: false,
            properties_fetching: false,
            generation: 0,
            icon_window: None,
            mapped: false,
            pending_click: None,
        }
    }

    pub fn bump(&mut self) {
        self.generation += 1;
    }

    /// Pick the icon closest in size to `target` without going under it,
    /// falling back to the largest available. Grounded on `sni_pick_icon`.
    pub fn best_icon(&self, target: u32) -> Option<&SNIIcon> {
        self.icons
            .iter()
            .filter(|i| i.width as u32 >= target)
            .min_by_key(|i| i.width)
            .or_else(|| self.icons.iter().max_by_key(|i| i.width))
    }

    /// Whether this item is due an async `GetAll` (spec §4.8: "For each
    /// item with `!properties_fetched && !properties_fetching`").
    pub fn needs_property_fetch(&self) -> bool {
        !self.properties_fetched && !self.properties_fetching
    }

    /// Record a click for immediate dispatch if properties are already
    /// known, or queue it to fire once the pending `GetAll` resolves.
    /// Returns `Some` when the caller should dispatch right away.
    pub fn click(&mut self, button: u8, x: i32, y: i32, timestamp: u32) -> Option<PendingClick> {
        let click = PendingClick { button, x, y, timestamp };
        if self.properties_fetched {
            Some(click)
        } else {
            self.pending_click = Some(click);
            None
        }
    }

    /// Take the queued click, if any, once properties have just resolved.
    pub fn take_pending_click(&mut self) -> Option<PendingClick> {
        self.pending_click.take()
    }
}
