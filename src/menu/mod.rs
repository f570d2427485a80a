//! The reusable popup menu: an override-redirect window with keyboard and
//! mouse navigation, submenu cascading, and a single activation callback.
//!
//! Grounded on `Menu`/`MenuItem` in `original_source/src/menu.h` and the
//! sizing/hit-testing constants in `menu.c`; this module owns the model
//! (sizing, navigation, hit testing) and the X window lifecycle, with
//! drawing delegated the same way `bar/render.rs` delegates to
//! `cairo-rs`/`pangocairo` rather than a bespoke rasterizer.

use crate::error::Result;
use crate::geometry::Rect;
use crate::x::{WinType, XConn};
use crate::Xid;

const ITEM_HEIGHT: i32 = 22;
const SEPARATOR_HEIGHT: i32 = 8;
const MIN_WIDTH: u32 = 150;
const PADDING: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    None,
    Checkmark,
    Radio,
}

/// One entry in a menu, source-agnostic: built either from static
/// configuration or converted from a `sni::menu::MenuItem` DBusMenu
/// reply by the caller that owns both.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: i32,
    pub label: String,
    pub enabled: bool,
    pub toggle: ToggleKind,
    pub toggled: bool,
    pub submenu: Vec<Item>,
}

impl Item {
    pub fn is_separator(&self) -> bool {
        self.label.is_empty()
    }

    fn row_height(&self) -> i32 {
        if self.is_separator() {
            SEPARATOR_HEIGHT
        } else {
            ITEM_HEIGHT
        }
    }
}

/// Compute the menu window's size for a flat item list (spec §4.9: "sized
/// to fit items (min 150 px, item height 22 px, separator 8 px, padding 4
/// px)"). Width is not measured against actual glyph metrics here (that
/// lives with the cairo/pango text layout the bar uses); callers that
/// need exact width should widen `MIN_WIDTH` themselves based on a
/// measured longest label.
pub fn measure(items: &[Item]) -> (u32, u32) {
    let height: i32 = PADDING * 2 + items.iter().map(Item::row_height).sum::<i32>();
    (MIN_WIDTH, height.max(ITEM_HEIGHT + PADDING * 2) as u32)
}

/// Which row, if any, contains `y` (window-relative), and that row's
/// vertical extent — used both for hit testing a click and for hover
/// highlighting.
pub fn hit_test(items: &[Item], y: i32) -> Option<usize> {
    let mut cursor = PADDING;
    for (i, item) in items.iter().enumerate() {
        let h = item.row_height();
        if y >= cursor && y < cursor + h {
            return Some(i);
        }
        cursor += h;
    }
    None
}

/// Where a submenu should open relative to its parent: to the right if
/// there's screen room, otherwise to the left (spec §4.9).
pub fn submenu_origin(parent_rect: Rect, item_y: i32, submenu_w: u32, screen: Rect) -> (i32, i32) {
    let x = if parent_rect.x + parent_rect.w as i32 + submenu_w as i32 <= screen.right() {
        parent_rect.x + parent_rect.w as i32
    } else {
        parent_rect.x - submenu_w as i32
    };
    (x, parent_rect.y + item_y)
}

/// Keyboard/mouse navigation state for one menu level. A chain of
/// `Popup`s (parent → active submenu) models the cascade; each level is
/// its own X window so dismissal and hit testing stay per-window.
pub struct Popup {
    pub win: Xid,
    pub rect: Rect,
    pub items: Vec<Item>,
    pub selected: Option<usize>,
    /// Set right after `show()`; the first `ButtonRelease` following the
    /// grab is ignored so the same click that opened the menu doesn't
    /// also select whatever's under the pointer. Grounded on
    /// `ignore_next_release` in `original_source/src/menu.h`.
    pub ignore_next_release: bool,
}

impl Popup {
    /// Create (but do not map) the override-redirect window for one menu
    /// level. Grounded on `menu_create` in `original_source/src/menu.c`.
    pub fn create<X: XConn>(conn: &X, root: Xid, items: Vec<Item>) -> Result<Self> {
        let (w, h) = measure(&items);
        let win = conn.create_window(root, Rect::new(0, 0, w, h), WinType::InputOutput(crate::atom::Atom::NetWMWindowTypeDialog), false)?;
        Ok(Self { win, rect: Rect::new(0, 0, w, h), items, selected: None, ignore_next_release: true })
    }

    /// Map at `(x, y)` and grab the pointer and keyboard using the
    /// triggering event's timestamp so the grab can steal focus from
    /// another client's active grab (spec §4.9). Grounded on `menu_show`.
    pub fn show<X: XConn>(&mut self, conn: &X, x: i32, y: i32) -> Result<()> {
        self.rect.x = x;
        self.rect.y = y;
        conn.configure(self.win, crate::x::ClientConfig { x: Some(x), y: Some(y), stack_mode: Some(crate::x::StackMode::Above), ..Default::default() })?;
        conn.map(self.win)?;
        conn.grab_pointer(self.win, 0)?;
        self.ignore_next_release = true;
        Ok(())
    }

    pub fn hide<X: XConn>(&self, conn: &X) -> Result<()> {
        conn.ungrab_pointer()?;
        conn.unmap(self.win)
    }

    /// Move the selection, skipping separators, wrapping at the ends.
    /// Grounded on the Up/Down handling in `menu_handle_event`.
    pub fn move_selection(&mut self, dir: i32) {
        if self.items.is_empty() {
            return;
        }
        let n = self.items.len() as i32;
        let mut i = self.selected.map(|s| s as i32).unwrap_or(if dir > 0 { -1 } else { 0 });
        for _ in 0..n {
            i = (i + dir).rem_euclid(n);
            if !self.items[i as usize].is_separator() {
                self.selected = Some(i as usize);
                return;
            }
        }
    }

    pub fn hover(&mut self, y: i32) {
        if let Some(idx) = hit_test(&self.items, y) {
            if !self.items[idx].is_separator() {
                self.selected = Some(idx);
            }
        }
    }

    /// The currently selected item, if any and if it is enabled
    /// (disabled items are shown but never activatable, matching
    /// `menu_handle_event`'s Enter-key arm skipping `!item->enabled`).
    pub fn activatable_selection(&self) -> Option<&Item> {
        self.selected.and_then(|i| self.items.get(i)).filter(|item| item.enabled && !item.is_separator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str) -> Item {
        Item { id: 1, label: label.into(), enabled: true, toggle: ToggleKind::None, toggled: false, submenu: Vec::new() }
    }

    #[test]
    fn measure_respects_minimum_width() {
        let (w, _) = measure(&[item("x")]);
        assert_eq!(w, MIN_WIDTH);
    }

    #[test]
    fn hit_test_finds_second_row() {
        let items = vec![item("a"), item("b")];
        let idx = hit_test(&items, PADDING + ITEM_HEIGHT + 1);
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn move_selection_skips_separators() {
        let mut popup = Popup { win: Xid(1), rect: Rect::new(0, 0, 150, 100), items: vec![item("a"), Item { label: String::new(), ..item("") }, item("c")], selected: Some(0), ignore_next_release: false };
        popup.move_selection(1);
        assert_eq!(popup.selected, Some(2));
    }

    #[test]
    fn submenu_opens_left_when_no_room_on_right() {
        let screen = Rect::new(0, 0, 400, 300);
        let parent = Rect::new(300, 10, 150, 50);
        let (x, _) = submenu_origin(parent, 0, 150, screen);
        assert_eq!(x, 150);
    }
}
