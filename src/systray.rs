//! The XEmbed system tray dock, plus the slot where StatusNotifierItem
//! icons (see `sni/`) are rendered alongside legacy XEmbed tray icons.
//!
//! Grounded on `systray.c`/`sni.h` in `original_source/src/`: the tray
//! acquires `_NET_SYSTEM_TRAY_S<n>`, embeds windows that send
//! `_NET_SYSTEM_TRAY_OPCODE` `SYSTEM_TRAY_REQUEST_DOCK` client messages,
//! and reparents them into a row of fixed-size icon slots to the left of
//! the status text.

use tracing::{info, warn};

use crate::atom::{Atom, AtomCache};
use crate::error::Result;
use crate::x::XConn;
use crate::Xid;

const XEMBED_EMBEDDED_NOTIFY: u32 = 0;
const XEMBED_MAPPED: u32 = 1 << 0;

/// SYSTEM_TRAY_REQUEST_DOCK and friends, from the XEmbed systray spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayOpcode {
    RequestDock,
    BeginMessage,
    CancelMessage,
}

impl TrayOpcode {
    pub fn from_raw(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::RequestDock),
            1 => Some(Self::BeginMessage),
            2 => Some(Self::CancelMessage),
            _ => None,
        }
    }
}

/// One docked icon: either a legacy XEmbed window or an SNI-backed slot
/// (see `sni::SNIItem`) sharing the same visual row.
#[derive(Debug, Clone, Copy)]
pub struct TrayIcon {
    pub win: Xid,
    pub width: u32,
}

pub struct Systray {
    pub window: Xid,
    pub icon_size: u32,
    pub icons: Vec<TrayIcon>,
}

impl Systray {
    /// Create the tray dock window and acquire the `_NET_SYSTEM_TRAY_S<n>`
    /// selection. Grounded on `systrayinit` in `original_source/src/systray.c`.
    /// Takes the `AtomCache` directly (rather than going through
    /// `XConn::atom`, which only resolves the static [`Atom`] enum) since
    /// the tray selection is a per-screen dynamic atom; every other method
    /// below only needs static atoms and so stays generic over any
    /// [`XConn`] once the dock window exists.
    pub fn init<X: XConn>(conn: &X, atoms: &AtomCache, screen_num: usize, root: Xid, icon_size: u32) -> Result<Self> {
        let win = conn.create_window(
            root,
            crate::geometry::Rect::new(-1, -1, 1, icon_size),
            crate::x::WinType::InputOutput(Atom::NetWMWindowTypeDialog),
            false,
        )?;
        conn.set_selection_owner(atoms.systray_selection(screen_num), win)?;
        conn.set_cardinal_property(win, Atom::NetSystemTrayOrientation, 0)?;

        conn.send_client_message(
            root,
            atoms.get(Atom::Manager),
            [0, atoms.systray_selection(screen_num), win.0, 0, 0],
        )?;

        info!(?win, "systray dock initialized");
        Ok(Self { window: win, icon_size, icons: Vec::new() })
    }

    /// Handle a `_NET_SYSTEM_TRAY_OPCODE` client message on the tray
    /// window. Only `RequestDock` does anything; begin/cancel-message
    /// (balloon tooltips) are acknowledged but not rendered.
    pub fn handle_client_message<X: XConn>(&mut self, conn: &X, data: [u32; 5]) -> Result<()> {
        let Some(op) = TrayOpcode::from_raw(data[1]) else {
            warn_unknown_opcode(data[1]);
            return Ok(());
        };
        if op == TrayOpcode::RequestDock {
            let embed = Xid(data[2]);
            self.dock(conn, embed)?;
        }
        Ok(())
    }

    fn dock<X: XConn>(&mut self, conn: &X, embed: Xid) -> Result<()> {
        if self.icons.iter().any(|i| i.win == embed) {
            return Ok(());
        }
        let xembed = conn.atom(Atom::Xembed);
        conn.reparent(embed, self.window, (self.icons.len() as u32 * self.icon_size) as i32, 0)?;
        conn.map(embed)?;
        conn.send_client_message(embed, xembed, [0, XEMBED_EMBEDDED_NOTIFY, 0, self.window.0, 0])?;
        conn.send_client_message(embed, xembed, [0, XEMBED_MAPPED, 0, 0, 0])?;
        self.icons.push(TrayIcon { win: embed, width: self.icon_size });
        self.relayout(conn)
    }

    /// Drop an icon whose window was destroyed/unmapped (the client quit).
    pub fn undock<X: XConn>(&mut self, conn: &X, win: Xid) -> Result<()> {
        let before = self.icons.len();
        self.icons.retain(|i| i.win != win);
        if self.icons.len() != before {
            self.relayout(conn)?;
        }
        Ok(())
    }

    fn relayout<X: XConn>(&self, conn: &X) -> Result<()> {
        let mut x = 0i32;
        for icon in &self.icons {
            conn.configure(
                icon.win,
                crate::x::ClientConfig { x: Some(x), y: Some(0), w: Some(icon.width), h: Some(self.icon_size), ..Default::default() },
            )?;
            x += icon.width as i32;
        }
        let width = self.total_width();
        if width == 0 {
            conn.unmap(self.window)?;
        } else {
            conn.map(self.window)?;
        }
        Ok(())
    }

    pub fn total_width(&self) -> u32 {
        self.icons.iter().map(|i| i.width).sum()
    }
}

pub fn warn_unknown_opcode(raw: u32) {
    warn!(raw, "unrecognised systray opcode");
}
