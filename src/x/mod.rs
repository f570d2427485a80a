//! The abstraction layer between the window manager core and the X server.
//!
//! `XConn` is deliberately a plain trait (not generic connection-handling
//! code spread across the crate) so the event pump, client lifecycle and
//! compositor can all be written once and tested against a mock
//! implementation. Grounded on the trait shape in
//! `legacy_reference/teacher_src/xconnection/mod.rs` and
//! `legacy_reference/teacher_src/x/mod.rs`; the concrete backend lives in
//! `x11rb_backend.rs`, grounded on
//! `legacy_reference/teacher_src/x11rb/xconn.rs`.

pub mod event;
pub mod property;
pub mod x11rb_backend;

pub use event::XEvent;
pub use property::{Prop, WindowAttributes, WmHints, WmNormalHints, WmState};

use crate::{
    atom::Atom,
    error::Result,
    geometry::{Point, Rect},
    Xid,
};

/// A window type to request when creating override-redirect windows (the
/// bar, the tray, the compositor overlay, the popup menu).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinType {
    /// A visible, input-output window with the given `_NET_WM_WINDOW_TYPE`.
    InputOutput(Atom),
    /// An input-only window, used for grabs that don't need to paint.
    InputOnly,
}

/// Declarative description of a window's on-screen geometry/stacking,
/// applied via [`XConn::configure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClientConfig {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<u32>,
    pub h: Option<u32>,
    pub border_width: Option<u32>,
    pub stack_mode: Option<StackMode>,
    pub sibling: Option<Xid>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackMode {
    Above,
    Below,
    Top,
    Bottom,
}

/// Event masks the core selects for at various points in a client's
/// lifecycle (spec §4.3 step 9: "select EnterWindow/FocusChange/
/// PropertyChange/StructureNotify events").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientAttr {
    BorderColor(u32),
    ManagedEventMask,
    RootEventMask,
    /// Used only while a client is being hidden, matching the teacher's
    /// `ClientUnmapMask` (select out `StructureNotify` so our own `unmap`
    /// call doesn't generate a spurious `UnmapNotify`).
    UnmapSuppressedMask,
}

/// A connection to an X server, abstracting over the concrete backend
/// (x11rb in this crate; a mock in tests).
pub trait XConn {
    fn root(&self) -> Xid;

    /// Resolve a cached atom to its raw server-side value, for callers
    /// that need to embed an atom as a property *value* (e.g. writing
    /// `_NET_WM_STATE_FULLSCREEN` into `_NET_WM_STATE`) rather than as the
    /// property name itself.
    fn atom(&self, atom: Atom) -> u32;

    /// Query the display-geometry extension (RandR) for every currently
    /// connected output's rectangle.
    fn screen_details(&self) -> Result<Vec<Rect>>;

    fn cursor_position(&self) -> Result<Point>;

    /// Block for, then return, the next event (spec §4.1: the pump reads
    /// non-blockingly once woken by poll, but the trait itself exposes a
    /// blocking read so a test mock can be driven synchronously).
    fn next_event(&self) -> Result<XEvent>;

    /// Number of events already queued client-side without a round trip.
    fn pending(&self) -> usize;

    fn flush(&self);

    /// The raw fd to register with the unified poll in the event pump.
    fn as_raw_fd(&self) -> std::os::unix::io::RawFd;

    // -- window lifecycle -------------------------------------------------
    fn create_window(&self, parent: Xid, r: Rect, win_type: WinType, argb: bool) -> Result<Xid>;
    fn destroy_window(&self, id: Xid) -> Result<()>;
    fn map(&self, id: Xid) -> Result<()>;
    fn unmap(&self, id: Xid) -> Result<()>;
    fn configure(&self, id: Xid, cfg: ClientConfig) -> Result<()>;
    fn set_client_attributes(&self, id: Xid, attrs: &[ClientAttr]) -> Result<()>;
    fn reparent(&self, id: Xid, new_parent: Xid, x: i32, y: i32) -> Result<()>;
    fn add_to_save_set(&self, id: Xid) -> Result<()>;
    fn query_tree(&self, id: Xid) -> Result<Vec<Xid>>;
    fn get_geometry(&self, id: Xid) -> Result<Rect>;
    fn get_window_attributes(&self, id: Xid) -> Result<WindowAttributes>;

    // -- input -------------------------------------------------------------
    fn set_input_focus(&self, id: Xid) -> Result<()>;
    fn grab_server(&self) -> Result<()>;
    fn ungrab_server(&self) -> Result<()>;
    fn grab_buttons_for_client(&self, id: Xid, focused: bool) -> Result<()>;
    fn ungrab_buttons(&self, id: Xid) -> Result<()>;
    fn grab_pointer(&self, confine_to: Xid, cursor: u32) -> Result<bool>;
    fn ungrab_pointer(&self) -> Result<()>;
    fn warp_pointer(&self, id: Xid, x: i32, y: i32) -> Result<()>;

    /// Grab a key combination on the root window so its `KeyPress` reaches
    /// the pump instead of whatever client has focus; one call per bound
    /// combination, matching `grabkeys` in `original_source/src/awm.c`.
    fn grab_key(&self, keycode: u8, modifiers: u16) -> Result<()>;
    fn ungrab_keys(&self) -> Result<()>;
    /// Resolve a numeric X keysym to the keycode it's currently bound to,
    /// via the server's keyboard mapping (`XKeysymToKeycode`'s x11rb
    /// equivalent). Returns `None` if no keycode produces that keysym.
    fn keycode_for_keysym(&self, keysym: u32) -> Option<u8>;
    /// Which `ModMask` bit `Num_Lock` is currently bound to, so a caller
    /// matching a `KeyPress`'s raw modifier state against a static
    /// binding table can mask it (and `Lock`) out first.
    fn numlock_mask(&self) -> Result<u16>;

    // -- properties ----------------------------------------------------------
    fn get_text_property(&self, id: Xid, atom: Atom) -> Result<Option<String>>;
    fn get_wm_class(&self, id: Xid) -> Result<Option<(String, String)>>;
    fn get_transient_for(&self, id: Xid) -> Result<Option<Xid>>;
    fn get_wm_normal_hints(&self, id: Xid) -> Result<Option<WmNormalHints>>;
    fn get_wm_hints(&self, id: Xid) -> Result<Option<WmHints>>;
    fn get_wm_protocols(&self, id: Xid) -> Result<Vec<u32>>;
    fn get_atom_property(&self, id: Xid, atom: Atom) -> Result<Vec<u32>>;
    fn get_cardinal_property(&self, id: Xid, atom: Atom) -> Result<Option<u32>>;
    /// Read a single `PIXMAP`-typed property, used for the `_XROOTPMAP_ID`/
    /// `ESETROOT_PMAP_ID` root-window wallpaper conventions.
    fn get_pixmap_property(&self, id: Xid, atom: Atom) -> Result<Option<u32>>;
    fn get_wm_state(&self, id: Xid) -> Result<Option<WmState>>;

    fn set_wm_state(&self, id: Xid, state: WmState) -> Result<()>;
    fn set_cardinal_property(&self, id: Xid, atom: Atom, val: u32) -> Result<()>;
    fn set_cardinals_property(&self, id: Xid, atom: Atom, vals: &[u32]) -> Result<()>;
    fn set_atom_property(&self, id: Xid, atom: Atom, vals: &[u32]) -> Result<()>;
    fn set_text_property(&self, id: Xid, atom: Atom, text: &str) -> Result<()>;
    fn append_atom_property(&self, id: Xid, atom: Atom, val: u32) -> Result<()>;
    fn delete_property(&self, id: Xid, atom: Atom) -> Result<()>;

    fn send_client_message(&self, id: Xid, type_atom: u32, data: [u32; 5]) -> Result<()>;

    // -- selections (compositor manager, systray) ---------------------------
    fn set_selection_owner(&self, selection: u32, owner: Xid) -> Result<()>;
    fn get_selection_owner(&self, selection: u32) -> Result<Xid>;

    /// Blit a `w`×`h` `depth`-bit Z-pixmap buffer onto `id`'s top-left
    /// corner, used by the bar to push a cairo-rendered frame to its
    /// window (spec §4.6: cairo renders into an off-screen image surface,
    /// this call is the only thing that touches the X server).
    fn put_image(&self, id: Xid, w: u32, h: u32, depth: u8, data: &[u8]) -> Result<()>;
}

/// The `_NET_SUPPORTED` list published on the root window (spec §6).
pub fn ewmh_supported_atoms() -> Vec<Atom> {
    use Atom::*;
    vec![
        NetSupported,
        NetWMName,
        NetWMIcon,
        NetWMState,
        NetWMCheck,
        NetWMFullscreen,
        NetWMStateDemandsAttention,
        NetWMStateSticky,
        NetWMStateAbove,
        NetWMStateBelow,
        NetWMStateHidden,
        NetActiveWindow,
        NetWMWindowType,
        NetWMWindowTypeDialog,
        NetClientList,
        NetClientListStacking,
        NetWMDesktop,
        NetWMPid,
        NetDesktopNames,
        NetDesktopViewport,
        NetNumberOfDesktops,
        NetCurrentDesktop,
        NetWorkarea,
        NetCloseWindow,
        NetMoveResizeWindow,
        NetFrameExtents,
        NetWMWindowOpacity,
        NetWMBypassCompositor,
    ]
}
