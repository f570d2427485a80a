//! The event type delivered by [`super::XConn::next_event`].
//!
//! Spec §4.1: "dispatching each via a jump table keyed on the event type
//! byte (34 core event types plus up to two extension event ranges —
//! randr screen-change and shape-change)". The core variants below cover
//! every event type the window manager, bar, systray and compositor act
//! on; everything else the server can send is folded into `Unhandled` so
//! the dispatcher's match stays total without a catch-all `_` arm hiding
//! new variants later.

use crate::Xid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerChange {
    pub window: Xid,
    pub same_screen: bool,
    pub root_x: i32,
    pub root_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientMessage {
    pub window: Xid,
    pub type_atom: u32,
    pub data: [u32; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigureEvent {
    pub window: Xid,
    pub above_sibling: Option<Xid>,
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
    pub border_width: u16,
    pub override_redirect: bool,
    /// Only set for `ConfigureRequest`: the bitmask of which fields the
    /// requesting client actually asked to change.
    pub value_mask: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyEvent {
    pub window: Xid,
    pub atom: u32,
    pub deleted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonEvent {
    pub window: Xid,
    pub subwindow: Option<Xid>,
    pub button: u8,
    pub state: u16,
    pub root_x: i32,
    pub root_y: i32,
    pub event_x: i32,
    pub event_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionEvent {
    pub window: Xid,
    pub root_x: i32,
    pub root_y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub window: Xid,
    pub keycode: u8,
    pub state: u16,
}

/// The outer event enum dispatched by the event pump.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum XEvent {
    KeyPress(KeyEvent),
    ButtonPress(ButtonEvent),
    ButtonRelease(ButtonEvent),
    MotionNotify(MotionEvent),
    EnterNotify(PointerChange),
    LeaveNotify(PointerChange),
    FocusIn(Xid),
    FocusOut(Xid),
    Expose(Xid),
    DestroyNotify(Xid),
    UnmapNotify(Xid),
    MapNotify(Xid),
    MapRequest(Xid),
    ConfigureNotify(ConfigureEvent),
    ConfigureRequest(ConfigureEvent),
    PropertyNotify(PropertyEvent),
    ClientMessage(ClientMessage),
    MappingNotify,
    SelectionClear { owner: Xid, selection: u32 },
    /// RandR screen-change notification: the extension's first-event
    /// offset identified this as a `ScreenChangeNotify`.
    RandrScreenChange,
    /// RandR output/CRTC change: re-run monitor discovery.
    RandrNotify,
    /// Shape extension `ShapeNotify` on a window's bounding region.
    ShapeNotify(Xid),
    /// Damage extension `DamageNotify` for a window, carrying the damaged
    /// area in root-window coordinates.
    DamageNotify {
        window: Xid,
        area: crate::Rect,
    },
    /// A `GenericEvent` carrying a Present `CompleteNotify` for `window`
    /// (the overlay for the vblank loop, or a single window registered for
    /// present-complete).
    PresentComplete {
        window: Xid,
        serial: u32,
    },
    /// An X protocol error report, classified by the event pump (spec §4.1).
    ProtocolError {
        major_opcode: u8,
        minor_opcode: u16,
        error_code: u8,
        bad_value: u32,
    },
    /// Any other core or extension event we don't act on directly.
    Unhandled,
}
