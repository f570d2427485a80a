//! X property data types used by [`super::XConn::get_prop`] /
//! [`super::XConn::set_prop`], and the ICCCM `WM_NORMAL_HINTS`/`WM_HINTS`
//! decoders used by `client.rs`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Known property payload shapes an [`super::XConn`] impl can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prop {
    Atom(Vec<u32>),
    Cardinal(Vec<u32>),
    UTF8String(Vec<String>),
    Window(Vec<u32>),
}

bitflags! {
    /// Flags set in a `WM_HINTS` property (ICCCM §4.1.2.4).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WmHintsFlags: u32 {
        const INPUT_HINT       = 0b0000000001;
        const STATE_HINT       = 0b0000000010;
        const ICON_PIXMAP_HINT = 0b0000000100;
        const ICON_WINDOW_HINT = 0b0000001000;
        const URGENCY_HINT      = 0b0100000000;
    }
}

/// Decoded `WM_HINTS`. Only the fields `client.rs` actually consumes
/// (urgency) are kept as typed accessors; the raw flags are retained for
/// completeness.
#[derive(Debug, Clone, Copy, Default)]
pub struct WmHints {
    pub flags: WmHintsFlags,
}

impl WmHints {
    pub fn is_urgent(&self) -> bool {
        self.flags.contains(WmHintsFlags::URGENCY_HINT)
    }
}

bitflags! {
    /// Flags set in a `WM_NORMAL_HINTS` property (ICCCM §4.1.2.3).
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WmNormalHintsFlags: u32 {
        const P_MIN_SIZE   = 0b0000010000;
        const P_MAX_SIZE   = 0b0000100000;
        const P_RESIZE_INC = 0b0001000000;
        const P_ASPECT     = 0b0010000000;
        const P_BASE_SIZE  = 0b0100000000;
    }
}

/// Decoded ICCCM size hints, mirroring the fields `updatesizehints` reads
/// in `original_source/src/client.c` into the `Client` struct directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct WmNormalHints {
    pub flags: WmNormalHintsFlags,
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
}

/// Possible `WM_STATE` values (ICCCM §4.1.3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmState {
    Withdrawn,
    Normal,
    Iconic,
}

impl WmState {
    pub fn as_u32(self) -> u32 {
        match self {
            WmState::Withdrawn => 0,
            WmState::Normal => 1,
            WmState::Iconic => 3,
        }
    }
}

/// Attributes of a window as reported by `GetWindowAttributes`, used when
/// deciding whether to manage a window found during the initial scan.
#[derive(Debug, Clone, Copy)]
pub struct WindowAttributes {
    pub override_redirect: bool,
    pub viewable: bool,
    pub depth: u8,
}
