//! The crate-wide error type.
//!
//! Mirrors the taxonomy the design calls for: fatal startup/runtime errors
//! propagate up to `main` and end the process, everything else is either
//! absorbed by the event pump's classifier or logged and the affected
//! subsystem runs in a degraded mode.

use crate::Xid;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the window manager.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection to the X server is gone. Fatal: the event pump exits
    /// its loop so the caller can run teardown.
    #[error("the connection to the X server was lost")]
    ConnectionClosed,

    /// Another window manager already holds `SubstructureRedirect` on the
    /// root window.
    #[error("another window manager is already running")]
    AnotherWmRunning,

    /// A round trip to the X server failed.
    #[error("X request failed: {0}")]
    X11(#[from] x11rb::errors::ReplyError),

    /// A low level connection error (socket, parsing, …).
    #[error("X connection error: {0}")]
    X11Connection(#[from] x11rb::errors::ConnectionError),

    /// Interning or looking up an atom failed.
    #[error("{0} is not a known atom")]
    UnknownAtom(&'static str),

    /// A client property was malformed or missing where required.
    #[error("the {0} property is not set for client {1}")]
    MissingProperty(&'static str, Xid),

    /// ICCCM `WM_NORMAL_HINTS` could not be parsed.
    #[error("invalid size hints: {0}")]
    InvalidHints(String),

    /// Attempted to operate on a client id that is not currently managed.
    #[error("{0} is not a managed client")]
    UnknownClient(Xid),

    /// Attempted to operate on a monitor index that does not exist.
    #[error("no such monitor: {0}")]
    UnknownMonitor(usize),

    /// A required X extension (RandR, Composite, Damage, XFixes, Render) is
    /// missing or too old.
    #[error("required X extension unavailable: {0}")]
    MissingExtension(&'static str),

    /// Compositor initialisation failed; the caller falls back to running
    /// uncomposited rather than treating this as fatal.
    #[error("compositor init failed: {0}")]
    CompositorInit(String),

    /// A D-Bus operation failed.
    #[cfg(feature = "sni")]
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    /// I/O failure (spawning a process, reading autostart scripts, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `nix` syscall failed (fork, signal, poll).
    #[error("system call failed: {0}")]
    Errno(#[from] nix::Error),

    /// A generic, user-message-only error for situations that don't need a
    /// dedicated variant.
    #[error("{0}")]
    Raw(String),
}

impl Error {
    /// True for the `FatalStartup`/`FatalRuntime` classes from the error
    /// handling design: these end the process rather than degrading a
    /// subsystem.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ConnectionClosed | Error::AnotherWmRunning | Error::X11Connection(_)
        )
    }
}
