//! The `CompBackend` trait abstracting over the XRender and GPU/EGL
//! repaint paths, mirroring how `x/mod.rs` abstracts the core protocol.

use crate::error::Result;
use crate::geometry::Rect;
use crate::Xid;

use super::CompWin;

pub trait CompBackend {
    /// Allocate whatever off-screen storage the backend needs for a newly
    /// redirected window (an XRender picture, or a GL texture + EGL image).
    fn bind_pixmap(&mut self, win: Xid, geom: Rect) -> Result<()>;

    /// Rebuild that storage after a resize.
    fn rebind_pixmap(&mut self, win: Xid, geom: Rect) -> Result<()>;

    fn release_pixmap(&mut self, win: Xid) -> Result<()>;

    /// Composite every visible, non-bypassed window into the overlay,
    /// restricted to `dirty`.
    fn composite(&mut self, dirty: Rect, windows: &[&CompWin]) -> Result<()>;

    fn raise(&self, overlay: Xid) -> Result<()>;

    /// Lower the overlay below every client, used while the compositor is
    /// suspended for a fullscreen-unredirected window.
    fn lower(&self, overlay: Xid) -> Result<()>;

    /// Bind the root window's wallpaper pixmap (`_XROOTPMAP_ID`/
    /// `ESETROOT_PMAP_ID`) so `composite` can paint it under every window.
    fn update_wallpaper(&mut self, pixmap: u32) -> Result<()>;

    fn release_wallpaper(&mut self) -> Result<()>;

    /// Stop redirecting `win` so it paints straight to the screen, used
    /// when a fullscreen client covering the whole monitor suspends
    /// compositing entirely.
    fn unredirect_window(&mut self, win: Xid) -> Result<()>;

    /// Re-establish redirection on `win` after the compositor resumes.
    fn redirect_window(&mut self, win: Xid) -> Result<()>;

    /// Subscribe the overlay window to Present `CompleteNotify` and arm
    /// one vblank-synced repaint, if the Present extension is available.
    fn arm_vblank(&self, overlay: Xid) -> Result<()>;

    /// The X error base for the Damage extension, used by the event pump
    /// to classify `BadDamage` errors as non-fatal (spec §4.1).
    fn damage_error_base(&self) -> Option<u8>;
}
