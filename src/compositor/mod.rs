//! The integrated compositor: off-screen redirected windows are tracked,
//! damaged regions accumulated, and the composed scene repainted to the
//! overlay window through XRender, vblank-synced via the Present
//! extension where available.
//!
//! Grounded on `compositor.h`/`compositor.c` in `original_source/src/`:
//! the doc comments on each public function below are adapted from that
//! header's own function documentation.

pub mod backend;
pub mod xrender;

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::x::{x11rb_backend::X11rbConn, WinType, XConn};
use crate::Xid;

pub use backend::CompBackend;

/// The concrete backend this crate drives at runtime.
pub type DefaultBackend = xrender::XRenderBackend;

/// Acquire the compositor manager selection, create the overlay window,
/// redirect every child of `root` off-screen, and build the XRender
/// backend over it. Grounded on `compositor_init` in
/// `original_source/src/compositor.c`: failure here (missing Composite/
/// Render extension, or another compositor already owning the selection)
/// is never fatal to the window manager — the caller logs a warning and
/// runs uncomposited, matching spec §7's `CompositorInit` degraded mode.
#[cfg(feature = "compositor")]
pub fn init(conn: &X11rbConn, root: Xid, screen: Rect) -> Result<Compositor<DefaultBackend>> {
    use x11rb::protocol::composite::ConnectionExt as _;

    let cm_selection = conn.atoms().cm_selection(conn.screen_num());
    let existing_owner = conn.get_selection_owner(cm_selection)?;
    if existing_owner.0 != x11rb::NONE {
        return Err(Error::CompositorInit("compositor manager selection already owned".into()));
    }

    conn.raw()
        .composite_redirect_subwindows(root.0, x11rb::protocol::composite::Redirect::AUTOMATIC)
        .map_err(Error::X11Connection)?;

    let overlay = conn.create_window(root, screen, WinType::InputOutput(crate::atom::Atom::NetWMWindowTypeDialog), true)?;
    conn.map(overlay)?;
    conn.set_selection_owner(cm_selection, overlay)?;

    let backend = xrender::XRenderBackend::new(conn.conn_rc(), root, overlay, conn.damage_first_event())?;
    let has_present = conn.present_first_event().is_some();
    if has_present {
        backend.select_vblank_input(overlay)?;
        info!(?overlay, "compositor initialized (XRender backend, Present vblank scheduling)");
    } else {
        info!(?overlay, "compositor initialized (XRender backend, no Present extension; immediate repaint)");
    }

    let mut compositor = Compositor::new(backend, overlay, screen, has_present);
    let wallpaper = read_wallpaper_pixmap(conn, root);
    compositor.update_wallpaper(wallpaper)?;
    Ok(compositor)
}

/// Read `_XROOTPMAP_ID`, falling back to `ESETROOT_PMAP_ID`, from `root` —
/// the two conventions root-setting tools (`xsetroot`, `feh`, `nitrogen`)
/// use to publish the pixmap currently painted as the desktop background.
/// Grounded on `comp_update_wallpaper` in `original_source/src/compositor.c`.
#[cfg(feature = "compositor")]
pub fn read_wallpaper_pixmap<X: XConn>(conn: &X, root: Xid) -> Option<u32> {
    for atom in [crate::atom::Atom::XRootPixmapId, crate::atom::Atom::EsetrootPixmapId] {
        if let Ok(Some(pixmap)) = conn.get_pixmap_property(root, atom) {
            if pixmap != 0 {
                return Some(pixmap);
            }
        }
    }
    None
}

#[cfg(feature = "compositor")]
pub fn warn_unavailable(e: &Error) {
    warn!(error = %e, "compositor unavailable, running uncomposited");
}

/// A window tracked by the compositor: its redirected pixmap, opacity,
/// and whether it is currently bypassing composition (unredirected,
/// painting straight to the screen).
#[derive(Debug, Clone)]
pub struct CompWin {
    pub win: Xid,
    pub geom: Rect,
    pub opacity: f64,
    pub bypassed: bool,
    /// Set when a fullscreen client requests bypass but the window is not
    /// yet mapped/configured; the bypass is deferred until the next
    /// configure notification (spec §4.5, "defer_fullscreen_bypass").
    pub bypass_pending: bool,
}

pub struct Compositor<B: CompBackend> {
    backend: B,
    overlay: Xid,
    windows: HashMap<Xid, CompWin>,
    /// Accumulated damage since the last repaint, in root coordinates.
    dirty: Option<Rect>,
    screen: Rect,
    /// Whether the server advertises the Present extension; when false,
    /// `schedule_repaint` paints immediately instead of arming a vblank.
    has_present: bool,
    /// A `PresentNotifyMsc` is outstanding on the overlay.
    vblank_armed: bool,
    /// Damage accumulated since the last vblank was armed; painted on the
    /// next `PresentCompleteNotify`.
    repaint_pending: bool,
    /// Set while a fullscreen client covering the whole monitor has
    /// suspended compositing entirely (spec §4.7 "paused"): the overlay is
    /// lowered and that client's window is unredirected so it paints
    /// straight to the screen with zero compositor overhead.
    paused: bool,
}

impl<B: CompBackend> Compositor<B> {
    /// Initialise the compositor: acquire the `_NET_WM_CM_S<n>` selection,
    /// create the overlay window, and hand off to the concrete backend's
    /// own setup (XRender picture formats and Present availability).
    /// Grounded on `compositor_init`.
    pub fn new(backend: B, overlay: Xid, screen: Rect, has_present: bool) -> Self {
        Self {
            backend,
            overlay,
            windows: HashMap::new(),
            dirty: None,
            screen,
            has_present,
            vblank_armed: false,
            repaint_pending: false,
            paused: false,
        }
    }

    /// Begin tracking a newly mapped, redirected window. Grounded on
    /// `compositor_add_window`.
    pub fn add_window(&mut self, win: Xid, geom: Rect) -> Result<()> {
        self.backend.bind_pixmap(win, geom)?;
        self.windows.insert(
            win,
            CompWin { win, geom, opacity: 1.0, bypassed: false, bypass_pending: false },
        );
        self.damage_all();
        Ok(())
    }

    /// Stop tracking a window that was unmapped or destroyed. Grounded on
    /// `compositor_remove_window`.
    pub fn remove_window(&mut self, win: Xid) -> Result<()> {
        if let Some(w) = self.windows.remove(&win) {
            self.backend.release_pixmap(win)?;
            self.mark_dirty(w.geom);
        }
        Ok(())
    }

    /// Update a tracked window's geometry after a configure, rebinding its
    /// pixmap if the size changed. Grounded on `compositor_configure_window`.
    pub fn configure_window(&mut self, win: Xid, geom: Rect) -> Result<()> {
        let Some(w) = self.windows.get_mut(&win) else { return Ok(()) };
        let old = w.geom;
        if old.w != geom.w || old.h != geom.h {
            self.backend.rebind_pixmap(win, geom)?;
        }
        w.geom = geom;
        let deferred_bypass = w.bypass_pending;
        if deferred_bypass {
            self.windows.get_mut(&win).expect("checked above").bypass_pending = false;
        }
        self.mark_dirty(old);
        self.mark_dirty(geom);
        if deferred_bypass {
            self.bypass_window(win, true)?;
        }
        Ok(())
    }

    /// Request a window stop being composited and paint directly to the
    /// screen (set on fullscreen clients with `_NET_WM_BYPASS_COMPOSITOR
    /// == 2`, per spec §9's resolved Open Question: only read at manage
    /// time). Grounded on `compositor_bypass_window`.
    pub fn bypass_window(&mut self, win: Xid, bypass: bool) -> Result<()> {
        let Some(w) = self.windows.get_mut(&win) else { return Ok(()) };
        if bypass == w.bypassed {
            return Ok(());
        }
        if bypass {
            self.backend.unredirect_window(win)?;
        } else {
            self.backend.redirect_window(win)?;
        }
        let w = self.windows.get_mut(&win).expect("checked above");
        w.bypassed = bypass;
        self.mark_dirty(w.geom);
        Ok(())
    }

    /// Defer a bypass request until the window's next configure, used
    /// when a fullscreen transition races the resize that must complete
    /// first. Grounded on `compositor_defer_fullscreen_bypass`.
    pub fn defer_fullscreen_bypass(&mut self, win: Xid) {
        if let Some(w) = self.windows.get_mut(&win) {
            w.bypass_pending = true;
        }
    }

    /// Set per-window opacity from `_NET_WM_WINDOW_OPACITY`. Grounded on
    /// `compositor_set_opacity`.
    pub fn set_opacity(&mut self, win: Xid, opacity: f64) {
        if let Some(w) = self.windows.get_mut(&win) {
            w.opacity = opacity.clamp(0.0, 1.0);
            self.mark_dirty(w.geom);
        }
    }

    /// Accumulate a Damage extension notification's area. Grounded on
    /// `compositor_handle_event`'s Damage case.
    pub fn damage(&mut self, win: Xid, area: Rect) {
        if let Some(w) = self.windows.get(&win) {
            let root_area = Rect::new(w.geom.x + area.x, w.geom.y + area.y, area.w, area.h);
            self.mark_dirty(root_area);
        }
    }

    pub fn damage_all(&mut self) {
        self.dirty = Some(self.screen);
    }

    fn mark_dirty(&mut self, area: Rect) {
        let area = area.clamped_to(&self.screen);
        self.dirty = Some(match self.dirty {
            Some(d) => d.union(&area),
            None => area,
        });
    }

    /// Raise the overlay above every client but below the bar/menu.
    /// Grounded on `compositor_raise_overlay`.
    pub fn raise_overlay(&self) -> Result<()> {
        self.backend.raise(self.overlay)
    }

    /// Bring keyboard focus handling for the compositor's own windows
    /// into line with the WM's idea of the focused client, needed only
    /// for backends that draw a focus ring (the default XRender backend
    /// does not). Grounded on `compositor_focus_window`.
    pub fn focus_window(&self, _win: Xid) {}

    /// Repaint the accumulated dirty region, if any, and clear it.
    /// Grounded on `compositor_repaint_now`.
    pub fn repaint_now(&mut self) -> Result<()> {
        let Some(dirty) = self.dirty.take() else { return Ok(()) };
        debug!(?dirty, windows = self.windows.len(), "compositor repaint");
        let visible: Vec<&CompWin> = self.windows.values().filter(|w| !w.bypassed).collect();
        self.backend.composite(dirty, &visible)
    }

    pub fn set_hidden(&mut self, win: Xid, hidden: bool) {
        if hidden {
            self.windows.remove(&win);
        }
    }

    pub fn damage_error_base(&self) -> Option<u8> {
        self.backend.damage_error_base()
    }

    /// Bind `pixmap` as the wallpaper, or release whatever's bound if
    /// `None`. Grounded on `comp_update_wallpaper`.
    pub fn update_wallpaper(&mut self, pixmap: Option<u32>) -> Result<()> {
        match pixmap {
            Some(pixmap) => self.backend.update_wallpaper(pixmap),
            None => self.backend.release_wallpaper(),
        }
    }

    /// Pause or resume compositing for a fullscreen client that covers its
    /// whole monitor. Grounded on `compositor_check_unredirect`: pausing
    /// unredirects that window (so it paints straight to the screen with
    /// zero compositor overhead) and lowers the overlay below every client;
    /// resuming re-redirects it, raises the overlay, and repaints
    /// everything once.
    ///
    /// `fullscreen_covering` is the window to unredirect when pausing, or
    /// `None` to resume normal compositing.
    pub fn check_unredirect(&mut self, fullscreen_covering: Option<Xid>) -> Result<()> {
        match fullscreen_covering {
            Some(win) if !self.paused => {
                self.paused = true;
                self.vblank_armed = false;
                self.repaint_pending = false;
                self.bypass_window(win, true)?;
                self.backend.lower(self.overlay)?;
            }
            None if self.paused => {
                self.paused = false;
                self.backend.raise(self.overlay)?;
                self.damage_all();
                self.schedule_repaint()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Request a repaint, synced to the next vblank when the Present
    /// extension is available, immediate otherwise. Grounded on
    /// `schedule_repaint`/`comp_arm_vblank`.
    pub fn schedule_repaint(&mut self) -> Result<()> {
        if self.paused {
            return Ok(());
        }
        self.repaint_pending = true;
        if self.has_present {
            if !self.vblank_armed {
                self.backend.arm_vblank(self.overlay)?;
                self.vblank_armed = true;
            }
            Ok(())
        } else {
            self.repaint_now()
        }
    }

    /// Handle a `PresentCompleteNotify` for the overlay's vblank channel:
    /// paint whatever accumulated while waiting, then re-arm for the next
    /// frame if more damage is still pending. Grounded on the
    /// `PresentCompleteNotify` case in `compositor_handle_event`.
    pub fn on_vblank(&mut self) -> Result<()> {
        self.vblank_armed = false;
        if self.paused {
            return Ok(());
        }
        if self.repaint_pending {
            self.repaint_pending = false;
            self.repaint_now()?;
        }
        if self.dirty.is_some() {
            self.schedule_repaint()?;
        }
        Ok(())
    }
}
