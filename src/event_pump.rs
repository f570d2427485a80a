//! The main loop: a unified `poll()` over the X socket and (if the SNI
//! host is enabled) its self-pipe fd, draining and dispatching events
//! until the quit flag flips.
//!
//! Grounded on `run`/the event jump table in `original_source/src/awm.c`
//! and `events.c`; spec §4.1 "Event Pump" and §7's X protocol error
//! classifier.

use std::os::unix::io::RawFd;
use std::time::{Duration, Instant};

use nix::poll::{poll, PollFd, PollFlags};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::status::Ticker;
use crate::wm::WindowManager;
use crate::x::{XConn, XEvent};

/// Whether an asynchronous X protocol error should be silently absorbed,
/// logged as unexpected, or treated as the one startup-time fatal case.
/// Grounded on spec §4.1: "request `ChangeWindowAttributes` with
/// `BadAccess` ⇒ 'another WM is running' at startup only, fatal; all
/// other whitelisted pairs are silently absorbed."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BenignAsync,
    UnexpectedAsync,
    Fatal,
}

/// `xcb` request opcodes relevant to the classifier; kept local rather
/// than importing `x11rb::protocol::xproto` into this module so the
/// whitelist reads as plain data.
mod opcode {
    pub const CHANGE_WINDOW_ATTRIBUTES: u8 = 2;
    pub const CONFIGURE_WINDOW: u8 = 12;
    pub const GET_PROPERTY: u8 = 20;
    pub const GET_GEOMETRY: u8 = 14;
    pub const SET_INPUT_FOCUS: u8 = 42;
    pub const GRAB_BUTTON: u8 = 28;
}

mod error_code {
    pub const BAD_WINDOW: u8 = 3;
    pub const BAD_ACCESS: u8 = 10;
    pub const BAD_DRAWABLE: u8 = 9;
    pub const BAD_MATCH: u8 = 8;
    pub const BAD_VALUE: u8 = 2;
}

/// Classify an X protocol error, given whether startup (the WM's initial
/// `SubstructureRedirect` probe) is still in progress.
pub fn classify_error(major_opcode: u8, error_code: u8, during_startup: bool) -> ErrorClass {
    if during_startup && major_opcode == opcode::CHANGE_WINDOW_ATTRIBUTES && error_code == error_code::BAD_ACCESS {
        return ErrorClass::Fatal;
    }
    match (major_opcode, error_code) {
        (opcode::CONFIGURE_WINDOW, error_code::BAD_WINDOW)
        | (opcode::GET_PROPERTY, error_code::BAD_WINDOW)
        | (opcode::GET_GEOMETRY, error_code::BAD_DRAWABLE)
        | (opcode::SET_INPUT_FOCUS, error_code::BAD_MATCH)
        | (opcode::SET_INPUT_FOCUS, error_code::BAD_WINDOW)
        | (opcode::GRAB_BUTTON, error_code::BAD_ACCESS)
        | (_, error_code::BAD_WINDOW)
        | (_, error_code::BAD_DRAWABLE) => ErrorClass::BenignAsync,
        (_, error_code::BAD_VALUE) => ErrorClass::BenignAsync,
        _ => ErrorClass::UnexpectedAsync,
    }
}

/// Accumulated "needs a redraw/repaint before the next poll" flags,
/// matching the original's global `barsdirty` plus the compositor's
/// per-cycle repaint gate (spec §4.1 "Ordering guarantees": "the bar
/// redraw and compositor repaint fire at most once per cycle").
#[derive(Debug, Default, Clone, Copy)]
pub struct DirtyFlags {
    pub bar: bool,
    pub compositor: bool,
}

impl DirtyFlags {
    pub fn clear(&mut self) {
        self.bar = false;
        self.compositor = false;
    }
}

/// Signals the pump polls for alongside the X and (optional) D-Bus fds,
/// delivered through a `signalfd` the caller installs before `run`
/// starts (`SIGUSR1` for xrdb reload, `SIGHUP` for... nothing yet, kept
/// distinct from `SIGTERM`/`SIGINT` which the caller maps to quit
/// directly).
pub struct Signals {
    pub fd: RawFd,
}

/// Runs the event pump until `wm`'s embedding driver asks it to stop.
/// Returns only when a fatal error occurs or the caller's `should_quit`
/// closure returns true after a dispatched event — the latter is how
/// `quit`/`restart` key bindings actually end the loop, since the pump
/// itself has no notion of key bindings.
pub struct EventPump<'a, X: XConn> {
    pub wm: &'a mut WindowManager<X>,
    pub status: Ticker,
    pub dirty: DirtyFlags,
    pub during_startup: bool,
    #[cfg(feature = "sni")]
    pub sni: Option<&'a crate::sni::StatusNotifierWatcher>,
    pub systray: Option<crate::systray::Systray>,
    #[cfg(feature = "compositor")]
    pub compositor: Option<crate::compositor::Compositor<crate::compositor::DefaultBackend>>,
    /// The `_NET_WM_CM_S<n>` selection atom, resolved once at startup by
    /// the caller (which holds the concrete connection's `AtomCache`) so
    /// this generic-over-`XConn` struct never needs one itself.
    #[cfg(feature = "compositor")]
    pub cm_selection: u32,
    pub signals_fd: Option<RawFd>,
    /// `KeyPress` events drained from the X queue, queued here rather than
    /// acted on directly: the pump has no notion of key bindings (those
    /// are the embedder's static table, the same way `config.rs` keeps
    /// `Rule`s as data rather than callbacks), so the caller drains this
    /// after each `tick()` and resolves keycode+modifiers itself.
    pub pending_keys: Vec<crate::x::event::KeyEvent>,
}

impl<'a, X: XConn> EventPump<'a, X> {
    /// Run one poll-and-drain cycle. Returns `Ok(true)` if the pump should
    /// keep running, `Ok(false)` if the X connection reported `HUP`/`ERR`
    /// and the caller should move straight to teardown.
    pub fn tick(&mut self, poll_timeout: Duration) -> Result<bool> {
        let x_fd = self.wm.conn.as_raw_fd();
        let mut fds = vec![PollFd::new(x_fd, PollFlags::POLLIN)];
        #[cfg(feature = "sni")]
        let sni_fd_index = self.sni.map(|s| {
            fds.push(PollFd::new(s.as_raw_fd(), PollFlags::POLLIN));
            fds.len() - 1
        });
        let signals_index = self.signals_fd.map(|fd| {
            fds.push(PollFd::new(fd, PollFlags::POLLIN));
            fds.len() - 1
        });

        let timeout_ms = poll_timeout.as_millis().min(i32::MAX as u128) as i32;
        match poll(&mut fds, timeout_ms) {
            Ok(_) => {}
            Err(nix::errno::Errno::EINTR) => return Ok(true),
            Err(e) => return Err(crate::error::Error::Errno(e)),
        }

        let x_revents = fds[0].revents().unwrap_or(PollFlags::empty());
        if x_revents.intersects(PollFlags::POLLHUP | PollFlags::POLLERR) {
            warn!("X connection reported HUP/ERR; tearing down");
            return Ok(false);
        }

        if x_revents.contains(PollFlags::POLLIN) || self.wm.conn.pending() > 0 {
            self.drain_x_events()?;
        }

        #[cfg(feature = "sni")]
        if let Some(i) = sni_fd_index {
            if fds[i].revents().unwrap_or(PollFlags::empty()).contains(PollFlags::POLLIN) {
                self.drain_sni_events();
            }
        }

        if let Some(i) = signals_index {
            if fds[i].revents().unwrap_or(PollFlags::empty()).contains(PollFlags::POLLIN) {
                self.drain_signals(self.signals_fd.expect("signals_index only set when signals_fd is Some"));
            }
        }

        let now = Instant::now();
        if self.status.due(now) && self.status.tick(now) {
            self.dirty.bar = true;
        }

        self.flush_dirty()?;
        Ok(true)
    }

    fn drain_x_events(&mut self) -> Result<()> {
        loop {
            let event = self.wm.conn.next_event()?;
            self.dispatch(event)?;
            if self.wm.conn.pending() == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Dispatch one decoded event. Grounded on the `handler[]` jump table
    /// in `original_source/src/awm.c`.
    fn dispatch(&mut self, event: XEvent) -> Result<()> {
        match event {
            XEvent::MapRequest(win) => {
                if self.wm.find_client(win).is_none() {
                    if let Ok(attrs) = self.wm.conn.get_window_attributes(win) {
                        if !attrs.override_redirect {
                            self.wm.manage(win, &attrs)?;
                            self.dirty.bar = true;
                        }
                    }
                }
            }
            XEvent::DestroyNotify(win) => {
                if self.wm.find_client(win).is_some() {
                    self.wm.unmanage(win, true)?;
                    self.dirty.bar = true;
                } else if let Some(tray) = self.systray.as_mut() {
                    tray.undock(&self.wm.conn, win)?;
                }
                #[cfg(feature = "compositor")]
                if let Some(comp) = self.compositor.as_mut() {
                    comp.remove_window(win)?;
                    self.dirty.compositor = true;
                }
            }
            XEvent::UnmapNotify(win) => {
                if self.wm.find_client(win).is_some() {
                    self.wm.unmanage(win, false)?;
                    self.dirty.bar = true;
                } else if let Some(tray) = self.systray.as_mut() {
                    tray.undock(&self.wm.conn, win)?;
                }
                #[cfg(feature = "compositor")]
                if let Some(comp) = self.compositor.as_mut() {
                    comp.remove_window(win)?;
                    self.dirty.compositor = true;
                }
            }
            XEvent::MapNotify(win) => {
                #[cfg(feature = "compositor")]
                if let Some(comp) = self.compositor.as_mut() {
                    if self.wm.find_client(win).is_none() {
                        if let Ok(geom) = self.wm.conn.get_geometry(win) {
                            comp.add_window(win, geom)?;
                            self.dirty.compositor = true;
                        }
                    }
                }
                #[cfg(not(feature = "compositor"))]
                let _ = win;
            }
            XEvent::ConfigureRequest(cfg) => {
                self.handle_configure_request(cfg)?;
            }
            XEvent::ConfigureNotify(cfg) => {
                #[cfg(feature = "compositor")]
                if self.compositor.is_some() {
                    let geom = crate::Rect::new(cfg.x, cfg.y, cfg.w, cfg.h);
                    self.compositor.as_mut().expect("checked above").configure_window(cfg.window, geom)?;
                    self.dirty.compositor = true;
                    self.sync_compositor_pause()?;
                }
                #[cfg(not(feature = "compositor"))]
                let _ = cfg;
            }
            XEvent::PropertyNotify(p) => {
                self.handle_property_notify(p)?;
            }
            XEvent::ClientMessage(msg) => {
                self.handle_client_message(msg)?;
            }
            XEvent::EnterNotify(p) => {
                if let Some(idx) = self.wm.find_client(p.window) {
                    let mon = self.wm.clients[idx].mon;
                    if mon != self.wm.sel_mon {
                        self.wm.sel_mon = mon;
                    }
                    self.wm.focus(Some(idx))?;
                }
            }
            XEvent::FocusIn(win) => {
                // Refuse focus we didn't ask for (e.g. a client that
                // grabs it back after a WM_TAKE_FOCUS race); re-assert
                // the window manager's own idea of who's focused.
                if self.wm.find_client(win).is_none() && win != self.wm.conn.root() {
                    if let Some(sel) = self.wm.monitors[self.wm.sel_mon].sel {
                        let sel_win = self.wm.clients[sel].win;
                        self.wm.conn.set_input_focus(sel_win)?;
                    }
                }
            }
            XEvent::KeyPress(k) => {
                self.pending_keys.push(k);
            }
            XEvent::MappingNotify => {
                // Keymap changed; key bindings are re-resolved by the
                // caller's grab re-installation, not the pump itself.
            }
            XEvent::RandrScreenChange | XEvent::RandrNotify => {
                self.handle_geometry_change()?;
            }
            XEvent::ProtocolError { major_opcode, error_code, .. } => {
                match crate::event_pump::classify_error(major_opcode, error_code, self.during_startup) {
                    ErrorClass::BenignAsync => debug!(major_opcode, error_code, "benign async X error"),
                    ErrorClass::UnexpectedAsync => warn!(major_opcode, error_code, "unexpected X error"),
                    ErrorClass::Fatal => return Err(crate::error::Error::AnotherWmRunning),
                }
            }
            XEvent::DamageNotify { window, area } => {
                #[cfg(feature = "compositor")]
                if let Some(comp) = self.compositor.as_mut() {
                    comp.damage(window, area);
                    self.dirty.compositor = true;
                }
                #[cfg(not(feature = "compositor"))]
                let _ = (window, area);
            }
            XEvent::ShapeNotify(win) => {
                #[cfg(feature = "compositor")]
                if let Some(comp) = self.compositor.as_mut() {
                    if let Ok(geom) = self.wm.conn.get_geometry(win) {
                        comp.configure_window(win, geom)?;
                        self.dirty.compositor = true;
                    }
                }
                #[cfg(not(feature = "compositor"))]
                let _ = win;
            }
            XEvent::PresentComplete { window, serial: _ } => {
                #[cfg(feature = "compositor")]
                {
                    let _ = window;
                    if let Some(comp) = self.compositor.as_mut() {
                        comp.on_vblank()?;
                    }
                }
                #[cfg(not(feature = "compositor"))]
                let _ = window;
            }
            XEvent::SelectionClear { owner: _, selection } => {
                #[cfg(feature = "compositor")]
                {
                    if selection == self.cm_selection && self.compositor.take().is_some() {
                        info!("compositor manager selection lost; running uncomposited");
                    }
                }
                #[cfg(not(feature = "compositor"))]
                let _ = selection;
            }
            XEvent::Expose(_) => {
                self.dirty.bar = true;
            }
            XEvent::ButtonPress(b) => {
                // Click-to-focus; key/button *bindings* (the launcher,
                // layout/tag shortcuts) are dispatched by the embedder
                // before events reach the pump, the same way `config.rs`
                // keeps `Rule`s as plain data rather than callbacks.
                if let Some(idx) = self.wm.find_client(b.window) {
                    self.wm.focus(Some(idx))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_configure_request(&mut self, cfg: crate::x::event::ConfigureEvent) -> Result<()> {
        let win = cfg.window;
        if let Some(idx) = self.wm.find_client(win) {
            // A tiled, non-floating client's geometry is ours to manage;
            // only honour border-width changes from the request and let
            // the next `arrange` pass reassert position/size. Floating
            // clients get the requested geometry verbatim.
            let floating = self.wm.clients[idx].is_floating || self.wm.clients[idx].is_fullscreen;
            if floating {
                let mut geom = self.wm.clients[idx].geom;
                if cfg.value_mask & (1 << 0) != 0 {
                    geom.x = cfg.x;
                }
                if cfg.value_mask & (1 << 1) != 0 {
                    geom.y = cfg.y;
                }
                if cfg.value_mask & (1 << 2) != 0 {
                    geom.w = cfg.w;
                }
                if cfg.value_mask & (1 << 3) != 0 {
                    geom.h = cfg.h;
                }
                self.wm.clients[idx].geom = geom;
                self.wm.conn.configure(
                    win,
                    crate::x::ClientConfig { x: Some(geom.x), y: Some(geom.y), w: Some(geom.w), h: Some(geom.h), ..Default::default() },
                )?;
            } else {
                self.wm.conn.configure(win, crate::x::ClientConfig::default())?;
            }
        } else {
            self.wm.conn.configure(
                win,
                crate::x::ClientConfig {
                    x: Some(cfg.x),
                    y: Some(cfg.y),
                    w: Some(cfg.w),
                    h: Some(cfg.h),
                    border_width: Some(cfg.border_width as u32),
                    ..Default::default()
                },
            )?;
        }
        Ok(())
    }

    fn handle_property_notify(&mut self, p: crate::x::event::PropertyEvent) -> Result<()> {
        if p.window == self.wm.conn.root() {
            let resource_manager = self.wm.conn.atom(crate::atom::Atom::ResourceManager);
            if p.atom == resource_manager {
                crate::xrdb::reload_colors(&self.wm.conn, &mut self.wm.config)?;
                self.dirty.bar = true;
            }
            return Ok(());
        }
        let Some(idx) = self.wm.find_client(p.window) else { return Ok(()) };
        let net_wm_name = self.wm.conn.atom(crate::atom::Atom::NetWMName);
        let wm_name = self.wm.conn.atom(crate::atom::Atom::WMName);
        let wm_hints = self.wm.conn.atom(crate::atom::Atom::WMHints);
        let wm_normal_hints = self.wm.conn.atom(crate::atom::Atom::WMNormalHints);

        if p.atom == net_wm_name || p.atom == wm_name {
            self.wm.clients[idx].name = self.wm.conn.get_text_property(p.window, crate::atom::Atom::NetWMName)?.unwrap_or_default();
            self.dirty.bar = true;
        } else if p.atom == wm_hints {
            if let Some(hints) = self.wm.conn.get_wm_hints(p.window)? {
                self.wm.clients[idx].is_urgent = hints.is_urgent();
                self.dirty.bar = true;
            }
        } else if p.atom == wm_normal_hints {
            if let Some(hints) = self.wm.conn.get_wm_normal_hints(p.window)? {
                self.wm.clients[idx].update_size_hints(&hints);
            }
        }
        Ok(())
    }

    /// Root client messages dispatch to systray docking (legacy XEmbed)
    /// or to the window manager's EWMH handlers; everything else is
    /// ignored. Grounded on the top of `clientmessage` in
    /// `original_source/src/events.c`.
    fn handle_client_message(&mut self, msg: crate::x::event::ClientMessage) -> Result<()> {
        let systray_opcode = self.wm.conn.atom(crate::atom::Atom::NetSystemTrayOP);
        if msg.type_atom == systray_opcode {
            if let Some(tray) = self.systray.as_mut() {
                if msg.window == tray.window {
                    return tray.handle_client_message(&self.wm.conn, msg.data);
                }
            }
        }
        self.wm.handle_client_message(&msg)?;
        #[cfg(feature = "compositor")]
        if let Some(idx) = self.wm.find_client(msg.window) {
            if self.wm.clients[idx].is_fullscreen {
                // The resize to cover the monitor hasn't round-tripped back
                // as a ConfigureNotify yet; defer the unredirect until it
                // has, so the compositor rebinds the pixmap at the new size
                // first. Grounded on `compositor_defer_fullscreen_bypass`.
                if let Some(comp) = self.compositor.as_mut() {
                    comp.defer_fullscreen_bypass(msg.window);
                }
            } else {
                self.sync_compositor_pause()?;
            }
        }
        Ok(())
    }

    /// Pause the compositor (unredirect + lower the overlay) when the
    /// selected client on any monitor is fullscreen and covers that
    /// monitor's entire screen area; resume otherwise. Grounded on
    /// `compositor_check_unredirect`.
    #[cfg(feature = "compositor")]
    fn sync_compositor_pause(&mut self) -> Result<()> {
        if self.compositor.is_none() {
            return Ok(());
        }
        let covering = self.wm.monitors.iter().find_map(|m| {
            let idx = m.sel?;
            let c = &self.wm.clients[idx];
            if c.is_fullscreen && c.geom == m.screen_area {
                Some(c.win)
            } else {
                None
            }
        });
        self.compositor.as_mut().expect("checked above").check_unredirect(covering)
    }

    fn handle_geometry_change(&mut self) -> Result<()> {
        let fresh = self.wm.conn.screen_details()?;
        if !crate::monitor::geometry_changed(&self.wm.monitors, &fresh) {
            return Ok(());
        }
        info!(count = fresh.len(), "display geometry changed");
        // Retiring/adding monitors outright is left to the embedding
        // binary's startup-equivalent re-init path; here we only resize
        // survivors in place and migrate clients off any that vanished.
        let n_old = self.wm.monitors.len();
        let bar_height = self.wm.config.bar_height;
        for (i, rect) in fresh.iter().enumerate() {
            if i < n_old {
                self.wm.monitors[i].screen_area = *rect;
                self.wm.monitors[i].recompute_work_area(bar_height);
                if let Some(bar_win) = self.wm.monitors[i].bar_win {
                    let geom = crate::bar::bar_geometry(&self.wm.monitors[i], bar_height);
                    self.wm.conn.configure(
                        bar_win,
                        crate::x::ClientConfig { x: Some(geom.x), y: Some(geom.y), w: Some(geom.w), h: Some(geom.h), ..Default::default() },
                    )?;
                }
            }
        }
        if fresh.len() < n_old {
            for removed in (fresh.len()..n_old).rev() {
                self.wm.attach_clients(removed)?;
            }
        }
        self.wm.arrange_all()?;
        self.dirty.bar = true;
        Ok(())
    }

    #[cfg(feature = "sni")]
    fn drain_sni_events(&mut self) {
        use crate::sni::watcher::SniEvent;
        let Some(sni) = self.sni else { return };
        for ev in sni.poll_events() {
            match ev {
                SniEvent::ItemRegistered { service, .. } => {
                    debug!(service, "StatusNotifierItem registered");
                    self.dirty.bar = true;
                }
                SniEvent::ItemUnregistered { service } => {
                    debug!(service, "StatusNotifierItem unregistered");
                    self.dirty.bar = true;
                }
                SniEvent::PropertiesReady { service, object_path, generation, title, icon_name, icons, status, item_is_menu, menu_path } => {
                    sni.apply_properties(&service, &object_path, generation, title, icon_name, icons, status, item_is_menu, menu_path);
                    self.dirty.bar = true;
                }
                SniEvent::MenuReady { .. } => {
                    // Handed to the popup menu module by the caller that
                    // triggered the fetch; the pump only needs to mark
                    // the bar dirty for any icon-state change implied by
                    // opening a menu.
                }
            }
        }
        sni.fetch_due_properties();
    }

    fn drain_signals(&mut self, _fd: RawFd) {
        // The signalfd payload (a `signalfd_siginfo`) is read and
        // interpreted by the caller's signal-setup code; by the time the
        // pump is notified it only needs to re-run the action, which for
        // SIGUSR1 is an xrdb reload already handled via the
        // `RESOURCE_MANAGER` PropertyNotify path above. Kept as a hook so
        // a future signal (e.g. a forced reflow) has somewhere to land.
    }

    fn flush_dirty(&mut self) -> Result<()> {
        if self.dirty.bar {
            let tray_width = self.systray.as_ref().map_or(0, |t| t.total_width());
            crate::bar::redraw_all(self.wm, self.status.text(), tray_width);
        }
        #[cfg(feature = "compositor")]
        if self.dirty.compositor {
            if let Some(comp) = self.compositor.as_mut() {
                comp.schedule_repaint()?;
            }
        }
        self.dirty.clear();
        self.wm.conn.flush();
        Ok(())
    }

    /// Drain the `KeyPress` events queued since the last call, in arrival
    /// order.
    pub fn take_pending_keys(&mut self) -> Vec<crate::x::event::KeyEvent> {
        std::mem::take(&mut self.pending_keys)
    }
}
