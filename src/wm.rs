//! The window manager core: owns every managed client and monitor and
//! implements the operations the event pump and key/button bindings call
//! into.
//!
//! Grounded on the top level control flow of `original_source/src/awm.c`
//! (`setup`, `scan`, `run`, `cleanup`) together with the per-client and
//! per-monitor operations in `client.c`/`monitor.c`. Unlike the original's
//! global arrays, clients live in a `Vec<Client>` arena indexed by a
//! stable `usize`; monitors hold `Vec<usize>` stacking orders into that
//! arena rather than intrusive linked lists.

use tracing::{debug, info, warn};

use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::focus::{self, Direction};
use crate::geometry::Rect;
use crate::layout::{self, Layout};
use crate::monitor::{self, Monitor};
use crate::tag::Tags;
use crate::x::{ClientConfig, XConn};
use crate::Xid;

/// The full window manager state.
pub struct WindowManager<X: XConn> {
    pub conn: X,
    pub config: Config,
    pub clients: Vec<Client>,
    pub monitors: Vec<Monitor>,
    pub sel_mon: usize,
    /// Per-monitor stacking order (indices into `clients`), most recently
    /// focused first, matching the original's `stack` linked list.
    pub stacking_order: Vec<Vec<usize>>,
    /// Per-monitor tiling order (indices into `clients`), matching the
    /// original's `clients` linked list used by `nexttiled`/`arrange`.
    pub tiling_order: Vec<Vec<usize>>,
}

impl<X: XConn> WindowManager<X> {
    pub fn new(conn: X, config: Config, monitors: Vec<Monitor>) -> Self {
        let n = monitors.len();
        Self {
            conn,
            config,
            clients: Vec::new(),
            monitors,
            sel_mon: 0,
            stacking_order: vec![Vec::new(); n],
            tiling_order: vec![Vec::new(); n],
        }
    }

    pub fn selected_monitor(&self) -> &Monitor {
        &self.monitors[self.sel_mon]
    }

    fn client_ref(&self, idx: usize, mon: usize) -> Option<(usize, &Client)> {
        self.clients.get(idx).filter(|c| c.mon == mon).map(|c| (idx, c))
    }

    /// Recompute geometry for every tileable, visible client on `mon` and
    /// push it to the server. Grounded on `arrangemon` in
    /// `original_source/src/monitor.c`.
    pub fn arrange_monitor(&mut self, mon: usize) -> Result<()> {
        let m = &self.monitors[mon];
        let layout = m.layouts[m.sel_layout];
        let work_area = m.work_area;
        let gap = m.gappx;
        let nmaster = m.nmaster;
        let mfact = m.mfact;
        let seltags = m.seltags();

        // Monocle picks its topmost window by walking focus order (the
        // original's `m->cl->stack`), not creation order, so that raising a
        // background window to the top swaps which one fills the monitor.
        let order_source = if layout == Layout::Monocle { &self.stacking_order[mon] } else { &self.tiling_order[mon] };
        let order: Vec<(usize, &Client)> = order_source
            .iter()
            .filter_map(|&idx| self.client_ref(idx, mon))
            .filter(|(_, c)| c.is_tileable() && c.is_visible_on(seltags))
            .collect();

        let placements = layout::arrange(layout, work_area, gap, nmaster, mfact, &order);
        for p in placements {
            let c = &mut self.clients[p.client_index];
            c.geom = p.geom;
            self.conn.configure(
                c.win,
                ClientConfig {
                    x: Some(p.geom.x),
                    y: Some(p.geom.y),
                    w: Some(p.geom.w),
                    h: Some(p.geom.h),
                    border_width: None,
                    stack_mode: None,
                    sibling: None,
                },
            )?;
        }
        self.restack(mon)
    }

    pub fn arrange_all(&mut self) -> Result<()> {
        for i in 0..self.monitors.len() {
            self.arrange_monitor(i)?;
        }
        Ok(())
    }

    /// Restack every visible client on `mon`: floating/fullscreen above
    /// tiled, bar always on top. Grounded on `restack` in
    /// `original_source/src/monitor.c`.
    pub fn restack(&mut self, mon: usize) -> Result<()> {
        let seltags = self.monitors[mon].seltags();
        let mut above: Option<Xid> = self.monitors[mon].bar_win;

        for &idx in &self.stacking_order[mon].clone() {
            let Some((_, c)) = self.client_ref(idx, mon) else { continue };
            if !c.is_visible_on(seltags) {
                continue;
            }
            let win = c.win;
            self.conn.configure(
                win,
                ClientConfig {
                    stack_mode: Some(crate::x::StackMode::Above),
                    sibling: above,
                    ..Default::default()
                },
            )?;
            above = Some(win);
        }
        Ok(())
    }

    /// Begin managing a newly mapped window. Grounded on `manage` in
    /// `original_source/src/client.c` (lines 739-867): read transient-for
    /// to inherit tags/monitor from the parent, apply rules, clamp
    /// geometry to the monitor, select the managed event mask, add to the
    /// save set, and finally map and insert at the head of both the
    /// tiling and stacking orders.
    pub fn manage(&mut self, win: Xid, attrs: &crate::x::WindowAttributes) -> Result<()> {
        if self.find_client(win).is_some() {
            return Ok(());
        }

        let geom = self.conn.get_geometry(win)?;
        let transient = self.conn.get_transient_for(win)?;

        let (mon, tags) = if let Some(t) = transient.and_then(|w| self.find_client(w)) {
            let parent = &self.clients[t];
            (parent.mon, parent.tags)
        } else {
            (self.sel_mon, self.monitors[self.sel_mon].seltags())
        };

        let border_width = self.config.border_px;
        let mut client = Client::new(win, geom, border_width, tags, mon);
        client.name = self
            .conn
            .get_text_property(win, crate::atom::Atom::NetWMName)?
            .unwrap_or_default();
        client.wm_class = self.conn.get_wm_class(win)?;
        if let Some(hints) = self.conn.get_wm_normal_hints(win)? {
            client.update_size_hints(&hints);
        }
        if let Some(hints) = self.conn.get_wm_hints(win)? {
            client.is_urgent = hints.is_urgent();
        }
        client.is_floating = transient.is_some() || attrs.override_redirect;

        self.config.apply_rules(&mut client);

        let mon_area = self.monitors[client.mon].work_area;
        client.geom.x = client.geom.x.clamp(mon_area.x, (mon_area.right() - client.geom.w as i32).max(mon_area.x));
        client.geom.y = client.geom.y.clamp(mon_area.y, (mon_area.bottom() - client.geom.h as i32).max(mon_area.y));

        self.conn.set_client_attributes(win, &[crate::x::ClientAttr::ManagedEventMask])?;
        self.conn.add_to_save_set(win)?;
        self.conn.configure(
            win,
            ClientConfig {
                border_width: Some(border_width),
                ..Default::default()
            },
        )?;
        self.conn.set_wm_state(win, crate::x::WmState::Normal)?;
        self.conn.grab_buttons_for_client(win, false)?;

        let idx = self.clients.len();
        self.clients.push(client);
        self.tiling_order[mon].insert(0, idx);
        self.stacking_order[mon].insert(0, idx);

        self.conn.map(win)?;
        self.update_client_list()?;

        info!(?win, mon, "managed new client");
        self.arrange_monitor(mon)?;
        Ok(())
    }

    /// Stop managing `win`: detach it from both orders, restore its
    /// border, and refocus. The arena slot itself is marked dead rather
    /// than removed, so it never resurfaces through `find_client` while
    /// every other index already held into `clients` (by the compositor,
    /// the bar, or a stale event) stays in bounds. Grounded on `unmanage`
    /// in `original_source/src/client.c`.
    pub fn unmanage(&mut self, win: Xid, destroyed: bool) -> Result<()> {
        let Some(idx) = self.find_client(win) else { return Ok(()) };
        let mon = self.clients[idx].mon;

        self.tiling_order[mon].retain(|&i| i != idx);
        self.stacking_order[mon].retain(|&i| i != idx);

        if !destroyed {
            self.conn.ungrab_buttons(win)?;
            self.conn.set_wm_state(win, crate::x::WmState::Withdrawn)?;
        }
        if self.monitors[mon].sel == Some(idx) {
            self.monitors[mon].sel = None;
        }
        self.clients[idx].live = false;

        debug!(?win, mon, destroyed, "unmanaged client");
        self.arrange_monitor(mon)?;
        self.focus(None)?;
        self.update_client_list()
    }

    pub fn find_client(&self, win: Xid) -> Option<usize> {
        self.clients.iter().position(|c| c.live && c.win == win)
    }

    /// Rewrite `_NET_CLIENT_LIST` (creation order) and
    /// `_NET_CLIENT_LIST_STACKING` (focus-history order) from scratch,
    /// across every monitor. Grounded on `updateclientlist` in
    /// `original_source/src/ewmh.c`, which likewise deletes and rebuilds
    /// both properties wholesale rather than patching them incrementally.
    pub fn update_client_list(&self) -> Result<()> {
        let root = self.conn.root();
        let creation: Vec<u32> = self
            .tiling_order
            .iter()
            .flat_map(|order| order.iter().map(|&i| self.clients[i].win.0))
            .collect();
        self.conn.set_atom_property(root, crate::atom::Atom::NetClientList, &creation)?;

        let stacking: Vec<u32> = self
            .stacking_order
            .iter()
            .flat_map(|order| order.iter().map(|&i| self.clients[i].win.0))
            .collect();
        self.conn.set_atom_property(root, crate::atom::Atom::NetClientListStacking, &stacking)
    }

    /// Focus `idx`, or if `None`, the next focus candidate on the
    /// selected monitor's stacking order. Grounded on `focus` in
    /// `original_source/src/client.c`.
    pub fn focus(&mut self, idx: Option<usize>) -> Result<()> {
        let mon = self.sel_mon;
        let target = match idx {
            Some(i) => Some(i),
            None => {
                let seltags = self.monitors[mon].seltags();
                let order: Vec<(usize, &Client)> = self.stacking_order[mon]
                    .iter()
                    .filter_map(|&i| self.client_ref(i, mon))
                    .collect();
                focus::next_focus_candidate(&order, seltags)
            }
        };

        if let Some(prev) = self.monitors[mon].sel {
            if Some(prev) != target {
                self.unfocus(prev, false)?;
            }
        }

        if let Some(t) = target {
            let win = self.clients[t].win;
            self.stacking_order[mon].retain(|&i| i != t);
            self.stacking_order[mon].insert(0, t);
            self.conn.grab_buttons_for_client(win, true)?;
            self.conn.set_client_attributes(win, &[crate::x::ClientAttr::BorderColor(self.config.border_focus_pixel)])?;
            self.conn.set_input_focus(win)?;
            self.conn.set_atom_property(self.conn.root(), crate::atom::Atom::NetActiveWindow, &[win.0])?;
        } else {
            self.conn.set_input_focus(self.conn.root())?;
            self.conn.delete_property(self.conn.root(), crate::atom::Atom::NetActiveWindow)?;
        }
        self.monitors[mon].sel = target;
        self.restack(mon)
    }

    fn unfocus(&mut self, idx: usize, set_focus: bool) -> Result<()> {
        let win = self.clients[idx].win;
        self.conn.set_client_attributes(win, &[crate::x::ClientAttr::BorderColor(self.config.border_norm_pixel)])?;
        self.conn.grab_buttons_for_client(win, false)?;
        if set_focus {
            self.conn.set_input_focus(self.conn.root())?;
        }
        Ok(())
    }

    /// Step focus forward/backward in tiling order on the selected
    /// monitor. Grounded on `focusstack` in `original_source/src/client.c`.
    pub fn focus_stack(&mut self, dir: Direction) -> Result<()> {
        let mon = self.sel_mon;
        let seltags = self.monitors[mon].seltags();
        let order: Vec<(usize, &Client)> = self.tiling_order[mon]
            .iter()
            .filter_map(|&i| self.client_ref(i, mon))
            .collect();
        let cur = self.monitors[mon].sel;
        if let Some(target) = focus::focus_stack(&order, cur, dir, seltags) {
            self.focus(Some(target))?;
        }
        Ok(())
    }

    /// Swap the selected client's position in tiling order with its
    /// neighbour. Grounded on `movestack` in `original_source/src/client.c`.
    pub fn move_selected_in_stack(&mut self, dir: Direction) -> Result<()> {
        let mon = self.sel_mon;
        if let Some(cur) = self.monitors[mon].sel {
            focus::move_in_stack(&mut self.tiling_order[mon], cur, dir);
            self.arrange_monitor(mon)?;
        }
        Ok(())
    }

    /// Select a new tag set on the selected monitor. Grounded on `view`
    /// in `original_source/src/client.c`: persist the current pertag
    /// slot, swap `tagset[sel_tags]`, reload the new slot's layout state.
    pub fn view(&mut self, tags: Tags) -> Result<()> {
        let mon = self.sel_mon;
        let m = &mut self.monitors[mon];
        if tags == m.tagset[m.sel_tags] {
            return Ok(());
        }
        m.store_pertag();
        m.sel_tags ^= 1;
        if !tags.is_empty() {
            m.tagset[m.sel_tags] = tags;
            let slot = tags.lowest_index().map(|i| i + 1).unwrap_or(0);
            m.load_pertag(slot);
        }
        self.arrange_monitor(mon)?;
        self.focus(None)?;
        self.update_current_desktop()
    }

    /// Toggle tag bits in the current view without losing the others,
    /// falling back to "show all" if the result would be empty. Grounded
    /// on `toggleview` in `original_source/src/client.c`.
    pub fn toggle_view(&mut self, tags: Tags) -> Result<()> {
        let mon = self.sel_mon;
        let m = &mut self.monitors[mon];
        let newtags = m.tagset[m.sel_tags].toggle(tags).masked();
        let newtags = if newtags.is_empty() { Tags::ALL } else { newtags };
        m.tagset[m.sel_tags] = newtags;
        self.arrange_monitor(mon)?;
        self.focus(None)?;
        self.update_current_desktop()
    }

    /// Move the selected client to a different tag set. Grounded on `tag`
    /// in `original_source/src/client.c`.
    pub fn tag_selected(&mut self, tags: Tags) -> Result<()> {
        let mon = self.sel_mon;
        if let Some(idx) = self.monitors[mon].sel {
            let masked = tags.masked();
            if !masked.is_empty() {
                self.clients[idx].tags = masked;
                self.focus(None)?;
                self.arrange_monitor(mon)?;
            }
        }
        Ok(())
    }

    /// Add/remove tag bits on the selected client without replacing the
    /// whole set. Grounded on `toggletag` in `original_source/src/client.c`.
    pub fn toggle_tag_selected(&mut self, tags: Tags) -> Result<()> {
        let mon = self.sel_mon;
        if let Some(idx) = self.monitors[mon].sel {
            let newtags = self.clients[idx].tags.toggle(tags).masked();
            if !newtags.is_empty() {
                self.clients[idx].tags = newtags;
                self.focus(None)?;
                self.arrange_monitor(mon)?;
            }
        }
        Ok(())
    }

    /// Switch the selected monitor. Grounded on `focusmon` in
    /// `original_source/src/monitor.c`.
    pub fn focus_monitor(&mut self, dir: i32) -> Result<()> {
        let target = monitor::dir_to_monitor(self.monitors.len(), self.sel_mon, dir);
        if target == self.sel_mon {
            return Ok(());
        }
        self.unfocus_selected_no_input()?;
        self.sel_mon = target;
        self.focus(None)
    }

    fn unfocus_selected_no_input(&mut self) -> Result<()> {
        if let Some(idx) = self.monitors[self.sel_mon].sel {
            self.unfocus(idx, false)?;
        }
        Ok(())
    }

    /// Move the selected client to a different monitor, retagging it onto
    /// the target monitor's current view. Grounded on `sendmon` in
    /// `original_source/src/client.c`.
    pub fn send_selected_to_monitor(&mut self, target: usize) -> Result<()> {
        let mon = self.sel_mon;
        let Some(idx) = self.monitors[mon].sel else { return Ok(()) };
        if target == mon || target >= self.monitors.len() {
            return Ok(());
        }
        self.unfocus(idx, true)?;
        self.tiling_order[mon].retain(|&i| i != idx);
        self.stacking_order[mon].retain(|&i| i != idx);

        self.clients[idx].mon = target;
        self.clients[idx].tags = self.monitors[target].seltags();
        self.tiling_order[target].insert(0, idx);
        self.stacking_order[target].insert(0, idx);

        self.arrange_monitor(mon)?;
        self.arrange_monitor(target)?;
        self.focus(None)
    }

    /// Toggle fullscreen on the selected client, saving/restoring its
    /// prior floating state and geometry. Grounded on `setfullscreen` in
    /// `original_source/src/client.c` (lines 1118-1158).
    pub fn toggle_fullscreen_selected(&mut self) -> Result<()> {
        let mon = self.sel_mon;
        let Some(idx) = self.monitors[mon].sel else { return Ok(()) };
        let want = !self.clients[idx].is_fullscreen;
        let win = self.clients[idx].win;

        if want {
            let c = &mut self.clients[idx];
            c.old_geom = c.geom;
            c.old_border_width = c.border_width;
            c.was_floating = c.is_floating;
            c.is_floating = true;
            c.is_fullscreen = true;
            c.border_width = 0;
            let area = self.monitors[mon].screen_area;
            c.geom = area;
            let fullscreen_atom = self.conn.atom(crate::atom::Atom::NetWMFullscreen);
            self.conn.set_atom_property(win, crate::atom::Atom::NetWMState, &[fullscreen_atom])?;
            self.conn.configure(
                win,
                ClientConfig { x: Some(area.x), y: Some(area.y), w: Some(area.w), h: Some(area.h), border_width: Some(0), ..Default::default() },
            )?;
        } else {
            let c = &mut self.clients[idx];
            c.is_fullscreen = false;
            c.is_floating = c.was_floating;
            c.border_width = c.old_border_width;
            c.geom = c.old_geom;
            self.conn.delete_property(win, crate::atom::Atom::NetWMState)?;
            let geom = self.clients[idx].geom;
            self.conn.configure(
                win,
                ClientConfig { x: Some(geom.x), y: Some(geom.y), w: Some(geom.w), h: Some(geom.h), border_width: Some(self.clients[idx].border_width), ..Default::default() },
            )?;
        }
        self.arrange_monitor(mon)
    }

    /// Toggle whether the selected client is floating. Grounded on
    /// `togglefloating` in `original_source/src/client.c`.
    pub fn toggle_floating_selected(&mut self) -> Result<()> {
        let mon = self.sel_mon;
        let Some(idx) = self.monitors[mon].sel else { return Ok(()) };
        let c = &mut self.clients[idx];
        if c.is_fullscreen {
            return Ok(());
        }
        c.is_floating = !c.is_floating || c.is_fixed;
        if c.is_floating {
            c.geom = c.old_geom;
        }
        self.arrange_monitor(mon)
    }

    /// Resize the master area. Grounded on `setmfact` in
    /// `original_source/src/client.c`.
    pub fn adjust_mfact(&mut self, delta: f32) -> Result<()> {
        let mon = self.sel_mon;
        let m = &mut self.monitors[mon];
        let f = (m.mfact + delta).clamp(0.05, 0.95);
        m.mfact = f;
        self.arrange_monitor(mon)
    }

    /// Grow/shrink the number of master-area clients. Grounded on
    /// `incnmaster` in `original_source/src/client.c`.
    pub fn adjust_nmaster(&mut self, delta: i32) -> Result<()> {
        let mon = self.sel_mon;
        let m = &mut self.monitors[mon];
        m.nmaster = (m.nmaster as i32 + delta).max(0) as u32;
        self.arrange_monitor(mon)
    }

    pub fn select_layout(&mut self, slot: usize, layout: layout::Layout) -> Result<()> {
        let mon = self.sel_mon;
        let m = &mut self.monitors[mon];
        m.sel_layout = slot;
        m.layouts[slot] = layout;
        self.arrange_monitor(mon)
    }

    /// Publish `_NET_CURRENT_DESKTOP` as the lowest set bit of the
    /// selected monitor's tag set, matching the original's single-desktop
    /// EWMH mapping (spec §6).
    pub fn update_current_desktop(&self) -> Result<()> {
        let idx = self.monitors[self.sel_mon].seltags().lowest_index().unwrap_or(0) as u32;
        self.conn.set_cardinal_property(self.conn.root(), crate::atom::Atom::NetCurrentDesktop, idx)
    }

    /// Re-home every client whose monitor index no longer exists onto the
    /// remaining monitors, retagging them onto each target's current view,
    /// then re-arrange every surviving monitor. This is the exact
    /// ordering `attachclients` uses when a monitor is unplugged: retag
    /// visible clients against other monitors' selected tags first,
    /// unfocus each migrated client, reassign its monitor, arrange every
    /// *other* (not-just-migrated-to) monitor if anything moved, and let
    /// the caller do the final `focus(None)` + `update_current_desktop`.
    ///
    /// This ordering is deliberate, not incidental: retagging before
    /// reassigning means a client's visibility test during the loop still
    /// sees its *old* monitor's tag semantics, matching a migration that
    /// reads as "what would be visible if this client joined the target
    /// monitor's view" before the move actually happens.
    pub fn attach_clients(&mut self, removed_mon: usize) -> Result<()> {
        if self.monitors.len() <= 1 {
            return Ok(());
        }
        let mut moved_any = false;
        let survivors: Vec<usize> = (0..self.monitors.len()).filter(|&m| m != removed_mon).collect();

        for idx in 0..self.clients.len() {
            if !self.clients[idx].live || self.clients[idx].mon != removed_mon {
                continue;
            }
            let target = survivors[idx % survivors.len()];
            self.clients[idx].tags = self.monitors[target].seltags();
            self.unfocus(idx, false)?;
            self.clients[idx].mon = target;
            self.tiling_order[target].push(idx);
            self.stacking_order[target].push(idx);
            moved_any = true;
        }

        if moved_any {
            for &m in &survivors {
                self.arrange_monitor(m)?;
            }
        }
        Ok(())
    }

    /// Close the selected client: ask nicely via the `WM_DELETE_WINDOW`
    /// protocol handshake if the client advertises it, otherwise destroy
    /// it outright under a server grab. Grounded on `killclient` in
    /// `original_source/src/client.c`.
    pub fn kill_selected(&mut self) -> Result<()> {
        let mon = self.sel_mon;
        let Some(idx) = self.monitors[mon].sel else { return Ok(()) };
        let win = self.clients[idx].win;
        self.close_window(win)
    }

    /// Close `win`: send `WM_DELETE_WINDOW` if the client's `WM_PROTOCOLS`
    /// lists it, otherwise grab the server and destroy the window
    /// directly. Grounded on `killclient`/`clientmessage`'s
    /// `_NET_CLOSE_WINDOW` arm in `original_source/src/client.c` and
    /// `events.c`.
    fn close_window(&self, win: Xid) -> Result<()> {
        let protocols = self.conn.get_wm_protocols(win)?;
        let delete_atom = self.conn.atom(crate::atom::Atom::WMDelete);
        if protocols.contains(&delete_atom) {
            let protocols_atom = self.conn.atom(crate::atom::Atom::WMProtocols);
            self.conn.send_client_message(win, protocols_atom, [delete_atom, 0, 0, 0, 0])?;
        } else {
            self.conn.grab_server()?;
            self.conn.destroy_window(win)?;
            self.conn.ungrab_server()?;
        }
        Ok(())
    }

    /// Dispatch a `ClientMessage` sent to a managed window. Handles the
    /// EWMH root-client-message subset named in spec §4.3/§6:
    /// `_NET_WM_STATE` add/remove/toggle fullscreen, `_NET_ACTIVE_WINDOW`,
    /// `_NET_CLOSE_WINDOW`, `_NET_MOVERESIZE_WINDOW`. Grounded on
    /// `clientmessage` in `original_source/src/events.c` (the systray-dock
    /// branch at the top of that function is handled separately by
    /// `systray.rs`, which owns the tray window and its icon list).
    pub fn handle_client_message(&mut self, msg: &crate::x::event::ClientMessage) -> Result<()> {
        let Some(idx) = self.find_client(msg.window) else { return Ok(()) };

        let net_wm_state = self.conn.atom(crate::atom::Atom::NetWMState);
        let net_active_window = self.conn.atom(crate::atom::Atom::NetActiveWindow);
        let net_close_window = self.conn.atom(crate::atom::Atom::NetCloseWindow);
        let net_moveresize_window = self.conn.atom(crate::atom::Atom::NetMoveResizeWindow);
        let net_wm_fullscreen = self.conn.atom(crate::atom::Atom::NetWMFullscreen);

        if msg.type_atom == net_wm_state {
            if msg.data[1] == net_wm_fullscreen || msg.data[2] == net_wm_fullscreen {
                let is_fullscreen = self.clients[idx].is_fullscreen;
                let want = msg.data[0] == 1 || (msg.data[0] == 2 && !is_fullscreen);
                if want != is_fullscreen {
                    let mon = self.clients[idx].mon;
                    if self.monitors[mon].sel == Some(idx) {
                        self.toggle_fullscreen_selected()?;
                    }
                }
            }
        } else if msg.type_atom == net_active_window {
            let tags = self.clients[idx].tags;
            if let Some(i) = tags.lowest_index() {
                let mon = self.clients[idx].mon;
                self.sel_mon = mon;
                self.view(Tags::single(i))?;
                self.focus(Some(idx))?;
                self.restack(mon)?;
            }
        } else if msg.type_atom == net_close_window {
            self.close_window(msg.window)?;
        } else if msg.type_atom == net_moveresize_window {
            let gravity_flags = msg.data[0];
            let c = &self.clients[idx];
            let mut geom = c.geom;
            if gravity_flags & (1 << 8) != 0 {
                geom.x = msg.data[1] as i32;
            }
            if gravity_flags & (1 << 9) != 0 {
                geom.y = msg.data[2] as i32;
            }
            if gravity_flags & (1 << 10) != 0 {
                geom.w = msg.data[3];
            }
            if gravity_flags & (1 << 11) != 0 {
                geom.h = msg.data[4];
            }
            let win = c.win;
            let border_width = c.border_width;
            self.clients[idx].geom = geom;
            self.conn.configure(
                win,
                ClientConfig { x: Some(geom.x), y: Some(geom.y), w: Some(geom.w), h: Some(geom.h), border_width: Some(border_width), ..Default::default() },
            )?;
        }
        Ok(())
    }

    /// Toggle a named scratchpad: if the client tagged with `key` is
    /// currently visible, hide it by clearing its tags; if hidden
    /// (tagless) or not managed on the current monitor, show it by
    /// retagging onto the selected monitor's view, migrating and
    /// re-centring it if it lives on a different monitor; if no client
    /// has ever claimed `key`, spawn the scratchpad's command. Grounded
    /// on `togglescratch` in `original_source/src/client.c`.
    pub fn toggle_scratchpad(&mut self, key: char, spawn_argv: &[&str], x_fd: std::os::unix::io::RawFd) -> Result<()> {
        let mon = self.sel_mon;
        let Some(idx) = self.clients.iter().position(|c| c.live && c.scratch_key == Some(key)) else {
            return crate::spawn::spawn_scratch(spawn_argv, x_fd);
        };

        let owning_mon = self.clients[idx].mon;
        let seltags = self.monitors[owning_mon].seltags();
        if self.clients[idx].is_visible_on(seltags) {
            self.clients[idx].tags = Tags::NONE;
            self.focus(None)?;
            self.arrange_monitor(owning_mon)?;
            return Ok(());
        }

        if owning_mon != mon {
            self.tiling_order[owning_mon].retain(|&i| i != idx);
            self.stacking_order[owning_mon].retain(|&i| i != idx);
            self.clients[idx].mon = mon;
            self.tiling_order[mon].insert(0, idx);
            self.stacking_order[mon].insert(0, idx);

            let area = self.monitors[mon].screen_area;
            let geom = self.clients[idx].geom;
            self.clients[idx].geom.x = area.x + (area.w as i32 - geom.w as i32) / 2;
            self.clients[idx].geom.y = area.y + (area.h as i32 - geom.h as i32) / 2;
        }
        self.clients[idx].tags = self.monitors[mon].seltags();
        self.arrange_monitor(mon)?;
        self.focus(Some(idx))?;
        self.restack(mon)
    }

    /// Scan existing top level windows at startup and manage the ones
    /// that qualify. Grounded on `scan` in `original_source/src/awm.c`.
    pub fn scan(&mut self) -> Result<()> {
        let root = self.conn.root();
        let children = self.conn.query_tree(root)?;
        for win in children {
            let attrs = match self.conn.get_window_attributes(win) {
                Ok(a) => a,
                Err(_) => continue,
            };
            if attrs.override_redirect || !attrs.viewable {
                continue;
            }
            if let Err(e) = self.manage(win, &attrs) {
                warn!(?win, error = %e, "failed to manage existing window");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Exercises the core client/monitor state machine (spec §8) against a
    //! mock `XConn` that just records geometry instead of talking to a
    //! real X server.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::atom::Atom;
    use crate::config::Config;
    use crate::geometry::{Point, Rect};
    use crate::x::{
        event::XEvent, ClientAttr, ClientConfig, WindowAttributes, WmHints, WmNormalHints, WmState, XConn,
    };

    /// Records every window's applied geometry so tests can assert on the
    /// layout engine's output without a live display connection.
    struct MockXConn {
        geoms: RefCell<HashMap<Xid, Rect>>,
        next_win: RefCell<u32>,
    }

    impl MockXConn {
        fn new() -> Self {
            Self { geoms: RefCell::new(HashMap::new()), next_win: RefCell::new(1) }
        }

        /// Allocate a fresh window id with the given starting geometry,
        /// mimicking a client's initial `GetGeometry` reply.
        fn new_window(&self, geom: Rect) -> Xid {
            let mut n = self.next_win.borrow_mut();
            let win = Xid(*n);
            *n += 1;
            self.geoms.borrow_mut().insert(win, geom);
            win
        }

        fn applied_geom(&self, win: Xid) -> Rect {
            self.geoms.borrow()[&win]
        }
    }

    impl XConn for MockXConn {
        fn root(&self) -> Xid {
            Xid(0)
        }

        fn atom(&self, atom: Atom) -> u32 {
            atom as u32
        }

        fn screen_details(&self) -> Result<Vec<Rect>> {
            Ok(vec![Rect::new(0, 0, 1920, 1080)])
        }

        fn cursor_position(&self) -> Result<Point> {
            Ok(Point::new(0, 0))
        }

        fn next_event(&self) -> Result<XEvent> {
            Ok(XEvent::MappingNotify)
        }

        fn pending(&self) -> usize {
            0
        }

        fn flush(&self) {}

        fn as_raw_fd(&self) -> std::os::unix::io::RawFd {
            -1
        }

        fn create_window(&self, _parent: Xid, r: Rect, _win_type: crate::x::WinType, _argb: bool) -> Result<Xid> {
            Ok(self.new_window(r))
        }

        fn destroy_window(&self, id: Xid) -> Result<()> {
            self.geoms.borrow_mut().remove(&id);
            Ok(())
        }

        fn map(&self, _id: Xid) -> Result<()> {
            Ok(())
        }

        fn unmap(&self, _id: Xid) -> Result<()> {
            Ok(())
        }

        fn configure(&self, id: Xid, cfg: ClientConfig) -> Result<()> {
            let mut geoms = self.geoms.borrow_mut();
            let g = geoms.entry(id).or_insert_with(|| Rect::new(0, 0, 1, 1));
            if let Some(x) = cfg.x {
                g.x = x;
            }
            if let Some(y) = cfg.y {
                g.y = y;
            }
            if let Some(w) = cfg.w {
                g.w = w;
            }
            if let Some(h) = cfg.h {
                g.h = h;
            }
            Ok(())
        }

        fn set_client_attributes(&self, _id: Xid, _attrs: &[ClientAttr]) -> Result<()> {
            Ok(())
        }

        fn reparent(&self, _id: Xid, _new_parent: Xid, _x: i32, _y: i32) -> Result<()> {
            Ok(())
        }

        fn add_to_save_set(&self, _id: Xid) -> Result<()> {
            Ok(())
        }

        fn query_tree(&self, _id: Xid) -> Result<Vec<Xid>> {
            Ok(Vec::new())
        }

        fn get_geometry(&self, id: Xid) -> Result<Rect> {
            Ok(self.geoms.borrow().get(&id).copied().unwrap_or_else(|| Rect::new(0, 0, 640, 480)))
        }

        fn get_window_attributes(&self, _id: Xid) -> Result<WindowAttributes> {
            Ok(WindowAttributes { override_redirect: false, viewable: true, depth: 24 })
        }

        fn set_input_focus(&self, _id: Xid) -> Result<()> {
            Ok(())
        }

        fn grab_server(&self) -> Result<()> {
            Ok(())
        }

        fn ungrab_server(&self) -> Result<()> {
            Ok(())
        }

        fn grab_buttons_for_client(&self, _id: Xid, _focused: bool) -> Result<()> {
            Ok(())
        }

        fn ungrab_buttons(&self, _id: Xid) -> Result<()> {
            Ok(())
        }

        fn grab_pointer(&self, _confine_to: Xid, _cursor: u32) -> Result<bool> {
            Ok(true)
        }

        fn ungrab_pointer(&self) -> Result<()> {
            Ok(())
        }

        fn warp_pointer(&self, _id: Xid, _x: i32, _y: i32) -> Result<()> {
            Ok(())
        }

        fn grab_key(&self, _keycode: u8, _modifiers: u16) -> Result<()> {
            Ok(())
        }

        fn ungrab_keys(&self) -> Result<()> {
            Ok(())
        }

        fn keycode_for_keysym(&self, _keysym: u32) -> Option<u8> {
            None
        }

        fn numlock_mask(&self) -> Result<u16> {
            Ok(0)
        }

        fn get_text_property(&self, _id: Xid, _atom: Atom) -> Result<Option<String>> {
            Ok(None)
        }

        fn get_wm_class(&self, _id: Xid) -> Result<Option<(String, String)>> {
            Ok(None)
        }

        fn get_transient_for(&self, _id: Xid) -> Result<Option<Xid>> {
            Ok(None)
        }

        fn get_wm_normal_hints(&self, _id: Xid) -> Result<Option<WmNormalHints>> {
            Ok(None)
        }

        fn get_wm_hints(&self, _id: Xid) -> Result<Option<WmHints>> {
            Ok(None)
        }

        fn get_wm_protocols(&self, _id: Xid) -> Result<Vec<u32>> {
            Ok(Vec::new())
        }

        fn get_atom_property(&self, _id: Xid, _atom: Atom) -> Result<Vec<u32>> {
            Ok(Vec::new())
        }

        fn get_cardinal_property(&self, _id: Xid, _atom: Atom) -> Result<Option<u32>> {
            Ok(None)
        }

        fn get_pixmap_property(&self, _id: Xid, _atom: Atom) -> Result<Option<u32>> {
            Ok(None)
        }

        fn get_wm_state(&self, _id: Xid) -> Result<Option<WmState>> {
            Ok(None)
        }

        fn set_wm_state(&self, _id: Xid, _state: WmState) -> Result<()> {
            Ok(())
        }

        fn set_cardinal_property(&self, _id: Xid, _atom: Atom, _val: u32) -> Result<()> {
            Ok(())
        }

        fn set_cardinals_property(&self, _id: Xid, _atom: Atom, _vals: &[u32]) -> Result<()> {
            Ok(())
        }

        fn set_atom_property(&self, _id: Xid, _atom: Atom, _vals: &[u32]) -> Result<()> {
            Ok(())
        }

        fn set_text_property(&self, _id: Xid, _atom: Atom, _text: &str) -> Result<()> {
            Ok(())
        }

        fn append_atom_property(&self, _id: Xid, _atom: Atom, _val: u32) -> Result<()> {
            Ok(())
        }

        fn delete_property(&self, _id: Xid, _atom: Atom) -> Result<()> {
            Ok(())
        }

        fn send_client_message(&self, _id: Xid, _type_atom: u32, _data: [u32; 5]) -> Result<()> {
            Ok(())
        }

        fn set_selection_owner(&self, _selection: u32, _owner: Xid) -> Result<()> {
            Ok(())
        }

        fn get_selection_owner(&self, _selection: u32) -> Result<Xid> {
            Ok(Xid(0))
        }

        fn put_image(&self, _id: Xid, _w: u32, _h: u32, _depth: u8, _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn test_wm() -> WindowManager<MockXConn> {
        let conn = MockXConn::new();
        let config = Config::default();
        let mon = Monitor::new(0, Rect::new(0, 0, 1920, 1080), config.nmaster, config.mfact, 0, config.layouts);
        WindowManager::new(conn, config, vec![mon])
    }

    fn default_attrs() -> WindowAttributes {
        WindowAttributes { override_redirect: false, viewable: true, depth: 24 }
    }

    /// S1/invariant: a single managed client on a monitor with no gaps
    /// tiles to fill the entire work area, and becomes the selection.
    #[test]
    fn single_window_tile_fills_work_area() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(0, 0, 800, 600));
        wm.manage(win, &default_attrs()).unwrap();

        let idx = wm.find_client(win).unwrap();
        assert_eq!(wm.clients[idx].geom, wm.monitors[0].work_area);
        assert_eq!(wm.conn.applied_geom(win), wm.clients[idx].geom);

        // focus(None) after manage leaves exactly one candidate selected.
        wm.focus(None).unwrap();
        assert_eq!(wm.monitors[0].sel, Some(idx));
    }

    /// S2: a second managed client splits the work area into a master and
    /// stack column, and focus-stack cycling moves between them.
    #[test]
    fn two_window_tile_splits_master_and_stack() {
        let mut wm = test_wm();
        let a = wm.conn.new_window(Rect::new(0, 0, 800, 600));
        wm.manage(a, &default_attrs()).unwrap();
        let b = wm.conn.new_window(Rect::new(0, 0, 800, 600));
        wm.manage(b, &default_attrs()).unwrap();

        let ia = wm.find_client(a).unwrap();
        let ib = wm.find_client(b).unwrap();

        // Newest client (b) is inserted at the head of tiling order, so it
        // becomes the master; a moves to the stack.
        assert!(wm.clients[ib].geom.w < wm.monitors[0].work_area.w);
        assert!(wm.clients[ia].geom.x > wm.clients[ib].geom.x);
        assert_eq!(wm.clients[ia].geom.x + wm.clients[ia].geom.w as i32, wm.monitors[0].work_area.right());

        wm.focus(Some(ib)).unwrap();
        wm.focus_stack(Direction::Next).unwrap();
        assert_eq!(wm.monitors[0].sel, Some(ia));
    }

    /// Round-trip law: fullscreen toggled on then off restores the exact
    /// pre-fullscreen geometry, border width and floating flag.
    #[test]
    fn fullscreen_round_trip_restores_geometry() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(10, 10, 300, 200));
        wm.manage(win, &default_attrs()).unwrap();
        wm.focus(None).unwrap();

        let idx = wm.find_client(win).unwrap();
        let before = wm.clients[idx].geom;
        let before_bw = wm.clients[idx].border_width;
        let before_floating = wm.clients[idx].is_floating;

        wm.toggle_fullscreen_selected().unwrap();
        assert!(wm.clients[idx].is_fullscreen);
        assert_eq!(wm.clients[idx].geom, wm.monitors[0].screen_area);
        assert_eq!(wm.clients[idx].border_width, 0);

        wm.toggle_fullscreen_selected().unwrap();
        assert!(!wm.clients[idx].is_fullscreen);
        assert_eq!(wm.clients[idx].geom, before);
        assert_eq!(wm.clients[idx].border_width, before_bw);
        assert_eq!(wm.clients[idx].is_floating, before_floating);
    }

    /// Round-trip law: `togglefloating; togglefloating` is identity for a
    /// non-fixed client.
    #[test]
    fn toggle_floating_round_trip_is_identity() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(win, &default_attrs()).unwrap();
        wm.focus(None).unwrap();

        let idx = wm.find_client(win).unwrap();
        let was_floating = wm.clients[idx].is_floating;
        wm.toggle_floating_selected().unwrap();
        assert_ne!(wm.clients[idx].is_floating, was_floating);
        wm.toggle_floating_selected().unwrap();
        assert_eq!(wm.clients[idx].is_floating, was_floating);
    }

    /// Round-trip law: `view(t); view(previous_tag)` returns the monitor's
    /// tagset and layout to the starting state (pertag load/store).
    #[test]
    fn view_round_trip_restores_tagset_and_layout() {
        let mut wm = test_wm();
        let start_tags = wm.monitors[0].seltags();
        let start_layout = wm.monitors[0].layouts;

        wm.view(Tags::single(2)).unwrap();
        assert_eq!(wm.monitors[0].seltags(), Tags::single(2));

        wm.select_layout(0, Layout::Monocle).unwrap();
        assert_eq!(wm.monitors[0].layouts[0], Layout::Monocle);

        wm.view(start_tags).unwrap();
        assert_eq!(wm.monitors[0].seltags(), start_tags);
        assert_eq!(wm.monitors[0].layouts, start_layout);
    }

    /// Invariant: after `focus(None)` on a monitor with at least one
    /// visible client, `sel` is non-null and matches the only candidate.
    #[test]
    fn focus_none_picks_a_candidate_when_one_exists() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(win, &default_attrs()).unwrap();
        wm.focus(None).unwrap();
        assert!(wm.monitors[0].sel.is_some());
    }

    /// Invariant: every visible client index appears in exactly one
    /// monitor's tiling order and the same monitor's stacking order.
    #[test]
    fn client_membership_is_single_monitor() {
        let mut wm = test_wm();
        let a = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(a, &default_attrs()).unwrap();
        let b = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(b, &default_attrs()).unwrap();

        for idx in [wm.find_client(a).unwrap(), wm.find_client(b).unwrap()] {
            let owning: Vec<usize> = (0..wm.monitors.len()).filter(|&m| wm.tiling_order[m].contains(&idx)).collect();
            let stacked: Vec<usize> = (0..wm.monitors.len()).filter(|&m| wm.stacking_order[m].contains(&idx)).collect();
            assert_eq!(owning.len(), 1);
            assert_eq!(stacked, owning);
        }
    }

    /// Unmanaging a client removes it from both the tiling and stacking
    /// orders and refocuses the remaining client.
    #[test]
    fn unmanage_detaches_and_refocuses() {
        let mut wm = test_wm();
        let a = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(a, &default_attrs()).unwrap();
        let b = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(b, &default_attrs()).unwrap();
        wm.focus(None).unwrap();

        let ib = wm.find_client(b).unwrap();
        wm.unmanage(b, false).unwrap();

        assert!(wm.find_client(b).is_none());
        assert!(!wm.tiling_order[0].contains(&ib));
        assert!(!wm.stacking_order[0].contains(&ib));
        assert!(wm.monitors[0].sel.is_some());
    }

    /// A destroyed window's id can be reused by the X server for a later
    /// client; `manage` must not mistake the dead arena slot for a live
    /// one and silently no-op.
    #[test]
    fn manage_after_unmanage_reuses_window_id() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(win, &default_attrs()).unwrap();
        wm.unmanage(win, true).unwrap();
        assert!(wm.find_client(win).is_none());

        wm.manage(win, &default_attrs()).unwrap();
        assert!(wm.find_client(win).is_some());
    }

    /// S4: a scratchpad client with no existing owner spawns nothing in
    /// this mock (no fork), but once "found" hidden/visible its tags
    /// toggle between 0 and the current view per spec §4.2.
    #[test]
    fn scratchpad_toggle_hides_and_shows() {
        let mut wm = test_wm();
        let win = wm.conn.new_window(Rect::new(0, 0, 400, 300));
        wm.manage(win, &default_attrs()).unwrap();
        let idx = wm.find_client(win).unwrap();
        wm.clients[idx].scratch_key = Some('p');
        wm.clients[idx].tags = Tags::NONE;
        wm.focus(None).unwrap();

        // Hidden -> show: retags onto the current view and focuses it.
        wm.toggle_scratchpad('p', &["true"], -1).unwrap();
        assert_eq!(wm.clients[idx].tags, wm.monitors[0].seltags());
        assert_eq!(wm.monitors[0].sel, Some(idx));

        // Visible -> hide: tags go back to 0.
        wm.toggle_scratchpad('p', &["true"], -1).unwrap();
        assert_eq!(wm.clients[idx].tags, Tags::NONE);
    }
}
