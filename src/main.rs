//! Process entry point: CLI parsing, the startup handshake, the run loop,
//! and restart-via-`execvp` handling.
//!
//! Grounded on `main`/`setup`/`run`/`cleanup` in `original_source/src/awm.c`.
//! The CLI surface accepts only bare invocation or `-v`, so key bindings
//! have nowhere to be configured from: the static table below, and the
//! code that grabs and resolves it, lives here rather than in the
//! library, the same way `event_pump.rs` leaves "key/button bindings" to
//! the embedder.

use std::env;
use std::ffi::CString;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, info, warn};

use awm::atom::Atom;
use awm::config::Config;
use awm::error::{Error, Result};
use awm::event_pump::EventPump;
use awm::focus::Direction;
use awm::layout::Layout;
use awm::monitor::Monitor;
use awm::status::Ticker;
use awm::tag::Tags;
use awm::wm::WindowManager;
use awm::x::x11rb_backend::X11rbConn;
use awm::x::XConn;

const POLL_TIMEOUT: Duration = Duration::from_millis(1000);

/// `Mod4` (the Super/Windows key), matching `MODKEY` in
/// `original_source/config.def.h`.
const MOD: u16 = 1 << 6;
const SHIFT: u16 = 1 << 0;
const CONTROL: u16 = 1 << 2;

const TERM_CMD: &[&str] = &["st"];
const LAUNCHER_CMD: &[&str] = &["rofi", "-show", "run"];
const NOTEPAD_CMD: &[&str] = &["st", "-t", "notepad", "-e", "nvim"];

#[derive(Clone, Copy)]
enum Action {
    Spawn(&'static [&'static str]),
    KillSelected,
    FocusStack(Direction),
    MoveInStack(Direction),
    IncNMaster(i32),
    SetMFact(f32),
    ToggleFloating,
    ToggleFullscreen,
    View(Tags),
    ToggleView(Tags),
    Tag(Tags),
    ToggleTag(Tags),
    FocusMon(i32),
    TagMon(i32),
    SetLayout(Layout),
    ToggleScratch(char, &'static [&'static str]),
    ReloadXrdb,
    Quit,
    Restart,
}

struct Binding {
    modifiers: u16,
    keysym: u32,
    action: Action,
}

// Standard X11 keysymdef.h values for the non-printable keys bound below;
// printable ASCII keys (letters, digits, punctuation) use their own ASCII
// codepoint, which is how the X protocol assigns them too.
const XK_RETURN: u32 = 0xff0d;
const XK_TAB: u32 = 0xff09;
const XK_F5: u32 = 0xffc2;

/// The static key table, grounded on `keys[]` in
/// `original_source/config.def.h` (personal launcher scripts replaced
/// with generic equivalents; `TAGKEYS`'s four-binding-per-tag expansion
/// reproduced by `tag_bindings` below instead of macro-expanded here).
fn static_bindings() -> Vec<Binding> {
    use Action::*;
    vec![
        Binding { modifiers: MOD, keysym: XK_RETURN, action: Spawn(TERM_CMD) },
        Binding { modifiers: MOD, keysym: 'p' as u32, action: Spawn(LAUNCHER_CMD) },
        Binding { modifiers: MOD, keysym: '`' as u32, action: ToggleScratch('p', NOTEPAD_CMD) },
        Binding { modifiers: MOD, keysym: 'x' as u32, action: KillSelected },
        Binding { modifiers: MOD, keysym: 'j' as u32, action: FocusStack(Direction::Next) },
        Binding { modifiers: MOD, keysym: 'k' as u32, action: FocusStack(Direction::Prev) },
        Binding { modifiers: MOD | CONTROL, keysym: 'j' as u32, action: MoveInStack(Direction::Next) },
        Binding { modifiers: MOD | CONTROL, keysym: 'k' as u32, action: MoveInStack(Direction::Prev) },
        Binding { modifiers: MOD, keysym: 'i' as u32, action: IncNMaster(1) },
        Binding { modifiers: MOD, keysym: 'd' as u32, action: IncNMaster(-1) },
        Binding { modifiers: MOD | CONTROL, keysym: 'h' as u32, action: SetMFact(-0.05) },
        Binding { modifiers: MOD | CONTROL, keysym: 'l' as u32, action: SetMFact(0.05) },
        Binding { modifiers: MOD | SHIFT, keysym: ' ' as u32, action: ToggleFloating },
        Binding { modifiers: MOD | SHIFT, keysym: XK_RETURN, action: ToggleFullscreen },
        Binding { modifiers: MOD, keysym: 't' as u32, action: SetLayout(Layout::Tile) },
        Binding { modifiers: MOD, keysym: 'm' as u32, action: SetLayout(Layout::Monocle) },
        Binding { modifiers: MOD, keysym: 'f' as u32, action: SetLayout(Layout::Floating) },
        Binding { modifiers: MOD, keysym: '0' as u32, action: View(Tags::ALL) },
        Binding { modifiers: MOD | SHIFT, keysym: '0' as u32, action: Tag(Tags::ALL) },
        Binding { modifiers: MOD, keysym: ',' as u32, action: FocusMon(-1) },
        Binding { modifiers: MOD, keysym: '.' as u32, action: FocusMon(1) },
        Binding { modifiers: MOD | SHIFT, keysym: ',' as u32, action: TagMon(-1) },
        Binding { modifiers: MOD | SHIFT, keysym: '.' as u32, action: TagMon(1) },
        Binding { modifiers: MOD, keysym: XK_F5, action: ReloadXrdb },
        Binding { modifiers: MOD, keysym: XK_TAB, action: View(Tags::NONE) },
        Binding { modifiers: MOD | SHIFT, keysym: 'q' as u32, action: Quit },
        Binding { modifiers: MOD | SHIFT, keysym: 'r' as u32, action: Restart },
    ]
}

/// Per-tag view/toggleview/tag/toggletag quartet, expanding `TAGKEYS` in
/// `original_source/config.def.h` over the configured tag count instead of
/// a C macro.
fn tag_bindings(tag_count: usize) -> Vec<Binding> {
    use Action::*;
    let mut out = Vec::with_capacity(tag_count * 4);
    for i in 0..tag_count.min(9) {
        let keysym = b'1' as u32 + i as u32;
        let tags = Tags::single(i);
        out.push(Binding { modifiers: MOD, keysym, action: View(tags) });
        out.push(Binding { modifiers: MOD | CONTROL, keysym, action: ToggleView(tags) });
        out.push(Binding { modifiers: MOD | SHIFT, keysym, action: Tag(tags) });
        out.push(Binding { modifiers: MOD | CONTROL | SHIFT, keysym, action: ToggleTag(tags) });
    }
    out
}

/// Mask out `Lock` and whichever `ModMask` bit is bound to `Num_Lock`
/// before comparing a `KeyPress`'s raw state against the binding table,
/// matching `CLEANMASK` in `original_source/src/awm.h`.
fn clean_mask(state: u16, numlock_mask: u16) -> u16 {
    const USED_MODS: u16 = SHIFT | CONTROL | MOD | (1 << 3) | (1 << 4) | (1 << 5) | (1 << 7);
    state & !(numlock_mask | (1 << 1)) & USED_MODS
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() == 2 && args[1] == "-v" {
        println!("awm-{}", awm::VERSION);
        return ExitCode::SUCCESS;
    }
    if args.len() > 1 {
        eprintln!("usage: awm [-v]");
        return ExitCode::FAILURE;
    }

    tracing_subscriber::fmt::try_init().ok();

    match run() {
        Ok(true) => {
            restart_self();
            ExitCode::FAILURE // only reached if execvp itself failed
        }
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("awm: fatal: {e}");
            error!(error = %e, "fatal error");
            ExitCode::FAILURE
        }
    }
}

/// Connect, manage existing windows, and drive the event pump until a
/// quit or restart binding fires. `Ok(true)` means restart was requested.
fn run() -> Result<bool> {
    let conn = X11rbConn::new()?;
    conn.take_wm_selection()?;
    info!("acquired SUBSTRUCTURE_REDIRECT on root");

    let config = Config::default();
    let screens = conn.screen_details()?;
    if screens.is_empty() {
        return Err(Error::Raw("no display outputs reported".into()));
    }
    let monitors: Vec<Monitor> = screens
        .into_iter()
        .enumerate()
        .map(|(i, area)| Monitor::new(i, area, config.nmaster, config.mfact, config.gappx[0], config.layouts))
        .collect();

    publish_ewmh_root_properties(&conn, &config)?;

    let numlock_mask = conn.numlock_mask()?;
    let bindings = {
        let mut b = static_bindings();
        b.extend(tag_bindings(config.tags.len()));
        b
    };
    conn.ungrab_keys()?;
    for binding in &bindings {
        if let Some(kc) = conn.keycode_for_keysym(binding.keysym) {
            conn.grab_key(kc, binding.modifiers)?;
        }
    }

    let mut wm = WindowManager::new(conn, config, monitors);
    create_bars(&mut wm)?;
    wm.scan()?;
    wm.focus(None)?;
    wm.update_current_desktop()?;

    awm::spawn::ignore_sigchld()?;
    let restarted = env::var_os("RESTARTED").is_some();
    awm::spawn::run_autostart(restarted);
    if restarted {
        // Re-apply Xresources after restart: the compile-time color
        // strings baked into `Config::default()` have been overwritten in
        // memory by whatever user colors RESOURCE_MANAGER carries.
        if let Err(e) = awm::xrdb::reload_colors(&wm.conn, &mut wm.config) {
            warn!(error = %e, "xrdb reload after restart failed");
        }
    }

    #[cfg(feature = "sni")]
    let sni = match awm::sni::StatusNotifierWatcher::start() {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "StatusNotifier host unavailable, continuing without a tray");
            None
        }
    };

    let systray = match awm::systray::Systray::init(&wm.conn, wm.conn.atoms(), wm.conn.screen_num(), wm.conn.root(), wm.config.sni_icon_size) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(error = %e, "systray dock unavailable, continuing without one");
            None
        }
    };

    #[cfg(feature = "compositor")]
    let cm_selection = wm.conn.atoms().cm_selection(wm.conn.screen_num());
    #[cfg(feature = "compositor")]
    let compositor = {
        let screen = wm
            .monitors
            .iter()
            .map(|m| m.screen_area)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| awm::Rect::new(0, 0, 1, 1));
        match awm::compositor::init(&wm.conn, wm.conn.root(), screen) {
            Ok(c) => Some(c),
            Err(e) => {
                awm::compositor::warn_unavailable(&e);
                None
            }
        }
    };

    let x_fd = wm_conn_fd(&wm);

    let mut quit = false;
    let mut restart = false;

    {
        let mut pump = EventPump {
            wm: &mut wm,
            status: Ticker::default_interval(),
            dirty: Default::default(),
            during_startup: false,
            #[cfg(feature = "sni")]
            sni: sni.as_ref(),
            systray,
            #[cfg(feature = "compositor")]
            compositor,
            #[cfg(feature = "compositor")]
            cm_selection,
            signals_fd: None,
            pending_keys: Vec::new(),
        };

        while !quit {
            match pump.tick(POLL_TIMEOUT) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "event pump tick failed");
                }
            }

            for key in pump.take_pending_keys() {
                let cleaned = clean_mask(key.state, numlock_mask);
                let Some(binding) = bindings.iter().find(|b| b.modifiers == cleaned && pump.wm.conn.keycode_for_keysym(b.keysym) == Some(key.keycode)) else {
                    continue;
                };
                if let Err(e) = dispatch_action(pump.wm, binding.action, x_fd, &mut quit, &mut restart) {
                    warn!(error = %e, "key action failed");
                }
                pump.dirty.bar = true;
            }
        }
    }

    info!("shutting down");
    Ok(restart)
}

/// Create and map each monitor's bar window, then shrink its work area by
/// the configured bar height. Grounded on `updatebars`/`updatebarpos` in
/// `original_source/src/monitor.c`.
fn create_bars<X: XConn>(wm: &mut WindowManager<X>) -> Result<()> {
    let bar_height = wm.config.bar_height;
    for mon in &mut wm.monitors {
        let geom = awm::bar::bar_geometry(mon, bar_height);
        let win = wm.conn.create_window(wm.conn.root(), geom, awm::x::WinType::InputOutput(Atom::NetWMWindowTypeDialog), false)?;
        wm.conn.map(win)?;
        mon.bar_win = Some(win);
        mon.recompute_work_area(bar_height);
    }
    Ok(())
}

fn wm_conn_fd<X: XConn>(wm: &WindowManager<X>) -> std::os::unix::io::RawFd {
    wm.conn.as_raw_fd()
}

fn dispatch_action<X: XConn>(wm: &mut WindowManager<X>, action: Action, x_fd: std::os::unix::io::RawFd, quit: &mut bool, restart: &mut bool) -> Result<()> {
    match action {
        Action::Spawn(argv) => awm::spawn::spawn(argv, x_fd),
        Action::KillSelected => wm.kill_selected(),
        Action::FocusStack(dir) => wm.focus_stack(dir),
        Action::MoveInStack(dir) => wm.move_selected_in_stack(dir),
        Action::IncNMaster(d) => wm.adjust_nmaster(d),
        Action::SetMFact(d) => wm.adjust_mfact(d),
        Action::ToggleFloating => wm.toggle_floating_selected(),
        Action::ToggleFullscreen => wm.toggle_fullscreen_selected(),
        Action::View(tags) => wm.view(tags),
        Action::ToggleView(tags) => wm.toggle_view(tags),
        Action::Tag(tags) => wm.tag_selected(tags),
        Action::ToggleTag(tags) => wm.toggle_tag_selected(tags),
        Action::FocusMon(d) => wm.focus_monitor(d),
        Action::TagMon(d) => {
            let target = awm::monitor::dir_to_monitor(wm.monitors.len(), wm.sel_mon, d);
            wm.send_selected_to_monitor(target)
        }
        Action::SetLayout(layout) => {
            let slot = wm.monitors[wm.sel_mon].sel_layout;
            wm.select_layout(slot, layout)
        }
        Action::ToggleScratch(key, argv) => wm.toggle_scratchpad(key, argv, x_fd),
        Action::ReloadXrdb => awm::xrdb::reload_colors(&wm.conn, &mut wm.config),
        Action::Quit => {
            *quit = true;
            Ok(())
        }
        Action::Restart => {
            *quit = true;
            *restart = true;
            Ok(())
        }
    }
}

/// Publish the `_NET_SUPPORTED` list, the tag count/names, and a
/// `_NET_SUPPORTING_WM_CHECK` window, matching `setup`'s EWMH
/// initialization in `original_source/src/awm.c`.
fn publish_ewmh_root_properties<X: XConn>(conn: &X, config: &Config) -> Result<()> {
    let root = conn.root();
    let check_win = conn.create_window(root, awm::Rect::new(-1, -1, 1, 1), awm::x::WinType::InputOutput(Atom::NetWMWindowTypeDialog), false)?;
    conn.set_text_property(check_win, Atom::NetWMName, "awm")?;
    conn.set_cardinal_property(check_win, Atom::NetWMCheck, check_win.0)?;
    conn.set_cardinal_property(root, Atom::NetWMCheck, check_win.0)?;

    let supported: Vec<u32> = awm::x::ewmh_supported_atoms().iter().map(|&a| conn.atom(a)).collect();
    conn.set_atom_property(root, Atom::NetSupported, &supported)?;
    conn.set_cardinal_property(root, Atom::NetNumberOfDesktops, config.tags.len() as u32)?;
    conn.set_text_property(root, Atom::NetDesktopNames, &config.tags.join("\u{0}"))?;
    conn.set_cardinal_property(root, Atom::NetCurrentDesktop, 0)?;
    conn.delete_property(root, Atom::NetClientList)?;
    Ok(())
}

/// Re-exec the running binary with `RESTARTED=1` set, matching `quit`'s
/// `restart` branch in `original_source/src/awm.c`: the kept X connection
/// is inherited by the new process image exactly as the running one was,
/// so clients are never unmapped.
fn restart_self() {
    let Ok(exe) = env::current_exe() else {
        error!("restart requested but current_exe() failed");
        return;
    };
    let Ok(path) = CString::new(exe.to_string_lossy().into_owned()) else {
        return;
    };
    env::set_var("RESTARTED", "1");
    let args: Vec<CString> = vec![path.clone()];
    let _ = nix::unistd::execv(&path, &args);
    error!("execv failed during restart");
}
