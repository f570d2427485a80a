//! `org.kde.StatusNotifierWatcher` + host registration.
//!
//! Grounded on `sni.c`'s watcher setup in `original_source/src/sni.c` for
//! the registration/cap/dispatch shape, and on
//! `other_examples/82991c14_a7mddra-snapllm__app-src-services-tray.rs.rs`
//! for the `zbus` interface idiom. `zbus`'s connection is inherently
//! async; since the rest of the window manager is a single blocking
//! `poll()` loop (spec §4.1), the D-Bus side runs on a dedicated thread
//! driving a `tokio` current-thread runtime, and hands finished work back
//! to the main loop over a channel plus a self-pipe `RawFd` the main
//! loop's `poll()` can wait on alongside the X socket.

use std::collections::HashMap;
use std::os::unix::io::RawFd;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, warn};
use zbus::fdo::DBusProxy;
use zbus::zvariant::Value;
use zbus::{dbus_interface, Connection, SignalContext};

use crate::error::{Error, Result};
use crate::sni::{PendingClick, SNIIcon, SNIItem, Status};

/// Items are capped at 64 (spec §4.8: "reject new registrations beyond
/// that with a log entry").
pub const MAX_ITEMS: usize = 64;

/// Work handed back from the D-Bus thread to the main loop, drained via
/// [`StatusNotifierWatcher::poll_events`] once the self-pipe fd is
/// readable.
#[derive(Debug)]
pub enum SniEvent {
    ItemRegistered { service: String, object_path: String },
    ItemUnregistered { service: String },
    PropertiesReady { service: String, object_path: String, generation: u64, title: String, icon_name: String, icons: Vec<SNIIcon>, status: Status, item_is_menu: bool, menu_path: Option<String> },
    MenuReady { service: String, object_path: String, tree: crate::sni::menu::MenuItem },
}

struct Registry {
    items: Vec<SNIItem>,
    host_registered: bool,
}

/// The watcher + host: owns the item registry and the background D-Bus
/// thread. Dropped at teardown, which closes the connection and joins the
/// thread.
pub struct StatusNotifierWatcher {
    registry: Arc<Mutex<Registry>>,
    events: std::sync::mpsc::Receiver<SniEvent>,
    wake_read_fd: RawFd,
    cmd: tokio::sync::mpsc::UnboundedSender<Cmd>,
    _runtime_thread: std::thread::JoinHandle<()>,
}

enum Cmd {
    FetchProperties { service: String, object_path: String, generation: u64 },
    FetchMenu { service: String, object_path: String, menu_path: String },
    Activate { service: String, object_path: String, x: i32, y: i32 },
    SecondaryActivate { service: String, object_path: String, x: i32, y: i32 },
    ContextMenu { service: String, object_path: String, x: i32, y: i32 },
    MenuEvent { service: String, menu_path: String, id: i32 },
    MenuAboutToShow { service: String, menu_path: String, id: i32 },
}

#[derive(Default)]
struct WatcherIface {
    registry: Arc<Mutex<Registry>>,
    wake_write_fd: RawFd,
}

fn wake(fd: RawFd) {
    let _ = nix::unistd::write(fd, &[1u8]);
}

#[dbus_interface(name = "org.kde.StatusNotifierWatcher")]
impl WatcherIface {
    async fn register_status_notifier_item(
        &self,
        service_or_path: &str,
        #[zbus(header)] header: zbus::MessageHeader<'_>,
    ) -> zbus::fdo::Result<()> {
        let sender = header.sender().ok().flatten().map(|s| s.to_string()).unwrap_or_default();
        let (service, object_path) = if service_or_path.starts_with('/') {
            (sender, service_or_path.to_string())
        } else {
            (service_or_path.to_string(), "/StatusNotifierItem".to_string())
        };

        let mut reg = self.registry.lock().unwrap();
        if reg.items.len() >= MAX_ITEMS {
            warn!(service, "StatusNotifierItem registration rejected: at capacity");
            return Ok(());
        }
        if reg.items.iter().any(|i| i.service == service && i.object_path == object_path) {
            return Ok(());
        }
        reg.items.push(SNIItem::new(service, object_path));
        drop(reg);
        wake(self.wake_write_fd);
        Ok(())
    }

    async fn register_status_notifier_host(&self, _service: &str) -> zbus::fdo::Result<()> {
        self.registry.lock().unwrap().host_registered = true;
        Ok(())
    }

    #[dbus_interface(property)]
    async fn registered_status_notifier_items(&self) -> Vec<String> {
        self.registry.lock().unwrap().items.iter().map(|i| i.service.clone()).collect()
    }

    #[dbus_interface(property)]
    async fn is_status_notifier_host_registered(&self) -> bool {
        self.registry.lock().unwrap().host_registered
    }

    #[dbus_interface(property)]
    async fn protocol_version(&self) -> i32 {
        0
    }

    #[dbus_interface(signal)]
    async fn status_notifier_item_registered(ctxt: &SignalContext<'_>, service: &str) -> zbus::Result<()>;

    #[dbus_interface(signal)]
    async fn status_notifier_item_unregistered(ctxt: &SignalContext<'_>, service: &str) -> zbus::Result<()>;
}

impl StatusNotifierWatcher {
    /// Claim the watcher name, register the host, subscribe to
    /// `NameOwnerChanged`, and start the background D-Bus thread.
    /// Returns `Err` if the watcher name is already owned (spec §7
    /// `DBusOwnership`: "log warn, continue without SNI support").
    pub fn start() -> Result<Self> {
        let registry = Arc::new(Mutex::new(Registry { items: Vec::new(), host_registered: false }));
        let (wake_read_fd, wake_write_fd) = nix::unistd::pipe().map_err(Error::Errno)?;
        let (event_tx, event_rx) = std::sync::mpsc::channel();
        let (cmd_tx, cmd_rx) = tokio::sync::mpsc::unbounded_channel();

        let reg_for_thread = registry.clone();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();

        let thread = std::thread::Builder::new()
            .name("awm-sni".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(Error::Raw(e.to_string())));
                        return;
                    }
                };
                rt.block_on(run_dbus_thread(reg_for_thread, wake_write_fd, event_tx, cmd_rx, ready_tx));
            })
            .map_err(Error::Io)?;

        ready_rx
            .recv_timeout(Duration::from_secs(5))
            .map_err(|_| Error::Raw("SNI D-Bus thread did not start".into()))??;

        Ok(Self { registry, events: event_rx, wake_read_fd, cmd: cmd_tx, _runtime_thread: thread })
    }

    /// The fd the main loop's `poll()` should watch alongside the X
    /// socket (spec §4.1: "unified poll over the X socket fd + D-Bus
    /// fd"); readable whenever [`Self::poll_events`] has work.
    pub fn as_raw_fd(&self) -> RawFd {
        self.wake_read_fd
    }

    /// Drain the self-pipe and return every event queued since the last
    /// call. Call this once the main loop's `poll()` reports the fd
    /// readable.
    pub fn poll_events(&self) -> Vec<SniEvent> {
        let mut buf = [0u8; 256];
        while matches!(nix::unistd::read(self.wake_read_fd, &mut buf), Ok(n) if n > 0) {}
        let mut out = Vec::new();
        while let Ok(ev) = self.events.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Kick off an async `GetAll` for every item that needs one (spec
    /// §4.8: "For each item with `!properties_fetched &&
    /// !properties_fetching`"), tagging each request with the item's
    /// current generation so a stale reply can be dropped.
    pub fn fetch_due_properties(&self) {
        let mut reg = self.registry.lock().unwrap();
        for item in reg.items.iter_mut() {
            if item.needs_property_fetch() {
                item.properties_fetching = true;
                let _ = self.cmd.send(Cmd::FetchProperties {
                    service: item.service.clone(),
                    object_path: item.object_path.clone(),
                    generation: item.generation,
                });
            }
        }
    }

    /// Apply a `PropertiesReady` event landed from the D-Bus thread,
    /// respecting the generation guard (spec §4.8: "if they differ, the
    /// item was dropped while the call was in flight; discard the
    /// reply"). Returns a pending click to dispatch immediately, if one
    /// was queued while the fetch was outstanding.
    pub fn apply_properties(&self, service: &str, object_path: &str, generation: u64, title: String, icon_name: String, icons: Vec<SNIIcon>, status: Status, item_is_menu: bool, menu_path: Option<String>) -> Option<PendingClick> {
        let mut reg = self.registry.lock().unwrap();
        let item = reg.items.iter_mut().find(|i| i.service == service && i.object_path == object_path)?;
        if item.generation != generation {
            debug!(service, "discarding stale GetAll reply: generation mismatch");
            return None;
        }
        item.title = title;
        item.icon_name = icon_name;
        item.icons = icons;
        item.status = status;
        item.item_is_menu = item_is_menu;
        item.menu_path = menu_path;
        item.properties_fetched = true;
        item.properties_fetching = false;
        item.bump();
        item.take_pending_click()
    }

    /// Remove an item whose owning bus name disappeared (spec §4.8:
    /// "`NameOwnerChanged` where the new owner is empty and matches an
    /// item's service"). Bumping the generation before removal is
    /// implicit: the item is simply dropped, so any later reply comparing
    /// against its stored generation will find no item at all.
    pub fn remove_item(&self, service: &str) {
        let mut reg = self.registry.lock().unwrap();
        reg.items.retain(|i| i.service != service);
    }

    pub fn with_item<R>(&self, service: &str, object_path: &str, f: impl FnOnce(&mut SNIItem) -> R) -> Option<R> {
        let mut reg = self.registry.lock().unwrap();
        reg.items.iter_mut().find(|i| i.service == service && i.object_path == object_path).map(f)
    }

    pub fn items_snapshot(&self) -> Vec<SNIItem> {
        self.registry.lock().unwrap().items.clone()
    }

    /// Dispatch a click per the table in spec §4.8 (button 1 → Activate,
    /// 2 → SecondaryActivate, 3 → menu-if-any else ContextMenu). If the
    /// item's properties haven't resolved, the click is queued instead
    /// and returns `false`.
    pub fn dispatch_click(&self, service: &str, object_path: &str, button: u8, x: i32, y: i32, timestamp: u32) -> bool {
        let pending = {
            let mut reg = self.registry.lock().unwrap();
            let Some(item) = reg.items.iter_mut().find(|i| i.service == service && i.object_path == object_path) else {
                return false;
            };
            item.click(button, x, y, timestamp)
        };
        let Some(click) = pending else { return false };
        self.send_click(service, object_path, click.button, click.x, click.y);
        true
    }

    fn send_click(&self, service: &str, object_path: &str, button: u8, x: i32, y: i32) {
        let service = service.to_string();
        let object_path = object_path.to_string();
        let cmd = match button {
            1 => Cmd::Activate { service, object_path, x, y },
            2 => Cmd::SecondaryActivate { service, object_path, x, y },
            _ => Cmd::ContextMenu { service, object_path, x, y },
        };
        let _ = self.cmd.send(cmd);
    }

    pub fn fetch_menu(&self, service: &str, object_path: &str, menu_path: &str) {
        let _ = self.cmd.send(Cmd::FetchMenu {
            service: service.to_string(),
            object_path: object_path.to_string(),
            menu_path: menu_path.to_string(),
        });
    }

    pub fn menu_about_to_show(&self, service: &str, menu_path: &str, id: i32) {
        let _ = self.cmd.send(Cmd::MenuAboutToShow { service: service.to_string(), menu_path: menu_path.to_string(), id });
    }

    pub fn menu_event(&self, service: &str, menu_path: &str, id: i32) {
        let _ = self.cmd.send(Cmd::MenuEvent { service: service.to_string(), menu_path: menu_path.to_string(), id });
    }
}

async fn run_dbus_thread(
    registry: Arc<Mutex<Registry>>,
    wake_write_fd: RawFd,
    events: std::sync::mpsc::Sender<SniEvent>,
    mut cmds: tokio::sync::mpsc::UnboundedReceiver<Cmd>,
    ready: std::sync::mpsc::Sender<Result<()>>,
) {
    let conn = match Connection::session().await {
        Ok(c) => c,
        Err(e) => {
            let _ = ready.send(Err(Error::DBus(e)));
            return;
        }
    };

    let iface = WatcherIface { registry: registry.clone(), wake_write_fd };
    if let Err(e) = conn
        .object_server()
        .at("/StatusNotifierWatcher", iface)
        .await
    {
        let _ = ready.send(Err(Error::DBus(e)));
        return;
    }
    if let Err(e) = conn.request_name("org.kde.StatusNotifierWatcher").await {
        let _ = ready.send(Err(Error::DBus(e)));
        return;
    }

    let _ = ready.send(Ok(()));

    if let Ok(dbus) = DBusProxy::new(&conn).await {
        if let Ok(mut stream) = dbus.receive_name_owner_changed().await {
            let registry = registry.clone();
            let events = events.clone();
            tokio::spawn(async move {
                use futures_util::StreamExt;
                while let Some(signal) = stream.next().await {
                    if let Ok(args) = signal.args() {
                        if args.new_owner().as_ref().map(|o| o.is_empty()).unwrap_or(true) {
                            let name = args.name().to_string();
                            let had = {
                                let mut reg = registry.lock().unwrap();
                                let before = reg.items.len();
                                reg.items.retain(|i| i.service != name);
                                reg.items.len() != before
                            };
                            if had {
                                let _ = events.send(SniEvent::ItemUnregistered { service: name });
                                wake(wake_write_fd);
                            }
                        }
                    }
                }
            });
        }
    }

    while let Some(cmd) = cmds.recv().await {
        match cmd {
            Cmd::FetchProperties { service, object_path, generation } => {
                let conn = conn.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    if let Some(ev) = fetch_properties(&conn, &service, &object_path, generation).await {
                        let _ = events.send(ev);
                        wake(wake_write_fd);
                    }
                });
            }
            Cmd::Activate { service, object_path, x, y } => {
                call_item_method(&conn, &service, &object_path, "Activate", (x, y)).await;
            }
            Cmd::SecondaryActivate { service, object_path, x, y } => {
                call_item_method(&conn, &service, &object_path, "SecondaryActivate", (x, y)).await;
            }
            Cmd::ContextMenu { service, object_path, x, y } => {
                call_item_method(&conn, &service, &object_path, "ContextMenu", (x, y)).await;
            }
            Cmd::FetchMenu { service, object_path, menu_path } => {
                let conn = conn.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    if let Some(tree) = crate::sni::menu::fetch_layout(&conn, &service, &menu_path).await {
                        let _ = events.send(SniEvent::MenuReady { service, object_path, tree });
                        wake(wake_write_fd);
                    }
                });
            }
            Cmd::MenuAboutToShow { service, menu_path, id } => {
                let _ = crate::sni::menu::about_to_show(&conn, &service, &menu_path, id).await;
            }
            Cmd::MenuEvent { service, menu_path, id } => {
                let _ = crate::sni::menu::send_event(&conn, &service, &menu_path, id).await;
            }
        }
    }
}

async fn call_item_method(conn: &Connection, service: &str, object_path: &str, method: &str, args: (i32, i32)) {
    let Ok(path) = zbus::zvariant::ObjectPath::try_from(object_path.to_string()) else { return };
    let _: Result<(), zbus::Error> = conn
        .call_method(Some(service), path, Some("org.kde.StatusNotifierItem"), method, &args)
        .await
        .map(|_| ());
}

async fn fetch_properties(conn: &Connection, service: &str, object_path: &str, generation: u64) -> Option<SniEvent> {
    let path = zbus::zvariant::ObjectPath::try_from(object_path.to_string()).ok()?;
    let reply = conn
        .call_method(Some(service), &path, Some("org.freedesktop.DBus.Properties"), "GetAll", &("org.kde.StatusNotifierItem",))
        .await
        .ok()?;
    let props: HashMap<String, Value> = reply.body().ok()?;

    let title = props.get("Title").and_then(value_str).unwrap_or_default();
    let icon_name = props.get("IconName").and_then(value_str).unwrap_or_default();
    let status = props.get("Status").and_then(value_str).map(|s| Status::parse(&s)).unwrap_or_default();
    let item_is_menu = props.get("ItemIsMenu").and_then(|v| bool::try_from(v.clone()).ok()).unwrap_or(false);
    let menu_path = props.get("Menu").and_then(|v| zbus::zvariant::ObjectPath::try_from(v.clone()).ok()).map(|p| p.to_string());
    let icons = props.get("IconPixmap").map(|v| decode_icon_pixmaps(v)).unwrap_or_default();

    Some(SniEvent::PropertiesReady {
        service: service.to_string(),
        object_path: object_path.to_string(),
        generation,
        title,
        icon_name,
        icons,
        status,
        item_is_menu,
        menu_path,
    })
}

fn value_str(v: &Value) -> Option<String> {
    <&str>::try_from(v).ok().map(|s| s.to_string())
}

/// Decode `IconPixmap`'s `a(iiay)` into our local [`SNIIcon`] list.
fn decode_icon_pixmaps(v: &Value) -> Vec<SNIIcon> {
    let Ok(array) = <&zbus::zvariant::Array>::try_from(v) else { return Vec::new() };
    array
        .iter()
        .filter_map(|entry| {
            let s = zbus::zvariant::Structure::try_from(entry.clone()).ok()?;
            let fields = s.into_fields();
            let width = i32::try_from(fields.first()?.clone()).ok()?;
            let height = i32::try_from(fields.get(1)?.clone()).ok()?;
            let data = Vec::<u8>::try_from(fields.get(2)?.clone()).ok()?;
            Some(SNIIcon { width, height, data })
        })
        .collect()
}
