//! DBusMenu `GetLayout`/`Event`/`AboutToShow` client side, used to fetch
//! and drive a tray item's context menu.
//!
//! Grounded on spec §4.8 "Menu fetch" and on the `GetLayout` reply shape
//! demonstrated in
//! `other_examples/82991c14_a7mddra-snapllm__app-src-services-tray.rs.rs`.

use std::collections::HashMap;

use zbus::zvariant::{ObjectPath, OwnedValue, Structure, Value};
use zbus::Connection;

/// Depth limit for the recursive `GetLayout` conversion (spec §4.8:
/// "Recursively (depth limit 10)").
const MAX_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleType {
    None,
    Checkmark,
    Radio,
}

/// One converted DBusMenu item. An empty `label` after mnemonic-stripping
/// is rendered as a separator (spec §4.8: "Empty-label items become
/// separators").
#[derive(Debug, Clone)]
pub struct MenuItem {
    pub id: i32,
    pub label: String,
    pub enabled: bool,
    pub visible: bool,
    pub toggle_type: ToggleType,
    pub toggle_state: i32,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn is_separator(&self) -> bool {
        self.label.is_empty()
    }
}

/// Strip DBusMenu mnemonic underscores from a label: `_X` becomes the
/// mnemonic-marked `X` (the underscore itself is dropped since this host
/// has no keyboard mnemonic rendering), `__` becomes a literal `_`, and a
/// trailing lone `_` is dropped. Grounded on spec §4.8's mnemonic rule.
pub fn strip_mnemonic(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut chars = label.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.peek() {
                Some('_') => {
                    out.push('_');
                    chars.next();
                }
                Some(_) => {
                    // drop the underscore, keep the mnemonic letter
                }
                None => {
                    // trailing underscore: dropped
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn prop_str(props: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    props.get(key).and_then(|v| <&str>::try_from(v).ok()).map(|s| s.to_string())
}

fn prop_bool(props: &HashMap<String, OwnedValue>, key: &str, default: bool) -> bool {
    props.get(key).and_then(|v| bool::try_from(v.clone()).ok()).unwrap_or(default)
}

fn parse_toggle_type(props: &HashMap<String, OwnedValue>) -> ToggleType {
    match prop_str(props, "toggle-type").as_deref() {
        Some("checkmark") => ToggleType::Checkmark,
        Some("radio") => ToggleType::Radio,
        _ => ToggleType::None,
    }
}

/// Convert one `(id, props, children)` DBusMenu node into a [`MenuItem`],
/// recursing into `children` up to [`MAX_DEPTH`]. Items with
/// `visible = false` are dropped from the result entirely.
fn convert(node: &Structure, depth: u32) -> Option<MenuItem> {
    let fields = node.fields();
    let id = i32::try_from(fields.first()?.clone()).ok()?;
    let props: HashMap<String, OwnedValue> = fields.get(1)?.clone().try_into().ok()?;
    let visible = prop_bool(&props, "visible", true);
    if !visible {
        return None;
    }
    let label = strip_mnemonic(&prop_str(&props, "label").unwrap_or_default());
    let enabled = prop_bool(&props, "enabled", true);
    let toggle_type = parse_toggle_type(&props);
    let toggle_state = props.get("toggle-state").and_then(|v| i32::try_from(v.clone()).ok()).unwrap_or(-1);

    let children = if depth >= MAX_DEPTH {
        Vec::new()
    } else {
        fields
            .get(2)
            .and_then(|v| <&zbus::zvariant::Array>::try_from(v).ok())
            .map(|arr| {
                arr.iter()
                    .filter_map(|child| Structure::try_from(child.clone()).ok())
                    .filter_map(|s| convert(&s, depth + 1))
                    .collect()
            })
            .unwrap_or_default()
    };

    Some(MenuItem { id, label, enabled, visible, toggle_type, toggle_state, children })
}

/// Call `com.canonical.dbusmenu.GetLayout(0, -1, [])` and convert the
/// reply into a [`MenuItem`] tree rooted at the returned top level node.
pub async fn fetch_layout(conn: &Connection, service: &str, menu_path: &str) -> Option<MenuItem> {
    let path = ObjectPath::try_from(menu_path.to_string()).ok()?;
    let empty: Vec<&str> = Vec::new();
    let reply = conn
        .call_method(Some(service), &path, Some("com.canonical.dbusmenu"), "GetLayout", &(0i32, -1i32, empty))
        .await
        .ok()?;
    let (_revision, root): (u32, OwnedValue) = reply.body().ok()?;
    let root = Structure::try_from(Value::from(root)).ok()?;
    convert(&root, 0)
}

/// Fire-and-forget `AboutToShow(id)`, called right before the popup menu
/// opens (spec §4.8).
pub async fn about_to_show(conn: &Connection, service: &str, menu_path: &str, id: i32) -> zbus::Result<()> {
    let path = ObjectPath::try_from(menu_path.to_string()).map_err(zbus::Error::from)?;
    conn.call_method(Some(service), &path, Some("com.canonical.dbusmenu"), "AboutToShow", &(id,))
        .await
        .map(|_| ())
}

/// `Event(id, "clicked", variant:INT32(0), timestamp:CurrentTime)`, fired
/// on menu item activation (spec §4.8; the timestamp parameter is UINT32
/// on the wire even though the data carried is zero).
pub async fn send_event(conn: &Connection, service: &str, menu_path: &str, id: i32) -> zbus::Result<()> {
    let path = ObjectPath::try_from(menu_path.to_string()).map_err(zbus::Error::from)?;
    let data = Value::from(0i32);
    let timestamp = 0u32;
    conn.call_method(Some(service), &path, Some("com.canonical.dbusmenu"), "Event", &(id, "clicked", data, timestamp))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_mnemonic_drops_single_underscore() {
        assert_eq!(strip_mnemonic("_Quit"), "Quit");
    }

    #[test]
    fn strip_mnemonic_collapses_double_underscore() {
        assert_eq!(strip_mnemonic("Snooze__5min"), "Snooze_5min");
    }

    #[test]
    fn strip_mnemonic_drops_trailing_underscore() {
        assert_eq!(strip_mnemonic("Foo_"), "Foo");
    }

    #[test]
    fn empty_label_is_separator() {
        let item = MenuItem { id: 1, label: String::new(), enabled: true, visible: true, toggle_type: ToggleType::None, toggle_state: -1, children: Vec::new() };
        assert!(item.is_separator());
    }
}
