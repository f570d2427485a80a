//! Xresources re-application on `SIGUSR1`.
//!
//! Grounded on `xrdb.c` in `original_source/src/`: colors are not read
//! from a dotfile directly but from the `RESOURCE_MANAGER` property the X
//! server caches for whichever client last ran `xrdb`, which holds a
//! newline-separated `"key:\tvalue"` list such as `"*.color0:\t#1d2021"`.
//! Re-reading this property on `SIGUSR1` lets a running window manager
//! pick up new colors without a restart (spec §8 scenario S6).

use crate::color::Color;
use crate::config::Config;
use crate::error::Result;
use crate::x::XConn;

/// Scan `resource_manager` for a `key: #RRGGBB` entry, matching a key
/// component ending in `name` (e.g. `name = "color0"` matches both
/// `"*.color0:"` and `"*color0:"`). Grounded line-for-line on
/// `xrdb_lookup` in `original_source/src/xrdb.c`.
fn lookup<'a>(resource_manager: &'a str, name: &str) -> Option<&'a str> {
    for line in resource_manager.lines() {
        let Some((key, value)) = line.split_once(":\t") else { continue };
        let key_component = key.rsplit(['*', '.']).next().unwrap_or(key);
        if key_component == name && value.len() >= 7 && value.starts_with('#') {
            let hex = &value[0..7];
            if hex[1..].bytes().all(|b| b.is_ascii_hexdigit()) {
                return Some(hex);
            }
        }
    }
    None
}

fn apply(resource_manager: &str, name: &str, dest: &mut Color) {
    if let Some(hex) = lookup(resource_manager, name) {
        if let Ok(parsed) = Color::parse(hex) {
            *dest = parsed.with_pixel(dest.pixel);
        }
    }
}

/// Re-read `RESOURCE_MANAGER` from the root window and splice any
/// recognised color keys into `config`'s color scheme, leaving colors
/// with no matching resource untouched. Grounded on `loadxrdb`/`xrdb` in
/// `original_source/src/xrdb.c`: the original additionally recreates its
/// `Drw` color scheme cache and asks the systray/bar to recolor, which in
/// this crate's split the caller does by marking the bar dirty after this
/// returns (see `event_pump.rs`'s `SIGUSR1` handling).
pub fn reload_colors<X: XConn>(conn: &X, config: &mut Config) -> Result<()> {
    let Some(resm) = conn.get_text_property(conn.root(), crate::atom::Atom::ResourceManager)? else {
        return Ok(());
    };

    apply(&resm, "color2", &mut config.color_norm_border);
    apply(&resm, "color0", &mut config.color_norm_bg);
    apply(&resm, "color8", &mut config.color_norm_fg);
    apply(&resm, "color6", &mut config.color_sel_border);
    apply(&resm, "color1", &mut config.color_sel_bg);
    apply(&resm, "color7", &mut config.color_sel_fg);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_star_dot_prefix() {
        let resm = "*.color0:\t#1d2021\n*.color1:\t#cc241d\n";
        assert_eq!(lookup(resm, "color0"), Some("#1d2021"));
        assert_eq!(lookup(resm, "color1"), Some("#cc241d"));
    }

    #[test]
    fn lookup_matches_bare_star_prefix() {
        let resm = "*color3:\t#d79921\n";
        assert_eq!(lookup(resm, "color3"), Some("#d79921"));
    }

    #[test]
    fn lookup_ignores_non_hex_values() {
        let resm = "*.color0:\tnotacolor\n";
        assert_eq!(lookup(resm, "color0"), None);
    }

    #[test]
    fn lookup_returns_none_for_missing_key() {
        let resm = "*.color0:\t#1d2021\n";
        assert_eq!(lookup(resm, "color9"), None);
    }
}
