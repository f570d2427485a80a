//! Focus-follows-nothing (click/keyboard driven) focus management.
//!
//! Grounded on `focus`, `unfocus`, `focusstack` and `focusstackhidden` in
//! `original_source/src/client.c`.

use crate::client::Client;
use crate::tag::Tags;

/// Direction used by `focusstack`/`movestack`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Pick the next client to focus on a monitor after the current selection
/// changes (new client unmanaged, tag switch, explicit focus command).
/// `order` is the monitor's client stacking order (most-recently-focused
/// first, matching the original's singly linked `stack` list); the first
/// entry that is visible on `seltags` and not `never_focus` wins.
/// Grounded on the selection loop at the top of `focus(NULL)` calls
/// throughout `client.c`.
pub fn next_focus_candidate(order: &[(usize, &Client)], seltags: Tags) -> Option<usize> {
    order
        .iter()
        .find(|(_, c)| c.is_visible_on(seltags) && !c.never_focus)
        .map(|(idx, _)| *idx)
}

/// Step from `cur` to the next (or previous) visible, non-floating-only
/// client in tiling order, wrapping around. Grounded on `focusstack` in
/// `original_source/src/client.c`: floating clients are only skipped when
/// `sel->isfloating` doesn't match `hidden` semantics — here we keep it
/// simple and consider every visible client a focus candidate, matching
/// the non-"hidden" variant used by the default keybindings.
pub fn focus_stack(tiling_order: &[(usize, &Client)], cur: Option<usize>, dir: Direction, seltags: Tags) -> Option<usize> {
    let visible: Vec<usize> = tiling_order
        .iter()
        .filter(|(_, c)| c.is_visible_on(seltags))
        .map(|(idx, _)| *idx)
        .collect();
    if visible.is_empty() {
        return None;
    }
    let cur_pos = cur.and_then(|c| visible.iter().position(|&i| i == c));
    let next_pos = match (cur_pos, dir) {
        (Some(p), Direction::Next) => (p + 1) % visible.len(),
        (Some(p), Direction::Prev) => (p + visible.len() - 1) % visible.len(),
        (None, _) => 0,
    };
    Some(visible[next_pos])
}

/// Move the selected client one slot up/down the monitor's client list,
/// swapping tiling order without touching focus. Grounded on `movestack`
/// in `original_source/src/client.c`.
pub fn move_in_stack(order: &mut Vec<usize>, cur: usize, dir: Direction) {
    let Some(pos) = order.iter().position(|&i| i == cur) else { return };
    let new_pos = match dir {
        Direction::Next => (pos + 1) % order.len(),
        Direction::Prev => (pos + order.len() - 1) % order.len(),
    };
    order.swap(pos, new_pos);
}
