//! The floating "layout": arrange is a no-op, clients keep whatever
//! geometry they last had. Grounded on the original's `NULL` arrange
//! function pointer for the `><>` layout slot in
//! `original_source/config.def.h`.

use crate::client::Client;

use super::Placement;

pub fn arrange(_clients: &[(usize, &Client)]) -> Vec<Placement> {
    Vec::new()
}
