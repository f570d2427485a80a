//! The monocle layout: only the topmost client in focus order fills the
//! work area. Every other tileable, visible client is pushed off-screen
//! rather than unmapped, so alt-tabbing between them doesn't require a
//! remap round trip.
//!
//! Grounded on `monocle()` in `original_source/src/monitor.c`: `clients`
//! here is expected in the same order as the original's `m->cl->stack`
//! walk (most recently focused first), not creation order.

use crate::client::Client;
use crate::geometry::Rect;

use super::Placement;

pub fn arrange(work_area: Rect, gappx: u32, clients: &[(usize, &Client)]) -> Vec<Placement> {
    let gap = gappx as i32;
    let geom = Rect::new(
        work_area.x + gap,
        work_area.y + gap,
        (work_area.w as i32 - 2 * gap).max(1) as u32,
        (work_area.h as i32 - 2 * gap).max(1) as u32,
    );

    let mut placements = Vec::with_capacity(clients.len());
    let mut iter = clients.iter();
    if let Some((idx, _)) = iter.next() {
        placements.push(Placement { client_index: *idx, geom });
    }
    for (idx, c) in iter {
        placements.push(Placement {
            client_index: *idx,
            geom: Rect::new(c.geom.w as i32 * -2, c.geom.y, c.geom.w, c.geom.h),
        });
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tags;

    fn mkclient(win: u32, geom: Rect) -> Client {
        Client::new(crate::Xid(win), geom, 1, Tags::single(0), 0)
    }

    #[test]
    fn single_client_fills_work_area() {
        let c = mkclient(1, Rect::new(0, 0, 100, 100));
        let refs = vec![(0usize, &c)];
        let work = Rect::new(0, 0, 1000, 800);
        let placements = arrange(work, 10, &refs);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].geom, Rect::new(10, 10, 980, 780));
    }

    #[test]
    fn background_clients_pushed_off_screen() {
        let top = mkclient(1, Rect::new(50, 60, 200, 150));
        let bg = mkclient(2, Rect::new(300, 60, 200, 150));
        let refs = vec![(0usize, &top), (1usize, &bg)];
        let work = Rect::new(0, 0, 1000, 800);
        let placements = arrange(work, 10, &refs);
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].geom, Rect::new(10, 10, 980, 780));
        let hidden = placements[1].geom;
        assert_eq!(hidden.x, -400);
        assert_eq!(hidden.y, 60);
        assert_eq!(hidden.w, 200);
        assert_eq!(hidden.h, 150);
    }
}
