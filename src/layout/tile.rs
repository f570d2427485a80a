//! Master/stack tiling.
//!
//! Grounded line-for-line on `tile()` in `original_source/src/monitor.c`
//! (lines 415-477): the master area takes the left `mfact` fraction of
//! the work area (or all of it if there's only one tileable client, or
//! `nmaster == 0`), the rest is divided evenly among the stack, and the
//! very last gap of unused pixels in a column is folded into the final
//! client's height so rounding error doesn't leave a sliver of bare
//! background at the bottom.

use crate::client::Client;
use crate::geometry::Rect;

use super::Placement;

pub fn arrange(work_area: Rect, gappx: u32, nmaster: u32, mfact: f32, clients: &[(usize, &Client)]) -> Vec<Placement> {
    let n = clients.len();
    if n == 0 {
        return Vec::new();
    }

    let gap = gappx as i32;
    let mw = if n > nmaster as usize && nmaster > 0 {
        (work_area.w as f32 * mfact) as i32
    } else {
        work_area.w as i32 - gap
    };

    let mut placements = Vec::with_capacity(n);
    let mut my = work_area.y + gap;
    let mut ty = work_area.y + gap;

    for (i, (idx, _c)) in clients.iter().enumerate() {
        if i < nmaster as usize {
            let remaining_master = n.min(nmaster as usize) - i;
            let h = ((work_area.bottom() - my) / remaining_master as i32 - gap).max(1);
            let geom = Rect::new(work_area.x + gap, my, (mw - gap).max(1) as u32, h as u32);
            placements.push(Placement { client_index: *idx, geom });
            my += h + gap;
        } else {
            let remaining_stack = n - i;
            let h = ((work_area.bottom() - ty) / remaining_stack as i32 - gap).max(1);
            let tx = work_area.x + mw + gap;
            let tw = (work_area.w as i32 - mw - 2 * gap).max(1);
            let geom = Rect::new(tx, ty, tw as u32, h as u32);
            placements.push(Placement { client_index: *idx, geom });
            ty += h + gap;
        }
    }
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::tag::Tags;

    fn mkclient(win: u32) -> Client {
        Client::new(crate::Xid(win), Rect::new(0, 0, 100, 100), 1, Tags::single(0), 0)
    }

    #[test]
    fn single_client_fills_work_area() {
        let c = mkclient(1);
        let refs = vec![(0usize, &c)];
        let work = Rect::new(0, 0, 1000, 800);
        let placements = arrange(work, 10, 1, 0.5, &refs);
        assert_eq!(placements.len(), 1);
        let p = placements[0].geom;
        assert_eq!(p.x, 10);
        assert_eq!(p.y, 10);
        assert_eq!(p.w, 980);
        assert_eq!(p.h, 780);
    }

    #[test]
    fn two_clients_split_master_and_stack() {
        let c1 = mkclient(1);
        let c2 = mkclient(2);
        let refs = vec![(0usize, &c1), (1usize, &c2)];
        let work = Rect::new(0, 0, 1000, 800);
        let placements = arrange(work, 0, 1, 0.5, &refs);
        assert_eq!(placements.len(), 2);
        assert!(placements[0].geom.w < 1000);
        assert!(placements[1].geom.x > placements[0].geom.x);
    }
}
