//! Penrose tiling: fat/thin rhombs generated by repeatedly unfolding a single
//! seed rhomb under the golden-ratio substitution system. Grounded on
//! `penrose-tile.c`'s `build_penrose_tiling`.
//!
//! The original hardcodes a single unfold pass with no size parameter; here
//! `size` controls how many unfold generations run (capped at 4, since each
//! generation multiplies the rhomb count by roughly the golden ratio squared
//! and board-space resolution limits how many generations are worth taking).

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const RATIO: f64 = 1.6180339887;

#[derive(Clone, Copy, PartialEq, Eq)]
enum RombKind {
    Fat,
    Thin,
}

#[derive(Clone, Copy)]
struct Romb {
    kind: RombKind,
    pos: Point,
    side: f64,
    angle: f64,
}

fn d2r(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

fn unfold_fat(r: &Romb) -> [Romb; 5] {
    let nside = r.side / RATIO;
    [
        Romb {
            kind: RombKind::Fat,
            pos: Point::new(r.pos.x + r.side * (r.angle - d2r(36.0)).cos(), r.pos.y + r.side * (r.angle - d2r(36.0)).sin()),
            side: nside,
            angle: r.angle + d2r(180.0 - 36.0),
        },
        Romb {
            kind: RombKind::Thin,
            pos: Point::new(r.pos.x + nside * r.angle.cos(), r.pos.y + nside * r.angle.sin()),
            side: nside,
            angle: r.angle + d2r(360.0 - (36.0 + 18.0)),
        },
        Romb {
            kind: RombKind::Fat,
            pos: Point::new(r.pos.x + (nside + r.side) * r.angle.cos(), r.pos.y + (nside + r.side) * r.angle.sin()),
            side: nside,
            angle: r.angle + d2r(180.0),
        },
        Romb {
            kind: RombKind::Thin,
            pos: Point::new(
                r.pos.x + nside * r.angle.cos() + 2.0 * nside * d2r(18.0).cos() * (r.angle + d2r(36.0 + 18.0)).cos(),
                r.pos.y + nside * r.angle.sin() + 2.0 * nside * d2r(18.0).cos() * (r.angle + d2r(36.0 + 18.0)).sin(),
            ),
            side: nside,
            angle: r.angle + d2r(180.0 + 36.0 + 18.0),
        },
        Romb {
            kind: RombKind::Fat,
            pos: Point::new(r.pos.x + r.side * (r.angle + d2r(36.0)).cos(), r.pos.y + r.side * (r.angle + d2r(36.0)).sin()),
            side: nside,
            angle: r.angle + d2r(180.0 + 36.0),
        },
    ]
}

fn unfold_thin(r: &Romb) -> [Romb; 4] {
    let nside = r.side / RATIO;
    [
        Romb { kind: RombKind::Fat, pos: r.pos, side: nside, angle: r.angle + d2r(270.0 + (90.0 - 18.0)) },
        Romb {
            kind: RombKind::Fat,
            pos: Point::new(
                r.pos.x + (2.0 * r.side * d2r(18.0).cos()) * r.angle.cos(),
                r.pos.y + (2.0 * r.side * d2r(18.0).cos()) * r.angle.sin(),
            ),
            side: nside,
            angle: r.angle + d2r(180.0 + 18.0),
        },
        Romb {
            kind: RombKind::Thin,
            pos: Point::new(
                r.pos.x + r.side * (r.angle + d2r(18.0)).cos() + nside * (r.angle + d2r(90.0 - 36.0)).cos(),
                r.pos.y + r.side * (r.angle + d2r(18.0)).sin() + nside * (r.angle + d2r(90.0 - 36.0)).sin(),
            ),
            side: nside,
            angle: r.angle + d2r(270.0 - 18.0),
        },
        Romb {
            kind: RombKind::Thin,
            pos: Point::new(r.pos.x + r.side * (r.angle - d2r(18.0)).cos(), r.pos.y + r.side * (r.angle - d2r(18.0)).sin()),
            side: nside,
            angle: r.angle + d2r(90.0 + 18.0),
        },
    ]
}

fn unfold_all(rombs: &[Romb]) -> Vec<Romb> {
    let mut out = Vec::with_capacity(rombs.len() * 5);
    for r in rombs {
        match r.kind {
            RombKind::Fat => out.extend(unfold_fat(r)),
            RombKind::Thin => out.extend(unfold_thin(r)),
        }
    }
    out
}

fn romb_center(r: &Romb) -> Point {
    match r.kind {
        RombKind::Fat => Point::new(r.pos.x + r.side * RATIO / 2.0 * r.angle.cos(), r.pos.y + r.side * RATIO / 2.0 * r.angle.sin()),
        RombKind::Thin => Point::new(r.pos.x + r.side * d2r(18.0).cos() * r.angle.cos(), r.pos.y + r.side * d2r(18.0).cos() * r.angle.sin()),
    }
}

/// Drop rombs whose center coincides (within `eps_sq`) with an
/// already-retained romb of the same type. Mirrors `trim_repeated_rombs`.
fn trim_repeated(rombs: Vec<Romb>, eps_sq: f64) -> Vec<Romb> {
    let mut kept: Vec<Romb> = Vec::with_capacity(rombs.len());
    'outer: for r in rombs {
        let c = romb_center(&r);
        for k in &kept {
            if k.kind == r.kind && c.dist_sq(&romb_center(k)) < eps_sq {
                continue 'outer;
            }
        }
        kept.push(r);
    }
    kept
}

fn romb_vertices(r: &Romb) -> [Point; 4] {
    match r.kind {
        RombKind::Fat => [
            r.pos,
            Point::new(r.pos.x + r.side * (r.angle - d2r(36.0)).cos(), r.pos.y + r.side * (r.angle - d2r(36.0)).sin()),
            Point::new(r.pos.x + r.side * RATIO * r.angle.cos(), r.pos.y + r.side * RATIO * r.angle.sin()),
            Point::new(r.pos.x + r.side * (r.angle + d2r(36.0)).cos(), r.pos.y + r.side * (r.angle + d2r(36.0)).sin()),
        ],
        RombKind::Thin => [
            r.pos,
            Point::new(r.pos.x + r.side * (r.angle - d2r(18.0)).cos(), r.pos.y + r.side * (r.angle - d2r(18.0)).sin()),
            Point::new(r.pos.x + 2.0 * r.side * d2r(18.0).cos() * r.angle.cos(), r.pos.y + 2.0 * r.side * d2r(18.0).cos() * r.angle.sin()),
            Point::new(r.pos.x + r.side * (r.angle + d2r(18.0)).cos(), r.pos.y + r.side * (r.angle + d2r(18.0)).sin()),
        ],
    }
}

/// Build a penrose tiling. `size` selects how many unfold generations run
/// (clamped to 0..=3, i.e. 1..=4 generations).
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    let nfolds = size.min(3) + 1;

    let seed = Romb {
        kind: RombKind::Thin,
        pos: Point::new(BOARD_SIZE / 6.0, BOARD_SIZE / 2.0),
        side: BOARD_SIZE / 2.5,
        angle: 0.0,
    };

    let mut rombs = vec![seed];
    for _ in 0..nfolds {
        rombs = unfold_all(&rombs);
        let eps = rombs[0].side / 10.0;
        rombs = trim_repeated(rombs, eps * eps);
    }

    let side = rombs[0].side;
    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);
    for r in &rombs {
        let verts = romb_vertices(r);
        builder.add_tile(&verts, Some(romb_center(r)))?;
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_only_rhombs() {
        let geo = build(0).unwrap();
        assert!(geo.num_tiles() > 0);
        assert!(geo.tiles.iter().all(|t| t.sides() == 4));
    }

    #[test]
    fn more_generations_yields_more_tiles() {
        let small = build(0).unwrap();
        let big = build(2).unwrap();
        assert!(big.num_tiles() > small.num_tiles());
    }
}
