//! Cartwheel tiling: Penrose kites and darts generated by unfolding a small
//! radially symmetric seed. Grounded on `cartwheel-tile.c`'s
//! `build_cartwheel_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;
const RATIO: f64 = 1.6180339887;

#[derive(Clone, Copy, PartialEq, Eq)]
enum KiteKind {
    Kite,
    Dart,
}

#[derive(Clone, Copy)]
struct Kite {
    kind: KiteKind,
    pos: Point,
    side: f64,
    angle: f64,
    center: Point,
}

fn d2r(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

fn unfold_kite(k: &Kite) -> [Kite; 6] {
    let nside = k.side / RATIO;
    let middle = nside * d2r(36.0).cos();

    let angle1 = k.angle - d2r(36.0);
    let angle2 = k.angle + d2r(36.0);
    let angle3 = k.angle + d2r(90.0 + (90.0 - 72.0));
    let angle4 = k.angle + d2r(180.0);
    let angle5 = k.angle - d2r(90.0 + (90.0 - 72.0));
    let angle6 = k.angle - d2r(180.0);
    let top_pos = Point::new(k.pos.x + k.side * angle1.cos(), k.pos.y + k.side * angle1.sin());
    let bot_pos = Point::new(k.pos.x + k.side * angle2.cos(), k.pos.y + k.side * angle2.sin());

    [
        Kite {
            kind: KiteKind::Dart,
            pos: k.pos,
            side: nside,
            angle: angle1,
            center: Point::new(k.pos.x + middle / 2.0 * angle1.cos(), k.pos.y + middle / 2.0 * angle1.sin()),
        },
        Kite {
            kind: KiteKind::Dart,
            pos: k.pos,
            side: nside,
            angle: angle2,
            center: Point::new(k.pos.x + middle / 2.0 * angle2.cos(), k.pos.y + middle / 2.0 * angle2.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: top_pos,
            side: nside,
            angle: angle3,
            center: Point::new(top_pos.x + middle * 3.0 / 4.0 * angle3.cos(), top_pos.y + middle * 3.0 / 4.0 * angle3.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: top_pos,
            side: nside,
            angle: angle4,
            center: Point::new(top_pos.x + middle * 3.0 / 4.0 * angle4.cos(), top_pos.y + middle * 3.0 / 4.0 * angle4.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: bot_pos,
            side: nside,
            angle: angle5,
            center: Point::new(bot_pos.x + middle * 3.0 / 4.0 * angle5.cos(), bot_pos.y + middle * 3.0 / 4.0 * angle5.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: bot_pos,
            side: nside,
            angle: angle6,
            center: Point::new(bot_pos.x + middle * 3.0 / 4.0 * angle6.cos(), bot_pos.y + middle * 3.0 / 4.0 * angle6.sin()),
        },
    ]
}

fn unfold_dart(d: &Kite) -> [Kite; 5] {
    let nside = d.side / RATIO;
    let middle = nside * d2r(36.0).cos();

    let angle1 = d.angle;
    let angle2 = d.angle - d2r(72.0);
    let angle3 = d.angle + d2r(72.0);
    let angle4 = d.angle + d2r(90.0 + (90.0 - 36.0));
    let angle5 = d.angle - d2r(90.0 + (90.0 - 36.0));
    let pos4 = Point::new(d.pos.x + d.side * (d.angle - d2r(36.0)).cos(), d.pos.y + d.side * (d.angle - d2r(36.0)).sin());
    let pos5 = Point::new(d.pos.x + d.side * (d.angle + d2r(36.0)).cos(), d.pos.y + d.side * (d.angle + d2r(36.0)).sin());

    [
        Kite {
            kind: KiteKind::Kite,
            pos: d.pos,
            side: nside,
            angle: angle1,
            center: Point::new(d.pos.x + middle * 3.0 / 4.0 * angle1.cos(), d.pos.y + middle * 3.0 / 4.0 * angle1.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: d.pos,
            side: nside,
            angle: angle2,
            center: Point::new(d.pos.x + middle * 3.0 / 4.0 * angle2.cos(), d.pos.y + middle * 3.0 / 4.0 * angle2.sin()),
        },
        Kite {
            kind: KiteKind::Kite,
            pos: d.pos,
            side: nside,
            angle: angle3,
            center: Point::new(d.pos.x + middle * 3.0 / 4.0 * angle3.cos(), d.pos.y + middle * 3.0 / 4.0 * angle3.sin()),
        },
        Kite {
            kind: KiteKind::Dart,
            pos: pos4,
            side: nside,
            angle: angle4,
            center: Point::new(pos4.x + middle / 2.0 * angle4.cos(), pos4.y + middle / 2.0 * angle4.sin()),
        },
        Kite {
            kind: KiteKind::Dart,
            pos: pos5,
            side: nside,
            angle: angle5,
            center: Point::new(pos5.x + middle / 2.0 * angle5.cos(), pos5.y + middle / 2.0 * angle5.sin()),
        },
    ]
}

fn kite_vertices(k: &Kite) -> [Point; 4] {
    let v0 = k.pos;
    let v1 = Point::new(k.pos.x + k.side * (k.angle - d2r(36.0)).cos(), k.pos.y + k.side * (k.angle - d2r(36.0)).sin());
    let v3 = Point::new(k.pos.x + k.side * (k.angle + d2r(36.0)).cos(), k.pos.y + k.side * (k.angle + d2r(36.0)).sin());
    let length = match k.kind {
        KiteKind::Kite => k.side * d2r(36.0).cos() + k.side / RATIO * d2r(18.0).sin(),
        KiteKind::Dart => k.side * d2r(36.0).cos() - k.side / RATIO * d2r(18.0).sin(),
    };
    let v2 = Point::new(k.pos.x + length * k.angle.cos(), k.pos.y + length * k.angle.sin());
    [v0, v1, v2, v3]
}

fn trim_repeated(kites: Vec<Kite>, eps_sq: f64) -> Vec<Kite> {
    let mut kept: Vec<Kite> = Vec::with_capacity(kites.len());
    'outer: for k in kites {
        for j in &kept {
            if j.kind == k.kind && j.center.dist_sq(&k.center) < eps_sq {
                continue 'outer;
            }
        }
        kept.push(k);
    }
    kept
}

fn trim_outside(kites: Vec<Kite>, radius: f64) -> Vec<Kite> {
    let center = BOARD_SIZE / 2.0;
    kites
        .into_iter()
        .filter(|k| {
            kite_vertices(k)
                .iter()
                .all(|v| Point::new(v.x - center, v.y - center).dist_sq(&Point::new(0.0, 0.0)).sqrt() <= radius)
        })
        .collect()
}

fn unfold_round(kites: Vec<Kite>, edge: f64, eps_sq: f64) -> Vec<Kite> {
    let mut out = Vec::with_capacity(kites.len() * 5);
    for k in &kites {
        match k.kind {
            KiteKind::Kite => out.extend(unfold_kite(k)),
            KiteKind::Dart => out.extend(unfold_dart(k)),
        }
    }
    out = trim_repeated(out, eps_sq);
    if edge > 0.0 {
        out = trim_outside(out, edge);
    }
    out
}

fn create_arrow_seed(pos: Point, angle_deg: f64, side: f64) -> Vec<Kite> {
    vec![
        Kite { kind: KiteKind::Dart, pos, side, angle: d2r(angle_deg), center: pos },
        Kite {
            kind: KiteKind::Kite,
            pos: Point::new(pos.x + (side + side / RATIO), pos.y),
            side,
            angle: d2r(angle_deg + 180.0 + 36.0),
            center: pos,
        },
        Kite {
            kind: KiteKind::Kite,
            pos: Point::new(pos.x + (side + side / RATIO), pos.y),
            side,
            angle: d2r(angle_deg + 180.0 - 36.0),
            center: pos,
        },
    ]
}

struct Params {
    side: f64,
    pos: Point,
    nfolds: i32,
    seed_type: KiteKind,
    seed_side: f64,
}

fn calculate_params(size_index: usize) -> Result<Params, GeometryError> {
    let mut side = GAME_SIZE / 2.0;
    let mut pos = Point::new(BOARD_SIZE / 2.0, BOARD_SIZE / 2.0);
    let mut seed_type = KiteKind::Kite;
    let nfolds;
    match size_index {
        0 => {
            nfolds = 2;
            side /= (4.0 + 2.0 / RATIO) / 2.0;
            pos.x -= side * RATIO.powi(nfolds);
        }
        1 => {
            nfolds = 3;
            side /= 2.0 + 2.0 / RATIO;
        }
        2 => {
            nfolds = 3;
            side /= 3.0 + 2.0 / RATIO;
            seed_type = KiteKind::Dart;
        }
        3 => {
            nfolds = 4;
            side /= 4.0 + 3.0 / RATIO + 1.0 / RATIO / 2.0;
            seed_type = KiteKind::Dart;
        }
        4 => {
            nfolds = 4;
            side /= 6.0 + 5.0 / RATIO + 1.0 / RATIO / 2.0;
        }
        _ => return Err(GeometryError::Invalid("cartwheel size must be 0..5".into())),
    }
    let seed_side = side * RATIO.powi(nfolds);
    Ok(Params { side, pos, nfolds, seed_type, seed_side })
}

fn create_tile_seed(params: &Params, size_index: usize) -> Vec<Kite> {
    if size_index == 0 {
        return create_arrow_seed(params.pos, 0.0, params.seed_side);
    }
    (0..5)
        .map(|i| Kite {
            kind: params.seed_type,
            pos: params.pos,
            side: params.seed_side,
            angle: d2r(i as f64 * 72.0 - 90.0),
            center: params.pos,
        })
        .collect()
}

/// Build a cartwheel board at `size` in `0..5`.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    let params = calculate_params(size)?;
    let mut kites = create_tile_seed(&params, size);

    for i in 0..params.nfolds {
        let edge = if i == params.nfolds - 1 {
            GAME_SIZE / 2.0
        } else if i > 1 && i == params.nfolds - 2 {
            GAME_SIZE / 1.5
        } else {
            GAME_SIZE
        };
        let eps = kites[0].side / RATIO / 10.0;
        kites = unfold_round(kites, edge, eps * eps);
    }

    let side = params.side;
    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);
    for k in &kites {
        let verts = kite_vertices(k);
        builder.add_tile(&verts, Some(k.center))?;
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_only_quads() {
        let geo = build(0).unwrap();
        assert!(geo.num_tiles() > 0);
        assert!(geo.tiles.iter().all(|t| t.sides() == 4));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(build(5).is_err());
    }
}
