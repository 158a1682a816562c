//! Trihex (triangle/hexagon) tiling: 12-sided symmetry units of alternating
//! triangles and squares repeated in a brick pattern. Grounded on
//! `trihex-tile.c`'s `build_trihex_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;

const GEO_PARAMS: [(usize, usize, usize); 5] = [(46, 42, 87), (96, 79, 174), (183, 143, 325), (277, 208, 484), (465, 338, 802)];

const NEIGHBOR_NW: u32 = 0x0001;
const NEIGHBOR_NE: u32 = 0x0002;
const NEIGHBOR_W: u32 = 0x0004;

fn d2r(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

/// Draw one 12-sided round structure, skipping whichever outer-ring shapes
/// would duplicate a previously-placed neighbor's. Mirrors
/// `trihex_symmetry_unit`.
fn symmetry_unit(builder: &mut GeometryBuilder, pos: Point, side: f64, neighbor: u32) -> Result<(), GeometryError> {
    let mut ringmask: u32 = !0;
    if neighbor & NEIGHBOR_W != 0 {
        ringmask &= !0x00E0;
    }
    if neighbor & NEIGHBOR_NW != 0 {
        ringmask &= !0x0380;
    }
    if neighbor & NEIGHBOR_NE != 0 {
        ringmask &= !0x0E00;
    }

    // inner pie region: 6 triangles fanning out from the center.
    for i in 0..6 {
        let angle = i as f64 * d2r(60.0);
        let p1 = Point::new(pos.x + side * (angle - d2r(30.0)).cos(), pos.y + side * (angle - d2r(30.0)).sin());
        let p2 = Point::new(pos.x + side * (angle + d2r(30.0)).cos(), pos.y + side * (angle + d2r(30.0)).sin());
        builder.add_tile(&[pos, p1, p2], None)?;
    }

    // outer ring of alternating squares and triangles.
    let mut mask = ringmask;
    for i in 0..6 {
        let angle = d2r(i as f64 * 60.0);
        let p0 = Point::new(pos.x + side * (angle + d2r(30.0)).cos(), pos.y + side * (angle + d2r(30.0)).sin());
        if mask & 1 != 0 {
            let p1 = Point::new(p0.x + side * (angle - d2r(90.0)).cos(), p0.y + side * (angle - d2r(90.0)).sin());
            let p2 = Point::new(p0.x + side * 2.0f64.sqrt() * (angle - d2r(45.0)).cos(), p0.y + side * 2.0f64.sqrt() * (angle - d2r(45.0)).sin());
            let p3 = Point::new(p0.x + side * angle.cos(), p0.y + side * angle.sin());
            builder.add_tile(&[p0, p1, p2, p3], None)?;
        }
        if mask & 2 != 0 {
            let p1 = Point::new(p0.x + side * angle.cos(), p0.y + side * angle.sin());
            let p2 = Point::new(p0.x + side * (angle + d2r(60.0)).cos(), p0.y + side * (angle + d2r(60.0)).sin());
            builder.add_tile(&[p0, p1, p2], None)?;
        }
        mask >>= 2;
    }

    Ok(())
}

/// Build a trihex board at `size` in `0..5`.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    if size >= GEO_PARAMS.len() {
        return Err(GeometryError::Invalid(format!("trihex size must be 0..{}", GEO_PARAMS.len())));
    }

    let root3 = 3.0f64.sqrt();
    let dimx = size as i64 + 2;
    let dimy = if size == 4 { dimx + 1 } else { dimx };

    let mut side = GAME_SIZE / (dimx as f64 * (1.0 + root3) + 1.0);
    let yfit = GAME_SIZE / (dimy as f64 * (root3 + 3.0) / 2.0 + (root3 + 1.0) / 2.0);
    if yfit < side {
        side = yfit;
    }

    let xshift = side * root3 + side;
    let yshift = side * (root3 + 1.0) / 2.0 + side;

    let mut x0 = (dimx as f64 * (1.0 + root3) + 1.0) * side;
    x0 = (BOARD_SIZE - x0) / 2.0 + side * (1.0 + root3 / 2.0);
    let mut y0 = (dimy as f64 * (3.0 + root3) / 2.0 + (root3 + 1.0) / 2.0) * side;
    y0 = (BOARD_SIZE - y0) / 2.0 + (root3 / 2.0 + 1.0) * side;

    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for j in 0..dimy {
        let posy = y0 + j as f64 * yshift;
        let xoffset = ((j + 1) % 2) as f64 * xshift / 2.0;
        let mut neighbor = if j > 0 { NEIGHBOR_NE } else { 0 };
        for i in 0..dimx {
            if i == dimx - 1 && j % 2 == 0 {
                break;
            }
            if j > 0 {
                if i == 0 {
                    if j % 2 == 0 {
                        neighbor |= NEIGHBOR_NW;
                    }
                } else if j % 2 == 1 {
                    neighbor |= NEIGHBOR_NW;
                }
                if i == dimx - 1 && j % 2 == 1 {
                    neighbor &= !NEIGHBOR_NE;
                }
            }
            if i > 0 {
                neighbor |= NEIGHBOR_W;
            }
            let posx = x0 + xoffset + i as f64 * xshift;
            symmetry_unit(&mut builder, Point::new(posx, posy), side, neighbor)?;
        }
    }

    let geo = builder.build()?;
    let (ntiles, nvertex, nlines) = GEO_PARAMS[size];
    if geo.num_tiles() != ntiles || geo.num_vertices() != nvertex || geo.num_edges() != nlines {
        return Err(GeometryError::Invalid(format!(
            "trihex size {size} produced {}/{}/{} tiles/vertex/lines, expected {ntiles}/{nvertex}/{nlines}",
            geo.num_tiles(),
            geo.num_vertices(),
            geo.num_edges()
        )));
    }
    Ok(geo)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn size_zero_matches_geo_params() {
        let geo = build(0).unwrap();
        assert_eq!(geo.num_tiles(), 46);
        assert_eq!(geo.num_vertices(), 42);
        assert_eq!(geo.num_edges(), 87);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(build(5).is_err());
    }
}
