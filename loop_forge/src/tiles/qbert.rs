//! Qbert (quasiregular rhombic) tiling: three rhombs arranged around each
//! lattice point, clipped to a rounded game area. Grounded on
//! `qbert-tile.c`'s `build_qbert_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;
const GAME_LEFT: f64 = BOARD_MARGIN - 1.0;
const GAME_RIGHT: f64 = BOARD_SIZE - BOARD_MARGIN + 1.0;

fn rhomb_inside(pts: &[Point; 4]) -> bool {
    pts.iter().all(|p| p.x >= GAME_LEFT && p.x <= GAME_RIGHT && p.y >= GAME_LEFT && p.y <= GAME_RIGHT)
}

fn fill_unit(builder: &mut GeometryBuilder, pos: Point, side: f64) -> Result<(), GeometryError> {
    let root3 = 3.0f64.sqrt();

    let top_right = [
        pos,
        Point::new(pos.x, pos.y - side),
        Point::new(pos.x + side * root3 / 2.0, pos.y - side / 2.0),
        Point::new(pos.x + side * root3 / 2.0, pos.y + side / 2.0),
    ];
    if rhomb_inside(&top_right) {
        builder.add_tile(&top_right, None)?;
    }

    let bottom = [
        pos,
        Point::new(pos.x + side * root3 / 2.0, pos.y + side / 2.0),
        Point::new(pos.x, pos.y + side),
        Point::new(pos.x - side * root3 / 2.0, pos.y + side / 2.0),
    ];
    if rhomb_inside(&bottom) {
        builder.add_tile(&bottom, None)?;
    }

    let top_left = [
        pos,
        Point::new(pos.x - side * root3 / 2.0, pos.y + side / 2.0),
        Point::new(pos.x - side * root3 / 2.0, pos.y - side / 2.0),
        Point::new(pos.x, pos.y - side),
    ];
    if rhomb_inside(&top_left) {
        builder.add_tile(&top_left, None)?;
    }

    Ok(())
}

/// Build a qbert board roughly `num_x` vertical rhombs wide.
pub fn build(num_x: usize) -> Result<Geometry, GeometryError> {
    if num_x == 0 {
        return Err(GeometryError::Invalid("qbert board needs at least one rhomb across".into()));
    }
    let num_x = num_x as f64;
    let root3 = 3.0f64.sqrt();

    let mut side = GAME_SIZE / (num_x * root3 / 2.0);
    let y0 = GAME_SIZE / side;
    let num_y = y0.round();
    if y0.ceil() == num_y {
        side = GAME_SIZE / y0.ceil();
    }
    let num_y = num_y as i64;

    let dimx = (num_x / 2.0).ceil() as i64;
    let dimy = (GAME_SIZE / (side * 3.0 / 2.0) + 1.0) as i64;

    let mut x0 = BOARD_MARGIN + root3 * side / 2.0;
    x0 += (GAME_SIZE - num_x * (side * root3 / 2.0)) / 2.0;
    let mut y0 = BOARD_MARGIN + side;
    y0 += (GAME_SIZE - num_y as f64 * side) / 2.0;
    if num_y % 3 == 1 {
        y0 -= side;
    }

    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for j in 0..dimy {
        let posy = y0 + j as f64 * (side + side / 2.0);
        let xoffset = x0 - (j % 2) as f64 * (root3 * side / 2.0);
        for i in 0..(dimx + j % 2) {
            let posx = xoffset + i as f64 * (root3 * side);
            fill_unit(&mut builder, Point::new(posx, posy), side)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_rhombs_only() {
        let geo = build(6).unwrap();
        assert!(geo.num_tiles() > 0);
        assert!(geo.tiles.iter().all(|t| t.sides() == 4));
    }

    #[test]
    fn zero_is_rejected() {
        assert!(build(0).is_err());
    }
}
