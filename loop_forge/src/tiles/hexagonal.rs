//! Hexagonal tiling: flat-top hexagons packed in offset columns. Grounded on
//! `hex-tile.c`'s `build_hex_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;

/// Build a hexagonal board roughly `size` hexagons across. Mirrors the
/// source's raw dimension parameter (as opposed to the 0..5 size index used
/// by the other non-grid families); the GUI's spinbutton for this family
/// only ever offers 5..25, and sizes much below that can make `dimx`
/// collapse to zero and yield an empty board.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    if size == 0 {
        return Err(GeometryError::Invalid("hexagonal board needs at least one hexagon across".into()));
    }

    let mut num_x = (size / 2) as f64 * 3.0;
    num_x += if size % 2 == 1 { 2.0 } else { 0.5 };
    let num_y = 3.0f64.sqrt() * size as f64;

    let side = GAME_SIZE / num_y;
    let height = 3.0f64.sqrt() * side;

    let extra = ((num_y - num_x) / 1.5).floor();
    num_x += extra * 1.5;
    let extra = extra as i64;
    let dimx = size as i64 + extra;
    let dimy = size as i64;

    let x0 = BOARD_MARGIN + (GAME_SIZE - num_x * side) / 2.0;
    let y0 = BOARD_MARGIN + (GAME_SIZE - num_y * side) / 2.0;

    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for i in 0..dimx {
        let posx = x0 + i as f64 * (side + side / 2.0);
        let yoffset = if i % 2 != 0 { height / 2.0 } else { 0.0 };
        for j in 0..dimy {
            if j == 0 && i % 2 == 0 {
                continue;
            }
            let posy = y0 + yoffset + j as f64 * height;
            let pts = [
                Point::new(posx, posy),
                Point::new(posx + side / 2.0, posy - height / 2.0),
                Point::new(posx + side * 1.5, posy - height / 2.0),
                Point::new(posx + 2.0 * side, posy),
                Point::new(posx + side * 1.5, posy + height / 2.0),
                Point::new(posx + side / 2.0, posy + height / 2.0),
            ];
            builder.add_tile(&pts, None)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_a_sensible_board() {
        let geo = build(5).unwrap();
        assert!(geo.num_tiles() > 10);
        assert!(geo.tiles.iter().all(|t| t.sides() == 6));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(build(0).is_err());
    }
}
