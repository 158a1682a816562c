//! Triangular tiling: alternating upright/upside-down triangles packed into
//! a `size x size` grid of rows. Grounded on `triangle-tile.c`'s
//! `build_triangular_tile_skeleton`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;

/// Build a grid `size` triangle-sides wide and `size` rows tall.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    if size == 0 {
        return Err(GeometryError::Invalid("triangular board needs at least one row".into()));
    }
    let dimx_sides = size as f64;
    let dimy = size;

    let side = GAME_SIZE / (dimx_sides + 0.5);
    let height = side * 3.0f64.sqrt() / 2.0;
    let yoffset = (GAME_SIZE - dimy as f64 * height) / 2.0 + BOARD_MARGIN;
    let xoffset = BOARD_MARGIN + side / 2.0;

    let dimx = 2 * size;
    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for j in 0..dimy {
        let ypos = yoffset + height * j as f64;
        for i in 0..dimx {
            let xpos = xoffset + (side / 2.0) * i as f64;
            let pts = if (i + j) % 2 == 0 {
                // upright
                [
                    Point::new(xpos, ypos),
                    Point::new(xpos + side / 2.0, ypos + height),
                    Point::new(xpos - side / 2.0, ypos + height),
                ]
            } else {
                // upside down
                [
                    Point::new(xpos - side / 2.0, ypos),
                    Point::new(xpos + side / 2.0, ypos),
                    Point::new(xpos, ypos + height),
                ]
            };
            builder.add_tile(&pts, None)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn four_by_four_has_expected_counts() {
        let geo = build(4).unwrap();
        let dimx = 2 * 4;
        let dimy = 4;
        assert_eq!(geo.num_tiles(), dimx * dimy);
        assert_eq!(geo.num_vertices(), (dimx / 2 + 1) * (dimy + 1));
        assert_eq!(geo.num_edges(), dimx / 2 * (dimy + 1) + (dimx + 1) * dimy);
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(build(0).is_err());
    }
}
