//! Square tiling: a `dim x dim` grid of unit cells. Grounded on
//! `square-tile.c`'s `build_square_board`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;

/// Build a `dim x dim` grid of squares, `dim` in each direction.
pub fn build(dim: usize) -> Result<Geometry, GeometryError> {
    if dim == 0 {
        return Err(GeometryError::Invalid("square board needs at least one tile per side".into()));
    }
    let dim = dim as f64;
    let side = GAME_SIZE / dim;
    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    let pos = |i: f64, j: f64| {
        Point::new(GAME_SIZE / dim * i + BOARD_MARGIN, GAME_SIZE / dim * j + BOARD_MARGIN)
    };

    let dim_i = dim as usize;
    for j in 0..dim_i {
        for i in 0..dim_i {
            let (i, j) = (i as f64, j as f64);
            builder.add_tile(
                &[pos(i, j), pos(i + 1.0, j), pos(i + 1.0, j + 1.0), pos(i, j + 1.0)],
                None,
            )?;
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
        assert_eq!(geo.num_tiles(), 16);
        assert_eq!(geo.num_vertices(), 25);
        assert_eq!(geo.num_edges(), 40);
    }

    #[test]
    fn zero_dim_is_rejected() {
        assert!(build(0).is_err());
    }
}
