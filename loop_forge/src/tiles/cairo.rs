//! Cairo (pentagonal) tiling: four irregular pentagons arranged around each
//! "eye" symmetry unit. Grounded on `cairo-tile.c`'s
//! `build_cairo_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;
const GAME_LEFT: f64 = BOARD_MARGIN - 1.0;
const GAME_RIGHT: f64 = BOARD_SIZE - BOARD_MARGIN + 1.0;
const GAME_TOP: f64 = BOARD_MARGIN - 1.0;
const GAME_BOTTOM: f64 = BOARD_SIZE - BOARD_MARGIN + 1.0;

/// Exact `(tiles, vertices, lines)` counts per size index, as the source's
/// own `geo_params` table.
const GEO_PARAMS: [(usize, usize, usize); 5] = [(24, 52, 75), (60, 116, 175), (112, 204, 315), (180, 316, 495), (264, 452, 715)];

fn inside(pts: &[Point]) -> bool {
    pts.iter().all(|p| p.x >= GAME_LEFT && p.x <= GAME_RIGHT && p.y >= GAME_TOP && p.y <= GAME_BOTTOM)
}

fn fill_unit(builder: &mut GeometryBuilder, pos: Point, side: f64) -> Result<(), GeometryError> {
    let root3 = 3.0f64.sqrt();
    let lside = side / (root3 - 1.0);
    let shoulder_h = lside * root3 / 2.0;
    let shoulder_w = 2.0 * shoulder_h;
    let half_side = side / 2.0;
    let height = shoulder_h + lside / 2.0;

    let left = [
        pos,
        Point::new(pos.x, pos.y - side),
        Point::new(pos.x + shoulder_h, pos.y - (shoulder_h + half_side)),
        Point::new(pos.x + height, pos.y - half_side),
        Point::new(pos.x + shoulder_h, pos.y + lside / 2.0),
    ];
    if inside(&left) {
        builder.add_tile(&left, None)?;
    }

    let top = [
        Point::new(pos.x + height, pos.y - half_side),
        Point::new(pos.x + shoulder_h, pos.y - (shoulder_h + half_side)),
        Point::new(pos.x + (height + half_side), pos.y - (height + half_side)),
        Point::new(pos.x + (height + side + lside / 2.0), pos.y - (shoulder_h + half_side)),
        Point::new(pos.x + (height + side), pos.y - half_side),
    ];
    if inside(&top) {
        builder.add_tile(&top, None)?;
    }

    let right = [
        Point::new(pos.x + (height + side), pos.y - half_side),
        Point::new(pos.x + (height + side + lside / 2.0), pos.y - (half_side + shoulder_h)),
        Point::new(pos.x + (2.0 * height + side), pos.y - side),
        Point::new(pos.x + (2.0 * height + side), pos.y),
        Point::new(pos.x + (shoulder_w + shoulder_h), pos.y + lside / 2.0),
    ];
    if inside(&right) {
        builder.add_tile(&right, None)?;
    }

    let bottom = [
        Point::new(pos.x + height, pos.y - half_side),
        Point::new(pos.x + (height + side), pos.y - half_side),
        Point::new(pos.x + (shoulder_w + shoulder_h), pos.y + lside / 2.0),
        Point::new(pos.x + (height + half_side), pos.y + lside),
        Point::new(pos.x + shoulder_h, pos.y + lside / 2.0),
    ];
    if inside(&bottom) {
        builder.add_tile(&bottom, None)?;
    }

    Ok(())
}

/// Build a cairo board at `size` in `0..5`, as the source's own
/// `gameinfo.size` range.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    if size >= GEO_PARAMS.len() {
        return Err(GeometryError::Invalid(format!("cairo size must be 0..{}", GEO_PARAMS.len())));
    }

    let root3 = 3.0f64.sqrt();
    let num_hex = size as i64 + 2;
    let dimy = num_hex * 2 + 1;
    let hex_size = (root3 + 1.0) / (root3 - 1.0) + 1.0;
    let side = GAME_SIZE / (num_hex as f64 * hex_size);
    let lside = side / (root3 - 1.0);
    let height = lside * (root3 + 1.0) / 2.0;
    let shift = height + side / 2.0;

    let x0 = BOARD_MARGIN - shift;
    let y0 = BOARD_MARGIN + side / 2.0;

    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for j in 0..=dimy {
        let posy = y0 + j as f64 * shift;
        let xoffset = (j % 2) as f64 * shift;
        let (i1, i2) = if j == 0 || j == dimy { (1, num_hex - 1) } else { (0, num_hex) };
        for i in i1..=i2 {
            let posx = x0 + xoffset + i as f64 * shift * 2.0;
            fill_unit(&mut builder, Point::new(posx, posy), side)?;
        }
    }

    let geo = builder.build()?;
    let (ntiles, nvertex, nlines) = GEO_PARAMS[size];
    if geo.num_tiles() != ntiles || geo.num_vertices() != nvertex || geo.num_edges() != nlines {
        return Err(GeometryError::Invalid(format!(
            "cairo size {size} produced {}/{}/{} tiles/vertex/lines, expected {ntiles}/{nvertex}/{nlines}",
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
        assert_eq!(geo.num_tiles(), 24);
        assert_eq!(geo.num_vertices(), 52);
        assert_eq!(geo.num_edges(), 75);
        assert!(geo.tiles.iter().all(|t| t.sides() == 5));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(build(5).is_err());
    }
}
