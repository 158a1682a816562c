//! Snub square tiling: triangles and squares packed 8-and-4 around each unit
//! cell. Grounded on `snub-tile.c`'s `build_snub_tile_geometry`.

use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryBuilder, Point};

const BOARD_SIZE: f64 = 100.0;
const BOARD_MARGIN: f64 = 5.0;
const GAME_SIZE: f64 = BOARD_SIZE - 2.0 * BOARD_MARGIN;
const GAME_LEFT: f64 = BOARD_MARGIN - 1.0;
const GAME_RIGHT: f64 = BOARD_SIZE - BOARD_MARGIN + 1.0;
const GAME_TOP: f64 = BOARD_MARGIN + 2.0;
const GAME_BOTTOM: f64 = BOARD_SIZE - BOARD_MARGIN - 2.0;

const GEO_PARAMS: [(usize, usize, usize); 5] = [(48, 44, 91), (108, 90, 197), (192, 152, 343), (300, 230, 529), (432, 324, 755)];

fn inside(pts: &[Point]) -> bool {
    pts.iter().all(|p| p.x >= GAME_LEFT && p.x <= GAME_RIGHT && p.y >= GAME_TOP && p.y <= GAME_BOTTOM)
}

fn fill_unit(builder: &mut GeometryBuilder, pos: Point, side: f64) -> Result<(), GeometryError> {
    let half = side / 2.0;
    let height = side * 3.0f64.sqrt() / 2.0;
    let sq_wide = height + half;
    let shift = |p: Point| Point::new(p.x + sq_wide, p.y + sq_wide);
    let shift_back = |p: Point| Point::new(p.x + sq_wide, p.y - sq_wide);

    let tri_left_up = [pos, Point::new(pos.x + half, pos.y - height), Point::new(pos.x + side, pos.y)];
    if inside(&tri_left_up) {
        builder.add_tile(&tri_left_up, None)?;
    }
    let tri_bottom_mid = tri_left_up.map(shift);
    if inside(&tri_bottom_mid) {
        builder.add_tile(&tri_bottom_mid, None)?;
    }

    let tri_left_down = [pos, Point::new(pos.x + side, pos.y), Point::new(pos.x + half, pos.y + height)];
    if inside(&tri_left_down) {
        builder.add_tile(&tri_left_down, None)?;
    }
    let tri_top_center = tri_left_down.map(shift_back);
    if inside(&tri_top_center) {
        builder.add_tile(&tri_top_center, None)?;
    }

    let tri_center_left = [
        Point::new(pos.x + side, pos.y),
        Point::new(pos.x + height + side, pos.y - half),
        Point::new(pos.x + height + side, pos.y + half),
    ];
    if inside(&tri_center_left) {
        builder.add_tile(&tri_center_left, None)?;
    }
    let tri_bottom_right = tri_center_left.map(shift);
    if inside(&tri_bottom_right) {
        builder.add_tile(&tri_bottom_right, None)?;
    }

    let tri_bottom_left = [
        Point::new(pos.x + half, pos.y + height),
        Point::new(pos.x + sq_wide, pos.y + sq_wide),
        Point::new(pos.x + half, pos.y + height + side),
    ];
    if inside(&tri_bottom_left) {
        builder.add_tile(&tri_bottom_left, None)?;
    }
    let tri_center_right = tri_bottom_left.map(shift_back);
    if inside(&tri_center_right) {
        builder.add_tile(&tri_center_right, None)?;
    }

    let sq_top_left = [
        Point::new(pos.x + half, pos.y - height),
        Point::new(pos.x + sq_wide, pos.y - sq_wide),
        Point::new(pos.x + sq_wide + half, pos.y - half),
        Point::new(pos.x + side, pos.y),
    ];
    if inside(&sq_top_left) {
        builder.add_tile(&sq_top_left, None)?;
    }
    let sq_bot_right = sq_top_left.map(shift);
    if inside(&sq_bot_right) {
        builder.add_tile(&sq_bot_right, None)?;
    }

    let sq_bottom_left = [
        Point::new(pos.x + side, pos.y),
        Point::new(pos.x + sq_wide + half, pos.y + half),
        Point::new(pos.x + sq_wide, pos.y + sq_wide),
        Point::new(pos.x + half, pos.y + height),
    ];
    if inside(&sq_bottom_left) {
        builder.add_tile(&sq_bottom_left, None)?;
    }
    let sq_top_right = sq_bottom_left.map(shift_back);
    if inside(&sq_top_right) {
        builder.add_tile(&sq_top_right, None)?;
    }

    Ok(())
}

/// Build a snub-square board at `size` in `0..5`.
pub fn build(size: usize) -> Result<Geometry, GeometryError> {
    if size >= GEO_PARAMS.len() {
        return Err(GeometryError::Invalid(format!("snub size must be 0..{}", GEO_PARAMS.len())));
    }

    let root3 = 3.0f64.sqrt();
    let num_eyes = size as i64 + 2;
    let side = GAME_SIZE / ((num_eyes + 1) as f64 + num_eyes as f64 * root3);

    let x0 = BOARD_MARGIN;
    let mut y0 = (GAME_SIZE - (root3 + 1.0) * side * num_eyes as f64) / 2.0;
    y0 = BOARD_MARGIN + y0 + (root3 + 1.0) * side / 2.0;

    let mut builder = GeometryBuilder::new().with_eps(side / 10.0).with_board_size(BOARD_SIZE).with_board_margin(BOARD_MARGIN);

    for j in 0..num_eyes {
        let posy = y0 + j as f64 * (root3 + 1.0) * side;
        for i in 0..=num_eyes {
            let posx = x0 + i as f64 * (root3 + 1.0) * side;
            fill_unit(&mut builder, Point::new(posx, posy), side)?;
        }
    }

    let geo = builder.build()?;
    let (ntiles, nvertex, nlines) = GEO_PARAMS[size];
    if geo.num_tiles() != ntiles || geo.num_vertices() != nvertex || geo.num_edges() != nlines {
        return Err(GeometryError::Invalid(format!(
            "snub size {size} produced {}/{}/{} tiles/vertex/lines, expected {ntiles}/{nvertex}/{nlines}",
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
        assert_eq!(geo.num_tiles(), 48);
        assert_eq!(geo.num_vertices(), 44);
        assert_eq!(geo.num_edges(), 91);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(build(5).is_err());
    }
}
