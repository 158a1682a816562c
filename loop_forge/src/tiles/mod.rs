//! Board generators: one module per tiling family, each emitting a stream of
//! polygons into a [`GeometryBuilder`](crate::geometry::GeometryBuilder).
//! Grounded on the `*-tile.c` family under the original sources (e.g.
//! `square-tile.c`, `triangle-tile.c`, `qbert-tile.c`, ...).

pub mod cairo;
pub mod cartwheel;
pub mod hexagonal;
pub mod penrose;
pub mod qbert;
pub mod snub;
pub mod square;
pub mod trihex;
pub mod triangular;

use crate::error::GeometryError;
use crate::geometry::Geometry;

/// A supported tiling family. Corresponds 1:1 to the source's `enum
/// tile_types` in `tiles.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Square,
    Triangular,
    Hexagonal,
    Qbert,
    Cairo,
    Snub,
    Trihex,
    Penrose,
    Cartwheel,
}

/// Build a board of the given `kind`. `size` is the family's own size
/// parameter: a raw grid dimension (5..25 in the source's own spinbutton
/// range) for [`TileKind::Square`], [`TileKind::Triangular`],
/// [`TileKind::Hexagonal`] and [`TileKind::Qbert`], and a 0..=4 size index
/// (as the source's `gameinfo.size` combo box) for the rest.
pub fn build_geometry(kind: TileKind, size: usize) -> Result<Geometry, GeometryError> {
    match kind {
        TileKind::Square => square::build(size),
        TileKind::Triangular => triangular::build(size),
        TileKind::Hexagonal => hexagonal::build(size),
        TileKind::Qbert => qbert::build(size),
        TileKind::Cairo => cairo::build(size),
        TileKind::Snub => snub::build(size),
        TileKind::Trihex => trihex::build(size),
        TileKind::Penrose => penrose::build(size),
        TileKind::Cartwheel => cartwheel::build(size),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_family_builds_a_connected_board() {
        for kind in [
            TileKind::Square,
            TileKind::Triangular,
            TileKind::Hexagonal,
            TileKind::Qbert,
            TileKind::Cairo,
            TileKind::Snub,
            TileKind::Trihex,
            TileKind::Penrose,
            TileKind::Cartwheel,
        ] {
            let size = match kind {
                TileKind::Square | TileKind::Triangular => 4,
                TileKind::Hexagonal | TileKind::Qbert => 5,
                _ => 1,
            };
            let geo = build_geometry(kind, size).unwrap_or_else(|e| panic!("{kind:?} failed: {e}"));
            assert!(geo.num_tiles() > 0, "{kind:?} produced no tiles");
            assert!(geo.num_edges() > 0, "{kind:?} produced no edges");
        }
    }
}
