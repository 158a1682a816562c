//! Random single-loop builder: starts from one tile's boundary and grows it
//! by repeatedly toggling a random neighboring tile's sides in or out of the
//! loop, until growth stalls three times in a row. Grounded on
//! `build-loop.c`.

use rand::Rng;

use crate::error::BuilderError;
use crate::geometry::{EdgeId, Geometry, TileId};
use crate::solve::LineState;

/// Whether any vertex of `tile` would have exactly one ON-but-not-incoming
/// line if `tile`'s own sides were ignored — i.e. the loop can't pass
/// through a corner of `tile` without touching it. Mirrors `square_has_corner`.
fn tile_has_corner(geo: &Geometry, state: &[LineState], tile: TileId) -> bool {
    for &v in &geo.tile(tile).vertices {
        let mut count = 0;
        for &e in &geo.vertex(v).edges {
            if geo.tile(tile).edges.contains(&e) {
                continue;
            }
            if state[e.index()] == LineState::On {
                if count == 1 {
                    return true;
                }
                count += 1;
            }
        }
    }
    false
}

/// Length of the single contiguous run of ON sides around `tile`, treating
/// the side list as cyclic. Returns 0 if the ON sides are split into more
/// than one run. Mirrors `count_contiguous_lines`.
fn contiguous_on_run(geo: &Geometry, state: &[LineState], tile: TileId) -> usize {
    let edges = &geo.tile(tile).edges;
    let n = edges.len();
    let on: Vec<bool> = edges.iter().map(|&e| state[e.index()] == LineState::On).collect();
    let total_on = on.iter().filter(|&&b| b).count();
    if total_on == 0 || total_on == n {
        return 0;
    }
    // Rotate to start at a run boundary so a wrap-around run stays contiguous.
    let start = (0..n).find(|&i| !on[i]).unwrap();
    let mut max_run = 0;
    let mut run = 0;
    for k in 0..n {
        let i = (start + k) % n;
        if on[i] {
            run += 1;
            max_run = max_run.max(run);
        } else {
            run = 0;
        }
    }
    if max_run == total_on {
        max_run
    } else {
        0
    }
}

/// Whether `tile` can currently be grown into/out of: every side still
/// available, no corner created by excluding it, and its ON sides form a
/// single run no longer than half its perimeter. Mirrors `is_square_available`.
fn tile_available(geo: &Geometry, state: &[LineState], mask: &[bool], tile: TileId, toggled_edge: EdgeId) -> bool {
    if geo.tile(tile).edges.iter().any(|&e| !mask[e.index()]) {
        return false;
    }

    let mut probe = state.to_vec();
    probe[toggled_edge.index()] = LineState::Off;
    if tile_has_corner(geo, &probe, tile) {
        return false;
    }

    let run = contiguous_on_run(geo, state, tile);
    run != 0 && run <= geo.tile(tile).sides() / 2
}

/// Build one random loop over `geo`, returning a per-edge ON/OFF vector (no
/// edge is ever CROSSED by this pass). Mirrors `build_loop`.
pub fn build_loop<R: Rng + ?Sized>(geo: &Geometry, rng: &mut R) -> Vec<LineState> {
    let nedges = geo.num_edges();
    let mut state = vec![LineState::Off; nedges];
    let mut mask = vec![true; nedges];

    let start_tile = TileId(rng.gen_range(0..geo.num_tiles()));
    for &e in &geo.tile(start_tile).edges {
        state[e.index()] = LineState::On;
    }
    let mut available: usize = geo.tile(start_tile).sides();
    let mut prev_available = 0usize;
    let mut stuck = 0u32;
    let mut num_stuck = 0u32;

    while num_stuck < 3 {
        let on_masked: Vec<EdgeId> = (0..nedges)
            .map(EdgeId)
            .filter(|&e| state[e.index()] == LineState::On && mask[e.index()])
            .collect();
        if on_masked.is_empty() {
            break;
        }
        let edge = on_masked[rng.gen_range(0..on_masked.len())];

        let tiles = geo.edge(edge).tiles.clone();
        if tiles.len() != 2 {
            mask[edge.index()] = false;
            available -= 1;
            advance_stuck_state(geo, &state, &mut mask, &mut available, &mut stuck, &mut prev_available, &mut num_stuck);
            continue;
        }

        let first = rng.gen_range(0..2);
        let candidate = [tiles[first], tiles[1 - first]].into_iter().find(|&t| tile_available(geo, &state, &mask, t, edge));

        let Some(tile) = candidate else {
            mask[edge.index()] = false;
            available -= 1;
            advance_stuck_state(geo, &state, &mut mask, &mut available, &mut stuck, &mut prev_available, &mut num_stuck);
            continue;
        };

        for &e in &geo.tile(tile).edges {
            if state[e.index()] == LineState::On {
                state[e.index()] = LineState::Off;
                mask[e.index()] = false;
                available -= 1;
            } else {
                state[e.index()] = LineState::On;
                mask[e.index()] = true;
                available += 1;
            }
        }
        advance_stuck_state(geo, &state, &mut mask, &mut available, &mut stuck, &mut prev_available, &mut num_stuck);
    }

    state
}

fn advance_stuck_state(
    geo: &Geometry,
    state: &[LineState],
    mask: &mut [bool],
    available: &mut usize,
    stuck: &mut u32,
    prev_available: &mut usize,
    num_stuck: &mut u32,
) {
    *stuck = if *available == *prev_available { *stuck + 1 } else { 0 };
    *prev_available = *available;
    if *stuck > 3 || *available == 0 {
        *num_stuck += 1;
        reset_mask(geo, state, mask, available);
    }
}

fn reset_mask(geo: &Geometry, state: &[LineState], mask: &mut [bool], available: &mut usize) {
    *available = 0;
    for i in 0..geo.num_edges() {
        mask[i] = true;
        if state[i] == LineState::On {
            *available += 1;
        }
    }
}

/// Fluent wrapper around [`build_loop`]. Configure with the `with_*` setters
/// and finish with [`build`](Self::build). Mirrors `GridWalker2DBuilder`'s shape.
pub struct LoopBuilder<'a, R: Rng + ?Sized> {
    geo: Option<&'a Geometry>,
    rng: Option<&'a mut R>,
}

impl<'a, R: Rng + ?Sized> Default for LoopBuilder<'a, R> {
    fn default() -> Self {
        Self { geo: None, rng: None }
    }
}

impl<'a, R: Rng + ?Sized> LoopBuilder<'a, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geo(mut self, geo: &'a Geometry) -> Self {
        self.geo = Some(geo);
        self
    }

    pub fn with_rng(mut self, rng: &'a mut R) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> Result<Vec<LineState>, BuilderError> {
        let mut error = BuilderError::new();
        if self.geo.is_none() {
            error.add_missing_field("geo");
        }
        if self.rng.is_none() {
            error.add_missing_field("rng");
        }
        error.try_throw()?;

        Ok(build_loop(self.geo.unwrap(), self.rng.unwrap()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::GeometryBuilder;
    use crate::geometry::Point;
    use rand::SeedableRng;

    fn grid(n: usize) -> Geometry {
        let mut b = GeometryBuilder::new().with_eps(0.1).with_board_size(n as f64).with_board_margin(0.0);
        for y in 0..n {
            for x in 0..n {
                let x = x as f64;
                let y = y as f64;
                b.add_tile(&[Point::new(x, y), Point::new(x + 1.0, y), Point::new(x + 1.0, y + 1.0), Point::new(x, y + 1.0)], None)
                    .unwrap();
            }
        }
        b.build().unwrap()
    }

    #[test]
    fn loop_builder_without_geo_reports_missing_field() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
        let err = LoopBuilder::new().with_rng(&mut rng).build().unwrap_err();
        assert!(err.to_string().contains("geo"));
    }

    #[test]
    fn loop_builder_matches_build_loop() {
        let geo = grid(4);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let state = LoopBuilder::new().with_geo(&geo).with_rng(&mut rng).build().unwrap();
        for vertex in &geo.vertices {
            let on = vertex.edges.iter().filter(|&&e| state[e.index()] == LineState::On).count();
            assert_ne!(on, 1, "vertex {:?} has a dangling loop end", vertex.id);
        }
    }

    #[test]
    fn built_loop_has_no_degree_one_vertex() {
        let geo = grid(4);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let state = build_loop(&geo, &mut rng);
        for vertex in &geo.vertices {
            let on = vertex.edges.iter().filter(|&&e| state[e.index()] == LineState::On).count();
            assert_ne!(on, 1, "vertex {:?} has a dangling loop end", vertex.id);
        }
    }
}
