//! The seven deductive rules (L-init plus L0..L5), one function per rule.
//! Each takes the mutable puzzle state and returns how many edges it changed;
//! the driver in [`super`] uses that count to decide whether to advance to
//! the next rule level or restart at L0. Grounded function-for-function on
//! `game-solver.c`.

use super::{edge_touches_tile, find_shared_side, follow_on, Hints, LineState, PuzzleState};
use crate::geometry::{Direction, EdgeId, Geometry, TileId};

/// Cross every side of every zero-hint cell. Runs once, before the leveled
/// rules. Mirrors `solve_handle_zero_squares`.
pub fn l_init_zero_cells(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for (i, hint) in hints.iter().enumerate() {
        if *hint != Some(0) {
            continue;
        }
        let tile = TileId(i);
        state.deactivate(tile);
        for &e in &geo.tile(tile).edges {
            if state.set_crossed(e) {
                count += 1;
            }
        }
    }
    count
}

/// For each (sides-1)-hinted cell, look at its neighbor across each vertex:
/// if that neighbor is also (sides-1)-hinted, the two cells' shared boundary
/// (or, if diagonal, everything not touching the shared vertex) must be ON.
/// Runs once, before the leveled rules. Mirrors `solve_handle_maxnumber_squares`.
pub fn l_init_maxnumber_neighbors(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        let sides = geo.tile(tile).sides();
        if !state.active(tile) || hints[i] != Some((sides - 1) as u8) {
            continue;
        }
        for &vertex_id in geo.tile(tile).vertices.iter() {
            let vertex = geo.vertex(vertex_id);
            if vertex.edges.len() == 2 {
                for &e in &vertex.edges {
                    if state.set_on(e) {
                        count += 1;
                    }
                }
                continue;
            }

            let neighbor = vertex.tiles.iter().copied().find(|&t| {
                t != tile && hints[t.index()] == Some((geo.tile(t).sides() - 1) as u8) && state.active(t)
            });
            let Some(neighbor) = neighbor else { continue };

            if let Some((pos1, pos2, shared)) = find_shared_side(geo, tile, neighbor) {
                if state.set_on(shared) {
                    count += 1;
                }
                count += set_on_except_adjacent(state, geo, tile, pos1);
                count += set_on_except_adjacent(state, geo, neighbor, pos2);
            } else {
                for &e in &geo.tile(tile).edges {
                    if !geo.edge(e).has_end(vertex_id) && state.set_on(e) {
                        count += 1;
                    }
                }
                for &e in &geo.tile(neighbor).edges {
                    if !geo.edge(e).has_end(vertex_id) && state.set_on(e) {
                        count += 1;
                    }
                }
            }
        }
    }
    count
}

/// Sets ON every side of `tile` except the one at `shared_pos` and its two
/// immediate neighbors in the side cycle (mirrors the `for(k=2;k<nsides-1;++k)`
/// loop in `solve_handle_maxnumber_squares`).
fn set_on_except_adjacent(state: &mut PuzzleState, geo: &Geometry, tile: TileId, shared_pos: usize) -> usize {
    let edges = geo.tile(tile).edges.clone();
    let n = edges.len();
    let mut count = 0;
    for k in 2..n.saturating_sub(1) {
        let pos = (shared_pos + k) % n;
        if state.set_on(edges[pos]) {
            count += 1;
        }
    }
    count
}

/// L0: a vertex with exactly one ON edge and exactly one OFF edge left has
/// only one way to continue the loop. Mirrors `solve_handle_trivial_vertex`.
pub fn l0_trivial_vertex(state: &mut PuzzleState, geo: &Geometry) -> usize {
    let mut count = 0;
    for vertex in &geo.vertices {
        let on = vertex.edges.iter().filter(|&&e| state.state(e) == LineState::On).count();
        let off: Vec<EdgeId> = vertex.edges.iter().copied().filter(|&e| state.state(e) == LineState::Off).collect();
        if on == 1 && off.len() == 1 && state.set_on(off[0]) {
            count += 1;
        }
    }
    count
}

/// L1: a hinted cell whose remaining non-crossed sides exactly equal its
/// hint has no more choice: every OFF side must become ON. Mirrors
/// `solve_handle_trivial_squares`.
pub fn l1_trivial_cell(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        if hints[i].is_none() || !state.active(tile) {
            continue;
        }
        let sides = geo.tile(tile).sides();
        let crossed = state.crossed_count(geo, tile);
        if sides - crossed == hints[i].unwrap() as usize {
            state.deactivate(tile);
            let offs: Vec<EdgeId> =
                geo.tile(tile).edges.iter().copied().filter(|&e| state.state(e) == LineState::Off).collect();
            for e in offs {
                if state.set_on(e) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// L2: a cell hinted 1 or (sides-1) with a corner vertex that has no exit
/// outside the cell: cross both cell-sides at that corner if the hint is 1,
/// or set both ON if the hint is (sides-1). Mirrors `solve_handle_corner`.
pub fn l2_corner(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        let sides = geo.tile(tile).sides();
        let hint = hints[i];
        if !state.active(tile) || (hint != Some(1) && hint != Some((sides - 1) as u8)) {
            continue;
        }
        for &vertex_id in geo.tile(tile).vertices.iter() {
            if !is_vertex_cornered(state, geo, tile, vertex_id) {
                continue;
            }
            let vertex = geo.vertex(vertex_id);
            for &e in &vertex.edges {
                if !edge_touches_tile(geo, e, tile) {
                    continue;
                }
                if hint == Some(1) {
                    if state.set_crossed(e) {
                        count += 1;
                    }
                } else if state.set_on(e) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Whether every edge at `vertex` other than `tile`'s own sides is CROSSED:
/// the loop cannot escape this corner outside of `tile`. Mirrors
/// `is_vertex_cornered`.
fn is_vertex_cornered(state: &PuzzleState, geo: &Geometry, tile: TileId, vertex: crate::geometry::VertexId) -> bool {
    geo.vertex(vertex).edges.iter().all(|&e| edge_touches_tile(geo, e, tile) || state.state(e) == LineState::Crossed)
}

/// L3: a (sides-1)-hinted cell with a single ON edge arriving at one of its
/// vertices from outside must route the loop straight through: cross every
/// other OFF edge leaving that vertex, and set ON every cell-side that
/// doesn't touch it. Mirrors `solve_handle_maxnumber_incoming_line`.
pub fn l3_maxnumber_incoming(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        let sides = geo.tile(tile).sides();
        if hints[i] != Some((sides - 1) as u8) || !state.active(tile) {
            continue;
        }
        for &vertex_id in geo.tile(tile).vertices.iter() {
            let vertex = geo.vertex(vertex_id);
            let on_edges: Vec<EdgeId> =
                vertex.edges.iter().copied().filter(|&e| state.state(e) == LineState::On).collect();
            if on_edges.len() != 1 || edge_touches_tile(geo, on_edges[0], tile) {
                continue;
            }

            for &e in &vertex.edges {
                if state.state(e) == LineState::Off && !edge_touches_tile(geo, e, tile) && state.set_crossed(e) {
                    count += 1;
                }
            }
            for &e in &geo.tile(tile).edges {
                if !geo.edge(e).has_end(vertex_id) && state.set_on(e) {
                    count += 1;
                }
            }
            break;
        }
    }
    count
}

/// L4: find the two open ends of the longest ON fragment; if they're exactly
/// one edge apart, crossing that edge would close a short loop prematurely,
/// so cross it. Returns the fragment length found (0 if every ON edge is
/// already part of a closed loop, which signals to the driver that this
/// search made no progress). Mirrors `solve_handle_loop_bottleneck`.
pub fn l4_loop_bottleneck(state: &mut PuzzleState, geo: &Geometry) -> usize {
    let mut lin_mask = vec![false; geo.num_edges()];
    for i in 0..geo.num_edges() {
        lin_mask[i] = state.state(EdgeId(i)) == LineState::On;
    }

    for i in 0..geo.num_edges() {
        if !lin_mask[i] {
            continue;
        }
        lin_mask[i] = false;
        let mut dir1 = Direction::In;
        let mut dir2 = Direction::Out;
        let mut end1 = EdgeId(i);
        let mut end2 = EdgeId(i);
        let mut stuck1 = false;
        let mut stuck2 = false;
        let mut length = 0usize;
        let mut closed = false;

        loop {
            if !stuck1 {
                match follow_on(state, geo, end1, &mut dir1) {
                    Some(next) if next == end2 => {
                        closed = true;
                        break;
                    }
                    Some(next) => {
                        end1 = next;
                        lin_mask[next.index()] = false;
                        length += 1;
                    }
                    None => stuck1 = true,
                }
            }
            if !stuck2 {
                match follow_on(state, geo, end2, &mut dir2) {
                    Some(next) if next == end1 => {
                        closed = true;
                        break;
                    }
                    Some(next) => {
                        end2 = next;
                        lin_mask[next.index()] = false;
                        length += 1;
                    }
                    None => stuck2 = true,
                }
            }
            if stuck1 && stuck2 {
                break;
            }
        }

        // Quit unexpectedly (a closed loop), not every ON edge has been
        // exhausted: no bottleneck to find anywhere else either.
        if closed {
            return 0;
        }

        let vertex = if dir1 == Direction::In { geo.edge(end1).ends[0] } else { geo.edge(end1).ends[1] };
        let bridging = if dir2 == Direction::In {
            (0..geo.edge(end2).route_count(Direction::In))
                .filter_map(|k| geo.edge(end2).route(Direction::In, k))
                .find(|&e| geo.edge(e).has_end(vertex))
        } else {
            (0..geo.edge(end2).route_count(Direction::Out))
                .filter_map(|k| geo.edge(end2).route(Direction::Out, k))
                .find(|&e| geo.edge(e).has_end(vertex))
        };
        if let Some(bridge) = bridging {
            if state.state(bridge) != LineState::Crossed && state.set_crossed(bridge) {
                return length;
            }
        }
        continue;
    }
    0
}

/// L5: a hinted cell missing exactly one ON edge, whose unique incoming ON
/// edge at one of its vertices arrives from outside the cell with no other
/// OFF exit available there: the cell's missing edge cannot leave through
/// that vertex, so cross every cell-side not touching it. Mirrors
/// `solve_handle_squares_net_1`.
pub fn l5_squares_net1(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;
    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        if !state.active(tile) {
            continue;
        }
        let hint = match hints[i] {
            Some(h) => h as usize,
            None => continue,
        };
        let on = state.on_count(geo, tile);
        if hint.wrapping_sub(on) != 1 {
            continue;
        }

        for &vertex_id in geo.tile(tile).vertices.iter() {
            let vertex = geo.vertex(vertex_id);
            let mut on_edge = None;
            let mut on_count = 0;
            let mut exits = 0;
            for &e in &vertex.edges {
                match state.state(e) {
                    LineState::On => {
                        on_edge = Some(e);
                        on_count += 1;
                    }
                    LineState::Off if !edge_touches_tile(geo, e, tile) => exits += 1,
                    _ => {}
                }
            }
            let Some(on_edge) = on_edge else { continue };
            if on_count != 1 || edge_touches_tile(geo, on_edge, tile) || exits > 0 {
                continue;
            }

            for &e in &geo.tile(tile).edges {
                if !geo.edge(e).has_end(vertex_id) && state.state(e) == LineState::Off && state.set_crossed(e) {
                    count += 1;
                }
            }
        }
    }
    count
}
