//! Brute-force DFS solver/enumerator: walks the continuation graph forward
//! from a starting ON edge, backtracking on contradictions, and counts every
//! closed-loop solution it finds. Grounded on `brute-force.c`.

use rand::Rng;

use crate::error::BruteForceError;
use crate::geometry::{Direction, EdgeId, Geometry};
use crate::solve::{follow_on, Hints, LineState, PuzzleState};

/// One entry in the explicit backtracking stack: which edge was set ON at
/// this depth, which continuation indices have already been tried from it
/// (the `routes` bitmask), and the direction to keep walking in.
struct Step {
    edge: EdgeId,
    /// State `edge` had before this step turned it ON (ON for the very first
    /// step, since that edge was already part of the seed fragment; for every
    /// step pushed afterward, whatever the continuation edge's state actually
    /// was — it can already be ON if pre-solving left a disjoint fragment
    /// that this step's edge reconnects to, not always OFF).
    old_state: LineState,
    direction: Direction,
    routes: u32,
}

/// Like [`check_valid`], plus a check no vertex has more than two ON edges —
/// the deductive solver's validity check never needs this (it never creates
/// a branch), but the backtracker tries raw continuations and must reject
/// them before they ever reach [`check_loop`]. Mirrors `brute_force_check_valid`.
fn check_valid(state: &PuzzleState, geo: &Geometry, hints: &Hints) -> bool {
    if !crate::solve::check_valid(state, geo, hints) {
        return false;
    }
    geo.vertices
        .iter()
        .all(|vertex| vertex.edges.iter().filter(|&&e| state.state(e) == LineState::On).count() <= 2)
}

/// Walk from `start` in `direction` until reaching an open end (a `None`
/// continuation) or returning to `start` (a closed loop already). Mirrors the
/// "make sure we reach an open end" preamble in `brute_force`.
fn find_open_end(state: &PuzzleState, geo: &Geometry, start: EdgeId, mut direction: Direction) -> Option<EdgeId> {
    let mut current = start;
    loop {
        match follow_on(state, geo, current, &mut direction) {
            Some(next) if next == start => return None,
            Some(next) => current = next,
            None => return Some(current),
        }
    }
}

/// Whether the ON edges form a single closed loop (ignoring any hint
/// count — that's [`check_valid`]'s job). Mirrors `brute_force_check_loop`.
fn check_loop(state: &PuzzleState, geo: &Geometry) -> bool {
    let mut remaining: Vec<bool> = (0..geo.num_edges()).map(|i| state.state(EdgeId(i)) == LineState::On).collect();
    let mut left: usize = remaining.iter().filter(|&&b| b).count();

    if left > 0 {
        let Some(start_idx) = remaining.iter().position(|&b| b) else { return false };
        let start = EdgeId(start_idx);
        let mut current = start;
        let mut direction = Direction::In;
        let mut closed = false;
        loop {
            remaining[current.index()] = false;
            left -= 1;
            match follow_on(state, geo, current, &mut direction) {
                Some(next) if next == start => {
                    closed = true;
                    break;
                }
                Some(next) => current = next,
                None => break,
            }
        }
        if closed {
            if left > 0 {
                return false;
            }
            return true;
        }
        // open fragment: not a solution, but keep scanning is pointless.
        return false;
    }
    false
}

/// Run the backtracking search from the current ON/OFF/CROSSED state,
/// returning the number of single-closed-loop solutions reachable by only
/// ever turning OFF edges ON (never touching an edge already ON or
/// CROSSED). `rng` picks the starting ON edge and direction, matching the
/// source's randomized entry point. Mirrors `brute_force`.
pub fn solve_brute_force<R: Rng + ?Sized>(
    geo: &Geometry,
    hints: &Hints,
    rng: &mut R,
) -> Result<(Vec<LineState>, u32), BruteForceError> {
    let mut state = PuzzleState::new(geo.num_edges(), hints);
    crate::solve::rules::l_init_zero_cells(&mut state, geo, hints);
    crate::solve::rules::l_init_maxnumber_neighbors(&mut state, geo, hints);
    crate::solve::cross_lines(&mut state, geo, hints);
    solve_brute_force_from(&mut state, geo, hints, rng)
}

/// Like [`solve_brute_force`] but continues from an already-prepared
/// [`PuzzleState`] (e.g. one the deductive solver partially solved).
pub fn solve_brute_force_from<R: Rng + ?Sized>(
    state: &mut PuzzleState,
    geo: &Geometry,
    hints: &Hints,
    rng: &mut R,
) -> Result<(Vec<LineState>, u32), BruteForceError> {
    let on_edges: Vec<EdgeId> = (0..geo.num_edges()).map(EdgeId).filter(|&e| state.state(e) == LineState::On).collect();
    if on_edges.is_empty() {
        return Err(BruteForceError::NoInitialOn);
    }

    let start_on = on_edges[rng.gen_range(0..on_edges.len())];
    let direction = if rng.gen_bool(0.5) { Direction::In } else { Direction::Out };
    let Some(start) = find_open_end(state, geo, start_on, direction) else {
        return Err(BruteForceError::LoopAttemptedOnClosed);
    };

    // Mirrors the source's fixed-size step stack (`geo->nlines - count + 1`):
    // every step is meant to claim one more edge that was OFF at the start of
    // the search, so the stack can never legitimately grow past this many
    // entries. The source enforces it with `g_assert(stack->pos < stack->size)`;
    // here it comes back as an error instead of aborting the process.
    let off_at_start = geo.num_edges() - on_edges.len();
    let stack_limit = off_at_start + 1;

    let mut stack: Vec<Step> = vec![Step { edge: start, old_state: LineState::On, direction, routes: 0 }];
    let mut num_solutions: u32 = 0;

    loop {
        if stack.len() > stack_limit {
            return Err(BruteForceError::StepStackExhausted { limit: stack_limit });
        }
        let Some(&Step { edge: current, old_state, direction, routes }) = stack.last() else { break };
        let valid = check_valid(state, geo, hints);

        if valid && check_loop(state, geo) {
            num_solutions += 1;
            state.set_raw(current, old_state);
            stack.pop();
            continue;
        }
        if !valid {
            state.set_raw(current, old_state);
            stack.pop();
            continue;
        }

        let list_len = geo.edge(current).route_count(direction);
        if list_len > 32 {
            return Err(BruteForceError::UnboundedContinuation { edge: current.index(), routes: list_len });
        }

        let mut routes = routes;
        let mut chosen = None;
        for i in 0..list_len {
            if routes & (1 << i) != 0 {
                continue;
            }
            let candidate = geo.edge(current).route(direction, i).unwrap();
            if state.state(candidate) == LineState::Crossed {
                routes |= 1 << i;
                continue;
            }
            chosen = Some((i, candidate));
            break;
        }
        stack.last_mut().unwrap().routes = routes;

        let Some((i, candidate)) = chosen else {
            state.set_raw(current, old_state);
            stack.pop();
            continue;
        };

        let mut next_direction = direction;
        let next_edge = geo.goto_next(current, &mut next_direction, i).unwrap();
        debug_assert_eq!(next_edge, candidate);

        stack.last_mut().unwrap().routes |= 1 << i;
        let old_state = state.state(next_edge);
        state.set_raw(next_edge, LineState::On);
        stack.push(Step { edge: next_edge, old_state, direction: next_direction, routes: 0 });
    }

    Ok((state.states().to_vec(), num_solutions))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::TileId;
    use crate::tiles::square;
    use rand::SeedableRng;

    /// A full-hint board lets the backtracker wander through states with a
    /// branching (ON-degree > 2) vertex; `check_loop` must never be asked to
    /// judge one of those, since it assumes at most one fragment per vertex.
    /// With so many edges already ON before the search starts, the walk can
    /// also reconnect disjoint pre-existing fragments over and over without
    /// ever backtracking, which is exactly what the step stack's bound
    /// catches (`StepStackExhausted`) instead of running forever — that
    /// outcome is expected here and isn't a panic.
    #[test]
    fn full_hint_board_never_panics() {
        let geo = square::build(3).unwrap();
        for seed in 0..5u64 {
            let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            let loop_states = crate::loopgen::build_loop(&geo, &mut rng);
            let hints: Hints = (0..geo.num_tiles())
                .map(|i| {
                    Some(
                        geo.tile(TileId(i))
                            .edges
                            .iter()
                            .filter(|&&e| loop_states[e.index()] == LineState::On)
                            .count() as u8,
                    )
                })
                .collect();

            // Any outcome is acceptable here — a full-hint board can already
            // be a closed loop, or exhaust the step stack reconnecting
            // fragments. Only a panic would mean the guards above failed.
            let _ = solve_brute_force(&geo, &hints, &mut rng);
        }
    }
}

