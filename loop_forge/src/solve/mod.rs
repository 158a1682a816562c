//! Deductive solver: a layered rule engine over a mutable line-state vector,
//! plus the cross-lines cleanup and validity/solution checks shared by the
//! brute-force solver and the generator.
//!
//! Grounded function-for-function on `game-solver.c`'s `solve_game` driver
//! and its rule handlers.

pub mod combinations;
pub mod difficulty;
pub mod rules;

use crate::geometry::{Direction, EdgeId, Geometry, TileId};

/// The number of distinct rule levels the driver cycles through (L0..L6).
pub const NUM_LEVELS: usize = 7;

/// Per-edge wire state. Encoding matches the source's `gamedata.h`
/// (`LINE_OFF = 0`, `LINE_ON = 1`, `LINE_CROSSED = 2`) so serialized puzzles
/// round-trip with the original format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Off,
    On,
    Crossed,
}

/// Required ON-edge count per cell. `None` means the cell has no hint
/// (unconstrained / hidden), replacing the source's `-1` sentinel.
pub type Hints = Vec<Option<u8>>;

/// Mutable scratch the rule engine works over: one [`LineState`] per edge,
/// plus a "still active" flag per hinted cell so resolved cells are skipped.
#[derive(Debug, Clone)]
pub struct PuzzleState {
    states: Vec<LineState>,
    active: Vec<bool>,
}

impl PuzzleState {
    pub fn new(num_edges: usize, hints: &Hints) -> Self {
        Self {
            states: vec![LineState::Off; num_edges],
            active: hints.iter().map(Option::is_some).collect(),
        }
    }

    pub fn state(&self, e: EdgeId) -> LineState {
        self.states[e.index()]
    }

    pub fn states(&self) -> &[LineState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<LineState> {
        self.states
    }

    /// Whether `tile` still has an unresolved hint (only meaningful when the
    /// cell actually has a hint; hintless cells are always inactive).
    pub fn active(&self, tile: TileId) -> bool {
        self.active[tile.index()]
    }

    pub fn deactivate(&mut self, tile: TileId) {
        self.active[tile.index()] = false;
    }

    /// Sets `e` ON if it's currently OFF. Returns whether it changed.
    pub fn set_on(&mut self, e: EdgeId) -> bool {
        if self.states[e.index()] == LineState::Off {
            self.states[e.index()] = LineState::On;
            true
        } else {
            false
        }
    }

    /// Sets `e` CROSSED if it's currently OFF. Returns whether it changed.
    pub fn set_crossed(&mut self, e: EdgeId) -> bool {
        if self.states[e.index()] == LineState::Off {
            self.states[e.index()] = LineState::Crossed;
            true
        } else {
            false
        }
    }

    pub fn on_count(&self, geo: &Geometry, tile: TileId) -> usize {
        geo.tile(tile)
            .edges
            .iter()
            .filter(|&&e| self.state(e) == LineState::On)
            .count()
    }

    pub fn off_count(&self, geo: &Geometry, tile: TileId) -> usize {
        geo.tile(tile)
            .edges
            .iter()
            .filter(|&&e| self.state(e) == LineState::Off)
            .count()
    }

    pub fn crossed_count(&self, geo: &Geometry, tile: TileId) -> usize {
        geo.tile(tile)
            .edges
            .iter()
            .filter(|&&e| self.state(e) == LineState::Crossed)
            .count()
    }

    /// Force `e` to an arbitrary state, bypassing the OFF-only guard that
    /// [`Self::set_on`]/[`Self::set_crossed`] enforce. Used only by the
    /// combination-trial rule to stage and undo speculative placements.
    pub(crate) fn set_raw(&mut self, e: EdgeId, s: LineState) {
        self.states[e.index()] = s;
    }

    /// A snapshot of both the line states and the cell-active flags, for the
    /// combination-trial rule to restore after each speculative placement.
    pub(crate) fn snapshot(&self) -> (Vec<LineState>, Vec<bool>) {
        (self.states.clone(), self.active.clone())
    }

    pub(crate) fn restore(&mut self, snapshot: &(Vec<LineState>, Vec<bool>)) {
        self.states.copy_from_slice(&snapshot.0);
        self.active.copy_from_slice(&snapshot.1);
    }
}

/// Whether `edge` is one of `tile`'s sides.
pub(crate) fn edge_touches_tile(geo: &Geometry, edge: EdgeId, tile: TileId) -> bool {
    geo.tile(tile).edges.contains(&edge)
}

/// The shared side between two tiles, plus its position within each tile's
/// side list (for wrap-around neighbor arithmetic). Mirrors `find_shared_side`.
pub(crate) fn find_shared_side(geo: &Geometry, a: TileId, b: TileId) -> Option<(usize, usize, EdgeId)> {
    let ta = geo.tile(a);
    let tb = geo.tile(b);
    for (i, &ea) in ta.edges.iter().enumerate() {
        if let Some(j) = tb.edges.iter().position(|&eb| eb == ea) {
            return Some((i, j, ea));
        }
    }
    None
}

/// Run the cross-lines cleanup to a fixed point over vertices, then one pass
/// over hinted cells. Never turns an ON or CROSSED edge back to OFF, so it's
/// safe to call as often as needed. Mirrors `solve_cross_lines`.
pub fn cross_lines(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut total = 0;
    loop {
        let mut changed = false;
        for vertex in &geo.vertices {
            let on = vertex.edges.iter().filter(|&&e| state.state(e) == LineState::On).count();
            let off_edges: Vec<EdgeId> = vertex
                .edges
                .iter()
                .copied()
                .filter(|&e| state.state(e) == LineState::Off)
                .collect();
            if on == 2 {
                for e in off_edges {
                    if state.set_crossed(e) {
                        changed = true;
                        total += 1;
                    }
                }
            } else if on == 0 && off_edges.len() == 1 {
                if state.set_crossed(off_edges[0]) {
                    changed = true;
                    total += 1;
                }
            }
        }
        if !changed {
            break;
        }
    }

    for (i, hint) in hints.iter().enumerate() {
        let tile = TileId(i);
        let Some(hint) = hint else { continue };
        if !state.active(tile) {
            continue;
        }
        if state.on_count(geo, tile) == *hint as usize {
            state.deactivate(tile);
            let offs: Vec<EdgeId> = geo
                .tile(tile)
                .edges
                .iter()
                .copied()
                .filter(|&e| state.state(e) == LineState::Off)
                .collect();
            for e in offs {
                if state.set_crossed(e) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Check the board for inconsistencies: no hinted cell can exceed its hint
/// or fall short even counting remaining OFF edges, and no vertex can have
/// exactly one ON edge and no OFF edge left (a dead end). Mirrors
/// `solve_check_valid_game`.
pub fn check_valid(state: &PuzzleState, geo: &Geometry, hints: &Hints) -> bool {
    for (i, hint) in hints.iter().enumerate() {
        let Some(hint) = hint else { continue };
        let tile = TileId(i);
        let on = state.on_count(geo, tile);
        let off = state.off_count(geo, tile);
        if on > *hint as usize || on + off < *hint as usize {
            return false;
        }
    }
    for vertex in &geo.vertices {
        let on = vertex.edges.iter().filter(|&&e| state.state(e) == LineState::On).count();
        let off = vertex.edges.iter().filter(|&&e| state.state(e) == LineState::Off).count();
        if on == 1 && off == 0 {
            return false;
        }
    }
    true
}

/// Follow the ON subgraph one step further, mirroring `follow_line`: scan the
/// continuation list in `direction` for the first ON edge and report the new
/// direction needed to keep moving away from the shared vertex.
pub fn follow_on(state: &PuzzleState, geo: &Geometry, edge: EdgeId, direction: &mut Direction) -> Option<EdgeId> {
    let lin = geo.edge(edge);
    let list_len = lin.route_count(*direction);
    for i in 0..list_len {
        let cand = lin.route(*direction, i).unwrap();
        if state.state(cand) == LineState::On {
            let shared = match *direction {
                Direction::In => lin.ends[0],
                Direction::Out => lin.ends[1],
            };
            *direction = if geo.edge(cand).ends[0] == shared { Direction::Out } else { Direction::In };
            return Some(cand);
        }
    }
    None
}

/// Whether the ON edges form exactly one closed loop and every hinted cell is
/// resolved (no OFF edges remain on a cell whose hint is satisfied, and no
/// hinted cell is short). An empty ON set counts as solved (scenario: an
/// all-zero board).
pub fn check_solution(state: &PuzzleState, geo: &Geometry, hints: &Hints) -> bool {
    for (i, hint) in hints.iter().enumerate() {
        let Some(hint) = hint else { continue };
        let tile = TileId(i);
        if state.on_count(geo, tile) != *hint as usize || state.off_count(geo, tile) != 0 {
            return false;
        }
    }

    let on_edges: Vec<EdgeId> = (0..geo.num_edges())
        .map(EdgeId)
        .filter(|&e| state.state(e) == LineState::On)
        .collect();
    if on_edges.is_empty() {
        return true;
    }

    let mut visited = vec![false; geo.num_edges()];
    let start = on_edges[0];
    visited[start.index()] = true;
    let mut current = start;
    let mut direction = Direction::In;
    loop {
        match follow_on(state, geo, current, &mut direction) {
            Some(next) if next == start => break,
            Some(next) => {
                if visited[next.index()] {
                    return false;
                }
                visited[next.index()] = true;
                current = next;
            }
            None => return false,
        }
    }
    on_edges.iter().all(|&e| visited[e.index()])
}

/// Outcome of running the deductive solver.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub states: Vec<LineState>,
    pub score: f64,
    pub complete: bool,
    pub level_counts: [u32; NUM_LEVELS],
}

use crate::subscriber::Subscriber;

/// Run the full deductive rule set to a fixed point. Never fails: if the
/// rules can't finish the puzzle, the result simply has `complete = false`
/// and a `score` with the +10 incomplete-solve penalty folded in, matching
/// the source's `solve_game` behavior of always returning *some* solution
/// state for the caller to inspect or hand to
/// [`crate::brute::solve_brute_force`].
pub fn solve(geo: &Geometry, hints: &Hints, sub: &mut dyn Subscriber) -> SolveResult {
    let mut state = PuzzleState::new(geo.num_edges(), hints);
    let mut counts = [0u32; NUM_LEVELS];

    rules::l_init_zero_cells(&mut state, geo, hints);
    rules::l_init_maxnumber_neighbors(&mut state, geo, hints);
    cross_lines(&mut state, geo, hints);

    let mut level: usize = 0;
    let mut last_level: Option<usize> = None;
    while level < NUM_LEVELS {
        let count = match level {
            0 => rules::l0_trivial_vertex(&mut state, geo),
            1 => rules::l1_trivial_cell(&mut state, geo, hints),
            2 => rules::l2_corner(&mut state, geo, hints),
            3 => rules::l3_maxnumber_incoming(&mut state, geo, hints),
            4 => rules::l4_loop_bottleneck(&mut state, geo),
            5 => rules::l5_squares_net1(&mut state, geo, hints),
            6 => combinations::l6_combinations(&mut state, geo, hints),
            _ => unreachable!(),
        };

        if count == 0 {
            level += 1;
        } else {
            sub.rule_fired(level, count);
            let effective = if level == 4 && last_level == Some(4) { 0 } else { count as u32 };
            counts[level] += effective;
            cross_lines(&mut state, geo, hints);
            last_level = Some(level);
            level = 0;
        }
    }

    let score = difficulty::calculate(&counts);
    let complete = check_solution(&state, geo, hints);
    let score = if complete { score } else { score + 10.0 };

    SolveResult { states: state.into_states(), score, complete, level_counts: counts }
}
