//! L6: the combination-trial rule. For each still-active hinted cell, try
//! every way of placing its remaining hint across its OFF sides; discard any
//! placement that leaves the board inconsistent; whatever is ON in every
//! surviving placement gets set ON for real.
//!
//! Grounded on `solve-combinations.c`. The source enumerates combinations
//! with a cyclic start-and-spacing scheme to avoid reallocating; this
//! rewrite enumerates them as plain k-combinations of OFF-edge positions,
//! which the source's own comment calls an equivalent, acceptable scheme.

use super::{check_valid, cross_lines, Hints, LineState, PuzzleState};
use crate::geometry::{EdgeId, Geometry, TileId};

/// All k-combinations of `0..n`, smallest index first within each combination.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    if k == 0 {
        return vec![Vec::new()];
    }
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn recurse(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            recurse(i + 1, n, k, current, out);
            current.pop();
        }
    }
    recurse(0, n, k, &mut current, &mut result);
    result
}

pub fn l6_combinations(state: &mut PuzzleState, geo: &Geometry, hints: &Hints) -> usize {
    let mut count = 0;

    for i in 0..geo.num_tiles() {
        let tile = TileId(i);
        let Some(hint) = hints[i] else { continue };
        if !state.active(tile) {
            continue;
        }

        let edges = geo.tile(tile).edges.clone();
        let off_edges: Vec<EdgeId> = edges.iter().copied().filter(|&e| state.state(e) == LineState::Off).collect();
        let on_already = edges.iter().filter(|&&e| state.state(e) == LineState::On).count();
        let needed = hint as usize;
        if needed < on_already {
            continue;
        }
        let k = needed - on_already;
        if off_edges.is_empty() {
            continue;
        }

        let snapshot = state.snapshot();
        let mut always_on: Option<Vec<bool>> = None;

        for combo in combinations(off_edges.len(), k) {
            for (pos, &e) in off_edges.iter().enumerate() {
                if combo.contains(&pos) {
                    state.set_raw(e, LineState::On);
                }
            }
            cross_lines(state, geo, hints);

            if check_valid(state, geo, hints) {
                let on_mask: Vec<bool> = off_edges.iter().map(|&e| state.state(e) == LineState::On).collect();
                always_on = Some(match always_on {
                    None => on_mask,
                    Some(prev) => prev.iter().zip(on_mask.iter()).map(|(&a, &b)| a && b).collect(),
                });
            }

            state.restore(&snapshot);
        }

        if let Some(mask) = always_on {
            let mut any = false;
            for (pos, &e) in off_edges.iter().enumerate() {
                if mask[pos] && state.set_on(e) {
                    count += 1;
                    any = true;
                }
            }
            if any {
                cross_lines(state, geo, hints);
            }
        }
    }

    count
}

#[cfg(test)]
mod test {
    use super::combinations;

    #[test]
    fn three_choose_two() {
        let combos = combinations(3, 2);
        assert_eq!(combos, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
    }

    #[test]
    fn zero_choose_zero_is_the_empty_combination() {
        assert_eq!(combinations(0, 0), vec![Vec::<usize>::new()]);
    }
}
